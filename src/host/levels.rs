//! Level index arithmetic

/// Index after `current`, wrapping to 0 from the last level
pub fn next_level(current: usize, count: usize) -> usize {
    if current + 1 < count {
        current + 1
    } else {
        0
    }
}

/// Index before `current`, clamped at 0
pub fn previous_level(current: usize) -> usize {
    current.saturating_sub(1)
}
