/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    /// 1-based position of the current word; equals `total` once complete.
    pub position: usize,
    pub remaining: usize,
    pub is_complete: bool,
}
