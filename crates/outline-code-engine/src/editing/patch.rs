/// Result of applying a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Changed byte ranges in the edited text; a deletion is an empty range
    pub changed: Vec<std::ops::Range<usize>>,
    pub version: u64,
}
