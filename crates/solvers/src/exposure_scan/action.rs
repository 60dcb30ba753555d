/// Actions an observer can take during an exposure scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the scan and return the last evaluated candidate.
    StopEarly,
}
