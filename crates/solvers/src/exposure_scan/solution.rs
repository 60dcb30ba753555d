/// How an exposure scan finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// A candidate met the goal.
    Reached,

    /// The next candidate exceeded the ceiling before the goal was met.
    CeilingExceeded,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of an exposure scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// Final scan status.
    pub status: Status,

    /// Exposure time in seconds: the candidate meeting the goal, the first
    /// candidate past the ceiling, or the last candidate before stopping.
    pub exptime: f64,

    /// Last model value evaluated, if any candidate was evaluated.
    pub value: Option<f64>,

    /// Number of candidates evaluated.
    pub steps: usize,
}

impl Solution {
    /// Returns the exposure time if the goal was reached.
    #[must_use]
    pub fn reached(&self) -> Option<f64> {
        (self.status == Status::Reached).then_some(self.exptime)
    }
}
