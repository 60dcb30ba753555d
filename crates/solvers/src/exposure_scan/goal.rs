use std::fmt;

/// The performance target an exposure scan must reach.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Goal {
    /// Value must rise to at least the target (SNR).
    AtLeast(f64),
    /// Value must fall to at most the target (RV precision, lower is better).
    AtMost(f64),
}

impl Goal {
    /// Returns the target value.
    #[must_use]
    pub fn target(self) -> f64 {
        match self {
            Goal::AtLeast(target) | Goal::AtMost(target) => target,
        }
    }

    /// Returns `true` if `value` satisfies the goal.
    #[must_use]
    pub fn is_met(self, value: f64) -> bool {
        match self {
            Goal::AtLeast(target) => value >= target,
            Goal::AtMost(target) => value <= target,
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Goal::AtLeast(target) => write!(f, ">= {target}"),
            Goal::AtMost(target) => write!(f, "<= {target}"),
        }
    }
}
