use etcalc_core::Model;

use super::Goal;

/// Events emitted by the exposure scan, one per candidate evaluated.
pub enum Event<'a, M: Model> {
    /// The model was evaluated at a candidate exposure time.
    Evaluated {
        /// Zero-based candidate index.
        step: usize,

        /// Candidate exposure time, in seconds.
        exptime: f64,

        /// Model value at the candidate.
        value: f64,

        /// The goal being scanned for.
        goal: Goal,
    },

    /// The model failed at a candidate exposure time.
    ModelFailed {
        /// Zero-based candidate index.
        step: usize,

        /// Candidate exposure time, in seconds.
        exptime: f64,

        /// The model error.
        error: &'a M::Error,
    },
}

impl<M: Model> Event<'_, M> {
    /// Returns the candidate index.
    #[must_use]
    pub fn step(&self) -> usize {
        match self {
            Self::Evaluated { step, .. } | Self::ModelFailed { step, .. } => *step,
        }
    }

    /// Returns the candidate exposure time.
    #[must_use]
    pub fn exptime(&self) -> f64 {
        match self {
            Self::Evaluated { exptime, .. } | Self::ModelFailed { exptime, .. } => *exptime,
        }
    }
}
