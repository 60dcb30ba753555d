use thiserror::Error;

/// Configuration for the exposure scan.
///
/// Candidate `j` (starting at 0) is `step × (j + start_offset)` seconds. The
/// defaults give the ladder 12, 14, 16, … s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    step: f64,
    start_offset: u32,
}

/// Errors that can occur when validating an exposure scan config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("step must be finite and positive")]
    Step,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(2.0, 6).unwrap()
    }
}

impl Config {
    /// Creates a new config with a validated step.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Step`] if `step` is not finite and positive.
    pub fn new(step: f64, start_offset: u32) -> Result<Self, ConfigError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(ConfigError::Step);
        }

        Ok(Self { step, start_offset })
    }

    /// Returns the spacing between candidates, in seconds.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Returns the step multiple of the first candidate.
    #[must_use]
    pub fn start_offset(&self) -> u32 {
        self.start_offset
    }

    /// Returns candidate exposure time `index`, in seconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn candidate(&self, index: usize) -> f64 {
        self.step * (index as f64 + f64::from(self.start_offset))
    }
}
