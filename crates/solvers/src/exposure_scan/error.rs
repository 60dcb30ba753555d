/// Errors that can occur during an exposure scan.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("model error: {0}")]
    Model(Box<dyn std::error::Error + Send + Sync>),

    #[error("goal target must be finite, got {target}")]
    InvalidGoal { target: f64 },

    #[error("ceiling must be finite and positive, got {ceiling}")]
    InvalidCeiling { ceiling: f64 },

    #[error("model returned {value} at exposure time {exptime} s")]
    NonFiniteValue { exptime: f64, value: f64 },
}
