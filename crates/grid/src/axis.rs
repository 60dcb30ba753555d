use std::fmt;

use thiserror::Error;

/// Identifies one of the three physical axes of a performance grid.
///
/// The declaration order matches the grid's dimension order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisId {
    /// Exposure time, in seconds.
    ExposureTime,
    /// V-band magnitude.
    Magnitude,
    /// Effective temperature, in kelvin.
    Temperature,
}

impl AxisId {
    /// All axes, in grid dimension order.
    pub const ALL: [AxisId; 3] = [AxisId::ExposureTime, AxisId::Magnitude, AxisId::Temperature];

    /// Returns the unit label used in diagnostics.
    #[must_use]
    pub fn unit(self) -> &'static str {
        match self {
            AxisId::ExposureTime => "s",
            AxisId::Magnitude => "mag",
            AxisId::Temperature => "K",
        }
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AxisId::ExposureTime => "exposure time",
            AxisId::Magnitude => "magnitude",
            AxisId::Temperature => "temperature",
        })
    }
}

/// Errors that can occur when constructing a [`GridAxis`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AxisError {
    #[error("axis needs at least 2 samples, got {len}")]
    TooShort { len: usize },

    #[error("axis sample {index} is not finite: {value}")]
    NonFinite { index: usize, value: f64 },

    #[error("axis is not strictly increasing at sample {index} ({previous} -> {value})")]
    NotIncreasing {
        index: usize,
        previous: f64,
        value: f64,
    },
}

/// The discrete sample points of one physical grid dimension.
///
/// Samples are finite and strictly increasing, and there are at least two of
/// them, so the domain is always `[first, last]`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridAxis {
    values: Vec<f64>,
}

impl GridAxis {
    /// Creates an axis from its sample values.
    ///
    /// # Errors
    ///
    /// Returns an [`AxisError`] if there are fewer than two samples, any
    /// sample is not finite, or the samples are not strictly increasing.
    pub fn new(values: impl Into<Vec<f64>>) -> Result<Self, AxisError> {
        let values = values.into();

        if values.len() < 2 {
            return Err(AxisError::TooShort { len: values.len() });
        }

        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(AxisError::NonFinite { index, value });
        }

        for index in 1..values.len() {
            let (previous, value) = (values[index - 1], values[index]);
            if value <= previous {
                return Err(AxisError::NotIncreasing {
                    index,
                    previous,
                    value,
                });
            }
        }

        Ok(Self { values })
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; an axis has at least two samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the smallest sample.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.values[0]
    }

    /// Returns the largest sample.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// Returns `true` if `value` lies within `[min, max]`.
    ///
    /// NaN is never contained.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min()..=self.max()).contains(&value)
    }

    /// Returns the samples as a slice.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}
