use std::sync::Arc;

use thiserror::Error;

use crate::{
    axis::GridAxis,
    monotone::{MonotoneCubic, MonotoneCubicError},
};

/// How physical values are transformed before indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexScale {
    /// Values are indexed as-is.
    #[default]
    Linear,
    /// Values are indexed by their base-10 logarithm.
    ///
    /// Used for geometrically spaced axes such as exposure time.
    Log10,
}

impl IndexScale {
    fn apply(self, value: f64) -> f64 {
        match self {
            IndexScale::Linear => value,
            IndexScale::Log10 => value.log10(),
        }
    }
}

/// Errors that can occur when building an [`AxisIndexer`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndexerError {
    #[error("log-scaled axis requires positive samples, found {value}")]
    NonPositiveSample { value: f64 },

    #[error(transparent)]
    Fit(#[from] MonotoneCubicError),
}

/// Maps physical values on one axis to continuous fractional grid indices.
///
/// The mapping is a monotone cubic through `(scale(sample_k), k)` for every
/// sample `k`, so a sample value maps exactly to its integer rank and values
/// between samples map smoothly between ranks. Values outside the axis extend
/// the boundary segments and may produce indices outside `[0, len - 1]`.
#[derive(Debug, Clone)]
pub struct AxisIndexer {
    axis: Arc<GridAxis>,
    scale: IndexScale,
    curve: MonotoneCubic,
}

impl AxisIndexer {
    /// Builds an indexer for `axis` using the given scale.
    ///
    /// # Errors
    ///
    /// Returns [`IndexerError::NonPositiveSample`] if `scale` is
    /// [`IndexScale::Log10`] and the axis has a sample `<= 0`.
    pub fn new(axis: Arc<GridAxis>, scale: IndexScale) -> Result<Self, IndexerError> {
        if scale == IndexScale::Log10 && axis.min() <= 0.0 {
            return Err(IndexerError::NonPositiveSample { value: axis.min() });
        }

        let x = axis.values().iter().map(|&v| scale.apply(v)).collect();
        let ranks = (0..axis.len()).map(|k| k as f64).collect();
        let curve = MonotoneCubic::new(x, ranks)?;

        Ok(Self { axis, scale, curve })
    }

    /// Builds a linear-scale indexer.
    ///
    /// # Errors
    ///
    /// Infallible for a valid [`GridAxis`]; the `Result` mirrors [`AxisIndexer::new`].
    pub fn linear(axis: Arc<GridAxis>) -> Result<Self, IndexerError> {
        Self::new(axis, IndexScale::Linear)
    }

    /// Builds a log10-scale indexer.
    ///
    /// # Errors
    ///
    /// Returns an error if the axis has a non-positive sample.
    pub fn log10(axis: Arc<GridAxis>) -> Result<Self, IndexerError> {
        Self::new(axis, IndexScale::Log10)
    }

    /// Returns the fractional index of `value`.
    #[must_use]
    pub fn index(&self, value: f64) -> f64 {
        self.curve.evaluate(self.scale.apply(value))
    }

    /// Returns the underlying axis.
    #[must_use]
    pub fn axis(&self) -> &GridAxis {
        &self.axis
    }

    /// Returns the scale applied before indexing.
    #[must_use]
    pub fn scale(&self) -> IndexScale {
        self.scale
    }
}
