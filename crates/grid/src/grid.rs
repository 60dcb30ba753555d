use std::fmt;

use ndarray::{Array1, Array3};
use ninterp::{
    error::{InterpolateError, ValidateError},
    interpolator::Extrapolate,
    prelude::{Interp3DOwned, Interpolator},
    strategy::enums::Strategy3DEnum,
};
use thiserror::Error;

/// Errors from building or evaluating a [`PerformanceGrid`].
#[derive(Error, Debug)]
pub enum InterpError {
    #[error("grid dimension {dim} has {len} samples, at least 2 are required")]
    TooFewSamples { dim: usize, len: usize },

    #[error("grid holds a non-finite value at {index:?}")]
    NonFinite { index: (usize, usize, usize) },

    #[error(transparent)]
    Validation(#[from] ValidateError),

    #[error(transparent)]
    Interpolation(#[from] InterpolateError),
}

/// A position in a performance grid, expressed as fractional indices.
///
/// Each field is a continuous coordinate along the corresponding grid
/// dimension, as produced by an [`AxisIndexer`](crate::AxisIndexer).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    pub exptime: f64,
    pub magnitude: f64,
    pub temperature: f64,
}

impl GridPoint {
    #[must_use]
    pub fn new(exptime: f64, magnitude: f64, temperature: f64) -> Self {
        Self {
            exptime,
            magnitude,
            temperature,
        }
    }
}

/// A 3-D table of instrument performance (RV precision or SNR).
///
/// Dimensions are ordered `(exposure time, magnitude, temperature)` and are
/// addressed by integer rank `0..len`, so lookups take fractional indices
/// rather than physical values. Values between nodes are interpolated
/// trilinearly; points outside the index range are extrapolated from the
/// boundary cells.
pub struct PerformanceGrid {
    shape: (usize, usize, usize),
    interp: Interp3DOwned<f64, Strategy3DEnum>,
}

impl PerformanceGrid {
    /// Creates a grid from its values.
    ///
    /// # Errors
    ///
    /// Returns an error if any dimension has fewer than two samples or any
    /// value is not finite.
    pub fn new(values: Array3<f64>) -> Result<Self, InterpError> {
        let shape = values.dim();

        for (dim, len) in [shape.0, shape.1, shape.2].into_iter().enumerate() {
            if len < 2 {
                return Err(InterpError::TooFewSamples { dim, len });
            }
        }

        if let Some((index, _)) = values.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(InterpError::NonFinite { index });
        }

        let interp = Interp3DOwned::new(
            ranks(shape.0),
            ranks(shape.1),
            ranks(shape.2),
            values,
            ninterp::strategy::Linear.into(),
            Extrapolate::Enable,
        )?;

        Ok(Self { shape, interp })
    }

    /// Returns the grid shape as `(exptime, magnitude, temperature)` lengths.
    #[must_use]
    pub fn shape(&self) -> (usize, usize, usize) {
        self.shape
    }

    /// Interpolates the grid at a fractional-index point.
    ///
    /// # Errors
    ///
    /// Returns an error if the interpolator rejects the point, for example
    /// when a coordinate is NaN.
    pub fn value_at(&self, point: GridPoint) -> Result<f64, InterpError> {
        self.interp
            .interpolate(&[point.exptime, point.magnitude, point.temperature])
            .map_err(Into::into)
    }
}

impl fmt::Debug for PerformanceGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PerformanceGrid")
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}

/// Integer ranks `0, 1, ..., len - 1` used as grid coordinates.
#[allow(clippy::cast_precision_loss)]
fn ranks(len: usize) -> Array1<f64> {
    Array1::from_iter((0..len).map(|k| k as f64))
}
