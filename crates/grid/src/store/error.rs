use std::path::PathBuf;

use thiserror::Error;

use crate::{AxisError, AxisId, InterpError, OrderError, OrderLocation};

use super::GridId;

/// Errors that can occur when reading from a [`GridStore`](super::GridStore).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid {axis} axis")]
    Axis {
        axis: AxisId,
        #[source]
        source: AxisError,
    },

    #[error("invalid {grid} grid")]
    Grid {
        grid: GridId,
        #[source]
        source: InterpError,
    },

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error("order location {location} is out of range for {len} orders")]
    OrderOutOfRange { location: OrderLocation, len: usize },

    #[error("{grid} grid has shape {actual:?}, axes require {expected:?}")]
    ShapeMismatch {
        grid: GridId,
        expected: (usize, usize, usize),
        actual: (usize, usize, usize),
    },

    #[error("{what} holds {actual} orders, order table has {expected}")]
    OrderCountMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{path}: {reason}")]
    Format { path: PathBuf, reason: String },

    #[cfg(feature = "fits")]
    #[error("failed to read {path}")]
    Fits {
        path: PathBuf,
        #[source]
        source: fitsio::errors::Error,
    },
}
