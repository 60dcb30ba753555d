//! Access to precomputed performance grids.
//!
//! A [`GridStore`] supplies the three grid axes, the performance grids, and
//! the order table on demand. Grids are treated as immutable for the life of
//! the process, so stores hand out shared [`Arc`] handles.
//!
//! - [`MemoryGridStore`]: grids held in memory, validated up front
//! - [`CachedGridStore`]: read-through cache in front of any store
//! - [`FitsGridStore`]: reads the reference FITS file layout from a
//!   directory (feature `fits`)

mod cache;
mod config;
mod error;
#[cfg(feature = "fits")]
mod fits;
mod memory;

use std::{fmt, sync::Arc};

pub use cache::CachedGridStore;
pub use config::StoreConfig;
pub use error::StoreError;
#[cfg(feature = "fits")]
pub use fits::{FitsGridStore, GridFile};
pub use memory::{MemoryGridStore, OrderGrids};

use crate::{AxisId, GridAxis, OrderLocation, OrderTable, PerformanceGrid};

/// Identifies one performance grid within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridId {
    /// Whole-detector RV precision, in m/s.
    RvPrecision,
    /// RV precision of a single order, in m/s.
    OrderRvPrecision(OrderLocation),
    /// SNR of a single order.
    OrderSnr(OrderLocation),
}

impl fmt::Display for GridId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridId::RvPrecision => f.write_str("RV precision"),
            GridId::OrderRvPrecision(location) => write!(f, "RV precision of order {location}"),
            GridId::OrderSnr(location) => write!(f, "SNR of order {location}"),
        }
    }
}

/// A source of grid axes, performance grids, and the order table.
pub trait GridStore {
    /// Returns the sample values of one grid axis.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the axis cannot be read.
    fn axis(&self, id: AxisId) -> Result<Arc<GridAxis>, StoreError>;

    /// Returns one performance grid.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the grid cannot be read or the order
    /// location is out of range.
    fn grid(&self, id: GridId) -> Result<Arc<PerformanceGrid>, StoreError>;

    /// Returns the order table.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the table cannot be read.
    fn order_table(&self) -> Result<Arc<OrderTable>, StoreError>;
}

impl<S: GridStore + ?Sized> GridStore for &S {
    fn axis(&self, id: AxisId) -> Result<Arc<GridAxis>, StoreError> {
        (**self).axis(id)
    }

    fn grid(&self, id: GridId) -> Result<Arc<PerformanceGrid>, StoreError> {
        (**self).grid(id)
    }

    fn order_table(&self) -> Result<Arc<OrderTable>, StoreError> {
        (**self).order_table()
    }
}

impl<S: GridStore + ?Sized> GridStore for Arc<S> {
    fn axis(&self, id: AxisId) -> Result<Arc<GridAxis>, StoreError> {
        (**self).axis(id)
    }

    fn grid(&self, id: GridId) -> Result<Arc<PerformanceGrid>, StoreError> {
        (**self).grid(id)
    }

    fn order_table(&self) -> Result<Arc<OrderTable>, StoreError> {
        (**self).order_table()
    }
}

/// Checks that `grid` is shaped `(exptime, magnitude, temperature)` to match the axes.
pub(crate) fn check_shape(
    id: GridId,
    grid: &PerformanceGrid,
    axes: [&GridAxis; 3],
) -> Result<(), StoreError> {
    let expected = (axes[0].len(), axes[1].len(), axes[2].len());
    let actual = grid.shape();
    if actual == expected {
        Ok(())
    } else {
        Err(StoreError::ShapeMismatch {
            grid: id,
            expected,
            actual,
        })
    }
}
