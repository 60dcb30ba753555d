//! Precomputed spectrograph performance grids.
//!
//! A performance grid tabulates RV precision or per-order SNR over exposure
//! time, V magnitude, and effective temperature. This crate provides:
//!
//! - [`GridAxis`]: the sample points of one physical dimension
//! - [`AxisIndexer`]: physical value → fractional grid index, through a
//!   [`MonotoneCubic`] fit (log10 for exposure time)
//! - [`PerformanceGrid`]: trilinear interpolation at a [`GridPoint`]
//! - [`OrderTable`]: spectral orders, their center wavelengths and
//!   saturation soft limits, and order lookup
//! - [`GridStore`]: the data-access capability, with in-memory, cached, and
//!   FITS-backed implementations
//!
//! # Features
//!
//! - `fits`: enables [`FitsGridStore`], which reads the reference grid
//!   directory layout. Requires the `cfitsio` system library.

mod axis;
mod grid;
mod indexer;
mod monotone;
mod order;
mod soft_limits;

pub mod store;

pub use axis::{AxisError, AxisId, GridAxis};
pub use grid::{GridPoint, InterpError, PerformanceGrid};
pub use indexer::{AxisIndexer, IndexScale, IndexerError};
pub use monotone::{MonotoneCubic, MonotoneCubicError};
pub use order::{OrderError, OrderLocation, OrderTable, SpectralOrder};
pub use soft_limits::REFERENCE_SOFT_LIMITS;
#[cfg(feature = "fits")]
pub use store::FitsGridStore;
pub use store::{
    CachedGridStore, GridId, GridStore, MemoryGridStore, OrderGrids, StoreConfig, StoreError,
};
