//! Core traits shared by the exposure-time calculator crates.
//!
//! - [`Model`]: a callable that maps a typed input to a typed output
//! - [`Snapshot`]: a captured input/output pair from a model call
//! - [`Observer`]: receives solver events and optionally returns control actions

mod model;
mod observer;

pub use observer::Observer;
pub use {model::Model, model::Snapshot};
