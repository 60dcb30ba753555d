//! Spectrograph exposure-time calculator.
//!
//! Estimates radial-velocity precision and signal-to-noise ratio for a
//! stellar target by interpolating precomputed performance grids, and
//! inverts them to find the exposure time needed for a target precision or
//! SNR. [`Calculator::max_exptime`] recommends the longest exposure before
//! any spectral order saturates.
//!
//! ```no_run
//! # #[cfg(feature = "fits")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use etcalc::{Calculator, Target};
//! use etcalc_grid::{CachedGridStore, FitsGridStore, StoreConfig};
//! use uom::si::{
//!     f64::{ThermodynamicTemperature, Time},
//!     thermodynamic_temperature::kelvin,
//!     time::second,
//!     velocity::meter_per_second,
//! };
//!
//! let store = FitsGridStore::open(&StoreConfig::new("grids"))?;
//! let calculator = Calculator::new(CachedGridStore::new(store));
//!
//! let target = Target::new(ThermodynamicTemperature::new::<kelvin>(5500.0), 8.0);
//! let precision = calculator.rv_precision(target, Time::new::<second>(300.0), None)?;
//! println!("{:.3} m/s", precision.get::<meter_per_second>());
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "fits"))]
//! # fn main() {}
//! ```

mod advisor;
mod bounds;
mod calculator;
mod config;
mod curve;
mod error;

pub use advisor::{BindingOrder, MaxExposure};
pub use bounds::BoundsValidator;
pub use calculator::{Calculator, Target};
pub use config::{Config, ConfigError, Settings, SettingsError};
pub use error::{BoundViolation, QueryError};
