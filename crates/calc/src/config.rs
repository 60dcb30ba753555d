use std::{
    fs, io,
    path::{Path, PathBuf},
};

use etcalc_grid::StoreConfig;
use etcalc_solvers::exposure_scan::{self, ConfigError as ScanConfigError};
use serde::Deserialize;
use thiserror::Error;

/// Calculator settings.
///
/// Deserializes from a table whose keys all default:
///
/// ```toml
/// wavelength_tolerance_nm = 0.1
/// reference_exptime = 60.0
/// fallback_ceiling = 3600.0
/// scan_step = 2.0
/// scan_start_offset = 6
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "ConfigTable")]
pub struct Config {
    wavelength_tolerance_nm: f64,
    reference_exptime: f64,
    fallback_ceiling: f64,
    scan: exposure_scan::Config,
}

/// Errors that can occur when validating a calculator config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("wavelength tolerance must be finite and positive")]
    WavelengthTolerance,

    #[error("reference exposure time must be finite and positive")]
    ReferenceExptime,

    #[error("fallback ceiling must be finite and positive")]
    FallbackCeiling,

    #[error(transparent)]
    Scan(#[from] ScanConfigError),
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(0.1, 60.0, 3600.0, exposure_scan::Config::default()).unwrap()
    }
}

impl Config {
    /// Creates a new config.
    ///
    /// Exposure times are in seconds.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any value is not finite and positive.
    pub fn new(
        wavelength_tolerance_nm: f64,
        reference_exptime: f64,
        fallback_ceiling: f64,
        scan: exposure_scan::Config,
    ) -> Result<Self, ConfigError> {
        let positive = |value: f64| value.is_finite() && value > 0.0;
        if !positive(wavelength_tolerance_nm) {
            return Err(ConfigError::WavelengthTolerance);
        }
        if !positive(reference_exptime) {
            return Err(ConfigError::ReferenceExptime);
        }
        if !positive(fallback_ceiling) {
            return Err(ConfigError::FallbackCeiling);
        }

        Ok(Self {
            wavelength_tolerance_nm,
            reference_exptime,
            fallback_ceiling,
            scan,
        })
    }

    /// Largest distance, in nm, between a wavelength and an order center.
    #[must_use]
    pub fn wavelength_tolerance_nm(&self) -> f64 {
        self.wavelength_tolerance_nm
    }

    /// Exposure time, in seconds, at which every order's SNR is evaluated.
    #[must_use]
    pub fn reference_exptime(&self) -> f64 {
        self.reference_exptime
    }

    /// Maximum exposure time, in seconds, reported when no order saturates.
    #[must_use]
    pub fn fallback_ceiling(&self) -> f64 {
        self.fallback_ceiling
    }

    #[must_use]
    pub fn scan(&self) -> &exposure_scan::Config {
        &self.scan
    }
}

#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigTable {
    wavelength_tolerance_nm: f64,
    reference_exptime: f64,
    fallback_ceiling: f64,
    scan_step: f64,
    scan_start_offset: u32,
}

impl Default for ConfigTable {
    fn default() -> Self {
        let config = Config::default();
        Self {
            wavelength_tolerance_nm: config.wavelength_tolerance_nm,
            reference_exptime: config.reference_exptime,
            fallback_ceiling: config.fallback_ceiling,
            scan_step: config.scan.step(),
            scan_start_offset: config.scan.start_offset(),
        }
    }
}

impl TryFrom<ConfigTable> for Config {
    type Error = ConfigError;

    fn try_from(table: ConfigTable) -> Result<Self, Self::Error> {
        let scan = exposure_scan::Config::new(table.scan_step, table.scan_start_offset)?;
        Config::new(
            table.wavelength_tolerance_nm,
            table.reference_exptime,
            table.fallback_ceiling,
            scan,
        )
    }
}

/// Settings file contents: where the grids live and how to query them.
///
/// ```toml
/// [store]
/// grid_dir = "/data/etc/grids"
///
/// [calculator]
/// reference_exptime = 60.0
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub store: StoreConfig,

    #[serde(default)]
    pub calculator: Config,
}

/// Errors from loading a settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Settings {
    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a [`SettingsError`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
