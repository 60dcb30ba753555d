use std::path::PathBuf;

use serde::Deserialize;

/// Where and how grid data is loaded.
///
/// Passed explicitly to store constructors; there is no global grid path.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Directory holding the grid files.
    pub grid_dir: PathBuf,

    /// Keep grids in memory after the first read.
    #[serde(default = "default_cache")]
    pub cache: bool,
}

impl StoreConfig {
    /// Creates a cached configuration for `grid_dir`.
    pub fn new(grid_dir: impl Into<PathBuf>) -> Self {
        Self {
            grid_dir: grid_dir.into(),
            cache: default_cache(),
        }
    }
}

fn default_cache() -> bool {
    true
}
