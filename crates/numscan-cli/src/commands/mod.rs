//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod scan;

use std::path::{Path, PathBuf};

use numscan_core::NumscanConfig;

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("numscan")
        .join("config.json")
}

/// Load the configuration given on the command line, or the defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<NumscanConfig> {
    match config_path {
        Some(path) => Ok(NumscanConfig::from_file(Path::new(path))?),
        None => Ok(NumscanConfig::default()),
    }
}
