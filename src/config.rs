//! Runtime configuration read from the environment.
//!
//! `main` loads a `.env` file through `dotenvy` first, so every key can
//! also live there. CLI flags override these values per invocation.

use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::path::Path;

use crate::categories::GroupScheme;

pub const DEFAULT_SOURCE: &str = "data/data_vehicle.csv";
pub const DEFAULT_LOG_FILE: &str = "logs/mobility_dashboard.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// File path or `http(s)://` URL of the vehicle CSV (`VEHICLE_DATA_SOURCE`).
    pub source: String,
    /// Demographic grouping for usage counts (`GROUP_SCHEME`).
    pub group_scheme: GroupScheme,
    /// Rolling JSON log file (`LOG_FILE_PATH`).
    pub log_file_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key: &str| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let group_scheme = match get("GROUP_SCHEME") {
            Some(v) => v
                .parse::<GroupScheme>()
                .with_context(|| format!("invalid GROUP_SCHEME '{v}'"))?,
            None => GroupScheme::default(),
        };

        Ok(Self {
            source: get("VEHICLE_DATA_SOURCE").unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
            group_scheme,
            log_file_path: get("LOG_FILE_PATH").unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
        })
    }

    /// Directory and file name for the rolling log. A bare file name logs
    /// into the working directory.
    pub fn log_target(&self) -> (&Path, &OsStr) {
        let path = Path::new(&self.log_file_path);
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let file = path
            .file_name()
            .unwrap_or(OsStr::new("mobility_dashboard.log"));
        (dir, file)
    }
}
