//! Dashboard Configuration
//! Paths, reference year and column names, optionally overridden by `dashboard.json`.

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Optional override file, looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Names of the three columns the pipeline groups and ranks by.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub region: String,
    pub year: String,
    pub cases: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            region: "nama_kabupaten_kota".to_string(),
            year: "tahun".to_string(),
            cases: "jumlah_penderita_dm".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub static_dir: PathBuf,
    /// Year used for the ranking and category snapshot.
    pub reference_year: i64,
    pub top_n: usize,
    pub bind_addr: SocketAddr,
    pub columns: ColumnNames,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data_dm_jabar.csv"),
            static_dir: PathBuf::from("static"),
            reference_year: 2019,
            top_n: 10,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            columns: ColumnNames::default(),
        }
    }
}

impl DashboardConfig {
    /// Load overrides from `path` if it exists, otherwise fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("{} not found, using default configuration", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::scratch_dir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = scratch_dir("config-missing");
        let config = DashboardConfig::load(&dir.join(CONFIG_FILE)).unwrap();
        assert_eq!(config.reference_year, 2019);
        assert_eq!(config.top_n, 10);
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.columns.region, "nama_kabupaten_kota");
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let dir = scratch_dir("config-partial");
        let path = dir.join(CONFIG_FILE);
        std::fs::write(
            &path,
            r#"{ "reference_year": 2021, "columns": { "cases": "kasus" } }"#,
        )
        .unwrap();

        let config = DashboardConfig::load(&path).unwrap();
        assert_eq!(config.reference_year, 2021);
        assert_eq!(config.columns.cases, "kasus");
        assert_eq!(config.columns.year, "tahun");
        assert_eq!(config.data_path, PathBuf::from("data_dm_jabar.csv"));
    }

    #[test]
    fn malformed_file_is_rejected() {
        let dir = scratch_dir("config-bad");
        let path = dir.join(CONFIG_FILE);
        std::fs::write(&path, "{ reference_year: ").unwrap();

        assert!(matches!(
            DashboardConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
