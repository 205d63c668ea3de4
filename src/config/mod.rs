use crate::errors::{AppError, AppResult};
use crate::models::pay_code::PayCodeMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Which entry store backs the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Sqlite,
    Csv,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Sqlite => "sqlite",
            Backend::Csv => "csv",
        }
    }

    pub fn parse(s: &str) -> AppResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Backend::Sqlite),
            "csv" => Ok(Backend::Csv),
            other => Err(AppError::InvalidBackend(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_backend")]
    pub backend: Backend,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_csv_store")]
    pub csv_store: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default)]
    pub pay_codes: PayCodeMap,
    #[serde(default = "default_true")]
    pub subsistence: bool,
    #[serde(default = "default_true")]
    pub derive_split: bool,
    #[serde(default = "default_filename_date_format")]
    pub filename_date_format: String,
    #[serde(default = "default_summary_separator")]
    pub summary_separator: String,
    #[serde(default = "default_true")]
    pub export_summary: bool,
    #[serde(default = "default_true")]
    pub export_descriptions: bool,
}

fn default_backend() -> Backend {
    Backend::Sqlite
}
fn default_database() -> String {
    Config::config_dir()
        .join("dailytime.sqlite")
        .to_string_lossy()
        .to_string()
}
fn default_csv_store() -> String {
    Config::config_dir()
        .join("time_data.csv")
        .to_string_lossy()
        .to_string()
}
fn default_output_dir() -> String {
    "Exports".to_string()
}
fn default_true() -> bool {
    true
}
fn default_filename_date_format() -> String {
    "%m-%d-%Y".to_string()
}
fn default_summary_separator() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            database: default_database(),
            csv_store: default_csv_store(),
            output_dir: default_output_dir(),
            pay_codes: PayCodeMap::default(),
            subsistence: true,
            derive_split: true,
            filename_date_format: default_filename_date_format(),
            summary_separator: default_summary_separator(),
            export_summary: true,
            export_descriptions: true,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dailytime")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("dailytime.yaml")
    }

    /// Load configuration from `path` (or the default location), returning
    /// defaults if the file does not exist.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_file);

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Write the configuration file, creating its directory if needed.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    /// Path of the active store file for the configured backend.
    pub fn store_path(&self) -> &str {
        match self.backend {
            Backend::Sqlite => &self.database,
            Backend::Csv => &self.csv_store,
        }
    }

    /// Point the active backend at a different file (used by `--db`).
    pub fn override_store_path(&mut self, path: &str) {
        match self.backend {
            Backend::Sqlite => self.database = path.to_string(),
            Backend::Csv => self.csv_store = path.to_string(),
        }
    }

    fn validate(&self) -> AppResult<()> {
        match self.filename_date_format.as_str() {
            "%m-%d-%Y" | "%d-%m-%Y" => {}
            other => {
                return Err(AppError::Config(format!(
                    "filename_date_format must be '%m-%d-%Y' or '%d-%m-%Y', got '{other}'"
                )));
            }
        }

        match self.summary_separator.as_str() {
            "-" | "–" => {}
            other => {
                return Err(AppError::Config(format!(
                    "summary_separator must be '-' or '–', got '{other}'"
                )));
            }
        }

        self.pay_codes.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let cfg: Config = serde_yaml::from_str("backend: csv\nsubsistence: false\n").unwrap();
        assert_eq!(cfg.backend, Backend::Csv);
        assert!(!cfg.subsistence);
        assert!(cfg.derive_split);
        assert_eq!(cfg.pay_codes.reg, "211");
        assert_eq!(cfg.filename_date_format, "%m-%d-%Y");
    }

    #[test]
    fn rejects_unknown_date_format() {
        let cfg = Config {
            filename_date_format: "%Y/%m/%d".into(),
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn override_targets_active_backend() {
        let mut cfg = Config {
            backend: Backend::Csv,
            ..Config::default()
        };
        cfg.override_store_path("/tmp/x.csv");
        assert_eq!(cfg.store_path(), "/tmp/x.csv");
        assert_ne!(cfg.database, "/tmp/x.csv");
    }
}
