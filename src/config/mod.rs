//! Configuration loading and management

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::core::error::ConfigError;
use crate::core::order::{DEFAULT_SALESPERSONS, Roster};

fn default_shop_name() -> String {
    "Beauty Optics".to_string()
}

fn default_table_path() -> PathBuf {
    PathBuf::from("orders.csv")
}

fn default_salespersons() -> Vec<String> {
    DEFAULT_SALESPERSONS.iter().map(|s| s.to_string()).collect()
}

fn default_bind_address() -> String {
    "127.0.0.1:3000".to_string()
}

/// Settings for one shop deployment
///
/// Every field has a default, so an empty YAML document is a valid config.
///
/// ```yaml
/// shop_name: Beauty Optics
/// table_path: data/orders.csv
/// salespersons: [Sukrit, Tanya, Ajit]
/// bind_address: 0.0.0.0:8080
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Shown on the dashboard
    #[serde(default = "default_shop_name")]
    pub shop_name: String,

    /// Location of the CSV order table
    #[serde(default = "default_table_path")]
    pub table_path: PathBuf,

    /// Staff allowed as an order's salesperson
    #[serde(default = "default_salespersons")]
    pub salespersons: Vec<String>,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            shop_name: default_shop_name(),
            table_path: default_table_path(),
            salespersons: default_salespersons(),
            bind_address: default_bind_address(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                ConfigError::IoError {
                    message: e.to_string(),
                }
            }
        })?;

        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
                file: Some(path.display().to_string()),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: None,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.salespersons.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "salespersons".to_string(),
                message: "at least one salesperson is required".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for name in &self.salespersons {
            if name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "salespersons".to_string(),
                    message: "names must not be blank".to_string(),
                });
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "salespersons".to_string(),
                    message: format!("'{}' is listed twice", name),
                });
            }
        }

        if self.bind_address.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "bind_address".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        Ok(())
    }

    pub fn roster(&self) -> Roster {
        Roster::new(self.salespersons.iter().cloned())
    }
}
