use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_SUBMISSION_DELAY_MS: u64 = 500;
pub const DEFAULT_RESET_DELAY_MS: u64 = 3000;
pub const DEFAULT_TITLE: &str = "User Details";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormConfig {
    /// How long the simulated remote call takes.
    pub submission_delay_ms: u64,
    /// How long the success banner stays before the form clears itself.
    pub reset_delay_ms: u64,
    pub title: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            submission_delay_ms: DEFAULT_SUBMISSION_DELAY_MS,
            reset_delay_ms: DEFAULT_RESET_DELAY_MS,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl FormConfig {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let config: Self = match extension.as_deref() {
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&raw).map_err(|source| ConfigError::Yaml {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            Some("json") => serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reset_delay_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "reset_delay_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn submission_delay(&self) -> Duration {
        Duration::from_millis(self.submission_delay_ms)
    }

    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }
}
