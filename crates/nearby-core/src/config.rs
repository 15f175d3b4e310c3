use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_log_level() -> String {
    "info".to_string()
}

/// Application configuration loaded from `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct RootConfig {
    /// Default tracing filter, used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Overrides the directory holding the preference, weather and settings
    /// stores.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            storage_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config: RootConfig = toml::from_str("").unwrap();
        assert_eq!(config, RootConfig::default());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_partial_toml() {
        let config: RootConfig = toml::from_str("storage_dir = \"/tmp/nearby\"").unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.storage_dir, Some(PathBuf::from("/tmp/nearby")));
    }
}
