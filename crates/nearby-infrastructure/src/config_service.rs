//! Configuration service implementation.
//!
//! Loads the root configuration from `config.toml` in the configuration
//! directory and caches it.

use std::sync::{Arc, RwLock};

use nearby_core::config::RootConfig;
use nearby_core::error::Result;

use crate::paths::{NearbyPaths, ServiceType};

/// Configuration service that loads and caches the root configuration.
///
/// A missing file yields the defaults; it is not created.
#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: NearbyPaths,
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    /// Creates a new ConfigService. Nothing is read until first access.
    pub fn new(paths: NearbyPaths) -> Self {
        Self {
            paths,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the root configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<RootConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = self.load_config()?;

        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = Some(loaded.clone());

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = None;
    }

    fn load_config(&self) -> Result<RootConfig> {
        let path = self.paths.get_path(ServiceType::Config)?;

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config file at {:?}, using defaults", path);
                return Ok(RootConfig::default());
            }
            Err(e) => return Err(e.into()),
        };

        Ok(toml::from_str(&content)?)
    }
}
