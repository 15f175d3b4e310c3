//! Flag store backed by `settings.toml`.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use nearby_core::error::{NearbyError, Result};
use nearby_core::settings::SettingsRepository;
use serde::{Deserialize, Serialize};

use crate::paths::{NearbyPaths, ServiceType};
use crate::storage::AtomicTomlFile;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    flags: BTreeMap<String, bool>,
}

/// Settings repository writing through [`AtomicTomlFile`].
///
/// Nothing is cached: every read hits the file, so flags written by another
/// process (or a previous launch) are always observed.
#[derive(Clone)]
pub struct TomlSettingsRepository {
    file: Arc<AtomicTomlFile<SettingsFile>>,
}

impl TomlSettingsRepository {
    pub fn new(paths: &NearbyPaths) -> Result<Self> {
        let path = paths.get_path(ServiceType::Settings)?;
        Ok(Self {
            file: Arc::new(AtomicTomlFile::new(path)),
        })
    }
}

#[async_trait]
impl SettingsRepository for TomlSettingsRepository {
    async fn get_flag(&self, key: &str) -> Result<Option<bool>> {
        let file = self.file.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || -> Result<Option<bool>> {
            let settings = file.load()?.unwrap_or_default();
            Ok(settings.flags.get(&key).copied())
        })
        .await
        .map_err(|e| NearbyError::internal(format!("Failed to join task: {}", e)))?
    }

    async fn set_flag(&self, key: &str, value: bool) -> Result<()> {
        let file = self.file.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || {
            file.update(SettingsFile::default(), |settings| {
                settings.flags.insert(key, value);
            })
            .map_err(NearbyError::from)
        })
        .await
        .map_err(|e| NearbyError::internal(format!("Failed to join task: {}", e)))?
    }
}
