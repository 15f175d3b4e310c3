//! File-backed preferences repository.

use std::sync::Arc;

use async_trait::async_trait;
use nearby_core::error::{NearbyError, Result};
use nearby_core::preferences::{
    AmountOfResults, DistanceVelocityUnit, Preferences, PreferencesRepository,
    SortingOrientation, TemperatureUnit,
};
use tokio::sync::Mutex;
use version_migrate::{FileStorage, FileStorageStrategy, FormatStrategy, LoadBehavior};

use crate::dto::create_preferences_migrator;
use crate::paths::{NearbyPaths, ServiceType};

const ENTITY: &str = "preferences";

/// Preferences persisted to `preferences.json` through `FileStorage`.
///
/// The current value is cached in memory; every setter updates the cache
/// and writes the whole document back.
///
/// # Example
///
/// ```ignore
/// let repository = FilePreferencesRepository::new(&NearbyPaths::default()).await?;
/// repository.set_temperature_unit(TemperatureUnit::Fahrenheit).await?;
/// ```
#[derive(Clone)]
pub struct FilePreferencesRepository {
    preferences: Arc<Mutex<Preferences>>,
    storage: Arc<Mutex<FileStorage>>,
}

impl FilePreferencesRepository {
    /// Opens the store, creating it with defaults when missing.
    pub async fn new(paths: &NearbyPaths) -> Result<Self> {
        let file_path = paths.get_path(ServiceType::Preferences)?;
        if let Some(parent) = file_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let migrator = create_preferences_migrator();

        let default_preferences = serde_json::to_value(Preferences::default()).map_err(|e| {
            NearbyError::config(format!("Failed to serialize default Preferences: {}", e))
        })?;

        let strategy = FileStorageStrategy::new()
            .with_format(FormatStrategy::Json)
            .with_load_behavior(LoadBehavior::SaveIfMissing)
            .with_default_value(default_preferences);

        let storage = FileStorage::new(file_path, migrator, strategy)?;
        let storage = Arc::new(Mutex::new(storage));

        let initial = {
            let storage_lock = storage.lock().await;
            let stored: Vec<Preferences> = storage_lock.query(ENTITY)?;
            stored.into_iter().next().unwrap_or_default()
        };

        Ok(Self {
            preferences: Arc::new(Mutex::new(initial)),
            storage,
        })
    }

    /// Persists `change` applied to the cached preferences.
    ///
    /// The cache lock is held until the save returns, so concurrent setters
    /// reach the disk in order, and the cache only changes once the write
    /// succeeded.
    async fn update<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut Preferences),
    {
        let mut cached = self.preferences.lock().await;
        let mut updated = cached.clone();
        change(&mut updated);

        let storage = self.storage.clone();
        let snapshot = updated.clone();
        tokio::task::spawn_blocking(move || {
            let mut storage = storage.blocking_lock();
            storage
                .update_and_save(ENTITY, vec![snapshot])
                .map_err(|e| NearbyError::internal(format!("Failed to save preferences: {}", e)))
        })
        .await
        .map_err(|e| NearbyError::internal(format!("Failed to join task: {}", e)))??;

        *cached = updated;
        Ok(())
    }
}

#[async_trait]
impl PreferencesRepository for FilePreferencesRepository {
    async fn get_preferences(&self) -> Result<Preferences> {
        Ok(self.preferences.lock().await.clone())
    }

    async fn set_preferred_bookmark(&self, station_id: Option<i64>) -> Result<()> {
        self.update(|p| p.preferred_bookmark = station_id).await
    }

    async fn set_amount_of_results(&self, amount: AmountOfResults) -> Result<()> {
        self.update(|p| p.amount_of_results = amount).await
    }

    async fn set_temperature_unit(&self, unit: TemperatureUnit) -> Result<()> {
        self.update(|p| p.temperature_unit = unit).await
    }

    async fn set_distance_velocity_unit(&self, unit: DistanceVelocityUnit) -> Result<()> {
        self.update(|p| p.distance_velocity_unit = unit).await
    }

    async fn set_sorting_orientation(&self, orientation: SortingOrientation) -> Result<()> {
        self.update(|p| p.sorting_orientation = orientation).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn paths(temp_dir: &TempDir) -> NearbyPaths {
        NearbyPaths::new(Some(temp_dir.path().to_path_buf()))
    }

    #[tokio::test]
    async fn test_defaults_when_missing() {
        let temp_dir = TempDir::new().unwrap();
        let repository = FilePreferencesRepository::new(&paths(&temp_dir)).await.unwrap();
        assert_eq!(
            repository.get_preferences().await.unwrap(),
            Preferences::default()
        );
    }

    #[tokio::test]
    async fn test_setters_update_cache() {
        let temp_dir = TempDir::new().unwrap();
        let repository = FilePreferencesRepository::new(&paths(&temp_dir)).await.unwrap();

        repository.set_preferred_bookmark(Some(42)).await.unwrap();
        repository
            .set_temperature_unit(TemperatureUnit::Kelvin)
            .await
            .unwrap();

        let preferences = repository.get_preferences().await.unwrap();
        assert_eq!(preferences.preferred_bookmark, Some(42));
        assert_eq!(preferences.temperature_unit, TemperatureUnit::Kelvin);
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        {
            let repository = FilePreferencesRepository::new(&paths(&temp_dir)).await.unwrap();
            repository
                .set_amount_of_results(AmountOfResults::Fifty)
                .await
                .unwrap();
            repository
                .set_sorting_orientation(SortingOrientation::Temperature)
                .await
                .unwrap();
            repository
                .set_distance_velocity_unit(DistanceVelocityUnit::Miles)
                .await
                .unwrap();
        }

        let reopened = FilePreferencesRepository::new(&paths(&temp_dir)).await.unwrap();
        let preferences = reopened.get_preferences().await.unwrap();
        assert_eq!(preferences.amount_of_results, AmountOfResults::Fifty);
        assert_eq!(preferences.sorting_orientation, SortingOrientation::Temperature);
        assert_eq!(preferences.distance_velocity_unit, DistanceVelocityUnit::Miles);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_cached_value() {
        let temp_dir = TempDir::new().unwrap();
        let paths = paths(&temp_dir);
        let repository = FilePreferencesRepository::new(&paths).await.unwrap();

        let file_path = paths.get_path(ServiceType::Preferences).unwrap();
        if file_path.exists() {
            std::fs::remove_file(&file_path).unwrap();
        }
        std::fs::create_dir(&file_path).unwrap();

        let result = repository.set_temperature_unit(TemperatureUnit::Kelvin).await;

        assert!(result.is_err());
        assert_eq!(
            repository.get_preferences().await.unwrap().temperature_unit,
            TemperatureUnit::Celsius
        );
    }

    #[tokio::test]
    async fn test_concurrent_setters_all_persist() {
        let temp_dir = TempDir::new().unwrap();
        let repository = FilePreferencesRepository::new(&paths(&temp_dir)).await.unwrap();

        let (bookmark, unit, orientation) = tokio::join!(
            repository.set_preferred_bookmark(Some(7)),
            repository.set_temperature_unit(TemperatureUnit::Fahrenheit),
            repository.set_sorting_orientation(SortingOrientation::Distance),
        );
        bookmark.unwrap();
        unit.unwrap();
        orientation.unwrap();

        let reopened = FilePreferencesRepository::new(&paths(&temp_dir)).await.unwrap();
        assert_eq!(
            reopened.get_preferences().await.unwrap(),
            repository.get_preferences().await.unwrap()
        );
        let preferences = reopened.get_preferences().await.unwrap();
        assert_eq!(preferences.preferred_bookmark, Some(7));
        assert_eq!(preferences.temperature_unit, TemperatureUnit::Fahrenheit);
        assert_eq!(preferences.sorting_orientation, SortingOrientation::Distance);
    }
}
