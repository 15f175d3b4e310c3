//! File-backed weather information repository.

use std::sync::Arc;

use async_trait::async_trait;
use nearby_core::error::{NearbyError, Result};
use nearby_core::weather::{
    WeatherInformation, WeatherInformationRepository, WeatherInformationStore,
};
use tokio::sync::Mutex;
use version_migrate::{FileStorage, FileStorageStrategy, FormatStrategy, LoadBehavior};

use crate::dto::create_weather_information_migrator;
use crate::paths::{NearbyPaths, ServiceType};

const ENTITY: &str = "weather_information";

/// Bookmarked and nearby weather lists persisted to
/// `weather_information.json`.
#[derive(Clone)]
pub struct FileWeatherInformationRepository {
    store: Arc<Mutex<WeatherInformationStore>>,
    storage: Arc<Mutex<FileStorage>>,
}

impl FileWeatherInformationRepository {
    pub async fn new(paths: &NearbyPaths) -> Result<Self> {
        let file_path = paths.get_path(ServiceType::WeatherInformation)?;
        if let Some(parent) = file_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let default_store = serde_json::to_value(WeatherInformationStore::default())
            .map_err(|e| {
                NearbyError::config(format!("Failed to serialize default weather store: {}", e))
            })?;

        let strategy = FileStorageStrategy::new()
            .with_format(FormatStrategy::Json)
            .with_load_behavior(LoadBehavior::SaveIfMissing)
            .with_default_value(default_store);

        let storage = FileStorage::new(file_path, create_weather_information_migrator(), strategy)?;
        let storage = Arc::new(Mutex::new(storage));

        let initial = {
            let storage_lock = storage.lock().await;
            let stored: Vec<WeatherInformationStore> = storage_lock.query(ENTITY)?;
            stored.into_iter().next().unwrap_or_default()
        };

        Ok(Self {
            store: Arc::new(Mutex::new(initial)),
            storage,
        })
    }

    /// Saves `change` applied to a copy of the cache, then commits the copy.
    async fn update<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut WeatherInformationStore),
    {
        let mut cached = self.store.lock().await;
        let mut updated = cached.clone();
        change(&mut updated);

        let storage = self.storage.clone();
        let snapshot = updated.clone();
        tokio::task::spawn_blocking(move || {
            let mut storage = storage.blocking_lock();
            storage.update_and_save(ENTITY, vec![snapshot]).map_err(|e| {
                NearbyError::internal(format!("Failed to save weather information: {}", e))
            })
        })
        .await
        .map_err(|e| NearbyError::internal(format!("Failed to join task: {}", e)))??;

        *cached = updated;
        Ok(())
    }
}

#[async_trait]
impl WeatherInformationRepository for FileWeatherInformationRepository {
    async fn get_bookmarked_weather(&self) -> Result<Vec<WeatherInformation>> {
        Ok(self.store.lock().await.bookmarked.clone())
    }

    async fn get_nearby_weather(&self) -> Result<Vec<WeatherInformation>> {
        Ok(self.store.lock().await.nearby.clone())
    }

    async fn set_bookmarked_weather(&self, list: Vec<WeatherInformation>) -> Result<()> {
        self.update(|store| store.bookmarked = list).await
    }

    async fn set_nearby_weather(&self, list: Vec<WeatherInformation>) -> Result<()> {
        self.update(|store| store.nearby = list).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nearby_core::weather::{AtmosphericInformation, Coordinates};
    use tempfile::TempDir;

    fn station(id: i64, name: &str) -> WeatherInformation {
        WeatherInformation {
            station_id: id,
            station_name: name.to_string(),
            coordinates: Coordinates::new(52.52, 13.40),
            conditions: Vec::new(),
            atmosphere: AtmosphericInformation {
                temperature_kelvin: Some(290.0),
                ..AtmosphericInformation::default()
            },
            wind: Default::default(),
            cloud_coverage_percent: Some(20.0),
            day_time: Default::default(),
            country_code: Some("DE".to_string()),
        }
    }

    #[tokio::test]
    async fn test_empty_when_missing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = NearbyPaths::new(Some(temp_dir.path().to_path_buf()));
        let repository = FileWeatherInformationRepository::new(&paths).await.unwrap();

        assert!(repository.get_bookmarked_weather().await.unwrap().is_empty());
        assert!(repository.get_nearby_weather().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lists_are_independent_and_persisted() {
        let temp_dir = TempDir::new().unwrap();
        let paths = NearbyPaths::new(Some(temp_dir.path().to_path_buf()));
        {
            let repository = FileWeatherInformationRepository::new(&paths).await.unwrap();
            repository
                .set_bookmarked_weather(vec![station(1, "Berlin")])
                .await
                .unwrap();
            repository
                .set_nearby_weather(vec![station(2, "Potsdam"), station(3, "Spandau")])
                .await
                .unwrap();
        }

        let reopened = FileWeatherInformationRepository::new(&paths).await.unwrap();
        let bookmarked = reopened.get_bookmarked_weather().await.unwrap();
        let nearby = reopened.get_nearby_weather().await.unwrap();

        assert_eq!(bookmarked, vec![station(1, "Berlin")]);
        assert_eq!(nearby.len(), 2);
        assert_eq!(nearby[1].station_name, "Spandau");
    }

    #[tokio::test]
    async fn test_bookmarked_lookup() {
        let temp_dir = TempDir::new().unwrap();
        let paths = NearbyPaths::new(Some(temp_dir.path().to_path_buf()));
        let repository = FileWeatherInformationRepository::new(&paths).await.unwrap();
        repository
            .set_bookmarked_weather(vec![station(1, "Berlin"), station(7, "Hamburg")])
            .await
            .unwrap();

        let found = repository.bookmarked_weather(7).await.unwrap();
        assert_eq!(found.map(|w| w.station_name), Some("Hamburg".to_string()));
        assert!(repository.bookmarked_weather(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_save_keeps_cached_lists() {
        let temp_dir = TempDir::new().unwrap();
        let paths = NearbyPaths::new(Some(temp_dir.path().to_path_buf()));
        let repository = FileWeatherInformationRepository::new(&paths).await.unwrap();
        repository
            .set_bookmarked_weather(vec![station(1, "Berlin")])
            .await
            .unwrap();

        let file_path = paths.get_path(ServiceType::WeatherInformation).unwrap();
        std::fs::remove_file(&file_path).unwrap();
        std::fs::create_dir(&file_path).unwrap();

        let result = repository
            .set_bookmarked_weather(vec![station(2, "Hamburg")])
            .await;

        assert!(result.is_err());
        assert_eq!(
            repository.get_bookmarked_weather().await.unwrap(),
            vec![station(1, "Berlin")]
        );
    }
}
