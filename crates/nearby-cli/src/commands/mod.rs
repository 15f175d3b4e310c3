pub mod convert;
pub mod migrate;
pub mod preferences;
pub mod weather;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use nearby_core::config::RootConfig;
use nearby_infrastructure::{
    ConfigService, FilePreferencesRepository, FileWeatherInformationRepository,
    LegacyDataMigration, MigrationOutcome, NearbyPaths, TomlSettingsRepository,
};
use tracing_subscriber::EnvFilter;

/// Resolved paths and configuration shared by every command.
pub struct Context {
    pub paths: NearbyPaths,
    pub config: RootConfig,
}

impl Context {
    pub fn load(base_dir: Option<PathBuf>) -> Result<Self> {
        let config = ConfigService::new(NearbyPaths::new(base_dir.clone()))
            .get_config()
            .context("Failed to load config.toml")?;

        let paths = NearbyPaths::new(base_dir).with_storage_dir(config.storage_dir.clone());
        Ok(Self { paths, config })
    }
}

/// The stores, opened once per invocation.
///
/// Opening creates `preferences.json` and `weather_information.json` with
/// defaults when they are missing, so even read-only commands leave both
/// files behind.
pub struct Stores {
    pub preferences: Arc<FilePreferencesRepository>,
    pub weather: Arc<FileWeatherInformationRepository>,
    pub settings: Arc<TomlSettingsRepository>,
}

impl Stores {
    pub async fn open(paths: &NearbyPaths) -> Result<Self> {
        let preferences = FilePreferencesRepository::new(paths)
            .await
            .context("Failed to open preferences store")?;
        let weather = FileWeatherInformationRepository::new(paths)
            .await
            .context("Failed to open weather store")?;
        let settings =
            TomlSettingsRepository::new(paths).context("Failed to open settings store")?;

        Ok(Self {
            preferences: Arc::new(preferences),
            weather: Arc::new(weather),
            settings: Arc::new(settings),
        })
    }

    fn legacy_migration(&self, paths: &NearbyPaths) -> LegacyDataMigration {
        LegacyDataMigration::new(
            paths.clone(),
            self.preferences.clone(),
            self.weather.clone(),
            self.settings.clone(),
        )
    }
}

/// Opens the stores and imports legacy snapshots before any command reads
/// them. Once the import has completed this only reads the completion flag.
pub async fn launch(context: &Context) -> Result<(Stores, MigrationOutcome)> {
    let stores = Stores::open(&context.paths).await?;
    let outcome = stores
        .legacy_migration(&context.paths)
        .spawn()
        .await
        .context("Legacy data migration task failed")?;

    tracing::debug!(?outcome, "Startup migration finished");
    Ok((stores, outcome))
}

/// Installs the fmt subscriber. `RUST_LOG` wins over the configured level.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use nearby_core::{
        PreferencesRepository, SortingOrientation, TemperatureUnit, WeatherInformationRepository,
    };
    use nearby_infrastructure::ServiceType;
    use tempfile::TempDir;

    const LEGACY_PREFERENCES: &str = r#"{
        "preferredBookmark": {"value": 2643743},
        "amountOfResults": {"value": 1},
        "temperatureUnit": {"value": 2},
        "windspeedUnit": {"value": 0},
        "sortingOrientation": {"value": 2}
    }"#;

    const LEGACY_WEATHER: &str = r#"{
        "bookmarkedWeatherDataObjects": [{
            "locationId": 2643743,
            "weatherInformationDTO": {
                "id": 2643743,
                "name": "London",
                "coord": {"lat": 51.51, "lon": -0.13},
                "main": {"temp": 285.4}
            }
        }]
    }"#;

    fn write(paths: &NearbyPaths, service: ServiceType, content: &str) {
        let path = paths.get_path(service).unwrap();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[tokio::test]
    async fn test_launch_imports_legacy_data_before_reads() {
        let temp_dir = TempDir::new().unwrap();
        let context = Context::load(Some(temp_dir.path().to_path_buf())).unwrap();
        write(&context.paths, ServiceType::LegacyPreferences, LEGACY_PREFERENCES);
        write(&context.paths, ServiceType::LegacyWeatherData, LEGACY_WEATHER);

        let (stores, outcome) = launch(&context).await.unwrap();

        assert!(matches!(outcome, MigrationOutcome::Completed { .. }));
        let preferences = stores.preferences.get_preferences().await.unwrap();
        assert_eq!(preferences.preferred_bookmark, Some(2643743));
        assert_eq!(preferences.temperature_unit, TemperatureUnit::Kelvin);
        assert_eq!(preferences.sorting_orientation, SortingOrientation::Distance);

        let bookmarked = stores.weather.get_bookmarked_weather().await.unwrap();
        assert_eq!(bookmarked.len(), 1);
        assert_eq!(bookmarked[0].station_name, "London");
    }

    #[tokio::test]
    async fn test_second_launch_keeps_changes_made_after_import() {
        let temp_dir = TempDir::new().unwrap();
        let context = Context::load(Some(temp_dir.path().to_path_buf())).unwrap();
        write(&context.paths, ServiceType::LegacyPreferences, LEGACY_PREFERENCES);

        let (stores, _) = launch(&context).await.unwrap();
        stores
            .preferences
            .set_temperature_unit(TemperatureUnit::Celsius)
            .await
            .unwrap();
        drop(stores);

        let (stores, outcome) = launch(&context).await.unwrap();

        assert_eq!(outcome, MigrationOutcome::AlreadyPerformed);
        assert_eq!(
            stores.preferences.get_preferences().await.unwrap().temperature_unit,
            TemperatureUnit::Celsius
        );
    }
}
