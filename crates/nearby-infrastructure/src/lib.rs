pub mod config_service;
pub mod dto;
pub mod migration;
pub mod paths;
pub mod preferences_repository;
pub mod settings_repository;
pub mod storage;
pub mod weather_information_repository;

pub use crate::config_service::ConfigService;
pub use crate::migration::{LegacyDataMigration, MigrationOutcome, StepOutcome};
pub use crate::paths::{NearbyPaths, ServiceType, StorageLocation};
pub use crate::preferences_repository::FilePreferencesRepository;
pub use crate::settings_repository::TomlSettingsRepository;
pub use crate::weather_information_repository::FileWeatherInformationRepository;
