//! Unified path management for Nearby Weather files.
//!
//! Every file the application reads or writes is resolved here, so that a
//! single base directory override can relocate all of them (tests, the
//! CLI's `--base-dir`).

use std::path::PathBuf;

use nearby_core::NearbyError;

const APP_DIR_NAME: &str = "NearbyWeather";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform directory for a storage location could not be determined.
    DirectoryNotFound(StorageLocation),
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::DirectoryNotFound(location) => {
                write!(f, "Cannot determine {:?} directory", location)
            }
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for NearbyError {
    fn from(err: PathError) -> Self {
        NearbyError::config(err.to_string())
    }
}

/// Named storage locations.
///
/// `ApplicationSupport` and `Documents` mirror where earlier releases kept
/// their snapshots; `Config` and `Data` hold the current stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageLocation {
    ApplicationSupport,
    Documents,
    Config,
    Data,
}

impl StorageLocation {
    fn override_dir_name(self) -> &'static str {
        match self {
            StorageLocation::ApplicationSupport => "application_support",
            StorageLocation::Documents => "documents",
            StorageLocation::Config => "config",
            StorageLocation::Data => "data",
        }
    }

    fn platform_dir(self) -> Option<PathBuf> {
        match self {
            StorageLocation::ApplicationSupport | StorageLocation::Data => dirs::data_dir(),
            StorageLocation::Documents => dirs::document_dir(),
            StorageLocation::Config => dirs::config_dir(),
        }
    }
}

/// Files known to the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    Config,
    Preferences,
    WeatherInformation,
    Settings,
    LegacyPreferences,
    LegacyWeatherData,
}

impl ServiceType {
    pub fn location(self) -> StorageLocation {
        match self {
            ServiceType::Config | ServiceType::Preferences | ServiceType::Settings => {
                StorageLocation::Config
            }
            ServiceType::WeatherInformation => StorageLocation::Data,
            ServiceType::LegacyPreferences => StorageLocation::ApplicationSupport,
            ServiceType::LegacyWeatherData => StorageLocation::Documents,
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ServiceType::Config => "config.toml",
            ServiceType::Preferences => "preferences.json",
            ServiceType::WeatherInformation => "weather_information.json",
            ServiceType::Settings => "settings.toml",
            ServiceType::LegacyPreferences => "PreferencesManagerStoredContents.json",
            ServiceType::LegacyWeatherData => "WeatherDataManagerStoredContents.json",
        }
    }

    /// Whether the `storage_dir` config override applies to this file.
    fn is_store(self) -> bool {
        matches!(
            self,
            ServiceType::Preferences | ServiceType::WeatherInformation | ServiceType::Settings
        )
    }
}

/// Path resolver.
///
/// # Directory Structure
///
/// ```text
/// <config>/NearbyWeather/          # dirs::config_dir()
/// ├── config.toml
/// ├── preferences.json
/// └── settings.toml
/// <data>/NearbyWeather/            # dirs::data_dir()
/// ├── weather_information.json
/// └── PreferencesManagerStoredContents.json   (legacy, application support)
/// <documents>/NearbyWeather/       # dirs::document_dir()
/// └── WeatherDataManagerStoredContents.json   (legacy)
/// ```
///
/// With a base directory every location becomes `<base>/<location>/`.
#[derive(Debug, Clone, Default)]
pub struct NearbyPaths {
    base_dir: Option<PathBuf>,
    storage_dir: Option<PathBuf>,
}

impl NearbyPaths {
    /// Creates a resolver. `None` uses the platform directories.
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self {
            base_dir,
            storage_dir: None,
        }
    }

    /// Relocates the current stores (preferences, weather, settings).
    pub fn with_storage_dir(mut self, storage_dir: Option<PathBuf>) -> Self {
        self.storage_dir = storage_dir;
        self
    }

    pub fn directory(&self, location: StorageLocation) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base_dir {
            return Ok(base.join(location.override_dir_name()));
        }

        location
            .platform_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::DirectoryNotFound(location))
    }

    pub fn get_path(&self, service: ServiceType) -> Result<PathBuf, PathError> {
        if service.is_store()
            && let Some(storage_dir) = &self.storage_dir
        {
            return Ok(storage_dir.join(service.file_name()));
        }

        Ok(self.directory(service.location())?.join(service.file_name()))
    }
}
