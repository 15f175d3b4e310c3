//! Domain layer of Nearby Weather: preference and weather models, the
//! repository traits the storage layer implements, and unit conversion.

pub mod config;
pub mod error;
pub mod preferences;
pub mod settings;
pub mod units;
pub mod weather;

pub use error::{NearbyError, Result};
pub use preferences::{
    AmountOfResults, DistanceVelocityUnit, Preferences, PreferencesRepository,
    SortingOrientation, TemperatureUnit,
};
pub use settings::SettingsRepository;
pub use weather::{
    Coordinates, WeatherInformation, WeatherInformationRepository, WeatherInformationStore,
};
