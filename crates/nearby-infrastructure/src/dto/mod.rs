//! Data Transfer Objects (DTOs) for persistence.
//!
//! The versioned DTOs describe the on-disk schema of the current stores and
//! migrate forward through `version-migrate`. The legacy DTOs describe the
//! snapshot files of earlier releases; they are only ever read.
//!
//! ### Preferences Version History
//! - **1.0.0**: Units, sorting and preferred bookmark
//! - **1.1.0**: Added `amount_of_results`
//!
//! ### Weather Information Version History
//! - **1.0.0**: Bookmarked and nearby lists

mod legacy;
mod preferences;
mod weather_information;

pub use legacy::{
    LegacyBulkWeatherDataContainer, LegacyErrorData, LegacyOptionValue,
    LegacyPreferencesSnapshot, LegacyWeatherDataContainer, LegacyWeatherInformation,
    LegacyWeatherSnapshot,
};

pub use preferences::{
    PreferencesDTO, PreferencesV1_0_0, PreferencesV1_1_0, create_preferences_migrator,
};

pub use weather_information::{
    WeatherInformationStoreDTO, WeatherInformationStoreV1_0_0,
    create_weather_information_migrator,
};
