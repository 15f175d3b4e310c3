//! Weather information store DTOs and migrations

use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, Versioned};

use nearby_core::weather::{WeatherInformation, WeatherInformationStore};

/// Weather information store V1.0.0.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned, Default)]
#[versioned(version = "1.0.0")]
pub struct WeatherInformationStoreV1_0_0 {
    #[serde(default)]
    pub bookmarked: Vec<WeatherInformation>,
    #[serde(default)]
    pub nearby: Vec<WeatherInformation>,
}

pub type WeatherInformationStoreDTO = WeatherInformationStoreV1_0_0;

impl IntoDomain<WeatherInformationStore> for WeatherInformationStoreV1_0_0 {
    fn into_domain(self) -> WeatherInformationStore {
        WeatherInformationStore {
            bookmarked: self.bookmarked,
            nearby: self.nearby,
        }
    }
}

impl FromDomain<WeatherInformationStore> for WeatherInformationStoreV1_0_0 {
    fn from_domain(store: WeatherInformationStore) -> Self {
        WeatherInformationStoreV1_0_0 {
            bookmarked: store.bookmarked,
            nearby: store.nearby,
        }
    }
}

/// Creates a Migrator for the weather information store.
pub fn create_weather_information_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();
    let path = version_migrate::Migrator::define("weather_information")
        .from::<WeatherInformationStoreV1_0_0>()
        .into_with_save::<WeatherInformationStore>();
    migrator
        .register(path)
        .expect("Failed to register weather_information migration path");
    migrator
}
