//! Weather information domain models.
//!
//! A `WeatherInformation` is one station's reading as delivered by the
//! weather provider. The storage layer keeps two lists of them: the
//! bookmarked stations and the result of the last nearby fetch.

use std::cmp::Ordering;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use version_migrate::DeriveQueryable as Queryable;

use crate::error::Result;
use crate::preferences::SortingOrientation;

const EARTH_RADIUS_METRES: f64 = 6_371_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance in metres (haversine).
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_METRES * a.sqrt().atan2((1.0 - a).sqrt())
    }
}

/// Provider condition code with its textual description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub identifier: i64,
    pub main: String,
    pub description: String,
    pub icon: String,
}

/// Temperatures are in Kelvin, pressure in hPa, humidity in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AtmosphericInformation {
    pub temperature_kelvin: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_min_kelvin: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_max_kelvin: Option<f64>,
    pub pressure_hpa: Option<f64>,
    pub humidity_percent: Option<f64>,
}

/// Wind speed in metres per second, direction in meteorological degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WindInformation {
    pub speed_mps: Option<f64>,
    pub direction_degrees: Option<f64>,
}

/// Unix timestamps (seconds, UTC).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DayTimeInformation {
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherInformation {
    pub station_id: i64,
    pub station_name: String,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub conditions: Vec<WeatherCondition>,
    #[serde(default)]
    pub atmosphere: AtmosphericInformation,
    #[serde(default)]
    pub wind: WindInformation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_coverage_percent: Option<f64>,
    #[serde(default)]
    pub day_time: DayTimeInformation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

/// Persisted weather lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Default)]
#[queryable(entity = "weather_information")]
pub struct WeatherInformationStore {
    #[serde(default)]
    pub bookmarked: Vec<WeatherInformation>,
    #[serde(default)]
    pub nearby: Vec<WeatherInformation>,
}

/// Sorts `list` in place.
///
/// Name sorting is case-insensitive ascending, temperature sorting puts the
/// warmest station first, and distance sorting puts the closest station to
/// `reference` first. Without a reference, distance sorting is name sorting.
/// Stations without a temperature sort last.
pub fn sort_weather_information(
    list: &mut [WeatherInformation],
    orientation: SortingOrientation,
    reference: Option<Coordinates>,
) {
    let by_name = |a: &WeatherInformation, b: &WeatherInformation| {
        a.station_name
            .to_lowercase()
            .cmp(&b.station_name.to_lowercase())
    };

    match (orientation, reference) {
        (SortingOrientation::Name, _) | (SortingOrientation::Distance, None) => {
            list.sort_by(by_name)
        }
        (SortingOrientation::Temperature, _) => list.sort_by(|a, b| {
            match (a.atmosphere.temperature_kelvin, b.atmosphere.temperature_kelvin) {
                (Some(ta), Some(tb)) => tb.total_cmp(&ta),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => by_name(a, b),
            }
        }),
        (SortingOrientation::Distance, Some(reference)) => list.sort_by(|a, b| {
            let da = reference.distance_to(&a.coordinates);
            let db = reference.distance_to(&b.coordinates);
            da.total_cmp(&db)
        }),
    }
}

/// Repository for the persisted weather lists.
#[async_trait]
pub trait WeatherInformationRepository: Send + Sync {
    async fn get_bookmarked_weather(&self) -> Result<Vec<WeatherInformation>>;

    async fn get_nearby_weather(&self) -> Result<Vec<WeatherInformation>>;

    /// Looks up one bookmarked station by its ID.
    async fn bookmarked_weather(&self, station_id: i64) -> Result<Option<WeatherInformation>> {
        Ok(self
            .get_bookmarked_weather()
            .await?
            .into_iter()
            .find(|info| info.station_id == station_id))
    }

    /// Replaces the bookmarked list.
    async fn set_bookmarked_weather(&self, list: Vec<WeatherInformation>) -> Result<()>;

    /// Replaces the nearby list.
    async fn set_nearby_weather(&self, list: Vec<WeatherInformation>) -> Result<()>;
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Minimal station reading for tests.
    pub fn station(id: i64, name: &str, temperature_kelvin: f64) -> WeatherInformation {
        WeatherInformation {
            station_id: id,
            station_name: name.to_string(),
            coordinates: Coordinates::default(),
            conditions: Vec::new(),
            atmosphere: AtmosphericInformation {
                temperature_kelvin: Some(temperature_kelvin),
                ..AtmosphericInformation::default()
            },
            wind: WindInformation::default(),
            cloud_coverage_percent: None,
            day_time: DayTimeInformation::default(),
            country_code: None,
        }
    }
}
