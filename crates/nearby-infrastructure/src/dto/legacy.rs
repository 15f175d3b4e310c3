//! Snapshot formats written by earlier releases.
//!
//! These are read once by the legacy migration and never written. Field
//! names follow the old files (camelCase containers, provider field names
//! inside weather payloads).

use serde::Deserialize;

use nearby_core::preferences::{
    AmountOfResults, DistanceVelocityUnit, Preferences, SortingOrientation, TemperatureUnit,
};
use nearby_core::weather::{
    AtmosphericInformation, Coordinates, DayTimeInformation, WeatherCondition, WeatherInformation,
    WindInformation,
};

/// `{"value": ...}` wrapper every legacy option was stored in.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LegacyOptionValue<T> {
    pub value: T,
}

/// Contents of `PreferencesManagerStoredContents.json`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPreferencesSnapshot {
    pub preferred_bookmark: LegacyOptionValue<Option<i64>>,
    pub amount_of_results: LegacyOptionValue<i64>,
    pub temperature_unit: LegacyOptionValue<i64>,
    pub windspeed_unit: LegacyOptionValue<i64>,
    pub sorting_orientation: LegacyOptionValue<i64>,
}

impl LegacyPreferencesSnapshot {
    /// Maps the raw option values; `None` if any of them is out of range.
    pub fn into_preferences(self) -> Option<Preferences> {
        Some(Preferences {
            preferred_bookmark: self.preferred_bookmark.value,
            amount_of_results: AmountOfResults::from_raw(self.amount_of_results.value)?,
            temperature_unit: TemperatureUnit::from_raw(self.temperature_unit.value)?,
            distance_velocity_unit: DistanceVelocityUnit::from_raw(self.windspeed_unit.value)?,
            sorting_orientation: SortingOrientation::from_raw(self.sorting_orientation.value)?,
        })
    }
}

/// Failure recorded next to a fetch result.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LegacyErrorData {
    pub error_type: LegacyOptionValue<i64>,
    #[serde(default)]
    pub http_status_code: Option<i64>,
}

/// One bookmarked station, fetched on its own.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LegacyWeatherDataContainer {
    pub location_id: i64,
    #[serde(default, rename = "errorDataDTO")]
    pub error_data: Option<LegacyErrorData>,
    #[serde(default, rename = "weatherInformationDTO")]
    pub weather_information: Option<LegacyWeatherInformation>,
}

/// Result of one nearby fetch; the error applies to every station.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LegacyBulkWeatherDataContainer {
    #[serde(default, rename = "errorDataDTO")]
    pub error_data: Option<LegacyErrorData>,
    #[serde(default, rename = "weatherInformationDTOs")]
    pub weather_information: Option<Vec<LegacyWeatherInformation>>,
}

/// Contents of `WeatherDataManagerStoredContents.json`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LegacyWeatherSnapshot {
    #[serde(default)]
    pub bookmarked_weather_data_objects: Option<Vec<LegacyWeatherDataContainer>>,
    #[serde(default)]
    pub nearby_weather_data_object: Option<LegacyBulkWeatherDataContainer>,
}

impl LegacyWeatherSnapshot {
    /// Bookmarked payloads in file order, skipping entries without one.
    pub fn bookmarked_weather(&self) -> Vec<WeatherInformation> {
        self.bookmarked_weather_data_objects
            .iter()
            .flatten()
            .filter_map(|container| container.weather_information.clone())
            .map(WeatherInformation::from)
            .collect()
    }

    /// Nearby payloads, empty when the bundle or its list is absent.
    pub fn nearby_weather(&self) -> Vec<WeatherInformation> {
        self.nearby_weather_data_object
            .as_ref()
            .and_then(|bundle| bundle.weather_information.clone())
            .unwrap_or_default()
            .into_iter()
            .map(WeatherInformation::from)
            .collect()
    }
}

// ============================================================================
// Provider payload
// ============================================================================

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LegacyCoordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LegacyWeatherCondition {
    pub id: i64,
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct LegacyAtmosphericInformation {
    pub temp: Option<f64>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub pressure: Option<f64>,
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct LegacyWindInformation {
    pub speed: Option<f64>,
    pub deg: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct LegacyCloudCoverage {
    pub all: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct LegacyDayTimeInformation {
    pub country: Option<String>,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LegacyWeatherInformation {
    pub id: i64,
    pub name: String,
    pub coord: LegacyCoordinates,
    #[serde(default)]
    pub weather: Vec<LegacyWeatherCondition>,
    #[serde(default)]
    pub main: LegacyAtmosphericInformation,
    #[serde(default)]
    pub wind: LegacyWindInformation,
    #[serde(default)]
    pub clouds: LegacyCloudCoverage,
    #[serde(default)]
    pub sys: LegacyDayTimeInformation,
}

impl From<LegacyWeatherInformation> for WeatherInformation {
    fn from(dto: LegacyWeatherInformation) -> Self {
        WeatherInformation {
            station_id: dto.id,
            station_name: dto.name,
            coordinates: Coordinates::new(dto.coord.lat, dto.coord.lon),
            conditions: dto
                .weather
                .into_iter()
                .map(|condition| WeatherCondition {
                    identifier: condition.id,
                    main: condition.main,
                    description: condition.description,
                    icon: condition.icon,
                })
                .collect(),
            atmosphere: AtmosphericInformation {
                temperature_kelvin: dto.main.temp,
                temperature_min_kelvin: dto.main.temp_min,
                temperature_max_kelvin: dto.main.temp_max,
                pressure_hpa: dto.main.pressure,
                humidity_percent: dto.main.humidity,
            },
            wind: WindInformation {
                speed_mps: dto.wind.speed,
                direction_degrees: dto.wind.deg,
            },
            cloud_coverage_percent: dto.clouds.all,
            day_time: DayTimeInformation {
                sunrise: dto.sys.sunrise,
                sunset: dto.sys.sunset,
            },
            country_code: dto.sys.country,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONDON: &str = r#"{
        "id": 2643743,
        "name": "London",
        "coord": {"lat": 51.51, "lon": -0.13},
        "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
        "main": {"temp": 285.4, "temp_min": 284.0, "temp_max": 287.0, "pressure": 1013, "humidity": 81},
        "wind": {"speed": 4.1, "deg": 200},
        "clouds": {"all": 0},
        "sys": {"country": "GB", "sunrise": 1560000000, "sunset": 1560050000}
    }"#;

    #[test]
    fn test_preferences_snapshot_decodes() {
        let json = r#"{
            "preferredBookmark": {"value": 2643743},
            "amountOfResults": {"value": 2},
            "temperatureUnit": {"value": 1},
            "windspeedUnit": {"value": 1},
            "sortingOrientation": {"value": 2}
        }"#;
        let snapshot: LegacyPreferencesSnapshot = serde_json::from_str(json).unwrap();
        let preferences = snapshot.into_preferences().unwrap();

        assert_eq!(preferences.preferred_bookmark, Some(2643743));
        assert_eq!(preferences.amount_of_results, AmountOfResults::Thirty);
        assert_eq!(preferences.temperature_unit, TemperatureUnit::Fahrenheit);
        assert_eq!(preferences.distance_velocity_unit, DistanceVelocityUnit::Miles);
        assert_eq!(preferences.sorting_orientation, SortingOrientation::Distance);
    }

    #[test]
    fn test_preferences_snapshot_null_bookmark() {
        let json = r#"{
            "preferredBookmark": {"value": null},
            "amountOfResults": {"value": 0},
            "temperatureUnit": {"value": 0},
            "windspeedUnit": {"value": 0},
            "sortingOrientation": {"value": 0}
        }"#;
        let snapshot: LegacyPreferencesSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.into_preferences(), Some(Preferences::default()));
    }

    #[test]
    fn test_preferences_snapshot_out_of_range_value() {
        let json = r#"{
            "preferredBookmark": {"value": null},
            "amountOfResults": {"value": 9},
            "temperatureUnit": {"value": 0},
            "windspeedUnit": {"value": 0},
            "sortingOrientation": {"value": 0}
        }"#;
        let snapshot: LegacyPreferencesSnapshot = serde_json::from_str(json).unwrap();
        assert!(snapshot.into_preferences().is_none());
    }

    #[test]
    fn test_weather_payload_conversion() {
        let dto: LegacyWeatherInformation = serde_json::from_str(LONDON).unwrap();
        let info = WeatherInformation::from(dto);

        assert_eq!(info.station_id, 2643743);
        assert_eq!(info.station_name, "London");
        assert_eq!(info.coordinates, Coordinates::new(51.51, -0.13));
        assert_eq!(info.conditions[0].identifier, 800);
        assert_eq!(info.atmosphere.temperature_kelvin, Some(285.4));
        assert_eq!(info.atmosphere.humidity_percent, Some(81.0));
        assert_eq!(info.wind.direction_degrees, Some(200.0));
        assert_eq!(info.cloud_coverage_percent, Some(0.0));
        assert_eq!(info.day_time.sunset, Some(1560050000));
        assert_eq!(info.country_code.as_deref(), Some("GB"));
    }

    #[test]
    fn test_weather_snapshot_drops_missing_payloads() {
        let json = format!(
            r#"{{
                "bookmarkedWeatherDataObjects": [
                    {{"locationId": 1, "weatherInformationDTO": {london}}},
                    {{"locationId": 2, "errorDataDTO": {{"errorType": {{"value": 1}}, "httpStatusCode": 500}}, "weatherInformationDTO": null}}
                ],
                "nearbyWeatherDataObject": null
            }}"#,
            london = LONDON
        );
        let snapshot: LegacyWeatherSnapshot = serde_json::from_str(&json).unwrap();

        let bookmarked = snapshot.bookmarked_weather();
        assert_eq!(bookmarked.len(), 1);
        assert_eq!(bookmarked[0].station_name, "London");
        assert!(snapshot.nearby_weather().is_empty());

        let errored = &snapshot.bookmarked_weather_data_objects.as_ref().unwrap()[1];
        assert_eq!(errored.error_data.as_ref().unwrap().http_status_code, Some(500));
    }

    #[test]
    fn test_weather_snapshot_empty_object() {
        let snapshot: LegacyWeatherSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.bookmarked_weather().is_empty());
        assert!(snapshot.nearby_weather().is_empty());
    }
}
