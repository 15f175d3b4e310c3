//! User preference domain models and the repository that persists them.
//!
//! Every option enum carries the integer raw value that earlier releases
//! wrote to disk, so that snapshots from those releases can be mapped
//! without lookup tables.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use version_migrate::DeriveQueryable as Queryable;

use crate::error::Result;
use crate::weather::{Coordinates, WeatherInformation, sort_weather_information};

/// How many nearby stations a single nearby fetch should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AmountOfResults {
    #[default]
    Ten,
    Twenty,
    Thirty,
    Forty,
    Fifty,
}

impl AmountOfResults {
    pub const ALL: [AmountOfResults; 5] = [
        AmountOfResults::Ten,
        AmountOfResults::Twenty,
        AmountOfResults::Thirty,
        AmountOfResults::Forty,
        AmountOfResults::Fifty,
    ];

    pub fn from_raw(raw: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.raw() == raw)
    }

    pub fn raw(self) -> i64 {
        match self {
            AmountOfResults::Ten => 0,
            AmountOfResults::Twenty => 1,
            AmountOfResults::Thirty => 2,
            AmountOfResults::Forty => 3,
            AmountOfResults::Fifty => 4,
        }
    }

    /// Number of stations this option stands for.
    pub fn count(self) -> usize {
        (self.raw() as usize + 1) * 10
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    pub const ALL: [TemperatureUnit; 3] = [
        TemperatureUnit::Celsius,
        TemperatureUnit::Fahrenheit,
        TemperatureUnit::Kelvin,
    ];

    pub fn from_raw(raw: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.raw() == raw)
    }

    pub fn raw(self) -> i64 {
        match self {
            TemperatureUnit::Celsius => 0,
            TemperatureUnit::Fahrenheit => 1,
            TemperatureUnit::Kelvin => 2,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "Celsius",
            TemperatureUnit::Fahrenheit => "Fahrenheit",
            TemperatureUnit::Kelvin => "Kelvin",
        }
    }
}

/// Unit system used for both wind speed and distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DistanceVelocityUnit {
    #[default]
    Kilometres,
    Miles,
}

impl DistanceVelocityUnit {
    pub const ALL: [DistanceVelocityUnit; 2] =
        [DistanceVelocityUnit::Kilometres, DistanceVelocityUnit::Miles];

    pub fn from_raw(raw: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.raw() == raw)
    }

    pub fn raw(self) -> i64 {
        match self {
            DistanceVelocityUnit::Kilometres => 0,
            DistanceVelocityUnit::Miles => 1,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            DistanceVelocityUnit::Kilometres => "Kilometres",
            DistanceVelocityUnit::Miles => "Miles",
        }
    }
}

/// Ordering applied to the nearby station list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortingOrientation {
    #[default]
    Name,
    Temperature,
    Distance,
}

impl SortingOrientation {
    pub const ALL: [SortingOrientation; 3] = [
        SortingOrientation::Name,
        SortingOrientation::Temperature,
        SortingOrientation::Distance,
    ];

    pub fn from_raw(raw: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.raw() == raw)
    }

    pub fn raw(self) -> i64 {
        match self {
            SortingOrientation::Name => 0,
            SortingOrientation::Temperature => 1,
            SortingOrientation::Distance => 2,
        }
    }
}

/// User preferences that persist across restarts.
///
/// # Fields
///
/// * `preferred_bookmark` - Station ID of the bookmark shown first (e.g. in
///   notifications). `None` when the user has not picked one.
/// * `amount_of_results` - Size of the nearby station list.
/// * `temperature_unit` - Unit used for every temperature descriptor.
/// * `distance_velocity_unit` - Unit used for wind speed and distances.
/// * `sorting_orientation` - Ordering of the nearby station list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Default)]
#[queryable(entity = "preferences")]
pub struct Preferences {
    pub preferred_bookmark: Option<i64>,
    pub amount_of_results: AmountOfResults,
    pub temperature_unit: TemperatureUnit,
    pub distance_velocity_unit: DistanceVelocityUnit,
    pub sorting_orientation: SortingOrientation,
}

impl Preferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Orders `nearby` by the sorting preference and cuts it down to the
    /// configured amount of results.
    ///
    /// `reference` is the user's location; distance sorting falls back to
    /// name sorting without it.
    pub fn apply_to_nearby(
        &self,
        mut nearby: Vec<WeatherInformation>,
        reference: Option<Coordinates>,
    ) -> Vec<WeatherInformation> {
        sort_weather_information(&mut nearby, self.sorting_orientation, reference);
        nearby.truncate(self.amount_of_results.count());
        nearby
    }
}

/// Repository for managing user preferences.
///
/// Each setter persists immediately; there is no batching.
#[async_trait]
pub trait PreferencesRepository: Send + Sync {
    async fn get_preferences(&self) -> Result<Preferences>;

    async fn set_preferred_bookmark(&self, station_id: Option<i64>) -> Result<()>;

    async fn set_amount_of_results(&self, amount: AmountOfResults) -> Result<()>;

    async fn set_temperature_unit(&self, unit: TemperatureUnit) -> Result<()>;

    async fn set_distance_velocity_unit(&self, unit: DistanceVelocityUnit) -> Result<()>;

    async fn set_sorting_orientation(&self, orientation: SortingOrientation) -> Result<()>;
}
