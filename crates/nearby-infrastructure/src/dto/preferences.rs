//! Preferences DTOs and migrations

use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, MigratesTo, Versioned};

use nearby_core::preferences::{
    AmountOfResults, DistanceVelocityUnit, Preferences, SortingOrientation, TemperatureUnit,
};

/// Preferences V1.0.0 (initial version, no result count).
#[derive(Debug, Clone, Serialize, Deserialize, Versioned, Default)]
#[versioned(version = "1.0.0")]
pub struct PreferencesV1_0_0 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_bookmark: Option<i64>,
    #[serde(default)]
    pub temperature_unit: TemperatureUnit,
    #[serde(default)]
    pub distance_velocity_unit: DistanceVelocityUnit,
    #[serde(default)]
    pub sorting_orientation: SortingOrientation,
}

/// Preferences V1.1.0.
///
/// Added `amount_of_results` for the nearby list size.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned, Default)]
#[versioned(version = "1.1.0")]
pub struct PreferencesV1_1_0 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_bookmark: Option<i64>,
    #[serde(default)]
    pub amount_of_results: AmountOfResults,
    #[serde(default)]
    pub temperature_unit: TemperatureUnit,
    #[serde(default)]
    pub distance_velocity_unit: DistanceVelocityUnit,
    #[serde(default)]
    pub sorting_orientation: SortingOrientation,
}

/// Type alias for the latest Preferences version.
pub type PreferencesDTO = PreferencesV1_1_0;

// ============================================================================
// Migration implementations
// ============================================================================

/// V1.0.0 -> V1.1.0: `amount_of_results` starts at its default (ten).
impl MigratesTo<PreferencesV1_1_0> for PreferencesV1_0_0 {
    fn migrate(self) -> PreferencesV1_1_0 {
        PreferencesV1_1_0 {
            preferred_bookmark: self.preferred_bookmark,
            amount_of_results: AmountOfResults::default(),
            temperature_unit: self.temperature_unit,
            distance_velocity_unit: self.distance_velocity_unit,
            sorting_orientation: self.sorting_orientation,
        }
    }
}

// ============================================================================
// Domain model conversions
// ============================================================================

impl IntoDomain<Preferences> for PreferencesV1_1_0 {
    fn into_domain(self) -> Preferences {
        Preferences {
            preferred_bookmark: self.preferred_bookmark,
            amount_of_results: self.amount_of_results,
            temperature_unit: self.temperature_unit,
            distance_velocity_unit: self.distance_velocity_unit,
            sorting_orientation: self.sorting_orientation,
        }
    }
}

impl FromDomain<Preferences> for PreferencesV1_1_0 {
    fn from_domain(preferences: Preferences) -> Self {
        PreferencesV1_1_0 {
            preferred_bookmark: preferences.preferred_bookmark,
            amount_of_results: preferences.amount_of_results,
            temperature_unit: preferences.temperature_unit,
            distance_velocity_unit: preferences.distance_velocity_unit,
            sorting_orientation: preferences.sorting_orientation,
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates a Migrator for Preferences entities.
///
/// # Migration Path
///
/// - V1.0.0 → V1.1.0: Adds `amount_of_results` (default: ten)
/// - V1.1.0 → Preferences: Converts DTO to domain model
pub fn create_preferences_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();

    let preferences_path = version_migrate::Migrator::define("preferences")
        .from::<PreferencesV1_0_0>()
        .step::<PreferencesV1_1_0>()
        .into_with_save::<Preferences>();

    migrator
        .register(preferences_path)
        .expect("Failed to register preferences migration path");

    migrator
}
