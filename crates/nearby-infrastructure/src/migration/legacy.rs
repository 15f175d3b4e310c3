//! One-time import of the snapshot files written by earlier releases.
//!
//! The import reads `PreferencesManagerStoredContents.json` (application
//! support) and `WeatherDataManagerStoredContents.json` (documents), copies
//! what it finds into the current repositories, and records a completion
//! flag so that it never runs again.
//!
//! A snapshot that is missing, unreadable or undecodable counts as "nothing
//! to migrate". A repository write that fails counts as a failed step, and
//! the completion flag is then left unset so the next launch retries. Every
//! write is a full overwrite, so retrying after a partial run is harmless.

use std::sync::Arc;

use nearby_core::preferences::{Preferences, PreferencesRepository};
use nearby_core::settings::SettingsRepository;
use nearby_core::weather::WeatherInformationRepository;
use nearby_core::Result;
use tokio::task::JoinHandle;

use crate::dto::{LegacyPreferencesSnapshot, LegacyWeatherSnapshot};
use crate::paths::{NearbyPaths, ServiceType};
use crate::storage::read_json_file;

/// Settings key of the completion flag.
pub const LEGACY_MIGRATION_FLAG: &str = "legacy_data_migration_completed";

/// Result of one migration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// No usable snapshot; nothing was written.
    NothingToMigrate,
    /// The snapshot was copied into the repository.
    Migrated,
    /// At least one repository write failed.
    Failed,
}

impl StepOutcome {
    fn from_writes(results: &[Result<()>]) -> Self {
        if results.iter().all(|r| r.is_ok()) {
            StepOutcome::Migrated
        } else {
            StepOutcome::Failed
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// The completion flag was already set; no I/O besides reading it.
    AlreadyPerformed,
    /// The completion flag could not be read; nothing was touched.
    FlagUnavailable,
    /// Both steps finished and the completion flag is now set.
    Completed {
        preferences: StepOutcome,
        weather: StepOutcome,
    },
    /// A step failed, or the flag could not be written. Runs again next time.
    Incomplete {
        preferences: StepOutcome,
        weather: StepOutcome,
    },
}

/// Runner for the legacy snapshot import.
pub struct LegacyDataMigration {
    paths: NearbyPaths,
    preferences: Arc<dyn PreferencesRepository>,
    weather: Arc<dyn WeatherInformationRepository>,
    settings: Arc<dyn SettingsRepository>,
}

impl LegacyDataMigration {
    pub fn new(
        paths: NearbyPaths,
        preferences: Arc<dyn PreferencesRepository>,
        weather: Arc<dyn WeatherInformationRepository>,
        settings: Arc<dyn SettingsRepository>,
    ) -> Self {
        Self {
            paths,
            preferences,
            weather,
            settings,
        }
    }

    /// Starts the migration in the background. The handle may be dropped.
    pub fn spawn(self) -> JoinHandle<MigrationOutcome> {
        tokio::spawn(async move { self.run().await })
    }

    /// Runs the migration to completion. Never fails; see [`MigrationOutcome`].
    pub async fn run(&self) -> MigrationOutcome {
        match self.settings.get_flag(LEGACY_MIGRATION_FLAG).await {
            Ok(Some(true)) => {
                tracing::debug!("Legacy data migration already performed");
                return MigrationOutcome::AlreadyPerformed;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("Cannot read legacy migration flag, skipping: {}", e);
                return MigrationOutcome::FlagUnavailable;
            }
        }

        let (preferences, weather) =
            tokio::join!(self.migrate_preferences(), self.migrate_weather());

        if preferences == StepOutcome::Failed || weather == StepOutcome::Failed {
            tracing::warn!(
                ?preferences,
                ?weather,
                "Legacy data migration incomplete, will retry on next launch"
            );
            return MigrationOutcome::Incomplete {
                preferences,
                weather,
            };
        }

        if let Err(e) = self.settings.set_flag(LEGACY_MIGRATION_FLAG, true).await {
            tracing::warn!("Failed to record legacy migration flag: {}", e);
            return MigrationOutcome::Incomplete {
                preferences,
                weather,
            };
        }

        tracing::info!(?preferences, ?weather, "Legacy data migration completed");
        MigrationOutcome::Completed {
            preferences,
            weather,
        }
    }

    async fn migrate_preferences(&self) -> StepOutcome {
        let service = ServiceType::LegacyPreferences;
        let snapshot: Option<LegacyPreferencesSnapshot> =
            read_json_file(&self.paths, service.location(), service.file_name()).await;

        let Some(preferences) = snapshot.and_then(LegacyPreferencesSnapshot::into_preferences)
        else {
            return StepOutcome::NothingToMigrate;
        };

        let results = self.write_preferences(preferences).await;
        for e in results.iter().filter_map(|r| r.as_ref().err()) {
            tracing::warn!("Failed to write migrated preference: {}", e);
        }

        let outcome = StepOutcome::from_writes(&results);
        if outcome == StepOutcome::Migrated {
            tracing::info!("Migrated legacy preferences");
        }
        outcome
    }

    async fn write_preferences(&self, preferences: Preferences) -> Vec<Result<()>> {
        let repository = &self.preferences;
        vec![
            repository
                .set_preferred_bookmark(preferences.preferred_bookmark)
                .await,
            repository
                .set_amount_of_results(preferences.amount_of_results)
                .await,
            repository
                .set_temperature_unit(preferences.temperature_unit)
                .await,
            repository
                .set_distance_velocity_unit(preferences.distance_velocity_unit)
                .await,
            repository
                .set_sorting_orientation(preferences.sorting_orientation)
                .await,
        ]
    }

    async fn migrate_weather(&self) -> StepOutcome {
        let service = ServiceType::LegacyWeatherData;
        let Some(snapshot): Option<LegacyWeatherSnapshot> =
            read_json_file(&self.paths, service.location(), service.file_name()).await
        else {
            return StepOutcome::NothingToMigrate;
        };

        let bookmarked = snapshot.bookmarked_weather();
        let nearby = snapshot.nearby_weather();
        let counts = (bookmarked.len(), nearby.len());

        let results = [
            self.weather.set_bookmarked_weather(bookmarked).await,
            self.weather.set_nearby_weather(nearby).await,
        ];

        for e in results.iter().filter_map(|r| r.as_ref().err()) {
            tracing::warn!("Failed to write migrated weather data: {}", e);
        }

        let outcome = StepOutcome::from_writes(&results);
        if outcome == StepOutcome::Migrated {
            tracing::info!(
                bookmarked = counts.0,
                nearby = counts.1,
                "Migrated legacy weather data"
            );
        }
        outcome
    }
}
