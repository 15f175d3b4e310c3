//! Data migrations run at startup.

mod legacy;

pub use legacy::{LEGACY_MIGRATION_FLAG, LegacyDataMigration, MigrationOutcome, StepOutcome};
