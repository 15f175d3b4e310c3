use anyhow::Result;
use nearby_infrastructure::MigrationOutcome;

/// Prints the outcome of the startup migration.
pub fn report(outcome: MigrationOutcome) -> Result<()> {
    match outcome {
        MigrationOutcome::AlreadyPerformed => println!("Legacy data was already migrated."),
        MigrationOutcome::FlagUnavailable => {
            anyhow::bail!("Could not read the migration flag; nothing was migrated")
        }
        MigrationOutcome::Completed {
            preferences,
            weather,
        } => println!("Migration completed (preferences: {preferences:?}, weather: {weather:?})."),
        MigrationOutcome::Incomplete {
            preferences,
            weather,
        } => anyhow::bail!(
            "Migration incomplete (preferences: {preferences:?}, weather: {weather:?}); it will be retried"
        ),
    }

    Ok(())
}
