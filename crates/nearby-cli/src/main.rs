use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::convert::{SpeedUnitArg, TemperatureUnitArg};
use commands::weather::WeatherSelection;

#[derive(Parser)]
#[command(name = "nearby")]
#[command(about = "Nearby Weather storage tool", long_about = None)]
struct Cli {
    /// Relocate every file under this directory instead of the platform directories
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report the import of data left behind by earlier releases
    Migrate,
    /// Print the stored preferences as JSON
    Preferences,
    /// Print stored weather information as JSON
    Weather {
        /// Only the nearby list, sorted and truncated by preferences
        #[arg(long, conflicts_with = "bookmarked")]
        nearby: bool,

        /// Only the bookmarked list
        #[arg(long)]
        bookmarked: bool,

        /// Reference latitude for distance sorting
        #[arg(long, requires = "longitude", allow_hyphen_values = true)]
        latitude: Option<f64>,

        /// Reference longitude for distance sorting
        #[arg(long, requires = "latitude", allow_hyphen_values = true)]
        longitude: Option<f64>,
    },
    /// Convert raw provider values into display strings
    Convert {
        #[command(subcommand)]
        action: ConvertAction,
    },
}

#[derive(Subcommand)]
enum ConvertAction {
    /// Temperature given in Kelvin
    Temperature {
        #[arg(allow_hyphen_values = true)]
        kelvin: f64,

        #[arg(long, value_enum, default_value_t = TemperatureUnitArg::Celsius)]
        unit: TemperatureUnitArg,
    },
    /// Wind speed given in metres per second
    Wind {
        mps: f64,

        #[arg(long, value_enum, default_value_t = SpeedUnitArg::Kilometres)]
        unit: SpeedUnitArg,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let context = commands::Context::load(cli.base_dir)?;
    commands::init_tracing(&context.config.log_level);

    match cli.command {
        Commands::Migrate => {
            let (_, outcome) = commands::launch(&context).await?;
            commands::migrate::report(outcome)?
        }
        Commands::Preferences => {
            let (stores, _) = commands::launch(&context).await?;
            commands::preferences::show(&stores).await?
        }
        Commands::Weather {
            nearby,
            bookmarked,
            latitude,
            longitude,
        } => {
            let (stores, _) = commands::launch(&context).await?;
            let selection = WeatherSelection::from_flags(nearby, bookmarked);
            let reference = latitude.zip(longitude);
            commands::weather::show(&stores, selection, reference).await?
        }
        Commands::Convert { action } => match action {
            ConvertAction::Temperature { kelvin, unit } => {
                commands::convert::temperature(kelvin, unit.into())
            }
            ConvertAction::Wind { mps, unit } => commands::convert::wind(mps, unit.into()),
        },
    }

    Ok(())
}
