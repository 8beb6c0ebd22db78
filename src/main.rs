mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use prayercal_core::config::PrayerCalConfig;
use prayercal_core::store::Store;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "prayercal")]
#[command(about = "Plan your day around prayer times and export it to your calendar")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch prayer times from the Aladhan API
    Fetch {
        #[arg(long, allow_hyphen_values = true)]
        latitude: Option<f64>,

        #[arg(long, allow_hyphen_values = true)]
        longitude: Option<f64>,

        /// Calculation method id, or "auto"
        #[arg(long)]
        method: Option<String>,

        /// First day to fetch (YYYY-MM-DD, default today)
        #[arg(long)]
        from: Option<String>,

        /// Last day to fetch (YYYY-MM-DD, default from + fetch_days - 1)
        #[arg(long)]
        to: Option<String>,
    },
    /// Import prayer times from a saved Aladhan JSON response
    Import { file: PathBuf },
    /// Manage interval event templates
    Template {
        #[command(subcommand)]
        command: TemplateCommands,
    },
    /// Manage event groups
    Group {
        #[command(subcommand)]
        command: GroupCommands,
    },
    /// Rebuild interval events from the stored prayer times and templates
    Resolve,
    /// List prayers and interval events by day
    Events {
        /// Show events from this date (YYYY-MM-DD, default today)
        #[arg(long)]
        from: Option<String>,

        /// Show events until this date (YYYY-MM-DD, default from + 2 days)
        #[arg(long)]
        to: Option<String>,
    },
    /// Export prayers and interval events as .ics files
    Export {
        /// Directory to write the files to
        #[arg(short, long, default_value = ".")]
        out: PathBuf,

        /// Title prayers with their Arabic names
        #[arg(long, conflicts_with = "english")]
        arabic: bool,

        /// Title prayers with their English names
        #[arg(long)]
        english: bool,
    },
    /// Show config and data paths, or save a location and method
    Config {
        #[arg(long, allow_hyphen_values = true)]
        latitude: Option<f64>,

        #[arg(long, allow_hyphen_values = true)]
        longitude: Option<f64>,

        /// Calculation method id, or "auto"
        #[arg(long)]
        method: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum TemplateCommands {
    /// Add a template anchored between two prayers
    Add {
        name: String,

        /// Start anchor prayer (e.g. Fajr)
        #[arg(short, long)]
        start: String,

        /// End anchor prayer (e.g. Sunrise)
        #[arg(short, long)]
        end: String,

        /// Offset from the start anchor: minutes ("+30", "-15") or a fraction ("+1/3")
        #[arg(long, allow_hyphen_values = true, default_value = "+0")]
        start_offset: String,

        /// Offset from the end anchor: minutes ("+30", "-15") or a fraction ("-1/3")
        #[arg(long, allow_hyphen_values = true, default_value = "-0")]
        end_offset: String,

        /// Group id or name
        #[arg(short, long)]
        group: Option<String>,
    },
    /// List templates
    List,
    /// Remove a template by id
    Remove { id: String },
}

#[derive(Subcommand)]
pub enum GroupCommands {
    /// Add a group (named "Group N" when no name is given)
    Add { name: Option<String> },
    /// List groups
    List,
    /// Change a group's color
    Color {
        /// Group id or name
        group: String,
        /// Hex color (#rrggbb) or a color name
        color: String,
    },
    /// Rename a group
    Rename {
        /// Group id or name
        group: String,
        name: String,
    },
    /// Remove a group
    Remove {
        /// Group id or name
        group: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prayercal=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            latitude,
            longitude,
            method,
            from,
            to,
        } => {
            let config = PrayerCalConfig::load()?;
            let store = open_store(&config);
            let request = commands::fetch::FetchRequest::from_args(
                &config,
                latitude,
                longitude,
                method,
                from.as_deref(),
                to.as_deref(),
            )?;
            commands::fetch::run(&config, &store, request).await
        }
        Commands::Import { file } => {
            let config = PrayerCalConfig::load()?;
            commands::import::run(&config, &open_store(&config), &file)
        }
        Commands::Template { command } => {
            let config = PrayerCalConfig::load()?;
            commands::template::run(&open_store(&config), command)
        }
        Commands::Group { command } => {
            let config = PrayerCalConfig::load()?;
            commands::group::run(&open_store(&config), command)
        }
        Commands::Resolve => {
            let config = PrayerCalConfig::load()?;
            commands::resolve::run(&open_store(&config))
        }
        Commands::Events { from, to } => {
            let config = PrayerCalConfig::load()?;
            commands::events::run(&config, &open_store(&config), from.as_deref(), to.as_deref())
        }
        Commands::Export {
            out,
            arabic,
            english,
        } => {
            let config = PrayerCalConfig::load()?;
            let arabic = if arabic || english {
                Some(arabic)
            } else {
                None
            };
            commands::export::run(&open_store(&config), &out, arabic)
        }
        Commands::Config {
            latitude,
            longitude,
            method,
        } => commands::config::run(latitude, longitude, method),
    }
}

fn open_store(config: &PrayerCalConfig) -> Store {
    Store::open(config.data_path())
}
