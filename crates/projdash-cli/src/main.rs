use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use projdash_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "projdash")]
#[command(author, version, about = "A terminal dashboard for your projects")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI (default)
    Run {
        #[command(flatten)]
        table: TableArgs,
        /// Show rows without entrance animations
        #[arg(long)]
        reduced_motion: bool,
    },
    /// Print the project table as plain text
    Show {
        #[command(flatten)]
        table: TableArgs,
    },
    /// List the available columns
    Columns,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Args, Default)]
struct TableArgs {
    /// Projects JSON file (defaults to general.projects_file)
    #[arg(short, long)]
    projects: Option<PathBuf>,
    /// Comma-separated column keys to show, e.g. name,status
    #[arg(short, long, value_delimiter = ',')]
    columns: Option<Vec<String>>,
}

impl TableArgs {
    /// Apply command-line overrides on top of the loaded config
    fn apply(self, config: &mut AppConfig) -> PathBuf {
        if let Some(columns) = self.columns {
            config.ui.table.visible_columns = columns;
        }
        self.projects.unwrap_or_else(|| config.projects_path())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::load()?;

    let command = cli.command.unwrap_or(Commands::Run {
        table: TableArgs::default(),
        reduced_motion: false,
    });

    // The TUI owns the terminal, so its logs go to a file
    init_logging(&config, matches!(command, Commands::Run { .. }))?;

    match command {
        Commands::Run {
            table,
            reduced_motion,
        } => {
            let projects_path = table.apply(&mut config);
            if reduced_motion {
                config.ui.motion.reduced_motion = true;
            }
            commands::run::run(Arc::new(config), projects_path).await
        }
        Commands::Show { table } => {
            let projects_path = table.apply(&mut config);
            commands::show::run(&config, &projects_path)
        }
        Commands::Columns => commands::columns::run(&config),
        Commands::Init { force } => commands::init::run(&config, force),
    }
}

fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        let log_path = config.log_path();
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}
