use attendance_core::{logging, storage::data_dir, Config};
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "attendance", version, about = "CampusOne attendance tracker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Weekly routine management
    Routine {
        #[command(subcommand)]
        action: commands::routine::RoutineAction,
    },
    /// Mark and inspect attendance
    Attend {
        #[command(subcommand)]
        action: commands::attend::AttendAction,
    },
    /// Attendance overview
    Report {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let dir = data_dir()?;
    let config = match Config::load_from(&dir) {
        Ok(config) => {
            logging::init(&config.logging.level);
            config
        }
        Err(e) => {
            let config = Config::default();
            logging::init(&config.logging.level);
            tracing::warn!(error = %e, "using default configuration");
            config
        }
    };

    match cli.command {
        Commands::Routine { action } => commands::routine::run(action, &dir, &config),
        Commands::Attend { action } => commands::attend::run(action, &dir, &config),
        Commands::Report { json } => commands::report::run(json, &dir, &config),
        Commands::Config { action } => commands::config::run(action, &dir, config),
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
