//! truestory CLI entry point

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use truestory::{
    commands::{
        cmd_categorize, cmd_import, cmd_init, cmd_metadata, cmd_plots, cmd_report, cmd_status,
        print_batch_report, print_import_stats, print_status, write_report,
    },
    config::Config,
    error::Result,
    store::Store,
};

#[derive(Parser)]
#[command(name = "truestory")]
#[command(version, about = "Incremental true-story movie enrichment pipeline", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize truestory configuration and database
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Import movie titles from a newline-delimited file
    Import {
        /// Path to the title list
        file: PathBuf,
    },

    /// Fetch TMDB metadata for one batch of movies
    Metadata {
        /// Maximum movies to process this run (default from config)
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Fetch Wikipedia plot text for one batch of movies
    Plots {
        /// Maximum movies to process this run (default from config)
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Classify one batch of enriched movies into subject categories
    Categorize {
        /// Maximum movies to process this run (default from config)
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Produce the aggregated statistics report
    Report {
        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show pipeline status
    Status,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Handle init command specially (doesn't need existing config)
    if matches!(cli.command, Commands::Init { .. }) {
        return handle_init(cli).await;
    }

    // Handle completions command (doesn't need config/db)
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "truestory", &mut std::io::stdout());
        return Ok(());
    }

    // Load configuration and open the store
    let config = load_config(cli.config.as_deref())?;
    let store = Store::connect(&config).await?;

    match cli.command {
        Commands::Init { .. } | Commands::Completions { .. } => unreachable!(),

        Commands::Import { file } => {
            let stats = cmd_import(&store, &file).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_import_stats(&stats);
            }
        }

        Commands::Metadata { limit } => {
            let limit = limit.unwrap_or(config.enrich.batch_size);
            let report = cmd_metadata(&config, &store, limit).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_batch_report("Metadata", &report);
            }
        }

        Commands::Plots { limit } => {
            let limit = limit.unwrap_or(config.enrich.batch_size);
            let report = cmd_plots(&config, &store, limit).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_batch_report("Plots", &report);
            }
        }

        Commands::Categorize { limit } => {
            let limit = limit.unwrap_or(config.enrich.batch_size);
            let report = cmd_categorize(&config, &store, limit).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_batch_report("Categorize", &report);
            }
        }

        Commands::Report { output } => {
            let report = cmd_report(&store).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                write_report(&report, output.as_deref())?;
            }
        }

        Commands::Status => {
            let status = cmd_status(&config, &store).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                print_status(&status);
            }
        }
    }

    Ok(())
}

async fn handle_init(cli: Cli) -> Result<()> {
    let Commands::Init { force } = cli.command else {
        unreachable!()
    };

    // If the user specifies a config file, its parent is the base directory
    let (base_dir, config_path) = if let Some(path) = cli.config {
        let base = path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(Config::default_base_dir);
        let config = if path.extension().map_or(false, |e| e == "toml") {
            path
        } else {
            path.join("config.toml")
        };
        (base, config)
    } else {
        let base = Config::default_base_dir();
        (base.clone(), base.join("config.toml"))
    };

    if config_path.exists() && !force {
        eprintln!(
            "Config file already exists at: {}\nUse --force to overwrite.",
            config_path.display()
        );
        std::process::exit(1);
    }

    cmd_init(Some(base_dir), force).await?;

    println!("✓ truestory initialized successfully");
    println!("  Config: {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Set your TMDB API key: export TMDB_API_KEY=...");
    println!("  2. Import titles: truestory import titles.txt");
    println!("  3. Run 'truestory metadata' repeatedly until saturated");

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    let config_path = path
        .map(PathBuf::from)
        .unwrap_or_else(Config::default_config_path);

    if !config_path.exists() {
        eprintln!(
            "Config file not found: {}\nRun 'truestory init' first.",
            config_path.display()
        );
        std::process::exit(1);
    }

    Config::load(&config_path)
}
