use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod catalog;
mod commands;
mod config;
mod output;
mod utils;

use commands::connection::TestConnectionCommand;
use commands::generate::GenerateCommand;
use commands::tables::TablesCommand;
use config::GeneratorConfig;

#[derive(Parser)]
#[command(name = "modelgen")]
#[command(about = "Generate go-pg model structs from a PostgreSQL schema")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./modelgen.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Go model files from the database catalog
    Generate(GenerateCommand),

    /// List the models that would be generated
    Tables(TablesCommand),

    /// Check database connectivity and count base tables
    TestConnection(TestConnectionCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let config = GeneratorConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate(command) => command.execute(config).await,
        Commands::Tables(command) => command.execute(config).await,
        Commands::TestConnection(command) => command.execute(config).await,
    }
}
