//! breakline CLI - surf report service and tools.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod commands;
mod config;

use commands::check_proxy::DEFAULT_CHECK_URL;
use config::AppConfig;

#[derive(Parser)]
#[command(name = "breakline")]
#[command(about = "Surf report API backed by a pluggable egress strategy", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path (defaults to ./breakline.toml when present)
    #[arg(short, long, global = true, env = "BREAKLINE_CONFIG")]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve,

    /// Fetch one surf report and print it as JSON
    Report {
        /// Spot identifier (hexadecimal)
        spot_id: String,

        /// Pretty-print the JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Check connectivity through the configured egress
    CheckProxy {
        /// URL to fetch through the egress
        #[arg(short, long, default_value = DEFAULT_CHECK_URL)]
        url: String,
    },
}

/// Installs the global subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "breakline=info,tower_http=info",
        1 => "breakline=debug,tower_http=debug",
        _ => "breakline=trace,tower_http=trace,reqwest=debug",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    let config = AppConfig::load(cli.config.as_deref())?;

    match command {
        Commands::Serve => commands::serve::serve(&config).await?,
        Commands::Report { spot_id, pretty } => {
            return commands::report::report(&config, &spot_id, pretty).await;
        }
        Commands::CheckProxy { url } => commands::check_proxy::check_proxy(&config, &url).await?,
    }
    Ok(ExitCode::SUCCESS)
}
