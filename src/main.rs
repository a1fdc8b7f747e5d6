use clap::Parser;
use colored::*;
use nasa_explorer::cli::{self, App, Cli, Commands};
use nasa_explorer::config::Config;
use nasa_explorer::error::Result;
use nasa_explorer::{logging, server};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let command = Cli::parse().command();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Invalid configuration:".red(), e);
            return Err(e);
        },
    };

    // The server logs requests at info; CLI commands keep stderr quiet
    let default_level = if command.is_server() { "info" } else { "warn" };
    let _guard = logging::init(&config, default_level);
    config.log_summary();

    let result = match command {
        Commands::Serve => server::start_server(config).await,
        Commands::Interactive => match App::new(&config) {
            Ok(app) => cli::run_interactive(&app).await,
            Err(e) => Err(e),
        },
        Commands::Query(query) => match App::new(&config) {
            Ok(app) => app.run_command(query).await,
            Err(e) => Err(e),
        },
    };

    if let Err(e) = &result {
        error!("Command execution failed: {:?}", e);
        eprintln!("{} {}", "Error:".red(), e.to_string().red());
    } else {
        info!("Done");
    }
    result
}
