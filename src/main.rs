use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gleaner::cli::commands::{self, CollectOptions};
use gleaner::cli::{Cli, Commands};
use gleaner::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for results
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gleaner=info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Collect {
            url,
            max_reviews,
            max_negative,
            json,
            headed,
            timeout,
            fixed_delays,
        } => {
            let config = match cli.config {
                Some(path) => Config::load_from(&path)?,
                None => Config::load()?,
            };
            let opts = CollectOptions {
                max_reviews,
                max_negative,
                json,
                headed,
                timeout_secs: timeout,
                fixed_delays,
            };
            commands::collect(config, &url, &opts).await?;
        }
        Commands::Normalize { url } => {
            commands::print_normalized(&url);
        }
    }

    Ok(())
}
