//! Zombie Detector - find unmaintained packages in your Python dependencies

use clap::Parser;

mod cache;
mod cli;
mod client;
mod config;
mod error;
mod health;
mod models;
mod output;
mod parser;

use cli::{CacheCommands, Cli, Commands, GlobalOptions};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    }
}

/// Logs go to stderr; `--debug` wins over `RUST_LOG`, default is warn
fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

async fn run(cli: Cli) -> Result<i32> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        None => cli::scan::run(&cli.scan, &opts).await,
        Some(Commands::Cache(cache_cmd)) => {
            match cache_cmd {
                CacheCommands::Status => cli::cache::status(&opts)?,
                CacheCommands::Clear => cli::cache::clear(&opts)?,
                CacheCommands::Path => cli::cache::path(&opts)?,
            }
            Ok(0)
        }
        Some(Commands::Completions { shell }) => {
            cli::completions::run(shell);
            Ok(0)
        }
    }
}
