mod config;
mod constants;
mod core_auth;
mod core_cli;
mod core_fs;
mod core_ftpcommand;
mod core_network;
mod helpers;
mod server;
mod session;

use crate::config::Config;
use crate::core_cli::Cli;
use anyhow::Result;
use clap::Parser;
use colored::*;
use env_logger::{Builder, Env};
use log::warn;
use std::io::Write;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Cli::parse();

    // Initialize the logger with a custom format and colors
    let default_level = if args.verbose { "debug" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(default_level))
        .format(|buf, record| {
            let timestamp = buf.timestamp().to_string();
            let level = match record.level() {
                log::Level::Error => record.level().to_string().red(),
                log::Level::Warn => record.level().to_string().yellow(),
                log::Level::Info => record.level().to_string().green(),
                log::Level::Debug => record.level().to_string().blue(),
                log::Level::Trace => record.level().to_string().white(),
            };
            writeln!(buf, "[{}] [{}] {}", timestamp, level, record.args())
        })
        .init();

    // Load configuration from the TOML file, or fall back to the defaults
    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => {
            warn!("No configuration file given, using built-in defaults.");
            Config::default()
        }
    };

    // Override the listen port from CLI if provided
    if let Some(port) = args.port {
        config.server.listen_port = port;
    }

    // Run the FTP server
    server::run(config).await?;

    Ok(())
}
