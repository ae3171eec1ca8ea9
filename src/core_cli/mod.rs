use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "portftpd", about = "A minimal active-mode FTP server written in Rust.")]
pub struct Cli {
    /// Path to the configuration file (built-in defaults are used when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the listen port from the configuration file
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Enable verbose mode
    #[arg(short, long)]
    pub verbose: bool,
}
