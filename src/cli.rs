use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "website-status-checker")]
#[command(version = concat!("Ver:", env!("CARGO_PKG_VERSION")))]
#[command(about = "Website Status Checker backend: single-probe reachability classification")]
pub struct Cli {
    /// TOML configuration file
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Listen port (overrides PORT)
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long = "bind")]
    pub bind: Option<String>,

    /// Allowed CORS origin, repeatable (overrides CORS_ALLOWED_ORIGINS)
    #[arg(long = "cors-origin")]
    pub cors_origins: Vec<String>,

    /// Mirror all log entries into the rotating debug log file
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Print the effective configuration and exit
    #[arg(long = "check-config")]
    pub check_config: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
