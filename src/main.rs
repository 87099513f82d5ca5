use std::sync::Arc;
use website_status_checker::cli::Cli;
use website_status_checker::config::ServiceConfig;
use website_status_checker::core::status::IsahcProber;
use website_status_checker::core::{init_logger, LoggerOptions};
use website_status_checker::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_args();
    let config = ServiceConfig::load(&cli)?;

    if cli.check_config {
        print!("{}", config.to_toml_string()?);
        println!("✓ Configuration valid");
        return Ok(());
    }

    init_logger(LoggerOptions {
        console: true,
        file: config.debug_log_path(),
    });

    // One client for the whole process, shared read-only by every request
    let prober = IsahcProber::new()?;
    let state = AppState::new(Arc::new(prober));

    server::run(&config, state).await?;
    Ok(())
}
