use anyhow::Result;
use clap::Parser;
use koifox::app::App;
use koifox::cli::{Cli, CliHandler};
use koifox::config::AppConfig;
use std::path::Path;
use std::sync::Mutex;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(api_base) = &cli.api_base {
        config.backend.base_url = api_base.clone();
    }
    config.validate()?;

    let log_level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // Handle CLI commands
    if let Some(command) = cli.command {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(log_level)
            .init();

        let cli_handler = CliHandler::new(config)?;
        return cli_handler.handle_command(command).await;
    }

    // The popup owns the terminal, so logs go to a file
    match config.log_file() {
        Some(path) => init_file_logging(&path, log_level)?,
        None => tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_max_level(log_level)
            .init(),
    }

    if cli.debug {
        tracing::info!("Debug mode enabled - verbose logging active");
    }

    let mut app = App::new(&config)?;
    app.run().await?;

    Ok(())
}

fn init_file_logging(path: &Path, log_level: tracing::Level) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| anyhow::anyhow!("Failed to open log file {}: {}", path.display(), e))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_max_level(log_level)
        .init();

    Ok(())
}
