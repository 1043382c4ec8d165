use anyhow::Result;
use clap::Parser;
use market_cli::{cli::{Args, CliApp}, utils::Config};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::from_env()?;

    let filter = EnvFilter::try_new(config.log_filter(args.verbose))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("🛒 Market CLI starting...");
    tracing::info!(
        "Configuration loaded for {} environment",
        config.environment
    );

    let mut app = CliApp::new(config);
    app.run(args).map_err(|e| {
        tracing::error!("Market CLI failed: {:#}", e);
        e
    })?;

    tracing::info!("🛒 Market CLI stopped");
    Ok(())
}
