use clap::Parser;
use stockroom::{Config, cli, cli::Command, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = stockroom::Args::parse();

    let config = Config::load(&args)?;

    if args.validate {
        println!("Configuration is valid.");
        return Ok(());
    }

    telemetry::init_telemetry()?;

    tracing::debug!(?args, base_url = %config.api.base_url, "Starting");

    cli::run(&config, args.command.unwrap_or(Command::Shell)).await
}
