use anyhow::Result;
use clap::Parser;
use lofid::{
    app,
    cli::{handle_status_command, handle_toggle_command, handle_volume_command, Cli, CliCommand},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(CliCommand::Version) => {
            println!("lofid {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Some(CliCommand::Toggle(args)) => {
            handle_toggle_command(args).await?;
            return Ok(());
        }
        Some(CliCommand::Volume(args)) => {
            handle_volume_command(args).await?;
            return Ok(());
        }
        Some(CliCommand::Status) => {
            handle_status_command().await?;
            return Ok(());
        }
        None => {}
    }

    app::run_service().await
}
