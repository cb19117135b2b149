//! CLI handlers for driving the playback service.
//!
//! This module handles terminal presentation. Control logic lives in the
//! daemon; these handlers are thin clients of the local HTTP API.

use anyhow::Result;

use super::args::{ToggleCliArgs, VolumeCliArgs, VolumeCommand};
use super::client::{DaemonClient, StatusResponse};
use crate::config::Config;

fn client() -> Result<DaemonClient> {
    let config = Config::load()?;
    Ok(DaemonClient::new(config.server.port))
}

pub async fn handle_toggle_command(args: ToggleCliArgs) -> Result<()> {
    let status = client()?.toggle(args.url.as_deref()).await?;
    print_status(&status);
    Ok(())
}

pub async fn handle_volume_command(args: VolumeCliArgs) -> Result<()> {
    let client = client()?;
    let status = match args.command {
        VolumeCommand::Up => client.volume_up().await?,
        VolumeCommand::Down => client.volume_down().await?,
        VolumeCommand::Set { value } => client.set_volume(value).await?,
    };

    println!("Volume: {}%", status.volume);
    Ok(())
}

pub async fn handle_status_command() -> Result<()> {
    let status = client()?.status().await?;
    print_status(&status);
    Ok(())
}

fn print_status(status: &StatusResponse) {
    if status.playing {
        println!("Playing  {}", status.url);
    } else {
        println!("Stopped");
    }
    println!("Volume: {}%", status.volume);

    if let Some(error) = &status.last_error {
        println!("Error: {}", error);
    }
}
