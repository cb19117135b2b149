use crate::api::{ApiCommand, ApiServer};
use crate::config::Config;
use crate::engine::{AudioEngine, EngineError, GstEngine};
use crate::playback::{PlaybackController, PlaybackPhase, PlaybackStatusHandle};
use crate::resolver;
use crate::settings::SettingsStore;
use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

pub async fn run_service() -> Result<()> {
    info!("Starting lofid service");

    let config = Config::load()?;
    let store = SettingsStore::from_global()?;

    let resolver = resolver::from_config(&config.resolver)?;
    if !resolver.is_available() {
        warn!(
            "Resolver '{}' is not available; starts will fail until it is installed",
            resolver.name()
        );
    }

    // A dead engine is reported once here and again on every start attempt;
    // the service keeps running so status and volume still work.
    let engine: Result<Box<dyn AudioEngine>, EngineError> = match GstEngine::new() {
        Ok(engine) => Ok(Box::new(engine)),
        Err(e) => {
            error!("{}. Playback is disabled for this run.", e);
            Err(e)
        }
    };

    let status = PlaybackStatusHandle::default();
    let mut controller = PlaybackController::new(engine, resolver, store, status.clone());
    controller.refresh_status().await;

    let (tx, mut rx) = mpsc::channel::<ApiCommand>(10);
    let api_server = ApiServer::new(tx, status.clone(), &config);
    tokio::spawn(async move {
        if let Err(e) = api_server.start().await {
            error!("API server failed: {}", e);
        }
    });

    info!("lofid is ready!");
    info!(
        "Toggle playback: lofid toggle, or curl -X POST http://127.0.0.1:{}/toggle",
        config.server.port
    );

    let volume_step = config.playback.volume_step as i32;

    // The single control path: every command runs to completion before the
    // next one is received.
    while let Some(command) = rx.recv().await {
        match command {
            ApiCommand::Toggle(url) => match controller.toggle(url).await {
                Ok(PlaybackPhase::Playing) => info!("Playback started"),
                Ok(PlaybackPhase::Stopped) => info!("Playback stopped"),
                Err(e) => error!("Failed to toggle playback: {:#}", e),
            },
            ApiCommand::VolumeUp => {
                let volume = controller.adjust_volume(volume_step).await;
                info!("Volume set to {}%", volume);
            }
            ApiCommand::VolumeDown => {
                let volume = controller.adjust_volume(-volume_step).await;
                info!("Volume set to {}%", volume);
            }
            ApiCommand::SetVolume(value) => {
                let volume = controller.set_volume(value).await;
                info!("Volume set to {}%", volume);
            }
        }
    }

    Ok(())
}
