use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::engine::{AudioEngine, EngineError};
use crate::resolver::StreamResolver;
use crate::settings::{Settings, SettingsStore, MAX_VOLUME};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    Stopped,
    Playing,
}

impl PlaybackPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackPhase::Stopped => "stopped",
            PlaybackPhase::Playing => "playing",
        }
    }
}

/// Snapshot of the controller published for the presentation layer.
#[derive(Debug, Clone)]
pub struct PlaybackStatus {
    pub phase: PlaybackPhase,
    pub volume: u32,
    pub url: String,
    pub last_error: Option<String>,
}

impl Default for PlaybackStatus {
    fn default() -> Self {
        let settings = Settings::default();
        Self {
            phase: PlaybackPhase::Stopped,
            volume: settings.volume,
            url: settings.last_url,
            last_error: None,
        }
    }
}

#[derive(Clone, Default)]
pub struct PlaybackStatusHandle {
    inner: Arc<Mutex<PlaybackStatus>>,
}

impl PlaybackStatusHandle {
    pub async fn get(&self) -> PlaybackStatus {
        self.inner.lock().await.clone()
    }

    pub async fn replace(&self, status: PlaybackStatus) {
        *self.inner.lock().await = status;
    }

    pub async fn set_phase(&self, phase: PlaybackPhase, last_error: Option<String>) {
        let mut status = self.inner.lock().await;
        status.phase = phase;
        status.last_error = last_error;
    }

    pub async fn set_volume(&self, volume: u32) {
        self.inner.lock().await.volume = volume;
    }

    pub async fn set_url(&self, url: String) {
        self.inner.lock().await.url = url;
    }
}

/// Owns the Stopped/Playing state machine and the persisted settings, and
/// coordinates the resolver and the engine in response to user intents.
/// All methods run on the single command loop; there are no concurrent
/// callers.
pub struct PlaybackController {
    engine: Result<Box<dyn AudioEngine>, EngineError>,
    resolver: Box<dyn StreamResolver>,
    store: SettingsStore,
    settings: Settings,
    phase: PlaybackPhase,
    status: PlaybackStatusHandle,
}

impl PlaybackController {
    pub fn new(
        engine: Result<Box<dyn AudioEngine>, EngineError>,
        resolver: Box<dyn StreamResolver>,
        store: SettingsStore,
        status: PlaybackStatusHandle,
    ) -> Self {
        let settings = store.load();
        Self {
            engine,
            resolver,
            store,
            settings,
            phase: PlaybackPhase::Stopped,
            status,
        }
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Publish the current state, including an engine init failure if the
    /// backend never came up. Called once after construction.
    pub async fn refresh_status(&self) {
        self.status
            .replace(PlaybackStatus {
                phase: self.phase,
                volume: self.settings.volume,
                url: self.settings.last_url.clone(),
                last_error: self.engine.as_ref().err().map(|e| e.to_string()),
            })
            .await;
    }

    /// Stopped: start streaming `requested_url` (or the last-used URL) and
    /// move to Playing on success. Playing: stop the engine and move to
    /// Stopped unconditionally.
    pub async fn toggle(&mut self, requested_url: Option<String>) -> Result<PlaybackPhase> {
        match self.phase {
            PlaybackPhase::Stopped => {
                let url = requested_url.unwrap_or_else(|| self.settings.last_url.clone());
                info!("PlaybackController: starting stream");
                if let Err(e) = self.start(&url).await {
                    error!("Failed to start stream: {:#}", e);
                    self.status
                        .set_phase(PlaybackPhase::Stopped, Some(e.to_string()))
                        .await;
                    return Err(e);
                }

                self.phase = PlaybackPhase::Playing;
                self.status.set_phase(PlaybackPhase::Playing, None).await;
                Ok(PlaybackPhase::Playing)
            }
            PlaybackPhase::Playing => {
                info!("PlaybackController: stopping stream");
                if let Ok(engine) = self.engine.as_mut() {
                    engine.stop();
                }

                self.phase = PlaybackPhase::Stopped;
                self.status.set_phase(PlaybackPhase::Stopped, None).await;
                Ok(PlaybackPhase::Stopped)
            }
        }
    }

    async fn start(&mut self, url: &str) -> Result<()> {
        // Persist the attempted URL before resolution so it survives a
        // crash or a failed resolve.
        self.settings.last_url = url.to_string();
        self.persist();
        self.status.set_url(url.to_string()).await;

        let engine = match self.engine.as_mut() {
            Ok(engine) => engine,
            Err(e) => return Err(e.clone().into()),
        };

        let stream_url = self.resolver.resolve(url).await?;

        engine.load(&stream_url);
        engine.set_volume(self.settings.volume);
        engine.play();

        Ok(())
    }

    pub async fn adjust_volume(&mut self, delta: i32) -> u32 {
        let volume = i64::from(self.settings.volume)
            .saturating_add(i64::from(delta))
            .clamp(0, i64::from(MAX_VOLUME)) as u32;
        self.apply_volume(volume).await
    }

    pub async fn set_volume(&mut self, value: u32) -> u32 {
        self.apply_volume(value.min(MAX_VOLUME)).await
    }

    async fn apply_volume(&mut self, volume: u32) -> u32 {
        self.settings.volume = volume;
        if let Ok(engine) = self.engine.as_mut() {
            engine.set_volume(volume);
        }
        self.persist();
        self.status.set_volume(volume).await;
        volume
    }

    // A failed write never blocks or reverses the in-memory change.
    fn persist(&self) {
        if let Err(e) = self.store.save(&self.settings) {
            error!("Failed to persist settings: {:#}", e);
        }
    }
}
