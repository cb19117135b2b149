//! REST API server for lofid.
//!
//! Provides HTTP endpoints for:
//! - Playback control (toggle, volume, status)
//! - Service info and version

pub mod error;
pub mod routes;

use crate::config::Config;
use crate::playback::PlaybackStatusHandle;
use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tracing::info;

pub use routes::playback::{ApiCommand, PlaybackApiState, SetVolumeRequest, ToggleRequest};

pub struct ApiServer {
    port: u16,
    playback_state: PlaybackApiState,
}

impl ApiServer {
    pub fn new(
        tx: tokio::sync::mpsc::Sender<ApiCommand>,
        status: PlaybackStatusHandle,
        config: &Config,
    ) -> Self {
        Self {
            port: config.server.port,
            playback_state: PlaybackApiState { tx, status },
        }
    }

    pub async fn start(self) -> Result<()> {
        let app = Router::new()
            .route("/", get(service_info))
            .route("/version", get(version))
            .merge(routes::playback::router(self.playback_state))
            .layer(ServiceBuilder::new());

        let listener = tokio::net::TcpListener::bind(&format!("127.0.0.1:{}", self.port)).await?;

        info!("API server listening on http://127.0.0.1:{}", self.port);
        info!("Endpoints:");
        info!("  GET  /              - Service info");
        info!("  GET  /version       - Get version info");
        info!("  POST /toggle        - Toggle playback (optional {{\"url\": ...}})");
        info!("  POST /volume/up     - Step the volume up");
        info!("  POST /volume/down   - Step the volume down");
        info!("  PUT  /volume        - Set an absolute volume ({{\"value\": 0-100}})");
        info!("  GET  /status        - Get playback status (?style=waybar)");

        axum::serve(listener, app).await?;

        Ok(())
    }
}

async fn service_info() -> Json<Value> {
    Json(json!({
        "service": "lofid",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

async fn version() -> Json<Value> {
    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "name": "lofid"
    }))
}
