//! Playback control endpoints.
//!
//! Provides HTTP endpoints for:
//! - Toggling playback with an optional URL (POST /toggle)
//! - Stepping the volume (POST /volume/up, POST /volume/down)
//! - Setting an absolute volume (PUT /volume)
//! - Getting playback status (GET /status)

use crate::api::error::{ApiError, ApiResult};
use crate::playback::{PlaybackPhase, PlaybackStatus, PlaybackStatusHandle};
use axum::{
    extract::{Query, State},
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{error, info};

/// Request body for the toggle endpoint. The URL is optional - when absent
/// the last-used URL from settings is started.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ToggleRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Request body for the absolute volume endpoint.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SetVolumeRequest {
    pub value: u32,
}

#[derive(Clone)]
pub enum ApiCommand {
    /// Toggle playback, optionally submitting a new page URL
    Toggle(Option<String>),
    VolumeUp,
    VolumeDown,
    SetVolume(u32),
}

#[derive(Clone)]
pub struct PlaybackApiState {
    pub tx: mpsc::Sender<ApiCommand>,
    pub status: PlaybackStatusHandle,
}

/// Creates the playback router with all playback-related endpoints.
pub fn router(state: PlaybackApiState) -> Router {
    Router::new()
        .route("/toggle", post(toggle_playback))
        .route("/volume/up", post(volume_up))
        .route("/volume/down", post(volume_down))
        .route("/volume", put(set_volume))
        .route("/status", get(playback_status))
        .with_state(state)
}

async fn toggle_playback(
    State(state): State<PlaybackApiState>,
    body: Option<Json<ToggleRequest>>,
) -> ApiResult<Json<Value>> {
    let url = body.and_then(|Json(req)| req.url).filter(|u| !u.is_empty());

    info!("Toggle playback command received via API");

    dispatch(&state, ApiCommand::Toggle(url)).await
}

async fn volume_up(State(state): State<PlaybackApiState>) -> ApiResult<Json<Value>> {
    dispatch(&state, ApiCommand::VolumeUp).await
}

async fn volume_down(State(state): State<PlaybackApiState>) -> ApiResult<Json<Value>> {
    dispatch(&state, ApiCommand::VolumeDown).await
}

async fn set_volume(
    State(state): State<PlaybackApiState>,
    Json(req): Json<SetVolumeRequest>,
) -> ApiResult<Json<Value>> {
    dispatch(&state, ApiCommand::SetVolume(req.value)).await
}

/// Forwards a command to the single command loop and answers with the
/// post-dispatch status.
async fn dispatch(state: &PlaybackApiState, command: ApiCommand) -> ApiResult<Json<Value>> {
    if let Err(e) = state.tx.send(command).await {
        error!("Failed to send command to the control loop: {}", e);
        return Err(ApiError::internal("control loop is gone"));
    }

    // Small delay to let the command loop update the status.
    tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

    let status = state.status.get().await;
    Ok(Json(status_response(&status)))
}

/// Gets the current playback status.
///
/// # Query Parameters
/// - `style=waybar` - Returns response formatted for Waybar integration
async fn playback_status(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<PlaybackApiState>,
) -> Json<Value> {
    let status = state.status.get().await;

    if params.get("style") == Some(&"waybar".to_string()) {
        return Json(status_bar_response(&status));
    }

    Json(status_response(&status))
}

fn status_response(status: &PlaybackStatus) -> Value {
    json!({
        "playing": status.phase == PlaybackPhase::Playing,
        "phase": status.phase.as_str(),
        "volume": status.volume,
        "url": status.url,
        "last_error": status.last_error,
    })
}

/// Generates a response formatted for Waybar integration: a play/stop
/// glyph with the volume percentage, and the stream URL or error string as
/// the tooltip.
fn status_bar_response(status: &PlaybackStatus) -> Value {
    let (text, class, tooltip) = match status.phase {
        PlaybackPhase::Playing => (
            format!("▶ {}%", status.volume),
            "lofid-playing".to_string(),
            status.url.clone(),
        ),
        PlaybackPhase::Stopped => match &status.last_error {
            Some(error) => (
                format!("■ {}%", status.volume),
                "lofid-error".to_string(),
                error.clone(),
            ),
            None => (
                format!("■ {}%", status.volume),
                "lofid-stopped".to_string(),
                "Stopped".to_string(),
            ),
        },
    };

    json!({
        "text": text,
        "class": class,
        "tooltip": tooltip
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_status() -> PlaybackStatus {
        PlaybackStatus {
            phase: PlaybackPhase::Playing,
            volume: 80,
            url: "https://host.example/watch?v=abc".to_string(),
            last_error: None,
        }
    }

    #[test]
    fn status_response_reports_phase_and_volume() {
        let value = status_response(&playing_status());
        assert_eq!(value["playing"], true);
        assert_eq!(value["phase"], "playing");
        assert_eq!(value["volume"], 80);
        assert_eq!(value["last_error"], Value::Null);
    }

    #[test]
    fn waybar_response_shows_volume_percentage() {
        let value = status_bar_response(&playing_status());
        assert_eq!(value["text"], "▶ 80%");
        assert_eq!(value["class"], "lofid-playing");
        assert_eq!(value["tooltip"], "https://host.example/watch?v=abc");
    }

    #[test]
    fn waybar_response_surfaces_errors_in_tooltip() {
        let status = PlaybackStatus {
            phase: PlaybackPhase::Stopped,
            volume: 50,
            url: "https://host.example/gone".to_string(),
            last_error: Some("extraction failed: video unavailable".to_string()),
        };

        let value = status_bar_response(&status);
        assert_eq!(value["text"], "■ 50%");
        assert_eq!(value["class"], "lofid-error");
        assert_eq!(value["tooltip"], "extraction failed: video unavailable");
    }

    #[test]
    fn waybar_response_idle() {
        let status = PlaybackStatus {
            phase: PlaybackPhase::Stopped,
            volume: 50,
            url: "https://host.example/watch?v=abc".to_string(),
            last_error: None,
        };

        let value = status_bar_response(&status);
        assert_eq!(value["class"], "lofid-stopped");
        assert_eq!(value["tooltip"], "Stopped");
    }
}
