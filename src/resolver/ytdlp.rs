//! yt-dlp extraction provider.
//!
//! `yt-dlp -f <format> -g <url>` prints one direct media URL per line
//! without downloading anything; the first line is the stream we hand to
//! the engine.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use super::{ResolveError, StreamResolver};

const YTDLP_BIN: &str = "yt-dlp";

pub struct YtDlpResolver {
    command_path: Option<PathBuf>,
    format: String,
}

impl YtDlpResolver {
    pub fn new(command_path: Option<String>, format: String) -> Self {
        Self {
            command_path: command_path.map(PathBuf::from),
            format,
        }
    }

    fn binary(&self) -> Result<PathBuf, ResolveError> {
        if let Some(path) = &self.command_path {
            return Ok(path.clone());
        }
        which::which(YTDLP_BIN).map_err(|_| ResolveError::ToolMissing(YTDLP_BIN.to_string()))
    }
}

#[async_trait]
impl StreamResolver for YtDlpResolver {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    fn is_available(&self) -> bool {
        self.binary().is_ok()
    }

    async fn resolve(&self, page_url: &str) -> Result<String, ResolveError> {
        let binary = self.binary()?;

        info!("Resolving stream for {} via yt-dlp", page_url);

        let output = Command::new(&binary)
            .arg("-f")
            .arg(&self.format)
            .arg("-g")
            .arg("--no-warnings")
            .arg(page_url)
            .output()
            .await
            .map_err(|e| ResolveError::Extraction(format!("failed to run {:?}: {}", binary, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = stderr
                .lines()
                .find(|line| !line.trim().is_empty())
                .unwrap_or("extractor exited with an error")
                .trim()
                .to_string();
            return Err(ResolveError::Extraction(reason));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stream_url = stdout
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .ok_or(ResolveError::EmptyOutput)?
            .to_string();

        debug!("Resolved {} to a direct stream URL", page_url);

        Ok(stream_url)
    }
}
