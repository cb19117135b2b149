use anyhow::{bail, Result};
use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::config::ResolverConfig;

mod direct;
mod ytdlp;

pub use direct::DirectResolver;
pub use ytdlp::YtDlpResolver;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("'{0}' not found on PATH; install it or set resolver.command_path")]
    ToolMissing(String),
    #[error("extraction failed: {0}")]
    Extraction(String),
    #[error("extractor produced no stream URL")]
    EmptyOutput,
    #[error("not a direct http(s) stream URL: {0}")]
    NotDirect(String),
}

/// Turns a shareable page URL into a direct, playable stream URL.
#[async_trait]
pub trait StreamResolver: Send + Sync {
    fn name(&self) -> &'static str;

    fn is_available(&self) -> bool;

    async fn resolve(&self, page_url: &str) -> Result<String, ResolveError>;
}

pub fn from_config(config: &ResolverConfig) -> Result<Box<dyn StreamResolver>> {
    let resolver: Box<dyn StreamResolver> = match config.provider.as_str() {
        "yt-dlp" => Box::new(YtDlpResolver::new(
            config.command_path.clone(),
            config.format.clone(),
        )),
        "direct" => Box::new(DirectResolver),
        other => bail!(
            "Unknown resolver provider '{}'. Supported providers: yt-dlp, direct",
            other
        ),
    };

    info!("Using {} for stream resolution", resolver.name());

    Ok(resolver)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_builds_configured_provider() {
        let config = ResolverConfig::default();
        let resolver = from_config(&config).unwrap();
        assert_eq!(resolver.name(), "yt-dlp");

        let config = ResolverConfig {
            provider: "direct".to_string(),
            ..ResolverConfig::default()
        };
        let resolver = from_config(&config).unwrap();
        assert_eq!(resolver.name(), "direct");
    }

    #[test]
    fn factory_rejects_unknown_provider() {
        let config = ResolverConfig {
            provider: "mystery".to_string(),
            ..ResolverConfig::default()
        };

        let err = from_config(&config).err().unwrap().to_string();
        assert!(err.contains("mystery"));
        assert!(err.contains("yt-dlp"));
    }
}
