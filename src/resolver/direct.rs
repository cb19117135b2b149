//! Pass-through provider for URLs that already point at a playable stream
//! (internet radio mounts, direct file URLs). No extraction step.

use async_trait::async_trait;

use super::{ResolveError, StreamResolver};

pub struct DirectResolver;

#[async_trait]
impl StreamResolver for DirectResolver {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn is_available(&self) -> bool {
        true
    }

    async fn resolve(&self, page_url: &str) -> Result<String, ResolveError> {
        if page_url.starts_with("http://") || page_url.starts_with("https://") {
            Ok(page_url.to_string())
        } else {
            Err(ResolveError::NotDirect(page_url.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn passes_http_urls_through() {
        let resolved = DirectResolver
            .resolve("https://ice1.somafm.com/groovesalad-128-mp3")
            .await
            .unwrap();
        assert_eq!(resolved, "https://ice1.somafm.com/groovesalad-128-mp3");
    }

    #[tokio::test]
    async fn rejects_non_http_input() {
        let err = DirectResolver.resolve("file:///tmp/a.mp3").await.unwrap_err();
        assert!(matches!(err, ResolveError::NotDirect(_)));
    }
}
