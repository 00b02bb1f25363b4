use std::time::Duration;

use serde::Deserialize;
use url::Url;

use super::{EmbedProvider, ProviderError, SizeHints};
use crate::config::OEmbedConfig;

#[derive(Deserialize)]
struct OEmbedResponse {
    html: Option<String>,
}

/// Blocking oEmbed client over the configured provider endpoints.
pub struct HttpOEmbedProvider {
    config: OEmbedConfig,
    agent: ureq::Agent,
}

impl HttpOEmbedProvider {
    /// Creates a client with the configured timeout.
    pub fn new(config: OEmbedConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(concat!("cpub/", env!("CARGO_PKG_VERSION")))
            .build();
        Self { config, agent }
    }
}

impl EmbedProvider for HttpOEmbedProvider {
    fn lookup(&self, url: &str, hints: &SizeHints) -> Result<Option<String>, ProviderError> {
        let parsed = Url::parse(url)?;
        let Some(provider) = self.config.provider_for(&parsed) else {
            return Ok(None);
        };

        let mut request = self
            .agent
            .get(&provider.endpoint)
            .query("url", url)
            .query("format", "json");
        if let Some(width) = hints.width {
            request = request.query("maxwidth", &width.to_string());
        }
        if let Some(height) = hints.height {
            request = request.query("maxheight", &height.to_string());
        }

        log::debug!("Requesting oEmbed from {} for {}", provider.name, url);
        let response = request.call().map_err(Box::new)?;
        let body: OEmbedResponse = response.into_json()?;
        match body.html {
            Some(html) => Ok(Some(html)),
            None => Err(ProviderError::MissingHtml),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_hosts_are_not_requested() {
        let provider = HttpOEmbedProvider::new(OEmbedConfig::default());
        let html = provider
            .lookup("https://example.com/video", &SizeHints::default())
            .expect("no request is made");
        assert_eq!(html, None);
    }

    #[test]
    fn invalid_urls_are_rejected() {
        let provider = HttpOEmbedProvider::new(OEmbedConfig::default());
        assert!(matches!(
            provider.lookup("not a url", &SizeHints::default()),
            Err(ProviderError::InvalidUrl(_))
        ));
    }
}
