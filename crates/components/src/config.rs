use serde::{Deserialize, Serialize};
use url::Url;

/// Top-level configuration for building a component registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineConfig {
    /// Register the editor block components (quote, pullquote, code, embed).
    pub enable_block_components: bool,
    /// Media embed rendering options.
    pub media_embed: MediaEmbedConfig,
    /// Provider lookup options.
    pub oembed: OEmbedConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            enable_block_components: true,
            media_embed: MediaEmbedConfig::default(),
            oembed: OEmbedConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Parses a JSON configuration; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Options for the `MEDIA_EMBED` component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaEmbedConfig {
    /// Wrapper width when the component has no `width` attribute.
    pub default_width: String,
    /// Iframe height when the component has no `height` attribute.
    pub default_height: String,
    /// Class of the wrapper `<div>`.
    pub container_class: String,
}

impl Default for MediaEmbedConfig {
    fn default() -> Self {
        Self {
            default_width: "100%".to_string(),
            default_height: "400px".to_string(),
            container_class: "cpub-media-embed".to_string(),
        }
    }
}

/// Options for oEmbed lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OEmbedConfig {
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Known providers, tried in order.
    pub providers: Vec<OEmbedProviderConfig>,
}

impl Default for OEmbedConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 5000,
            providers: vec![
                OEmbedProviderConfig::new(
                    "YouTube",
                    &["youtube.com", "youtu.be"],
                    "https://www.youtube.com/oembed",
                ),
                OEmbedProviderConfig::new(
                    "Vimeo",
                    &["vimeo.com"],
                    "https://vimeo.com/api/oembed.json",
                ),
            ],
        }
    }
}

impl OEmbedConfig {
    /// First provider whose hosts match `url`.
    pub fn provider_for(&self, url: &Url) -> Option<&OEmbedProviderConfig> {
        self.providers.iter().find(|provider| provider.matches(url))
    }
}

/// One oEmbed endpoint and the hosts it serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OEmbedProviderConfig {
    /// Provider name, for logging.
    pub name: String,
    /// Hostnames served by the endpoint; subdomains match too.
    pub hosts: Vec<String>,
    /// oEmbed endpoint URL.
    pub endpoint: String,
}

impl OEmbedProviderConfig {
    /// Creates a provider entry.
    pub fn new(name: &str, hosts: &[&str], endpoint: &str) -> Self {
        Self {
            name: name.to_string(),
            hosts: hosts.iter().map(|h| h.to_string()).collect(),
            endpoint: endpoint.to_string(),
        }
    }

    /// True if `url`'s host is one of `hosts` or a subdomain of one.
    pub fn matches(&self, url: &Url) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        let host = host.to_ascii_lowercase();
        self.hosts.iter().any(|candidate| {
            let candidate = candidate.to_ascii_lowercase();
            host == candidate
                || host
                    .strip_suffix(candidate.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }
}
