//! Embed-markup lookup for URLs.
//!
//! Components that embed remote media ask an [`EmbedProvider`] for ready-made
//! markup first and fall back to a plain iframe when it has none.

#[cfg(feature = "http-oembed")]
mod http;

#[cfg(feature = "http-oembed")]
pub use http::HttpOEmbedProvider;

use thiserror::Error;

/// Size hints forwarded to the provider as `maxwidth`/`maxheight`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeHints {
    /// Maximum width in pixels.
    pub width: Option<u32>,
    /// Maximum height in pixels.
    pub height: Option<u32>,
}

impl SizeHints {
    /// Derives hints from CSS dimensions.
    ///
    /// Only values with a positive leading number become hints, and a width of
    /// exactly `100%` is dropped since it says nothing about pixel size.
    pub fn from_dimensions(width: &str, height: &str) -> Self {
        let width = if width.trim() == "100%" {
            None
        } else {
            positive_pixels(width)
        };
        Self {
            width,
            height: positive_pixels(height),
        }
    }

    /// True when neither hint is set.
    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none()
    }
}

fn positive_pixels(value: &str) -> Option<u32> {
    let number = cpub_core::style::leading_number(value);
    (number >= 1.0).then(|| number.min(u32::MAX as f64) as u32)
}

/// Errors from provider lookups.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The provider answered without an `html` field.
    #[error("provider response has no html")]
    MissingHtml,

    /// Transport or status error.
    #[cfg(feature = "http-oembed")]
    #[error("HTTP error: {0}")]
    Http(#[from] Box<ureq::Error>),

    /// Failed to read or decode the response body.
    #[cfg(feature = "http-oembed")]
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Resolves a URL into embed HTML.
pub trait EmbedProvider: Send + Sync {
    /// Returns embed markup for `url`, or `None` when the URL is not served by
    /// any known provider.
    fn lookup(&self, url: &str, hints: &SizeHints) -> Result<Option<String>, ProviderError>;
}

/// A provider that never resolves anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProvider;

impl EmbedProvider for NoProvider {
    fn lookup(&self, _url: &str, _hints: &SizeHints) -> Result<Option<String>, ProviderError> {
        Ok(None)
    }
}

impl<F> EmbedProvider for F
where
    F: Fn(&str, &SizeHints) -> Option<String> + Send + Sync,
{
    fn lookup(&self, url: &str, hints: &SizeHints) -> Result<Option<String>, ProviderError> {
        Ok(self(url, hints))
    }
}

/// Looks up `url`, treating errors as "no markup".
pub(crate) fn lookup_or_none(
    provider: &dyn EmbedProvider,
    url: &str,
    hints: &SizeHints,
) -> Option<String> {
    match provider.lookup(url, hints) {
        Ok(html) => html.filter(|html| !html.trim().is_empty()),
        Err(err) => {
            log::debug!("Embed lookup for {} failed: {}", url, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl EmbedProvider for Failing {
        fn lookup(&self, _url: &str, _hints: &SizeHints) -> Result<Option<String>, ProviderError> {
            Err(ProviderError::MissingHtml)
        }
    }

    #[test]
    fn size_hints_from_dimensions() {
        assert_eq!(
            SizeHints::from_dimensions("640px", "360px"),
            SizeHints { width: Some(640), height: Some(360) }
        );
        assert_eq!(
            SizeHints::from_dimensions("100%", "400px"),
            SizeHints { width: None, height: Some(400) }
        );
        assert_eq!(
            SizeHints::from_dimensions("80%", "auto"),
            SizeHints { width: Some(80), height: None }
        );
        assert!(SizeHints::from_dimensions("", "0").is_empty());
    }

    #[test]
    fn closures_are_providers() {
        let provider = |url: &str, _: &SizeHints| Some(format!("<iframe src=\"{}\"></iframe>", url));
        let html = lookup_or_none(&provider, "https://example.com", &SizeHints::default());
        assert_eq!(html.as_deref(), Some("<iframe src=\"https://example.com\"></iframe>"));
    }

    #[test]
    fn errors_and_blank_markup_become_none() {
        assert_eq!(lookup_or_none(&Failing, "https://x.test", &SizeHints::default()), None);
        let blank = |_: &str, _: &SizeHints| Some("  ".to_string());
        assert_eq!(lookup_or_none(&blank, "https://x.test", &SizeHints::default()), None);
        assert_eq!(lookup_or_none(&NoProvider, "https://x.test", &SizeHints::default()), None);
    }
}
