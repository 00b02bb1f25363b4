use std::sync::Arc;

use cpub_core::ComponentAttrs;
use html_escape::encode_double_quoted_attribute as escape_attr;
use lol_html::{RewriteStrSettings, element, rewrite_str};
use url::Url;

use super::attr_string;
use crate::config::MediaEmbedConfig;
use crate::oembed::{EmbedProvider, NoProvider, SizeHints, lookup_or_none};
use crate::registry::{AllowedTags, ComponentSchema, FieldSchema, SmartComponent, allowed_tags};

/// Embedded media (`MEDIA_EMBED`): provider markup when available, a plain
/// iframe otherwise.
pub struct MediaEmbed {
    config: MediaEmbedConfig,
    provider: Arc<dyn EmbedProvider>,
}

impl MediaEmbed {
    /// Registry type identifier.
    pub const TYPE: &'static str = "MEDIA_EMBED";

    /// Creates the component.
    pub fn new(config: MediaEmbedConfig, provider: Arc<dyn EmbedProvider>) -> Self {
        Self { config, provider }
    }

    fn wrap(&self, width: &str, inner: &str) -> String {
        format!(
            r#"<div class="{}" style="width:{};margin:1.5em 0;">{}</div>"#,
            escape_attr(&self.config.container_class),
            escape_attr(width),
            inner
        )
    }

    fn render_provider(&self, url: &str, width: &str, height: &str) -> Option<String> {
        let hints = SizeHints::from_dimensions(width, height);
        let html = lookup_or_none(self.provider.as_ref(), url, &hints)?;
        Some(self.wrap(width, &resize_first_iframe(&html, height)))
    }

    fn render_iframe(&self, url: &str, width: &str, height: &str) -> String {
        let iframe = format!(
            r#"<iframe src="{}" style="width:100%;height:{};border:0;" allowfullscreen loading="lazy"></iframe>"#,
            escape_attr(url),
            escape_attr(height)
        );
        self.wrap(width, &iframe)
    }
}

impl Default for MediaEmbed {
    fn default() -> Self {
        Self::new(MediaEmbedConfig::default(), Arc::new(NoProvider))
    }
}

impl SmartComponent for MediaEmbed {
    fn component_type(&self) -> &str {
        Self::TYPE
    }

    fn schema(&self) -> ComponentSchema {
        ComponentSchema::new("Media Embed")
            .field("url", FieldSchema::string("URL", true))
            .field("width", FieldSchema::string("Width", false))
            .field("height", FieldSchema::string("Height", false))
    }

    fn render(&self, attrs: &ComponentAttrs) -> String {
        let Some(url) = attr_string(attrs, "url").filter(|url| is_absolute_url(url)) else {
            log::debug!("{} without a valid url", Self::TYPE);
            return String::new();
        };
        let width = attr_string(attrs, "width").unwrap_or_else(|| self.config.default_width.clone());
        let height =
            attr_string(attrs, "height").unwrap_or_else(|| self.config.default_height.clone());

        self.render_provider(&url, &width, &height)
            .unwrap_or_else(|| self.render_iframe(&url, &width, &height))
    }

    fn allowed_html_tags(&self) -> AllowedTags {
        allowed_tags(&[(
            "iframe",
            &[
                "src",
                "width",
                "height",
                "style",
                "allowfullscreen",
                "loading",
                "frameborder",
                "allow",
                "title",
            ],
        )])
    }
}

fn is_absolute_url(value: &str) -> bool {
    Url::parse(value).is_ok_and(|url| url.has_host())
}

/// Forces the first `<iframe>` in provider markup to full width and the
/// requested height. Markup that cannot be rewritten is returned unchanged.
fn resize_first_iframe(html: &str, height: &str) -> String {
    let mut resized = false;
    let result = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![element!("iframe", |el| {
                if !resized {
                    resized = true;
                    el.set_attribute("width", "100%")?;
                    el.set_attribute("height", height)?;
                }
                Ok(())
            })],
            ..RewriteStrSettings::new()
        },
    );

    result.unwrap_or_else(|err| {
        log::warn!("Could not resize embed iframe: {}", err);
        html.to_string()
    })
}
