//! Editor block components: quote, pullquote, code and embed.
//!
//! Each renders the markup the block editor itself would save for the block,
//! so published components look the same as natively authored ones.

use std::sync::Arc;

use cpub_core::ComponentAttrs;
use html_escape::encode_text as escape_text;

use super::attr_string;
use crate::oembed::{EmbedProvider, NoProvider, SizeHints, lookup_or_none};
use crate::registry::{AllowedTags, ComponentSchema, FieldSchema, SmartComponent, allowed_tags};

const TEXT_ALIGN: &[&str] = &["left", "center", "right"];

/// `<p>value</p><cite>citation</cite>`, each part only when present.
fn quote_body(attrs: &ComponentAttrs) -> String {
    let mut html = String::new();
    if let Some(value) = attr_string(attrs, "value") {
        html.push_str(&format!("<p>{}</p>", escape_text(&value)));
    }
    if let Some(citation) = attr_string(attrs, "citation") {
        html.push_str(&format!("<cite>{}</cite>", escape_text(&citation)));
    }
    html
}

fn quote_schema(title: &str) -> ComponentSchema {
    ComponentSchema::new(title)
        .field("value", FieldSchema::string("Value", false))
        .field("citation", FieldSchema::string("Citation", false))
        .field(
            "textAlign",
            FieldSchema::enumeration("Text Align", false, TEXT_ALIGN),
        )
}

/// `CORE_QUOTE`
#[derive(Debug, Default, Clone, Copy)]
pub struct Quote;

impl Quote {
    /// Registry type identifier.
    pub const TYPE: &'static str = "CORE_QUOTE";
}

impl SmartComponent for Quote {
    fn component_type(&self) -> &str {
        Self::TYPE
    }

    fn schema(&self) -> ComponentSchema {
        quote_schema("Quote")
    }

    fn render(&self, attrs: &ComponentAttrs) -> String {
        format!(
            r#"<blockquote class="wp-block-quote">{}</blockquote>"#,
            quote_body(attrs)
        )
    }

    fn allowed_html_tags(&self) -> AllowedTags {
        allowed_tags(&[("blockquote", &["class"]), ("p", &[]), ("cite", &[])])
    }
}

/// `CORE_PULLQUOTE`
#[derive(Debug, Default, Clone, Copy)]
pub struct Pullquote;

impl Pullquote {
    /// Registry type identifier.
    pub const TYPE: &'static str = "CORE_PULLQUOTE";
}

impl SmartComponent for Pullquote {
    fn component_type(&self) -> &str {
        Self::TYPE
    }

    fn schema(&self) -> ComponentSchema {
        quote_schema("Pullquote")
    }

    fn render(&self, attrs: &ComponentAttrs) -> String {
        format!(
            r#"<figure class="wp-block-pullquote"><blockquote>{}</blockquote></figure>"#,
            quote_body(attrs)
        )
    }

    fn allowed_html_tags(&self) -> AllowedTags {
        allowed_tags(&[
            ("figure", &["class"]),
            ("blockquote", &[]),
            ("p", &[]),
            ("cite", &[]),
        ])
    }
}

/// `CORE_CODE`
#[derive(Debug, Default, Clone, Copy)]
pub struct Code;

impl Code {
    /// Registry type identifier.
    pub const TYPE: &'static str = "CORE_CODE";
}

impl SmartComponent for Code {
    fn component_type(&self) -> &str {
        Self::TYPE
    }

    fn schema(&self) -> ComponentSchema {
        ComponentSchema::new("Code").field("content", FieldSchema::string("Content", false))
    }

    fn render(&self, attrs: &ComponentAttrs) -> String {
        let inner = attr_string(attrs, "content")
            .map(|content| format!("<code>{}</code>", escape_text(&content)))
            .unwrap_or_default();
        format!(r#"<pre class="wp-block-code">{}</pre>"#, inner)
    }

    fn allowed_html_tags(&self) -> AllowedTags {
        allowed_tags(&[("pre", &["class"]), ("code", &[])])
    }
}

/// `CORE_EMBED`: provider markup (or the bare URL) inside an embed figure.
pub struct Embed {
    provider: Arc<dyn EmbedProvider>,
}

impl Embed {
    /// Registry type identifier.
    pub const TYPE: &'static str = "CORE_EMBED";

    /// Creates the component.
    pub fn new(provider: Arc<dyn EmbedProvider>) -> Self {
        Self { provider }
    }
}

impl Default for Embed {
    fn default() -> Self {
        Self::new(Arc::new(NoProvider))
    }
}

impl SmartComponent for Embed {
    fn component_type(&self) -> &str {
        Self::TYPE
    }

    fn schema(&self) -> ComponentSchema {
        ComponentSchema::new("Embed")
            .field("url", FieldSchema::string("Url", false))
            .field("caption", FieldSchema::string("Caption", false))
            .field("type", FieldSchema::string("Type", false))
            .field(
                "providerNameSlug",
                FieldSchema::string("Provider Name Slug", false),
            )
            .field(
                "allowResponsive",
                FieldSchema::boolean("Allow Responsive", false),
            )
    }

    fn render(&self, attrs: &ComponentAttrs) -> String {
        let Some(url) = attr_string(attrs, "url") else {
            return String::new();
        };
        let embed = lookup_or_none(self.provider.as_ref(), &url, &SizeHints::default())
            .unwrap_or_else(|| escape_text(&url).into_owned());

        let mut html = format!(
            "<figure class=\"wp-block-embed\"><div class=\"wp-block-embed__wrapper\">\n{}\n</div>",
            embed
        );
        if let Some(caption) = attr_string(attrs, "caption") {
            html.push_str(&format!(
                r#"<figcaption class="wp-element-caption">{}</figcaption>"#,
                escape_text(&caption)
            ));
        }
        html.push_str("</figure>");
        html
    }

    fn allowed_html_tags(&self) -> AllowedTags {
        allowed_tags(&[
            ("figure", &["class"]),
            ("div", &["class"]),
            ("figcaption", &["class"]),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value as JsonValue, json};

    fn attrs(value: JsonValue) -> ComponentAttrs {
        match value {
            JsonValue::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn quote_with_value_and_citation() {
        let html = Quote.render(&attrs(json!({"value": "To be", "citation": "Hamlet"})));
        insta::assert_snapshot!(html, @r#"<blockquote class="wp-block-quote"><p>To be</p><cite>Hamlet</cite></blockquote>"#);
    }

    #[test]
    fn quote_omits_missing_parts() {
        assert_eq!(
            Quote.render(&attrs(json!({"value": "Only text"}))),
            r#"<blockquote class="wp-block-quote"><p>Only text</p></blockquote>"#
        );
        assert_eq!(
            Quote.render(&ComponentAttrs::new()),
            r#"<blockquote class="wp-block-quote"></blockquote>"#
        );
    }

    #[test]
    fn pullquote_wraps_blockquote_in_figure() {
        let html = Pullquote.render(&attrs(json!({"value": "Big idea", "citation": "Someone"})));
        insta::assert_snapshot!(html, @r#"<figure class="wp-block-pullquote"><blockquote><p>Big idea</p><cite>Someone</cite></blockquote></figure>"#);
    }

    #[test]
    fn code_escapes_content() {
        let html = Code.render(&attrs(json!({"content": "if a < b && c > d {}"})));
        assert_eq!(
            html,
            r#"<pre class="wp-block-code"><code>if a &lt; b &amp;&amp; c &gt; d {}</code></pre>"#
        );
        assert_eq!(
            Code.render(&attrs(json!({"content": ""}))),
            r#"<pre class="wp-block-code"></pre>"#
        );
    }

    #[test]
    fn embed_falls_back_to_url() {
        let html = Embed::default().render(&attrs(json!({
            "url": "https://example.com/post",
            "caption": "A post",
        })));
        assert_eq!(
            html,
            "<figure class=\"wp-block-embed\"><div class=\"wp-block-embed__wrapper\">\nhttps://example.com/post\n</div><figcaption class=\"wp-element-caption\">A post</figcaption></figure>"
        );
    }

    #[test]
    fn embed_uses_provider_markup() {
        let embed = Embed::new(Arc::new(|url: &str, _: &SizeHints| {
            Some(format!("<iframe src=\"{}\"></iframe>", url))
        }));
        let html = embed.render(&attrs(json!({"url": "https://vimeo.com/1"})));
        assert!(html.contains("\n<iframe src=\"https://vimeo.com/1\"></iframe>\n"), "{html}");
        assert!(!html.contains("figcaption"), "{html}");
    }

    #[test]
    fn embed_without_url_is_empty() {
        assert_eq!(Embed::default().render(&attrs(json!({"caption": "x"}))), "");
    }

    #[test]
    fn block_schemas_are_optional_fields() {
        let schema = Pullquote.schema();
        assert_eq!(schema.title, "Pullquote");
        assert!(schema.fields.values().all(|field| !field.required));
        let align = &schema.fields["textAlign"];
        let values: Vec<_> = align.options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, ["left", "center", "right"]);

        let embed = Embed::default().schema();
        assert_eq!(embed.fields["providerNameSlug"].display_name, "Provider Name Slug");
    }
}
