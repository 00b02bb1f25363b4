//! The smart-component tag protocol.
//!
//! A document is delivered as two parallel streams:
//!
//! - the raw stream carries one `<pcc-component id="…" type="…" attrs="…"></pcc-component>`
//!   tag per component, where `attrs` is base64-encoded JSON;
//! - the processed stream carries an opaque `<component></component>`
//!   placeholder where each component belongs.
//!
//! The Nth placeholder belongs to the Nth raw tag. Ids are informational only.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use lol_html::html_content::ContentType;
use lol_html::{RewriteStrSettings, element, rewrite_str};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::{AttrsError, CpubError};

/// Tag name of component records in the raw stream.
pub const COMPONENT_TAG: &str = "pcc-component";

/// Tag name of placeholders in the processed stream.
pub const PLACEHOLDER_TAG: &str = "component";

/// Decoded component attributes.
pub type ComponentAttrs = serde_json::Map<String, JsonValue>;

/// Standard alphabet; padding is optional on decode and emitted on encode.
const ATTRS_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// One `<pcc-component>` occurrence in a raw content stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawComponent {
    /// Producer-assigned id. Not used for placeholder pairing.
    #[serde(default)]
    pub id: String,
    /// Component type as written by the producer (e.g. `MEDIA_EMBED`).
    #[serde(rename = "type")]
    pub component_type: String,
    /// Decoded attributes; empty when the payload was malformed.
    #[serde(default)]
    pub attrs: ComponentAttrs,
}

impl RawComponent {
    /// Creates a record.
    pub fn new(
        id: impl Into<String>,
        component_type: impl Into<String>,
        attrs: ComponentAttrs,
    ) -> Self {
        Self {
            id: id.into(),
            component_type: component_type.into(),
            attrs,
        }
    }
}

/// Extracts component records from a raw content stream, in document order.
///
/// Attribute order inside the tag does not matter. A tag without a `type` is
/// not a component record and is skipped. A malformed `attrs` payload never
/// drops the record; it yields an empty attribute map instead.
///
/// # Examples
///
/// ```
/// use cpub_core::extract_components;
///
/// let raw = r#"<p>Hi</p><pcc-component id="c1" type="MEDIA_EMBED" attrs="!!!"></pcc-component>"#;
/// let records = extract_components(raw);
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].component_type, "MEDIA_EMBED");
/// assert!(records[0].attrs.is_empty());
/// ```
pub fn extract_components(raw: &str) -> Vec<RawComponent> {
    match try_extract_components(raw) {
        Ok(components) => components,
        Err(err) => {
            log::warn!("Component extraction failed: {}", err);
            Vec::new()
        }
    }
}

/// Fallible variant of [`extract_components`].
pub fn try_extract_components(raw: &str) -> Result<Vec<RawComponent>, CpubError> {
    if !contains_tag_start(raw, COMPONENT_TAG) {
        return Ok(Vec::new());
    }

    let mut components = Vec::new();
    rewrite_str(
        raw,
        RewriteStrSettings {
            element_content_handlers: vec![element!(COMPONENT_TAG, |el| {
                let Some(component_type) = el.get_attribute("type").filter(|t| !t.is_empty())
                else {
                    log::debug!("Skipping <{}> without a type attribute", COMPONENT_TAG);
                    return Ok(());
                };
                let id = el.get_attribute("id").unwrap_or_default();
                let attrs = el
                    .get_attribute("attrs")
                    .map(|payload| decode_attrs_lenient(&payload))
                    .unwrap_or_default();
                components.push(RawComponent {
                    id,
                    component_type,
                    attrs,
                });
                Ok(())
            })],
            ..RewriteStrSettings::new()
        },
    )?;

    Ok(components)
}

/// Decodes a base64(JSON object) `attrs` payload.
pub fn decode_attrs(payload: &str) -> Result<ComponentAttrs, AttrsError> {
    let bytes = ATTRS_ENGINE.decode(payload.trim())?;
    match serde_json::from_slice::<JsonValue>(&bytes)? {
        JsonValue::Object(map) => Ok(map),
        _ => Err(AttrsError::NotAnObject),
    }
}

/// Decodes an `attrs` payload, falling back to an empty map.
pub fn decode_attrs_lenient(payload: &str) -> ComponentAttrs {
    decode_attrs(payload).unwrap_or_else(|err| {
        log::debug!("Ignoring undecodable component attrs: {}", err);
        ComponentAttrs::new()
    })
}

/// Encodes attributes the way the document producer does: base64(JSON).
pub fn encode_attrs(attrs: &ComponentAttrs) -> String {
    let json = JsonValue::Object(attrs.clone()).to_string();
    ATTRS_ENGINE.encode(json)
}

/// Returns true if `content` contains a `<component>` placeholder.
///
/// `<component` must be followed by whitespace or `>`, so `<mycomponent>` and
/// `<component-list>` do not count.
pub fn content_has_components(content: &str) -> bool {
    contains_tag_start(content, PLACEHOLDER_TAG)
}

/// Rewrites `<component>` placeholders in document order.
///
/// `replacement` receives the zero-based index of each placeholder; the index
/// advances for every placeholder whether or not it is replaced. Returning
/// `None` leaves that placeholder byte-for-byte as it was.
pub fn rewrite_placeholders<F>(processed: &str, mut replacement: F) -> Result<String, CpubError>
where
    F: FnMut(usize) -> Option<String>,
{
    let mut index = 0usize;
    let output = rewrite_str(
        processed,
        RewriteStrSettings {
            element_content_handlers: vec![element!(PLACEHOLDER_TAG, |el| {
                let position = index;
                index += 1;
                if let Some(html) = replacement(position) {
                    el.replace(&html, ContentType::Html);
                }
                Ok(())
            })],
            ..RewriteStrSettings::new()
        },
    )?;

    Ok(output)
}

/// Case-insensitive search for `<tag` followed by whitespace or `>`.
fn contains_tag_start(content: &str, tag: &str) -> bool {
    let haystack = content.as_bytes();
    let tag = tag.as_bytes();
    let prefix_len = tag.len() + 1;

    haystack.windows(prefix_len + 1).any(|window| {
        window[0] == b'<'
            && window[1..prefix_len].eq_ignore_ascii_case(tag)
            && (window[prefix_len] == b'>' || window[prefix_len].is_ascii_whitespace())
    })
}
