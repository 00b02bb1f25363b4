//! Built-in components.

mod blocks;
mod media_embed;

pub use blocks::{Code, Embed, Pullquote, Quote};
pub use media_embed::MediaEmbed;

use cpub_core::ComponentAttrs;
use serde_json::Value as JsonValue;

/// Reads a non-empty text attribute. Numbers are accepted and stringified.
pub(crate) fn attr_string(attrs: &ComponentAttrs, key: &str) -> Option<String> {
    match attrs.get(key)? {
        JsonValue::String(value) if !value.is_empty() => Some(value.clone()),
        JsonValue::Number(value) => Some(value.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn attr_string_reads_text_and_numbers() {
        let attrs = match json!({"a": "x", "b": 640, "c": "", "d": null, "e": true}) {
            JsonValue::Object(map) => map,
            _ => unreachable!(),
        };
        assert_eq!(attr_string(&attrs, "a").as_deref(), Some("x"));
        assert_eq!(attr_string(&attrs, "b").as_deref(), Some("640"));
        assert_eq!(attr_string(&attrs, "c"), None);
        assert_eq!(attr_string(&attrs, "d"), None);
        assert_eq!(attr_string(&attrs, "e"), None);
        assert_eq!(attr_string(&attrs, "missing"), None);
    }
}
