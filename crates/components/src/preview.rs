//! Rendering of a single component for the editor's preview panes.

use cpub_core::{ComponentAttrs, decode_attrs_lenient};
use serde_json::{Number, Value as JsonValue};

use crate::registry::ComponentRegistry;

/// Shape of the preview response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewMode {
    /// Bare component markup, for the document preview pane.
    Snippet,
    /// A standalone HTML page, for the component edit popup.
    #[default]
    Page,
}

/// Renders one component from a preview request.
///
/// `component_id` may use the editor's spellings (`core_quote`, `core/quote`,
/// `MEDIA_EMBED`). `attrs` is the base64(JSON) payload from the request; an
/// undecodable payload renders with no attributes. String values `"true"` and
/// `"false"` become booleans and numeric strings become numbers, since preview
/// requests carry every value as text.
///
/// Returns `None` when no component is registered for the id.
///
/// # Example
///
/// ```
/// use cpub_components::{PreviewMode, default_registry, render_preview};
///
/// let registry = default_registry();
/// let html = render_preview(&registry, "core/code", None, PreviewMode::Snippet);
/// assert_eq!(html.as_deref(), Some(r#"<pre class="wp-block-code"></pre>"#));
/// assert!(render_preview(&registry, "core_unknown", None, PreviewMode::Snippet).is_none());
/// ```
pub fn render_preview(
    registry: &ComponentRegistry,
    component_id: &str,
    attrs: Option<&str>,
    mode: PreviewMode,
) -> Option<String> {
    let component_type = registry_key(component_id);
    let component = registry.get(&component_type)?;

    let attrs = attrs
        .filter(|payload| !payload.is_empty())
        .map(decode_attrs_lenient)
        .map(coerce_attr_strings)
        .unwrap_or_default();
    let rendered = component.render(&attrs);

    Some(match mode {
        PreviewMode::Snippet => rendered,
        PreviewMode::Page => preview_page(&rendered),
    })
}

/// `core/embed`, `core_embed` and `CORE_EMBED` all map to `CORE_EMBED`.
fn registry_key(component_id: &str) -> String {
    component_id.trim().replace('/', "_").to_ascii_uppercase()
}

fn coerce_attr_strings(attrs: ComponentAttrs) -> ComponentAttrs {
    attrs
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                JsonValue::String(text) => coerce_string(text),
                other => other,
            };
            (key, value)
        })
        .collect()
}

fn coerce_string(text: String) -> JsonValue {
    match text.as_str() {
        "true" => return JsonValue::Bool(true),
        "false" => return JsonValue::Bool(false),
        _ => {}
    }

    let trimmed = text.trim();
    if let Ok(integer) = trimmed.parse::<i64>() {
        return JsonValue::Number(integer.into());
    }
    let looks_numeric = !trimmed.is_empty()
        && trimmed
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if looks_numeric {
        if let Some(number) = trimmed.parse::<f64>().ok().and_then(Number::from_f64) {
            return JsonValue::Number(number);
        }
    }
    JsonValue::String(text)
}

fn preview_page(body: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html>\n",
            "<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
            "<style>body{{margin:0;padding:16px;}}</style>\n",
            "</head>\n",
            "<body class=\"component-preview\">\n",
            "{}\n",
            "</body>\n",
            "</html>\n"
        ),
        body
    )
}
