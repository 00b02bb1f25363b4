//! Component trait and the schema types exposed to the remote editor.

use cpub_core::ComponentAttrs;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Tag → allowed attribute names, as consumed by the host's output sanitizer.
pub type AllowedTags = BTreeMap<String, BTreeSet<String>>;

/// A renderable smart component.
///
/// Implementations must be pure with respect to the registry: `render` may do
/// a best-effort provider lookup but must never panic or return an error.
pub trait SmartComponent: Send + Sync {
    /// Type identifier, e.g. `MEDIA_EMBED`. Registered uppercased.
    fn component_type(&self) -> &str;

    /// Declarative description of the component's configurable fields.
    fn schema(&self) -> ComponentSchema;

    /// Renders the component to HTML. Returns an empty string when required
    /// attributes are missing.
    fn render(&self, attrs: &ComponentAttrs) -> String;

    /// Tags and attributes the rendered markup needs to survive sanitization.
    fn allowed_html_tags(&self) -> AllowedTags {
        AllowedTags::new()
    }
}

/// Field type understood by the remote editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free text.
    String,
    /// Numeric input.
    Number,
    /// Checkbox.
    Boolean,
    /// One of a fixed list of options.
    Enum,
}

/// One option of an [`FieldType::Enum`] field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    /// Human-readable label.
    pub label: String,
    /// Stored value.
    pub value: String,
}

/// A configurable field of a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    /// Label shown in the editor form.
    pub display_name: String,
    /// Input type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether the editor must require a value.
    pub required: bool,
    /// Options for enum fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
}

impl FieldSchema {
    fn new(display_name: &str, field_type: FieldType, required: bool) -> Self {
        Self {
            display_name: display_name.to_string(),
            field_type,
            required,
            options: Vec::new(),
        }
    }

    /// A string field.
    pub fn string(display_name: &str, required: bool) -> Self {
        Self::new(display_name, FieldType::String, required)
    }

    /// A numeric field.
    pub fn number(display_name: &str, required: bool) -> Self {
        Self::new(display_name, FieldType::Number, required)
    }

    /// A boolean field.
    pub fn boolean(display_name: &str, required: bool) -> Self {
        Self::new(display_name, FieldType::Boolean, required)
    }

    /// An enum field whose option labels are derived from the values.
    pub fn enumeration(display_name: &str, required: bool, values: &[&str]) -> Self {
        let mut field = Self::new(display_name, FieldType::Enum, required);
        field.options = values
            .iter()
            .map(|value| FieldOption {
                label: display_name_for(value),
                value: value.to_string(),
            })
            .collect();
        field
    }
}

/// Schema of one component: title plus named fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSchema {
    /// Display title.
    pub title: String,
    /// Optional icon shown by the editor.
    pub icon_url: Option<String>,
    /// Configurable fields keyed by attribute name.
    pub fields: BTreeMap<String, FieldSchema>,
}

impl ComponentSchema {
    /// Creates a schema with no fields.
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            icon_url: None,
            fields: BTreeMap::new(),
        }
    }

    /// Adds a field.
    pub fn field(mut self, name: &str, field: FieldSchema) -> Self {
        self.fields.insert(name.to_string(), field);
        self
    }
}

/// Turns an identifier into a label: `providerNameSlug` → `Provider Name Slug`,
/// `text_align` → `Text Align`, `core/pull-quote` → `Core/pull Quote`.
pub fn display_name_for(name: &str) -> String {
    let mut spaced = String::with_capacity(name.len() + 4);
    let mut previous: Option<char> = None;
    for ch in name.chars() {
        if ch.is_ascii_uppercase() && previous.is_some_and(|p| p.is_ascii_lowercase()) {
            spaced.push(' ');
        }
        spaced.push(if ch == '-' || ch == '_' { ' ' } else { ch });
        previous = Some(ch);
    }

    let mut label = String::with_capacity(spaced.len());
    let mut at_word_start = true;
    for ch in spaced.chars() {
        if at_word_start {
            label.extend(ch.to_uppercase());
        } else {
            label.push(ch);
        }
        at_word_start = ch.is_whitespace();
    }
    label
}

/// Adapts a closure into a [`SmartComponent`], for hosts that register
/// renderers without a dedicated type.
pub struct FnComponent<F> {
    component_type: String,
    render: F,
    allowed_tags: AllowedTags,
}

impl<F> FnComponent<F>
where
    F: Fn(&ComponentAttrs) -> String + Send + Sync,
{
    /// Wraps `render` under `component_type`.
    pub fn new(component_type: &str, render: F, allowed_tags: AllowedTags) -> Self {
        Self {
            component_type: component_type.to_string(),
            render,
            allowed_tags,
        }
    }
}

impl<F> SmartComponent for FnComponent<F>
where
    F: Fn(&ComponentAttrs) -> String + Send + Sync,
{
    fn component_type(&self) -> &str {
        &self.component_type
    }

    fn schema(&self) -> ComponentSchema {
        ComponentSchema::new(&display_name_for(&self.component_type.to_ascii_lowercase()))
    }

    fn render(&self, attrs: &ComponentAttrs) -> String {
        (self.render)(attrs)
    }

    fn allowed_html_tags(&self) -> AllowedTags {
        self.allowed_tags.clone()
    }
}

/// Builds an [`AllowedTags`] entry list from string slices.
pub fn allowed_tags(entries: &[(&str, &[&str])]) -> AllowedTags {
    entries
        .iter()
        .map(|(tag, attributes)| {
            (
                tag.to_string(),
                attributes.iter().map(|a| a.to_string()).collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_from_identifiers() {
        assert_eq!(display_name_for("url"), "Url");
        assert_eq!(display_name_for("providerNameSlug"), "Provider Name Slug");
        assert_eq!(display_name_for("text_align"), "Text Align");
        assert_eq!(display_name_for("allow-responsive"), "Allow Responsive");
        assert_eq!(display_name_for("widget_x"), "Widget X");
    }

    #[test]
    fn enum_fields_carry_options() {
        let field = FieldSchema::enumeration("Text Align", false, &["left", "center"]);
        assert_eq!(field.field_type, FieldType::Enum);
        assert_eq!(field.options.len(), 2);
        assert_eq!(field.options[1].label, "Center");
        assert_eq!(field.options[1].value, "center");
    }

    #[test]
    fn schema_serializes_for_the_editor() {
        let schema = ComponentSchema::new("Media Embed")
            .field("url", FieldSchema::string("URL", true))
            .field("align", FieldSchema::enumeration("Align", false, &["left"]));
        let json = serde_json::to_value(&schema).expect("schema serializes");

        assert_eq!(json["title"], "Media Embed");
        assert!(json["iconUrl"].is_null());
        assert_eq!(json["fields"]["url"]["displayName"], "URL");
        assert_eq!(json["fields"]["url"]["type"], "string");
        assert_eq!(json["fields"]["url"]["required"], true);
        assert!(json["fields"]["url"].get("options").is_none());
        assert_eq!(json["fields"]["align"]["type"], "enum");
        assert_eq!(json["fields"]["align"]["options"][0]["label"], "Left");
    }

    #[test]
    fn fn_component_delegates_to_closure() {
        let component = FnComponent::new(
            "WIDGET_X",
            |attrs: &ComponentAttrs| format!("<b>{}</b>", attrs.len()),
            allowed_tags(&[("b", &["class"])]),
        );
        assert_eq!(component.render(&ComponentAttrs::new()), "<b>0</b>");
        assert_eq!(component.schema().title, "Widget X");
        assert!(component.allowed_html_tags()["b"].contains("class"));
    }
}
