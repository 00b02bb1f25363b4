//! Component registry: type identifier → renderer.

/// Pre-populated registries.
pub mod defaults;
mod types;

pub use types::{
    AllowedTags, ComponentSchema, FieldOption, FieldSchema, FieldType, FnComponent,
    SmartComponent, allowed_tags, display_name_for,
};

use cpub_core::ComponentAttrs;
use std::collections::BTreeMap;
use std::fmt;

/// Maps uppercase type identifiers to components.
///
/// Lookups are case-insensitive. Registering a type twice replaces the earlier
/// component.
///
/// # Example
///
/// ```
/// use cpub_components::{ComponentRegistry, ComponentAttrs, AllowedTags};
///
/// let mut registry = ComponentRegistry::new();
/// registry.register_fn("widget_x", |_| "<b>x</b>".to_string(), AllowedTags::new());
/// assert!(registry.contains("WIDGET_X"));
/// assert_eq!(registry.render("Widget_X", &ComponentAttrs::new()), "<b>x</b>");
/// assert_eq!(registry.render("UNKNOWN", &ComponentAttrs::new()), "");
/// ```
#[derive(Default)]
pub struct ComponentRegistry {
    components: BTreeMap<String, Box<dyn SmartComponent>>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `component` under its uppercased type identifier.
    pub fn register<C>(&mut self, component: C) -> &mut Self
    where
        C: SmartComponent + 'static,
    {
        let key = component.component_type().to_ascii_uppercase();
        if self.components.insert(key.clone(), Box::new(component)).is_some() {
            log::debug!("Replacing registered component {}", key);
        }
        self
    }

    /// Registers a closure renderer under `component_type`.
    pub fn register_fn<F>(
        &mut self,
        component_type: &str,
        render: F,
        allowed_tags: AllowedTags,
    ) -> &mut Self
    where
        F: Fn(&ComponentAttrs) -> String + Send + Sync + 'static,
    {
        self.register(FnComponent::new(component_type, render, allowed_tags))
    }

    /// Looks up a component, ignoring ASCII case.
    pub fn get(&self, component_type: &str) -> Option<&dyn SmartComponent> {
        self.components
            .get(&component_type.to_ascii_uppercase())
            .map(|component| component.as_ref())
    }

    /// True if a component is registered for `component_type`.
    pub fn contains(&self, component_type: &str) -> bool {
        self.get(component_type).is_some()
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Registered type identifiers in sorted order.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    /// Renders `component_type`, or returns an empty string if it is unknown.
    pub fn render(&self, component_type: &str, attrs: &ComponentAttrs) -> String {
        match self.get(component_type) {
            Some(component) => component.render(attrs),
            None => String::new(),
        }
    }

    /// Union of every component's allowed tags and attributes.
    pub fn collect_allowed_tags(&self) -> AllowedTags {
        let mut merged = AllowedTags::new();
        for component in self.components.values() {
            for (tag, attributes) in component.allowed_html_tags() {
                merged.entry(tag).or_default().extend(attributes);
            }
        }
        merged
    }

    /// Schema of `component_type`, if registered.
    pub fn schema(&self, component_type: &str) -> Option<ComponentSchema> {
        self.get(component_type).map(|component| component.schema())
    }

    /// Schemas of all registered components keyed by type.
    pub fn schemas(&self) -> BTreeMap<String, ComponentSchema> {
        self.components
            .iter()
            .map(|(key, component)| (key.clone(), component.schema()))
            .collect()
    }
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("types", &self.components.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tags(entries: &[(&str, &[&str])]) -> AllowedTags {
        allowed_tags(entries)
    }

    #[test]
    fn register_uppercases_type() {
        let mut registry = ComponentRegistry::new();
        registry.register_fn("media_embed", |_| "x".into(), AllowedTags::new());
        assert_eq!(registry.types().collect::<Vec<_>>(), ["MEDIA_EMBED"]);
        assert!(registry.contains("Media_Embed"));
    }

    #[test]
    fn last_registration_wins() {
        let mut registry = ComponentRegistry::new();
        registry
            .register_fn("A", |_| "first".into(), AllowedTags::new())
            .register_fn("a", |_| "second".into(), AllowedTags::new());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.render("A", &ComponentAttrs::new()), "second");
    }

    #[test]
    fn render_unknown_type_is_empty() {
        let registry = ComponentRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.render("NOPE", &ComponentAttrs::new()), "");
        assert!(registry.schema("NOPE").is_none());
    }

    #[test]
    fn render_passes_attrs() {
        let mut registry = ComponentRegistry::new();
        registry.register_fn(
            "GREETING",
            |attrs| format!("<p>{}</p>", attrs["name"].as_str().unwrap_or_default()),
            AllowedTags::new(),
        );
        let attrs = match json!({"name": "Ada"}) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        assert_eq!(registry.render("greeting", &attrs), "<p>Ada</p>");
    }

    #[test]
    fn collect_allowed_tags_unions_attributes() {
        let mut registry = ComponentRegistry::new();
        registry
            .register_fn("A", |_| String::new(), tags(&[("iframe", &["src", "width"])]))
            .register_fn(
                "B",
                |_| String::new(),
                tags(&[("iframe", &["src", "height"]), ("div", &["class"])]),
            );

        let merged = registry.collect_allowed_tags();
        let iframe: Vec<_> = merged["iframe"].iter().map(String::as_str).collect();
        assert_eq!(iframe, ["height", "src", "width"]);
        assert!(merged["div"].contains("class"));
    }

    #[test]
    fn schemas_are_keyed_by_type() {
        let mut registry = ComponentRegistry::new();
        registry.register_fn("WIDGET_X", |_| String::new(), AllowedTags::new());
        let schemas = registry.schemas();
        assert_eq!(schemas["WIDGET_X"].title, "Widget X");
    }

    #[test]
    fn debug_lists_types() {
        let mut registry = ComponentRegistry::new();
        registry.register_fn("A", |_| String::new(), AllowedTags::new());
        assert_eq!(format!("{:?}", registry), r#"ComponentRegistry { types: ["A"] }"#);
    }
}
