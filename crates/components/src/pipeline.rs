//! Merge of rendered components into the processed content stream.

use cpub_core::{
    CpubError, RawComponent, content_has_components, enhance, extract_components,
    rewrite_placeholders,
};
use html_escape::encode_text as escape_text;

use crate::registry::ComponentRegistry;

/// Comment left in place of a component whose type is not registered.
pub fn unsupported_component_comment(component_type: &str) -> String {
    format!(
        "<!-- unsupported smart component: {} -->",
        escape_text(component_type)
    )
}

/// Extraction and placeholder merge over a shared registry.
///
/// # Example
///
/// ```
/// use cpub_components::{ComponentPipeline, ComponentAttrs, default_registry};
/// use cpub_core::encode_attrs;
///
/// let registry = default_registry();
/// let pipeline = ComponentPipeline::new(&registry);
///
/// let mut attrs = ComponentAttrs::new();
/// attrs.insert("content".into(), "fn main() {}".into());
/// let raw = format!(
///     r#"<pcc-component id="c1" type="CORE_CODE" attrs="{}"></pcc-component>"#,
///     encode_attrs(&attrs)
/// );
///
/// let html = pipeline.process_content("<p>Code:</p><component></component>", Some(&raw));
/// assert_eq!(
///     html,
///     r#"<p>Code:</p><pre class="wp-block-code"><code>fn main() {}</code></pre>"#
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ComponentPipeline<'r> {
    registry: &'r ComponentRegistry,
}

impl<'r> ComponentPipeline<'r> {
    /// Creates a pipeline over `registry`.
    pub fn new(registry: &'r ComponentRegistry) -> Self {
        Self { registry }
    }

    /// The registry components are rendered with.
    pub fn registry(&self) -> &'r ComponentRegistry {
        self.registry
    }

    /// Extracts component records from the raw stream.
    pub fn extract_components(&self, raw: &str) -> Vec<RawComponent> {
        extract_components(raw)
    }

    /// Replaces the Nth placeholder with the Nth record's rendering.
    ///
    /// Surplus placeholders are left as they are and surplus records are
    /// dropped. On a rewriter failure the processed content is returned
    /// unchanged.
    pub fn merge_placeholders(&self, processed: &str, records: &[RawComponent]) -> String {
        match self.try_merge_placeholders(processed, records) {
            Ok(html) => html,
            Err(err) => {
                log::warn!("Placeholder merge failed, keeping processed content: {}", err);
                processed.to_string()
            }
        }
    }

    /// Fallible variant of [`merge_placeholders`](Self::merge_placeholders).
    pub fn try_merge_placeholders(
        &self,
        processed: &str,
        records: &[RawComponent],
    ) -> Result<String, CpubError> {
        if records.is_empty() || !content_has_components(processed) {
            return Ok(processed.to_string());
        }

        let mut placeholders = 0usize;
        let merged = rewrite_placeholders(processed, |index| {
            placeholders += 1;
            records.get(index).map(|record| self.render_record(record))
        })?;

        if placeholders != records.len() {
            log::debug!(
                "Placeholder count {} does not match component count {}",
                placeholders,
                records.len()
            );
        }
        Ok(merged)
    }

    /// Renders components from `raw` into the placeholders of `processed`.
    ///
    /// Without a raw stream, or when it holds no components, `processed` is
    /// returned unchanged.
    pub fn process_content(&self, processed: &str, raw: Option<&str>) -> String {
        let Some(raw) = raw else {
            return processed.to_string();
        };
        let records = self.extract_components(raw);
        if records.is_empty() {
            return processed.to_string();
        }
        self.merge_placeholders(processed, &records)
    }

    /// Enhances `processed` and then merges components into it.
    ///
    /// Enhancement runs first so component markup keeps its inline styles.
    pub fn process_and_enhance(&self, processed: &str, raw: Option<&str>) -> String {
        self.process_content(&enhance(processed), raw)
    }

    fn render_record(&self, record: &RawComponent) -> String {
        if !self.registry.contains(&record.component_type) {
            log::debug!(
                "No component registered for type {} (id {})",
                record.component_type,
                record.id
            );
            return unsupported_component_comment(&record.component_type);
        }
        self.registry.render(&record.component_type, &record.attrs)
    }
}
