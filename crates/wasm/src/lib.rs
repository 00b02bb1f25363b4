use std::sync::Arc;

use cpub_components::{
    ComponentPipeline, ComponentRegistry, NoProvider, PipelineConfig, PreviewMode,
    builtin_registry,
};
use serde::Serialize;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

// ============================================================================
// Helpers
// ============================================================================

fn parse_config(config: JsValue) -> Result<PipelineConfig, JsError> {
    if config.is_undefined() || config.is_null() {
        return Ok(PipelineConfig::default());
    }
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))
}

/// Maps become plain objects rather than ES `Map`s.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

// ============================================================================
// Stateless API
// ============================================================================

/// Cleans exported HTML: strips inline styles, converts layout tables to
/// flex rows and flattens `<div>` wrappers.
#[wasm_bindgen]
pub fn enhance(html: &str) -> String {
    cpub_core::enhance(html)
}

/// Returns true if processed content contains `<component>` placeholders.
#[wasm_bindgen(js_name = contentHasComponents)]
pub fn content_has_components(content: &str) -> bool {
    cpub_core::content_has_components(content)
}

// ============================================================================
// Pipeline
// ============================================================================

/// A component registry plus the operations that use it.
///
/// # Example (JavaScript)
///
/// ```javascript
/// import { ContentPipeline } from './cpub_wasm';
///
/// const pipeline = new ContentPipeline({ enableBlockComponents: true });
/// const html = pipeline.processContent(doc.processed, doc.raw);
/// const allowed = pipeline.allowedTags();
/// ```
#[wasm_bindgen]
pub struct ContentPipeline {
    registry: ComponentRegistry,
}

#[wasm_bindgen]
impl ContentPipeline {
    /// Builds the built-in registry from an optional `PipelineConfig` object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ContentPipeline, JsError> {
        let config = parse_config(config)?;
        Ok(Self {
            registry: builtin_registry(&config, Arc::new(NoProvider)),
        })
    }

    /// Registered component types, sorted.
    pub fn types(&self) -> js_sys::Array {
        self.registry.types().map(JsValue::from_str).collect()
    }

    /// Renders components from `raw` into the placeholders of `processed`.
    #[wasm_bindgen(js_name = processContent)]
    pub fn process_content(&self, processed: &str, raw: Option<String>) -> String {
        ComponentPipeline::new(&self.registry).process_content(processed, raw.as_deref())
    }

    /// Enhances `processed`, then renders components into it.
    #[wasm_bindgen(js_name = processAndEnhance)]
    pub fn process_and_enhance(&self, processed: &str, raw: Option<String>) -> String {
        ComponentPipeline::new(&self.registry).process_and_enhance(processed, raw.as_deref())
    }

    /// Component records of a raw stream as `[{id, type, attrs}]`.
    #[wasm_bindgen(js_name = extractComponents)]
    pub fn extract_components(&self, raw: &str) -> Result<JsValue, JsError> {
        to_js(&ComponentPipeline::new(&self.registry).extract_components(raw))
    }

    /// Schemas of every registered component keyed by type.
    pub fn schema(&self) -> Result<JsValue, JsError> {
        to_js(&self.registry.schemas())
    }

    /// Tag → allowed attributes for the output sanitizer.
    #[wasm_bindgen(js_name = allowedTags)]
    pub fn allowed_tags(&self) -> Result<JsValue, JsError> {
        to_js(&self.registry.collect_allowed_tags())
    }

    /// Renders one component for the editor preview. `undefined` when the id
    /// is unknown.
    #[wasm_bindgen(js_name = renderPreview)]
    pub fn render_preview(
        &self,
        component_id: &str,
        attrs: Option<String>,
        snippet: bool,
    ) -> Option<String> {
        let mode = if snippet {
            PreviewMode::Snippet
        } else {
            PreviewMode::Page
        };
        cpub_components::render_preview(&self.registry, component_id, attrs.as_deref(), mode)
    }
}
