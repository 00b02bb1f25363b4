#![deny(missing_docs)]
//! cpub components: smart-component registry, built-in renderers, and the
//! raw/processed placeholder merge pipeline.

/// Parallel processing of many documents.
#[cfg(feature = "parallel")]
pub mod batch;
/// Built-in smart components (media embed and editor blocks).
pub mod builtins;
/// Serde configuration types.
pub mod config;
/// oEmbed-style provider lookup used by embeds.
pub mod oembed;
/// Extraction + merge pipeline over a registry.
pub mod pipeline;
/// Single-component preview rendering.
pub mod preview;
/// Component trait, schema types and the registry.
pub mod registry;

#[cfg(feature = "parallel")]
pub use batch::{BatchInput, BatchOptions, BatchOutput, BatchResult, BatchStats};
pub use builtins::{Code, Embed, MediaEmbed, Pullquote, Quote};
pub use config::{MediaEmbedConfig, OEmbedConfig, OEmbedProviderConfig, PipelineConfig};
#[cfg(feature = "http-oembed")]
pub use oembed::HttpOEmbedProvider;
pub use oembed::{EmbedProvider, NoProvider, ProviderError, SizeHints};
pub use pipeline::{ComponentPipeline, unsupported_component_comment};
pub use preview::{PreviewMode, render_preview};
pub use registry::defaults::{builtin_registry, default_registry};
pub use registry::{
    AllowedTags, ComponentRegistry, ComponentSchema, FieldOption, FieldSchema, FieldType,
    FnComponent, SmartComponent, allowed_tags,
};

pub use cpub_core::{ComponentAttrs, RawComponent};
