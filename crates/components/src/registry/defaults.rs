//! Registries pre-populated with the built-in components.

use std::sync::Arc;

use super::ComponentRegistry;
use crate::builtins::{Code, Embed, MediaEmbed, Pullquote, Quote};
use crate::config::PipelineConfig;
use crate::oembed::{EmbedProvider, NoProvider};

/// Builds a registry with the built-ins described by `config`.
///
/// `MEDIA_EMBED` is always registered. The editor blocks (`CORE_QUOTE`,
/// `CORE_PULLQUOTE`, `CORE_CODE`, `CORE_EMBED`) are registered when
/// `enable_block_components` is set. Both embeds share `provider`.
pub fn builtin_registry(
    config: &PipelineConfig,
    provider: Arc<dyn EmbedProvider>,
) -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();
    registry.register(MediaEmbed::new(
        config.media_embed.clone(),
        Arc::clone(&provider),
    ));

    if config.enable_block_components {
        registry
            .register(Quote)
            .register(Pullquote)
            .register(Code)
            .register(Embed::new(provider));
    }
    registry
}

/// Built-ins with default configuration and no provider lookups.
///
/// # Example
///
/// ```
/// use cpub_components::default_registry;
///
/// let registry = default_registry();
/// let types: Vec<_> = registry.types().collect();
/// assert_eq!(
///     types,
///     ["CORE_CODE", "CORE_EMBED", "CORE_PULLQUOTE", "CORE_QUOTE", "MEDIA_EMBED"]
/// );
/// ```
pub fn default_registry() -> ComponentRegistry {
    builtin_registry(&PipelineConfig::default(), Arc::new(NoProvider))
}
