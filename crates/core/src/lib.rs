#![deny(missing_docs)]
//! cpub core: HTML content enhancement and the `<pcc-component>` tag protocol.

/// HTML content enhancer (style stripping, responsive layout tables, div flattening).
pub mod enhancer;
/// Core error types.
pub mod error;
/// The `<pcc-component>` / `<component>` tag protocol.
pub mod protocol;
/// Inline style declaration parsing and serialization.
pub mod style;

pub use enhancer::{KEEP_STYLE_ATTR, enhance, try_enhance};
pub use error::{AttrsError, CpubError};
pub use protocol::{
    COMPONENT_TAG, ComponentAttrs, PLACEHOLDER_TAG, RawComponent, content_has_components,
    decode_attrs, decode_attrs_lenient, encode_attrs, extract_components, rewrite_placeholders,
    try_extract_components,
};
pub use style::StyleDeclarations;
