//! Structural HTML normalizer for word-processor exports.
//!
//! The enhancer parses a fragment into a disposable tree and applies, in order:
//!
//! 1. removal of every `<style>` element,
//! 2. responsive conversion of layout tables (see [`tables`]),
//! 3. removal of inline `style` attributes, except on `<img>` and on elements
//!    marked with [`KEEP_STYLE_ATTR`] by step 2,
//! 4. flattening of every `<div>` into its parent.
//!
//! Later steps rely on the earlier ones: the style stripper must see the
//! markers set by the table conversion, and flattening runs last so the table
//! pass still sees the original structure.

mod tables;

use kuchikiki::NodeRef;
use kuchikiki::traits::TendrilSink;

use crate::error::CpubError;
use crate::style::StyleDeclarations;

/// Marker attribute for elements whose inline style survives stripping.
pub const KEEP_STYLE_ATTR: &str = "data-keep-style";

/// Tags whose inline style is never stripped.
const PRESERVE_STYLE_TAGS: &[&str] = &["img"];

/// Enhances an HTML fragment for theme display.
///
/// Whitespace-only input is returned unchanged without parsing. Any internal
/// failure is logged and the input is passed through, so a malformed document
/// never breaks the surrounding render.
///
/// # Examples
///
/// ```
/// use cpub_core::enhance;
///
/// let html = enhance("<div><p style=\"color:red\">A</p></div>");
/// assert_eq!(html, "<p>A</p>");
/// ```
pub fn enhance(html: &str) -> String {
    if html.trim().is_empty() {
        return html.to_string();
    }

    match try_enhance(html) {
        Ok(enhanced) => enhanced,
        Err(err) => {
            log::warn!("Content enhancement failed, passing input through: {}", err);
            html.to_string()
        }
    }
}

/// Fallible variant of [`enhance`].
pub fn try_enhance(html: &str) -> Result<String, CpubError> {
    if html.trim().is_empty() {
        return Ok(html.to_string());
    }

    let root = parse_fragment(html);

    remove_style_tags(&root);
    tables::make_layout_tables_responsive(&root);
    strip_inline_styles(&root);
    remove_div_tags(&root);

    serialize_children(&root)
}

/// Parses `html` as body content and returns the `<body>` node.
///
/// The explicit `<body>` prefix keeps leading `<style>`, `<meta>` or `<link>`
/// elements in place instead of letting the parser hoist them into `<head>`.
fn parse_fragment(html: &str) -> NodeRef {
    let document = kuchikiki::parse_html().one(format!("<body>{}", html));
    match document.select_first("body") {
        Ok(body) => body.as_node().clone(),
        Err(()) => document,
    }
}

fn serialize_children(root: &NodeRef) -> Result<String, CpubError> {
    let mut buffer = Vec::new();
    for child in root.children() {
        child.serialize(&mut buffer)?;
    }
    Ok(String::from_utf8(buffer)?)
}

/// Collects every element matching `selector` under `root`, in document order.
///
/// The result is materialized so callers can detach or re-parent nodes while
/// iterating.
pub(crate) fn select_nodes(root: &NodeRef, selector: &str) -> Vec<NodeRef> {
    match root.select(selector) {
        Ok(matches) => matches.map(|el| el.as_node().clone()).collect(),
        Err(()) => {
            log::debug!("Invalid selector: {}", selector);
            Vec::new()
        }
    }
}

pub(crate) fn get_attribute(node: &NodeRef, name: &str) -> Option<String> {
    let element = node.as_element()?;
    let attributes = element.attributes.borrow();
    attributes.get(name).map(str::to_string)
}

pub(crate) fn has_attribute(node: &NodeRef, name: &str) -> bool {
    node.as_element()
        .is_some_and(|element| element.attributes.borrow().contains(name))
}

pub(crate) fn style_of(node: &NodeRef) -> StyleDeclarations {
    get_attribute(node, "style")
        .map(|style| StyleDeclarations::parse(&style))
        .unwrap_or_default()
}

/// Writes `style` back to `node` and marks it so step 3 keeps it.
pub(crate) fn apply_kept_style(node: &NodeRef, style: &StyleDeclarations) {
    if let Some(element) = node.as_element() {
        let mut attributes = element.attributes.borrow_mut();
        attributes.insert("style", style.to_string());
        attributes.insert(KEEP_STYLE_ATTR, "true".to_string());
    }
}

fn remove_style_tags(root: &NodeRef) {
    for style in select_nodes(root, "style") {
        style.detach();
    }
}

fn strip_inline_styles(root: &NodeRef) {
    for node in select_nodes(root, "[style]") {
        let Some(element) = node.as_element() else {
            continue;
        };
        let tag: &str = &element.name.local;
        if PRESERVE_STYLE_TAGS.contains(&tag) {
            continue;
        }
        let mut attributes = element.attributes.borrow_mut();
        if attributes.contains(KEEP_STYLE_ATTR) {
            continue;
        }
        attributes.remove("style");
    }
}

/// Flattens divs one at a time, always restarting from the first remaining
/// div so nested and newly exposed divs are handled too.
fn remove_div_tags(root: &NodeRef) {
    while let Ok(found) = root.select_first("div") {
        let div = found.as_node().clone();
        while let Some(child) = div.first_child() {
            div.insert_before(child);
        }
        div.detach();
    }
}
