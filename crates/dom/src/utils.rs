//! Utility functions for DOM processing

use crate::arena::DomArena;
use crate::error::Result;
use crate::types::{DomNode, ElementHandle, NodeType};

/// Cap text length to keep display lines short
pub fn cap_text_length(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}...", &text[..cut]),
    }
}

/// Collapse runs of whitespace into single spaces and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Look up a property in an inline `style` declaration list
///
/// Property names compare case-insensitively; the last declaration wins.
pub fn style_property<'a>(style: &'a str, property: &str) -> Option<&'a str> {
    style
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .filter(|(name, _)| name.trim().eq_ignore_ascii_case(property))
        .map(|(_, value)| value.trim().trim_end_matches("!important").trim())
        .last()
}

/// Check if element is rendered according to its own attributes and style
///
/// An element is not rendered if it carries the `hidden` attribute, or its
/// inline style sets `display: none` or `visibility: hidden|collapse`.
/// Ancestors are not consulted here; callers walking the tree skip the
/// subtree of an unrendered element.
pub fn is_element_visible_by_css(node: &DomNode) -> bool {
    if node.node_type != NodeType::Element {
        return true;
    }

    if node.has_attr("hidden") {
        return false;
    }

    if let Some(style) = node.attr("style") {
        if let Some(display) = style_property(style, "display") {
            if display.eq_ignore_ascii_case("none") {
                return false;
            }
        }
        if let Some(visibility) = style_property(style, "visibility") {
            if visibility.eq_ignore_ascii_case("hidden")
                || visibility.eq_ignore_ascii_case("collapse")
            {
                return false;
            }
        }
    }

    true
}

/// Check if the element and every ancestor are rendered
pub fn is_rendered(arena: &DomArena, handle: ElementHandle) -> bool {
    match arena.resolve(handle) {
        Some(node) => {
            is_element_visible_by_css(node) && arena.ancestors(handle).all(is_element_visible_by_css)
        }
        None => false,
    }
}

/// Get all text content from node and its descendants, whitespace collapsed
pub fn get_text_content(arena: &DomArena, handle: ElementHandle) -> Result<String> {
    let mut text = String::new();

    arena.traverse_df(handle, |_, node, _| {
        if node.node_type == NodeType::Text {
            text.push_str(&node.node_value);
            text.push(' ');
        }
        Ok(())
    })?;

    Ok(collapse_whitespace(&text))
}
