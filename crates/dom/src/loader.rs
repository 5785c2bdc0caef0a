//! Build a page tree from a JSON description
//!
//! Input format, one object per node:
//! ```json
//! {
//!   "tag": "nav",
//!   "attributes": { "aria-label": "Site" },
//!   "children": [ { "text": "Home" } ]
//! }
//! ```
//! The top-level value is either a single node or an array of nodes; they are
//! appended under the document root in order.

use serde_json::Value;

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::types::ElementHandle;

/// Parse a JSON node tree into a fresh arena
pub fn load_document(json: &Value) -> Result<DomArena> {
    let mut arena = DomArena::new();
    let root = arena.root();
    match json {
        Value::Array(nodes) => {
            for node in nodes {
                parse_node(&mut arena, node, root)?;
            }
        }
        node => {
            parse_node(&mut arena, node, root)?;
        }
    }
    Ok(arena)
}

/// Parse a JSON string into a fresh arena
pub fn load_document_str(json: &str) -> Result<DomArena> {
    let value: Value = serde_json::from_str(json)?;
    load_document(&value)
}

/// Parse one node and its descendants, appending it under `parent`
pub fn parse_node(arena: &mut DomArena, json: &Value, parent: ElementHandle) -> Result<ElementHandle> {
    if let Some(text) = json.get("text").and_then(Value::as_str) {
        let handle = arena.create_text(text);
        arena.append_child(parent, handle)?;
        return Ok(handle);
    }

    let tag = json
        .get("tag")
        .and_then(Value::as_str)
        .ok_or(DomError::MissingField("tag"))?;
    let handle = arena.create_element(tag);

    if let Some(attrs) = json.get("attributes").and_then(Value::as_object) {
        for (name, value) in attrs {
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
            arena.set_attribute(handle, name, &value)?;
        }
    }

    arena.append_child(parent, handle)?;

    if let Some(children) = json.get("children").and_then(Value::as_array) {
        for child in children {
            parse_node(arena, child, handle)?;
        }
    }

    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan_document;

    #[test]
    fn test_parse_simple_document() {
        let json = serde_json::json!({
            "tag": "body",
            "children": [
                { "tag": "nav", "attributes": { "aria-label": "Site" },
                  "children": [ { "text": "Home" } ] },
                { "tag": "main" }
            ]
        });

        let arena = load_document(&json).unwrap();
        // document, body, nav, text, main
        assert_eq!(arena.len(), 5);

        let index = scan_document(&arena).unwrap();
        assert_eq!(index.count(), 2);
        assert_eq!(index.region_at(0).unwrap().label, "Site");
    }

    #[test]
    fn test_top_level_array() {
        let arena = load_document_str(r#"[{"tag":"header"},{"tag":"footer"}]"#).unwrap();
        assert_eq!(arena.children(arena.root()).unwrap().len(), 2);
    }

    #[test]
    fn test_non_string_attributes() {
        let arena = load_document(&serde_json::json!({
            "tag": "div",
            "attributes": { "hidden": null, "tabindex": -1 }
        }))
        .unwrap();
        let div = arena.find_by_tag("div")[0];
        let node = arena.get(div).unwrap();
        assert_eq!(node.attr("hidden"), Some(""));
        assert_eq!(node.attr("tabindex"), Some("-1"));
    }

    #[test]
    fn test_missing_tag() {
        let result = load_document(&serde_json::json!({ "attributes": {} }));
        assert!(matches!(result, Err(DomError::MissingField("tag"))));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            load_document_str("{not json"),
            Err(DomError::ParseError(_))
        ));
    }
}
