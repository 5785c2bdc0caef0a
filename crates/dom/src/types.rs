//! Core node types for the page tree
//!
//! Key design principles:
//! 1. Nodes live in a slot arena and are addressed by `ElementHandle`
//! 2. A handle carries the slot generation, so a freed slot never aliases
//! 3. Use SmallVec for child lists (most nodes have a handful of children)

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;

/// Non-owning reference to a node in a [`DomArena`](crate::DomArena).
///
/// Resolving a handle is always fallible: once the node is removed from the
/// tree its slot is freed and the generation bumped, so the handle resolves
/// to nothing instead of to whatever reuses the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementHandle {
    pub(crate) slot: u32,
    pub(crate) generation: u32,
}

impl ElementHandle {
    pub fn slot(&self) -> u32 {
        self.slot
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.slot, self.generation)
    }
}

/// Node type, numbered as in the DOM standard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NodeType {
    Element = 1,
    Text = 3,
    Comment = 8,
    Document = 9,
}

impl NodeType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(NodeType::Element),
            3 => Some(NodeType::Text),
            8 => Some(NodeType::Comment),
            9 => Some(NodeType::Document),
            _ => None,
        }
    }
}

/// A single tree node
///
/// Tag names are stored lowercase. Text and comment nodes keep their content
/// in `node_value`.
#[derive(Debug, Clone)]
pub struct DomNode {
    pub node_type: NodeType,
    pub node_name: String,
    pub node_value: String,
    pub attributes: HashMap<String, String>,

    // Navigation
    pub parent: Option<ElementHandle>,
    pub children: SmallVec<[ElementHandle; 4]>,

    // Highlight state written by the focus overlay
    pub outlined: bool,
}

impl DomNode {
    pub fn new(node_type: NodeType, node_name: impl Into<String>) -> Self {
        Self {
            node_type,
            node_name: node_name.into().to_ascii_lowercase(),
            node_value: String::new(),
            attributes: HashMap::new(),
            parent: None,
            children: SmallVec::new(),
            outlined: false,
        }
    }

    pub fn element(tag: impl Into<String>) -> Self {
        Self::new(NodeType::Element, tag)
    }

    pub fn text(value: impl Into<String>) -> Self {
        let mut node = Self::new(NodeType::Text, "#text");
        node.node_value = value.into();
        node
    }

    /// Get tag name for element nodes
    pub fn tag_name(&self) -> Option<&str> {
        if self.node_type == NodeType::Element {
            Some(self.node_name.as_str())
        } else {
            None
        }
    }

    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Check if this is an element with the given tag
    pub fn is_tag(&self, tag: &str) -> bool {
        self.is_element() && self.node_name.eq_ignore_ascii_case(tag)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }
}

/// Attributes whose changes can alter which landmarks exist or how they are
/// labelled. A host observer should watch exactly these.
pub const OBSERVED_ATTRIBUTES: &[&str] = &[
    "class",
    "style",
    "hidden",
    "role",
    "aria-labelledby",
    "aria-label",
];
