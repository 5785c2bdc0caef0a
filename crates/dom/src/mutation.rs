//! Change notifications delivered by the host page observer
//!
//! The host batches DOM mutations and hands them over as a [`ChangeBatch`].
//! [`is_relevant`] decides whether a batch can have changed the landmark set.
//! It errs on the side of rescanning: missing a change leaves the index wrong,
//! an extra rescan only costs time.

use serde::{Deserialize, Serialize};

use crate::types::{ElementHandle, NodeType};

/// One observed mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MutationRecord {
    /// Nodes were added to or removed from `target`
    ChildList {
        target: ElementHandle,
        added: Vec<NodeType>,
        removed: Vec<NodeType>,
    },
    /// An attribute of `target` changed; `value` is its value after the change
    Attributes {
        target: ElementHandle,
        name: String,
        value: Option<String>,
    },
}

/// A group of mutations delivered together
pub type ChangeBatch = Vec<MutationRecord>;

impl MutationRecord {
    pub fn target(&self) -> ElementHandle {
        match self {
            Self::ChildList { target, .. } | Self::Attributes { target, .. } => *target,
        }
    }

    /// Whether this single record may affect the landmark index
    pub fn is_relevant(&self) -> bool {
        match self {
            Self::ChildList { added, removed, .. } => added
                .iter()
                .chain(removed.iter())
                .any(|t| *t == NodeType::Element),
            // Any mention counts, even in another property's value
            Self::Attributes { name, value, .. } if name == "style" => value
                .as_deref()
                .is_some_and(|style| style.contains("display") || style.contains("visibility")),
            // class, role, hidden and label changes all could matter
            Self::Attributes { .. } => true,
        }
    }
}

/// Whether any record in the batch may affect the landmark index
pub fn is_relevant(batch: &[MutationRecord]) -> bool {
    batch.iter().any(MutationRecord::is_relevant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::DomArena;
    use crate::types::OBSERVED_ATTRIBUTES;

    fn target() -> ElementHandle {
        DomArena::new().root()
    }

    fn attr(name: &str, value: Option<&str>) -> MutationRecord {
        MutationRecord::Attributes {
            target: target(),
            name: name.to_string(),
            value: value.map(String::from),
        }
    }

    #[test]
    fn test_text_only_child_changes_are_ignored() {
        let record = MutationRecord::ChildList {
            target: target(),
            added: vec![NodeType::Text],
            removed: vec![NodeType::Comment],
        };
        assert!(!record.is_relevant());

        let record = MutationRecord::ChildList {
            target: target(),
            added: vec![NodeType::Text],
            removed: vec![NodeType::Element],
        };
        assert!(record.is_relevant());
    }

    #[test]
    fn test_style_changes_need_display_or_visibility() {
        assert!(!attr("style", Some("color: red")).is_relevant());
        assert!(!attr("style", None).is_relevant());
        assert!(attr("style", Some("display: block")).is_relevant());
        assert!(attr("style", Some("outline: 0; visibility: hidden")).is_relevant());
        // Not a declaration, still mentioned
        assert!(attr("style", Some("--no-display: 1")).is_relevant());
        assert!(attr("style", Some("background: url(visibility.png)")).is_relevant());
    }

    #[test]
    fn test_observed_attributes_are_relevant() {
        for name in OBSERVED_ATTRIBUTES {
            let value = if *name == "style" { "display: none" } else { "x" };
            assert!(attr(name, Some(value)).is_relevant(), "{} ignored", name);
        }
    }

    #[test]
    fn test_other_attributes_are_always_relevant() {
        assert!(attr("class", Some("x")).is_relevant());
        assert!(attr("aria-label", None).is_relevant());
        assert!(attr("role", Some("presentation")).is_relevant());
    }

    #[test]
    fn test_batch_relevance() {
        assert!(!is_relevant(&[]));
        assert!(!is_relevant(&[attr("style", Some("top: 0"))]));
        assert!(is_relevant(&[attr("style", Some("top: 0")), attr("hidden", Some(""))]));
    }
}
