//! Region Scanner - builds the ordered landmark index
//!
//! This handles:
//! - Pre-order traversal from a root node (iterative)
//! - Role resolution (explicit `role` attribute, else implicit HTML role)
//! - Skipping unrendered subtrees
//! - Accessible-name resolution for labels
//! - Landmark nesting depth

use ahash::AHashMap;

use crate::arena::DomArena;
use crate::error::Result;
use crate::landmark::{LandmarkIndex, LandmarkRegion, LandmarkRole};
use crate::types::{DomNode, ElementHandle};
use crate::utils;

/// Elements that scope `header` and `footer` out of the banner and
/// contentinfo roles
const SECTIONING_TAGS: &[&str] = &["article", "aside", "main", "nav", "section"];

/// Role resolved from the `role` attribute
enum ExplicitRole {
    Absent,
    Landmark(LandmarkRole),
    Other,
}

fn explicit_role(node: &DomNode) -> ExplicitRole {
    match node.attr("role").and_then(|r| r.split_whitespace().next()) {
        None => ExplicitRole::Absent,
        Some(token) => match LandmarkRole::parse(token) {
            Some(role) => ExplicitRole::Landmark(role),
            None => ExplicitRole::Other,
        },
    }
}

/// Implicit role of an HTML element, before any label requirement
fn implicit_role(node: &DomNode, in_sectioning: bool) -> Option<LandmarkRole> {
    match node.tag_name()? {
        "main" => Some(LandmarkRole::Main),
        "nav" => Some(LandmarkRole::Navigation),
        "aside" => Some(LandmarkRole::Complementary),
        "header" if !in_sectioning => Some(LandmarkRole::Banner),
        "footer" if !in_sectioning => Some(LandmarkRole::ContentInfo),
        "section" => Some(LandmarkRole::Region),
        "form" => Some(LandmarkRole::Form),
        _ => None,
    }
}

/// Accessible name: `aria-label`, else the text of the elements named by
/// `aria-labelledby`, else empty
fn accessible_name(
    arena: &DomArena,
    node: &DomNode,
    ids: &AHashMap<&str, ElementHandle>,
) -> Result<String> {
    if let Some(label) = node.attr("aria-label") {
        let label = utils::collapse_whitespace(label);
        if !label.is_empty() {
            return Ok(label);
        }
    }

    if let Some(refs) = node.attr("aria-labelledby") {
        let mut parts = Vec::new();
        for id in refs.split_whitespace() {
            if let Some(&target) = ids.get(id) {
                let text = utils::get_text_content(arena, target)?;
                if !text.is_empty() {
                    parts.push(text);
                }
            }
        }
        return Ok(parts.join(" "));
    }

    Ok(String::new())
}

/// Map of `id` attribute to the first connected element carrying it
fn collect_ids(arena: &DomArena) -> Result<AHashMap<&str, ElementHandle>> {
    let mut ids = AHashMap::new();
    arena.traverse_df(arena.root(), |handle, node, _| {
        if let Some(id) = node.attr("id") {
            ids.entry(id).or_insert(handle);
        }
        Ok(())
    })?;
    Ok(ids)
}

/// Whether an ancestor keeps `header`/`footer` below it from being
/// banner/contentinfo
fn scopes_header_footer(node: &DomNode) -> bool {
    SECTIONING_TAGS.iter().any(|t| node.is_tag(t))
        || matches!(
            explicit_role(node),
            ExplicitRole::Landmark(
                LandmarkRole::Main
                    | LandmarkRole::Navigation
                    | LandmarkRole::Complementary
                    | LandmarkRole::Region
            )
        )
}

/// Scan the subtree under `root` for landmark regions
///
/// A `root` below an unrendered ancestor yields an empty index. Depths are
/// counted from `root`. Fails only if `root` itself is stale.
pub fn scan(arena: &DomArena, root: ElementHandle) -> Result<LandmarkIndex> {
    arena.get(root)?;
    if !utils::is_rendered(arena, root) {
        tracing::debug!("[Scanner] Scan root {} is not rendered", root);
        return Ok(LandmarkIndex::new());
    }
    let ids = collect_ids(arena)?;

    let mut regions = Vec::new();
    let root_in_sectioning = arena.ancestors(root).any(scopes_header_footer);
    // (node, landmark depth, inside a sectioning element)
    let mut stack = vec![(root, 0usize, root_in_sectioning)];

    while let Some((handle, depth, in_sectioning)) = stack.pop() {
        let node = arena.get(handle)?;
        if !node.is_element() && !node.children.is_empty() {
            // Document or fragment: descend without classifying
            for &child in node.children.iter().rev() {
                stack.push((child, depth, in_sectioning));
            }
            continue;
        }
        if !node.is_element() {
            continue;
        }

        if !utils::is_element_visible_by_css(node) {
            continue;
        }

        let candidate = match explicit_role(node) {
            ExplicitRole::Landmark(role) => Some(role),
            ExplicitRole::Other => None,
            ExplicitRole::Absent => implicit_role(node, in_sectioning),
        };

        let mut is_landmark = false;
        let mut scopes = SECTIONING_TAGS.iter().any(|t| node.is_tag(t));

        if let Some(role) = candidate {
            let label = accessible_name(arena, node, &ids)?;
            if !role.requires_label() || !label.is_empty() {
                tracing::trace!("[Scanner] {} at depth {}: {:?}", role, depth, label);
                regions.push(LandmarkRegion {
                    element: handle,
                    role,
                    label,
                    depth,
                    document_order_index: regions.len(),
                });
                is_landmark = true;
                scopes |= matches!(
                    role,
                    LandmarkRole::Main
                        | LandmarkRole::Navigation
                        | LandmarkRole::Complementary
                        | LandmarkRole::Region
                );
            }
        }

        let child_depth = depth + usize::from(is_landmark);
        for &child in node.children.iter().rev() {
            stack.push((child, child_depth, in_sectioning || scopes));
        }
    }

    tracing::debug!("[Scanner] Found {} landmarks", regions.len());
    Ok(LandmarkIndex::from_regions(regions))
}

/// Scan the whole document
pub fn scan_document(arena: &DomArena) -> Result<LandmarkIndex> {
    scan(arena, arena.root())
}
