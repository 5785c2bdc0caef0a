//! Arena-based page tree storage
//!
//! Nodes are stored in a single `Vec` of slots and addressed by
//! [`ElementHandle`] (slot index + generation). Removing a subtree frees its
//! slots and bumps their generation, so every handle into that subtree stops
//! resolving. Nothing is reference counted and nothing dangles.
//!
//! ## Memory Layout
//!
//! ```text
//! Arena: Vec<Slot>
//!        [gen|Node0][gen|Node1][gen|-free-][gen|Node3]...
//!         ↑ ElementHandle { slot, generation }
//! ```

use crate::error::{DomError, Result};
use crate::types::{DomNode, ElementHandle, NodeType};

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<DomNode>,
}

/// Arena allocator for page nodes
///
/// The arena always holds a document node at its root. Nodes created with
/// [`create_element`](Self::create_element) start detached and only become
/// part of the page once appended under the root.
#[derive(Debug)]
pub struct DomArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: ElementHandle,
    live: usize,

    // Highlight surface
    focused: Option<ElementHandle>,
    scrolled_to: Option<ElementHandle>,
}

impl DomArena {
    /// Create an arena holding only an empty document
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut arena = Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            root: ElementHandle {
                slot: 0,
                generation: 0,
            },
            live: 0,
            focused: None,
            scrolled_to: None,
        };
        arena.root = arena.add_node(DomNode::new(NodeType::Document, "#document"));
        arena
    }

    /// The document node
    pub fn root(&self) -> ElementHandle {
        self.root
    }

    /// Add a detached node, returns its handle
    pub fn add_node(&mut self, node: DomNode) -> ElementHandle {
        self.live += 1;
        if let Some(slot) = self.free.pop() {
            let entry = &mut self.slots[slot as usize];
            entry.node = Some(node);
            return ElementHandle {
                slot,
                generation: entry.generation,
            };
        }

        let slot = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        ElementHandle {
            slot,
            generation: 0,
        }
    }

    pub fn create_element(&mut self, tag: &str) -> ElementHandle {
        self.add_node(DomNode::element(tag))
    }

    pub fn create_text(&mut self, text: &str) -> ElementHandle {
        self.add_node(DomNode::text(text))
    }

    /// Resolve a handle, `None` once the node has been removed
    pub fn resolve(&self, handle: ElementHandle) -> Option<&DomNode> {
        self.slots
            .get(handle.slot as usize)
            .filter(|s| s.generation == handle.generation)
            .and_then(|s| s.node.as_ref())
    }

    fn resolve_mut(&mut self, handle: ElementHandle) -> Option<&mut DomNode> {
        self.slots
            .get_mut(handle.slot as usize)
            .filter(|s| s.generation == handle.generation)
            .and_then(|s| s.node.as_mut())
    }

    /// Get node by handle
    pub fn get(&self, handle: ElementHandle) -> Result<&DomNode> {
        self.resolve(handle).ok_or(DomError::StaleHandle(handle))
    }

    /// Get node by handle (mutable)
    pub fn get_mut(&mut self, handle: ElementHandle) -> Result<&mut DomNode> {
        self.resolve_mut(handle).ok_or(DomError::StaleHandle(handle))
    }

    pub fn contains(&self, handle: ElementHandle) -> bool {
        self.resolve(handle).is_some()
    }

    /// Whether the node is reachable from the document root
    pub fn is_connected(&self, handle: ElementHandle) -> bool {
        let mut current = Some(handle);
        while let Some(h) = current {
            if h == self.root {
                return true;
            }
            current = match self.resolve(h) {
                Some(node) => node.parent,
                None => return false,
            };
        }
        false
    }

    /// Number of live nodes, the document included
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn parent(&self, handle: ElementHandle) -> Result<Option<ElementHandle>> {
        Ok(self.get(handle)?.parent)
    }

    pub fn children(&self, handle: ElementHandle) -> Result<&[ElementHandle]> {
        Ok(self.get(handle)?.children.as_slice())
    }

    /// Iterate over the ancestors of a node, nearest first
    pub fn ancestors(&self, handle: ElementHandle) -> impl Iterator<Item = &DomNode> + '_ {
        let mut next = self.resolve(handle).and_then(|n| n.parent);
        std::iter::from_fn(move || {
            let node = self.resolve(next?)?;
            next = node.parent;
            Some(node)
        })
    }

    /// Append `child` as the last child of `parent`, moving it if attached
    pub fn append_child(&mut self, parent: ElementHandle, child: ElementHandle) -> Result<()> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` under `parent` before `reference`, or last if `None`
    pub fn insert_before(
        &mut self,
        parent: ElementHandle,
        child: ElementHandle,
        reference: Option<ElementHandle>,
    ) -> Result<()> {
        self.get(parent)?;
        let child_node = self.get(child)?;
        if child_node.node_type == NodeType::Document {
            return Err(DomError::InvalidNodeType {
                expected: "element or text".to_string(),
                actual: "document".to_string(),
            });
        }

        // The child may not be the parent or one of its ancestors
        let mut current = Some(parent);
        while let Some(h) = current {
            if h == child {
                return Err(DomError::HierarchyRequest { parent, child });
            }
            current = self.resolve(h).and_then(|n| n.parent);
        }

        self.detach(child)?;

        let parent_node = self.get_mut(parent)?;
        let position = reference
            .and_then(|r| parent_node.children.iter().position(|&c| c == r))
            .unwrap_or(parent_node.children.len());
        parent_node.children.insert(position, child);
        self.get_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Unlink a node from its parent without freeing it
    fn detach(&mut self, handle: ElementHandle) -> Result<()> {
        if let Some(parent) = self.get(handle)?.parent {
            if let Some(parent_node) = self.resolve_mut(parent) {
                parent_node.children.retain(|c| *c != handle);
            }
            self.get_mut(handle)?.parent = None;
        }
        Ok(())
    }

    /// Remove a node and free its whole subtree
    ///
    /// Returns the number of freed nodes. Every handle into the subtree is
    /// stale afterwards.
    pub fn remove(&mut self, handle: ElementHandle) -> Result<usize> {
        if handle == self.root {
            return Err(DomError::InvalidNodeType {
                expected: "element or text".to_string(),
                actual: "document".to_string(),
            });
        }
        self.detach(handle)?;

        let mut freed = 0;
        let mut stack = vec![handle];
        while let Some(h) = stack.pop() {
            let slot = &mut self.slots[h.slot as usize];
            if slot.generation != h.generation {
                continue;
            }
            if let Some(node) = slot.node.take() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(h.slot);
                stack.extend(node.children.iter().copied());
                freed += 1;
            }
            if self.focused == Some(h) {
                self.focused = None;
            }
            if self.scrolled_to == Some(h) {
                self.scrolled_to = None;
            }
        }

        self.live -= freed;
        Ok(freed)
    }

    pub fn set_attribute(&mut self, handle: ElementHandle, name: &str, value: &str) -> Result<()> {
        let node = self.get_mut(handle)?;
        if !node.is_element() {
            return Err(DomError::InvalidNodeType {
                expected: "element".to_string(),
                actual: node.node_name.clone(),
            });
        }
        node.attributes
            .insert(name.to_ascii_lowercase(), value.to_string());
        Ok(())
    }

    pub fn remove_attribute(&mut self, handle: ElementHandle, name: &str) -> Result<Option<String>> {
        Ok(self
            .get_mut(handle)?
            .attributes
            .remove(&name.to_ascii_lowercase()))
    }

    /// Traverse a subtree depth-first, pre-order (iterative, no recursion)
    ///
    /// `visit` receives the handle, the node and its depth below `start`.
    pub fn traverse_df<'a, F>(&'a self, start: ElementHandle, mut visit: F) -> Result<()>
    where
        F: FnMut(ElementHandle, &'a DomNode, usize) -> Result<()>,
    {
        let mut stack = vec![(start, 0usize)];

        while let Some((handle, depth)) = stack.pop() {
            let node = self.get(handle)?;
            visit(handle, node, depth)?;

            // Push children in reverse order (so they're visited left-to-right)
            for &child in node.children.iter().rev() {
                stack.push((child, depth + 1));
            }
        }

        Ok(())
    }

    /// Find the first connected element with the given `id` attribute
    pub fn find_by_id(&self, id: &str) -> Option<ElementHandle> {
        let mut found = None;
        let _ = self.traverse_df(self.root, |handle, node, _| {
            if found.is_none() && node.is_element() && node.attr("id") == Some(id) {
                found = Some(handle);
            }
            Ok(())
        });
        found
    }

    /// Find connected elements by tag name, in document order
    pub fn find_by_tag(&self, tag: &str) -> Vec<ElementHandle> {
        let mut found = Vec::new();
        let _ = self.traverse_df(self.root, |handle, node, _| {
            if node.is_tag(tag) {
                found.push(handle);
            }
            Ok(())
        });
        found
    }

    // Highlight surface

    /// Draw or erase the highlight outline on an element
    pub fn set_outline(&mut self, handle: ElementHandle, outlined: bool) -> Result<()> {
        self.get_mut(handle)?.outlined = outlined;
        Ok(())
    }

    /// Move assistive-technology focus to an element
    pub fn focus(&mut self, handle: ElementHandle) -> Result<()> {
        self.get(handle)?;
        self.focused = Some(handle);
        Ok(())
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    pub fn scroll_into_view(&mut self, handle: ElementHandle) -> Result<()> {
        self.get(handle)?;
        self.scrolled_to = Some(handle);
        Ok(())
    }

    pub fn focused(&self) -> Option<ElementHandle> {
        self.focused
    }

    pub fn scrolled_to(&self) -> Option<ElementHandle> {
        self.scrolled_to
    }

    /// Handles of every outlined element, in slot order
    pub fn outlined(&self) -> Vec<ElementHandle> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, s)| match &s.node {
                Some(node) if node.outlined => Some(ElementHandle {
                    slot: slot as u32,
                    generation: s.generation,
                }),
                _ => None,
            })
            .collect()
    }
}

impl Default for DomArena {
    fn default() -> Self {
        Self::new()
    }
}
