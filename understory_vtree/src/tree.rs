// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, updates, and read access.

use alloc::vec::Vec;

use crate::types::{Handlers, VNodeId, VNodeKind};

/// Errors reported by structural tree updates.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum TreeError {
    /// The node id no longer refers to a live node.
    #[error("virtual node {0:?} is not alive")]
    StaleNode(VNodeId),
    /// A component-like node already wraps a child.
    #[error("component node {0:?} already wraps a child")]
    ComponentHasChild(VNodeId),
    /// Text nodes cannot have children.
    #[error("text node {0:?} cannot have children")]
    TextHasNoChildren(VNodeId),
}

/// Arena of virtual nodes.
///
/// `D` is the platform node handle owned by elements and text nodes, `H` is the
/// handler type attached to nodes.
///
/// Children are a linked sequence (`first_child` / `next_sibling`), appended in
/// insertion order. Ownership is strictly top-down: removing a node removes its
/// whole subtree.
pub struct VTree<D, H> {
    nodes: Vec<Option<Node<D, H>>>, // slots
    generations: Vec<u32>,          // last generation per slot (persists across frees)
    free_list: Vec<usize>,
}

impl<D, H> Default for VTree<D, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, H> core::fmt::Debug for VTree<D, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("VTree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

struct Node<D, H> {
    generation: u32,
    kind: VNodeKind<D>,
    parent: Option<VNodeId>,
    first_child: Option<VNodeId>,
    last_child: Option<VNodeId>,
    next_sibling: Option<VNodeId>,
    handlers: Handlers<H>,
}

impl<D, H> Node<D, H> {
    fn new(generation: u32, kind: VNodeKind<D>) -> Self {
        Self {
            generation,
            kind,
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
            handlers: Handlers::new(),
        }
    }
}

impl<D, H> VTree<D, H> {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Insert a new node as the last child of `parent` (or as a detached root if `None`).
    ///
    /// Fails if `parent` is stale, is a text node, or is a component that already wraps a child.
    pub fn insert(
        &mut self,
        parent: Option<VNodeId>,
        kind: VNodeKind<D>,
    ) -> Result<VNodeId, TreeError> {
        if let Some(p) = parent {
            let pn = self.get(p).ok_or(TreeError::StaleNode(p))?;
            match pn.kind {
                VNodeKind::Text(_) => return Err(TreeError::TextHasNoChildren(p)),
                VNodeKind::Component(_) if pn.first_child.is_some() => {
                    return Err(TreeError::ComponentHasChild(p));
                }
                _ => {}
            }
        }

        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, kind));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "VNodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, kind)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "VNodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = VNodeId::new(idx, generation);
        if let Some(p) = parent {
            self.link_last_child(p, id);
        }
        Ok(id)
    }

    /// Remove a node and its whole subtree.
    ///
    /// Stale ids are ignored.
    pub fn remove(&mut self, id: VNodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_child(parent, id);
        }
        let mut stack = alloc::vec![id];
        while let Some(cur) = stack.pop() {
            let mut child = self.node(cur).first_child;
            while let Some(c) = child {
                child = self.node(c).next_sibling;
                stack.push(c);
            }
            self.nodes[cur.idx()] = None;
            self.free_list.push(cur.idx());
        }
    }

    /// Returns true if `id` refers to a live node.
    pub fn is_alive(&self, id: VNodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// Returns true if the tree holds no live nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Kind of a node, or `None` if `id` is stale.
    pub fn kind(&self, id: VNodeId) -> Option<&VNodeKind<D>> {
        self.get(id).map(|n| &n.kind)
    }

    /// Platform node owned by an element, or `None` for other kinds and stale ids.
    pub fn dom_ref(&self, id: VNodeId) -> Option<&D> {
        self.get(id).and_then(|n| n.kind.dom_ref())
    }

    /// Parent of a node, if attached.
    pub fn parent(&self, id: VNodeId) -> Option<VNodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// First child of a node.
    pub fn first_child(&self, id: VNodeId) -> Option<VNodeId> {
        self.get(id).and_then(|n| n.first_child)
    }

    /// Next sibling of a node.
    pub fn next_sibling(&self, id: VNodeId) -> Option<VNodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Iterate the children of a node in order.
    pub fn children(&self, id: VNodeId) -> Children<'_, D, H> {
        Children {
            tree: self,
            next: self.first_child(id),
        }
    }

    /// Returns true if the node can lead to further platform-level matches:
    /// an element with children, or any component-like wrapper.
    pub fn is_container(&self, id: VNodeId) -> bool {
        match self.get(id) {
            Some(n) => match n.kind {
                VNodeKind::Element(_) => n.first_child.is_some(),
                VNodeKind::Component(_) => true,
                VNodeKind::Text(_) => false,
            },
            None => false,
        }
    }

    /// Handlers attached to a node in registration order. Empty for stale ids.
    pub fn handlers(&self, id: VNodeId) -> &[H] {
        self.get(id).map(|n| n.handlers.as_slice()).unwrap_or(&[])
    }

    /// Replace the handlers attached to a node.
    pub fn set_handlers(&mut self, id: VNodeId, handlers: Handlers<H>) -> Result<(), TreeError> {
        self.get_mut(id).ok_or(TreeError::StaleNode(id))?.handlers = handlers;
        Ok(())
    }

    /// Append a handler to a node's handler list.
    pub fn push_handler(&mut self, id: VNodeId, handler: H) -> Result<(), TreeError> {
        self.get_mut(id)
            .ok_or(TreeError::StaleNode(id))?
            .handlers
            .push(handler);
        Ok(())
    }

    /// Remove all handlers from a node.
    pub fn clear_handlers(&mut self, id: VNodeId) -> Result<(), TreeError> {
        self.get_mut(id)
            .ok_or(TreeError::StaleNode(id))?
            .handlers
            .clear();
        Ok(())
    }

    // --- internals ---

    fn get(&self, id: VNodeId) -> Option<&Node<D, H>> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn get_mut(&mut self, id: VNodeId) -> Option<&mut Node<D, H>> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        (n.generation == id.1).then_some(n)
    }

    /// Access a live node; panics if `id` is stale.
    fn node(&self, id: VNodeId) -> &Node<D, H> {
        self.nodes[id.idx()].as_ref().expect("dangling VNodeId")
    }

    fn node_mut(&mut self, id: VNodeId) -> &mut Node<D, H> {
        self.nodes[id.idx()].as_mut().expect("dangling VNodeId")
    }

    fn link_last_child(&mut self, parent: VNodeId, id: VNodeId) {
        match self.node(parent).last_child {
            Some(last) => self.node_mut(last).next_sibling = Some(id),
            None => self.node_mut(parent).first_child = Some(id),
        }
        self.node_mut(parent).last_child = Some(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_child(&mut self, parent: VNodeId, id: VNodeId) {
        let next = self.node(id).next_sibling;
        let mut prev = None;
        let mut cur = self.node(parent).first_child;
        while let Some(c) = cur {
            if c == id {
                break;
            }
            prev = Some(c);
            cur = self.node(c).next_sibling;
        }
        match prev {
            Some(p) => self.node_mut(p).next_sibling = next,
            None => self.node_mut(parent).first_child = next,
        }
        if self.node(parent).last_child == Some(id) {
            self.node_mut(parent).last_child = prev;
        }
        let n = self.node_mut(id);
        n.parent = None;
        n.next_sibling = None;
    }
}

/// Iterator over the children of a node, produced by [`VTree::children`].
pub struct Children<'a, D, H> {
    tree: &'a VTree<D, H>,
    next: Option<VNodeId>,
}

impl<D, H> core::fmt::Debug for Children<'_, D, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Children")
            .field("next", &self.next)
            .finish_non_exhaustive()
    }
}

impl<D, H> Iterator for Children<'_, D, H> {
    type Item = VNodeId;

    fn next(&mut self) -> Option<VNodeId> {
        let cur = self.next?;
        self.next = self.tree.next_sibling(cur);
        Some(cur)
    }
}
