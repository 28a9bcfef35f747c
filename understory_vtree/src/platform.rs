// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The platform side of the tree: the ancestor chain of real nodes.
//!
//! ## Overview
//!
//! Event targets arrive as platform nodes (for example DOM elements). Routing
//! only needs to walk their ancestor chain, which [`PlatformTree`] exposes.
//! [`SimpleDom`] is a headless implementation for tests, demos, and benches.

use alloc::vec::Vec;

/// Read access to the ancestor chain of platform nodes.
pub trait PlatformTree<D> {
    /// Returns the parent of `node`, or `None` if it is detached or the document root.
    fn parent_of(&self, node: &D) -> Option<D>;

    /// Returns true if `node` is `container` or one of its descendants.
    ///
    /// Matches the inclusive semantics of DOM `Node.contains`.
    fn contains(&self, container: &D, node: &D) -> bool
    where
        D: PartialEq,
    {
        if container == node {
            return true;
        }
        let mut cur = self.parent_of(node);
        while let Some(p) = cur {
            if &p == container {
                return true;
            }
            cur = self.parent_of(&p);
        }
        false
    }
}

/// Handle of a node in a [`SimpleDom`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct DomNodeId(pub u32);

/// A minimal headless platform tree that only records parent links.
#[derive(Clone, Debug, Default)]
pub struct SimpleDom {
    parents: Vec<Option<DomNodeId>>,
}

impl SimpleDom {
    /// Create an empty platform tree.
    pub fn new() -> Self {
        Self {
            parents: Vec::new(),
        }
    }

    /// Create a node under `parent` (or a detached node if `None`).
    pub fn create(&mut self, parent: Option<DomNodeId>) -> DomNodeId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "DomNodeId uses 32-bit indices by design."
        )]
        let id = DomNodeId(self.parents.len() as u32);
        self.parents.push(parent);
        id
    }

    /// Detach a node from its parent. Its own descendants stay attached to it.
    pub fn detach(&mut self, node: DomNodeId) {
        if let Some(p) = self.parents.get_mut(node.0 as usize) {
            *p = None;
        }
    }

    /// Number of nodes ever created.
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Returns true if no node was created yet.
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

impl PlatformTree<DomNodeId> for SimpleDom {
    fn parent_of(&self, node: &DomNodeId) -> Option<DomNodeId> {
        self.parents.get(node.0 as usize).copied().flatten()
    }
}
