// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry of mounted roots.

use alloc::vec::Vec;

use crate::platform::PlatformTree;
use crate::types::VNodeId;

/// A mounted root: a platform container and the virtual node rendered into it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Root<D> {
    /// Platform container element.
    pub container: D,
    /// Current top-level virtual node, if anything is rendered.
    pub current: Option<VNodeId>,
}

/// Ordered collection of mounted roots.
///
/// Containers are assumed not to overlap. Lookups scan in mount order and the
/// first match wins.
#[derive(Clone, Debug)]
pub struct RootRegistry<D> {
    roots: Vec<Root<D>>,
}

impl<D> Default for RootRegistry<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> RootRegistry<D> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { roots: Vec::new() }
    }

    /// Number of mounted roots.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Returns true if nothing is mounted.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Iterate roots in mount order.
    pub fn iter(&self) -> impl Iterator<Item = &Root<D>> + '_ {
        self.roots.iter()
    }
}

impl<D: PartialEq> RootRegistry<D> {
    /// Mount `current` into `container`.
    ///
    /// If the container is already registered, its current node is replaced.
    pub fn mount(&mut self, container: D, current: Option<VNodeId>) {
        match self.roots.iter_mut().find(|r| r.container == container) {
            Some(r) => r.current = current,
            None => self.roots.push(Root { container, current }),
        }
    }

    /// Replace the current node of a registered container.
    ///
    /// Returns false if the container is not registered.
    pub fn update(&mut self, container: &D, current: Option<VNodeId>) -> bool {
        match self.roots.iter_mut().find(|r| &r.container == container) {
            Some(r) => {
                r.current = current;
                true
            }
            None => false,
        }
    }

    /// Remove a container, returning the node that was mounted in it.
    pub fn unmount(&mut self, container: &D) -> Option<VNodeId> {
        let i = self.roots.iter().position(|r| &r.container == container)?;
        self.roots.remove(i).current
    }

    /// The root registered for exactly this container.
    pub fn get(&self, container: &D) -> Option<&Root<D>> {
        self.roots.iter().find(|r| &r.container == container)
    }

    /// The first root whose container contains `node` (inclusively).
    pub fn find_for(&self, node: &D, platform: &impl PlatformTree<D>) -> Option<&Root<D>> {
        self.roots
            .iter()
            .find(|r| platform.contains(&r.container, node))
    }
}
