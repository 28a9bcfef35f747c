// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the virtual tree: node identifiers, node kinds, and handler lists.

use smallvec::SmallVec;

/// Identifier for a node in a [`VTree`](crate::VTree).
///
/// A small, copyable handle made of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `VNodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `VNodeId`.
///
/// Use [`VTree::is_alive`](crate::VTree::is_alive) to check liveness.
/// Stale ids never alias a different live node because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct VNodeId(pub(crate) u32, pub(crate) u32);

impl VNodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Slot index of this id.
    pub const fn slot(self) -> u32 {
        self.0
    }

    /// Generation of this id.
    pub const fn generation(self) -> u32 {
        self.1
    }
}

/// The flavor of a component-like wrapper node.
///
/// All flavors behave identically for event routing: they own no platform
/// node and wrap a single child subtree.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ComponentKind {
    /// A pure render function of its props.
    Stateless,
    /// A component instance carrying its own state.
    Stateful,
    /// A node connected to an external store through a selector.
    Connect,
    /// A node that provides context values to its subtree.
    UpdateContext,
}

/// What a virtual node is.
///
/// `D` is the platform node handle (for example a DOM node reference).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum VNodeKind<D> {
    /// An element materialized as platform node `D`. May have children.
    Element(D),
    /// A text node materialized as platform node `D`. Never has children and
    /// is never an event target.
    Text(D),
    /// A component-like wrapper. Owns no platform node and wraps at most one child.
    Component(ComponentKind),
}

impl<D> VNodeKind<D> {
    /// The platform node owned by this node, if it is an element.
    ///
    /// Text nodes are deliberately excluded: event targets are always elements.
    pub fn dom_ref(&self) -> Option<&D> {
        match self {
            Self::Element(d) => Some(d),
            Self::Text(_) | Self::Component(_) => None,
        }
    }

    /// Returns true for component-like wrappers.
    pub fn is_component(&self) -> bool {
        matches!(self, Self::Component(_))
    }
}

/// Ordered handler attachment for a node.
///
/// Always a sequence; a single handler is stored inline without allocation.
pub type Handlers<H> = SmallVec<[H; 1]>;
