// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatch targets: a node paired with its handlers that match the current event.

use smallvec::SmallVec;
use understory_vtree::VNodeId;

/// A node and the handlers on it that matched the dispatch predicate.
///
/// Produced by [`accumulate_dispatch_targets`](crate::accumulate::accumulate_dispatch_targets)
/// and consumed by [`dispatch_event`](crate::dispatch::dispatch_event).
/// Handlers keep registration order. Lists are created per dispatch and
/// borrow from the tree; they are not meant to be retained.
pub struct DispatchTarget<'a, H> {
    /// Node the handlers are attached to.
    pub node: VNodeId,
    /// Matching handlers in registration order. Never empty when produced by the accumulator.
    pub handlers: SmallVec<[&'a H; 1]>,
}

impl<'a, H> DispatchTarget<'a, H> {
    /// Create a target with a single handler.
    pub fn single(node: VNodeId, handler: &'a H) -> Self {
        let mut handlers = SmallVec::new();
        handlers.push(handler);
        Self { node, handlers }
    }

    /// Create a target from handlers in order.
    pub fn from_handlers(node: VNodeId, handlers: impl IntoIterator<Item = &'a H>) -> Self {
        Self {
            node,
            handlers: handlers.into_iter().collect(),
        }
    }
}

impl<H> Clone for DispatchTarget<'_, H> {
    fn clone(&self) -> Self {
        Self {
            node: self.node,
            handlers: self.handlers.clone(),
        }
    }
}

impl<H: core::fmt::Debug> core::fmt::Debug for DispatchTarget<'_, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DispatchTarget")
            .field("node", &self.node)
            .field("handlers", &self.handlers)
            .finish()
    }
}
