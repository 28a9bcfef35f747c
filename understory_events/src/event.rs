// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The synthetic event envelope handed to every handler.

use understory_vtree::VNodeId;

use crate::flags::SyntheticEventFlags;

/// A synthetic event.
///
/// Created per dispatch and never shared across dispatches. During
/// [`dispatch_event`](crate::dispatch::dispatch_event) the only field the
/// engine writes is [`SyntheticEventFlags::STOPPED_PROPAGATION`].
#[derive(Clone, Debug, PartialEq)]
pub struct SyntheticEvent<P> {
    /// Event state flags.
    pub flags: SyntheticEventFlags,
    /// Timestamp of the native event, in the platform's clock units.
    pub timestamp: u64,
    /// Associated virtual node, if any.
    pub node: Option<VNodeId>,
    /// Platform payload (pointer position, key code, ...).
    pub payload: P,
}

impl<P> SyntheticEvent<P> {
    /// Create an event.
    pub fn new(
        flags: SyntheticEventFlags,
        timestamp: u64,
        node: Option<VNodeId>,
        payload: P,
    ) -> Self {
        Self {
            flags,
            timestamp,
            node,
            payload,
        }
    }

    /// Returns true once a handler stopped propagation.
    pub fn is_propagation_stopped(&self) -> bool {
        self.flags.contains(SyntheticEventFlags::STOPPED_PROPAGATION)
    }

    /// Returns true if the native event came through a capture-phase listener.
    pub fn is_from_capture_listener(&self) -> bool {
        self.flags.contains(SyntheticEventFlags::CAPTURE_LISTENER)
    }
}
