// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event handlers and event type tags.
//!
//! ## Overview
//!
//! An [`EventHandler`] pairs an [`EventType`] with a capture/bubble intent and a
//! callback. Handlers are attached to nodes of a
//! [`VTree`](understory_vtree::VTree) (elements or component wrappers) and are
//! selected for a dispatch by a predicate, normally [`EventHandler::handles`].
//!
//! ```
//! use understory_events::flags::EventFlags;
//! use understory_events::handler::{EventType, on, on_capture};
//!
//! let click = on(EventType::Click, |_ev: &mut understory_events::event::SyntheticEvent<()>| {
//!     EventFlags::empty()
//! });
//! let guard = on_capture(EventType::Click, |_ev: &mut understory_events::event::SyntheticEvent<()>| {
//!     EventFlags::STOP_PROPAGATION
//! });
//! assert!(!click.is_capture());
//! assert!(guard.is_capture());
//! assert!(guard.handles(EventType::Click));
//! ```

use alloc::rc::Rc;

use crate::event::SyntheticEvent;
use crate::flags::{EventFlags, EventHandlerFlags};

/// Event type discriminator.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EventType {
    /// Primary button click.
    Click,
    /// Double click.
    DoubleClick,
    /// Pointer pressed.
    PointerDown,
    /// Pointer moved.
    PointerMove,
    /// Pointer released.
    PointerUp,
    /// Pointer interaction cancelled by the platform.
    PointerCancel,
    /// Key pressed.
    KeyDown,
    /// Key released.
    KeyUp,
    /// Text input.
    Input,
    /// Focus gained.
    Focus,
    /// Focus lost.
    Blur,
    /// Wheel or trackpad scroll.
    Wheel,
    /// Toolkit-defined event type.
    Custom(u32),
}

/// Callback signature of an [`EventHandler`].
pub type HandlerFn<P> = dyn Fn(&mut SyntheticEvent<P>) -> EventFlags;

/// A handler attached to a virtual node.
///
/// Cloning is cheap and shares the callback, so the same handler can be
/// attached in several places. Use [`EventHandler::ptr_eq`] to compare identity.
pub struct EventHandler<P> {
    event_type: EventType,
    flags: EventHandlerFlags,
    callback: Rc<HandlerFn<P>>,
}

impl<P> Clone for EventHandler<P> {
    fn clone(&self) -> Self {
        Self {
            event_type: self.event_type,
            flags: self.flags,
            callback: Rc::clone(&self.callback),
        }
    }
}

impl<P> core::fmt::Debug for EventHandler<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventHandler")
            .field("event_type", &self.event_type)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

impl<P> EventHandler<P> {
    /// Create a handler with explicit flags.
    pub fn with_flags(
        event_type: EventType,
        flags: EventHandlerFlags,
        callback: impl Fn(&mut SyntheticEvent<P>) -> EventFlags + 'static,
    ) -> Self {
        Self {
            event_type,
            flags,
            callback: Rc::new(callback),
        }
    }

    /// Create a bubble-phase handler.
    pub fn new(
        event_type: EventType,
        callback: impl Fn(&mut SyntheticEvent<P>) -> EventFlags + 'static,
    ) -> Self {
        Self::with_flags(event_type, EventHandlerFlags::empty(), callback)
    }

    /// Create a capture-phase handler.
    pub fn capture(
        event_type: EventType,
        callback: impl Fn(&mut SyntheticEvent<P>) -> EventFlags + 'static,
    ) -> Self {
        Self::with_flags(event_type, EventHandlerFlags::CAPTURE, callback)
    }

    /// The event type this handler listens for.
    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    /// Handler flags.
    pub fn flags(&self) -> EventHandlerFlags {
        self.flags
    }

    /// Returns true if the handler runs in the capture phase.
    pub fn is_capture(&self) -> bool {
        self.flags.contains(EventHandlerFlags::CAPTURE)
    }

    /// Returns true if the handler listens for `event_type`.
    pub fn handles(&self, event_type: EventType) -> bool {
        self.event_type == event_type
    }

    /// Invoke the callback directly.
    pub fn call(&self, event: &mut SyntheticEvent<P>) -> EventFlags {
        (self.callback)(event)
    }

    /// Returns true if both handlers share the same callback allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.callback, &other.callback)
    }
}

/// Shorthand for [`EventHandler::new`].
pub fn on<P>(
    event_type: EventType,
    callback: impl Fn(&mut SyntheticEvent<P>) -> EventFlags + 'static,
) -> EventHandler<P> {
    EventHandler::new(event_type, callback)
}

/// Shorthand for [`EventHandler::capture`].
pub fn on_capture<P>(
    event_type: EventType,
    callback: impl Fn(&mut SyntheticEvent<P>) -> EventFlags + 'static,
) -> EventHandler<P> {
    EventHandler::capture(event_type, callback)
}
