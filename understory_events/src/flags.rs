// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bit flags shared by handlers, synthetic events, and native listeners.

bitflags::bitflags! {
    /// Result of an event handler.
    ///
    /// Handlers normally return [`EventFlags::empty()`]. Any bit outside the
    /// defined set makes [`dispatch_event`](crate::dispatch::dispatch_event)
    /// fail with [`DispatchError::InvalidHandlerResult`](crate::dispatch::DispatchError::InvalidHandlerResult).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct EventFlags: u32 {
        /// Ask the native layer to prevent the platform default action.
        const PREVENT_DEFAULT  = 1 << 0;
        /// Stop the current dispatch immediately, in either phase.
        const STOP_PROPAGATION = 1 << 1;
    }
}

impl EventFlags {
    /// Returns true if every set bit is a defined flag.
    pub const fn is_valid(self) -> bool {
        Self::from_bits(self.bits()).is_some()
    }
}

bitflags::bitflags! {
    /// State carried by a [`SyntheticEvent`](crate::event::SyntheticEvent).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct SyntheticEventFlags: u32 {
        /// The native event was observed by a capture-phase listener.
        const CAPTURE_LISTENER    = 1 << 0;
        /// A handler stopped propagation during dispatch.
        const STOPPED_PROPAGATION = 1 << 1;
    }
}

bitflags::bitflags! {
    /// Per-handler options.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct EventHandlerFlags: u8 {
        /// Participates in the capture (top-down) phase instead of the bubble phase.
        const CAPTURE = 1 << 0;
    }
}

bitflags::bitflags! {
    /// Options of a native listener, see [`NativeEventDispatcher`](crate::native::NativeEventDispatcher).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct NativeEventDispatcherFlags: u8 {
        /// Listener is registered for the native capture phase.
        const CAPTURE = 1 << 0;
        /// Listener is passive; prevent-default requests are ignored.
        const PASSIVE = 1 << 1;
    }
}
