// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Native listener glue: one dispatcher per native event type.
//!
//! A platform listener (installed by toolkit plumbing outside this crate) calls
//! [`NativeEventDispatcher::handle`] with the element the native event
//! originated from. The dispatcher accumulates targets whose handlers listen
//! for its [`EventType`], wraps the payload in a [`SyntheticEvent`], and runs
//! [`dispatch_event`].
//!
//! ```
//! use understory_events::flags::{EventFlags, NativeEventDispatcherFlags};
//! use understory_events::handler::{EventHandler, EventType, on};
//! use understory_events::event::SyntheticEvent;
//! use understory_events::native::NativeEventDispatcher;
//! use understory_vtree::{RootRegistry, SimpleDom, VNodeKind, VTree};
//!
//! let mut dom = SimpleDom::new();
//! let container = dom.create(None);
//! let button = dom.create(Some(container));
//!
//! let mut tree: VTree<_, EventHandler<()>> = VTree::new();
//! let b = tree.insert(None, VNodeKind::Element(button)).unwrap();
//! tree.push_handler(b, on(EventType::Click, |_: &mut SyntheticEvent<()>| EventFlags::PREVENT_DEFAULT)).unwrap();
//!
//! let mut roots = RootRegistry::new();
//! roots.mount(container, Some(b));
//!
//! let clicks = NativeEventDispatcher::new(EventType::Click, NativeEventDispatcherFlags::empty());
//! let report = clicks.handle(&roots, &dom, &tree, &button, 0, ()).unwrap();
//! assert_eq!(report.targets, 1);
//! assert!(report.prevent_default);
//! ```

use understory_vtree::{PlatformTree, RootRegistry, VTree};

use crate::accumulate::accumulate_dispatch_targets;
use crate::dispatch::{DispatchError, dispatch_event};
use crate::event::SyntheticEvent;
use crate::flags::{EventFlags, NativeEventDispatcherFlags, SyntheticEventFlags};
use crate::handler::{EventHandler, EventType};

/// Runtime dispatch options.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Run the capture phase before the bubble phase. When false, capture
    /// handlers are not invoked at all.
    pub two_phase: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self { two_phase: true }
    }
}

/// Outcome of [`NativeEventDispatcher::handle`].
#[derive(Clone, Debug, PartialEq)]
pub struct NativeDispatchReport<P> {
    /// The synthetic event after dispatch.
    pub event: SyntheticEvent<P>,
    /// Number of dispatch targets that were found.
    pub targets: usize,
    /// A handler stopped propagation.
    pub stopped_propagation: bool,
    /// A handler asked to prevent the native default action. Always false for passive listeners.
    pub prevent_default: bool,
}

/// Routes one native event type into the virtual tree.
#[derive(Clone, Debug)]
pub struct NativeEventDispatcher {
    event_type: EventType,
    flags: NativeEventDispatcherFlags,
    config: DispatchConfig,
}

impl NativeEventDispatcher {
    /// Create a dispatcher with the default [`DispatchConfig`].
    pub fn new(event_type: EventType, flags: NativeEventDispatcherFlags) -> Self {
        Self {
            event_type,
            flags,
            config: DispatchConfig::default(),
        }
    }

    /// Event type routed by this dispatcher.
    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    /// Listener flags.
    pub fn flags(&self) -> NativeEventDispatcherFlags {
        self.flags
    }

    /// Current dispatch options.
    pub fn config(&self) -> DispatchConfig {
        self.config
    }

    /// Replace the dispatch options.
    pub fn set_config(&mut self, config: DispatchConfig) {
        self.config = config;
    }

    /// Handle a native event that originated at `origin`.
    ///
    /// The synthetic event's `node` is the innermost node with a matching handler.
    pub fn handle<D, T, P>(
        &self,
        roots: &RootRegistry<D>,
        platform: &T,
        tree: &VTree<D, EventHandler<P>>,
        origin: &D,
        timestamp: u64,
        payload: P,
    ) -> Result<NativeDispatchReport<P>, DispatchError>
    where
        D: Clone + PartialEq,
        T: PlatformTree<D>,
    {
        let event_type = self.event_type;
        let targets = accumulate_dispatch_targets(roots, platform, tree, origin, |h| {
            h.handles(event_type)
        });

        let mut flags = SyntheticEventFlags::empty();
        if self.flags.contains(NativeEventDispatcherFlags::CAPTURE) {
            flags |= SyntheticEventFlags::CAPTURE_LISTENER;
        }
        let node = targets.first().map(|t| t.node);
        let mut event = SyntheticEvent::new(flags, timestamp, node, payload);

        let result = dispatch_event(&targets, &mut event, self.config.two_phase)?;
        let prevent_default = result.contains(EventFlags::PREVENT_DEFAULT)
            && !self.flags.contains(NativeEventDispatcherFlags::PASSIVE);
        Ok(NativeDispatchReport {
            stopped_propagation: event.is_propagation_stopped(),
            event,
            targets: targets.len(),
            prevent_default,
        })
    }
}
