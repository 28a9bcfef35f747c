// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_events --heading-base-level=0

//! Understory Events: deterministic, `no_std` synthetic event propagation over a virtual tree.
//!
//! ## Overview
//!
//! A native event reports the platform element it came from. This crate maps
//! that element back into an [`understory_vtree::VTree`], collects the nodes
//! whose handlers match the event, and replays capture, then bubble, over them.
//!
//! It does not install native listeners and does not build or diff the tree.
//!
//! ## Pipeline
//!
//! 1) Accumulate: [`accumulate_dispatch_targets`](crate::accumulate::accumulate_dispatch_targets)
//!    finds the mounted root containing the origin, walks the platform ancestor chain,
//!    and matches each level against the virtual tree. Component-like wrappers own no
//!    platform node; they are transparent to matching and contribute their handlers
//!    right after the element they wrap. The result is innermost-first.
//! 2) Dispatch: [`dispatch_event`](crate::dispatch::dispatch_event) runs capture
//!    handlers from the outermost target inward, then bubble handlers from the origin
//!    outward. A handler returning [`EventFlags::STOP_PROPAGATION`](crate::flags::EventFlags::STOP_PROPAGATION)
//!    ends the dispatch; undefined result bits are an error.
//! 3) Glue: [`NativeEventDispatcher`](crate::native::NativeEventDispatcher) does both
//!    for one event type and reports whether the native default should be prevented.
//!
//! ## Handlers
//!
//! [`EventHandler`](crate::handler::EventHandler) values are attached to any node,
//! element or wrapper, in registration order. They are `Rc` callbacks: dispatch is
//! single-threaded and synchronous, and a handler runs to completion before the next.
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use understory_events::accumulate::accumulate_dispatch_targets;
//! use understory_events::dispatch::dispatch_event;
//! use understory_events::event::SyntheticEvent;
//! use understory_events::flags::{EventFlags, SyntheticEventFlags};
//! use understory_events::handler::{EventHandler, EventType, on, on_capture};
//! use understory_vtree::{ComponentKind, RootRegistry, SimpleDom, VNodeKind, VTree};
//!
//! let mut dom = SimpleDom::new();
//! let container = dom.create(None);
//! let list = dom.create(Some(container));
//! let item = dom.create(Some(list));
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let record = |tag: &'static str| {
//!     let log = log.clone();
//!     move |_: &mut SyntheticEvent<()>| {
//!         log.borrow_mut().push(tag);
//!         EventFlags::empty()
//!     }
//! };
//!
//! let mut tree: VTree<_, EventHandler<()>> = VTree::new();
//! let ul = tree.insert(None, VNodeKind::Element(list)).unwrap();
//! let row = tree.insert(Some(ul), VNodeKind::Component(ComponentKind::Stateful)).unwrap();
//! let li = tree.insert(Some(row), VNodeKind::Element(item)).unwrap();
//! tree.push_handler(ul, on_capture(EventType::Click, record("ul capture"))).unwrap();
//! tree.push_handler(ul, on(EventType::Click, record("ul"))).unwrap();
//! tree.push_handler(row, on(EventType::Click, record("row"))).unwrap();
//! tree.push_handler(li, on(EventType::Click, record("li"))).unwrap();
//!
//! let mut roots = RootRegistry::new();
//! roots.mount(container, Some(ul));
//!
//! let targets = accumulate_dispatch_targets(&roots, &dom, &tree, &item, |h| {
//!     h.handles(EventType::Click)
//! });
//! let mut event = SyntheticEvent::new(SyntheticEventFlags::empty(), 0, None, ());
//! dispatch_event(&targets, &mut event, true).unwrap();
//!
//! assert_eq!(*log.borrow(), ["ul capture", "li", "row", "ul"]);
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events: `trace` for accumulation and phase
//! boundaries, `debug` for unmatched origins and stopped propagation, and
//! `error` for invalid handler results. Install any subscriber to see them.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod accumulate;
pub mod dispatch;
pub mod event;
pub mod flags;
pub mod handler;
pub mod native;
pub mod pointer_map;
pub mod target;
