// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_vtree --heading-base-level=0

//! Understory VTree: an arena-backed virtual node tree and root registry.
//!
//! This crate holds the structures that event routing reads: the virtual
//! tree a renderer produced, the containers it is mounted into, and the
//! ancestor chain of the platform nodes it materialized.
//!
//! ## Where this fits
//!
//! - A renderer (reconciler) builds and updates the [`VTree`] and the [`RootRegistry`].
//! - The platform (for example a DOM) exposes parent links through [`PlatformTree`].
//! - `understory_events` reads all three to route an event to handlers.
//!
//! This crate does not diff, schedule, or render.
//!
//! ## API overview
//!
//! - [`VTree`]: arena of nodes with `first_child` / `next_sibling` links and attached handlers.
//! - [`VNodeKind`]: `Element`, `Text`, or a component-like wrapper ([`ComponentKind`]).
//! - [`VNodeId`]: generational handle of a node.
//! - [`RootRegistry`]: ordered list of mounted [`Root`]s.
//! - [`PlatformTree`] and the headless [`SimpleDom`].
//!
//! ### Minimal usage
//!
//! ```
//! use understory_vtree::{ComponentKind, PlatformTree, RootRegistry, SimpleDom, VNodeKind, VTree};
//!
//! let mut dom = SimpleDom::new();
//! let container = dom.create(None);
//! let div = dom.create(Some(container));
//!
//! let mut tree: VTree<_, &str> = VTree::new();
//! let c = tree.insert(None, VNodeKind::Component(ComponentKind::Stateful)).unwrap();
//! let e = tree.insert(Some(c), VNodeKind::Element(div)).unwrap();
//! tree.push_handler(c, "on-click").unwrap();
//!
//! let mut roots = RootRegistry::new();
//! roots.mount(container, Some(c));
//!
//! let root = roots.find_for(&div, &dom).unwrap();
//! assert_eq!(root.current, Some(c));
//! assert_eq!(tree.dom_ref(e), Some(&div));
//! assert!(dom.contains(&container, &div));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod platform;
mod root;
mod tree;
mod types;

pub use platform::{DomNodeId, PlatformTree, SimpleDom};
pub use root::{Root, RootRegistry};
pub use tree::{Children, TreeError, VTree};
pub use types::{ComponentKind, Handlers, VNodeId, VNodeKind};
