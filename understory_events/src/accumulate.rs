// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Target accumulation: from a platform event target to an ordered list of dispatch targets.
//!
//! ## Overview
//!
//! A native event reports the platform element it originated from. This module
//! maps it back into the virtual tree and collects every node on the way to the
//! root that has handlers matching a predicate.
//!
//! ## Two chains
//!
//! Component-like wrappers own no platform node, so the platform ancestor chain
//! and the virtual ancestor chain are not isomorphic. The accumulator walks the
//! platform chain from the mounted container down to the origin and, for each
//! platform level, searches the children of the previously matched virtual
//! element for the element owning that level. Wrappers are transparent to the
//! search; when a match is found beneath a wrapper, the wrapper's handlers are
//! collected right after the element's.
//!
//! ## Ordering
//!
//! The result is innermost-first: the element at the origin, then the wrappers
//! around it from inner to outer, then the next enclosing element, and so on up
//! to the node nearest the root container.
//!
//! ## Unmatched levels
//!
//! If a platform level has no owning virtual element (for example nodes
//! inserted by third-party code), deeper levels contribute nothing. Levels
//! already matched above it are kept, so the event still reaches managed
//! ancestors.

use alloc::vec::Vec;

use smallvec::SmallVec;
use understory_vtree::{PlatformTree, RootRegistry, VNodeId, VNodeKind, VTree};

use crate::target::DispatchTarget;

/// Collect dispatch targets for an event that originated at `origin`.
///
/// `predicate` selects the handlers taking part, usually
/// [`EventHandler::handles`](crate::handler::EventHandler::handles).
/// Returns an empty list when `origin` is not inside a mounted root or when no
/// handler matches.
pub fn accumulate_dispatch_targets<'a, D, H, T, F>(
    roots: &RootRegistry<D>,
    platform: &T,
    tree: &'a VTree<D, H>,
    origin: &D,
    predicate: F,
) -> Vec<DispatchTarget<'a, H>>
where
    D: Clone + PartialEq,
    T: PlatformTree<D>,
    F: FnMut(&H) -> bool,
{
    let mut out = Vec::new();
    accumulate_dispatch_targets_into(&mut out, roots, platform, tree, origin, predicate);
    out
}

/// Like [`accumulate_dispatch_targets`], but appends to `result`.
///
/// Useful for reusing an allocation across events.
pub fn accumulate_dispatch_targets_into<'a, D, H, T, F>(
    result: &mut Vec<DispatchTarget<'a, H>>,
    roots: &RootRegistry<D>,
    platform: &T,
    tree: &'a VTree<D, H>,
    origin: &D,
    mut predicate: F,
) where
    D: Clone + PartialEq,
    T: PlatformTree<D>,
    F: FnMut(&H) -> bool,
{
    let Some(root) = roots.find_for(origin, platform) else {
        tracing::debug!("event origin is outside of every mounted root");
        return;
    };
    let Some(current) = root.current else {
        return;
    };
    if root.container == *origin {
        return;
    }

    let path = platform_path(platform, &root.container, origin);
    tracing::trace!(depth = path.len(), "accumulating dispatch targets");

    // Targets are found outer level first; `starts` records where each level begins.
    let mut found: Vec<DispatchTarget<'a, H>> = Vec::new();
    let mut starts: Vec<usize> = Vec::with_capacity(path.len());
    let mut matched: Option<VNodeId> = None;
    for (depth, element) in path.iter().enumerate() {
        starts.push(found.len());
        let next = match matched {
            None if depth == 0 => visit_down(tree, element, current, &mut predicate, &mut found),
            Some(parent) if tree.is_container(parent) => tree
                .children(parent)
                .find_map(|child| visit_down(tree, element, child, &mut predicate, &mut found)),
            _ => None,
        };
        if next.is_none() {
            tracing::debug!(depth, "platform node has no matching virtual element");
            break;
        }
        matched = next;
    }

    for &start in starts.iter().rev() {
        result.extend(found.split_off(start));
    }
    tracing::trace!(targets = result.len(), "accumulated dispatch targets");
}

/// Platform nodes from the container's child down to `origin`, inclusive.
///
/// Caller guarantees `container` strictly contains `origin`.
fn platform_path<D, T>(platform: &T, container: &D, origin: &D) -> Vec<D>
where
    D: Clone + PartialEq,
    T: PlatformTree<D>,
{
    let mut out = Vec::new();
    let mut cur = origin.clone();
    loop {
        let parent = platform.parent_of(&cur);
        out.push(cur);
        match parent {
            Some(p) if p == *container => break,
            Some(p) => cur = p,
            None => break,
        }
    }
    out.reverse();
    out
}

/// Find the element owning `element` at or beneath `vnode`, looking through wrappers.
///
/// On success the element's handlers are collected, then those of each wrapper
/// on the way back out.
fn visit_down<'a, D, H, F>(
    tree: &'a VTree<D, H>,
    element: &D,
    vnode: VNodeId,
    predicate: &mut F,
    out: &mut Vec<DispatchTarget<'a, H>>,
) -> Option<VNodeId>
where
    D: PartialEq,
    F: FnMut(&H) -> bool,
{
    match tree.kind(vnode)? {
        VNodeKind::Element(d) if d == element => {
            collect_handlers(tree, vnode, predicate, out);
            Some(vnode)
        }
        VNodeKind::Component(_) => {
            let child = tree.first_child(vnode)?;
            let found = visit_down(tree, element, child, predicate, out)?;
            collect_handlers(tree, vnode, predicate, out);
            Some(found)
        }
        VNodeKind::Element(_) | VNodeKind::Text(_) => None,
    }
}

fn collect_handlers<'a, D, H, F>(
    tree: &'a VTree<D, H>,
    node: VNodeId,
    predicate: &mut F,
    out: &mut Vec<DispatchTarget<'a, H>>,
) where
    F: FnMut(&H) -> bool,
{
    let handlers: SmallVec<[&'a H; 1]> = tree
        .handlers(node)
        .iter()
        .filter(|&h| predicate(h))
        .collect();
    if !handlers.is_empty() {
        out.push(DispatchTarget { node, handlers });
    }
}
