// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatch engine: replays capture, then bubble, over an ordered target list.
//!
//! ## Protocol
//!
//! Targets are ordered innermost-first, as produced by
//! [`accumulate_dispatch_targets`](crate::accumulate::accumulate_dispatch_targets).
//!
//! 1. Capture (only when `two_phase` is set): targets in reverse order
//!    (outermost first); at each target, capture handlers in registration order.
//! 2. Bubble: targets in forward order (origin first); at each target,
//!    non-capture handlers in registration order.
//!
//! A handler returning [`EventFlags::STOP_PROPAGATION`] ends the whole dispatch:
//! no further capture handler and no bubble handler runs. A handler returning
//! undefined bits fails the dispatch with [`DispatchError::InvalidHandlerResult`].
//!
//! Handler panics are not caught.
//!
//! ## Custom invocation
//!
//! [`dispatch_event_with`] routes every call through a caller-supplied strategy
//! instead of calling handlers directly, for instrumentation or tests.

use understory_vtree::VNodeId;

use crate::event::SyntheticEvent;
use crate::flags::{EventFlags, SyntheticEventFlags};
use crate::handler::EventHandler;
use crate::target::DispatchTarget;

/// Errors raised by [`dispatch_event`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum DispatchError {
    /// A handler returned bits outside [`EventFlags::all()`].
    #[error("Invalid event handler result {bits:#x} returned by a handler on {node:?}")]
    InvalidHandlerResult {
        /// Raw bits returned by the handler.
        bits: u32,
        /// Node the offending handler is attached to.
        node: VNodeId,
    },
}

/// Custom invocation strategy for [`dispatch_event_with`].
pub type Invoke<'f, P> = dyn FnMut(&EventHandler<P>, &mut SyntheticEvent<P>) -> EventFlags + 'f;

/// Dispatch `event` over `targets`, calling handlers directly.
///
/// Returns the union of all flags returned by invoked handlers, so callers can
/// honor [`EventFlags::PREVENT_DEFAULT`]. An empty target list is a no-op.
pub fn dispatch_event<P>(
    targets: &[DispatchTarget<'_, EventHandler<P>>],
    event: &mut SyntheticEvent<P>,
    two_phase: bool,
) -> Result<EventFlags, DispatchError> {
    dispatch_event_with(
        targets,
        event,
        two_phase,
        &mut |h: &EventHandler<P>, ev: &mut SyntheticEvent<P>| h.call(ev),
    )
}

/// Dispatch `event` over `targets`, invoking every handler through `invoke`.
pub fn dispatch_event_with<P>(
    targets: &[DispatchTarget<'_, EventHandler<P>>],
    event: &mut SyntheticEvent<P>,
    two_phase: bool,
    invoke: &mut Invoke<'_, P>,
) -> Result<EventFlags, DispatchError> {
    let mut collected = EventFlags::empty();
    if targets.is_empty() {
        return Ok(collected);
    }

    if two_phase {
        tracing::trace!(targets = targets.len(), "capture phase");
        for target in targets.iter().rev() {
            for &handler in target.handlers.iter().filter(|h| h.is_capture()) {
                if run_handler(target.node, handler, event, invoke, &mut collected)? {
                    return Ok(collected);
                }
            }
        }
    }

    tracing::trace!(targets = targets.len(), "bubble phase");
    for target in targets {
        for &handler in target.handlers.iter().filter(|h| !h.is_capture()) {
            if run_handler(target.node, handler, event, invoke, &mut collected)? {
                return Ok(collected);
            }
        }
    }
    Ok(collected)
}

/// Invoke one handler and validate its result. Returns true when propagation stops.
fn run_handler<P>(
    node: VNodeId,
    handler: &EventHandler<P>,
    event: &mut SyntheticEvent<P>,
    invoke: &mut Invoke<'_, P>,
    collected: &mut EventFlags,
) -> Result<bool, DispatchError> {
    let result = invoke(handler, event);
    if !result.is_valid() {
        tracing::error!(
            bits = result.bits(),
            event_type = ?handler.event_type(),
            "invalid event handler result"
        );
        return Err(DispatchError::InvalidHandlerResult {
            bits: result.bits(),
            node,
        });
    }
    *collected |= result;
    if result.contains(EventFlags::STOP_PROPAGATION) {
        tracing::debug!(event_type = ?handler.event_type(), "propagation stopped");
        event.flags.insert(SyntheticEventFlags::STOPPED_PROPAGATION);
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{EventType, on, on_capture};
    use alloc::rc::Rc;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::{Cell, RefCell};
    use understory_vtree::{VNodeKind, VTree};

    type Log = Rc<RefCell<Vec<u32>>>;

    fn ids(n: u32) -> Vec<VNodeId> {
        let mut tree: VTree<u32, ()> = VTree::new();
        (0..n)
            .map(|i| tree.insert(None, VNodeKind::Element(i)).unwrap())
            .collect()
    }

    fn click_event() -> SyntheticEvent<()> {
        SyntheticEvent::new(SyntheticEventFlags::empty(), 0, None, ())
    }

    fn recorder(log: &Log, tag: u32, capture: bool, ret: EventFlags) -> EventHandler<()> {
        let log = log.clone();
        let f = move |_: &mut SyntheticEvent<()>| {
            log.borrow_mut().push(tag);
            ret
        };
        if capture {
            on_capture(EventType::Click, f)
        } else {
            on(EventType::Click, f)
        }
    }

    #[test]
    fn empty_targets_are_a_no_op() {
        let mut ev = click_event();
        assert_eq!(dispatch_event::<()>(&[], &mut ev, true), Ok(EventFlags::empty()));

        let invoked = Cell::new(false);
        let mut invoke = |h: &EventHandler<()>, e: &mut SyntheticEvent<()>| {
            invoked.set(true);
            h.call(e)
        };
        assert!(dispatch_event_with(&[], &mut ev, true, &mut invoke).is_ok());
        assert!(!invoked.get());
        assert!(!ev.is_propagation_stopped());
    }

    #[test]
    fn single_handler_runs_once() {
        let log = Log::default();
        let h = recorder(&log, 1, false, EventFlags::empty());
        let n = ids(1);
        let targets = [DispatchTarget::single(n[0], &h)];
        dispatch_event(&targets, &mut click_event(), true).unwrap();
        assert_eq!(*log.borrow(), vec![1]);
    }

    #[test]
    fn same_handler_twice_runs_twice() {
        let log = Log::default();
        let h = recorder(&log, 1, false, EventFlags::empty());
        let n = ids(1);
        let targets = [DispatchTarget::from_handlers(n[0], [&h, &h])];
        dispatch_event(&targets, &mut click_event(), true).unwrap();
        assert_eq!(*log.borrow(), vec![1, 1]);
    }

    #[test]
    fn same_handler_on_two_targets_runs_twice() {
        let log = Log::default();
        let h = recorder(&log, 1, false, EventFlags::empty());
        let n = ids(2);
        let targets = [
            DispatchTarget::single(n[0], &h),
            DispatchTarget::single(n[1], &h),
        ];
        dispatch_event(&targets, &mut click_event(), true).unwrap();
        assert_eq!(*log.borrow(), vec![1, 1]);
    }

    #[test]
    fn adjacent_handlers_run_left_to_right() {
        let log = Log::default();
        let h1 = recorder(&log, 1, false, EventFlags::empty());
        let h2 = recorder(&log, 2, false, EventFlags::empty());
        let n = ids(1);
        let targets = [DispatchTarget::from_handlers(n[0], [&h1, &h2])];
        dispatch_event(&targets, &mut click_event(), true).unwrap();
        assert_eq!(*log.borrow(), vec![1, 2]);
    }

    #[test]
    fn bubble_runs_forward() {
        let log = Log::default();
        let h1 = recorder(&log, 1, false, EventFlags::empty());
        let h2 = recorder(&log, 2, false, EventFlags::empty());
        let n = ids(2);
        let targets = [
            DispatchTarget::single(n[0], &h1),
            DispatchTarget::single(n[1], &h2),
        ];
        dispatch_event(&targets, &mut click_event(), true).unwrap();
        assert_eq!(*log.borrow(), vec![1, 2]);
    }

    #[test]
    fn capture_runs_in_reverse() {
        let log = Log::default();
        let h1 = recorder(&log, 1, true, EventFlags::empty());
        let h2 = recorder(&log, 2, true, EventFlags::empty());
        let n = ids(2);
        let targets = [
            DispatchTarget::single(n[0], &h1),
            DispatchTarget::single(n[1], &h2),
        ];
        dispatch_event(&targets, &mut click_event(), true).unwrap();
        assert_eq!(*log.borrow(), vec![2, 1]);
    }

    #[test]
    fn capture_precedes_bubble() {
        let log = Log::default();
        let h1 = recorder(&log, 1, false, EventFlags::empty());
        let h2 = recorder(&log, 2, true, EventFlags::empty());
        let n = ids(2);
        let targets = [
            DispatchTarget::single(n[0], &h1),
            DispatchTarget::single(n[1], &h2),
        ];
        dispatch_event(&targets, &mut click_event(), true).unwrap();
        assert_eq!(*log.borrow(), vec![2, 1]);
    }

    // Mixed phases on one target keep registration order within each phase.
    #[test]
    fn mixed_handlers_on_one_target() {
        let log = Log::default();
        let b1 = recorder(&log, 1, false, EventFlags::empty());
        let c2 = recorder(&log, 2, true, EventFlags::empty());
        let b3 = recorder(&log, 3, false, EventFlags::empty());
        let c4 = recorder(&log, 4, true, EventFlags::empty());
        let n = ids(1);
        let targets = [DispatchTarget::from_handlers(n[0], [&b1, &c2, &b3, &c4])];
        dispatch_event(&targets, &mut click_event(), true).unwrap();
        assert_eq!(*log.borrow(), vec![2, 4, 1, 3]);
    }

    #[test]
    fn stop_in_bubble_skips_outer_targets() {
        let log = Log::default();
        let h1 = recorder(&log, 1, false, EventFlags::STOP_PROPAGATION);
        let h2 = recorder(&log, 2, false, EventFlags::empty());
        let n = ids(2);
        let targets = [
            DispatchTarget::single(n[0], &h1),
            DispatchTarget::single(n[1], &h2),
        ];
        let mut ev = click_event();
        let flags = dispatch_event(&targets, &mut ev, true).unwrap();
        assert_eq!(*log.borrow(), vec![1]);
        assert!(ev.is_propagation_stopped());
        assert_eq!(flags, EventFlags::STOP_PROPAGATION);
    }

    #[test]
    fn stop_in_capture_skips_remaining_capture() {
        let log = Log::default();
        let h1 = recorder(&log, 1, true, EventFlags::empty());
        let h2 = recorder(&log, 2, true, EventFlags::STOP_PROPAGATION);
        let n = ids(2);
        let targets = [
            DispatchTarget::single(n[0], &h1),
            DispatchTarget::single(n[1], &h2),
        ];
        dispatch_event(&targets, &mut click_event(), true).unwrap();
        assert_eq!(*log.borrow(), vec![2]);
    }

    #[test]
    fn stop_in_capture_skips_bubble() {
        let log = Log::default();
        let h1 = recorder(&log, 1, false, EventFlags::empty());
        let h2 = recorder(&log, 2, true, EventFlags::STOP_PROPAGATION);
        let n = ids(2);
        let targets = [
            DispatchTarget::single(n[0], &h1),
            DispatchTarget::single(n[1], &h2),
        ];
        let mut ev = click_event();
        dispatch_event(&targets, &mut ev, true).unwrap();
        assert_eq!(*log.borrow(), vec![2]);
        assert!(ev.is_propagation_stopped());
    }

    // Stop also skips the handlers that follow on the same target.
    #[test]
    fn stop_skips_later_handlers_on_same_target() {
        let log = Log::default();
        let h1 = recorder(&log, 1, false, EventFlags::STOP_PROPAGATION);
        let h2 = recorder(&log, 2, false, EventFlags::empty());
        let n = ids(1);
        let targets = [DispatchTarget::from_handlers(n[0], [&h1, &h2])];
        dispatch_event(&targets, &mut click_event(), true).unwrap();
        assert_eq!(*log.borrow(), vec![1]);
    }

    #[test]
    fn invalid_result_is_an_error() {
        let log = Log::default();
        let h1 = recorder(&log, 1, false, EventFlags::from_bits_retain(10));
        let h2 = recorder(&log, 2, false, EventFlags::empty());
        let n = ids(2);
        let targets = [
            DispatchTarget::single(n[0], &h1),
            DispatchTarget::single(n[1], &h2),
        ];
        let err = dispatch_event(&targets, &mut click_event(), true).unwrap_err();
        assert_eq!(
            err,
            DispatchError::InvalidHandlerResult {
                bits: 10,
                node: n[0]
            }
        );
        assert!(err.to_string().starts_with("Invalid"));
        assert_eq!(*log.borrow(), vec![1]);
    }

    #[test]
    fn prevent_default_is_reported_and_propagation_continues() {
        let log = Log::default();
        let h1 = recorder(&log, 1, false, EventFlags::PREVENT_DEFAULT);
        let h2 = recorder(&log, 2, false, EventFlags::empty());
        let n = ids(2);
        let targets = [
            DispatchTarget::single(n[0], &h1),
            DispatchTarget::single(n[1], &h2),
        ];
        let mut ev = click_event();
        let flags = dispatch_event(&targets, &mut ev, true).unwrap();
        assert_eq!(flags, EventFlags::PREVENT_DEFAULT);
        assert_eq!(*log.borrow(), vec![1, 2]);
        assert!(!ev.is_propagation_stopped());
    }

    #[test]
    fn bubble_only_skips_capture_handlers() {
        let log = Log::default();
        let h1 = recorder(&log, 1, false, EventFlags::empty());
        let h2 = recorder(&log, 2, true, EventFlags::empty());
        let n = ids(2);
        let targets = [
            DispatchTarget::single(n[0], &h1),
            DispatchTarget::single(n[1], &h2),
        ];
        dispatch_event(&targets, &mut click_event(), false).unwrap();
        assert_eq!(*log.borrow(), vec![1]);
    }

    #[test]
    fn custom_invoke_sees_every_call_in_order() {
        let log = Log::default();
        let h1 = recorder(&log, 1, false, EventFlags::empty());
        let h2 = recorder(&log, 2, true, EventFlags::empty());
        let n = ids(2);
        let targets = [
            DispatchTarget::single(n[0], &h1),
            DispatchTarget::single(n[1], &h2),
        ];
        let mut seen: Vec<bool> = Vec::new();
        let mut invoke = |h: &EventHandler<()>, e: &mut SyntheticEvent<()>| {
            seen.push(h.is_capture());
            h.call(e)
        };
        dispatch_event_with(&targets, &mut click_event(), true, &mut invoke).unwrap();
        assert_eq!(seen, vec![true, false]);
        assert_eq!(*log.borrow(), vec![2, 1]);
    }

    // The strategy's return value is what gets validated, not the handler's.
    #[test]
    fn custom_invoke_result_controls_propagation() {
        let log = Log::default();
        let h1 = recorder(&log, 1, false, EventFlags::empty());
        let h2 = recorder(&log, 2, false, EventFlags::empty());
        let n = ids(2);
        let targets = [
            DispatchTarget::single(n[0], &h1),
            DispatchTarget::single(n[1], &h2),
        ];
        let mut invoke = |h: &EventHandler<()>, e: &mut SyntheticEvent<()>| {
            h.call(e) | EventFlags::STOP_PROPAGATION
        };
        dispatch_event_with(&targets, &mut click_event(), true, &mut invoke).unwrap();
        assert_eq!(*log.borrow(), vec![1]);
    }

    #[test]
    fn handlers_can_read_the_event() {
        let seen = Rc::new(Cell::new(0_u64));
        let h = {
            let seen = seen.clone();
            on(EventType::Click, move |ev: &mut SyntheticEvent<u64>| {
                seen.set(ev.timestamp + ev.payload);
                EventFlags::empty()
            })
        };
        let n = ids(1);
        let targets = [DispatchTarget::single(n[0], &h)];
        let mut ev = SyntheticEvent::new(SyntheticEventFlags::empty(), 40, None, 2_u64);
        dispatch_event(&targets, &mut ev, true).unwrap();
        assert_eq!(seen.get(), 42);
    }
}
