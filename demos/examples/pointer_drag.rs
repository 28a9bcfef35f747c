// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer drag tracking.
//!
//! One native dispatcher per pointer event type routes into a draggable
//! element. Handlers keep per-pointer start positions in a `PointerMap` so two
//! pointers can drag at once.
//!
//! Run:
//! - `cargo run -p understory_demos --example pointer_drag`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Vec2};
use understory_events::event::SyntheticEvent;
use understory_events::flags::{EventFlags, NativeEventDispatcherFlags};
use understory_events::handler::{EventHandler, EventType, on};
use understory_events::native::NativeEventDispatcher;
use understory_events::pointer_map::{PointerId, PointerMap};
use understory_vtree::{ComponentKind, RootRegistry, SimpleDom, VNodeKind, VTree};

#[derive(Clone, Copy, Debug)]
struct Pointer {
    id: PointerId,
    position: Point,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut dom = SimpleDom::new();
    let container = dom.create(None);
    let canvas = dom.create(Some(container));
    let handle = dom.create(Some(canvas));

    let starts: Rc<RefCell<PointerMap<Point>>> = Rc::default();

    let mut tree: VTree<_, EventHandler<Pointer>> = VTree::new();
    let c = tree.insert(None, VNodeKind::Element(canvas)).unwrap();
    let draggable = tree
        .insert(Some(c), VNodeKind::Component(ComponentKind::Stateful))
        .unwrap();
    let _h = tree.insert(Some(draggable), VNodeKind::Element(handle)).unwrap();

    let down = {
        let starts = starts.clone();
        on(EventType::PointerDown, move |ev: &mut SyntheticEvent<Pointer>| {
            starts.borrow_mut().set(ev.payload.id, ev.payload.position);
            println!("  pointer {} down at {:?}", ev.payload.id, ev.payload.position);
            EventFlags::STOP_PROPAGATION | EventFlags::PREVENT_DEFAULT
        })
    };
    let moved = {
        let starts = starts.clone();
        on(EventType::PointerMove, move |ev: &mut SyntheticEvent<Pointer>| {
            if let Some(start) = starts.borrow().get(ev.payload.id) {
                let delta: Vec2 = ev.payload.position - *start;
                println!("  pointer {} dragged by {:?}", ev.payload.id, delta);
            }
            EventFlags::empty()
        })
    };
    let up = {
        let starts = starts.clone();
        on(EventType::PointerUp, move |ev: &mut SyntheticEvent<Pointer>| {
            starts.borrow_mut().remove(ev.payload.id);
            println!("  pointer {} released", ev.payload.id);
            EventFlags::empty()
        })
    };
    tree.push_handler(draggable, down).unwrap();
    tree.push_handler(draggable, moved).unwrap();
    tree.push_handler(draggable, up).unwrap();
    // The canvas would start a marquee selection; the draggable stops it.
    tree.push_handler(
        c,
        on(EventType::PointerDown, |_: &mut SyntheticEvent<Pointer>| {
            println!("  canvas: marquee start");
            EventFlags::empty()
        }),
    )
    .unwrap();

    let mut roots = RootRegistry::new();
    roots.mount(container, Some(c));

    let flags = NativeEventDispatcherFlags::empty();
    let pointer_down = NativeEventDispatcher::new(EventType::PointerDown, flags);
    let pointer_move = NativeEventDispatcher::new(EventType::PointerMove, flags);
    let pointer_up = NativeEventDispatcher::new(EventType::PointerUp, flags);

    let script = [
        (&pointer_down, handle, 1, Point::new(10.0, 10.0)),
        (&pointer_down, handle, 2, Point::new(50.0, 50.0)),
        (&pointer_move, handle, 1, Point::new(14.0, 13.0)),
        (&pointer_move, handle, 2, Point::new(40.0, 60.0)),
        (&pointer_up, handle, 1, Point::new(14.0, 13.0)),
        (&pointer_down, canvas, 3, Point::new(0.0, 0.0)),
    ];
    for (t, (dispatcher, origin, id, position)) in script.into_iter().enumerate() {
        println!("== {:?} ==", dispatcher.event_type());
        let report = dispatcher
            .handle(&roots, &dom, &tree, &origin, t as u64, Pointer { id, position })
            .unwrap();
        println!(
            "  targets={} stopped={} prevent_default={}",
            report.targets, report.stopped_propagation, report.prevent_default
        );
    }
    println!("active pointers: {}", starts.borrow().len());
}
