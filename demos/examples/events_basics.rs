// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event routing basics.
//!
//! Builds a small list whose rows are component wrappers, clicks a row, and
//! prints the capture → bubble order. A second click stops propagation at the row.
//!
//! Run:
//! - `cargo run -p understory_demos --example events_basics`
//! - `RUST_LOG=understory_events=trace cargo run -p understory_demos --example events_basics`

use std::cell::RefCell;
use std::rc::Rc;

use understory_events::accumulate::accumulate_dispatch_targets;
use understory_events::dispatch::dispatch_event;
use understory_events::event::SyntheticEvent;
use understory_events::flags::{EventFlags, SyntheticEventFlags};
use understory_events::handler::{EventHandler, EventType, on, on_capture};
use understory_vtree::{ComponentKind, DomNodeId, RootRegistry, SimpleDom, VNodeKind, VTree};

type Log = Rc<RefCell<Vec<String>>>;

fn record(
    log: Log,
    tag: String,
    result: Rc<RefCell<EventFlags>>,
) -> impl Fn(&mut SyntheticEvent<()>) -> EventFlags + 'static {
    move |_| {
        log.borrow_mut().push(tag.clone());
        *result.borrow()
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut dom = SimpleDom::new();
    let container = dom.create(None);
    let list = dom.create(Some(container));
    let rows: Vec<_> = (0..3).map(|_| dom.create(Some(list))).collect();

    let log = Log::default();
    let row_result = Rc::new(RefCell::new(EventFlags::empty()));
    let continue_ = Rc::new(RefCell::new(EventFlags::empty()));

    let mut tree: VTree<_, EventHandler<()>> = VTree::new();
    let ul = tree.insert(None, VNodeKind::Element(list)).unwrap();
    let ul_capture = record(log.clone(), "ul (capture)".into(), continue_.clone());
    tree.push_handler(ul, on_capture(EventType::Click, ul_capture))
        .unwrap();
    let ul_bubble = record(log.clone(), "ul".into(), continue_.clone());
    tree.push_handler(ul, on(EventType::Click, ul_bubble))
        .unwrap();
    for (i, &row) in rows.iter().enumerate() {
        let c = tree
            .insert(Some(ul), VNodeKind::Component(ComponentKind::Stateful))
            .unwrap();
        let li = tree.insert(Some(c), VNodeKind::Element(row)).unwrap();
        let on_row = record(log.clone(), format!("Row#{i}"), row_result.clone());
        let on_li = record(log.clone(), format!("li#{i}"), continue_.clone());
        tree.push_handler(c, on(EventType::Click, on_row)).unwrap();
        tree.push_handler(li, on(EventType::Click, on_li)).unwrap();
    }

    let mut roots = RootRegistry::new();
    roots.mount(container, Some(ul));

    let click = |origin: DomNodeId| {
        log.borrow_mut().clear();
        let targets = accumulate_dispatch_targets(&roots, &dom, &tree, &origin, |h| {
            h.handles(EventType::Click)
        });
        let mut event = SyntheticEvent::new(SyntheticEventFlags::empty(), 0, None, ());
        let flags = dispatch_event(&targets, &mut event, true).unwrap();
        println!("  targets={} result={flags:?}", targets.len());
        println!("  order: {}", log.borrow().join(" → "));
    };

    println!("== Click row 1 ==");
    click(rows[1]);

    println!("== Click row 2, row component stops propagation ==");
    *row_result.borrow_mut() = EventFlags::STOP_PROPAGATION;
    click(rows[2]);
}
