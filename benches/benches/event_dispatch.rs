// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_events::accumulate::{accumulate_dispatch_targets, accumulate_dispatch_targets_into};
use understory_events::dispatch::dispatch_event;
use understory_events::event::SyntheticEvent;
use understory_events::flags::{EventFlags, SyntheticEventFlags};
use understory_events::handler::{EventHandler, EventType, on, on_capture};
use understory_vtree::{ComponentKind, DomNodeId, RootRegistry, SimpleDom, VNodeKind, VTree};

struct Scene {
    dom: SimpleDom,
    tree: VTree<DomNodeId, EventHandler<()>>,
    roots: RootRegistry<DomNodeId>,
    origin: DomNodeId,
}

fn noop(_: &mut SyntheticEvent<()>) -> EventFlags {
    EventFlags::empty()
}

/// One element per level, each wrapped by a stateful component.
/// Every element and wrapper listens for clicks; every fourth element also captures.
fn deep_scene(depth: usize) -> Scene {
    let mut dom = SimpleDom::new();
    let container = dom.create(None);
    let mut tree = VTree::new();
    let mut roots = RootRegistry::new();

    let mut dom_parent = container;
    let mut v_parent = None;
    let mut origin = container;
    for i in 0..depth {
        let el = dom.create(Some(dom_parent));
        let wrapper = tree
            .insert(v_parent, VNodeKind::Component(ComponentKind::Stateful))
            .unwrap();
        let node = tree.insert(Some(wrapper), VNodeKind::Element(el)).unwrap();
        tree.push_handler(wrapper, on(EventType::Click, noop)).unwrap();
        tree.push_handler(node, on(EventType::Click, noop)).unwrap();
        tree.push_handler(node, on(EventType::KeyDown, noop)).unwrap();
        if i % 4 == 0 {
            tree.push_handler(node, on_capture(EventType::Click, noop))
                .unwrap();
        }
        if v_parent.is_none() {
            roots.mount(container, Some(wrapper));
        }
        dom_parent = el;
        v_parent = Some(node);
        origin = el;
    }
    Scene {
        dom,
        tree,
        roots,
        origin,
    }
}

/// A list element with `width` item elements; the origin is the last item.
fn wide_scene(width: usize) -> Scene {
    let mut dom = SimpleDom::new();
    let container = dom.create(None);
    let list = dom.create(Some(container));
    let mut tree = VTree::new();
    let ul = tree.insert(None, VNodeKind::Element(list)).unwrap();
    tree.push_handler(ul, on(EventType::Click, noop)).unwrap();
    let mut origin = list;
    for _ in 0..width {
        let item = dom.create(Some(list));
        let li = tree.insert(Some(ul), VNodeKind::Element(item)).unwrap();
        tree.push_handler(li, on(EventType::Click, noop)).unwrap();
        origin = item;
    }
    let mut roots = RootRegistry::new();
    roots.mount(container, Some(ul));
    Scene {
        dom,
        tree,
        roots,
        origin,
    }
}

fn bench_accumulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("accumulate");
    for &depth in &[8usize, 32, 128] {
        let s = deep_scene(depth);
        group.throughput(Throughput::Elements(depth as u64));
        group.bench_function(format!("deep_d{}", depth), |b| {
            b.iter(|| {
                let targets = accumulate_dispatch_targets(
                    &s.roots,
                    &s.dom,
                    &s.tree,
                    black_box(&s.origin),
                    |h| h.handles(EventType::Click),
                );
                black_box(targets.len());
            });
        });
    }
    for &width in &[16usize, 256] {
        let s = wide_scene(width);
        group.bench_function(format!("wide_w{}", width), |b| {
            b.iter(|| {
                let targets = accumulate_dispatch_targets(
                    &s.roots,
                    &s.dom,
                    &s.tree,
                    black_box(&s.origin),
                    |h| h.handles(EventType::Click),
                );
                black_box(targets.len());
            });
        });
    }
    let s = deep_scene(32);
    group.bench_function("deep_d32_reused_buffer", |b| {
        let mut out = Vec::new();
        b.iter(|| {
            out.clear();
            accumulate_dispatch_targets_into(
                &mut out,
                &s.roots,
                &s.dom,
                &s.tree,
                black_box(&s.origin),
                |h| h.handles(EventType::Click),
            );
            black_box(out.len());
        });
    });
    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    for &depth in &[8usize, 32, 128] {
        let s = deep_scene(depth);
        let targets = accumulate_dispatch_targets(&s.roots, &s.dom, &s.tree, &s.origin, |h| {
            h.handles(EventType::Click)
        });
        group.throughput(Throughput::Elements(targets.len() as u64));
        group.bench_function(format!("two_phase_d{}", depth), |b| {
            b.iter_batched(
                || SyntheticEvent::new(SyntheticEventFlags::empty(), 0, None, ()),
                |mut ev| {
                    let flags = dispatch_event(&targets, &mut ev, true).unwrap();
                    black_box(flags);
                },
                BatchSize::SmallInput,
            );
        });
        group.bench_function(format!("bubble_only_d{}", depth), |b| {
            b.iter_batched(
                || SyntheticEvent::new(SyntheticEventFlags::empty(), 0, None, ()),
                |mut ev| {
                    let flags = dispatch_event(&targets, &mut ev, false).unwrap();
                    black_box(flags);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_accumulate, bench_dispatch);
criterion_main!(benches);
