// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use trellis_touch::arbiter::PointerArbiter;
use trellis_touch::dispatch::{GestureListener, TouchDispatcher};
use trellis_touch::event::{
    PointerAction, PointerEvent, PointerId, PointerSlot, RawSample, SampleAction,
};
use trellis_touch::handler::{PointerDispatcher, PointerHandler, SharedHandler};
use trellis_touch::registry::DispatcherRegistry;

const MOVES: usize = 64;

struct Noop;

impl GestureListener for Noop {
    fn handle(&mut self, _sample: &RawSample) {}
}

struct LateClaimer {
    handled: Rc<Cell<usize>>,
}

impl GestureListener for LateClaimer {
    fn is_late_claim(&mut self, sample: &RawSample) -> bool {
        sample.action() == SampleAction::Down
    }
    fn handle(&mut self, _sample: &RawSample) {
        self.handled.set(self.handled.get() + 1);
    }
}

struct RegionDispatcher {
    want: PointerId,
    handler: SharedHandler,
}

impl PointerDispatcher for RegionDispatcher {
    fn is_prepare_to_intercept(&mut self, event: &PointerEvent<'_>) -> bool {
        event.id() == self.want
    }
    fn resolve_handler(&mut self, event: &PointerEvent<'_>) -> Option<SharedHandler> {
        match event.action() {
            PointerAction::Down | PointerAction::Move => Some(self.handler.clone()),
            PointerAction::Up | PointerAction::Cancel => None,
        }
    }
}

struct CountingHandler {
    hits: Rc<Cell<usize>>,
}

impl PointerHandler for CountingHandler {
    fn on_pointer_event(&mut self, _event: &PointerEvent<'_>) {
        self.hits.set(self.hits.get() + 1);
    }
}

fn one_finger(action: SampleAction, x: f64) -> RawSample {
    RawSample::new(
        action,
        vec![PointerSlot::new(PointerId(0), Point::new(x, 10.0))],
        0,
    )
}

fn two_fingers(action: SampleAction, acting: usize, x: f64) -> RawSample {
    RawSample::new(
        action,
        vec![
            PointerSlot::new(PointerId(0), Point::new(x, 10.0)),
            PointerSlot::new(PointerId(1), Point::new(x + 100.0, 10.0)),
        ],
        acting,
    )
}

fn gesture_stream() -> Vec<RawSample> {
    let mut out = Vec::with_capacity(MOVES + 2);
    out.push(one_finger(SampleAction::Down, 0.0));
    for i in 0..MOVES {
        out.push(one_finger(SampleAction::Move, i as f64));
    }
    out.push(one_finger(SampleAction::Up, MOVES as f64));
    out
}

fn multi_pointer_stream() -> Vec<RawSample> {
    let mut out = Vec::with_capacity(MOVES + 4);
    out.push(one_finger(SampleAction::Down, 0.0));
    out.push(two_fingers(SampleAction::PointerDown, 1, 0.0));
    for i in 0..MOVES {
        out.push(two_fingers(SampleAction::Move, 0, i as f64));
    }
    out.push(two_fingers(SampleAction::PointerUp, 1, MOVES as f64));
    out.push(one_finger(SampleAction::Up, MOVES as f64));
    out
}

// A minimal host with no descendant views: every sample goes through all
// three phases.
fn drive(touch: &mut TouchDispatcher, stream: &[RawSample]) {
    for sample in stream {
        touch.notify_all(sample);
        let _ = touch.try_intercept(sample);
        let _ = touch.handle(sample);
    }
}

fn bench_gesture_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture_chain");
    let stream = gesture_stream();
    for &n in &[4usize, 16, 64] {
        group.throughput(Throughput::Elements(stream.len() as u64));
        group.bench_function(format!("late_claim_n{}", n), |b| {
            b.iter_batched(
                || {
                    let handled = Rc::new(Cell::new(0usize));
                    let mut touch = TouchDispatcher::new();
                    for _ in 0..n - 1 {
                        touch.add_listener(Rc::new(RefCell::new(Noop)));
                    }
                    touch.add_listener(Rc::new(RefCell::new(LateClaimer {
                        handled: handled.clone(),
                    })));
                    (touch, handled)
                },
                |(mut touch, handled)| {
                    drive(&mut touch, &stream);
                    black_box(handled.get());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_pointer_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("pointer_split");
    let stream = multi_pointer_stream();
    group.throughput(Throughput::Elements(stream.len() as u64));
    group.bench_function("two_fingers_two_dispatchers", |b| {
        b.iter_batched(
            || {
                let hits = Rc::new(Cell::new(0usize));
                let mut registry = DispatcherRegistry::new();
                for id in 0..2u32 {
                    let handler = Rc::new(RefCell::new(CountingHandler {
                        hits: hits.clone(),
                    }));
                    registry.add_dispatcher(Rc::new(RefCell::new(RegionDispatcher {
                        want: PointerId(id),
                        handler,
                    })));
                }
                let mut touch = TouchDispatcher::new();
                touch.add_listener(Rc::new(RefCell::new(PointerArbiter::new(registry))));
                (touch, hits)
            },
            |(mut touch, hits)| {
                drive(&mut touch, &stream);
                black_box(hits.get());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_gesture_chain, bench_pointer_split);
criterion_main!(benches);
