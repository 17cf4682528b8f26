// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-pointer arbitration with a dispatcher chain.
//!
//! Two fingers land on two screen regions. The left dispatcher claims its
//! contact immediately; the right dispatcher commits but defers its handler
//! until the first move, so its handler's stream starts mid-gesture. Each
//! finger drives its own handler with no interference.
//!
//! Run:
//! - `cargo run -p trellis_demos --example pointer_split`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Point;
use trellis_touch::arbiter::PointerArbiter;
use trellis_touch::dispatch::TouchDispatcher;
use trellis_touch::event::{
    PointerAction, PointerEvent, PointerId, PointerSlot, RawSample, SampleAction,
};
use trellis_touch::handler::{
    PointerDispatcher, PointerHandler, SharedDispatcher, SharedHandler,
};
use trellis_touch::registry::DispatcherRegistry;

struct PrintHandler {
    name: &'static str,
}

impl PointerHandler for PrintHandler {
    fn on_pointer_event(&mut self, event: &PointerEvent<'_>) {
        println!(
            "    [{}] contact {} {:?} at {:?}",
            self.name,
            event.id().0,
            event.action(),
            event.position()
        );
    }
}

struct RegionDispatcher {
    name: &'static str,
    accepts: fn(Point) -> bool,
    defer_first: bool,
    handler: SharedHandler,
}

impl PointerDispatcher for RegionDispatcher {
    fn is_prepare_to_intercept(&mut self, event: &PointerEvent<'_>) -> bool {
        let take = (self.accepts)(event.position());
        println!(
            "  {} asked about contact {}: {}",
            self.name,
            event.id().0,
            if take { "mine" } else { "pass" }
        );
        take
    }

    fn resolve_handler(&mut self, event: &PointerEvent<'_>) -> Option<SharedHandler> {
        match event.action() {
            PointerAction::Up | PointerAction::Cancel => {
                println!(
                    "  {} saw contact {} end while deferred",
                    self.name,
                    event.id().0
                );
                None
            }
            _ if self.defer_first => {
                self.defer_first = false;
                println!("  {} defers contact {}", self.name, event.id().0);
                None
            }
            _ => {
                println!("  {} hands out its handler", self.name);
                Some(self.handler.clone())
            }
        }
    }

    fn on_other_robbed(&mut self, event: &PointerEvent<'_>, _winner: &SharedDispatcher) {
        println!(
            "  {} heard contact {} went elsewhere",
            self.name,
            event.id().0
        );
    }
}

fn main() {
    let mut registry = DispatcherRegistry::new();
    registry.add_dispatcher(Rc::new(RefCell::new(RegionDispatcher {
        name: "left",
        accepts: |p| p.x < 100.0,
        defer_first: false,
        handler: Rc::new(RefCell::new(PrintHandler { name: "left-pane" })),
    })));
    registry.add_dispatcher(Rc::new(RefCell::new(RegionDispatcher {
        name: "right",
        accepts: |p| p.x >= 100.0,
        defer_first: true,
        handler: Rc::new(RefCell::new(PrintHandler { name: "right-pane" })),
    })));

    let mut touch = TouchDispatcher::new();
    touch.add_listener(Rc::new(RefCell::new(PointerArbiter::new(registry))));

    let first = PointerSlot::new(PointerId(0), Point::new(40.0, 60.0));
    let second = PointerSlot::new(PointerId(1), Point::new(160.0, 60.0));
    let stream = [
        RawSample::new(SampleAction::Down, vec![first], 0),
        RawSample::new(SampleAction::PointerDown, vec![first, second], 1),
        RawSample::new(SampleAction::Move, vec![first, second], 0),
        RawSample::new(SampleAction::Move, vec![first, second], 0),
        RawSample::new(SampleAction::PointerUp, vec![first, second], 1),
        RawSample::new(SampleAction::Up, vec![first], 0),
    ];

    for sample in &stream {
        println!("== {:?} ==", sample.action());
        touch.notify_all(sample);
        if touch.try_intercept(sample) {
            touch.handle(sample);
        }
    }
}
