// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whole-gesture arbitration basics.
//!
//! Three listeners contest a one-finger gesture. Nobody wants it during the
//! intercept phase; the middle listener takes it during the handle phase,
//! so the first listener gets a CANCEL-relabeled re-invocation and the last
//! one a robbed notification before the winner sees the down.
//!
//! Run:
//! - `cargo run -p trellis_demos --example touch_basics`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Point;
use trellis_touch::dispatch::{GestureListener, TouchDispatcher};
use trellis_touch::event::{PointerId, PointerSlot, RawSample, SampleAction};

struct Narrator {
    name: &'static str,
    wants_gesture: bool,
}

impl GestureListener for Narrator {
    fn on_dispatch(&mut self, sample: &RawSample) {
        println!("  {} observes {:?}", self.name, sample.action());
    }

    fn is_early_claim(&mut self, sample: &RawSample) -> bool {
        println!("  {} asked early for {:?}: pass", self.name, sample.action());
        false
    }

    fn is_late_claim(&mut self, sample: &RawSample) -> bool {
        let claim = self.wants_gesture && sample.action() == SampleAction::Down;
        println!(
            "  {} asked late for {:?}: {}",
            self.name,
            sample.action(),
            if claim { "mine" } else { "pass" }
        );
        claim
    }

    fn handle(&mut self, sample: &RawSample) {
        println!("  {} handles {:?}", self.name, sample.action());
    }

    fn on_down_robbed(&mut self, _sample: &RawSample) {
        println!("  {} was robbed of the down", self.name);
    }
}

fn main() {
    let mut touch = TouchDispatcher::new();
    for (name, wants_gesture) in [("header", false), ("scroller", true), ("logger", false)] {
        touch.add_listener(Rc::new(RefCell::new(Narrator {
            name,
            wants_gesture,
        })));
    }

    let finger = |action| {
        RawSample::new(
            action,
            vec![PointerSlot::new(PointerId(0), Point::new(24.0, 48.0))],
            0,
        )
    };

    for action in [SampleAction::Down, SampleAction::Move, SampleAction::Up] {
        println!("== {action:?} ==");
        let sample = finger(action);
        touch.notify_all(&sample);
        let claimed = touch.try_intercept(&sample);
        println!("  -> intercept phase claimed: {claimed}");
        let consumed = touch.handle(&sample);
        println!("  -> consumed: {consumed}");
    }
    println!("final claim state: {:?}", touch.claim_state());
}
