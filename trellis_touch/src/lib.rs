// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Touch: deterministic multi-pointer touch arbitration.
//!
//! ## Overview
//!
//! This crate decides who owns a touch gesture. Given the stream of
//! multi-pointer samples a host view receives, it arbitrates — in
//! registration order, with at most one claim opportunity per contestant per
//! gesture — which listener or per-pointer handler owns each gesture,
//! notifies the losers, supports deferring a claim until a later sample, and
//! isolates contacts so independent fingers bind to independent handlers.
//!
//! It does not hit-test, lay out, or render. Feed it
//! [`RawSample`](crate::event::RawSample)s from your platform boundary; it
//! answers claimed/not-claimed and consumed/not-consumed, and drives your
//! registered contestants' callbacks.
//!
//! ## The three phases
//!
//! Per sample, a host runs [`TouchDispatcher`](crate::dispatch::TouchDispatcher)
//! through three entry points:
//!
//! 1. **dispatch** ([`notify_all`](crate::dispatch::TouchDispatcher::notify_all))
//!    — pure observation; every listener sees every sample.
//! 2. **intercept** ([`try_intercept`](crate::dispatch::TouchDispatcher::try_intercept))
//!    — the early-claim scan, run before descendant views may consume the
//!    sample. The first listener to answer `true` owns the gesture;
//!    listeners that already saw the gesture's down are re-invoked once with
//!    a CANCEL-relabeled copy, later listeners are told the down was robbed.
//! 3. **handle** ([`handle`](crate::dispatch::TouchDispatcher::handle)) —
//!    delivery to the bound owner, or the late-claim scan once descendants
//!    declined.
//!
//! ## Per-pointer arbitration
//!
//! A [`PointerArbiter`](crate::arbiter::PointerArbiter) is a listener that
//! splits the raw stream per contact and binds each contact to its own
//! [`PointerHandler`](crate::handler::PointerHandler). The stock routing
//! seam, [`DispatcherRegistry`](crate::registry::DispatcherRegistry), runs
//! an ordered sub-chain of
//! [`PointerDispatcher`](crate::handler::PointerDispatcher)s with
//! deferred-claim bookkeeping: a dispatcher may commit to a finger now and
//! produce its handler a few samples later, without taking the stream away
//! from descendants in the meantime.
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use kurbo::Point;
//! use trellis_touch::dispatch::{GestureListener, TouchDispatcher};
//! use trellis_touch::event::{PointerId, PointerSlot, RawSample, SampleAction};
//!
//! // A listener that takes any gesture nobody else wanted.
//! #[derive(Default)]
//! struct Sweeper {
//!     seen: Vec<SampleAction>,
//! }
//!
//! impl GestureListener for Sweeper {
//!     fn is_late_claim(&mut self, sample: &RawSample) -> bool {
//!         sample.action() == SampleAction::Down
//!     }
//!     fn handle(&mut self, sample: &RawSample) {
//!         self.seen.push(sample.action());
//!     }
//! }
//!
//! let sweeper = Rc::new(RefCell::new(Sweeper::default()));
//! let mut touch = TouchDispatcher::new();
//! touch.add_listener(sweeper.clone());
//!
//! let finger = |action| {
//!     RawSample::new(
//!         action,
//!         vec![PointerSlot::new(PointerId(0), Point::new(4.0, 8.0))],
//!         0,
//!     )
//! };
//!
//! // A minimal host: no descendant views, so every sample that the
//! // intercept phase leaves unclaimed goes straight to the handle phase.
//! for action in [SampleAction::Down, SampleAction::Move, SampleAction::Up] {
//!     let sample = finger(action);
//!     touch.notify_all(&sample);
//!     touch.try_intercept(&sample);
//!     assert!(touch.handle(&sample));
//! }
//!
//! assert_eq!(
//!     sweeper.borrow().seen,
//!     [SampleAction::Down, SampleAction::Move, SampleAction::Up]
//! );
//! ```
//!
//! ## Determinism
//!
//! Arbitration is single-threaded and strictly sequential: one sample is
//! fully arbitrated before the next is accepted, there are no timers, and a
//! deferred claim resolves on a later sample rather than on elapsed time.
//! For any two contestants A before B in registration order, A observes a
//! given sample — and any cancel or robbed notification derived from it —
//! strictly before B within the same pass.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod arbiter;
pub mod dispatch;
pub mod event;
pub mod handler;
pub mod pointer_map;
pub mod registry;
