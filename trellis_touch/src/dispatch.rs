// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Top-level gesture arbitration over an ordered listener chain.
//!
//! ## Overview
//!
//! [`TouchDispatcher`] runs the three-phase protocol of a host view's event
//! boundary, one [`RawSample`] at a time:
//!
//! 1. **Dispatch** — [`TouchDispatcher::notify_all`] lets every listener
//!    observe the sample, unconditionally and in registration order.
//! 2. **Intercept** — [`TouchDispatcher::try_intercept`] runs the early-claim
//!    scan and reports whether a listener now owns the gesture, before
//!    descendant views get to consume it.
//! 3. **Handle** — [`TouchDispatcher::handle`] delivers to the bound winner,
//!    or runs the late-claim scan once descendants have declined.
//!
//! ## Claims
//!
//! A claim is one-shot: the first listener to answer `true` owns the gesture
//! until it ends, and no claim predicate is consulted again for that gesture.
//! Listeners that already observed the gesture's down and then lose it are
//! re-invoked once with a CANCEL-relabeled copy of the sample, so their
//! cleanup runs; listeners that never saw the down are told it was robbed.
//! Both notifications happen before the winner's delivery, in registration
//! order.
//!
//! A winner gets no explicit "you won" signal — ownership is observable only
//! as the subsequent stream of [`GestureListener::handle`] calls.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::event::{RawSample, SampleAction};

/// A whole-gesture contestant registered with a [`TouchDispatcher`].
///
/// Every operation except [`handle`](Self::handle) defaults to a no-op, so
/// implementors opt into exactly the callbacks they need.
pub trait GestureListener {
    /// Unconditional dispatch-phase observation of every sample.
    fn on_dispatch(&mut self, _sample: &RawSample) {}

    /// Early claim: take the gesture before descendant views see the sample.
    ///
    /// Consulted on down and, while the gesture stays unclaimed, on every
    /// later sample — so up and cancel also arrive here, which is how
    /// per-pointer adapters observe contact ends for gestures owned by a
    /// descendant. One `true` per gesture; a CANCEL-relabeled re-invocation
    /// signals that another listener won.
    fn is_early_claim(&mut self, _sample: &RawSample) -> bool {
        false
    }

    /// Late claim: take the gesture's down once descendants have declined to
    /// consume it. Same one-shot and CANCEL-relabel rules as
    /// [`is_early_claim`](Self::is_early_claim).
    fn is_late_claim(&mut self, _sample: &RawSample) -> bool {
        false
    }

    /// Delivery of a sample to the gesture's bound owner.
    fn handle(&mut self, sample: &RawSample);

    /// The gesture's down was claimed by a listener earlier in registration
    /// order; this listener never observed it. Down samples only.
    fn on_down_robbed(&mut self, _sample: &RawSample) {}

    /// The host relayed a descendant's request to disallow (or re-allow)
    /// interception for the rest of the gesture.
    fn on_disallow_intercept(&mut self, _disallow: bool) {}
}

/// Ownership state of the current gesture.
///
/// The index identifies the bound listener by registration order. The state
/// is reset to [`Unclaimed`](Self::Unclaimed) by the next top-level down;
/// between a gesture's end and that down no claim operation exists, so the
/// stale binding is unobservable.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ClaimState {
    /// Nobody owns the gesture.
    Unclaimed,
    /// A listener claimed the gesture during the intercept phase.
    EarlyBound(usize),
    /// A listener claimed the gesture during the handle phase.
    LateBound(usize),
}

/// Deterministic whole-gesture arbitration over an ordered listener chain.
///
/// ## Usage
///
/// - Register contestants with [`TouchDispatcher::add_listener`]; iteration
///   order is registration order everywhere, and registration order is
///   priority order.
/// - Per sample, the host calls [`notify_all`](Self::notify_all), then
///   [`try_intercept`](Self::try_intercept), then — when no descendant
///   consumed the sample, or a listener already owns the gesture —
///   [`handle`](Self::handle). Down must pass through `try_intercept`
///   before `handle`; that pass is what opens a fresh gesture.
/// - No operation here can fail; booleans are the sole decision signal.
pub struct TouchDispatcher {
    listeners: Vec<Rc<RefCell<dyn GestureListener>>>,
    claim: ClaimState,
}

impl core::fmt::Debug for TouchDispatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TouchDispatcher")
            .field("listeners", &self.listeners.len())
            .field("claim", &self.claim)
            .finish_non_exhaustive()
    }
}

impl Default for TouchDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchDispatcher {
    /// Create a dispatcher with no listeners.
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            claim: ClaimState::Unclaimed,
        }
    }

    /// Append a listener to the chain. Listeners cannot be removed; the
    /// chain grows in priority order only.
    pub fn add_listener(&mut self, listener: Rc<RefCell<dyn GestureListener>>) {
        self.listeners.push(listener);
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Ownership state of the current gesture.
    pub fn claim_state(&self) -> ClaimState {
        self.claim
    }

    /// Dispatch phase: every listener observes `sample`, in order,
    /// unconditionally.
    pub fn notify_all(&self, sample: &RawSample) {
        for listener in &self.listeners {
            listener.borrow_mut().on_dispatch(sample);
        }
    }

    /// Relay a descendant's disallow-intercept request to every listener.
    ///
    /// The flag is a per-gesture signal; listeners that track it clear it on
    /// the next top-level down.
    pub fn request_disallow_intercept(&self, disallow: bool) {
        for listener in &self.listeners {
            listener.borrow_mut().on_disallow_intercept(disallow);
        }
    }

    /// Intercept phase: returns whether a listener now owns the gesture.
    ///
    /// On down, resets the claim state and runs the early-claim scan: the
    /// first listener to answer `true` wins; listeners before it are
    /// re-invoked with a CANCEL-relabeled copy (they had observed the down),
    /// and listeners after it get [`GestureListener::on_down_robbed`].
    ///
    /// On later samples of an unclaimed gesture, runs the same single-winner
    /// scan; on a win every *other* listener gets the CANCEL-relabeled
    /// re-invocation, since all of them observed the gesture's down. For an
    /// already-claimed gesture this reports `true` without consulting
    /// anyone.
    pub fn try_intercept(&mut self, sample: &RawSample) -> bool {
        match sample.action() {
            SampleAction::Down => {
                self.claim = ClaimState::Unclaimed;
                let mut winner = None;
                for (i, listener) in self.listeners.iter().enumerate() {
                    if winner.is_none() {
                        if listener.borrow_mut().is_early_claim(sample) {
                            winner = Some(i);
                            self.claim = ClaimState::EarlyBound(i);
                            let cancel = sample.with_action(SampleAction::Cancel);
                            for earlier in &self.listeners[..i] {
                                earlier.borrow_mut().is_early_claim(&cancel);
                            }
                        }
                    } else {
                        listener.borrow_mut().on_down_robbed(sample);
                    }
                }
                winner.is_some()
            }
            _ => {
                if self.claim != ClaimState::Unclaimed {
                    return true;
                }
                for (i, listener) in self.listeners.iter().enumerate() {
                    if listener.borrow_mut().is_early_claim(sample) {
                        self.claim = ClaimState::EarlyBound(i);
                        let cancel = sample.with_action(SampleAction::Cancel);
                        for (j, other) in self.listeners.iter().enumerate() {
                            if j != i {
                                other.borrow_mut().is_early_claim(&cancel);
                            }
                        }
                        return true;
                    }
                }
                false
            }
        }
    }

    /// Handle phase: returns whether the sample was consumed.
    ///
    /// An early-bound gesture delivers exclusively to its owner. Otherwise a
    /// down runs the late-claim scan (same winner-take-all, earlier-CANCEL,
    /// later-robbed pattern as the intercept phase); the winner receives the
    /// down only after every losing party was notified. With no winner the
    /// down is reported unconsumed. Later samples of a late-bound gesture
    /// short-circuit to the owner; unbound ones are unconsumed.
    pub fn handle(&mut self, sample: &RawSample) -> bool {
        if let ClaimState::EarlyBound(i) = self.claim {
            self.listeners[i].borrow_mut().handle(sample);
            return true;
        }
        match sample.action() {
            SampleAction::Down => {
                let mut winner = None;
                for (i, listener) in self.listeners.iter().enumerate() {
                    if winner.is_none() {
                        if listener.borrow_mut().is_late_claim(sample) {
                            winner = Some(i);
                            let cancel = sample.with_action(SampleAction::Cancel);
                            for earlier in &self.listeners[..i] {
                                earlier.borrow_mut().is_late_claim(&cancel);
                            }
                        }
                    } else {
                        listener.borrow_mut().on_down_robbed(sample);
                    }
                }
                match winner {
                    Some(i) => {
                        self.claim = ClaimState::LateBound(i);
                        self.listeners[i].borrow_mut().handle(sample);
                        true
                    }
                    None => false,
                }
            }
            _ => match self.claim {
                ClaimState::LateBound(i) => {
                    self.listeners[i].borrow_mut().handle(sample);
                    true
                }
                _ => false,
            },
        }
    }
}
