// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-pointer arbitration: splitting a multi-pointer stream into
//! independent single-pointer streams.
//!
//! ## Overview
//!
//! [`PointerArbiter`] is a [`GestureListener`] that treats every contact of a
//! gesture independently. Each contact is offered to the wrapped
//! [`PointerRouting`] seam; a resolved [`handler`](crate::handler::PointerHandler)
//! is bound to that contact alone and receives its projected sub-stream until
//! the contact lifts or the gesture is cancelled. Two fingers on two
//! different targets get two different handlers, with no interference.
//!
//! ## Binding moments
//!
//! A contact can bind at its down (delivery starts with that very sample) or
//! at a later move (the binding sample itself is not delivered; the stream
//! starts with the next one). The asymmetry mirrors the outer
//! [`dispatch`](crate::dispatch) protocol, where a down-phase win is handed
//! the sample immediately but a move-phase win is not.

use crate::dispatch::GestureListener;
use crate::event::{PointerAction, PointerEvent, PointerId, RawSample, SampleAction};
use crate::handler::SharedHandler;
use crate::pointer_map::PointerMap;

/// The routing seam a [`PointerArbiter`] drives: who handles a contact, and
/// who hears about contacts nobody handled.
pub trait PointerRouting {
    /// Resolve a handler for the projected contact, or `None` for no
    /// opinion. Consulted for down and move projections of unbound contacts.
    fn resolve_handler(&mut self, event: &PointerEvent<'_>) -> Option<SharedHandler>;

    /// The projected contact was taken away:
    /// - with `Some(handler)` when a handler was just bound to it (down or
    ///   move projection);
    /// - with `None` when an outside party ended the contact while it was
    ///   unbound (cancel-flavored projection).
    fn on_pointer_robbed(&mut self, event: &PointerEvent<'_>, handler: Option<&SharedHandler>);

    /// The projected contact lifted without ever being bound. Up projections
    /// only.
    fn on_pointer_ended_unhandled(&mut self, event: &PointerEvent<'_>);

    /// Dispatch-phase observation of every raw sample, forwarded from the
    /// arbiter's listener surface.
    fn on_dispatch(&mut self, _sample: &RawSample) {}

    /// The gesture's down was claimed by a listener earlier in the outer
    /// chain.
    fn on_down_robbed(&mut self, _sample: &RawSample) {}
}

/// A [`GestureListener`] that arbitrates each contact of a gesture
/// independently through a [`PointerRouting`] seam.
///
/// Owns the contact → handler binding table. Bindings are created when the
/// seam resolves a handler, removed at that contact's up or cancel, and
/// wholesale-cleared by the next top-level down.
pub struct PointerArbiter<R: PointerRouting> {
    routing: R,
    bindings: PointerMap<SharedHandler>,
    disallow_intercept: bool,
}

impl<R: PointerRouting> core::fmt::Debug for PointerArbiter<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PointerArbiter")
            .field("bindings", &self.bindings.len())
            .field("disallow_intercept", &self.disallow_intercept)
            .finish_non_exhaustive()
    }
}

impl<R: PointerRouting> PointerArbiter<R> {
    /// Create an arbiter around a routing seam.
    pub fn new(routing: R) -> Self {
        Self {
            routing,
            bindings: PointerMap::new(),
            disallow_intercept: false,
        }
    }

    /// The wrapped routing seam.
    pub fn routing(&self) -> &R {
        &self.routing
    }

    /// The wrapped routing seam, mutably; used to configure it after the
    /// arbiter was registered.
    pub fn routing_mut(&mut self) -> &mut R {
        &mut self.routing
    }

    /// The handler currently bound to `id`, if any.
    pub fn handler_of(&self, id: PointerId) -> Option<SharedHandler> {
        self.bindings.get(id).cloned()
    }

    /// Resolve, announce, and bind a handler for an unbound contact.
    /// Returns the bound handler, if the seam produced one.
    fn bind(&mut self, event: &PointerEvent<'_>) -> Option<SharedHandler> {
        let handler = self.routing.resolve_handler(event)?;
        self.routing.on_pointer_robbed(event, Some(&handler));
        self.bindings.insert(event.id(), handler.clone());
        Some(handler)
    }
}

impl<R: PointerRouting> GestureListener for PointerArbiter<R> {
    fn on_dispatch(&mut self, sample: &RawSample) {
        if sample.action() == SampleAction::Down {
            self.bindings.clear();
            self.disallow_intercept = false;
        }
        if self.disallow_intercept {
            // A descendant consumes the stream exclusively, so the claim
            // scans below never run; unbound contacts still need their
            // teardown notification when they end.
            match sample.action() {
                SampleAction::PointerUp | SampleAction::Up => {
                    let event = sample.project_acting();
                    if !self.bindings.contains(event.id()) {
                        let cancel = event.relabeled(PointerAction::Cancel);
                        self.routing.on_pointer_robbed(&cancel, None);
                    }
                }
                SampleAction::Cancel => {
                    for index in 0..sample.pointer_count() {
                        let event = sample.project(index);
                        if !self.bindings.contains(event.id()) {
                            self.routing.on_pointer_robbed(&event, None);
                        }
                    }
                }
                _ => {}
            }
        }
        self.routing.on_dispatch(sample);
    }

    fn is_early_claim(&mut self, sample: &RawSample) -> bool {
        match sample.action() {
            SampleAction::Down | SampleAction::PointerDown => {
                let event = sample.project_acting();
                match self.bind(&event) {
                    Some(handler) => {
                        if sample.action() == SampleAction::PointerDown {
                            // Claiming here swallows the sample before the
                            // handle phase sees it; forward the contact's
                            // first event by hand.
                            handler.borrow_mut().on_pointer_event(&event);
                        }
                        true
                    }
                    None => false,
                }
            }
            SampleAction::Move => {
                let mut claimed = false;
                for index in 0..sample.pointer_count() {
                    let event = sample.project(index);
                    if self.bindings.contains(event.id()) {
                        continue;
                    }
                    if self.bind(&event).is_some() {
                        // Delivery waits for the next round, as the outer
                        // protocol does for move-phase interception.
                        claimed = true;
                    }
                }
                claimed
            }
            SampleAction::PointerUp | SampleAction::Up => {
                let event = sample.project_acting();
                if !self.bindings.contains(event.id()) {
                    self.routing.on_pointer_ended_unhandled(&event);
                }
                false
            }
            SampleAction::Cancel => {
                for index in 0..sample.pointer_count() {
                    let event = sample.project(index);
                    if !self.bindings.contains(event.id()) {
                        self.routing.on_pointer_robbed(&event, None);
                    }
                }
                self.bindings.clear();
                false
            }
        }
    }

    fn handle(&mut self, sample: &RawSample) {
        match sample.action() {
            SampleAction::Down => {
                let event = sample.project_acting();
                if let Some(handler) = self.bindings.get(event.id()) {
                    handler.borrow_mut().on_pointer_event(&event);
                }
            }
            SampleAction::PointerDown => {
                let event = sample.project_acting();
                if let Some(handler) = self.bindings.get(event.id()) {
                    handler.borrow_mut().on_pointer_event(&event);
                } else if let Some(handler) = self.bind(&event) {
                    handler.borrow_mut().on_pointer_event(&event);
                }
            }
            SampleAction::Move => {
                for index in 0..sample.pointer_count() {
                    let event = sample.project(index);
                    if let Some(handler) = self.bindings.get(event.id()) {
                        handler.borrow_mut().on_pointer_event(&event);
                    } else {
                        // An unbound contact may still find a handler
                        // mid-gesture; the binding sample is not delivered.
                        let _ = self.bind(&event);
                    }
                }
            }
            SampleAction::PointerUp | SampleAction::Up => {
                let event = sample.project_acting();
                match self.bindings.remove(event.id()) {
                    Some(handler) => handler.borrow_mut().on_pointer_event(&event),
                    None => self.routing.on_pointer_ended_unhandled(&event),
                }
            }
            SampleAction::Cancel => {
                for index in 0..sample.pointer_count() {
                    let event = sample.project(index);
                    match self.bindings.get(event.id()) {
                        Some(handler) => handler.borrow_mut().on_pointer_event(&event),
                        None => self.routing.on_pointer_robbed(&event, None),
                    }
                }
                self.bindings.clear();
            }
        }
    }

    fn on_down_robbed(&mut self, sample: &RawSample) {
        self.routing.on_down_robbed(sample);
    }

    fn on_disallow_intercept(&mut self, disallow: bool) {
        self.disallow_intercept = disallow;
    }
}
