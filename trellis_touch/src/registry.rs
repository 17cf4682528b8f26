// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered pointer-dispatcher chain with deferred claims.
//!
//! ## Overview
//!
//! [`DispatcherRegistry`] is the [`PointerRouting`] seam most hosts plug into
//! a [`PointerArbiter`](crate::arbiter::PointerArbiter): an ordered chain of
//! [`PointerDispatcher`]s, one optional lowest-priority default, and a
//! side-list of observer handlers that see every projected sample during the
//! dispatch phase regardless of who owns what.
//!
//! ## Deferred claims
//!
//! A dispatcher may commit to a contact without naming a handler yet —
//! "I intend to own this finger, ask me again." From that point the deferred
//! dispatcher is the *only* one consulted for that contact, once per
//! subsequent sample, until it produces the handler or the contact ends.
//! Descendant views keep receiving the stream in the meantime, which is what
//! makes gestures like long-press-then-drag possible without stealing the
//! contact up front.
//!
//! ## Ordering
//!
//! Registration order is priority order; the default, when set, always runs
//! last. Every loser of a claim hears about the winner through
//! [`PointerDispatcher::on_other_robbed`] — observation, not a veto.

use alloc::rc::Rc;
use alloc::vec::Vec;

use crate::arbiter::PointerRouting;
use crate::event::{PointerAction, PointerEvent, RawSample, SampleAction};
use crate::handler::{SharedDispatcher, SharedHandler};
use crate::pointer_map::PointerMap;

/// Ordered pointer-dispatcher chain with one optional default and
/// dispatch-phase observers.
pub struct DispatcherRegistry {
    dispatchers: Vec<SharedDispatcher>,
    default: Option<SharedDispatcher>,
    deferred: PointerMap<SharedDispatcher>,
    observers: Vec<SharedHandler>,
}

impl core::fmt::Debug for DispatcherRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DispatcherRegistry")
            .field("dispatchers", &self.dispatchers.len())
            .field("has_default", &self.default.is_some())
            .field("deferred", &self.deferred.len())
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl Default for DispatcherRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatcherRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            dispatchers: Vec::new(),
            default: None,
            deferred: PointerMap::new(),
            observers: Vec::new(),
        }
    }

    /// Append a dispatcher to the chain. Registration order is priority
    /// order.
    ///
    /// # Panics
    ///
    /// Panics if `dispatcher` is already a chain member or is installed as
    /// the default.
    pub fn add_dispatcher(&mut self, dispatcher: SharedDispatcher) {
        if let Some(default) = &self.default {
            assert!(
                !Rc::ptr_eq(default, &dispatcher),
                "dispatcher is already installed as the default"
            );
        }
        assert!(
            !self.dispatchers.iter().any(|d| Rc::ptr_eq(d, &dispatcher)),
            "dispatcher is already registered"
        );
        self.dispatchers.push(dispatcher);
    }

    /// Install or remove the default dispatcher, consulted only after the
    /// whole chain declines a contact.
    ///
    /// Replacing the default while contacts are deferred to it is not
    /// supported: outstanding deferrals keep consulting the dispatcher they
    /// recorded. Swap defaults only between gestures.
    ///
    /// # Panics
    ///
    /// Panics if `dispatcher` is already a chain member.
    pub fn set_default_dispatcher(&mut self, dispatcher: Option<SharedDispatcher>) {
        if let Some(dispatcher) = &dispatcher {
            assert!(
                !self.dispatchers.iter().any(|d| Rc::ptr_eq(d, dispatcher)),
                "default dispatcher is already a chain member"
            );
        }
        self.default = dispatcher;
    }

    /// The current default dispatcher, if any.
    pub fn default_dispatcher(&self) -> Option<SharedDispatcher> {
        self.default.clone()
    }

    /// Number of chain members, excluding the default.
    pub fn dispatcher_count(&self) -> usize {
        self.dispatchers.len()
    }

    /// Append an observer handler that receives every projected sample
    /// during the dispatch phase, regardless of ownership.
    pub fn add_dispatch_observer(&mut self, observer: SharedHandler) {
        self.observers.push(observer);
    }

    /// Remove a previously added dispatch observer (matched by identity).
    pub fn remove_dispatch_observer(&mut self, observer: &SharedHandler) {
        self.observers.retain(|o| !Rc::ptr_eq(o, observer));
    }

    /// Consult the deferred dispatcher recorded for `event`'s contact, if
    /// any. Returns the resolved handler; clears the deferral when the
    /// dispatcher finally yields.
    fn consult_deferred(&mut self, event: &PointerEvent<'_>) -> Option<SharedHandler> {
        let dispatcher = self.deferred.get(event.id()).cloned()?;
        let handler = dispatcher.borrow_mut().resolve_handler(event);
        if handler.is_some() {
            self.deferred.remove(event.id());
        }
        handler
    }

    /// Ask `winner` for its handler, recording a deferral when it has none
    /// yet.
    fn settle_winner(
        &mut self,
        winner: SharedDispatcher,
        event: &PointerEvent<'_>,
    ) -> Option<SharedHandler> {
        let handler = winner.borrow_mut().resolve_handler(event);
        if handler.is_none() {
            self.deferred.insert(event.id(), winner);
        }
        handler
    }

    /// Notify the deferred dispatcher, if any, that `event`'s contact ended
    /// before it produced a handler; drops the deferral.
    fn drop_deferred(&mut self, event: &PointerEvent<'_>) {
        if let Some(dispatcher) = self.deferred.remove(event.id()) {
            // One final look at the terminal projection; the result is
            // ignored by contract.
            let _ = dispatcher.borrow_mut().resolve_handler(event);
        }
    }
}

impl PointerRouting for DispatcherRegistry {
    fn resolve_handler(&mut self, event: &PointerEvent<'_>) -> Option<SharedHandler> {
        match event.action() {
            PointerAction::Down | PointerAction::Move => {}
            // Terminal projections never start a claim scan.
            PointerAction::Up | PointerAction::Cancel => return None,
        }
        if event.sample().action() == SampleAction::Down {
            // A fresh gesture; no deferral may survive into it.
            self.deferred.clear();
        }
        if self.deferred.contains(event.id()) {
            // An outstanding deferral short-circuits the scan entirely.
            return self.consult_deferred(event);
        }

        let mut winner = None;
        for dispatcher in &self.dispatchers {
            if dispatcher.borrow_mut().is_prepare_to_intercept(event) {
                winner = Some(dispatcher.clone());
                break;
            }
        }
        if let Some(winner) = winner {
            for dispatcher in &self.dispatchers {
                if !Rc::ptr_eq(dispatcher, &winner) {
                    dispatcher.borrow_mut().on_other_robbed(event, &winner);
                }
            }
            if let Some(default) = &self.default {
                default.borrow_mut().on_other_robbed(event, &winner);
            }
            return self.settle_winner(winner, event);
        }

        let default = self.default.clone()?;
        if default.borrow_mut().is_prepare_to_intercept(event) {
            for dispatcher in &self.dispatchers {
                dispatcher.borrow_mut().on_other_robbed(event, &default);
            }
            return self.settle_winner(default, event);
        }
        None
    }

    fn on_pointer_robbed(&mut self, event: &PointerEvent<'_>, _handler: Option<&SharedHandler>) {
        if event.action() == PointerAction::Cancel {
            // The contact was taken by an earlier listener or an outer view
            // while a dispatcher was still waiting on it.
            self.drop_deferred(event);
        }
    }

    fn on_pointer_ended_unhandled(&mut self, event: &PointerEvent<'_>) {
        self.drop_deferred(event);
    }

    fn on_dispatch(&mut self, sample: &RawSample) {
        if !self.observers.is_empty() {
            match sample.action() {
                SampleAction::Down
                | SampleAction::PointerDown
                | SampleAction::PointerUp
                | SampleAction::Up => {
                    let event = sample.project_acting();
                    for observer in &self.observers {
                        observer.borrow_mut().on_pointer_event(&event);
                    }
                }
                SampleAction::Move | SampleAction::Cancel => {
                    for index in 0..sample.pointer_count() {
                        let event = sample.project(index);
                        for observer in &self.observers {
                            observer.borrow_mut().on_pointer_event(&event);
                        }
                    }
                }
            }
        }
        for dispatcher in &self.dispatchers {
            dispatcher.borrow_mut().on_dispatch(sample);
        }
        if let Some(default) = &self.default {
            default.borrow_mut().on_dispatch(sample);
        }
    }

    fn on_down_robbed(&mut self, sample: &RawSample) {
        for dispatcher in &self.dispatchers {
            dispatcher.borrow_mut().on_down_robbed(sample);
        }
        if let Some(default) = &self.default {
            default.borrow_mut().on_down_robbed(sample);
        }
    }
}
