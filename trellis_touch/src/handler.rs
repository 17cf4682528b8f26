// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Leaf capability contracts: pointer handlers and pointer dispatchers.
//!
//! Handlers and dispatchers are registered as shared cells
//! ([`SharedHandler`], [`SharedDispatcher`]) because one handler may be
//! bound to several contacts at once and identity — not value — is what the
//! registration rules compare.

use alloc::rc::Rc;
use core::cell::RefCell;

use crate::event::{PointerEvent, RawSample};

/// Shared, interiorly mutable [`PointerHandler`].
pub type SharedHandler = Rc<RefCell<dyn PointerHandler>>;

/// Shared, interiorly mutable [`PointerDispatcher`].
pub type SharedDispatcher = Rc<RefCell<dyn PointerDispatcher>>;

/// Consumer of one contact's event sub-stream.
///
/// Receives the contact's events from binding time through its up or
/// cancel. A handler bound mid-gesture (at a move) never sees the missed
/// earlier events.
pub trait PointerHandler {
    /// One event of the bound contact's stream.
    fn on_pointer_event(&mut self, event: &PointerEvent<'_>);
}

/// Contestant in a [`DispatcherRegistry`](crate::registry::DispatcherRegistry)
/// chain, deciding per contact whether — and with which handler — to take
/// over that contact's stream.
pub trait PointerDispatcher {
    /// Whether this dispatcher commits to the contact.
    ///
    /// Answering `true` spends the dispatcher's single claim opportunity for
    /// that contact; it is not asked again until the contact's gesture ends.
    /// Receives down and move projections.
    fn is_prepare_to_intercept(&mut self, event: &PointerEvent<'_>) -> bool;

    /// The handler for a committed contact, or `None` to defer.
    ///
    /// While a deferral is outstanding this dispatcher is the only one
    /// consulted for that contact, once per subsequent sample, until it
    /// produces a handler or the contact ends. Producing a handler is a
    /// one-shot per contact.
    ///
    /// If the contact ends (or is cancelled) while deferred, this is invoked
    /// one final time with the terminal up or cancel projection; the result
    /// is ignored.
    fn resolve_handler(&mut self, event: &PointerEvent<'_>) -> Option<SharedHandler>;

    /// The gesture's down was taken by a listener ahead of this registry's
    /// arbiter in the outer chain.
    fn on_down_robbed(&mut self, _sample: &RawSample) {}

    /// Unconditional dispatch-phase observation of every sample.
    fn on_dispatch(&mut self, _sample: &RawSample) {}

    /// Another dispatcher committed to this contact. Observation only, not a
    /// veto.
    fn on_other_robbed(&mut self, _event: &PointerEvent<'_>, _winner: &SharedDispatcher) {}
}
