// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch samples and single-pointer projections.
//!
//! ## Overview
//!
//! A host view feeds one [`RawSample`] per platform touch event into the
//! arbitration pipeline (see [`dispatch`](crate::dispatch)). Per-pointer
//! consumers never see the raw sample; they receive a [`PointerEvent`]
//! projection of a single contact, with the multi-pointer action kinds
//! collapsed to the four-state stream one finger produces.
//!
//! ## Relabeling
//!
//! Losing contestants observe a gesture's end as a CANCEL even when the
//! underlying sample is something else. That relabeling is always a fresh
//! value — [`RawSample::with_action`] for whole samples,
//! [`PointerEvent::relabeled`] for projections — never a mutation of the
//! value other contestants are about to observe.

use alloc::vec::Vec;

use kurbo::{Point, Vec2};

/// Action kind of a multi-pointer [`RawSample`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SampleAction {
    /// The first contact went down; a new gesture starts.
    Down,
    /// An additional contact went down mid-gesture.
    PointerDown,
    /// One or more contacts moved.
    Move,
    /// A contact other than the last one lifted.
    PointerUp,
    /// The last contact lifted; the gesture ends.
    Up,
    /// The gesture was aborted by an outside party.
    Cancel,
}

/// Action kind of a single-pointer [`PointerEvent`] projection.
///
/// [`PointerDown`](SampleAction::PointerDown) and
/// [`PointerUp`](SampleAction::PointerUp) collapse to [`Down`](Self::Down)
/// and [`Up`](Self::Up); from one contact's point of view there is no
/// difference.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PointerAction {
    /// The contact went down.
    Down,
    /// The contact moved.
    Move,
    /// The contact lifted.
    Up,
    /// The contact's gesture was aborted.
    Cancel,
}

/// Identifier of one contact, stable from its down through its up or cancel.
///
/// Ids are assigned by the host platform and may be reused for later
/// gestures; nothing in this crate retains an id past its contact's end.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PointerId(
    /// The raw id value assigned by the host platform.
    pub u32,
);

/// One active contact within a [`RawSample`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerSlot {
    /// Contact identifier.
    pub id: PointerId,
    /// Position in the host view's local coordinates.
    pub position: Point,
}

impl PointerSlot {
    /// Create a slot.
    pub const fn new(id: PointerId, position: Point) -> Self {
        Self { id, position }
    }
}

/// One multi-pointer touch event, covering every active contact at an
/// instant.
///
/// A sample lives for exactly one arbitration pass
/// (dispatch → intercept → handle) and is never mutated once constructed;
/// callbacks receive it by shared reference and must not retain it.
#[derive(Clone, Debug)]
pub struct RawSample {
    action: SampleAction,
    pointers: Vec<PointerSlot>,
    acting: usize,
    screen_offset: Vec2,
}

impl RawSample {
    /// Create a sample. `acting` indexes the contact the action refers to;
    /// for [`Move`](SampleAction::Move) and [`Cancel`](SampleAction::Cancel),
    /// which concern every contact, the host conventionally passes `0`.
    ///
    /// # Panics
    ///
    /// Panics if `acting` is not a valid index into `pointers`. A sample
    /// with no contacts, or an acting index pointing outside the slot list,
    /// is a host-side programming error.
    pub fn new(action: SampleAction, pointers: Vec<PointerSlot>, acting: usize) -> Self {
        assert!(
            acting < pointers.len(),
            "acting pointer index out of bounds"
        );
        Self {
            action,
            pointers,
            acting,
            screen_offset: Vec2::ZERO,
        }
    }

    /// Set the host view's origin in screen space.
    ///
    /// Projections derive their raw (screen) coordinates by offsetting the
    /// view-local position with this vector.
    pub fn with_screen_offset(mut self, offset: Vec2) -> Self {
        self.screen_offset = offset;
        self
    }

    /// A copy of this sample relabeled with `action`; contacts, acting
    /// index, and screen offset are preserved.
    pub fn with_action(&self, action: SampleAction) -> Self {
        Self {
            action,
            ..self.clone()
        }
    }

    /// The sample's action kind.
    pub fn action(&self) -> SampleAction {
        self.action
    }

    /// All active contacts, in the host's slot order.
    pub fn pointers(&self) -> &[PointerSlot] {
        &self.pointers
    }

    /// Number of active contacts.
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Index of the acting contact.
    pub fn acting_index(&self) -> usize {
        self.acting
    }

    /// Id of the acting contact.
    pub fn acting_id(&self) -> PointerId {
        self.pointers[self.acting].id
    }

    /// The host view's origin in screen space.
    pub fn screen_offset(&self) -> Vec2 {
        self.screen_offset
    }

    /// Project the contact at `index` into a single-pointer view of this
    /// sample.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn project(&self, index: usize) -> PointerEvent<'_> {
        assert!(index < self.pointers.len(), "pointer index out of bounds");
        PointerEvent {
            sample: self,
            index,
            relabel: None,
        }
    }

    /// Project the acting contact.
    pub fn project_acting(&self) -> PointerEvent<'_> {
        self.project(self.acting)
    }
}

/// Single-pointer view of a [`RawSample`] at one instant.
///
/// Projections are constructed fresh per arbitration step and borrow the
/// sample, so a callback cannot retain one past its own synchronous
/// invocation; copy out the [`id`](Self::id) and coordinates if state must
/// outlive the call.
#[derive(Copy, Clone, Debug)]
pub struct PointerEvent<'a> {
    sample: &'a RawSample,
    index: usize,
    relabel: Option<PointerAction>,
}

impl<'a> PointerEvent<'a> {
    /// The projected contact's id.
    pub fn id(&self) -> PointerId {
        self.sample.pointers[self.index].id
    }

    /// The projected contact's slot index within the sample.
    pub fn pointer_index(&self) -> usize {
        self.index
    }

    /// Position in the host view's local coordinates.
    pub fn position(&self) -> Point {
        self.sample.pointers[self.index].position
    }

    /// Position in screen coordinates.
    pub fn raw_position(&self) -> Point {
        self.position() + self.sample.screen_offset
    }

    /// The normalized single-pointer action, honoring a relabel override.
    pub fn action(&self) -> PointerAction {
        match self.relabel {
            Some(action) => action,
            None => match self.sample.action {
                SampleAction::Down | SampleAction::PointerDown => PointerAction::Down,
                SampleAction::Move => PointerAction::Move,
                SampleAction::PointerUp | SampleAction::Up => PointerAction::Up,
                SampleAction::Cancel => PointerAction::Cancel,
            },
        }
    }

    /// A copy of this projection reporting `action` instead of the sample's
    /// own; used to deliver a CANCEL-flavored view of a live sample.
    pub fn relabeled(&self, action: PointerAction) -> Self {
        Self {
            relabel: Some(action),
            ..*self
        }
    }

    /// The underlying multi-pointer sample.
    pub fn sample(&self) -> &'a RawSample {
        self.sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn two_finger_sample(action: SampleAction, acting: usize) -> RawSample {
        RawSample::new(
            action,
            vec![
                PointerSlot::new(PointerId(4), Point::new(10.0, 20.0)),
                PointerSlot::new(PointerId(7), Point::new(30.0, 40.0)),
            ],
            acting,
        )
    }

    #[test]
    fn projection_collapses_pointer_down_and_up() {
        let sample = two_finger_sample(SampleAction::PointerDown, 1);
        assert_eq!(sample.project_acting().action(), PointerAction::Down);

        let sample = two_finger_sample(SampleAction::PointerUp, 1);
        assert_eq!(sample.project_acting().action(), PointerAction::Up);

        let sample = two_finger_sample(SampleAction::Move, 0);
        assert_eq!(sample.project(1).action(), PointerAction::Move);
    }

    #[test]
    fn projection_reads_slot_fields() {
        let sample = two_finger_sample(SampleAction::Down, 0);
        let ev = sample.project(1);
        assert_eq!(ev.id(), PointerId(7));
        assert_eq!(ev.pointer_index(), 1);
        assert_eq!(ev.position(), Point::new(30.0, 40.0));
    }

    #[test]
    fn raw_position_applies_screen_offset() {
        let sample =
            two_finger_sample(SampleAction::Down, 0).with_screen_offset(Vec2::new(100.0, 200.0));
        let ev = sample.project_acting();
        assert_eq!(ev.position(), Point::new(10.0, 20.0));
        assert_eq!(ev.raw_position(), Point::new(110.0, 220.0));
    }

    #[test]
    fn relabeled_projection_overrides_action_only() {
        let sample = two_finger_sample(SampleAction::Up, 1);
        let ev = sample.project_acting();
        let cancel = ev.relabeled(PointerAction::Cancel);
        assert_eq!(cancel.action(), PointerAction::Cancel);
        assert_eq!(cancel.id(), ev.id());
        assert_eq!(cancel.position(), ev.position());
        // The source projection is untouched.
        assert_eq!(ev.action(), PointerAction::Up);
    }

    #[test]
    fn with_action_copies_everything_else() {
        let sample =
            two_finger_sample(SampleAction::Move, 1).with_screen_offset(Vec2::new(5.0, 5.0));
        let cancel = sample.with_action(SampleAction::Cancel);
        assert_eq!(cancel.action(), SampleAction::Cancel);
        assert_eq!(cancel.pointers(), sample.pointers());
        assert_eq!(cancel.acting_index(), 1);
        assert_eq!(cancel.screen_offset(), Vec2::new(5.0, 5.0));
        // The source sample keeps its real action.
        assert_eq!(sample.action(), SampleAction::Move);
    }

    #[test]
    #[should_panic(expected = "acting pointer index out of bounds")]
    fn empty_sample_is_rejected() {
        let _ = RawSample::new(SampleAction::Down, vec![], 0);
    }

    #[test]
    #[should_panic(expected = "pointer index out of bounds")]
    fn projecting_missing_slot_is_rejected() {
        let sample = two_finger_sample(SampleAction::Down, 0);
        let _ = sample.project(2);
    }
}
