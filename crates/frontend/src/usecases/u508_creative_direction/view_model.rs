//! Creative Direction - ViewModel
//!
//! Transient UI state that is not part of the persisted form: undo slot,
//! AI request bookkeeping, uploads in flight.

use super::upload_queue::UploadQueue;
use contracts::usecases::u508_creative_direction::limits::MAX_VISION_LENGTH;
use contracts::usecases::u508_creative_direction::{
    CreativeDirectionState, FormStatePatch, ValidationError, VisionButtonType,
};
use leptos::prelude::*;

/// At most one previous vision.
///
/// `Some("")` is a real entry: undoing a generation from scratch clears the
/// field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndoSlot {
    previous: Option<String>,
}

impl UndoSlot {
    pub fn record(&mut self, previous: impl Into<String>) {
        self.previous = Some(previous.into());
    }

    pub fn can_undo(&self) -> bool {
        self.previous.is_some()
    }

    /// Empties the slot, a second call returns `None`
    pub fn take(&mut self) -> Option<String> {
        self.previous.take()
    }

    pub fn clear(&mut self) {
        self.previous = None;
    }
}

/// Patch replacing the vision with `next`.
///
/// `previous` goes into the undo slot only when `next` is accepted, a rejected
/// text leaves both the state and the slot as they were.
pub fn replace_vision(
    state: &CreativeDirectionState,
    next: String,
    previous: String,
    undo: &mut UndoSlot,
) -> Result<FormStatePatch, String> {
    let patch = FormStatePatch::vision(next);
    state
        .merged(patch.clone())
        .map_err(|_| ValidationError::VisionTooLong { max: MAX_VISION_LENGTH }.to_string())?;
    undo.record(previous);
    Ok(patch)
}

/// Apply an AI result. Generation from scratch records "" so undo clears the field.
pub fn apply_vision_result(
    state: &CreativeDirectionState,
    mode: VisionButtonType,
    vision: String,
    undo: &mut UndoSlot,
) -> Result<FormStatePatch, String> {
    let previous = match mode {
        VisionButtonType::FeelingLucky => String::new(),
        VisionButtonType::Enhance => state.vision.clone(),
    };
    replace_vision(state, vision, previous, undo)
}

/// Patch restoring the recorded vision, `None` when there is nothing to undo
pub fn undo_vision(undo: &mut UndoSlot) -> Option<FormStatePatch> {
    undo.take().map(FormStatePatch::vision)
}

/// Tickets for AI requests: only the latest one may write its response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestFence {
    latest: u64,
}

impl RequestFence {
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.latest
    }

    /// Invalidate every ticket issued so far
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}

/// ViewModel of the creative direction step
#[derive(Clone, Copy)]
pub struct CreativeDirectionVm {
    pub undo: RwSignal<UndoSlot>,
    pub fence: RwSignal<RequestFence>,
    /// AI request running
    pub is_generating: RwSignal<bool>,
    /// Error of the last AI request, shown under the vision field
    pub vision_error: RwSignal<Option<String>>,
    pub uploads: RwSignal<UploadQueue>,
    pub is_dragging: RwSignal<bool>,
    pub is_submitting: RwSignal<bool>,
    /// Bumped by `reset`, dictation in progress is cancelled when it changes
    pub clear_epoch: RwSignal<u64>,
}

impl CreativeDirectionVm {
    pub fn new() -> Self {
        Self {
            undo: RwSignal::new(UndoSlot::default()),
            fence: RwSignal::new(RequestFence::default()),
            is_generating: RwSignal::new(false),
            vision_error: RwSignal::new(None),
            uploads: RwSignal::new(UploadQueue::default()),
            is_dragging: RwSignal::new(false),
            is_submitting: RwSignal::new(false),
            clear_epoch: RwSignal::new(0),
        }
    }

    pub fn can_undo(&self) -> bool {
        self.undo.with(|slot| slot.can_undo())
    }

    /// Start an AI request, returns its ticket
    pub fn begin_generation(&self) -> u64 {
        self.vision_error.set(None);
        self.is_generating.set(true);
        let mut ticket = 0;
        self.fence.update(|fence| ticket = fence.issue());
        ticket
    }

    /// Whether a response may still be applied. Ends the loading state if so.
    pub fn finish_generation(&self, ticket: u64) -> bool {
        if !self.fence.with_untracked(|fence| fence.is_current(ticket)) {
            log::debug!("Dropping stale creative vision response #{}", ticket);
            return false;
        }
        self.is_generating.set(false);
        true
    }

    /// Forget everything transient (used by "Clear")
    pub fn reset(&self) {
        self.undo.update(|slot| slot.clear());
        self.fence.update(|fence| fence.invalidate());
        self.is_generating.set(false);
        self.vision_error.set(None);
        self.uploads.update(|queue| queue.clear());
        self.clear_epoch.update(|epoch| *epoch += 1);
    }
}

impl Default for CreativeDirectionVm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_restores_once() {
        let mut slot = UndoSlot::default();
        assert!(!slot.can_undo());

        // V0 -> V1 by enhance
        let v0 = "Calm and minimal".to_string();
        slot.record(v0.clone());
        assert_eq!(slot.take(), Some(v0));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn test_undo_keeps_single_level() {
        let mut slot = UndoSlot::default();
        slot.record("first");
        slot.record("second");
        assert_eq!(slot.take().as_deref(), Some("second"));
        assert!(!slot.can_undo());
    }

    #[test]
    fn test_undo_of_generation_clears_field() {
        let mut slot = UndoSlot::default();
        slot.record("");
        assert!(slot.can_undo());
        assert_eq!(slot.take().as_deref(), Some(""));
    }

    fn state_with_vision(vision: &str) -> CreativeDirectionState {
        CreativeDirectionState {
            vision: vision.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_enhance_then_undo_restores_previous() {
        let mut slot = UndoSlot::default();
        let v0 = state_with_vision("Calm and minimal");

        let patch = apply_vision_result(
            &v0,
            VisionButtonType::Enhance,
            "Calm, minimal, soft pastels".into(),
            &mut slot,
        )
        .unwrap();
        let v1 = v0.merged(patch).unwrap();
        assert_eq!(v1.vision, "Calm, minimal, soft pastels");

        let v2 = v1.merged(undo_vision(&mut slot).unwrap()).unwrap();
        assert_eq!(v2.vision, "Calm and minimal");
        assert!(undo_vision(&mut slot).is_none());
    }

    #[test]
    fn test_feeling_lucky_undo_clears_field() {
        let mut slot = UndoSlot::default();
        let empty = CreativeDirectionState::default();
        let patch = apply_vision_result(
            &empty,
            VisionButtonType::FeelingLucky,
            "Bold and colorful".into(),
            &mut slot,
        )
        .unwrap();
        let generated = empty.merged(patch).unwrap();

        let undone = generated.merged(undo_vision(&mut slot).unwrap()).unwrap();
        assert_eq!(undone.vision, "");
    }

    #[test]
    fn test_overlong_result_leaves_state_and_slot() {
        let mut slot = UndoSlot::default();
        let v0 = state_with_vision("Keep me");
        let result = apply_vision_result(
            &v0,
            VisionButtonType::Enhance,
            "x".repeat(MAX_VISION_LENGTH + 1),
            &mut slot,
        );
        assert!(result.is_err());
        assert!(!slot.can_undo());
        assert_eq!(v0.vision, "Keep me");

        slot.record("earlier");
        let result = replace_vision(&v0, "y".repeat(MAX_VISION_LENGTH + 1), "Keep me".into(), &mut slot);
        assert!(result.is_err());
        assert_eq!(slot.take().as_deref(), Some("earlier"));
    }

    #[test]
    fn test_fence_drops_stale_ticket() {
        let mut fence = RequestFence::default();
        let first = fence.issue();
        let second = fence.issue();
        assert!(!fence.is_current(first));
        assert!(fence.is_current(second));

        fence.invalidate();
        assert!(!fence.is_current(second));
    }
}
