use crate::payload::build_booking_payload;
use crate::slot::BookingFormData;
use crate::steps::WizardStep;
use crate::validate::{step_for_field, validate_step, validate_submit, FieldErrors};
use crate::{WizardError, WizardResult};
use safar_core::user::UserProfile;
use serde_json::Value;

/// Multi-booking wizard session: an ordered list of slots, an active-slot
/// cursor, and a step index into the fixed step sequence.
///
/// Slots are only ever appended in this flow, never removed.
#[derive(Debug, Clone)]
pub struct BookingWizard {
    slots: Vec<BookingFormData>,
    active: usize,
    step: usize,
    errors: FieldErrors,
}

impl BookingWizard {
    /// Step 0 with one empty slot.
    pub fn new() -> Self {
        Self {
            slots: vec![BookingFormData::new()],
            active: 0,
            step: 0,
            errors: FieldErrors::new(),
        }
    }

    /// Seed a wizard from pre-filled slots (batch intake). An empty list
    /// still gets the one initial slot.
    pub fn from_slots(slots: Vec<BookingFormData>) -> Self {
        let mut wizard = Self::new();
        if !slots.is_empty() {
            wizard.slots = slots;
        }
        wizard
    }

    pub fn current_step(&self) -> WizardStep {
        WizardStep::from_index(self.step).expect("step index stays in range")
    }

    pub fn step_index(&self) -> usize {
        self.step
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn slots(&self) -> &[BookingFormData] {
        &self.slots
    }

    pub fn active_slot(&self) -> &BookingFormData {
        &self.slots[self.active]
    }

    pub fn active_slot_mut(&mut self) -> &mut BookingFormData {
        &mut self.slots[self.active]
    }

    /// Errors from the last failed `next` or `prepare_submit`.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Validate the current step against the active slot; advance on
    /// success (no-op past the last step), stay and populate the error map
    /// on failure.
    pub fn next(&mut self) -> bool {
        let errors = validate_step(self.current_step(), self.active_slot());
        if !errors.is_empty() {
            self.errors = errors;
            return false;
        }
        self.errors.clear();
        if self.step + 1 < WizardStep::COUNT {
            self.step += 1;
        }
        true
    }

    /// Unconditional decrement, floored at zero. Clears no validation
    /// state.
    pub fn previous(&mut self) {
        self.step = self.step.saturating_sub(1);
    }

    /// Unconditional jump via the step indicator, bypassing validation — a
    /// deliberate escape hatch so earlier steps can be revisited without
    /// being blocked.
    pub fn jump_to_step(&mut self, step: WizardStep) {
        self.step = step.index();
    }

    /// Append a slot pre-populated with the active slot's contact/payment
    /// fields and blank trip fields; make it active; restart at step 0.
    pub fn add_another_booking(&mut self) {
        let slot = self.active_slot().derived_copy();
        self.slots.push(slot);
        self.active = self.slots.len() - 1;
        self.step = 0;
        self.errors.clear();
    }

    /// Change the active slot without altering the step index.
    pub fn switch_slot(&mut self, index: usize) -> WizardResult<()> {
        if index >= self.slots.len() {
            return Err(WizardError::SlotOutOfRange(index));
        }
        self.active = index;
        self.errors.clear();
        Ok(())
    }

    /// Submit-time validation across **every** slot, not just the active
    /// one. On the first failing slot: make it active, jump to the earliest
    /// offending step, populate the error map, and report which slot
    /// blocked.
    pub fn prepare_submit(&mut self) -> WizardResult<()> {
        for index in 0..self.slots.len() {
            let errors = validate_submit(&self.slots[index]);
            if errors.is_empty() {
                continue;
            }
            let target = errors
                .keys()
                .map(|field| step_for_field(field))
                .min_by_key(|step| step.index())
                .unwrap_or(WizardStep::Flights);
            self.active = index;
            self.step = target.index();
            self.errors = errors;
            return Err(WizardError::SubmitBlocked { slot: index });
        }
        self.errors.clear();
        Ok(())
    }

    /// Build one create-request body per slot, in slot order. Pure; call
    /// after `prepare_submit` has passed.
    pub fn build_payloads(&self, user: &UserProfile) -> WizardResult<Vec<Value>> {
        self.slots
            .iter()
            .map(|slot| build_booking_payload(slot, user))
            .collect()
    }

    /// Back to the initial state: one empty slot, step 0, no errors.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for BookingWizard {
    fn default() -> Self {
        Self::new()
    }
}
