pub mod payload;
pub mod slot;
pub mod state;
pub mod steps;
pub mod validate;

pub use slot::BookingFormData;
pub use state::BookingWizard;
pub use steps::WizardStep;

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("{0} is required to create a booking")]
    MissingField(&'static str),
    #[error("Booking slot {0} does not exist")]
    SlotOutOfRange(usize),
    #[error("Booking {} has incomplete required fields", .slot + 1)]
    SubmitBlocked { slot: usize },
}

pub type WizardResult<T> = Result<T, WizardError>;
