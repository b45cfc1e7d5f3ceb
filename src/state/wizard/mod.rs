//! Wizard domain: form state, validation, progress, and step transitions

pub mod controller;
pub mod form;
pub mod progress;
pub mod step;
pub mod validate;

pub use controller::{Begin, SaveIntent, SaveOp, WizardController};
pub use form::{
    CloneStatus, CommunicationStyle, DocumentRef, ExpertiseCategory, MediaPrefs,
    PersonalityProfile, PriceRange, Pricing, ResponseLength, WizardForm, PERSONALITY_TRAITS,
    QA_QUESTIONS, QA_QUESTION_COUNT,
};
pub use progress::{completion_percent, first_incomplete_step};
pub use step::WizardStep;
pub use validate::{validate_step, StepValidation};
