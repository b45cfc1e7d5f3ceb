//! Per-step form validation
//!
//! Pure functions over the form state. Validation failure is an expected
//! outcome carried in the result, never an error path.

use super::form::{ExpertiseCategory, WizardForm, QA_QUESTION_COUNT};
use super::step::WizardStep;

/// Outcome of validating one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepValidation {
    pub valid: bool,
    /// Every violated rule for the step, in field order
    pub errors: Vec<String>,
}

impl StepValidation {
    fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validate a single step against the current form state.
///
/// Steps 3, 5 and 6 are always valid: knowledge transfer and media training
/// are optional, and the test step persists nothing.
pub fn validate_step(step: WizardStep, form: &WizardForm) -> StepValidation {
    match step {
        WizardStep::BasicInfo => validate_basic_info(form),
        WizardStep::QaTraining => validate_qa(form),
        WizardStep::Knowledge => StepValidation::ok(),
        WizardStep::PersonaStyle => validate_style(form),
        WizardStep::MediaTraining => StepValidation::ok(),
        WizardStep::TestChat => StepValidation::ok(),
        WizardStep::Pricing => validate_pricing(form),
    }
}

fn validate_basic_info(form: &WizardForm) -> StepValidation {
    let mut errors = Vec::new();

    if form.name.trim().is_empty() {
        errors.push("Name is required".to_string());
    }
    if form.title.trim().is_empty() {
        errors.push("Professional Title is required".to_string());
    }
    match form.category {
        None => errors.push("Expertise Category is required".to_string()),
        Some(ExpertiseCategory::Other) => {
            if form.custom_domain.trim().is_empty() {
                errors.push("Custom Domain is required when 'Other' is selected".to_string());
            }
        }
        Some(_) => {}
    }
    if form.bio.trim().is_empty() {
        errors.push("Bio is required".to_string());
    }

    StepValidation::from_errors(errors)
}

fn validate_qa(form: &WizardForm) -> StepValidation {
    let answered = form.answered_count();
    if answered >= QA_QUESTION_COUNT {
        return StepValidation::ok();
    }
    let remaining = QA_QUESTION_COUNT - answered;
    StepValidation::from_errors(vec![format!(
        "All {QA_QUESTION_COUNT} training questions need an answer ({remaining} remaining)"
    )])
}

fn validate_style(form: &WizardForm) -> StepValidation {
    let mut errors = Vec::new();
    if form.communication_style.is_none() {
        errors.push("Communication Style is required".to_string());
    }
    if form.response_length.is_none() {
        errors.push("Response Length is required".to_string());
    }
    StepValidation::from_errors(errors)
}

fn validate_pricing(form: &WizardForm) -> StepValidation {
    let mut errors = Vec::new();
    for (label, range) in [
        ("Text chat", &form.pricing.text),
        ("Voice call", &form.pricing.voice),
        ("Video call", &form.pricing.video),
    ] {
        if range.min == 0 {
            errors.push(format!("{label} minimum rate must be greater than 0"));
        } else if range.max < range.min {
            errors.push(format!(
                "{label} maximum rate must be at least the minimum"
            ));
        }
    }
    StepValidation::from_errors(errors)
}
