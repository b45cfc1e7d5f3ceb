//! Completion progress derived from the form state
//!
//! Uses the same section predicates as the validator, with the optional
//! sections (3, 5) and the test step (6) always counted complete.

use super::form::WizardForm;
use super::step::WizardStep;

/// Required sections, probed in flow order. The optional sections never
/// appear here and are never returned as an incomplete destination.
const REQUIRED_STEPS: [WizardStep; 4] = [
    WizardStep::BasicInfo,
    WizardStep::QaTraining,
    WizardStep::PersonaStyle,
    WizardStep::Pricing,
];

fn section_complete(step: WizardStep, form: &WizardForm) -> bool {
    match step {
        WizardStep::BasicInfo => form.basic_info_complete(),
        WizardStep::QaTraining => form.qa_complete(),
        WizardStep::PersonaStyle => form.style_complete(),
        WizardStep::Pricing => form.pricing_complete(),
        // Optional content and the test step always count
        WizardStep::Knowledge | WizardStep::MediaTraining | WizardStep::TestChat => true,
    }
}

/// Overall completion as a rounded percentage of the seven sections
pub fn completion_percent(form: &WizardForm) -> u8 {
    let complete = WizardStep::ALL
        .iter()
        .filter(|step| section_complete(**step, form))
        .count();
    ((complete * 100 + WizardStep::ALL.len() / 2) / WizardStep::ALL.len()) as u8
}

/// The step a resumed session should land on: the first required section
/// that is still incomplete, or the test step when everything is done.
///
/// Sections 3 and 5 are intentionally unreachable here even when the user
/// never opened them.
pub fn first_incomplete_step(form: &WizardForm) -> WizardStep {
    REQUIRED_STEPS
        .into_iter()
        .find(|step| !section_complete(*step, form))
        .unwrap_or(WizardStep::TestChat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::wizard::form::{
        CommunicationStyle, ExpertiseCategory, PriceRange, Pricing, ResponseLength,
    };

    fn form_with_sections(basic: bool, qa: bool, style: bool, pricing: bool) -> WizardForm {
        let mut form = WizardForm::new();
        if basic {
            form.name = "Dr. Chen".to_string();
            form.title = "Coach".to_string();
            form.category = Some(ExpertiseCategory::Coaching);
            form.bio = "Bio".to_string();
        }
        if qa {
            for answer in form.qa_answers.iter_mut() {
                *answer = "Answer".to_string();
            }
        }
        if style {
            form.communication_style = Some(CommunicationStyle::Professional);
            form.response_length = Some(ResponseLength::Concise);
        }
        if pricing {
            form.pricing = Pricing {
                text: PriceRange { min: 5, max: 10 },
                voice: PriceRange { min: 5, max: 10 },
                video: PriceRange { min: 5, max: 10 },
            };
        }
        form
    }

    #[test]
    fn test_empty_form_counts_only_freebie_sections() {
        // Sections 3, 5 and 6 are complete by definition: 3/7 rounds to 43
        assert_eq!(completion_percent(&WizardForm::new()), 43);
    }

    #[test]
    fn test_percent_is_100_iff_all_required_sections_complete() {
        assert_eq!(
            completion_percent(&form_with_sections(true, true, true, true)),
            100
        );
        assert_ne!(
            completion_percent(&form_with_sections(true, true, true, false)),
            100
        );
        assert_ne!(
            completion_percent(&form_with_sections(false, true, true, true)),
            100
        );
    }

    #[test]
    fn test_each_required_section_moves_the_needle() {
        let base = completion_percent(&WizardForm::new());
        let with_basic = completion_percent(&form_with_sections(true, false, false, false));
        assert!(with_basic > base);
        // 4/7 rounds to 57
        assert_eq!(with_basic, 57);
    }

    #[test]
    fn test_first_incomplete_probes_in_flow_order() {
        assert_eq!(
            first_incomplete_step(&WizardForm::new()),
            WizardStep::BasicInfo
        );
        assert_eq!(
            first_incomplete_step(&form_with_sections(true, false, false, false)),
            WizardStep::QaTraining
        );
        assert_eq!(
            first_incomplete_step(&form_with_sections(true, true, false, false)),
            WizardStep::PersonaStyle
        );
        assert_eq!(
            first_incomplete_step(&form_with_sections(true, true, true, false)),
            WizardStep::Pricing
        );
    }

    #[test]
    fn test_complete_form_lands_on_test_step() {
        assert_eq!(
            first_incomplete_step(&form_with_sections(true, true, true, true)),
            WizardStep::TestChat
        );
    }

    #[test]
    fn test_optional_sections_are_never_destinations() {
        // Whatever combination of required sections is missing, the answer
        // is never Knowledge or MediaTraining
        for mask in 0..16u8 {
            let form = form_with_sections(
                mask & 1 != 0,
                mask & 2 != 0,
                mask & 4 != 0,
                mask & 8 != 0,
            );
            let step = first_incomplete_step(&form);
            assert_ne!(step, WizardStep::Knowledge);
            assert_ne!(step, WizardStep::MediaTraining);
        }
    }
}
