//! Wizard step transitions and the save latch
//!
//! All backend I/O is awaited from the single event loop, so a transition
//! splits into a synchronous `begin_*` (validate, decide, latch) and a
//! `complete_save` that applies the persistence outcome. While the latch is
//! held, every further transition request is ignored; this is what keeps a
//! rapid double "Next" from creating two records.

use super::form::{CloneStatus, WizardForm};
use super::progress::first_incomplete_step;
use super::step::WizardStep;
use super::validate::validate_step;
use crate::backend::CloneRecord;

/// Which persistence call the caller must issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOp {
    /// No record exists yet: create one
    Create,
    /// A record exists: update it in place
    Update(String),
}

/// What the latched save was started for; returned by `complete_save` so
/// the caller knows how to proceed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveIntent {
    /// Advance to the next step on success
    Advance,
    /// Leave the wizard once the save lands (Save & Exit)
    Exit,
    /// Final submit: run the denormalization writes, then leave
    Submit,
}

/// Outcome of a `begin_*` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Begin {
    /// A save is already in flight; the request is a no-op
    Blocked,
    /// Validation failed; the step does not change
    Invalid(Vec<String>),
    /// Proceed: issue this persistence call, then report back through
    /// `complete_save`
    Save(SaveOp),
}

/// Drives the seven-step creation flow over a [`WizardForm`]
#[derive(Debug, Default)]
pub struct WizardController {
    form: WizardForm,
    step: WizardStep,
    pending: Option<SaveIntent>,
}

impl WizardController {
    /// Fresh wizard at step 1 with an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume editing an existing record; lands on the first required
    /// section that is still incomplete
    pub fn from_record(record: &CloneRecord) -> Self {
        let form = WizardForm::from_record(record);
        let step = first_incomplete_step(&form);
        Self {
            form,
            step,
            pending: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn form(&self) -> &WizardForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut WizardForm {
        &mut self.form
    }

    /// True while a save is in flight and transitions are latched out
    pub fn is_saving(&self) -> bool {
        self.pending.is_some()
    }

    fn save_op(&self) -> SaveOp {
        match self.form.created_clone_id() {
            Some(id) => SaveOp::Update(id.to_string()),
            None => SaveOp::Create,
        }
    }

    /// Request an advance to the next step. Validates the current step and
    /// latches a save when it passes.
    pub fn begin_next(&mut self) -> Begin {
        if self.pending.is_some() {
            return Begin::Blocked;
        }
        let validation = validate_step(self.step, &self.form);
        if !validation.valid {
            return Begin::Invalid(validation.errors);
        }
        self.pending = Some(SaveIntent::Advance);
        Begin::Save(self.save_op())
    }

    /// Step back. Never validates, never persists, clamps at step 1.
    pub fn previous(&mut self) {
        if self.pending.is_some() {
            return;
        }
        self.step = self.step.prev();
    }

    /// Save whatever is in the form and leave the wizard, valid or not
    pub fn begin_save_exit(&mut self) -> Begin {
        if self.pending.is_some() {
            return Begin::Blocked;
        }
        self.pending = Some(SaveIntent::Exit);
        Begin::Save(self.save_op())
    }

    /// Final submit with the user's chosen status. Only reachable on the
    /// pricing step, and only when it validates.
    pub fn begin_submit(&mut self, status: CloneStatus) -> Begin {
        if self.pending.is_some() || !self.step.is_last() {
            return Begin::Blocked;
        }
        let validation = validate_step(self.step, &self.form);
        if !validation.valid {
            return Begin::Invalid(validation.errors);
        }
        self.form.status = status;
        self.pending = Some(SaveIntent::Submit);
        Begin::Save(self.save_op())
    }

    /// Apply the persistence outcome for the latched save.
    ///
    /// On success the record id is stored (first create only) and the step
    /// advances if the save was for a Next transition. On failure nothing
    /// moves: the step and form are untouched and the user may retry.
    pub fn complete_save(&mut self, outcome: Result<String, String>) -> Result<SaveIntent, String> {
        let Some(intent) = self.pending.take() else {
            return Err("no save in flight".to_string());
        };
        match outcome {
            Ok(id) => {
                self.form.record_saved(id);
                if intent == SaveIntent::Advance {
                    self.step = self.step.next();
                }
                Ok(intent)
            }
            Err(message) => Err(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendService, CloneDraft, MockBackendService};
    use crate::state::wizard::form::{
        CommunicationStyle, ExpertiseCategory, PriceRange, Pricing, ResponseLength,
    };

    fn fill_basic_info(form: &mut WizardForm) {
        form.name = "Dr. Chen".to_string();
        form.title = "Coach".to_string();
        form.category = Some(ExpertiseCategory::Coaching);
        form.bio = "Executive coach.".to_string();
    }

    fn fill_qa(form: &mut WizardForm) {
        for answer in form.qa_answers.iter_mut() {
            *answer = "An answer".to_string();
        }
    }

    fn fill_pricing(form: &mut WizardForm) {
        form.pricing = Pricing {
            text: PriceRange { min: 10, max: 20 },
            voice: PriceRange { min: 20, max: 40 },
            video: PriceRange { min: 40, max: 80 },
        };
    }

    fn expect_save(begin: Begin) -> SaveOp {
        match begin {
            Begin::Save(op) => op,
            other => panic!("expected a save, got {other:?}"),
        }
    }

    /// Issue the latched persistence call against a backend, mirroring how
    /// the application shell drives the controller
    async fn run_save(
        ctrl: &mut WizardController,
        backend: &mut (impl BackendService + ?Sized),
        op: SaveOp,
    ) -> Result<SaveIntent, String> {
        let draft: CloneDraft = ctrl.form().to_draft();
        let outcome = match op {
            SaveOp::Create => backend.create_clone(&draft).await.map_err(|e| e.to_string()),
            SaveOp::Update(id) => backend
                .update_clone(&id, &draft)
                .await
                .map(|()| id)
                .map_err(|e| e.to_string()),
        };
        ctrl.complete_save(outcome)
    }

    mod transitions {
        use super::*;

        #[test]
        fn test_invalid_step_blocks_next_and_keeps_step() {
            let mut ctrl = WizardController::new();
            let begin = ctrl.begin_next();
            let Begin::Invalid(errors) = begin else {
                panic!("expected validation failure");
            };
            assert!(errors.contains(&"Name is required".to_string()));
            assert_eq!(ctrl.step(), WizardStep::BasicInfo);
            assert!(!ctrl.is_saving());
        }

        #[test]
        fn test_custom_domain_scenario_stays_on_step_one() {
            let mut ctrl = WizardController::new();
            fill_basic_info(ctrl.form_mut());
            ctrl.form_mut().category = Some(ExpertiseCategory::Other);
            ctrl.form_mut().custom_domain = String::new();

            let Begin::Invalid(errors) = ctrl.begin_next() else {
                panic!("expected validation failure");
            };
            assert!(errors
                .contains(&"Custom Domain is required when 'Other' is selected".to_string()));
            assert_eq!(ctrl.step(), WizardStep::BasicInfo);
        }

        #[test]
        fn test_valid_next_latches_then_advances_on_success() {
            let mut ctrl = WizardController::new();
            fill_basic_info(ctrl.form_mut());

            let op = expect_save(ctrl.begin_next());
            assert_eq!(op, SaveOp::Create);
            assert!(ctrl.is_saving());

            let intent = ctrl.complete_save(Ok("clone-1".to_string())).unwrap();
            assert_eq!(intent, SaveIntent::Advance);
            assert_eq!(ctrl.step(), WizardStep::QaTraining);
            assert_eq!(ctrl.form().created_clone_id(), Some("clone-1"));
            assert!(!ctrl.is_saving());
        }

        #[test]
        fn test_second_next_is_blocked_while_save_pending() {
            let mut ctrl = WizardController::new();
            fill_basic_info(ctrl.form_mut());

            expect_save(ctrl.begin_next());
            assert_eq!(ctrl.begin_next(), Begin::Blocked);
            assert_eq!(ctrl.begin_save_exit(), Begin::Blocked);
        }

        #[test]
        fn test_failed_save_releases_latch_without_moving() {
            let mut ctrl = WizardController::new();
            fill_basic_info(ctrl.form_mut());

            expect_save(ctrl.begin_next());
            let err = ctrl
                .complete_save(Err("network unreachable".to_string()))
                .unwrap_err();
            assert_eq!(err, "network unreachable");
            assert_eq!(ctrl.step(), WizardStep::BasicInfo);
            assert!(ctrl.form().created_clone_id().is_none());

            // Retry works after the failure
            let op = expect_save(ctrl.begin_next());
            assert_eq!(op, SaveOp::Create);
        }

        #[test]
        fn test_previous_never_validates_or_persists() {
            let mut ctrl = WizardController::new();
            ctrl.previous();
            assert_eq!(ctrl.step(), WizardStep::BasicInfo);

            fill_basic_info(ctrl.form_mut());
            expect_save(ctrl.begin_next());
            ctrl.complete_save(Ok("clone-1".to_string())).unwrap();
            assert_eq!(ctrl.step(), WizardStep::QaTraining);

            ctrl.previous();
            assert_eq!(ctrl.step(), WizardStep::BasicInfo);
        }

        #[test]
        fn test_save_exit_works_with_invalid_form() {
            let mut ctrl = WizardController::new();
            let op = expect_save(ctrl.begin_save_exit());
            assert_eq!(op, SaveOp::Create);
            let intent = ctrl.complete_save(Ok("clone-1".to_string())).unwrap();
            assert_eq!(intent, SaveIntent::Exit);
            // Step never moves on Save & Exit
            assert_eq!(ctrl.step(), WizardStep::BasicInfo);
        }

        #[test]
        fn test_submit_requires_pricing_step() {
            let mut ctrl = WizardController::new();
            assert_eq!(ctrl.begin_submit(CloneStatus::Published), Begin::Blocked);
        }

        #[test]
        fn test_submit_validates_pricing() {
            let mut ctrl = WizardController::new();
            fill_basic_info(ctrl.form_mut());
            // Walk to step 7 via save/advance cycles
            while ctrl.step() != WizardStep::Pricing {
                fill_qa(ctrl.form_mut());
                ctrl.form_mut().communication_style = Some(CommunicationStyle::Direct);
                ctrl.form_mut().response_length = Some(ResponseLength::Concise);
                expect_save(ctrl.begin_next());
                ctrl.complete_save(Ok("clone-1".to_string())).unwrap();
            }

            let Begin::Invalid(errors) = ctrl.begin_submit(CloneStatus::Published) else {
                panic!("expected invalid pricing");
            };
            assert_eq!(errors.len(), 3);
            assert_eq!(ctrl.form().status, CloneStatus::Draft);

            fill_pricing(ctrl.form_mut());
            let op = expect_save(ctrl.begin_submit(CloneStatus::Published));
            assert_eq!(op, SaveOp::Update("clone-1".to_string()));
            assert_eq!(ctrl.form().status, CloneStatus::Published);

            let intent = ctrl.complete_save(Ok("clone-1".to_string())).unwrap();
            assert_eq!(intent, SaveIntent::Submit);
        }

        #[test]
        fn test_complete_save_without_pending_is_an_error() {
            let mut ctrl = WizardController::new();
            assert!(ctrl.complete_save(Ok("clone-1".to_string())).is_err());
        }
    }

    mod persistence {
        use super::*;

        #[tokio::test]
        async fn test_exactly_one_create_across_two_next_transitions() {
            let mut backend = MockBackendService::new();
            backend
                .expect_create_clone()
                .times(1)
                .returning(|_| Ok("clone-1".to_string()));
            backend
                .expect_update_clone()
                .times(1)
                .returning(|_, _| Ok(()));

            let mut ctrl = WizardController::new();
            fill_basic_info(ctrl.form_mut());

            let op = expect_save(ctrl.begin_next());
            run_save(&mut ctrl, &mut backend, op).await.unwrap();
            assert_eq!(ctrl.step(), WizardStep::QaTraining);

            fill_qa(ctrl.form_mut());
            let op = expect_save(ctrl.begin_next());
            assert_eq!(op, SaveOp::Update("clone-1".to_string()));
            run_save(&mut ctrl, &mut backend, op).await.unwrap();
            assert_eq!(ctrl.step(), WizardStep::Knowledge);

            backend.checkpoint();
        }

        #[tokio::test]
        async fn test_coaching_scenario_creates_once_and_advances() {
            let mut backend = MockBackendService::new();
            backend
                .expect_create_clone()
                .times(1)
                .withf(|draft| draft.category == "coaching" && draft.custom_domain.is_none())
                .returning(|_| Ok("clone-7".to_string()));

            let mut ctrl = WizardController::new();
            fill_basic_info(ctrl.form_mut());
            ctrl.form_mut().custom_domain = String::new();

            let op = expect_save(ctrl.begin_next());
            run_save(&mut ctrl, &mut backend, op).await.unwrap();

            assert_eq!(ctrl.step(), WizardStep::QaTraining);
            assert_eq!(ctrl.form().created_clone_id(), Some("clone-7"));
        }

        #[test]
        fn test_backend_failure_leaves_controller_retryable() {
            tokio_test::block_on(async {
                let mut backend = MockBackendService::new();
                backend.expect_create_clone().times(2).returning(|_| {
                    Err(crate::backend::BackendError::Api {
                        status: 503,
                        message: "storage quota exceeded".to_string(),
                    })
                });

                let mut ctrl = WizardController::new();
                fill_basic_info(ctrl.form_mut());

                let op = expect_save(ctrl.begin_next());
                let err = run_save(&mut ctrl, &mut backend, op).await.unwrap_err();
                assert!(err.contains("storage quota exceeded"));
                assert_eq!(ctrl.step(), WizardStep::BasicInfo);

                // Second attempt is still a create: no phantom record id
                let op = expect_save(ctrl.begin_next());
                assert_eq!(op, SaveOp::Create);
                run_save(&mut ctrl, &mut backend, op).await.unwrap_err();
            });
        }
    }

    mod hydration {
        use super::*;
        use crate::backend::CloneRecord;
        use crate::state::wizard::form::PersonalityProfile;

        fn record_missing_style() -> CloneRecord {
            CloneRecord {
                id: "clone-3".to_string(),
                name: "Dr. Chen".to_string(),
                title: "Coach".to_string(),
                bio: "Bio".to_string(),
                category: "coaching".to_string(),
                custom_domain: None,
                avatar_url: None,
                personality: PersonalityProfile::default(),
                communication_style: None,
                response_length: None,
                pricing: Pricing {
                    text: PriceRange { min: 5, max: 10 },
                    voice: PriceRange { min: 5, max: 10 },
                    video: PriceRange { min: 5, max: 10 },
                },
                enable_audio: false,
                enable_video: false,
                status: CloneStatus::Draft,
                qa: crate::state::wizard::form::QA_QUESTIONS
                    .iter()
                    .map(|q| crate::backend::QaEntry {
                        question: (*q).to_string(),
                        answer: "Answered".to_string(),
                    })
                    .collect(),
                documents: vec![],
                links: vec![],
                created_at: None,
                updated_at: None,
            }
        }

        #[test]
        fn test_from_record_lands_on_first_incomplete_step() {
            let ctrl = WizardController::from_record(&record_missing_style());
            assert_eq!(ctrl.step(), WizardStep::PersonaStyle);
            assert_eq!(ctrl.form().created_clone_id(), Some("clone-3"));
        }

        #[test]
        fn test_hydrated_controller_saves_as_update() {
            let mut ctrl = WizardController::from_record(&record_missing_style());
            ctrl.form_mut().communication_style = Some(CommunicationStyle::Friendly);
            ctrl.form_mut().response_length = Some(ResponseLength::Detailed);

            let op = expect_save(ctrl.begin_next());
            assert_eq!(op, SaveOp::Update("clone-3".to_string()));
        }
    }
}
