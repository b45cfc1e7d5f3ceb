//! Application state definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::wizard::{
    CloneStatus, CommunicationStyle, ResponseLength, WizardController, WizardStep,
    QA_QUESTION_COUNT,
};
use crate::backend::{ChatTurnDto, KnowledgeStatus};

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    /// Splash screen with logo animation
    Splash,
    #[default]
    Clones,
    CloneDetail,
    Wizard,
    Chat,
    Config,
}

/// View parameters for navigation
#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub struct ViewParams {
    pub clone_id: Option<String>,
}

/// Sort field for the clone grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CloneSortField {
    #[default]
    Name,
    Category,
    CreatedAt,
    Status,
}

impl CloneSortField {
    pub fn next(&self) -> Self {
        match self {
            Self::Name => Self::Category,
            Self::Category => Self::CreatedAt,
            Self::CreatedAt => Self::Status,
            Self::Status => Self::Name,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Category => "Category",
            Self::CreatedAt => "Created",
            Self::Status => "Status",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "name" => Some(Self::Name),
            "category" => Some(Self::Category),
            "created" => Some(Self::CreatedAt),
            "status" => Some(Self::Status),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Category => "category",
            Self::CreatedAt => "created",
            Self::Status => "status",
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }
}

/// Clone list entry as returned by the row store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloneSummary {
    pub id: String,
    pub name: String,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub status: CloneStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Who said a chat line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Clone,
}

/// One line in the conversation log
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

impl ChatTurn {
    pub fn to_dto(&self) -> ChatTurnDto {
        ChatTurnDto {
            role: match self.role {
                ChatRole::User => "user".to_string(),
                ChatRole::Clone => "assistant".to_string(),
            },
            content: self.text.clone(),
        }
    }
}

/// Main application state
#[derive(Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_params: ViewParams,
    pub view_history: Vec<(View, ViewParams)>,

    // Clone data
    pub clones: Vec<CloneSummary>,
    pub selected_clone_id: Option<String>,

    // Selection
    pub selected_index: usize,
    pub scroll_offset: usize,

    // Sorting / filters
    pub clone_sort_field: CloneSortField,
    pub clone_sort_direction: SortDirection,
    pub show_drafts: bool,

    // UI state
    pub backend_connected: bool,
    pub confirm_delete: Option<String>,
    errors: Vec<String>,

    // Wizard
    pub wizard: WizardController,
    pub wizard_active_field: usize,
    pub wizard_selected_button: usize,
    pub knowledge_status: Option<KnowledgeStatus>,
    pub doc_path_input: String,
    pub link_input: String,

    // Chat (test step and standalone view share this)
    pub chat_log: Vec<ChatTurn>,
    pub chat_input: String,
    pub chat_pending: bool,
    pub chat_prompt: String,
    pub chat_clone_name: String,
}

impl AppState {
    // ---- error queue -------------------------------------------------

    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        if !self.errors.is_empty() {
            self.errors.remove(0);
        }
    }

    // ---- clone list --------------------------------------------------

    /// Clones visible under the current filter, in sort order
    pub fn sorted_clones(&self) -> Vec<&CloneSummary> {
        let mut clones: Vec<_> = self
            .clones
            .iter()
            .filter(|c| self.show_drafts || c.status == CloneStatus::Published)
            .collect();

        clones.sort_by(|a, b| {
            let cmp = match self.clone_sort_field {
                CloneSortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                CloneSortField::Category => a.category.cmp(&b.category),
                CloneSortField::CreatedAt => a.created_at.cmp(&b.created_at),
                CloneSortField::Status => a.status.label().cmp(b.status.label()),
            };
            match self.clone_sort_direction {
                SortDirection::Asc => cmp,
                SortDirection::Desc => cmp.reverse(),
            }
        });

        clones
    }

    pub fn selected_clone(&self) -> Option<&CloneSummary> {
        let id = self.selected_clone_id.as_deref()?;
        self.clones.iter().find(|c| c.id == id)
    }

    pub fn cycle_clone_sort_field(&mut self) {
        self.clone_sort_field = self.clone_sort_field.next();
        self.reset_selection();
    }

    pub fn toggle_clone_sort_direction(&mut self) {
        self.clone_sort_direction = self.clone_sort_direction.toggle();
        self.reset_selection();
    }

    // ---- grid selection ----------------------------------------------

    pub fn move_selection_down(&mut self, columns: usize, total: usize) {
        if columns == 0 || total == 0 {
            return;
        }
        let new_index = self.selected_index + columns;
        if new_index < total {
            self.selected_index = new_index;
        } else if self.selected_index / columns < (total - 1) / columns {
            self.selected_index = total - 1;
        }
    }

    pub fn move_selection_up(&mut self, columns: usize) {
        if columns == 0 {
            return;
        }
        if self.selected_index >= columns {
            self.selected_index -= columns;
        }
    }

    pub fn move_selection_left(&mut self, columns: usize) {
        if columns == 0 {
            return;
        }
        if self.selected_index % columns > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_right(&mut self, columns: usize, total: usize) {
        if columns == 0 || total == 0 {
            return;
        }
        if self.selected_index % columns < columns - 1 && self.selected_index + 1 < total {
            self.selected_index += 1;
        }
    }

    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    // ---- wizard field focus ------------------------------------------

    /// Fields on the current wizard step, including the trailing action row
    pub fn wizard_field_count(&self) -> usize {
        match self.wizard.step() {
            // name, title, category, custom domain, bio, avatar path, actions
            WizardStep::BasicInfo => 7,
            WizardStep::QaTraining => QA_QUESTION_COUNT + 1,
            // document path, link URL, actions
            WizardStep::Knowledge => 3,
            // five sliders, style, length, actions
            WizardStep::PersonaStyle => 8,
            // audio toggle, video toggle, actions
            WizardStep::MediaTraining => 3,
            // message input, actions
            WizardStep::TestChat => 2,
            // three min/max pairs, actions
            WizardStep::Pricing => 7,
        }
    }

    /// Index of the action row on the current step
    pub fn wizard_action_row(&self) -> usize {
        self.wizard_field_count() - 1
    }

    pub fn wizard_on_action_row(&self) -> bool {
        self.wizard_active_field == self.wizard_action_row()
    }

    /// Buttons on the action row: Back / Save & Exit / Next, with the last
    /// step swapping Next for Save Draft / Publish
    pub fn wizard_button_count(&self) -> usize {
        if self.wizard.step().is_last() {
            4
        } else {
            3
        }
    }

    pub fn wizard_next_field(&mut self) {
        self.wizard_active_field = (self.wizard_active_field + 1) % self.wizard_field_count();
    }

    pub fn wizard_prev_field(&mut self) {
        if self.wizard_active_field == 0 {
            self.wizard_active_field = self.wizard_field_count() - 1;
        } else {
            self.wizard_active_field -= 1;
        }
    }

    pub fn wizard_next_button(&mut self) {
        self.wizard_selected_button = (self.wizard_selected_button + 1) % self.wizard_button_count();
    }

    pub fn wizard_prev_button(&mut self) {
        if self.wizard_selected_button == 0 {
            self.wizard_selected_button = self.wizard_button_count() - 1;
        } else {
            self.wizard_selected_button -= 1;
        }
    }

    /// Reset field focus after a step change
    pub fn wizard_reset_focus(&mut self) {
        self.wizard_active_field = 0;
        self.wizard_selected_button = 0;
    }

    // ---- wizard input routing ----------------------------------------

    /// Route a typed character into the field under focus
    pub fn wizard_input_char(&mut self, c: char) {
        let field = self.wizard_active_field;
        if self.wizard_on_action_row() {
            return;
        }
        match self.wizard.step() {
            WizardStep::BasicInfo => {
                let form = self.wizard.form_mut();
                match field {
                    0 => form.name.push(c),
                    1 => form.title.push(c),
                    // category is cycled with arrow keys
                    2 => {}
                    3 => form.custom_domain.push(c),
                    4 => form.bio.push(c),
                    5 => form.avatar_path.push(c),
                    _ => {}
                }
            }
            WizardStep::QaTraining => {
                if let Some(answer) = self.wizard.form_mut().qa_answers.get_mut(field) {
                    answer.push(c);
                }
            }
            WizardStep::Knowledge => match field {
                0 => self.doc_path_input.push(c),
                1 => self.link_input.push(c),
                _ => {}
            },
            WizardStep::PersonaStyle | WizardStep::MediaTraining => {
                // sliders, choices and toggles react to arrows and space
            }
            WizardStep::TestChat => {
                if field == 0 {
                    self.chat_input.push(c);
                }
            }
            WizardStep::Pricing => {
                if let Some(digit) = c.to_digit(10) {
                    let range = self.wizard.form_mut().pricing.range_mut(field / 2);
                    let slot = if field % 2 == 0 {
                        &mut range.min
                    } else {
                        &mut range.max
                    };
                    *slot = (*slot).saturating_mul(10).saturating_add(digit).min(99_999);
                }
            }
        }
    }

    /// Remove the last character from the field under focus
    pub fn wizard_backspace(&mut self) {
        let field = self.wizard_active_field;
        if self.wizard_on_action_row() {
            return;
        }
        match self.wizard.step() {
            WizardStep::BasicInfo => {
                let form = self.wizard.form_mut();
                match field {
                    0 => {
                        form.name.pop();
                    }
                    1 => {
                        form.title.pop();
                    }
                    2 => {}
                    3 => {
                        form.custom_domain.pop();
                    }
                    4 => {
                        form.bio.pop();
                    }
                    5 => {
                        form.avatar_path.pop();
                    }
                    _ => {}
                }
            }
            WizardStep::QaTraining => {
                if let Some(answer) = self.wizard.form_mut().qa_answers.get_mut(field) {
                    answer.pop();
                }
            }
            WizardStep::Knowledge => match field {
                0 => {
                    self.doc_path_input.pop();
                }
                1 => {
                    self.link_input.pop();
                }
                _ => {}
            },
            WizardStep::PersonaStyle | WizardStep::MediaTraining => {}
            WizardStep::TestChat => {
                if field == 0 {
                    self.chat_input.pop();
                }
            }
            WizardStep::Pricing => {
                let range = self.wizard.form_mut().pricing.range_mut(field / 2);
                let slot = if field % 2 == 0 {
                    &mut range.min
                } else {
                    &mut range.max
                };
                *slot /= 10;
            }
        }
    }

    /// Left/Right arrows: adjust the slider, choice or toggle under focus
    pub fn wizard_adjust(&mut self, delta: i16) {
        let field = self.wizard_active_field;
        if self.wizard_on_action_row() {
            return;
        }
        match self.wizard.step() {
            WizardStep::BasicInfo => {
                if field == 2 {
                    let form = self.wizard.form_mut();
                    form.category = Some(match (form.category, delta >= 0) {
                        (Some(cat), true) => cat.next(),
                        (Some(cat), false) => cat.prev(),
                        (None, true) => super::wizard::ExpertiseCategory::ALL[0],
                        (None, false) => super::wizard::ExpertiseCategory::Other,
                    });
                }
            }
            WizardStep::PersonaStyle => {
                let form = self.wizard.form_mut();
                match field {
                    0..=4 => form.personality.adjust(field, delta * 5),
                    5 => {
                        form.communication_style =
                            Some(cycle(&CommunicationStyle::ALL, form.communication_style, delta));
                    }
                    6 => {
                        form.response_length =
                            Some(cycle(&ResponseLength::ALL, form.response_length, delta));
                    }
                    _ => {}
                }
            }
            WizardStep::MediaTraining => self.wizard_toggle(),
            _ => {}
        }
    }

    /// Space: flip the toggle under focus on the media step
    pub fn wizard_toggle(&mut self) {
        if self.wizard.step() != WizardStep::MediaTraining {
            return;
        }
        let form = self.wizard.form_mut();
        match self.wizard_active_field {
            0 => form.media.enable_audio = !form.media.enable_audio,
            1 => form.media.enable_video = !form.media.enable_video,
            _ => {}
        }
    }

    // ---- chat ---------------------------------------------------------

    /// Start a fresh conversation against the given prompt
    pub fn reset_chat(&mut self, clone_name: String, prompt: String) {
        self.chat_log.clear();
        self.chat_input.clear();
        self.chat_pending = false;
        self.chat_clone_name = clone_name;
        self.chat_prompt = prompt;
        self.scroll_offset = 0;
    }

    /// History DTOs for the next chat request (everything said so far)
    pub fn chat_history(&self) -> Vec<ChatTurnDto> {
        self.chat_log.iter().map(ChatTurn::to_dto).collect()
    }
}

/// Step through an enum's value list; `None` starts at the first entry
fn cycle<T: Copy + PartialEq>(all: &[T], current: Option<T>, delta: i16) -> T {
    let len = all.len();
    match current {
        None => {
            if delta >= 0 {
                all[0]
            } else {
                all[len - 1]
            }
        }
        Some(value) => {
            let idx = all.iter().position(|v| *v == value).unwrap_or(0);
            let next = if delta >= 0 {
                (idx + 1) % len
            } else {
                (idx + len - 1) % len
            };
            all[next]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str, name: &str, status: CloneStatus) -> CloneSummary {
        CloneSummary {
            id: id.to_string(),
            name: name.to_string(),
            title: "Coach".to_string(),
            category: "coaching".to_string(),
            status,
            created_at: None,
            updated_at: None,
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn test_error_queue_is_fifo() {
            let mut state = AppState::default();
            assert!(!state.has_errors());

            state.push_error("first");
            state.push_error("second");
            assert_eq!(state.current_error(), Some("first"));

            state.dismiss_error();
            assert_eq!(state.current_error(), Some("second"));

            state.dismiss_error();
            assert!(!state.has_errors());

            // Dismissing an empty queue must not panic
            state.dismiss_error();
        }
    }

    mod clone_list {
        use super::*;

        #[test]
        fn test_draft_filter_hides_unpublished() {
            let mut state = AppState::default();
            state.clones = vec![
                summary("a", "Alpha", CloneStatus::Draft),
                summary("b", "Beta", CloneStatus::Published),
            ];

            state.show_drafts = true;
            assert_eq!(state.sorted_clones().len(), 2);

            state.show_drafts = false;
            let visible = state.sorted_clones();
            assert_eq!(visible.len(), 1);
            assert_eq!(visible[0].id, "b");
        }

        #[test]
        fn test_name_sort_is_case_insensitive() {
            let mut state = AppState::default();
            state.clones = vec![
                summary("a", "zeta", CloneStatus::Published),
                summary("b", "Alpha", CloneStatus::Published),
            ];
            state.show_drafts = true;

            let sorted = state.sorted_clones();
            assert_eq!(sorted[0].name, "Alpha");

            state.clone_sort_direction = SortDirection::Desc;
            let sorted = state.sorted_clones();
            assert_eq!(sorted[0].name, "zeta");
        }

        #[test]
        fn test_selected_clone_follows_id() {
            let mut state = AppState::default();
            state.clones = vec![summary("a", "Alpha", CloneStatus::Draft)];
            assert!(state.selected_clone().is_none());

            state.selected_clone_id = Some("a".to_string());
            assert_eq!(state.selected_clone().map(|c| c.name.as_str()), Some("Alpha"));
        }
    }

    mod grid_selection {
        use super::*;

        #[test]
        fn test_down_moves_by_row_and_clamps() {
            let mut state = AppState::default();
            state.move_selection_down(3, 7);
            assert_eq!(state.selected_index, 3);
            state.move_selection_down(3, 7);
            assert_eq!(state.selected_index, 6);
            // Bottom row: stays put
            state.move_selection_down(3, 7);
            assert_eq!(state.selected_index, 6);
        }

        #[test]
        fn test_down_to_short_last_row_snaps_to_last() {
            let mut state = AppState::default();
            state.selected_index = 2;
            state.move_selection_down(3, 4);
            assert_eq!(state.selected_index, 3);
        }

        #[test]
        fn test_left_right_stay_within_row() {
            let mut state = AppState::default();
            state.selected_index = 3;
            state.move_selection_left(3);
            assert_eq!(state.selected_index, 3); // first column

            state.move_selection_right(3, 5);
            assert_eq!(state.selected_index, 4);
            state.move_selection_right(3, 5);
            assert_eq!(state.selected_index, 4); // no item beyond
        }
    }

    mod wizard_focus {
        use super::*;

        #[test]
        fn test_field_cycling_wraps() {
            let mut state = AppState::default();
            let count = state.wizard_field_count();
            assert_eq!(count, 7); // basic info

            for _ in 0..count {
                state.wizard_next_field();
            }
            assert_eq!(state.wizard_active_field, 0);

            state.wizard_prev_field();
            assert_eq!(state.wizard_active_field, count - 1);
            assert!(state.wizard_on_action_row());
        }

        #[test]
        fn test_button_count_grows_on_last_step() {
            let state = AppState::default();
            assert_eq!(state.wizard_button_count(), 3);
        }
    }

    mod wizard_input {
        use super::*;
        use crate::state::wizard::{Begin, ExpertiseCategory};

        fn seed_valid_step(state: &mut AppState, step: WizardStep) {
            let form = state.wizard.form_mut();
            match step {
                WizardStep::BasicInfo => {
                    form.name = "N".to_string();
                    form.title = "T".to_string();
                    form.category = Some(ExpertiseCategory::Legal);
                    form.bio = "B".to_string();
                }
                WizardStep::QaTraining => {
                    for answer in form.qa_answers.iter_mut() {
                        *answer = "A".to_string();
                    }
                }
                WizardStep::PersonaStyle => {
                    form.communication_style = Some(CommunicationStyle::Direct);
                    form.response_length = Some(ResponseLength::Concise);
                }
                _ => {}
            }
        }

        fn walk_to(state: &mut AppState, target: WizardStep) {
            while state.wizard.step() != target {
                let step = state.wizard.step();
                seed_valid_step(state, step);
                match state.wizard.begin_next() {
                    Begin::Save(_) => {
                        state
                            .wizard
                            .complete_save(Ok("clone-1".to_string()))
                            .unwrap();
                    }
                    other => panic!("expected save, got {other:?}"),
                }
            }
        }

        #[test]
        fn test_chars_route_to_active_basic_info_field() {
            let mut state = AppState::default();
            for c in "Dr".chars() {
                state.wizard_input_char(c);
            }
            assert_eq!(state.wizard.form().name, "Dr");

            state.wizard_active_field = 4;
            state.wizard_input_char('b');
            assert_eq!(state.wizard.form().bio, "b");

            state.wizard_backspace();
            assert!(state.wizard.form().bio.is_empty());
        }

        #[test]
        fn test_category_cycles_with_arrows() {
            let mut state = AppState::default();
            state.wizard_active_field = 2;
            state.wizard_adjust(1);
            assert_eq!(
                state.wizard.form().category,
                Some(ExpertiseCategory::Coaching)
            );
            state.wizard_adjust(-1);
            assert_eq!(state.wizard.form().category, Some(ExpertiseCategory::Other));
        }

        #[test]
        fn test_pricing_digits_build_numbers() {
            let mut state = AppState::default();
            walk_to(&mut state, WizardStep::Pricing);

            state.wizard_active_field = 0; // text min
            state.wizard_input_char('2');
            state.wizard_input_char('5');
            assert_eq!(state.wizard.form().pricing.text.min, 25);

            state.wizard_backspace();
            assert_eq!(state.wizard.form().pricing.text.min, 2);

            state.wizard_active_field = 5; // video max
            state.wizard_input_char('9');
            assert_eq!(state.wizard.form().pricing.video.max, 9);
        }

        #[test]
        fn test_sliders_adjust_and_clamp() {
            let mut state = AppState::default();
            walk_to(&mut state, WizardStep::PersonaStyle);

            state.wizard_active_field = 0;
            state.wizard_adjust(1);
            assert_eq!(state.wizard.form().personality.warmth, 55);

            for _ in 0..20 {
                state.wizard_adjust(1);
            }
            assert_eq!(state.wizard.form().personality.warmth, 100);
        }

        #[test]
        fn test_media_toggles_flip_with_space() {
            let mut state = AppState::default();
            walk_to(&mut state, WizardStep::MediaTraining);

            state.wizard_active_field = 0;
            state.wizard_toggle();
            assert!(state.wizard.form().media.enable_audio);

            state.wizard_active_field = 1;
            state.wizard_toggle();
            state.wizard_toggle();
            assert!(!state.wizard.form().media.enable_video);
        }
    }

    mod chat {
        use super::*;

        #[test]
        fn test_reset_chat_clears_previous_session() {
            let mut state = AppState::default();
            state.chat_log.push(ChatTurn {
                role: ChatRole::User,
                text: "hello".to_string(),
            });
            state.chat_input = "draft".to_string();
            state.chat_pending = true;

            state.reset_chat("Dr. Chen".to_string(), "You are Dr. Chen.".to_string());
            assert!(state.chat_log.is_empty());
            assert!(state.chat_input.is_empty());
            assert!(!state.chat_pending);
            assert_eq!(state.chat_clone_name, "Dr. Chen");
        }

        #[test]
        fn test_history_maps_roles_to_wire_names() {
            let mut state = AppState::default();
            state.chat_log = vec![
                ChatTurn {
                    role: ChatRole::User,
                    text: "hi".to_string(),
                },
                ChatTurn {
                    role: ChatRole::Clone,
                    text: "hello".to_string(),
                },
            ];
            let history = state.chat_history();
            assert_eq!(history[0].role, "user");
            assert_eq!(history[1].role, "assistant");
        }
    }
}
