//! Application state and core logic

use std::fs;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use uuid::Uuid;

use crate::backend::{BackendService, ChatRequest, HttpBackend, KnowledgeRequest};
use crate::config::AppConfig;
use crate::state::wizard::{
    Begin, CloneStatus, SaveIntent, SaveOp, WizardController, WizardStep,
};
use crate::state::{
    AppState, ChatRole, ChatTurn, CloneSortField, SortDirection, SplashState, View, ViewParams,
};

/// Share link base for published clones
const SHARE_LINK_BASE: &str = "https://cloneai.app/clones";

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Backend client for the hosted services
    pub backend: HttpBackend,
    /// Loaded user configuration
    pub config: AppConfig,
    /// Owner id scoping all clone listings
    owner_id: String,
    /// Whether the app should quit
    quit: bool,
    /// Transient status message shown in the status bar
    pub status_message: Option<String>,
    /// Splash screen animation state
    pub splash_state: Option<SplashState>,
    /// Terminal size for grid calculations (height, width)
    pub terminal_size: Option<(u16, u16)>,
}

impl App {
    /// Create a new App instance
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().unwrap_or_default();
        let mut backend = HttpBackend::new(&config);
        let mut state = AppState::default();

        // Start with splash screen
        state.current_view = View::Splash;

        // Sort preferences from config
        if let Some(field) = config
            .clone_sort_field
            .as_deref()
            .and_then(CloneSortField::parse)
        {
            state.clone_sort_field = field;
        }
        if config.clone_sort_direction.as_deref() == Some("desc") {
            state.clone_sort_direction = SortDirection::Desc;
        }
        state.show_drafts = config.show_draft_clones.unwrap_or(true);

        let owner_id = std::env::var("CLONEAI_OWNER_ID")
            .ok()
            .or_else(|| config.owner_id.clone())
            .unwrap_or_else(|| "me".to_string());

        // Check backend connection and load clones if reachable
        state.backend_connected = backend.check_connection().await;
        if state.backend_connected {
            match backend.list_clones(&owner_id).await {
                Ok(clones) => state.clones = clones,
                Err(e) => tracing::warn!("initial clone listing failed: {e}"),
            }
        }

        Ok(Self {
            state,
            backend,
            config,
            owner_id,
            quit: false,
            status_message: None,
            splash_state: Some(SplashState::new()),
            terminal_size: None,
        })
    }

    /// Update splash animation state.
    /// Returns true if the animation completed and the view transitioned.
    pub fn update_splash(&mut self, terminal_height: u16) -> bool {
        if let Some(ref mut splash) = self.splash_state {
            splash.update(terminal_height);
            if splash.is_complete() {
                self.splash_state = None;
                self.state.current_view = View::Clones;
                return true;
            }
        }
        false
    }

    /// Check if in splash screen
    pub fn in_splash(&self) -> bool {
        matches!(self.state.current_view, View::Splash)
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Calculate number of columns for the clone grid based on terminal width
    pub fn calculate_clone_grid_columns(&self) -> usize {
        // terminal_size is (height, width)
        let width = self.terminal_size.map(|(_, w)| w).unwrap_or(80);
        // Subtract sidebar width and outer borders
        let usable_width = width.saturating_sub(20 + 2);

        const MIN_CARD_WIDTH: u16 = 22;
        const CARD_SPACING_H: u16 = 1;

        let columns = if usable_width >= MIN_CARD_WIDTH {
            ((usable_width + CARD_SPACING_H) / (MIN_CARD_WIDTH + CARD_SPACING_H)) as usize
        } else {
            1
        };
        columns.max(1)
    }

    // ---- navigation ---------------------------------------------------

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View, params: ViewParams) {
        self.state
            .view_history
            .push((self.state.current_view.clone(), self.state.view_params.clone()));
        self.state.current_view = view;
        self.state.view_params = params;
    }

    /// Go back to the previous non-wizard view
    pub fn go_back(&mut self) {
        while let Some((view, params)) = self.state.view_history.pop() {
            // Never land back inside the wizard; it was left deliberately
            if matches!(view, View::Wizard) {
                continue;
            }
            self.state.current_view = view;
            self.state.view_params = params;
            return;
        }
        self.state.current_view = View::Clones;
        self.state.view_params = ViewParams::default();
    }

    // ---- key dispatch -------------------------------------------------

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Error dialog is modal
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Delete confirmation is modal
        if self.state.confirm_delete.is_some() {
            self.handle_confirm_delete_key(key).await?;
            return Ok(());
        }

        // Clear any transient status message on key press
        self.status_message = None;

        match self.state.current_view {
            View::Splash => self.handle_splash_key(key),
            View::Clones => self.handle_clones_key(key).await?,
            View::CloneDetail => self.handle_clone_detail_key(key).await?,
            View::Wizard => self.handle_wizard_key(key).await?,
            View::Chat => self.handle_chat_key(key).await?,
            View::Config => self.handle_config_key(key),
        }

        Ok(())
    }

    /// Handle a mouse event (wheel scrolling only)
    pub async fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.state.scroll_down(),
            MouseEventKind::ScrollUp => self.state.scroll_up(),
            _ => {}
        }
        Ok(())
    }

    fn handle_splash_key(&mut self, _key: KeyEvent) {
        if let Some(ref mut splash) = self.splash_state {
            splash.skip();
        }
        self.splash_state = None;
        self.state.current_view = View::Clones;
    }

    async fn handle_confirm_delete_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('y') => {
                if let Some(clone_id) = self.state.confirm_delete.take() {
                    match self.backend.delete_clone(&clone_id).await {
                        Ok(()) => {
                            self.status_message = Some("Clone deleted".to_string());
                            if self.state.selected_clone_id.as_deref() == Some(&clone_id) {
                                self.state.selected_clone_id = None;
                            }
                            self.refresh_clones().await;
                            if matches!(self.state.current_view, View::CloneDetail) {
                                self.go_back();
                            }
                        }
                        Err(e) => self.push_error(format!("Failed to delete clone: {e}")),
                    }
                }
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.state.confirm_delete = None;
            }
            _ => {}
        }
        Ok(())
    }

    // ---- clones grid --------------------------------------------------

    async fn handle_clones_key(&mut self, key: KeyEvent) -> Result<()> {
        let columns = self.calculate_clone_grid_columns();
        let total = self.state.sorted_clones().len();

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.move_selection_down(columns, total),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_selection_up(columns),
            KeyCode::Char('h') | KeyCode::Left => self.state.move_selection_left(columns),
            KeyCode::Char('l') | KeyCode::Right => {
                self.state.move_selection_right(columns, total)
            }
            KeyCode::Enter => {
                let clone_id = self
                    .state
                    .sorted_clones()
                    .get(self.state.selected_index)
                    .map(|c| c.id.clone());
                if let Some(id) = clone_id {
                    self.state.selected_clone_id = Some(id.clone());
                    self.navigate(
                        View::CloneDetail,
                        ViewParams {
                            clone_id: Some(id),
                        },
                    );
                }
            }
            KeyCode::Char('n') => self.open_wizard_new(),
            KeyCode::Char('e') => {
                let clone_id = self
                    .state
                    .sorted_clones()
                    .get(self.state.selected_index)
                    .map(|c| c.id.clone());
                if let Some(id) = clone_id {
                    self.open_wizard_edit(&id).await;
                }
            }
            KeyCode::Char('c') => {
                let clone_id = self
                    .state
                    .sorted_clones()
                    .get(self.state.selected_index)
                    .map(|c| c.id.clone());
                if let Some(id) = clone_id {
                    self.open_chat(&id).await;
                }
            }
            KeyCode::Char('s') => self.state.cycle_clone_sort_field(),
            KeyCode::Char('S') => self.state.toggle_clone_sort_direction(),
            KeyCode::Char('a') => {
                self.state.show_drafts = !self.state.show_drafts;
                self.state.reset_selection();
            }
            KeyCode::Char('r') => {
                self.refresh_clones().await;
                self.status_message = Some("Refreshed".to_string());
            }
            KeyCode::Char('y') => {
                let clone_id = self
                    .state
                    .sorted_clones()
                    .get(self.state.selected_index)
                    .map(|c| c.id.clone());
                if let Some(id) = clone_id {
                    self.copy_share_link(&id);
                }
            }
            KeyCode::Char('d') => {
                let clone_id = self
                    .state
                    .sorted_clones()
                    .get(self.state.selected_index)
                    .map(|c| c.id.clone());
                if let Some(id) = clone_id {
                    self.state.confirm_delete = Some(id);
                }
            }
            KeyCode::Char('g') => self.navigate(View::Config, ViewParams::default()),
            _ => {}
        }
        Ok(())
    }

    async fn handle_clone_detail_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => self.state.scroll_up(),
            KeyCode::Char('c') => {
                let clone_id = self.state.selected_clone_id.clone();
                if let Some(id) = clone_id {
                    self.open_chat(&id).await;
                }
            }
            KeyCode::Char('e') => {
                let clone_id = self.state.selected_clone_id.clone();
                if let Some(id) = clone_id {
                    self.open_wizard_edit(&id).await;
                }
            }
            KeyCode::Char('p') => self.publish_selected().await,
            KeyCode::Char('y') => {
                let clone_id = self.state.selected_clone_id.clone();
                if let Some(id) = clone_id {
                    self.copy_share_link(&id);
                }
            }
            KeyCode::Char('d') => {
                self.state.confirm_delete = self.state.selected_clone_id.clone();
            }
            KeyCode::Esc => self.go_back(),
            _ => {}
        }
        Ok(())
    }

    // ---- wizard -------------------------------------------------------

    async fn handle_wizard_key(&mut self, key: KeyEvent) -> Result<()> {
        let on_action_row = self.state.wizard_on_action_row();
        let step = self.state.wizard.step();

        // Keyboard shortcuts that work from any field
        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.wizard_save_exit().await;
            return Ok(());
        }
        if key.code == KeyCode::Char('w')
            && key.modifiers.contains(crate::platform::COPY_MODIFIER)
        {
            self.wizard_save_exit().await;
            return Ok(());
        }
        if key.code == KeyCode::Char('p')
            && key.modifiers.contains(crate::platform::COPY_MODIFIER)
            && step.is_last()
        {
            self.wizard_submit(CloneStatus::Published).await;
            return Ok(());
        }
        if key.code == KeyCode::Char('k')
            && key.modifiers.contains(KeyModifiers::CONTROL)
            && step == WizardStep::Knowledge
        {
            self.process_knowledge().await;
            return Ok(());
        }

        match key.code {
            KeyCode::Tab => self.state.wizard_next_field(),
            KeyCode::BackTab => self.state.wizard_prev_field(),
            // The action panel is vertical; arrows move between buttons
            KeyCode::Up | KeyCode::Left if on_action_row => self.state.wizard_prev_button(),
            KeyCode::Down | KeyCode::Right if on_action_row => self.state.wizard_next_button(),
            KeyCode::Left => self.state.wizard_adjust(-1),
            KeyCode::Right => self.state.wizard_adjust(1),
            KeyCode::Enter if on_action_row => self.trigger_wizard_button().await,
            KeyCode::Enter => self.wizard_field_enter().await,
            KeyCode::Delete if step == WizardStep::Knowledge => {
                self.remove_last_knowledge_entry();
            }
            KeyCode::Esc => {
                self.leave_wizard();
            }
            KeyCode::Char(' ') if step == WizardStep::MediaTraining && !on_action_row => {
                self.state.wizard_toggle();
            }
            KeyCode::Char(c) if !on_action_row => self.state.wizard_input_char(c),
            KeyCode::Backspace if !on_action_row => self.state.wizard_backspace(),
            _ => {}
        }
        Ok(())
    }

    /// Enter pressed inside a step field (not on the action row)
    async fn wizard_field_enter(&mut self) {
        let field = self.state.wizard_active_field;
        match self.state.wizard.step() {
            WizardStep::BasicInfo if field == 4 => {
                // Bio is multiline
                self.state.wizard.form_mut().bio.push('\n');
            }
            WizardStep::QaTraining => {
                if let Some(answer) = self.state.wizard.form_mut().qa_answers.get_mut(field) {
                    answer.push('\n');
                }
            }
            WizardStep::Knowledge => match field {
                0 => self.add_document_from_input(),
                1 => self.add_link_from_input(),
                _ => {}
            },
            WizardStep::TestChat if field == 0 => self.send_chat().await,
            _ => self.state.wizard_next_field(),
        }
    }

    /// Enter pressed on the action row: run the selected button
    async fn trigger_wizard_button(&mut self) {
        let is_last = self.state.wizard.step().is_last();
        match (self.state.wizard_selected_button, is_last) {
            (0, _) => {
                self.state.wizard.previous();
                self.state.wizard_reset_focus();
            }
            (1, _) => self.wizard_save_exit().await,
            (2, false) => self.wizard_next().await,
            (2, true) => self.wizard_submit(CloneStatus::Draft).await,
            (3, true) => self.wizard_submit(CloneStatus::Published).await,
            _ => {}
        }
    }

    fn add_document_from_input(&mut self) {
        let path = self.state.doc_path_input.trim().to_string();
        if path.is_empty() {
            return;
        }
        let doc = crate::state::wizard::DocumentRef::from_path(&path);
        self.state.wizard.form_mut().documents.push(doc);
        self.state.doc_path_input.clear();
    }

    fn add_link_from_input(&mut self) {
        let url = self.state.link_input.trim().to_string();
        if url.is_empty() {
            return;
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            self.push_error("Links must start with http:// or https://");
            return;
        }
        self.state.wizard.form_mut().links.push(url);
        self.state.link_input.clear();
    }

    fn remove_last_knowledge_entry(&mut self) {
        match self.state.wizard_active_field {
            0 => {
                self.state.wizard.form_mut().documents.pop();
            }
            1 => {
                self.state.wizard.form_mut().links.pop();
            }
            _ => {}
        }
    }

    /// Begin a Next transition: validate, save, advance
    async fn wizard_next(&mut self) {
        match self.state.wizard.begin_next() {
            Begin::Blocked => {}
            Begin::Invalid(errors) => self.push_error(errors.join("\n")),
            Begin::Save(op) => self.run_wizard_save(op).await,
        }
    }

    /// Save whatever is in the form and leave the wizard
    async fn wizard_save_exit(&mut self) {
        match self.state.wizard.begin_save_exit() {
            Begin::Blocked => {}
            Begin::Invalid(errors) => self.push_error(errors.join("\n")),
            Begin::Save(op) => self.run_wizard_save(op).await,
        }
    }

    /// Final submit with the chosen status
    async fn wizard_submit(&mut self, status: CloneStatus) {
        match self.state.wizard.begin_submit(status) {
            Begin::Blocked => {}
            Begin::Invalid(errors) => self.push_error(errors.join("\n")),
            Begin::Save(op) => self.run_wizard_save(op).await,
        }
    }

    /// Issue the latched persistence call and apply its outcome
    async fn run_wizard_save(&mut self, op: SaveOp) {
        // Uploads happen immediately before the record save that references
        // their URLs; a failed upload degrades to a warning
        for warning in self.upload_pending_media().await {
            tracing::warn!("{warning}");
            self.status_message = Some(warning);
        }

        let draft = self.state.wizard.form().to_draft();
        let outcome = match op {
            SaveOp::Create => self
                .backend
                .create_clone(&draft)
                .await
                .map_err(|e| e.to_string()),
            SaveOp::Update(id) => self
                .backend
                .update_clone(&id, &draft)
                .await
                .map(|()| id)
                .map_err(|e| e.to_string()),
        };

        match self.state.wizard.complete_save(outcome) {
            Ok(SaveIntent::Advance) => {
                self.state.wizard_reset_focus();
                self.status_message = Some("Progress saved".to_string());
            }
            Ok(SaveIntent::Exit) => {
                self.status_message = Some("Progress saved".to_string());
                self.leave_wizard();
            }
            Ok(SaveIntent::Submit) => self.finalize_submit().await,
            Err(message) => self.push_error(format!("Save failed: {message}")),
        }
    }

    /// Denormalization writes after the final record save: the Q&A blob,
    /// one row per uploaded document, one per link. Failures accumulate;
    /// successes proceed independently.
    async fn finalize_submit(&mut self) {
        let Some(clone_id) = self
            .state
            .wizard
            .form()
            .created_clone_id()
            .map(str::to_string)
        else {
            self.push_error("Submit finished without a record id");
            return;
        };

        let mut failures = Vec::new();

        let entries = self.state.wizard.form().qa_entries();
        if !entries.is_empty() {
            if let Err(e) = self.backend.upsert_qa(&clone_id, &entries).await {
                failures.push(format!("Q&A responses: {e}"));
            }
        }

        let documents: Vec<crate::backend::DocumentRow> = self
            .state
            .wizard
            .form()
            .documents
            .iter()
            .filter_map(|d| {
                d.url.as_ref().map(|url| crate::backend::DocumentRow {
                    name: d.name.clone(),
                    url: url.clone(),
                })
            })
            .collect();
        for row in &documents {
            if let Err(e) = self.backend.insert_document(&clone_id, row).await {
                failures.push(format!("Document {}: {e}", row.name));
            }
        }

        let links = self.state.wizard.form().links.clone();
        for url in &links {
            if let Err(e) = self.backend.insert_link(&clone_id, url).await {
                failures.push(format!("Link {url}: {e}"));
            }
        }

        if !failures.is_empty() {
            self.push_error(format!(
                "Some training data could not be saved:\n{}",
                failures.join("\n")
            ));
        }

        let published = self.state.wizard.form().status == CloneStatus::Published;
        self.status_message = Some(
            if published {
                "Clone published!"
            } else {
                "Draft saved!"
            }
            .to_string(),
        );

        self.refresh_clones().await;
        self.state.selected_clone_id = Some(clone_id.clone());
        self.state.view_history.clear();
        self.state.current_view = View::CloneDetail;
        self.state.view_params = ViewParams {
            clone_id: Some(clone_id),
        };
    }

    /// Upload the avatar and any documents that do not have a URL yet.
    /// Returns warnings for uploads that failed; the save proceeds anyway.
    async fn upload_pending_media(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();

        // Avatar
        let avatar_path = self.state.wizard.form().avatar_path.trim().to_string();
        if !avatar_path.is_empty() && self.state.wizard.form().avatar_url.is_none() {
            match fs::read(&avatar_path) {
                Ok(bytes) => {
                    let name = file_name_of(&avatar_path);
                    let object_path = format!("avatars/{}/{name}", Uuid::new_v4());
                    match self
                        .backend
                        .upload_object(&object_path, bytes, guess_content_type(&name))
                        .await
                    {
                        Ok(url) => self.state.wizard.form_mut().avatar_url = Some(url),
                        Err(e) => warnings.push(format!("Avatar upload failed: {e}")),
                    }
                }
                Err(e) => warnings.push(format!("Could not read avatar file: {e}")),
            }
        }

        // Documents added this session
        let doc_count = self.state.wizard.form().documents.len();
        for idx in 0..doc_count {
            let pending = {
                let doc = &self.state.wizard.form().documents[idx];
                match (&doc.url, &doc.source_path) {
                    (None, Some(path)) => Some((doc.name.clone(), path.clone())),
                    _ => None,
                }
            };
            let Some((name, path)) = pending else {
                continue;
            };
            match fs::read(&path) {
                Ok(bytes) => {
                    let object_path = format!("documents/{}/{name}", Uuid::new_v4());
                    match self
                        .backend
                        .upload_object(&object_path, bytes, guess_content_type(&name))
                        .await
                    {
                        Ok(url) => {
                            self.state.wizard.form_mut().documents[idx].url = Some(url);
                        }
                        Err(e) => warnings.push(format!("Upload of {name} failed: {e}")),
                    }
                }
                Err(e) => warnings.push(format!("Could not read {name}: {e}")),
            }
        }

        warnings
    }

    /// Submit attached documents and links for knowledge processing and
    /// record the job's reported status
    async fn process_knowledge(&mut self) {
        let Some(clone_id) = self
            .state
            .wizard
            .form()
            .created_clone_id()
            .map(str::to_string)
        else {
            self.push_error("Save your progress once before processing knowledge");
            return;
        };

        let has_content = !self.state.wizard.form().documents.is_empty()
            || !self.state.wizard.form().links.is_empty();
        if !has_content {
            self.status_message = Some("Nothing to process yet".to_string());
            return;
        }

        for warning in self.upload_pending_media().await {
            tracing::warn!("{warning}");
            self.status_message = Some(warning);
        }

        let request = KnowledgeRequest {
            clone_id,
            documents: self
                .state
                .wizard
                .form()
                .documents
                .iter()
                .filter_map(|d| d.url.clone())
                .collect(),
            links: self.state.wizard.form().links.clone(),
        };

        match self.backend.process_knowledge(&request).await {
            Ok(response) => {
                self.status_message =
                    Some(format!("Knowledge processing: {}", response.overall_status.label()));
                self.state.knowledge_status = Some(response.overall_status);
            }
            Err(e) => {
                tracing::warn!("knowledge processing unavailable: {e}");
                self.push_error(
                    "Knowledge processing is unavailable right now. Your documents are kept and you can retry later.",
                );
            }
        }
    }

    /// Leave the wizard and return to the clone list
    fn leave_wizard(&mut self) {
        self.go_back();
    }

    fn open_wizard_new(&mut self) {
        self.state.wizard = WizardController::new();
        self.state.wizard_reset_focus();
        self.state.knowledge_status = None;
        self.state.doc_path_input.clear();
        self.state.link_input.clear();
        self.state.reset_chat(String::new(), String::new());
        self.navigate(View::Wizard, ViewParams::default());
    }

    async fn open_wizard_edit(&mut self, clone_id: &str) {
        match self.backend.get_clone(clone_id).await {
            Ok(record) => {
                self.state.wizard = WizardController::from_record(&record);
                self.state.wizard_reset_focus();
                self.state.knowledge_status = None;
                self.state.doc_path_input.clear();
                self.state.link_input.clear();
                self.state.reset_chat(record.name.clone(), String::new());
                self.navigate(
                    View::Wizard,
                    ViewParams {
                        clone_id: Some(clone_id.to_string()),
                    },
                );
            }
            Err(e) => self.push_error(format!("Failed to load clone: {e}")),
        }
    }

    // ---- chat ---------------------------------------------------------

    async fn open_chat(&mut self, clone_id: &str) {
        match self.backend.get_clone(clone_id).await {
            Ok(record) => {
                let form = crate::state::wizard::WizardForm::from_record(&record);
                self.state
                    .reset_chat(record.name.clone(), form.system_prompt());
                self.state.selected_clone_id = Some(clone_id.to_string());
                self.navigate(
                    View::Chat,
                    ViewParams {
                        clone_id: Some(clone_id.to_string()),
                    },
                );
            }
            Err(e) => self.push_error(format!("Failed to load clone: {e}")),
        }
    }

    async fn handle_chat_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Enter => self.send_chat().await,
            KeyCode::Up => self.state.scroll_up(),
            KeyCode::Down => self.state.scroll_down(),
            KeyCode::Esc => self.go_back(),
            KeyCode::Char(c) => self.state.chat_input.push(c),
            KeyCode::Backspace => {
                self.state.chat_input.pop();
            }
            _ => {}
        }
        Ok(())
    }

    /// One awaited chat round. Input stays disabled while a request is in
    /// flight; a backend failure becomes a fallback line, never a crash.
    async fn send_chat(&mut self) {
        if self.state.chat_pending {
            return;
        }
        let message = self.state.chat_input.trim().to_string();
        if message.is_empty() {
            return;
        }

        // The wizard's test step chats against the live form; the
        // standalone view uses the prompt captured when the chat opened
        let system_prompt = if matches!(self.state.current_view, View::Wizard) {
            self.state.wizard.form().system_prompt()
        } else {
            self.state.chat_prompt.clone()
        };

        let request = ChatRequest {
            system_prompt,
            user_message: message.clone(),
            history: self.state.chat_history(),
        };

        self.state.chat_input.clear();
        self.state.chat_log.push(ChatTurn {
            role: ChatRole::User,
            text: message,
        });
        self.state.chat_pending = true;

        match self.backend.chat(&request).await {
            Ok(response) => {
                self.state.chat_log.push(ChatTurn {
                    role: ChatRole::Clone,
                    text: response.response,
                });
            }
            Err(e) => {
                tracing::warn!("chat completion failed: {e}");
                self.state.chat_log.push(ChatTurn {
                    role: ChatRole::Clone,
                    text: "(The clone is unavailable right now. Please try again.)".to_string(),
                });
            }
        }
        self.state.chat_pending = false;
    }

    // ---- config -------------------------------------------------------

    fn handle_config_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => self.state.scroll_up(),
            KeyCode::Esc => self.go_back(),
            _ => {}
        }
    }

    // ---- shared actions -----------------------------------------------

    async fn refresh_clones(&mut self) {
        match self.backend.list_clones(&self.owner_id).await {
            Ok(clones) => {
                self.state.clones = clones;
                self.state.backend_connected = true;
            }
            Err(e) => {
                tracing::warn!("clone listing failed: {e}");
                self.push_error(format!("Failed to load clones: {e}"));
            }
        }
    }

    /// Flip the selected clone to published
    async fn publish_selected(&mut self) {
        let Some(clone_id) = self.state.selected_clone_id.clone() else {
            self.push_error("No clone selected");
            return;
        };
        match self.backend.get_clone(&clone_id).await {
            Ok(record) => {
                let mut form = crate::state::wizard::WizardForm::from_record(&record);
                form.status = CloneStatus::Published;
                match self.backend.update_clone(&clone_id, &form.to_draft()).await {
                    Ok(()) => {
                        self.status_message = Some("Clone published!".to_string());
                        self.refresh_clones().await;
                    }
                    Err(e) => self.push_error(format!("Failed to publish: {e}")),
                }
            }
            Err(e) => self.push_error(format!("Failed to load clone: {e}")),
        }
    }

    fn copy_share_link(&mut self, clone_id: &str) {
        let link = share_link(clone_id);
        match self.copy_to_clipboard(&link) {
            Ok(()) => self.status_message = Some("Share link copied".to_string()),
            Err(e) => self.push_error(format!("Clipboard unavailable: {e}")),
        }
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}

/// Public share link for a clone
fn share_link(clone_id: &str) -> String {
    format!("{SHARE_LINK_BASE}/{clone_id}")
}

/// Last path component, used as the object file name
fn file_name_of(path: &str) -> String {
    path.rsplit(['/', '\\']).next().unwrap_or(path).to_string()
}

/// Content type by file extension, for storage uploads
fn guess_content_type(name: &str) -> &'static str {
    match name.rsplit('.').next().map(str::to_ascii_lowercase).as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("pdf") => "application/pdf",
        Some("txt") | Some("md") => "text/plain",
        Some("doc") | Some("docx") => "application/msword",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_link_format() {
        assert_eq!(
            share_link("clone-1"),
            "https://cloneai.app/clones/clone-1"
        );
    }

    #[test]
    fn test_file_name_of_handles_separators() {
        assert_eq!(file_name_of("/home/user/notes.pdf"), "notes.pdf");
        assert_eq!(file_name_of("C:\\docs\\cv.docx"), "cv.docx");
        assert_eq!(file_name_of("plain.txt"), "plain.txt");
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type("avatar.PNG"), "image/png");
        assert_eq!(guess_content_type("resume.pdf"), "application/pdf");
        assert_eq!(guess_content_type("README.md"), "text/plain");
        assert_eq!(guess_content_type("mystery"), "application/octet-stream");
    }
}
