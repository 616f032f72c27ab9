//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.
//! App is intentionally lean - it coordinates between components but
//! does not contain business logic itself.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    FilePickerComponent, HelpDialog, HomeComponent, HomeRenderContext, QuitDialog,
};
use crate::config::Config;
use crate::model::modal::{Modal, ModalStack};
use crate::model::{SelectedFile, WorkflowState};
use crate::services::{self, ConversionClient, SubmitRunner};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Status line shown after a successful clipboard copy
const COPY_CONFIRMATION: &str = "Result copied to clipboard";

/// How long the status line stays visible
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Conversion workflow state shared with the result panel
    pub workflow: WorkflowState,

    /// Stack of open modal overlays
    pub modals: ModalStack,

    /// Background submission runner, polled on Tick
    pub submit_runner: SubmitRunner,

    /// HTTP client for the conversion service
    client: ConversionClient,

    /// Set to true to exit the main loop
    pub should_quit: bool,

    /// Transient status message and when it was shown; expires on Tick
    pub status_message: Option<(String, Instant)>,

    pub config: Config,

    // Child components
    pub home: HomeComponent,
    pub file_picker: FilePickerComponent,
    quit_dialog: QuitDialog,
    help_dialog: HelpDialog,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> App {
        let config = match Config::load() {
            Some(config) => config,
            None => {
                // First launch: persist the defaults so the endpoint is
                // editable without consulting the docs. A read-only home
                // is not fatal.
                let config = Config::default();
                let _ = config.save();
                config
            }
        };
        Self::with_config(config)
    }

    pub fn with_config(config: Config) -> App {
        let client = ConversionClient::new(config.service_url.clone());
        App {
            workflow: WorkflowState::new(),
            modals: ModalStack::new(),
            submit_runner: SubmitRunner::new(),
            client,
            should_quit: false,
            status_message: None,
            config,
            home: HomeComponent::new(),
            file_picker: FilePickerComponent::new(),
            quit_dialog: QuitDialog,
            help_dialog: HelpDialog::default(),
        }
    }

    /// Kick off a submission if the workflow accepts one
    fn submit(&mut self) {
        self.status_message = None;
        if let Some(request) = self.workflow.begin_submission() {
            self.home.result_scroll = 0;
            self.submit_runner.spawn(self.client.clone(), request);
        }
    }

    fn copy_result(&mut self) {
        if let Some(result) = self.workflow.result_text.clone() {
            if services::clipboard::copy_text(&result) {
                self.status_message = Some((COPY_CONFIRMATION.to_string(), Instant::now()));
            }
        }
    }

    fn expire_status_message(&mut self) {
        if let Some((_, shown_at)) = &self.status_message {
            if shown_at.elapsed() >= STATUS_MESSAGE_TTL {
                self.status_message = None;
            }
        }
    }

    fn open_file_picker(&mut self) {
        let start_dir = self
            .workflow
            .selected_file
            .as_ref()
            .and_then(|f| f.path.parent().map(PathBuf::from))
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        self.file_picker.open(start_dir);
        self.modals.push(Modal::FilePicker);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Modal Routing
    // ─────────────────────────────────────────────────────────────────────────

    fn handle_modal_key_event(&mut self, modal: Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::FilePicker => self.file_picker.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area),
            Modal::FilePicker => self.file_picker.draw(frame, area),
            Modal::Help => self.help_dialog.draw(frame, area),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Ctrl+C quits from anywhere
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::ForceQuit));
        }

        match self.modals.top() {
            Some(modal) => self.handle_modal_key_event(modal, key),
            None => self.home.handle_key_event(key),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                self.submit_runner.poll(&mut self.workflow);
                self.expire_status_message();
            }
            Action::ForceQuit => {
                self.should_quit = true;
            }
            Action::Resize(_, _) => {}

            // Form
            Action::NextField | Action::PrevField => {
                return self.home.update(action);
            }
            Action::TableNameInput(c) => {
                let mut name = self.workflow.table_name.clone();
                name.push(c);
                self.workflow.set_table_name(name);
            }
            Action::TableNameBackspace => {
                let mut name = self.workflow.table_name.clone();
                name.pop();
                self.workflow.set_table_name(name);
            }
            Action::NextDialect => {
                self.workflow.set_sql_dialect(self.workflow.sql_dialect.next());
            }
            Action::PrevDialect => {
                self.workflow.set_sql_dialect(self.workflow.sql_dialect.prev());
            }
            Action::NextCaseTransform => {
                self.workflow
                    .set_case_transform(self.workflow.case_transform.next());
            }
            Action::PrevCaseTransform => {
                self.workflow
                    .set_case_transform(self.workflow.case_transform.prev());
            }

            // Submission & result
            Action::Submit => self.submit(),
            Action::CopyResult => self.copy_result(),
            Action::ScrollUp | Action::ScrollDown | Action::PageUp | Action::PageDown => {
                return self.home.update(action);
            }

            // File picker
            Action::OpenFilePicker => self.open_file_picker(),
            Action::SelectFile(path) => {
                self.workflow.select_file(SelectedFile::new(path));
                self.modals.pop();
            }

            // Modals
            Action::OpenQuitDialog => self.modals.push(Modal::QuitConfirm),
            Action::OpenHelp => self.modals.push(Modal::Help),
            Action::CloseModal => {
                self.modals.pop();
            }
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let elapsed_secs = self.submit_runner.elapsed().map(|d| d.as_secs());
        let ctx = HomeRenderContext {
            workflow: &self.workflow,
            elapsed_secs,
            status_message: self.status_message.as_ref().map(|(m, _)| m.as_str()),
            service_url: self.client.endpoint(),
        };
        self.home.draw_with_state(frame, area, &ctx)?;

        if let Some(modal) = self.modals.top() {
            self.draw_modal(frame, area, modal)?;
        }

        Ok(())
    }
}
