//! Home component - Main conversion screen
//!
//! Displays the upload form (file, table name, dialect, case transform,
//! submit) and the result panel. Owns focus movement and result scrolling;
//! all workflow mutations go through actions handled by the app.

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::calculate_main_layout;
use crate::model::WorkflowState;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

// ═══════════════════════════════════════════════════════════════════════════════
// Form Focus
// ═══════════════════════════════════════════════════════════════════════════════

/// Focusable fields of the conversion form, in visual order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    File,
    TableName,
    Dialect,
    CaseTransform,
    Submit,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            Self::File => Self::TableName,
            Self::TableName => Self::Dialect,
            Self::Dialect => Self::CaseTransform,
            Self::CaseTransform => Self::Submit,
            Self::Submit => Self::File,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::File => Self::Submit,
            Self::TableName => Self::File,
            Self::Dialect => Self::TableName,
            Self::CaseTransform => Self::Dialect,
            Self::Submit => Self::CaseTransform,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Render Context
// ═══════════════════════════════════════════════════════════════════════════════

/// Read-only state the home screen needs each frame
pub struct HomeRenderContext<'a> {
    pub workflow: &'a WorkflowState,
    /// Seconds since the in-flight submission started, when one exists
    pub elapsed_secs: Option<u64>,
    /// Transient status line (copy confirmation)
    pub status_message: Option<&'a str>,
    pub service_url: &'a str,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Home Component
// ═══════════════════════════════════════════════════════════════════════════════

pub struct HomeComponent {
    /// Currently focused form field
    pub focus: FormField,

    /// Scroll offset into the result panel
    pub result_scroll: usize,
}

impl Default for HomeComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeComponent {
    pub fn new() -> Self {
        Self {
            focus: FormField::File,
            result_scroll: 0,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Key Handling
    // ─────────────────────────────────────────────────────────────────────────

    /// Keys while the table name field has focus. Printable characters edit
    /// the field; everything else falls back to navigation.
    fn handle_table_name_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::TableNameInput(c))
            }
            KeyCode::Backspace => Some(Action::TableNameBackspace),
            KeyCode::Enter | KeyCode::Esc | KeyCode::Tab | KeyCode::Down => {
                Some(Action::NextField)
            }
            KeyCode::Up | KeyCode::BackTab => Some(Action::PrevField),
            _ => None,
        }
    }

    /// Enter activates the focused field
    fn activate_focused(&self) -> Option<Action> {
        match self.focus {
            FormField::File => Some(Action::OpenFilePicker),
            FormField::TableName => Some(Action::NextField),
            FormField::Dialect => Some(Action::NextDialect),
            FormField::CaseTransform => Some(Action::NextCaseTransform),
            FormField::Submit => Some(Action::Submit),
        }
    }

    fn cycle_left(&self) -> Option<Action> {
        match self.focus {
            FormField::Dialect => Some(Action::PrevDialect),
            FormField::CaseTransform => Some(Action::PrevCaseTransform),
            _ => None,
        }
    }

    fn cycle_right(&self) -> Option<Action> {
        match self.focus {
            FormField::Dialect => Some(Action::NextDialect),
            FormField::CaseTransform => Some(Action::NextCaseTransform),
            _ => None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    fn field_style(&self, field: FormField) -> Style {
        if self.focus == field {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        }
    }

    fn draw_title(&self, frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                " CSV → SQL DML ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {} ", ctx.service_url),
                Style::default().fg(Color::DarkGray),
            ),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, area);
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
        let workflow = ctx.workflow;

        let file_label = match &workflow.selected_file {
            Some(file) => Span::styled(file.name.clone(), Style::default().fg(Color::Green)),
            None => Span::styled("<no file selected>", Style::default().fg(Color::DarkGray)),
        };

        let mut table_name_spans = vec![Span::raw(workflow.table_name.clone())];
        if self.focus == FormField::TableName {
            table_name_spans.push(Span::styled(
                "_",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::SLOW_BLINK),
            ));
        }

        let submit_label = if workflow.is_submitting() {
            let secs = ctx.elapsed_secs.unwrap_or(0);
            Span::styled(
                format!("[ Convertendo... ({}s) ]", secs),
                Style::default().fg(Color::Yellow),
            )
        } else {
            Span::styled(
                "[ Convert ]",
                self.field_style(FormField::Submit)
                    .add_modifier(Modifier::BOLD),
            )
        };

        let mut table_line = vec![Span::styled(
            "  Table Name     ",
            self.field_style(FormField::TableName),
        )];
        table_line.append(&mut table_name_spans);

        let lines = vec![
            Line::from(vec![
                Span::styled("  CSV File       ", self.field_style(FormField::File)),
                file_label,
            ]),
            Line::from(""),
            Line::from(table_line),
            Line::from(""),
            Line::from(vec![
                Span::styled("  SQL Dialect    ", self.field_style(FormField::Dialect)),
                Span::styled(
                    format!("◂ {} ▸", workflow.sql_dialect.label()),
                    self.field_style(FormField::Dialect),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    "  Column Case    ",
                    self.field_style(FormField::CaseTransform),
                ),
                Span::styled(
                    format!("◂ {} ▸", workflow.case_transform.label()),
                    self.field_style(FormField::CaseTransform),
                ),
            ]),
        ];

        let mut all_lines = lines;
        all_lines.push(Line::from(""));
        all_lines.push(Line::from(vec![Span::raw("  "), submit_label]));

        let form = Paragraph::new(all_lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Conversion ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        );
        frame.render_widget(form, area);
    }

    fn draw_result(&mut self, frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
        let workflow = ctx.workflow;

        let (title, border_color, text, scrollable): (&str, Color, String, bool) =
            if let Some(error) = &workflow.error_text {
                (" Error ", Color::Red, error.clone(), false)
            } else if workflow.is_submitting() {
                (
                    " Working ",
                    Color::Yellow,
                    "Convertendo...".to_string(),
                    false,
                )
            } else if let Some(result) = &workflow.result_text {
                (" Generated DML ", Color::Green, result.clone(), true)
            } else {
                (
                    " Result ",
                    Color::DarkGray,
                    "Submit a CSV file to generate SQL statements.".to_string(),
                    false,
                )
            };

        let scroll = if scrollable {
            // Clamp so a held scroll key can neither run past the end of
            // the DML nor overflow the u16 offset below
            let visible_height = area.height.saturating_sub(2) as usize;
            let max_scroll = text.lines().count().saturating_sub(visible_height);
            if self.result_scroll > max_scroll {
                self.result_scroll = max_scroll;
            }
            self.result_scroll.min(u16::MAX as usize) as u16
        } else {
            0
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(title)
            .title_style(Style::default().fg(border_color).add_modifier(Modifier::BOLD));
        if scrollable {
            block = block.title_bottom(
                Line::from(Span::styled(
                    " c: copy ",
                    Style::default().fg(Color::DarkGray),
                ))
                .right_aligned(),
            );
        }

        let paragraph = Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
        if let Some(message) = ctx.status_message {
            let status = Paragraph::new(Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(Color::Green),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(status, area);
        }
    }

    fn draw_help_bar(&self, frame: &mut Frame, area: Rect) {
        let help = Paragraph::new(Line::from(vec![
            Span::styled(
                " Tab ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Next  "),
            Span::styled(
                " o ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("File  "),
            Span::styled(
                " s ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Submit  "),
            Span::styled(
                " c ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Copy  "),
            Span::styled(
                " ? ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Help  "),
            Span::styled(
                " q ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Quit"),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, area);
    }

    /// Full-frame render with the workflow state supplied by the app
    pub fn draw_with_state(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        ctx: &HomeRenderContext,
    ) -> Result<()> {
        let layout = calculate_main_layout(area, ctx.status_message.is_some());

        self.draw_title(frame, layout.title, ctx);
        self.draw_form(frame, layout.form, ctx);
        self.draw_result(frame, layout.result, ctx);
        if let Some(status_area) = layout.status {
            self.draw_status(frame, status_area, ctx);
        }
        self.draw_help_bar(frame, layout.help);

        Ok(())
    }
}

impl Component for HomeComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.focus == FormField::TableName {
            return Ok(self.handle_table_name_key(key));
        }

        let action = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::OpenQuitDialog),
            KeyCode::Tab | KeyCode::Down => Some(Action::NextField),
            KeyCode::BackTab | KeyCode::Up => Some(Action::PrevField),
            KeyCode::Enter => self.activate_focused(),
            KeyCode::Left | KeyCode::Char('h') => self.cycle_left(),
            KeyCode::Right | KeyCode::Char('l') => self.cycle_right(),
            KeyCode::Char('o') => Some(Action::OpenFilePicker),
            KeyCode::Char('s') => Some(Action::Submit),
            KeyCode::Char('c') => Some(Action::CopyResult),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('j') => Some(Action::ScrollDown),
            KeyCode::Char('k') => Some(Action::ScrollUp),
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::PageUp => Some(Action::PageUp),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::NextField => self.focus_next(),
            Action::PrevField => self.focus_prev(),
            Action::ScrollDown => self.result_scroll = self.result_scroll.saturating_add(1),
            Action::ScrollUp => self.result_scroll = self.result_scroll.saturating_sub(1),
            Action::PageDown => self.result_scroll = self.result_scroll.saturating_add(10),
            Action::PageUp => self.result_scroll = self.result_scroll.saturating_sub(10),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Rendering needs workflow state; the app calls draw_with_state
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycles_through_all_fields() {
        let mut home = HomeComponent::new();
        let order = [
            FormField::File,
            FormField::TableName,
            FormField::Dialect,
            FormField::CaseTransform,
            FormField::Submit,
        ];
        for field in order {
            assert_eq!(home.focus, field);
            home.focus_next();
        }
        // Wrapped around
        assert_eq!(home.focus, FormField::File);
        home.focus_prev();
        assert_eq!(home.focus, FormField::Submit);
    }

    #[test]
    fn test_table_name_focus_captures_characters() {
        let mut home = HomeComponent::new();
        home.focus = FormField::TableName;

        let action = home
            .handle_key_event(KeyEvent::from(KeyCode::Char('q')))
            .unwrap();
        assert_eq!(action, Some(Action::TableNameInput('q')));

        let action = home
            .handle_key_event(KeyEvent::from(KeyCode::Backspace))
            .unwrap();
        assert_eq!(action, Some(Action::TableNameBackspace));

        // Esc leaves the field instead of opening the quit dialog
        let action = home.handle_key_event(KeyEvent::from(KeyCode::Esc)).unwrap();
        assert_eq!(action, Some(Action::NextField));
    }

    #[test]
    fn test_enter_activates_focused_field() {
        let mut home = HomeComponent::new();

        home.focus = FormField::File;
        assert_eq!(home.activate_focused(), Some(Action::OpenFilePicker));

        home.focus = FormField::Dialect;
        assert_eq!(home.activate_focused(), Some(Action::NextDialect));

        home.focus = FormField::Submit;
        assert_eq!(home.activate_focused(), Some(Action::Submit));
    }

    #[test]
    fn test_arrows_cycle_only_on_selector_fields() {
        let mut home = HomeComponent::new();

        home.focus = FormField::CaseTransform;
        let action = home
            .handle_key_event(KeyEvent::from(KeyCode::Left))
            .unwrap();
        assert_eq!(action, Some(Action::PrevCaseTransform));

        home.focus = FormField::File;
        let action = home
            .handle_key_event(KeyEvent::from(KeyCode::Left))
            .unwrap();
        assert_eq!(action, None);
    }

    #[test]
    fn test_scroll_actions_move_offset_and_clamp_at_zero() {
        let mut home = HomeComponent::new();
        home.update(Action::ScrollUp).unwrap();
        assert_eq!(home.result_scroll, 0);

        home.update(Action::PageDown).unwrap();
        home.update(Action::ScrollDown).unwrap();
        assert_eq!(home.result_scroll, 11);

        home.update(Action::PageUp).unwrap();
        assert_eq!(home.result_scroll, 1);
    }

    #[test]
    fn test_result_scroll_clamps_to_content_during_draw() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut workflow = WorkflowState::new();
        let dml: String = (0..40)
            .map(|i| format!("INSERT INTO t (n) VALUES ({});\n", i))
            .collect();
        workflow.result_text = Some(dml);

        let mut home = HomeComponent::new();
        // Way past both the content and the u16 offset range
        home.result_scroll = 1_000_000;

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|frame| {
                let ctx = HomeRenderContext {
                    workflow: &workflow,
                    elapsed_secs: None,
                    status_message: None,
                    service_url: "http://localhost:8000/upload/",
                };
                home.draw_with_state(frame, frame.area(), &ctx).unwrap();
            })
            .unwrap();

        // Snapped back to the last page of the 40-line result, not to zero
        assert!(home.result_scroll < 40);
        assert!(home.result_scroll > 0);
    }

    #[test]
    fn test_shortcut_keys_emit_actions() {
        let mut home = HomeComponent::new();
        let cases = [
            (KeyCode::Char('s'), Action::Submit),
            (KeyCode::Char('c'), Action::CopyResult),
            (KeyCode::Char('o'), Action::OpenFilePicker),
            (KeyCode::Char('?'), Action::OpenHelp),
            (KeyCode::Char('q'), Action::OpenQuitDialog),
        ];
        for (code, expected) in cases {
            let action = home.handle_key_event(KeyEvent::from(code)).unwrap();
            assert_eq!(action, Some(expected));
        }
    }
}
