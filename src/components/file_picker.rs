//! CSV file picker component
//!
//! Modal directory browser restricted to directories and `.csv` files,
//! standing in for the browser file input's accept filter. Choosing a file
//! emits `Action::SelectFile`; everything shown here is already a CSV, so
//! the selection is not re-validated downstream.

use crate::action::Action;
use crate::component::Component;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use std::path::{Path, PathBuf};

/// One row in the picker list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEntry {
    /// Go up to the parent directory
    Parent,
    Dir { name: String, path: PathBuf },
    File { name: String, path: PathBuf },
}

/// File picker dialog
pub struct FilePickerComponent {
    /// Directory currently listed
    pub dir: PathBuf,
    pub entries: Vec<PickerEntry>,
    pub selected_index: usize,
    list_state: ListState,
    error: Option<String>,
}

impl Default for FilePickerComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl FilePickerComponent {
    pub fn new() -> Self {
        Self {
            dir: PathBuf::from("."),
            entries: Vec::new(),
            selected_index: 0,
            list_state: ListState::default(),
            error: None,
        }
    }

    /// List `dir`, keeping directories and `.csv` files only
    pub fn open(&mut self, dir: PathBuf) {
        match read_entries(&dir) {
            Ok(mut entries) => {
                self.error = None;
                if dir.parent().is_some() {
                    entries.insert(0, PickerEntry::Parent);
                }
                self.entries = entries;
            }
            Err(e) => {
                self.error = Some(format!("Cannot read {}: {}", dir.display(), e));
                self.entries = if dir.parent().is_some() {
                    vec![PickerEntry::Parent]
                } else {
                    Vec::new()
                };
            }
        }

        self.dir = dir;
        self.selected_index = 0;
        self.list_state.select(if self.entries.is_empty() {
            None
        } else {
            Some(0)
        });
    }

    pub fn selected_entry(&self) -> Option<&PickerEntry> {
        self.entries.get(self.selected_index)
    }

    fn select_next(&mut self) {
        if self.selected_index + 1 < self.entries.len() {
            self.selected_index += 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn select_first(&mut self) {
        if !self.entries.is_empty() {
            self.selected_index = 0;
            self.list_state.select(Some(0));
        }
    }

    fn select_last(&mut self) {
        if !self.entries.is_empty() {
            self.selected_index = self.entries.len() - 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn enter_selected(&mut self) -> Option<Action> {
        match self.selected_entry().cloned() {
            Some(PickerEntry::Parent) => {
                if let Some(parent) = self.dir.parent().map(Path::to_path_buf) {
                    self.open(parent);
                }
                None
            }
            Some(PickerEntry::Dir { path, .. }) => {
                self.open(path);
                None
            }
            Some(PickerEntry::File { path, .. }) => Some(Action::SelectFile(path)),
            None => None,
        }
    }
}

impl Component for FilePickerComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::CloseModal),
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                None
            }
            KeyCode::Char('g') => {
                self.select_first();
                None
            }
            KeyCode::Char('G') => {
                self.select_last();
                None
            }
            KeyCode::Char('r') => {
                self.open(self.dir.clone());
                None
            }
            KeyCode::Enter => self.enter_selected(),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_width = 72u16.min(area.width.saturating_sub(4));
        let popup_height = 24u16.min(area.height.saturating_sub(4));
        let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
        let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
        let popup_area = Rect::new(x, y, popup_width, popup_height);

        frame.render_widget(Clear, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(popup_area);

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| match entry {
                PickerEntry::Parent => ListItem::new(Line::from(Span::styled(
                    "../",
                    Style::default().fg(Color::DarkGray),
                ))),
                PickerEntry::Dir { name, .. } => ListItem::new(Line::from(Span::styled(
                    format!("{}/", name),
                    Style::default().fg(Color::Blue),
                ))),
                PickerEntry::File { name, .. } => ListItem::new(Line::from(Span::styled(
                    name.clone(),
                    Style::default().fg(Color::White),
                ))),
            })
            .collect();

        let title = format!(" Select CSV File — {} ", self.dir.display());
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(title)
                    .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::Cyan)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            );

        frame.render_stateful_widget(list, chunks[0], &mut self.list_state);

        let help = if let Some(ref error) = self.error {
            Paragraph::new(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )))
        } else {
            Paragraph::new(Line::from(vec![
                Span::styled(
                    " Enter ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Open/Choose  "),
                Span::styled(
                    " j/k ",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw("Move  "),
                Span::styled(
                    " Esc ",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Cancel"),
            ]))
        };

        frame.render_widget(
            help.alignment(ratatui::layout::Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            chunks[1],
        );

        Ok(())
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

fn read_entries(dir: &Path) -> std::io::Result<Vec<PickerEntry>> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();

        // Skip dotfiles
        if name.starts_with('.') {
            continue;
        }

        if path.is_dir() {
            dirs.push(PickerEntry::Dir { name, path });
        } else if is_csv(&path) {
            files.push(PickerEntry::File { name, path });
        }
    }

    let key = |entry: &PickerEntry| match entry {
        PickerEntry::Dir { name, .. } | PickerEntry::File { name, .. } => name.to_lowercase(),
        PickerEntry::Parent => String::new(),
    };
    dirs.sort_by_key(key);
    files.sort_by_key(key);

    dirs.extend(files);
    Ok(dirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.csv"), "x\n").unwrap();
        fs::write(dir.path().join("a.CSV"), "x\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "x\n").unwrap();
        fs::write(dir.path().join(".hidden.csv"), "x\n").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("inner.csv"), "x\n").unwrap();
        dir
    }

    fn names(picker: &FilePickerComponent) -> Vec<String> {
        picker
            .entries
            .iter()
            .map(|e| match e {
                PickerEntry::Parent => "..".to_string(),
                PickerEntry::Dir { name, .. } => format!("{}/", name),
                PickerEntry::File { name, .. } => name.clone(),
            })
            .collect()
    }

    #[test]
    fn test_open_filters_to_dirs_and_csv_files() {
        let dir = fixture_dir();
        let mut picker = FilePickerComponent::new();
        picker.open(dir.path().to_path_buf());

        // Parent first, then directories, then CSV files; txt and dotfiles gone
        assert_eq!(names(&picker), vec!["..", "sub/", "a.CSV", "b.csv"]);
    }

    #[test]
    fn test_enter_on_directory_descends() {
        let dir = fixture_dir();
        let mut picker = FilePickerComponent::new();
        picker.open(dir.path().to_path_buf());

        // Move to "sub/" and enter it
        picker.select_next();
        assert!(matches!(picker.selected_entry(), Some(PickerEntry::Dir { .. })));
        let action = picker.enter_selected();
        assert!(action.is_none());
        assert_eq!(picker.dir, dir.path().join("sub"));
        assert_eq!(names(&picker), vec!["..", "inner.csv"]);
    }

    #[test]
    fn test_enter_on_parent_ascends() {
        let dir = fixture_dir();
        let mut picker = FilePickerComponent::new();
        picker.open(dir.path().join("sub"));

        assert!(matches!(picker.selected_entry(), Some(PickerEntry::Parent)));
        picker.enter_selected();
        assert_eq!(picker.dir, dir.path());
    }

    #[test]
    fn test_enter_on_file_emits_select_action() {
        let dir = fixture_dir();
        let mut picker = FilePickerComponent::new();
        picker.open(dir.path().to_path_buf());

        picker.select_last();
        let action = picker.enter_selected();
        assert_eq!(
            action,
            Some(Action::SelectFile(dir.path().join("b.csv")))
        );
    }

    #[test]
    fn test_navigation_clamps_at_ends() {
        let dir = fixture_dir();
        let mut picker = FilePickerComponent::new();
        picker.open(dir.path().to_path_buf());

        picker.select_prev();
        assert_eq!(picker.selected_index, 0);

        picker.select_last();
        let last = picker.selected_index;
        picker.select_next();
        assert_eq!(picker.selected_index, last);
    }

    #[test]
    fn test_unreadable_dir_reports_error_and_keeps_parent() {
        let mut picker = FilePickerComponent::new();
        picker.open(PathBuf::from("/nonexistent/surely/missing"));
        assert!(picker.error.is_some());
        assert_eq!(picker.entries, vec![PickerEntry::Parent]);
    }

    #[test]
    fn test_escape_closes_modal() {
        let mut picker = FilePickerComponent::new();
        let action = picker
            .handle_key_event(KeyEvent::from(KeyCode::Esc))
            .unwrap();
        assert_eq!(action, Some(Action::CloseModal));
    }
}
