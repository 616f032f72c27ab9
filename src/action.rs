//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use std::fmt;
use std::path::PathBuf;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for polling the in-flight submission
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Form Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Focus the next form field
    NextField,
    /// Focus the previous form field
    PrevField,

    // ─────────────────────────────────────────────────────────────────────────
    // Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the CSV file picker
    OpenFilePicker,
    /// A file was chosen in the picker
    SelectFile(PathBuf),
    /// Append a character to the table name
    TableNameInput(char),
    /// Remove the last character from the table name
    TableNameBackspace,
    /// Cycle to the next SQL dialect
    NextDialect,
    /// Cycle to the previous SQL dialect
    PrevDialect,
    /// Cycle to the next case transform
    NextCaseTransform,
    /// Cycle to the previous case transform
    PrevCaseTransform,

    // ─────────────────────────────────────────────────────────────────────────
    // Conversion Workflow
    // ─────────────────────────────────────────────────────────────────────────
    /// Submit the selected file for conversion
    Submit,
    /// Copy the generated DML to the system clipboard
    CopyResult,

    // ─────────────────────────────────────────────────────────────────────────
    // Result Panel Scrolling
    // ─────────────────────────────────────────────────────────────────────────
    /// Scroll the result panel up one line
    ScrollUp,
    /// Scroll the result panel down one line
    ScrollDown,
    /// Scroll the result panel up one page
    PageUp,
    /// Scroll the result panel down one page
    PageDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Close the current modal
    CloseModal,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextField => write!(f, "NextField"),
            Action::PrevField => write!(f, "PrevField"),
            Action::OpenFilePicker => write!(f, "OpenFilePicker"),
            Action::SelectFile(path) => write!(f, "SelectFile({})", path.display()),
            Action::TableNameInput(c) => write!(f, "TableNameInput('{}')", c),
            Action::TableNameBackspace => write!(f, "TableNameBackspace"),
            Action::NextDialect => write!(f, "NextDialect"),
            Action::PrevDialect => write!(f, "PrevDialect"),
            Action::NextCaseTransform => write!(f, "NextCaseTransform"),
            Action::PrevCaseTransform => write!(f, "PrevCaseTransform"),
            Action::Submit => write!(f, "Submit"),
            Action::CopyResult => write!(f, "CopyResult"),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::ScrollDown => write!(f, "ScrollDown"),
            Action::PageUp => write!(f, "PageUp"),
            Action::PageDown => write!(f, "PageDown"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
        }
    }
}
