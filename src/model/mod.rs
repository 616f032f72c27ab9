//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - `WorkflowState` - The conversion session record and its transitions
//! - `ModalStack` - Modal overlay management

pub mod modal;
pub mod workflow;

// Re-export commonly used types
pub use modal::{Modal, ModalStack};
pub use workflow::{
    CaseTransform, SelectedFile, SqlDialect, SubmissionRequest, WorkflowState,
    DEFAULT_TABLE_NAME, GENERIC_ERROR_MESSAGE, NO_FILE_MESSAGE,
};
