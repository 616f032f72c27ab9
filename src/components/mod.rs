//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod file_picker;
pub mod help_dialog;
pub mod home;
pub mod layout;
pub mod quit_dialog;

pub use file_picker::FilePickerComponent;
pub use help_dialog::HelpDialog;
pub use home::{FormField, HomeComponent, HomeRenderContext};
pub use layout::{calculate_main_layout, centered_popup};
pub use quit_dialog::QuitDialog;
