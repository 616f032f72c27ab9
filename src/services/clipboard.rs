//! System clipboard access
//!
//! Best effort only: a missing or broken clipboard (headless session, no
//! display server) must never panic or surface as a workflow error.

use arboard::Clipboard;

/// Place `text` on the system clipboard.
///
/// Returns true on success; false is silently ignorable by callers.
pub fn copy_text(text: &str) -> bool {
    match Clipboard::new() {
        Ok(mut clipboard) => clipboard.set_text(text.to_string()).is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_text_never_panics() {
        // Success depends on the environment (CI is usually headless);
        // the contract is only that the call returns instead of panicking.
        let _ = copy_text("INSERT INTO t (a) VALUES ('1');");
    }
}
