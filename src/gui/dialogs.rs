//! Modal message dialogs (native, via rfd).

use rfd::{MessageButtons, MessageDialog, MessageLevel};
use std::fmt::Display;

pub fn info(title: &str, message: &str) {
    show(MessageLevel::Info, title, message);
}

pub fn warning(title: &str, message: &str) {
    tracing::warn!(title, "{}", message);
    show(MessageLevel::Warning, title, message);
}

/// Generic failure notice for storage and file faults.
pub fn failure(action: &str, err: &dyn Display) {
    tracing::error!(action, error = %err, "Operation failed");
    show(
        MessageLevel::Error,
        "Error",
        &format!("{} failed.\n\n{}", action, err),
    );
}

pub fn error(title: &str, message: &str) {
    show(MessageLevel::Error, title, message);
}

fn show(level: MessageLevel, title: &str, message: &str) {
    MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}
