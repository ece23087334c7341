//! Host used when no terminal is attached.

use fzpick_engine::{Host, NotifyLevel, SelectRequest, SelectionOutcome};

/// Reports everything on the standard streams and has no UI, so the
/// pipeline rejects invocations before running anything.
#[derive(Debug, Default)]
pub struct HeadlessHost;

impl Host for HeadlessHost {
    fn has_ui(&self) -> bool {
        false
    }

    fn notify(&mut self, message: &str, level: NotifyLevel) {
        eprintln!("{}", format_notice(message, level));
    }

    fn set_editor_text(&mut self, text: &str) {
        println!("{text}");
    }

    fn send_user_message(&mut self, text: &str) {
        println!("{text}");
    }

    async fn select(&mut self, request: SelectRequest) -> SelectionOutcome {
        tracing::warn!(title = %request.title, "Picker requested without a terminal");
        SelectionOutcome::Cancelled
    }
}

/// One-line rendering of a notification for plain stderr.
pub fn format_notice(message: &str, level: NotifyLevel) -> String {
    match level {
        NotifyLevel::Info => message.to_string(),
        NotifyLevel::Warning => format!("warning: {message}"),
        NotifyLevel::Error => format!("error: {message}"),
    }
}
