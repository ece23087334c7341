//! Host capabilities consumed by the pipeline.

use std::future::Future;

use fzpick_types::{NotifyLevel, SelectionOutcome};

/// Everything needed to open the picker overlay once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectRequest {
    pub title: String,
    pub candidates: Vec<String>,
    pub max_visible: usize,
}

/// UI surface the pipeline drives.
///
/// The terminal front end implements this for real use; tests substitute a
/// recording fake.
pub trait Host {
    /// Whether an interactive UI is available. Invocations are rejected without one.
    fn has_ui(&self) -> bool;

    fn notify(&mut self, message: &str, level: NotifyLevel);

    /// Replace the contents of the edit buffer.
    fn set_editor_text(&mut self, text: &str);

    /// Submit `text` as an outgoing user message.
    fn send_user_message(&mut self, text: &str);

    /// Open the modal picker and wait until it closes.
    fn select(&mut self, request: SelectRequest) -> impl Future<Output = SelectionOutcome>;
}
