//! Core domain types for fzpick.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod text;
pub mod ui;

pub use text::{char_prefix, non_blank_lines, trim_candidate};

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Action Types
// ============================================================================

/// What an action does with its rendered template.
///
/// Values other than the three known kinds are kept verbatim in `Unknown`
/// instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionKind {
    /// Place the rendered text in the host's edit buffer.
    Editor,
    /// Submit the rendered text as an outgoing message.
    Send,
    /// Run the rendered text as a shell command.
    Bash,
    Unknown(String),
}

impl ActionKind {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            ActionKind::Editor => "editor",
            ActionKind::Send => "send",
            ActionKind::Bash => "bash",
            ActionKind::Unknown(raw) => raw,
        }
    }
}

impl From<String> for ActionKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "editor" => ActionKind::Editor,
            "send" => ActionKind::Send,
            "bash" => ActionKind::Bash,
            _ => ActionKind::Unknown(value),
        }
    }
}

impl From<ActionKind> for String {
    fn from(value: ActionKind) -> Self {
        match value {
            ActionKind::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the stdout of a successful `bash` action goes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutputMode {
    /// Show an informational notification.
    #[default]
    Notify,
    /// Replace the edit buffer.
    Editor,
    /// Submit as an outgoing message (only when non-empty).
    Send,
    Unknown(String),
}

impl OutputMode {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            OutputMode::Notify => "notify",
            OutputMode::Editor => "editor",
            OutputMode::Send => "send",
            OutputMode::Unknown(raw) => raw,
        }
    }
}

impl From<String> for OutputMode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "notify" => OutputMode::Notify,
            "editor" => OutputMode::Editor,
            "send" => OutputMode::Send,
            _ => OutputMode::Unknown(value),
        }
    }
}

impl From<OutputMode> for String {
    fn from(value: OutputMode) -> Self {
        match value {
            OutputMode::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action as written in a config file.
///
/// ```json
/// "action": "Read {{selected}}"
/// "action": { "kind": "bash", "template": "git checkout {{selected}}", "output": "notify" }
/// ```
///
/// The explicit form also accepts `type` in place of `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawActionSpec {
    /// Bare template string; implies an `editor` action.
    Shorthand(String),
    Explicit {
        #[serde(alias = "type")]
        kind: ActionKind,
        template: String,
        #[serde(default)]
        output: Option<OutputMode>,
    },
}

/// Canonical action: `output` is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedAction {
    pub kind: ActionKind,
    pub template: String,
    pub output: OutputMode,
}

// ============================================================================
// Command Types
// ============================================================================

/// One entry of the `commands` mapping in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawCommandConfig {
    /// Shell command whose stdout lines are the candidates.
    pub list: String,
    pub action: RawActionSpec,
    /// Keyboard shortcut such as `ctrl+shift+f`.
    #[serde(default)]
    pub shortcut: Option<String>,
}

/// A fully normalized, ready-to-invoke command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCommand {
    /// Merge key (the config section key).
    pub name: String,
    pub list: String,
    pub action: ResolvedAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<String>,
}

impl ResolvedCommand {
    /// Prefix of every host-facing command name.
    pub const COMMAND_PREFIX: &'static str = "fzf:";

    /// Host-facing name, e.g. `fzf:branches`. Also used as the overlay title.
    #[must_use]
    pub fn command_name(&self) -> String {
        format!("{}{}", Self::COMMAND_PREFIX, self.name)
    }

    #[must_use]
    pub fn description(&self) -> String {
        format!("Fuzzy find: {}", self.list)
    }
}

// ============================================================================
// Selection Types
// ============================================================================

/// One currently visible filtered candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchEntry {
    pub candidate: String,
    /// Grapheme indices that contributed to the match, sorted and deduplicated.
    /// Empty when no query is active.
    pub positions: Vec<usize>,
}

impl MatchEntry {
    /// Entry with no highlighted positions.
    #[must_use]
    pub fn plain(candidate: impl Into<String>) -> Self {
        Self {
            candidate: candidate.into(),
            positions: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_matched_at(&self, index: usize) -> bool {
        self.positions.binary_search(&index).is_ok()
    }
}

/// Terminal result of one selection session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    Selected(String),
    Cancelled,
}

impl SelectionOutcome {
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        match self {
            SelectionOutcome::Selected(item) => Some(item),
            SelectionOutcome::Cancelled => None,
        }
    }
}

// ============================================================================
// Notifications
// ============================================================================

/// Severity of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotifyLevel {
    Info,
    Warning,
    Error,
}

impl NotifyLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            NotifyLevel::Info => "info",
            NotifyLevel::Warning => "warning",
            NotifyLevel::Error => "error",
        }
    }
}
