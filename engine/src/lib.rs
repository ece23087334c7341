//! Core engine for fzpick: selection state machine and invocation pipeline.
//!
//! This crate contains no terminal dependencies. Rendering and terminal
//! input live in `fzpick-tui`; the host surface is abstracted by [`Host`].

mod executor;
mod host;
mod matcher;
mod pipeline;
mod registry;
mod selector;
mod shortcut;
#[cfg(test)]
mod testing;

pub use executor::{NOTIFY_PREVIEW_CHARS, execute_action};
pub use host::{Host, SelectRequest};
pub use matcher::{CandidateMatcher, NucleoMatcher};
pub use pipeline::{
    INTERACTIVE_REQUIRED, InvocationOutcome, LIST_TIMEOUT, MAX_VISIBLE_ROWS, Pipeline,
};
pub use registry::CommandRegistry;
pub use selector::{EditKey, InputOutcome, SelectorKey, SelectorState, apply_edit};
pub use shortcut::{Shortcut, ShortcutError, ShortcutKey};

pub use fzpick_types::{
    ActionKind, MatchEntry, NotifyLevel, OutputMode, ResolvedAction, ResolvedCommand,
    SelectionOutcome,
};
