//! Selection state machine for the fuzzy picker overlay.
//!
//! The overlay is always in the editing state; [`SelectorState::handle_key`]
//! reports when it closes with a selection or a cancellation.

use std::ops::Range;

use fzpick_types::ui::DraftInput;
use fzpick_types::{MatchEntry, SelectionOutcome};

use crate::matcher::{CandidateMatcher, NucleoMatcher};

/// Abstract picker input, already decoded from terminal events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorKey {
    Up,
    Down,
    PageUp,
    PageDown,
    Confirm,
    Cancel,
    Edit(EditKey),
}

/// Query-editing input forwarded to the text buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditKey {
    Char(char),
    Paste(String),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    DeleteWordBackward,
    ClearLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// Overlay stays open.
    Pending,
    Closed(SelectionOutcome),
}

/// State of one picker session.
///
/// Invariant: `selected < filtered.len()` whenever `filtered` is non-empty.
pub struct SelectorState {
    title: String,
    candidates: Vec<String>,
    filtered: Vec<MatchEntry>,
    selected: usize,
    max_visible: usize,
    query: DraftInput,
    matcher: Box<dyn CandidateMatcher + Send>,
}

impl SelectorState {
    #[must_use]
    pub fn new(title: impl Into<String>, candidates: Vec<String>, max_visible: usize) -> Self {
        Self::with_matcher(title, candidates, max_visible, Box::new(NucleoMatcher::new()))
    }

    #[must_use]
    pub fn with_matcher(
        title: impl Into<String>,
        candidates: Vec<String>,
        max_visible: usize,
        matcher: Box<dyn CandidateMatcher + Send>,
    ) -> Self {
        let filtered = candidates.iter().map(MatchEntry::plain).collect();
        Self {
            title: title.into(),
            candidates,
            filtered,
            selected: 0,
            max_visible: max_visible.max(1),
            query: DraftInput::new(),
            matcher,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn query(&self) -> &DraftInput {
        &self.query
    }

    #[must_use]
    pub fn filtered(&self) -> &[MatchEntry] {
        &self.filtered
    }

    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn selected_entry(&self) -> Option<&MatchEntry> {
        self.filtered.get(self.selected)
    }

    #[must_use]
    pub fn max_visible(&self) -> usize {
        self.max_visible
    }

    #[must_use]
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.query.is_focused()
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.query.set_focused(focused);
    }

    /// Apply one input. Keys are checked in priority order: navigation,
    /// confirm, cancel, then query editing.
    pub fn handle_key(&mut self, key: SelectorKey) -> InputOutcome {
        match key {
            SelectorKey::Up => self.move_up(),
            SelectorKey::Down => self.move_down(),
            SelectorKey::PageUp => self.page_up(),
            SelectorKey::PageDown => self.page_down(),
            SelectorKey::Confirm => {
                if let Some(entry) = self.filtered.get(self.selected) {
                    return InputOutcome::Closed(SelectionOutcome::Selected(
                        entry.candidate.clone(),
                    ));
                }
            }
            SelectorKey::Cancel => return InputOutcome::Closed(SelectionOutcome::Cancelled),
            SelectorKey::Edit(edit) => self.edit_query(edit),
        }
        InputOutcome::Pending
    }

    /// Range of `filtered` indices currently on screen.
    ///
    /// Centered on the selection, clamped to never scroll past either end.
    #[must_use]
    pub fn visible_window(&self) -> Range<usize> {
        let total = self.filtered.len();
        let visible = self.max_visible.min(total);
        let start = self
            .selected
            .saturating_sub(visible / 2)
            .min(total - visible);
        start..start + visible
    }

    /// Whether the list is longer than the window.
    #[must_use]
    pub fn is_scrollable(&self) -> bool {
        self.filtered.len() > self.max_visible
    }

    fn move_up(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        self.selected = if self.selected == 0 {
            self.filtered.len() - 1
        } else {
            self.selected - 1
        };
    }

    fn move_down(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        self.selected = if self.selected + 1 >= self.filtered.len() {
            0
        } else {
            self.selected + 1
        };
    }

    fn page_up(&mut self) {
        self.selected = self.selected.saturating_sub(self.page_size());
    }

    fn page_down(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        let last = self.filtered.len() - 1;
        self.selected = self.selected.saturating_add(self.page_size()).min(last);
    }

    fn page_size(&self) -> usize {
        self.max_visible.min(self.filtered.len()).max(1)
    }

    fn edit_query(&mut self, edit: EditKey) {
        let before = self.query.text().to_string();
        apply_edit(&mut self.query, edit);
        if self.query.text() != before {
            self.apply_filter();
        }
    }

    fn apply_filter(&mut self) {
        let query = self.query.text();
        self.filtered = if query.trim().is_empty() {
            self.candidates.iter().map(MatchEntry::plain).collect()
        } else {
            self.matcher.rank(&self.candidates, query)
        };
        self.selected = 0;
        tracing::trace!(
            query,
            matched = self.filtered.len(),
            total = self.candidates.len(),
            "Filter applied"
        );
    }
}

/// Apply an editing key to a text buffer.
pub fn apply_edit(input: &mut DraftInput, edit: EditKey) {
    match edit {
        EditKey::Char(c) => input.enter_char(c),
        EditKey::Paste(text) => input.enter_text(&text),
        EditKey::Backspace => input.delete_char(),
        EditKey::Delete => input.delete_char_forward(),
        EditKey::Left => input.move_cursor_left(),
        EditKey::Right => input.move_cursor_right(),
        EditKey::Home => input.move_cursor_start(),
        EditKey::End => input.move_cursor_end(),
        EditKey::DeleteWordBackward => input.delete_word_backwards(),
        EditKey::ClearLine => input.clear(),
    }
}

impl std::fmt::Debug for SelectorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectorState")
            .field("title", &self.title)
            .field("query", &self.query.text())
            .field("filtered", &self.filtered.len())
            .field("selected", &self.selected)
            .field("max_visible", &self.max_visible)
            .finish_non_exhaustive()
    }
}
