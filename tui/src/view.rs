//! Session screen: transcript, editor line, status bar, and overlay placement.

use std::collections::VecDeque;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use fzpick_engine::NotifyLevel;
use fzpick_types::ui::{DraftInput, UiOptions};

use crate::component::Component;
use crate::selector::{FuzzySelector, sanitize};
use crate::theme::{Glyphs, Palette, glyphs, level_glyph, palette, styles};

/// Transcript entries kept by the session view.
pub const MAX_TRANSCRIPT_ENTRIES: usize = 200;

/// Widest the overlay gets in full-screen mode.
const MAX_OVERLAY_WIDTH: u16 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEntry {
    /// A message submitted by the user or by a `send` action.
    Sent(String),
    Notice { message: String, level: NotifyLevel },
}

/// Everything the full-screen session draws besides the overlay.
#[derive(Debug)]
pub struct SessionView {
    editor: DraftInput,
    transcript: VecDeque<TranscriptEntry>,
    status: String,
    palette: Palette,
    glyphs: Glyphs,
    options: UiOptions,
}

impl SessionView {
    #[must_use]
    pub fn new(options: UiOptions) -> Self {
        let mut editor = DraftInput::new();
        editor.set_focused(true);
        Self {
            editor,
            transcript: VecDeque::new(),
            status: String::new(),
            palette: palette(options),
            glyphs: glyphs(options),
            options,
        }
    }

    #[must_use]
    pub fn options(&self) -> UiOptions {
        self.options
    }

    #[must_use]
    pub fn editor(&self) -> &DraftInput {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut DraftInput {
        &mut self.editor
    }

    #[must_use]
    pub fn transcript(&self) -> &VecDeque<TranscriptEntry> {
        &self.transcript
    }

    /// Append an entry, dropping the oldest past [`MAX_TRANSCRIPT_ENTRIES`].
    pub fn push(&mut self, entry: TranscriptEntry) {
        if self.transcript.len() == MAX_TRANSCRIPT_ENTRIES {
            self.transcript.pop_front();
        }
        self.transcript.push_back(entry);
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// The last `max_rows` transcript rows, oldest first.
    fn transcript_lines(&self, max_rows: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for entry in self.transcript.iter().rev() {
            if lines.len() >= max_rows {
                break;
            }
            let (glyph, glyph_style, text, text_style) = match entry {
                TranscriptEntry::Sent(text) => (
                    self.glyphs.user,
                    styles::accent(&self.palette),
                    text,
                    styles::user_message(&self.palette),
                ),
                TranscriptEntry::Notice { message, level } => {
                    let style = styles::notification(&self.palette, *level);
                    (level_glyph(&self.glyphs, *level), style, message, style)
                }
            };
            let rows: Vec<Line<'static>> = text
                .split('\n')
                .enumerate()
                .map(|(i, row)| {
                    let lead = if i == 0 { glyph } else { " " };
                    Line::from(vec![
                        Span::styled(format!("{lead} "), glyph_style),
                        Span::styled(sanitize(row), text_style),
                    ])
                })
                .collect();
            lines.extend(rows.into_iter().rev());
        }
        lines.truncate(max_rows);
        lines.reverse();
        lines
    }
}

/// Draw the session screen and, when open, the picker overlay over it.
pub fn draw_session(frame: &mut Frame, view: &SessionView, overlay: Option<&mut FuzzySelector>) {
    let area = frame.area();
    let bg = Block::default().style(Style::default().bg(view.palette.bg_dark));
    frame.render_widget(bg, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    draw_transcript(frame, view, chunks[0]);
    let cursor = draw_editor(frame, view, chunks[1]);
    draw_status(frame, view, chunks[2]);

    match overlay {
        Some(selector) => draw_overlay(frame, area, selector),
        None => frame.set_cursor_position(cursor),
    }
}

/// Draw only the picker, anchored to the top-left of the frame.
pub fn draw_inline(frame: &mut Frame, selector: &mut FuzzySelector) {
    let area = frame.area();
    let width = area.width.min(MAX_OVERLAY_WIDTH);
    let lines = selector.render(width).to_vec();
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).min(area.height);
    let rect = Rect {
        x: area.x,
        y: area.y,
        width,
        height,
    };
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines), rect);
}

/// Width the overlay takes inside a terminal `width` columns wide.
#[must_use]
pub fn overlay_width(width: u16) -> u16 {
    if width > 24 {
        (width - 4).min(MAX_OVERLAY_WIDTH)
    } else {
        width
    }
}

fn draw_overlay(frame: &mut Frame, area: Rect, selector: &mut FuzzySelector) {
    let width = overlay_width(area.width);
    let lines = selector.render(width).to_vec();
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).min(area.height);
    let rect = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines), rect);
}

fn draw_transcript(frame: &mut Frame, view: &SessionView, area: Rect) {
    let lines = view.transcript_lines(usize::from(area.height));
    frame.render_widget(Paragraph::new(lines), area);
}

/// Returns where the terminal cursor belongs.
fn draw_editor(frame: &mut Frame, view: &SessionView, area: Rect) -> (u16, u16) {
    let palette = &view.palette;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if view.options.ascii_only {
            BorderType::Plain
        } else {
            BorderType::Rounded
        })
        .border_style(styles::border(palette));
    let inner = block.inner(area);

    let prompt = format!("{} ", view.glyphs.prompt);
    let editor = &view.editor;
    let before: String = editor
        .text()
        .graphemes(true)
        .take(editor.cursor())
        .collect();
    let column = prompt.width() + sanitize(&before).width();

    let line = Line::from(vec![
        Span::styled(prompt, styles::accent(palette)),
        Span::styled(sanitize(editor.text()), styles::text(palette)),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), area);

    let x = inner
        .x
        .saturating_add(u16::try_from(column).unwrap_or(u16::MAX))
        .min(inner.right().saturating_sub(1));
    (x, inner.y)
}

fn draw_status(frame: &mut Frame, view: &SessionView, area: Rect) {
    let line = Line::from(Span::styled(
        format!(" {}", view.status),
        styles::key_hint(&view.palette),
    ));
    frame.render_widget(Paragraph::new(line), area);
}
