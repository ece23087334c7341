//! Bordered fuzzy-selector panel.

use crossterm::event::Event;
use ratatui::{
    style::Style,
    text::{Line, Span},
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use fzpick_engine::{InputOutcome, MatchEntry, SelectRequest, SelectorState};
use fzpick_types::ui::{DraftInput, UiOptions};

use crate::component::Component;
use crate::keys::selector_key;
use crate::theme::{Glyphs, Palette, glyphs, palette, styles};

/// Narrowest panel that still has room for both borders and content.
pub const MIN_PANEL_WIDTH: u16 = 4;

/// Rows around the entry list: borders, title, query, separator, help.
const CHROME_ROWS: usize = 6;

/// The picker overlay: selection state plus its rendering.
pub struct FuzzySelector {
    state: SelectorState,
    palette: Palette,
    glyphs: Glyphs,
    cache: Option<(u16, Vec<Line<'static>>)>,
}

impl FuzzySelector {
    #[must_use]
    pub fn new(state: SelectorState, options: UiOptions) -> Self {
        Self {
            state,
            palette: palette(options),
            glyphs: glyphs(options),
            cache: None,
        }
    }

    #[must_use]
    pub fn from_request(request: SelectRequest, options: UiOptions) -> Self {
        let state = SelectorState::new(request.title, request.candidates, request.max_visible);
        let mut selector = Self::new(state, options);
        selector.set_focused(true);
        selector
    }

    #[must_use]
    pub fn state(&self) -> &SelectorState {
        &self.state
    }

    /// Tallest the panel can get for its candidate set.
    #[must_use]
    pub fn max_height(&self) -> u16 {
        let rows = self.state.max_visible().min(self.state.candidate_count()).max(1);
        let indicator = usize::from(self.state.candidate_count() > self.state.max_visible());
        u16::try_from(rows + CHROME_ROWS + indicator).unwrap_or(u16::MAX)
    }
}

impl Component for FuzzySelector {
    fn render(&mut self, width: u16) -> &[Line<'static>] {
        let fresh = matches!(&self.cache, Some((cached, _)) if *cached == width);
        if !fresh {
            let lines = render_selector(&self.state, width, &self.palette, &self.glyphs);
            self.cache = Some((width, lines));
        }
        match &self.cache {
            Some((_, lines)) => lines,
            None => &[],
        }
    }

    fn invalidate(&mut self) {
        self.cache = None;
    }

    fn handle_input(&mut self, event: &Event) -> InputOutcome {
        if let Event::Resize(..) = event {
            self.invalidate();
            return InputOutcome::Pending;
        }
        let Some(key) = selector_key(event) else {
            return InputOutcome::Pending;
        };
        self.invalidate();
        self.state.handle_key(key)
    }

    fn set_focused(&mut self, focused: bool) {
        if self.state.is_focused() != focused {
            self.invalidate();
        }
        self.state.set_focused(focused);
    }

    fn is_focused(&self) -> bool {
        self.state.is_focused()
    }
}

/// Render the panel for `state` at exactly `width` columns.
///
/// Every returned line spans the full width; `width` below
/// [`MIN_PANEL_WIDTH`] is treated as that minimum.
#[must_use]
pub fn render_selector(
    state: &SelectorState,
    width: u16,
    palette: &Palette,
    glyphs: &Glyphs,
) -> Vec<Line<'static>> {
    let inner = usize::from(width.max(MIN_PANEL_WIDTH)) - 2;
    let border = styles::border(palette);
    let mut lines = Vec::with_capacity(state.max_visible() + CHROME_ROWS + 1);

    lines.push(rule(glyphs.top_left, glyphs.top_right, inner, glyphs, border));
    lines.push(box_line(
        vec![
            Span::raw(" "),
            Span::styled(state.title().to_string(), styles::title(palette)),
        ],
        inner,
        Style::default(),
        glyphs,
        border,
    ));
    lines.push(box_line(
        query_spans(state.query(), inner, palette, glyphs),
        inner,
        Style::default(),
        glyphs,
        border,
    ));
    lines.push(rule(glyphs.tee_left, glyphs.tee_right, inner, glyphs, border));

    let filtered = state.filtered();
    if filtered.is_empty() {
        lines.push(box_line(
            vec![Span::styled("  No matches", styles::muted(palette))],
            inner,
            Style::default(),
            glyphs,
            border,
        ));
    } else {
        for index in state.visible_window() {
            let selected = index == state.selected_index();
            let row_style = if selected {
                styles::selected_row(palette)
            } else {
                Style::default()
            };
            let marker = if selected {
                format!("{} ", glyphs.selected)
            } else {
                "  ".to_string()
            };
            let mut spans = vec![Span::styled(marker, row_style)];
            spans.extend(entry_spans(&filtered[index], selected, palette));
            lines.push(box_line(spans, inner, row_style, glyphs, border));
        }

        if state.is_scrollable() {
            let info = format!("  ({}/{})", state.selected_index() + 1, filtered.len());
            lines.push(box_line(
                vec![Span::styled(info, styles::dim(palette))],
                inner,
                Style::default(),
                glyphs,
                border,
            ));
        }
    }

    let help = format!(
        " {} navigate {} enter select {} esc cancel",
        glyphs.arrows, glyphs.bullet, glyphs.bullet
    );
    lines.push(box_line(
        vec![Span::styled(help, styles::dim(palette))],
        inner,
        Style::default(),
        glyphs,
        border,
    ));
    lines.push(rule(
        glyphs.bottom_left,
        glyphs.bottom_right,
        inner,
        glyphs,
        border,
    ));
    lines
}

fn rule(
    left: &'static str,
    right: &'static str,
    inner: usize,
    glyphs: &Glyphs,
    border: Style,
) -> Line<'static> {
    Line::from(vec![
        Span::styled(left, border),
        Span::styled(glyphs.horizontal.repeat(inner), border),
        Span::styled(right, border),
    ])
}

/// Wrap `content` in side borders, fitted to exactly `inner` columns.
fn box_line(
    content: Vec<Span<'static>>,
    inner: usize,
    pad_style: Style,
    glyphs: &Glyphs,
    border: Style,
) -> Line<'static> {
    let mut spans = Vec::with_capacity(content.len() + 3);
    spans.push(Span::styled(glyphs.vertical, border));
    spans.extend(fit_spans(content, inner, pad_style));
    spans.push(Span::styled(glyphs.vertical, border));
    Line::from(spans)
}

/// Truncate or pad `spans` to exactly `width` display columns.
///
/// Truncation never splits a grapheme; a wide grapheme that would straddle
/// the edge is dropped and the gap padded.
fn fit_spans(spans: Vec<Span<'static>>, width: usize, pad_style: Style) -> Vec<Span<'static>> {
    let mut out = Vec::with_capacity(spans.len() + 1);
    let mut used = 0;

    'spans: for span in spans {
        let text = sanitize(&span.content);
        let text_width = text.width();
        if used + text_width <= width {
            used += text_width;
            out.push(Span::styled(text, span.style));
            continue;
        }

        let mut kept = String::new();
        for g in text.graphemes(true) {
            let w = g.width();
            if used + w > width {
                if !kept.is_empty() {
                    out.push(Span::styled(kept, span.style));
                }
                break 'spans;
            }
            used += w;
            kept.push_str(g);
        }
        out.push(Span::styled(kept, span.style));
    }

    if used < width {
        out.push(Span::styled(" ".repeat(width - used), pad_style));
    }
    out
}

/// Replace control characters so they cannot move the terminal cursor.
pub(crate) fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

fn entry_spans(entry: &MatchEntry, selected: bool, palette: &Palette) -> Vec<Span<'static>> {
    let (base, hit) = if selected {
        let row = styles::selected_row(palette);
        (row, row.patch(styles::matched(palette)))
    } else {
        (styles::text(palette), styles::matched(palette))
    };

    if entry.positions.is_empty() {
        return vec![Span::styled(entry.candidate.clone(), base)];
    }

    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_matched = false;
    for (index, g) in entry.candidate.graphemes(true).enumerate() {
        let matched = entry.is_matched_at(index);
        if matched != run_matched && !run.is_empty() {
            let style = if run_matched { hit } else { base };
            spans.push(Span::styled(std::mem::take(&mut run), style));
        }
        run_matched = matched;
        run.push_str(g);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, if run_matched { hit } else { base }));
    }
    spans
}

fn grapheme_width(g: &str) -> usize {
    if g.chars().any(char::is_control) {
        1
    } else {
        g.width()
    }
}

/// Prompt plus query text, scrolled so the cursor stays in view.
fn query_spans(
    query: &DraftInput,
    inner: usize,
    palette: &Palette,
    glyphs: &Glyphs,
) -> Vec<Span<'static>> {
    let prompt = format!("{} ", glyphs.prompt);
    let available = inner.saturating_sub(prompt.width());
    let graphemes: Vec<&str> = query.text().graphemes(true).collect();
    let cursor = query.cursor().min(graphemes.len());
    let cursor_width = graphemes
        .get(cursor)
        .map_or(1, |g| grapheme_width(g).max(1));

    let mut start = 0;
    let mut before: usize = graphemes[..cursor].iter().map(|g| grapheme_width(g)).sum();
    while start < cursor && before + cursor_width > available {
        before -= grapheme_width(graphemes[start]);
        start += 1;
    }

    let text_style = styles::text(palette);
    let mut spans = vec![Span::styled(prompt, styles::accent(palette))];
    spans.push(Span::styled(graphemes[start..cursor].concat(), text_style));
    if query.is_focused() {
        let (under, rest) = match graphemes.get(cursor) {
            Some(g) => ((*g).to_string(), cursor + 1),
            None => (" ".to_string(), cursor),
        };
        spans.push(Span::styled(under, text_style.patch(styles::cursor())));
        spans.push(Span::styled(graphemes[rest..].concat(), text_style));
    } else {
        spans.push(Span::styled(graphemes[cursor..].concat(), text_style));
    }
    spans
}
