//! Terminal front end for fzpick using ratatui.

mod component;
mod host;
mod input;
mod keys;
mod selector;
mod session;
mod terminal;
mod theme;
mod view;

pub use component::Component;
pub use host::{OneshotHost, OneshotReport, SessionHost};
pub use input::InputPump;
pub use keys::{edit_key, selector_key, shortcut_of};
pub use selector::{FuzzySelector, MIN_PANEL_WIDTH, render_selector};
pub use session::{SessionKey, Submission, classify_key, parse_submission, run_session, status_line};
pub use terminal::{ScreenMode, StderrTerminal, TerminalSession};
pub use theme::{Glyphs, Palette, glyphs, level_glyph, palette, styles};
pub use view::{SessionView, TranscriptEntry, draw_inline, draw_session, overlay_width};
