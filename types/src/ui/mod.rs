//! UI-facing types shared by the engine and the terminal front end.

mod input;

pub use input::DraftInput;

/// Rendering options chosen at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiOptions {
    /// Use ASCII glyphs for borders, markers, and arrows.
    pub ascii_only: bool,
    pub high_contrast: bool,
}
