//! Color theme and glyphs for the fzpick TUI.
//!
//! Uses the Kanagawa Wave palette by default with an optional high-contrast override.

use ratatui::style::{Color, Modifier, Style};

use fzpick_types::ui::UiOptions;

/// Kanagawa Wave color palette constants.
mod colors {
    use super::Color;

    pub const BG_DARK: Color = Color::Rgb(22, 22, 29); // sumiInk0
    pub const BG_HIGHLIGHT: Color = Color::Rgb(42, 42, 55); // sumiInk4
    pub const BORDER: Color = Color::Rgb(84, 84, 109); // sumiInk6

    pub const TEXT_PRIMARY: Color = Color::Rgb(220, 215, 186); // fujiWhite
    pub const TEXT_MUTED: Color = Color::Rgb(114, 113, 105); // fujiGray
    pub const TEXT_DISABLED: Color = Color::Rgb(113, 124, 124); // katanaGray

    pub const CYAN: Color = Color::Rgb(127, 180, 202); // springBlue
    pub const GREEN: Color = Color::Rgb(152, 187, 108); // springGreen
    pub const YELLOW: Color = Color::Rgb(230, 195, 132); // carpYellow
    pub const RED: Color = Color::Rgb(255, 93, 98); // peachRed
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg_dark: Color,
    pub bg_highlight: Color,
    pub border: Color,
    pub text_primary: Color,
    pub text_muted: Color,
    pub text_disabled: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg_dark: colors::BG_DARK,
            bg_highlight: colors::BG_HIGHLIGHT,
            border: colors::BORDER,
            text_primary: colors::TEXT_PRIMARY,
            text_muted: colors::TEXT_MUTED,
            text_disabled: colors::TEXT_DISABLED,
            accent: colors::CYAN,
            success: colors::GREEN,
            warning: colors::YELLOW,
            error: colors::RED,
        }
    }

    #[must_use]
    pub fn high_contrast() -> Self {
        Self {
            bg_dark: Color::Black,
            bg_highlight: Color::DarkGray,
            border: Color::Gray,
            text_primary: Color::White,
            text_muted: Color::Gray,
            text_disabled: Color::DarkGray,
            accent: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }
}

#[must_use]
pub fn palette(options: UiOptions) -> Palette {
    if options.high_contrast {
        Palette::high_contrast()
    } else {
        Palette::standard()
    }
}

/// ASCII/Unicode glyphs for borders, markers, and status icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub top_left: &'static str,
    pub top_right: &'static str,
    pub bottom_left: &'static str,
    pub bottom_right: &'static str,
    pub horizontal: &'static str,
    pub vertical: &'static str,
    pub tee_left: &'static str,
    pub tee_right: &'static str,
    pub selected: &'static str,
    pub prompt: &'static str,
    pub arrows: &'static str,
    pub bullet: &'static str,
    pub info: &'static str,
    pub warning: &'static str,
    pub error: &'static str,
    pub user: &'static str,
}

#[must_use]
pub fn glyphs(options: UiOptions) -> Glyphs {
    if options.ascii_only {
        Glyphs {
            top_left: "+",
            top_right: "+",
            bottom_left: "+",
            bottom_right: "+",
            horizontal: "-",
            vertical: "|",
            tee_left: "+",
            tee_right: "+",
            selected: ">",
            prompt: ">",
            arrows: "^v",
            bullet: "*",
            info: "i",
            warning: "!",
            error: "x",
            user: ">",
        }
    } else {
        Glyphs {
            top_left: "╭",
            top_right: "╮",
            bottom_left: "╰",
            bottom_right: "╯",
            horizontal: "─",
            vertical: "│",
            tee_left: "├",
            tee_right: "┤",
            selected: "→",
            prompt: ">",
            arrows: "↑↓",
            bullet: "•",
            info: "●",
            warning: "▲",
            error: "✗",
            user: "○",
        }
    }
}

/// Pre-defined styles for common UI elements.
pub mod styles {
    use super::{Modifier, Palette, Style};
    use fzpick_types::NotifyLevel;

    #[must_use]
    pub fn border(palette: &Palette) -> Style {
        Style::default().fg(palette.border)
    }

    #[must_use]
    pub fn title(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn accent(palette: &Palette) -> Style {
        Style::default().fg(palette.accent)
    }

    #[must_use]
    pub fn text(palette: &Palette) -> Style {
        Style::default().fg(palette.text_primary)
    }

    #[must_use]
    pub fn muted(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn dim(palette: &Palette) -> Style {
        Style::default().fg(palette.text_disabled)
    }

    /// Graphemes that contributed to a fuzzy match.
    #[must_use]
    pub fn matched(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.warning)
            .add_modifier(Modifier::BOLD)
    }

    /// Whole-row decoration of the current selection.
    #[must_use]
    pub fn selected_row(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.accent)
            .bg(palette.bg_highlight)
    }

    #[must_use]
    pub fn cursor() -> Style {
        Style::default().add_modifier(Modifier::REVERSED)
    }

    #[must_use]
    pub fn key_hint(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn user_message(palette: &Palette) -> Style {
        Style::default().fg(palette.text_primary)
    }

    #[must_use]
    pub fn notification(palette: &Palette, level: NotifyLevel) -> Style {
        let color = match level {
            NotifyLevel::Info => palette.success,
            NotifyLevel::Warning => palette.warning,
            NotifyLevel::Error => palette.error,
        };
        Style::default().fg(color)
    }
}

/// Icon shown next to a notification.
#[must_use]
pub fn level_glyph(glyphs: &Glyphs, level: fzpick_types::NotifyLevel) -> &'static str {
    match level {
        fzpick_types::NotifyLevel::Info => glyphs.info,
        fzpick_types::NotifyLevel::Warning => glyphs.warning,
        fzpick_types::NotifyLevel::Error => glyphs.error,
    }
}
