//! Keyboard shortcut strings such as `ctrl+shift+f`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortcutError {
    #[error("shortcut is empty")]
    Empty,
    #[error("shortcut has modifiers but no key")]
    MissingKey,
    #[error("unknown modifier `{0}`")]
    UnknownModifier(String),
    #[error("unknown key `{0}`")]
    UnknownKey(String),
    #[error("`{0}` needs ctrl or alt; it would shadow typing")]
    NeedsModifier(String),
}

/// Non-modifier part of a shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutKey {
    /// Always stored lowercase; shift is a separate flag.
    Char(char),
    F(u8),
    Enter,
    Tab,
    Space,
    Esc,
    Backspace,
    Delete,
    Insert,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

impl ShortcutKey {
    fn parse(raw: &str) -> Result<Self, ShortcutError> {
        let mut chars = raw.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(ShortcutKey::Char(c.to_ascii_lowercase()));
        }

        let key = match raw {
            "enter" | "return" => ShortcutKey::Enter,
            "tab" => ShortcutKey::Tab,
            "space" => ShortcutKey::Space,
            "esc" | "escape" => ShortcutKey::Esc,
            "backspace" => ShortcutKey::Backspace,
            "delete" | "del" => ShortcutKey::Delete,
            "insert" | "ins" => ShortcutKey::Insert,
            "up" => ShortcutKey::Up,
            "down" => ShortcutKey::Down,
            "left" => ShortcutKey::Left,
            "right" => ShortcutKey::Right,
            "home" => ShortcutKey::Home,
            "end" => ShortcutKey::End,
            "pageup" | "pgup" => ShortcutKey::PageUp,
            "pagedown" | "pgdn" => ShortcutKey::PageDown,
            other => match other.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                Some(n @ 1..=24) => ShortcutKey::F(n),
                _ => return Err(ShortcutError::UnknownKey(other.to_string())),
            },
        };
        Ok(key)
    }

    fn name(self) -> String {
        match self {
            ShortcutKey::Char(c) => c.to_string(),
            ShortcutKey::F(n) => format!("f{n}"),
            ShortcutKey::Enter => "enter".into(),
            ShortcutKey::Tab => "tab".into(),
            ShortcutKey::Space => "space".into(),
            ShortcutKey::Esc => "esc".into(),
            ShortcutKey::Backspace => "backspace".into(),
            ShortcutKey::Delete => "delete".into(),
            ShortcutKey::Insert => "insert".into(),
            ShortcutKey::Up => "up".into(),
            ShortcutKey::Down => "down".into(),
            ShortcutKey::Left => "left".into(),
            ShortcutKey::Right => "right".into(),
            ShortcutKey::Home => "home".into(),
            ShortcutKey::End => "end".into(),
            ShortcutKey::PageUp => "pageup".into(),
            ShortcutKey::PageDown => "pagedown".into(),
        }
    }
}

/// A key plus modifier flags, comparable against decoded key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shortcut {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub key: ShortcutKey,
}

impl Shortcut {
    #[must_use]
    pub const fn new(key: ShortcutKey) -> Self {
        Self {
            ctrl: false,
            alt: false,
            shift: false,
            key,
        }
    }

    #[must_use]
    pub const fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    #[must_use]
    pub const fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    #[must_use]
    pub const fn shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

impl FromStr for Shortcut {
    type Err = ShortcutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(ShortcutError::Empty);
        }

        let mut parts: Vec<&str> = normalized.split('+').map(str::trim).collect();
        // `ctrl++` names the plus key.
        if normalized.ends_with("++") {
            parts.truncate(parts.len() - 2);
            parts.push("+");
        }
        let Some((key, modifiers)) = parts.split_last() else {
            return Err(ShortcutError::Empty);
        };
        if key.is_empty() {
            return Err(ShortcutError::MissingKey);
        }

        let mut shortcut = Shortcut::new(ShortcutKey::parse(key)?);
        for modifier in modifiers {
            match *modifier {
                "ctrl" | "control" => shortcut.ctrl = true,
                "alt" | "option" | "meta" => shortcut.alt = true,
                "shift" => shortcut.shift = true,
                other => return Err(ShortcutError::UnknownModifier(other.to_string())),
            }
        }

        if matches!(shortcut.key, ShortcutKey::Char(_) | ShortcutKey::Space)
            && !shortcut.ctrl
            && !shortcut.alt
        {
            return Err(ShortcutError::NeedsModifier(s.trim().to_string()));
        }

        Ok(shortcut)
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            f.write_str("ctrl+")?;
        }
        if self.alt {
            f.write_str("alt+")?;
        }
        if self.shift {
            f.write_str("shift+")?;
        }
        f.write_str(&self.key.name())
    }
}
