//! Decoding crossterm events into picker keys, edit keys, and shortcuts.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use fzpick_engine::{EditKey, SelectorKey, Shortcut, ShortcutKey};

fn is_press(key: &KeyEvent) -> bool {
    matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat)
}

/// Map a terminal event to a picker key. Releases, mouse, focus, and resize
/// events map to `None`.
#[must_use]
pub fn selector_key(event: &Event) -> Option<SelectorKey> {
    let key = match event {
        Event::Key(key) if is_press(key) => key,
        Event::Paste(text) => return Some(SelectorKey::Edit(EditKey::Paste(text.clone()))),
        _ => return None,
    };

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let selector = match key.code {
        KeyCode::Up => SelectorKey::Up,
        KeyCode::Down => SelectorKey::Down,
        KeyCode::Char('p') if ctrl => SelectorKey::Up,
        KeyCode::Char('n') if ctrl => SelectorKey::Down,
        KeyCode::PageUp => SelectorKey::PageUp,
        KeyCode::PageDown => SelectorKey::PageDown,
        KeyCode::Enter => SelectorKey::Confirm,
        KeyCode::Esc => SelectorKey::Cancel,
        KeyCode::Char('c') if ctrl => SelectorKey::Cancel,
        _ => SelectorKey::Edit(edit_key(key)?),
    };
    Some(selector)
}

/// Map a key press to a single-line editing operation.
#[must_use]
pub fn edit_key(key: &KeyEvent) -> Option<EditKey> {
    if !is_press(key) {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    let edit = match key.code {
        KeyCode::Char('a') if ctrl => EditKey::Home,
        KeyCode::Char('e') if ctrl => EditKey::End,
        KeyCode::Char('w') if ctrl => EditKey::DeleteWordBackward,
        KeyCode::Char('u') if ctrl => EditKey::ClearLine,
        KeyCode::Char(c) if !ctrl && !alt && !c.is_control() => EditKey::Char(c),
        KeyCode::Backspace if alt || ctrl => EditKey::DeleteWordBackward,
        KeyCode::Backspace => EditKey::Backspace,
        KeyCode::Delete => EditKey::Delete,
        KeyCode::Left => EditKey::Left,
        KeyCode::Right => EditKey::Right,
        KeyCode::Home => EditKey::Home,
        KeyCode::End => EditKey::End,
        _ => return None,
    };
    Some(edit)
}

/// Express a key press as a [`Shortcut`] for registry lookup.
///
/// Terminals report shifted letters as uppercase characters; those are folded
/// back to lowercase with the shift flag set.
#[must_use]
pub fn shortcut_of(key: &KeyEvent) -> Option<Shortcut> {
    if !is_press(key) {
        return None;
    }
    let mut shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let code = match key.code {
        KeyCode::Char(' ') => ShortcutKey::Space,
        KeyCode::Char(c) if c.is_uppercase() => {
            shift = true;
            ShortcutKey::Char(c.to_lowercase().next().unwrap_or(c))
        }
        KeyCode::Char(c) => ShortcutKey::Char(c),
        KeyCode::F(n) => ShortcutKey::F(n),
        KeyCode::Enter => ShortcutKey::Enter,
        KeyCode::Tab => ShortcutKey::Tab,
        KeyCode::BackTab => {
            shift = true;
            ShortcutKey::Tab
        }
        KeyCode::Esc => ShortcutKey::Esc,
        KeyCode::Backspace => ShortcutKey::Backspace,
        KeyCode::Delete => ShortcutKey::Delete,
        KeyCode::Insert => ShortcutKey::Insert,
        KeyCode::Up => ShortcutKey::Up,
        KeyCode::Down => ShortcutKey::Down,
        KeyCode::Left => ShortcutKey::Left,
        KeyCode::Right => ShortcutKey::Right,
        KeyCode::Home => ShortcutKey::Home,
        KeyCode::End => ShortcutKey::End,
        KeyCode::PageUp => ShortcutKey::PageUp,
        KeyCode::PageDown => ShortcutKey::PageDown,
        _ => return None,
    };
    Some(Shortcut {
        ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
        alt: key.modifiers.contains(KeyModifiers::ALT),
        shift,
        key: code,
    })
}
