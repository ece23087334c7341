//! Interactive full-screen session: an edit line, a transcript, and
//! picker commands bound to slash commands and shortcuts.

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use fzpick_engine::{
    CommandRegistry, EditKey, Host, NotifyLevel, Pipeline, ResolvedCommand, apply_edit,
};
use fzpick_tools::CommandRunner;
use fzpick_types::ui::UiOptions;

use crate::host::SessionHost;
use crate::keys::{edit_key, shortcut_of};

const QUIT_COMMAND: &str = "/quit";

/// What a key press means to the session, before any state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionKey {
    Quit,
    ClearEditor,
    Submit,
    /// Run the command bound to a shortcut.
    Invoke(String),
    Edit(EditKey),
    Ignore,
}

/// What a submitted edit line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Empty,
    Quit,
    Invoke(String),
    /// `/fzf:<name>` with no such command.
    Unknown(String),
    Message(String),
}

/// Decode a key press. Reserved keys win over shortcuts, shortcuts over editing.
#[must_use]
pub fn classify_key(key: &KeyEvent, editor_empty: bool, registry: &CommandRegistry) -> SessionKey {
    if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return SessionKey::Ignore;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => {
            return if editor_empty {
                SessionKey::Quit
            } else {
                SessionKey::ClearEditor
            };
        }
        KeyCode::Char('d') if ctrl && editor_empty => return SessionKey::Quit,
        KeyCode::Enter if key.modifiers.is_empty() => return SessionKey::Submit,
        _ => {}
    }

    if let Some(command) = shortcut_of(key).and_then(|shortcut| registry.by_shortcut(&shortcut)) {
        return SessionKey::Invoke(command.name.clone());
    }
    edit_key(key).map_or(SessionKey::Ignore, SessionKey::Edit)
}

/// Interpret the submitted edit line.
#[must_use]
pub fn parse_submission(text: &str, registry: &CommandRegistry) -> Submission {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Submission::Empty;
    }
    if trimmed == QUIT_COMMAND {
        return Submission::Quit;
    }
    if let Some(rest) = trimmed.strip_prefix('/')
        && let Some(name) = rest.strip_prefix(ResolvedCommand::COMMAND_PREFIX)
    {
        let name = name.split_whitespace().next().unwrap_or_default();
        return match registry.get(name) {
            Some(command) => Submission::Invoke(command.name.clone()),
            None => Submission::Unknown(name.to_string()),
        };
    }
    Submission::Message(trimmed.to_string())
}

/// Status-bar text listing how to reach the configured commands.
#[must_use]
pub fn status_line(registry: &CommandRegistry) -> String {
    let mut parts = vec![format!("{} command(s)", registry.len())];
    parts.extend(registry.shortcuts().map(|(shortcut, command)| {
        format!("{shortcut} {}", command.command_name())
    }));
    parts.push("ctrl+c quit".to_string());
    parts.join("  ")
}

/// Run the full-screen session until the user quits.
pub async fn run_session<R: CommandRunner>(
    registry: &CommandRegistry,
    pipeline: &Pipeline<R>,
    options: UiOptions,
) -> Result<()> {
    let mut host = SessionHost::new(options)?;
    host.view_mut().set_status(status_line(registry));
    registry.announce(&mut host);

    let result = event_loop(&mut host, registry, pipeline).await;
    host.shutdown().await;
    result
}

async fn event_loop<R: CommandRunner>(
    host: &mut SessionHost,
    registry: &CommandRegistry,
    pipeline: &Pipeline<R>,
) -> Result<()> {
    loop {
        host.draw()?;
        let key = match host.next_event().await? {
            Event::Key(key) => key,
            Event::Paste(text) => {
                apply_edit(host.view_mut().editor_mut(), EditKey::Paste(text));
                continue;
            }
            _ => continue,
        };

        let editor_empty = host.view().editor().is_empty();
        let name = match classify_key(&key, editor_empty, registry) {
            SessionKey::Quit => return Ok(()),
            SessionKey::ClearEditor => {
                host.view_mut().editor_mut().clear();
                continue;
            }
            SessionKey::Edit(edit) => {
                apply_edit(host.view_mut().editor_mut(), edit);
                continue;
            }
            SessionKey::Ignore => continue,
            SessionKey::Invoke(name) => name,
            SessionKey::Submit => {
                let text = host.view_mut().editor_mut().take_text();
                match parse_submission(&text, registry) {
                    Submission::Empty => continue,
                    Submission::Quit => return Ok(()),
                    Submission::Message(message) => {
                        host.send_user_message(&message);
                        continue;
                    }
                    Submission::Unknown(name) => {
                        host.notify(
                            &format!("Unknown command: {}{name}", ResolvedCommand::COMMAND_PREFIX),
                            NotifyLevel::Warning,
                        );
                        continue;
                    }
                    Submission::Invoke(name) => name,
                }
            }
        };

        if let Some(command) = registry.get(&name) {
            let outcome = pipeline.invoke(command, host).await;
            tracing::debug!(command = %name, ?outcome, "Invocation finished");
        }
    }
}
