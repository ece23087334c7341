//! Lookup of resolved commands by name and shortcut.

use fzpick_types::{NotifyLevel, ResolvedCommand};

use crate::host::Host;
use crate::shortcut::Shortcut;

/// Commands available for the rest of the session. Built once, read-only after.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<ResolvedCommand>,
    shortcuts: Vec<(Shortcut, usize)>,
}

impl CommandRegistry {
    /// Index `commands` and bind their shortcuts.
    ///
    /// Unparseable shortcuts and shortcuts already bound by an earlier
    /// command are logged and left unbound; the command itself stays.
    #[must_use]
    pub fn new(commands: Vec<ResolvedCommand>) -> Self {
        let mut shortcuts: Vec<(Shortcut, usize)> = Vec::new();
        for (index, command) in commands.iter().enumerate() {
            let Some(raw) = command.shortcut.as_deref() else {
                continue;
            };
            let shortcut = match raw.parse::<Shortcut>() {
                Ok(shortcut) => shortcut,
                Err(err) => {
                    tracing::warn!(command = %command.name, shortcut = raw, "Ignoring shortcut: {err}");
                    continue;
                }
            };
            if let Some((_, owner)) = shortcuts.iter().find(|(bound, _)| *bound == shortcut) {
                tracing::warn!(
                    command = %command.name,
                    shortcut = %shortcut,
                    bound_to = %commands[*owner].name,
                    "Ignoring duplicate shortcut"
                );
                continue;
            }
            shortcuts.push((shortcut, index));
        }

        tracing::debug!(
            commands = commands.len(),
            shortcuts = shortcuts.len(),
            "Command registry built"
        );
        Self {
            commands,
            shortcuts,
        }
    }

    #[must_use]
    pub fn commands(&self) -> &[ResolvedCommand] {
        &self.commands
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Find a command by config name (`branches`) or host name (`fzf:branches`).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ResolvedCommand> {
        let name = name.trim();
        let bare = name
            .strip_prefix(ResolvedCommand::COMMAND_PREFIX)
            .unwrap_or(name);
        self.commands.iter().find(|cmd| cmd.name == bare)
    }

    #[must_use]
    pub fn by_shortcut(&self, shortcut: &Shortcut) -> Option<&ResolvedCommand> {
        self.shortcuts
            .iter()
            .find(|(bound, _)| bound == shortcut)
            .and_then(|(_, index)| self.commands.get(*index))
    }

    /// Bound shortcuts in config order.
    pub fn shortcuts(&self) -> impl Iterator<Item = (&Shortcut, &ResolvedCommand)> {
        self.shortcuts
            .iter()
            .filter_map(|(shortcut, index)| Some((shortcut, self.commands.get(*index)?)))
    }

    /// Tell the host how many commands were loaded. Silent when there are none.
    pub fn announce<H: Host>(&self, host: &mut H) {
        if self.commands.is_empty() {
            return;
        }
        host.notify(
            &format!("fzf: {} command(s) loaded", self.commands.len()),
            NotifyLevel::Info,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::CommandRegistry;
    use crate::shortcut::{Shortcut, ShortcutKey};
    use crate::testing::{HostEvent, RecordingHost};
    use fzpick_types::{ActionKind, NotifyLevel, OutputMode, ResolvedAction, ResolvedCommand};

    fn command(name: &str, shortcut: Option<&str>) -> ResolvedCommand {
        ResolvedCommand {
            name: name.to_string(),
            list: "ls".to_string(),
            action: ResolvedAction {
                kind: ActionKind::Editor,
                template: "{{selected}}".to_string(),
                output: OutputMode::Notify,
            },
            shortcut: shortcut.map(str::to_string),
        }
    }

    #[test]
    fn lookup_by_bare_or_prefixed_name() {
        let registry = CommandRegistry::new(vec![command("files", None), command("branches", None)]);
        assert_eq!(registry.get("branches").unwrap().name, "branches");
        assert_eq!(registry.get("fzf:files").unwrap().name, "files");
        assert!(registry.get("fzf:missing").is_none());
    }

    #[test]
    fn shortcuts_resolve_to_commands() {
        let registry = CommandRegistry::new(vec![
            command("files", Some("ctrl+shift+f")),
            command("branches", Some("alt+b")),
        ]);
        let ctrl_shift_f = Shortcut::new(ShortcutKey::Char('f')).ctrl().shift();
        assert_eq!(registry.by_shortcut(&ctrl_shift_f).unwrap().name, "files");
        let alt_b = Shortcut::new(ShortcutKey::Char('b')).alt();
        assert_eq!(registry.by_shortcut(&alt_b).unwrap().name, "branches");
        assert_eq!(registry.shortcuts().count(), 2);
    }

    #[test]
    fn duplicate_shortcut_keeps_first_binding() {
        let registry = CommandRegistry::new(vec![
            command("first", Some("ctrl+g")),
            command("second", Some("Ctrl+G")),
        ]);
        let ctrl_g = Shortcut::new(ShortcutKey::Char('g')).ctrl();
        assert_eq!(registry.by_shortcut(&ctrl_g).unwrap().name, "first");
        assert_eq!(registry.shortcuts().count(), 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn invalid_shortcut_leaves_command_available() {
        let registry = CommandRegistry::new(vec![command("files", Some("hyper+q"))]);
        assert_eq!(registry.shortcuts().count(), 0);
        assert!(registry.get("files").is_some());
    }

    #[test]
    fn announce_counts_commands() {
        let registry = CommandRegistry::new(vec![command("a", None), command("b", None)]);
        let mut host = RecordingHost::interactive();
        registry.announce(&mut host);
        assert_eq!(
            host.events,
            vec![HostEvent::Notify(
                "fzf: 2 command(s) loaded".into(),
                NotifyLevel::Info
            )]
        );
    }

    #[test]
    fn announce_is_silent_when_empty() {
        let registry = CommandRegistry::new(Vec::new());
        let mut host = RecordingHost::interactive();
        registry.announce(&mut host);
        assert!(host.events.is_empty());
        assert!(registry.is_empty());
    }
}
