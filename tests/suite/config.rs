//! Global and project configs feeding the registry.

use fzpick_engine::{ActionKind, CommandRegistry, OutputMode, Shortcut};

use crate::common::Workspace;

#[test]
fn project_overrides_global_and_keeps_position() {
    let ws = Workspace::new();
    ws.write_global(
        r#"{"commands": {
            "branches": {"list": "git branch", "action": "checkout {{selected}}"},
            "files": {"list": "ls", "action": "Read {{selected}}"}
        }}"#,
    );
    ws.write_project(
        r#"{"commands": {
            "branches": {
                "list": "git branch --all",
                "action": {"type": "bash", "template": "git checkout {{selected}}"},
                "shortcut": "ctrl+b"
            },
            "tests": {"list": "ls tests", "action": {"type": "send", "template": "run {{selected}}"}}
        }}"#,
    );

    let commands = ws.load();
    let names: Vec<_> = commands.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["branches", "files", "tests"]);

    let branches = &commands[0];
    assert_eq!(branches.list, "git branch --all");
    assert_eq!(branches.action.kind, ActionKind::Bash);
    assert_eq!(branches.action.output, OutputMode::Notify);
    assert_eq!(branches.shortcut.as_deref(), Some("ctrl+b"));

    assert_eq!(commands[1].action.kind, ActionKind::Editor);
    assert_eq!(commands[2].action.kind, ActionKind::Send);
}

#[test]
fn broken_project_config_keeps_global_commands() {
    let ws = Workspace::new();
    ws.write_global(r#"{"commands": {"files": {"list": "ls", "action": "{{selected}}"}}}"#);
    ws.write_project("{ not json");

    let commands = ws.load();
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].name, "files");
}

#[test]
fn registry_resolves_names_and_shortcuts_from_config() {
    let ws = Workspace::new();
    ws.write_project(
        r#"{"commands": {
            "branches": {"list": "git branch", "action": "{{selected}}", "shortcut": "ctrl+b"},
            "stash": {"list": "git stash list", "action": "{{selected}}", "shortcut": "not a key"}
        }}"#,
    );

    let registry = CommandRegistry::new(ws.load());
    assert_eq!(registry.len(), 2);
    assert!(registry.get("fzf:stash").is_some());

    let ctrl_b: Shortcut = "ctrl+b".parse().unwrap();
    assert_eq!(
        registry.by_shortcut(&ctrl_b).map(|c| c.name.as_str()),
        Some("branches")
    );
    assert_eq!(registry.shortcuts().count(), 1);
}

#[test]
fn no_config_files_means_no_commands() {
    let ws = Workspace::new();
    assert!(ws.load().is_empty());
    assert!(CommandRegistry::new(ws.load()).is_empty());
}
