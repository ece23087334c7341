//! End-to-end invocations through the system shell.

use std::time::Duration;

use fzpick_engine::{CommandRegistry, InvocationOutcome, NotifyLevel, ResolvedCommand};

use crate::common::{HostEvent, RecordingHost, Workspace};

fn command(ws: &Workspace, name: &str) -> ResolvedCommand {
    CommandRegistry::new(ws.load())
        .get(name)
        .cloned()
        .unwrap_or_else(|| panic!("command {name} not configured"))
}

#[tokio::test]
async fn bash_action_runs_with_selected_candidate() {
    let ws = Workspace::new();
    ws.write_project(
        r#"{"commands": {"branches": {
            "list": "printf 'main\ndev\n'",
            "action": {"type": "bash", "template": "test {{selected}} = dev"}
        }}}"#,
    );
    let cmd = command(&ws, "branches");
    let mut host = RecordingHost::new().selecting("dev");

    let outcome = ws.pipeline().invoke(&cmd, &mut host).await;

    assert_eq!(
        outcome,
        InvocationOutcome::Executed {
            selected: "dev".into()
        }
    );
    assert_eq!(host.requests.len(), 1);
    assert_eq!(host.requests[0].title, "fzf:branches");
    assert_eq!(host.requests[0].candidates, ["main", "dev"]);
    assert_eq!(host.requests[0].max_visible, 2);
    assert_eq!(
        host.events,
        vec![HostEvent::Notify("✓ Done".into(), NotifyLevel::Info)]
    );
}

#[tokio::test]
async fn shorthand_action_fills_editor_with_trimmed_selection() {
    let ws = Workspace::new();
    ws.write_project(
        r#"{"commands": {"files": {"list": "printf '  notes.md  \n\n'", "action": "Read {{selected}}"}}}"#,
    );
    let cmd = command(&ws, "fzf:files");
    let mut host = RecordingHost::new().selecting("  notes.md  ");

    ws.pipeline().invoke(&cmd, &mut host).await;

    assert_eq!(host.requests[0].candidates, ["notes.md"]);
    assert_eq!(host.events, vec![HostEvent::Editor("Read notes.md".into())]);
}

#[tokio::test]
async fn failing_list_command_reports_exit_code() {
    let ws = Workspace::new();
    ws.write_project(
        r#"{"commands": {"branches": {"list": "echo oops >&2; exit 2", "action": "{{selected}}"}}}"#,
    );
    let cmd = command(&ws, "branches");
    let mut host = RecordingHost::new();

    let outcome = ws.pipeline().invoke(&cmd, &mut host).await;

    assert_eq!(outcome, InvocationOutcome::ListFailed);
    assert!(host.requests.is_empty());
    assert_eq!(
        host.notices(),
        [(
            "fzf:branches: list command failed (exit 2)".to_string(),
            NotifyLevel::Error
        )]
    );
}

#[tokio::test]
async fn blank_list_output_warns_without_opening_picker() {
    let ws = Workspace::new();
    ws.write_project(
        r#"{"commands": {"files": {"list": "printf '  \n\n'", "action": "{{selected}}"}}}"#,
    );
    let cmd = command(&ws, "files");
    let mut host = RecordingHost::new();

    let outcome = ws.pipeline().invoke(&cmd, &mut host).await;

    assert_eq!(outcome, InvocationOutcome::NoCandidates);
    assert!(host.requests.is_empty());
    assert_eq!(
        host.notices(),
        [("fzf:files: no candidates".to_string(), NotifyLevel::Warning)]
    );
}

#[tokio::test]
async fn cancelled_picker_runs_nothing() {
    let ws = Workspace::new();
    ws.write_project(
        r#"{"commands": {"files": {
            "list": "echo a",
            "action": {"type": "bash", "template": "touch picked"}
        }}}"#,
    );
    let cmd = command(&ws, "files");
    let mut host = RecordingHost::new();

    let outcome = ws.pipeline().invoke(&cmd, &mut host).await;

    assert_eq!(outcome, InvocationOutcome::Cancelled);
    assert!(host.events.is_empty());
    assert!(!ws.project_dir().join("picked").exists());
}

#[tokio::test]
async fn slow_list_command_times_out() {
    let ws = Workspace::new();
    ws.write_project(r#"{"commands": {"slow": {"list": "sleep 5", "action": "{{selected}}"}}}"#);
    let cmd = command(&ws, "slow");
    let mut host = RecordingHost::new();

    let outcome = ws
        .pipeline()
        .with_list_timeout(Duration::from_secs(1))
        .invoke(&cmd, &mut host)
        .await;

    assert_eq!(outcome, InvocationOutcome::ListFailed);
    assert_eq!(
        host.notices(),
        [(
            "fzf:slow: list command timed out after 1s".to_string(),
            NotifyLevel::Error
        )]
    );
}

#[tokio::test]
async fn bash_output_routes_by_mode() {
    let ws = Workspace::new();
    ws.write_project(
        r#"{"commands": {
            "to-editor": {"list": "echo x", "action": {"type": "bash", "template": "echo got {{selected}}", "output": "editor"}},
            "to-send": {"list": "echo x", "action": {"type": "bash", "template": "echo got {{selected}}", "output": "send"}},
            "to-notify": {"list": "echo x", "action": {"type": "bash", "template": "echo got {{selected}}"}}
        }}"#,
    );
    let pipeline = ws.pipeline();

    let mut host = RecordingHost::new().selecting("x");
    pipeline.invoke(&command(&ws, "to-editor"), &mut host).await;
    assert_eq!(host.events, vec![HostEvent::Editor("got x".into())]);

    let mut host = RecordingHost::new().selecting("x");
    pipeline.invoke(&command(&ws, "to-send"), &mut host).await;
    assert_eq!(host.events, vec![HostEvent::Sent("got x".into())]);

    let mut host = RecordingHost::new().selecting("x");
    pipeline.invoke(&command(&ws, "to-notify"), &mut host).await;
    assert_eq!(
        host.events,
        vec![HostEvent::Notify("✓ got x".into(), NotifyLevel::Info)]
    );
}

#[tokio::test]
async fn failing_action_reports_stderr() {
    let ws = Workspace::new();
    ws.write_project(
        r#"{"commands": {"files": {
            "list": "echo a",
            "action": {"type": "bash", "template": "echo partial; echo broken >&2; exit 3"}
        }}}"#,
    );
    let cmd = command(&ws, "files");
    let mut host = RecordingHost::new().selecting("a");

    ws.pipeline().invoke(&cmd, &mut host).await;

    assert_eq!(
        host.events,
        vec![HostEvent::Notify("✗ Exit 3: broken".into(), NotifyLevel::Error)]
    );
}

#[tokio::test]
async fn actions_run_in_the_project_directory() {
    let ws = Workspace::new();
    ws.write_project(
        r#"{"commands": {"files": {
            "list": "echo marker",
            "action": {"type": "bash", "template": "touch {{selected}}.picked"}
        }}}"#,
    );
    let cmd = command(&ws, "files");
    let mut host = RecordingHost::new().selecting("marker");

    ws.pipeline().invoke(&cmd, &mut host).await;

    assert!(ws.project_dir().join("marker.picked").exists());
}
