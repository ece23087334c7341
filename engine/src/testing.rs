//! Fakes shared by the engine's unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use fzpick_tools::{CommandRunner, ExecError, ExecOutput};
use fzpick_types::{NotifyLevel, SelectionOutcome};

use crate::host::{Host, SelectRequest};

enum Scripted {
    Exit(ExecOutput),
    TimedOut,
}

/// Runner answering from a fixed table. Unknown commands fail to spawn.
#[derive(Default)]
pub struct FakeRunner {
    script: HashMap<String, Scripted>,
    calls: Mutex<Vec<(String, Option<Duration>)>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exit(mut self, command: &str, code: i32, stdout: &str, stderr: &str) -> Self {
        self.script.insert(
            command.to_string(),
            Scripted::Exit(ExecOutput {
                exit_code: Some(code),
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            }),
        );
        self
    }

    pub fn with_timeout(mut self, command: &str) -> Self {
        self.script.insert(command.to_string(), Scripted::TimedOut);
        self
    }

    pub fn calls(&self) -> Vec<(String, Option<Duration>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for FakeRunner {
    async fn run(
        &self,
        command: &str,
        timeout: Option<Duration>,
    ) -> Result<ExecOutput, ExecError> {
        self.calls
            .lock()
            .unwrap()
            .push((command.to_string(), timeout));
        match self.script.get(command) {
            Some(Scripted::Exit(output)) => Ok(output.clone()),
            Some(Scripted::TimedOut) => Err(ExecError::TimedOut {
                timeout: timeout.unwrap_or_default(),
            }),
            None => Err(ExecError::Spawn {
                shell: "fake".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not scripted"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Notify(String, NotifyLevel),
    Editor(String),
    Sent(String),
}

/// Host that records every side effect and answers `select` from a queue.
pub struct RecordingHost {
    pub has_ui: bool,
    pub events: Vec<HostEvent>,
    pub requests: Vec<SelectRequest>,
    pub answers: VecDeque<SelectionOutcome>,
}

impl RecordingHost {
    pub fn interactive() -> Self {
        Self {
            has_ui: true,
            events: Vec::new(),
            requests: Vec::new(),
            answers: VecDeque::new(),
        }
    }

    pub fn headless() -> Self {
        Self {
            has_ui: false,
            ..Self::interactive()
        }
    }

    pub fn answering(mut self, outcome: SelectionOutcome) -> Self {
        self.answers.push_back(outcome);
        self
    }
}

impl Host for RecordingHost {
    fn has_ui(&self) -> bool {
        self.has_ui
    }

    fn notify(&mut self, message: &str, level: NotifyLevel) {
        self.events
            .push(HostEvent::Notify(message.to_string(), level));
    }

    fn set_editor_text(&mut self, text: &str) {
        self.events.push(HostEvent::Editor(text.to_string()));
    }

    fn send_user_message(&mut self, text: &str) {
        self.events.push(HostEvent::Sent(text.to_string()));
    }

    async fn select(&mut self, request: SelectRequest) -> SelectionOutcome {
        self.requests.push(request);
        self.answers
            .pop_front()
            .unwrap_or(SelectionOutcome::Cancelled)
    }
}
