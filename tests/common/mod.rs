//! Shared fixtures for the integration suite.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use fzpick_engine::{Host, NotifyLevel, Pipeline, SelectRequest, SelectionOutcome};
use fzpick_tools::ShellRunner;
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Notify(String, NotifyLevel),
    Editor(String),
    Sent(String),
}

/// Host that records side effects and answers pickers from a queue.
///
/// Without a queued answer the picker is cancelled.
pub struct RecordingHost {
    pub events: Vec<HostEvent>,
    pub requests: Vec<SelectRequest>,
    answers: VecDeque<SelectionOutcome>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            requests: Vec::new(),
            answers: VecDeque::new(),
        }
    }

    pub fn selecting(mut self, candidate: &str) -> Self {
        self.answers
            .push_back(SelectionOutcome::Selected(candidate.to_string()));
        self
    }

    pub fn notices(&self) -> Vec<(String, NotifyLevel)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                HostEvent::Notify(message, level) => Some((message.clone(), *level)),
                _ => None,
            })
            .collect()
    }
}

impl Host for RecordingHost {
    fn has_ui(&self) -> bool {
        true
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

/// A project directory with an isolated global config next to it.
pub struct Workspace {
    root: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("tempdir"),
        }
    }

    pub fn project_dir(&self) -> PathBuf {
        let dir = self.root.path().join("project");
        fs::create_dir_all(&dir).expect("create project dir");
        dir
    }

    pub fn global_path(&self) -> PathBuf {
        self.root.path().join("agent").join("fzf.json")
    }

    pub fn write_global(&self, json: &str) {
        write(&self.global_path(), json);
    }

    pub fn write_project(&self, json: &str) {
        write(&fzpick_config::project_config_path(&self.project_dir()), json);
    }

    pub fn load(&self) -> Vec<fzpick_engine::ResolvedCommand> {
        fzpick_config::load_config_from(
            Some(&self.global_path()),
            &fzpick_config::project_config_path(&self.project_dir()),
        )
    }

    /// Pipeline running commands through the detected shell inside the project.
    pub fn pipeline(&self) -> Pipeline<ShellRunner> {
        Pipeline::new(ShellRunner::detect().with_working_dir(self.project_dir()))
    }
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create config dir");
    }
    fs::write(path, content).expect("write config");
}
