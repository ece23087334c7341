//! Command configuration for fzpick.
//!
//! Commands come from two JSON files with the same schema:
//!
//! ```json
//! {
//!   "commands": {
//!     "branches": {
//!       "list": "git branch --format='%(refname:short)'",
//!       "action": { "kind": "bash", "template": "git checkout {{selected}}" },
//!       "shortcut": "ctrl+b"
//!     }
//!   }
//! }
//! ```
//!
//! The global file lives at `~/.pi/agent/fzf.json`, the project file at
//! `<cwd>/.pi/fzf.json`. Project entries replace global entries with the same
//! name. A source that is missing, unreadable, or malformed contributes no
//! commands; loading itself never fails.

mod template;

pub use template::{SELECTED_PLACEHOLDER, render_template};

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use thiserror::Error;

use fzpick_types::{RawActionSpec, RawCommandConfig, ResolvedAction, ResolvedCommand};

/// Directory (under home or the working directory) holding config files.
pub const CONFIG_DIR: &str = ".pi";
pub const CONFIG_FILE: &str = "fzf.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{} has no `commands` field", path.display())]
    MissingCommands { path: PathBuf },
    #[error("{}: `commands` must be an object, found {found}", path.display())]
    InvalidCommands { path: PathBuf, found: &'static str },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::MissingCommands { path }
            | ConfigError::InvalidCommands { path, .. } => path,
        }
    }
}

/// `~/.pi/agent`, also the parent of the log directory.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join("agent"))
}

#[must_use]
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(CONFIG_FILE))
}

#[must_use]
pub fn project_config_path(cwd: &Path) -> PathBuf {
    cwd.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// Load and merge the global and project configs for `cwd`.
#[must_use]
pub fn load_config(cwd: &Path) -> Vec<ResolvedCommand> {
    load_config_from(global_config_path().as_deref(), &project_config_path(cwd))
}

/// Path-explicit form of [`load_config`].
#[must_use]
pub fn load_config_from(global: Option<&Path>, project: &Path) -> Vec<ResolvedCommand> {
    let sources = [global, Some(project)]
        .into_iter()
        .flatten()
        .map(|path| match load_source(path) {
            Ok(Some(commands)) => {
                let parsed = parse_commands(path, commands);
                tracing::debug!(path = %path.display(), count = parsed.len(), "Loaded fzf config");
                parsed
            }
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!("Ignoring fzf config: {err}");
                Vec::new()
            }
        });

    merge_sources(sources)
        .into_iter()
        .map(|(name, cmd)| ResolvedCommand {
            name,
            list: cmd.list,
            action: resolve_action(cmd.action),
            shortcut: cmd.shortcut,
        })
        .collect()
}

/// Read one config file and return its `commands` object.
///
/// A missing file is `Ok(None)`.
pub fn load_source(path: &Path) -> Result<Option<Map<String, Value>>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let document: Value = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let commands = match document {
        Value::Object(mut root) => root.remove("commands"),
        _ => None,
    };

    match commands {
        Some(Value::Object(commands)) => Ok(Some(commands)),
        None | Some(Value::Null) => Err(ConfigError::MissingCommands {
            path: path.to_path_buf(),
        }),
        Some(other) => Err(ConfigError::InvalidCommands {
            path: path.to_path_buf(),
            found: json_type_name(&other),
        }),
    }
}

/// Normalize shorthand or explicit actions into the canonical form.
#[must_use]
pub fn resolve_action(action: RawActionSpec) -> ResolvedAction {
    match action {
        RawActionSpec::Shorthand(template) => ResolvedAction {
            kind: fzpick_types::ActionKind::Editor,
            template,
            output: fzpick_types::OutputMode::Notify,
        },
        RawActionSpec::Explicit {
            kind,
            template,
            output,
        } => ResolvedAction {
            kind,
            template,
            output: output.unwrap_or_default(),
        },
    }
}

fn parse_commands(path: &Path, commands: Map<String, Value>) -> Vec<(String, RawCommandConfig)> {
    commands
        .into_iter()
        .filter_map(
            |(name, value)| match serde_json::from_value::<RawCommandConfig>(value) {
                Ok(cmd) => Some((name, cmd)),
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        command = %name,
                        "Skipping invalid fzf command: {err}"
                    );
                    None
                }
            },
        )
        .collect()
}

/// Later sources replace earlier entries wholesale. A replaced entry keeps its
/// original position; new names are appended.
fn merge_sources(
    sources: impl IntoIterator<Item = Vec<(String, RawCommandConfig)>>,
) -> Vec<(String, RawCommandConfig)> {
    let mut merged: Vec<(String, RawCommandConfig)> = Vec::new();
    for source in sources {
        for (name, cmd) in source {
            match merged.iter_mut().find(|(existing, _)| *existing == name) {
                Some(slot) => slot.1 = cmd,
                None => merged.push((name, cmd)),
            }
        }
    }
    merged
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
