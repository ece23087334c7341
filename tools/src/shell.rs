//! Shell detection for command execution.

use std::path::PathBuf;

/// Detected shell for command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedShell {
    /// Path or name of the shell binary.
    pub binary: PathBuf,
    /// Arguments to pass before the command (e.g., `["-c"]`).
    pub args: Vec<String>,
    /// Human-readable name for logging.
    pub name: String,
}

impl DetectedShell {
    #[must_use]
    pub fn new(binary: impl Into<PathBuf>, args: Vec<String>, name: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            args,
            name: name.into(),
        }
    }
}

impl std::fmt::Display for DetectedShell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Find the shell used for `list` and `bash` commands.
///
/// Commands are written for bash, so bash on `PATH` wins. `/bin/sh` is the
/// fallback on Unix, `cmd /C` on Windows.
#[must_use]
pub fn detect_shell() -> DetectedShell {
    if let Ok(path) = which::which("bash") {
        return DetectedShell::new(path, vec!["-c".to_string()], "bash");
    }
    fallback_shell()
}

#[cfg(not(windows))]
fn fallback_shell() -> DetectedShell {
    tracing::warn!("bash not found on PATH; falling back to /bin/sh");
    DetectedShell::new("/bin/sh", vec!["-c".to_string()], "sh")
}

#[cfg(windows)]
fn fallback_shell() -> DetectedShell {
    tracing::warn!("bash not found on PATH; falling back to cmd");
    let comspec = std::env::var("ComSpec")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(r"C:\Windows\System32\cmd.exe"));
    DetectedShell::new(comspec, vec!["/C".to_string()], "cmd")
}
