//! fzpick binary.
//!
//! # Modes
//!
//! ```text
//! fzpick              -> interactive full-screen session (run_session)
//! fzpick run <NAME>   -> one picker in an inline viewport, results on stdout
//! fzpick list         -> print the configured commands
//! ```
//!
//! The UI is drawn on stderr. Without a terminal on stdin and stderr every
//! invocation goes through [`headless::HeadlessHost`] and is rejected.

mod headless;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::{
    env,
    fs::{self, OpenOptions},
    io::IsTerminal,
    path::PathBuf,
    process::ExitCode,
    sync::Mutex,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use fzpick_engine::{
    CommandRegistry, INTERACTIVE_REQUIRED, InvocationOutcome, NotifyLevel, Pipeline,
};
use fzpick_tools::ShellRunner;
use fzpick_tui::{OneshotHost, OneshotReport, run_session};
use fzpick_types::ui::UiOptions;

use crate::headless::{HeadlessHost, format_notice};

const ENV_ASCII: &str = "FZPICK_ASCII";
const ENV_HIGH_CONTRAST: &str = "FZPICK_HIGH_CONTRAST";

#[derive(Debug, Parser)]
#[command(name = "fzpick", version, about)]
struct Cli {
    /// Directory used for the project config and as the commands' working directory.
    #[arg(long, value_name = "DIR")]
    cwd: Option<PathBuf>,

    /// Draw with ASCII glyphs only.
    #[arg(long)]
    ascii: bool,

    /// Use the high-contrast palette.
    #[arg(long)]
    high_contrast: bool,

    #[command(subcommand)]
    command: Option<Mode>,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Print the configured commands.
    List {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Open the picker for one command.
    Run {
        /// Command name, with or without the `fzf:` prefix.
        name: String,
    },
}

impl Cli {
    fn ui_options(&self) -> UiOptions {
        UiOptions {
            ascii_only: self.ascii || env_flag(ENV_ASCII),
            high_contrast: self.high_contrast || env_flag(ENV_HIGH_CONTRAST),
        }
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name).is_ok_and(|raw| is_truthy(&raw))
}

fn is_truthy(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // No log file: logging stays off, stderr carries the UI.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> (Option<(PathBuf, fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.pi/agent/logs/fzpick.log
    if let Some(dir) = fzpick_config::global_config_dir() {
        candidates.push(dir.join("logs").join("fzpick.log"));
    }

    // Fallback: ./.pi/logs/fzpick.log
    candidates.push(
        PathBuf::from(fzpick_config::CONFIG_DIR)
            .join("logs")
            .join("fzpick.log"),
    );

    candidates
}

fn has_terminal() -> bool {
    std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
}

fn resolve_cwd(cli: &Cli) -> Result<PathBuf> {
    match &cli.cwd {
        Some(dir) => fs::canonicalize(dir)
            .with_context(|| format!("cannot use --cwd {}", dir.display())),
        None => env::current_dir().context("cannot determine the current directory"),
    }
}

fn print_report(report: OneshotReport) {
    for (message, level) in &report.notices {
        eprintln!("{}", format_notice(message, *level));
    }
    for message in &report.sent {
        println!("{message}");
    }
    if let Some(text) = report.editor_text {
        println!("{text}");
    }
}

fn exit_code(outcome: &InvocationOutcome) -> ExitCode {
    match outcome {
        InvocationOutcome::Executed { .. } => ExitCode::SUCCESS,
        InvocationOutcome::Cancelled => ExitCode::from(130),
        InvocationOutcome::Rejected
        | InvocationOutcome::ListFailed
        | InvocationOutcome::NoCandidates => ExitCode::FAILURE,
    }
}

fn list_commands(registry: &CommandRegistry, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(registry.commands())?);
        return Ok(());
    }
    for command in registry.commands() {
        match &command.shortcut {
            Some(shortcut) => println!(
                "{}\t{}\t[{shortcut}]",
                command.command_name(),
                command.description()
            ),
            None => println!("{}\t{}", command.command_name(), command.description()),
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing();

    let cwd = resolve_cwd(&cli)?;
    let options = cli.ui_options();
    let registry = CommandRegistry::new(fzpick_config::load_config(&cwd));
    let pipeline = Pipeline::new(ShellRunner::detect().with_working_dir(&cwd));
    tracing::info!(
        cwd = %cwd.display(),
        commands = registry.len(),
        shell = %pipeline.runner().shell(),
        "fzpick starting"
    );

    match cli.command {
        Some(Mode::List { json }) => {
            list_commands(&registry, json)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Mode::Run { name }) => {
            let Some(command) = registry.get(&name) else {
                bail!("unknown command: {name}");
            };
            let outcome = if has_terminal() {
                let mut host = OneshotHost::new(options);
                let outcome = pipeline.invoke(command, &mut host).await;
                print_report(host.finish());
                outcome
            } else {
                pipeline.invoke(command, &mut HeadlessHost).await
            };
            tracing::info!(command = %command.name, ?outcome, "Invocation finished");
            Ok(exit_code(&outcome))
        }
        None => {
            if !has_terminal() {
                eprintln!("{}", format_notice(INTERACTIVE_REQUIRED, NotifyLevel::Error));
                return Ok(ExitCode::FAILURE);
            }
            run_session(&registry, &pipeline, options).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
