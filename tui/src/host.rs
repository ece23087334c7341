//! Terminal implementations of the engine's [`Host`].

use anyhow::Result;
use crossterm::event::Event;

use fzpick_engine::{Host, InputOutcome, NotifyLevel, SelectRequest, SelectionOutcome};
use fzpick_types::ui::UiOptions;

use crate::component::Component;
use crate::input::InputPump;
use crate::selector::FuzzySelector;
use crate::terminal::{ScreenMode, TerminalSession};
use crate::view::{SessionView, TranscriptEntry, draw_inline, draw_session};

/// Feed terminal events to `selector` until it closes.
///
/// Draw or input failures close the picker as cancelled.
async fn pick<D>(input: &mut InputPump, selector: &mut FuzzySelector, mut draw: D) -> SelectionOutcome
where
    D: FnMut(&mut FuzzySelector) -> Result<()>,
{
    loop {
        if let Err(err) = draw(selector) {
            tracing::warn!("Picker draw failed: {err:#}");
            return SelectionOutcome::Cancelled;
        }
        let event = match input.recv().await {
            Ok(event) => event,
            Err(err) => {
                tracing::warn!("Picker input failed: {err:#}");
                return SelectionOutcome::Cancelled;
            }
        };
        if let InputOutcome::Closed(outcome) = selector.handle_input(&event) {
            tracing::debug!(selected = ?outcome.selected(), "Picker closed");
            return outcome;
        }
    }
}

/// Host for the full-screen interactive session.
///
/// Owns the terminal for the whole session; the picker is drawn over the
/// session screen.
pub struct SessionHost {
    session: TerminalSession,
    input: InputPump,
    view: SessionView,
}

impl SessionHost {
    pub fn new(options: UiOptions) -> Result<Self> {
        let session = TerminalSession::new(ScreenMode::Fullscreen)?;
        Ok(Self {
            session,
            input: InputPump::new(),
            view: SessionView::new(options),
        })
    }

    #[must_use]
    pub fn view(&self) -> &SessionView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut SessionView {
        &mut self.view
    }

    pub fn draw(&mut self) -> Result<()> {
        let view = &self.view;
        self.session
            .terminal
            .draw(|frame| draw_session(frame, view, None))?;
        Ok(())
    }

    pub async fn next_event(&mut self) -> Result<Event> {
        self.input.recv().await
    }

    /// Stop the input thread, then restore the terminal.
    pub async fn shutdown(mut self) {
        self.input.shutdown().await;
    }
}

impl Host for SessionHost {
    fn has_ui(&self) -> bool {
        true
    }

    fn notify(&mut self, message: &str, level: NotifyLevel) {
        tracing::info!(level = level.as_str(), "{message}");
        self.view.push(TranscriptEntry::Notice {
            message: message.to_string(),
            level,
        });
    }

    fn set_editor_text(&mut self, text: &str) {
        self.view.editor_mut().set_text(text);
    }

    fn send_user_message(&mut self, text: &str) {
        tracing::debug!(len = text.len(), "Message sent");
        self.view.push(TranscriptEntry::Sent(text.to_string()));
    }

    async fn select(&mut self, request: SelectRequest) -> SelectionOutcome {
        let mut selector = FuzzySelector::from_request(request, self.view.options());
        self.view.editor_mut().set_focused(false);

        let Self {
            session,
            input,
            view,
        } = self;
        let stale = input.discard_pending();
        if stale > 0 {
            tracing::debug!(stale, "Discarded input queued before the picker opened");
        }
        let outcome = pick(input, &mut selector, |selector| {
            session
                .terminal
                .draw(|frame| draw_session(frame, view, Some(selector)))?;
            Ok(())
        })
        .await;

        self.view.editor_mut().set_focused(true);
        outcome
    }
}

/// Results of a one-shot invocation, printed once the terminal is restored.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OneshotReport {
    /// Final edit-buffer contents, if an action set them.
    pub editor_text: Option<String>,
    pub sent: Vec<String>,
    pub notices: Vec<(String, NotifyLevel)>,
}

/// Host for `run <name>`: takes over a few terminal rows only while the
/// picker is open.
#[derive(Debug)]
pub struct OneshotHost {
    options: UiOptions,
    report: OneshotReport,
}

impl OneshotHost {
    #[must_use]
    pub fn new(options: UiOptions) -> Self {
        Self {
            options,
            report: OneshotReport::default(),
        }
    }

    #[must_use]
    pub fn finish(self) -> OneshotReport {
        self.report
    }
}

impl Host for OneshotHost {
    fn has_ui(&self) -> bool {
        true
    }

    fn notify(&mut self, message: &str, level: NotifyLevel) {
        tracing::info!(level = level.as_str(), "{message}");
        self.report.notices.push((message.to_string(), level));
    }

    fn set_editor_text(&mut self, text: &str) {
        self.report.editor_text = Some(text.to_string());
    }

    fn send_user_message(&mut self, text: &str) {
        self.report.sent.push(text.to_string());
    }

    async fn select(&mut self, request: SelectRequest) -> SelectionOutcome {
        let mut selector = FuzzySelector::from_request(request, self.options);
        let mut session = match TerminalSession::new(ScreenMode::Inline(selector.max_height())) {
            Ok(session) => session,
            Err(err) => {
                tracing::warn!("Failed to open terminal: {err:#}");
                self.notify(&format!("failed to open terminal: {err}"), NotifyLevel::Error);
                return SelectionOutcome::Cancelled;
            }
        };
        let mut input = InputPump::new();

        let outcome = pick(&mut input, &mut selector, |selector| {
            session.terminal.draw(|frame| draw_inline(frame, selector))?;
            Ok(())
        })
        .await;

        input.shutdown().await;
        drop(session);
        outcome
    }
}
