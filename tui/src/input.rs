//! Terminal input pump.
//!
//! Reads crossterm events on a blocking thread and hands them to async code
//! through a bounded channel.

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::sync::mpsc;

/// How often the reader thread checks for shutdown.
const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(25);
const INPUT_CHANNEL_CAPACITY: usize = 1024;
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

enum InputMsg {
    Event(Event),
    Error(String),
}

pub struct InputPump {
    rx: mpsc::Receiver<InputMsg>,
    stop: Arc<AtomicBool>,
    join: Option<tokio::task::JoinHandle<()>>,
}

impl InputPump {
    /// Start reading terminal events. Must be called inside a tokio runtime.
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();

        let join = tokio::task::spawn_blocking(move || input_loop(stop2, tx));
        Self {
            rx,
            stop,
            join: Some(join),
        }
    }

    /// Wait for the next terminal event.
    pub async fn recv(&mut self) -> Result<Event> {
        match self.rx.recv().await {
            Some(InputMsg::Event(ev)) => Ok(ev),
            Some(InputMsg::Error(msg)) => Err(anyhow!("input error: {msg}")),
            None => Err(anyhow!("input pump disconnected")),
        }
    }

    /// Drop events that arrived before the caller was ready for them.
    ///
    /// Returns how many were discarded. A queued read error is dropped too;
    /// the reader has already stopped, so the next `recv` reports it as a
    /// disconnect.
    pub fn discard_pending(&mut self) -> usize {
        let mut discarded = 0;
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                InputMsg::Event(_) => discarded += 1,
                InputMsg::Error(msg) => tracing::warn!("Dropped queued input error: {msg}"),
            }
        }
        discarded
    }

    pub async fn shutdown(&mut self) {
        // Close the receiver first so a backpressured send on the input thread unblocks.
        self.rx.close();

        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            let _ = tokio::time::timeout(SHUTDOWN_TIMEOUT, join).await;
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        self.rx.close();
        self.stop.store(true, Ordering::Release);
    }
}

fn input_loop(stop: Arc<AtomicBool>, tx: mpsc::Sender<InputMsg>) {
    while !stop.load(Ordering::Acquire) {
        match event::poll(INPUT_POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if tx.blocking_send(InputMsg::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                break;
            }
        }
    }
}
