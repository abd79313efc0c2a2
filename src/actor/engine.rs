//! Engine Actor: runs a chess engine on a dedicated worker thread.
//!
//! The UI thread keeps the actor handle: it sends lines through
//! [`EngineActor::send_message`] and drains [`EngineEvent`]s from
//! [`EngineActor::events`]. Event delivery is unbounded so a busy engine
//! never blocks on a slow UI.

use crate::common::FileInfo;
use crate::engine::{startup_args, Engine, EngineCommand, EngineEvent, MessageSink};
use crate::error::{Error, Result};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use std::thread::{self, JoinHandle};

/// Capacity of the command queue towards the engine.
const COMMAND_QUEUE: usize = 64;

/// Handle to a running engine thread.
pub struct EngineActor {
    /// Handle to the engine thread.
    handle: Option<JoinHandle<()>>,
    /// Command sender; `None` once shutdown was requested.
    commands: Option<Sender<EngineCommand>>,
    /// Event receiver.
    events: Receiver<EngineEvent>,
}

impl EngineActor {
    /// Initialize `engine` with `files` and start it on a worker thread.
    ///
    /// The engine receives `logpath=<data dir>` as its startup argument.
    pub fn spawn<E: Engine>(mut engine: E, files: &FileInfo) -> Result<Self> {
        engine.init(files)?;
        let argv = startup_args(files);

        let (command_tx, command_rx) = bounded::<EngineCommand>(COMMAND_QUEUE);
        let (event_tx, event_rx) = unbounded::<EngineEvent>();

        let handle = thread::Builder::new()
            .name("chess-engine".to_string())
            .spawn(move || {
                let sink = MessageSink::new(event_tx);
                if let Err(e) = engine.run(&argv, &command_rx, &sink) {
                    log::error!("Engine thread error: {e}");
                    sink.error(e.to_string());
                }
            })?;

        Ok(Self {
            handle: Some(handle),
            commands: Some(command_tx),
            events: event_rx,
        })
    }

    /// Send text to the engine.
    pub fn send_message(&self, text: impl Into<String>) -> Result<()> {
        self.commands
            .as_ref()
            .ok_or(Error::EngineNotRunning)?
            .send(EngineCommand::Send(text.into()))
            .map_err(|_| Error::EngineNotRunning)
    }

    /// The engine's event queue.
    pub const fn events(&self) -> &Receiver<EngineEvent> {
        &self.events
    }

    /// Take every event queued so far without blocking.
    pub fn drain(&self) -> Vec<EngineEvent> {
        self.events.try_iter().collect()
    }

    /// Ask the engine to stop.
    ///
    /// The command queue is closed as well, so the engine sees the request
    /// even when the queue is full.
    pub fn shutdown(&mut self) {
        if let Some(commands) = self.commands.take() {
            let _ = commands.try_send(EngineCommand::Shutdown);
        }
    }

    /// Stop the engine and wait for its thread.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for EngineActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}
