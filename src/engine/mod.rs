//! Engine bridge: the seam between the console and a chess engine.
//!
//! An [`Engine`] runs on its own worker thread. Text for the engine arrives
//! as [`EngineCommand`]s on a channel; text from the engine leaves through a
//! [`MessageSink`], which queues [`EngineEvent`]s for the UI thread. The UI
//! thread drains that queue and appends to the console, so the console is
//! never touched from two threads.

mod process;

pub use process::ProcessEngine;

use crossbeam_channel::{Receiver, Sender};

use crate::common::FileInfo;
use crate::error::Result;

/// Commands delivered to a running engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    /// Text to feed the engine, usually a line ending in `\n`.
    Send(String),
    /// Stop the engine and return from [`Engine::run`].
    Shutdown,
}

/// Events emitted by the engine thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Output text; may hold partial lines.
    Message(String),
    /// The engine stopped, with its exit code when it has one.
    Exited {
        /// Process exit code.
        code: Option<i32>,
    },
    /// The engine thread failed.
    Error(String),
}

/// Delivers engine output to the UI thread.
///
/// Cloneable and `Send`, so engines can hand it to their own reader threads.
#[derive(Debug, Clone)]
pub struct MessageSink {
    sender: Sender<EngineEvent>,
}

impl MessageSink {
    /// Wrap the sending half of an event channel.
    pub const fn new(sender: Sender<EngineEvent>) -> Self {
        Self { sender }
    }

    /// Queue engine output. Returns `false` once the UI side is gone.
    pub fn on_message(&self, text: impl Into<String>) -> bool {
        let text = text.into();
        log::trace!("engine: {text:?}");
        self.sender.send(EngineEvent::Message(text)).is_ok()
    }

    /// Report that the engine stopped.
    pub fn exited(&self, code: Option<i32>) {
        let _ = self.sender.send(EngineEvent::Exited { code });
    }

    /// Report an engine failure.
    pub fn error(&self, message: impl Into<String>) {
        let _ = self.sender.send(EngineEvent::Error(message.into()));
    }
}

/// A chess engine driven by text.
pub trait Engine: Send + 'static {
    /// Prepare with the application paths. Called on the UI thread before
    /// the worker starts.
    fn init(&mut self, files: &FileInfo) -> Result<()>;

    /// Run until shut down or the engine exits. Called on the worker thread.
    ///
    /// `argv` carries startup arguments such as `logpath=<data dir>`.
    fn run(
        &mut self,
        argv: &[String],
        commands: &Receiver<EngineCommand>,
        sink: &MessageSink,
    ) -> Result<()>;
}

/// Startup arguments for an engine using `files`.
pub fn startup_args(files: &FileInfo) -> Vec<String> {
    vec![format!("logpath={}", files.data_directory().display())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn test_sink_queues_messages() {
        let (tx, rx) = unbounded();
        let sink = MessageSink::new(tx);
        assert!(sink.on_message("Crafty v25.2\n"));
        sink.exited(Some(0));

        assert_eq!(rx.try_recv().unwrap(), EngineEvent::Message("Crafty v25.2\n".into()));
        assert_eq!(rx.try_recv().unwrap(), EngineEvent::Exited { code: Some(0) });
    }

    #[test]
    fn test_sink_reports_disconnect() {
        let (tx, rx) = unbounded();
        drop(rx);
        assert!(!MessageSink::new(tx).on_message("lost"));
    }

    #[test]
    fn test_startup_args() {
        let files = FileInfo::new("/opt/app", "/var/data", "/var/cache");
        assert_eq!(startup_args(&files), vec!["logpath=/var/data".to_string()]);
    }
}
