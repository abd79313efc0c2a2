//! `ProcessEngine`: an engine program driven over stdin/stdout.

use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError};

use super::{Engine, EngineCommand, MessageSink};
use crate::common::FileInfo;
use crate::error::{Error, Result};

/// How often the command loop checks whether the child has exited.
const EXIT_POLL: Duration = Duration::from_millis(100);

/// Runs an external engine and forwards its stdout as messages.
#[derive(Debug, Clone)]
pub struct ProcessEngine {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl ProcessEngine {
    /// Engine launched as `program args...`.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: None,
        }
    }

    fn spawn_child(&self, argv: &[String]) -> Result<Child> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .args(argv)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        command.spawn().map_err(|source| Error::EngineSpawn {
            program: self.program.clone(),
            source,
        })
    }

    fn write(stdin: &mut ChildStdin, text: &str) -> Result<()> {
        stdin.write_all(text.as_bytes())?;
        stdin.flush()?;
        Ok(())
    }
}

impl Engine for ProcessEngine {
    fn init(&mut self, files: &FileInfo) -> Result<()> {
        files.ensure_directories()?;
        self.working_dir = Some(files.data_directory().to_path_buf());
        Ok(())
    }

    fn run(
        &mut self,
        argv: &[String],
        commands: &Receiver<EngineCommand>,
        sink: &MessageSink,
    ) -> Result<()> {
        let mut child = self.spawn_child(argv)?;
        log::info!("started engine `{}` (pid {})", self.program, child.id());

        let stdout = child.stdout.take().ok_or(Error::EngineNotRunning)?;
        let mut stdin = child.stdin.take().ok_or(Error::EngineNotRunning)?;
        let reader = spawn_reader(stdout, sink.clone())?;

        let mut exited = None;
        loop {
            match commands.recv_timeout(EXIT_POLL) {
                Ok(EngineCommand::Send(text)) => {
                    if let Err(e) = Self::write(&mut stdin, &text) {
                        log::warn!("engine stdin closed: {e}");
                    }
                }
                Ok(EngineCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {}
            }

            // a busy command queue never times out, so poll here too
            if let Some(status) = child.try_wait()? {
                exited = Some(status);
                break;
            }
        }

        drop(stdin);
        let status = match exited {
            Some(status) => status,
            None => {
                let _ = child.kill();
                child.wait()?
            }
        };
        let _ = reader.join();

        log::info!("engine `{}` exited with {status}", self.program);
        sink.exited(status.code());
        Ok(())
    }
}

/// Forward `source` to `sink` until EOF, decoding UTF-8 across reads.
fn spawn_reader<R: Read + Send + 'static>(
    mut source: R,
    sink: MessageSink,
) -> Result<JoinHandle<()>> {
    let handle = thread::Builder::new()
        .name("chess-engine-stdout".to_string())
        .spawn(move || {
            let mut chunk = [0u8; 4096];
            let mut decoder = Utf8Decoder::default();
            loop {
                match source.read(&mut chunk) {
                    Ok(0) => break,
                    Ok(n) => {
                        let text = decoder.decode(&chunk[..n]);
                        if !text.is_empty() && !sink.on_message(text) {
                            break;
                        }
                    }
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                    Err(e) => {
                        sink.error(e.to_string());
                        break;
                    }
                }
            }
            let rest = decoder.finish();
            if !rest.is_empty() {
                sink.on_message(rest);
            }
        })?;
    Ok(handle)
}

/// Decodes a byte stream whose reads may split multi-byte sequences.
#[derive(Debug, Default)]
struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    fn decode(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);

        let valid = match std::str::from_utf8(&self.pending) {
            Ok(_) => Some(self.pending.len()),
            // An incomplete sequence at the end waits for the next read.
            Err(e) if e.error_len().is_none() => Some(e.valid_up_to()),
            Err(_) => None,
        };
        let Some(valid) = valid else {
            return self.finish();
        };

        let rest = self.pending.split_off(valid);
        let text = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending = rest;
        text
    }

    fn finish(&mut self) -> String {
        let text = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        text
    }
}
