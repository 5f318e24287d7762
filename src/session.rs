//! Interpreter Session
//!
//! Owns the spawned interpreter process, its byte streams, the compiled
//! pattern set, and the protocol state machine. Every public operation is
//! a blocking, prompt-synchronized round trip; at most one command is in
//! flight per session, enforced by `&mut self` receivers.

use uuid::Uuid;

use crate::banner;
use crate::config::ShellConfig;
use crate::error::{Error, EvalError, Result};
use crate::models::ShellProcess;
use crate::protocol::frame;
use crate::protocol::parser::{self, strip_list_wrapper};
use crate::protocol::patterns::{PatternSet, NIL};
use crate::pty::process::{spawn_shell_process, BoxedChild};
use crate::pty::signals::{self, Signal};
use crate::pty::streams::PtyStreams;

/// Protocol state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No command in flight
    Idle,
    /// A line is being written to the interpreter
    Sending,
    /// Blocked reading until the prompt marker appears
    AwaitingPrompt,
    /// Captured spans are being parsed
    Parsing,
    /// The previous command raised; the session accepts further commands
    Faulted,
    /// The stream is gone; no further commands are possible
    Closed,
}

/// Cloneable handle for delivering an interrupt from another thread
/// while the session itself is blocked in [`ShellSession::wait_for_prompt`].
#[derive(Debug, Clone)]
pub struct InterruptHandle {
    pid: Option<u32>,
}

impl InterruptHandle {
    /// Deliver SIGINT to the interpreter process.
    pub fn interrupt(&self) -> Result<()> {
        match self.pid {
            Some(pid) => signals::send_signal(pid, Signal::Interrupt),
            None => Err(Error::NoPidAvailable),
        }
    }
}

/// A live interpreter session.
pub struct ShellSession {
    id: Uuid,
    config: ShellConfig,
    process: ShellProcess,
    child: Option<BoxedChild>,
    streams: PtyStreams,
    patterns: PatternSet,
    state: SessionState,
    read_buffer: Vec<u8>,
    output: String,
    last_error: Option<EvalError>,
    banner: Option<String>,
}

impl ShellSession {
    /// Spawn the interpreter and synchronize on its first prompt.
    ///
    /// The interpreter's startup preamble is consumed and discarded.
    pub fn spawn(config: ShellConfig) -> Result<Self> {
        config.validate()?;
        let patterns = PatternSet::with_prompt(&config.prompt_pattern)?;
        let (process, streams, child) = spawn_shell_process(&config)?;

        let mut session = Self {
            id: Uuid::new_v4(),
            config,
            process,
            child: Some(child),
            streams,
            patterns,
            state: SessionState::AwaitingPrompt,
            read_buffer: Vec::new(),
            output: String::new(),
            last_error: None,
            banner: None,
        };
        info!(
            "session {} started (pid {:?})",
            session.id, session.process.pid
        );

        session.wait_for_prompt()?;
        session.state = SessionState::Idle;
        Ok(session)
    }

    /// Attach to an already-running interpreter through an existing
    /// stream pair, assumed to be sitting at a prompt.
    ///
    /// No process is owned in this mode; [`interrupt`](Self::interrupt)
    /// is unavailable. Used by test harnesses and embedders that manage
    /// the process themselves.
    pub fn from_streams(config: ShellConfig, streams: PtyStreams) -> Result<Self> {
        config.validate()?;
        let patterns = PatternSet::with_prompt(&config.prompt_pattern)?;
        let process = ShellProcess::new(
            config.shell.clone(),
            vec!["-c".to_string(), config.spawn_command()],
        );

        Ok(Self {
            id: Uuid::new_v4(),
            config,
            process,
            child: None,
            streams,
            patterns,
            state: SessionState::Idle,
            read_buffer: Vec::new(),
            output: String::new(),
            last_error: None,
            banner: None,
        })
    }

    /// Session identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current protocol state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Last combined output returned by the interpreter.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Error record of the most recent execution, if it raised.
    pub fn last_error(&self) -> Option<&EvalError> {
        self.last_error.as_ref()
    }

    /// Lifecycle record of the interpreter process.
    pub fn process(&self) -> &ShellProcess {
        &self.process
    }

    /// Handle for delivering interrupts from another thread.
    pub fn interrupt_handle(&self) -> InterruptHandle {
        InterruptHandle {
            pid: self.process.pid,
        }
    }

    /// Write `text` plus a line terminator to the interpreter's input.
    pub fn send_line(&mut self, text: &str) -> Result<()> {
        self.ensure_open()?;
        self.state = SessionState::Sending;

        let mut data = Vec::with_capacity(text.len() + 1);
        data.extend_from_slice(text.as_bytes());
        data.push(b'\n');
        self.streams.write(&data)?;

        self.state = SessionState::AwaitingPrompt;
        Ok(())
    }

    /// Block until the prompt marker appears; return the bytes read
    /// before it as the captured span. The marker itself is consumed.
    ///
    /// There is no timeout at this layer. An unexpected end-of-stream is
    /// fatal: the session transitions to `Closed`.
    pub fn wait_for_prompt(&mut self) -> Result<String> {
        loop {
            if let Some(at) = self.patterns.match_prompt(&self.read_buffer) {
                let span = String::from_utf8_lossy(&self.read_buffer[..at]).into_owned();
                self.read_buffer.clear();
                self.state = SessionState::Idle;
                trace!("captured span of {} bytes", span.len());
                return Ok(span);
            }

            match self.streams.read_chunk() {
                Ok(chunk) => self.read_buffer.extend_from_slice(&chunk),
                Err(Error::StreamClosed { .. }) => {
                    self.state = SessionState::Closed;
                    return Err(Error::StreamClosed {
                        context: "while waiting for prompt".to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// One request/response round trip.
    fn exchange(&mut self, line: &str) -> Result<String> {
        self.send_line(line)?;
        self.wait_for_prompt()
    }

    /// Execute cell code with error detection.
    ///
    /// Two round trips: the error-guarded frame captures printed output
    /// and the guard's verdict, then the sentinel fetch retrieves the
    /// real result. Returns the combined printed output and value, or
    /// [`Error::Evaluation`] when the interpreter reported a raised
    /// condition.
    pub fn run_cell(&mut self, code: &str) -> Result<String> {
        self.ensure_open()?;
        debug!("run_cell: {} bytes of code", code.len());

        let framed = frame::frame_cell(code);
        let error_span = self.exchange(&framed)?;
        let value_span = self.exchange(frame::RESULT_VAR)?;

        self.state = SessionState::Parsing;
        let parsed = parser::parse_spans(&self.patterns, &error_span, &value_span);
        self.output = parsed.text;
        self.last_error = parsed.error;

        match &self.last_error {
            Some(error) => {
                self.state = SessionState::Faulted;
                warn!("evaluation error: {}", error);
                Err(Error::Evaluation(error.clone()))
            }
            None => {
                self.state = SessionState::Idle;
                Ok(self.output.clone())
            }
        }
    }

    /// Names of functions and variables starting with `token`,
    /// functions first.
    pub fn get_matches(&mut self, token: &str) -> Result<Vec<String>> {
        self.ensure_open()?;

        let mut matches = Vec::new();
        for command in [frame::list_functions(token), frame::list_variables(token)] {
            let span = self.exchange(&command)?;
            if span != NIL {
                let names = if span.starts_with('(') {
                    strip_list_wrapper(&span)
                } else {
                    span.as_str()
                };
                matches.extend(names.split_whitespace().map(str::to_string));
            }
        }
        Ok(matches)
    }

    /// Help text for `token`, or the empty string when there is none.
    pub fn get_info(&mut self, token: &str) -> Result<String> {
        self.ensure_open()?;

        let span = self.exchange(&frame::help_lookup(token))?;
        if span != NIL {
            Ok(span)
        } else {
            Ok(String::new())
        }
    }

    /// Deliver SIGINT to the interpreter to abort a runaway command.
    ///
    /// Does not wait for a prompt; call
    /// [`wait_for_prompt`](Self::wait_for_prompt) afterwards to
    /// resynchronize.
    pub fn interrupt(&self) -> Result<()> {
        match self.process.pid {
            Some(pid) => {
                info!("interrupting interpreter (pid {})", pid);
                signals::send_signal(pid, Signal::Interrupt)
            }
            None => Err(Error::NoPidAvailable),
        }
    }

    /// Terminate the session by sending the exit command through the
    /// normal protocol path.
    ///
    /// The stream closing before a prompt is observed is the expected
    /// termination signal, not an error. The `restart` flag is reserved;
    /// it currently has no effect beyond closing this session.
    pub fn shutdown(&mut self, restart: bool) -> Result<()> {
        if restart {
            debug!("restart requested; treated as a plain shutdown");
        }
        if self.state == SessionState::Closed {
            return Ok(());
        }

        match self.run_cell(frame::EXIT_COMMAND) {
            Ok(_) | Err(Error::StreamClosed { .. }) => {
                self.close();
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.state == SessionState::Closed {
            return Err(Error::StreamClosed {
                context: "session is closed".to_string(),
            });
        }
        Ok(())
    }

    fn close(&mut self) {
        self.streams.close_input();
        self.streams.drain_output();

        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            match child.wait() {
                Ok(status) => self.process.mark_terminated(Some(status.exit_code() as i32)),
                Err(_) => self.process.mark_terminated(None),
            }
        } else if !self.process.is_terminated() {
            self.process.mark_terminated(None);
        }

        self.state = SessionState::Closed;
        info!("session {} closed", self.id);
    }

    /// Interpreter banner text, fetched once and cached.
    pub fn banner(&mut self) -> Result<String> {
        if let Some(text) = &self.banner {
            return Ok(text.clone());
        }
        let text = banner::fetch_banner(&self.config)?;
        self.banner = Some(text.clone());
        Ok(text)
    }

    /// Language version extracted from the banner.
    pub fn language_version(&mut self) -> Result<String> {
        let banner_text = self.banner()?;
        banner::extract_version(&self.patterns, &banner_text)
    }
}

impl Drop for ShellSession {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            debug!("session {} dropped with live child; killing", self.id);
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}
