//! Interpreter Process Model
//!
//! Lifecycle record for the spawned interpreter: pid, state, timestamps,
//! and exit code. The session owns exactly one of these.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents the state of the interpreter process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProcessState {
    /// Process has been created but not started
    #[default]
    Created,
    /// Process is currently running
    Running,
    /// Process has terminated
    Terminated,
}

/// Lifecycle record for the spawned interpreter process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellProcess {
    /// OS process identifier
    pub pid: Option<u32>,

    /// Current state of the process
    pub state: ProcessState,

    /// When the process was started
    pub start_time: Option<DateTime<Utc>>,

    /// When the process terminated (if applicable)
    pub end_time: Option<DateTime<Utc>>,

    /// Exit code, when the process has terminated and one was observed
    pub exit_code: Option<i32>,

    /// Command that was executed
    pub command: String,

    /// Arguments passed to the command
    pub args: Vec<String>,
}

impl ShellProcess {
    /// Create a new process record in the Created state
    pub fn new(command: String, args: Vec<String>) -> Self {
        Self {
            pid: None,
            state: ProcessState::Created,
            start_time: None,
            end_time: None,
            exit_code: None,
            command,
            args,
        }
    }

    /// Mark the process as started with the given PID
    pub fn mark_started(&mut self, pid: u32) {
        self.pid = Some(pid);
        self.state = ProcessState::Running;
        self.start_time = Some(Utc::now());
    }

    /// Mark the process as terminated, recording the exit code when known
    pub fn mark_terminated(&mut self, exit_code: Option<i32>) {
        self.state = ProcessState::Terminated;
        self.end_time = Some(Utc::now());
        self.exit_code = exit_code;
    }

    /// Check if the process is currently running
    pub fn is_running(&self) -> bool {
        matches!(self.state, ProcessState::Running)
    }

    /// Check if the process has terminated
    pub fn is_terminated(&self) -> bool {
        matches!(self.state, ProcessState::Terminated)
    }

    /// Get the execution duration if the process has terminated
    pub fn execution_duration(&self) -> Option<std::time::Duration> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => {
                Some(end.signed_duration_since(start).to_std().unwrap_or_default())
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for ShellProcess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.state {
            ProcessState::Created => "created",
            ProcessState::Running => "running",
            ProcessState::Terminated => "terminated",
        };
        let pid = self.pid.map_or("-".to_string(), |pid| pid.to_string());
        write!(f, "{} {} [pid {}] {}", self.command, self.args.join(" "), pid, state)
    }
}
