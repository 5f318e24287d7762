//! Configuration
//!
//! Settings describing how the interpreter is launched and how its
//! prompt looks, with loading from TOML or JSON files.

pub mod loader;

pub use loader::ConfigLoader;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::protocol::patterns::DEFAULT_PROMPT_PATTERN;

/// Launch and protocol settings for an interpreter session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Command shell used to launch the interpreter
    #[serde(default = "default_shell")]
    pub shell: String,

    /// Interpreter binary name
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// Arguments passed to the interpreter
    #[serde(default = "default_interpreter_args")]
    pub interpreter_args: Vec<String>,

    /// Prompt marker pattern, anchored at end of buffered input
    #[serde(default = "default_prompt_pattern")]
    pub prompt_pattern: String,
}

fn default_shell() -> String {
    "/bin/tcsh".to_string()
}

fn default_interpreter() -> String {
    "virtuoso".to_string()
}

fn default_interpreter_args() -> Vec<String> {
    vec!["-nograph".to_string()]
}

fn default_prompt_pattern() -> String {
    DEFAULT_PROMPT_PATTERN.to_string()
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            shell: default_shell(),
            interpreter: default_interpreter(),
            interpreter_args: default_interpreter_args(),
            prompt_pattern: default_prompt_pattern(),
        }
    }
}

impl ShellConfig {
    /// The command line handed to the shell: `<interpreter> <args>`.
    pub fn spawn_command(&self) -> String {
        let mut command = self.interpreter.clone();
        for arg in &self.interpreter_args {
            command.push(' ');
            command.push_str(arg);
        }
        command
    }

    /// The one-shot command used to obtain the banner: `<interpreter> -V`.
    pub fn version_command(&self) -> String {
        format!("{} -V", self.interpreter)
    }

    /// Validate field contents before a session is constructed.
    pub fn validate(&self) -> Result<()> {
        if self.shell.trim().is_empty() {
            return Err(Error::ConfigValidationFailed {
                field: "shell".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.interpreter.trim().is_empty() {
            return Err(Error::ConfigValidationFailed {
                field: "interpreter".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if let Err(e) = regex::bytes::Regex::new(&self.prompt_pattern) {
            return Err(Error::ConfigValidationFailed {
                field: "prompt_pattern".to_string(),
                reason: e.to_string(),
            });
        }
        Ok(())
    }
}
