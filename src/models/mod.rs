//! Data Models
//!
//! Plain data structures shared across the crate.

pub mod shell_process;

pub use shell_process::{ProcessState, ShellProcess};
