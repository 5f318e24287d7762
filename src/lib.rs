//! skillshell - drive a Cadence Virtuoso SKILL shell as an execution
//! backend over a pseudoterminal.
//!
//! The interpreter is spawned under a command shell with echo disabled
//! and every exchange is synchronized on its prompt marker. Cell code is
//! wrapped in the SKILL `errset` guard so raised conditions come back as
//! parseable error records instead of free text, and a dual-pattern
//! parser separates printed side-output from the evaluation result.
//!
//! ## Module Organization
//!
//! - [`session`] - session lifecycle, the protocol state machine, and
//!   the public operations (`run_cell`, `get_matches`, `get_info`,
//!   `interrupt`, `shutdown`)
//! - [`protocol`] - pattern grammar, command framing, output parsing
//! - [`pty`] - process spawning, byte streams, signal delivery
//! - [`banner`] - one-shot banner/version retrieval
//! - [`config`] - launch settings with TOML/JSON file loading
//! - [`models`] - process lifecycle record
//! - [`mod@error`] - error types and Result alias
//!
//! ## Quick Start
//!
//! ```no_run
//! use skillshell::{ShellConfig, ShellSession};
//!
//! # fn main() -> skillshell::Result<()> {
//! let mut session = ShellSession::spawn(ShellConfig::default())?;
//! let output = session.run_cell(r#"println("hello")"#)?;
//! println!("{}", output);
//! session.shutdown(false)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! Sessions are fully synchronous: each operation blocks until its
//! prompt-bounded round trip completes, and `&mut self` receivers keep a
//! single command in flight. The one concurrent-safe operation is
//! interrupt delivery, which travels out-of-band as a process signal;
//! grab an [`InterruptHandle`] before blocking if another thread needs
//! to abort a runaway command.

#[macro_use]
extern crate tracing;

pub mod banner;
pub mod config;
pub mod error;
pub mod models;
pub mod protocol;
pub mod pty;
pub mod session;

// Re-exports for core functionality
pub use config::{ConfigLoader, ShellConfig};
pub use error::{Error, EvalError, Result};
pub use protocol::{ParsedOutput, PatternSet};
pub use session::{InterruptHandle, SessionState, ShellSession};

/// The current version of skillshell from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The crate name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");
