//! Pseudoterminal (PTY) Management
//!
//! Cross-platform pseudoterminal support: spawning the interpreter under
//! a command shell with echo disabled, channel-bridged byte streams, and
//! out-of-band signal delivery.

pub mod process;
pub mod signals;
pub mod streams;

// Re-exports for convenience
pub use process::{spawn_shell_process, BoxedChild};
pub use signals::{send_signal, SigintGuard, Signal};
pub use streams::PtyStreams;
