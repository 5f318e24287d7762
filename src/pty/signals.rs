//! Signal Delivery
//!
//! Out-of-band signal delivery to the interpreter process, and the scoped
//! SIGINT disposition guard used while spawning. Signals travel through
//! the platform's process mechanism, never the input stream — the stream
//! is not serviced while the interpreter is busy.

use crate::error::{Error, Result};

/// Signal types that can be sent to the interpreter process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Interrupt signal (Ctrl+C): abort the running command
    Interrupt,
    /// Termination signal (graceful shutdown)
    Terminate,
    /// Kill signal (forceful termination)
    Kill,
    /// Hangup signal
    Hangup,
}

impl Signal {
    /// Conventional name of the signal
    pub fn name(&self) -> &'static str {
        match self {
            Signal::Interrupt => "SIGINT",
            Signal::Terminate => "SIGTERM",
            Signal::Kill => "SIGKILL",
            Signal::Hangup => "SIGHUP",
        }
    }
}

/// Send a signal to the process with the given PID.
pub fn send_signal(pid: u32, signal: Signal) -> Result<()> {
    #[cfg(unix)]
    {
        send_unix_signal(pid, signal)
    }

    #[cfg(not(unix))]
    {
        let _ = pid;
        Err(Error::SignalNotSupported {
            signal: signal.name().to_string(),
            platform: std::env::consts::OS.to_string(),
        })
    }
}

#[cfg(unix)]
fn send_unix_signal(pid: u32, signal: Signal) -> Result<()> {
    use nix::sys::signal::{kill, Signal as NixSignal};
    use nix::unistd::Pid;

    let nix_signal = match signal {
        Signal::Interrupt => NixSignal::SIGINT,
        Signal::Terminate => NixSignal::SIGTERM,
        Signal::Kill => NixSignal::SIGKILL,
        Signal::Hangup => NixSignal::SIGHUP,
    };

    kill(Pid::from_raw(pid as i32), nix_signal).map_err(|e| Error::SignalSendFailed {
        signal: signal.name().to_string(),
        reason: e.to_string(),
    })
}

/// Scoped SIGINT disposition swap.
///
/// Signal handlers are inherited across fork, and a front end embedding
/// this crate typically ignores SIGINT outside its own message handling.
/// While the interpreter is being spawned the handler is reset to the
/// default disposition so the child and its descendants remain
/// interruptible; dropping the guard restores the previous handler on
/// every exit path, including spawn failure.
#[cfg(unix)]
pub struct SigintGuard {
    previous: nix::sys::signal::SigHandler,
}

#[cfg(unix)]
impl SigintGuard {
    /// Swap the SIGINT handler for the default disposition.
    pub fn acquire() -> Result<Self> {
        use nix::sys::signal::{signal, SigHandler, Signal as NixSignal};

        // Safety: installing SigDfl does not run arbitrary code; the
        // previous handler is reinstalled verbatim on drop.
        let previous = unsafe { signal(NixSignal::SIGINT, SigHandler::SigDfl) }.map_err(|e| {
            Error::SignalSendFailed {
                signal: "SIGINT".to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self { previous })
    }
}

#[cfg(unix)]
impl Drop for SigintGuard {
    fn drop(&mut self) {
        use nix::sys::signal::{signal, Signal as NixSignal};

        if let Err(e) = unsafe { signal(NixSignal::SIGINT, self.previous) } {
            warn!("failed to restore SIGINT handler: {}", e);
        }
    }
}

#[cfg(not(unix))]
pub struct SigintGuard;

#[cfg(not(unix))]
impl SigintGuard {
    /// No-op on platforms without Unix signal dispositions.
    pub fn acquire() -> Result<Self> {
        Ok(Self)
    }
}
