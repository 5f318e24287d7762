//! Interpreter Process Spawning
//!
//! Spawns the interpreter under a command shell on a pseudoterminal via
//! the portable-pty crate, with input echo disabled so the interpreter's
//! replies never contain our own commands.

use std::io::{Read, Write};
use std::sync::mpsc::channel;
use std::thread;

use portable_pty::{native_pty_system, Child, CommandBuilder, PtyPair, PtySize};

use super::signals::SigintGuard;
use super::streams::PtyStreams;
use crate::config::ShellConfig;
use crate::error::{Error, Result};
use crate::models::ShellProcess;

/// Handle to the spawned interpreter child process.
pub type BoxedChild = Box<dyn Child + Send + Sync>;

/// Spawn the interpreter described by `config` on a fresh PTY.
///
/// The interpreter is launched through the configured command shell
/// (`<shell> -c "<interpreter> <args>"`). SIGINT is held at the default
/// disposition for the duration of the spawn so the child inherits an
/// interruptible state.
pub fn spawn_shell_process(
    config: &ShellConfig,
) -> Result<(ShellProcess, PtyStreams, BoxedChild)> {
    let spawn_cmd = config.spawn_command();

    let pty_system = native_pty_system();
    let pair = pty_system
        .openpty(PtySize {
            rows: 24,
            cols: 80,
            pixel_width: 0,
            pixel_height: 0,
        })
        .map_err(|e| Error::PtyCreationFailed {
            command: spawn_cmd.clone(),
            reason: e.to_string(),
        })?;

    disable_echo(&pair)?;

    let mut cmd = CommandBuilder::new(&config.shell);
    cmd.arg("-c");
    cmd.arg(&spawn_cmd);

    let child = {
        let _sigint = SigintGuard::acquire()?;
        pair.slave
            .spawn_command(cmd)
            .map_err(|e| Error::CommandSpawnFailed {
                command: spawn_cmd.clone(),
                reason: e.to_string(),
            })?
    };

    let mut process = ShellProcess::new(
        config.shell.clone(),
        vec!["-c".to_string(), spawn_cmd],
    );
    if let Some(pid) = child.process_id() {
        process.mark_started(pid);
    }
    debug!("spawned interpreter process: {}", process);

    let streams = create_pty_streams(pair)?;

    Ok((process, streams, child))
}

/// Clear the ECHO flag on the PTY master so input is not reflected back.
#[cfg(unix)]
fn disable_echo(pair: &PtyPair) -> Result<()> {
    use nix::sys::termios::{tcgetattr, tcsetattr, LocalFlags, SetArg};
    use std::os::fd::BorrowedFd;

    let Some(raw_fd) = pair.master.as_raw_fd() else {
        warn!("PTY master exposes no file descriptor; echo left enabled");
        return Ok(());
    };

    // Safety: the fd belongs to the live PtyPair borrowed for this call.
    let fd = unsafe { BorrowedFd::borrow_raw(raw_fd) };
    let mut termios = tcgetattr(fd).map_err(|e| Error::EchoConfigFailed {
        reason: e.to_string(),
    })?;
    termios.local_flags.remove(LocalFlags::ECHO);
    tcsetattr(fd, SetArg::TCSANOW, &termios).map_err(|e| Error::EchoConfigFailed {
        reason: e.to_string(),
    })
}

#[cfg(not(unix))]
fn disable_echo(_pair: &PtyPair) -> Result<()> {
    Ok(())
}

/// Bridge the blocking PTY master I/O to channel-backed [`PtyStreams`]
/// via dedicated reader and writer threads.
fn create_pty_streams(pair: PtyPair) -> Result<PtyStreams> {
    let mut master_reader =
        pair.master
            .try_clone_reader()
            .map_err(|e| Error::PtyReaderCloneFailed {
                reason: e.to_string(),
            })?;
    let mut master_writer = pair
        .master
        .take_writer()
        .map_err(|e| Error::PtyWriterTakeFailed {
            reason: e.to_string(),
        })?;

    // Channel: PTY output -> session
    let (tx_out, rx_out) = channel::<Vec<u8>>();
    // Channel: session input -> PTY writer thread
    let (tx_in, rx_in) = channel::<Vec<u8>>();

    // Reader thread: forward PTY output until EOF or a persistent error
    thread::spawn(move || {
        let mut buf = [0u8; 4096];
        let mut consecutive_errors = 0;
        const MAX_CONSECUTIVE_ERRORS: u32 = 5;

        loop {
            match master_reader.read(&mut buf) {
                Ok(0) => {
                    debug!("PTY read EOF - interpreter terminated");
                    break;
                }
                Ok(n) => {
                    consecutive_errors = 0;
                    if tx_out.send(buf[..n].to_vec()).is_err() {
                        debug!("PTY read: session dropped, stopping reader thread");
                        break;
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(std::time::Duration::from_millis(10));
                }
                Err(e) => {
                    consecutive_errors += 1;
                    warn!(
                        "PTY read error ({}): {} (attempt {}/{})",
                        e.kind(),
                        e,
                        consecutive_errors,
                        MAX_CONSECUTIVE_ERRORS
                    );
                    if consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                        error!("PTY read: too many consecutive errors, stopping reader thread");
                        break;
                    }
                    thread::sleep(std::time::Duration::from_millis(50));
                }
            }
        }
        debug!("PTY reader thread exiting");
    });

    // Writer thread: drain queued input into the PTY master
    thread::spawn(move || {
        while let Ok(data) = rx_in.recv() {
            loop {
                match master_writer.write_all(&data) {
                    Ok(()) => {
                        if let Err(e) = master_writer.flush() {
                            debug!("PTY flush error: {}", e);
                        }
                        break;
                    }
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                    Err(e) => {
                        warn!("PTY write error ({}): {}", e.kind(), e);
                        return;
                    }
                }
            }
        }
        debug!("PTY writer thread exiting");
    });

    Ok(PtyStreams::from_channels(rx_out, tx_in))
}
