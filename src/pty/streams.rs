//! PTY Streams
//!
//! Blocking, channel-bridged interfaces for interpreter I/O. The reader
//! and writer threads created at spawn time sit on the other ends of
//! these channels; closure of the output channel is how the session
//! observes end-of-stream.

use std::sync::mpsc::{Receiver, Sender, TryRecvError};

use crate::error::{Error, Result};

/// Duplex byte streams to the interpreter process.
pub struct PtyStreams {
    /// Receiver for output bytes from the interpreter
    output_rx: Receiver<Vec<u8>>,
    /// Sender for input bytes to the interpreter; dropped on close
    input_tx: Option<Sender<Vec<u8>>>,
}

impl PtyStreams {
    /// Create streams from a channel pair.
    ///
    /// This is the construction seam shared by the process spawner and
    /// test harnesses.
    pub fn from_channels(output_rx: Receiver<Vec<u8>>, input_tx: Sender<Vec<u8>>) -> Self {
        Self {
            output_rx,
            input_tx: Some(input_tx),
        }
    }

    /// Write data to the interpreter's input.
    pub fn write(&self, data: &[u8]) -> Result<()> {
        let tx = self.input_tx.as_ref().ok_or_else(|| Error::PtyInputSendFailed {
            reason: "input stream is closed".to_string(),
        })?;
        tx.send(data.to_vec()).map_err(|e| Error::PtyInputSendFailed {
            reason: e.to_string(),
        })
    }

    /// Block until the next output chunk arrives.
    ///
    /// Returns `StreamClosed` once the reader thread has exited and all
    /// buffered chunks are drained.
    pub fn read_chunk(&mut self) -> Result<Vec<u8>> {
        self.output_rx.recv().map_err(|_| Error::StreamClosed {
            context: "end of output stream".to_string(),
        })
    }

    /// Take one pending output chunk without blocking.
    pub fn try_read_now(&mut self) -> Option<Vec<u8>> {
        match self.output_rx.try_recv() {
            Ok(bytes) => Some(bytes),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Discard all pending output chunks, returning how many were dropped.
    pub fn drain_output(&mut self) -> usize {
        let mut count = 0;
        while self.try_read_now().is_some() {
            count += 1;
        }
        count
    }

    /// Close the input side; the writer thread exits once it drains.
    pub fn close_input(&mut self) {
        self.input_tx = None;
    }

    /// Whether the input side is still open.
    pub fn input_open(&self) -> bool {
        self.input_tx.is_some()
    }
}
