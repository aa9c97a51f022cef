//! Byte transports for the display link.
//!
//! The driver only ever hands a transport complete, already-checksummed
//! frames, so the trait is deliberately small: write one frame, optionally
//! read one response line. Production code wraps a serial port handle in a
//! [`Transport`] impl; tests use [`MemoryTransport`] to record exactly what
//! would have gone over the wire.

use std::io::{BufRead, Write};
use std::sync::Mutex;

use thiserror::Error;

/// Errors surfaced by a transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The underlying device I/O failed.
    #[error("transport I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The transport is not (or no longer) connected to a device.
    #[error("transport is not connected")]
    NotConnected,

    /// This transport cannot perform the requested operation, e.g. reading
    /// a response over a write-only link.
    #[error("operation not supported by this transport")]
    NotSupported,
}

/// A one-way (optionally two-way) link to the display module.
pub trait Transport {
    /// Writes one complete frame to the device.
    fn send(&mut self, frame: &[u8]) -> Result<(), TransportError>;

    /// Reads one newline-terminated response from the device, for the few
    /// commands that answer (handshake, baud read). Write-only transports
    /// keep the default.
    fn read_line(&mut self) -> Result<String, TransportError> {
        Err(TransportError::NotSupported)
    }
}

/// A [`Transport`] over any `Write + BufRead` pair, e.g. an opened serial
/// port handle.
pub struct IoTransport<W, R> {
    writer: W,
    reader: R,
}

impl<W: Write, R: BufRead> IoTransport<W, R> {
    pub fn new(writer: W, reader: R) -> Self {
        Self { writer, reader }
    }
}

impl<W: Write, R: BufRead> Transport for IoTransport<W, R> {
    fn send(&mut self, frame: &[u8]) -> Result<(), TransportError> {
        self.writer.write_all(frame)?;
        self.writer.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, TransportError> {
        let mut line = String::new();
        self.reader.read_line(&mut line)?;
        Ok(line.trim_end().to_string())
    }
}

/// An in-memory [`Transport`] that records every frame it is given.
///
/// Tests inject canned responses and an optional failure point, then
/// assert on the recorded frames afterwards.
#[derive(Default)]
pub struct MemoryTransport {
    frames: Mutex<Vec<Vec<u8>>>,
    responses: Mutex<Vec<String>>,
    fail_after: Option<usize>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every `send` after the first `count` fail with
    /// [`TransportError::NotConnected`], simulating a dropped link.
    pub fn failing_after(count: usize) -> Self {
        Self {
            fail_after: Some(count),
            ..Self::default()
        }
    }

    /// Queues a response line to be returned by the next `read_line`.
    pub fn push_response(&self, line: &str) {
        self.responses
            .lock()
            .expect("lock poisoned")
            .push(line.to_string());
    }

    /// Returns a copy of every frame sent so far, in order.
    pub fn sent_frames(&self) -> Vec<Vec<u8>> {
        self.frames.lock().expect("lock poisoned").clone()
    }

    /// Number of frames sent so far.
    pub fn sent_count(&self) -> usize {
        self.frames.lock().expect("lock poisoned").len()
    }
}

impl Transport for MemoryTransport {
    fn send(&mut self, frame: &[u8]) -> Result<(), TransportError> {
        let mut frames = self.frames.lock().expect("lock poisoned");
        if let Some(limit) = self.fail_after {
            if frames.len() >= limit {
                return Err(TransportError::NotConnected);
            }
        }
        frames.push(frame.to_vec());
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, TransportError> {
        let mut responses = self.responses.lock().expect("lock poisoned");
        if responses.is_empty() {
            return Err(TransportError::NotSupported);
        }
        Ok(responses.remove(0))
    }
}
