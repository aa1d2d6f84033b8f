//! # Persistence Sink Port
//!
//! The seam between the engine's commit path and whatever holds the
//! persisted bytes. A sink receives one full state document per commit
//! cycle; `close` finalizes the cycle. The commit count and digest only
//! advance after `close` returns Ok, so a sink must not report success
//! until the bytes are durably handed off.

use std::io::{self, Write};

/// Write target for one persist cycle. Implementors decide what "durable"
/// means; the engine only promises write-then-close per commit.
pub trait StateSink: Write + Send {
    /// Finalize the current persist cycle.
    fn close(&mut self) -> io::Result<()>;
}

/// In-memory sink. Each new cycle replaces the previous contents, matching
/// the full-overwrite-per-commit persistence contract.
#[derive(Debug, Default)]
pub struct VecSink {
    buf: Vec<u8>,
    in_cycle: bool,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes from the last completed cycle.
    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }
}

impl Write for VecSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.in_cycle {
            self.buf.clear();
            self.in_cycle = true;
        }
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl StateSink for VecSink {
    fn close(&mut self) -> io::Result<()> {
        self.in_cycle = false;
        Ok(())
    }
}

/// Discarding sink, for running without persistence.
#[derive(Debug, Default)]
pub struct NopSink;

impl NopSink {
    pub fn new() -> Self {
        Self
    }
}

impl Write for NopSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl StateSink for NopSink {
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}
