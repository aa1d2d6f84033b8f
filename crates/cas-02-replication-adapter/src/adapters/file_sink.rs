//! # File-Backed Persistence Sink
//!
//! Each commit cycle recreates the file on first write and closes it on
//! `close`, so the file always holds exactly one complete state document:
//! the latest committed one. Crash between create and close leaves a
//! partial file that restore will reject at next startup, which is the
//! required fatal outcome rather than silent divergence.

use cas_01_state_engine::StateSink;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

/// Full-rewrite-per-commit sink over one file path.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Option<File>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Write for FileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let file = match self.file.as_mut() {
            Some(file) => file,
            None => self.file.insert(File::create(&self.path)?),
        };
        file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl StateSink for FileSink {
    fn close(&mut self) -> io::Result<()> {
        match self.file.take() {
            Some(file) => file.sync_all(),
            None => Ok(()),
        }
    }
}
