//! The output destinations a syncer can open by itself.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Stdout, Write};

use super::options::SinkTarget;

/// Standard output or an append-mode file.
#[derive(Debug)]
pub enum OutputSink {
    /// Standard output.
    Stdout(Stdout),
    /// A buffered file opened in append mode.
    File(BufWriter<File>),
}

impl OutputSink {
    /// Acquires the sink named by `target`.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be created or opened.
    pub fn open(target: &SinkTarget) -> io::Result<Self> {
        match target {
            SinkTarget::Stdout => Ok(OutputSink::Stdout(io::stdout())),
            SinkTarget::File(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                Ok(OutputSink::File(BufWriter::new(file)))
            }
        }
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputSink::Stdout(out) => out.write(buf),
            OutputSink::File(out) => out.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            OutputSink::Stdout(out) => out.lock().write_all(buf),
            OutputSink::File(out) => out.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputSink::Stdout(out) => out.flush(),
            OutputSink::File(out) => out.flush(),
        }
    }
}
