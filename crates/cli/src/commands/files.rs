//! Scoped file access.
//!
//! [`ScopedFile`] owns an open file for the length of a block. Dropping it
//! flushes and closes the file on every exit path, including early `?`
//! returns.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::{DemoResult, heading};
use crate::config::CliConfig;

/// Access mode for a [`ScopedFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Truncate and write.
    Write,
    /// Read from the start.
    Read,
}

enum Handle {
    Writer(BufWriter<File>),
    Reader(BufReader<File>),
}

/// A file that is closed when the guard goes out of scope.
pub struct ScopedFile {
    path: PathBuf,
    handle: Handle,
}

impl ScopedFile {
    /// Open `path` in `mode`.
    ///
    /// # Errors
    ///
    /// Returns any error from opening the file.
    pub fn open(path: impl AsRef<Path>, mode: Mode) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let handle = match mode {
            Mode::Write => Handle::Writer(BufWriter::new(
                OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(true)
                    .open(&path)?,
            )),
            Mode::Read => Handle::Reader(BufReader::new(File::open(&path)?)),
        };
        tracing::info!(path = %path.display(), ?mode, "Opened file");
        Ok(Self { path, handle })
    }

    /// Append one line.
    ///
    /// # Errors
    ///
    /// Fails if the file was opened for reading or the write fails.
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        match &mut self.handle {
            Handle::Writer(writer) => writeln!(writer, "{line}"),
            Handle::Reader(_) => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "file is open for reading",
            )),
        }
    }

    /// Read every remaining line.
    ///
    /// # Errors
    ///
    /// Fails if the file was opened for writing or the read fails.
    pub fn read_lines(&mut self) -> io::Result<Vec<String>> {
        match &mut self.handle {
            Handle::Reader(reader) => reader.lines().collect(),
            Handle::Writer(_) => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "file is open for writing",
            )),
        }
    }
}

impl Drop for ScopedFile {
    fn drop(&mut self) {
        if let Handle::Writer(writer) = &mut self.handle
            && let Err(e) = writer.flush()
        {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to flush file");
        }
        tracing::info!(path = %self.path.display(), "Closed file");
    }
}

/// Write a file through one guard, then read it back through another.
///
/// # Errors
///
/// Returns an error if the file cannot be written or read back.
pub fn run(out: &mut impl Write, config: &CliConfig) -> DemoResult {
    let path = &config.demo_file;
    heading(out, "SCOPED FILE ACCESS")?;

    {
        let mut file = ScopedFile::open(path, Mode::Write)?;
        file.write_line("Hello from bazaar!")?;
        file.write_line("This file is closed automatically.")?;
        writeln!(out, "  Wrote {}", path.display())?;
    }

    let lines = {
        let mut file = ScopedFile::open(path, Mode::Read)?;
        file.read_lines()?
    };
    writeln!(out, "  Read back {} lines:", lines.len())?;
    for line in &lines {
        writeln!(out, "    {line}")?;
    }

    {
        let mut file = ScopedFile::open(path, Mode::Read)?;
        if let Err(e) = file.write_line("not allowed") {
            writeln!(out, "  Writing to a read-only handle: {e}")?;
        }
    }

    Ok(())
}
