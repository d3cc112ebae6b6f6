//! Output writing and canonical formatting.
//!
//! Writing and formatting fail with different error variants, so callers
//! can tell "nothing was written" ([`Error::Write`]) from "written but not
//! formatted" ([`Error::Format`]).

use asynq_codegen_core::{Error, Result};
use std::io::Write;
use std::path::Path;
use std::process::Command;

/// Options for writing the generated file.
///
/// # Examples
///
/// ```
/// use asynq_codegen::WriteOptions;
///
/// let options = WriteOptions::default().with_atomic_writes(true);
/// assert!(options.atomic);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    /// Default: false, a failed write may leave a truncated file
    pub atomic: bool,
}

impl WriteOptions {
    /// Sets whether to use atomic writes.
    #[must_use]
    pub const fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }
}

/// Writes `content` to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`Error::Write`] if the file cannot be created, written, or
/// (in atomic mode) renamed into place.
pub fn write_output(path: &Path, content: &[u8], options: WriteOptions) -> Result<()> {
    let write_error = |source: std::io::Error| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    if options.atomic {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = tempfile::NamedTempFile::new_in(dir).map_err(write_error)?;
        file.write_all(content).map_err(write_error)?;
        file.as_file().sync_all().map_err(write_error)?;
        file.persist(path).map_err(|e| write_error(e.error))?;
    } else {
        std::fs::write(path, content).map_err(write_error)?;
    }

    tracing::debug!("Wrote {} bytes to {}", content.len(), path.display());

    Ok(())
}

/// Canonical formatting applied to the generated file in place.
#[cfg_attr(test, mockall::automock)]
pub trait Formatter {
    /// Formats the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if the formatter cannot run or fails.
    fn format(&self, path: &Path) -> Result<()>;
}

/// Formats files with the `rustfmt` executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rustfmt {
    program: String,
    edition: String,
}

impl Rustfmt {
    /// Creates a formatter running `program` for the given Rust edition.
    ///
    /// # Examples
    ///
    /// ```
    /// use asynq_codegen::Rustfmt;
    ///
    /// let rustfmt = Rustfmt::new("rustfmt", "2021");
    /// assert_eq!(rustfmt.program(), "rustfmt");
    /// ```
    #[must_use]
    pub fn new(program: impl Into<String>, edition: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            edition: edition.into(),
        }
    }

    /// Returns the configured executable.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for Rustfmt {
    fn default() -> Self {
        Self::new("rustfmt", "2021")
    }
}

impl Formatter for Rustfmt {
    fn format(&self, path: &Path) -> Result<()> {
        let format_error = |message: String| Error::Format {
            path: path.to_path_buf(),
            message,
        };

        let program = which::which(&self.program)
            .map_err(|e| format_error(format!("cannot find '{}': {e}", self.program)))?;

        tracing::debug!("Running {} on {}", program.display(), path.display());

        let output = Command::new(&program)
            .arg("--edition")
            .arg(&self.edition)
            .arg(path)
            .output()
            .map_err(|e| format_error(format!("failed to run {}: {e}", program.display())))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format_error(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

/// Formatter that leaves files untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFormatter;

impl Formatter for NoopFormatter {
    fn format(&self, path: &Path) -> Result<()> {
        tracing::debug!("Formatting disabled, leaving {} as rendered", path.display());
        Ok(())
    }
}
