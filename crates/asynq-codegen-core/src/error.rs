//! Error types for asynq-codegen.
//!
//! Every stage of the pipeline reports failures through [`Error`]. Each
//! variant carries enough context (file, line, template name) to locate the
//! cause without re-running the generator.
//!
//! A declaration without a directive is not an error: the extractor reports
//! it as an explicit "absent" outcome, so it never reaches this type.
//!
//! # Examples
//!
//! ```
//! use asynq_codegen_core::{Error, Result};
//! use std::path::PathBuf;
//!
//! fn check_directive(tokens: usize) -> Result<()> {
//!     if tokens > 1 {
//!         return Err(Error::Directive {
//!             path: PathBuf::from("src/tasks/mod.rs"),
//!             line: 12,
//!             message: "unexpected trailing tokens".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = check_directive(2).unwrap_err();
//! assert!(err.is_directive_error());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for asynq-codegen.
#[derive(Error, Debug)]
pub enum Error {
    /// A source file could not be read or parsed.
    ///
    /// Aborts the scan immediately; no model is produced.
    #[error("failed to parse {}", path.display())]
    Scan {
        /// File that failed to parse
        path: PathBuf,
        /// Underlying I/O or syntax error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A directive on an otherwise eligible struct is malformed.
    #[error("invalid asynq-codegen struct found in {}:{line}: {message}", path.display())]
    Directive {
        /// File declaring the struct
        path: PathBuf,
        /// 1-based line of the struct declaration
        line: usize,
        /// What is wrong with the directive
        message: String,
    },

    /// Two annotated structs resolve to the same generated name.
    #[error("duplicate asynq task '{name}' declared at {first} and {second}")]
    DuplicateTask {
        /// The clashing declared or resource name
        name: String,
        /// `path:line` of the first declaration
        first: String,
        /// `path:line` of the second declaration
        second: String,
    },

    /// A template could not be parsed.
    #[error("invalid template '{name}': {message}")]
    Template {
        /// Template name or path
        name: String,
        /// Parser diagnostic
        message: String,
    },

    /// A template failed to render against its context.
    #[error("cannot render template '{name}': {message}")]
    Render {
        /// Template name
        name: String,
        /// Renderer diagnostic
        message: String,
    },

    /// The generated file could not be written.
    ///
    /// The destination may have been truncated.
    #[error("could not write generated file {}", path.display())]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The formatter could not be run or rejected the generated file.
    ///
    /// The destination has already been written when this is returned.
    #[error("could not format generated file {}: {message}", path.display())]
    Format {
        /// Destination path
        path: PathBuf,
        /// Formatter diagnostic
        message: String,
    },

    /// Configuration error.
    ///
    /// Raised when a config file cannot be read or contains invalid values.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// Invalid argument error.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Returns `true` if a source file failed to parse.
    #[must_use]
    pub const fn is_scan_error(&self) -> bool {
        matches!(self, Self::Scan { .. })
    }

    /// Returns `true` if this is a malformed directive.
    ///
    /// # Examples
    ///
    /// ```
    /// use asynq_codegen_core::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::Directive {
    ///     path: PathBuf::from("tasks.rs"),
    ///     line: 3,
    ///     message: "unexpected trailing tokens".to_string(),
    /// };
    /// assert!(err.is_directive_error());
    /// assert!(!err.is_scan_error());
    /// ```
    #[must_use]
    pub const fn is_directive_error(&self) -> bool {
        matches!(self, Self::Directive { .. })
    }

    /// Returns `true` if two tasks clash by name.
    #[must_use]
    pub const fn is_duplicate_task(&self) -> bool {
        matches!(self, Self::DuplicateTask { .. })
    }

    /// Returns `true` if a template failed to parse.
    #[must_use]
    pub const fn is_template_error(&self) -> bool {
        matches!(self, Self::Template { .. })
    }

    /// Returns `true` if rendering failed.
    #[must_use]
    pub const fn is_render_error(&self) -> bool {
        matches!(self, Self::Render { .. })
    }

    /// Returns `true` if nothing usable was written.
    #[must_use]
    pub const fn is_write_error(&self) -> bool {
        matches!(self, Self::Write { .. })
    }

    /// Returns `true` if the file was written but not formatted.
    ///
    /// # Examples
    ///
    /// ```
    /// use asynq_codegen_core::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::Format {
    ///     path: PathBuf::from("asynq_generated.rs"),
    ///     message: "rustfmt exited with status 1".to_string(),
    /// };
    /// assert!(err.is_format_error());
    /// assert!(!err.is_write_error());
    /// ```
    #[must_use]
    pub const fn is_format_error(&self) -> bool {
        matches!(self, Self::Format { .. })
    }

    /// Returns `true` if this is a configuration error.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

/// Result type alias for asynq-codegen operations.
pub type Result<T> = std::result::Result<T, Error>;
