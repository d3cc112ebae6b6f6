//! Generator configuration.
//!
//! Configuration comes from three layers, later ones winning:
//! built-in defaults, an optional `asynq-codegen.toml` in the working
//! directory, and command-line flags applied through the `with_*` setters.
//!
//! # Examples
//!
//! ```
//! use asynq_codegen_core::CodegenConfig;
//! use std::path::Path;
//!
//! let config = CodegenConfig::new("src/tasks")
//!     .with_package_name("tasks")
//!     .with_format(false);
//!
//! assert_eq!(config.output_path(), Path::new("src/tasks/asynq_generated.rs"));
//! assert!(!config.format);
//! ```

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Suffix marking generated files; such files are never scanned.
pub const GENERATED_SUFFIX: &str = "_generated.rs";

/// Default output file name, relative to the working directory.
pub const DEFAULT_OUTPUT_FILE: &str = "asynq_generated.rs";

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "asynq-codegen.toml";

/// Generator configuration.
///
/// Relative `output` and `template` paths resolve against `working_dir`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodegenConfig {
    /// Directory scanned for annotated structs
    #[serde(skip)]
    pub working_dir: PathBuf,

    /// Destination of the generated file.
    /// Default: `asynq_generated.rs` in the working directory
    pub output: Option<PathBuf>,

    /// Template file replacing the bundled one
    pub template: Option<PathBuf>,

    /// Package name override; otherwise derived from the directory
    pub package_name: Option<String>,

    /// Run the formatter on the generated file.
    /// Default: true
    pub format: bool,

    /// Formatter executable.
    /// Default: `rustfmt`
    pub formatter: String,

    /// Rust edition passed to the formatter.
    /// Default: `2021`
    pub edition: String,

    /// Stage the output in a temp file and rename it into place.
    /// Default: false
    pub atomic_write: bool,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("."),
            output: None,
            template: None,
            package_name: None,
            format: true,
            formatter: "rustfmt".to_string(),
            edition: "2021".to_string(),
            atomic_write: false,
        }
    }
}

impl CodegenConfig {
    /// Creates a default configuration for `working_dir`.
    #[must_use]
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            ..Self::default()
        }
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or parsed.
    pub fn load(path: &Path, working_dir: impl Into<PathBuf>) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("failed to read {}: {e}", path.display()),
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|e| Error::Config {
            message: format!("failed to parse {}: {e}", path.display()),
        })?;
        config.working_dir = working_dir.into();

        tracing::debug!("Loaded configuration from {}", path.display());

        Ok(config)
    }

    /// Loads `asynq-codegen.toml` from `working_dir` if present,
    /// otherwise returns defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file exists but is invalid.
    pub fn discover(working_dir: impl Into<PathBuf>) -> Result<Self> {
        let working_dir = working_dir.into();
        let candidate = working_dir.join(CONFIG_FILE_NAME);

        if candidate.is_file() {
            Self::load(&candidate, working_dir)
        } else {
            Ok(Self::new(working_dir))
        }
    }

    /// Sets the output path.
    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Sets a template file replacing the bundled one.
    #[must_use]
    pub fn with_template(mut self, template: impl Into<PathBuf>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Sets the package name.
    #[must_use]
    pub fn with_package_name(mut self, name: impl Into<String>) -> Self {
        self.package_name = Some(name.into());
        self
    }

    /// Enables or disables the formatter.
    #[must_use]
    pub const fn with_format(mut self, format: bool) -> Self {
        self.format = format;
        self
    }

    /// Enables or disables atomic writes.
    #[must_use]
    pub const fn with_atomic_write(mut self, atomic: bool) -> Self {
        self.atomic_write = atomic;
        self
    }

    /// Returns the resolved destination path.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output.as_ref().map_or_else(
            || self.working_dir.join(DEFAULT_OUTPUT_FILE),
            |output| self.resolve(output),
        )
    }

    /// Returns the resolved template path, if one is configured.
    #[must_use]
    pub fn template_path(&self) -> Option<PathBuf> {
        self.template.as_ref().map(|template| self.resolve(template))
    }

    /// Checks the configuration for values the pipeline cannot use.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on an empty formatter, edition, or
    /// package name.
    pub fn validate(&self) -> Result<()> {
        if self.format && self.formatter.trim().is_empty() {
            return Err(Error::Config {
                message: "formatter cannot be empty when formatting is enabled".to_string(),
            });
        }

        if self.edition.trim().is_empty() {
            return Err(Error::Config {
                message: "edition cannot be empty".to_string(),
            });
        }

        if self.package_name.as_deref().is_some_and(str::is_empty) {
            return Err(Error::Config {
                message: "package name cannot be empty".to_string(),
            });
        }

        let output = self.output_path();
        let scanned = output.parent() == Some(self.working_dir.as_path());
        let marked = output
            .file_name()
            .is_some_and(|name| name.to_string_lossy().ends_with(GENERATED_SUFFIX));
        if scanned && !marked {
            tracing::warn!(
                "Output {} does not end with '{}' and will be scanned on the next run",
                output.display(),
                GENERATED_SUFFIX
            );
        }

        Ok(())
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = CodegenConfig::new("/work");
        assert_eq!(config.output_path(), PathBuf::from("/work/asynq_generated.rs"));
        assert!(config.template_path().is_none());
        assert!(config.format);
        assert!(!config.atomic_write);
        assert_eq!(config.formatter, "rustfmt");
        assert_eq!(config.edition, "2021");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_output_is_excluded_from_scan() {
        assert!(DEFAULT_OUTPUT_FILE.ends_with(GENERATED_SUFFIX));
    }

    #[test]
    fn test_relative_paths_resolve_against_working_dir() {
        let config = CodegenConfig::new("/work")
            .with_output("gen/tasks_generated.rs")
            .with_template("tpl/tasks.hbs");
        assert_eq!(
            config.output_path(),
            PathBuf::from("/work/gen/tasks_generated.rs")
        );
        assert_eq!(
            config.template_path(),
            Some(PathBuf::from("/work/tpl/tasks.hbs"))
        );
    }

    #[test]
    fn test_absolute_output_kept() {
        let config = CodegenConfig::new("/work").with_output("/tmp/out_generated.rs");
        assert_eq!(config.output_path(), PathBuf::from("/tmp/out_generated.rs"));
    }

    #[test]
    fn test_discover_without_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = CodegenConfig::discover(dir.path()).unwrap();
        assert_eq!(config, CodegenConfig::new(dir.path()));
    }

    #[test]
    fn test_discover_reads_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "output = \"queue_generated.rs\"\npackage_name = \"jobs\"\nformat = false\n",
        )
        .unwrap();

        let config = CodegenConfig::discover(dir.path()).unwrap();
        assert_eq!(config.output_path(), dir.path().join("queue_generated.rs"));
        assert_eq!(config.package_name.as_deref(), Some("jobs"));
        assert!(!config.format);
        assert_eq!(config.formatter, "rustfmt");
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "outptu = \"x.rs\"\n").unwrap();

        let err = CodegenConfig::load(&path, dir.path()).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = CodegenConfig::load(Path::new("/nonexistent/asynq-codegen.toml"), "/")
            .unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_validate_rejects_empty_values() {
        let mut config = CodegenConfig::new("/work");
        config.formatter = String::new();
        assert!(config.validate().is_err());

        let config = CodegenConfig::new("/work").with_package_name("");
        assert!(config.validate().is_err());

        let mut config = CodegenConfig::new("/work").with_format(false);
        config.formatter = String::new();
        assert!(config.validate().is_ok());
    }
}
