//! Command-line front end of asynq-codegen.
//!
//! Parses flags, merges them over the optional `asynq-codegen.toml`, and
//! runs the generator once for the working directory.
//!
//! # Examples
//!
//! ```bash
//! # Generate bindings for the current directory
//! asynq-codegen
//!
//! # Generate for another module without formatting
//! asynq-codegen --working-dir src/tasks --no-format
//! ```

use anyhow::{Context, Result};
use asynq_codegen::{GenerationReport, Generator};
use asynq_codegen_core::CodegenConfig;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Generates asynq task bindings from annotated structs.
///
/// Scans every `.rs` file of the working directory for structs whose doc
/// comment contains `asynq:task [name]` and writes constructors, enqueue
/// helpers, and handler registration into one generated file.
#[derive(Parser, Debug)]
#[command(name = "asynq-codegen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan
    #[arg(
        short = 'd',
        long,
        env = "ASYNQ_CODEGEN_WORKING_DIR",
        default_value = "."
    )]
    pub working_dir: PathBuf,

    /// Output file (default: asynq_generated.rs in the working directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Handlebars template replacing the bundled one
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Package name used in the generated header
    #[arg(short, long)]
    pub package: Option<String>,

    /// Configuration file (default: asynq-codegen.toml in the working directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip running rustfmt on the output
    #[arg(long)]
    pub no_format: bool,

    /// Write through a temporary file and rename it into place
    #[arg(long)]
    pub atomic: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Disable all log output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Builds the effective configuration: file values overridden by flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be loaded.
    pub fn codegen_config(&self) -> Result<CodegenConfig> {
        let mut config = match &self.config {
            Some(path) => CodegenConfig::load(path, &self.working_dir)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => CodegenConfig::discover(&self.working_dir)?,
        };

        if let Some(output) = &self.output {
            config = config.with_output(output);
        }
        if let Some(template) = &self.template {
            config = config.with_template(template);
        }
        if let Some(package) = &self.package {
            config = config.with_package_name(package);
        }
        if self.no_format {
            config = config.with_format(false);
        }
        if self.atomic {
            config = config.with_atomic_write(true);
        }

        Ok(config)
    }
}

/// Runs one generation for the parsed command line.
///
/// # Errors
///
/// Returns the first configuration or pipeline error, with context.
pub fn run(cli: &Cli) -> Result<GenerationReport> {
    let config = cli.codegen_config()?;
    let working_dir = config.working_dir.clone();

    let report = Generator::new(config)
        .context("invalid asynq-codegen configuration")?
        .run()
        .with_context(|| {
            format!(
                "failed to generate asynq bindings for {}",
                working_dir.display()
            )
        })?;

    tracing::info!(
        "Wrote {} task bindings to {}",
        report.task_count,
        report.output.display()
    );

    Ok(report)
}

/// Initializes logging infrastructure.
///
/// Logs go to stderr. `--verbose` forces debug, `--quiet` disables output,
/// otherwise `RUST_LOG` applies with `info` as fallback.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(verbose: bool, quiet: bool) -> Result<()> {
    let filter = if quiet {
        EnvFilter::new("off")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("failed to initialize logging")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::Path;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["asynq-codegen"]);
        assert!(cli.output.is_none());
        assert!(cli.template.is_none());
        assert!(cli.package.is_none());
        assert!(!cli.no_format);
        assert!(!cli.atomic);
        assert!(!cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_cli_all_flags() {
        let cli = Cli::parse_from([
            "asynq-codegen",
            "--working-dir",
            "src/tasks",
            "--output",
            "out_generated.rs",
            "--template",
            "tasks.hbs",
            "--package",
            "mail",
            "--no-format",
            "--atomic",
            "--verbose",
        ]);

        assert_eq!(cli.working_dir, Path::new("src/tasks"));
        assert_eq!(cli.output.as_deref(), Some(Path::new("out_generated.rs")));
        assert_eq!(cli.template.as_deref(), Some(Path::new("tasks.hbs")));
        assert_eq!(cli.package.as_deref(), Some("mail"));
        assert!(cli.no_format);
        assert!(cli.atomic);
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_verbose_conflicts_with_quiet() {
        let result = Cli::try_parse_from(["asynq-codegen", "--verbose", "--quiet"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "asynq-codegen",
            "--working-dir",
            "/nonexistent/tasks",
            "--package",
            "mail",
            "--no-format",
            "--atomic",
        ]);

        let config = cli.codegen_config().unwrap();
        assert_eq!(config.working_dir, Path::new("/nonexistent/tasks"));
        assert_eq!(config.package_name.as_deref(), Some("mail"));
        assert!(!config.format);
        assert!(config.atomic_write);
    }

    #[test]
    fn test_missing_config_file_fails() {
        let cli = Cli::parse_from([
            "asynq-codegen",
            "--config",
            "/nonexistent/asynq-codegen.toml",
        ]);

        let err = cli.codegen_config().unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/asynq-codegen.toml"));
    }
}
