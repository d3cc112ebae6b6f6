//! Generator facade.
//!
//! Drives the whole pipeline: scan, extract, build the model, render, write,
//! and format. Stages run sequentially and the first error aborts the run.
//!
//! # Examples
//!
//! ```no_run
//! use asynq_codegen::{Generator, NoopFormatter};
//! use asynq_codegen_core::CodegenConfig;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = Generator::new(CodegenConfig::new("src/tasks"))?
//!     .with_formatter(NoopFormatter);
//!
//! let model = generator.inspect()?;
//! let output = generator.generate(&model)?;
//! println!("Generated {}", output.display());
//! # Ok(())
//! # }
//! ```

use crate::model::ModelBuilder;
use crate::scanner::scan_directory;
use crate::template_engine::{TASKS_TEMPLATE, TemplateEngine};
use crate::writer::{Formatter, NoopFormatter, Rustfmt, WriteOptions, write_output};
use asynq_codegen_core::{CodegenConfig, GenerationModel, Result};
use std::fmt;
use std::path::PathBuf;

/// Outcome of a successful generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Path of the generated file
    pub output: PathBuf,
    /// Number of tasks rendered
    pub task_count: usize,
}

/// Runs the code generation pipeline for one module directory.
pub struct Generator {
    config: CodegenConfig,
    engine: TemplateEngine<'static>,
    formatter: Box<dyn Formatter>,
}

impl Generator {
    /// Creates a generator from configuration.
    ///
    /// Uses `rustfmt` unless formatting is disabled in `config`. A
    /// configured template replaces the bundled one.
    ///
    /// # Errors
    ///
    /// Returns [`asynq_codegen_core::Error::Config`] for invalid
    /// configuration and [`asynq_codegen_core::Error::Template`] if the
    /// configured template cannot be read or parsed.
    pub fn new(config: CodegenConfig) -> Result<Self> {
        config.validate()?;

        let mut engine = TemplateEngine::new()?;
        if let Some(template) = config.template_path() {
            engine.register_template_file(TASKS_TEMPLATE, &template)?;
        }

        let formatter: Box<dyn Formatter> = if config.format {
            Box::new(Rustfmt::new(&config.formatter, &config.edition))
        } else {
            Box::new(NoopFormatter)
        };

        Ok(Self {
            config,
            engine,
            formatter,
        })
    }

    /// Replaces the formatter.
    #[must_use]
    pub fn with_formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Returns the configuration in use.
    #[must_use]
    pub const fn config(&self) -> &CodegenConfig {
        &self.config
    }

    /// Scans the working directory and builds the generation model.
    ///
    /// # Errors
    ///
    /// Returns the first scan, directive, or duplicate-task error.
    pub fn inspect(&self) -> Result<GenerationModel> {
        let package = scan_directory(
            &self.config.working_dir,
            self.config.package_name.as_deref(),
        )?;

        ModelBuilder::new().build(&package)
    }

    /// Renders `model`, writes it to the configured output, and formats it.
    ///
    /// # Errors
    ///
    /// Returns a render, write, or format error. On a format error the
    /// output has already been written.
    pub fn generate(&self, model: &GenerationModel) -> Result<PathBuf> {
        let output = self.config.output_path();

        let rendered = self.engine.render(TASKS_TEMPLATE, model)?;

        let options = WriteOptions::default().with_atomic_writes(self.config.atomic_write);
        write_output(&output, rendered.as_bytes(), options)?;

        self.formatter.format(&output)?;

        tracing::info!(
            "Generated {} tasks into {}",
            model.len(),
            output.display()
        );

        Ok(output)
    }

    /// Runs [`inspect`](Self::inspect) then [`generate`](Self::generate).
    ///
    /// # Errors
    ///
    /// Returns the first error of any stage.
    pub fn run(&self) -> Result<GenerationReport> {
        let model = self.inspect()?;
        let output = self.generate(&model)?;

        Ok(GenerationReport {
            output,
            task_count: model.len(),
        })
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("config", &self.config)
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}
