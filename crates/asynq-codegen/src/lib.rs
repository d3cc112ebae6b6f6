//! Code generation for asynq task queues.
//!
//! Scans a Rust module directory for structs annotated with an
//! `/// asynq:task` doc comment and generates typed task constructors,
//! enqueue helpers, and handler registration using Handlebars templates.
//!
//! # Pipeline
//!
//! 1. [`scanner`] parses every `.rs` file of one directory
//! 2. [`directive`] decodes the `asynq:task` directive of each struct
//! 3. [`model`] aggregates the records into a sorted `GenerationModel`
//! 4. [`template_engine`] renders the model
//! 5. [`writer`] writes the output and runs the formatter
//!
//! [`Generator`] drives all five stages.
//!
//! # Examples
//!
//! ```no_run
//! use asynq_codegen::Generator;
//! use asynq_codegen_core::CodegenConfig;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = Generator::new(CodegenConfig::new("src/tasks"))?;
//! let report = generator.run()?;
//! println!("{} tasks written to {}", report.task_count, report.output.display());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod directive;
pub mod generator;
pub mod model;
pub mod scanner;
pub mod template_engine;
pub mod writer;

pub use directive::{DIRECTIVE_MARKER, DirectiveOutcome};
pub use generator::{GenerationReport, Generator};
pub use model::ModelBuilder;
pub use scanner::{ScannedFile, ScannedPackage, scan_directory};
pub use template_engine::{TASKS_TEMPLATE, TemplateEngine};
pub use writer::{Formatter, NoopFormatter, Rustfmt, WriteOptions, write_output};
