//! Generation model builder.
//!
//! Runs the directive extractor over every item of a scanned package and
//! aggregates the results into a sorted [`GenerationModel`].

use crate::directive::{DirectiveOutcome, extract};
use crate::scanner::ScannedPackage;
use asynq_codegen_core::{DirectiveRecord, Error, GenerationModel, Result, to_snake_case};
use std::collections::HashMap;

/// Builds a [`GenerationModel`] from a scanned package.
///
/// # Examples
///
/// ```no_run
/// use asynq_codegen::{ModelBuilder, scan_directory};
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let package = scan_directory(Path::new("src/tasks"), None)?;
/// let model = ModelBuilder::new().build(&package)?;
/// for record in &model.records {
///     println!("{} -> {}", record.declared_name, record.resource_name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    generator_version: String,
}

impl ModelBuilder {
    /// Creates a builder stamping models with this crate's version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Overrides the generator version stamped into models.
    #[must_use]
    pub fn with_generator_version(mut self, version: impl Into<String>) -> Self {
        self.generator_version = version.into();
        self
    }

    /// Extracts every directive of `package` into a sorted model.
    ///
    /// # Errors
    ///
    /// Returns the first malformed directive as [`Error::Directive`], or
    /// [`Error::DuplicateTask`] if two structs share a declared or task
    /// name. No partial model is returned.
    pub fn build(&self, package: &ScannedPackage) -> Result<GenerationModel> {
        let mut model = GenerationModel::new(self.generator_version.clone());

        for file in &package.files {
            for item in &file.syntax.items {
                match extract(item, file) {
                    DirectiveOutcome::Found(record) => {
                        tracing::debug!(
                            "Found task {} ({}) at {}",
                            record.declared_name,
                            record.resource_name,
                            record.location()
                        );
                        model.push(&package.name, record);
                    }
                    DirectiveOutcome::Absent => {}
                    DirectiveOutcome::Malformed(err) => return Err(err),
                }
            }
        }

        model.sort_records();
        check_unique(&model.records)?;

        if model.is_empty() {
            tracing::warn!(
                "No '{}' directives found in {}",
                crate::DIRECTIVE_MARKER,
                package.dir.display()
            );
        } else {
            tracing::info!("Found {} tasks in package {}", model.len(), package.name);
        }

        Ok(model)
    }
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Rejects records that would generate clashing items.
///
/// Generated identifiers derive from the snake case form of the declared
/// name, so `SendSMS` and `SendSms` clash even with distinct task names.
fn check_unique(records: &[DirectiveRecord]) -> Result<()> {
    let mut declared: HashMap<&str, &DirectiveRecord> = HashMap::new();
    let mut resources: HashMap<&str, &DirectiveRecord> = HashMap::new();
    let mut idents: HashMap<String, &DirectiveRecord> = HashMap::new();

    for record in records {
        if let Some(first) = declared.insert(record.declared_name.as_str(), record) {
            return Err(duplicate(record.declared_name.as_str(), first, record));
        }
        if let Some(first) = resources.insert(record.resource_name.as_str(), record) {
            return Err(duplicate(record.resource_name.as_str(), first, record));
        }

        let ident = to_snake_case(record.declared_name.as_str());
        if let Some(first) = idents.get(&ident) {
            return Err(duplicate(&ident, first, record));
        }
        idents.insert(ident, record);
    }

    Ok(())
}

fn duplicate(name: &str, first: &DirectiveRecord, second: &DirectiveRecord) -> Error {
    Error::DuplicateTask {
        name: name.to_string(),
        first: first.location(),
        second: second.location(),
    }
}
