//! Generation model passed to the template renderer.
//!
//! The model is serialized with serde and handed to the template as its
//! context, so field names here are the names templates refer to.

use crate::{DeclaredName, ResourceName};
use serde::Serialize;
use std::path::PathBuf;

/// One struct annotated with an `asynq:task` directive.
///
/// # Examples
///
/// ```
/// use asynq_codegen_core::{DeclaredName, DirectiveRecord, ResourceName};
///
/// let declared = DeclaredName::new("SendEmail").unwrap();
/// let record = DirectiveRecord::new(
///     declared.clone(),
///     ResourceName::from_declared(&declared),
///     None,
///     "tasks/mod.rs".into(),
///     4,
/// );
///
/// assert_eq!(record.resource_name.as_str(), "send_email");
/// assert_eq!(record.location(), "tasks/mod.rs:4");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectiveRecord {
    /// Struct identifier as written in source
    pub declared_name: DeclaredName,
    /// Task type name used on the queue
    pub resource_name: ResourceName,
    /// Module declaring the struct, relative to the scanned module.
    /// `None` when declared in the module root file.
    pub source_module: Option<String>,
    /// File name of the declaring source file
    pub source_file: String,
    /// 1-based line of the struct declaration
    pub line: usize,
    /// Full path of the declaring file, for diagnostics
    #[serde(skip)]
    pub path: PathBuf,
}

impl DirectiveRecord {
    /// Creates a record for a struct declared at `path:line`.
    #[must_use]
    pub fn new(
        declared_name: DeclaredName,
        resource_name: ResourceName,
        source_module: Option<String>,
        path: PathBuf,
        line: usize,
    ) -> Self {
        let source_file = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            declared_name,
            resource_name,
            source_module,
            source_file,
            line,
            path,
        }
    }

    /// Returns `path:line` of the declaration.
    #[must_use]
    pub fn location(&self) -> String {
        format!("{}:{}", self.path.display(), self.line)
    }
}

/// Aggregate of every directive found in one scanned module.
///
/// Records are kept sorted by declared name so repeated runs over the same
/// sources render byte-identical output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationModel {
    /// Name of the scanned module; `None` until a directive is found
    pub package_name: Option<String>,
    /// Directive records, ascending by declared name
    pub records: Vec<DirectiveRecord>,
    /// Version of the generator that produced the model
    pub generator_version: String,
}

impl GenerationModel {
    /// Creates an empty model stamped with the given generator version.
    #[must_use]
    pub fn new(generator_version: impl Into<String>) -> Self {
        Self {
            package_name: None,
            records: Vec::new(),
            generator_version: generator_version.into(),
        }
    }

    /// Adds a record found in `package`.
    ///
    /// The first record fixes the package name.
    pub fn push(&mut self, package: &str, record: DirectiveRecord) {
        if self.package_name.is_none() {
            self.package_name = Some(package.to_string());
        }
        self.records.push(record);
    }

    /// Sorts records by declared name in code-point order.
    ///
    /// The sort is stable: records with equal names keep discovery order.
    pub fn sort_records(&mut self) {
        self.records
            .sort_by(|a, b| a.declared_name.cmp(&b.declared_name));
    }

    /// Returns the number of records.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no directive was found.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
