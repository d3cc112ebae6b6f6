//! Source scanner.
//!
//! Parses every Rust file of one module directory into a syntax tree. Doc
//! comments survive parsing as `#[doc = "..."]` attributes, which is where
//! directives live. The directory is not walked recursively: nested
//! directories are separate modules and get their own generated file.
//!
//! Files ending in `_generated.rs` are skipped so the generator never reads
//! its own output.

use asynq_codegen_core::{Error, GENERATED_SUFFIX, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File names that are the root of their module.
const MODULE_ROOTS: [&str; 3] = ["mod", "lib", "main"];

/// One parsed source file.
#[derive(Debug, Clone)]
pub struct ScannedFile {
    /// Path of the file
    pub path: PathBuf,
    /// Submodule the file defines, or `None` for the module root file
    pub module: Option<String>,
    /// Parsed syntax tree
    pub syntax: syn::File,
}

/// Every eligible file of a scanned directory.
#[derive(Debug, Clone)]
pub struct ScannedPackage {
    /// Module name of the directory
    pub name: String,
    /// Scanned directory
    pub dir: PathBuf,
    /// Parsed files, ordered by file name
    pub files: Vec<ScannedFile>,
}

/// Parses every eligible `.rs` file directly inside `dir`.
///
/// Files are visited in file-name order, so the result does not depend on
/// the order the filesystem lists them in. `package_name` overrides the
/// name derived from the directory.
///
/// # Errors
///
/// Returns [`Error::Scan`] if the directory cannot be listed or any file
/// cannot be read or parsed, and [`Error::InvalidArgument`] if no package
/// name can be derived.
///
/// # Examples
///
/// ```no_run
/// use asynq_codegen::scan_directory;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let package = scan_directory(Path::new("src/tasks"), None)?;
/// println!("{}: {} files", package.name, package.files.len());
/// # Ok(())
/// # }
/// ```
pub fn scan_directory(dir: &Path, package_name: Option<&str>) -> Result<ScannedPackage> {
    let name = match package_name {
        Some(name) => name.to_string(),
        None => resolve_package_name(dir)?,
    };

    tracing::info!("Scanning {} (package {name})", dir.display());

    let mut files = Vec::new();

    let entries = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in entries {
        let entry = entry.map_err(|e| Error::Scan {
            path: dir.to_path_buf(),
            source: Box::new(e),
        })?;

        if !entry.file_type().is_file() || !is_source_file(entry.path()) {
            continue;
        }

        let path = entry.into_path();
        tracing::debug!("Parsing {}", path.display());

        files.push(parse_source_file(path)?);
    }

    tracing::info!("Parsed {} files in {}", files.len(), dir.display());

    Ok(ScannedPackage {
        name,
        dir: dir.to_path_buf(),
        files,
    })
}

/// Reads and parses a single file.
///
/// # Errors
///
/// Returns [`Error::Scan`] on read or syntax failure.
pub fn parse_source_file(path: PathBuf) -> Result<ScannedFile> {
    let content = std::fs::read_to_string(&path).map_err(|e| Error::Scan {
        path: path.clone(),
        source: Box::new(e),
    })?;

    let syntax = syn::parse_file(&content).map_err(|e| {
        let start = e.span().start();
        Error::Scan {
            path: path.clone(),
            source: format!("{}:{}: {e}", start.line, start.column + 1).into(),
        }
    })?;

    Ok(ScannedFile {
        module: module_name(&path),
        path,
        syntax,
    })
}

/// Returns `true` for `.rs` files not produced by the generator.
fn is_source_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };

    path.extension().is_some_and(|ext| ext == "rs") && !name.ends_with(GENERATED_SUFFIX)
}

fn module_name(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    if MODULE_ROOTS.contains(&stem) {
        None
    } else {
        Some(stem.to_string())
    }
}

/// Derives the module name of `dir`.
///
/// A crate's `src` directory takes the crate name from the sibling
/// `Cargo.toml`; any other directory is named after itself.
fn resolve_package_name(dir: &Path) -> Result<String> {
    let dir = dir.canonicalize().map_err(|e| Error::Scan {
        path: dir.to_path_buf(),
        source: Box::new(e),
    })?;

    let dir_name = dir
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            Error::InvalidArgument(format!(
                "cannot derive a package name from {}; set one explicitly",
                dir.display()
            ))
        })?;

    if dir_name == "src"
        && let Some(crate_name) = dir.parent().and_then(crate_name)
    {
        return Ok(crate_name.replace('-', "_"));
    }

    Ok(dir_name.replace('-', "_"))
}

fn crate_name(crate_dir: &Path) -> Option<String> {
    let manifest = std::fs::read_to_string(crate_dir.join("Cargo.toml")).ok()?;
    let table: toml::Table = toml::from_str(&manifest).ok()?;
    table
        .get("package")?
        .get("name")?
        .as_str()
        .map(str::to_string)
}
