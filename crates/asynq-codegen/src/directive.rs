//! Directive extraction.
//!
//! A struct opts into code generation with a doc comment line of the form
//!
//! ```text
//! /// asynq:task
//! /// asynq:task <task-name>
//! ```
//!
//! The optional token overrides the task name, which otherwise defaults to
//! the snake case form of the struct name. Anything after the optional
//! token makes the directive malformed.

use crate::scanner::ScannedFile;
use asynq_codegen_core::{DeclaredName, DirectiveRecord, Error, ResourceName, to_snake_case};
use syn::ext::IdentExt;
use syn::{Attribute, Expr, ExprLit, Fields, Ident, Item, Lit, Meta};

/// Doc comment marker opting a struct into code generation.
pub const DIRECTIVE_MARKER: &str = "asynq:task";

/// Result of inspecting one item for a directive.
#[derive(Debug)]
pub enum DirectiveOutcome {
    /// The item is an annotated struct.
    Found(DirectiveRecord),
    /// The item is not an annotated struct; skip it.
    Absent,
    /// The item is an annotated struct but the directive is invalid.
    Malformed(Error),
}

/// Decoded directive parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Directive {
    name_override: Option<String>,
}

/// Inspects `item`, declared in `file`, for an `asynq:task` directive.
///
/// Only structs with named fields are eligible. Other items, and structs
/// without a directive line, are [`DirectiveOutcome::Absent`].
#[must_use]
pub fn extract(item: &Item, file: &ScannedFile) -> DirectiveOutcome {
    let Item::Struct(item) = item else {
        return DirectiveOutcome::Absent;
    };

    if !matches!(item.fields, Fields::Named(_)) {
        tracing::debug!("Skipping {}: not a struct with named fields", item.ident);
        return DirectiveOutcome::Absent;
    }

    let line = item.ident.span().start().line;
    let malformed = |message: String| {
        DirectiveOutcome::Malformed(Error::Directive {
            path: file.path.clone(),
            line,
            message,
        })
    };

    let directive = match parse_directive(&doc_lines(&item.attrs)) {
        Ok(Some(directive)) => directive,
        Ok(None) => return DirectiveOutcome::Absent,
        Err(message) => return malformed(message),
    };

    let declared = match DeclaredName::new(item.ident.unraw().to_string()) {
        Ok(declared) => declared,
        Err(e) => return malformed(e.to_string()),
    };

    if let Some(keyword) = keyword_identifier(&declared) {
        return malformed(format!(
            "struct name '{declared}' generates the Rust keyword '{keyword}'"
        ));
    }

    let resource = match directive.name_override {
        Some(name) => match ResourceName::new(name) {
            Ok(resource) => resource,
            Err(e) => return malformed(e.to_string()),
        },
        None => ResourceName::from_declared(&declared),
    };

    DirectiveOutcome::Found(DirectiveRecord::new(
        declared,
        resource,
        file.module.clone(),
        file.path.clone(),
        line,
    ))
}

/// Returns the first identifier derived from `declared` that is a keyword.
///
/// Generated code uses the declared name in imports and its snake case form
/// for fields and bindings.
fn keyword_identifier(declared: &DeclaredName) -> Option<String> {
    [declared.to_string(), to_snake_case(declared.as_str())]
        .into_iter()
        .find(|ident| syn::parse_str::<Ident>(ident).is_err())
}

/// Collects the doc comment text of `attrs`, one entry per line.
fn doc_lines(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(text),
                    ..
                }) => Some(text.value()),
                _ => None,
            },
            _ => None,
        })
        .flat_map(|text| text.lines().map(str::to_string).collect::<Vec<_>>())
        .collect()
}

/// Decodes the directive from doc comment lines.
///
/// Returns `Ok(None)` when no line starts with the marker.
fn parse_directive(lines: &[String]) -> Result<Option<Directive>, String> {
    let mut found: Option<Directive> = None;

    for line in lines {
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some(DIRECTIVE_MARKER) {
            continue;
        }

        let name_override = tokens.next().map(str::to_string);
        let trailing: Vec<&str> = tokens.collect();

        if !trailing.is_empty() {
            return Err(format!(
                "unexpected tokens after task name '{}': {}",
                name_override.unwrap_or_default(),
                trailing.join(" ")
            ));
        }

        if found.is_some() {
            return Err(format!("'{DIRECTIVE_MARKER}' directive repeated"));
        }

        found = Some(Directive { name_override });
    }

    Ok(found)
}
