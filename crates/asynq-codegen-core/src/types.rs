//! Strong domain types for asynq-codegen.
//!
//! Declared names and resource names are both strings, but mixing them up
//! generates code that enqueues under the wrong task type. The newtypes
//! below keep them apart and guarantee they are never empty.
//!
//! # Examples
//!
//! ```
//! use asynq_codegen_core::{DeclaredName, ResourceName};
//!
//! let declared = DeclaredName::new("SendEmail").unwrap();
//! let resource = ResourceName::from_declared(&declared);
//! assert_eq!(resource.as_str(), "send_email");
//! ```

use crate::naming::to_snake_case;
use crate::{Error, Result};
use serde::Serialize;
use std::fmt;

/// Identifier of an annotated struct, as written in source.
///
/// # Examples
///
/// ```
/// use asynq_codegen_core::DeclaredName;
///
/// let name = DeclaredName::new("SendSMS").unwrap();
/// assert_eq!(name.as_str(), "SendSMS");
/// assert!(DeclaredName::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DeclaredName(String);

impl DeclaredName {
    /// Creates a declared name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the name is empty.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidArgument(
                "declared name cannot be empty".to_string(),
            ));
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeclaredName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Task type name used on the queue by generated code.
///
/// Either an explicit override from the directive or the snake case form
/// of the declared name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ResourceName(String);

impl ResourceName {
    /// Creates a resource name from an explicit override.
    ///
    /// The override is taken verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the name is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use asynq_codegen_core::ResourceName;
    ///
    /// let name = ResourceName::new("send_sms_message").unwrap();
    /// assert_eq!(name.as_str(), "send_sms_message");
    /// ```
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidArgument(
                "resource name cannot be empty".to_string(),
            ));
        }
        Ok(Self(name))
    }

    /// Derives the default resource name from a declared name.
    #[must_use]
    pub fn from_declared(declared: &DeclaredName) -> Self {
        Self(to_snake_case(declared.as_str()))
    }

    /// Returns the name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
