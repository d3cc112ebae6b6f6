//! Core types, naming rules, configuration, and errors for asynq-codegen.
//!
//! This crate provides the foundational types shared by the generator
//! pipeline and the command-line entry point.
//!
//! # Architecture
//!
//! The core consists of:
//! - Strong domain types (`DeclaredName`, `ResourceName`)
//! - The generation model (`DirectiveRecord`, `GenerationModel`)
//! - The task-name normalization rule (`to_snake_case`)
//! - Error hierarchy with file and line context
//! - Generator configuration (`CodegenConfig`)

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;
mod model;
mod naming;
mod types;

pub use config::{CONFIG_FILE_NAME, CodegenConfig, DEFAULT_OUTPUT_FILE, GENERATED_SUFFIX};
pub use error::{Error, Result};
pub use model::{DirectiveRecord, GenerationModel};
pub use naming::{to_snake_case, to_upper_snake_case};
pub use types::{DeclaredName, ResourceName};
