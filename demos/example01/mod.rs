//! Task payloads of the example worker.
//!
//! Run `asynq-codegen --working-dir demos/example01` to generate
//! `asynq_generated.rs` next to this file.
//!
//! Data-only fixture: no crate includes this module. The pipeline tests
//! scan a copy of it and parse the generated bindings with `syn`.

use serde::{Deserialize, Serialize};

/// Email delivery request.
///
/// asynq:task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendEmail {
    pub body: String,
    pub from: String,
    pub to: String,
}

/// asynq:task    send_sms_message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendSMS {
    pub message: String,
    pub recipient: String,
}

/// Not annotated, never generated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    pub id: String,
}
