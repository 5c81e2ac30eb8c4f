//! Error taxonomy for calls made against the back-office API.
//!
//! Screens only ever need two things from a failed request: a single
//! human-readable message to show above a form or in place of a list, and
//! (for validation failures) a per-field map so inputs can be highlighted.
//! `ApiError::message` and `ApiError::field_errors` provide exactly that.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Error returned by every API call and by the paginated loader
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced an HTTP response
    #[error("Network error: {0}")]
    Network(String),

    /// The server rejected the input with per-field details
    #[error("{message}")]
    Validation {
        message: String,
        fields: HashMap<String, String>,
    },

    /// Any other non-success status
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// The response body did not match the expected shape
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// The request body could not be serialized
    #[error("Failed to serialize request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Message suitable for direct display
    pub fn message(&self) -> String {
        match self {
            ApiError::Validation { message, .. } => message.clone(),
            ApiError::Server { message, .. } if !message.is_empty() => message.clone(),
            other => other.to_string(),
        }
    }

    /// Field name to message map; empty unless this is a validation failure
    pub fn field_errors(&self) -> HashMap<String, String> {
        match self {
            ApiError::Validation { fields, .. } => fields.clone(),
            _ => HashMap::new(),
        }
    }

    /// Builds an error from a non-success status and its raw body.
    ///
    /// Bodies shaped like `{ "message": ..., "errors": { field: ... } }` become
    /// `Validation` when they carry field errors, `Server` otherwise. Bodies that
    /// are not JSON are used verbatim as the message.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) => {
                let fields = parsed.flatten_errors();
                let message = parsed
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .or_else(|| fields.values().next().cloned())
                    .unwrap_or_else(|| format!("Request failed with status {}", status));

                if fields.is_empty() {
                    ApiError::Server { status, message }
                } else {
                    ApiError::Validation { message, fields }
                }
            }
            Err(_) if body.trim().is_empty() => ApiError::Server {
                status,
                message: format!("Request failed with status {}", status),
            },
            Err(_) => ApiError::Server {
                status,
                message: body.trim().to_string(),
            },
        }
    }
}

/// Error body sent by the backend on non-success responses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: HashMap<String, FieldErrors>,
}

/// Field errors arrive either as a single string or as a list of strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldErrors {
    One(String),
    Many(Vec<String>),
}

impl FieldErrors {
    fn joined(&self) -> String {
        match self {
            FieldErrors::One(message) => message.clone(),
            FieldErrors::Many(messages) => messages.join(" "),
        }
    }
}

impl ApiErrorBody {
    fn flatten_errors(&self) -> HashMap<String, String> {
        self.errors
            .iter()
            .map(|(field, errors)| (field.clone(), errors.joined()))
            .filter(|(_, message)| !message.is_empty())
            .collect()
    }
}
