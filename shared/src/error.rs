//! Wire-level error format
//!
//! The remote WildEats services report application errors as a JSON body
//! with a single `message` field. Responses that carry one are surfaced to
//! the user verbatim; responses that don't are treated as the service being
//! unavailable.

use serde::{Deserialize, Serialize};

/// Structured application error body (`{"message": "..."}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
