//! JSON response envelopes
//!
//! Every API response is wrapped as `{"value": ..., "error": ...}` or
//! `{"values": [...], "error": ...}`.

use crate::types::null_as_default;
use crate::{GatewayError, Result};
use serde::Deserialize;

/// Single-value envelope
#[derive(Debug, Deserialize)]
pub struct ValueEnvelope<T> {
    pub value: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

/// List envelope
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ValuesEnvelope<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub values: Vec<T>,
    #[serde(default)]
    pub error: Option<String>,
}

fn check_error(error: Option<String>) -> Result<()> {
    match error {
        Some(msg) if !msg.is_empty() => Err(GatewayError::Server(msg)),
        _ => Ok(()),
    }
}

impl<T> ValueEnvelope<T> {
    /// A null `value` without an error is a success with nothing to report
    pub fn into_result(self) -> Result<Option<T>> {
        check_error(self.error)?;
        Ok(self.value)
    }
}

impl<T> ValuesEnvelope<T> {
    pub fn into_result(self) -> Result<Vec<T>> {
        check_error(self.error)?;
        Ok(self.values)
    }
}
