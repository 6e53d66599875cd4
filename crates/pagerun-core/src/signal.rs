//! Exit-signal decoding
//!
//! The loaded page reports completion by invoking the host-exposed callback
//! with a loosely-typed record. Two field spellings exist in the wild —
//! `{"exit": N}` and `{"exitCode": N}` — and both must be accepted. Decoding
//! normalizes them into one canonical [`ExitSignal`]; anything else is a
//! typed [`SignalDecodeError`] rather than a silent no-op.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical exit signal reported by the loaded page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitSignal {
    /// Process exit code requested by the page
    pub code: i32,
}

/// Reasons an exit-signal payload failed to decode
#[derive(Error, Debug)]
pub enum SignalDecodeError {
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("payload is not an object: {0}")]
    NotAnObject(String),

    #[error("payload carries no `exit` or `exitCode` field: {0}")]
    MissingCode(String),

    #[error("exit code is not an integer: {0}")]
    NotAnInteger(String),

    #[error("exit code {0} does not fit a process exit status")]
    OutOfRange(i64),
}

impl ExitSignal {
    /// Decode a raw callback payload into a canonical exit signal
    ///
    /// Accepts both legacy field spellings; `exit` wins if both are present.
    pub fn decode(payload: &str) -> Result<Self, SignalDecodeError> {
        let value: serde_json::Value = serde_json::from_str(payload)?;

        let record = value
            .as_object()
            .ok_or_else(|| SignalDecodeError::NotAnObject(payload.to_string()))?;

        let raw = record
            .get("exit")
            .or_else(|| record.get("exitCode"))
            .ok_or_else(|| SignalDecodeError::MissingCode(payload.to_string()))?;

        let code = raw
            .as_i64()
            .ok_or_else(|| SignalDecodeError::NotAnInteger(raw.to_string()))?;

        let code = i32::try_from(code).map_err(|_| SignalDecodeError::OutOfRange(code))?;

        Ok(Self { code })
    }
}
