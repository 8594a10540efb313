//! # Error Types
//!
//! Error handling for the wire codec.
//!
//! The codec validates exactly one malformed-input condition: a varint whose
//! continuation chain exceeds its bit-width limit. Everything else
//! (insufficient buffer length, negative non-sentinel length prefixes,
//! oversized strings) is an unchecked precondition on the caller, who owns
//! message framing and buffer sizing. See the module docs on
//! [`crate::core::primitive`] for the full contract.
//!
//! Errors derive `Serialize`/`Deserialize` so a client embedding the codec
//! can relay decode failures inside its own error payloads.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// CodecError is the error type for all codec operations
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CodecError {
    #[error("malformed varint: no terminator within {max_bytes} bytes ({bits}-bit limit)")]
    MalformedVarint { bits: u8, max_bytes: usize },
}

/// Type alias for Results using CodecError
pub type Result<T> = std::result::Result<T, CodecError>;
