//! # Wire Constants
//!
//! Fixed parameters of the wire format.
//!
//! These values are part of the on-wire contract and must not change without
//! breaking interoperability with every existing peer of this format.

/// Length sentinel marking a null byte sequence (4-byte prefix)
pub const NULL_BYTES_LENGTH: i32 = -1;

/// Length sentinel marking a null string (2-byte prefix)
pub const NULL_STRING_LENGTH: i16 = -1;

/// Element-count sentinel marking a null array (4-byte prefix)
pub const NULL_ARRAY_LENGTH: i32 = -1;

/// Maximum encoded size of a 32-bit varint (5 × 7 bits covers 32 bits)
pub const MAX_VARINT32_BYTES: usize = 5;

/// Maximum encoded size of a 64-bit varint (10 × 7 bits covers 64 bits)
pub const MAX_VARINT64_BYTES: usize = 10;

/// Maximum string payload length representable in the 2-byte length prefix
pub const MAX_STRING_LENGTH: usize = i16::MAX as usize;
