//! # Wire Protocol
//!
//! High-performance binary wire-format codec core for network clients and
//! services.
//!
//! This crate converts between typed values and byte sequences at known
//! offsets, using the on-wire layout shared by every peer of the format:
//! big-endian fixed-width integers, zig-zag varints, and length-prefixed
//! strings, byte arrays, and arrays with a `-1` null sentinel. It does not
//! interpret message semantics, own buffers, or touch the network; the
//! layer above supplies the bytes and drives the codec.
//!
//! ## Layers
//! - [`core::primitive`]: stateless size/write/read functions over
//!   borrowed slices
//! - [`core::cursor`]: [`WireReader`] / [`WireWriter`] cursors with
//!   implicit offset tracking, bounded sub-views, and generic array decoding
//!
//! ## Example
//! ```rust
//! use wire_protocol::{WireReader, WireWriter};
//!
//! let mut buf = [0u8; 32];
//! let mut writer = WireWriter::new(&mut buf);
//! writer.write_i16(9);
//! writer.write_string(Some("topic"));
//! writer.write_varint(-42);
//! let written = writer.position();
//!
//! let mut reader = WireReader::new(&buf[..written]);
//! assert_eq!(reader.read_i16(), 9);
//! assert_eq!(reader.read_string().as_deref(), Some("topic"));
//! assert_eq!(reader.read_varint(), Ok(-42));
//! ```
//!
//! ## Error Model
//! Varint decoding is the only validated failure and returns a typed
//! [`CodecError`]; all other malformed input (short buffers, negative
//! non-sentinel lengths) is an unchecked caller precondition and panics at
//! the slice boundary. See [`error`] for the rationale.

pub mod config;
pub mod core;
pub mod error;
pub mod utils;

pub use crate::core::cursor::{WireReader, WireWriter};
pub use crate::error::{CodecError, Result};
