//! # Codec Primitives
//!
//! Stateless encode/decode functions operating on borrowed byte slices.
//!
//! Each value type provides up to three operations:
//! - `size(v)`: exact encoded byte count, computed without emitting bytes
//! - `write(v, out)`: encodes `v` at the start of `out` and returns the
//!   slice past the written bytes
//! - `read(buf)`: the inverse, returning the value and the remainder
//!
//! Reads never mutate their input, so a "peek" is simply a read whose
//! returned remainder is discarded. Callers compose multi-field records by
//! threading the returned slice through a sequence of writes or reads, left
//! to right; [`write2`] and [`write_array`] do that threading for common
//! shapes.
//!
//! ## Wire Format
//! ```text
//! bool            1 byte, 0 or 1
//! int8..int64     big-endian two's complement
//! varint32/64     zig-zag, 7-bit groups, LSB group first, continuation bit
//! bytes           int32 length (-1 = null) + raw bytes
//! string          int16 length (-1 = null) + UTF-8 bytes
//! array<T>        int32 count  (-1 = null) + count encoded elements
//! ```
//!
//! ## Bounds
//! Every operation assumes the caller validated that the slice is large
//! enough; a short slice panics at the index. This keeps the hot path free
//! of bounds-check branching and pushes framing correctness to the caller,
//! who owns the buffers. The single validated failure is a varint whose
//! continuation chain exceeds its bit-width limit, surfaced as
//! [`CodecError::MalformedVarint`].

use crate::config::{
    MAX_VARINT32_BYTES, MAX_VARINT64_BYTES, NULL_ARRAY_LENGTH, NULL_BYTES_LENGTH,
    NULL_STRING_LENGTH,
};
use crate::error::{CodecError, Result};
use tracing::trace;

/// Encoded size of a bool
pub const SIZE_OF_BOOL: usize = 1;

/// Encoded size of an int8
pub const SIZE_OF_I8: usize = 1;

/// Encoded size of an int16
pub const SIZE_OF_I16: usize = 2;

/// Encoded size of an int32
pub const SIZE_OF_I32: usize = 4;

/// Encoded size of an int64
pub const SIZE_OF_I64: usize = 8;

// ---------------------------------------------------------------------------
// Fixed-width integers
// ---------------------------------------------------------------------------

/// Splits off the first `N` bytes as an array, returning it with the rest.
fn split_fixed<const N: usize>(buf: &[u8]) -> ([u8; N], &[u8]) {
    let (head, rest) = buf.split_at(N);
    let mut raw = [0u8; N];
    raw.copy_from_slice(head);
    (raw, rest)
}

pub fn write_bool(value: bool, out: &mut [u8]) -> &mut [u8] {
    write_i8(i8::from(value), out)
}

pub fn read_bool(buf: &[u8]) -> (bool, &[u8]) {
    let (raw, rest) = read_i8(buf);
    (raw != 0, rest)
}

pub fn write_i8(value: i8, out: &mut [u8]) -> &mut [u8] {
    let (head, rest) = out.split_at_mut(SIZE_OF_I8);
    head[0] = value as u8;
    rest
}

pub fn read_i8(buf: &[u8]) -> (i8, &[u8]) {
    let (raw, rest) = split_fixed(buf);
    (i8::from_be_bytes(raw), rest)
}

pub fn write_i16(value: i16, out: &mut [u8]) -> &mut [u8] {
    let (head, rest) = out.split_at_mut(SIZE_OF_I16);
    head.copy_from_slice(&value.to_be_bytes());
    rest
}

pub fn read_i16(buf: &[u8]) -> (i16, &[u8]) {
    let (raw, rest) = split_fixed(buf);
    (i16::from_be_bytes(raw), rest)
}

pub fn write_i32(value: i32, out: &mut [u8]) -> &mut [u8] {
    let (head, rest) = out.split_at_mut(SIZE_OF_I32);
    head.copy_from_slice(&value.to_be_bytes());
    rest
}

pub fn read_i32(buf: &[u8]) -> (i32, &[u8]) {
    let (raw, rest) = split_fixed(buf);
    (i32::from_be_bytes(raw), rest)
}

/// No range checking: a value derived from a wider type is assumed to
/// already fit, truncation is the caller's call.
pub fn write_i64(value: i64, out: &mut [u8]) -> &mut [u8] {
    let (head, rest) = out.split_at_mut(SIZE_OF_I64);
    head.copy_from_slice(&value.to_be_bytes());
    rest
}

pub fn read_i64(buf: &[u8]) -> (i64, &[u8]) {
    let (raw, rest) = split_fixed(buf);
    (i64::from_be_bytes(raw), rest)
}

// ---------------------------------------------------------------------------
// Variable-length integers
// ---------------------------------------------------------------------------

fn zigzag32(value: i32) -> u32 {
    ((value << 1) ^ (value >> 31)) as u32
}

fn zigzag64(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Exact encoded size of a zig-zag 32-bit varint.
pub fn varint_size(value: i32) -> usize {
    let mut zigzag = zigzag32(value);
    let mut size = 1;
    while zigzag >= 0x80 {
        zigzag >>= 7;
        size += 1;
    }
    size
}

/// Exact encoded size of a zig-zag 64-bit varint.
pub fn varint64_size(value: i64) -> usize {
    let mut zigzag = zigzag64(value);
    let mut size = 1;
    while zigzag >= 0x80 {
        zigzag >>= 7;
        size += 1;
    }
    size
}

fn write_varint_groups(mut zigzag: u64, out: &mut [u8]) -> &mut [u8] {
    let mut used = 0;
    while zigzag >= 0x80 {
        out[used] = (zigzag as u8 & 0x7F) | 0x80;
        zigzag >>= 7;
        used += 1;
    }
    out[used] = zigzag as u8;
    let (_, rest) = out.split_at_mut(used + 1);
    rest
}

pub fn write_varint(value: i32, out: &mut [u8]) -> &mut [u8] {
    write_varint_groups(u64::from(zigzag32(value)), out)
}

pub fn write_varint64(value: i64, out: &mut [u8]) -> &mut [u8] {
    write_varint_groups(zigzag64(value), out)
}

/// Decodes a zig-zag 32-bit varint.
///
/// Fails once the shift passes 28 bits without a terminator, so malformed or
/// runaway input cannot consume more than [`MAX_VARINT32_BYTES`] bytes.
pub fn read_varint(buf: &[u8]) -> Result<(i32, &[u8])> {
    let mut zigzag: u32 = 0;
    let mut shift = 0;
    let mut used = 0;
    loop {
        let byte = buf[used];
        used += 1;
        zigzag |= u32::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            break;
        }
        shift += 7;
        if shift > 28 {
            trace!(shift, "varint continuation past 32-bit limit");
            return Err(CodecError::MalformedVarint {
                bits: 32,
                max_bytes: MAX_VARINT32_BYTES,
            });
        }
    }
    let value = (zigzag >> 1) as i32 ^ -((zigzag & 1) as i32);
    Ok((value, &buf[used..]))
}

/// Decodes a zig-zag 64-bit varint. Shift limit 63 rather than 28.
pub fn read_varint64(buf: &[u8]) -> Result<(i64, &[u8])> {
    let mut zigzag: u64 = 0;
    let mut shift = 0;
    let mut used = 0;
    loop {
        let byte = buf[used];
        used += 1;
        zigzag |= u64::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            break;
        }
        shift += 7;
        if shift > 63 {
            trace!(shift, "varint continuation past 64-bit limit");
            return Err(CodecError::MalformedVarint {
                bits: 64,
                max_bytes: MAX_VARINT64_BYTES,
            });
        }
    }
    let value = (zigzag >> 1) as i64 ^ -((zigzag & 1) as i64);
    Ok((value, &buf[used..]))
}

// ---------------------------------------------------------------------------
// Length-prefixed sequences
// ---------------------------------------------------------------------------

pub fn bytes_size(value: Option<&[u8]>) -> usize {
    SIZE_OF_I32 + value.map_or(0, <[u8]>::len)
}

/// Writes an int32-length-prefixed byte sequence; `None` writes the `-1`
/// sentinel and no payload.
pub fn write_bytes<'a>(value: Option<&[u8]>, out: &'a mut [u8]) -> &'a mut [u8] {
    match value {
        Some(payload) => {
            let out = write_i32(payload.len() as i32, out);
            let (head, rest) = out.split_at_mut(payload.len());
            head.copy_from_slice(payload);
            rest
        }
        None => write_i32(NULL_BYTES_LENGTH, out),
    }
}

pub fn read_bytes(buf: &[u8]) -> (Option<&[u8]>, &[u8]) {
    let (length, rest) = read_i32(buf);
    if length < 0 {
        return (None, rest);
    }
    let (payload, rest) = rest.split_at(length as usize);
    (Some(payload), rest)
}

pub fn varint_bytes_size(value: Option<&[u8]>) -> usize {
    match value {
        Some(payload) => varint_size(payload.len() as i32) + payload.len(),
        None => varint_size(NULL_BYTES_LENGTH),
    }
}

/// Varint-length variant of [`write_bytes`].
pub fn write_varint_bytes<'a>(value: Option<&[u8]>, out: &'a mut [u8]) -> &'a mut [u8] {
    match value {
        Some(payload) => {
            let out = write_varint(payload.len() as i32, out);
            let (head, rest) = out.split_at_mut(payload.len());
            head.copy_from_slice(payload);
            rest
        }
        None => write_varint(NULL_BYTES_LENGTH, out),
    }
}

pub fn read_varint_bytes(buf: &[u8]) -> Result<(Option<&[u8]>, &[u8])> {
    let (length, rest) = read_varint(buf)?;
    if length < 0 {
        return Ok((None, rest));
    }
    let (payload, rest) = rest.split_at(length as usize);
    Ok((Some(payload), rest))
}

/// Encoded size of an int16-length-prefixed string: `2 + UTF-8 byte count`.
pub fn string_size(value: Option<&str>) -> usize {
    SIZE_OF_I16 + value.map_or(0, str::len)
}

/// Writes an int16-length-prefixed string; `None` writes the `-1` sentinel.
///
/// The prefix carries the UTF-8 byte count. Peers of this format assume one
/// byte per character, so content is expected to be ASCII and at most
/// [`crate::config::MAX_STRING_LENGTH`] bytes; neither is checked here.
pub fn write_string<'a>(value: Option<&str>, out: &'a mut [u8]) -> &'a mut [u8] {
    match value {
        Some(text) => {
            let out = write_i16(text.len() as i16, out);
            let (head, rest) = out.split_at_mut(text.len());
            head.copy_from_slice(text.as_bytes());
            rest
        }
        None => write_i16(NULL_STRING_LENGTH, out),
    }
}

/// Invalid UTF-8 decodes lossily rather than failing, matching the decoder
/// behavior of existing peers.
pub fn read_string(buf: &[u8]) -> (Option<String>, &[u8]) {
    let (length, rest) = read_i16(buf);
    if length < 0 {
        return (None, rest);
    }
    let (payload, rest) = rest.split_at(length as usize);
    (Some(String::from_utf8_lossy(payload).into_owned()), rest)
}

// ---------------------------------------------------------------------------
// Composite writers
// ---------------------------------------------------------------------------

/// Applies two writers in order, threading the advancing view between them.
pub fn write2<'a>(
    out: &'a mut [u8],
    first: impl for<'b> FnOnce(&'b mut [u8]) -> &'b mut [u8],
    second: impl for<'b> FnOnce(&'b mut [u8]) -> &'b mut [u8],
) -> &'a mut [u8] {
    second(first(out))
}

pub fn array_size<T>(values: Option<&[T]>, mut element_size: impl FnMut(&T) -> usize) -> usize {
    match values {
        Some(items) => SIZE_OF_I32 + items.iter().map(|item| element_size(item)).sum::<usize>(),
        None => SIZE_OF_I32,
    }
}

/// Writes an int32-count-prefixed array by applying `write_element` to each
/// item in order; `None` writes the `-1` sentinel and no elements.
pub fn write_array<'a, T>(
    values: Option<&[T]>,
    out: &'a mut [u8],
    mut write_element: impl for<'b> FnMut(&T, &'b mut [u8]) -> &'b mut [u8],
) -> &'a mut [u8] {
    match values {
        Some(items) => {
            let mut out = write_i32(items.len() as i32, out);
            for item in items {
                out = write_element(item, out);
            }
            out
        }
        None => write_i32(NULL_ARRAY_LENGTH, out),
    }
}
