//! # Wire Cursors
//!
//! Stateful readers and writers that wrap the [`primitive`] functions behind
//! an interface tracking the current offset internally, so multi-field
//! records can be decoded or encoded without threading a view through every
//! call.
//!
//! [`WireReader`] borrows received bytes shared; [`WireWriter`] borrows a
//! caller-pre-sized buffer uniquely. Every read/write advances the position
//! by exactly the bytes consumed or produced; peek operations never move it.
//! A cursor is plain mutable state owned by one flow of control, with no
//! locking and no internal buffering.
//!
//! Bounds follow the primitive contract: operations past the end of the
//! buffer panic, except varint decoding which returns a typed error.

use crate::config::NULL_ARRAY_LENGTH;
use crate::core::primitive;
use crate::error::Result;
use bytes::{BufMut, Bytes, BytesMut};
use tracing::trace;

/// Read cursor over a borrowed byte buffer.
#[derive(Debug, Clone, Copy)]
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    /// Creates a reader positioned at the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left between the position and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Advances the position without reading.
    ///
    /// Used together with [`slice`](Self::slice) to consume a nested
    /// structure the child reader already decoded.
    pub fn skip(&mut self, count: usize) {
        self.pos += count;
    }

    fn tail(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    fn advance_to(&mut self, rest: &[u8]) {
        self.pos = self.buf.len() - rest.len();
    }

    pub fn read_bool(&mut self) -> bool {
        let (value, rest) = primitive::read_bool(self.tail());
        self.advance_to(rest);
        value
    }

    pub fn read_i8(&mut self) -> i8 {
        let (value, rest) = primitive::read_i8(self.tail());
        self.advance_to(rest);
        value
    }

    pub fn read_i16(&mut self) -> i16 {
        let (value, rest) = primitive::read_i16(self.tail());
        self.advance_to(rest);
        value
    }

    pub fn read_i32(&mut self) -> i32 {
        let (value, rest) = primitive::read_i32(self.tail());
        self.advance_to(rest);
        value
    }

    pub fn read_i64(&mut self) -> i64 {
        let (value, rest) = primitive::read_i64(self.tail());
        self.advance_to(rest);
        value
    }

    pub fn read_varint(&mut self) -> Result<i32> {
        let (value, rest) = primitive::read_varint(self.tail())?;
        self.advance_to(rest);
        Ok(value)
    }

    pub fn read_varint64(&mut self) -> Result<i64> {
        let (value, rest) = primitive::read_varint64(self.tail())?;
        self.advance_to(rest);
        Ok(value)
    }

    /// Reads an int32-length-prefixed byte sequence; the `-1` sentinel
    /// yields `None`. The payload is borrowed from the underlying buffer,
    /// not copied.
    pub fn read_bytes(&mut self) -> Option<&'a [u8]> {
        let (value, rest) = primitive::read_bytes(self.tail());
        self.advance_to(rest);
        value
    }

    /// Varint-length variant of [`read_bytes`](Self::read_bytes).
    pub fn read_varint_bytes(&mut self) -> Result<Option<&'a [u8]>> {
        let (value, rest) = primitive::read_varint_bytes(self.tail())?;
        self.advance_to(rest);
        Ok(value)
    }

    /// Reads an int16-length-prefixed string; the `-1` sentinel yields
    /// `None`.
    pub fn read_string(&mut self) -> Option<String> {
        let (value, rest) = primitive::read_string(self.tail());
        self.advance_to(rest);
        value
    }

    /// Reads the next byte without advancing.
    pub fn peek_i8(&self) -> i8 {
        primitive::read_i8(self.tail()).0
    }

    /// Reads the next int32 without advancing.
    pub fn peek_i32(&self) -> i32 {
        primitive::read_i32(self.tail()).0
    }

    /// Tentative peek of the single byte `ahead` bytes past the position,
    /// or `default` if that offset is out of bounds. Never advances and
    /// never faults; used to probe for optional trailing fields.
    pub fn peek_i8_or(&self, ahead: usize, default: i8) -> i8 {
        self.pos
            .checked_add(ahead)
            .and_then(|offset| self.buf.get(offset))
            .map_or(default, |&byte| byte as i8)
    }

    /// Independent child reader over the next `count` bytes ("limit").
    ///
    /// The child cannot read past its boundary, but this reader is NOT
    /// advanced: the caller advances it with [`skip`](Self::skip) by the
    /// same count once done with the child. Keeping the two in sync is the
    /// caller's responsibility.
    pub fn slice(&self, count: usize) -> WireReader<'a> {
        WireReader::new(&self.buf[self.pos..self.pos + count])
    }

    /// Reads an int32 element count, then exactly that many elements via
    /// `read_element`.
    ///
    /// A negative count (including the `-1` null sentinel) yields an empty
    /// `Vec` here; callers that must distinguish absent from empty peek the
    /// count themselves.
    pub fn read_array<T>(
        &mut self,
        mut read_element: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        let count = usize::try_from(self.read_i32()).unwrap_or(0);
        let mut items = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            items.push(read_element(self)?);
        }
        Ok(items)
    }

    /// Reads elements until `total_size` bytes have been consumed or the
    /// buffer is exhausted, whichever comes first.
    ///
    /// `read_element` may decline to produce a value for an entry it does
    /// not understand by returning `Ok(None)` after consuming the entry's
    /// bytes; the entry is skipped and decoding continues. This is what
    /// makes unknown trailing entries inside a known total length safe to
    /// ignore instead of a hard failure.
    pub fn read_array_bounded<T>(
        &mut self,
        total_size: usize,
        mut read_element: impl FnMut(&mut Self) -> Result<Option<T>>,
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut consumed = 0;
        while consumed < total_size && !self.is_empty() {
            let before = self.pos;
            match read_element(self)? {
                Some(item) => items.push(item),
                None => trace!(offset = before, "element decoder declined, skipping"),
            }
            // an element decoder that consumes nothing would never exhaust
            // the budget
            if self.pos == before {
                break;
            }
            consumed += self.pos - before;
        }
        Ok(items)
    }
}

/// Write cursor over a borrowed, caller-pre-sized byte buffer.
#[derive(Debug)]
pub struct WireWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> WireWriter<'a> {
    /// Creates a writer positioned at the start of `buf`. The caller sizes
    /// `buf` for everything it intends to write, typically via the
    /// primitive `size` functions.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left between the position and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    /// View of the bytes written so far.
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    pub fn write_bool(&mut self, value: bool) {
        let rest_len = primitive::write_bool(value, &mut self.buf[self.pos..]).len();
        self.pos = self.buf.len() - rest_len;
    }

    pub fn write_i8(&mut self, value: i8) {
        let rest_len = primitive::write_i8(value, &mut self.buf[self.pos..]).len();
        self.pos = self.buf.len() - rest_len;
    }

    pub fn write_i16(&mut self, value: i16) {
        let rest_len = primitive::write_i16(value, &mut self.buf[self.pos..]).len();
        self.pos = self.buf.len() - rest_len;
    }

    pub fn write_i32(&mut self, value: i32) {
        let rest_len = primitive::write_i32(value, &mut self.buf[self.pos..]).len();
        self.pos = self.buf.len() - rest_len;
    }

    pub fn write_i64(&mut self, value: i64) {
        let rest_len = primitive::write_i64(value, &mut self.buf[self.pos..]).len();
        self.pos = self.buf.len() - rest_len;
    }

    pub fn write_varint(&mut self, value: i32) {
        let rest_len = primitive::write_varint(value, &mut self.buf[self.pos..]).len();
        self.pos = self.buf.len() - rest_len;
    }

    pub fn write_varint64(&mut self, value: i64) {
        let rest_len = primitive::write_varint64(value, &mut self.buf[self.pos..]).len();
        self.pos = self.buf.len() - rest_len;
    }

    pub fn write_bytes(&mut self, value: Option<&[u8]>) {
        let rest_len = primitive::write_bytes(value, &mut self.buf[self.pos..]).len();
        self.pos = self.buf.len() - rest_len;
    }

    pub fn write_varint_bytes(&mut self, value: Option<&[u8]>) {
        let rest_len = primitive::write_varint_bytes(value, &mut self.buf[self.pos..]).len();
        self.pos = self.buf.len() - rest_len;
    }

    pub fn write_string(&mut self, value: Option<&str>) {
        let rest_len = primitive::write_string(value, &mut self.buf[self.pos..]).len();
        self.pos = self.buf.len() - rest_len;
    }

    /// Writes an int32-count-prefixed array by applying `write_element` to
    /// each item in order; `None` writes the `-1` sentinel.
    pub fn write_array<T>(
        &mut self,
        values: Option<&[T]>,
        mut write_element: impl FnMut(&mut Self, &T),
    ) {
        match values {
            Some(items) => {
                self.write_i32(items.len() as i32);
                for item in items {
                    write_element(self, item);
                }
            }
            None => self.write_i32(NULL_ARRAY_LENGTH),
        }
    }

    /// Encodes into a freshly allocated buffer of `size` bytes and freezes
    /// the written prefix.
    ///
    /// `size` is an upper bound, typically computed with the primitive
    /// `size` functions; the result is truncated to what `build` actually
    /// wrote.
    pub fn encode(size: usize, build: impl FnOnce(&mut WireWriter<'_>)) -> Bytes {
        let mut buf = BytesMut::with_capacity(size);
        buf.put_bytes(0, size);
        let written = {
            let mut writer = WireWriter::new(&mut buf);
            build(&mut writer);
            writer.position()
        };
        buf.truncate(written);
        buf.freeze()
    }
}
