//! Integration tests for the stateless codec primitives
//!
//! These tests validate the bit-exact wire layout: big-endian fixed-width
//! integers, zig-zag varints, and length-prefixed payloads with the -1 null
//! sentinel.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use wire_protocol::core::primitive::{
    array_size, bytes_size, read_bool, read_bytes, read_i16, read_i32, read_i64, read_i8,
    read_string, read_varint, read_varint64, read_varint_bytes, string_size, varint64_size,
    varint_bytes_size, varint_size, write_array, write_bool, write_bytes, write_i16, write_i32,
    write_i64, write_i8, write_string, write_varint, write_varint64, write_varint_bytes,
};

#[test]
fn test_fixed_width_roundtrip() {
    let mut buf = [0u8; 8];

    for value in [i8::MIN, -1, 0, 1, i8::MAX] {
        write_i8(value, &mut buf);
        assert_eq!(read_i8(&buf).0, value);
    }

    for value in [i16::MIN, -1, 0, 1, 12345, i16::MAX] {
        write_i16(value, &mut buf);
        assert_eq!(read_i16(&buf).0, value);
    }

    for value in [i32::MIN, -1, 0, 1, 0x7FFF_FFFF, 1 << 20] {
        write_i32(value, &mut buf);
        assert_eq!(read_i32(&buf).0, value);
    }

    for value in [i64::MIN, -1, 0, 1, 1 << 40, i64::MAX] {
        write_i64(value, &mut buf);
        assert_eq!(read_i64(&buf).0, value);
    }
}

#[test]
fn test_bool_roundtrip() {
    let mut buf = [0u8; 1];
    write_bool(true, &mut buf);
    assert_eq!(buf[0], 1);
    assert!(read_bool(&buf).0);

    write_bool(false, &mut buf);
    assert_eq!(buf[0], 0);
    assert!(!read_bool(&buf).0);
}

#[test]
fn test_network_byte_order() {
    let mut buf = [0u8; 4];
    write_i32(1, &mut buf);
    // most significant byte first
    assert_eq!(buf, [0, 0, 0, 1]);

    write_i32(-1, &mut buf);
    assert_eq!(buf, [0xFF, 0xFF, 0xFF, 0xFF]);
}

#[test]
fn test_varint_roundtrip_and_size() {
    let mut buf = [0u8; 5];
    let values = [
        0,
        1,
        -1,
        63,
        -64,
        64,
        -65,
        300,
        -300,
        i32::MAX,
        i32::MIN,
    ];

    for value in values {
        let rest_len = write_varint(value, &mut buf).len();
        let produced = buf.len() - rest_len;
        assert_eq!(produced, varint_size(value), "size mismatch for {value}");

        let (decoded, rest) = read_varint(&buf).expect("valid varint");
        assert_eq!(decoded, value);
        assert_eq!(buf.len() - rest.len(), produced, "read consumed a different count");
    }
}

#[test]
fn test_varint64_roundtrip_and_size() {
    let mut buf = [0u8; 10];
    let values = [0i64, 1, -1, 1 << 35, -(1 << 35), i64::MAX, i64::MIN];

    for value in values {
        let rest_len = write_varint64(value, &mut buf).len();
        let produced = buf.len() - rest_len;
        assert_eq!(produced, varint64_size(value));

        let (decoded, _) = read_varint64(&buf).expect("valid varint64");
        assert_eq!(decoded, value);
    }
}

#[test]
fn test_string_roundtrip_ascii() {
    let text = "consumer-group-42";
    let mut buf = vec![0u8; string_size(Some(text))];

    let rest = write_string(Some(text), &mut buf);
    assert!(rest.is_empty());
    assert_eq!(buf.len(), 2 + text.len());

    let (decoded, _) = read_string(&buf);
    assert_eq!(decoded.as_deref(), Some(text));
}

#[test]
fn test_string_null_marker() {
    let mut buf = [0xAAu8; 2];
    write_string(None, &mut buf);
    assert_eq!(buf, (-1i16).to_be_bytes());
    assert_eq!(string_size(None), 2);

    let (decoded, rest) = read_string(&buf);
    assert_eq!(decoded, None);
    assert!(rest.is_empty());
}

#[test]
fn test_bytes_roundtrip() {
    let payload = [0xDE, 0xAD, 0xBE, 0xEF];
    let mut buf = vec![0u8; bytes_size(Some(&payload[..]))];

    let rest = write_bytes(Some(&payload[..]), &mut buf);
    assert!(rest.is_empty());
    assert_eq!(buf.len(), 4 + payload.len());

    let (decoded, _) = read_bytes(&buf);
    assert_eq!(decoded, Some(&payload[..]));
}

#[test]
fn test_bytes_null_marker() {
    let mut buf = [0xAAu8; 4];
    write_bytes(None, &mut buf);
    assert_eq!(buf, (-1i32).to_be_bytes());
    assert_eq!(bytes_size(None), 4);

    let (decoded, _) = read_bytes(&buf);
    assert_eq!(decoded, None);
}

#[test]
fn test_varint_bytes_roundtrip() {
    let payload = vec![7u8; 200];
    let mut buf = vec![0u8; varint_bytes_size(Some(&payload[..]))];

    // length 200 zig-zags to 400, which needs two bytes
    assert_eq!(buf.len(), 2 + payload.len());

    write_varint_bytes(Some(&payload[..]), &mut buf);
    let (decoded, _) = read_varint_bytes(&buf).expect("valid length");
    assert_eq!(decoded.as_deref(), Some(&payload[..]));
}

#[test]
fn test_varint_bytes_null_marker() {
    let mut buf = [0xAAu8; 1];
    write_varint_bytes(None, &mut buf);
    // zigzag(-1) = 1
    assert_eq!(buf, [0x01]);
    assert_eq!(varint_bytes_size(None), 1);

    let (decoded, _) = read_varint_bytes(&buf).expect("valid length");
    assert_eq!(decoded, None);
}

#[test]
fn test_array_roundtrip_int32_elements() {
    let values = [5i32, -10, 0, i32::MAX];
    let mut buf = vec![0u8; array_size(Some(&values[..]), |_| 4)];

    let rest = write_array(Some(&values[..]), &mut buf, |v, out| write_i32(*v, out));
    assert!(rest.is_empty());
    assert_eq!(buf.len(), 4 + 4 * values.len());

    let (count, mut tail) = read_i32(&buf);
    assert_eq!(count, values.len() as i32);
    for expected in values {
        let (decoded, rest) = read_i32(tail);
        assert_eq!(decoded, expected);
        tail = rest;
    }
    assert!(tail.is_empty());
}

#[test]
fn test_array_null_marker() {
    let mut buf = [0xAAu8; 4];
    write_array::<i32>(None, &mut buf, |v, out| write_i32(*v, out));
    assert_eq!(buf, (-1i32).to_be_bytes());
}

#[test]
fn test_array_of_strings() {
    let values = ["alpha".to_string(), "b".to_string(), String::new()];
    let size = array_size(Some(&values[..]), |s| string_size(Some(s.as_str())));
    let mut buf = vec![0u8; size];

    let rest = write_array(Some(&values[..]), &mut buf, |s, out| {
        write_string(Some(s.as_str()), out)
    });
    assert!(rest.is_empty());

    let (count, mut tail) = read_i32(&buf);
    assert_eq!(count, 3);
    for expected in &values {
        let (decoded, rest) = read_string(tail);
        assert_eq!(decoded.as_deref(), Some(expected.as_str()));
        tail = rest;
    }
}
