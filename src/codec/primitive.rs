//! Fixed-width integers and length-prefixed bytes/strings. Spec §4.2.

use crate::codec::varint::{read_varint, varint_size, write_varint};
use crate::cursor::Cursor;
use crate::error::{Error, Result};

/// Little-endian regardless of host endianness (spec §8.2).
pub fn fixed32_encode(v: u32) -> [u8; 4] {
    v.to_le_bytes()
}

pub fn fixed32_decode(buf: &[u8]) -> u32 {
    u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]])
}

pub fn fixed64_encode(v: u64) -> [u8; 8] {
    v.to_le_bytes()
}

pub fn fixed64_decode(buf: &[u8]) -> u64 {
    let mut b = [0u8; 8];
    b.copy_from_slice(&buf[..8]);
    u64::from_le_bytes(b)
}

pub fn write_fixed32(cursor: &mut Cursor, v: u32) -> Result<()> {
    cursor.write_bytes(&fixed32_encode(v))
}

pub fn read_fixed32(cursor: &mut Cursor) -> Result<u32> {
    let bytes = cursor.read_bytes(4)?;
    Ok(fixed32_decode(bytes))
}

pub fn write_fixed64(cursor: &mut Cursor, v: u64) -> Result<()> {
    cursor.write_bytes(&fixed64_encode(v))
}

pub fn read_fixed64(cursor: &mut Cursor) -> Result<u64> {
    let bytes = cursor.read_bytes(8)?;
    Ok(fixed64_decode(bytes))
}

/// A `bytes` field: a varint length followed by that many raw bytes.
pub fn write_bytes_field(cursor: &mut Cursor, data: &[u8]) -> Result<()> {
    write_varint(cursor, data.len() as u64)?;
    cursor.write_bytes(data)
}

pub fn read_bytes_field(cursor: &mut Cursor) -> Result<Vec<u8>> {
    let len = read_varint(cursor)? as usize;
    Ok(cursor.read_bytes(len)?.to_vec())
}

/// Exact encoded size of a `bytes` field: varint length prefix + payload.
pub fn bytes_field_size(data: &[u8]) -> usize {
    varint_size(data.len() as u64) + data.len()
}

/// A `string` field is UTF-8 bytes under the same length-prefixed
/// encoding as `bytes`; the wire form never carries a trailing NUL.
pub fn write_string_field(cursor: &mut Cursor, s: &str) -> Result<()> {
    write_bytes_field(cursor, s.as_bytes())
}

pub fn read_string_field(cursor: &mut Cursor) -> Result<String> {
    let raw = read_bytes_field(cursor)?;
    String::from_utf8(raw).map_err(|e| Error::Utf8(e.to_string()))
}

pub fn string_field_size(s: &str) -> usize {
    bytes_field_size(s.as_bytes())
}
