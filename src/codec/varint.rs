//! Varint, zigzag, and signed-integer wrappers. Spec §4.2.

use crate::cursor::Cursor;
use crate::error::{Error, Result};

/// Maximum number of bytes a base-128 varint may occupy before the
/// decoder considers it malformed (spec §4.2, §4.10, §8.1).
const MAX_VARINT_BYTES: usize = 10;

/// Emit `v` as a little-endian base-128 varint: 7-bit groups LSB-first,
/// MSB set on every byte except the last.
pub fn varint_encode(mut v: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(10);
    loop {
        let byte = (v & 0x7f) as u8;
        v >>= 7;
        if v == 0 {
            out.push(byte);
            break;
        }
        out.push(byte | 0x80);
    }
    out
}

/// Exact encoded byte count of `v` without writing it.
pub fn varint_size(v: u64) -> usize {
    let mut v = v;
    let mut n = 1;
    while v >= 0x80 {
        v >>= 7;
        n += 1;
    }
    n
}

/// Decode a varint from `buf`, returning the value and the number of
/// bytes consumed. Fails `Malformed` if the tenth byte still has its
/// continuation bit set.
pub fn varint_decode(buf: &[u8]) -> Result<(u64, usize)> {
    let mut value: u64 = 0;
    for i in 0..MAX_VARINT_BYTES {
        let byte = *buf
            .get(i)
            .ok_or(Error::ShortBuffer)?;
        let has_more = byte & 0x80 != 0;
        value |= ((byte & 0x7f) as u64) << (7 * i);
        if !has_more {
            return Ok((value, i + 1));
        }
    }
    Err(Error::Malformed("varint exceeds 10 bytes".into()))
}

pub fn write_varint(cursor: &mut Cursor, v: u64) -> Result<()> {
    let bytes = varint_encode(v);
    cursor.write_bytes(&bytes)
}

pub fn read_varint(cursor: &mut Cursor) -> Result<u64> {
    // A varint's length isn't known up front; peek at the unread window
    // and advance by exactly the bytes the varint turned out to use.
    let window = cursor.peek(MAX_VARINT_BYTES);
    let (value, consumed) = varint_decode(window)?;
    cursor.read_bytes(consumed)?;
    Ok(value)
}

/// Sign-extend `v` to 64 bits and reuse the unsigned varint encoding
/// (spec §4.2): unlike `zigzag32`, this is protobuf's plain signed
/// `int32` wire form, so a negative value always takes the full 10
/// bytes. No field in this wire format uses it (every signed quantity on
/// the wire is unsigned or zigzag-free, §3.1), but the wrapper is part
/// of the primitive codec's contract.
pub fn int32_encode(v: i32) -> Vec<u8> {
    varint_encode(v as i64 as u64)
}

/// Truncate a decoded varint to its low 32 bits, sign-preserving.
pub fn int32_decode(buf: &[u8]) -> Result<(i32, usize)> {
    let (value, consumed) = varint_decode(buf)?;
    Ok((value as i32, consumed))
}

pub fn int64_encode(v: i64) -> Vec<u8> {
    varint_encode(v as u64)
}

pub fn int64_decode(buf: &[u8]) -> Result<(i64, usize)> {
    let (value, consumed) = varint_decode(buf)?;
    Ok((value as i64, consumed))
}

pub fn write_int32(cursor: &mut Cursor, v: i32) -> Result<()> {
    write_varint(cursor, v as i64 as u64)
}

pub fn read_int32(cursor: &mut Cursor) -> Result<i32> {
    Ok(read_varint(cursor)? as i32)
}

pub fn write_int64(cursor: &mut Cursor, v: i64) -> Result<()> {
    write_varint(cursor, v as u64)
}

pub fn read_int64(cursor: &mut Cursor) -> Result<i64> {
    Ok(read_varint(cursor)? as i64)
}

pub fn zigzag32(v: i32) -> u32 {
    ((v << 1) ^ (v >> 31)) as u32
}

pub fn unzigzag32(u: u32) -> i32 {
    ((u >> 1) as i32) ^ -((u & 1) as i32)
}

pub fn zigzag64(v: i64) -> u64 {
    ((v << 1) ^ (v >> 63)) as u64
}

pub fn unzigzag64(u: u64) -> i64 {
    ((u >> 1) as i64) ^ -((u & 1) as i64)
}
