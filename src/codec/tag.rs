//! Tag/wiretype framer. Spec §4.3.

use crate::codec::primitive::{read_fixed32, read_fixed64};
use crate::codec::varint::{read_varint, varint_size, write_varint};
use crate::cursor::Cursor;
use crate::error::{Error, Result};

/// The four wiretypes this protocol uses (spec §4.3 table). Unknown
/// wiretype codes are rejected as malformed — there is no fifth shape to
/// skip generically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireType {
    Varint = 0,
    Fixed64 = 1,
    Counted = 2,
    Fixed32 = 5,
}

impl WireType {
    pub fn from_code(code: u64) -> Result<Self> {
        match code {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::Fixed64),
            2 => Ok(WireType::Counted),
            5 => Ok(WireType::Fixed32),
            other => Err(Error::Malformed(format!("unknown wiretype {}", other))),
        }
    }
}

/// `(field_no << 3) | wiretype`, decomposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    pub field_no: u32,
    pub wire_type: WireType,
}

pub fn write_tag(cursor: &mut Cursor, field_no: u32, wire_type: WireType) -> Result<()> {
    let v = ((field_no as u64) << 3) | (wire_type as u64);
    write_varint(cursor, v)
}

pub fn tag_size(field_no: u32) -> usize {
    varint_size(((field_no as u64) << 3) | 0x7)
}

/// Exact encoded size of a length-prefixed submessage field: tag +
/// size-of-submessage-size-as-varint + the submessage's own size (spec
/// §4.4.4). `submessage_size` must always be computed, never estimated.
pub fn submessage_tag_size(field_no: u32, inner_size: usize) -> usize {
    tag_size(field_no) + varint_size(inner_size as u64) + inner_size
}

/// Read a tag at the current position. Returns `Ok(None)` when the active
/// region is exhausted cleanly (spec: EOF is a normal read-loop
/// termination signal, not an error).
pub fn read_tag(cursor: &mut Cursor) -> Result<Option<Tag>> {
    if cursor.at_eof() {
        return Ok(None);
    }
    let v = read_varint(cursor)?;
    let wire_type = WireType::from_code(v & 0x7)?;
    let field_no = (v >> 3) as u32;
    Ok(Some(Tag { field_no, wire_type }))
}

/// Consume the payload of a field whose number this reader doesn't
/// recognize, without interpreting it. This is the forward-compatibility
/// path (spec §4.3, §4.10, §8.3) and must be exercised whenever a message
/// reader sees an unfamiliar field number. `field_no` is only used for
/// the diagnostic (spec §4.10: unknown fields are "logged at diagnostic
/// level and skipped", never surfaced any other way).
pub fn skip_field(cursor: &mut Cursor, field_no: u32, wire_type: WireType) -> Result<()> {
    #[cfg(feature = "log")]
    log::trace!("skipping unknown field {} (wiretype {:?})", field_no, wire_type);
    #[cfg(not(feature = "log"))]
    let _ = field_no;
    match wire_type {
        WireType::Varint => {
            read_varint(cursor)?;
        }
        WireType::Fixed32 => {
            read_fixed32(cursor)?;
        }
        WireType::Fixed64 => {
            read_fixed64(cursor)?;
        }
        WireType::Counted => {
            let len = read_varint(cursor)? as usize;
            cursor.read_bytes(len)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Mode;

    #[test]
    fn tag_round_trips() {
        let mut buf = [0u8; 8];
        {
            let mut c = Cursor::new(Mode::Write, &mut buf, 8);
            write_tag(&mut c, 99, WireType::Varint).unwrap();
        }
        let mut c = Cursor::new(Mode::Read, &mut buf, tag_size(99));
        let tag = read_tag(&mut c).unwrap().unwrap();
        assert_eq!(tag.field_no, 99);
        assert_eq!(tag.wire_type, WireType::Varint);
    }

    #[test]
    fn eof_on_exhausted_region_is_none_not_error() {
        let mut buf = [0u8; 0];
        let mut c = Cursor::new(Mode::Read, &mut buf, 0);
        assert!(read_tag(&mut c).unwrap().is_none());
    }

    #[test]
    fn skip_field_consumes_unknown_counted_payload() {
        let mut buf = [0u8; 16];
        {
            let mut c = Cursor::new(Mode::Write, &mut buf, 16);
            write_tag(&mut c, 1, WireType::Counted).unwrap();
            write_varint(&mut c, 3).unwrap();
            c.write_bytes(&[9, 9, 9]).unwrap();
            write_tag(&mut c, 2, WireType::Varint).unwrap();
            write_varint(&mut c, 42).unwrap();
        }
        let mut c = Cursor::new(Mode::Read, &mut buf, 16);
        let first = read_tag(&mut c).unwrap().unwrap();
        skip_field(&mut c, first.field_no, first.wire_type).unwrap();
        let second = read_tag(&mut c).unwrap().unwrap();
        assert_eq!(second.field_no, 2);
        assert_eq!(read_varint(&mut c).unwrap(), 42);
    }
}
