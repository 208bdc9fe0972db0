//! `EnumType` and `EnumTypedef` (spec §3.1).

use crate::codec::{
    read_string_field, read_varint, string_field_size, submessage_tag_size, tag_size, varint_size,
    write_string_field, write_tag, write_varint, WireType,
};
use crate::cursor::Cursor;
use crate::error::{Error, Result};

/// A single name/ordinal pair.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    pub code: u32,
    pub value: String,
}

impl EnumType {
    pub fn encode(&self, cursor: &mut Cursor) -> Result<()> {
        write_tag(cursor, 1, WireType::Varint)?;
        write_varint(cursor, self.code as u64)?;
        write_tag(cursor, 2, WireType::Counted)?;
        write_string_field(cursor, &self.value)?;
        Ok(())
    }

    pub fn decode(cursor: &mut Cursor) -> Result<Self> {
        let mut code = None;
        let mut value = None;
        while let Some(tag) = crate::codec::read_tag(cursor)? {
            match tag.field_no {
                1 => code = Some(read_varint(cursor)? as u32),
                2 => value = Some(read_string_field(cursor)?),
                _ => crate::codec::skip_field(cursor, tag.field_no, tag.wire_type)?,
            }
        }
        Ok(EnumType {
            code: code.ok_or(Error::MissingField("EnumType.code"))?,
            value: value.ok_or(Error::MissingField("EnumType.value"))?,
        })
    }

    pub fn encoded_size(&self) -> usize {
        tag_size(1) + varint_size(self.code as u64) + tag_size(2) + string_field_size(&self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumTypedef {
    pub name: String,
    pub map: Vec<EnumType>,
}

impl EnumTypedef {
    pub fn encode(&self, cursor: &mut Cursor) -> Result<()> {
        write_tag(cursor, 1, WireType::Counted)?;
        write_string_field(cursor, &self.name)?;
        for entry in &self.map {
            write_tag(cursor, 2, WireType::Counted)?;
            write_varint(cursor, entry.encoded_size() as u64)?;
            entry.encode(cursor)?;
        }
        Ok(())
    }

    pub fn decode(cursor: &mut Cursor) -> Result<Self> {
        let mut name = None;
        let mut map = Vec::new();
        while let Some(tag) = crate::codec::read_tag(cursor)? {
            match tag.field_no {
                1 => name = Some(read_string_field(cursor)?),
                2 => {
                    let len = read_varint(cursor)? as usize;
                    cursor.mark(len)?;
                    let entry = EnumType::decode(cursor)?;
                    cursor.unmark()?;
                    map.push(entry);
                }
                _ => crate::codec::skip_field(cursor, tag.field_no, tag.wire_type)?,
            }
        }
        Ok(EnumTypedef {
            name: name.ok_or(Error::MissingField("EnumTypedef.name"))?,
            map,
        })
    }

    pub fn encoded_size(&self) -> usize {
        let mut n = tag_size(1) + string_field_size(&self.name);
        for entry in &self.map {
            n += submessage_tag_size(2, entry.encoded_size());
        }
        n
    }
}
