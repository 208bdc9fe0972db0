//! `Attribute` (spec §3.1). Carries one typed scalar/array value in
//! `data`, or a sequence of strings in `sdata` — the two are mutually
//! exclusive at the semantic level but the decoder preserves whichever
//! (or both) the wire actually carries.

use crate::codec::{
    bytes_field_size, read_bytes_field, read_string_field, read_varint, string_field_size,
    tag_size, varint_size, write_bytes_field, write_string_field, write_tag, write_varint,
    WireType,
};
use crate::cursor::Cursor;
use crate::datatype::DataType;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub data_type: DataType,
    pub len: u32,
    pub data: Option<Vec<u8>>,
    pub sdata: Vec<String>,
}

impl Attribute {
    pub fn encode(&self, cursor: &mut Cursor) -> Result<()> {
        write_tag(cursor, 1, WireType::Counted)?;
        write_string_field(cursor, &self.name)?;

        write_tag(cursor, 2, WireType::Varint)?;
        write_varint(cursor, self.data_type.ordinal() as u64)?;

        write_tag(cursor, 3, WireType::Varint)?;
        write_varint(cursor, self.len as u64)?;

        if let Some(data) = &self.data {
            write_tag(cursor, 4, WireType::Counted)?;
            write_bytes_field(cursor, data)?;
        }
        for s in &self.sdata {
            write_tag(cursor, 5, WireType::Counted)?;
            write_string_field(cursor, s)?;
        }
        Ok(())
    }

    pub fn decode(cursor: &mut Cursor) -> Result<Self> {
        let mut name = None;
        let mut data_type = None;
        let mut len = None;
        let mut data = None;
        let mut sdata = Vec::new();

        while let Some(tag) = crate::codec::read_tag(cursor)? {
            match tag.field_no {
                1 => name = Some(read_string_field(cursor)?),
                2 => data_type = Some(DataType::from_ordinal(read_varint(cursor)? as u32)?),
                3 => len = Some(read_varint(cursor)? as u32),
                4 => data = Some(read_bytes_field(cursor)?),
                5 => sdata.push(read_string_field(cursor)?),
                _ => crate::codec::skip_field(cursor, tag.field_no, tag.wire_type)?,
            }
        }

        Ok(Attribute {
            name: name.ok_or(Error::MissingField("Attribute.name"))?,
            data_type: data_type.ok_or(Error::MissingField("Attribute.type"))?,
            len: len.ok_or(Error::MissingField("Attribute.len"))?,
            data,
            sdata,
        })
    }

    pub fn encoded_size(&self) -> usize {
        let mut n = tag_size(1) + string_field_size(&self.name);
        n += tag_size(2) + varint_size(self.data_type.ordinal() as u64);
        n += tag_size(3) + varint_size(self.len as u64);
        if let Some(data) = &self.data {
            n += tag_size(4) + bytes_field_size(data);
        }
        for s in &self.sdata {
            n += tag_size(5) + string_field_size(s);
        }
        n
    }
}
