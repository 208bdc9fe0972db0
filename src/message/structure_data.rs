//! `StructureData` (spec §3.1) — row-oriented payload for an array of
//! compound values.

use crate::codec::{
    bytes_field_size, read_bytes_field, read_string_field, read_varint, string_field_size,
    tag_size, varint_size, write_bytes_field, write_string_field, write_tag, write_varint,
    WireType,
};
use crate::cursor::Cursor;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct StructureData {
    pub member: Vec<u32>,
    pub data: Vec<u8>,
    pub heap_count: Vec<u32>,
    pub sdata: Vec<String>,
    pub nrows: Option<u64>,
}

impl StructureData {
    pub fn encode(&self, cursor: &mut Cursor) -> Result<()> {
        for m in &self.member {
            write_tag(cursor, 1, WireType::Varint)?;
            write_varint(cursor, *m as u64)?;
        }
        write_tag(cursor, 2, WireType::Counted)?;
        write_bytes_field(cursor, &self.data)?;

        for h in &self.heap_count {
            write_tag(cursor, 3, WireType::Varint)?;
            write_varint(cursor, *h as u64)?;
        }
        for s in &self.sdata {
            write_tag(cursor, 4, WireType::Counted)?;
            write_string_field(cursor, s)?;
        }
        if let Some(nrows) = self.nrows {
            write_tag(cursor, 5, WireType::Varint)?;
            write_varint(cursor, nrows)?;
        }
        Ok(())
    }

    pub fn decode(cursor: &mut Cursor) -> Result<Self> {
        let mut member = Vec::new();
        let mut data = None;
        let mut heap_count = Vec::new();
        let mut sdata = Vec::new();
        let mut nrows = None;

        while let Some(tag) = crate::codec::read_tag(cursor)? {
            match tag.field_no {
                1 => member.push(read_varint(cursor)? as u32),
                2 => data = Some(read_bytes_field(cursor)?),
                3 => heap_count.push(read_varint(cursor)? as u32),
                4 => sdata.push(read_string_field(cursor)?),
                5 => nrows = Some(read_varint(cursor)?),
                _ => crate::codec::skip_field(cursor, tag.field_no, tag.wire_type)?,
            }
        }

        nrows.get_or_insert(1);

        Ok(StructureData {
            member,
            data: data.ok_or(Error::MissingField("StructureData.data"))?,
            heap_count,
            sdata,
            nrows,
        })
    }

    pub fn encoded_size(&self) -> usize {
        let mut n = 0;
        for m in &self.member {
            n += tag_size(1) + varint_size(*m as u64);
        }
        n += tag_size(2) + bytes_field_size(&self.data);
        for h in &self.heap_count {
            n += tag_size(3) + varint_size(*h as u64);
        }
        for s in &self.sdata {
            n += tag_size(4) + string_field_size(s);
        }
        if let Some(nrows) = self.nrows {
            n += tag_size(5) + varint_size(nrows);
        }
        n
    }
}
