//! `Range` and `Section` (spec §3.1) — the subset coordinates carried
//! alongside a `Data` chunk.

use crate::codec::{
    read_varint, submessage_tag_size, tag_size, varint_size, write_tag, write_varint, WireType,
};
use crate::cursor::Cursor;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    pub start: Option<u64>,
    pub size: u64,
    pub stride: Option<u64>,
}

impl Range {
    pub fn encode(&self, cursor: &mut Cursor) -> Result<()> {
        if let Some(start) = self.start {
            write_tag(cursor, 1, WireType::Varint)?;
            write_varint(cursor, start)?;
        }
        write_tag(cursor, 2, WireType::Varint)?;
        write_varint(cursor, self.size)?;
        if let Some(stride) = self.stride {
            write_tag(cursor, 3, WireType::Varint)?;
            write_varint(cursor, stride)?;
        }
        Ok(())
    }

    pub fn decode(cursor: &mut Cursor) -> Result<Self> {
        let mut start = None;
        let mut size = None;
        let mut stride = None;
        while let Some(tag) = crate::codec::read_tag(cursor)? {
            match tag.field_no {
                1 => start = Some(read_varint(cursor)?),
                2 => size = Some(read_varint(cursor)?),
                3 => stride = Some(read_varint(cursor)?),
                _ => crate::codec::skip_field(cursor, tag.field_no, tag.wire_type)?,
            }
        }
        start.get_or_insert(0);
        stride.get_or_insert(1);
        Ok(Range {
            start,
            size: size.ok_or(Error::MissingField("Range.size"))?,
            stride,
        })
    }

    pub fn encoded_size(&self) -> usize {
        let mut n = tag_size(2) + varint_size(self.size);
        if let Some(start) = self.start {
            n += tag_size(1) + varint_size(start);
        }
        if let Some(stride) = self.stride {
            n += tag_size(3) + varint_size(stride);
        }
        n
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Section {
    pub range: Vec<Range>,
}

impl Section {
    pub fn encode(&self, cursor: &mut Cursor) -> Result<()> {
        for r in &self.range {
            write_tag(cursor, 1, WireType::Counted)?;
            write_varint(cursor, r.encoded_size() as u64)?;
            r.encode(cursor)?;
        }
        Ok(())
    }

    pub fn decode(cursor: &mut Cursor) -> Result<Self> {
        let mut range = Vec::new();
        while let Some(tag) = crate::codec::read_tag(cursor)? {
            match tag.field_no {
                1 => {
                    let len = read_varint(cursor)? as usize;
                    cursor.mark(len)?;
                    range.push(Range::decode(cursor)?);
                    cursor.unmark()?;
                }
                _ => crate::codec::skip_field(cursor, tag.field_no, tag.wire_type)?,
            }
        }
        Ok(Section { range })
    }

    pub fn encoded_size(&self) -> usize {
        self.range.iter().map(|r| submessage_tag_size(1, r.encoded_size())).sum()
    }
}
