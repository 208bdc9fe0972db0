//! `Data` (spec §3.1) — the header describing one `DATA`-framed array
//! chunk (spec §4.5). The actual array bytes ride alongside this message
//! in the packet, not inside it.

use crate::codec::{
    read_fixed32, read_string_field, read_varint, string_field_size, submessage_tag_size,
    tag_size, varint_size, write_fixed32, write_string_field, write_tag, write_varint, WireType,
};
use crate::cursor::Cursor;
use crate::datatype::{Compress, DataType};
use crate::error::{Error, Result};
use crate::message::range::Section;

#[derive(Debug, Clone, PartialEq)]
pub struct Data {
    pub var_name: String,
    pub data_type: DataType,
    pub section: Option<Section>,
    pub bigend: Option<bool>,
    pub version: Option<u32>,
    pub compress: Option<Compress>,
    /// Opaque on purpose: never computed or verified (SPEC_FULL.md §B.3).
    pub crc32: Option<u32>,
}

impl Data {
    pub fn encode(&self, cursor: &mut Cursor) -> Result<()> {
        write_tag(cursor, 1, WireType::Counted)?;
        write_string_field(cursor, &self.var_name)?;

        write_tag(cursor, 2, WireType::Varint)?;
        write_varint(cursor, self.data_type.ordinal() as u64)?;

        if let Some(section) = &self.section {
            write_tag(cursor, 3, WireType::Counted)?;
            write_varint(cursor, section.encoded_size() as u64)?;
            section.encode(cursor)?;
        }
        if let Some(bigend) = self.bigend {
            write_tag(cursor, 4, WireType::Varint)?;
            write_varint(cursor, bigend as u64)?;
        }
        if let Some(version) = self.version {
            write_tag(cursor, 5, WireType::Varint)?;
            write_varint(cursor, version as u64)?;
        }
        if let Some(compress) = self.compress {
            write_tag(cursor, 6, WireType::Varint)?;
            write_varint(cursor, compress.ordinal() as u64)?;
        }
        if let Some(crc32) = self.crc32 {
            write_tag(cursor, 7, WireType::Fixed32)?;
            write_fixed32(cursor, crc32)?;
        }
        Ok(())
    }

    pub fn decode(cursor: &mut Cursor) -> Result<Self> {
        let mut var_name = None;
        let mut data_type = None;
        let mut section = None;
        let mut bigend = None;
        let mut version = None;
        let mut compress = None;
        let mut crc32 = None;

        while let Some(tag) = crate::codec::read_tag(cursor)? {
            match tag.field_no {
                1 => var_name = Some(read_string_field(cursor)?),
                2 => data_type = Some(DataType::from_ordinal(read_varint(cursor)? as u32)?),
                3 => {
                    let len = read_varint(cursor)? as usize;
                    cursor.mark(len)?;
                    let s = Section::decode(cursor)?;
                    cursor.unmark()?;
                    section = Some(s);
                }
                4 => bigend = Some(read_varint(cursor)? != 0),
                5 => version = Some(read_varint(cursor)? as u32),
                6 => compress = Some(Compress::from_ordinal(read_varint(cursor)? as u32)?),
                7 => crc32 = Some(read_fixed32(cursor)?),
                _ => crate::codec::skip_field(cursor, tag.field_no, tag.wire_type)?,
            }
        }

        // Default fill-in (spec §4.4.2 step 3, §8.4).
        bigend.get_or_insert(true);
        version.get_or_insert(0);
        crc32.get_or_insert(0);

        Ok(Data {
            var_name: var_name.ok_or(Error::MissingField("Data.varName"))?,
            data_type: data_type.ok_or(Error::MissingField("Data.dataType"))?,
            section,
            bigend,
            version,
            compress,
            crc32,
        })
    }

    pub fn encoded_size(&self) -> usize {
        let mut n = tag_size(1) + string_field_size(&self.var_name);
        n += tag_size(2) + varint_size(self.data_type.ordinal() as u64);
        if let Some(section) = &self.section {
            n += submessage_tag_size(3, section.encoded_size());
        }
        if self.bigend.is_some() {
            n += tag_size(4) + varint_size(1);
        }
        if let Some(version) = self.version {
            n += tag_size(5) + varint_size(version as u64);
        }
        if let Some(compress) = self.compress {
            n += tag_size(6) + varint_size(compress.ordinal() as u64);
        }
        if self.crc32.is_some() {
            n += tag_size(7) + 4;
        }
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Mode;
    use crate::message::range::Range;

    #[test]
    fn default_fill_in_on_minimal_data() {
        let mut buf = [0u8; 32];
        let len;
        {
            let mut c = Cursor::new(Mode::Write, &mut buf, 32);
            write_tag(&mut c, 1, WireType::Counted).unwrap();
            write_string_field(&mut c, "temp").unwrap();
            write_tag(&mut c, 2, WireType::Varint).unwrap();
            write_varint(&mut c, DataType::Float.ordinal() as u64).unwrap();
            len = c.pos();
        }
        let mut c = Cursor::new(Mode::Read, &mut buf, len);
        let d = Data::decode(&mut c).unwrap();
        assert_eq!(d.bigend, Some(true));
        assert_eq!(d.version, Some(0));
        assert_eq!(d.crc32, Some(0));
    }

    #[test]
    fn round_trips_with_section_and_compress() {
        let d = Data {
            var_name: "temp".into(),
            data_type: DataType::Float,
            section: Some(Section { range: vec![Range { start: Some(0), size: 10, stride: Some(1) }] }),
            bigend: Some(false),
            version: Some(1),
            compress: Some(Compress::Deflate),
            crc32: Some(0xdead_beef),
        };
        let size = d.encoded_size();
        let mut buf = vec![0u8; size];
        {
            let mut c = Cursor::new(Mode::Write, &mut buf, size);
            d.encode(&mut c).unwrap();
            assert_eq!(c.pos(), size);
        }
        let mut c = Cursor::new(Mode::Read, &mut buf, size);
        assert_eq!(Data::decode(&mut c).unwrap(), d);
    }
}
