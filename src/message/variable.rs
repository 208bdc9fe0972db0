//! `Variable` (spec §3.1).

use crate::codec::{
    bytes_field_size, read_bytes_field, read_string_field, read_varint, string_field_size,
    submessage_tag_size, tag_size, varint_size, write_bytes_field, write_string_field, write_tag,
    write_varint, WireType,
};
use crate::cursor::Cursor;
use crate::datatype::DataType;
use crate::error::{Error, Result};
use crate::message::attribute::Attribute;
use crate::message::dimension::{Dimension, ShapeEntry};

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub data_type: DataType,
    pub shape: Vec<ShapeEntry>,
    pub atts: Vec<Attribute>,
    pub unsigned_: Option<bool>,
    pub data: Option<Vec<u8>>,
    pub enum_type: Option<String>,
    pub dim_index: Vec<u32>,
}

impl Variable {
    pub fn encode(&self, cursor: &mut Cursor) -> Result<()> {
        write_tag(cursor, 1, WireType::Counted)?;
        write_string_field(cursor, &self.name)?;

        write_tag(cursor, 2, WireType::Varint)?;
        write_varint(cursor, self.data_type.ordinal() as u64)?;

        for entry in &self.shape {
            write_tag(cursor, 3, WireType::Counted)?;
            write_varint(cursor, entry.encoded_size() as u64)?;
            entry.encode(cursor)?;
        }
        for att in &self.atts {
            write_tag(cursor, 4, WireType::Counted)?;
            write_varint(cursor, att.encoded_size() as u64)?;
            att.encode(cursor)?;
        }
        if let Some(v) = self.unsigned_ {
            write_tag(cursor, 5, WireType::Varint)?;
            write_varint(cursor, v as u64)?;
        }
        if let Some(data) = &self.data {
            write_tag(cursor, 6, WireType::Counted)?;
            write_bytes_field(cursor, data)?;
        }
        if let Some(enum_type) = &self.enum_type {
            write_tag(cursor, 7, WireType::Counted)?;
            write_string_field(cursor, enum_type)?;
        }
        for idx in &self.dim_index {
            write_tag(cursor, 8, WireType::Varint)?;
            write_varint(cursor, *idx as u64)?;
        }
        Ok(())
    }

    pub fn decode(cursor: &mut Cursor) -> Result<Self> {
        let mut name = None;
        let mut data_type = None;
        let mut shape = Vec::new();
        let mut atts = Vec::new();
        let mut unsigned_ = None;
        let mut data = None;
        let mut enum_type = None;
        let mut dim_index = Vec::new();

        while let Some(tag) = crate::codec::read_tag(cursor)? {
            match tag.field_no {
                1 => name = Some(read_string_field(cursor)?),
                2 => data_type = Some(DataType::from_ordinal(read_varint(cursor)? as u32)?),
                3 => {
                    let len = read_varint(cursor)? as usize;
                    cursor.mark(len)?;
                    let d = Dimension::decode(cursor)?;
                    cursor.unmark()?;
                    shape.push(ShapeEntry::Unresolved(d));
                }
                4 => {
                    let len = read_varint(cursor)? as usize;
                    cursor.mark(len)?;
                    let att = Attribute::decode(cursor)?;
                    cursor.unmark()?;
                    atts.push(att);
                }
                5 => unsigned_ = Some(read_varint(cursor)? != 0),
                6 => data = Some(read_bytes_field(cursor)?),
                7 => enum_type = Some(read_string_field(cursor)?),
                8 => dim_index.push(read_varint(cursor)? as u32),
                _ => crate::codec::skip_field(cursor, tag.field_no, tag.wire_type)?,
            }
        }

        Ok(Variable {
            name: name.ok_or(Error::MissingField("Variable.name"))?,
            data_type: data_type.ok_or(Error::MissingField("Variable.dataType"))?,
            shape,
            atts,
            unsigned_,
            data,
            enum_type,
            dim_index,
        })
    }

    pub fn encoded_size(&self) -> usize {
        let mut n = tag_size(1) + string_field_size(&self.name);
        n += tag_size(2) + varint_size(self.data_type.ordinal() as u64);
        for entry in &self.shape {
            n += submessage_tag_size(3, entry.encoded_size());
        }
        for att in &self.atts {
            n += submessage_tag_size(4, att.encoded_size());
        }
        if self.unsigned_.is_some() {
            n += tag_size(5) + varint_size(1);
        }
        if let Some(data) = &self.data {
            n += tag_size(6) + bytes_field_size(data);
        }
        if let Some(enum_type) = &self.enum_type {
            n += tag_size(7) + string_field_size(enum_type);
        }
        for idx in &self.dim_index {
            n += tag_size(8) + varint_size(*idx as u64);
        }
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Mode;

    fn sample() -> Variable {
        Variable {
            name: "temperature".into(),
            data_type: DataType::Float,
            shape: vec![ShapeEntry::Unresolved(Dimension {
                name: Some("time".into()),
                length: Some(10),
                is_unlimited: Some(false),
                is_vlen: Some(false),
                is_private: Some(false),
            })],
            atts: vec![Attribute {
                name: "units".into(),
                data_type: DataType::String,
                len: 1,
                data: None,
                sdata: vec!["K".into()],
            }],
            unsigned_: None,
            data: None,
            enum_type: None,
            dim_index: vec![0],
        }
    }

    #[test]
    fn round_trips_shape_and_atts() {
        let v = sample();
        let size = v.encoded_size();
        let mut buf = vec![0u8; size];
        {
            let mut c = Cursor::new(Mode::Write, &mut buf, size);
            v.encode(&mut c).unwrap();
            assert_eq!(c.pos(), size);
        }
        let mut c = Cursor::new(Mode::Read, &mut buf, size);
        let decoded = Variable::decode(&mut c).unwrap();
        assert_eq!(decoded.name, v.name);
        assert_eq!(decoded.shape.len(), 1);
        assert_eq!(decoded.shape[0].dimension().name.as_deref(), Some("time"));
        assert_eq!(decoded.dim_index, vec![0]);
    }

    #[test]
    fn missing_data_type_is_an_error() {
        let mut buf = [0u8; 4];
        {
            let mut c = Cursor::new(Mode::Write, &mut buf, 4);
            write_tag(&mut c, 1, WireType::Counted).unwrap();
            write_string_field(&mut c, "x").unwrap();
        }
        let mut c = Cursor::new(Mode::Read, &mut buf, 4);
        assert!(matches!(Variable::decode(&mut c), Err(Error::MissingField("Variable.dataType"))));
    }
}
