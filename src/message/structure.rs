//! `Structure` (spec §3.1) — a compound variable nesting further
//! variables and structures.

use crate::codec::{
    read_string_field, read_varint, string_field_size, submessage_tag_size, tag_size,
    varint_size, write_string_field, write_tag, write_varint, WireType,
};
use crate::cursor::Cursor;
use crate::datatype::DataType;
use crate::error::{Error, Result};
use crate::message::attribute::Attribute;
use crate::message::dimension::{Dimension, ShapeEntry};
use crate::message::variable::Variable;

#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    pub name: String,
    pub data_type: DataType,
    pub shape: Vec<ShapeEntry>,
    pub atts: Vec<Attribute>,
    pub vars: Vec<Variable>,
    pub structs: Vec<Structure>,
}

impl Structure {
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
        for var in &self.vars {
            write_tag(cursor, 5, WireType::Counted)?;
            write_varint(cursor, var.encoded_size() as u64)?;
            var.encode(cursor)?;
        }
        for s in &self.structs {
            write_tag(cursor, 6, WireType::Counted)?;
            write_varint(cursor, s.encoded_size() as u64)?;
            s.encode(cursor)?;
        }
        Ok(())
    }

    pub fn decode(cursor: &mut Cursor) -> Result<Self> {
        let mut name = None;
        let mut data_type = None;
        let mut shape = Vec::new();
        let mut atts = Vec::new();
        let mut vars = Vec::new();
        let mut structs = Vec::new();

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
                5 => {
                    let len = read_varint(cursor)? as usize;
                    cursor.mark(len)?;
                    let var = Variable::decode(cursor)?;
                    cursor.unmark()?;
                    vars.push(var);
                }
                6 => {
                    let len = read_varint(cursor)? as usize;
                    cursor.mark(len)?;
                    let s = Structure::decode(cursor)?;
                    cursor.unmark()?;
                    structs.push(s);
                }
                _ => crate::codec::skip_field(cursor, tag.field_no, tag.wire_type)?,
            }
        }

        Ok(Structure {
            name: name.ok_or(Error::MissingField("Structure.name"))?,
            data_type: data_type.ok_or(Error::MissingField("Structure.dataType"))?,
            shape,
            atts,
            vars,
            structs,
        })
    }

    /// Exact size, computed by summing each element's own `encoded_size`
    /// (REDESIGN FLAGS #1): a width-class estimate over-counts the moment a
    /// structure nests another structure or a variable with attributes.
    pub fn encoded_size(&self) -> usize {
        let mut n = tag_size(1) + string_field_size(&self.name);
        n += tag_size(2) + varint_size(self.data_type.ordinal() as u64);
        for entry in &self.shape {
            n += submessage_tag_size(3, entry.encoded_size());
        }
        for att in &self.atts {
            n += submessage_tag_size(4, att.encoded_size());
        }
        for var in &self.vars {
            n += submessage_tag_size(5, var.encoded_size());
        }
        for s in &self.structs {
            n += submessage_tag_size(6, s.encoded_size());
        }
        n
    }
}
