//! `Group` (spec §3.1) — a named (or, for the root, unnamed) namespace
//! holding dimension declarations, variables, structures, attributes,
//! nested groups, and enum typedefs.

use std::rc::Rc;

use crate::codec::{
    read_string_field, read_varint, string_field_size, submessage_tag_size, tag_size,
    write_string_field, write_tag, write_varint, WireType,
};
use crate::cursor::Cursor;
use crate::error::Result;
use crate::message::attribute::Attribute;
use crate::message::dimension::Dimension;
use crate::message::enum_type::EnumTypedef;
use crate::message::structure::Structure;
use crate::message::variable::Variable;

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    /// Absent (or empty) for the root group.
    pub name: Option<String>,
    pub dims: Vec<Rc<Dimension>>,
    pub vars: Vec<Variable>,
    pub structs: Vec<Structure>,
    pub atts: Vec<Attribute>,
    pub groups: Vec<Group>,
    pub enum_types: Vec<EnumTypedef>,
}

impl Group {
    pub fn encode(&self, cursor: &mut Cursor) -> Result<()> {
        if let Some(name) = &self.name {
            write_tag(cursor, 1, WireType::Counted)?;
            write_string_field(cursor, name)?;
        }
        for dim in &self.dims {
            write_tag(cursor, 2, WireType::Counted)?;
            write_varint(cursor, dim.encoded_size() as u64)?;
            dim.encode(cursor)?;
        }
        for var in &self.vars {
            write_tag(cursor, 3, WireType::Counted)?;
            write_varint(cursor, var.encoded_size() as u64)?;
            var.encode(cursor)?;
        }
        for s in &self.structs {
            write_tag(cursor, 4, WireType::Counted)?;
            write_varint(cursor, s.encoded_size() as u64)?;
            s.encode(cursor)?;
        }
        for att in &self.atts {
            write_tag(cursor, 5, WireType::Counted)?;
            write_varint(cursor, att.encoded_size() as u64)?;
            att.encode(cursor)?;
        }
        for g in &self.groups {
            write_tag(cursor, 6, WireType::Counted)?;
            write_varint(cursor, g.encoded_size() as u64)?;
            g.encode(cursor)?;
        }
        for e in &self.enum_types {
            write_tag(cursor, 7, WireType::Counted)?;
            write_varint(cursor, e.encoded_size() as u64)?;
            e.encode(cursor)?;
        }
        Ok(())
    }

    pub fn decode(cursor: &mut Cursor) -> Result<Self> {
        let mut name = None;
        let mut dims = Vec::new();
        let mut vars = Vec::new();
        let mut structs = Vec::new();
        let mut atts = Vec::new();
        let mut groups = Vec::new();
        let mut enum_types = Vec::new();

        while let Some(tag) = crate::codec::read_tag(cursor)? {
            match tag.field_no {
                1 => name = Some(read_string_field(cursor)?),
                2 => {
                    let len = read_varint(cursor)? as usize;
                    cursor.mark(len)?;
                    let d = Dimension::decode(cursor)?;
                    cursor.unmark()?;
                    dims.push(Rc::new(d));
                }
                3 => {
                    let len = read_varint(cursor)? as usize;
                    cursor.mark(len)?;
                    let v = Variable::decode(cursor)?;
                    cursor.unmark()?;
                    vars.push(v);
                }
                4 => {
                    let len = read_varint(cursor)? as usize;
                    cursor.mark(len)?;
                    let s = Structure::decode(cursor)?;
                    cursor.unmark()?;
                    structs.push(s);
                }
                5 => {
                    let len = read_varint(cursor)? as usize;
                    cursor.mark(len)?;
                    let a = Attribute::decode(cursor)?;
                    cursor.unmark()?;
                    atts.push(a);
                }
                6 => {
                    let len = read_varint(cursor)? as usize;
                    cursor.mark(len)?;
                    let g = Group::decode(cursor)?;
                    cursor.unmark()?;
                    groups.push(g);
                }
                7 => {
                    let len = read_varint(cursor)? as usize;
                    cursor.mark(len)?;
                    let e = EnumTypedef::decode(cursor)?;
                    cursor.unmark()?;
                    enum_types.push(e);
                }
                _ => crate::codec::skip_field(cursor, tag.field_no, tag.wire_type)?,
            }
        }

        Ok(Group { name, dims, vars, structs, atts, groups, enum_types })
    }

    pub fn encoded_size(&self) -> usize {
        let mut n = 0;
        if let Some(name) = &self.name {
            n += tag_size(1) + string_field_size(name);
        }
        for dim in &self.dims {
            n += submessage_tag_size(2, dim.encoded_size());
        }
        for var in &self.vars {
            n += submessage_tag_size(3, var.encoded_size());
        }
        for s in &self.structs {
            n += submessage_tag_size(4, s.encoded_size());
        }
        for att in &self.atts {
            n += submessage_tag_size(5, att.encoded_size());
        }
        for g in &self.groups {
            n += submessage_tag_size(6, g.encoded_size());
        }
        for e in &self.enum_types {
            n += submessage_tag_size(7, e.encoded_size());
        }
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Mode;

    #[test]
    fn root_group_has_no_name_field_on_wire() {
        let g = Group { name: None, dims: vec![], vars: vec![], structs: vec![], atts: vec![], groups: vec![], enum_types: vec![] };
        assert_eq!(g.encoded_size(), 0);
    }

    #[test]
    fn round_trips_nested_group_with_dim_decl() {
        let child = Group {
            name: Some("nested".into()),
            dims: vec![Rc::new(Dimension { name: Some("x".into()), length: Some(4), is_unlimited: Some(false), is_vlen: Some(false), is_private: Some(false) })],
            vars: vec![],
            structs: vec![],
            atts: vec![],
            groups: vec![],
            enum_types: vec![],
        };
        let root = Group { name: None, dims: vec![], vars: vec![], structs: vec![], atts: vec![], groups: vec![child], enum_types: vec![] };
        let size = root.encoded_size();
        let mut buf = vec![0u8; size];
        {
            let mut c = Cursor::new(Mode::Write, &mut buf, size);
            root.encode(&mut c).unwrap();
            assert_eq!(c.pos(), size);
        }
        let mut c = Cursor::new(Mode::Read, &mut buf, size);
        let decoded = Group::decode(&mut c).unwrap();
        assert_eq!(decoded.groups.len(), 1);
        assert_eq!(decoded.groups[0].dims[0].name.as_deref(), Some("x"));
    }
}
