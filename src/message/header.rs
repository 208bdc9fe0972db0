//! `Header` (spec §3.1) — the root message carried by a `HEADER`-framed
//! packet (spec §4.5).

use crate::codec::{
    read_string_field, read_varint, string_field_size, submessage_tag_size, tag_size,
    varint_size, write_string_field, write_tag, write_varint, WireType,
};
use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::message::group::Group;

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub location: Option<String>,
    pub title: Option<String>,
    pub id: Option<String>,
    pub root: Group,
    pub version: Option<u32>,
}

impl Header {
    pub fn encode(&self, cursor: &mut Cursor) -> Result<()> {
        if let Some(location) = &self.location {
            write_tag(cursor, 1, WireType::Counted)?;
            write_string_field(cursor, location)?;
        }
        if let Some(title) = &self.title {
            write_tag(cursor, 2, WireType::Counted)?;
            write_string_field(cursor, title)?;
        }
        if let Some(id) = &self.id {
            write_tag(cursor, 3, WireType::Counted)?;
            write_string_field(cursor, id)?;
        }
        write_tag(cursor, 4, WireType::Counted)?;
        write_varint(cursor, self.root.encoded_size() as u64)?;
        self.root.encode(cursor)?;

        if let Some(version) = self.version {
            write_tag(cursor, 5, WireType::Varint)?;
            write_varint(cursor, version as u64)?;
        }
        Ok(())
    }

    pub fn decode(cursor: &mut Cursor) -> Result<Self> {
        let mut location = None;
        let mut title = None;
        let mut id = None;
        let mut root = None;
        let mut version = None;

        while let Some(tag) = crate::codec::read_tag(cursor)? {
            match tag.field_no {
                1 => location = Some(read_string_field(cursor)?),
                2 => title = Some(read_string_field(cursor)?),
                3 => id = Some(read_string_field(cursor)?),
                4 => {
                    let len = read_varint(cursor)? as usize;
                    cursor.mark(len)?;
                    let g = Group::decode(cursor)?;
                    cursor.unmark()?;
                    root = Some(g);
                }
                5 => version = Some(read_varint(cursor)? as u32),
                _ => crate::codec::skip_field(cursor, tag.field_no, tag.wire_type)?,
            }
        }

        Ok(Header {
            location,
            title,
            id,
            root: root.ok_or(Error::MissingField("Header.root"))?,
            version,
        })
    }

    pub fn encoded_size(&self) -> usize {
        let mut n = 0;
        if let Some(location) = &self.location {
            n += tag_size(1) + string_field_size(location);
        }
        if let Some(title) = &self.title {
            n += tag_size(2) + string_field_size(title);
        }
        if let Some(id) = &self.id {
            n += tag_size(3) + string_field_size(id);
        }
        n += submessage_tag_size(4, self.root.encoded_size());
        if let Some(version) = self.version {
            n += tag_size(5) + varint_size(version as u64);
        }
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Mode;
    use crate::message::group::Group;

    fn empty_root() -> Group {
        Group { name: None, dims: vec![], vars: vec![], structs: vec![], atts: vec![], groups: vec![], enum_types: vec![] }
    }

    #[test]
    fn round_trips_minimal_header() {
        let h = Header { location: Some("ds.nc".into()), title: None, id: None, root: empty_root(), version: Some(2) };
        let size = h.encoded_size();
        let mut buf = vec![0u8; size];
        {
            let mut c = Cursor::new(Mode::Write, &mut buf, size);
            h.encode(&mut c).unwrap();
            assert_eq!(c.pos(), size);
        }
        let mut c = Cursor::new(Mode::Read, &mut buf, size);
        assert_eq!(Header::decode(&mut c).unwrap(), h);
    }

    #[test]
    fn missing_root_is_an_error() {
        let mut buf = [0u8; 0];
        let mut c = Cursor::new(Mode::Read, &mut buf, 0);
        assert!(matches!(Header::decode(&mut c), Err(Error::MissingField("Header.root"))));
    }
}
