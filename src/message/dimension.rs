//! `Dimension` (spec §3.1) plus the kind classification of spec §4.8.
//!
//! A `Dimension` appearing directly in a `Group`'s `dims` is a
//! *declaration*; everywhere else (inside a `Variable`'s or `Structure`'s
//! `shape`) it is a *reference*, resolved against a declaration during
//! normalization (spec §4.9). See [`crate::graph`] for resolution;
//! [`ShapeEntry`] here only carries the two possible states of a shape
//! slot.

use std::rc::Rc;

use crate::codec::{
    read_string_field, read_varint, string_field_size, tag_size, varint_size, write_string_field,
    write_tag, write_varint, WireType,
};
use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::options::DecodeOptions;

#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    pub name: Option<String>,
    pub length: Option<u64>,
    pub is_unlimited: Option<bool>,
    pub is_vlen: Option<bool>,
    pub is_private: Option<bool>,
}

impl Dimension {
    pub fn encode(&self, cursor: &mut Cursor) -> Result<()> {
        if let Some(name) = &self.name {
            write_tag(cursor, 1, WireType::Counted)?;
            write_string_field(cursor, name)?;
        }
        if let Some(length) = self.length {
            write_tag(cursor, 2, WireType::Varint)?;
            write_varint(cursor, length)?;
        }
        if let Some(v) = self.is_unlimited {
            write_tag(cursor, 3, WireType::Varint)?;
            write_varint(cursor, v as u64)?;
        }
        if let Some(v) = self.is_vlen {
            write_tag(cursor, 4, WireType::Varint)?;
            write_varint(cursor, v as u64)?;
        }
        if let Some(v) = self.is_private {
            write_tag(cursor, 5, WireType::Varint)?;
            write_varint(cursor, v as u64)?;
        }
        Ok(())
    }

    pub fn decode(cursor: &mut Cursor) -> Result<Self> {
        let mut d = Dimension { name: None, length: None, is_unlimited: None, is_vlen: None, is_private: None };
        while let Some(tag) = crate::codec::read_tag(cursor)? {
            match tag.field_no {
                1 => d.name = Some(read_string_field(cursor)?),
                2 => d.length = Some(read_varint(cursor)?),
                3 => d.is_unlimited = Some(read_varint(cursor)? != 0),
                4 => d.is_vlen = Some(read_varint(cursor)? != 0),
                5 => d.is_private = Some(read_varint(cursor)? != 0),
                _ => crate::codec::skip_field(cursor, tag.field_no, tag.wire_type)?,
            }
        }
        // Default fill-in (spec §4.4.2 step 3, §8.4): every documented
        // default applies even when the field never appeared on the wire.
        d.length.get_or_insert(0);
        d.is_unlimited.get_or_insert(false);
        d.is_vlen.get_or_insert(false);
        d.is_private.get_or_insert(false);
        Ok(d)
    }

    pub fn encoded_size(&self) -> usize {
        let mut n = 0;
        if let Some(name) = &self.name {
            n += tag_size(1) + string_field_size(name);
        }
        if let Some(length) = self.length {
            n += tag_size(2) + varint_size(length);
        }
        if self.is_unlimited.is_some() {
            n += tag_size(3) + varint_size(1);
        }
        if self.is_vlen.is_some() {
            n += tag_size(4) + varint_size(1);
        }
        if self.is_private.is_some() {
            n += tag_size(5) + varint_size(1);
        }
        n
    }
}

/// The four categorical kinds a well-formed `Dimension` classifies as,
/// plus `Unknown` for the malformed (multiply-decorated) case (spec
/// §4.8).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimKind {
    Fixed,
    Unlimited,
    Vlen,
    Private,
    Unknown,
}

/// Effective size of a dimension (spec §4.8 table). `Unsized` covers both
/// `Private` and `Unknown`, both represented by sentinel `-1` in the
/// source spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimSize {
    Value(u64),
    Unlimited,
    Vlen,
    Unsized,
}

/// Classify a dimension's kind and effective size. Logs at `warn` (when
/// the `log` feature is on) and returns `Unknown` for a dimension with
/// more than one classifying flag set; in `DecodeMode::Strict`, that
/// condition is a hard `TranslationError` instead of a silent downgrade.
pub fn classify(d: &Dimension, options: DecodeOptions) -> Result<(DimKind, DimSize)> {
    let length_set = d.length.unwrap_or(0) != 0;
    let flags = [
        d.is_unlimited.unwrap_or(false),
        d.is_vlen.unwrap_or(false),
        d.is_private.unwrap_or(false),
        length_set,
    ];
    let set_count = flags.iter().filter(|b| **b).count();

    if set_count > 1 {
        if options.is_strict() {
            return Err(Error::TranslationError(format!(
                "dimension {:?} has more than one classifying flag set",
                d.name
            )));
        }
        #[cfg(feature = "log")]
        log::warn!("dimension {:?} has ambiguous kind flags; treating as UNKNOWN", d.name);
        return Ok((DimKind::Unknown, DimSize::Unsized));
    }

    if d.is_unlimited.unwrap_or(false) {
        return Ok((DimKind::Unlimited, DimSize::Unlimited));
    }
    if d.is_vlen.unwrap_or(false) {
        return Ok((DimKind::Vlen, DimSize::Vlen));
    }
    if d.is_private.unwrap_or(false) {
        return Ok((DimKind::Private, DimSize::Unsized));
    }
    Ok((DimKind::Fixed, DimSize::Value(d.length.unwrap_or(0))))
}

/// A slot in a `Variable`'s or `Structure`'s `shape`: either the
/// as-decoded reference (not yet matched to a declaration) or, after
/// `deref_dimensions`, a shared handle to the declaration it resolved to
/// (spec §4.9; see [`crate::graph::dimres`]).
#[derive(Debug, Clone)]
pub enum ShapeEntry {
    Unresolved(Dimension),
    Resolved(Rc<Dimension>),
}

impl ShapeEntry {
    pub fn dimension(&self) -> &Dimension {
        match self {
            ShapeEntry::Unresolved(d) => d,
            ShapeEntry::Resolved(rc) => rc,
        }
    }

    pub fn encode(&self, cursor: &mut Cursor) -> Result<()> {
        self.dimension().encode(cursor)
    }

    pub fn encoded_size(&self) -> usize {
        self.dimension().encoded_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Mode;

    fn round_trip(d: &Dimension) -> Dimension {
        let size = d.encoded_size();
        let mut buf = vec![0u8; size];
        {
            let mut c = Cursor::new(Mode::Write, &mut buf, size);
            d.encode(&mut c).unwrap();
            assert_eq!(c.pos(), size);
        }
        let mut c = Cursor::new(Mode::Read, &mut buf, size);
        Dimension::decode(&mut c).unwrap()
    }

    #[test]
    fn default_fill_in_on_name_only_dimension() {
        let d = Dimension { name: Some("x".into()), length: None, is_unlimited: None, is_vlen: None, is_private: None };
        let decoded = round_trip(&d);
        assert_eq!(decoded.length, Some(0));
        assert_eq!(decoded.is_unlimited, Some(false));
        assert_eq!(decoded.is_vlen, Some(false));
        assert_eq!(decoded.is_private, Some(false));
    }

    #[test]
    fn size_matches_encoded_length() {
        let d = Dimension {
            name: Some("time".into()),
            length: Some(10),
            is_unlimited: Some(false),
            is_vlen: Some(false),
            is_private: Some(false),
        };
        assert_eq!(d.encoded_size(), round_trip(&d).encoded_size());
    }

    #[test]
    fn classify_fixed() {
        let d = Dimension { name: Some("t".into()), length: Some(10), is_unlimited: Some(false), is_vlen: Some(false), is_private: Some(false) };
        let (kind, size) = classify(&d, DecodeOptions::default()).unwrap();
        assert_eq!(kind, DimKind::Fixed);
        assert_eq!(size, DimSize::Value(10));
    }

    #[test]
    fn classify_ambiguous_is_unknown_when_lenient() {
        let d = Dimension { name: Some("bad".into()), length: Some(5), is_unlimited: Some(true), is_vlen: Some(false), is_private: Some(false) };
        let (kind, _) = classify(&d, DecodeOptions::lenient()).unwrap();
        assert_eq!(kind, DimKind::Unknown);
    }

    #[test]
    fn classify_ambiguous_errors_when_strict() {
        let d = Dimension { name: Some("bad".into()), length: Some(5), is_unlimited: Some(true), is_vlen: Some(false), is_private: Some(false) };
        assert!(classify(&d, DecodeOptions::strict()).is_err());
    }
}
