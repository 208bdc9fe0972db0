//! Integration tests exercising the public `decode` pipeline end to end
//! against constructed packets, rather than any single internal module.

use std::rc::Rc;

use ncstream::codec::{varint_size, write_varint};
use ncstream::cursor::{Cursor, Mode};
use ncstream::datatype::DataType;
use ncstream::framer::{self, MAGIC_HEADER};
use ncstream::message::{Dimension, EnumType, EnumTypedef, Group, Header, ShapeEntry, Variable};
use ncstream::{decode, DecodeOptions, Error};

fn dim(name: &str, len: u64) -> Dimension {
    Dimension { name: Some(name.into()), length: Some(len), is_unlimited: Some(false), is_vlen: Some(false), is_private: Some(false) }
}

#[test]
fn decodes_a_nested_dataset_and_resolves_dimensions() {
    let d1 = Rc::new(dim("d1", 4));
    let var = Variable {
        name: "x".into(),
        data_type: DataType::Double,
        shape: vec![ShapeEntry::Unresolved(dim("d1", 4))],
        atts: vec![],
        unsigned_: None,
        data: None,
        enum_type: None,
        dim_index: vec![0],
    };
    let g1 = Group {
        name: Some("g1".into()),
        dims: vec![],
        vars: vec![var],
        structs: vec![],
        atts: vec![],
        groups: vec![],
        enum_types: vec![EnumTypedef { name: "cloud".into(), map: vec![EnumType { code: 0, value: "Clear".into() }] }],
    };
    let root = Group { name: None, dims: vec![d1], vars: vec![], structs: vec![], atts: vec![], groups: vec![g1], enum_types: vec![] };
    let header = Header { location: Some("ds.nc".into()), title: Some("demo".into()), id: None, root, version: Some(2) };

    let packet = framer::encode_header(&header).unwrap();
    let (decoded, nodes) = decode(&packet, DecodeOptions::default()).unwrap();

    assert_eq!(decoded.root.groups[0].name.as_deref(), Some("g1"));
    match &decoded.root.groups[0].vars[0].shape[0] {
        ShapeEntry::Resolved(rc) => assert!(Rc::ptr_eq(rc, &decoded.root.dims[0])),
        ShapeEntry::Unresolved(_) => panic!("dimension reference was not resolved"),
    }
    assert!(nodes.nodes.iter().any(|n| n.pathname.as_deref() == Some("g1.x")));
}

#[test]
fn truncated_envelope_is_length_mismatch() {
    let header = Header {
        location: None,
        title: None,
        id: None,
        root: Group { name: None, dims: vec![], vars: vec![], structs: vec![], atts: vec![], groups: vec![], enum_types: vec![] },
        version: None,
    };
    let mut packet = framer::encode_header(&header).unwrap();
    packet.truncate(packet.len() - 1);
    assert!(matches!(decode(&packet, DecodeOptions::default()), Err(Error::LengthMismatch { .. })));
}

#[test]
fn wrong_magic_is_rejected() {
    let packet = [0xde, 0xad, 0xbe, 0xef, 0x00];
    assert!(matches!(decode(&packet, DecodeOptions::default()), Err(Error::BadMagic(_))));
}

#[test]
fn unknown_field_is_skipped_not_an_error() {
    let header = Header {
        location: Some("ds.nc".into()),
        title: None,
        id: None,
        root: Group { name: None, dims: vec![], vars: vec![], structs: vec![], atts: vec![], groups: vec![], enum_types: vec![] },
        version: None,
    };
    let mut body = vec![0u8; header.encoded_size() + 16];
    let body_len;
    {
        let buf_len = body.len();
        let mut c = Cursor::new(Mode::Write, &mut body, buf_len);
        header.encode(&mut c).unwrap();
        // Field 99, varint wiretype: an unrecognized field a future server
        // version might add.
        ncstream::codec::write_tag(&mut c, 99, ncstream::codec::WireType::Varint).unwrap();
        write_varint(&mut c, 12345).unwrap();
        body_len = c.pos();
    }
    body.truncate(body_len);

    let mut packet = Vec::new();
    packet.extend_from_slice(&MAGIC_HEADER);
    let mut len_buf = vec![0u8; varint_size(body_len as u64)];
    {
        let buf_len = len_buf.len();
        let mut c = Cursor::new(Mode::Write, &mut len_buf, buf_len);
        write_varint(&mut c, body_len as u64).unwrap();
    }
    packet.extend_from_slice(&len_buf);
    packet.extend_from_slice(&body);

    let (decoded, _) = decode(&packet, DecodeOptions::default()).unwrap();
    assert_eq!(decoded.location.as_deref(), Some("ds.nc"));
}

#[test]
fn html_error_page_is_detected() {
    let packet = b"<html><head><title>502</title></head><body>Bad Gateway</body></html>".to_vec();
    assert!(matches!(decode(&packet, DecodeOptions::default()), Err(Error::ServerHtmlError(_))));
}

#[test]
fn large_nested_submessage_round_trips_at_exact_size() {
    // A group with many attributes, nested one level deep, verifying that
    // `encoded_size` and the actual written length agree for a payload an
    // order of magnitude larger than the small fixtures above.
    let atts: Vec<_> = (0..2000)
        .map(|i| ncstream::message::Attribute {
            name: format!("attr_{}", i),
            data_type: DataType::Int,
            len: 1,
            data: Some(vec![0u8; 4]),
            sdata: vec![],
        })
        .collect();
    let inner = Group { name: Some("big".into()), dims: vec![], vars: vec![], structs: vec![], atts, groups: vec![], enum_types: vec![] };
    let root = Group { name: None, dims: vec![], vars: vec![], structs: vec![], atts: vec![], groups: vec![inner], enum_types: vec![] };
    let header = Header { location: None, title: None, id: None, root, version: None };

    let packet = framer::encode_header(&header).unwrap();
    let (decoded, _) = decode(&packet, DecodeOptions::default()).unwrap();
    assert_eq!(decoded.root.groups[0].atts.len(), 2000);
}
