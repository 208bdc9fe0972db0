//! Builds a small synthetic `HEADER` packet in memory and decodes it,
//! with `stderrlog` wired up so the crate's own diagnostics (unknown
//! field skips, ambiguous dimension classification) are visible on
//! stderr. Mirrors the teacher's example binaries, which call
//! `stderrlog::new().verbosity(n).init()` before doing anything else.

use std::rc::Rc;

use ncstream::datatype::DataType;
use ncstream::framer;
use ncstream::message::{Dimension, Group, Header, ShapeEntry, Variable};
use ncstream::DecodeOptions;

fn sample_header() -> Header {
    let time = Rc::new(Dimension {
        name: Some("time".into()),
        length: Some(4),
        is_unlimited: Some(false),
        is_vlen: Some(false),
        is_private: Some(false),
    });
    let temp = Variable {
        name: "temp".into(),
        data_type: DataType::Float,
        shape: vec![ShapeEntry::Unresolved((*time).clone())],
        atts: vec![],
        unsigned_: None,
        data: None,
        enum_type: None,
        dim_index: vec![0],
    };
    let root = Group {
        name: None,
        dims: vec![time],
        vars: vec![temp],
        structs: vec![],
        atts: vec![],
        groups: vec![],
        enum_types: vec![],
    };
    Header { location: Some("demo.nc".into()), title: None, id: None, root, version: Some(1) }
}

fn main() {
    stderrlog::new().verbosity(3).init().unwrap();

    let packet = framer::encode_header(&sample_header()).expect("encode sample header");
    let (header, nodes) = ncstream::decode(&packet, DecodeOptions::default()).expect("decode sample packet");

    println!("location: {:?}", header.location);
    println!("nodes after normalization: {}", nodes.nodes.len());
    for node in &nodes.nodes {
        if let Some(pathname) = &node.pathname {
            println!("  {:?} -> {}", node.sort, pathname);
        }
    }
}
