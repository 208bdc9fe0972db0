//! A client-side decoder and semantic normalizer for the ncStream
//! (CDM-Remote) wire format: a Protobuf-style streaming representation
//! of hierarchical scientific datasets — groups, dimensions, variables,
//! attributes, enums, structures, and array data.
//!
//! [`decode`] runs the full pipeline a client needs: parse the envelope
//! and header message, walk the result into a flat [`graph::NodeSet`],
//! compute pathnames, and resolve dimension references against their
//! declarations.

pub mod codec;
pub mod cursor;
pub mod datatype;
pub mod error;
pub mod framer;
pub mod graph;
pub mod message;
pub mod options;

pub use error::{Error, Result};
pub use message::Header;
pub use options::{DecodeOptions, DecodeMode};

use graph::NodeSet;

/// Decode a single `HEADER`-framed packet and normalize it: parse the
/// envelope and message, walk it into a flat node set, compute
/// pathnames, then resolve and rewrite dimension references in place.
///
/// This is the convenience wrapper spec'd alongside the individual
/// steps (`framer::decode_header`, `graph::walk_header`,
/// `graph::compute_pathnames`, `graph::map_dimensions`,
/// `graph::deref_dimensions`) for callers who don't need to interleave
/// work between them.
pub fn decode(packet: &[u8], options: DecodeOptions) -> Result<(Header, NodeSet)> {
    let mut header = framer::decode_header(packet, options)?;
    let mut nodes = graph::walk_header_with_options(&header, options);
    graph::compute_pathnames(&mut nodes);
    graph::map_dimensions(&mut nodes)?;
    graph::deref_dimensions(&mut header, &mut nodes);
    Ok((header, nodes))
}
