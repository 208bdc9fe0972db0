//! Crate-wide error type.
//!
//! Mirrors the teacher's `quick_error!`-based enum: one flat set of tagged
//! variants, no nested source chains. See spec §7 for the policy that maps
//! each decode/normalize failure onto one of these.

use core::result;

quick_error::quick_error! {
    #[derive(Debug)]
    pub enum Error {
        /// A read or write would cross the cursor's active region boundary.
        ShortBuffer {
            description("buffer too short for the requested read or write")
        }
        /// A varint ran past 10 bytes without terminating, or a length
        /// prefix describes a submessage larger than remains in the packet.
        Malformed(msg: String) {
            description("malformed wire data")
            display("malformed wire data: {}", msg)
        }
        /// `unmark()` was called with the cursor not positioned at the
        /// region end it is popping.
        FramingError(msg: String) {
            description("region framing mismatch")
            display("region framing mismatch: {}", msg)
        }
        /// The leading 4 bytes of a packet did not match any known magic.
        BadMagic(found: [u8; 4]) {
            description("unrecognized stream magic")
            display("unrecognized stream magic: {:02x?}", found)
        }
        /// The outer length varint did not match the number of bytes
        /// actually present after it.
        LengthMismatch { declared: u64, actual: u64 } {
            description("outer envelope length mismatch")
            display("outer envelope declared {} bytes, packet has {}", declared, actual)
        }
        /// A required field was absent when decoding finished.
        MissingField(field: &'static str) {
            description("missing required field")
            display("missing required field: {}", field)
        }
        /// A dimension reference has no matching declaration, or matches
        /// one with a different kind or size.
        InvalidCoords(msg: String) {
            description("dimension reference could not be resolved")
            display("dimension reference could not be resolved: {}", msg)
        }
        /// A malformed dimension (ambiguous kind) was referenced by shape.
        TranslationError(msg: String) {
            description("cannot translate malformed node")
            display("cannot translate malformed node: {}", msg)
        }
        /// The transport delivered an `Error` envelope; this carries its
        /// `message` field verbatim.
        UpstreamError(msg: String) {
            description("upstream server returned an error envelope")
            display("upstream error: {}", msg)
        }
        /// The transport returned an HTML error page instead of a stream
        /// envelope.
        ServerHtmlError(excerpt: String) {
            description("server returned an HTML error page")
            display("server returned an HTML error page: {}", excerpt)
        }
        /// A `string` field's bytes were not valid UTF-8.
        Utf8(msg: String) {
            description("invalid utf-8 in string field")
            display("invalid utf-8 in string field: {}", msg)
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
