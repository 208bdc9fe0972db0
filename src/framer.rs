//! Stream framing (spec §4.5): the `<magic:4><payload_length:varint>
//! <payload>` envelope that wraps every message on the wire, plus
//! detection of the two non-protocol failure shapes a CDM-Remote server
//! can hand back: an HTML error page from an intervening proxy, and the
//! protocol's own `ERROR` envelope.

use crate::codec::{read_varint, varint_size, write_varint};
use crate::cursor::{Cursor, Mode};
use crate::error::{Error, Result};
use crate::message::{ErrorMessage, Header};
use crate::options::DecodeOptions;

pub const MAGIC_START: [u8; 4] = [0x43, 0x44, 0x46, 0x53];
pub const MAGIC_END: [u8; 4] = [0xED, 0xED, 0xDE, 0xDE];
pub const MAGIC_HEADER: [u8; 4] = [0xAD, 0xEC, 0xCE, 0xDA];
pub const MAGIC_DATA: [u8; 4] = [0xAB, 0xEC, 0xCE, 0xBA];
pub const MAGIC_ERROR: [u8; 4] = [0xAB, 0xAD, 0xBA, 0xDA];

const HTML_EXCERPT_CAP: usize = 4096;

fn excerpt_html(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let bound = text
        .to_lowercase()
        .find("</html>")
        .map(|idx| idx + "</html>".len())
        .unwrap_or_else(|| text.len().min(HTML_EXCERPT_CAP));
    text[..bound.min(text.len())].to_string()
}

fn looks_like_html(bytes: &[u8]) -> bool {
    let trimmed = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .map(|start| &bytes[start..])
        .unwrap_or(&[]);
    trimmed.len() >= 5 && trimmed[..5].eq_ignore_ascii_case(b"<html")
}

/// Decode a `HEADER`-framed packet into a [`Header`] (spec §4.5 steps
/// 1-5): verify there's room for the magic, match it, read the varint
/// payload length, verify it against what's actually present, then hand
/// the bounded region to [`Header::decode`].
pub fn decode_header(packet: &[u8], options: DecodeOptions) -> Result<Header> {
    if looks_like_html(packet) {
        let excerpt = excerpt_html(packet);
        #[cfg(feature = "log")]
        log::warn!("server returned an HTML page instead of a stream envelope: {}", excerpt);
        return Err(Error::ServerHtmlError(excerpt));
    }
    if packet.len() < 4 {
        return Err(Error::ShortBuffer);
    }
    let magic = [packet[0], packet[1], packet[2], packet[3]];
    if magic == MAGIC_ERROR {
        return Err(decode_upstream_error(&packet[4..])?);
    }
    if magic != MAGIC_HEADER {
        return Err(Error::BadMagic(magic));
    }

    let mut scratch = packet[4..].to_vec();
    let declared_len;
    let body_start;
    {
        let mut c = Cursor::new(Mode::Read, &mut scratch, scratch.len());
        declared_len = read_varint(&mut c)?;
        body_start = c.pos();
    }
    let body = &scratch[body_start..];
    if declared_len != body.len() as u64 {
        return Err(Error::LengthMismatch { declared: declared_len, actual: body.len() as u64 });
    }

    let mut body = body.to_vec();
    let body_len = body.len();
    let mut c = Cursor::new(Mode::Read, &mut body, body_len);
    let header = Header::decode(&mut c)?;
    let _ = options;
    Ok(header)
}

/// Mirrors `decode_header`'s envelope for round-trip/test use (spec §1,
/// SPEC_FULL.md §B.2): the public decode path never calls this.
pub fn encode_header(header: &Header) -> Result<Vec<u8>> {
    let body_len = header.encoded_size();
    let mut out = Vec::with_capacity(4 + varint_size(body_len as u64) + body_len);
    out.extend_from_slice(&MAGIC_HEADER);
    let mut len_buf = vec![0u8; varint_size(body_len as u64)];
    {
        let buf_len = len_buf.len();
        let mut c = Cursor::new(Mode::Write, &mut len_buf, buf_len);
        write_varint(&mut c, body_len as u64)?;
    }
    out.extend_from_slice(&len_buf);
    let mut body = vec![0u8; body_len];
    {
        let mut c = Cursor::new(Mode::Write, &mut body, body_len);
        header.encode(&mut c)?;
    }
    out.extend_from_slice(&body);
    Ok(out)
}

fn decode_upstream_error(rest: &[u8]) -> Result<Error> {
    let declared_len;
    let body_start;
    let mut scratch = rest.to_vec();
    {
        let mut c = Cursor::new(Mode::Read, &mut scratch, scratch.len());
        declared_len = read_varint(&mut c)?;
        body_start = c.pos();
    }
    let body = &scratch[body_start..];
    if declared_len != body.len() as u64 {
        return Err(Error::LengthMismatch { declared: declared_len, actual: body.len() as u64 });
    }
    let mut body = body.to_vec();
    let body_len = body.len();
    let mut c = Cursor::new(Mode::Read, &mut body, body_len);
    let msg = ErrorMessage::decode(&mut c)?;
    Ok(Error::UpstreamError(msg.message))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_header() -> Header {
        use crate::message::Group;
        Header {
            location: None,
            title: None,
            id: None,
            root: Group { name: None, dims: vec![], vars: vec![], structs: vec![], atts: vec![], groups: vec![], enum_types: vec![] },
            version: Some(1),
        }
    }

    #[test]
    fn round_trips_header_envelope() {
        let h = minimal_header();
        let packet = encode_header(&h).unwrap();
        let decoded = decode_header(&packet, DecodeOptions::default()).unwrap();
        assert_eq!(decoded, h);
    }

    #[test]
    fn wrong_magic_is_bad_magic() {
        let packet = [0, 1, 2, 3, 0];
        assert!(matches!(decode_header(&packet, DecodeOptions::default()), Err(Error::BadMagic(_))));
    }

    #[test]
    fn truncated_packet_is_short_buffer() {
        let packet = [MAGIC_HEADER[0], MAGIC_HEADER[1]];
        assert!(matches!(decode_header(&packet, DecodeOptions::default()), Err(Error::ShortBuffer)));
    }

    #[test]
    fn length_mismatch_is_detected() {
        let h = minimal_header();
        let mut packet = encode_header(&h).unwrap();
        packet.push(0xff);
        let body_len_pos = 4;
        packet[body_len_pos] = packet[body_len_pos].wrapping_add(1);
        assert!(matches!(
            decode_header(&packet, DecodeOptions::default()),
            Err(Error::LengthMismatch { .. }) | Err(Error::Malformed(_))
        ));
    }

    #[test]
    fn html_intrusion_is_detected() {
        let packet = b"  <html><body>502 Bad Gateway</body></html>".to_vec();
        assert!(matches!(decode_header(&packet, DecodeOptions::default()), Err(Error::ServerHtmlError(_))));
    }

    #[test]
    fn error_envelope_surfaces_upstream_message() {
        let msg = ErrorMessage { message: "no such dataset".into() };
        let body_len = msg.encoded_size();
        let mut out = Vec::new();
        out.extend_from_slice(&MAGIC_ERROR);
        let mut len_buf = vec![0u8; varint_size(body_len as u64)];
        {
            let buf_len = len_buf.len();
            let mut c = Cursor::new(Mode::Write, &mut len_buf, buf_len);
            write_varint(&mut c, body_len as u64).unwrap();
        }
        out.extend_from_slice(&len_buf);
        let mut body = vec![0u8; body_len];
        {
            let mut c = Cursor::new(Mode::Write, &mut body, body_len);
            msg.encode(&mut c).unwrap();
        }
        out.extend_from_slice(&body);

        match decode_header(&out, DecodeOptions::default()) {
            Err(Error::UpstreamError(m)) => assert_eq!(m, "no such dataset"),
            other => panic!("expected UpstreamError, got {:?}", other),
        }
    }
}
