//! The `Error` wire message (spec §3.1), named `ErrorMessage` here to
//! avoid shadowing [`crate::error::Error`]. Carried by an `ERROR`-framed
//! packet (spec §6.3).

use crate::codec::{read_string_field, string_field_size, tag_size, write_string_field, write_tag, WireType};
use crate::cursor::Cursor;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorMessage {
    pub message: String,
}

impl ErrorMessage {
    pub fn encode(&self, cursor: &mut Cursor) -> Result<()> {
        write_tag(cursor, 1, WireType::Counted)?;
        write_string_field(cursor, &self.message)?;
        Ok(())
    }

    pub fn decode(cursor: &mut Cursor) -> Result<Self> {
        let mut message = None;
        while let Some(tag) = crate::codec::read_tag(cursor)? {
            match tag.field_no {
                1 => message = Some(read_string_field(cursor)?),
                _ => crate::codec::skip_field(cursor, tag.field_no, tag.wire_type)?,
            }
        }
        Ok(ErrorMessage { message: message.ok_or(Error::MissingField("ErrorMessage.message"))? })
    }

    pub fn encoded_size(&self) -> usize {
        tag_size(1) + string_field_size(&self.message)
    }
}
