//! `DataType` and `Compress` wire enumerations (spec §3.1). Ordinals are
//! part of the wire contract and must match exactly.

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum DataType {
    Char = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Int64 = 4,
    Float = 5,
    Double = 6,
    String = 7,
    Structure = 8,
    Sequence = 9,
    Enum1 = 10,
    Enum2 = 11,
    Enum4 = 12,
    Opaque = 13,
    Ubyte = 14,
    Ushort = 15,
    Uint = 16,
    Uint64 = 17,
}

impl DataType {
    pub fn from_ordinal(v: u32) -> Result<Self> {
        Ok(match v {
            0 => DataType::Char,
            1 => DataType::Byte,
            2 => DataType::Short,
            3 => DataType::Int,
            4 => DataType::Int64,
            5 => DataType::Float,
            6 => DataType::Double,
            7 => DataType::String,
            8 => DataType::Structure,
            9 => DataType::Sequence,
            10 => DataType::Enum1,
            11 => DataType::Enum2,
            12 => DataType::Enum4,
            13 => DataType::Opaque,
            14 => DataType::Ubyte,
            15 => DataType::Ushort,
            16 => DataType::Uint,
            17 => DataType::Uint64,
            other => return Err(Error::Malformed(format!("unknown DataType ordinal {}", other))),
        })
    }

    pub fn ordinal(self) -> u32 {
        self as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Compress {
    None = 0,
    Deflate = 1,
}

impl Compress {
    pub fn from_ordinal(v: u32) -> Result<Self> {
        Ok(match v {
            0 => Compress::None,
            1 => Compress::Deflate,
            other => return Err(Error::Malformed(format!("unknown Compress ordinal {}", other))),
        })
    }

    pub fn ordinal(self) -> u32 {
        self as u32
    }
}
