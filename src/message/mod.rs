//! The ncStream message schema runtime (spec §3, §4.4): one module per
//! wire message, each exposing `encode`/`decode`/`encoded_size`.

pub mod attribute;
pub mod data;
pub mod dimension;
pub mod enum_type;
pub mod error_message;
pub mod group;
pub mod header;
pub mod range;
pub mod structure;
pub mod structure_data;
pub mod variable;

pub use attribute::Attribute;
pub use data::Data;
pub use dimension::{DimKind, DimSize, Dimension, ShapeEntry};
pub use enum_type::{EnumType, EnumTypedef};
pub use error_message::ErrorMessage;
pub use group::Group;
pub use header::Header;
pub use range::{Range, Section};
pub use structure::Structure;
pub use structure_data::StructureData;
pub use variable::Variable;
