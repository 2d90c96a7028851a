//! CTag value types: the tag family and its containers.

mod array;
mod compound;
mod tag;

use std::fmt;

pub use array::Array;
pub use compound::{Compound, KeyValuePair};
pub use tag::{Tag, TagValue};

use crate::error::CTagError;
use crate::wire::prefix;

/// The variant of a [`Tag`], identified on the wire by its prefix byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TagKind {
    End = prefix::END,
    Byte = prefix::BYTE,
    Short = prefix::SHORT,
    Integer = prefix::INTEGER,
    Long = prefix::LONG,
    Float = prefix::FLOAT,
    Double = prefix::DOUBLE,
    String = prefix::STRING,
    Array = prefix::ARRAY,
    Compound = prefix::COMPOUND,
    Null = prefix::NULL,
    Boolean = prefix::BOOLEAN,
    ByteArray = prefix::BYTE_ARRAY,
    ShortArray = prefix::SHORT_ARRAY,
    IntegerArray = prefix::INTEGER_ARRAY,
    LongArray = prefix::LONG_ARRAY,
    FloatArray = prefix::FLOAT_ARRAY,
    DoubleArray = prefix::DOUBLE_ARRAY,
    BooleanArray = prefix::BOOLEAN_ARRAY,
    StringArray = prefix::STRING_ARRAY,
}

impl TagKind {
    /// The prefix byte written before a payload of this kind.
    pub fn prefix(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::End => "END",
            Self::Byte => "BYTE",
            Self::Short => "SHORT",
            Self::Integer => "INTEGER",
            Self::Long => "LONG",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::String => "STRING",
            Self::Array => "ARRAY",
            Self::Compound => "COMPOUND",
            Self::Null => "NULL",
            Self::Boolean => "BOOLEAN",
            Self::ByteArray => "BYTE_ARRAY",
            Self::ShortArray => "SHORT_ARRAY",
            Self::IntegerArray => "INTEGER_ARRAY",
            Self::LongArray => "LONG_ARRAY",
            Self::FloatArray => "FLOAT_ARRAY",
            Self::DoubleArray => "DOUBLE_ARRAY",
            Self::BooleanArray => "BOOLEAN_ARRAY",
            Self::StringArray => "STRING_ARRAY",
        }
    }
}

impl TryFrom<u8> for TagKind {
    type Error = CTagError;

    fn try_from(b: u8) -> Result<Self, Self::Error> {
        Ok(match b {
            prefix::END => Self::End,
            prefix::BYTE => Self::Byte,
            prefix::SHORT => Self::Short,
            prefix::INTEGER => Self::Integer,
            prefix::LONG => Self::Long,
            prefix::FLOAT => Self::Float,
            prefix::DOUBLE => Self::Double,
            prefix::STRING => Self::String,
            prefix::ARRAY => Self::Array,
            prefix::COMPOUND => Self::Compound,
            prefix::NULL => Self::Null,
            prefix::BOOLEAN => Self::Boolean,
            prefix::BYTE_ARRAY => Self::ByteArray,
            prefix::SHORT_ARRAY => Self::ShortArray,
            prefix::INTEGER_ARRAY => Self::IntegerArray,
            prefix::LONG_ARRAY => Self::LongArray,
            prefix::FLOAT_ARRAY => Self::FloatArray,
            prefix::DOUBLE_ARRAY => Self::DoubleArray,
            prefix::BOOLEAN_ARRAY => Self::BooleanArray,
            prefix::STRING_ARRAY => Self::StringArray,
            _ => {
                return Err(CTagError::InvalidPrefix {
                    prefix: b,
                    context: "is not a known tag type",
                });
            }
        })
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
