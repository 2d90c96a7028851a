//! The tag variant family.

use std::fmt;
use std::io::Read;

use super::{Array, Compound, TagKind};
use crate::binary::Binary;
use crate::error::CTagError;
use crate::input::TagInput;
use crate::wire;

/// One node of a CTag document tree.
///
/// Each variant owns exactly one value and is written on the wire as its
/// prefix byte (see [`TagKind`]) followed by its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    /// Compound terminator. Never valid as a document or container element.
    End,
    Byte(i8),
    Short(i16),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Array(Array),
    Compound(Compound),
    Null,
    Boolean(bool),
    ByteArray(Vec<u8>),
    ShortArray(Vec<i16>),
    IntegerArray(Vec<i32>),
    LongArray(Vec<i64>),
    FloatArray(Vec<f32>),
    DoubleArray(Vec<f64>),
    BooleanArray(Vec<bool>),
    StringArray(Vec<String>),
}

impl Tag {
    pub fn kind(&self) -> TagKind {
        match self {
            Self::End => TagKind::End,
            Self::Byte(_) => TagKind::Byte,
            Self::Short(_) => TagKind::Short,
            Self::Integer(_) => TagKind::Integer,
            Self::Long(_) => TagKind::Long,
            Self::Float(_) => TagKind::Float,
            Self::Double(_) => TagKind::Double,
            Self::String(_) => TagKind::String,
            Self::Array(_) => TagKind::Array,
            Self::Compound(_) => TagKind::Compound,
            Self::Null => TagKind::Null,
            Self::Boolean(_) => TagKind::Boolean,
            Self::ByteArray(_) => TagKind::ByteArray,
            Self::ShortArray(_) => TagKind::ShortArray,
            Self::IntegerArray(_) => TagKind::IntegerArray,
            Self::LongArray(_) => TagKind::LongArray,
            Self::FloatArray(_) => TagKind::FloatArray,
            Self::DoubleArray(_) => TagKind::DoubleArray,
            Self::BooleanArray(_) => TagKind::BooleanArray,
            Self::StringArray(_) => TagKind::StringArray,
        }
    }

    /// The one-byte type prefix of this tag.
    pub fn prefix(&self) -> Binary {
        Binary::from_byte(self.kind().prefix())
    }

    /// Encodes the payload of this tag, without its prefix.
    pub fn encode(&self) -> Result<Binary, CTagError> {
        let mut buf = bytes::BytesMut::new();
        wire::encode_payload(&mut buf, self)?;
        Ok(Binary::from(buf))
    }

    /// Parses the payload of a tag of the given kind from `input`.
    pub fn parse<R: Read>(kind: TagKind, input: &mut TagInput<R>) -> Result<Self, CTagError> {
        wire::decode_payload(input, kind)
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Self::End)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string value, if this is a `String` tag.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Borrows the value of this tag as `T`.
    pub fn value<T: TagValue>(&self) -> Result<&T, CTagError> {
        T::from_tag(self).ok_or_else(|| CTagError::wrong_variant(T::KIND, self.kind()))
    }

    /// Mutably borrows the value of this tag as `T`.
    pub fn value_mut<T: TagValue>(&mut self) -> Result<&mut T, CTagError> {
        let found = self.kind();
        T::from_tag_mut(self).ok_or_else(|| CTagError::wrong_variant(T::KIND, found))
    }

    /// Replaces the value of this tag. The variant itself never changes.
    pub fn set_value<T: TagValue>(&mut self, value: T) -> Result<(), CTagError> {
        *self.value_mut::<T>()? = value;
        Ok(())
    }
}

/// A Rust type held by exactly one [`Tag`] variant.
///
/// This is the typed get/set primitive the container accessors build on.
pub trait TagValue: Sized {
    const KIND: TagKind;

    fn from_tag(tag: &Tag) -> Option<&Self>;

    fn from_tag_mut(tag: &mut Tag) -> Option<&mut Self>;

    fn into_tag(self) -> Tag;
}

macro_rules! tag_values {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl TagValue for $ty {
            const KIND: TagKind = TagKind::$variant;

            fn from_tag(tag: &Tag) -> Option<&Self> {
                match tag {
                    Tag::$variant(v) => Some(v),
                    _ => None,
                }
            }

            fn from_tag_mut(tag: &mut Tag) -> Option<&mut Self> {
                match tag {
                    Tag::$variant(v) => Some(v),
                    _ => None,
                }
            }

            fn into_tag(self) -> Tag {
                Tag::$variant(self)
            }
        }

        impl From<$ty> for Tag {
            fn from(v: $ty) -> Self {
                Tag::$variant(v)
            }
        }
    )*};
}

tag_values! {
    i8 => Byte,
    i16 => Short,
    i32 => Integer,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    bool => Boolean,
    String => String,
    Array => Array,
    Compound => Compound,
    Vec<u8> => ByteArray,
    Vec<i16> => ShortArray,
    Vec<i32> => IntegerArray,
    Vec<i64> => LongArray,
    Vec<f32> => FloatArray,
    Vec<f64> => DoubleArray,
    Vec<bool> => BooleanArray,
    Vec<String> => StringArray,
}

impl From<&str> for Tag {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<()> for Tag {
    fn from(_: ()) -> Self {
        Self::Null
    }
}

impl From<&[&str]> for Tag {
    fn from(items: &[&str]) -> Self {
        Self::StringArray(items.iter().map(|s| (*s).to_owned()).collect())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind();
        match self {
            Self::End | Self::Null => write!(f, "{kind}"),
            Self::Byte(v) => write!(f, "{kind} {v}"),
            Self::Short(v) => write!(f, "{kind} {v}"),
            Self::Integer(v) => write!(f, "{kind} {v}"),
            Self::Long(v) => write!(f, "{kind} {v}"),
            Self::Float(v) => write!(f, "{kind} {v}"),
            Self::Double(v) => write!(f, "{kind} {v}"),
            Self::Boolean(v) => write!(f, "{kind} {v}"),
            Self::String(s) => write!(f, "{kind} {s:?}"),
            Self::Array(a) => write!(f, "{a}"),
            Self::Compound(c) => write!(f, "{c}"),
            Self::ByteArray(v) => write_block(f, kind, '[', ']', v.iter().enumerate()),
            Self::ShortArray(v) => write_block(f, kind, '[', ']', v.iter().enumerate()),
            Self::IntegerArray(v) => write_block(f, kind, '[', ']', v.iter().enumerate()),
            Self::LongArray(v) => write_block(f, kind, '[', ']', v.iter().enumerate()),
            Self::FloatArray(v) => write_block(f, kind, '[', ']', v.iter().enumerate()),
            Self::DoubleArray(v) => write_block(f, kind, '[', ']', v.iter().enumerate()),
            Self::BooleanArray(v) => write_block(f, kind, '[', ']', v.iter().enumerate()),
            Self::StringArray(v) => write_block(
                f,
                kind,
                '[',
                ']',
                v.iter().enumerate().map(|(i, s)| (i, format!("{s:?}"))),
            ),
        }
    }
}

/// Writes `KIND [` then one indented `key: value` line per entry, then `]`.
pub(super) fn write_block<K, V>(
    f: &mut fmt::Formatter<'_>,
    kind: TagKind,
    open: char,
    close: char,
    entries: impl Iterator<Item = (K, V)>,
) -> fmt::Result
where
    K: fmt::Display,
    V: fmt::Display,
{
    writeln!(f, "{kind} {open}")?;
    for (key, value) in entries {
        let value = value.to_string().replace('\n', "\n    ");
        writeln!(f, "    {key}: {value}")?;
    }
    write!(f, "{close}")
}
