//! CTag decoding: bytes → `Tag`.

use std::io::Read;

use bytes::{Buf, Bytes};

use super::prefix;
use crate::error::CTagError;
use crate::input::TagInput;
use crate::types::{Array, Compound, Tag, TagKind};

/// Decodes a whole document: one prefix byte followed by its payload.
///
/// The End marker is not a valid document.
pub fn decode_document<R: Read>(input: &mut TagInput<R>) -> Result<Tag, CTagError> {
    input.reset_depth();
    let kind = read_kind(input, "at document start")?;
    decode_payload(input, kind)
}

/// Decodes the payload of a tag whose prefix has already been read.
pub fn decode_payload<R: Read>(input: &mut TagInput<R>, kind: TagKind) -> Result<Tag, CTagError> {
    Ok(match kind {
        TagKind::End => {
            return Err(CTagError::InvalidPrefix {
                prefix: prefix::END,
                context: "has no payload",
            });
        }
        TagKind::Byte => Tag::Byte(input.read_i8()?),
        TagKind::Short => Tag::Short(input.read_i16()?),
        TagKind::Integer => Tag::Integer(input.read_i32()?),
        TagKind::Long => Tag::Long(input.read_i64()?),
        TagKind::Float => Tag::Float(decode_float(&mut input.read(4)?.into_bytes())),
        TagKind::Double => Tag::Double(decode_double(&mut input.read(8)?.into_bytes())),
        TagKind::String => Tag::String(decode_string(input)?),
        TagKind::Array => Tag::Array(decode_array(input)?),
        TagKind::Compound => Tag::Compound(decode_compound(input)?),
        TagKind::Null => Tag::Null,
        TagKind::Boolean => Tag::Boolean(input.read_u8()? & 1 != 0),
        TagKind::ByteArray => {
            let len = decode_length(input, kind)?;
            Tag::ByteArray(input.read(len)?.as_bytes().to_vec())
        }
        TagKind::ShortArray => Tag::ShortArray(decode_fixed(input, kind, 2, Bytes::get_i16)?),
        TagKind::IntegerArray => Tag::IntegerArray(decode_fixed(input, kind, 4, Bytes::get_i32)?),
        TagKind::LongArray => Tag::LongArray(decode_fixed(input, kind, 8, Bytes::get_i64)?),
        TagKind::FloatArray => Tag::FloatArray(decode_fixed(input, kind, 4, decode_float)?),
        TagKind::DoubleArray => Tag::DoubleArray(decode_fixed(input, kind, 8, decode_double)?),
        TagKind::BooleanArray => Tag::BooleanArray(decode_bool_array(input)?),
        TagKind::StringArray => {
            let len = decode_length(input, kind)?;
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(decode_string(input)?);
            }
            Tag::StringArray(items)
        }
    })
}

/// Reads a prefix byte and maps it to a tag kind, rejecting unknown prefixes
/// and the End marker.
fn read_kind<R: Read>(
    input: &mut TagInput<R>,
    context: &'static str,
) -> Result<TagKind, CTagError> {
    match input.read_u8()? {
        prefix::END => Err(CTagError::InvalidPrefix {
            prefix: prefix::END,
            context,
        }),
        b => TagKind::try_from(b),
    }
}

/// Reads a 16-bit length field; negative lengths are rejected.
fn decode_length<R: Read>(input: &mut TagInput<R>, kind: TagKind) -> Result<usize, CTagError> {
    let len = input.read_i16()?;
    usize::try_from(len).map_err(|_| CTagError::NegativeLength(len, kind))
}

fn decode_float(buf: &mut Bytes) -> f32 {
    f32::from_bits(buf.get_u32())
}

fn decode_double(buf: &mut Bytes) -> f64 {
    f64::from_bits(buf.get_u64())
}

/// Reads a length-prefixed run of fixed-width values in one read.
fn decode_fixed<R: Read, T>(
    input: &mut TagInput<R>,
    kind: TagKind,
    width: usize,
    get: impl Fn(&mut Bytes) -> T,
) -> Result<Vec<T>, CTagError> {
    let len = decode_length(input, kind)?;
    let mut data = input.read(len * width)?.into_bytes();
    Ok((0..len).map(|_| get(&mut data)).collect())
}

fn decode_string<R: Read>(input: &mut TagInput<R>) -> Result<String, CTagError> {
    let len = decode_length(input, TagKind::String)?;
    let data = input.read(len)?;
    Ok(String::from_utf8(data.as_bytes().to_vec())?)
}

/// Unpacks booleans eight per byte, most significant bit first.
fn decode_bool_array<R: Read>(input: &mut TagInput<R>) -> Result<Vec<bool>, CTagError> {
    let len = decode_length(input, TagKind::BooleanArray)?;
    let packed = input.read(len.div_ceil(8))?;
    let packed = packed.as_bytes();
    Ok((0..len)
        .map(|i| packed[i / 8] & (0x80 >> (i % 8)) != 0)
        .collect())
}

fn decode_array<R: Read>(input: &mut TagInput<R>) -> Result<Array, CTagError> {
    input.enter()?;
    let len = decode_length(input, TagKind::Array)?;
    let mut array = Array::with_capacity(len);
    for _ in 0..len {
        let kind = read_kind(input, "inside an array")?;
        array.push(decode_payload(input, kind)?)?;
    }
    input.leave();
    Ok(array)
}

/// Reads pairs until the End marker. A repeated key overwrites the earlier value.
fn decode_compound<R: Read>(input: &mut TagInput<R>) -> Result<Compound, CTagError> {
    input.enter()?;
    let mut compound = Compound::new();
    loop {
        let b = input.read_u8()?;
        if b == prefix::END {
            break;
        }
        let kind = TagKind::try_from(b)?;
        let key = decode_string(input)?;
        compound.put(key, decode_payload(input, kind)?)?;
    }
    input.leave();
    Ok(compound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::encode;
    use bytes::BytesMut;
    use std::io::Cursor;

    fn input(bytes: &[u8]) -> TagInput<Cursor<Vec<u8>>> {
        TagInput::new(Cursor::new(bytes.to_vec()))
    }

    /// Encode then decode a tag and verify round-trip.
    fn round_trip(tag: &Tag) -> Tag {
        let mut buf = BytesMut::new();
        encode::encode_value(&mut buf, tag).expect("encode failed");
        decode_document(&mut input(&buf)).expect("decode failed")
    }

    #[test]
    fn round_trip_scalars() {
        for tag in [
            Tag::Byte(i8::MIN),
            Tag::Short(i16::MIN),
            Tag::Integer(-123_456),
            Tag::Long(i64::MAX),
            Tag::Float(3.25),
            Tag::Double(-0.1),
            Tag::Boolean(true),
            Tag::Null,
            Tag::from("hello"),
        ] {
            assert_eq!(round_trip(&tag), tag);
        }
    }

    #[test]
    fn float_bit_patterns_survive() {
        let tag = round_trip(&Tag::Float(f32::NAN));
        assert!(tag.value::<f32>().unwrap().is_nan());
        let tag = round_trip(&Tag::Double(-0.0));
        assert_eq!(tag.value::<f64>().unwrap().to_bits(), (-0.0f64).to_bits());
        assert_eq!(round_trip(&Tag::Double(f64::INFINITY)), Tag::Double(f64::INFINITY));
    }

    #[test]
    fn round_trip_typed_arrays() {
        for tag in [
            Tag::ByteArray(vec![0, 0x7F, 0x80, 0xFF]),
            Tag::ShortArray(vec![i16::MIN, 0, i16::MAX]),
            Tag::IntegerArray(vec![1, -1]),
            Tag::LongArray(vec![]),
            Tag::FloatArray(vec![1.5, -2.0]),
            Tag::DoubleArray(vec![std::f64::consts::PI]),
            Tag::StringArray(vec!["Hüj".into(), String::new()]),
        ] {
            assert_eq!(round_trip(&tag), tag);
        }
    }

    #[test]
    fn round_trip_bool_arrays() {
        for n in [0usize, 1, 7, 8, 9, 15, 16] {
            let values: Vec<bool> = (0..n).map(|i| i % 3 == 0).collect();
            let tag = Tag::BooleanArray(values);
            assert_eq!(round_trip(&tag), tag, "length {n}");
        }
    }

    #[test]
    fn bool_array_reads_msb_first() {
        let mut input = input(&[0x00, 0x03, 0b0110_0000]);
        let tag = decode_payload(&mut input, TagKind::BooleanArray).unwrap();
        assert_eq!(tag, Tag::BooleanArray(vec![false, true, true]));
    }

    #[test]
    fn round_trip_nested() {
        let mut leaf = Array::new();
        leaf.push(1i32).unwrap().push(Tag::Null).unwrap();
        let mut compound = Compound::new();
        compound.put("leaf", leaf).unwrap();
        compound.put("name", "x").unwrap();
        let mut root = Array::new();
        root.push(compound).unwrap().push(Compound::new()).unwrap();

        let tag = Tag::Array(root);
        assert_eq!(round_trip(&tag), tag);
    }

    #[test]
    fn boolean_uses_low_bit() {
        let mut input = input(&[0xFE]);
        assert_eq!(
            decode_payload(&mut input, TagKind::Boolean).unwrap(),
            Tag::Boolean(false)
        );
    }

    #[test]
    fn end_marker_as_document() {
        assert!(matches!(
            decode_document(&mut input(&[0x00])),
            Err(CTagError::InvalidPrefix { prefix: 0, .. })
        ));
    }

    #[test]
    fn end_marker_in_array() {
        let bytes = [prefix::ARRAY, 0x00, 0x01, prefix::END];
        assert!(matches!(
            decode_document(&mut input(&bytes)),
            Err(CTagError::InvalidPrefix { prefix: 0, .. })
        ));
    }

    #[test]
    fn unknown_prefix() {
        assert!(matches!(
            decode_document(&mut input(&[20])),
            Err(CTagError::InvalidPrefix { prefix: 20, .. })
        ));
        let bytes = [prefix::COMPOUND, 0xAA, 0x00, 0x01, b'k'];
        assert!(matches!(
            decode_document(&mut input(&bytes)),
            Err(CTagError::InvalidPrefix { prefix: 0xAA, .. })
        ));
    }

    #[test]
    fn negative_lengths_rejected() {
        for kind in [
            TagKind::String,
            TagKind::Array,
            TagKind::ByteArray,
            TagKind::ShortArray,
            TagKind::IntegerArray,
            TagKind::LongArray,
            TagKind::FloatArray,
            TagKind::DoubleArray,
            TagKind::BooleanArray,
            TagKind::StringArray,
        ] {
            let bytes = [kind.prefix(), 0xFF, 0xFF];
            assert!(
                matches!(
                    decode_document(&mut input(&bytes)),
                    Err(CTagError::NegativeLength(-1, k)) if k == kind
                ),
                "{kind}"
            );
        }
    }

    #[test]
    fn negative_compound_key_length() {
        let bytes = [prefix::COMPOUND, prefix::BYTE, 0x80, 0x00];
        assert!(matches!(
            decode_document(&mut input(&bytes)),
            Err(CTagError::NegativeLength(i16::MIN, TagKind::String))
        ));
    }

    #[test]
    fn truncated_integer() {
        let bytes = [prefix::INTEGER, 0x00, 0x01];
        assert!(matches!(
            decode_document(&mut input(&bytes)),
            Err(CTagError::EndOfInput { needed: 4, read: 2 })
        ));
    }

    #[test]
    fn unterminated_compound() {
        let bytes = [prefix::COMPOUND, prefix::BYTE, 0x00, 0x01, b'a', 0x05];
        assert!(matches!(
            decode_document(&mut input(&bytes)),
            Err(CTagError::EndOfInput { .. })
        ));
    }

    #[test]
    fn duplicate_keys_overwrite() {
        let bytes = [
            prefix::COMPOUND,
            prefix::INTEGER, 0x00, 0x01, b'a', 0x00, 0x00, 0x00, 0x01,
            prefix::INTEGER, 0x00, 0x01, b'a', 0x00, 0x00, 0x00, 0x02,
            prefix::END,
        ];
        let tag = decode_document(&mut input(&bytes)).unwrap();
        let compound = tag.value::<Compound>().unwrap();
        assert_eq!(compound.len(), 1);
        assert_eq!(*compound.get_as::<i32>("a").unwrap(), 2);
    }

    #[test]
    fn invalid_utf8_rejected() {
        let bytes = [prefix::STRING, 0x00, 0x02, 0xC3, 0x28];
        assert!(matches!(
            decode_document(&mut input(&bytes)),
            Err(CTagError::InvalidUtf8(_))
        ));
    }

    #[test]
    fn nesting_limit() {
        // Three nested single-element arrays, innermost empty.
        let bytes = [
            prefix::ARRAY, 0x00, 0x01,
            prefix::ARRAY, 0x00, 0x01,
            prefix::ARRAY, 0x00, 0x00,
        ];
        assert!(decode_document(&mut input(&bytes)).is_ok());

        let mut shallow = input(&bytes).with_max_depth(2);
        assert!(matches!(
            decode_document(&mut shallow),
            Err(CTagError::DepthLimitExceeded(2))
        ));
    }
}
