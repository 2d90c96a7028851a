//! CTag encoding: `Tag` → bytes.

use bytes::{BufMut, BytesMut};

use super::prefix;
use crate::error::CTagError;
use crate::types::{Array, Compound, KeyValuePair, Tag};

/// Largest length representable in a 16-bit signed length field.
const MAX_LENGTH: usize = i16::MAX as usize;

/// Encodes a tag as its prefix byte followed by its payload.
pub fn encode_value(buf: &mut BytesMut, tag: &Tag) -> Result<(), CTagError> {
    buf.put_u8(tag.kind().prefix());
    encode_payload(buf, tag)
}

/// Encodes the payload of a tag, without its prefix.
pub fn encode_payload(buf: &mut BytesMut, tag: &Tag) -> Result<(), CTagError> {
    match tag {
        Tag::End | Tag::Null => {}
        Tag::Byte(v) => buf.put_i8(*v),
        Tag::Short(v) => buf.put_i16(*v),
        Tag::Integer(v) => buf.put_i32(*v),
        Tag::Long(v) => buf.put_i64(*v),
        Tag::Float(v) => encode_float(buf, *v),
        Tag::Double(v) => encode_double(buf, *v),
        Tag::Boolean(v) => buf.put_u8(u8::from(*v)),
        Tag::String(s) => encode_string(buf, s)?,
        Tag::Array(a) => encode_array(buf, a)?,
        Tag::Compound(c) => encode_compound(buf, c)?,
        Tag::ByteArray(v) => {
            encode_length(buf, v.len())?;
            buf.put_slice(v);
        }
        Tag::ShortArray(v) => {
            encode_length(buf, v.len())?;
            v.iter().for_each(|x| buf.put_i16(*x));
        }
        Tag::IntegerArray(v) => {
            encode_length(buf, v.len())?;
            v.iter().for_each(|x| buf.put_i32(*x));
        }
        Tag::LongArray(v) => {
            encode_length(buf, v.len())?;
            v.iter().for_each(|x| buf.put_i64(*x));
        }
        Tag::FloatArray(v) => {
            encode_length(buf, v.len())?;
            v.iter().for_each(|x| encode_float(buf, *x));
        }
        Tag::DoubleArray(v) => {
            encode_length(buf, v.len())?;
            v.iter().for_each(|x| encode_double(buf, *x));
        }
        Tag::BooleanArray(v) => encode_bool_array(buf, v)?,
        Tag::StringArray(v) => {
            encode_length(buf, v.len())?;
            for s in v {
                encode_string(buf, s)?;
            }
        }
    }
    Ok(())
}

/// Writes a 16-bit signed length field.
pub fn encode_length(buf: &mut BytesMut, len: usize) -> Result<(), CTagError> {
    if len > MAX_LENGTH {
        return Err(CTagError::LengthOverflow(len));
    }
    buf.put_i16(len as i16);
    Ok(())
}

/// IEEE 754 single-precision bit pattern, big-endian.
pub fn encode_float(buf: &mut BytesMut, value: f32) {
    buf.put_u32(value.to_bits());
}

/// IEEE 754 double-precision bit pattern, big-endian.
pub fn encode_double(buf: &mut BytesMut, value: f64) {
    buf.put_u64(value.to_bits());
}

/// Encodes a string (length = UTF-8 byte count, not char count).
pub fn encode_string(buf: &mut BytesMut, value: &str) -> Result<(), CTagError> {
    encode_length(buf, value.len())?;
    buf.put_slice(value.as_bytes());
    Ok(())
}

/// Encodes the element count, then each element's prefix and payload.
pub fn encode_array(buf: &mut BytesMut, array: &Array) -> Result<(), CTagError> {
    encode_length(buf, array.len())?;
    for tag in array {
        encode_value(buf, tag)?;
    }
    Ok(())
}

/// Encodes all pairs in the map's iteration order, then the End terminator.
pub fn encode_compound(buf: &mut BytesMut, compound: &Compound) -> Result<(), CTagError> {
    for pair in compound.pairs() {
        encode_pair(buf, &pair)?;
    }
    buf.put_u8(prefix::END);
    Ok(())
}

/// Encodes one compound entry: value prefix, key string, value payload.
pub fn encode_pair(buf: &mut BytesMut, pair: &KeyValuePair<'_>) -> Result<(), CTagError> {
    buf.put_u8(pair.value.kind().prefix());
    encode_string(buf, pair.key)?;
    encode_payload(buf, pair.value)
}

/// Packs booleans eight per byte, first value in the most significant bit.
///
/// A trailing partial byte is zero-padded in its low bits.
pub fn encode_bool_array(buf: &mut BytesMut, values: &[bool]) -> Result<(), CTagError> {
    encode_length(buf, values.len())?;
    let mut bits = 0u8;
    for (i, &value) in values.iter().enumerate() {
        if value {
            bits |= 0x80 >> (i % 8);
        }
        if i % 8 == 7 {
            buf.put_u8(bits);
            bits = 0;
        }
    }
    if values.len() % 8 != 0 {
        buf.put_u8(bits);
    }
    Ok(())
}
