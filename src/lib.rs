//! CTag: a pure-Rust implementation of the CTag binary tag format.
//!
//! CTag encodes JSON-like nested data (scalars, heterogeneous arrays,
//! string-keyed compounds and homogeneous primitive arrays) into a compact,
//! type-prefixed byte stream, optionally carried as base64 text.
//!
//! # Architecture
//!
//! - **`binary`**: Immutable byte buffers, chunk builder and base64 text form
//! - **`input`**: Exact-count byte cursor and streaming base64 source
//! - **`types`**: The `Tag` variant family, `Array` and `Compound`
//! - **`wire`**: Prefix table and per-variant payload encoding/decoding
//! - **`encoder`** / **`decoder`**: Whole-document drivers
//!
//! # Example
//!
//! ```
//! use ctag::{CTagDecoder, CTagEncoder, Compound, Tag};
//!
//! let mut compound = Compound::new();
//! compound.put("name", "Hüj").unwrap();
//! compound.put("scores", vec![3i32, 5, 8]).unwrap();
//! let tag = Tag::Compound(compound);
//!
//! let text = CTagEncoder::new(&tag).encode_to_base64().unwrap();
//! let decoded = CTagDecoder::from_base64(&text).unwrap().decode().unwrap();
//! assert_eq!(decoded, tag);
//! ```

pub mod binary;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod input;
pub mod types;
pub mod wire;

pub use binary::{Binary, Builder};
pub use decoder::CTagDecoder;
pub use encoder::CTagEncoder;
pub use error::CTagError;
pub use input::{Base64Reader, TagInput};
pub use types::{Array, Compound, KeyValuePair, Tag, TagKind, TagValue};

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(tag: &Tag) -> Tag {
        let binary = CTagEncoder::new(tag).encode().expect("encode failed");
        CTagDecoder::from_binary(&binary)
            .decode()
            .expect("decode failed")
    }

    #[test]
    fn string_array_document() {
        let tag = Tag::StringArray(vec!["Hüj".into(), "Tëst".into()]);
        let binary = CTagEncoder::new(&tag).encode().unwrap();
        assert_eq!(binary.byte_at(0).unwrap(), 0x13);

        let text = binary.to_base64();
        let decoded = CTagDecoder::from_base64(&text).unwrap().decode().unwrap();
        let strings = decoded.value::<Vec<String>>().unwrap();
        assert_eq!(strings, &["Hüj", "Tëst"]);
    }

    #[test]
    fn every_variant_round_trips() {
        let tags = vec![
            Tag::Byte(-5),
            Tag::Short(300),
            Tag::Integer(i32::MIN),
            Tag::Long(1 << 40),
            Tag::Float(0.25),
            Tag::Double(1e300),
            Tag::from("text"),
            Tag::Null,
            Tag::Boolean(false),
            Tag::ByteArray(vec![1, 2, 3]),
            Tag::ShortArray(vec![-1, 1]),
            Tag::IntegerArray(vec![0; 10]),
            Tag::LongArray(vec![i64::MIN]),
            Tag::FloatArray(vec![f32::MAX]),
            Tag::DoubleArray(vec![f64::MIN_POSITIVE]),
            Tag::BooleanArray(vec![true; 9]),
            Tag::StringArray(vec![]),
            Tag::Array(Array::new()),
            Tag::Compound(Compound::new()),
        ];
        for tag in &tags {
            assert_eq!(&round_trip(tag), tag, "{}", tag.kind());
        }

        // The same values as elements of an array and a compound.
        let array = Array::try_from(tags.clone()).unwrap();
        let wrapped = Tag::Array(array);
        assert_eq!(round_trip(&wrapped), wrapped);

        let mut compound = Compound::new();
        for tag in tags {
            compound.put(tag.kind().name(), tag).unwrap();
        }
        let wrapped = Tag::Compound(compound);
        assert_eq!(round_trip(&wrapped), wrapped);
    }

    #[test]
    fn array_of_compound_of_array() {
        let mut numbers = Array::new();
        numbers.extend([1i32, 2, 3]).unwrap();
        let mut record = Compound::new();
        record.put("numbers", numbers).unwrap();
        record.put("label", "row").unwrap();
        let mut rows = Array::new();
        rows.push(record.clone()).unwrap().push(record).unwrap();

        let tag = Tag::Array(rows);
        let decoded = round_trip(&tag);
        assert_eq!(decoded, tag);

        let rows = decoded.value::<Array>().unwrap();
        let first = rows.get_as::<Compound>(0).unwrap();
        assert_eq!(*first.get_as::<Array>("numbers").unwrap().get_as::<i32>(2).unwrap(), 3);
    }

    #[test]
    fn duplicate_put_keeps_last() {
        let mut compound = Compound::new();
        compound.put("a", 1i32).unwrap();
        compound.put("a", 2i32).unwrap();
        let decoded = round_trip(&Tag::Compound(compound));

        let compound = decoded.value::<Compound>().unwrap();
        let pairs = compound.pairs();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].key, "a");
        assert_eq!(pairs[0].value, &Tag::Integer(2));
    }

    #[test]
    fn boolean_array_packed_sizes() {
        for n in [0usize, 1, 7, 8, 9, 15, 16] {
            let tag = Tag::BooleanArray((0..n).map(|i| i % 2 == 0).collect());
            let payload = tag.encode().unwrap();
            assert_eq!(payload.len(), 2 + n.div_ceil(8), "length {n}");
            assert_eq!(round_trip(&tag), tag);
        }
        let payload = Tag::BooleanArray(vec![true, true, false, true]).encode().unwrap();
        assert_eq!(payload.byte_at(2).unwrap(), 0b1101_0000);
    }

    #[test]
    fn base64_lengths_round_trip() {
        let data: Vec<u8> = (0..100).map(|i: u32| (i * 7 + 3) as u8).collect();
        for len in [0, 1, 2, 3, 4, 100] {
            let binary = Binary::from_bytes(data[..len].to_vec());
            let text = binary.to_base64();
            assert_eq!(Binary::from_base64(&text).unwrap(), binary, "length {len}");
        }
        assert!(matches!(Binary::from_base64("Q"), Err(CTagError::Base64Format(_))));
    }

    #[test]
    fn negative_length_on_validating_variant() {
        let bytes = [TagKind::LongArray.prefix(), 0xFF, 0xFF];
        assert!(matches!(
            CTagDecoder::from_bytes(bytes.to_vec()).decode(),
            Err(CTagError::NegativeLength(-1, TagKind::LongArray))
        ));
    }

    #[test]
    fn end_marker_rejections() {
        assert!(matches!(Array::new().push(Tag::End), Err(CTagError::InvalidElement)));
        assert!(matches!(
            Compound::new().put("k", Tag::End),
            Err(CTagError::InvalidElement)
        ));
        assert!(matches!(
            CTagDecoder::from_bytes(vec![0u8]).decode(),
            Err(CTagError::InvalidPrefix { prefix: 0, .. })
        ));
    }

    #[test]
    fn unknown_prefix_document() {
        assert!(matches!(
            CTagDecoder::from_bytes(vec![20u8, 0, 0]).decode(),
            Err(CTagError::InvalidPrefix { prefix: 20, .. })
        ));
    }

    #[test]
    fn truncated_integer_payload() {
        let binary = CTagEncoder::new(&Tag::Integer(0x0A0B0C0D)).encode().unwrap();
        let truncated = binary.as_bytes()[..3].to_vec();
        assert!(matches!(
            CTagDecoder::from_bytes(truncated).decode(),
            Err(CTagError::EndOfInput { needed: 4, read: 2 })
        ));
    }

    #[test]
    fn streaming_base64_matches_buffered() {
        let mut compound = Compound::new();
        compound.put("blob", vec![0xABu8; 50]).unwrap();
        compound.put("bits", vec![true, false, true, true, false]).unwrap();
        let tag = Tag::Compound(compound);
        let text = CTagEncoder::new(&tag).encode_to_base64().unwrap();

        let streamed = CTagDecoder::from_base64_reader(text.as_bytes())
            .decode()
            .unwrap();
        assert_eq!(streamed, tag);
    }

    #[test]
    fn typed_set_value() {
        let mut tag = Tag::Integer(1);
        tag.set_value(5i32).unwrap();
        assert!(matches!(
            tag.set_value("nope".to_string()),
            Err(CTagError::WrongVariant {
                expected: TagKind::String,
                found: TagKind::Integer
            })
        ));
        assert_eq!(round_trip(&tag), Tag::Integer(5));
    }
}
