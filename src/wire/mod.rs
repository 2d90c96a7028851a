//! CTag binary wire format.
//!
//! Every tag is a one-byte prefix followed by its payload. Multi-byte numbers
//! are big-endian; lengths are 16-bit signed integers.

pub mod decode;
pub mod encode;
pub mod prefix;

pub use decode::{decode_document, decode_payload};
pub use encode::{encode_payload, encode_value};
