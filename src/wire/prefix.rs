//! CTag prefix byte constants.

// Compound terminator; never a standalone tag.
pub const END: u8 = 0;

// Scalars (big-endian two's complement / IEEE 754 bit patterns)
pub const BYTE: u8 = 1;
pub const SHORT: u8 = 2;
pub const INTEGER: u8 = 3;
pub const LONG: u8 = 4;
pub const FLOAT: u8 = 5;
pub const DOUBLE: u8 = 6;

// 2-byte signed length + UTF-8 bytes
pub const STRING: u8 = 7;

// Containers
// ARRAY: 2-byte count, then prefix + payload per element
// COMPOUND: (prefix, key string, payload)* then END
pub const ARRAY: u8 = 8;
pub const COMPOUND: u8 = 9;

pub const NULL: u8 = 10;
pub const BOOLEAN: u8 = 11;

// Homogeneous arrays: 2-byte count, then bare payloads
pub const BYTE_ARRAY: u8 = 12;
pub const SHORT_ARRAY: u8 = 13;
pub const INTEGER_ARRAY: u8 = 14;
pub const LONG_ARRAY: u8 = 15;
pub const FLOAT_ARRAY: u8 = 16;
pub const DOUBLE_ARRAY: u8 = 17;
// Bit-packed, most significant bit first
pub const BOOLEAN_ARRAY: u8 = 18;
pub const STRING_ARRAY: u8 = 19;
