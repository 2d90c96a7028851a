//! Byte sources for decoding: the exact-count cursor and streaming base64.

pub mod base64;
pub mod reader;

pub use self::base64::Base64Reader;
pub use reader::{DEFAULT_MAX_DEPTH, TagInput};
