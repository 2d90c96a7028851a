//! Error types for CTag encoding and decoding.

use std::io;

use crate::types::TagKind;

/// Errors that can occur while building, encoding or decoding CTag data.
#[derive(Debug, thiserror::Error)]
pub enum CTagError {
    #[error("invalid base64: {0}")]
    Base64Format(String),

    #[error("end of input: needed {needed} bytes, source ended after {read}")]
    EndOfInput { needed: usize, read: usize },

    #[error("invalid prefix 0x{prefix:02X} {context}")]
    InvalidPrefix { prefix: u8, context: &'static str },

    #[error("negative length {0} in {1} payload")]
    NegativeLength(i16, TagKind),

    #[error("length {0} does not fit a 16-bit length field")]
    LengthOverflow(usize),

    #[error("no such key: {0:?}")]
    NoSuchKey(String),

    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("wrong tag variant: expected {expected}, found {found}")]
    WrongVariant { expected: TagKind, found: TagKind },

    #[error("End marker is not a valid element")]
    InvalidElement,

    #[error("invalid UTF-8 string: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("nesting deeper than {0} levels")]
    DepthLimitExceeded(usize),

    #[error("I/O error: {0}")]
    Io(#[source] io::Error),
}

/// Byte-source errors that carry a `CTagError` (as raised by
/// [`Base64Reader`](crate::input::Base64Reader)) are unwrapped back into it.
impl From<io::Error> for CTagError {
    fn from(err: io::Error) -> Self {
        let wraps_ctag = err.get_ref().is_some_and(|inner| inner.is::<CTagError>());
        if !wraps_ctag {
            return Self::Io(err);
        }
        let kind = err.kind();
        match err.into_inner().map(|inner| inner.downcast::<CTagError>()) {
            Some(Ok(inner)) => *inner,
            Some(Err(other)) => Self::Io(io::Error::new(kind, other)),
            None => Self::Io(kind.into()),
        }
    }
}

impl CTagError {
    /// Wraps any displayable message as a base64 format error.
    pub fn base64(msg: impl std::fmt::Display) -> Self {
        Self::Base64Format(msg.to_string())
    }

    /// Builds the error for a tag read while the caller expected another variant.
    pub(crate) fn wrong_variant(expected: TagKind, found: TagKind) -> Self {
        Self::WrongVariant { expected, found }
    }
}
