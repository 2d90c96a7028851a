//! Immutable byte sequences and their textual forms.

pub(crate) mod base64;

use std::collections::VecDeque;
use std::fmt;

use bytes::{Bytes, BytesMut};

use crate::error::CTagError;

pub use self::base64::{ALPHABET, decode_base64, encode_base64};

/// An immutable sequence of bytes holding encoded CTag data.
///
/// Cloning is cheap: the underlying storage is reference counted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Binary {
    bytes: Bytes,
}

impl Binary {
    /// Creates an empty binary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a binary holding a single byte.
    pub fn from_byte(b: u8) -> Self {
        Self {
            bytes: Bytes::copy_from_slice(&[b]),
        }
    }

    /// Creates a binary from any owned or static byte storage.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Parses base64 text (alphabet `A-Za-z0-9+-`, no padding).
    pub fn from_base64(text: &str) -> Result<Self, CTagError> {
        decode_base64(text).map(Self::from_bytes)
    }

    /// Starts a builder for assembling a binary from chunks.
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Returns the byte at `index`.
    pub fn byte_at(&self, index: usize) -> Result<u8, CTagError> {
        self.bytes
            .get(index)
            .copied()
            .ok_or(CTagError::IndexOutOfRange {
                index,
                len: self.bytes.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the binary, returning the shared byte storage.
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    /// Encodes the binary as base64 text, decodable by [`Binary::from_base64`].
    pub fn to_base64(&self) -> String {
        encode_base64(&self.bytes)
    }

    /// Renders each byte as two lowercase hex digits, space separated.
    pub fn to_hex_string(&self) -> String {
        self.bytes
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl AsRef<[u8]> for Binary {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Binary> for Bytes {
    fn from(b: Binary) -> Self {
        b.bytes
    }
}

impl From<&Binary> for Bytes {
    fn from(b: &Binary) -> Self {
        b.bytes.clone()
    }
}

impl From<Vec<u8>> for Binary {
    fn from(v: Vec<u8>) -> Self {
        Self::from_bytes(v)
    }
}

impl From<BytesMut> for Binary {
    fn from(b: BytesMut) -> Self {
        Self::from_bytes(b.freeze())
    }
}

/// Renders each byte as eight binary digits, space separated.
impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.bytes.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{b:08b}")?;
        }
        Ok(())
    }
}

/// Assembles a [`Binary`] from appended and prepended chunks.
///
/// Chunks are kept as-is until [`Builder::build`] concatenates them.
#[derive(Debug, Default, Clone)]
pub struct Builder {
    chunks: VecDeque<Bytes>,
    len: usize,
}

impl Builder {
    /// Adds a chunk after everything accumulated so far.
    pub fn append(&mut self, chunk: impl Into<Bytes>) -> &mut Self {
        let chunk = chunk.into();
        self.len += chunk.len();
        self.chunks.push_back(chunk);
        self
    }

    /// Adds a chunk before everything accumulated so far.
    pub fn prepend(&mut self, chunk: impl Into<Bytes>) -> &mut Self {
        let chunk = chunk.into();
        self.len += chunk.len();
        self.chunks.push_front(chunk);
        self
    }

    /// Total number of bytes accumulated.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn build(&self) -> Binary {
        let mut buf = BytesMut::with_capacity(self.len);
        for chunk in &self.chunks {
            buf.extend_from_slice(chunk);
        }
        Binary::from(buf)
    }
}
