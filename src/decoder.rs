//! Decodes CTag documents from byte sources.

use std::io::Read;

use bytes::{Buf, Bytes};

use crate::binary::Binary;
use crate::error::CTagError;
use crate::input::{Base64Reader, TagInput};
use crate::types::Tag;
use crate::wire;

/// Byte source used for in-memory documents.
pub type MemorySource = bytes::buf::Reader<Bytes>;

/// Decodes one [`Tag`] document at a time from a byte source.
///
/// The decoder owns its source; dropping or [closing](CTagDecoder::close)
/// it releases the source.
pub struct CTagDecoder<R> {
    input: TagInput<R>,
}

impl<R: Read> CTagDecoder<R> {
    /// Decodes from any synchronous byte source.
    pub fn new(reader: R) -> Self {
        Self::from_input(TagInput::new(reader))
    }

    pub fn from_input(input: TagInput<R>) -> Self {
        Self { input }
    }

    /// Sets the maximum container nesting accepted while decoding.
    pub fn max_depth(mut self, limit: usize) -> Self {
        self.input.set_max_depth(limit);
        self
    }

    /// Decodes the next document: one prefix byte and its payload.
    pub fn decode(&mut self) -> Result<Tag, CTagError> {
        let start = self.input.position();
        let tag = wire::decode_document(&mut self.input)?;
        tracing::debug!(
            kind = %tag.kind(),
            bytes = self.input.position() - start,
            "decoded CTag document"
        );
        Ok(tag)
    }

    /// Returns the underlying source.
    pub fn into_inner(self) -> R {
        self.input.into_inner()
    }

    /// Releases the underlying source.
    pub fn close(self) {
        self.input.close();
    }
}

impl CTagDecoder<MemorySource> {
    /// Decodes from raw bytes.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        let bytes: Bytes = bytes.into();
        Self::new(bytes.reader())
    }

    pub fn from_binary(binary: &Binary) -> Self {
        Self::from_bytes(binary)
    }

    /// Decodes from base64 text; the text is converted to binary up front.
    pub fn from_base64(text: &str) -> Result<Self, CTagError> {
        Ok(Self::from_binary(&Binary::from_base64(text)?))
    }
}

impl<R: Read> CTagDecoder<Base64Reader<R>> {
    /// Decodes from a source of base64 text, converting it as it is read.
    pub fn from_base64_reader(source: R) -> Self {
        Self::new(Base64Reader::new(source))
    }
}

/// Decodes a single document from `reader`, releasing it afterwards.
pub fn decode<R: Read>(reader: R) -> Result<Tag, CTagError> {
    CTagDecoder::new(reader).decode()
}
