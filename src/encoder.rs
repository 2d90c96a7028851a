//! Encodes a root tag into a CTag document.

use crate::binary::Binary;
use crate::error::CTagError;
use crate::types::Tag;

/// Encodes one root [`Tag`] as its prefix byte followed by its payload.
pub struct CTagEncoder<'a> {
    tag: &'a Tag,
}

impl<'a> CTagEncoder<'a> {
    pub fn new(tag: &'a Tag) -> Self {
        Self { tag }
    }

    /// The root tag this encoder writes.
    pub fn tag(&self) -> &'a Tag {
        self.tag
    }

    pub fn encode(&self) -> Result<Binary, CTagError> {
        let mut builder = Binary::builder();
        builder.append(self.tag.encode()?);
        builder.prepend(self.tag.prefix());
        let binary = builder.build();
        tracing::debug!(kind = %self.tag.kind(), bytes = binary.len(), "encoded CTag document");
        Ok(binary)
    }

    /// Encodes the document and renders it as base64 text.
    pub fn encode_to_base64(&self) -> Result<String, CTagError> {
        Ok(self.encode()?.to_base64())
    }
}

/// Encodes `tag` as a standalone document.
pub fn encode(tag: &Tag) -> Result<Binary, CTagError> {
    CTagEncoder::new(tag).encode()
}
