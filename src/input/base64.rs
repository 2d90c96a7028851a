//! Streaming base64 decoding over a byte source.

use std::io::{self, Read};

use crate::binary::base64::{decode_group, single_symbol};
use crate::error::CTagError;

/// Decodes base64 text from an underlying [`Read`] as it is consumed.
///
/// Each refill pulls up to four symbols from the source and caches the up to
/// three bytes they decode to, so a document can be decoded without
/// materialising the whole binary first.
pub struct Base64Reader<R> {
    source: R,
    decoded: Vec<u8>,
    offset: usize,
    symbols: usize,
    exhausted: bool,
}

impl<R: Read> Base64Reader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            decoded: Vec::with_capacity(3),
            offset: 0,
            symbols: 0,
            exhausted: false,
        }
    }

    /// Returns the underlying source.
    pub fn into_inner(self) -> R {
        self.source
    }

    /// Decodes the next group of symbols. Returns `false` once the source is drained.
    fn refill(&mut self) -> io::Result<bool> {
        if self.exhausted {
            return Ok(false);
        }

        let mut group = [0u8; 4];
        let mut len = 0;
        while len < group.len() {
            match self.source.read(&mut group[len..]) {
                Ok(0) => {
                    self.exhausted = true;
                    break;
                }
                Ok(k) => len += k,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }

        self.symbols += len;
        if self.symbols == 1 && self.exhausted {
            return Err(invalid_data(single_symbol()));
        }

        self.decoded.clear();
        self.offset = 0;
        decode_group(&group[..len], &mut self.decoded).map_err(invalid_data)?;
        tracing::trace!(symbols = len, bytes = self.decoded.len(), "base64 refill");
        Ok(!self.decoded.is_empty())
    }
}

fn invalid_data(err: CTagError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, err)
}

impl<R: Read> Read for Base64Reader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.offset == self.decoded.len() && !self.refill()? {
            return Ok(0);
        }
        let pending = &self.decoded[self.offset..];
        let n = pending.len().min(buf.len());
        buf[..n].copy_from_slice(&pending[..n]);
        self.offset += n;
        Ok(n)
    }
}
