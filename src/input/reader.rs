//! Exact-count byte cursor over a synchronous byte source.

use std::io::{ErrorKind, Read};

use bytes::Buf;

use crate::binary::Binary;
use crate::error::CTagError;

/// Default maximum container nesting accepted while decoding.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Reads exact byte counts from an underlying [`Read`] source.
///
/// A read either yields all requested bytes or fails with
/// [`CTagError::EndOfInput`]; partial results are never returned.
pub struct TagInput<R> {
    reader: R,
    position: usize,
    depth: usize,
    max_depth: usize,
}

impl<R: Read> TagInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            position: 0,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the maximum container nesting accepted while decoding.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.set_max_depth(max_depth);
        self
    }

    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Reads exactly `n` bytes.
    pub fn read(&mut self, n: usize) -> Result<Binary, CTagError> {
        let mut data = vec![0u8; n];
        let mut filled = 0;
        while filled < n {
            match self.reader.read(&mut data[filled..]) {
                Ok(0) => {
                    return Err(CTagError::EndOfInput {
                        needed: n,
                        read: filled,
                    });
                }
                Ok(k) => filled += k,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        self.position += n;
        Ok(Binary::from(data))
    }

    pub fn read_u8(&mut self) -> Result<u8, CTagError> {
        Ok(self.read(1)?.into_bytes().get_u8())
    }

    pub fn read_i8(&mut self) -> Result<i8, CTagError> {
        Ok(self.read(1)?.into_bytes().get_i8())
    }

    pub fn read_i16(&mut self) -> Result<i16, CTagError> {
        Ok(self.read(2)?.into_bytes().get_i16())
    }

    pub fn read_i32(&mut self) -> Result<i32, CTagError> {
        Ok(self.read(4)?.into_bytes().get_i32())
    }

    pub fn read_i64(&mut self) -> Result<i64, CTagError> {
        Ok(self.read(8)?.into_bytes().get_i64())
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Enters one level of container nesting.
    pub(crate) fn enter(&mut self) -> Result<(), CTagError> {
        if self.depth >= self.max_depth {
            return Err(CTagError::DepthLimitExceeded(self.max_depth));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(crate) fn reset_depth(&mut self) {
        self.depth = 0;
    }

    /// Returns the underlying source.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Releases the underlying source.
    pub fn close(self) {
        drop(self.reader);
    }
}
