//! Ordered, heterogeneous sequence of tags.

use std::fmt;

use super::tag::write_block;
use super::{Tag, TagKind, TagValue};
use crate::error::CTagError;

/// Largest element count representable in the 16-bit length field.
pub const MAX_LEN: usize = i16::MAX as usize;

/// An ordered, index-addressable sequence of [`Tag`]s.
///
/// Elements may be of different variants. The End marker is never accepted,
/// and the length never exceeds [`MAX_LEN`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Array {
    tags: Vec<Tag>,
}

impl Array {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tags: Vec::with_capacity(capacity.min(MAX_LEN)),
        }
    }

    /// Appends a tag at the end.
    pub fn push(&mut self, tag: impl Into<Tag>) -> Result<&mut Self, CTagError> {
        let tag = check_element(tag.into())?;
        self.check_room()?;
        self.tags.push(tag);
        Ok(self)
    }

    /// Inserts a tag at `index`, shifting later elements. `index` may equal the length.
    pub fn insert(&mut self, index: usize, tag: impl Into<Tag>) -> Result<&mut Self, CTagError> {
        if index > self.tags.len() {
            return Err(self.out_of_range(index));
        }
        let tag = check_element(tag.into())?;
        self.check_room()?;
        self.tags.insert(index, tag);
        Ok(self)
    }

    /// Replaces the tag at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, tag: impl Into<Tag>) -> Result<Tag, CTagError> {
        let tag = check_element(tag.into())?;
        let len = self.tags.len();
        let slot = self
            .tags
            .get_mut(index)
            .ok_or(CTagError::IndexOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, tag))
    }

    /// Appends every tag, stopping at the first rejected one.
    pub fn extend<I>(&mut self, tags: I) -> Result<&mut Self, CTagError>
    where
        I: IntoIterator,
        I::Item: Into<Tag>,
    {
        for tag in tags {
            self.push(tag)?;
        }
        Ok(self)
    }

    pub fn get(&self, index: usize) -> Result<&Tag, CTagError> {
        self.tags.get(index).ok_or(self.out_of_range(index))
    }

    /// Borrows the value at `index` as `T`, failing if the variant differs.
    pub fn get_as<T: TagValue>(&self, index: usize) -> Result<&T, CTagError> {
        self.get(index)?.value::<T>()
    }

    /// Mutably borrows the value at `index` as `T`. The variant cannot change;
    /// use [`Array::set`] to replace the tag itself.
    pub fn get_mut_as<T: TagValue>(&mut self, index: usize) -> Result<&mut T, CTagError> {
        let err = self.out_of_range(index);
        self.tags.get_mut(index).ok_or(err)?.value_mut::<T>()
    }

    /// Removes and returns the tag at `index`.
    pub fn remove(&mut self, index: usize) -> Result<Tag, CTagError> {
        if index >= self.tags.len() {
            return Err(self.out_of_range(index));
        }
        Ok(self.tags.remove(index))
    }

    /// Element count as carried on the wire.
    pub fn size(&self) -> i16 {
        // Mutators keep the length within MAX_LEN.
        self.tags.len() as i16
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.tags.iter()
    }

    pub fn as_slice(&self) -> &[Tag] {
        &self.tags
    }

    fn check_room(&self) -> Result<(), CTagError> {
        if self.tags.len() >= MAX_LEN {
            return Err(CTagError::LengthOverflow(self.tags.len() + 1));
        }
        Ok(())
    }

    fn out_of_range(&self, index: usize) -> CTagError {
        CTagError::IndexOutOfRange {
            index,
            len: self.tags.len(),
        }
    }
}

pub(super) fn check_element(tag: Tag) -> Result<Tag, CTagError> {
    if tag.is_end() {
        return Err(CTagError::InvalidElement);
    }
    Ok(tag)
}

impl TryFrom<Vec<Tag>> for Array {
    type Error = CTagError;

    fn try_from(tags: Vec<Tag>) -> Result<Self, Self::Error> {
        if tags.iter().any(Tag::is_end) {
            return Err(CTagError::InvalidElement);
        }
        if tags.len() > MAX_LEN {
            return Err(CTagError::LengthOverflow(tags.len()));
        }
        Ok(Self { tags })
    }
}

impl IntoIterator for Array {
    type Item = Tag;
    type IntoIter = std::vec::IntoIter<Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.into_iter()
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

impl fmt::Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_block(f, TagKind::Array, '[', ']', self.tags.iter().enumerate())
    }
}
