//! String-keyed map of tags.

use std::collections::HashMap;
use std::collections::hash_map;
use std::fmt;

use super::array::check_element;
use super::tag::write_block;
use super::{Tag, TagKind, TagValue};
use crate::error::CTagError;

/// A string-keyed map of [`Tag`]s.
///
/// Keys are unique and iteration order carries no meaning. The End marker is
/// never accepted as a value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compound {
    entries: HashMap<String, Tag>,
}

/// A borrowed `(key, value)` entry of a [`Compound`], as written on the wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyValuePair<'a> {
    pub key: &'a str,
    pub value: &'a Tag,
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the value under `key`, returning the previous one.
    pub fn put(
        &mut self,
        key: impl Into<String>,
        tag: impl Into<Tag>,
    ) -> Result<Option<Tag>, CTagError> {
        let tag = check_element(tag.into())?;
        Ok(self.entries.insert(key.into(), tag))
    }

    /// Inserts every pair, stopping at the first rejected one.
    pub fn extend<I, K, V>(&mut self, pairs: I) -> Result<&mut Self, CTagError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Tag>,
    {
        for (key, tag) in pairs {
            self.put(key, tag)?;
        }
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Result<&Tag, CTagError> {
        self.entries
            .get(key)
            .ok_or_else(|| CTagError::NoSuchKey(key.to_owned()))
    }

    /// Returns the value under `key`, if any.
    pub fn opt(&self, key: &str) -> Option<&Tag> {
        self.entries.get(key)
    }

    /// Borrows the value under `key` as `T`.
    pub fn get_as<T: TagValue>(&self, key: &str) -> Result<&T, CTagError> {
        self.get(key)?.value::<T>()
    }

    /// Mutably borrows the value under `key` as `T`. The variant cannot change;
    /// use [`Compound::put`] to replace the tag itself.
    pub fn get_mut_as<T: TagValue>(&mut self, key: &str) -> Result<&mut T, CTagError> {
        self.entries
            .get_mut(key)
            .ok_or_else(|| CTagError::NoSuchKey(key.to_owned()))?
            .value_mut::<T>()
    }

    /// Like [`Compound::get_as`], but an absent key yields `Ok(None)`.
    pub fn opt_as<T: TagValue>(&self, key: &str) -> Result<Option<&T>, CTagError> {
        self.opt(key).map(Tag::value::<T>).transpose()
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Removes and returns the value under `key`; fails if it is absent.
    pub fn remove(&mut self, key: &str) -> Result<Tag, CTagError> {
        self.entries
            .remove(key)
            .ok_or_else(|| CTagError::NoSuchKey(key.to_owned()))
    }

    /// Removes the value under `key` if present.
    pub fn remove_if_present(&mut self, key: &str) -> Option<Tag> {
        self.entries.remove(key)
    }

    /// Snapshot of all entries in the map's current iteration order.
    pub fn pairs(&self) -> Vec<KeyValuePair<'_>> {
        self.entries
            .iter()
            .map(|(key, value)| KeyValuePair { key, value })
            .collect()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, Tag> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl TryFrom<HashMap<String, Tag>> for Compound {
    type Error = CTagError;

    fn try_from(entries: HashMap<String, Tag>) -> Result<Self, Self::Error> {
        if entries.values().any(Tag::is_end) {
            return Err(CTagError::InvalidElement);
        }
        Ok(Self { entries })
    }
}

impl IntoIterator for Compound {
    type Item = (String, Tag);
    type IntoIter = hash_map::IntoIter<String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Compound {
    type Item = (&'a String, &'a Tag);
    type IntoIter = hash_map::Iter<'a, String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Entries are rendered sorted by key.
impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        write_block(f, TagKind::Compound, '{', '}', entries.into_iter())
    }
}
