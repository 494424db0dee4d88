//! OSM tags.

use crate::key_type;

key_type! {
    /// Interned tag key, obtained from a [`DataSet`](crate::DataSet).
    pub struct TagKey;
}

/// A single key/value tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// The tag key.
    pub key: TagKey,
    /// The tag value.
    pub value: String,
}

impl Tag {
    /// Create a new tag.
    pub fn new(key: TagKey, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

/// Tag list kept sorted by key.
///
/// The ordering is the interning order of the keys, which makes lookups a
/// binary search over integer handles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(Vec<Tag>);

impl Tags {
    /// Create an empty tag list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: TagKey, value: impl Into<String>) {
        match self.0.binary_search_by_key(&key, |t| t.key) {
            Ok(idx) => self.0[idx].value = value.into(),
            Err(idx) => self.0.insert(idx, Tag::new(key, value)),
        }
    }

    /// Remove the tag for `key`, returning its previous value.
    pub fn remove(&mut self, key: TagKey) -> Option<String> {
        let idx = self.0.binary_search_by_key(&key, |t| t.key).ok()?;
        Some(self.0.remove(idx).value)
    }

    /// Value of the tag with `key`.
    #[inline]
    pub fn get(&self, key: TagKey) -> Option<&str> {
        self.0
            .binary_search_by_key(&key, |t| t.key)
            .ok()
            .map(|idx| self.0[idx].value.as_str())
    }

    /// Check if a tag with `key` is present.
    #[inline]
    pub fn contains(&self, key: TagKey) -> bool {
        self.0.binary_search_by_key(&key, |t| t.key).is_ok()
    }

    /// All tags in ascending key order.
    #[inline]
    pub fn as_slice(&self) -> &[Tag] {
        &self.0
    }

    /// Iterate over tags in ascending key order.
    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.0.iter()
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no tags.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Tags {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
