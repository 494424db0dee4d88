//! String interning with typed, index-based keys.
//!
//! A [`KeyRegistry`] hands out small `Copy` handles for strings. Two handles
//! from the same registry are equal exactly when they denote the same string,
//! so equality and ordering are integer comparisons.
//!
//! Handles are not portable: a key obtained from one registry means nothing
//! to another registry, even one holding the same strings. Each key kind is a
//! distinct type (see [`key_type!`](crate::key_type)) so that keys of
//! different registries at least cannot be mixed up by accident.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// A handle type produced by a [`KeyRegistry`].
pub trait InternKey: Copy + Eq + Ord + Hash + fmt::Debug {
    /// Create a key from a raw registry index.
    fn from_index(index: u32) -> Self;

    /// The raw registry index of this key.
    fn index(self) -> u32;
}

/// Declare one or more interned key types.
///
/// Modelled on `slotmap::new_key_type!`: each declared type is a transparent
/// `u32` newtype implementing [`InternKey`].
///
/// ```
/// mapcss_core::key_type! {
///     /// Interned color names.
///     pub struct ColorKey;
/// }
///
/// let mut colors = mapcss_core::KeyRegistry::<ColorKey>::new();
/// let red = colors.make_key("red");
/// assert_eq!(colors.key("red"), Some(red));
/// ```
#[macro_export]
macro_rules! key_type {
    ($($(#[$outer:meta])* $vis:vis struct $name:ident;)+) => {
        $(
            $(#[$outer])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
            #[repr(transparent)]
            $vis struct $name(u32);

            impl $crate::intern::InternKey for $name {
                #[inline]
                fn from_index(index: u32) -> Self {
                    Self(index)
                }

                #[inline]
                fn index(self) -> u32 {
                    self.0
                }
            }
        )+
    };
}

/// Registry of unique string keys.
///
/// Lookups by name that were never interned return `None`, the "null" key.
pub struct KeyRegistry<K> {
    names: Vec<Box<str>>,
    lookup: HashMap<Box<str>, K>,
}

impl<K: InternKey> KeyRegistry<K> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            names: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    /// Add `name` to the registry if needed and return its key.
    pub fn make_key(&mut self, name: &str) -> K {
        if let Some(key) = self.lookup.get(name) {
            return *key;
        }

        debug_assert!(self.names.len() < u32::MAX as usize);
        let key = K::from_index(self.names.len() as u32);
        self.names.push(name.into());
        self.lookup.insert(name.into(), key);
        key
    }

    /// Look up an existing key without inserting.
    #[inline]
    pub fn key(&self, name: &str) -> Option<K> {
        self.lookup.get(name).copied()
    }

    /// The string a key denotes, if the key belongs to this registry.
    #[inline]
    pub fn name(&self, key: K) -> Option<&str> {
        self.names.get(key.index() as usize).map(|n| &**n)
    }

    /// Number of interned strings.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if nothing has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate over all keys in interning order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, n)| (K::from_index(i as u32), &**n))
    }
}

impl<K: InternKey> Default for KeyRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: InternKey> fmt::Debug for KeyRegistry<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names.iter()).finish()
    }
}
