//! Opening hours collaborator.
//!
//! Style conditions such as `[mx:closed]` do not evaluate opening hours
//! expressions themselves. They ask an [`OpeningHoursCache`], which knows the
//! currently displayed time range and memoizes results per element.
//!
//! Implementations memoize through `&self`, i.e. with interior mutability,
//! and are typically not `Sync`. Callers evaluating styles on several threads
//! either give each worker its own cache or share one through
//! [`SharedOpeningHours`].

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::element::Element;

/// Opening hours evaluation for the currently displayed time range.
pub trait OpeningHoursCache {
    /// Check whether `expression` marks `element` as open right now.
    fn is_at_current_time(&self, element: Element, expression: &str) -> bool;

    /// Check whether `expression` marks `element` as closed for the entire
    /// displayed time range.
    fn is_entirely_closed_in_range(&self, element: Element, expression: &str) -> bool;
}

/// Serializes access to a cache that is not safe for concurrent use.
///
/// ```
/// use mapcss_core::{DataSet, Node, OpeningHoursCache, FixedOpeningHours, SharedOpeningHours};
///
/// let mut data = DataSet::new();
/// let node = data.add_node(Node::new(1)).into();
/// let shared = SharedOpeningHours::new(FixedOpeningHours::new().with("off", false, true));
///
/// std::thread::scope(|s| {
///     for _ in 0..2 {
///         s.spawn(|| assert!(shared.is_entirely_closed_in_range(node, "off")));
///     }
/// });
/// ```
#[derive(Debug, Default)]
pub struct SharedOpeningHours<C> {
    inner: Mutex<C>,
}

impl<C> SharedOpeningHours<C> {
    /// Wrap `cache`.
    pub fn new(cache: C) -> Self {
        Self {
            inner: Mutex::new(cache),
        }
    }

    /// Unwrap the cache again.
    pub fn into_inner(self) -> C {
        self.inner.into_inner()
    }
}

impl<C: OpeningHoursCache> OpeningHoursCache for SharedOpeningHours<C> {
    fn is_at_current_time(&self, element: Element, expression: &str) -> bool {
        self.inner.lock().is_at_current_time(element, expression)
    }

    fn is_entirely_closed_in_range(&self, element: Element, expression: &str) -> bool {
        self.inner.lock().is_entirely_closed_in_range(element, expression)
    }
}

/// Fixed answers per expression text.
///
/// Expressions without an entry count as open and not closed.
#[derive(Debug, Clone, Default)]
pub struct FixedOpeningHours {
    entries: HashMap<String, OpeningState>,
}

#[derive(Debug, Clone, Copy)]
struct OpeningState {
    open_now: bool,
    closed_in_range: bool,
}

impl FixedOpeningHours {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the state for `expression`.
    pub fn insert(&mut self, expression: impl Into<String>, open_now: bool, closed_in_range: bool) {
        self.entries.insert(
            expression.into(),
            OpeningState {
                open_now,
                closed_in_range,
            },
        );
    }

    /// Builder variant of [`insert`](Self::insert).
    pub fn with(mut self, expression: impl Into<String>, open_now: bool, closed_in_range: bool) -> Self {
        self.insert(expression, open_now, closed_in_range);
        self
    }
}

impl OpeningHoursCache for FixedOpeningHours {
    fn is_at_current_time(&self, _element: Element, expression: &str) -> bool {
        self.entries.get(expression).is_none_or(|s| s.open_now)
    }

    fn is_entirely_closed_in_range(&self, _element: Element, expression: &str) -> bool {
        self.entries.get(expression).is_some_and(|s| s.closed_in_range)
    }
}

static_assertions::assert_impl_all!(SharedOpeningHours<FixedOpeningHours>: Send, Sync);
