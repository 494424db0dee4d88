//! Tag conditions, the `[key op value]` parts of a selector.

use std::fmt;

use mapcss_core::{DataSource, TagKey};

use crate::logging::targets;
use crate::resolve::MapCssState;
use crate::types::parse_number;

/// Pseudo key testing whether the element is closed for the displayed time
/// range.
const CLOSED_KEY: &str = "mx:closed";
/// Pseudo key testing whether the element is open right now.
const OPEN_KEY: &str = "mx:open";
const OPENING_HOURS_KEY: &str = "opening_hours";

/// Comparison performed by a [`Condition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionOperator {
    /// `[key]`
    KeySet,
    /// `[!key]`
    KeyNotSet,
    /// `[key=value]`
    Equal,
    /// `[key!=value]`
    NotEqual,
    /// `[key<value]`
    LessThan,
    /// `[key>value]`
    GreaterThan,
    /// `[key<=value]`
    LessOrEqual,
    /// `[key>=value]`
    GreaterOrEqual,
    /// `[mx:closed]`
    IsClosed,
    /// `[!mx:closed]`
    IsNotClosed,
    /// `[mx:open]`
    IsOpen,
    /// `[!mx:open]`
    IsNotOpen,
}

impl ConditionOperator {
    fn is_numeric(self) -> bool {
        matches!(
            self,
            ConditionOperator::LessThan
                | ConditionOperator::GreaterThan
                | ConditionOperator::LessOrEqual
                | ConditionOperator::GreaterOrEqual
        )
    }

    /// Result when the tag is absent, or unknown to the data source.
    fn absent_result(self) -> bool {
        matches!(
            self,
            ConditionOperator::KeyNotSet
                | ConditionOperator::NotEqual
                | ConditionOperator::IsNotClosed
                | ConditionOperator::IsNotOpen
        )
    }

    fn symbol(self) -> Option<&'static str> {
        match self {
            ConditionOperator::Equal => Some("="),
            ConditionOperator::NotEqual => Some("!="),
            ConditionOperator::LessThan => Some("<"),
            ConditionOperator::GreaterThan => Some(">"),
            ConditionOperator::LessOrEqual => Some("<="),
            ConditionOperator::GreaterOrEqual => Some(">="),
            _ => None,
        }
    }
}

/// Right hand side of a condition.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConditionValue {
    /// Nothing, for existence tests.
    #[default]
    None,
    /// Compared as text.
    String(String),
    /// Compared numerically.
    Number(f64),
}

impl ConditionValue {
    fn as_number(&self) -> f64 {
        match self {
            ConditionValue::Number(n) => *n,
            _ => f64::NAN,
        }
    }
}

impl From<f64> for ConditionValue {
    fn from(n: f64) -> Self {
        ConditionValue::Number(n)
    }
}

impl From<&str> for ConditionValue {
    fn from(s: &str) -> Self {
        ConditionValue::String(s.to_string())
    }
}

impl From<String> for ConditionValue {
    fn from(s: String) -> Self {
        ConditionValue::String(s)
    }
}

/// A single tag test.
///
/// # Example
///
/// ```
/// use mapcss_core::{DataSet, Node};
/// use mapcss_style::resolve::MapCssState;
/// use mapcss_style::selector::Condition;
///
/// let mut data = DataSet::new();
/// let level = data.make_tag_key("level");
/// let mut node = Node::new(1);
/// node.tags.set(level, "5");
/// let node = data.add_node(node);
///
/// let mut above = Condition::greater_than("level", 3.0);
/// above.compile(&data);
///
/// let state = MapCssState::new(data.element(node.into()).unwrap());
/// assert!(above.matches(&state));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    key: String,
    op: ConditionOperator,
    value: ConditionValue,
    tag_key: Option<TagKey>,
}

impl Condition {
    /// Create a condition.
    pub fn new(key: impl Into<String>, op: ConditionOperator, value: impl Into<ConditionValue>) -> Self {
        Self {
            key: key.into(),
            op,
            value: value.into(),
            tag_key: None,
        }
    }

    /// `[key]`
    pub fn has(key: impl Into<String>) -> Self {
        Self::new(key, ConditionOperator::KeySet, ConditionValue::None)
    }

    /// `[!key]`
    pub fn missing(key: impl Into<String>) -> Self {
        Self::new(key, ConditionOperator::KeyNotSet, ConditionValue::None)
    }

    /// `[key=value]`
    pub fn equals(key: impl Into<String>, value: impl Into<ConditionValue>) -> Self {
        Self::new(key, ConditionOperator::Equal, value)
    }

    /// `[key!=value]`
    pub fn not_equals(key: impl Into<String>, value: impl Into<ConditionValue>) -> Self {
        Self::new(key, ConditionOperator::NotEqual, value)
    }

    /// `[key<value]`
    pub fn less_than(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, ConditionOperator::LessThan, value)
    }

    /// `[key>value]`
    pub fn greater_than(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, ConditionOperator::GreaterThan, value)
    }

    /// `[key<=value]`
    pub fn less_or_equal(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, ConditionOperator::LessOrEqual, value)
    }

    /// `[key>=value]`
    pub fn greater_or_equal(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, ConditionOperator::GreaterOrEqual, value)
    }

    /// The key as written.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The operator, after compiling including the opening hours mapping.
    pub fn operator(&self) -> ConditionOperator {
        self.op
    }

    /// The resolved tag key, `None` if unknown to the data source.
    pub fn tag_key(&self) -> Option<TagKey> {
        self.tag_key
    }

    /// Resolve the key against `data`.
    pub fn compile<D: DataSource + ?Sized>(&mut self, data: &D) {
        match self.key.as_str() {
            CLOSED_KEY => {
                self.tag_key = data.tag_key(OPENING_HOURS_KEY);
                self.op = match self.op {
                    ConditionOperator::KeySet => ConditionOperator::IsClosed,
                    ConditionOperator::KeyNotSet => ConditionOperator::IsNotClosed,
                    op => op,
                };
            }
            OPEN_KEY => {
                self.tag_key = data.tag_key(OPENING_HOURS_KEY);
                self.op = match self.op {
                    ConditionOperator::KeySet => ConditionOperator::IsOpen,
                    ConditionOperator::KeyNotSet => ConditionOperator::IsNotOpen,
                    op => op,
                };
            }
            key => self.tag_key = data.tag_key(key),
        }

        match self.op {
            ConditionOperator::Equal | ConditionOperator::NotEqual => {
                if matches!(&self.value, ConditionValue::None)
                    || matches!(&self.value, ConditionValue::String(s) if s.is_empty())
                {
                    tracing::warn!(
                        target: targets::COMPILE,
                        "Empty comparison on '{}', use key (not) set operation instead!",
                        self.key
                    );
                }
            }
            op if op.is_numeric() => {
                if self.value.as_number().is_nan() {
                    tracing::warn!(
                        target: targets::COMPILE,
                        "Numeric comparison on '{}' without numeric value set!",
                        self.key
                    );
                }
            }
            _ => {}
        }
    }

    /// Test the element in `state`.
    pub fn matches(&self, state: &MapCssState<'_>) -> bool {
        let Some(key) = self.tag_key else {
            return self.op.absent_result();
        };
        let Some(element) = state.element else {
            return self.op.absent_result();
        };
        let Some(value) = element.tag_value(key) else {
            return self.op.absent_result();
        };

        match self.op {
            ConditionOperator::KeySet => true,
            ConditionOperator::KeyNotSet => false,
            ConditionOperator::Equal => self.equals_tag(value),
            ConditionOperator::NotEqual => !self.equals_tag(value),
            ConditionOperator::LessThan => parse_number(value) < self.value.as_number(),
            ConditionOperator::GreaterThan => parse_number(value) > self.value.as_number(),
            ConditionOperator::LessOrEqual => parse_number(value) <= self.value.as_number(),
            ConditionOperator::GreaterOrEqual => parse_number(value) >= self.value.as_number(),
            ConditionOperator::IsClosed | ConditionOperator::IsNotClosed => {
                let Some(cache) = state.opening_hours.filter(|_| !value.is_empty()) else {
                    return self.op == ConditionOperator::IsNotClosed;
                };
                let closed = cache.is_entirely_closed_in_range(element.id(), value);
                closed == (self.op == ConditionOperator::IsClosed)
            }
            ConditionOperator::IsOpen | ConditionOperator::IsNotOpen => {
                let Some(cache) = state.opening_hours.filter(|_| !value.is_empty()) else {
                    return self.op == ConditionOperator::IsNotOpen;
                };
                let open = cache.is_at_current_time(element.id(), value);
                open == (self.op == ConditionOperator::IsOpen)
            }
        }
    }

    fn equals_tag(&self, value: &str) -> bool {
        match &self.value {
            ConditionValue::None => value.is_empty(),
            ConditionValue::String(s) => value == s,
            ConditionValue::Number(n) => parse_number(value) == *n,
        }
    }

    /// Test the canvas in `state`.
    ///
    /// Only `level` is meaningful here, compared against the floor level.
    pub fn matches_canvas(&self, state: &MapCssState<'_>) -> bool {
        if self.key != "level" {
            return false;
        }

        let level = f64::from(state.floor_level / 10);
        let value = self.value.as_number();
        match self.op {
            ConditionOperator::Equal => level == value,
            ConditionOperator::NotEqual => level != value,
            ConditionOperator::LessThan => level < value,
            ConditionOperator::GreaterThan => level > value,
            ConditionOperator::LessOrEqual => level <= value,
            ConditionOperator::GreaterOrEqual => level >= value,
            _ => false,
        }
    }

    /// Write in MapCSS syntax.
    pub fn write(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        out.write_char('[')?;
        let Some(symbol) = self.op.symbol() else {
            if self.op.absent_result() {
                out.write_char('!')?;
            }
            write!(out, "{}]", self.key)?;
            return Ok(());
        };

        write!(out, "{}{symbol}", self.key)?;
        match &self.value {
            ConditionValue::None => {}
            ConditionValue::String(s) => out.write_str(s)?,
            ConditionValue::Number(n) => write!(out, "{n}")?,
        }
        out.write_char(']')
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapcss_core::{DataSet, Element, FixedOpeningHours, Node, NodeId};

    fn data_with(tags: &[(&str, &str)]) -> (DataSet, NodeId) {
        let mut data = DataSet::new();
        let mut node = Node::new(1);
        for (k, v) in tags {
            let key = data.make_tag_key(k);
            node.tags.set(key, *v);
        }
        let id = data.add_node(node);
        (data, id)
    }

    fn check(data: &DataSet, node: NodeId, mut condition: Condition) -> bool {
        condition.compile(data);
        let state = MapCssState::new(data.element(node.into()).unwrap());
        condition.matches(&state)
    }

    #[test]
    fn existence() {
        let (data, node) = data_with(&[("amenity", "cafe")]);
        assert!(check(&data, node, Condition::has("amenity")));
        assert!(!check(&data, node, Condition::missing("amenity")));
    }

    #[test]
    fn unknown_key_takes_absent_branch() {
        let (data, node) = data_with(&[("amenity", "cafe")]);
        assert!(!check(&data, node, Condition::has("shop")));
        assert!(check(&data, node, Condition::missing("shop")));
        assert!(check(&data, node, Condition::not_equals("shop", "bakery")));
        assert!(!check(&data, node, Condition::equals("shop", "bakery")));
        assert!(!check(&data, node, Condition::greater_than("shop", 1.0)));
    }

    #[test]
    fn known_but_absent_key() {
        let (mut data, node) = data_with(&[("amenity", "cafe")]);
        data.make_tag_key("shop");
        assert!(data.tag_key("shop").is_some());
        assert!(check(&data, node, Condition::missing("shop")));
        assert!(!check(&data, node, Condition::has("shop")));
    }

    #[test]
    fn equality() {
        let (data, node) = data_with(&[("highway", "motorway"), ("lanes", "2.0")]);
        assert!(check(&data, node, Condition::equals("highway", "motorway")));
        assert!(!check(&data, node, Condition::equals("highway", "primary")));
        assert!(check(&data, node, Condition::not_equals("highway", "primary")));
        assert!(check(&data, node, Condition::equals("lanes", 2.0)));
        assert!(!check(&data, node, Condition::equals("lanes", "2")));
    }

    #[test]
    fn numeric_comparison() {
        let (data, node) = data_with(&[("level", "5"), ("name", "abc")]);
        assert!(check(&data, node, Condition::greater_than("level", 3.0)));
        assert!(!check(&data, node, Condition::greater_than("level", 10.0)));
        assert!(check(&data, node, Condition::less_or_equal("level", 5.0)));
        assert!(check(&data, node, Condition::greater_or_equal("level", 5.0)));
        assert!(!check(&data, node, Condition::less_than("level", 5.0)));

        assert!(!check(&data, node, Condition::greater_than("name", 1.0)));
        assert!(!check(&data, node, Condition::less_than("name", 1.0)));
        assert!(!check(&data, node, Condition::less_or_equal("name", 1.0)));
        assert!(!check(&data, node, Condition::greater_or_equal("name", 1.0)));
    }

    #[test]
    fn closed_maps_to_opening_hours() {
        let (data, node) = data_with(&[("opening_hours", "off")]);
        let element: Element = node.into();
        let cache = FixedOpeningHours::new().with("off", false, true);

        let mut closed = Condition::has("mx:closed");
        let mut not_closed = Condition::missing("mx:closed");
        let mut open = Condition::has("mx:open");
        for c in [&mut closed, &mut not_closed, &mut open] {
            c.compile(&data);
        }
        assert_eq!(closed.operator(), ConditionOperator::IsClosed);
        assert_eq!(not_closed.operator(), ConditionOperator::IsNotClosed);
        assert_eq!(open.operator(), ConditionOperator::IsOpen);
        assert_eq!(closed.tag_key(), data.tag_key("opening_hours"));

        let state = MapCssState::new(data.element(element).unwrap()).with_opening_hours(&cache);
        assert!(closed.matches(&state));
        assert!(!not_closed.matches(&state));
        assert!(!open.matches(&state));

        // no cache: never closed
        let bare = MapCssState::new(data.element(element).unwrap());
        assert!(!closed.matches(&bare));
        assert!(not_closed.matches(&bare));
        assert!(!open.matches(&bare));
    }

    #[test]
    fn closed_without_opening_hours_tag() {
        let (data, node) = data_with(&[("amenity", "cafe")]);
        let cache = FixedOpeningHours::new();
        let state = MapCssState::new(data.element(node.into()).unwrap()).with_opening_hours(&cache);

        let mut closed = Condition::has("mx:closed");
        let mut not_closed = Condition::missing("mx:closed");
        closed.compile(&data);
        not_closed.compile(&data);

        assert!(!closed.matches(&state));
        assert!(not_closed.matches(&state));
    }

    #[test]
    fn canvas_level() {
        let state = MapCssState::default().with_floor_level(25);
        assert!(Condition::equals("level", 2.0).matches_canvas(&state));
        assert!(Condition::greater_than("level", 1.0).matches_canvas(&state));
        assert!(!Condition::less_than("level", 2.0).matches_canvas(&state));
        assert!(!Condition::has("level").matches_canvas(&state));
        assert!(!Condition::equals("name", 2.0).matches_canvas(&state));
        assert!(!Condition::equals("level", "2").matches_canvas(&state));
    }

    #[test]
    fn write_syntax() {
        assert_eq!(Condition::has("highway").to_string(), "[highway]");
        assert_eq!(Condition::missing("highway").to_string(), "[!highway]");
        assert_eq!(Condition::equals("highway", "motorway").to_string(), "[highway=motorway]");
        assert_eq!(Condition::greater_or_equal("level", 2.5).to_string(), "[level>=2.5]");
        assert_eq!(Condition::less_than("level", 3.0).to_string(), "[level<3]");

        let (data, _) = data_with(&[("opening_hours", "24/7")]);
        let mut closed = Condition::missing("mx:closed");
        closed.compile(&data);
        assert_eq!(closed.to_string(), "[!mx:closed]");
    }
}
