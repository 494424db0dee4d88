//! Selector type definitions.

use std::fmt;

use mapcss_core::DataSource;

use super::Condition;
use crate::logging::targets;
use crate::resolve::ElementState;
use crate::rules::{ClassKey, LayerKey};
use crate::writer::{SymbolNames, write_separated};

/// Element kind a basic selector applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ObjectType {
    /// `node`
    Node,
    /// `way`
    Way,
    /// `relation`
    Relation,
    /// `area`: closed ways and multipolygons that are areas.
    Area,
    /// `line`: open ways and closed ways that are lines.
    Line,
    /// `canvas`: the map background, only matched by canvas evaluation.
    Canvas,
    /// `*`
    #[default]
    Any,
}

impl ObjectType {
    /// Parse a MapCSS type name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "node" => Some(ObjectType::Node),
            "way" => Some(ObjectType::Way),
            "relation" => Some(ObjectType::Relation),
            "area" => Some(ObjectType::Area),
            "line" => Some(ObjectType::Line),
            "canvas" => Some(ObjectType::Canvas),
            "*" => Some(ObjectType::Any),
            _ => None,
        }
    }

    /// The MapCSS type name.
    pub fn name(self) -> &'static str {
        match self {
            ObjectType::Node => "node",
            ObjectType::Way => "way",
            ObjectType::Relation => "relation",
            ObjectType::Area => "area",
            ObjectType::Line => "line",
            ObjectType::Canvas => "canvas",
            ObjectType::Any => "*",
        }
    }
}

/// Half-open zoom interval `[low, high)`. A bound of 0 is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ZoomRange {
    /// Lowest matching zoom level, inclusive.
    pub low: u32,
    /// First zoom level that no longer matches.
    pub high: u32,
}

impl ZoomRange {
    /// All zoom levels.
    pub const ANY: Self = Self { low: 0, high: 0 };

    /// Create a range matching `low <= zoom < high`.
    ///
    /// `high` is exclusive, so `new(17, 17)` matches no zoom level at all;
    /// zoom 17 alone is `new(17, 18)`.
    pub const fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    /// Check if the range is unbounded on both ends.
    pub fn is_any(&self) -> bool {
        self.low == 0 && self.high == 0
    }

    /// Check if `zoom_level` lies inside the range.
    #[inline]
    pub fn contains(&self, zoom_level: f64) -> bool {
        if self.low > 0 && zoom_level < f64::from(self.low) {
            return false;
        }
        if self.high > 0 && zoom_level >= f64::from(self.high) {
            return false;
        }
        true
    }

    fn write(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        if self.is_any() {
            return Ok(());
        }
        out.write_str("|z")?;
        if self.low > 0 {
            write!(out, "{}", self.low)?;
        }
        out.write_char('-')?;
        if self.high > 0 {
            write!(out, "{}", self.high)?;
        }
        Ok(())
    }
}

/// A single selector, e.g. `way.bridge|z15-[highway]:hovered::casing`.
///
/// # Example
///
/// ```
/// use mapcss_style::selector::{BasicSelector, Condition, ObjectType, ZoomRange};
///
/// let selector = BasicSelector::new(ObjectType::Way)
///     .with_zoom(ZoomRange::new(12, 16))
///     .with_condition(Condition::has("highway"));
/// assert_eq!(selector.conditions().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BasicSelector {
    /// Element kind filter.
    pub object_type: ObjectType,
    /// Class that must already be set on the target layer.
    pub class: Option<ClassKey>,
    /// Zoom levels the selector applies to.
    pub zoom: ZoomRange,
    /// Element states that must all be present.
    pub states: ElementState,
    /// Tag conditions, all of which must hold.
    pub conditions: Vec<Condition>,
    /// Result layer receiving the declarations, `None` for the default layer.
    pub layer: Option<LayerKey>,
}

impl BasicSelector {
    /// Create a selector for `object_type` without further restrictions.
    pub fn new(object_type: ObjectType) -> Self {
        Self {
            object_type,
            ..Default::default()
        }
    }

    /// Require `class` on the target layer.
    pub fn with_class(mut self, class: ClassKey) -> Self {
        self.class = Some(class);
        self
    }

    /// Restrict to a zoom range.
    pub fn with_zoom(mut self, zoom: ZoomRange) -> Self {
        self.zoom = zoom;
        self
    }

    /// Require the element states in `states`.
    pub fn with_state(mut self, states: ElementState) -> Self {
        self.states |= states;
        self
    }

    /// Add a tag condition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Target a layer other than the default one.
    pub fn with_layer(mut self, layer: LayerKey) -> Self {
        self.layer = Some(layer);
        self
    }

    /// Tag conditions, in order.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Resolve condition keys against `data`.
    pub fn compile<D: DataSource + ?Sized>(&mut self, data: &D) {
        for condition in &mut self.conditions {
            condition.compile(data);
        }
    }

    /// Write in MapCSS syntax.
    pub fn write(&self, out: &mut dyn fmt::Write, names: &SymbolNames<'_>) -> fmt::Result {
        out.write_str(self.object_type.name())?;
        if let Some(class) = self.class {
            out.write_char('.')?;
            names.write_class(out, class)?;
        }
        self.zoom.write(out)?;
        for condition in &self.conditions {
            condition.write(out)?;
        }
        for state in self.states.iter() {
            if let Some(name) = state.pseudo_class_name() {
                write!(out, ":{name}")?;
            }
        }
        if let Some(layer) = self.layer {
            out.write_str("::")?;
            names.write_layer(out, layer)?;
        }
        Ok(())
    }
}

/// Descendant selector, e.g. `relation[type=route] way[highway]`.
///
/// Kept so that style sheets containing them can be represented and
/// written. Such selectors never match.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChainedSelector {
    /// Selectors from outermost to the subject.
    pub selectors: Vec<BasicSelector>,
}

impl ChainedSelector {
    /// Create a chain, outermost selector first.
    pub fn new(selectors: Vec<BasicSelector>) -> Self {
        Self { selectors }
    }

    /// Layer of the subject selector.
    pub fn layer(&self) -> Option<LayerKey> {
        self.selectors.last().and_then(|s| s.layer)
    }

    /// Compile all parts.
    pub fn compile<D: DataSource + ?Sized>(&mut self, data: &D) {
        tracing::warn!(
            target: targets::COMPILE,
            "Chained selectors are not supported and never match"
        );
        for selector in &mut self.selectors {
            selector.compile(data);
        }
    }

    /// Write in MapCSS syntax.
    pub fn write(&self, out: &mut dyn fmt::Write, names: &SymbolNames<'_>) -> fmt::Result {
        write_separated(out, &self.selectors, " ", |out, s| s.write(out, names))
    }
}

/// Members of a union that target the same layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerGroup {
    /// The shared target layer.
    pub layer: Option<LayerKey>,
    /// Members, in the order they were added.
    pub selectors: Vec<Selector>,
}

/// Comma separated alternatives, e.g. `node[amenity], area[amenity]`.
///
/// Members are grouped by target layer. Every layer receives the
/// declarations at most once per evaluation, no matter how many of its
/// members match.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnionSelector {
    groups: Vec<LayerGroup>,
}

impl UnionSelector {
    /// Create an empty union.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an alternative. Nested unions are flattened.
    pub fn push(&mut self, selector: impl Into<Selector>) {
        let selector = selector.into();
        let selector = match selector {
            Selector::Union(union) => {
                for group in union.groups {
                    for member in group.selectors {
                        self.push(member);
                    }
                }
                return;
            }
            other => other,
        };

        let layer = selector.layer();
        match self.groups.iter_mut().find(|g| g.layer == layer) {
            Some(group) => group.selectors.push(selector),
            None => self.groups.push(LayerGroup {
                layer,
                selectors: vec![selector],
            }),
        }
    }

    /// Builder variant of [`push`](Self::push).
    pub fn with(mut self, selector: impl Into<Selector>) -> Self {
        self.push(selector);
        self
    }

    /// Member groups, in order of first appearance of their layer.
    pub fn groups(&self) -> &[LayerGroup] {
        &self.groups
    }

    /// Number of members in all groups.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.selectors.len()).sum()
    }

    /// Check whether there are no members.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Compile all members.
    pub fn compile<D: DataSource + ?Sized>(&mut self, data: &D) {
        for group in &mut self.groups {
            for selector in &mut group.selectors {
                selector.compile(data);
            }
        }
    }

    /// Write in MapCSS syntax, one member per line.
    pub fn write(&self, out: &mut dyn fmt::Write, names: &SymbolNames<'_>) -> fmt::Result {
        let mut first = true;
        for selector in self.groups.iter().flat_map(|g| &g.selectors) {
            if !first {
                out.write_str(",\n")?;
            }
            first = false;
            selector.write(out, names)?;
        }
        Ok(())
    }
}

impl FromIterator<Selector> for UnionSelector {
    fn from_iter<I: IntoIterator<Item = Selector>>(iter: I) -> Self {
        let mut union = UnionSelector::new();
        for selector in iter {
            union.push(selector);
        }
        union
    }
}

/// Any selector.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// A single selector.
    Basic(BasicSelector),
    /// A descendant chain. Never matches.
    Chained(ChainedSelector),
    /// Alternatives.
    Union(UnionSelector),
}

impl Selector {
    /// The layer this selector writes to. Unions write to the layers of
    /// their members and report `None`.
    pub fn layer(&self) -> Option<LayerKey> {
        match self {
            Selector::Basic(s) => s.layer,
            Selector::Chained(s) => s.layer(),
            Selector::Union(_) => None,
        }
    }

    /// Resolve tag keys against `data`.
    pub fn compile<D: DataSource + ?Sized>(&mut self, data: &D) {
        match self {
            Selector::Basic(s) => s.compile(data),
            Selector::Chained(s) => s.compile(data),
            Selector::Union(s) => s.compile(data),
        }
    }

    /// Write in MapCSS syntax.
    pub fn write(&self, out: &mut dyn fmt::Write, names: &SymbolNames<'_>) -> fmt::Result {
        match self {
            Selector::Basic(s) => s.write(out, names),
            Selector::Chained(s) => s.write(out, names),
            Selector::Union(s) => s.write(out, names),
        }
    }
}

impl From<BasicSelector> for Selector {
    fn from(selector: BasicSelector) -> Self {
        Selector::Basic(selector)
    }
}

impl From<ChainedSelector> for Selector {
    fn from(selector: ChainedSelector) -> Self {
        Selector::Chained(selector)
    }
}

impl From<UnionSelector> for Selector {
    fn from(selector: UnionSelector) -> Self {
        Selector::Union(selector)
    }
}
