//! Accumulated output of one evaluation pass.
//!
//! A [`MapCssResult`] holds one [`ResultLayer`] per layer selector that
//! received declarations. Layers are recycled through an internal pool, so
//! once a result has seen the largest number of layers a style sheet
//! produces, further passes do not allocate for literal declarations.

use std::borrow::Cow;

use mapcss_core::TagKey;

use super::MapCssState;
use crate::rules::{ClassKey, LayerKey};
use crate::style::{Property, PropertyDeclaration, PropertyFlags};

/// A tag value set by a declaration, shadowing the element's own value.
#[derive(Debug, Clone, PartialEq)]
struct TagOverride<'s> {
    key: TagKey,
    value: Cow<'s, str>,
}

/// Style output for one layer.
///
/// Borrows the property declarations from the style sheet that produced it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultLayer<'s> {
    declarations: Vec<&'s PropertyDeclaration>,
    classes: Vec<ClassKey>,
    tags: Vec<TagOverride<'s>>,
    layer: Option<LayerKey>,
    flags: PropertyFlags,
}

impl<'s> ResultLayer<'s> {
    /// The layer selector, `None` for the default layer.
    #[inline]
    pub fn layer_key(&self) -> Option<LayerKey> {
        self.layer
    }

    /// The declaration set for `property`, if any.
    pub fn declaration(&self, property: Property) -> Option<&'s PropertyDeclaration> {
        self.declarations
            .binary_search_by_key(&property, |d| d.property())
            .ok()
            .map(|idx| self.declarations[idx])
    }

    /// All declarations, ordered by property.
    #[inline]
    pub fn declarations(&self) -> &[&'s PropertyDeclaration] {
        &self.declarations
    }

    /// Union of the capability flags of all declarations.
    #[inline]
    pub fn flags(&self) -> PropertyFlags {
        self.flags
    }

    /// Check whether an area should be emitted.
    pub fn has_area_properties(&self) -> bool {
        self.flags.contains(PropertyFlags::AREA)
    }

    /// Check whether a line should be emitted.
    pub fn has_line_properties(&self) -> bool {
        self.flags.contains(PropertyFlags::LINE)
    }

    /// Check whether a label should be emitted.
    pub fn has_label_properties(&self) -> bool {
        self.flags.contains(PropertyFlags::LABEL)
    }

    /// Check whether an extruded shape should be emitted.
    pub fn has_extrude_properties(&self) -> bool {
        self.flags.contains(PropertyFlags::EXTRUDE)
    }

    /// Check whether `class` was set.
    pub fn has_class(&self, class: ClassKey) -> bool {
        self.classes.binary_search(&class).is_ok()
    }

    /// Classes set so far, in key order.
    pub fn classes(&self) -> &[ClassKey] {
        &self.classes
    }

    /// Tag value set by a declaration. Does not look at the element.
    pub fn tag_value(&self, key: TagKey) -> Option<&str> {
        self.tags
            .binary_search_by_key(&key, |t| t.key)
            .ok()
            .map(|idx| &*self.tags[idx].value)
    }

    /// Tag overrides in key order.
    pub fn tags(&self) -> impl Iterator<Item = (TagKey, &str)> {
        self.tags.iter().map(|t| (t.key, &*t.value))
    }

    /// Tag value as seen by expressions: a declared override if there is
    /// one, the element's own tag otherwise.
    pub fn resolved_tag_value<'a>(&'a self, key: TagKey, state: &MapCssState<'a>) -> Option<&'a str> {
        self.tag_value(key)
            .or_else(|| state.element.and_then(|e| e.tag_value(key)))
    }

    /// Slower version of [`resolved_tag_value`](Self::resolved_tag_value)
    /// for keys that are only known by name.
    pub fn resolved_tag_value_by_name<'a>(&'a self, name: &str, state: &MapCssState<'a>) -> Option<&'a str> {
        let element = state.element?;
        let key = element.data_set().tag_key(name)?;
        self.resolved_tag_value(key, state)
    }

    /// Check whether nothing was set on this layer.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty() && self.classes.is_empty() && self.tags.is_empty()
    }

    /// Insert or replace the declaration for its property.
    pub(crate) fn add_declaration(&mut self, declaration: &'s PropertyDeclaration) {
        match self
            .declarations
            .binary_search_by_key(&declaration.property(), |d| d.property())
        {
            Ok(idx) => self.declarations[idx] = declaration,
            Err(idx) => self.declarations.insert(idx, declaration),
        }
        self.flags |= declaration.flags();
    }

    pub(crate) fn add_class(&mut self, class: ClassKey) {
        if let Err(idx) = self.classes.binary_search(&class) {
            self.classes.insert(idx, class);
        }
    }

    pub(crate) fn set_tag(&mut self, key: TagKey, value: Cow<'s, str>) {
        match self.tags.binary_search_by_key(&key, |t| t.key) {
            Ok(idx) => self.tags[idx].value = value,
            Err(idx) => self.tags.insert(idx, TagOverride { key, value }),
        }
    }

    /// Reset to empty, keeping allocated capacity.
    fn clear(&mut self) {
        self.declarations.clear();
        self.classes.clear();
        self.tags.clear();
        self.layer = None;
        self.flags = PropertyFlags::empty();
    }
}

/// Evaluation output for all layers.
///
/// Reuse one instance across evaluations; every evaluation clears it first.
/// A result is mutated in place and belongs to one caller at a time.
#[derive(Debug, Default)]
pub struct MapCssResult<'s> {
    results: Vec<ResultLayer<'s>>,
    pool: Vec<ResultLayer<'s>>,
}

impl<'s> MapCssResult<'s> {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move all layers into the pool for reuse.
    pub fn clear(&mut self) {
        for mut layer in self.results.drain(..) {
            layer.clear();
            self.pool.push(layer);
        }
    }

    /// Active layers, in the order they received their first declaration.
    pub fn results(&self) -> &[ResultLayer<'s>] {
        &self.results
    }

    /// The layer for `layer`, if it received anything in this pass.
    pub fn layer(&self, layer: Option<LayerKey>) -> Option<&ResultLayer<'s>> {
        self.results.iter().find(|r| r.layer == layer)
    }

    /// The default layer, if it received anything in this pass.
    pub fn default_layer(&self) -> Option<&ResultLayer<'s>> {
        self.layer(None)
    }

    /// The layer for `layer`, activating it if needed.
    pub fn layer_mut(&mut self, layer: Option<LayerKey>) -> &mut ResultLayer<'s> {
        if let Some(idx) = self.results.iter().position(|r| r.layer == layer) {
            return &mut self.results[idx];
        }

        let mut result = self.pool.pop().unwrap_or_default();
        result.layer = layer;
        self.results.push(result);
        let idx = self.results.len() - 1;
        &mut self.results[idx]
    }

    /// Check whether no layer is active.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{PropertyDeclaration, PropertyValue};
    use crate::types::Color;
    use mapcss_core::{InternKey, KeyRegistry};

    fn declaration(name: &str, value: impl Into<PropertyValue>) -> PropertyDeclaration {
        let mut decl = PropertyDeclaration::new(name, value);
        decl.resolve_property();
        decl
    }

    #[test]
    fn declarations_replace_by_property() {
        let red = declaration("color", Color::RED);
        let blue = declaration("color", Color::BLUE);
        let width = declaration("width", 2.0);
        let text = declaration("text", "Main St");

        let mut layer = ResultLayer::default();
        layer.add_declaration(&width);
        layer.add_declaration(&red);
        layer.add_declaration(&text);
        layer.add_declaration(&blue);

        let properties: Vec<_> = layer.declarations().iter().map(|d| d.property()).collect();
        assert_eq!(properties, [Property::Color, Property::Text, Property::Width]);
        assert_eq!(layer.declaration(Property::Color).and_then(|d| d.color_value()), Some(Color::BLUE));
        assert!(layer.declaration(Property::FillColor).is_none());
        assert!(layer.has_line_properties());
        assert!(layer.has_label_properties());
        assert!(!layer.has_area_properties());
        assert!(!layer.has_extrude_properties());
    }

    #[test]
    fn classes_are_a_set() {
        let mut registry = KeyRegistry::<ClassKey>::new();
        let a = registry.make_key("a");
        let b = registry.make_key("b");

        let mut layer = ResultLayer::default();
        layer.add_class(b);
        layer.add_class(a);
        layer.add_class(b);

        assert_eq!(layer.classes(), [a, b]);
        assert!(layer.has_class(a));
    }

    #[test]
    fn tag_overrides() {
        let mut keys = KeyRegistry::<TagKey>::new();
        let name = keys.make_key("name");
        let level = keys.make_key("level");

        let mut layer = ResultLayer::default();
        layer.set_tag(level, Cow::Borrowed("1"));
        layer.set_tag(name, Cow::Owned("A".to_string()));
        layer.set_tag(name, Cow::Borrowed("B"));

        assert_eq!(layer.tag_value(name), Some("B"));
        assert_eq!(layer.tag_value(level), Some("1"));
        assert_eq!(layer.tags().count(), 2);

        let state = MapCssState::default();
        assert_eq!(layer.resolved_tag_value(name, &state), Some("B"));
        assert_eq!(layer.resolved_tag_value_by_name("name", &state), None);
    }

    #[test]
    fn clear_recycles_layers() {
        let width = declaration("width", 1.0);
        let mut layers = KeyRegistry::<LayerKey>::new();
        let casing = layers.make_key("casing");

        let mut result = MapCssResult::new();
        result.layer_mut(None).add_declaration(&width);
        result.layer_mut(Some(casing)).add_declaration(&width);
        result.layer_mut(None).add_declaration(&width);
        assert_eq!(result.results().len(), 2);
        assert_eq!(result.results()[1].layer_key(), Some(casing));

        result.clear();
        assert!(result.is_empty());
        assert!(result.layer(None).is_none());
        assert_eq!(result.pool.len(), 2);

        let layer = result.layer_mut(Some(LayerKey::from_index(0)));
        assert!(layer.is_empty());
        assert!(layer.declarations.capacity() > 0);
        assert_eq!(result.pool.len(), 1);
    }
}
