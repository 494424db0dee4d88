//! Style sheets: ordered rules plus the class and layer registries.

use std::fmt;

use mapcss_core::{DataSource, KeyRegistry};

use super::{ClassKey, LayerKey, Rule};
use crate::config::EvaluationConfig;
use crate::logging::targets;
use crate::resolve::{MapCssResult, MapCssState, ObjectClassifier};
use crate::selector::{MatchContext, Selector};
use crate::style::Declaration;
use crate::writer::SymbolNames;

/// A compiled MapCSS style.
///
/// Built once, compiled against the data set it is used with, and then
/// evaluated for many elements. Evaluation only reads the style sheet, so one
/// compiled sheet can be shared by several threads as long as each thread
/// brings its own [`MapCssState`] and [`MapCssResult`].
///
/// # Example
///
/// ```
/// use mapcss_core::{DataSet, Way, Node};
/// use mapcss_style::prelude::*;
///
/// let mut data = DataSet::new();
/// let highway = data.make_tag_key("highway");
/// let a = data.add_node(Node::new(1));
/// let b = data.add_node(Node::new(2));
/// let mut way = Way::new(1, vec![a, b]);
/// way.tags.set(highway, "motorway");
/// let way = data.add_way(way);
///
/// let mut style = StyleSheet::new();
/// style.add_rule(
///     BasicSelector::new(ObjectType::Way).with_condition(Condition::has("highway")),
///     Declarations::new().color(Color::RED).width(2.0),
/// );
/// style.add_rule(
///     BasicSelector::new(ObjectType::Way).with_condition(Condition::equals("highway", "motorway")),
///     Declarations::new().color(Color::BLUE),
/// );
/// style.compile(&data);
///
/// let state = MapCssState::new(data.element(way.into()).unwrap()).with_zoom_level(14.0);
/// let mut result = MapCssResult::new();
/// style.evaluate(&state, &mut result);
///
/// let layer = result.default_layer().unwrap();
/// assert_eq!(layer.declaration(Property::Color).and_then(|d| d.color_value()), Some(Color::BLUE));
/// assert_eq!(layer.declaration(Property::Width).map(|d| d.double_value()), Some(2.0));
/// assert!(layer.has_line_properties());
/// ```
#[derive(Debug, Default)]
pub struct StyleSheet {
    rules: Vec<Rule>,
    classes: KeyRegistry<ClassKey>,
    layers: KeyRegistry<LayerKey>,
    config: EvaluationConfig,
    classifier: ObjectClassifier,
}

impl StyleSheet {
    /// Create an empty style sheet with the built-in evaluation config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty style sheet with a custom evaluation config.
    pub fn with_config(config: EvaluationConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// The evaluation config.
    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Intern a class name.
    pub fn make_class_key(&mut self, name: &str) -> ClassKey {
        self.classes.make_key(name)
    }

    /// Look up a class name.
    pub fn class_key(&self, name: &str) -> Option<ClassKey> {
        self.classes.key(name)
    }

    /// Intern a layer selector name.
    pub fn make_layer_key(&mut self, name: &str) -> LayerKey {
        self.layers.make_key(name)
    }

    /// Look up a layer selector name.
    pub fn layer_key(&self, name: &str) -> Option<LayerKey> {
        self.layers.key(name)
    }

    /// Append a rule. Later rules take precedence over earlier ones.
    pub fn add_rule(&mut self, selector: impl Into<Selector>, declarations: impl Into<Vec<Declaration>>) {
        self.rules.push(Rule::new(selector, declarations));
    }

    /// Append a pre-built rule.
    pub fn push_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resolve all tag keys and property names against `data`.
    ///
    /// Must be called again before evaluating elements of a different data
    /// set, since tag keys are only meaningful for the set that issued them.
    pub fn compile<D: DataSource + ?Sized>(&mut self, data: &D) {
        for rule in &mut self.rules {
            rule.compile(data);
        }
        self.classifier = ObjectClassifier::compile(&self.config, data);

        tracing::debug!(
            target: targets::COMPILE,
            "compiled {} rules, {} classes, {} layers",
            self.rules.len(),
            self.classes.len(),
            self.layers.len()
        );
    }

    /// Evaluate all rules for the element in `state`.
    ///
    /// `result` is cleared first. Rules run in order against the same
    /// result, so classes and tags set by a rule are visible to all later
    /// rules. Nothing happens without an element.
    pub fn evaluate<'s>(&'s self, state: &MapCssState<'_>, result: &mut MapCssResult<'s>) {
        result.clear();
        let Some(element) = state.element else {
            return;
        };

        let object_class = self.classifier.classify(&element);
        let ctx = MatchContext::new(state, element, object_class);
        for rule in &self.rules {
            rule.evaluate(&ctx, result);
        }
    }

    /// Evaluate all rules for the canvas.
    ///
    /// Only `canvas` selectors take part, and only their property
    /// declarations are applied, to the default layer.
    pub fn evaluate_canvas<'s>(&'s self, state: &MapCssState<'_>, result: &mut MapCssResult<'s>) {
        result.clear();
        for rule in &self.rules {
            rule.evaluate_canvas(state, result);
        }
    }

    /// Names for the class and layer keys of this sheet.
    pub fn symbol_names(&self) -> SymbolNames<'_> {
        SymbolNames::new(&self.classes, &self.layers)
    }

    /// Write all rules in MapCSS syntax.
    pub fn write(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        let names = self.symbol_names();
        for rule in &self.rules {
            rule.write(out, &names)?;
        }
        Ok(())
    }
}

impl fmt::Display for StyleSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f)
    }
}

static_assertions::assert_impl_all!(StyleSheet: Send, Sync);
