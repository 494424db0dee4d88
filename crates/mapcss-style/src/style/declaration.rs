//! Rule declarations.
//!
//! A declaration is the effect a matching rule has on the result layer:
//! setting a style property, overriding a tag, or setting a class.

use std::fmt;

use mapcss_core::{DataSource, TagKey};

use super::keywords::{CapStyle, Capitalization, JoinStyle, TextPosition, Unit};
use super::{Property, PropertyFlags};
use crate::expression::Expression;
use crate::logging::targets;
use crate::resolve::{MapCssState, ResultLayer};
use crate::rules::ClassKey;
use crate::types::{Color, Value};
use crate::writer::{SymbolNames, write_quoted, write_separated};

/// Value of a property declaration, as produced by the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// A number, optionally with a unit.
    Number(f64),
    /// An RGBA color.
    Color(Color),
    /// A dash pattern.
    Dashes(Vec<f64>),
    /// A quoted string.
    String(String),
    /// A bare identifier, e.g. `round` or a tag name.
    Identifier(String),
    /// `true` or `false`.
    Boolean(bool),
    /// An `eval()` expression.
    Expression(Expression),
}

impl PropertyValue {
    /// An unquoted identifier.
    pub fn identifier(name: impl Into<String>) -> Self {
        PropertyValue::Identifier(name.into())
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value)
    }
}

impl From<Color> for PropertyValue {
    fn from(value: Color) -> Self {
        PropertyValue::Color(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Boolean(value)
    }
}

impl From<Vec<f64>> for PropertyValue {
    fn from(value: Vec<f64>) -> Self {
        PropertyValue::Dashes(value)
    }
}

impl From<Expression> for PropertyValue {
    fn from(value: Expression) -> Self {
        PropertyValue::Expression(value)
    }
}

/// Sets a style property, e.g. `width: 2px`.
///
/// The property name is resolved while compiling. Until then, and for names
/// not in the property table, the declaration is [`Property::Unknown`] and
/// never applied.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDeclaration {
    name: String,
    property: Property,
    flags: PropertyFlags,
    value: PropertyValue,
    unit: Option<Unit>,
}

impl PropertyDeclaration {
    /// Create a declaration for the property named `name`.
    pub fn new(name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        Self {
            name: name.into(),
            property: Property::Unknown,
            flags: PropertyFlags::empty(),
            value: value.into(),
            unit: None,
        }
    }

    /// Attach a unit to a numeric value.
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    pub(crate) fn resolve_property(&mut self) {
        match Property::lookup(&self.name) {
            Some(&(_, property, flags)) => {
                self.property = property;
                self.flags = flags;
            }
            None => {
                tracing::warn!(target: targets::COMPILE, "Unknown property declaration: {}", self.name);
                self.property = Property::Unknown;
                self.flags = PropertyFlags::empty();
            }
        }
    }

    /// Property name as written.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The resolved property.
    #[inline]
    pub fn property(&self) -> Property {
        self.property
    }

    /// Capability flags of the resolved property.
    #[inline]
    pub fn flags(&self) -> PropertyFlags {
        self.flags
    }

    /// The raw value.
    pub fn value(&self) -> &PropertyValue {
        &self.value
    }

    /// Check whether the value is an `eval()` expression.
    pub fn has_expression(&self) -> bool {
        matches!(self.value, PropertyValue::Expression(_))
    }

    /// The `eval()` expression, if the value is one.
    pub fn expression(&self) -> Option<&Expression> {
        match &self.value {
            PropertyValue::Expression(expr) => Some(expr),
            _ => None,
        }
    }

    /// The value as seen by `prop()` in expressions.
    ///
    /// Expressions are not evaluated and read as none.
    pub fn to_value(&self) -> Value<'_> {
        match &self.value {
            PropertyValue::Number(n) => Value::Number(*n),
            PropertyValue::Color(color) => Value::from(color.to_string()),
            PropertyValue::Dashes(dashes) => {
                let text: Vec<String> = dashes.iter().map(f64::to_string).collect();
                Value::from(text.join(", "))
            }
            PropertyValue::String(s) | PropertyValue::Identifier(s) => Value::from(s.as_str()),
            PropertyValue::Boolean(b) => Value::Boolean(*b),
            PropertyValue::Expression(_) => Value::None,
        }
    }

    /// The value for the element being styled, evaluating expressions
    /// against `layer`.
    pub fn evaluate<'a>(&'a self, state: &'a MapCssState<'a>, layer: &'a ResultLayer<'a>) -> Value<'a> {
        match &self.value {
            PropertyValue::Expression(expr) => expr.evaluate(state, layer),
            _ => self.to_value(),
        }
    }

    /// Numeric value, NaN if the value is not a number.
    pub fn double_value(&self) -> f64 {
        match self.value {
            PropertyValue::Number(n) => n,
            _ => f64::NAN,
        }
    }

    /// Numeric value truncated towards zero, 0 if the value is not a number.
    pub fn int_value(&self) -> i32 {
        // saturating, NaN becomes 0
        self.double_value() as i32
    }

    /// Boolean value, `false` if the value is not a boolean.
    pub fn bool_value(&self) -> bool {
        matches!(self.value, PropertyValue::Boolean(true))
    }

    /// Quoted string value.
    pub fn string_value(&self) -> Option<&str> {
        match &self.value {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Color value. Strings and identifiers are parsed as color names or
    /// hex codes.
    pub fn color_value(&self) -> Option<Color> {
        match &self.value {
            PropertyValue::Color(color) => Some(*color),
            PropertyValue::String(s) | PropertyValue::Identifier(s) => Color::parse(s),
            _ => None,
        }
    }

    /// Identifier value.
    pub fn key_value(&self) -> Option<&str> {
        match &self.value {
            PropertyValue::Identifier(s) => Some(s),
            _ => None,
        }
    }

    /// Dash pattern, empty if the value is not one.
    pub fn dashes_value(&self) -> &[f64] {
        match &self.value {
            PropertyValue::Dashes(dashes) => dashes,
            _ => &[],
        }
    }

    /// Line cap keyword, `flat` when unset or unknown.
    pub fn cap_style(&self) -> CapStyle {
        let key = self.key_value().unwrap_or_default();
        CapStyle::from_name(key).unwrap_or_else(|| {
            tracing::debug!(target: targets::STYLE, "unknown line cap style: {key}");
            CapStyle::default()
        })
    }

    /// Line join keyword, `round` when unset or unknown.
    pub fn join_style(&self) -> JoinStyle {
        self.key_value()
            .and_then(JoinStyle::from_name)
            .unwrap_or_default()
    }

    /// Text transform keyword, `mixed` when unset or unknown.
    pub fn capitalization(&self) -> Capitalization {
        self.key_value()
            .and_then(Capitalization::from_name)
            .unwrap_or_default()
    }

    /// Check for the `bold` font weight keyword.
    pub fn is_bold_style(&self) -> bool {
        self.key_value() == Some("bold")
    }

    /// Check for the `italic` font style keyword.
    pub fn is_italic_style(&self) -> bool {
        self.key_value() == Some("italic")
    }

    /// Check for the `underline` text decoration keyword.
    pub fn is_underline_style(&self) -> bool {
        self.key_value() == Some("underline")
    }

    /// Label placement keyword.
    pub fn text_position(&self) -> Option<TextPosition> {
        self.key_value().and_then(TextPosition::from_name)
    }

    /// Unit of a numeric value.
    pub fn unit(&self) -> Option<Unit> {
        self.unit
    }

    fn write(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "{}: ", self.property.name().unwrap_or(self.name.as_str()))?;
        match &self.value {
            PropertyValue::Number(n) => write!(out, "{n}")?,
            PropertyValue::Color(color) => write!(out, "{color}")?,
            PropertyValue::Dashes(dashes) => write_dashes(out, dashes)?,
            PropertyValue::String(s) => write_quoted(out, s)?,
            PropertyValue::Identifier(s) => out.write_str(s)?,
            PropertyValue::Boolean(b) => write!(out, "{b}")?,
            PropertyValue::Expression(expr) => {
                out.write_str("eval(")?;
                expr.write(out)?;
                out.write_char(')')?;
            }
        }
        if let Some(unit) = self.unit {
            out.write_str(unit.name())?;
        }
        Ok(())
    }
}

fn write_dashes(out: &mut dyn fmt::Write, dashes: &[f64]) -> fmt::Result {
    write_separated(out, dashes, ", ", |out, d| write!(out, "{d}"))
}

/// Value assigned by a tag declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    /// A number, kept together with its decimal rendering.
    Number { value: f64, text: String },
    /// A string.
    String(String),
    /// An expression evaluated against the layer the rule applies to.
    Expression(Expression),
}

impl TagValue {
    /// The fixed tag text, `None` for expressions.
    pub fn literal(&self) -> Option<&str> {
        match self {
            TagValue::Number { text, .. } => Some(text),
            TagValue::String(s) => Some(s),
            TagValue::Expression(_) => None,
        }
    }
}

impl From<f64> for TagValue {
    fn from(value: f64) -> Self {
        TagValue::Number {
            value,
            text: value.to_string(),
        }
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        TagValue::String(value.to_string())
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        TagValue::String(value)
    }
}

impl From<Expression> for TagValue {
    fn from(value: Expression) -> Self {
        TagValue::Expression(value)
    }
}

/// Sets or overrides a tag on the result layer, e.g. `set level = 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct TagDeclaration {
    name: String,
    key: Option<TagKey>,
    value: TagValue,
}

impl TagDeclaration {
    /// Create a declaration for tag `name`.
    pub fn new(name: impl Into<String>, value: impl Into<TagValue>) -> Self {
        Self {
            name: name.into(),
            key: None,
            value: value.into(),
        }
    }

    /// Tag name as written.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The resolved tag key. `None` before compiling and for tags the data
    /// source does not know.
    pub fn key(&self) -> Option<TagKey> {
        self.key
    }

    /// The assigned value.
    pub fn value(&self) -> &TagValue {
        &self.value
    }

    fn write(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "set {} = ", self.name)?;
        match &self.value {
            TagValue::Number { value, .. } => write!(out, "{value}"),
            TagValue::String(s) => write_quoted(out, s),
            TagValue::Expression(expr) => {
                out.write_str("eval(")?;
                expr.write(out)?;
                out.write_char(')')
            }
        }
    }
}

/// One effect of a matching rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    /// Set a style property.
    Property(PropertyDeclaration),
    /// Set or override a tag.
    Tag(TagDeclaration),
    /// Set a class, testable by later rules.
    Class(ClassKey),
}

impl Declaration {
    /// Shorthand for a property declaration.
    pub fn property(name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        Declaration::Property(PropertyDeclaration::new(name, value))
    }

    /// Shorthand for a tag declaration.
    pub fn tag(name: impl Into<String>, value: impl Into<TagValue>) -> Self {
        Declaration::Tag(TagDeclaration::new(name, value))
    }

    /// Resolve property names and tag keys against `data`.
    pub fn compile<D: DataSource + ?Sized>(&mut self, data: &D) {
        match self {
            Declaration::Property(decl) => {
                decl.resolve_property();
                if let PropertyValue::Expression(expr) = &mut decl.value {
                    expr.compile(data);
                }
            }
            Declaration::Tag(decl) => {
                decl.key = data.tag_key(&decl.name);
                if decl.key.is_none() {
                    tracing::warn!(
                        target: targets::COMPILE,
                        "Tag key '{}' unknown to the data source, declaration has no effect",
                        decl.name
                    );
                }
                if let TagValue::Expression(expr) = &mut decl.value {
                    expr.compile(data);
                }
            }
            Declaration::Class(_) => {}
        }
    }

    /// Write in MapCSS syntax, without the trailing `;`.
    pub fn write(&self, out: &mut dyn fmt::Write, names: &SymbolNames<'_>) -> fmt::Result {
        match self {
            Declaration::Property(decl) => decl.write(out),
            Declaration::Tag(decl) => decl.write(out),
            Declaration::Class(class) => {
                out.write_str("set .")?;
                names.write_class(out, *class)
            }
        }
    }
}

impl From<PropertyDeclaration> for Declaration {
    fn from(decl: PropertyDeclaration) -> Self {
        Declaration::Property(decl)
    }
}

impl From<TagDeclaration> for Declaration {
    fn from(decl: TagDeclaration) -> Self {
        Declaration::Tag(decl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::{Function, Term};
    use mapcss_core::{DataSet, KeyRegistry};

    fn compiled(decl: impl Into<Declaration>) -> Declaration {
        let mut decl = decl.into();
        decl.compile(&DataSet::new());
        decl
    }

    fn written(decl: &Declaration) -> String {
        let classes = KeyRegistry::new();
        let layers = KeyRegistry::new();
        let mut out = String::new();
        decl.write(&mut out, &SymbolNames::new(&classes, &layers)).unwrap();
        out
    }

    #[test]
    fn property_resolution() {
        let Declaration::Property(width) = compiled(Declaration::property("width", 2.0)) else {
            unreachable!()
        };
        assert_eq!(width.property(), Property::Width);
        assert!(width.flags().contains(PropertyFlags::LINE));

        let Declaration::Property(bogus) = compiled(Declaration::property("wdith", 2.0)) else {
            unreachable!()
        };
        assert_eq!(bogus.property(), Property::Unknown);
        assert!(bogus.flags().is_empty());
        assert_eq!(bogus.name(), "wdith");
    }

    #[test]
    fn typed_accessors() {
        let number = PropertyDeclaration::new("width", 2.7).with_unit(Unit::Pixels);
        assert_eq!(number.double_value(), 2.7);
        assert_eq!(number.int_value(), 2);
        assert_eq!(number.unit(), Some(Unit::Pixels));
        assert!(number.string_value().is_none());

        let text = PropertyDeclaration::new("text", "Main St");
        assert!(text.double_value().is_nan());
        assert_eq!(text.int_value(), 0);
        assert_eq!(text.string_value(), Some("Main St"));

        let named = PropertyDeclaration::new("color", PropertyValue::identifier("red"));
        assert_eq!(named.color_value(), Some(Color::RED));
        assert_eq!(named.key_value(), Some("red"));

        let dashes = PropertyDeclaration::new("dashes", vec![4.0, 2.0]);
        assert_eq!(dashes.dashes_value(), [4.0, 2.0]);
        assert!(text.dashes_value().is_empty());
    }

    #[test]
    fn keyword_accessors() {
        let cap = PropertyDeclaration::new("linecap", PropertyValue::identifier("square"));
        assert_eq!(cap.cap_style(), CapStyle::Square);
        let unknown = PropertyDeclaration::new("linecap", PropertyValue::identifier("butt"));
        assert_eq!(unknown.cap_style(), CapStyle::Flat);
        assert_eq!(unknown.join_style(), JoinStyle::Round);

        let bold = PropertyDeclaration::new("font-weight", PropertyValue::identifier("bold"));
        assert!(bold.is_bold_style());
        assert!(!bold.is_italic_style());

        let upper = PropertyDeclaration::new("text-transform", PropertyValue::identifier("uppercase"));
        assert_eq!(upper.capitalization(), Capitalization::Uppercase);

        let position = PropertyDeclaration::new("text-position", PropertyValue::identifier("line"));
        assert_eq!(position.text_position(), Some(TextPosition::Line));
        assert_eq!(bold.text_position(), None);
    }

    #[test]
    fn values_for_prop_reads() {
        assert_eq!(PropertyDeclaration::new("width", 3.0).to_value(), Value::Number(3.0));
        assert_eq!(PropertyDeclaration::new("color", Color::BLUE).to_value(), Value::from("#0000ff"));
        assert_eq!(PropertyDeclaration::new("text", "x").to_value(), Value::from("x"));
        assert_eq!(
            PropertyDeclaration::new("dashes", vec![4.0, 2.5]).to_value(),
            Value::from("4, 2.5")
        );

        let expr = Expression::new(Term::literal(1.0));
        let decl = PropertyDeclaration::new("width", expr);
        assert!(decl.has_expression());
        assert_eq!(decl.to_value(), Value::None);

        let state = MapCssState::default();
        let layer = ResultLayer::default();
        assert_eq!(decl.evaluate(&state, &layer), Value::Number(1.0));
    }

    #[test]
    fn tag_literals_are_rendered_once() {
        assert_eq!(TagValue::from(2.0).literal(), Some("2"));
        assert_eq!(TagValue::from(0.5).literal(), Some("0.5"));
        assert_eq!(TagValue::from("yes").literal(), Some("yes"));
        assert_eq!(TagValue::from(Expression::new(Term::literal("a"))).literal(), None);
    }

    #[test]
    fn tag_key_resolution() {
        let mut data = DataSet::new();
        let level = data.make_tag_key("level");

        let mut known = Declaration::tag("level", 1.0);
        let mut unknown = Declaration::tag("no-such-tag", "x");
        known.compile(&data);
        unknown.compile(&data);

        assert!(matches!(known, Declaration::Tag(ref d) if d.key() == Some(level)));
        assert!(matches!(unknown, Declaration::Tag(ref d) if d.key().is_none()));
    }

    #[test]
    fn write_syntax() {
        let width = compiled(PropertyDeclaration::new("width", 2.0).with_unit(Unit::Pixels));
        assert_eq!(written(&width), "width: 2px");

        let color = compiled(Declaration::property("color", Color::rgba(255, 0, 0, 128)));
        assert_eq!(written(&color), "color: #ff000080");

        let dashes = compiled(Declaration::property("dashes", vec![3.0, 1.5]));
        assert_eq!(written(&dashes), "dashes: 3, 1.5");

        let text = compiled(Declaration::property("text", "say \"hi\""));
        assert_eq!(written(&text), r#"text: "say \"hi\"""#);

        let expr = Term::call(Function::Concat, vec![Term::literal("a"), Term::literal(1.0)]).unwrap();
        let eval = compiled(Declaration::property("text", Expression::new(expr)));
        assert_eq!(written(&eval), r#"text: eval(concat("a", 1))"#);

        assert_eq!(written(&Declaration::tag("level", 1.0)), "set level = 1");
        assert_eq!(written(&Declaration::tag("name", "x")), r#"set name = "x""#);
    }

    #[test]
    fn write_class() {
        let mut classes = KeyRegistry::<ClassKey>::new();
        let layers = KeyRegistry::new();
        let bridge = classes.make_key("bridge");

        let mut out = String::new();
        Declaration::Class(bridge)
            .write(&mut out, &SymbolNames::new(&classes, &layers))
            .unwrap();
        assert_eq!(out, "set .bridge");
    }
}
