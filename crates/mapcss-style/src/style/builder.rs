//! Fluent construction of declaration lists.

use super::{Declaration, PropertyDeclaration, PropertyValue, TagValue, Unit};
use crate::expression::Expression;
use crate::rules::ClassKey;
use crate::types::Color;

/// Builder for the declaration block of a rule.
///
/// Declarations keep the order they were added in, which is the order they
/// are applied in.
///
/// # Example
///
/// ```
/// use mapcss_style::style::Declarations;
/// use mapcss_style::types::Color;
///
/// let declarations = Declarations::new()
///     .color(Color::from_hex("#ff0000").unwrap())
///     .width(2.0)
///     .set_tag("level", 0.0)
///     .build();
/// assert_eq!(declarations.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Declarations {
    declarations: Vec<Declaration>,
}

impl Declarations {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the final declaration list.
    pub fn build(self) -> Vec<Declaration> {
        self.declarations
    }

    /// Add any declaration.
    pub fn push(mut self, declaration: impl Into<Declaration>) -> Self {
        self.declarations.push(declaration.into());
        self
    }

    // === Properties ===

    /// Set the property named `name`.
    pub fn property(self, name: &str, value: impl Into<PropertyValue>) -> Self {
        self.push(PropertyDeclaration::new(name, value))
    }

    /// Set a numeric property with a unit.
    pub fn property_with_unit(self, name: &str, value: f64, unit: Unit) -> Self {
        self.push(PropertyDeclaration::new(name, value).with_unit(unit))
    }

    /// Set the property named `name` to an identifier, e.g. `linecap: round`.
    pub fn keyword(self, name: &str, keyword: &str) -> Self {
        self.property(name, PropertyValue::identifier(keyword))
    }

    /// Set the property named `name` to `eval(expression)`.
    pub fn eval(self, name: &str, expression: impl Into<Expression>) -> Self {
        self.property(name, PropertyValue::Expression(expression.into()))
    }

    /// Set the line color.
    pub fn color(self, color: Color) -> Self {
        self.property("color", color)
    }

    /// Set the line width.
    pub fn width(self, width: f64) -> Self {
        self.property("width", width)
    }

    /// Set the area fill color.
    pub fn fill_color(self, color: Color) -> Self {
        self.property("fill-color", color)
    }

    /// Set the opacity.
    pub fn opacity(self, opacity: f64) -> Self {
        self.property("opacity", opacity)
    }

    /// Set the line dash pattern.
    pub fn dashes(self, dashes: impl Into<Vec<f64>>) -> Self {
        self.property("dashes", PropertyValue::Dashes(dashes.into()))
    }

    /// Set the label text.
    pub fn text(self, text: &str) -> Self {
        self.property("text", text)
    }

    /// Set the text color.
    pub fn text_color(self, color: Color) -> Self {
        self.property("text-color", color)
    }

    /// Set the stacking order.
    pub fn z_index(self, z_index: f64) -> Self {
        self.property("z-index", z_index)
    }

    // === Tags and classes ===

    /// Set or override tag `name`.
    pub fn set_tag(self, name: &str, value: impl Into<TagValue>) -> Self {
        self.push(Declaration::tag(name, value))
    }

    /// Set `class` on the result layer.
    pub fn set_class(self, class: ClassKey) -> Self {
        self.push(Declaration::Class(class))
    }
}

impl From<Declarations> for Vec<Declaration> {
    fn from(builder: Declarations) -> Self {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::Term;
    use mapcss_core::InternKey;

    #[test]
    fn builder_keeps_order() {
        let class = ClassKey::from_index(0);
        let declarations = Declarations::new()
            .width(1.0)
            .set_class(class)
            .color(Color::RED)
            .width(3.0)
            .build();

        assert_eq!(declarations.len(), 4);
        assert!(matches!(&declarations[0], Declaration::Property(d) if d.name() == "width"));
        assert_eq!(declarations[1], Declaration::Class(class));
        assert!(matches!(&declarations[3], Declaration::Property(d) if d.double_value() == 3.0));
    }

    #[test]
    fn builder_value_kinds() {
        let declarations = Declarations::new()
            .keyword("linecap", "round")
            .dashes([2.0, 1.0])
            .property_with_unit("width", 4.0, Unit::Meters)
            .eval("text", Term::literal("x"))
            .set_tag("level", "1")
            .build();

        let Declaration::Property(linecap) = &declarations[0] else { unreachable!() };
        assert_eq!(linecap.key_value(), Some("round"));
        let Declaration::Property(dashes) = &declarations[1] else { unreachable!() };
        assert_eq!(dashes.dashes_value(), [2.0, 1.0]);
        let Declaration::Property(width) = &declarations[2] else { unreachable!() };
        assert_eq!(width.unit(), Some(Unit::Meters));
        let Declaration::Property(text) = &declarations[3] else { unreachable!() };
        assert!(text.has_expression());
        assert!(matches!(&declarations[4], Declaration::Tag(d) if d.value().literal() == Some("1")));
    }
}
