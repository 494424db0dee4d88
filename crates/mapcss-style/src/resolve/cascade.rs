//! Applying declarations to a result layer.

use std::borrow::Cow;

use super::{MapCssState, ResultLayer};
use crate::style::{Declaration, Property, TagValue};

/// Apply `declarations` in order to `layer`.
///
/// Later declarations replace earlier ones for the same property or tag.
/// Literal values are borrowed from the declarations; only tag expressions
/// produce owned text.
pub(crate) fn apply_declarations<'s>(
    layer: &mut ResultLayer<'s>,
    declarations: &'s [Declaration],
    state: &MapCssState<'_>,
) {
    for declaration in declarations {
        match declaration {
            Declaration::Property(decl) => {
                if decl.property() != Property::Unknown {
                    layer.add_declaration(decl);
                }
            }
            Declaration::Tag(decl) => {
                let Some(key) = decl.key() else {
                    continue;
                };
                let value = match decl.value() {
                    TagValue::Number { text, .. } => Cow::Borrowed(text.as_str()),
                    TagValue::String(text) => Cow::Borrowed(text.as_str()),
                    TagValue::Expression(expr) => {
                        Cow::Owned(expr.evaluate(state, &*layer).as_string().into_owned())
                    }
                };
                layer.set_tag(key, value);
            }
            Declaration::Class(class) => layer.add_class(*class),
        }
    }
}

/// Apply the property declarations among `declarations` to the canvas
/// layer. Tags and classes have no meaning for the canvas.
pub(crate) fn apply_canvas_declarations<'s>(layer: &mut ResultLayer<'s>, declarations: &'s [Declaration]) {
    for declaration in declarations {
        if let Declaration::Property(decl) = declaration
            && decl.property() != Property::Unknown
        {
            layer.add_declaration(decl);
        }
    }
}
