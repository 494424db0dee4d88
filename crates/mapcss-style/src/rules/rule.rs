//! A single style rule.

use std::fmt;

use mapcss_core::DataSource;

use crate::resolve::{MapCssResult, MapCssState, apply_canvas_declarations, apply_declarations};
use crate::selector::{MatchContext, Selector};
use crate::style::Declaration;
use crate::writer::SymbolNames;

/// A selector with the declarations applied when it matches.
///
/// There is no specificity: rules take effect in the order they appear in
/// their style sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Decides where the declarations apply.
    pub selector: Selector,
    /// Applied in order on every match.
    pub declarations: Vec<Declaration>,
}

impl Rule {
    /// Create a rule.
    pub fn new(selector: impl Into<Selector>, declarations: impl Into<Vec<Declaration>>) -> Self {
        Self {
            selector: selector.into(),
            declarations: declarations.into(),
        }
    }

    /// Resolve tag keys and property names against `data`.
    pub fn compile<D: DataSource + ?Sized>(&mut self, data: &D) {
        self.selector.compile(data);
        for declaration in &mut self.declarations {
            declaration.compile(data);
        }
    }

    /// Match against the element in `ctx` and apply the declarations to
    /// every matching layer of `result`.
    pub fn evaluate<'s>(&'s self, ctx: &MatchContext<'_>, result: &mut MapCssResult<'s>) -> bool {
        let declarations = &self.declarations;
        let state = ctx.state;
        self.selector
            .matches(ctx, result, &mut |layer| apply_declarations(layer, declarations, state))
    }

    /// Match against the canvas and apply the property declarations to the
    /// default layer of `result`.
    pub fn evaluate_canvas<'s>(&'s self, state: &MapCssState<'_>, result: &mut MapCssResult<'s>) -> bool {
        if !self.selector.matches_canvas(state) {
            return false;
        }
        apply_canvas_declarations(result.layer_mut(None), &self.declarations);
        true
    }

    /// Write in MapCSS syntax.
    pub fn write(&self, out: &mut dyn fmt::Write, names: &SymbolNames<'_>) -> fmt::Result {
        self.selector.write(out, names)?;
        out.write_str("\n{\n")?;
        for declaration in &self.declarations {
            out.write_str("    ")?;
            declaration.write(out, names)?;
            out.write_str(";\n")?;
        }
        out.write_str("}\n\n")
    }
}
