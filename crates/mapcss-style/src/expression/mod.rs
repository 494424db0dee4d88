//! The `eval()` expression language.
//!
//! Expressions are trees of [`Term`]s. They are compiled once against a data
//! source and then evaluated against an element and the result layer being
//! styled, producing a [`Value`](crate::types::Value).
//!
//! # Example
//!
//! ```
//! use mapcss_style::expression::{BinaryOp, Expression, Term};
//! use mapcss_style::resolve::{MapCssState, ResultLayer};
//!
//! let expr = Expression::new(Term::binary(BinaryOp::Multiply, Term::literal(2.0), Term::literal("1.5")));
//! let state = MapCssState::default();
//! let layer = ResultLayer::default();
//! assert_eq!(expr.evaluate(&state, &layer).as_number(), 3.0);
//! assert_eq!(expr.to_string(), r#"(2*"1.5")"#);
//! ```

mod function;
mod term;

use std::fmt;

use mapcss_core::DataSource;

pub use function::Function;
pub use term::{BinaryOp, ExpressionContext, Lookup, Term};

use crate::resolve::{MapCssState, ResultLayer};
use crate::types::Value;

/// A complete `eval()` expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    term: Term,
}

impl Expression {
    /// Wrap the root term.
    pub fn new(term: Term) -> Self {
        Self { term }
    }

    /// The root term.
    pub fn term(&self) -> &Term {
        &self.term
    }

    /// Resolve constant names against `data`.
    pub fn compile<D: DataSource + ?Sized>(&mut self, data: &D) {
        self.term.compile(data);
    }

    /// Evaluate for the element in `state`, reading properties and tag
    /// overrides from `layer`.
    pub fn evaluate<'a>(&'a self, state: &'a MapCssState<'a>, layer: &'a ResultLayer<'a>) -> Value<'a> {
        self.term.evaluate(&ExpressionContext { state, layer })
    }

    /// Write in expression syntax.
    pub fn write(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        self.term.write(out)
    }
}

impl From<Term> for Expression {
    fn from(term: Term) -> Self {
        Self::new(term)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f)
    }
}
