//! Expression trees.

use std::fmt;

use mapcss_core::{DataSource, TagKey};

use super::Function;
use crate::logging::targets;
use crate::resolve::{MapCssState, ResultLayer};
use crate::style::Property;
use crate::types::Value;
use crate::writer::write_separated;
use crate::{Error, Result};

/// Inputs an expression is evaluated against.
#[derive(Clone, Copy)]
pub struct ExpressionContext<'a> {
    /// The element and rendering state.
    pub state: &'a MapCssState<'a>,
    /// What the current evaluation pass accumulated so far for the layer
    /// being styled.
    pub layer: &'a ResultLayer<'a>,
}

/// A name that is resolved at compile time if it is a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lookup<K> {
    /// Computed from the argument on every evaluation.
    #[default]
    Dynamic,
    /// Resolved once while compiling.
    Static(K),
}

/// Infix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`, none when the divisor is none or zero.
    Divide,
    /// `&&`, both sides always evaluated.
    And,
    /// `||`, both sides always evaluated.
    Or,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessOrEqual,
    /// `>=`
    GreaterOrEqual,
}

impl BinaryOp {
    /// Operator symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::Greater => ">",
            BinaryOp::LessOrEqual => "<=",
            BinaryOp::GreaterOrEqual => ">=",
        }
    }
}

/// A node of an `eval()` expression tree.
///
/// Nodes own their children. Trees are built bottom-up, so they are finite
/// and acyclic.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// A constant.
    Literal(Value<'static>),
    /// Logical negation.
    Not(Box<Term>),
    /// Arithmetic, logical or comparison operator.
    Binary(BinaryOp, Box<Term>, Box<Term>),
    /// Function call, other than `tag()` and `prop()`.
    Call(Function, Vec<Term>),
    /// `tag(name)`.
    ReadTag {
        name: Box<Term>,
        key: Lookup<Option<TagKey>>,
    },
    /// `prop(name)`.
    ReadProperty {
        name: Box<Term>,
        property: Lookup<Property>,
    },
}

impl Term {
    /// A constant.
    pub fn literal(value: impl Into<Value<'static>>) -> Self {
        Term::Literal(value.into())
    }

    /// Infix operation.
    pub fn binary(op: BinaryOp, lhs: Term, rhs: Term) -> Self {
        Term::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    /// Logical negation.
    pub fn not(term: Term) -> Self {
        Term::Not(Box::new(term))
    }

    /// `tag(name)`.
    pub fn tag(name: Term) -> Self {
        Term::ReadTag {
            name: Box::new(name),
            key: Lookup::Dynamic,
        }
    }

    /// `prop(name)`.
    pub fn prop(name: Term) -> Self {
        Term::ReadProperty {
            name: Box::new(name),
            property: Lookup::Dynamic,
        }
    }

    /// Function call, checking the argument count.
    pub fn call(function: Function, mut args: Vec<Term>) -> Result<Self> {
        if !function.accepts(args.len()) {
            return Err(Error::argument_count(function.name(), args.len()));
        }

        Ok(match function {
            Function::Tag => Term::tag(args.remove(0)),
            Function::Prop => Term::prop(args.remove(0)),
            _ => Term::Call(function, args),
        })
    }

    /// Resolve constant tag and property names.
    pub fn compile<D: DataSource + ?Sized>(&mut self, data: &D) {
        match self {
            Term::Literal(_) => {}
            Term::Not(term) => term.compile(data),
            Term::Binary(_, lhs, rhs) => {
                lhs.compile(data);
                rhs.compile(data);
            }
            Term::Call(_, args) => {
                for arg in args {
                    arg.compile(data);
                }
            }
            Term::ReadTag { name, key } => {
                name.compile(data);
                if let Term::Literal(value) = &**name {
                    *key = Lookup::Static(data.tag_key(&value.as_string()));
                }
            }
            Term::ReadProperty { name, property } => {
                name.compile(data);
                if let Term::Literal(value) = &**name {
                    *property = Lookup::Static(Property::from_name(&value.as_string()));
                }
            }
        }
    }

    /// Evaluate this term.
    pub fn evaluate<'a>(&'a self, ctx: &ExpressionContext<'a>) -> Value<'a> {
        match self {
            Term::Literal(value) => value.borrowed(),
            Term::Not(term) => Value::Boolean(!term.evaluate(ctx).as_boolean()),
            Term::Binary(op, lhs, rhs) => evaluate_binary(*op, lhs, rhs, ctx),
            Term::Call(function, args) => evaluate_call(*function, args, ctx),
            Term::ReadTag { name, key } => {
                let value = match key {
                    Lookup::Static(Some(key)) => ctx.layer.resolved_tag_value(*key, ctx.state),
                    Lookup::Static(None) => None,
                    Lookup::Dynamic => {
                        let name = name.evaluate(ctx);
                        ctx.layer.resolved_tag_value_by_name(&name.as_string(), ctx.state)
                    }
                };
                value.map_or(Value::None, Value::from)
            }
            Term::ReadProperty { name, property } => {
                let property = match property {
                    Lookup::Static(property) => *property,
                    Lookup::Dynamic => Property::from_name(&name.evaluate(ctx).as_string()),
                };
                let Some(declaration) = ctx.layer.declaration(property) else {
                    return Value::None;
                };
                if declaration.has_expression() {
                    tracing::warn!(
                        target: targets::EVALUATE,
                        "Recursive eval() expression not supported for '{}', evaluation aborted",
                        declaration.name()
                    );
                    return Value::None;
                }
                declaration.to_value()
            }
        }
    }

    /// Write the term in expression syntax.
    pub fn write(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        match self {
            Term::Literal(value) => write!(out, "{value}"),
            Term::Not(term) => {
                out.write_char('!')?;
                term.write(out)
            }
            Term::Binary(op, lhs, rhs) => {
                out.write_char('(')?;
                lhs.write(out)?;
                out.write_str(op.symbol())?;
                rhs.write(out)?;
                out.write_char(')')
            }
            Term::Call(function, args) => {
                write!(out, "{function}(")?;
                write_separated(out, args, ", ", |out, arg| arg.write(out))?;
                out.write_char(')')
            }
            Term::ReadTag { name, .. } => {
                out.write_str("tag(")?;
                name.write(out)?;
                out.write_char(')')
            }
            Term::ReadProperty { name, .. } => {
                out.write_str("prop(")?;
                name.write(out)?;
                out.write_char(')')
            }
        }
    }
}

fn evaluate_binary<'a>(op: BinaryOp, lhs: &'a Term, rhs: &'a Term, ctx: &ExpressionContext<'a>) -> Value<'a> {
    let number = |term: &'a Term| term.evaluate(ctx).as_number();

    match op {
        BinaryOp::Add => Value::Number(number(lhs) + number(rhs)),
        BinaryOp::Subtract => Value::Number(number(lhs) - number(rhs)),
        BinaryOp::Multiply => Value::Number(number(lhs) * number(rhs)),
        BinaryOp::Divide => {
            let divisor = rhs.evaluate(ctx);
            if divisor.is_none() || divisor.as_number() == 0.0 {
                return Value::None;
            }
            Value::Number(number(lhs) / divisor.as_number())
        }
        // both operands are evaluated, no short-circuit
        BinaryOp::And | BinaryOp::Or => {
            let lhs = lhs.evaluate(ctx).as_boolean();
            let rhs = rhs.evaluate(ctx).as_boolean();
            Value::Boolean(if op == BinaryOp::And { lhs && rhs } else { lhs || rhs })
        }
        BinaryOp::Equal => Value::Boolean(lhs.evaluate(ctx).compare_equal(&rhs.evaluate(ctx))),
        BinaryOp::NotEqual => Value::Boolean(!lhs.evaluate(ctx).compare_equal(&rhs.evaluate(ctx))),
        BinaryOp::Less => Value::Boolean(number(lhs) < number(rhs)),
        BinaryOp::Greater => Value::Boolean(number(lhs) > number(rhs)),
        BinaryOp::LessOrEqual => Value::Boolean(number(lhs) <= number(rhs)),
        BinaryOp::GreaterOrEqual => Value::Boolean(number(lhs) >= number(rhs)),
    }
}

fn evaluate_call<'a>(function: Function, args: &'a [Term], ctx: &ExpressionContext<'a>) -> Value<'a> {
    let arg = move |idx: usize| args.get(idx).map_or(Value::None, |term| term.evaluate(ctx));

    match function {
        Function::Any => args
            .iter()
            .map(|term| term.evaluate(ctx))
            .find(|value| !value.is_none())
            .unwrap_or_default(),
        Function::Cond => {
            if arg(0).as_boolean() {
                arg(1)
            } else {
                arg(2)
            }
        }
        Function::Boolean => Value::Boolean(arg(0).as_boolean()),
        Function::Num => Value::Number(arg(0).as_number()),
        Function::Str => Value::String(arg(0).into_string()),
        Function::Concat => {
            let mut text = String::new();
            for term in args {
                text.push_str(&term.evaluate(ctx).as_string());
            }
            Value::from(text)
        }
        Function::Replace => {
            let text = arg(0).into_string();
            let from = arg(1);
            let from = from.as_string();
            if from.is_empty() {
                return Value::String(text);
            }
            let to = arg(2);
            Value::from(text.replace(&*from, &to.as_string()))
        }
        Function::Int => Value::Number(arg(0).as_number().trunc()),
        Function::Max => Value::Number(
            args.iter()
                .map(|term| term.evaluate(ctx).as_number())
                .fold(f64::MIN, f64::max),
        ),
        Function::Min => Value::Number(
            args.iter()
                .map(|term| term.evaluate(ctx).as_number())
                .fold(f64::MAX, f64::min),
        ),
        Function::Sqrt => Value::Number(arg(0).as_number().sqrt()),
        Function::Metric | Function::ZMetric => arg(0),
        // represented as Term::ReadTag and Term::ReadProperty
        Function::Tag | Function::Prop => Value::None,
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f)
    }
}
