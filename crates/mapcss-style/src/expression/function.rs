//! Named functions of the `eval()` language.

use std::fmt;

/// A function callable from an `eval()` expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    /// First argument that is not none.
    Any,
    /// Boolean cast.
    Boolean,
    /// String concatenation.
    Concat,
    /// `cond(test, then, else)`.
    Cond,
    /// Truncate towards zero.
    Int,
    /// Largest numeric argument.
    Max,
    /// Unit conversion to meters. Passes its argument through unchanged.
    Metric,
    /// Smallest numeric argument.
    Min,
    /// Numeric cast.
    Num,
    /// Read a property of the current result layer.
    Prop,
    /// `replace(text, from, to)`.
    Replace,
    /// Square root.
    Sqrt,
    /// String cast.
    Str,
    /// Read a tag of the current element.
    Tag,
    /// Unit conversion for z-values. Passes its argument through unchanged.
    ZMetric,
}

const UNBOUNDED: usize = usize::MAX;

// keep sorted by name
static FUNCTIONS: &[(&str, Function, usize, usize)] = &[
    ("any", Function::Any, 1, UNBOUNDED),
    ("boolean", Function::Boolean, 1, 1),
    ("concat", Function::Concat, 2, UNBOUNDED),
    ("cond", Function::Cond, 3, 3),
    ("int", Function::Int, 1, 1),
    ("max", Function::Max, 2, UNBOUNDED),
    ("metric", Function::Metric, 1, 1),
    ("min", Function::Min, 2, UNBOUNDED),
    ("num", Function::Num, 1, 1),
    ("prop", Function::Prop, 1, 1),
    ("replace", Function::Replace, 3, 3),
    ("sqrt", Function::Sqrt, 1, 1),
    ("str", Function::Str, 1, 1),
    ("tag", Function::Tag, 1, 1),
    ("zmetric", Function::ZMetric, 1, 1),
];

impl Function {
    /// Look up a function by name.
    pub fn from_name(name: &str) -> Option<Function> {
        FUNCTIONS
            .binary_search_by(|(n, ..)| (*n).cmp(name))
            .ok()
            .map(|idx| FUNCTIONS[idx].1)
    }

    /// The name used in expressions.
    pub fn name(self) -> &'static str {
        self.entry().0
    }

    /// Check whether `count` arguments are acceptable.
    pub fn accepts(self, count: usize) -> bool {
        let (_, _, min, max) = self.entry();
        (*min..=*max).contains(&count)
    }

    fn entry(self) -> &'static (&'static str, Function, usize, usize) {
        // every variant has a table row
        FUNCTIONS
            .iter()
            .find(|(_, f, ..)| *f == self)
            .unwrap_or(&FUNCTIONS[0])
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
