//! MapCSS selectors and matching.

mod condition;
mod matcher;
mod types;

pub use condition::{Condition, ConditionOperator, ConditionValue};
pub use matcher::{ApplyFn, MatchContext};
pub use types::*;
