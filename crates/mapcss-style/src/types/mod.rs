//! Value types shared by expressions and declarations.

mod color;
mod value;

pub use color::Color;
pub use value::Value;
pub(crate) use value::parse_number;
