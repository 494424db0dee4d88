//! Declarations and the property table.

mod builder;
mod declaration;
mod keywords;
mod properties;

pub use builder::Declarations;
pub use declaration::{Declaration, PropertyDeclaration, PropertyValue, TagDeclaration, TagValue};
pub use keywords::{CapStyle, Capitalization, JoinStyle, TextPosition, Unit};
pub use properties::{Property, PropertyFlags};
