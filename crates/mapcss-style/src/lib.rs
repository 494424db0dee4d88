//! MapCSS style rule compiler and evaluator.
//!
//! This crate decides, for each map element and rendering context, which
//! visual properties, tag overrides and classes apply:
//!
//! - **Selectors**: Object type, zoom range, class, element state and tag
//!   conditions, combined into unions
//! - **Declarations**: Style properties, tag overrides and classes
//! - **Expressions**: The `eval()` language with tag and property reads
//! - **Cascading**: Rules applied strictly in source order, later rules
//!   overriding earlier ones
//! - **Results**: Reusable per-layer accumulators that stop allocating once
//!   warmed up
//!
//! Style sheets are built programmatically (the textual grammar lives in a
//! separate parser), compiled once against a [`mapcss_core::DataSource`],
//! and then evaluated element by element.
//!
//! # Example
//!
//! ```
//! use mapcss_core::{DataSet, Node};
//! use mapcss_style::prelude::*;
//!
//! let mut data = DataSet::new();
//! let amenity = data.make_tag_key("amenity");
//! let mut node = Node::new(1);
//! node.tags.set(amenity, "cafe");
//! let node = data.add_node(node);
//!
//! let mut style = StyleSheet::new();
//! let poi = style.make_class_key("poi");
//! style.add_rule(
//!     BasicSelector::new(ObjectType::Node).with_condition(Condition::has("amenity")),
//!     Declarations::new().set_class(poi),
//! );
//! style.add_rule(
//!     BasicSelector::new(ObjectType::Node).with_class(poi),
//!     Declarations::new().text("Cafe"),
//! );
//! style.compile(&data);
//!
//! let mut result = MapCssResult::new();
//! style.evaluate(&MapCssState::new(data.element(node.into()).unwrap()), &mut result);
//! assert!(result.default_layer().unwrap().has_label_properties());
//! ```

pub mod config;
pub mod expression;
pub mod logging;
pub mod resolve;
pub mod rules;
pub mod selector;
pub mod style;
pub mod types;
pub mod writer;

mod error;

pub use error::{Error, Result};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::config::{EvaluationConfig, WayKind, WayTypeRule};
    pub use crate::expression::{BinaryOp, Expression, Function, Term};
    pub use crate::resolve::{ElementState, MapCssResult, MapCssState, ObjectClass, ResultLayer};
    pub use crate::rules::{ClassKey, LayerKey, Rule, StyleSheet};
    pub use crate::selector::{
        BasicSelector, ChainedSelector, Condition, ConditionOperator, ObjectType, Selector, UnionSelector,
        ZoomRange,
    };
    pub use crate::style::{Declaration, Declarations, Property, PropertyDeclaration, PropertyValue, Unit};
    pub use crate::types::{Color, Value};
}
