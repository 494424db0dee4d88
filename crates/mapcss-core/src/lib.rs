//! Data-source boundary for the MapCSS engine.
//!
//! This crate provides the pieces the style engine consumes but does not own:
//!
//! - **Key registries**: Deduplicated, index-based handles for interned strings
//! - **Tags**: Sorted key/value lists with binary-search lookup
//! - **Elements**: Nodes, ways and relations as a closed sum type of ids
//! - **Data sets**: In-memory element storage acting as the tag key source
//! - **Opening hours**: The collaborator consulted by `mx:closed`/`mx:open`
//!
//! # Example
//!
//! ```
//! use mapcss_core::{DataSet, DataSource, Node};
//!
//! let mut data = DataSet::new();
//! let amenity = data.make_tag_key("amenity");
//!
//! let mut node = Node::new(1);
//! node.tags.set(amenity, "cafe");
//! let id = data.add_node(node);
//!
//! let element = data.element(id.into()).unwrap();
//! assert_eq!(element.tag_value(amenity), Some("cafe"));
//! assert_eq!(data.tag_key("shop"), None);
//! ```

pub mod dataset;
pub mod element;
pub mod intern;
pub mod opening_hours;
pub mod tag;

pub use dataset::{DataSet, DataSource};
pub use element::{Element, ElementRef, ElementType, Member, Node, NodeId, Relation, RelationId, Way, WayId};
pub use intern::{InternKey, KeyRegistry};
pub use opening_hours::{FixedOpeningHours, OpeningHoursCache, SharedOpeningHours};
pub use tag::{Tag, TagKey, Tags};
