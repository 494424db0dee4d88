//! OSM elements.
//!
//! Elements are stored in a [`DataSet`](crate::DataSet) and referred to by
//! generational ids. [`Element`] is the tagged union over those ids and
//! serves as the element identity, e.g. for memoizing caches.

use slotmap::new_key_type;

use crate::dataset::DataSet;
use crate::tag::{Tag, TagKey, Tags};

new_key_type! {
    /// Handle of a node inside its data set.
    pub struct NodeId;
    /// Handle of a way inside its data set.
    pub struct WayId;
    /// Handle of a relation inside its data set.
    pub struct RelationId;
}

/// Reference to any element of a data set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    /// A node.
    Node(NodeId),
    /// A way.
    Way(WayId),
    /// A relation.
    Relation(RelationId),
}

impl Element {
    /// The kind of element this refers to.
    pub fn element_type(self) -> ElementType {
        match self {
            Element::Node(_) => ElementType::Node,
            Element::Way(_) => ElementType::Way,
            Element::Relation(_) => ElementType::Relation,
        }
    }
}

impl From<NodeId> for Element {
    fn from(id: NodeId) -> Self {
        Element::Node(id)
    }
}

impl From<WayId> for Element {
    fn from(id: WayId) -> Self {
        Element::Way(id)
    }
}

impl From<RelationId> for Element {
    fn from(id: RelationId) -> Self {
        Element::Relation(id)
    }
}

/// Element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// A point.
    Node,
    /// An ordered list of nodes.
    Way,
    /// A group of elements.
    Relation,
}

/// A point element.
#[derive(Debug, Clone, Default)]
pub struct Node {
    /// OSM id.
    pub id: i64,
    /// Tags, sorted by key.
    pub tags: Tags,
}

impl Node {
    /// Create an untagged node.
    pub fn new(id: i64) -> Self {
        Self { id, tags: Tags::new() }
    }
}

/// A polyline or polygon.
#[derive(Debug, Clone, Default)]
pub struct Way {
    /// OSM id.
    pub id: i64,
    /// Node references, in order.
    pub nodes: Vec<NodeId>,
    /// Tags, sorted by key.
    pub tags: Tags,
}

impl Way {
    /// Create an untagged way over `nodes`.
    pub fn new(id: i64, nodes: Vec<NodeId>) -> Self {
        Self {
            id,
            nodes,
            tags: Tags::new(),
        }
    }

    /// A way is closed if it ends where it starts.
    pub fn is_closed(&self) -> bool {
        self.nodes.len() >= 2 && self.nodes.first() == self.nodes.last()
    }
}

/// Relation member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// The member element.
    pub element: Element,
    /// Member role, e.g. `outer`.
    pub role: String,
}

/// A group of elements.
#[derive(Debug, Clone, Default)]
pub struct Relation {
    /// OSM id.
    pub id: i64,
    /// Members, in order.
    pub members: Vec<Member>,
    /// Tags, sorted by key.
    pub tags: Tags,
}

impl Relation {
    /// Create an untagged relation.
    pub fn new(id: i64, members: Vec<Member>) -> Self {
        Self {
            id,
            members,
            tags: Tags::new(),
        }
    }
}

/// Borrowed view of an element together with its data set.
///
/// This is what style evaluation works on: the element kind, its shape
/// predicates and its sorted tags.
#[derive(Debug, Clone, Copy)]
pub struct ElementRef<'a> {
    data: &'a DataSet,
    id: Element,
    tags: &'a Tags,
    closed: bool,
}

impl<'a> ElementRef<'a> {
    pub(crate) fn new(data: &'a DataSet, id: Element, tags: &'a Tags, closed: bool) -> Self {
        Self {
            data,
            id,
            tags,
            closed,
        }
    }

    /// Identity of this element.
    #[inline]
    pub fn id(&self) -> Element {
        self.id
    }

    /// The data set the element belongs to.
    #[inline]
    pub fn data_set(&self) -> &'a DataSet {
        self.data
    }

    /// Kind of this element.
    #[inline]
    pub fn element_type(&self) -> ElementType {
        self.id.element_type()
    }

    /// Check if this is a closed way.
    pub fn is_closed_way(&self) -> bool {
        self.closed
    }

    /// Check if this is a relation tagged `type=multipolygon`.
    pub fn is_multipolygon(&self) -> bool {
        if self.element_type() != ElementType::Relation {
            return false;
        }
        self.data
            .tag_key("type")
            .and_then(|key| self.tags.get(key))
            == Some("multipolygon")
    }

    /// Tags in ascending key order.
    #[inline]
    pub fn tags(&self) -> &'a [Tag] {
        self.tags.as_slice()
    }

    /// Value of tag `key`.
    #[inline]
    pub fn tag_value(&self, key: TagKey) -> Option<&'a str> {
        self.tags.get(key)
    }

    /// Value of the tag named `name`.
    ///
    /// Slower than [`tag_value`](Self::tag_value), as it first resolves the
    /// key through the data set.
    pub fn tag_value_by_name(&self, name: &str) -> Option<&'a str> {
        self.data
            .tag_key(name)
            .and_then(|key| self.tags.get(key))
    }
}
