//! In-memory element storage.

use slotmap::SlotMap;

use crate::element::{Element, ElementRef, Node, NodeId, Relation, RelationId, Way, WayId};
use crate::intern::KeyRegistry;
use crate::tag::TagKey;

/// Source of tag keys for compiling a style sheet.
///
/// Compilation only ever looks keys up, it never interns new ones: a name
/// the data source does not know cannot occur on any of its elements.
pub trait DataSource {
    /// Look up the key for tag `name`, if any element could carry it.
    fn tag_key(&self, name: &str) -> Option<TagKey>;
}

/// A set of OSM elements sharing one tag key registry.
#[derive(Debug, Default)]
pub struct DataSet {
    tag_keys: KeyRegistry<TagKey>,
    nodes: SlotMap<NodeId, Node>,
    ways: SlotMap<WayId, Way>,
    relations: SlotMap<RelationId, Relation>,
}

impl DataSet {
    /// Create an empty data set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a tag key, creating it if needed.
    pub fn make_tag_key(&mut self, name: &str) -> TagKey {
        self.tag_keys.make_key(name)
    }

    /// Look up an existing tag key.
    #[inline]
    pub fn tag_key(&self, name: &str) -> Option<TagKey> {
        self.tag_keys.key(name)
    }

    /// Name of an interned tag key.
    pub fn tag_name(&self, key: TagKey) -> Option<&str> {
        self.tag_keys.name(key)
    }

    /// Add a node.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        self.nodes.insert(node)
    }

    /// Add a way.
    pub fn add_way(&mut self, way: Way) -> WayId {
        self.ways.insert(way)
    }

    /// Add a relation.
    pub fn add_relation(&mut self, relation: Relation) -> RelationId {
        self.relations.insert(relation)
    }

    /// Access a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Access a way.
    pub fn way(&self, id: WayId) -> Option<&Way> {
        self.ways.get(id)
    }

    /// Access a relation.
    pub fn relation(&self, id: RelationId) -> Option<&Relation> {
        self.relations.get(id)
    }

    /// Mutable access to a node.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Mutable access to a way.
    pub fn way_mut(&mut self, id: WayId) -> Option<&mut Way> {
        self.ways.get_mut(id)
    }

    /// Mutable access to a relation.
    pub fn relation_mut(&mut self, id: RelationId) -> Option<&mut Relation> {
        self.relations.get_mut(id)
    }

    /// Borrowed view of `element`, or `None` if it is not part of this set.
    pub fn element(&self, element: Element) -> Option<ElementRef<'_>> {
        match element {
            Element::Node(id) => self
                .nodes
                .get(id)
                .map(|n| ElementRef::new(self, element, &n.tags, false)),
            Element::Way(id) => self
                .ways
                .get(id)
                .map(|w| ElementRef::new(self, element, &w.tags, w.is_closed())),
            Element::Relation(id) => self
                .relations
                .get(id)
                .map(|r| ElementRef::new(self, element, &r.tags, false)),
        }
    }

    /// Iterate over all elements, nodes first, then ways, then relations.
    pub fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        let nodes = self.nodes.keys().map(Element::Node);
        let ways = self.ways.keys().map(Element::Way);
        let relations = self.relations.keys().map(Element::Relation);
        nodes
            .chain(ways)
            .chain(relations)
            .filter_map(move |e| self.element(e))
    }

    /// Number of elements of all kinds.
    pub fn len(&self) -> usize {
        self.nodes.len() + self.ways.len() + self.relations.len()
    }

    /// Check if the set holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DataSource for DataSet {
    fn tag_key(&self, name: &str) -> Option<TagKey> {
        self.tag_keys.key(name)
    }
}

static_assertions::assert_impl_all!(DataSet: Send, Sync);
static_assertions::assert_eq_size!(TagKey, u32);
