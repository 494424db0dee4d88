//! Element classification for object type selectors.
//!
//! Deciding whether a way is a line or an area needs tag lookups. It is done
//! once per evaluation, before the rule loop, instead of in every `area` or
//! `line` selector.

use mapcss_core::{DataSource, ElementRef, ElementType, TagKey};

use crate::config::{EvaluationConfig, WayKind};
use crate::logging::targets;

/// Geometry class of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectClass {
    /// A node.
    Node,
    /// An open way, or a closed way that is explicitly not an area.
    Line,
    /// A closed way or multipolygon that is an area.
    Area,
    /// A closed way nothing decides about. Matches both `line` and `area`.
    LineOrArea,
    /// A relation other than a multipolygon.
    Relation,
}

impl ObjectClass {
    /// Check whether `area` selectors apply.
    pub fn is_area(self) -> bool {
        matches!(self, ObjectClass::Area | ObjectClass::LineOrArea)
    }

    /// Check whether `line` selectors apply.
    pub fn is_line(self) -> bool {
        matches!(self, ObjectClass::Line | ObjectClass::LineOrArea)
    }
}

impl From<WayKind> for ObjectClass {
    fn from(kind: WayKind) -> Self {
        match kind {
            WayKind::Area => ObjectClass::Area,
            WayKind::Line => ObjectClass::Line,
        }
    }
}

#[derive(Debug, Clone)]
struct CompiledWayRule {
    key: TagKey,
    kind: WayKind,
    values: Vec<String>,
}

/// Way type rules resolved against a data source.
#[derive(Debug, Clone, Default)]
pub(crate) struct ObjectClassifier {
    area_key: Option<TagKey>,
    type_key: Option<TagKey>,
    // sorted by key
    rules: Vec<CompiledWayRule>,
}

impl ObjectClassifier {
    pub(crate) fn compile<D: DataSource + ?Sized>(config: &EvaluationConfig, data: &D) -> Self {
        let mut rules: Vec<_> = config
            .way_rules
            .iter()
            .filter_map(|rule| {
                let key = data.tag_key(&rule.key)?;
                let mut values = rule.values.clone();
                values.sort_unstable();
                Some(CompiledWayRule {
                    key,
                    kind: rule.kind,
                    values,
                })
            })
            .collect();
        rules.sort_by_key(|rule| rule.key);
        rules.dedup_by_key(|rule| rule.key);

        tracing::debug!(
            target: targets::COMPILE,
            "{} of {} way type rules apply to this data set",
            rules.len(),
            config.way_rules.len()
        );

        Self {
            area_key: data.tag_key("area"),
            type_key: data.tag_key("type"),
            rules,
        }
    }

    pub(crate) fn classify(&self, element: &ElementRef<'_>) -> ObjectClass {
        match element.element_type() {
            ElementType::Node => ObjectClass::Node,
            ElementType::Way => self.classify_way(element),
            ElementType::Relation => {
                let kind = self.type_key.and_then(|key| element.tag_value(key));
                if kind == Some("multipolygon") {
                    ObjectClass::Area
                } else {
                    ObjectClass::Relation
                }
            }
        }
    }

    fn classify_way(&self, element: &ElementRef<'_>) -> ObjectClass {
        if !element.is_closed_way() {
            return ObjectClass::Line;
        }

        match self.area_key.and_then(|key| element.tag_value(key)) {
            Some("yes") => return ObjectClass::Area,
            Some(area) if !area.is_empty() => return ObjectClass::Line,
            _ => {}
        }

        // tags and rules are both sorted by key, the first hit decides
        for tag in element.tags() {
            let Ok(idx) = self.rules.binary_search_by_key(&tag.key, |rule| rule.key) else {
                continue;
            };
            let rule = &self.rules[idx];
            let selected = rule.values.is_empty() || rule.values.binary_search(&tag.value).is_ok();
            let kind = if selected { rule.kind } else { rule.kind.opposite() };
            tracing::trace!(target: targets::EVALUATE, "closed way classified as {kind:?} by tag {}", tag.value);
            return kind.into();
        }

        ObjectClass::LineOrArea
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapcss_core::{DataSet, Node, Relation, Way, WayId};

    struct Fixture {
        data: DataSet,
        ring: Vec<mapcss_core::NodeId>,
    }

    impl Fixture {
        fn new() -> Self {
            let mut data = DataSet::new();
            for key in ["area", "type", "building", "highway", "natural", "name", "barrier"] {
                data.make_tag_key(key);
            }
            let a = data.add_node(Node::new(1));
            let b = data.add_node(Node::new(2));
            let c = data.add_node(Node::new(3));
            Self {
                data,
                ring: vec![a, b, c, a],
            }
        }

        fn way(&mut self, closed: bool, tags: &[(&str, &str)]) -> WayId {
            let nodes = if closed { self.ring.clone() } else { self.ring[..3].to_vec() };
            let mut way = Way::new(1, nodes);
            for (k, v) in tags {
                let key = self.data.make_tag_key(k);
                way.tags.set(key, *v);
            }
            self.data.add_way(way)
        }

        fn classify(&self, config: &EvaluationConfig, way: WayId) -> ObjectClass {
            let classifier = ObjectClassifier::compile(config, &self.data);
            classifier.classify(&self.data.element(way.into()).unwrap())
        }
    }

    #[test]
    fn open_and_explicit_ways() {
        let mut f = Fixture::new();
        let config = EvaluationConfig::default();

        let open = f.way(false, &[("building", "yes")]);
        let area = f.way(true, &[("area", "yes"), ("highway", "pedestrian")]);
        let not_area = f.way(true, &[("area", "no"), ("building", "yes")]);

        assert_eq!(f.classify(&config, open), ObjectClass::Line);
        assert_eq!(f.classify(&config, area), ObjectClass::Area);
        assert_eq!(f.classify(&config, not_area), ObjectClass::Line);
    }

    #[test]
    fn way_type_rules() {
        let mut f = Fixture::new();
        let config = EvaluationConfig::default();

        let building = f.way(true, &[("building", "yes")]);
        let platform = f.way(true, &[("highway", "platform")]);
        let road = f.way(true, &[("highway", "residential")]);
        let lake = f.way(true, &[("natural", "water")]);
        let coast = f.way(true, &[("natural", "coastline")]);
        let unknown = f.way(true, &[("name", "Ring")]);

        assert_eq!(f.classify(&config, building), ObjectClass::Area);
        assert_eq!(f.classify(&config, platform), ObjectClass::Area);
        assert_eq!(f.classify(&config, road), ObjectClass::Line);
        assert_eq!(f.classify(&config, lake), ObjectClass::Area);
        assert_eq!(f.classify(&config, coast), ObjectClass::Line);
        assert_eq!(f.classify(&config, unknown), ObjectClass::LineOrArea);
    }

    #[test]
    fn configured_rules() {
        let mut f = Fixture::new();
        let config = EvaluationConfig {
            way_rules: vec![crate::config::WayTypeRule::new("barrier", WayKind::Line)],
        };

        let fence = f.way(true, &[("barrier", "fence")]);
        let building = f.way(true, &[("building", "yes")]);

        assert_eq!(f.classify(&config, fence), ObjectClass::Line);
        assert_eq!(f.classify(&config, building), ObjectClass::LineOrArea);
    }

    #[test]
    fn relations_and_nodes() {
        let mut f = Fixture::new();
        let type_key = f.data.tag_key("type").unwrap();

        let mut mp = Relation::new(1, vec![]);
        mp.tags.set(type_key, "multipolygon");
        let mp = f.data.add_relation(mp);
        let route = f.data.add_relation(Relation::new(2, vec![]));
        let node = f.ring[0];

        let classifier = ObjectClassifier::compile(&EvaluationConfig::default(), &f.data);
        let class_of = |e: mapcss_core::Element| classifier.classify(&f.data.element(e).unwrap());

        assert_eq!(class_of(mp.into()), ObjectClass::Area);
        assert_eq!(class_of(route.into()), ObjectClass::Relation);
        assert_eq!(class_of(node.into()), ObjectClass::Node);
        assert!(ObjectClass::LineOrArea.is_area() && ObjectClass::LineOrArea.is_line());
    }
}
