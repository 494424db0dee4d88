//! Parallel evaluation tests.

use mapcss_core::{DataSet, Element, FixedOpeningHours, Node, SharedOpeningHours, Way};
use mapcss_style::prelude::*;
use rayon::prelude::*;

const HIGHWAYS: &[&str] = &["motorway", "primary", "residential", "footway"];

fn build_data() -> (DataSet, Vec<Element>) {
    let mut data = DataSet::new();
    let highway = data.make_tag_key("highway");
    let lanes = data.make_tag_key("lanes");
    let hours = data.make_tag_key("opening_hours");
    let mut elements = Vec::new();

    for i in 0..400_i64 {
        let a = data.add_node(Node::new(i * 2));
        let b = data.add_node(Node::new(i * 2 + 1));
        let mut way = Way::new(i, vec![a, b]);
        way.tags.set(highway, HIGHWAYS[i as usize % HIGHWAYS.len()]);
        way.tags.set(lanes, (i % 5).to_string());
        elements.push(data.add_way(way).into());

        let mut shop = Node::new(10_000 + i);
        shop.tags.set(hours, if i % 3 == 0 { "off" } else { "24/7" });
        elements.push(data.add_node(shop).into());
    }
    (data, elements)
}

fn build_style(data: &DataSet) -> StyleSheet {
    let mut style = StyleSheet::new();
    let wide = style.make_class_key("wide");
    let casing = style.make_layer_key("casing");
    style.add_rule(
        BasicSelector::new(ObjectType::Way).with_condition(Condition::has("highway")),
        Declarations::new().color(Color::BLACK).width(1.0),
    );
    style.add_rule(
        BasicSelector::new(ObjectType::Way).with_condition(Condition::greater_or_equal("lanes", 3.0)),
        Declarations::new().set_class(wide).width(4.0),
    );
    style.add_rule(
        BasicSelector::new(ObjectType::Way).with_class(wide).with_layer(casing),
        Declarations::new().color(Color::WHITE).width(6.0),
    );
    style.add_rule(
        BasicSelector::new(ObjectType::Way).with_condition(Condition::equals("highway", "motorway")),
        Declarations::new().color(Color::BLUE),
    );
    style.add_rule(
        BasicSelector::new(ObjectType::Node).with_condition(Condition::has("mx:closed")),
        Declarations::new().color(Color::RED),
    );
    style.compile(data);
    style
}

type Summary = Vec<(bool, Option<Color>, Option<f64>)>;

/// Flattened view of a result that outlives the style sheet borrow.
fn summarize(result: &MapCssResult<'_>) -> Summary {
    result
        .results()
        .iter()
        .map(|layer| {
            (
                layer.layer_key().is_some(),
                layer.declaration(Property::Color).and_then(|d| d.color_value()),
                layer.declaration(Property::Width).map(|d| d.double_value()),
            )
        })
        .collect()
}

fn evaluate<'s>(
    style: &'s StyleSheet,
    data: &DataSet,
    cache: &SharedOpeningHours<FixedOpeningHours>,
    result: &mut MapCssResult<'s>,
    element: Element,
) -> Summary {
    let state = MapCssState::new(data.element(element).expect("element"))
        .with_zoom_level(15.0)
        .with_opening_hours(cache);
    style.evaluate(&state, result);
    summarize(result)
}

#[test]
fn test_parallel_matches_sequential() {
    let (data, elements) = build_data();
    let style = build_style(&data);
    let cache = SharedOpeningHours::new(FixedOpeningHours::new().with("off", false, true));

    let mut result = MapCssResult::new();
    let sequential: Vec<Summary> = elements
        .iter()
        .map(|&e| evaluate(&style, &data, &cache, &mut result, e))
        .collect();

    let parallel: Vec<Summary> = elements
        .par_iter()
        .map_init(MapCssResult::new, |result, &e| evaluate(&style, &data, &cache, result, e))
        .collect();

    assert_eq!(parallel, sequential);
}

#[test]
fn test_parallel_results_are_correct() {
    let (data, elements) = build_data();
    let style = build_style(&data);
    let cache = SharedOpeningHours::new(FixedOpeningHours::new().with("off", false, true));

    let red_nodes = elements
        .par_iter()
        .filter(|&&e| matches!(e, Element::Node(_)))
        .map_init(MapCssResult::new, |result, &e| {
            let state = MapCssState::new(data.element(e).expect("element")).with_opening_hours(&cache);
            style.evaluate(&state, result);
            result
                .default_layer()
                .and_then(|layer| layer.declaration(Property::Color))
                .and_then(|d| d.color_value())
                == Some(Color::RED)
        })
        .filter(|&red| red)
        .count();
    assert_eq!(red_nodes, (0..400).filter(|i| i % 3 == 0).count());

    let casings = elements
        .par_iter()
        .map_init(MapCssResult::new, |result, &e| {
            let state = MapCssState::new(data.element(e).expect("element"));
            style.evaluate(&state, result);
            result.results().len()
        })
        .filter(|&layers| layers == 2)
        .count();
    assert_eq!(casings, (0..400).filter(|i| i % 5 >= 3).count());
}
