//! Heap allocation tests for warm evaluation.
//!
//! Installs a counting global allocator, so these tests live in their own
//! test binary.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::sync::atomic::{AtomicUsize, Ordering};

use mapcss_core::{DataSet, Element, FixedOpeningHours, Node, Way};
use mapcss_style::prelude::*;

struct CountingAllocator;

static ALLOCATIONS: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    static COUNTING: Cell<bool> = const { Cell::new(false) };
}

fn record() {
    if COUNTING.try_with(Cell::get).unwrap_or(false) {
        ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
    }
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        record();
        unsafe { System.alloc(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        record();
        unsafe { System.realloc(ptr, layout, new_size) }
    }
}

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

/// Count allocations made by `f` on the current thread.
fn count_allocations(f: impl FnOnce()) -> usize {
    ALLOCATIONS.store(0, Ordering::Relaxed);
    COUNTING.with(|c| c.set(true));
    f();
    COUNTING.with(|c| c.set(false));
    ALLOCATIONS.load(Ordering::Relaxed)
}

#[test]
fn test_warm_evaluation_does_not_allocate() {
    let mut data = DataSet::new();
    let highway = data.make_tag_key("highway");
    let lanes = data.make_tag_key("lanes");
    let building = data.make_tag_key("building");
    let hours = data.make_tag_key("opening_hours");

    let ring: Vec<_> = (1..=3).map(|id| data.add_node(Node::new(id))).collect();
    let mut road = Way::new(1, vec![ring[0], ring[1], ring[2]]);
    road.tags.set(highway, "motorway");
    road.tags.set(lanes, "4");
    let road = data.add_way(road);

    let mut hall = Way::new(2, vec![ring[0], ring[1], ring[2], ring[0]]);
    hall.tags.set(building, "yes");
    let hall = data.add_way(hall);

    let mut shop = Node::new(4);
    shop.tags.set(hours, "off");
    let shop = data.add_node(shop);

    let mut style = StyleSheet::new();
    let wide = style.make_class_key("wide");
    let casing = style.make_layer_key("casing");
    style.add_rule(
        BasicSelector::new(ObjectType::Way).with_condition(Condition::has("highway")),
        Declarations::new().color(Color::BLACK).width(2.0).dashes(vec![4.0, 2.0]),
    );
    style.add_rule(
        BasicSelector::new(ObjectType::Way)
            .with_zoom(ZoomRange::new(10, 0))
            .with_condition(Condition::greater_than("lanes", 2.0)),
        Declarations::new().set_class(wide).set_tag("layer", 1.0),
    );
    style.add_rule(
        UnionSelector::new()
            .with(BasicSelector::new(ObjectType::Line).with_class(wide).with_layer(casing))
            .with(BasicSelector::new(ObjectType::Area).with_layer(casing)),
        Declarations::new().color(Color::WHITE).width(5.0).z_index(-1.0),
    );
    style.add_rule(
        BasicSelector::new(ObjectType::Way).with_condition(Condition::equals("highway", "motorway")),
        Declarations::new().color(Color::BLUE).text("A1"),
    );
    style.add_rule(
        BasicSelector::new(ObjectType::Node).with_condition(Condition::has("mx:closed")),
        Declarations::new().fill_color(Color::RED),
    );
    style.compile(&data);

    let cache = FixedOpeningHours::new().with("off", false, true);
    let elements: [Element; 3] = [road.into(), hall.into(), shop.into()];
    let states: Vec<_> = elements
        .into_iter()
        .map(|e| {
            MapCssState::new(data.element(e).expect("element"))
                .with_zoom_level(14.0)
                .with_opening_hours(&cache)
        })
        .collect();

    let mut result = MapCssResult::new();
    for _ in 0..4 {
        for state in &states {
            style.evaluate(state, &mut result);
        }
    }

    let allocations = count_allocations(|| {
        for _ in 0..100 {
            for state in &states {
                style.evaluate(state, &mut result);
            }
        }
    });
    assert_eq!(allocations, 0, "warm evaluation allocated {allocations} times");

    style.evaluate(&states[0], &mut result);
    assert_eq!(result.results().len(), 2);
    assert!(result.layer(Some(casing)).is_some());
}
