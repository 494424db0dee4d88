//! Evaluation config loading tests.

use std::io::Write;

use mapcss_core::{DataSet, Node, Way};
use mapcss_style::Error;
use mapcss_style::prelude::*;

#[test]
fn test_load_config_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        r#"
[[way_rules]]
key = "man_made"
kind = "line"
values = ["embankment", "pipeline"]
"#
    )
    .expect("write config");

    let config = EvaluationConfig::from_file(file.path()).expect("config loads");
    assert_eq!(config.way_rules.len(), 1);
    assert_eq!(config.way_rules[0].key, "man_made");
    assert_eq!(config.way_rules[0].kind, WayKind::Line);
    assert_eq!(config.way_rules[0].values, ["embankment", "pipeline"]);
}

#[test]
fn test_loaded_config_drives_classification() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("style.toml");
    std::fs::write(
        &path,
        "[[way_rules]]\nkey = \"man_made\"\nkind = \"line\"\nvalues = [\"embankment\"]\n",
    )
    .expect("write config");

    let mut data = DataSet::new();
    let man_made = data.make_tag_key("man_made");
    let ring: Vec<_> = (1..=3).map(|id| data.add_node(Node::new(id))).collect();
    let closed_way = |value: &str, data: &mut DataSet| {
        let mut way = Way::new(1, vec![ring[0], ring[1], ring[2], ring[0]]);
        way.tags.set(man_made, value);
        data.add_way(way)
    };
    let embankment = closed_way("embankment", &mut data);
    let pier = closed_way("pier", &mut data);

    let mut style = StyleSheet::with_config(EvaluationConfig::from_file(&path).expect("config loads"));
    let line = style.make_class_key("line");
    let area = style.make_class_key("area");
    style.add_rule(BasicSelector::new(ObjectType::Line), Declarations::new().set_class(line));
    style.add_rule(BasicSelector::new(ObjectType::Area), Declarations::new().set_class(area));
    style.compile(&data);

    let classes_of = |way: mapcss_core::WayId| {
        let state = MapCssState::new(data.element(way.into()).expect("way"));
        let mut result = MapCssResult::new();
        style.evaluate(&state, &mut result);
        let layer = result.default_layer().expect("default layer");
        (layer.has_class(line), layer.has_class(area))
    };
    assert_eq!(classes_of(embankment), (true, false));
    assert_eq!(classes_of(pier), (false, true));
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = EvaluationConfig::from_file(dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }), "unexpected error: {err}");
    assert!(err.to_string().contains("missing.toml"));
}

#[test]
fn test_malformed_config_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "[[way_rules]]\nkind = \"sideways\"").expect("write config");

    let err = EvaluationConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err, Error::Config { .. }), "unexpected error: {err}");
}
