//! Evaluation configuration.
//!
//! Closed ways are ambiguous: a closed `highway=pedestrian` is a loop road,
//! a closed `building` is an area. Unless the `area` tag says otherwise the
//! way type rules configured here decide. Rules are matched by tag key; for
//! a rule with a value list the listed values select the rule's kind and any
//! other value selects the opposite kind.
//!
//! # Example
//!
//! ```
//! use mapcss_style::config::{EvaluationConfig, WayKind};
//!
//! let config = EvaluationConfig::from_toml_str(r#"
//!     [[way_rules]]
//!     key = "building"
//!
//!     [[way_rules]]
//!     key = "barrier"
//!     kind = "line"
//! "#).unwrap();
//!
//! assert_eq!(config.way_rules.len(), 2);
//! assert_eq!(config.way_rules[1].kind, WayKind::Line);
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::{Error, Result};

/// Geometry a way type rule selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WayKind {
    /// A polygon.
    #[default]
    Area,
    /// A polyline.
    Line,
}

impl WayKind {
    /// The other kind.
    pub fn opposite(self) -> Self {
        match self {
            WayKind::Area => WayKind::Line,
            WayKind::Line => WayKind::Area,
        }
    }
}

/// Classification rule for closed ways.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WayTypeRule {
    /// Tag key the rule applies to.
    pub key: String,
    /// Kind selected by the rule.
    #[serde(default)]
    pub kind: WayKind,
    /// Values selecting `kind`. Empty means any value does.
    #[serde(default)]
    pub values: Vec<String>,
}

impl WayTypeRule {
    /// A rule selecting `kind` for any value of `key`.
    pub fn new(key: impl Into<String>, kind: WayKind) -> Self {
        Self {
            key: key.into(),
            kind,
            values: Vec::new(),
        }
    }

    /// Restrict the rule to `values`.
    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }
}

/// Settings for evaluating a style sheet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Closed way classification rules.
    pub way_rules: Vec<WayTypeRule>,
}

// see https://wiki.openstreetmap.org/wiki/Area
const HIGHWAY_AREAS: &[&str] = &["elevator", "platform", "rest_area", "services"];
const NATURAL_AREAS: &[&str] = &[
    "bare_rock",
    "bay",
    "beach",
    "crevasse",
    "desert",
    "fell",
    "glacier",
    "grassland",
    "heath",
    "landslide",
    "mud",
    "reef",
    "rock",
    "sand",
    "scree",
    "scrub",
    "shingle",
    "sinkhole",
    "stone",
    "water",
    "wetland",
    "wood",
];

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            way_rules: vec![
                WayTypeRule::new("building", WayKind::Area),
                WayTypeRule::new("building:levels", WayKind::Area),
                WayTypeRule::new("building:part", WayKind::Area),
                WayTypeRule::new("highway", WayKind::Area).with_values(HIGHWAY_AREAS.iter().copied()),
                WayTypeRule::new("natural", WayKind::Area).with_values(NATURAL_AREAS.iter().copied()),
            ],
        }
    }
}

impl EvaluationConfig {
    /// Parse a TOML document. Missing fields keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&content)
    }
}
