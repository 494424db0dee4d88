//! Identifier values understood by specific properties.

use std::fmt;

/// Unit suffix of a numeric property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// `m`
    Meters,
    /// `pt`
    Points,
    /// `px`
    Pixels,
}

impl Unit {
    /// Parse a unit suffix.
    pub fn from_name(name: &str) -> Option<Unit> {
        match name {
            "m" => Some(Unit::Meters),
            "pt" => Some(Unit::Points),
            "px" => Some(Unit::Pixels),
            _ => None,
        }
    }

    /// The suffix as written after a number.
    pub fn name(self) -> &'static str {
        match self {
            Unit::Meters => "m",
            Unit::Points => "pt",
            Unit::Pixels => "px",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Line end style, from `linecap` and `casing-linecap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CapStyle {
    /// `none`
    #[default]
    Flat,
    /// `round`
    Round,
    /// `square`
    Square,
}

impl CapStyle {
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name {
            "none" => Some(CapStyle::Flat),
            "round" => Some(CapStyle::Round),
            "square" => Some(CapStyle::Square),
            _ => None,
        }
    }
}

/// Line corner style, from `linejoin` and `casing-linejoin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JoinStyle {
    Bevel,
    Miter,
    #[default]
    Round,
}

impl JoinStyle {
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name {
            "bevel" => Some(JoinStyle::Bevel),
            "miter" => Some(JoinStyle::Miter),
            "round" => Some(JoinStyle::Round),
            _ => None,
        }
    }
}

/// Text case transformation, from `text-transform` and `font-variant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Capitalization {
    /// `capitalize`
    Capitalize,
    /// `lowercase`
    Lowercase,
    /// `none` or `normal`
    #[default]
    Mixed,
    /// `small-caps`
    SmallCaps,
    /// `uppercase`
    Uppercase,
}

impl Capitalization {
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name {
            "capitalize" => Some(Capitalization::Capitalize),
            "lowercase" => Some(Capitalization::Lowercase),
            "none" | "normal" => Some(Capitalization::Mixed),
            "small-caps" => Some(Capitalization::SmallCaps),
            "uppercase" => Some(Capitalization::Uppercase),
            _ => None,
        }
    }
}

/// Label placement, from `text-position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextPosition {
    /// Centered on the element.
    Center,
    /// Along the line.
    Line,
}

impl TextPosition {
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name {
            "center" => Some(TextPosition::Center),
            "line" => Some(TextPosition::Line),
            _ => None,
        }
    }
}
