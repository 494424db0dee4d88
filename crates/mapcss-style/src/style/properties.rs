//! Known style properties and their capability flags.

use bitflags::bitflags;

bitflags! {
    /// What kind of scene output a property contributes to.
    ///
    /// Only properties that on their own cause an item to be emitted carry a
    /// flag. A label needs a text or an icon, so `text` is a label property
    /// while `font-size` is not.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PropertyFlags: u8 {
        /// Fills or outlines a polygon.
        const AREA = 0b0000_0001;
        /// Strokes a polyline.
        const LINE = 0b0000_0010;
        /// Places a text or icon label.
        const LABEL = 0b0000_0100;
        /// Applies to the map background.
        const CANVAS = 0b0000_1000;
        /// Extrudes a building.
        const EXTRUDE = 0b0001_0000;
    }
}

/// A style property.
///
/// Declarations in a result layer are ordered by this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Property {
    /// A name not in the property table. Never applied.
    #[default]
    Unknown,
    CasingColor,
    CasingDashes,
    CasingLineCap,
    CasingLineJoin,
    CasingOpacity,
    CasingWidth,
    Color,
    Dashes,
    Extrude,
    FillColor,
    FillImage,
    FillOpacity,
    FontFamily,
    FontSize,
    FontStyle,
    FontVariant,
    FontWeight,
    IconAllowIconOverlap,
    IconAllowTextOverlap,
    IconColor,
    IconHeight,
    IconImage,
    IconOpacity,
    IconWidth,
    Image,
    LineCap,
    LineJoin,
    MaxWidth,
    Opacity,
    ShieldCasingColor,
    ShieldCasingWidth,
    ShieldColor,
    ShieldFrameColor,
    ShieldFrameWidth,
    ShieldImage,
    ShieldOpacity,
    ShieldShape,
    ShieldText,
    Text,
    TextColor,
    TextDecoration,
    TextHaloColor,
    TextHaloRadius,
    TextOffset,
    TextOpacity,
    TextPosition,
    TextTransform,
    Width,
    ZIndex,
}

const NONE: PropertyFlags = PropertyFlags::empty();

// keep sorted by name
static PROPERTIES: &[(&str, Property, PropertyFlags)] = &[
    ("casing-color", Property::CasingColor, NONE),
    ("casing-dashes", Property::CasingDashes, NONE),
    ("casing-linecap", Property::CasingLineCap, NONE),
    ("casing-linejoin", Property::CasingLineJoin, NONE),
    ("casing-opacity", Property::CasingOpacity, NONE),
    ("casing-width", Property::CasingWidth, NONE),
    ("color", Property::Color, PropertyFlags::LINE),
    ("dashes", Property::Dashes, NONE),
    ("extrude", Property::Extrude, PropertyFlags::EXTRUDE),
    ("fill-color", Property::FillColor, PropertyFlags::AREA.union(PropertyFlags::CANVAS)),
    ("fill-image", Property::FillImage, PropertyFlags::AREA.union(PropertyFlags::CANVAS)),
    ("fill-opacity", Property::FillOpacity, PropertyFlags::AREA),
    ("font-family", Property::FontFamily, NONE),
    ("font-size", Property::FontSize, NONE),
    ("font-style", Property::FontStyle, NONE),
    ("font-variant", Property::FontVariant, NONE),
    ("font-weight", Property::FontWeight, NONE),
    ("icon-allow-icon-overlap", Property::IconAllowIconOverlap, NONE),
    ("icon-allow-text-overlap", Property::IconAllowTextOverlap, NONE),
    ("icon-color", Property::IconColor, NONE),
    ("icon-height", Property::IconHeight, NONE),
    ("icon-image", Property::IconImage, PropertyFlags::LABEL),
    ("icon-opacity", Property::IconOpacity, NONE),
    ("icon-width", Property::IconWidth, NONE),
    ("image", Property::Image, PropertyFlags::LINE),
    ("linecap", Property::LineCap, NONE),
    ("linejoin", Property::LineJoin, NONE),
    ("max-width", Property::MaxWidth, NONE),
    ("opacity", Property::Opacity, NONE),
    ("shield-casing-color", Property::ShieldCasingColor, PropertyFlags::LABEL),
    ("shield-casing-width", Property::ShieldCasingWidth, NONE),
    ("shield-color", Property::ShieldColor, PropertyFlags::LABEL),
    ("shield-frame-color", Property::ShieldFrameColor, PropertyFlags::LABEL),
    ("shield-frame-width", Property::ShieldFrameWidth, NONE),
    ("shield-image", Property::ShieldImage, PropertyFlags::LABEL),
    ("shield-opacity", Property::ShieldOpacity, NONE),
    ("shield-shape", Property::ShieldShape, NONE),
    ("shield-text", Property::ShieldText, PropertyFlags::LABEL),
    ("text", Property::Text, PropertyFlags::LABEL),
    ("text-color", Property::TextColor, PropertyFlags::CANVAS),
    ("text-decoration", Property::TextDecoration, NONE),
    ("text-halo-color", Property::TextHaloColor, NONE),
    ("text-halo-radius", Property::TextHaloRadius, NONE),
    ("text-offset", Property::TextOffset, NONE),
    ("text-opacity", Property::TextOpacity, NONE),
    ("text-position", Property::TextPosition, NONE),
    ("text-transform", Property::TextTransform, NONE),
    ("width", Property::Width, PropertyFlags::LINE),
    ("z-index", Property::ZIndex, NONE),
];

impl Property {
    /// Look up a property by its MapCSS name.
    pub fn from_name(name: &str) -> Property {
        Self::lookup(name).map_or(Property::Unknown, |(_, p, _)| *p)
    }

    /// The MapCSS name, `None` for [`Property::Unknown`].
    pub fn name(self) -> Option<&'static str> {
        PROPERTIES
            .iter()
            .find(|(_, p, _)| *p == self)
            .map(|(name, _, _)| *name)
    }

    /// Capability flags of this property.
    pub fn flags(self) -> PropertyFlags {
        PROPERTIES
            .iter()
            .find(|(_, p, _)| *p == self)
            .map_or(PropertyFlags::empty(), |(_, _, flags)| *flags)
    }

    /// Resolve `name` to the property and its flags in one lookup.
    pub(crate) fn lookup(name: &str) -> Option<&'static (&'static str, Property, PropertyFlags)> {
        PROPERTIES
            .binary_search_by(|(n, _, _)| (*n).cmp(name))
            .ok()
            .map(|idx| &PROPERTIES[idx])
    }

    /// All known properties in name order.
    pub fn all() -> impl Iterator<Item = Property> {
        PROPERTIES.iter().map(|(_, p, _)| *p)
    }
}
