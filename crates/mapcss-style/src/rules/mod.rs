//! Rules and style sheets.

mod rule;
mod stylesheet;

pub use rule::Rule;
pub use stylesheet::StyleSheet;

mapcss_core::key_type! {
    /// Interned class name, obtained from a [`StyleSheet`].
    pub struct ClassKey;
    /// Interned layer selector name, obtained from a [`StyleSheet`].
    pub struct LayerKey;
}
