//! Textual dumps of compiled style sheets.
//!
//! The output looks like MapCSS but is meant for debugging and snapshot
//! tests. It is not guaranteed to parse again.

use std::fmt;

use mapcss_core::{InternKey, KeyRegistry};

use crate::rules::{ClassKey, LayerKey};

/// Resolves the class and layer keys of a style sheet back to names.
#[derive(Debug, Clone, Copy)]
pub struct SymbolNames<'a> {
    classes: &'a KeyRegistry<ClassKey>,
    layers: &'a KeyRegistry<LayerKey>,
}

impl<'a> SymbolNames<'a> {
    pub(crate) fn new(classes: &'a KeyRegistry<ClassKey>, layers: &'a KeyRegistry<LayerKey>) -> Self {
        Self { classes, layers }
    }

    /// Name of a class.
    pub fn class(&self, key: ClassKey) -> &'a str {
        self.classes.name(key).unwrap_or("?")
    }

    /// Name of a layer.
    pub fn layer(&self, key: LayerKey) -> &'a str {
        self.layers.name(key).unwrap_or("?")
    }

    pub(crate) fn write_class(&self, out: &mut dyn fmt::Write, key: ClassKey) -> fmt::Result {
        match self.classes.name(key) {
            Some(name) => out.write_str(name),
            None => write!(out, "#{}", key.index()),
        }
    }

    pub(crate) fn write_layer(&self, out: &mut dyn fmt::Write, key: LayerKey) -> fmt::Result {
        match self.layers.name(key) {
            Some(name) => out.write_str(name),
            None => write!(out, "#{}", key.index()),
        }
    }
}

/// Write `text` in double quotes, escaping quotes and control characters.
pub(crate) fn write_quoted(out: &mut dyn fmt::Write, text: &str) -> fmt::Result {
    out.write_char('"')?;
    for c in text.chars() {
        match c {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\t' => out.write_str("\\t")?,
            c => out.write_char(c)?,
        }
    }
    out.write_char('"')
}

/// Write `items` with `separator` in between.
pub(crate) fn write_separated<T>(
    out: &mut dyn fmt::Write,
    items: &[T],
    separator: &str,
    mut write_item: impl FnMut(&mut dyn fmt::Write, &T) -> fmt::Result,
) -> fmt::Result {
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            out.write_str(separator)?;
        }
        write_item(&mut *out, item)?;
    }
    Ok(())
}
