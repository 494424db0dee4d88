//! Per-call evaluation input.

use std::fmt;

use bitflags::bitflags;
use mapcss_core::{ElementRef, OpeningHoursCache};

bitflags! {
    /// Interaction states testable with `:active` and `:hovered`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ElementState: u8 {
        /// The element is selected.
        const ACTIVE = 0b01;
        /// The pointer is over the element.
        const HOVERED = 0b10;
    }
}

impl ElementState {
    /// Pseudo-class name of a single state flag.
    pub fn pseudo_class_name(self) -> Option<&'static str> {
        if self == ElementState::ACTIVE {
            Some("active")
        } else if self == ElementState::HOVERED {
            Some("hovered")
        } else {
            None
        }
    }
}

/// What a style is evaluated for.
///
/// Callers keep one instance per worker and refill it for every element.
#[derive(Clone, Copy, Default)]
pub struct MapCssState<'a> {
    /// The element being styled. `None` for canvas evaluation.
    pub element: Option<ElementRef<'a>>,
    /// Current zoom level.
    pub zoom_level: f64,
    /// Floor level, in tenths of a level.
    pub floor_level: i32,
    /// Interaction state of the element.
    pub element_state: ElementState,
    /// Opening hours evaluation for `mx:closed` and `mx:open`.
    pub opening_hours: Option<&'a dyn OpeningHoursCache>,
}

impl<'a> MapCssState<'a> {
    /// State for styling `element`.
    pub fn new(element: ElementRef<'a>) -> Self {
        Self {
            element: Some(element),
            ..Default::default()
        }
    }

    /// Set the zoom level.
    pub fn with_zoom_level(mut self, zoom_level: f64) -> Self {
        self.zoom_level = zoom_level;
        self
    }

    /// Set the floor level, in tenths of a level.
    pub fn with_floor_level(mut self, floor_level: i32) -> Self {
        self.floor_level = floor_level;
        self
    }

    /// Set the interaction state.
    pub fn with_element_state(mut self, element_state: ElementState) -> Self {
        self.element_state = element_state;
        self
    }

    /// Attach an opening hours cache.
    pub fn with_opening_hours(mut self, cache: &'a dyn OpeningHoursCache) -> Self {
        self.opening_hours = Some(cache);
        self
    }
}

impl fmt::Debug for MapCssState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapCssState")
            .field("element", &self.element.map(|e| e.id()))
            .field("zoom_level", &self.zoom_level)
            .field("floor_level", &self.floor_level)
            .field("element_state", &self.element_state)
            .field("opening_hours", &self.opening_hours.is_some())
            .finish()
    }
}
