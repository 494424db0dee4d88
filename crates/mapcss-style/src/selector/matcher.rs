//! Selector matching.
//!
//! Matching reads the class state of the result accumulated so far in the
//! current pass, and hands every matching target layer to a callback that
//! applies the rule's declarations. Rules therefore see the effects of all
//! earlier rules.

use mapcss_core::{ElementRef, ElementType};

use super::{BasicSelector, ChainedSelector, ObjectType, Selector, UnionSelector};
use crate::resolve::{MapCssResult, MapCssState, ObjectClass, ResultLayer};

/// Per-element input shared by all rules of one evaluation pass.
#[derive(Clone, Copy)]
pub struct MatchContext<'a> {
    /// The evaluation state.
    pub state: &'a MapCssState<'a>,
    /// The element being styled.
    pub element: ElementRef<'a>,
    /// Geometry class of the element, determined once per pass.
    pub object_class: ObjectClass,
}

impl<'a> MatchContext<'a> {
    /// Create a context for `element`.
    pub fn new(state: &'a MapCssState<'a>, element: ElementRef<'a>, object_class: ObjectClass) -> Self {
        Self {
            state,
            element,
            object_class,
        }
    }

    fn matches_object_type(&self, object_type: ObjectType) -> bool {
        match object_type {
            ObjectType::Node => self.element.element_type() == ElementType::Node,
            ObjectType::Way => self.element.element_type() == ElementType::Way,
            ObjectType::Relation => self.element.element_type() == ElementType::Relation,
            ObjectType::Area => self.object_class.is_area(),
            ObjectType::Line => self.object_class.is_line(),
            ObjectType::Canvas => false,
            ObjectType::Any => true,
        }
    }
}

/// Receives the target layer of every match.
pub type ApplyFn<'f, 's> = dyn FnMut(&mut ResultLayer<'s>) + 'f;

impl BasicSelector {
    /// Match against the element in `ctx`, calling `apply` with the target
    /// layer on success.
    pub fn matches<'s>(
        &self,
        ctx: &MatchContext<'_>,
        result: &mut MapCssResult<'s>,
        apply: &mut ApplyFn<'_, 's>,
    ) -> bool {
        // zoom first, it needs no tag lookups
        if !self.zoom.contains(ctx.state.zoom_level) {
            return false;
        }
        if !ctx.matches_object_type(self.object_type) {
            return false;
        }
        if !ctx.state.element_state.contains(self.states) {
            return false;
        }
        if let Some(class) = self.class {
            let has_class = result.layer(self.layer).is_some_and(|layer| layer.has_class(class));
            if !has_class {
                return false;
            }
        }
        if !self.conditions.iter().all(|c| c.matches(ctx.state)) {
            return false;
        }

        apply(result.layer_mut(self.layer));
        true
    }

    /// Match against the canvas.
    pub fn matches_canvas(&self, state: &MapCssState<'_>) -> bool {
        self.object_type == ObjectType::Canvas
            && self.zoom.contains(state.zoom_level)
            && self.conditions.iter().all(|c| c.matches_canvas(state))
    }
}

impl ChainedSelector {
    /// Descendant matching is not supported, this never matches.
    pub fn matches<'s>(
        &self,
        _ctx: &MatchContext<'_>,
        _result: &mut MapCssResult<'s>,
        _apply: &mut ApplyFn<'_, 's>,
    ) -> bool {
        false
    }

    /// The canvas has no ancestors, this never matches.
    pub fn matches_canvas(&self, _state: &MapCssState<'_>) -> bool {
        false
    }
}

impl UnionSelector {
    /// Match every layer group, applying at most once per layer.
    pub fn matches<'s>(
        &self,
        ctx: &MatchContext<'_>,
        result: &mut MapCssResult<'s>,
        apply: &mut ApplyFn<'_, 's>,
    ) -> bool {
        let mut matched = false;
        for group in self.groups() {
            // no short-circuit across groups, each layer gets its own apply
            if group.selectors.iter().any(|s| s.matches(ctx, result, apply)) {
                matched = true;
            }
        }
        matched
    }

    /// Match the canvas using the members targeting the default layer.
    pub fn matches_canvas(&self, state: &MapCssState<'_>) -> bool {
        self.groups()
            .iter()
            .find(|g| g.layer.is_none())
            .is_some_and(|g| g.selectors.iter().any(|s| s.matches_canvas(state)))
    }
}

impl Selector {
    /// Match against the element in `ctx`, calling `apply` once for every
    /// matching target layer.
    pub fn matches<'s>(
        &self,
        ctx: &MatchContext<'_>,
        result: &mut MapCssResult<'s>,
        apply: &mut ApplyFn<'_, 's>,
    ) -> bool {
        match self {
            Selector::Basic(s) => s.matches(ctx, result, apply),
            Selector::Chained(s) => s.matches(ctx, result, apply),
            Selector::Union(s) => s.matches(ctx, result, apply),
        }
    }

    /// Match against the canvas.
    pub fn matches_canvas(&self, state: &MapCssState<'_>) -> bool {
        match self {
            Selector::Basic(s) => s.matches_canvas(state),
            Selector::Chained(s) => s.matches_canvas(state),
            Selector::Union(s) => s.matches_canvas(state),
        }
    }
}
