//! Evaluation state, element classification and results.

mod cascade;
mod classify;
mod result;
mod state;

pub use classify::ObjectClass;
pub use result::{MapCssResult, ResultLayer};
pub use state::{ElementState, MapCssState};

pub(crate) use cascade::{apply_canvas_declarations, apply_declarations};
pub(crate) use classify::ObjectClassifier;
