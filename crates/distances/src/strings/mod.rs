//! Distance functions over strings.

mod edit;
mod hamming;
mod weighted_edit;

pub use edit::edit;
pub use hamming::hamming;
pub use weighted_edit::{weighted_edit, ScoreTable, GAP};
