//! Tree
//!
//! The induced model: an arena of [`crate::node::Node`]s grown with ID3, its
//! text rendering, and prediction with decision-path tracing.
pub mod predict;
#[allow(clippy::module_inception)]
pub mod tree;

pub use predict::{DecisionPath, Prediction};
pub use tree::Tree;
