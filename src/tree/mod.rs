//! Tree structures for boxes
//!
//! The box tree represents what to lay out: CSS boxes with their computed
//! styles and measured content sizes. Layout writes geometry back into the
//! same arena, so there is no separate output tree; after a layout pass the
//! box tree holds both the inputs and the resulting positions and sizes.

pub mod box_tree;

pub use box_tree::{BoxId, BoxNode, BoxTree, IntrinsicSizes};
