//! Formatting Context trait - core layout abstraction
//!
//! Every layout algorithm implements this trait. A context lays out one
//! subtree: it reads styles and measured content from the box tree, writes
//! positions and sizes back through the tree's `&mut` methods, and returns
//! the border-box size of the root it was given.

use crate::geometry::Size;
use crate::layout::constraints::LayoutConstraints;
use crate::tree::{BoxId, BoxTree};

/// Intrinsic sizing mode for querying content-based sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntrinsicSizingMode {
    /// Narrowest size that fits the content
    MinContent,
    /// Content size with no wrapping
    MaxContent,
}

/// Common trait for all formatting contexts
///
/// # Contract
///
/// Implementers must:
/// 1. Lay out the subtree rooted at `root` within `constraints`
/// 2. Write every child's position and size into the tree
/// 3. Return the root's border-box size
/// 4. Answer intrinsic size queries without mutating the tree
///
/// Degenerate inputs (empty containers, zero space, out-of-bounds
/// placements) are laid out, not rejected; errors are reserved for misuse
/// such as handing a context a root it cannot lay out.
pub trait FormattingContext {
    /// Lays out the subtree rooted at `root`
    fn layout(
        &self,
        tree: &mut BoxTree,
        root: BoxId,
        constraints: &LayoutConstraints,
    ) -> Result<Size, LayoutError>;

    /// Computes the root's content-based inline size
    fn intrinsic_inline_size(
        &self,
        tree: &BoxTree,
        root: BoxId,
        mode: IntrinsicSizingMode,
    ) -> Result<f32, LayoutError>;
}

/// Layout errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The root box's display type does not match this context
    UnsupportedBoxType(String),
    /// Required input was never supplied
    MissingContext(String),
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedBoxType(msg) => write!(f, "Unsupported box type: {}", msg),
            Self::MissingContext(msg) => write!(f, "Missing context: {}", msg),
        }
    }
}

impl std::error::Error for LayoutError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::ComputedStyle;
    use std::sync::Arc;

    // Stub context exercising the trait contract
    struct StubFormattingContext;

    impl FormattingContext for StubFormattingContext {
        fn layout(
            &self,
            tree: &mut BoxTree,
            root: BoxId,
            constraints: &LayoutConstraints,
        ) -> Result<Size, LayoutError> {
            let width = constraints.available_width.definite_value().unwrap_or(100.0);
            let height = constraints.available_height.definite_value().unwrap_or(50.0);
            tree.set_override_content_width(root, Some(width));
            tree.set_override_content_height(root, Some(height));
            tree.layout_box(root);
            Ok(tree.node(root).border_box_size())
        }

        fn intrinsic_inline_size(
            &self,
            _tree: &BoxTree,
            _root: BoxId,
            _mode: IntrinsicSizingMode,
        ) -> Result<f32, LayoutError> {
            Ok(100.0)
        }
    }

    #[test]
    fn test_stub_context_lays_out_through_the_tree() {
        let mut tree = BoxTree::new();
        let root = tree.insert(Arc::new(ComputedStyle::default()), vec![]);
        let constraints = LayoutConstraints::with_definite_size(800.0, 600.0);

        let fc = StubFormattingContext;
        let size = fc.layout(&mut tree, root, &constraints).unwrap();

        assert_eq!(size, Size::new(800.0, 600.0));
        assert!(!tree.node(root).needs_layout());
    }

    #[test]
    fn test_intrinsic_sizing_query() {
        let mut tree = BoxTree::new();
        let root = tree.insert(Arc::new(ComputedStyle::default()), vec![]);

        let fc = StubFormattingContext;
        let min = fc
            .intrinsic_inline_size(&tree, root, IntrinsicSizingMode::MinContent)
            .unwrap();
        assert_eq!(min, 100.0);
    }

    #[test]
    fn test_error_display() {
        let error = LayoutError::UnsupportedBoxType("inline".to_string());
        assert_eq!(error.to_string(), "Unsupported box type: inline");

        let error = LayoutError::MissingContext("definite inline size".to_string());
        assert_eq!(error.to_string(), "Missing context: definite inline size");
    }
}
