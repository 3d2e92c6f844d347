//! Layout algorithms
//!
//! Layout reads styles and measured content from the box tree and writes
//! positions and sizes back through it. Everything runs behind the
//! [`FormattingContext`] trait:
//!
//! 1. A caller picks the context for a container (see [`contexts`])
//! 2. Constraints describe the space the containing block offers
//! 3. The context sizes its tracks or columns, lays out the children,
//!    and returns the container's border-box size
//!
//! Two formatting contexts are implemented: grid (`display: grid`, track
//! sizing and cell placement) and table (`display: table`, column
//! constraint solving with spans and collapsed borders).
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use fastlayout::layout::{formatting_context_for, LayoutConstraints};
//! use fastlayout::{BoxTree, ComputedStyle, Display, TrackSizingSpec};
//!
//! let mut tree = BoxTree::new();
//! let style = ComputedStyle::builder()
//!     .display(Display::Grid)
//!     .grid_template_columns(vec![TrackSizingSpec::fixed(100.0)])
//!     .grid_template_rows(vec![TrackSizingSpec::fixed(50.0)])
//!     .build();
//! let root = tree.insert(Arc::new(style), vec![]);
//!
//! let fc = formatting_context_for(tree.node(root).style.display)?;
//! let size = fc.layout(&mut tree, root, &LayoutConstraints::with_definite_size(800.0, 600.0))?;
//! assert_eq!(size.height, 50.0);
//! # Ok::<(), fastlayout::layout::LayoutError>(())
//! ```

pub mod constraints;
pub mod contexts;
pub mod formatting_context;
pub mod table;

pub use constraints::{AvailableSpace, LayoutConstraints};
pub use contexts::{formatting_context_for, FormattingContextType};
pub use formatting_context::{FormattingContext, IntrinsicSizingMode, LayoutError};
pub use table::{CollapsedBorders, TableStructure};
