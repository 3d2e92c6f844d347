pub mod debug;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod style;
pub mod tree;

pub use error::{Error, Result};
pub use geometry::{EdgeSizes, Point, Rect, Size};
pub use tree::{BoxId, BoxNode, BoxTree, IntrinsicSizes};

// Re-export the style types most callers construct directly
pub use style::media::{MediaQuery, MediaQuerySet};
pub use style::{ComputedStyle, Display, GridPosition, TrackBreadth, TrackSizingSpec};
pub use style::{Length, LengthOrAuto, LengthUnit};
