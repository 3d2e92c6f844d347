//! Style system types
//!
//! Inputs to layout: computed values, track sizing specifications, and
//! media query parsing. Nothing here walks a document or runs the cascade;
//! callers hand fully computed styles to the box tree.

pub mod computed;
pub mod grid;
pub mod media;
pub mod values;

pub use computed::{
    BorderCollapse, BorderEdge, BorderEdges, BorderStyle, ComputedStyle, ComputedStyleBuilder,
    Display, Rgba, TableLayoutMode, WritingMode,
};
pub use grid::{GridPosition, TrackBreadth, TrackSizingSpec};
pub use media::{MediaQuery, MediaQuerySet};
pub use values::{Length, LengthOrAuto, LengthUnit};
