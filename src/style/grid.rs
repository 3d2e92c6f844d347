//! CSS Grid track sizing types
//!
//! This module holds the style-side model for grid track lists and grid
//! item placement: what a track's size specification is, not how layout
//! resolves it. Track lists arrive here already parsed; the layout engine
//! reads these values through `ComputedStyle`.
//!
//! Reference: CSS Grid Layout Module Level 1
//! <https://www.w3.org/TR/css-grid-1/>

use std::fmt;

/// A single track breadth as written in a track list
///
/// Fixed and percentage breadths can be resolved to px up front; the
/// content-based keywords need intrinsic measurements during layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackBreadth {
    /// An absolute length, stored in px
    Fixed(f32),
    /// A percentage of the grid container's content box
    Percent(f32),
    /// The `min-content` keyword
    MinContent,
    /// The `max-content` keyword
    MaxContent,
    /// The `auto` keyword
    Auto,
}

impl TrackBreadth {
    /// Resolves this breadth to px against a percentage basis
    ///
    /// Returns `None` for content-based breadths, and for percentages when
    /// the basis itself is unknown.
    ///
    /// # Examples
    ///
    /// ```
    /// use fastlayout::TrackBreadth;
    ///
    /// assert_eq!(TrackBreadth::Fixed(100.0).resolve(Some(300.0)), Some(100.0));
    /// assert_eq!(TrackBreadth::Percent(50.0).resolve(Some(300.0)), Some(150.0));
    /// assert_eq!(TrackBreadth::Percent(50.0).resolve(None), None);
    /// assert_eq!(TrackBreadth::Auto.resolve(Some(300.0)), None);
    /// ```
    pub fn resolve(self, basis: Option<f32>) -> Option<f32> {
        match self {
            Self::Fixed(px) => Some(px),
            Self::Percent(percent) => basis.map(|b| (percent / 100.0) * b),
            Self::MinContent | Self::MaxContent | Self::Auto => None,
        }
    }

    /// Returns true for the intrinsic keywords `min-content` and `max-content`
    pub fn is_content_sized(self) -> bool {
        matches!(self, Self::MinContent | Self::MaxContent)
    }
}

impl fmt::Display for TrackBreadth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(px) => write!(f, "{}px", px),
            Self::Percent(percent) => write!(f, "{}%", percent),
            Self::MinContent => write!(f, "min-content"),
            Self::MaxContent => write!(f, "max-content"),
            Self::Auto => write!(f, "auto"),
        }
    }
}

/// Sizing specification of one grid track
///
/// Every track has a minimum and a maximum breadth. Single-value syntax
/// like `100px` or `auto` sets both to the same breadth; `minmax()` sets
/// them independently.
///
/// # Examples
///
/// ```
/// use fastlayout::{TrackBreadth, TrackSizingSpec};
///
/// let fixed = TrackSizingSpec::fixed(100.0);
/// assert_eq!(fixed.min_breadth, TrackBreadth::Fixed(100.0));
/// assert_eq!(fixed.max_breadth, TrackBreadth::Fixed(100.0));
///
/// let clamped = TrackSizingSpec::minmax(TrackBreadth::Fixed(50.0), TrackBreadth::Auto);
/// assert_eq!(clamped.max_breadth, TrackBreadth::Auto);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackSizingSpec {
    pub min_breadth: TrackBreadth,
    pub max_breadth: TrackBreadth,
}

impl TrackSizingSpec {
    /// A track with independent minimum and maximum breadths (`minmax()`)
    pub const fn minmax(min_breadth: TrackBreadth, max_breadth: TrackBreadth) -> Self {
        Self {
            min_breadth,
            max_breadth,
        }
    }

    /// A fixed-length track, e.g. `100px`
    pub const fn fixed(px: f32) -> Self {
        Self::minmax(TrackBreadth::Fixed(px), TrackBreadth::Fixed(px))
    }

    /// A percentage track, e.g. `25%`
    pub const fn percent(percent: f32) -> Self {
        Self::minmax(TrackBreadth::Percent(percent), TrackBreadth::Percent(percent))
    }

    /// An `auto` track
    pub const fn auto() -> Self {
        Self::minmax(TrackBreadth::Auto, TrackBreadth::Auto)
    }

    /// A `min-content` track
    pub const fn min_content() -> Self {
        Self::minmax(TrackBreadth::MinContent, TrackBreadth::MinContent)
    }

    /// A `max-content` track
    pub const fn max_content() -> Self {
        Self::minmax(TrackBreadth::MaxContent, TrackBreadth::MaxContent)
    }

    /// Returns true if either breadth is content-based
    pub fn is_content_sized(&self) -> bool {
        self.min_breadth.is_content_sized() || self.max_breadth.is_content_sized()
    }
}

impl fmt::Display for TrackSizingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min_breadth == self.max_breadth {
            write!(f, "{}", self.min_breadth)
        } else {
            write!(f, "minmax({}, {})", self.min_breadth, self.max_breadth)
        }
    }
}

/// Grid item placement along one axis
///
/// Only numeric start lines are supported: no spans, no named lines. The
/// layout engine maps a 1-based line index to a 0-based track index and
/// clamps everything else to the first track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridPosition {
    /// Auto placement
    #[default]
    Auto,
    /// An explicit 1-based grid line index
    LineIndex(i32),
}

impl GridPosition {
    /// Returns true for auto placement
    pub fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::LineIndex(line) => write!(f, "{}", line),
        }
    }
}
