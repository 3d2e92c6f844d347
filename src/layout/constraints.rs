//! Layout constraints and available space
//!
//! Formatting contexts receive a [`LayoutConstraints`] describing the space
//! their containing block offers and the bases against which percentages
//! resolve. Constraints flow down the tree; each context derives new ones
//! for its children.

/// Available space in one dimension
///
/// Either a definite length or one of the two content-based sizing modes
/// from CSS Sizing Level 3 (<https://www.w3.org/TR/css-sizing-3/>).
///
/// # Examples
///
/// ```
/// use fastlayout::layout::AvailableSpace;
///
/// assert_eq!(AvailableSpace::Definite(1024.0).definite_value(), Some(1024.0));
/// assert_eq!(AvailableSpace::MinContent.definite_value(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AvailableSpace {
    /// The containing block offers a specific length
    Definite(f32),
    /// Size to the narrowest the content allows
    MinContent,
    /// Size to the content with no wrapping
    MaxContent,
}

impl AvailableSpace {
    pub fn is_definite(&self) -> bool {
        matches!(self, Self::Definite(_))
    }

    pub fn definite_value(&self) -> Option<f32> {
        match self {
            Self::Definite(value) => Some(*value),
            _ => None,
        }
    }
}

/// Space and percentage bases handed to a formatting context
///
/// The percentage bases are the containing block's content box. They can
/// be nonzero even when the matching available space is indefinite, and a
/// percentage with no meaningful base simply fails to resolve.
///
/// # Examples
///
/// ```
/// use fastlayout::layout::{AvailableSpace, LayoutConstraints};
///
/// let constraints = LayoutConstraints::with_definite_size(1024.0, 768.0);
/// assert_eq!(constraints.available_width, AvailableSpace::Definite(1024.0));
/// assert_eq!(constraints.percentage_base_width, 1024.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LayoutConstraints {
    pub available_width: AvailableSpace,
    pub available_height: AvailableSpace,
    /// Base for resolving percentage widths
    pub percentage_base_width: f32,
    /// Base for resolving percentage heights
    pub percentage_base_height: f32,
}

impl LayoutConstraints {
    /// Constraints with the given available space and zero percentage bases
    pub fn new(width: AvailableSpace, height: AvailableSpace) -> Self {
        Self {
            available_width: width,
            available_height: height,
            percentage_base_width: 0.0,
            percentage_base_height: 0.0,
        }
    }

    /// The common case: a containing block with explicit dimensions
    ///
    /// Both the available space and the percentage bases take the given
    /// sizes.
    pub fn with_definite_size(width: f32, height: f32) -> Self {
        Self {
            available_width: AvailableSpace::Definite(width),
            available_height: AvailableSpace::Definite(height),
            percentage_base_width: width,
            percentage_base_height: height,
        }
    }

    /// Overrides the percentage bases, keeping the available space
    pub fn with_percentage_bases(mut self, width: f32, height: f32) -> Self {
        self.percentage_base_width = width;
        self.percentage_base_height = height;
        self
    }
}
