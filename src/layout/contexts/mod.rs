//! Formatting context implementations and selection
//!
//! Two contexts exist: grid and table. [`formatting_context_for`] is the
//! dispatch seam a caller uses when it only has a box and wants the
//! matching layout algorithm.

pub mod grid;
pub mod table;

pub use grid::GridFormattingContext;
pub use table::TableFormattingContext;

use crate::layout::formatting_context::{FormattingContext, LayoutError};
use crate::style::Display;

/// The kind of formatting context a display type establishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormattingContextType {
    Grid,
    Table,
}

impl FormattingContextType {
    /// The context a box with this display establishes, if any
    ///
    /// Boxes that establish neither (cells, rows, plain blocks) are laid
    /// out by their container and return `None`.
    pub fn from_display(display: Display) -> Option<Self> {
        match display {
            Display::Grid => Some(Self::Grid),
            Display::Table => Some(Self::Table),
            _ => None,
        }
    }
}

/// Creates the formatting context for a container's display type
///
/// # Errors
///
/// Returns [`LayoutError::UnsupportedBoxType`] when the display type does
/// not establish a formatting context this crate implements.
///
/// # Examples
///
/// ```
/// use fastlayout::layout::contexts::formatting_context_for;
/// use fastlayout::Display;
///
/// assert!(formatting_context_for(Display::Grid).is_ok());
/// assert!(formatting_context_for(Display::Inline).is_err());
/// ```
pub fn formatting_context_for(display: Display) -> Result<Box<dyn FormattingContext>, LayoutError> {
    match FormattingContextType::from_display(display) {
        Some(FormattingContextType::Grid) => Ok(Box::new(GridFormattingContext::new())),
        Some(FormattingContextType::Table) => Ok(Box::new(TableFormattingContext::new())),
        None => Err(LayoutError::UnsupportedBoxType(format!(
            "{:?} does not establish a formatting context",
            display
        ))),
    }
}
