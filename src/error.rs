//! Error types for fastlayout
//!
//! The layout algorithms themselves never fail: malformed media queries
//! degrade to "not all" records and unplaceable grid items are laid out
//! outside the grid. Errors exist only at the formatting-context seam,
//! where a caller can hand a context a box it does not handle.
//!
//! All errors use the `thiserror` crate for minimal boilerplate and
//! proper error trait implementations.

use thiserror::Error;

/// Result type alias for fastlayout operations
///
/// # Examples
///
/// ```
/// use fastlayout::Result;
///
/// fn run_layout() -> Result<()> {
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for fastlayout
///
/// Each variant wraps the specific error type of a subsystem.
///
/// # Examples
///
/// ```
/// use fastlayout::Error;
/// use fastlayout::layout::LayoutError;
///
/// fn layout() -> Result<(), Error> {
///     Err(Error::Layout(LayoutError::UnsupportedBoxType(
///         "inline".to_string(),
///     )))
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
  /// Layout error from a formatting context
  #[error("Layout error: {0}")]
  Layout(#[from] crate::layout::LayoutError),

  /// Generic error for miscellaneous issues
  #[error("{0}")]
  Other(String),
}
