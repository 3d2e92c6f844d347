//! Geometry primitives
//!
//! Points, sizes, and rectangles used throughout layout. All values are
//! CSS pixels stored as `f32`, with the origin at the top-left corner and
//! the y axis growing downward.

use std::fmt;

/// A 2D point in CSS pixel space
///
/// # Examples
///
/// ```
/// use fastlayout::geometry::Point;
///
/// let p = Point::new(10.0, 20.0);
/// assert_eq!(p.x, 10.0);
/// assert_eq!(p.y, 20.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
  /// X coordinate (increases to the right)
  pub x: f32,
  /// Y coordinate (increases downward)
  pub y: f32,
}

impl Point {
  /// The zero point at the origin (0, 0)
  pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

  /// Creates a new point at the given coordinates
  pub fn new(x: f32, y: f32) -> Self {
    Self { x, y }
  }

  /// Returns this point moved by the given deltas
  pub fn translate(&self, dx: f32, dy: f32) -> Self {
    Self {
      x: self.x + dx,
      y: self.y + dy,
    }
  }
}

impl fmt::Display for Point {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({}, {})", self.x, self.y)
  }
}

/// A 2D size
///
/// Negative dimensions are not prevented here; layout algorithms clamp
/// where the CSS model requires it.
///
/// # Examples
///
/// ```
/// use fastlayout::geometry::Size;
///
/// let s = Size::new(100.0, 50.0);
/// assert!(!s.is_empty());
/// assert!(Size::ZERO.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
  pub width: f32,
  pub height: f32,
}

impl Size {
  /// A zero size
  pub const ZERO: Self = Self {
    width: 0.0,
    height: 0.0,
  };

  /// Creates a new size with the given dimensions
  pub fn new(width: f32, height: f32) -> Self {
    Self { width, height }
  }

  /// Returns true if either dimension is zero or negative
  pub fn is_empty(&self) -> bool {
    self.width <= 0.0 || self.height <= 0.0
  }
}

impl fmt::Display for Size {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}x{}", self.width, self.height)
  }
}

/// A rectangle defined by origin and size
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
  pub origin: Point,
  pub size: Size,
}

impl Rect {
  /// An empty rectangle at the origin
  pub const ZERO: Self = Self {
    origin: Point::ZERO,
    size: Size::ZERO,
  };

  /// Creates a rectangle from an origin and size
  pub fn new(origin: Point, size: Size) -> Self {
    Self { origin, size }
  }

  /// Creates a rectangle from x, y, width, height
  ///
  /// # Examples
  ///
  /// ```
  /// use fastlayout::geometry::Rect;
  ///
  /// let r = Rect::from_xywh(10.0, 20.0, 100.0, 50.0);
  /// assert_eq!(r.x(), 10.0);
  /// assert_eq!(r.width(), 100.0);
  /// ```
  pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
    Self {
      origin: Point::new(x, y),
      size: Size::new(width, height),
    }
  }

  pub fn x(&self) -> f32 {
    self.origin.x
  }

  pub fn y(&self) -> f32 {
    self.origin.y
  }

  pub fn width(&self) -> f32 {
    self.size.width
  }

  pub fn height(&self) -> f32 {
    self.size.height
  }
}

/// Per-edge sizes such as padding or border widths
///
/// Stored in CSS order: top, right, bottom, left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeSizes {
  pub top: f32,
  pub right: f32,
  pub bottom: f32,
  pub left: f32,
}

impl EdgeSizes {
  /// All four edges zero
  pub const ZERO: Self = Self {
    top: 0.0,
    right: 0.0,
    bottom: 0.0,
    left: 0.0,
  };

  pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
    Self {
      top,
      right,
      bottom,
      left,
    }
  }

  /// The same size on every edge
  pub fn uniform(size: f32) -> Self {
    Self::new(size, size, size, size)
  }

  /// left + right
  pub fn horizontal(&self) -> f32 {
    self.left + self.right
  }

  /// top + bottom
  pub fn vertical(&self) -> f32 {
    self.top + self.bottom
  }
}
