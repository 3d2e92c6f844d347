//! Box Tree - CSS boxes handed to layout
//!
//! The box tree owns every box in a flat arena and hands out integer
//! handles ([`BoxId`]) instead of references. Parents store child handles,
//! so walking the tree is an index chase rather than pointer traversal.
//!
//! # Geometry Ownership
//!
//! All geometry lives in the arena and is written only through `&mut`
//! methods on [`BoxTree`]. Layout algorithms read any box freely but
//! mutate through the tree, so there is exactly one writer at a time and
//! no interior mutability anywhere.
//!
//! Size overrides follow a dirty-flag discipline: setting an override to
//! the value it already has does not mark the box for relayout, which is
//! what makes repeated layout passes settle instead of looping.
//!
//! Reference: CSS Display Module Level 3
//! <https://www.w3.org/TR/css-display-3/>

use crate::geometry::Point;
use crate::geometry::Rect;
use crate::geometry::Size;
use crate::style::ComputedStyle;
use std::fmt;
use std::sync::Arc;

/// Handle to a box in a [`BoxTree`]
///
/// Only the owning tree mints these, so a `BoxId` is always valid for the
/// tree it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoxId(u32);

impl BoxId {
  /// Index of this box in the arena
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

impl fmt::Display for BoxId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "box#{}", self.0)
  }
}

/// Content-based sizes measured for a box
///
/// These stand in for text shaping and replaced-content measurement, which
/// happen upstream of layout. Min-content is the narrowest the content can
/// render; max-content is its width with no wrapping at all.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IntrinsicSizes {
  pub min_content: Size,
  pub max_content: Size,
}

impl IntrinsicSizes {
  pub const ZERO: IntrinsicSizes = IntrinsicSizes {
    min_content: Size::ZERO,
    max_content: Size::ZERO,
  };

  pub fn new(min_content: Size, max_content: Size) -> Self {
    Self {
      min_content,
      max_content,
    }
  }

  /// Both measurements equal, for content that cannot wrap
  pub fn fixed(size: Size) -> Self {
    Self {
      min_content: size,
      max_content: size,
    }
  }
}

/// A single box in the arena
///
/// The style is shared and immutable; geometry fields are private and
/// mutated only through [`BoxTree`] methods.
#[derive(Debug, Clone)]
pub struct BoxNode {
  /// Computed style for this box
  pub style: Arc<ComputedStyle>,
  children: Vec<BoxId>,
  intrinsic: IntrinsicSizes,
  override_content_width: Option<f32>,
  override_content_height: Option<f32>,
  position: Point,
  content_size: Size,
  needs_layout: bool,
}

impl BoxNode {
  pub fn children(&self) -> &[BoxId] {
    &self.children
  }

  pub fn intrinsic(&self) -> IntrinsicSizes {
    self.intrinsic
  }

  /// Content width forced by a parent layout, if any
  pub fn override_content_width(&self) -> Option<f32> {
    self.override_content_width
  }

  /// Content height forced by a parent layout, if any
  pub fn override_content_height(&self) -> Option<f32> {
    self.override_content_height
  }

  /// Border-box position relative to the containing box
  pub fn position(&self) -> Point {
    self.position
  }

  /// Content-box size from the most recent layout
  pub fn content_size(&self) -> Size {
    self.content_size
  }

  /// Border-box size from the most recent layout
  pub fn border_box_size(&self) -> Size {
    Size::new(
      self.content_size.width + self.style.horizontal_border_padding(),
      self.content_size.height + self.style.vertical_border_padding(),
    )
  }

  /// Border-box rectangle in the containing box's coordinates
  pub fn border_box_rect(&self) -> Rect {
    Rect::new(self.position, self.border_box_size())
  }

  pub fn needs_layout(&self) -> bool {
    self.needs_layout
  }

  // Contribution helpers used by content-based track and column sizing.
  // Contributions are border-box measurements.

  pub fn min_content_inline_contribution(&self) -> f32 {
    self.intrinsic.min_content.width + self.style.horizontal_border_padding()
  }

  pub fn max_content_inline_contribution(&self) -> f32 {
    self.intrinsic.max_content.width + self.style.horizontal_border_padding()
  }

  pub fn min_content_block_contribution(&self) -> f32 {
    self.intrinsic.min_content.height + self.style.vertical_border_padding()
  }

  pub fn max_content_block_contribution(&self) -> f32 {
    self.intrinsic.max_content.height + self.style.vertical_border_padding()
  }
}

/// Arena of boxes plus the geometry written during layout
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use fastlayout::{BoxTree, ComputedStyle};
///
/// let mut tree = BoxTree::new();
/// let style = Arc::new(ComputedStyle::default());
/// let child = tree.insert(style.clone(), vec![]);
/// let root = tree.insert(style, vec![child]);
///
/// assert_eq!(tree.node(root).children(), &[child]);
/// assert!(tree.node(child).needs_layout());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BoxTree {
  nodes: Vec<BoxNode>,
}

impl BoxTree {
  pub fn new() -> Self {
    Self { nodes: Vec::new() }
  }

  /// Inserts a box with no measured content
  ///
  /// Children must already be in the tree, so construction runs bottom-up.
  pub fn insert(&mut self, style: Arc<ComputedStyle>, children: Vec<BoxId>) -> BoxId {
    self.insert_with_intrinsics(style, IntrinsicSizes::ZERO, children)
  }

  /// Inserts a box carrying measured content sizes
  pub fn insert_with_intrinsics(
    &mut self,
    style: Arc<ComputedStyle>,
    intrinsic: IntrinsicSizes,
    children: Vec<BoxId>,
  ) -> BoxId {
    let id = BoxId(self.nodes.len() as u32);
    self.nodes.push(BoxNode {
      style,
      children,
      intrinsic,
      override_content_width: None,
      override_content_height: None,
      position: Point::ZERO,
      content_size: Size::ZERO,
      needs_layout: true,
    });
    id
  }

  pub fn node(&self, id: BoxId) -> &BoxNode {
    &self.nodes[id.index()]
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// Iterates over every box handle in insertion order
  pub fn ids(&self) -> impl Iterator<Item = BoxId> {
    (0..self.nodes.len() as u32).map(BoxId)
  }

  /// Forces the content width a parent layout decided on
  ///
  /// Marks the box for relayout only when the value actually changes.
  pub fn set_override_content_width(&mut self, id: BoxId, width: Option<f32>) {
    let node = &mut self.nodes[id.index()];
    if node.override_content_width != width {
      node.override_content_width = width;
      node.needs_layout = true;
    }
  }

  /// Forces the content height a parent layout decided on
  pub fn set_override_content_height(&mut self, id: BoxId, height: Option<f32>) {
    let node = &mut self.nodes[id.index()];
    if node.override_content_height != height {
      node.override_content_height = height;
      node.needs_layout = true;
    }
  }

  /// Positions a box relative to its containing box
  ///
  /// Position does not affect the box's own size, so this never marks for
  /// relayout.
  pub fn set_position(&mut self, id: BoxId, position: Point) {
    self.nodes[id.index()].position = position;
  }

  /// Lays out one box if it is marked dirty
  ///
  /// The content size is the override where one is set, otherwise the
  /// box's max-content measurement. Clean boxes are left untouched.
  pub fn layout_box(&mut self, id: BoxId) {
    let node = &mut self.nodes[id.index()];
    if !node.needs_layout {
      return;
    }
    node.content_size = Size::new(
      node.override_content_width.unwrap_or(node.intrinsic.max_content.width),
      node.override_content_height.unwrap_or(node.intrinsic.max_content.height),
    );
    node.needs_layout = false;
  }
}
