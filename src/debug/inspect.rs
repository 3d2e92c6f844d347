//! Layout snapshots
//!
//! Mirrors the geometry a layout pass wrote into a [`BoxTree`] as plain
//! serializable structs. The snapshot types are deliberately separate from
//! the core types so the core keeps no serde dependency on its public
//! surface and the snapshot shape can stay stable while internals move.

use crate::geometry::{Point, Size};
use crate::tree::{BoxId, BoxTree};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PointSnapshot {
  pub x: f32,
  pub y: f32,
}

impl From<Point> for PointSnapshot {
  fn from(point: Point) -> Self {
    Self {
      x: point.x,
      y: point.y,
    }
  }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SizeSnapshot {
  pub width: f32,
  pub height: f32,
}

impl From<Size> for SizeSnapshot {
  fn from(size: Size) -> Self {
    Self {
      width: size.width,
      height: size.height,
    }
  }
}

/// One box's geometry after layout
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BoxSnapshot {
  pub box_id: usize,
  pub display: String,
  /// Border-box position relative to the containing box
  pub position: PointSnapshot,
  pub content_size: SizeSnapshot,
  pub border_box_size: SizeSnapshot,
  /// True when the box was never laid out or was dirtied afterwards
  pub needs_layout: bool,
  pub children: Vec<usize>,
}

/// Every box in the tree, in arena order
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TreeSnapshot {
  pub boxes: Vec<BoxSnapshot>,
}

/// Snapshots a single box
pub fn inspect_box(tree: &BoxTree, id: BoxId) -> BoxSnapshot {
  let node = tree.node(id);
  BoxSnapshot {
    box_id: id.index(),
    display: format!("{:?}", node.style.display),
    position: node.position().into(),
    content_size: node.content_size().into(),
    border_box_size: node.border_box_size().into(),
    needs_layout: node.needs_layout(),
    children: node.children().iter().map(|child| child.index()).collect(),
  }
}

/// Snapshots the whole tree
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use fastlayout::debug::inspect;
/// use fastlayout::{BoxTree, ComputedStyle};
///
/// let mut tree = BoxTree::new();
/// tree.insert(Arc::new(ComputedStyle::default()), vec![]);
///
/// let snapshot = inspect(&tree);
/// assert_eq!(snapshot.boxes.len(), 1);
/// assert_eq!(snapshot.boxes[0].box_id, 0);
/// ```
pub fn inspect(tree: &BoxTree) -> TreeSnapshot {
  TreeSnapshot {
    boxes: tree.ids().map(|id| inspect_box(tree, id)).collect(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::style::{ComputedStyle, Display};
  use std::sync::Arc;

  #[test]
  fn test_snapshot_reflects_layout() {
    let mut tree = BoxTree::new();
    let style = Arc::new(ComputedStyle::builder().display(Display::Block).build());
    let id = tree.insert(style, vec![]);
    tree.set_override_content_width(id, Some(120.0));
    tree.set_override_content_height(id, Some(40.0));
    tree.layout_box(id);
    tree.set_position(id, Point::new(10.0, 20.0));

    let snapshot = inspect_box(&tree, id);
    assert_eq!(snapshot.display, "Block");
    assert_eq!(snapshot.position, PointSnapshot { x: 10.0, y: 20.0 });
    assert_eq!(
      snapshot.content_size,
      SizeSnapshot {
        width: 120.0,
        height: 40.0
      }
    );
    assert!(!snapshot.needs_layout);
  }

  #[test]
  fn test_tree_snapshot_lists_children() {
    let mut tree = BoxTree::new();
    let child = tree.insert(Arc::new(ComputedStyle::default()), vec![]);
    let root = tree.insert(Arc::new(ComputedStyle::default()), vec![child]);

    let snapshot = inspect(&tree);
    assert_eq!(snapshot.boxes.len(), 2);
    assert_eq!(snapshot.boxes[root.index()].children, vec![child.index()]);
  }

  #[test]
  fn test_snapshot_serializes_to_json() {
    let mut tree = BoxTree::new();
    tree.insert(Arc::new(ComputedStyle::default()), vec![]);

    let value = serde_json::to_value(inspect(&tree)).unwrap();
    assert!(value["boxes"][0]["needs_layout"].as_bool().unwrap());
    assert_eq!(value["boxes"][0]["position"]["x"], 0.0);
  }
}
