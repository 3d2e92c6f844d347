//! Table Formatting Context - column solving and cell placement
//!
//! Lays out `display: table` boxes. The work splits into structure
//! extraction (`layout::table`), column width distribution
//! (`column_distribution`), and the orchestration here:
//!
//! 1. Extract the row/column/cell structure from the box tree
//! 2. Gather per-column constraints from column boxes and cells
//! 3. Distribute the table's content width across the columns
//! 4. Lay out every cell at its span width to learn its height
//! 5. Compute row heights and write cell geometry back into the tree
//!
//! `table-layout: fixed` swaps step 2 for a content-free variant that
//! reads only column boxes and the first row, leaving every other column
//! to share the leftover space.
//!
//! Cell positions are written relative to their row box; rows and row
//! groups are positioned relative to their own parents, so walking the
//! ancestor chain accumulates absolute offsets the same way it does for
//! grid items.
//!
//! # References
//!
//! - CSS 2.1 Section 17: <https://www.w3.org/TR/CSS21/tables.html>
//! - CSS Tables Module Level 3: <https://www.w3.org/TR/css-tables-3/>

pub mod column_distribution;

pub use column_distribution::{
  compute_column_constraints, distribute_spanning_cell_width, ColumnConstraints,
  ColumnDistributor, ColumnWidthDistributionResult, DistributionMode,
};

use log::debug;

use crate::geometry::Point;
use crate::geometry::Size;
use crate::layout::constraints::LayoutConstraints;
use crate::layout::formatting_context::FormattingContext;
use crate::layout::formatting_context::IntrinsicSizingMode;
use crate::layout::formatting_context::LayoutError;
use crate::layout::table::{SpecifiedSize, TableStructure};
use crate::tree::BoxId;
use crate::tree::BoxTree;

/// Ordered row boxes with their enclosing group, aligned with
/// [`TableStructure`]'s row indices
struct RowBoxes {
  rows: Vec<(BoxId, Option<BoxId>)>,
}

impl RowBoxes {
  /// Walks the table's children in the same order structure extraction
  /// does, so `rows[i]` is the box behind `structure.rows[i]`.
  fn collect(tree: &BoxTree, table: BoxId) -> Self {
    let mut rows = Vec::new();
    for &child in tree.node(table).children() {
      let display = tree.node(child).style.display;
      if display.is_table_row_group() {
        for &row in tree.node(child).children() {
          if tree.node(row).style.display.is_table_row() {
            rows.push((row, Some(child)));
          }
        }
      } else if display.is_table_row() {
        rows.push((child, None));
      }
    }
    Self { rows }
  }

  fn groups(&self) -> Vec<BoxId> {
    let mut groups = Vec::new();
    for &(_, group) in &self.rows {
      if let Some(group) = group {
        if groups.last() != Some(&group) {
          groups.push(group);
        }
      }
    }
    groups
  }
}

/// Table Formatting Context
///
/// Stateless; every layout call rebuilds the table structure from the box
/// tree and writes geometry back through it.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use fastlayout::layout::contexts::table::TableFormattingContext;
/// use fastlayout::layout::{FormattingContext, LayoutConstraints};
/// use fastlayout::{BoxTree, ComputedStyle, Display};
///
/// let mut tree = BoxTree::new();
/// let cell_style = Arc::new(ComputedStyle::builder().display(Display::TableCell).build());
/// let cell = tree.insert(cell_style, vec![]);
/// let row_style = Arc::new(ComputedStyle::builder().display(Display::TableRow).build());
/// let row = tree.insert(row_style, vec![cell]);
/// let table_style = Arc::new(ComputedStyle::builder().display(Display::Table).build());
/// let table = tree.insert(table_style, vec![row]);
///
/// let fc = TableFormattingContext::new();
/// let constraints = LayoutConstraints::with_definite_size(400.0, 300.0);
/// fc.layout(&mut tree, table, &constraints).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct TableFormattingContext;

impl TableFormattingContext {
  pub fn new() -> Self {
    Self
  }

  /// Per-column constraints for the auto algorithm
  ///
  /// Column boxes seed fixed and percentage widths; every cell then raises
  /// its columns' content bounds. Spanning cells run in a second pass so
  /// they distribute their requirement over bounds the single-column cells
  /// have already established.
  fn auto_constraints(tree: &BoxTree, structure: &TableStructure) -> Vec<ColumnConstraints> {
    let mut constraints: Vec<ColumnConstraints> = (0..structure.column_count)
      .map(|_| ColumnConstraints::zero())
      .collect();

    for (index, column) in structure.columns.iter().enumerate() {
      match column.specified_width {
        SpecifiedSize::Fixed(px) => constraints[index].set_fixed(px),
        SpecifiedSize::Percent(pct) => constraints[index].set_percentage(pct),
        SpecifiedSize::Auto => {}
      }
    }

    for cell in &structure.cells {
      if cell.colspan != 1 {
        continue;
      }
      let node = tree.node(cell.box_id);
      let min = node.min_content_inline_contribution();
      let max = node.max_content_inline_contribution();
      let constraint = &mut constraints[cell.col];
      constraint.min_width = constraint.min_width.max(min);
      constraint.max_width = constraint.max_width.max(constraint.min_width).max(max);
      // A cell's specified width pins the column unless a column box or an
      // earlier cell already did
      if constraint.fixed_width.is_none() && constraint.percentage.is_none() {
        match SpecifiedSize::from_style(node.style.width) {
          SpecifiedSize::Fixed(px) => {
            let fixed = px + node.style.horizontal_border_padding();
            constraint.max_width = constraint.max_width.max(fixed);
            constraint.set_fixed(fixed.max(constraint.min_width));
          }
          SpecifiedSize::Percent(pct) => constraint.set_percentage(pct),
          SpecifiedSize::Auto => {}
        }
      }
    }

    for cell in &structure.cells {
      if cell.colspan <= 1 {
        continue;
      }
      let node = tree.node(cell.box_id);
      let end = (cell.col + cell.colspan).min(structure.column_count);
      distribute_spanning_cell_width(
        &mut constraints,
        cell.col,
        end,
        node.min_content_inline_contribution(),
        node.max_content_inline_contribution(),
      );
    }

    constraints
  }

  /// Per-column constraints for the fixed algorithm
  ///
  /// Only column boxes and the first row's cells speak; content is never
  /// measured. A spanning cell's specified width is split evenly across
  /// the columns it covers. Columns nothing constrains stay fully
  /// flexible and share the leftover space.
  fn fixed_constraints(tree: &BoxTree, structure: &TableStructure) -> Vec<ColumnConstraints> {
    let mut constraints: Vec<ColumnConstraints> = (0..structure.column_count)
      .map(|_| ColumnConstraints::default())
      .collect();

    for (index, column) in structure.columns.iter().enumerate() {
      match column.specified_width {
        SpecifiedSize::Fixed(px) => constraints[index] = ColumnConstraints::fixed(px),
        SpecifiedSize::Percent(pct) => {
          constraints[index] = ColumnConstraints::percentage(pct, 0.0, f32::MAX)
        }
        SpecifiedSize::Auto => {}
      }
    }

    for cell in structure.cells.iter().filter(|cell| cell.row == 0) {
      let node = tree.node(cell.box_id);
      let end = (cell.col + cell.colspan).min(structure.column_count);
      let span = (end - cell.col).max(1) as f32;
      match SpecifiedSize::from_style(node.style.width) {
        SpecifiedSize::Fixed(px) => {
          let per_column = (px + node.style.horizontal_border_padding()) / span;
          for constraint in &mut constraints[cell.col..end] {
            if constraint.fixed_width.is_none() && constraint.percentage.is_none() {
              *constraint = ColumnConstraints::fixed(per_column);
            }
          }
        }
        SpecifiedSize::Percent(pct) => {
          let per_column = pct / span;
          for constraint in &mut constraints[cell.col..end] {
            if constraint.fixed_width.is_none() && constraint.percentage.is_none() {
              *constraint = ColumnConstraints::percentage(per_column, 0.0, f32::MAX);
            }
          }
        }
        SpecifiedSize::Auto => {}
      }
    }

    constraints
  }

  /// Runs the right distribution for the structure's layout mode
  fn distribute_columns(
    tree: &BoxTree,
    structure: &TableStructure,
    available_width: f32,
  ) -> ColumnWidthDistributionResult {
    let (mode, constraints) = if structure.is_fixed_layout {
      (
        DistributionMode::Fixed,
        Self::fixed_constraints(tree, structure),
      )
    } else {
      (
        DistributionMode::Auto,
        Self::auto_constraints(tree, structure),
      )
    };
    let distributor = ColumnDistributor::new(mode);
    distributor.distribute(&constraints, available_width)
  }

  /// The table's content-box width before column widths are known
  fn resolve_content_width(
    &self,
    tree: &BoxTree,
    root: BoxId,
    constraints: &LayoutConstraints,
  ) -> Result<f32, LayoutError> {
    let style = &tree.node(root).style;
    if let Some(width) = style.width.resolve_against(constraints.percentage_base_width) {
      return Ok(width.max(0.0));
    }
    if let Some(available) = constraints.available_width.definite_value() {
      return Ok((available - style.horizontal_border_padding()).max(0.0));
    }
    let intrinsic = self.intrinsic_inline_size(tree, root, IntrinsicSizingMode::MaxContent)?;
    Ok((intrinsic - style.horizontal_border_padding()).max(0.0))
  }

  /// The table's content-box height, `None` while indefinite
  ///
  /// Unlike width, a table's height never comes from the available space;
  /// only an explicit `height` makes it definite.
  fn resolve_content_height(
    &self,
    tree: &BoxTree,
    root: BoxId,
    constraints: &LayoutConstraints,
  ) -> Option<f32> {
    let style = &tree.node(root).style;
    style
      .height
      .resolve_against(constraints.percentage_base_height)
  }
}

impl FormattingContext for TableFormattingContext {
  fn layout(
    &self,
    tree: &mut BoxTree,
    root: BoxId,
    constraints: &LayoutConstraints,
  ) -> Result<Size, LayoutError> {
    let style = tree.node(root).style.clone();
    if !style.display.is_table() {
      return Err(LayoutError::UnsupportedBoxType(format!(
        "{:?} is not a table box",
        style.display
      )));
    }

    let mut structure = TableStructure::from_box_tree(tree, root);
    let content_width = self.resolve_content_width(tree, root, constraints)?;
    let column_space = (content_width - structure.total_horizontal_spacing()).max(0.0);

    let result = Self::distribute_columns(tree, &structure, column_space);
    if result.is_over_constrained {
      debug!(
        "table columns over-constrained by {:.1}px",
        result.overflow_amount
      );
    }
    for (column, width) in structure.columns.iter_mut().zip(&result.widths) {
      column.computed_width = *width;
    }

    // Cells learn their width from their span, lay out, and report the
    // height the rows must accommodate
    for index in 0..structure.cells.len() {
      let cell = structure.cells[index].clone();
      let span_width = structure.cell_span_width(&cell);
      let inset = tree.node(cell.box_id).style.horizontal_border_padding();
      tree.set_override_content_width(cell.box_id, Some((span_width - inset).max(0.0)));
      tree.layout_box(cell.box_id);
      let node = tree.node(cell.box_id);
      structure.cells[index].min_height =
        node.content_size().height + node.style.vertical_border_padding();
    }

    let content_height = self.resolve_content_height(tree, root, constraints);
    structure.calculate_row_heights(content_height);

    // Over-committed columns widen the table; otherwise it shrink-wraps
    // until the requested width is reached
    let used_content_width = structure.content_width().max(content_width);
    let used_content_height = structure.content_height().max(content_height.unwrap_or(0.0));

    let border = style.border_widths();
    let origin = Point::new(border.left + style.padding.left, border.top + style.padding.top);
    let row_boxes = RowBoxes::collect(tree, root);

    // Row groups span their rows; rows sit inside groups or the table
    for group in row_boxes.groups() {
      let members: Vec<usize> = row_boxes
        .rows
        .iter()
        .enumerate()
        .filter(|(_, (_, g))| *g == Some(group))
        .map(|(index, _)| index)
        .collect();
      let first = &structure.rows[members[0]];
      let last = &structure.rows[*members.last().unwrap()];
      let top = first.y_position;
      let height = last.y_position + last.computed_height - top;
      let inset_h = tree.node(group).style.horizontal_border_padding();
      let inset_v = tree.node(group).style.vertical_border_padding();
      tree.set_override_content_width(group, Some((used_content_width - inset_h).max(0.0)));
      tree.set_override_content_height(group, Some((height - inset_v).max(0.0)));
      tree.layout_box(group);
      tree.set_position(group, Point::new(origin.x, origin.y + top));
    }

    for (index, &(row_box, group)) in row_boxes.rows.iter().enumerate() {
      let row = &structure.rows[index];
      let position = match group {
        Some(group) => {
          let group_top = tree.node(group).position().y - origin.y;
          Point::new(0.0, row.y_position - group_top)
        }
        None => Point::new(origin.x, origin.y + row.y_position),
      };
      let inset_h = tree.node(row_box).style.horizontal_border_padding();
      let inset_v = tree.node(row_box).style.vertical_border_padding();
      tree.set_override_content_width(row_box, Some((used_content_width - inset_h).max(0.0)));
      tree.set_override_content_height(row_box, Some((row.computed_height - inset_v).max(0.0)));
      tree.layout_box(row_box);
      tree.set_position(row_box, position);
    }

    // Cells, relative to their row; rowspan cells stretch past the row's
    // bottom edge into the rows below
    for cell in &structure.cells {
      let span_height = structure.cell_span_height(cell);
      let inset = tree.node(cell.box_id).style.vertical_border_padding();
      tree.set_override_content_height(cell.box_id, Some((span_height - inset).max(0.0)));
      tree.layout_box(cell.box_id);
      tree.set_position(
        cell.box_id,
        Point::new(structure.column_x_offset(cell.col), 0.0),
      );
    }

    tree.set_override_content_width(root, Some(used_content_width));
    tree.set_override_content_height(root, Some(used_content_height));
    tree.layout_box(root);
    Ok(tree.node(root).border_box_size())
  }

  fn intrinsic_inline_size(
    &self,
    tree: &BoxTree,
    root: BoxId,
    mode: IntrinsicSizingMode,
  ) -> Result<f32, LayoutError> {
    let style = &tree.node(root).style;
    if !style.display.is_table() {
      return Err(LayoutError::UnsupportedBoxType(format!(
        "{:?} is not a table box",
        style.display
      )));
    }

    let structure = TableStructure::from_box_tree(tree, root);
    let constraints = Self::auto_constraints(tree, &structure);
    let columns: f32 = match mode {
      IntrinsicSizingMode::MinContent => constraints
        .iter()
        .map(|constraint| constraint.fixed_width.unwrap_or(constraint.min_width))
        .sum(),
      IntrinsicSizingMode::MaxContent => constraints
        .iter()
        .map(|constraint| {
          constraint
            .fixed_width
            .unwrap_or(constraint.max_width)
            .max(constraint.min_width)
        })
        .sum(),
    };
    Ok(columns + structure.total_horizontal_spacing() + style.horizontal_border_padding())
  }
}
