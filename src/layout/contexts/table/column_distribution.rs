//! Table Column Width Distribution Algorithm
//!
//! Implements CSS table column width distribution as specified in:
//! - CSS Tables Module Level 3, Section 4 (Width computation)
//! - CSS 2.1 Section 17.5.2.2 (Automatic table layout algorithm)
//!
//! # Overview
//!
//! Column width distribution is a constraint-solving problem where available
//! table width must be distributed across columns while respecting:
//! - Minimum content widths (columns can't be narrower than content)
//! - Maximum content widths (columns prefer to fit content without wrapping)
//! - Fixed widths (explicit `width` on cells or column boxes)
//! - Percentage widths (relative to table width)
//!
//! # Algorithm
//!
//! The algorithm proceeds in phases:
//! 1. Apply fixed widths directly
//! 2. Resolve percentage widths based on available space
//! 3. Compute remaining space after fixed and percentage columns
//! 4. Distribute remaining space proportionally to flexible columns
//!
//! # References
//!
//! - CSS Tables Module Level 3: <https://www.w3.org/TR/css-tables-3/>
//! - CSS 2.1 Section 17.5: <https://www.w3.org/TR/CSS21/tables.html#width-layout>

use log::trace;
use std::fmt;

/// Constraints for a single table column
///
/// Each column has various width constraints that affect the distribution
/// algorithm. These constraints come from cell content analysis, explicit
/// widths, and percentage specifications.
///
/// # Examples
///
/// ```
/// use fastlayout::layout::contexts::table::ColumnConstraints;
///
/// // A column with content-based sizing
/// let auto_column = ColumnConstraints::new(50.0, 150.0);
/// assert_eq!(auto_column.min_width, 50.0);
/// assert_eq!(auto_column.max_width, 150.0);
///
/// // A fixed-width column
/// let fixed_column = ColumnConstraints::fixed(100.0);
/// assert_eq!(fixed_column.fixed_width, Some(100.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnConstraints {
  /// Minimum content width (narrowest the column can be without overflow)
  ///
  /// This is the width of the widest unbreakable content in any cell in
  /// this column.
  pub min_width: f32,

  /// Maximum content width (widest the column wants to be)
  ///
  /// This is the width at which all content in the column would fit
  /// without wrapping.
  pub max_width: f32,

  /// Fixed width from an explicit `width` declaration
  ///
  /// If set, this column should be exactly this width (subject to
  /// min_width). Takes precedence over percentage and auto sizing.
  pub fixed_width: Option<f32>,

  /// Percentage width relative to table width (can exceed 100%)
  ///
  /// Values may exceed 100% and are treated as over-constrained requests.
  pub percentage: Option<f32>,

  /// Whether this column can be resized during distribution
  ///
  /// Fixed and percentage columns are not flexible; auto columns are and
  /// receive proportional distribution.
  pub is_flexible: bool,
}

impl ColumnConstraints {
  /// Creates new column constraints with min/max content widths
  ///
  /// The result is a flexible auto-sizing column that can receive extra
  /// space. `max_width` is normalized to be at least `min_width`.
  pub fn new(min_width: f32, max_width: f32) -> Self {
    Self {
      min_width,
      max_width: max_width.max(min_width),
      fixed_width: None,
      percentage: None,
      is_flexible: true,
    }
  }

  /// Creates a fixed-width column
  pub fn fixed(width: f32) -> Self {
    Self {
      min_width: width,
      max_width: width,
      fixed_width: Some(width),
      percentage: None,
      is_flexible: false,
    }
  }

  /// Creates a percentage-width column
  ///
  /// Negative percentages are clamped to zero; values above 100% are
  /// allowed and simply over-commit the table.
  pub fn percentage(percentage: f32, min_width: f32, max_width: f32) -> Self {
    Self {
      min_width,
      max_width: max_width.max(min_width),
      fixed_width: None,
      percentage: Some(percentage.max(0.0)),
      is_flexible: false,
    }
  }

  /// Creates a zero-sized column (placeholder for empty columns)
  pub fn zero() -> Self {
    Self::new(0.0, 0.0)
  }

  /// Marks this column as fixed-width, keeping the current min/max widths.
  pub fn set_fixed(&mut self, width: f32) {
    self.fixed_width = Some(width);
    self.percentage = None;
    self.is_flexible = false;
  }

  /// Marks this column as percentage-based, keeping the current min/max widths.
  pub fn set_percentage(&mut self, percentage: f32) {
    self.percentage = Some(percentage.max(0.0));
    self.fixed_width = None;
    self.is_flexible = false;
  }

  /// Returns the flexibility range (max - min)
  ///
  /// This represents how much the column can grow from min to max and is
  /// the weight used in proportional distribution.
  pub fn flexibility_range(&self) -> f32 {
    (self.max_width - self.min_width).max(0.0)
  }
}

impl Default for ColumnConstraints {
  fn default() -> Self {
    Self::new(0.0, f32::MAX)
  }
}

impl fmt::Display for ColumnConstraints {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if let Some(fixed) = self.fixed_width {
      write!(f, "Fixed({}px)", fixed)
    } else if let Some(pct) = self.percentage {
      write!(f, "{}%", pct)
    } else {
      write!(f, "Auto({}-{}px)", self.min_width, self.max_width)
    }
  }
}

/// Distribution mode for the column width algorithm
///
/// Different table layout modes use different distribution strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistributionMode {
  /// Fixed table layout (`table-layout: fixed`)
  ///
  /// Column widths come only from the first row and column boxes.
  /// Much simpler and faster than auto layout.
  Fixed,

  /// Auto table layout (`table-layout: auto`)
  ///
  /// Column widths are determined by analyzing all cell content.
  /// More work but produces better results for variable content.
  Auto,
}

impl Default for DistributionMode {
  fn default() -> Self {
    Self::Auto
  }
}

/// Result of column width distribution
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnWidthDistributionResult {
  /// Computed width for each column
  pub widths: Vec<f32>,

  /// Total width of all columns
  pub total_width: f32,

  /// Whether the table is over-constrained (required > available)
  pub is_over_constrained: bool,

  /// Amount of width that couldn't be accommodated (if over-constrained)
  pub overflow_amount: f32,
}

impl ColumnWidthDistributionResult {
  /// Creates a new distribution result
  pub fn new(widths: Vec<f32>) -> Self {
    let total_width = widths.iter().sum();
    Self {
      widths,
      total_width,
      is_over_constrained: false,
      overflow_amount: 0.0,
    }
  }

  /// Returns the width of a specific column
  ///
  /// Returns 0.0 if the column index is out of bounds.
  pub fn column_width(&self, index: usize) -> f32 {
    self.widths.get(index).copied().unwrap_or(0.0)
  }

  /// Returns the number of columns
  pub fn column_count(&self) -> usize {
    self.widths.len()
  }
}

/// Column width distribution algorithm
///
/// The main entry point for distributing table width across columns.
/// Implements both fixed and auto layout algorithms.
///
/// # Examples
///
/// ```
/// use fastlayout::layout::contexts::table::{
///     ColumnConstraints, ColumnDistributor, DistributionMode,
/// };
///
/// let constraints = vec![
///     ColumnConstraints::new(50.0, 150.0),
///     ColumnConstraints::new(100.0, 200.0),
///     ColumnConstraints::new(75.0, 175.0),
/// ];
///
/// let distributor = ColumnDistributor::new(DistributionMode::Auto);
/// let result = distributor.distribute(&constraints, 500.0);
///
/// assert_eq!(result.column_count(), 3);
/// assert!((result.total_width - 500.0).abs() < 0.01);
/// ```
#[derive(Debug, Clone)]
pub struct ColumnDistributor {
  /// Distribution mode (fixed or auto)
  mode: DistributionMode,

  /// Minimum column width (for empty columns)
  min_column_width: f32,
}

impl ColumnDistributor {
  /// Creates a new column distributor with the specified mode
  pub fn new(mode: DistributionMode) -> Self {
    Self {
      mode,
      min_column_width: 0.0,
    }
  }

  /// Sets the minimum width for any column
  ///
  /// Even empty columns will be at least this wide.
  pub fn with_min_column_width(mut self, width: f32) -> Self {
    self.min_column_width = width;
    self
  }

  /// Distributes available width across columns
  ///
  /// Selects the appropriate algorithm based on the mode and returns
  /// computed widths for all columns.
  pub fn distribute(
    &self,
    columns: &[ColumnConstraints],
    available_width: f32,
  ) -> ColumnWidthDistributionResult {
    if columns.is_empty() {
      return ColumnWidthDistributionResult::new(vec![]);
    }

    match self.mode {
      DistributionMode::Fixed => self.distribute_fixed(columns, available_width),
      DistributionMode::Auto => self.distribute_auto(columns, available_width),
    }
  }

  /// Fixed layout distribution
  ///
  /// 1. Fixed widths are applied directly
  /// 2. Percentage widths resolve against the available width
  /// 3. Remaining space is divided equally among the other columns
  fn distribute_fixed(
    &self,
    columns: &[ColumnConstraints],
    available_width: f32,
  ) -> ColumnWidthDistributionResult {
    let mut widths = vec![0.0; columns.len()];
    let mut remaining_width = available_width;
    let mut flexible_indices = Vec::new();
    let mut percent_indices = Vec::new();

    // Phase 1: Apply fixed widths
    for (i, col) in columns.iter().enumerate() {
      if let Some(fixed) = col.fixed_width {
        let width = fixed.max(col.min_width).max(self.min_column_width);
        widths[i] = width;
        remaining_width -= width;
      } else if let Some(pct) = col.percentage {
        percent_indices.push((i, pct));
      } else {
        flexible_indices.push(i);
      }
    }

    // Phase 2: Allocate percentage columns. Percentages are relative to the
    // table width and can overrun the available width; the table expands
    // when columns over-commit.
    for (idx, pct) in percent_indices {
      let col = &columns[idx];
      let raw = (pct / 100.0) * available_width;
      let width = raw.max(col.min_width).max(self.min_column_width);
      widths[idx] = width;
      remaining_width -= width;
    }

    // Phase 3: Distribute remaining to flexible columns. If no space
    // remains, auto columns still honor their minimum widths.
    if !flexible_indices.is_empty() {
      if remaining_width > 0.0 {
        let per_column = remaining_width / flexible_indices.len() as f32;
        for &i in &flexible_indices {
          let col = &columns[i];
          widths[i] = per_column
            .max(col.min_width)
            .max(self.min_column_width)
            .min(col.max_width.max(col.min_width));
        }
      } else {
        for &i in &flexible_indices {
          let col = &columns[i];
          widths[i] = col
            .min_width
            .max(self.min_column_width)
            .min(col.max_width.max(col.min_width));
        }
      }
    }

    let total: f32 = widths.iter().sum();
    let is_over_constrained = total > available_width;
    let overflow_amount = if is_over_constrained {
      total - available_width
    } else {
      0.0
    };

    ColumnWidthDistributionResult {
      widths,
      total_width: total,
      is_over_constrained,
      overflow_amount,
    }
  }

  /// Auto layout distribution
  ///
  /// 1. Apply fixed widths
  /// 2. Resolve percentage widths
  /// 3. Compute remaining space
  /// 4. Distribute proportionally to flexible columns
  fn distribute_auto(
    &self,
    columns: &[ColumnConstraints],
    available_width: f32,
  ) -> ColumnWidthDistributionResult {
    let total_min: f32 = columns
      .iter()
      .map(|c| c.min_width.max(self.min_column_width))
      .sum();
    let total_max: f32 = columns
      .iter()
      .map(|c| c.max_width.max(self.min_column_width))
      .sum();
    let has_percentage = columns.iter().any(|c| c.percentage.is_some());

    // Guard against a non-finite available width: fall back to the
    // tightest finite bound we have.
    let mut available_width = available_width;
    if !available_width.is_finite() {
      if total_max.is_finite() {
        available_width = total_max;
      } else if total_min.is_finite() {
        available_width = total_min;
      } else {
        available_width = 0.0;
      }
    }

    if available_width <= 0.0 {
      // No space available, use minimums
      return self.distribute_at_minimum(columns);
    }

    if available_width >= total_max && !has_percentage {
      // Plenty of space, give each column its max
      return self.distribute_at_maximum(columns);
    }

    if available_width <= total_min {
      // Not enough space even for minimums
      return self.distribute_under_minimum(columns, available_width);
    }

    self.distribute_proportionally(columns, available_width)
  }

  fn distribute_at_minimum(&self, columns: &[ColumnConstraints]) -> ColumnWidthDistributionResult {
    let widths = columns
      .iter()
      .map(|col| col.min_width.max(self.min_column_width))
      .collect();
    ColumnWidthDistributionResult::new(widths)
  }

  fn distribute_at_maximum(&self, columns: &[ColumnConstraints]) -> ColumnWidthDistributionResult {
    let widths = columns
      .iter()
      .map(|col| col.max_width.max(self.min_column_width))
      .collect();
    ColumnWidthDistributionResult::new(widths)
  }

  /// Distribute when available is less than the total minimum
  ///
  /// Minimum widths win over the available space; the overflow is
  /// reported to the caller instead of squeezing content.
  fn distribute_under_minimum(
    &self,
    columns: &[ColumnConstraints],
    available_width: f32,
  ) -> ColumnWidthDistributionResult {
    let widths: Vec<f32> = columns
      .iter()
      .map(|col| col.min_width.max(self.min_column_width))
      .collect();
    let total_min: f32 = widths.iter().sum();

    ColumnWidthDistributionResult {
      widths,
      total_width: total_min,
      is_over_constrained: true,
      overflow_amount: (total_min - available_width).max(0.0),
    }
  }

  /// Distribute proportionally between min and max
  fn distribute_proportionally(
    &self,
    columns: &[ColumnConstraints],
    available_width: f32,
  ) -> ColumnWidthDistributionResult {
    let mut widths = vec![0.0; columns.len()];
    let mut remaining_width = available_width;
    let mut flexible_indices = Vec::new();
    let mut percent_indices = Vec::new();

    for (i, col) in columns.iter().enumerate() {
      if let Some(fixed) = col.fixed_width {
        let width = fixed.max(col.min_width).max(self.min_column_width);
        widths[i] = width;
        remaining_width -= width;
      } else if let Some(pct) = col.percentage {
        percent_indices.push((i, pct));
      } else {
        flexible_indices.push(i);
      }
    }

    // Percentages resolve against the table's available width. Percent
    // columns can overrun the remaining budget; over-constraint is
    // reported to the caller instead of scaling them down.
    for (idx, pct) in percent_indices {
      let col = &columns[idx];
      let raw = (pct / 100.0) * available_width;
      let width = raw.max(col.min_width).max(self.min_column_width);
      widths[idx] = width;
      remaining_width -= width;
    }

    if !flexible_indices.is_empty() {
      self.distribute_to_flexible(columns, &mut widths, &flexible_indices, remaining_width);
    }

    let total: f32 = widths.iter().sum();
    let is_over_constrained = total > available_width + 0.01; // Small tolerance

    ColumnWidthDistributionResult {
      widths,
      total_width: total,
      is_over_constrained,
      overflow_amount: if is_over_constrained {
        total - available_width
      } else {
        0.0
      },
    }
  }

  /// Distribute remaining width to flexible columns
  fn distribute_to_flexible(
    &self,
    columns: &[ColumnConstraints],
    widths: &mut [f32],
    flexible_indices: &[usize],
    remaining_width: f32,
  ) {
    if remaining_width <= 0.0 {
      for &i in flexible_indices {
        widths[i] = columns[i].min_width.max(self.min_column_width);
      }
      return;
    }

    let mut flexible_min = 0.0;
    let mut flexible_max = 0.0;
    for &i in flexible_indices {
      flexible_min += columns[i].min_width.max(self.min_column_width);
      flexible_max += columns[i].max_width.max(self.min_column_width);
    }

    if remaining_width >= flexible_max {
      for &i in flexible_indices {
        widths[i] = columns[i].max_width.max(self.min_column_width);
      }
      return;
    }

    if remaining_width <= flexible_min {
      // Not enough for minimums; keep mins and let the caller mark the
      // over-constraint.
      for &i in flexible_indices {
        widths[i] = columns[i].min_width.max(self.min_column_width);
      }
      return;
    }

    // Between min and max: distribute the excess proportionally to each
    // column's flexibility range, with explicit handling for unbounded
    // ranges so we don't divide by infinity and produce NaN. Ranges are
    // summed in f64 because two f32::MAX ranges saturate f32 addition.
    let excess = remaining_width - flexible_min;
    let mut infinite_indices = Vec::new();
    let mut finite_flex_total = 0.0f64;
    for &i in flexible_indices {
      let range = columns[i].flexibility_range();
      if range.is_finite() {
        finite_flex_total += range as f64;
      } else {
        infinite_indices.push(i);
      }
      widths[i] = columns[i].min_width.max(self.min_column_width);
    }

    let mut remaining_excess = excess;

    // Columns with finite headroom take shares proportional to their
    // range, capped at their max. Whatever they cannot absorb is left for
    // unbounded columns.
    if finite_flex_total > 0.0 {
      for &i in flexible_indices {
        let range = columns[i].flexibility_range();
        if !range.is_finite() {
          continue;
        }
        let share = (excess as f64 * (range as f64 / finite_flex_total)) as f32;
        let clamped = share.min(range);
        trace!("column {} takes {:.2} of {:.2} excess", i, clamped, excess);
        widths[i] =
          (columns[i].min_width.max(self.min_column_width) + clamped).min(columns[i].max_width);
        remaining_excess -= clamped;
      }
      remaining_excess = remaining_excess.max(0.0);
    }

    if remaining_excess > 0.0 {
      if !infinite_indices.is_empty() {
        // Leftover space goes to unbounded columns, divided evenly
        let per = remaining_excess / infinite_indices.len() as f32;
        for idx in infinite_indices {
          widths[idx] += per;
        }
      } else if finite_flex_total == 0.0 {
        // No range information at all (min == max everywhere); split evenly
        let per_column = remaining_width / flexible_indices.len() as f32;
        for &i in flexible_indices {
          widths[i] = per_column;
        }
      }
    }
  }
}

impl Default for ColumnDistributor {
  fn default() -> Self {
    Self::new(DistributionMode::Auto)
  }
}

/// Distribute a spanning cell's width requirement among its columns
///
/// When a cell spans multiple columns, its width requirements need to be
/// spread over the spanned columns. The extra minimum is distributed
/// proportionally to each column's flexibility range; when every spanned
/// column is equally rigid the deficit is split evenly instead.
///
/// # Arguments
///
/// * `columns` - Mutable column constraints
/// * `start_col` - First column in the span
/// * `end_col` - One past the last column in the span
/// * `cell_min` - Spanning cell's minimum width
/// * `cell_max` - Spanning cell's maximum width
///
/// # Examples
///
/// ```
/// use fastlayout::layout::contexts::table::{
///     distribute_spanning_cell_width, ColumnConstraints,
/// };
///
/// let mut columns = vec![
///     ColumnConstraints::new(50.0, 100.0),
///     ColumnConstraints::new(50.0, 100.0),
/// ];
///
/// // A spanning cell requires 250px minimum
/// distribute_spanning_cell_width(&mut columns, 0, 2, 250.0, 300.0);
///
/// assert!(columns[0].min_width + columns[1].min_width >= 250.0);
/// ```
pub fn distribute_spanning_cell_width(
  columns: &mut [ColumnConstraints],
  start_col: usize,
  end_col: usize,
  cell_min: f32,
  cell_max: f32,
) {
  if start_col >= end_col || end_col > columns.len() {
    return;
  }

  // Ignore non-finite requirements; they cannot be satisfied meaningfully
  // and would otherwise contaminate the computation with NaNs.
  let required_min = if cell_min.is_finite() {
    cell_min.max(0.0)
  } else {
    0.0
  };

  let spanned = &mut columns[start_col..end_col];
  let count = spanned.len() as f32;

  let current_min: f32 = spanned.iter().map(|c| c.min_width).sum();
  if required_min > current_min {
    let deficit = required_min - current_min;

    // Ranges are summed in f64 so two f32::MAX ranges don't saturate the
    // total to infinity and zero out every share.
    let mut finite_flex_total = 0.0f64;
    let mut infinite_count = 0usize;
    for col in spanned.iter() {
      let range = col.flexibility_range();
      if range.is_finite() {
        finite_flex_total += range as f64;
      } else {
        infinite_count += 1;
      }
    }

    if infinite_count > 0 {
      // Unbounded columns absorb the whole deficit evenly
      let per = deficit / infinite_count as f32;
      for col in spanned.iter_mut() {
        if !col.flexibility_range().is_finite() {
          col.min_width += per;
        }
      }
    } else if finite_flex_total > 0.0 {
      for col in spanned.iter_mut() {
        let share = (deficit as f64 * (col.flexibility_range() as f64 / finite_flex_total)) as f32;
        col.min_width += share;
      }
    } else {
      // Every spanned column is rigid; split the deficit evenly
      let per = deficit / count;
      for col in spanned.iter_mut() {
        col.min_width += per;
      }
    }

    for col in spanned.iter_mut() {
      if col.max_width < col.min_width {
        col.max_width = col.min_width;
      }
    }
  }

  if cell_max.is_finite() {
    let current_max: f32 = spanned.iter().map(|c| c.max_width).sum();
    if current_max.is_finite() && cell_max > current_max {
      let deficit = cell_max - current_max;
      let weight_sum: f32 = spanned.iter().map(|c| c.max_width.max(0.0)).sum();
      for col in spanned.iter_mut() {
        let weight = if weight_sum > 0.0 {
          col.max_width.max(0.0) / weight_sum
        } else {
          1.0 / count
        };
        col.max_width = (col.max_width + deficit * weight).max(col.min_width);
      }
    }
  }
}

/// Computes column constraints from a grid of cell measurements
///
/// Each cell is `(min_width, max_width, colspan)`; rows are listed in
/// table order. Single-column cells raise their column's bounds directly;
/// spanning cells are handled in a second pass so the columns they cover
/// already carry the single-cell bounds.
///
/// # Examples
///
/// ```
/// use fastlayout::layout::contexts::table::compute_column_constraints;
///
/// // 2x2 table with no colspan
/// let cell_widths = vec![
///     vec![(50.0, 100.0, 1), (75.0, 150.0, 1)],
///     vec![(60.0, 120.0, 1), (80.0, 160.0, 1)],
/// ];
///
/// let constraints = compute_column_constraints(&cell_widths, 2);
/// assert_eq!(constraints.len(), 2);
/// assert_eq!(constraints[0].min_width, 60.0);
/// ```
pub fn compute_column_constraints(
  cell_widths: &[Vec<(f32, f32, usize)>],
  column_count: usize,
) -> Vec<ColumnConstraints> {
  let mut constraints: Vec<ColumnConstraints> = (0..column_count)
    .map(|_| ColumnConstraints::zero())
    .collect();

  // First pass: non-spanning cells
  for row in cell_widths {
    let mut col_idx = 0;
    for &(min_width, max_width, colspan) in row {
      if col_idx >= column_count {
        break;
      }

      if colspan == 1 {
        constraints[col_idx].min_width = constraints[col_idx].min_width.max(min_width);
        constraints[col_idx].max_width = constraints[col_idx].max_width.max(max_width);
      }

      col_idx += colspan.max(1);
    }
  }

  // Second pass: spanning cells
  for row in cell_widths {
    let mut col_idx = 0;
    for &(min_width, max_width, colspan) in row {
      if col_idx >= column_count {
        break;
      }

      if colspan > 1 {
        let end_col = (col_idx + colspan).min(column_count);
        distribute_spanning_cell_width(&mut constraints, col_idx, end_col, min_width, max_width);
      }

      col_idx += colspan.max(1);
    }
  }

  // Ensure all columns keep max >= min
  for col in &mut constraints {
    if col.max_width < col.min_width {
      col.max_width = col.min_width;
    }
  }

  constraints
}
