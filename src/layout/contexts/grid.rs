//! Grid Formatting Context - track sizing and item placement
//!
//! Implements a fixed-template subset of CSS Grid: the container's
//! `grid-template-columns` and `grid-template-rows` define every track, and
//! items land in exactly one cell via `grid-column` / `grid-row` line
//! indices. There are no implicit tracks, spans, named lines, or gaps.
//!
//! # Algorithm
//!
//! Track sizing runs per direction in three passes:
//!
//! 1. **Initial**: lengths and percentages resolve against the container's
//!    content box; content-sized tracks start at zero with an infinite
//!    growth limit.
//! 2. **Content**: tracks with min-content / max-content sizing grow to the
//!    largest matching contribution among the items placed in them.
//! 3. **Distribution**: leftover definite space is handed out track by
//!    track, visiting tracks in ascending order of growth potential so
//!    capped tracks release their unused share to the rest.
//!
//! Columns are sized first; items then receive their column breadth as an
//! override width and are laid out again before rows are sized, so row
//! contributions see post-width geometry.
//!
//! # References
//!
//! - CSS Grid Layout Module Level 1: <https://www.w3.org/TR/css-grid-1/>

use crate::geometry::Point;
use crate::geometry::Size;
use crate::layout::constraints::LayoutConstraints;
use crate::layout::formatting_context::FormattingContext;
use crate::layout::formatting_context::IntrinsicSizingMode;
use crate::layout::formatting_context::LayoutError;
use crate::style::computed::WritingMode;
use crate::style::grid::GridPosition;
use crate::style::grid::TrackBreadth;
use crate::style::grid::TrackSizingSpec;
use crate::style::ComputedStyle;
use crate::tree::BoxId;
use crate::tree::BoxTree;
use log::debug;
use log::trace;

/// Which track list a sizing pass operates on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackDirection {
  Columns,
  Rows,
}

impl TrackDirection {
  /// The container's track list for this direction
  pub fn specs(self, style: &ComputedStyle) -> &[TrackSizingSpec] {
    match self {
      Self::Columns => &style.grid_template_columns,
      Self::Rows => &style.grid_template_rows,
    }
  }
}

/// One sized track: a used breadth and a growth limit
///
/// The growth limit is `None` while infinite, which is how content-sized
/// tracks start out. Every mutation preserves `max >= used`; writes that
/// would break it pull the other bound along instead of failing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
  used_breadth: f32,
  max_breadth: Option<f32>,
}

impl Track {
  pub fn new(used_breadth: f32, max_breadth: Option<f32>) -> Self {
    let max_breadth = max_breadth.map(|max| max.max(used_breadth));
    Self {
      used_breadth,
      max_breadth,
    }
  }

  /// The track's current size
  pub fn used_breadth(&self) -> f32 {
    self.used_breadth
  }

  /// The growth limit, `None` while infinite
  pub fn max_breadth(&self) -> Option<f32> {
    self.max_breadth
  }

  /// The growth limit with the used breadth substituted while infinite
  pub fn effective_max_breadth(&self) -> f32 {
    self.max_breadth.unwrap_or(self.used_breadth)
  }

  /// How much the used breadth may still grow
  pub fn growth_potential(&self) -> f32 {
    match self.max_breadth {
      Some(max) => (max - self.used_breadth).max(0.0),
      None => f32::INFINITY,
    }
  }

  /// Grows the used breadth to at least `target`
  ///
  /// Growing to a target rather than by a delta keeps repeated passes from
  /// compounding: applying the same contribution twice is a no-op.
  pub fn grow_used_breadth_to(&mut self, target: f32) {
    if target > self.used_breadth {
      self.used_breadth = target;
      if let Some(max) = self.max_breadth {
        if max < self.used_breadth {
          self.max_breadth = Some(self.used_breadth);
        }
      }
    }
  }

  /// Grows the growth limit to at least `target`
  ///
  /// An infinite limit is first replaced by the used breadth, so the track
  /// ends up with a finite limit either way.
  pub fn grow_max_breadth_to(&mut self, target: f32) {
    let effective = self.effective_max_breadth();
    self.max_breadth = Some(effective.max(target));
  }

  /// Adds distributed free space to the used breadth
  ///
  /// Callers hand out at most [`Track::growth_potential`], so the limit
  /// cannot be overshot.
  fn grow_used_breadth_by(&mut self, amount: f32) {
    self.used_breadth += amount;
  }
}

impl Default for Track {
  /// A content-sized track before any sizing pass
  fn default() -> Self {
    Self::new(0.0, None)
  }
}

/// Resolves `grid-column` / `grid-row` values to track indices
///
/// Grid lines are 1-based in CSS; track indices are 0-based. Only forward
/// line indices are supported, so `auto` and out-of-range lines resolve to
/// the first track.
pub struct GridPositionResolver;

impl GridPositionResolver {
  /// Resolves one placement property to a track index
  ///
  /// # Examples
  ///
  /// ```
  /// use fastlayout::layout::contexts::grid::GridPositionResolver;
  /// use fastlayout::GridPosition;
  ///
  /// assert_eq!(GridPositionResolver::resolve(GridPosition::Auto), 0);
  /// assert_eq!(GridPositionResolver::resolve(GridPosition::LineIndex(1)), 0);
  /// assert_eq!(GridPositionResolver::resolve(GridPosition::LineIndex(2)), 1);
  /// assert_eq!(GridPositionResolver::resolve(GridPosition::LineIndex(0)), 0);
  /// assert_eq!(GridPositionResolver::resolve(GridPosition::LineIndex(-4)), 0);
  /// ```
  pub fn resolve(position: GridPosition) -> usize {
    match position {
      GridPosition::Auto => 0,
      GridPosition::LineIndex(line) if line <= 0 => 0,
      GridPosition::LineIndex(line) => (line - 1) as usize,
    }
  }

  /// Resolves both placement properties of an item
  pub fn resolve_item(style: &ComputedStyle) -> (usize, usize) {
    (
      Self::resolve(style.grid_column),
      Self::resolve(style.grid_row),
    )
  }
}

/// An item with its resolved cell
#[derive(Debug, Clone, Copy)]
pub struct GridItem {
  pub id: BoxId,
  pub column: usize,
  pub row: usize,
}

impl GridItem {
  /// Builds an item from its box, resolving both placement properties
  pub fn new(id: BoxId, style: &ComputedStyle) -> Self {
    let (column, row) = GridPositionResolver::resolve_item(style);
    Self { id, column, row }
  }

  /// The track this item occupies in the given direction
  pub fn track_index(&self, direction: TrackDirection) -> usize {
    match direction {
      TrackDirection::Columns => self.column,
      TrackDirection::Rows => self.row,
    }
  }
}

/// Sizes the tracks of one direction
///
/// Borrows the tree read-only; the engine applies the resulting breadths
/// to item geometry afterwards.
pub struct TrackSizer<'a> {
  tree: &'a BoxTree,
  specs: &'a [TrackSizingSpec],
  direction: TrackDirection,
  container_writing_mode: WritingMode,
}

impl<'a> TrackSizer<'a> {
  pub fn new(
    tree: &'a BoxTree,
    specs: &'a [TrackSizingSpec],
    direction: TrackDirection,
    container_writing_mode: WritingMode,
  ) -> Self {
    Self {
      tree,
      specs,
      direction,
      container_writing_mode,
    }
  }

  /// Runs all three sizing passes
  ///
  /// `available_space` is the container's content-box size in this
  /// direction and `percentage_basis` the base for percentage tracks;
  /// both are `0` / `None` when the container is indefinite, which skips
  /// free-space distribution.
  pub fn size_tracks(
    &self,
    items: &[GridItem],
    available_space: f32,
    percentage_basis: Option<f32>,
  ) -> Vec<Track> {
    let mut tracks = self.initialize_tracks(percentage_basis);
    self.resolve_content_based_breadths(&mut tracks, items);

    let mut available = available_space;
    for track in &tracks {
      available -= track.used_breadth();
    }
    debug!(
      "sizing {} {:?} tracks with {:.1}px free space",
      tracks.len(),
      self.direction,
      available.max(0.0)
    );
    Self::distribute_free_space(&mut tracks, available);
    tracks
  }

  /// Initial pass: resolve definite breadths, leave the rest open
  fn initialize_tracks(&self, percentage_basis: Option<f32>) -> Vec<Track> {
    self
      .specs
      .iter()
      .map(|spec| {
        let used = spec.min_breadth.resolve(percentage_basis).unwrap_or(0.0);
        let max = spec.max_breadth.resolve(percentage_basis);
        Track::new(used, max)
      })
      .collect()
  }

  /// Content pass: grow content-sized tracks to their items' contributions
  ///
  /// Each track grows to the largest single contribution among its items,
  /// never to their sum, so several same-sized items cost no more than one.
  /// Tracks with no items are left untouched and keep an infinite limit.
  fn resolve_content_based_breadths(&self, tracks: &mut [Track], items: &[GridItem]) {
    for (index, track) in tracks.iter_mut().enumerate() {
      let min_mode = content_sizing_mode(self.specs[index].min_breadth);
      let max_mode = content_sizing_mode(self.specs[index].max_breadth);
      if min_mode.is_none() && max_mode.is_none() {
        continue;
      }

      if let Some(mode) = min_mode {
        if let Some(target) = self.largest_contribution(items, index, mode) {
          track.grow_used_breadth_to(target);
        }
      }
      if let Some(mode) = max_mode {
        if let Some(target) = self.largest_contribution(items, index, mode) {
          track.grow_max_breadth_to(target);
        }
      }
    }
  }

  /// Largest contribution among the items placed in `track_index`
  ///
  /// `None` when the track holds no items at all.
  fn largest_contribution(
    &self,
    items: &[GridItem],
    track_index: usize,
    mode: IntrinsicSizingMode,
  ) -> Option<f32> {
    let mut largest: Option<f32> = None;
    for item in items {
      if item.track_index(self.direction) != track_index {
        continue;
      }
      let contribution = self.contribution(item.id, mode);
      largest = Some(largest.map_or(contribution, |current| current.max(contribution)));
    }
    largest
  }

  /// One item's border-box contribution in this direction
  ///
  /// Items written orthogonally to the container contribute zero: their
  /// inline size depends on a block-axis layout this pass cannot see.
  fn contribution(&self, id: BoxId, mode: IntrinsicSizingMode) -> f32 {
    let node = self.tree.node(id);
    if node.style.writing_mode.is_orthogonal_to(self.container_writing_mode) {
      return 0.0;
    }
    match (self.direction, mode) {
      (TrackDirection::Columns, IntrinsicSizingMode::MinContent) => {
        node.min_content_inline_contribution()
      }
      (TrackDirection::Columns, IntrinsicSizingMode::MaxContent) => {
        node.max_content_inline_contribution()
      }
      (TrackDirection::Rows, IntrinsicSizingMode::MinContent) => {
        node.min_content_block_contribution()
      }
      (TrackDirection::Rows, IntrinsicSizingMode::MaxContent) => {
        node.max_content_block_contribution()
      }
    }
  }

  /// Distribution pass: hand leftover space to tracks that can grow
  ///
  /// Tracks are visited in ascending order of growth potential (ties keep
  /// track order). Each visit offers an equal share of what remains; a
  /// track capped below its share returns the difference to the pool, so
  /// later tracks with more potential absorb it.
  ///
  /// Does nothing unless `available` is strictly positive.
  pub fn distribute_free_space(tracks: &mut [Track], available: f32) {
    if available <= 0.0 || tracks.is_empty() {
      return;
    }

    let mut order: Vec<usize> = (0..tracks.len()).collect();
    order.sort_by(|&a, &b| {
      tracks[a]
        .growth_potential()
        .total_cmp(&tracks[b].growth_potential())
    });

    let mut remaining = available;
    let count = order.len();
    for (visit, &index) in order.iter().enumerate() {
      let share = remaining / (count - visit) as f32;
      let growth = share.min(tracks[index].growth_potential()).max(0.0);
      trace!("track {} takes {:.2} of {:.2} share", index, growth, share);
      tracks[index].grow_used_breadth_by(growth);
      remaining -= growth;
    }
  }
}

/// Picks the sizing mode a content-sized breadth asks for
///
/// `auto` is not content-sized here: it starts at zero and grows only from
/// free-space distribution.
fn content_sizing_mode(breadth: TrackBreadth) -> Option<IntrinsicSizingMode> {
  match breadth {
    TrackBreadth::MinContent => Some(IntrinsicSizingMode::MinContent),
    TrackBreadth::MaxContent => Some(IntrinsicSizingMode::MaxContent),
    _ => None,
  }
}

/// Grid Formatting Context
///
/// Stateless; every layout call reads the template from the container's
/// style and writes item geometry back through the tree.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use fastlayout::layout::contexts::grid::GridFormattingContext;
/// use fastlayout::layout::{FormattingContext, LayoutConstraints};
/// use fastlayout::{BoxTree, ComputedStyle, Display, TrackSizingSpec};
///
/// let mut tree = BoxTree::new();
/// let item = tree.insert(Arc::new(ComputedStyle::default()), vec![]);
/// let container = ComputedStyle::builder()
///     .display(Display::Grid)
///     .grid_template_columns(vec![TrackSizingSpec::fixed(100.0)])
///     .grid_template_rows(vec![TrackSizingSpec::fixed(50.0)])
///     .build();
/// let root = tree.insert(Arc::new(container), vec![item]);
///
/// let fc = GridFormattingContext::new();
/// let constraints = LayoutConstraints::with_definite_size(300.0, 200.0);
/// let size = fc.layout(&mut tree, root, &constraints).unwrap();
/// assert_eq!(size.height, 50.0);
/// ```
#[derive(Debug, Default)]
pub struct GridFormattingContext;

impl GridFormattingContext {
  pub fn new() -> Self {
    Self
  }

  /// Collects the container's items with their resolved cells
  fn collect_items(tree: &BoxTree, root: BoxId) -> Vec<GridItem> {
    tree
      .node(root)
      .children()
      .iter()
      .filter(|&&child| !tree.node(child).style.display.is_none())
      .map(|&child| GridItem::new(child, &tree.node(child).style))
      .collect()
  }

  /// The container's definite content-box width
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
    // Nothing definite anywhere: fall back to the max-content measurement
    let intrinsic = self.intrinsic_inline_size(tree, root, IntrinsicSizingMode::MaxContent)?;
    Ok((intrinsic - style.horizontal_border_padding()).max(0.0))
  }

  /// The container's content-box height, `None` while indefinite
  fn resolve_content_height(
    &self,
    tree: &BoxTree,
    root: BoxId,
    constraints: &LayoutConstraints,
  ) -> Option<f32> {
    let style = &tree.node(root).style;
    if let Some(height) = style.height.resolve_against(constraints.percentage_base_height) {
      return Some(height.max(0.0));
    }
    constraints
      .available_height
      .definite_value()
      .map(|available| (available - style.vertical_border_padding()).max(0.0))
  }
}

impl FormattingContext for GridFormattingContext {
  fn layout(
    &self,
    tree: &mut BoxTree,
    root: BoxId,
    constraints: &LayoutConstraints,
  ) -> Result<Size, LayoutError> {
    let style = tree.node(root).style.clone();
    if !style.display.is_grid() {
      return Err(LayoutError::UnsupportedBoxType(format!(
        "{:?} is not a grid container",
        style.display
      )));
    }

    let column_count = style.grid_template_columns.len();
    let row_count = style.grid_template_rows.len();
    let items = Self::collect_items(tree, root);
    let (placed, overflow): (Vec<GridItem>, Vec<GridItem>) = items
      .into_iter()
      .partition(|item| item.column < column_count && item.row < row_count);
    if !overflow.is_empty() {
      debug!("{} grid items fall outside the template", overflow.len());
    }

    let content_width = self.resolve_content_width(tree, root, constraints)?;
    let content_height = self.resolve_content_height(tree, root, constraints);

    let columns = {
      let sizer = TrackSizer::new(
        tree,
        TrackDirection::Columns.specs(&style),
        TrackDirection::Columns,
        style.writing_mode,
      );
      sizer.size_tracks(&placed, content_width, Some(content_width))
    };

    // Items take their column breadth as width before rows are sized, so
    // row sizing and final geometry agree.
    for item in &placed {
      let breadth = columns[item.column].used_breadth();
      let inset = tree.node(item.id).style.horizontal_border_padding();
      tree.set_override_content_width(item.id, Some((breadth - inset).max(0.0)));
      tree.layout_box(item.id);
    }

    let rows = {
      let sizer = TrackSizer::new(
        tree,
        TrackDirection::Rows.specs(&style),
        TrackDirection::Rows,
        style.writing_mode,
      );
      sizer.size_tracks(&placed, content_height.unwrap_or(0.0), content_height)
    };

    for item in &placed {
      let breadth = rows[item.row].used_breadth();
      let inset = tree.node(item.id).style.vertical_border_padding();
      tree.set_override_content_height(item.id, Some((breadth - inset).max(0.0)));
      tree.layout_box(item.id);
    }

    // Track offsets within the content box
    let border = style.border_widths();
    let origin = Point::new(border.left + style.padding.left, border.top + style.padding.top);
    let mut column_offsets = Vec::with_capacity(columns.len());
    let mut x = 0.0;
    for track in &columns {
      column_offsets.push(x);
      x += track.used_breadth();
    }
    let mut row_offsets = Vec::with_capacity(rows.len());
    let mut y = 0.0;
    for track in &rows {
      row_offsets.push(y);
      y += track.used_breadth();
    }

    for item in &placed {
      tree.set_position(
        item.id,
        Point::new(
          origin.x + column_offsets[item.column],
          origin.y + row_offsets[item.row],
        ),
      );
    }

    // Items outside the template take no part in sizing; they are laid out
    // at their natural size at the content-box origin.
    for item in &overflow {
      tree.set_override_content_width(item.id, None);
      tree.set_override_content_height(item.id, None);
      tree.layout_box(item.id);
      tree.set_position(item.id, origin);
    }

    let row_sum: f32 = rows.iter().map(Track::used_breadth).sum();
    tree.set_override_content_width(root, Some(content_width));
    tree.set_override_content_height(root, Some(row_sum));
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
    if !style.display.is_grid() {
      return Err(LayoutError::UnsupportedBoxType(format!(
        "{:?} is not a grid container",
        style.display
      )));
    }

    let column_count = style.grid_template_columns.len();
    let row_count = style.grid_template_rows.len();
    let placed: Vec<GridItem> = Self::collect_items(tree, root)
      .into_iter()
      .filter(|item| item.column < column_count && item.row < row_count)
      .collect();

    let sizer = TrackSizer::new(
      tree,
      &style.grid_template_columns,
      TrackDirection::Columns,
      style.writing_mode,
    );
    let tracks = sizer.size_tracks(&placed, 0.0, None);

    let content: f32 = match mode {
      IntrinsicSizingMode::MinContent => tracks.iter().map(Track::used_breadth).sum(),
      IntrinsicSizingMode::MaxContent => tracks.iter().map(Track::effective_max_breadth).sum(),
    };
    Ok(content + style.horizontal_border_padding())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::geometry::EdgeSizes;
  use crate::style::computed::Display;
  use crate::tree::IntrinsicSizes;
  use std::sync::Arc;

  fn item_style(column: i32, row: i32) -> Arc<ComputedStyle> {
    Arc::new(
      ComputedStyle::builder()
        .display(Display::Block)
        .grid_column(GridPosition::LineIndex(column))
        .grid_row(GridPosition::LineIndex(row))
        .build(),
    )
  }

  fn measured(min: f32, max: f32) -> IntrinsicSizes {
    IntrinsicSizes::new(Size::new(min, min), Size::new(max, max))
  }

  fn grid_style(columns: Vec<TrackSizingSpec>, rows: Vec<TrackSizingSpec>) -> Arc<ComputedStyle> {
    Arc::new(
      ComputedStyle::builder()
        .display(Display::Grid)
        .grid_template_columns(columns)
        .grid_template_rows(rows)
        .build(),
    )
  }

  #[test]
  fn test_track_clamps_max_to_used() {
    let track = Track::new(100.0, Some(50.0));
    assert_eq!(track.used_breadth(), 100.0);
    assert_eq!(track.max_breadth(), Some(100.0));
  }

  #[test]
  fn test_track_grow_used_lifts_max() {
    let mut track = Track::new(10.0, Some(20.0));
    track.grow_used_breadth_to(30.0);
    assert_eq!(track.used_breadth(), 30.0);
    assert_eq!(track.max_breadth(), Some(30.0));

    // Growing to a smaller target is a no-op
    track.grow_used_breadth_to(5.0);
    assert_eq!(track.used_breadth(), 30.0);
  }

  #[test]
  fn test_track_grow_max_substitutes_used_when_infinite() {
    let mut track = Track::new(40.0, None);
    track.grow_max_breadth_to(25.0);
    assert_eq!(track.max_breadth(), Some(40.0));

    let mut track = Track::new(10.0, None);
    track.grow_max_breadth_to(25.0);
    assert_eq!(track.max_breadth(), Some(25.0));
  }

  #[test]
  fn test_position_resolution() {
    assert_eq!(GridPositionResolver::resolve(GridPosition::Auto), 0);
    assert_eq!(GridPositionResolver::resolve(GridPosition::LineIndex(1)), 0);
    assert_eq!(GridPositionResolver::resolve(GridPosition::LineIndex(3)), 2);
    assert_eq!(GridPositionResolver::resolve(GridPosition::LineIndex(0)), 0);
    assert_eq!(GridPositionResolver::resolve(GridPosition::LineIndex(-4)), 0);
  }

  #[test]
  fn test_initial_pass_resolves_definite_breadths() {
    let tree = BoxTree::new();
    let specs = vec![
      TrackSizingSpec::fixed(100.0),
      TrackSizingSpec::percent(50.0),
      TrackSizingSpec::auto(),
    ];
    let sizer = TrackSizer::new(&tree, &specs, TrackDirection::Columns, WritingMode::HorizontalTb);
    let tracks = sizer.size_tracks(&[], 0.0, Some(200.0));

    assert_eq!(tracks[0].used_breadth(), 100.0);
    assert_eq!(tracks[0].max_breadth(), Some(100.0));
    assert_eq!(tracks[1].used_breadth(), 100.0);
    assert_eq!(tracks[2].used_breadth(), 0.0);
    assert_eq!(tracks[2].max_breadth(), None);
  }

  #[test]
  fn test_percent_without_basis_acts_like_auto() {
    let tree = BoxTree::new();
    let specs = vec![TrackSizingSpec::percent(50.0)];
    let sizer = TrackSizer::new(&tree, &specs, TrackDirection::Rows, WritingMode::HorizontalTb);
    let tracks = sizer.size_tracks(&[], 0.0, None);

    assert_eq!(tracks[0].used_breadth(), 0.0);
    assert_eq!(tracks[0].max_breadth(), None);
  }

  #[test]
  fn test_leftover_space_goes_to_open_tracks() {
    let tree = BoxTree::new();
    let specs = vec![
      TrackSizingSpec::fixed(100.0),
      TrackSizingSpec::auto(),
      TrackSizingSpec::fixed(50.0),
    ];
    let sizer = TrackSizer::new(&tree, &specs, TrackDirection::Columns, WritingMode::HorizontalTb);
    let tracks = sizer.size_tracks(&[], 300.0, Some(300.0));

    let breadths: Vec<f32> = tracks.iter().map(Track::used_breadth).collect();
    assert_eq!(breadths, vec![100.0, 150.0, 50.0]);
  }

  #[test]
  fn test_distribution_splits_evenly_between_open_tracks() {
    let mut tracks = vec![Track::default(), Track::default()];
    TrackSizer::distribute_free_space(&mut tracks, 100.0);
    assert_eq!(tracks[0].used_breadth(), 50.0);
    assert_eq!(tracks[1].used_breadth(), 50.0);
  }

  #[test]
  fn test_capped_track_releases_its_share() {
    // First track can take 10 at most; the rest flows to the second
    let mut tracks = vec![Track::new(0.0, Some(10.0)), Track::default()];
    TrackSizer::distribute_free_space(&mut tracks, 100.0);
    assert_eq!(tracks[0].used_breadth(), 10.0);
    assert_eq!(tracks[1].used_breadth(), 90.0);
  }

  #[test]
  fn test_distribution_skips_nonpositive_space() {
    let mut tracks = vec![Track::default()];
    TrackSizer::distribute_free_space(&mut tracks, 0.0);
    assert_eq!(tracks[0].used_breadth(), 0.0);
    TrackSizer::distribute_free_space(&mut tracks, -5.0);
    assert_eq!(tracks[0].used_breadth(), 0.0);
  }

  #[test]
  fn test_distribution_conserves_space() {
    let mut tracks = vec![
      Track::new(0.0, Some(30.0)),
      Track::new(0.0, Some(10.0)),
      Track::default(),
    ];
    let before: f32 = tracks.iter().map(Track::used_breadth).sum();
    TrackSizer::distribute_free_space(&mut tracks, 200.0);
    let growth: f32 = tracks.iter().map(Track::used_breadth).sum::<f32>() - before;
    assert_eq!(growth, 200.0);
  }

  #[test]
  fn test_content_growth_takes_largest_not_sum() {
    let mut tree = BoxTree::new();
    let a = tree.insert_with_intrinsics(item_style(1, 1), measured(40.0, 80.0), vec![]);
    let b = tree.insert_with_intrinsics(item_style(1, 1), measured(40.0, 80.0), vec![]);
    let items = vec![
      GridItem::new(a, &tree.node(a).style),
      GridItem::new(b, &tree.node(b).style),
    ];

    let specs = vec![TrackSizingSpec::min_content()];
    let sizer = TrackSizer::new(&tree, &specs, TrackDirection::Columns, WritingMode::HorizontalTb);
    let tracks = sizer.size_tracks(&items, 0.0, None);

    // Two identical items size the track once, not twice
    assert_eq!(tracks[0].used_breadth(), 40.0);
  }

  #[test]
  fn test_content_sizing_is_idempotent() {
    let mut tree = BoxTree::new();
    let a = tree.insert_with_intrinsics(item_style(1, 1), measured(40.0, 80.0), vec![]);
    let items = vec![GridItem::new(a, &tree.node(a).style)];
    let specs = vec![TrackSizingSpec::max_content()];
    let sizer = TrackSizer::new(&tree, &specs, TrackDirection::Columns, WritingMode::HorizontalTb);

    let first = sizer.size_tracks(&items, 0.0, None);
    let second = sizer.size_tracks(&items, 0.0, None);
    assert_eq!(first, second);
    assert_eq!(first[0].used_breadth(), 80.0);
  }

  #[test]
  fn test_orthogonal_items_contribute_nothing() {
    let mut tree = BoxTree::new();
    let style = ComputedStyle::builder()
      .display(Display::Block)
      .writing_mode(WritingMode::VerticalRl)
      .grid_column(GridPosition::LineIndex(1))
      .grid_row(GridPosition::LineIndex(1))
      .build();
    let a = tree.insert_with_intrinsics(Arc::new(style), measured(40.0, 80.0), vec![]);
    let items = vec![GridItem::new(a, &tree.node(a).style)];

    let specs = vec![TrackSizingSpec::min_content()];
    let sizer = TrackSizer::new(&tree, &specs, TrackDirection::Columns, WritingMode::HorizontalTb);
    let tracks = sizer.size_tracks(&items, 0.0, None);
    assert_eq!(tracks[0].used_breadth(), 0.0);
  }

  #[test]
  fn test_layout_places_items_in_cells() {
    let mut tree = BoxTree::new();
    let a = tree.insert_with_intrinsics(item_style(1, 1), measured(10.0, 20.0), vec![]);
    let b = tree.insert_with_intrinsics(item_style(2, 1), measured(10.0, 20.0), vec![]);
    let c = tree.insert_with_intrinsics(item_style(1, 2), measured(10.0, 20.0), vec![]);
    let root = tree.insert(
      grid_style(
        vec![TrackSizingSpec::fixed(100.0), TrackSizingSpec::fixed(80.0)],
        vec![TrackSizingSpec::fixed(50.0), TrackSizingSpec::fixed(40.0)],
      ),
      vec![a, b, c],
    );

    let fc = GridFormattingContext::new();
    let constraints = LayoutConstraints::with_definite_size(300.0, 200.0);
    let size = fc.layout(&mut tree, root, &constraints).unwrap();

    assert_eq!(size, Size::new(300.0, 90.0));
    assert_eq!(tree.node(a).position(), Point::new(0.0, 0.0));
    assert_eq!(tree.node(b).position(), Point::new(100.0, 0.0));
    assert_eq!(tree.node(c).position(), Point::new(0.0, 50.0));
    assert_eq!(tree.node(a).content_size(), Size::new(100.0, 50.0));
    assert_eq!(tree.node(b).content_size(), Size::new(80.0, 50.0));
  }

  #[test]
  fn test_container_height_is_row_sum_plus_edges() {
    let mut tree = BoxTree::new();
    let style = ComputedStyle::builder()
      .display(Display::Grid)
      .grid_template_columns(vec![TrackSizingSpec::fixed(100.0)])
      .grid_template_rows(vec![TrackSizingSpec::fixed(30.0), TrackSizingSpec::fixed(20.0)])
      .padding(EdgeSizes::uniform(5.0))
      .build();
    let root = tree.insert(Arc::new(style), vec![]);

    let fc = GridFormattingContext::new();
    let size = fc
      .layout(&mut tree, root, &LayoutConstraints::with_definite_size(300.0, 300.0))
      .unwrap();
    assert_eq!(size.height, 30.0 + 20.0 + 10.0);
  }

  #[test]
  fn test_out_of_bounds_item_sits_at_origin() {
    let mut tree = BoxTree::new();
    let inside = tree.insert_with_intrinsics(item_style(1, 1), measured(10.0, 20.0), vec![]);
    let outside = tree.insert_with_intrinsics(item_style(5, 1), measured(30.0, 60.0), vec![]);
    let root = tree.insert(
      grid_style(
        vec![TrackSizingSpec::min_content()],
        vec![TrackSizingSpec::fixed(50.0)],
      ),
      vec![inside, outside],
    );

    let fc = GridFormattingContext::new();
    fc.layout(&mut tree, root, &LayoutConstraints::with_definite_size(300.0, 300.0))
      .unwrap();

    // The outside item neither grows the track nor gets an override
    assert_eq!(tree.node(inside).content_size().width, 10.0);
    assert_eq!(tree.node(outside).position(), Point::ZERO);
    assert_eq!(tree.node(outside).content_size(), Size::new(60.0, 60.0));
  }

  #[test]
  fn test_non_grid_root_is_rejected() {
    let mut tree = BoxTree::new();
    let root = tree.insert(Arc::new(ComputedStyle::default()), vec![]);

    let fc = GridFormattingContext::new();
    let result = fc.layout(&mut tree, root, &LayoutConstraints::with_definite_size(100.0, 100.0));
    assert!(matches!(result, Err(LayoutError::UnsupportedBoxType(_))));
  }

  #[test]
  fn test_intrinsic_inline_sizes() {
    let mut tree = BoxTree::new();
    let a = tree.insert_with_intrinsics(item_style(1, 1), measured(40.0, 80.0), vec![]);
    let root = tree.insert(
      grid_style(
        vec![TrackSizingSpec::min_content(), TrackSizingSpec::fixed(50.0)],
        vec![TrackSizingSpec::fixed(50.0)],
      ),
      vec![a],
    );

    let fc = GridFormattingContext::new();
    let min = fc
      .intrinsic_inline_size(&tree, root, IntrinsicSizingMode::MinContent)
      .unwrap();
    let max = fc
      .intrinsic_inline_size(&tree, root, IntrinsicSizingMode::MaxContent)
      .unwrap();
    assert_eq!(min, 40.0 + 50.0);
    assert_eq!(max, 40.0 + 50.0);
  }
}
