//! Table structure extraction and geometry
//!
//! Builds a logical table grid out of the box tree and computes the parts
//! of table layout that are independent of the column algorithm: the
//! row/column/cell structure, collapsed border resolution, and row
//! heights.
//!
//! # Architecture
//!
//! 1. [`TableStructure::from_box_tree`] walks the table box and records
//!    columns (from `col`/`colgroup` boxes), rows, and cells into a slot
//!    grid that accounts for `colspan`/`rowspan` coverage
//! 2. The formatting context fills in per-column constraints and runs the
//!    width distribution (see `contexts::table::column_distribution`)
//! 3. [`TableStructure::collapsed_borders`] resolves border conflicts for
//!    `border-collapse: collapse`
//! 4. [`TableStructure::calculate_row_heights`] turns cell minimums and
//!    specified heights into final row heights and y offsets
//!
//! # References
//!
//! - CSS 2.1 Section 17 (Tables): <https://www.w3.org/TR/CSS21/tables.html>
//! - CSS Tables Module Level 3: <https://www.w3.org/TR/css-tables-3/>

use std::sync::Arc;

use log::debug;

use crate::geometry::Size;
use crate::style::{
    BorderCollapse, BorderEdge, BorderStyle, ComputedStyle, Display, LengthOrAuto, Rgba,
    TableLayoutMode,
};
use crate::tree::{BoxId, BoxTree};

/// A width or height specified on a table part, classified for layout
///
/// Lengths in absolute units become `Fixed` pixel values; percentages keep
/// their raw percentage and resolve against the table's content box later.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpecifiedSize {
    /// Explicit length, resolved to pixels
    Fixed(f32),
    /// Percentage of the containing dimension
    Percent(f32),
    /// No specified size; content decides
    Auto,
}

impl SpecifiedSize {
    /// Classifies a style value
    pub fn from_style(value: LengthOrAuto) -> Self {
        match value.length() {
            None => Self::Auto,
            Some(length) if length.unit.is_percentage() => Self::Percent(length.value),
            Some(length) => Self::Fixed(length.to_px().max(0.0)),
        }
    }

    /// Returns true when no size was specified
    pub fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Resolves to pixels; percentages need a definite base
    pub fn resolve(self, percentage_base: Option<f32>) -> Option<f32> {
        match self {
            Self::Fixed(px) => Some(px),
            Self::Percent(pct) => percentage_base.map(|base| (pct / 100.0) * base),
            Self::Auto => None,
        }
    }
}

impl Default for SpecifiedSize {
    fn default() -> Self {
        Self::Auto
    }
}

/// Per-column bookkeeping for table layout
#[derive(Debug, Clone, Default)]
pub struct ColumnInfo {
    /// Column index in grid order
    pub index: usize,
    /// Width from a `col`/`colgroup` box, if any
    pub specified_width: SpecifiedSize,
    /// Minimum content width gathered from cells
    pub min_width: f32,
    /// Maximum content width gathered from cells
    pub max_width: f32,
    /// Final width after distribution
    pub computed_width: f32,
    /// Style of the originating `col` box
    pub style: Option<Arc<ComputedStyle>>,
    /// Style of the enclosing `colgroup` box
    pub group_style: Option<Arc<ComputedStyle>>,
}

impl ColumnInfo {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }
}

/// Per-row bookkeeping for table layout
#[derive(Debug, Clone, Default)]
pub struct RowInfo {
    /// Row index in grid order
    pub index: usize,
    /// Height from the row's style, if any
    pub specified_height: SpecifiedSize,
    /// Minimum height gathered from the row's cells
    pub min_height: f32,
    /// Final height after distribution
    pub computed_height: f32,
    /// Y offset of the row's top edge within the table's content box
    pub y_position: f32,
    /// Style of the row box
    pub style: Option<Arc<ComputedStyle>>,
    /// Style of the enclosing row group box
    pub group_style: Option<Arc<ComputedStyle>>,
}

impl RowInfo {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }
}

/// One table cell and its grid placement
#[derive(Debug, Clone)]
pub struct CellInfo {
    /// Index into [`TableStructure::cells`]
    pub index: usize,
    /// The cell's box in the tree
    pub box_id: BoxId,
    /// First row the cell occupies
    pub row: usize,
    /// First column the cell occupies
    pub col: usize,
    /// Number of rows spanned (clamped to the table)
    pub rowspan: usize,
    /// Number of columns spanned (clamped to the table)
    pub colspan: usize,
    /// Minimum content width of the cell's border box
    pub min_width: f32,
    /// Maximum content width of the cell's border box
    pub max_width: f32,
    /// Minimum border-box height, known after the cell is laid out
    pub min_height: f32,
}

/// Logical structure of a table extracted from the box tree
///
/// The `grid` maps every (row, column) slot to the index of the cell
/// covering it; a spanning cell appears in each slot it covers.
#[derive(Debug, Clone)]
pub struct TableStructure {
    pub column_count: usize,
    pub row_count: usize,
    pub columns: Vec<ColumnInfo>,
    pub rows: Vec<RowInfo>,
    pub cells: Vec<CellInfo>,
    /// Cell index occupying each slot, `grid[row][col]`
    pub grid: Vec<Vec<Option<usize>>>,
    /// Gap between cells; zero under `border-collapse: collapse`
    pub border_spacing: Size,
    pub border_collapse: BorderCollapse,
    /// Whether the fixed column algorithm applies
    pub is_fixed_layout: bool,
}

impl TableStructure {
    /// Extracts the table structure from a table box
    ///
    /// Walks column boxes first so explicit column widths are known, then
    /// rows (directly or inside row groups), placing each cell at the
    /// first free slot of its row and marking the slots its spans cover.
    pub fn from_box_tree(tree: &BoxTree, table: BoxId) -> Self {
        let table_style = &tree.node(table).style;
        let border_collapse = table_style.border_collapse;
        let border_spacing = match border_collapse {
            BorderCollapse::Separate => table_style.border_spacing,
            BorderCollapse::Collapse => Size::ZERO,
        };
        // The fixed algorithm only applies when the table width is definite
        let is_fixed_layout =
            table_style.table_layout == TableLayoutMode::Fixed && !table_style.width.is_auto();

        let mut structure = Self {
            column_count: 0,
            row_count: 0,
            columns: Vec::new(),
            rows: Vec::new(),
            cells: Vec::new(),
            grid: Vec::new(),
            border_spacing,
            border_collapse,
            is_fixed_layout,
        };

        // Pass 1: column boxes establish explicit columns
        for &child in tree.node(table).children() {
            let child_style = &tree.node(child).style;
            match child_style.display {
                Display::TableColumnGroup => {
                    let group = child_style.clone();
                    let mut has_columns = false;
                    for &col_box in tree.node(child).children() {
                        let col_style = &tree.node(col_box).style;
                        if col_style.display == Display::TableColumn {
                            has_columns = true;
                            let span = col_style.col_span.max(1) as usize;
                            for _ in 0..span {
                                structure.push_column(Some(col_style.clone()), Some(group.clone()));
                            }
                        }
                    }
                    // A colgroup without col children supplies its own span
                    if !has_columns {
                        let span = group.col_span.max(1) as usize;
                        for _ in 0..span {
                            structure.push_column(None, Some(group.clone()));
                        }
                    }
                }
                Display::TableColumn => {
                    let span = child_style.col_span.max(1) as usize;
                    for _ in 0..span {
                        structure.push_column(Some(child_style.clone()), None);
                    }
                }
                _ => {}
            }
        }

        // Pass 2: rows and cells
        for &child in tree.node(table).children() {
            let child_style = tree.node(child).style.clone();
            if child_style.display.is_table_row_group() {
                for &row_box in tree.node(child).children() {
                    let row_style = tree.node(row_box).style.clone();
                    if row_style.display.is_table_row() {
                        structure.process_row(tree, row_box, row_style, Some(child_style.clone()));
                    }
                }
            } else if child_style.display.is_table_row() {
                structure.process_row(tree, child, child_style, None);
            }
        }

        structure.finalize();
        debug!(
            "table structure: {} columns, {} rows, {} cells",
            structure.column_count,
            structure.row_count,
            structure.cells.len()
        );
        structure
    }

    fn push_column(
        &mut self,
        style: Option<Arc<ComputedStyle>>,
        group_style: Option<Arc<ComputedStyle>>,
    ) {
        let mut info = ColumnInfo::new(self.columns.len());
        let mut specified = style
            .as_ref()
            .map(|s| SpecifiedSize::from_style(s.width))
            .unwrap_or(SpecifiedSize::Auto);
        // The group's width applies when the col itself has none
        if specified.is_auto() {
            if let Some(group) = &group_style {
                specified = SpecifiedSize::from_style(group.width);
            }
        }
        info.specified_width = specified;
        info.style = style;
        info.group_style = group_style;
        self.columns.push(info);
    }

    fn process_row(
        &mut self,
        tree: &BoxTree,
        row_box: BoxId,
        style: Arc<ComputedStyle>,
        group_style: Option<Arc<ComputedStyle>>,
    ) {
        let row_index = self.rows.len();
        let mut row = RowInfo::new(row_index);
        row.specified_height = SpecifiedSize::from_style(style.height);
        row.style = Some(style);
        row.group_style = group_style;
        self.rows.push(row);
        if self.grid.len() <= row_index {
            self.grid.resize(row_index + 1, Vec::new());
        }

        let mut col_idx = 0;
        for &cell_box in tree.node(row_box).children() {
            let cell_style = &tree.node(cell_box).style;
            if !cell_style.display.is_table_cell() {
                continue;
            }

            // Skip slots already covered by rowspans from earlier rows
            while self.slot_occupied(row_index, col_idx) {
                col_idx += 1;
            }

            let colspan = cell_style.col_span.max(1) as usize;
            let rowspan = cell_style.row_span.max(1) as usize;
            let cell_index = self.cells.len();
            self.cells.push(CellInfo {
                index: cell_index,
                box_id: cell_box,
                row: row_index,
                col: col_idx,
                rowspan,
                colspan,
                min_width: 0.0,
                max_width: 0.0,
                min_height: 0.0,
            });
            self.occupy(row_index, col_idx, rowspan, colspan, cell_index);
            col_idx += colspan;
        }
    }

    fn slot_occupied(&self, row: usize, col: usize) -> bool {
        self.grid
            .get(row)
            .and_then(|slots| slots.get(col))
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    fn occupy(&mut self, row: usize, col: usize, rowspan: usize, colspan: usize, cell: usize) {
        for r in row..row + rowspan {
            if self.grid.len() <= r {
                self.grid.resize(r + 1, Vec::new());
            }
            let slots = &mut self.grid[r];
            if slots.len() < col + colspan {
                slots.resize(col + colspan, None);
            }
            for slot in slots[col..col + colspan].iter_mut() {
                if slot.is_none() {
                    *slot = Some(cell);
                }
            }
        }
    }

    /// Settles counts, pads out ragged rows, and clamps spans that run
    /// past the last row or column
    fn finalize(&mut self) {
        self.row_count = self.rows.len();
        self.grid.truncate(self.row_count);

        let widest_row = self.grid.iter().map(|slots| slots.len()).max().unwrap_or(0);
        self.column_count = self.columns.len().max(widest_row);
        while self.columns.len() < self.column_count {
            let info = ColumnInfo::new(self.columns.len());
            self.columns.push(info);
        }
        for slots in &mut self.grid {
            slots.resize(self.column_count, None);
        }

        for cell in &mut self.cells {
            let row_limit = self.row_count.saturating_sub(cell.row).max(1);
            cell.rowspan = cell.rowspan.min(row_limit);
            let col_limit = self.column_count.saturating_sub(cell.col).max(1);
            cell.colspan = cell.colspan.min(col_limit);
        }
    }

    /// Returns the cell covering a grid slot, if any
    pub fn get_cell_at(&self, row: usize, col: usize) -> Option<&CellInfo> {
        let index = (*self.grid.get(row)?.get(col)?)?;
        self.cells.get(index)
    }

    /// Total horizontal space taken by gaps between and around columns
    pub fn total_horizontal_spacing(&self) -> f32 {
        if self.column_count == 0 {
            0.0
        } else {
            self.border_spacing.width * (self.column_count + 1) as f32
        }
    }

    /// Total vertical space taken by gaps between and around rows
    pub fn total_vertical_spacing(&self) -> f32 {
        if self.row_count == 0 {
            0.0
        } else {
            self.border_spacing.height * (self.row_count + 1) as f32
        }
    }

    /// X offset of a column's left edge within the table's content box
    pub fn column_x_offset(&self, col: usize) -> f32 {
        let mut x = self.border_spacing.width;
        for column in self.columns.iter().take(col) {
            x += column.computed_width + self.border_spacing.width;
        }
        x
    }

    /// Border-box width available to a cell across its spanned columns
    pub fn cell_span_width(&self, cell: &CellInfo) -> f32 {
        let end = (cell.col + cell.colspan).min(self.column_count);
        let columns: f32 = self.columns[cell.col..end]
            .iter()
            .map(|column| column.computed_width)
            .sum();
        let gaps = end.saturating_sub(cell.col + 1) as f32;
        columns + gaps * self.border_spacing.width
    }

    /// Border-box height available to a cell across its spanned rows
    pub fn cell_span_height(&self, cell: &CellInfo) -> f32 {
        let end = (cell.row + cell.rowspan).min(self.row_count);
        let rows: f32 = self.rows[cell.row..end]
            .iter()
            .map(|row| row.computed_height)
            .sum();
        let gaps = end.saturating_sub(cell.row + 1) as f32;
        rows + gaps * self.border_spacing.height
    }

    /// Content-box width of the table implied by the computed columns
    pub fn content_width(&self) -> f32 {
        let columns: f32 = self.columns.iter().map(|c| c.computed_width).sum();
        columns + self.total_horizontal_spacing()
    }

    /// Content-box height of the table implied by the computed rows
    pub fn content_height(&self) -> f32 {
        let rows: f32 = self.rows.iter().map(|r| r.computed_height).sum();
        rows + self.total_vertical_spacing()
    }

    /// Computes final row heights and y offsets
    ///
    /// Content minimums come from `CellInfo::min_height`, which the
    /// formatting context fills in after laying out each cell. Specified
    /// row heights act as floors; rowspan cells distribute any unmet
    /// height evenly across the rows they span. When the table has a
    /// definite content height, leftover space stretches the auto rows.
    pub fn calculate_row_heights(&mut self, available_height: Option<f32>) {
        let spacing = self.border_spacing.height;

        // Phase 1: content minimums from non-spanning cells
        for cell in &self.cells {
            if cell.rowspan <= 1 {
                let row = &mut self.rows[cell.row];
                row.min_height = row.min_height.max(cell.min_height);
            }
        }
        for row in &mut self.rows {
            let floor = row
                .specified_height
                .resolve(available_height)
                .unwrap_or(0.0)
                .max(0.0);
            row.computed_height = row.min_height.max(floor);
        }

        // Phase 2: rowspan cells raise their rows until the span fits.
        // The shortfall is split evenly across the spanned rows.
        for cell in &self.cells {
            if cell.rowspan > 1 {
                let end = (cell.row + cell.rowspan).min(self.row_count);
                let span_rows = end - cell.row;
                let internal_spacing = spacing * span_rows.saturating_sub(1) as f32;
                let current: f32 = self.rows[cell.row..end]
                    .iter()
                    .map(|row| row.computed_height)
                    .sum();
                let shortfall = cell.min_height - internal_spacing - current;
                if shortfall > 0.0 {
                    let per_row = shortfall / span_rows as f32;
                    for row in &mut self.rows[cell.row..end] {
                        row.computed_height += per_row;
                    }
                }
            }
        }

        // Phase 3: stretch into a definite table height. Auto rows take
        // the leftover in proportion to their current heights; rows with
        // specified heights only participate when every row is specified.
        if let Some(content_height) = available_height {
            let used: f32 = self.rows.iter().map(|row| row.computed_height).sum();
            let remaining = content_height - used - self.total_vertical_spacing();
            if remaining > 0.0 && self.row_count > 0 {
                let auto_rows: Vec<usize> = self
                    .rows
                    .iter()
                    .enumerate()
                    .filter(|(_, row)| row.specified_height.is_auto())
                    .map(|(i, _)| i)
                    .collect();
                let targets = if auto_rows.is_empty() {
                    (0..self.row_count).collect()
                } else {
                    auto_rows
                };
                let weight_total: f32 = targets.iter().map(|&i| self.rows[i].computed_height).sum();
                for &i in &targets {
                    let share = if weight_total > 0.0 {
                        remaining * (self.rows[i].computed_height / weight_total)
                    } else {
                        remaining / targets.len() as f32
                    };
                    self.rows[i].computed_height += share;
                }
            }
        }

        // Phase 4: y offsets, with a gap before each row
        let mut y = spacing;
        for row in &mut self.rows {
            row.y_position = y;
            y += row.computed_height + spacing;
        }
    }

    /// Resolves collapsed borders for every grid line segment
    ///
    /// Candidates for each edge are collected from the table, column
    /// groups, columns, row groups, rows, and cells, in that order of
    /// rising precedence. A `hidden` declaration from any source
    /// suppresses the edge outright; otherwise the highest-precedence
    /// declared border wins, with later declarations breaking ties.
    /// `none` counts as undeclared. Edges interior to a spanning cell
    /// carry no border.
    pub fn collapsed_borders(&self, tree: &BoxTree, table: BoxId) -> CollapsedBorders {
        let table_style = &tree.node(table).style;
        let cols = self.column_count;
        let rows = self.row_count;
        let mut borders = CollapsedBorders::empty(cols, rows);

        for boundary in 0..=cols {
            for r in 0..rows {
                let left = boundary.checked_sub(1).and_then(|c| self.get_cell_at(r, c));
                let right = if boundary < cols {
                    self.get_cell_at(r, boundary)
                } else {
                    None
                };
                if let (Some(a), Some(b)) = (left, right) {
                    if a.index == b.index {
                        continue; // interior of a colspan
                    }
                }

                // Within each tier the left-hand source is collected
                // first, so the right-hand declaration wins order ties.
                let mut candidates = CandidateList::new();
                if boundary == 0 {
                    candidates.push(table_style.border.left, BorderOrigin::Table);
                }
                if boundary == cols {
                    candidates.push(table_style.border.right, BorderOrigin::Table);
                }
                if self.column_group_ends_at(boundary) {
                    if let Some(group) = self.columns[boundary - 1].group_style.as_ref() {
                        candidates.push(group.border.right, BorderOrigin::ColumnGroup);
                    }
                }
                if self.column_group_starts_at(boundary) {
                    if let Some(group) = self.columns[boundary].group_style.as_ref() {
                        candidates.push(group.border.left, BorderOrigin::ColumnGroup);
                    }
                }
                if boundary > 0 {
                    if let Some(style) = self.columns[boundary - 1].style.as_ref() {
                        candidates.push(style.border.right, BorderOrigin::Column);
                    }
                }
                if boundary < cols {
                    if let Some(style) = self.columns[boundary].style.as_ref() {
                        candidates.push(style.border.left, BorderOrigin::Column);
                    }
                }
                // Rows and row groups only reach the table's side edges
                if boundary == 0 || boundary == cols {
                    let edge_of = |style: &Arc<ComputedStyle>| {
                        if boundary == 0 {
                            style.border.left
                        } else {
                            style.border.right
                        }
                    };
                    if let Some(group) = self.rows[r].group_style.as_ref() {
                        candidates.push(edge_of(group), BorderOrigin::RowGroup);
                    }
                    if let Some(style) = self.rows[r].style.as_ref() {
                        candidates.push(edge_of(style), BorderOrigin::Row);
                    }
                }
                if let Some(cell) = left {
                    candidates.push(tree.node(cell.box_id).style.border.right, BorderOrigin::Cell);
                }
                if let Some(cell) = right {
                    candidates.push(tree.node(cell.box_id).style.border.left, BorderOrigin::Cell);
                }

                borders.vertical[boundary][r] = candidates.resolve();
            }
        }

        for boundary in 0..=rows {
            for c in 0..cols {
                let above = boundary.checked_sub(1).and_then(|r| self.get_cell_at(r, c));
                let below = if boundary < rows {
                    self.get_cell_at(boundary, c)
                } else {
                    None
                };
                if let (Some(a), Some(b)) = (above, below) {
                    if a.index == b.index {
                        continue; // interior of a rowspan
                    }
                }

                let mut candidates = CandidateList::new();
                if boundary == 0 {
                    candidates.push(table_style.border.top, BorderOrigin::Table);
                }
                if boundary == rows {
                    candidates.push(table_style.border.bottom, BorderOrigin::Table);
                }
                // Columns and column groups only reach the table's top
                // and bottom edges
                if boundary == 0 || boundary == rows {
                    let edge_of = |style: &Arc<ComputedStyle>| {
                        if boundary == 0 {
                            style.border.top
                        } else {
                            style.border.bottom
                        }
                    };
                    if let Some(group) = self.columns[c].group_style.as_ref() {
                        candidates.push(edge_of(group), BorderOrigin::ColumnGroup);
                    }
                    if let Some(style) = self.columns[c].style.as_ref() {
                        candidates.push(edge_of(style), BorderOrigin::Column);
                    }
                }
                if self.row_group_ends_at(boundary) {
                    if let Some(group) = self.rows[boundary - 1].group_style.as_ref() {
                        candidates.push(group.border.bottom, BorderOrigin::RowGroup);
                    }
                }
                if self.row_group_starts_at(boundary) {
                    if let Some(group) = self.rows[boundary].group_style.as_ref() {
                        candidates.push(group.border.top, BorderOrigin::RowGroup);
                    }
                }
                if boundary > 0 {
                    if let Some(style) = self.rows[boundary - 1].style.as_ref() {
                        candidates.push(style.border.bottom, BorderOrigin::Row);
                    }
                }
                if boundary < rows {
                    if let Some(style) = self.rows[boundary].style.as_ref() {
                        candidates.push(style.border.top, BorderOrigin::Row);
                    }
                }
                if let Some(cell) = above {
                    candidates
                        .push(tree.node(cell.box_id).style.border.bottom, BorderOrigin::Cell);
                }
                if let Some(cell) = below {
                    candidates.push(tree.node(cell.box_id).style.border.top, BorderOrigin::Cell);
                }

                borders.horizontal[boundary][c] = candidates.resolve();
            }
        }

        borders
    }

    fn column_group_starts_at(&self, boundary: usize) -> bool {
        let Some(group) = self
            .columns
            .get(boundary)
            .and_then(|col| col.group_style.as_ref())
        else {
            return false;
        };
        boundary == 0
            || self.columns[boundary - 1]
                .group_style
                .as_ref()
                .map(|previous| !Arc::ptr_eq(previous, group))
                .unwrap_or(true)
    }

    fn column_group_ends_at(&self, boundary: usize) -> bool {
        if boundary == 0 {
            return false;
        }
        let Some(group) = self.columns[boundary - 1].group_style.as_ref() else {
            return false;
        };
        boundary == self.column_count
            || self.columns[boundary]
                .group_style
                .as_ref()
                .map(|next| !Arc::ptr_eq(next, group))
                .unwrap_or(true)
    }

    fn row_group_starts_at(&self, boundary: usize) -> bool {
        let Some(group) = self
            .rows
            .get(boundary)
            .and_then(|row| row.group_style.as_ref())
        else {
            return false;
        };
        boundary == 0
            || self.rows[boundary - 1]
                .group_style
                .as_ref()
                .map(|previous| !Arc::ptr_eq(previous, group))
                .unwrap_or(true)
    }

    fn row_group_ends_at(&self, boundary: usize) -> bool {
        if boundary == 0 {
            return false;
        }
        let Some(group) = self.rows[boundary - 1].group_style.as_ref() else {
            return false;
        };
        boundary == self.row_count
            || self.rows[boundary]
                .group_style
                .as_ref()
                .map(|next| !Arc::ptr_eq(next, group))
                .unwrap_or(true)
    }
}

/// An edge with no border at all, used for unresolved and suppressed slots
const NO_BORDER: BorderEdge = BorderEdge::new(0.0, BorderStyle::None, Rgba::TRANSPARENT);

/// Resolved collapsed borders for every grid line segment
///
/// `vertical[b][row]` is the border at column boundary `b` (0 through
/// `column_count`) alongside `row`; `horizontal[b][col]` is the border at
/// row boundary `b` alongside `col`.
#[derive(Debug, Clone, PartialEq)]
pub struct CollapsedBorders {
    pub vertical: Vec<Vec<BorderEdge>>,
    pub horizontal: Vec<Vec<BorderEdge>>,
}

impl CollapsedBorders {
    fn empty(column_count: usize, row_count: usize) -> Self {
        Self {
            vertical: vec![vec![NO_BORDER; row_count]; column_count + 1],
            horizontal: vec![vec![NO_BORDER; column_count]; row_count + 1],
        }
    }

    /// Border at a column boundary alongside a row
    pub fn vertical_at(&self, boundary: usize, row: usize) -> BorderEdge {
        self.vertical
            .get(boundary)
            .and_then(|column| column.get(row))
            .copied()
            .unwrap_or(NO_BORDER)
    }

    /// Border at a row boundary alongside a column
    pub fn horizontal_at(&self, boundary: usize, col: usize) -> BorderEdge {
        self.horizontal
            .get(boundary)
            .and_then(|row| row.get(col))
            .copied()
            .unwrap_or(NO_BORDER)
    }
}

/// Where a border candidate came from, in rising precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum BorderOrigin {
    Table,
    ColumnGroup,
    Column,
    RowGroup,
    Row,
    Cell,
}

struct BorderCandidate {
    edge: BorderEdge,
    origin: BorderOrigin,
    source_order: usize,
}

/// Candidate borders for one edge, collected in declaration order
struct CandidateList {
    candidates: Vec<BorderCandidate>,
}

impl CandidateList {
    fn new() -> Self {
        Self {
            candidates: Vec::new(),
        }
    }

    /// Records a declared border; `none` means nothing was declared
    fn push(&mut self, edge: BorderEdge, origin: BorderOrigin) {
        if edge.style.is_none() {
            return;
        }
        let source_order = self.candidates.len();
        self.candidates.push(BorderCandidate {
            edge,
            origin,
            source_order,
        });
    }

    fn resolve(self) -> BorderEdge {
        if self
            .candidates
            .iter()
            .any(|candidate| candidate.edge.style.is_hidden())
        {
            return BorderEdge::new(0.0, BorderStyle::Hidden, Rgba::TRANSPARENT);
        }
        self.candidates
            .into_iter()
            .max_by_key(|candidate| (candidate.origin, candidate.source_order))
            .map(|candidate| candidate.edge)
            .unwrap_or(NO_BORDER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::BorderEdges;

    fn plain_cell() -> Arc<ComputedStyle> {
        Arc::new(ComputedStyle::builder().display(Display::TableCell).build())
    }

    fn spanning_cell(colspan: u32, rowspan: u32) -> Arc<ComputedStyle> {
        Arc::new(
            ComputedStyle::builder()
                .display(Display::TableCell)
                .col_span(colspan)
                .row_span(rowspan)
                .build(),
        )
    }

    fn row_style() -> Arc<ComputedStyle> {
        Arc::new(ComputedStyle::builder().display(Display::TableRow).build())
    }

    fn table_style() -> Arc<ComputedStyle> {
        Arc::new(ComputedStyle::builder().display(Display::Table).build())
    }

    /// Builds a table of plain cells, `shape[r]` cells in row `r`
    fn build_table(tree: &mut BoxTree, shape: &[usize]) -> BoxId {
        let mut row_ids = Vec::new();
        for &cells in shape {
            let cell_ids = (0..cells)
                .map(|_| tree.insert(plain_cell(), vec![]))
                .collect();
            row_ids.push(tree.insert(row_style(), cell_ids));
        }
        tree.insert(table_style(), row_ids)
    }

    #[test]
    fn test_structure_counts_rows_and_columns() {
        let mut tree = BoxTree::new();
        let table = build_table(&mut tree, &[3, 3]);

        let structure = TableStructure::from_box_tree(&tree, table);
        assert_eq!(structure.column_count, 3);
        assert_eq!(structure.row_count, 2);
        assert_eq!(structure.cells.len(), 6);
        assert!(structure.get_cell_at(1, 2).is_some());
    }

    #[test]
    fn test_structure_ragged_rows_pad_with_empty_slots() {
        let mut tree = BoxTree::new();
        let table = build_table(&mut tree, &[3, 1]);

        let structure = TableStructure::from_box_tree(&tree, table);
        assert_eq!(structure.column_count, 3);
        assert!(structure.get_cell_at(1, 1).is_none());
        assert!(structure.get_cell_at(1, 2).is_none());
    }

    #[test]
    fn test_structure_colspan_covers_slots() {
        let mut tree = BoxTree::new();
        let wide = tree.insert(spanning_cell(2, 1), vec![]);
        let narrow = tree.insert(plain_cell(), vec![]);
        let row = tree.insert(row_style(), vec![wide, narrow]);
        let table = tree.insert(table_style(), vec![row]);

        let structure = TableStructure::from_box_tree(&tree, table);
        assert_eq!(structure.column_count, 3);
        let first = structure.get_cell_at(0, 0).unwrap().index;
        assert_eq!(structure.get_cell_at(0, 1).unwrap().index, first);
        assert_ne!(structure.get_cell_at(0, 2).unwrap().index, first);
    }

    #[test]
    fn test_structure_rowspan_pushes_later_cells_aside() {
        let mut tree = BoxTree::new();
        let tall = tree.insert(spanning_cell(1, 2), vec![]);
        let a = tree.insert(plain_cell(), vec![]);
        let b = tree.insert(plain_cell(), vec![]);
        let row0 = tree.insert(row_style(), vec![tall, a]);
        let row1 = tree.insert(row_style(), vec![b]);
        let table = tree.insert(table_style(), vec![row0, row1]);

        let structure = TableStructure::from_box_tree(&tree, table);
        let tall_index = structure.get_cell_at(0, 0).unwrap().index;
        // The rowspan keeps covering (1, 0), so row 1's cell lands at column 1
        assert_eq!(structure.get_cell_at(1, 0).unwrap().index, tall_index);
        assert_eq!(structure.get_cell_at(1, 1).unwrap().box_id, b);
    }

    #[test]
    fn test_structure_rowspan_past_last_row_is_clamped() {
        let mut tree = BoxTree::new();
        let tall = tree.insert(spanning_cell(1, 5), vec![]);
        let row = tree.insert(row_style(), vec![tall]);
        let table = tree.insert(table_style(), vec![row]);

        let structure = TableStructure::from_box_tree(&tree, table);
        assert_eq!(structure.row_count, 1);
        assert_eq!(structure.cells[0].rowspan, 1);
    }

    #[test]
    fn test_structure_rows_inside_row_groups() {
        let mut tree = BoxTree::new();
        let cell = tree.insert(plain_cell(), vec![]);
        let row = tree.insert(row_style(), vec![cell]);
        let group_style = Arc::new(
            ComputedStyle::builder()
                .display(Display::TableRowGroup)
                .build(),
        );
        let group = tree.insert(group_style, vec![row]);
        let table = tree.insert(table_style(), vec![group]);

        let structure = TableStructure::from_box_tree(&tree, table);
        assert_eq!(structure.row_count, 1);
        assert!(structure.rows[0].group_style.is_some());
    }

    #[test]
    fn test_structure_columns_from_col_boxes() {
        let mut tree = BoxTree::new();
        let col_style = Arc::new(
            ComputedStyle::builder()
                .display(Display::TableColumn)
                .width(LengthOrAuto::px(100.0))
                .build(),
        );
        let col = tree.insert(col_style, vec![]);
        let group_style = Arc::new(
            ComputedStyle::builder()
                .display(Display::TableColumnGroup)
                .build(),
        );
        let group = tree.insert(group_style, vec![col]);
        let cell_a = tree.insert(plain_cell(), vec![]);
        let cell_b = tree.insert(plain_cell(), vec![]);
        let row = tree.insert(row_style(), vec![cell_a, cell_b]);
        let table = tree.insert(table_style(), vec![group, row]);

        let structure = TableStructure::from_box_tree(&tree, table);
        assert_eq!(structure.column_count, 2);
        assert_eq!(
            structure.columns[0].specified_width,
            SpecifiedSize::Fixed(100.0)
        );
        assert!(structure.columns[0].group_style.is_some());
        assert!(structure.columns[1].specified_width.is_auto());
    }

    #[test]
    fn test_structure_col_span_repeats_columns() {
        let mut tree = BoxTree::new();
        let col_style = Arc::new(
            ComputedStyle::builder()
                .display(Display::TableColumn)
                .width(LengthOrAuto::px(40.0))
                .col_span(3)
                .build(),
        );
        let col = tree.insert(col_style, vec![]);
        let table = tree.insert(table_style(), vec![col]);

        let structure = TableStructure::from_box_tree(&tree, table);
        assert_eq!(structure.column_count, 3);
        assert!(structure
            .columns
            .iter()
            .all(|c| c.specified_width == SpecifiedSize::Fixed(40.0)));
    }

    #[test]
    fn test_spacing_totals() {
        let mut tree = BoxTree::new();
        let cell_ids: Vec<_> = (0..3).map(|_| tree.insert(plain_cell(), vec![])).collect();
        let row0 = tree.insert(row_style(), cell_ids);
        let more: Vec<_> = (0..3).map(|_| tree.insert(plain_cell(), vec![])).collect();
        let row1 = tree.insert(row_style(), more);
        let style = Arc::new(
            ComputedStyle::builder()
                .display(Display::Table)
                .border_spacing(Size::new(5.0, 7.0))
                .build(),
        );
        let table = tree.insert(style, vec![row0, row1]);

        let structure = TableStructure::from_box_tree(&tree, table);
        assert_eq!(structure.total_horizontal_spacing(), 20.0); // 4 gaps of 5
        assert_eq!(structure.total_vertical_spacing(), 21.0); // 3 gaps of 7
    }

    #[test]
    fn test_collapse_zeroes_border_spacing() {
        let mut tree = BoxTree::new();
        let cell = tree.insert(plain_cell(), vec![]);
        let row = tree.insert(row_style(), vec![cell]);
        let style = Arc::new(
            ComputedStyle::builder()
                .display(Display::Table)
                .border_collapse(BorderCollapse::Collapse)
                .border_spacing(Size::new(5.0, 7.0))
                .build(),
        );
        let table = tree.insert(style, vec![row]);

        let structure = TableStructure::from_box_tree(&tree, table);
        assert_eq!(structure.border_spacing, Size::ZERO);
        assert_eq!(structure.total_horizontal_spacing(), 0.0);
        assert_eq!(structure.total_vertical_spacing(), 0.0);
    }

    #[test]
    fn test_fixed_layout_requires_definite_width() {
        let mut tree = BoxTree::new();
        let cell = tree.insert(plain_cell(), vec![]);
        let row = tree.insert(row_style(), vec![cell]);
        let auto_width = Arc::new(
            ComputedStyle::builder()
                .display(Display::Table)
                .table_layout(TableLayoutMode::Fixed)
                .build(),
        );
        let table = tree.insert(auto_width, vec![row]);
        assert!(!TableStructure::from_box_tree(&tree, table).is_fixed_layout);

        let cell = tree.insert(plain_cell(), vec![]);
        let row = tree.insert(row_style(), vec![cell]);
        let definite = Arc::new(
            ComputedStyle::builder()
                .display(Display::Table)
                .table_layout(TableLayoutMode::Fixed)
                .width(LengthOrAuto::px(400.0))
                .build(),
        );
        let table = tree.insert(definite, vec![row]);
        assert!(TableStructure::from_box_tree(&tree, table).is_fixed_layout);
    }

    // ========== Collapsed Border Tests ==========

    fn bordered_cell(border: BorderEdges) -> Arc<ComputedStyle> {
        Arc::new(
            ComputedStyle::builder()
                .display(Display::TableCell)
                .border(border)
                .build(),
        )
    }

    #[test]
    fn test_collapsed_borders_cell_beats_row() {
        // The cell's thin border wins over the row's thick one because
        // cells have the highest precedence.
        let mut tree = BoxTree::new();
        let cell = tree.insert(
            bordered_cell(BorderEdges {
                top: BorderEdge::solid(1.0),
                ..BorderEdges::default()
            }),
            vec![],
        );
        let row_style = Arc::new(
            ComputedStyle::builder()
                .display(Display::TableRow)
                .border(BorderEdges {
                    top: BorderEdge::solid(5.0),
                    ..BorderEdges::default()
                })
                .build(),
        );
        let row = tree.insert(row_style, vec![cell]);
        let table = tree.insert(table_style(), vec![row]);

        let structure = TableStructure::from_box_tree(&tree, table);
        let borders = structure.collapsed_borders(&tree, table);
        assert_eq!(borders.horizontal_at(0, 0).width, 1.0);
    }

    #[test]
    fn test_collapsed_borders_hidden_suppresses_everything() {
        let mut tree = BoxTree::new();
        let hidden = BorderEdge::new(2.0, BorderStyle::Hidden, Rgba::BLACK);
        let cell = tree.insert(
            bordered_cell(BorderEdges {
                top: hidden,
                ..BorderEdges::default()
            }),
            vec![],
        );
        let row = tree.insert(row_style(), vec![cell]);
        let style = Arc::new(
            ComputedStyle::builder()
                .display(Display::Table)
                .border(BorderEdges::uniform(BorderEdge::solid(10.0)))
                .build(),
        );
        let table = tree.insert(style, vec![row]);

        let structure = TableStructure::from_box_tree(&tree, table);
        let borders = structure.collapsed_borders(&tree, table);
        let top = borders.horizontal_at(0, 0);
        assert!(top.style.is_hidden());
        assert_eq!(top.used_width(), 0.0);
        // The table's other edges are unaffected
        assert_eq!(borders.horizontal_at(1, 0).width, 10.0);
    }

    #[test]
    fn test_collapsed_borders_later_declaration_wins_ties() {
        // Two adjacent cells both declare the shared edge; both are cell
        // precedence, so the later declaration (the right cell) wins.
        let mut tree = BoxTree::new();
        let red = BorderEdge::new(2.0, BorderStyle::Solid, Rgba::new(255, 0, 0, 255));
        let blue = BorderEdge::new(4.0, BorderStyle::Solid, Rgba::new(0, 0, 255, 255));
        let left = tree.insert(
            bordered_cell(BorderEdges {
                right: red,
                ..BorderEdges::default()
            }),
            vec![],
        );
        let right = tree.insert(
            bordered_cell(BorderEdges {
                left: blue,
                ..BorderEdges::default()
            }),
            vec![],
        );
        let row = tree.insert(row_style(), vec![left, right]);
        let table = tree.insert(table_style(), vec![row]);

        let structure = TableStructure::from_box_tree(&tree, table);
        let borders = structure.collapsed_borders(&tree, table);
        assert_eq!(borders.vertical_at(1, 0), blue);
    }

    #[test]
    fn test_collapsed_borders_interior_of_span_is_empty() {
        let mut tree = BoxTree::new();
        let wide_style = Arc::new(
            ComputedStyle::builder()
                .display(Display::TableCell)
                .col_span(2)
                .border(BorderEdges::uniform(BorderEdge::solid(3.0)))
                .build(),
        );
        let wide = tree.insert(wide_style, vec![]);
        let row = tree.insert(row_style(), vec![wide]);
        let table = tree.insert(table_style(), vec![row]);

        let structure = TableStructure::from_box_tree(&tree, table);
        let borders = structure.collapsed_borders(&tree, table);
        // Boundary 1 runs through the middle of the spanning cell
        assert_eq!(borders.vertical_at(1, 0).used_width(), 0.0);
        // The outer boundaries still carry the cell's border
        assert_eq!(borders.vertical_at(0, 0).width, 3.0);
        assert_eq!(borders.vertical_at(2, 0).width, 3.0);
    }

    #[test]
    fn test_collapsed_borders_table_edge_fallback() {
        let mut tree = BoxTree::new();
        let cell = tree.insert(plain_cell(), vec![]);
        let row = tree.insert(row_style(), vec![cell]);
        let style = Arc::new(
            ComputedStyle::builder()
                .display(Display::Table)
                .border(BorderEdges::uniform(BorderEdge::solid(2.0)))
                .build(),
        );
        let table = tree.insert(style, vec![row]);

        let structure = TableStructure::from_box_tree(&tree, table);
        let borders = structure.collapsed_borders(&tree, table);
        assert_eq!(borders.vertical_at(0, 0).width, 2.0);
        assert_eq!(borders.vertical_at(1, 0).width, 2.0);
        assert_eq!(borders.horizontal_at(0, 0).width, 2.0);
        assert_eq!(borders.horizontal_at(1, 0).width, 2.0);
    }

    #[test]
    fn test_collapsed_borders_out_of_range_queries() {
        let mut tree = BoxTree::new();
        let table = build_table(&mut tree, &[1]);
        let structure = TableStructure::from_box_tree(&tree, table);
        let borders = structure.collapsed_borders(&tree, table);

        assert_eq!(borders.vertical_at(9, 9).used_width(), 0.0);
        assert_eq!(borders.horizontal_at(9, 9).used_width(), 0.0);
    }

    // ========== Row Height Tests ==========

    #[test]
    fn test_row_heights_take_cell_minimums() {
        let mut tree = BoxTree::new();
        let table = build_table(&mut tree, &[2, 2]);
        let mut structure = TableStructure::from_box_tree(&tree, table);
        structure.cells[0].min_height = 30.0;
        structure.cells[1].min_height = 10.0;
        structure.cells[2].min_height = 20.0;

        structure.calculate_row_heights(None);
        assert_eq!(structure.rows[0].computed_height, 30.0);
        assert_eq!(structure.rows[1].computed_height, 20.0);
    }

    #[test]
    fn test_row_heights_y_positions_include_spacing() {
        let mut tree = BoxTree::new();
        let cell_a = tree.insert(plain_cell(), vec![]);
        let cell_b = tree.insert(plain_cell(), vec![]);
        let row0 = tree.insert(row_style(), vec![cell_a]);
        let row1 = tree.insert(row_style(), vec![cell_b]);
        let style = Arc::new(
            ComputedStyle::builder()
                .display(Display::Table)
                .border_spacing(Size::new(0.0, 4.0))
                .build(),
        );
        let table = tree.insert(style, vec![row0, row1]);

        let mut structure = TableStructure::from_box_tree(&tree, table);
        structure.cells[0].min_height = 10.0;
        structure.cells[1].min_height = 20.0;

        structure.calculate_row_heights(None);
        assert_eq!(structure.rows[0].y_position, 4.0);
        assert_eq!(structure.rows[1].y_position, 18.0); // 4 + 10 + 4
        assert_eq!(structure.content_height(), 42.0); // 10 + 20 + 3 gaps of 4
    }

    #[test]
    fn test_row_heights_rowspan_shortfall_split_evenly() {
        let mut tree = BoxTree::new();
        let tall = tree.insert(spanning_cell(1, 2), vec![]);
        let a = tree.insert(plain_cell(), vec![]);
        let b = tree.insert(plain_cell(), vec![]);
        let row0 = tree.insert(row_style(), vec![tall, a]);
        let row1 = tree.insert(row_style(), vec![b]);
        let table = tree.insert(table_style(), vec![row0, row1]);

        let mut structure = TableStructure::from_box_tree(&tree, table);
        structure.cells[1].min_height = 10.0; // row 0 content
        structure.cells[2].min_height = 10.0; // row 1 content
        structure.cells[0].min_height = 40.0; // spans both rows

        structure.calculate_row_heights(None);
        // 20px shortfall split evenly over both rows
        assert_eq!(structure.rows[0].computed_height, 20.0);
        assert_eq!(structure.rows[1].computed_height, 20.0);
    }

    #[test]
    fn test_row_heights_satisfied_rowspan_changes_nothing() {
        let mut tree = BoxTree::new();
        let tall = tree.insert(spanning_cell(1, 2), vec![]);
        let a = tree.insert(plain_cell(), vec![]);
        let b = tree.insert(plain_cell(), vec![]);
        let row0 = tree.insert(row_style(), vec![tall, a]);
        let row1 = tree.insert(row_style(), vec![b]);
        let table = tree.insert(table_style(), vec![row0, row1]);

        let mut structure = TableStructure::from_box_tree(&tree, table);
        structure.cells[1].min_height = 25.0;
        structure.cells[2].min_height = 25.0;
        structure.cells[0].min_height = 40.0; // already fits in 50

        structure.calculate_row_heights(None);
        assert_eq!(structure.rows[0].computed_height, 25.0);
        assert_eq!(structure.rows[1].computed_height, 25.0);
    }

    #[test]
    fn test_row_heights_specified_height_is_a_floor() {
        let mut tree = BoxTree::new();
        let cell = tree.insert(plain_cell(), vec![]);
        let tall_row = Arc::new(
            ComputedStyle::builder()
                .display(Display::TableRow)
                .height(LengthOrAuto::px(50.0))
                .build(),
        );
        let row = tree.insert(tall_row, vec![cell]);
        let table = tree.insert(table_style(), vec![row]);

        let mut structure = TableStructure::from_box_tree(&tree, table);
        structure.cells[0].min_height = 20.0;

        structure.calculate_row_heights(None);
        assert_eq!(structure.rows[0].computed_height, 50.0);
    }

    #[test]
    fn test_row_heights_percentage_needs_definite_base() {
        let half_row = Arc::new(
            ComputedStyle::builder()
                .display(Display::TableRow)
                .height(LengthOrAuto::percent(50.0))
                .build(),
        );

        // Without a definite table height the percentage contributes nothing
        let mut tree = BoxTree::new();
        let cell = tree.insert(plain_cell(), vec![]);
        let row = tree.insert(half_row.clone(), vec![cell]);
        let table = tree.insert(table_style(), vec![row]);
        let mut structure = TableStructure::from_box_tree(&tree, table);
        structure.cells[0].min_height = 20.0;
        structure.calculate_row_heights(None);
        assert_eq!(structure.rows[0].computed_height, 20.0);

        // With one: the percentage row takes half, the auto row soaks up
        // the rest of the stretch
        let mut tree = BoxTree::new();
        let cell_a = tree.insert(plain_cell(), vec![]);
        let cell_b = tree.insert(plain_cell(), vec![]);
        let row0 = tree.insert(half_row, vec![cell_a]);
        let row1 = tree.insert(row_style(), vec![cell_b]);
        let table = tree.insert(table_style(), vec![row0, row1]);
        let mut structure = TableStructure::from_box_tree(&tree, table);
        structure.cells[0].min_height = 10.0;
        structure.cells[1].min_height = 10.0;
        structure.calculate_row_heights(Some(200.0));
        assert_eq!(structure.rows[0].computed_height, 100.0);
        assert_eq!(structure.rows[1].computed_height, 100.0);
    }

    #[test]
    fn test_row_heights_stretch_into_definite_height() {
        let mut tree = BoxTree::new();
        let table = build_table(&mut tree, &[1, 1]);
        let mut structure = TableStructure::from_box_tree(&tree, table);
        structure.cells[0].min_height = 20.0;
        structure.cells[1].min_height = 30.0;

        structure.calculate_row_heights(Some(100.0));
        // 50px left over, split 2:3 by current heights
        assert_eq!(structure.rows[0].computed_height, 40.0);
        assert_eq!(structure.rows[1].computed_height, 60.0);
    }

    #[test]
    fn test_cell_span_geometry() {
        let mut tree = BoxTree::new();
        let wide = tree.insert(spanning_cell(2, 1), vec![]);
        let narrow = tree.insert(plain_cell(), vec![]);
        let row = tree.insert(row_style(), vec![wide, narrow]);
        let style = Arc::new(
            ComputedStyle::builder()
                .display(Display::Table)
                .border_spacing(Size::new(10.0, 0.0))
                .build(),
        );
        let table = tree.insert(style, vec![row]);

        let mut structure = TableStructure::from_box_tree(&tree, table);
        for (i, width) in [30.0, 40.0, 50.0].into_iter().enumerate() {
            structure.columns[i].computed_width = width;
        }

        let spanning = structure.cells[0].clone();
        // Two columns plus the gap between them
        assert_eq!(structure.cell_span_width(&spanning), 80.0);
        assert_eq!(structure.column_x_offset(0), 10.0);
        assert_eq!(structure.column_x_offset(2), 100.0); // 10 + 30 + 10 + 40 + 10
        assert_eq!(structure.content_width(), 160.0); // 120 + 4 gaps of 10
    }
}
