//! Computed style values
//!
//! This module provides the ComputedStyle struct which contains resolved
//! CSS property values for a single box, restricted to the properties that
//! drive grid and table layout.
//!
//! # Computed Values
//!
//! Computed values are partially resolved:
//! - Absolute lengths → px
//! - Percentages kept (resolved during layout against the containing block)
//! - Keywords mapped to enums
//!
//! # Example
//!
//! ```
//! use fastlayout::ComputedStyle;
//!
//! let style = ComputedStyle::default();
//! assert!(style.width.is_auto());
//! assert_eq!(style.col_span, 1);
//! ```

use crate::geometry::{EdgeSizes, Size};
use crate::style::grid::{GridPosition, TrackSizingSpec};
use crate::style::values::LengthOrAuto;

/// Box display type
///
/// Restricted to the display values that participate in grid and table
/// layout; everything else renders as a plain block or inline leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    /// Block-level box
    Block,
    /// Inline-level box
    Inline,
    /// Grid container
    Grid,
    /// Table wrapper box
    Table,
    /// Table header row group (`<thead>`)
    TableHeaderGroup,
    /// Table body row group (`<tbody>`)
    TableRowGroup,
    /// Table footer row group (`<tfoot>`)
    TableFooterGroup,
    /// Table row (`<tr>`)
    TableRow,
    /// Table cell (`<td>`, `<th>`)
    TableCell,
    /// Table column (`<col>`)
    TableColumn,
    /// Table column group (`<colgroup>`)
    TableColumnGroup,
    /// Generates no box
    None,
}

impl Display {
    /// Returns true if this display generates no box
    pub fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns true for grid containers
    pub fn is_grid(self) -> bool {
        matches!(self, Self::Grid)
    }

    /// Returns true for the table wrapper box
    pub fn is_table(self) -> bool {
        matches!(self, Self::Table)
    }

    /// Returns true for any of the three row group kinds
    pub fn is_table_row_group(self) -> bool {
        matches!(
            self,
            Self::TableHeaderGroup | Self::TableRowGroup | Self::TableFooterGroup
        )
    }

    /// Returns true for table rows
    pub fn is_table_row(self) -> bool {
        matches!(self, Self::TableRow)
    }

    /// Returns true for table cells
    pub fn is_table_cell(self) -> bool {
        matches!(self, Self::TableCell)
    }

    /// Returns true for columns and column groups
    pub fn is_table_column_box(self) -> bool {
        matches!(self, Self::TableColumn | Self::TableColumnGroup)
    }
}

/// Writing mode of a box
///
/// Only the axis orientation matters here: boxes whose inline axis is
/// orthogonal to their container's are excluded from content-based track
/// sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritingMode {
    /// Horizontal lines, top to bottom (`horizontal-tb`)
    HorizontalTb,
    /// Vertical lines, right to left (`vertical-rl`)
    VerticalRl,
    /// Vertical lines, left to right (`vertical-lr`)
    VerticalLr,
}

impl WritingMode {
    /// Returns true if the inline axis runs horizontally
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::HorizontalTb)
    }

    /// Returns true if the inline axes of the two modes are perpendicular
    pub fn is_orthogonal_to(self, other: WritingMode) -> bool {
        self.is_horizontal() != other.is_horizontal()
    }
}

/// Line style of a single border edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    None,
    Hidden,
    Dotted,
    Dashed,
    Solid,
    Double,
    Groove,
    Ridge,
    Inset,
    Outset,
}

impl BorderStyle {
    /// Returns true for `none`
    pub fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns true for `hidden`
    ///
    /// Under `border-collapse`, a hidden edge suppresses every border at
    /// its position regardless of what the other candidates specify.
    pub fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    /// Returns true if the edge paints and takes up space
    pub fn is_visible(self) -> bool {
        !self.is_none() && !self.is_hidden()
    }
}

/// RGBA color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// One border edge: width, line style, and color
///
/// The width is the specified width in px. The used width is zero when the
/// style is `none` or `hidden`; use [`BorderEdge::used_width`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderEdge {
    pub width: f32,
    pub style: BorderStyle,
    pub color: Rgba,
}

impl BorderEdge {
    pub const fn new(width: f32, style: BorderStyle, color: Rgba) -> Self {
        Self {
            width,
            style,
            color,
        }
    }

    /// A solid black edge, the common case in tests and defaults
    pub const fn solid(width: f32) -> Self {
        Self::new(width, BorderStyle::Solid, Rgba::BLACK)
    }

    /// Width the edge occupies in the box model
    pub fn used_width(&self) -> f32 {
        if self.style.is_visible() {
            self.width
        } else {
            0.0
        }
    }
}

impl Default for BorderEdge {
    fn default() -> Self {
        // medium width, but style `none` keeps the used width at zero
        Self::new(3.0, BorderStyle::None, Rgba::BLACK)
    }
}

/// Borders on all four edges of a box
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BorderEdges {
    pub top: BorderEdge,
    pub right: BorderEdge,
    pub bottom: BorderEdge,
    pub left: BorderEdge,
}

impl BorderEdges {
    /// Uniform border on all four edges
    pub const fn uniform(edge: BorderEdge) -> Self {
        Self {
            top: edge,
            right: edge,
            bottom: edge,
            left: edge,
        }
    }

    /// Used widths of the four edges as box-model edge sizes
    pub fn used_widths(&self) -> EdgeSizes {
        EdgeSizes::new(
            self.top.used_width(),
            self.right.used_width(),
            self.bottom.used_width(),
            self.left.used_width(),
        )
    }
}

/// Table border model
///
/// CSS: `border-collapse`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderCollapse {
    /// Each cell has its own border, with `border-spacing` between cells
    #[default]
    Separate,
    /// Adjacent borders merge into a single border per edge
    Collapse,
}

/// Table column sizing algorithm
///
/// CSS: `table-layout`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableLayoutMode {
    /// Column widths from cell contents
    #[default]
    Auto,
    /// Column widths from the first row only
    Fixed,
}

/// Computed CSS styles for a box
///
/// Contains the resolved property values that grid and table layout read.
/// Wrapped in `Arc` and shared between tree nodes.
///
/// # Examples
///
/// ```
/// use fastlayout::{ComputedStyle, Display};
///
/// let style = ComputedStyle::builder().display(Display::Grid).build();
/// assert!(style.display.is_grid());
/// ```
#[derive(Debug, Clone)]
pub struct ComputedStyle {
    // ===== BOX MODEL =====
    /// Width property
    ///
    /// CSS: `width`
    /// Initial: auto
    /// Percentages: relative to containing block width
    pub width: LengthOrAuto,

    /// Height property
    ///
    /// CSS: `height`
    /// Initial: auto
    pub height: LengthOrAuto,

    /// Padding on all sides, resolved to px
    ///
    /// CSS: `padding-*`
    /// Initial: 0
    pub padding: EdgeSizes,

    /// Border on all sides
    ///
    /// CSS: `border-*-width`, `border-*-style`, `border-*-color`
    /// Initial: medium none currentColor
    pub border: BorderEdges,

    // ===== DISPLAY =====
    /// Display type
    ///
    /// CSS: `display`
    /// Initial: inline
    pub display: Display,

    /// Writing mode
    ///
    /// CSS: `writing-mode`
    /// Initial: horizontal-tb
    pub writing_mode: WritingMode,

    // ===== GRID CONTAINER =====
    /// Column track list
    ///
    /// CSS: `grid-template-columns`
    /// Initial: none (empty list)
    pub grid_template_columns: Vec<TrackSizingSpec>,

    /// Row track list
    ///
    /// CSS: `grid-template-rows`
    /// Initial: none (empty list)
    pub grid_template_rows: Vec<TrackSizingSpec>,

    // ===== GRID ITEM =====
    /// Column start line
    ///
    /// CSS: `grid-column-start` (spans and names are not supported)
    /// Initial: auto
    pub grid_column: GridPosition,

    /// Row start line
    ///
    /// CSS: `grid-row-start`
    /// Initial: auto
    pub grid_row: GridPosition,

    // ===== TABLE =====
    /// Column sizing algorithm
    ///
    /// CSS: `table-layout`
    /// Initial: auto
    pub table_layout: TableLayoutMode,

    /// Border model
    ///
    /// CSS: `border-collapse`
    /// Initial: separate
    pub border_collapse: BorderCollapse,

    /// Horizontal and vertical gap between cell borders
    ///
    /// CSS: `border-spacing`
    /// Initial: 0 0
    /// Ignored when borders collapse
    pub border_spacing: Size,

    /// Number of columns a cell spans
    ///
    /// HTML: `colspan`
    /// Initial: 1
    pub col_span: u32,

    /// Number of rows a cell spans
    ///
    /// HTML: `rowspan`
    /// Initial: 1
    pub row_span: u32,
}

impl Default for ComputedStyle {
    /// Creates a ComputedStyle with CSS initial values
    fn default() -> Self {
        Self {
            width: LengthOrAuto::Auto,
            height: LengthOrAuto::Auto,
            padding: EdgeSizes::ZERO,
            border: BorderEdges::default(),

            display: Display::Inline,
            writing_mode: WritingMode::HorizontalTb,

            grid_template_columns: Vec::new(),
            grid_template_rows: Vec::new(),
            grid_column: GridPosition::Auto,
            grid_row: GridPosition::Auto,

            table_layout: TableLayoutMode::Auto,
            border_collapse: BorderCollapse::Separate,
            border_spacing: Size::ZERO,
            col_span: 1,
            row_span: 1,
        }
    }
}

impl ComputedStyle {
    /// Used border widths of the four edges
    pub fn border_widths(&self) -> EdgeSizes {
        self.border.used_widths()
    }

    /// Total horizontal border plus padding
    ///
    /// The inline distance between the border box and the content box.
    pub fn horizontal_border_padding(&self) -> f32 {
        self.border_widths().horizontal() + self.padding.horizontal()
    }

    /// Total vertical border plus padding
    pub fn vertical_border_padding(&self) -> f32 {
        self.border_widths().vertical() + self.padding.vertical()
    }

    /// Starts building a style from initial values
    pub fn builder() -> ComputedStyleBuilder {
        ComputedStyleBuilder::new()
    }
}

/// Builder for [`ComputedStyle`]
///
/// Mostly a convenience for tests and callers that construct styles
/// programmatically rather than from a cascade.
#[derive(Debug, Clone)]
pub struct ComputedStyleBuilder {
    style: ComputedStyle,
}

impl ComputedStyleBuilder {
    pub fn new() -> Self {
        Self {
            style: ComputedStyle::default(),
        }
    }

    pub fn display(mut self, display: Display) -> Self {
        self.style.display = display;
        self
    }

    pub fn width(mut self, width: LengthOrAuto) -> Self {
        self.style.width = width;
        self
    }

    pub fn height(mut self, height: LengthOrAuto) -> Self {
        self.style.height = height;
        self
    }

    pub fn padding(mut self, padding: EdgeSizes) -> Self {
        self.style.padding = padding;
        self
    }

    pub fn border(mut self, border: BorderEdges) -> Self {
        self.style.border = border;
        self
    }

    pub fn writing_mode(mut self, mode: WritingMode) -> Self {
        self.style.writing_mode = mode;
        self
    }

    pub fn grid_template_columns(mut self, tracks: Vec<TrackSizingSpec>) -> Self {
        self.style.grid_template_columns = tracks;
        self
    }

    pub fn grid_template_rows(mut self, tracks: Vec<TrackSizingSpec>) -> Self {
        self.style.grid_template_rows = tracks;
        self
    }

    pub fn grid_column(mut self, position: GridPosition) -> Self {
        self.style.grid_column = position;
        self
    }

    pub fn grid_row(mut self, position: GridPosition) -> Self {
        self.style.grid_row = position;
        self
    }

    pub fn table_layout(mut self, mode: TableLayoutMode) -> Self {
        self.style.table_layout = mode;
        self
    }

    pub fn border_collapse(mut self, collapse: BorderCollapse) -> Self {
        self.style.border_collapse = collapse;
        self
    }

    pub fn border_spacing(mut self, spacing: Size) -> Self {
        self.style.border_spacing = spacing;
        self
    }

    pub fn col_span(mut self, span: u32) -> Self {
        self.style.col_span = span;
        self
    }

    pub fn row_span(mut self, span: u32) -> Self {
        self.style.row_span = span;
        self
    }

    pub fn build(self) -> ComputedStyle {
        self.style
    }
}

impl Default for ComputedStyleBuilder {
    fn default() -> Self {
        Self::new()
    }
}
