//! Shared cell/range/option models for the workbook writer.

use rust_xlsxwriter::ExcelDateTime;

////////////////////////////////////////////////////////////////////////////////
// #region CellSpecification

/// Literal content of a cell.
#[derive(Clone, Default)]
pub enum EnumCellValue {
    /// No literal content.
    #[default]
    None,
    /// Text value.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Date/time value.
    Date(ExcelDateTime),
}

// Manual impl: `ExcelDateTime` does not implement `Debug`, so the `Date`
// variant is shown via its Excel serial number.
impl std::fmt::Debug for EnumCellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnumCellValue::None => f.write_str("None"),
            EnumCellValue::Text(value) => f.debug_tuple("Text").field(value).finish(),
            EnumCellValue::Number(value) => f.debug_tuple("Number").field(value).finish(),
            EnumCellValue::Date(value) => f.debug_tuple("Date").field(&value.to_excel()).finish(),
        }
    }
}

impl EnumCellValue {
    /// Text value from anything string-like.
    pub fn text(value: impl Into<String>) -> Self {
        EnumCellValue::Text(value.into())
    }
}

/// Horizontal cell alignment subset; `Default` leaves the engine/worksheet
/// setting untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumAlignHorizontal {
    /// Inherit (Excel "general").
    #[default]
    Default,
    /// Left aligned.
    Left,
    /// Centered.
    Center,
    /// Right aligned.
    Right,
}

/// Vertical cell alignment subset; `Default` leaves the engine/worksheet
/// setting untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumAlignVertical {
    /// Inherit (worksheet default styles set center).
    #[default]
    Default,
    /// Top aligned.
    Top,
    /// Centered.
    Center,
    /// Bottom aligned.
    Bottom,
}

/// One logical cell: content plus the style attributes that differ from the
/// worksheet defaults.
///
/// Unset attributes (`None` / `Default` variants) are never written to the
/// target, so the worksheet-level defaults show through. Set attributes are
/// applied verbatim; applying a cell twice is last-write-wins.
#[derive(Debug, Clone, Default)]
pub struct SpecSheetCell {
    /// Literal content; superseded for computed display by `formula`.
    pub value: EnumCellValue,
    /// Formula expression in the engine's dialect, without leading `=`.
    pub formula: Option<String>,
    /// Thin border around the full outer boundary of the target.
    pub all_borders: bool,
    /// Bold flag; applied unconditionally (true and false both written).
    pub bold: bool,
    /// Font size in points; values at or below
    /// [`N_FONT_SIZE_MIN`](crate::conf::N_FONT_SIZE_MIN) are ignored.
    pub font_size: Option<f64>,
    /// Background fill color, HTML name or `#RRGGBB`.
    pub bg_color: Option<String>,
    /// Font color, HTML name or `#RRGGBB`.
    pub font_color: Option<String>,
    /// Horizontal alignment override.
    pub align_horizontal: EnumAlignHorizontal,
    /// Vertical alignment override.
    pub align_vertical: EnumAlignVertical,
    /// Number format code, passed through uninterpreted; `None`/blank resolves
    /// to the literal-text format [`FMT_TEXT`](crate::conf::FMT_TEXT).
    pub number_format: Option<String>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RangeSpecification

/// Rectangular 1-based inclusive cell region with optional merge behavior.
///
/// `row_from <= row_to` and `col_from <= col_to` are the caller's
/// responsibility; malformed ranges surface as engine errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecCellRange {
    /// First row, 1-based.
    pub row_from: u32,
    /// First column, 1-based.
    pub col_from: u16,
    /// Last row, 1-based inclusive.
    pub row_to: u32,
    /// Last column, 1-based inclusive.
    pub col_to: u16,
    /// Union the rectangle into one merged cell before writing.
    pub if_merge: bool,
}

impl SpecCellRange {
    /// Rectangle spanning more than one row; not merged.
    pub fn new(row_from: u32, col_from: u16, row_to: u32, col_to: u16) -> Self {
        Self {
            row_from,
            col_from,
            row_to,
            col_to,
            if_merge: false,
        }
    }

    /// Single-row rectangle; not merged.
    pub fn single_row(row: u32, col_from: u16, col_to: u16) -> Self {
        Self::new(row, col_from, row, col_to)
    }

    /// Return the same rectangle with the merge flag set.
    pub fn merged(mut self) -> Self {
        self.if_merge = true;
        self
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetOptions

/// Print orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumPageOrientation {
    /// Landscape (default).
    #[default]
    Landscape,
    /// Portrait.
    Portrait,
}

/// ISO 216 paper size. Add members as needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumPaperSize {
    /// A4 (default).
    #[default]
    A4,
}

impl EnumPaperSize {
    /// Engine paper-size index (ECMA-376 `paperSize` values).
    pub fn index(self) -> u8 {
        match self {
            EnumPaperSize::A4 => 9,
        }
    }
}

/// Per-sheet creation options.
#[derive(Debug, Clone, Default)]
pub struct SpecSheetOptions {
    /// Print orientation.
    pub orientation: EnumPageOrientation,
    /// Print paper size.
    pub paper_size: EnumPaperSize,
    /// Default column width; values `<= 0` keep the engine default.
    pub width_col_default: f64,
    /// Open the sheet in page-layout view.
    pub if_page_layout_view: bool,
}

/// Workbook-wide writer options.
#[derive(Debug, Clone, Default)]
pub struct SpecWorkbookOptions {
    /// Convert each sheet's occupied extent into a formatted table at
    /// serialization time.
    pub if_format_tables: bool,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
