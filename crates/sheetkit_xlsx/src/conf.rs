//! XLSX constants and preset format strings.

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: u32 = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: u16 = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;

/// Font size at or below which a per-cell size request is ignored.
pub const N_FONT_SIZE_MIN: f64 = 4.0;

/// Literal-text number format; the fallback for every written cell.
pub const FMT_TEXT: &str = "@";
/// Whole-number format with thousands separator.
pub const FMT_WHOLE_NUMBER: &str = "#,##0";
/// Two-decimal format with thousands separator.
pub const FMT_TWO_DECIMAL: &str = "#,##0.00";
/// US currency format.
pub const FMT_CURRENCY: &str = "$#,##0.00";
/// Month/day/year date format.
pub const FMT_DATE: &str = "mm/dd/yyyy";

/// Font family applied by default worksheet styles.
pub const TXT_FONT_FAMILY_DEFAULT: &str = "Arial";
/// Header/footer font family and weight markup fragment.
pub const TXT_HEADER_FOOTER_FONT: &str = "&\"Arial,Regular Bold\"";

/// Sheet name and banner text used when a workbook is serialized with zero
/// sheets.
pub const TXT_NO_SHEETS_MESSAGE: &str = "NO DATA AVAILABLE";
/// Last column (1-based, inclusive) of the no-data banner merge.
pub const N_NO_SHEETS_END_COL: u16 = 20;
/// Font size of the no-data banner.
pub const N_NO_SHEETS_FONT_SIZE: f64 = 20.0;
