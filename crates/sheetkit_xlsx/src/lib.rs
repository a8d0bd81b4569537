//! `sheetkit_xlsx`:
//! opinionated XLSX authoring façade over the `rust_xlsxwriter` engine.
//!
//! - `conf`   : constants and preset number-format strings
//! - `spec`   : cell/range/option models
//! - `util`   : pure helpers (addressing, formulas, colors, markup)
//! - `writer` : stateful workbook writer
//! - `error`  : writer error type
pub mod conf;
pub mod error;
pub mod spec;
pub mod util;
pub mod writer;

pub use rust_xlsxwriter::ExcelDateTime;

pub use conf::{
    FMT_CURRENCY, FMT_DATE, FMT_TEXT, FMT_TWO_DECIMAL, FMT_WHOLE_NUMBER, N_FONT_SIZE_MIN,
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NO_SHEETS_END_COL, N_NROWS_EXCEL_MAX,
    TXT_FONT_FAMILY_DEFAULT, TXT_NO_SHEETS_MESSAGE,
};
pub use error::SheetError;
pub use spec::{
    EnumAlignHorizontal, EnumAlignVertical, EnumCellValue, EnumPageOrientation, EnumPaperSize,
    SpecCellRange, SpecSheetCell, SpecSheetOptions, SpecWorkbookOptions,
};
pub use util::{
    derive_cell_address, derive_column_letters, derive_column_sum_formula,
    derive_header_footer_markup, derive_hex_color_code, derive_page_number_markup,
    derive_row_sum_formula,
};
pub use writer::XlsxWriter;
