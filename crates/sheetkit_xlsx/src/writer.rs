//! Stateful workbook writer fronting the `rust_xlsxwriter` engine.
//!
//! The writer owns one in-memory workbook plus the per-sheet side state the
//! engine does not track for us: header/footer section slots, sheet default
//! styles, the default-column-width request, and the occupied extent.

use std::collections::BTreeSet;

use log::debug;
use rust_xlsxwriter::{
    Format, FormatAlign, FormatBorder, Formula, Table, Workbook, Worksheet,
};

use crate::conf::{
    FMT_TEXT, N_FONT_SIZE_MIN, N_NCOLS_EXCEL_MAX, N_NO_SHEETS_END_COL, N_NO_SHEETS_FONT_SIZE,
    N_NROWS_EXCEL_MAX, TXT_NO_SHEETS_MESSAGE,
};
use crate::error::SheetError;
use crate::spec::{
    EnumAlignHorizontal, EnumAlignVertical, EnumCellValue, EnumPageOrientation, SpecCellRange,
    SpecSheetCell, SpecSheetOptions, SpecWorkbookOptions,
};
use crate::util::derive_hex_color_code;

/// Sheet default styles recorded by [`XlsxWriter::set_default_styles`].
#[derive(Debug, Clone)]
struct SheetDefaultStyles {
    font_size: f64,
    font_family: String,
}

/// Per-sheet bookkeeping the engine does not expose.
#[derive(Debug, Default)]
struct SheetState {
    default_styles: Option<SheetDefaultStyles>,
    /// Left/center/right header section markup, set independently.
    header_slots: [Option<String>; 3],
    /// Left/center/right footer section markup, set independently.
    footer_slots: [Option<String>; 3],
    /// Default column width request; applied to the occupied extent at
    /// serialization time.
    width_col_default: Option<f64>,
    /// Zero-based columns given an explicit width (exempt from the default).
    set_cols_width_explicit: BTreeSet<u16>,
    /// Zero-based last written row, when anything was written.
    n_row_last: Option<u32>,
    /// Zero-based last written column, when anything was written.
    n_col_last: Option<u16>,
}

/// Outer-boundary border flags for one cell of a write target.
#[derive(Debug, Clone, Copy)]
struct BorderEdges {
    top: bool,
    bottom: bool,
    left: bool,
    right: bool,
}

impl BorderEdges {
    const ALL: BorderEdges = BorderEdges {
        top: true,
        bottom: true,
        left: true,
        right: true,
    };
    const NONE: BorderEdges = BorderEdges {
        top: false,
        bottom: false,
        left: false,
        right: false,
    };
}

/// Stateful workbook writer.
///
/// Lifecycle: create, add one or more sheets, write cells and layout against
/// the current sheet, then [`Self::serialize`] to bytes. The underlying
/// workbook is released on drop; persisting the byte output is the caller's
/// concern.
pub struct XlsxWriter {
    workbook: Workbook,
    options: SpecWorkbookOptions,
    l_sheet_states: Vec<SheetState>,
    n_idx_sheet_current: Option<usize>,
}

impl Default for XlsxWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl XlsxWriter {
    /// Create a writer with default workbook options.
    pub fn new() -> Self {
        Self::with_options(SpecWorkbookOptions::default())
    }

    /// Create a writer with explicit workbook options.
    pub fn with_options(options: SpecWorkbookOptions) -> Self {
        Self {
            workbook: Workbook::new(),
            options,
            l_sheet_states: Vec::new(),
            n_idx_sheet_current: None,
        }
    }

    /// Number of sheets added so far.
    pub fn sheet_count(&self) -> usize {
        self.l_sheet_states.len()
    }

    ////////////////////////////////////////////////////////////////////////////
    // #region SheetAndLayout

    /// Add a named worksheet and make it current.
    ///
    /// Sheet naming constraints (uniqueness, length, forbidden characters)
    /// are the engine's; violations surface as [`SheetError::Engine`].
    pub fn add_sheet(
        &mut self,
        sheet_name: &str,
        options: &SpecSheetOptions,
    ) -> Result<(), SheetError> {
        let mut worksheet = Worksheet::new();
        worksheet.set_name(sheet_name)?;
        match options.orientation {
            EnumPageOrientation::Landscape => worksheet.set_landscape(),
            EnumPageOrientation::Portrait => worksheet.set_portrait(),
        };
        worksheet.set_paper_size(options.paper_size.index());
        if options.if_page_layout_view {
            worksheet.set_view_page_layout();
        }
        self.workbook.push_worksheet(worksheet);

        let mut state = SheetState::default();
        if options.width_col_default > 0.0 {
            state.width_col_default = Some(options.width_col_default);
        }
        self.l_sheet_states.push(state);
        self.n_idx_sheet_current = Some(self.l_sheet_states.len() - 1);
        debug!("added worksheet '{sheet_name}'");
        Ok(())
    }

    /// Set all four page margins to one value (inches).
    pub fn set_margins_all(&mut self, all: f64) -> Result<(), SheetError> {
        self.set_margins(all, all, all, all)
    }

    /// Set mirrored left/right and top/bottom page margins (inches).
    pub fn set_margins_mirrored(
        &mut self,
        left_right: f64,
        top_bottom: f64,
    ) -> Result<(), SheetError> {
        self.set_margins(left_right, left_right, top_bottom, top_bottom)
    }

    /// Set individual page margins (inches).
    pub fn set_margins(
        &mut self,
        left: f64,
        right: f64,
        top: f64,
        bottom: f64,
    ) -> Result<(), SheetError> {
        // Negative header/footer values leave the engine defaults untouched.
        self.worksheet_current()?
            .set_margins(left, right, top, bottom, -1.0, -1.0);
        Ok(())
    }

    /// Set sheet default styles: font size and family, vertical centering,
    /// and text wrapping (wrapping is always on, not configurable).
    ///
    /// The engine has no mutable all-cells style, so the defaults are merged
    /// under every subsequent cell write on this sheet.
    pub fn set_default_styles(
        &mut self,
        font_size: f64,
        font_family: &str,
    ) -> Result<(), SheetError> {
        let state = self.state_current_mut()?;
        state.default_styles = Some(SheetDefaultStyles {
            font_size,
            font_family: font_family.to_string(),
        });
        Ok(())
    }

    /// Set header text for one or more of its three sections.
    ///
    /// `None` or whitespace-only text is a no-op for that section only; a
    /// previously set section keeps its value. See
    /// [`derive_header_footer_markup`](crate::util::derive_header_footer_markup)
    /// for font-size/color markup.
    pub fn set_header_text(
        &mut self,
        left: Option<&str>,
        center: Option<&str>,
        right: Option<&str>,
    ) -> Result<(), SheetError> {
        let state = self.state_current_mut()?;
        apply_section_slots(&mut state.header_slots, left, center, right);
        let txt_header = derive_section_string(&state.header_slots);
        self.worksheet_current()?.set_header(&txt_header);
        Ok(())
    }

    /// Set footer text for one or more of its three sections; same per-slot
    /// no-op rules as [`Self::set_header_text`].
    pub fn set_footer_text(
        &mut self,
        left: Option<&str>,
        center: Option<&str>,
        right: Option<&str>,
    ) -> Result<(), SheetError> {
        let state = self.state_current_mut()?;
        apply_section_slots(&mut state.footer_slots, left, center, right);
        let txt_footer = derive_section_string(&state.footer_slots);
        self.worksheet_current()?.set_footer(&txt_footer);
        Ok(())
    }

    /// Set one worksheet column width; `col` is 1-based.
    pub fn set_column_width(&mut self, col: u16, width: f64) -> Result<(), SheetError> {
        let n_col = cast_col_index(col)?;
        self.state_current_mut()?.set_cols_width_explicit.insert(n_col);
        self.worksheet_current()?.set_column_width(n_col, width)?;
        Ok(())
    }

    /// Set widths for columns 1..=N positionally.
    pub fn set_column_widths(&mut self, widths: &[f64]) -> Result<(), SheetError> {
        for (n_idx, width) in widths.iter().enumerate() {
            self.set_column_width(n_idx as u16 + 1, *width)?;
        }
        Ok(())
    }

    /// Freeze the given count of leading rows and columns.
    pub fn freeze_panes(&mut self, rows: u32, columns: u16) -> Result<(), SheetError> {
        self.worksheet_current()?.set_freeze_panes(rows, columns)?;
        Ok(())
    }

    /// Repeat heading rows on every printed page; 1-based inclusive.
    pub fn set_repeating_print_rows(
        &mut self,
        row_start: u32,
        row_end: u32,
    ) -> Result<(), SheetError> {
        let n_row_start = cast_row_index(row_start)?;
        let n_row_end = cast_row_index(row_end)?;
        self.worksheet_current()?
            .set_repeat_rows(n_row_start, n_row_end)?;
        Ok(())
    }

    // #endregion
    ////////////////////////////////////////////////////////////////////////////
    // #region CellWrites

    /// Write one cell to the current worksheet; 1-based coordinates.
    pub fn write_cell(
        &mut self,
        row: u32,
        col: u16,
        cell: &SpecSheetCell,
    ) -> Result<(), SheetError> {
        let n_row = cast_row_index(row)?;
        let n_col = cast_col_index(col)?;
        let edges = if cell.all_borders {
            BorderEdges::ALL
        } else {
            BorderEdges::NONE
        };
        let format = derive_cell_format(cell, self.state_current()?.default_styles.as_ref(), edges);
        apply_cell_content(self.worksheet_current()?, n_row, n_col, cell, &format)?;
        self.track_extent(n_row, n_col)?;
        Ok(())
    }

    /// Write a rectangular range to the current worksheet.
    ///
    /// With `if_merge` the rectangle is unioned into one merged cell and the
    /// value is written exactly once, to the top-left anchor. Without it the
    /// block is formatted uniformly (outer boundary border, shared fill and
    /// alignment) while only the anchor receives the value; distinct per-cell
    /// values in an unmerged block are written with [`Self::write_cell`].
    pub fn write_range(
        &mut self,
        range: &SpecCellRange,
        cell: &SpecSheetCell,
    ) -> Result<(), SheetError> {
        let n_row_from = cast_row_index(range.row_from)?;
        let n_col_from = cast_col_index(range.col_from)?;
        let n_row_to = cast_row_index(range.row_to)?;
        let n_col_to = cast_col_index(range.col_to)?;
        let default_styles = self.state_current()?.default_styles.clone();

        if range.if_merge {
            let edges = if cell.all_borders {
                BorderEdges::ALL
            } else {
                BorderEdges::NONE
            };
            let format = derive_cell_format(cell, default_styles.as_ref(), edges);
            let worksheet = self.worksheet_current()?;
            if let (None, EnumCellValue::Text(txt)) = (&cell.formula, &cell.value) {
                worksheet.merge_range(n_row_from, n_col_from, n_row_to, n_col_to, txt, &format)?;
            } else {
                // Non-text anchor content: merge blank, then overwrite the
                // anchor with the typed write.
                worksheet.merge_range(n_row_from, n_col_from, n_row_to, n_col_to, "", &format)?;
                if cell.formula.is_some() || !matches!(cell.value, EnumCellValue::None) {
                    apply_cell_content(worksheet, n_row_from, n_col_from, cell, &format)?;
                }
            }
        } else {
            for n_row in n_row_from..=n_row_to {
                for n_col in n_col_from..=n_col_to {
                    let edges = if cell.all_borders {
                        BorderEdges {
                            top: n_row == n_row_from,
                            bottom: n_row == n_row_to,
                            left: n_col == n_col_from,
                            right: n_col == n_col_to,
                        }
                    } else {
                        BorderEdges::NONE
                    };
                    let format = derive_cell_format(cell, default_styles.as_ref(), edges);
                    let worksheet = self.worksheet_current()?;
                    if n_row == n_row_from && n_col == n_col_from {
                        apply_cell_content(worksheet, n_row, n_col, cell, &format)?;
                    } else {
                        worksheet.write_blank(n_row, n_col, &format)?;
                    }
                }
            }
        }

        self.track_extent(n_row_to, n_col_to)?;
        Ok(())
    }

    // #endregion
    ////////////////////////////////////////////////////////////////////////////
    // #region Serialization

    /// Finalize the workbook and return the serialized package bytes.
    ///
    /// Sheets are optionally converted to formatted tables (workbook option);
    /// a workbook with zero sheets receives the no-data placeholder sheet so
    /// the output is never an invalid zero-sheet package.
    pub fn serialize(&mut self) -> Result<Vec<u8>, SheetError> {
        if self.options.if_format_tables {
            self.apply_sheet_tables()?;
        }
        if self.l_sheet_states.is_empty() {
            self.add_placeholder_sheet()?;
        }
        self.apply_default_column_widths()?;

        debug!("serializing workbook with {} sheet(s)", self.sheet_count());
        Ok(self.workbook.save_to_buffer()?)
    }

    /// Add the fixed no-data banner sheet.
    fn add_placeholder_sheet(&mut self) -> Result<(), SheetError> {
        self.add_sheet(TXT_NO_SHEETS_MESSAGE, &SpecSheetOptions::default())?;
        self.write_range(
            &SpecCellRange::single_row(1, 1, N_NO_SHEETS_END_COL).merged(),
            &SpecSheetCell {
                value: EnumCellValue::text(TXT_NO_SHEETS_MESSAGE),
                all_borders: true,
                bold: true,
                bg_color: Some("yellow".to_string()),
                font_size: Some(N_NO_SHEETS_FONT_SIZE),
                align_horizontal: EnumAlignHorizontal::Center,
                ..Default::default()
            },
        )
    }

    /// Convert each occupied sheet extent into an engine table.
    fn apply_sheet_tables(&mut self) -> Result<(), SheetError> {
        for n_idx in 0..self.l_sheet_states.len() {
            let (n_row_last, n_col_last) = {
                let state = &self.l_sheet_states[n_idx];
                match (state.n_row_last, state.n_col_last) {
                    (Some(n_row), Some(n_col)) => (n_row, n_col),
                    _ => continue,
                }
            };
            self.workbook
                .worksheet_from_index(n_idx)?
                .add_table(0, 0, n_row_last, n_col_last, &Table::new())?;
        }
        Ok(())
    }

    /// Apply recorded default column widths to the occupied extent, skipping
    /// columns that were given an explicit width.
    fn apply_default_column_widths(&mut self) -> Result<(), SheetError> {
        for n_idx in 0..self.l_sheet_states.len() {
            let (width, n_col_last, set_explicit) = {
                let state = &self.l_sheet_states[n_idx];
                let Some(width) = state.width_col_default else {
                    continue;
                };
                let Some(n_col_last) = state.n_col_last else {
                    continue;
                };
                (width, n_col_last, state.set_cols_width_explicit.clone())
            };
            let worksheet = self.workbook.worksheet_from_index(n_idx)?;
            for n_col in 0..=n_col_last {
                if !set_explicit.contains(&n_col) {
                    worksheet.set_column_width(n_col, width)?;
                }
            }
        }
        Ok(())
    }

    // #endregion
    ////////////////////////////////////////////////////////////////////////////

    fn state_current(&self) -> Result<&SheetState, SheetError> {
        let n_idx = self.n_idx_sheet_current.ok_or(SheetError::NoActiveSheet)?;
        Ok(&self.l_sheet_states[n_idx])
    }

    fn state_current_mut(&mut self) -> Result<&mut SheetState, SheetError> {
        let n_idx = self.n_idx_sheet_current.ok_or(SheetError::NoActiveSheet)?;
        Ok(&mut self.l_sheet_states[n_idx])
    }

    fn worksheet_current(&mut self) -> Result<&mut Worksheet, SheetError> {
        let n_idx = self.n_idx_sheet_current.ok_or(SheetError::NoActiveSheet)?;
        Ok(self.workbook.worksheet_from_index(n_idx)?)
    }

    fn track_extent(&mut self, n_row: u32, n_col: u16) -> Result<(), SheetError> {
        let state = self.state_current_mut()?;
        state.n_row_last = Some(state.n_row_last.map_or(n_row, |n| n.max(n_row)));
        state.n_col_last = Some(state.n_col_last.map_or(n_col, |n| n.max(n_col)));
        Ok(())
    }
}

/// Convert a 1-based row index to the engine's 0-based index.
fn cast_row_index(row: u32) -> Result<u32, SheetError> {
    if row == 0 || row > N_NROWS_EXCEL_MAX {
        return Err(SheetError::IndexOutOfRange(format!("row {row}")));
    }
    Ok(row - 1)
}

/// Convert a 1-based column index to the engine's 0-based index.
fn cast_col_index(col: u16) -> Result<u16, SheetError> {
    if col == 0 || col > N_NCOLS_EXCEL_MAX {
        return Err(SheetError::IndexOutOfRange(format!("column {col}")));
    }
    Ok(col - 1)
}

/// Overwrite the non-blank incoming section slots, then leave the rest.
fn apply_section_slots(
    slots: &mut [Option<String>; 3],
    left: Option<&str>,
    center: Option<&str>,
    right: Option<&str>,
) {
    for (slot, incoming) in slots.iter_mut().zip([left, center, right]) {
        if let Some(txt) = incoming
            && !txt.trim().is_empty()
        {
            *slot = Some(txt.to_string());
        }
    }
}

/// Compose the engine's `&L…&C…&R…` header/footer string from section slots.
fn derive_section_string(slots: &[Option<String>; 3]) -> String {
    let mut txt_sections = String::new();
    for (marker, slot) in ["&L", "&C", "&R"].iter().zip(slots) {
        if let Some(txt) = slot {
            txt_sections.push_str(marker);
            txt_sections.push_str(txt);
        }
    }
    txt_sections
}

/// Resolve one cell description into an engine format.
///
/// Sheet default styles are merged first so explicit cell attributes win.
/// Unset attributes are never written, leaving the worksheet/engine default
/// in place; `bold` and the number format are unconditional.
fn derive_cell_format(
    cell: &SpecSheetCell,
    default_styles: Option<&SheetDefaultStyles>,
    edges: BorderEdges,
) -> Format {
    let mut format = Format::new();

    if let Some(defaults) = default_styles {
        format = format
            .set_font_name(&defaults.font_family)
            .set_font_size(defaults.font_size)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap();
    }

    if cell.bold {
        format = format.set_bold();
    }

    if edges.top {
        format = format.set_border_top(FormatBorder::Thin);
    }
    if edges.bottom {
        format = format.set_border_bottom(FormatBorder::Thin);
    }
    if edges.left {
        format = format.set_border_left(FormatBorder::Thin);
    }
    if edges.right {
        format = format.set_border_right(FormatBorder::Thin);
    }

    if let Some(color) = &cell.bg_color {
        format = format.set_background_color(format!("#{}", derive_hex_color_code(color)).as_str());
    }
    if let Some(color) = &cell.font_color {
        format = format.set_font_color(format!("#{}", derive_hex_color_code(color)).as_str());
    }

    if let Some(font_size) = cell.font_size
        && font_size > N_FONT_SIZE_MIN
    {
        format = format.set_font_size(font_size);
    }

    match cell.align_horizontal {
        EnumAlignHorizontal::Default => {}
        EnumAlignHorizontal::Left => format = format.set_align(FormatAlign::Left),
        EnumAlignHorizontal::Center => format = format.set_align(FormatAlign::Center),
        EnumAlignHorizontal::Right => format = format.set_align(FormatAlign::Right),
    }
    match cell.align_vertical {
        EnumAlignVertical::Default => {}
        EnumAlignVertical::Top => format = format.set_align(FormatAlign::Top),
        EnumAlignVertical::Center => format = format.set_align(FormatAlign::VerticalCenter),
        EnumAlignVertical::Bottom => format = format.set_align(FormatAlign::Bottom),
    }

    let txt_num_format = cell
        .number_format
        .as_deref()
        .filter(|txt| !txt.trim().is_empty())
        .unwrap_or(FMT_TEXT);
    format.set_num_format(txt_num_format)
}

/// Write one cell's content with its resolved format. A non-blank formula
/// takes precedence over the literal value.
fn apply_cell_content(
    worksheet: &mut Worksheet,
    n_row: u32,
    n_col: u16,
    cell: &SpecSheetCell,
    format: &Format,
) -> Result<(), SheetError> {
    if let Some(txt_formula) = cell.formula.as_deref().filter(|txt| !txt.trim().is_empty()) {
        worksheet.write_formula_with_format(n_row, n_col, Formula::new(txt_formula), format)?;
        return Ok(());
    }
    match &cell.value {
        EnumCellValue::None => {
            worksheet.write_blank(n_row, n_col, format)?;
        }
        EnumCellValue::Text(txt) => {
            worksheet.write_string_with_format(n_row, n_col, txt, format)?;
        }
        EnumCellValue::Number(val) => {
            worksheet.write_number_with_format(n_row, n_col, *val, format)?;
        }
        EnumCellValue::Date(datetime) => {
            worksheet.write_datetime_with_format(n_row, n_col, datetime, format)?;
        }
    }
    Ok(())
}
