//! Curtailment report: per-project overtime curtailment requests laid out
//! over a reporting period, with per-shift rows and SUM subtotals.

use chrono::NaiveDate;
use rand::Rng;
use rand::rngs::StdRng;
use sheetkit_xlsx::{
    EnumAlignHorizontal, EnumCellValue, FMT_TWO_DECIMAL, FMT_WHOLE_NUMBER, SheetError,
    SpecCellRange, SpecSheetCell, XlsxWriter, derive_cell_address, derive_column_sum_formula,
    derive_row_sum_formula,
};

use crate::period::{SpecReportPeriod, derive_report_period};

/// First report column.
pub const N_COL_START: u16 = 1;
/// Availability / work item column.
pub const N_COL_AVAIL: u16 = 2;
/// Reason column.
pub const N_COL_REASON: u16 = 3;
/// Shift length column.
pub const N_COL_SHIFT_LENGTH: u16 = 5;
/// Shift name column; day columns start directly after.
pub const N_COL_SHIFT_NAME: u16 = 6;

/// Shift names, one report row each per request.
pub const L_SHIFT_NAMES: [&str; 3] = ["DAY", "SWING", "GRAVE"];

/// Project heading row captions.
pub const L_PROJECT_HEADINGS: [&str; 6] = [
    "PROJECT/DEPT",
    "AVAILABILITY / WORK ITEM",
    "REASON",
    "SHOP / TRADE / CODE",
    "SHIFT LENGTH (Hours)",
    "SHIFT",
];

/// Summary sheet captions.
pub const L_SUMMARY_HEADINGS: [&str; 5] = [
    "Project/Dept",
    "Total Work Hours",
    "Total Man Days",
    "Comment",
    "DH ConcurredBy",
];

/// Curtailment report builder for one reporting period.
#[derive(Debug, Clone)]
pub struct CurtailmentReport {
    period: SpecReportPeriod,
}

impl CurtailmentReport {
    /// Build the report period from an inclusive date range.
    pub fn new(date_start: NaiveDate, date_end: NaiveDate) -> Self {
        Self {
            period: derive_report_period(date_start, date_end),
        }
    }

    /// Day headings for the period.
    pub fn period(&self) -> &SpecReportPeriod {
        &self.period
    }

    /// Last report column: the per-row totals column after the day columns.
    pub fn derive_last_column(&self, col_hours_start: u16) -> u16 {
        col_hours_start + self.period.day_count() as u16
    }

    /// Write the project heading row: captions, day names, totals caption.
    pub fn write_project_heading_row(
        &self,
        writer: &mut XlsxWriter,
        row: u32,
    ) -> Result<(), SheetError> {
        let cell_base = SpecSheetCell {
            all_borders: true,
            bold: true,
            align_horizontal: EnumAlignHorizontal::Center,
            ..Default::default()
        };

        for (n_idx, txt_heading) in L_PROJECT_HEADINGS.iter().enumerate() {
            let cell = SpecSheetCell {
                value: EnumCellValue::text(*txt_heading),
                ..cell_base.clone()
            };
            writer.write_cell(row, n_idx as u16 + 1, &cell)?;
        }

        let mut n_col = L_PROJECT_HEADINGS.len() as u16 + 1;
        for txt_day in &self.period.l_day_names {
            let cell = SpecSheetCell {
                value: EnumCellValue::text(txt_day.clone()),
                ..cell_base.clone()
            };
            writer.write_cell(row, n_col, &cell)?;
            n_col += 1;
        }

        let cell = SpecSheetCell {
            value: EnumCellValue::text("Total Hours"),
            ..cell_base
        };
        writer.write_cell(row, n_col, &cell)
    }

    /// Write the summary sheet heading row.
    pub fn write_summary_heading_row(
        &self,
        writer: &mut XlsxWriter,
        row: u32,
    ) -> Result<(), SheetError> {
        for (n_idx, txt_heading) in L_SUMMARY_HEADINGS.iter().enumerate() {
            writer.write_cell(
                row,
                n_idx as u16 + 1,
                &SpecSheetCell {
                    value: EnumCellValue::text(*txt_heading),
                    all_borders: true,
                    bold: true,
                    align_horizontal: EnumAlignHorizontal::Center,
                    ..Default::default()
                },
            )?;
        }
        Ok(())
    }

    /// Write one request block per request: a gray project block, the day
    /// heading cells, per-shift curtailment rows with subtotal formulas, and
    /// the worksheet subtotal rows.
    pub fn write_request_data(
        &self,
        writer: &mut XlsxWriter,
        row_start: u32,
        col_hours_start: u16,
        n_requests: usize,
        rng: &mut StdRng,
    ) -> Result<(), SheetError> {
        let n_col_last = self.derive_last_column(col_hours_start);
        let mut n_row = row_start;

        for _ in 0..n_requests {
            // unmerged gray block in front of the day columns
            writer.write_range(
                &SpecCellRange::single_row(n_row, N_COL_START, col_hours_start - 1),
                &SpecSheetCell {
                    bg_color: Some("lightgray".to_string()),
                    all_borders: true,
                    ..Default::default()
                },
            )?;

            // curtailment days of month
            for (n_idx, cell_day) in self.period.l_day_cells.iter().enumerate() {
                writer.write_cell(n_row, col_hours_start + n_idx as u16, cell_day)?;
            }

            // empty summary column; SUM formulas land here in later rows
            writer.write_cell(
                n_row,
                n_col_last,
                &SpecSheetCell {
                    all_borders: true,
                    bg_color: Some("lightgray".to_string()),
                    ..Default::default()
                },
            )?;

            n_row += 1;

            // merged data cells spanning the three shift rows
            for n_col in N_COL_START..N_COL_SHIFT_NAME {
                let cell = if n_col != N_COL_SHIFT_NAME - 1 {
                    SpecSheetCell {
                        all_borders: true,
                        value: EnumCellValue::text("test"),
                        ..Default::default()
                    }
                } else {
                    SpecSheetCell {
                        all_borders: true,
                        value: EnumCellValue::Number(8.0),
                        number_format: Some(FMT_TWO_DECIMAL.to_string()),
                        ..Default::default()
                    }
                };
                writer.write_range(
                    &SpecCellRange::new(n_row, n_col, n_row + 2, n_col).merged(),
                    &cell,
                )?;
            }

            for (n_idx_shift, txt_shift) in L_SHIFT_NAMES.iter().enumerate() {
                let n_row_current = n_row + n_idx_shift as u32;
                writer.write_cell(
                    n_row_current,
                    N_COL_SHIFT_NAME,
                    &SpecSheetCell {
                        all_borders: true,
                        value: EnumCellValue::text(*txt_shift),
                        ..Default::default()
                    },
                )?;

                for n_idx_day in 0..self.period.day_count() {
                    let n_curtailed = rng.gen_range(0..2);
                    writer.write_cell(
                        n_row_current,
                        N_COL_SHIFT_NAME + 1 + n_idx_day as u16,
                        &SpecSheetCell {
                            all_borders: true,
                            value: if n_curtailed > 0 {
                                EnumCellValue::Number(n_curtailed as f64)
                            } else {
                                EnumCellValue::None
                            },
                            number_format: Some(FMT_WHOLE_NUMBER.to_string()),
                            ..Default::default()
                        },
                    )?;
                }

                // hours subtotal: curtailed days times the shift length
                writer.write_cell(
                    n_row_current,
                    n_col_last,
                    &SpecSheetCell {
                        all_borders: true,
                        formula: Some(format!(
                            "{}*{}",
                            derive_row_sum_formula(col_hours_start, n_col_last - 1, n_row_current),
                            derive_cell_address(n_row_current, col_hours_start - 2),
                        )),
                        number_format: Some(FMT_TWO_DECIMAL.to_string()),
                        ..Default::default()
                    },
                )?;
            }
            n_row += 3;
        }

        self.write_subtotal_rows(writer, n_row, n_col_last)
    }

    /// Worksheet subtotal rows: per-day people totals and the work hour sum.
    fn write_subtotal_rows(
        &self,
        writer: &mut XlsxWriter,
        row: u32,
        n_col_last: u16,
    ) -> Result<(), SheetError> {
        let mut n_row = row;

        writer.write_range(
            &SpecCellRange::single_row(n_row, N_COL_START, N_COL_SHIFT_NAME).merged(),
            &SpecSheetCell {
                all_borders: true,
                bg_color: Some("lightgray".to_string()),
                bold: true,
                align_horizontal: EnumAlignHorizontal::Right,
                value: EnumCellValue::text("Total People"),
                ..Default::default()
            },
        )?;

        for n_idx_day in 0..self.period.day_count() {
            let n_col = N_COL_SHIFT_NAME + 1 + n_idx_day as u16;
            writer.write_cell(
                n_row,
                n_col,
                &SpecSheetCell {
                    all_borders: true,
                    bg_color: Some("lightgray".to_string()),
                    bold: true,
                    formula: Some(derive_column_sum_formula(1, n_row - 1, n_col)),
                    number_format: Some(FMT_WHOLE_NUMBER.to_string()),
                    ..Default::default()
                },
            )?;
        }
        writer.write_cell(
            n_row,
            n_col_last,
            &SpecSheetCell {
                bg_color: Some("lightgray".to_string()),
                all_borders: true,
                ..Default::default()
            },
        )?;

        n_row += 1;

        writer.write_range(
            &SpecCellRange::single_row(n_row, N_COL_START, n_col_last - 1).merged(),
            &SpecSheetCell {
                all_borders: true,
                bg_color: Some("lightgray".to_string()),
                bold: true,
                align_horizontal: EnumAlignHorizontal::Right,
                value: EnumCellValue::text("Total Work Hours"),
                ..Default::default()
            },
        )?;

        writer.write_cell(
            n_row,
            n_col_last,
            &SpecSheetCell {
                all_borders: true,
                bg_color: Some("lightgray".to_string()),
                bold: true,
                formula: Some(derive_column_sum_formula(1, n_row - 1, n_col_last)),
                number_format: Some(FMT_TWO_DECIMAL.to_string()),
                ..Default::default()
            },
        )?;

        Ok(())
    }
}
