//! Work report: scheduled-work hours per project over a reporting period,
//! drawn from pre-generated value queues so every sheet of a batch pulls
//! from the same stream.

use std::collections::VecDeque;

use chrono::NaiveDate;
use log::debug;
use rand::Rng;
use rand::rngs::StdRng;
use sheetkit_xlsx::{
    EnumAlignHorizontal, EnumCellValue, FMT_TWO_DECIMAL, FMT_WHOLE_NUMBER, SheetError,
    SpecCellRange, SpecSheetCell, XlsxWriter, derive_cell_address, derive_column_sum_formula,
    derive_row_sum_formula,
};

use crate::curtailment::{L_PROJECT_HEADINGS, L_SHIFT_NAMES, N_COL_SHIFT_NAME, N_COL_START};
use crate::period::{SpecReportPeriod, derive_report_period};

/// Shift-length hours queue length; enough for a full report batch.
const N_QUEUE_HOURS_LEN: usize = 1_000;
/// People-count queue length.
const N_QUEUE_PEOPLE_LEN: usize = 10_000;

/// Work report builder: one reporting period plus the value queues the
/// request rows consume.
#[derive(Debug, Clone)]
pub struct WorkReport {
    period: SpecReportPeriod,
    q_hours: VecDeque<u32>,
    q_people: VecDeque<u32>,
}

impl WorkReport {
    /// Build the period and fill the value queues from `rng`.
    pub fn new(date_start: NaiveDate, date_end: NaiveDate, rng: &mut StdRng) -> Self {
        let report = Self {
            period: derive_report_period(date_start, date_end),
            q_hours: generate_distinct_run_values(rng, N_QUEUE_HOURS_LEN, 1, 4),
            q_people: generate_distinct_run_values(rng, N_QUEUE_PEOPLE_LEN, 0, 8),
        };
        debug!(
            "work report period of {} day(s), {} hour and {} people values queued",
            report.period.day_count(),
            report.q_hours.len(),
            report.q_people.len()
        );
        report
    }

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

    /// Write one block per work request, consuming the value queues, then
    /// the worksheet subtotal rows. Freezes the heading rows and the
    /// caption columns first.
    pub fn write_request_data(
        &mut self,
        writer: &mut XlsxWriter,
        row_start: u32,
        col_hours_start: u16,
        n_requests: usize,
    ) -> Result<(), SheetError> {
        let n_col_last = self.derive_last_column(col_hours_start);
        writer.freeze_panes(1, n_col_last)?;

        let mut n_row = row_start;
        for _ in 0..n_requests {
            writer.write_range(
                &SpecCellRange::single_row(n_row, N_COL_START, col_hours_start - 1).merged(),
                &SpecSheetCell {
                    bg_color: Some("lightgray".to_string()),
                    all_borders: true,
                    ..Default::default()
                },
            )?;

            for (n_idx, cell_day) in self.period.l_day_cells.iter().enumerate() {
                writer.write_cell(n_row, col_hours_start + n_idx as u16, cell_day)?;
            }

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

            // merged data cells spanning the three shift rows; the shift
            // length comes off the hours queue
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
                        value: EnumCellValue::Number(self.next_hours() as f64),
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
                    let n_people = self.next_people();
                    writer.write_cell(
                        n_row_current,
                        N_COL_SHIFT_NAME + 1 + n_idx_day as u16,
                        &SpecSheetCell {
                            all_borders: true,
                            value: if n_people > 0 {
                                EnumCellValue::Number(n_people as f64)
                            } else {
                                EnumCellValue::None
                            },
                            number_format: Some(FMT_WHOLE_NUMBER.to_string()),
                            ..Default::default()
                        },
                    )?;
                }

                // hours subtotal: scheduled people times the shift length
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

    /// Next shift length; the queue wraps if a batch outruns it.
    fn next_hours(&mut self) -> u32 {
        let n_val = self.q_hours.pop_front().unwrap_or(1);
        self.q_hours.push_back(n_val);
        n_val
    }

    /// Next people count; the queue wraps if a batch outruns it.
    fn next_people(&mut self) -> u32 {
        let n_val = self.q_people.pop_front().unwrap_or(0);
        self.q_people.push_back(n_val);
        n_val
    }
}

/// Fill a queue with `n_times` draws from `n_min..n_max` where no two
/// consecutive values repeat.
///
/// A single-value range cannot satisfy the no-repeat rule; it yields that
/// value `n_times` over.
pub fn generate_distinct_run_values(
    rng: &mut StdRng,
    n_times: usize,
    n_min: u32,
    n_max: u32,
) -> VecDeque<u32> {
    if n_min + 1 == n_max {
        return std::iter::repeat(n_min).take(n_times).collect();
    }

    let mut q_values = VecDeque::with_capacity(n_times);
    let mut n_val = 0u32;
    for _ in 0..n_times {
        let mut n_tmp = n_val;
        while n_tmp == n_val {
            n_tmp = rng.gen_range(n_min..n_max);
        }
        n_val = n_tmp;
        q_values.push_back(n_val);
    }
    q_values
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use sheetkit_xlsx::SpecSheetOptions;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_generate_distinct_run_values_has_no_consecutive_repeats() {
        let mut rng = StdRng::seed_from_u64(42);
        let q_values = generate_distinct_run_values(&mut rng, 500, 0, 8);

        assert_eq!(q_values.len(), 500);
        for pair in q_values.iter().zip(q_values.iter().skip(1)) {
            assert_ne!(pair.0, pair.1);
        }
    }

    #[test]
    fn test_generate_distinct_run_values_respects_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let q_values = generate_distinct_run_values(&mut rng, 500, 1, 4);

        assert!(q_values.iter().all(|n_val| (1..4).contains(n_val)));
    }

    #[test]
    fn test_generate_distinct_run_values_single_value_range_repeats_it() {
        let mut rng = StdRng::seed_from_u64(42);
        let q_values = generate_distinct_run_values(&mut rng, 50, 3, 4);

        assert_eq!(q_values.len(), 50);
        assert!(q_values.iter().all(|n_val| *n_val == 3));
    }

    #[test]
    fn test_generate_distinct_run_values_is_deterministic_per_seed() {
        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);

        assert_eq!(
            generate_distinct_run_values(&mut rng_a, 100, 0, 8),
            generate_distinct_run_values(&mut rng_b, 100, 0, 8),
        );
    }

    #[test]
    fn test_write_request_data_builds_a_serializable_sheet() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut report = WorkReport::new(date(2016, 12, 24), date(2017, 1, 2), &mut rng);
        let mut writer = XlsxWriter::new();
        writer.add_sheet("work", &SpecSheetOptions::default()).unwrap();

        let n_col_hours_start = L_PROJECT_HEADINGS.len() as u16 + 1;
        report.write_project_heading_row(&mut writer, 1).unwrap();
        report
            .write_request_data(&mut writer, 2, n_col_hours_start, 4)
            .unwrap();

        assert!(writer.serialize().is_ok());
    }
}
