//! Reporting-period day headings shared by the report builders.

use chrono::{Datelike, NaiveDate, Weekday};
use sheetkit_xlsx::{EnumAlignHorizontal, EnumCellValue, SpecSheetCell};

/// Pre-built per-day heading cells for one reporting period.
#[derive(Debug, Clone)]
pub struct SpecReportPeriod {
    /// Two-letter uppercase day names, one per period day.
    pub l_day_names: Vec<String>,
    /// Styled day-of-month heading cells, one per period day.
    pub l_day_cells: Vec<SpecSheetCell>,
}

impl SpecReportPeriod {
    /// Number of days in the period (inclusive of both endpoints).
    pub fn day_count(&self) -> usize {
        self.l_day_cells.len()
    }
}

/// Build the day headings for an inclusive date range.
///
/// The 1st and 25th of a month are flagged red; other weekend days light
/// blue; everything else keeps the worksheet fill.
pub fn derive_report_period(date_start: NaiveDate, date_end: NaiveDate) -> SpecReportPeriod {
    let mut l_day_names = Vec::new();
    let mut l_day_cells = Vec::new();

    let mut date = date_start;
    while date <= date_end {
        l_day_names.push(derive_two_letter_day(date));

        let mut cell = SpecSheetCell {
            value: EnumCellValue::text(date.day().to_string()),
            all_borders: true,
            bold: true,
            align_horizontal: EnumAlignHorizontal::Center,
            ..Default::default()
        };
        if date.day() == 1 || date.day() == 25 {
            cell.bg_color = Some("red".to_string());
        } else if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            cell.bg_color = Some("lightblue".to_string());
        }
        l_day_cells.push(cell);

        let Some(date_next) = date.succ_opt() else {
            break;
        };
        date = date_next;
    }

    SpecReportPeriod {
        l_day_names,
        l_day_cells,
    }
}

/// Two-letter uppercase day name: e.g. Saturday -> "SA".
fn derive_two_letter_day(date: NaiveDate) -> String {
    let txt_day = format!("{}", date.format("%a"));
    txt_day.chars().take(2).collect::<String>().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_derive_report_period_covers_inclusive_range() {
        let period = derive_report_period(date(2016, 12, 24), date(2017, 1, 2));

        assert_eq!(period.day_count(), 10);
        assert_eq!(period.l_day_names.len(), 10);
        // 2016-12-24 was a Saturday
        assert_eq!(period.l_day_names[0], "SA");
        assert_eq!(period.l_day_names[1], "SU");
        assert_eq!(period.l_day_names[2], "MO");
    }

    #[test]
    fn test_derive_report_period_flags_first_of_month_red() {
        let period = derive_report_period(date(2016, 12, 24), date(2017, 1, 2));

        // 2017-01-01: day 1 wins over the weekend rule
        assert_eq!(period.l_day_cells[8].bg_color.as_deref(), Some("red"));
    }

    #[test]
    fn test_derive_report_period_flags_weekends_light_blue() {
        let period = derive_report_period(date(2016, 12, 24), date(2017, 1, 2));

        assert_eq!(period.l_day_cells[0].bg_color.as_deref(), Some("lightblue"));
        assert_eq!(period.l_day_cells[1].bg_color.as_deref(), Some("lightblue"));
        // 2016-12-26, a Monday, keeps the worksheet fill
        assert_eq!(period.l_day_cells[2].bg_color, None);
    }

    #[test]
    fn test_derive_report_period_single_day() {
        let period = derive_report_period(date(2017, 3, 25), date(2017, 3, 25));

        assert_eq!(period.day_count(), 1);
        assert_eq!(period.l_day_cells[0].bg_color.as_deref(), Some("red"));
    }
}
