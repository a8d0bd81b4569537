//! sheetkit-demo - writes two demonstration workbooks: a small mixed-content
//! sheet and a multi-sheet work report.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sheetkit_xlsx::{
    EnumCellValue, ExcelDateTime, FMT_DATE, FMT_TEXT, FMT_TWO_DECIMAL, SpecCellRange,
    SpecSheetCell, SpecSheetOptions, TXT_FONT_FAMILY_DEFAULT, XlsxWriter,
    derive_header_footer_markup, derive_page_number_markup,
};

use sheetkit_reports::WorkReport;
use sheetkit_reports::curtailment::{
    L_PROJECT_HEADINGS, N_COL_AVAIL, N_COL_REASON, N_COL_SHIFT_LENGTH, N_COL_SHIFT_NAME,
};

const N_SHEETS: usize = 5;
const N_REQUESTS_PER_SHEET: usize = 20;

#[derive(Parser)]
#[command(name = "sheetkit-demo")]
#[command(author, version, about = "Write demonstration XLSX workbooks")]
struct Cli {
    /// Directory the workbooks are written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Seed for the generated report data
    #[arg(short, long, default_value = "42")]
    seed: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let clock = Instant::now();

    create_simple_report(&cli)?;
    create_work_report(&cli)?;

    println!("run time: {:.3} seconds", clock.elapsed().as_secs_f64());
    Ok(())
}

fn create_simple_report(cli: &Cli) -> Result<()> {
    let mut writer = XlsxWriter::new();
    writer.add_sheet(
        "Sheet name",
        &SpecSheetOptions {
            width_col_default: 4.0,
            if_page_layout_view: true,
            ..Default::default()
        },
    )?;
    writer.set_default_styles(9.0, TXT_FONT_FAMILY_DEFAULT)?;
    writer.set_header_text(
        Some(&derive_header_footer_markup(10, "Left", "black")),
        Some(&derive_header_footer_markup(20, "Center", "black")),
        Some("Right"),
    )?;
    writer.set_footer_text(None, Some(&derive_page_number_markup(8)), None)?;
    writer.set_margins_mirrored(0.25, 0.75)?;

    writer.write_cell(
        1,
        1,
        &SpecSheetCell {
            all_borders: true,
            bold: true,
            value: EnumCellValue::text("text    "),
            ..Default::default()
        },
    )?;
    writer.write_cell(
        1,
        2,
        &SpecSheetCell {
            all_borders: true,
            bold: true,
            value: EnumCellValue::Number(1000.0),
            number_format: Some(FMT_TWO_DECIMAL.to_string()),
            ..Default::default()
        },
    )?;
    writer.write_cell(
        1,
        3,
        &SpecSheetCell {
            all_borders: true,
            bold: true,
            value: EnumCellValue::Date(cast_excel_date(Local::now().date_naive())?),
            number_format: Some(FMT_DATE.to_string()),
            ..Default::default()
        },
    )?;
    writer.write_range(
        &SpecCellRange::new(2, 1, 4, 8).merged(),
        &SpecSheetCell {
            all_borders: true,
            bold: true,
            value: EnumCellValue::text("merged cell"),
            number_format: Some(FMT_TEXT.to_string()),
            ..Default::default()
        },
    )?;

    write_workbook(&mut writer, cli, "sheetkit-demo-simple.xlsx")
}

fn create_work_report(cli: &Cli) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(cli.seed);
    let mut report = WorkReport::new(
        NaiveDate::from_ymd_opt(2016, 12, 24).context("bad period start")?,
        NaiveDate::from_ymd_opt(2017, 1, 2).context("bad period end")?,
        &mut rng,
    );

    let mut writer = XlsxWriter::new();
    for n_idx_sheet in 0..N_SHEETS {
        let txt_sheet_name = format!("Project {n_idx_sheet:04}");
        writer.add_sheet(
            &txt_sheet_name,
            &SpecSheetOptions {
                if_page_layout_view: true,
                ..Default::default()
            },
        )?;
        writer.set_default_styles(9.0, TXT_FONT_FAMILY_DEFAULT)?;
        writer.set_header_text(
            None,
            Some(&derive_header_footer_markup(20, &txt_sheet_name, "black")),
            Some(&derive_page_number_markup(8)),
        )?;
        writer.set_margins_mirrored(0.25, 0.75)?;

        writer.set_column_width(N_COL_AVAIL, 13.0)?;
        writer.set_column_width(N_COL_REASON, 27.0)?;
        writer.set_column_width(N_COL_SHIFT_LENGTH, 8.0)?;
        writer.set_column_width(N_COL_SHIFT_NAME, 8.0)?;

        let n_col_hours_start = L_PROJECT_HEADINGS.len() as u16 + 1;
        for n_idx_day in 0..report.period().day_count() {
            writer.set_column_width(n_col_hours_start + n_idx_day as u16, 5.0)?;
        }

        report.write_project_heading_row(&mut writer, 1)?;
        report.write_request_data(&mut writer, 2, n_col_hours_start, N_REQUESTS_PER_SHEET)?;
    }

    write_workbook(&mut writer, cli, "sheetkit-demo-work.xlsx")
}

/// Convert a calendar date to the engine's date type.
fn cast_excel_date(date: NaiveDate) -> Result<ExcelDateTime> {
    let n_year = u16::try_from(date.year())
        .with_context(|| format!("year {} is outside the XLSX date range", date.year()))?;
    Ok(ExcelDateTime::from_ymd(
        n_year,
        date.month() as u8,
        date.day() as u8,
    )?)
}

fn write_workbook(writer: &mut XlsxWriter, cli: &Cli, file_name: &str) -> Result<()> {
    let v_bytes = writer.serialize()?;
    let path = cli.out_dir.join(file_name);
    std::fs::write(&path, &v_bytes)
        .with_context(|| format!("Failed to write '{}'", path.display()))?;
    eprintln!("wrote {} ({} bytes)", path.display(), v_bytes.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_excel_date_accepts_calendar_dates() {
        let date = NaiveDate::from_ymd_opt(2017, 1, 2).unwrap();
        assert!(cast_excel_date(date).is_ok());
    }

    #[test]
    fn test_cast_excel_date_rejects_years_past_the_xlsx_range() {
        let date = NaiveDate::from_ymd_opt(70_000, 1, 1).unwrap();
        assert!(cast_excel_date(date).is_err());
    }
}
