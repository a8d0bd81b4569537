//! End-to-end writer tests: serialize a workbook, unzip the buffer, and
//! assert on the package parts. The engine is write-only, so verification
//! reads the OOXML parts directly.

use std::io::{Cursor, Read};

use pretty_assertions::assert_eq;

use sheetkit_xlsx::{
    EnumAlignHorizontal, EnumCellValue, FMT_TWO_DECIMAL, SheetError, SpecCellRange, SpecSheetCell,
    SpecSheetOptions, SpecWorkbookOptions, TXT_NO_SHEETS_MESSAGE, XlsxWriter,
};

/// Read one named part of the serialized package as text.
fn read_part(v_bytes: &[u8], part_name: &str) -> String {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(v_bytes)).expect("output is not a zip package");
    let mut part = archive.by_name(part_name).expect("missing package part");
    let mut txt_part = String::new();
    part.read_to_string(&mut txt_part).expect("non-utf8 part");
    txt_part
}

fn part_exists(v_bytes: &[u8], part_name: &str) -> bool {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(v_bytes)).expect("output is not a zip package");
    archive.by_name(part_name).is_ok()
}

#[test]
fn serialize_without_sheets_adds_placeholder_banner_sheet() {
    let mut writer = XlsxWriter::new();

    let v_bytes = writer.serialize().unwrap();

    let txt_workbook = read_part(&v_bytes, "xl/workbook.xml");
    assert_eq!(
        txt_workbook.matches("<sheet ").count(),
        1,
        "placeholder workbook must hold exactly one sheet"
    );
    assert!(txt_workbook.contains(&format!("name=\"{TXT_NO_SHEETS_MESSAGE}\"")));

    // one merged banner spanning columns A..T, value held once at the anchor
    let txt_sheet = read_part(&v_bytes, "xl/worksheets/sheet1.xml");
    assert!(txt_sheet.contains("<mergeCell ref=\"A1:T1\"/>"));
    assert_eq!(txt_sheet.matches("<v>").count(), 1);

    let txt_strings = read_part(&v_bytes, "xl/sharedStrings.xml");
    assert!(txt_strings.contains(TXT_NO_SHEETS_MESSAGE));
}

#[test]
fn merged_range_writes_value_exactly_once_at_anchor() {
    let mut writer = XlsxWriter::new();
    writer.add_sheet("merged", &SpecSheetOptions::default()).unwrap();
    writer
        .write_range(
            &SpecCellRange::new(2, 1, 4, 8).merged(),
            &SpecSheetCell {
                value: EnumCellValue::text("merged text"),
                all_borders: true,
                ..Default::default()
            },
        )
        .unwrap();

    let v_bytes = writer.serialize().unwrap();

    let txt_sheet = read_part(&v_bytes, "xl/worksheets/sheet1.xml");
    assert!(txt_sheet.contains("<mergeCell ref=\"A2:H4\"/>"));
    assert_eq!(
        txt_sheet.matches("<v>").count(),
        1,
        "only the anchor cell may hold the merged value"
    );
}

#[test]
fn number_format_string_passes_through_unchanged() {
    let mut writer = XlsxWriter::new();
    writer.add_sheet("fmt", &SpecSheetOptions::default()).unwrap();
    writer
        .write_cell(
            1,
            1,
            &SpecSheetCell {
                value: EnumCellValue::Number(1000.0),
                number_format: Some(FMT_TWO_DECIMAL.to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    writer
        .write_cell(
            1,
            2,
            &SpecSheetCell {
                value: EnumCellValue::Number(-2.5),
                number_format: Some("#,##0.00;[Red](#,##0.00)".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    let v_bytes = writer.serialize().unwrap();

    let txt_styles = read_part(&v_bytes, "xl/styles.xml");
    assert!(txt_styles.contains("formatCode=\"#,##0.00\""));
    assert!(txt_styles.contains("formatCode=\"#,##0.00;[Red](#,##0.00)\""));
}

#[test]
fn unset_background_leaves_fill_untouched_and_set_background_fills_solid() {
    let mut writer = XlsxWriter::new();
    writer.add_sheet("fills", &SpecSheetOptions::default()).unwrap();
    writer
        .write_cell(
            1,
            1,
            &SpecSheetCell {
                value: EnumCellValue::text("plain"),
                ..Default::default()
            },
        )
        .unwrap();
    let v_bytes = writer.serialize().unwrap();
    let txt_styles = read_part(&v_bytes, "xl/styles.xml");
    assert!(
        !txt_styles.contains("solid"),
        "unset background must not produce a solid fill"
    );

    let mut writer = XlsxWriter::new();
    writer.add_sheet("fills", &SpecSheetOptions::default()).unwrap();
    writer
        .write_cell(
            1,
            1,
            &SpecSheetCell {
                value: EnumCellValue::text("red"),
                bg_color: Some("red".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    let v_bytes = writer.serialize().unwrap();
    let txt_styles = read_part(&v_bytes, "xl/styles.xml");
    assert!(txt_styles.contains("patternType=\"solid\""));
    assert!(txt_styles.contains("FF0000"));
}

#[test]
fn font_size_at_or_below_threshold_is_ignored() {
    let mut writer = XlsxWriter::new();
    writer.add_sheet("fonts", &SpecSheetOptions::default()).unwrap();
    writer.set_default_styles(9.0, "Arial").unwrap();
    writer
        .write_cell(
            1,
            1,
            &SpecSheetCell {
                value: EnumCellValue::text("tiny request"),
                font_size: Some(3.0),
                ..Default::default()
            },
        )
        .unwrap();
    writer
        .write_cell(
            1,
            2,
            &SpecSheetCell {
                value: EnumCellValue::text("large request"),
                font_size: Some(20.0),
                ..Default::default()
            },
        )
        .unwrap();

    let v_bytes = writer.serialize().unwrap();

    let txt_styles = read_part(&v_bytes, "xl/styles.xml");
    assert!(
        !txt_styles.contains("<sz val=\"3\"/>"),
        "sizes at or below the minimum threshold must not be written"
    );
    assert!(txt_styles.contains("<sz val=\"9\"/>"), "sheet default size applies");
    assert!(txt_styles.contains("<sz val=\"20\"/>"));
}

#[test]
fn blank_header_slot_preserves_previously_set_sections() {
    let mut writer = XlsxWriter::new();
    writer.add_sheet("headers", &SpecSheetOptions::default()).unwrap();
    writer
        .set_header_text(Some("Left Part"), Some("Center Part"), None)
        .unwrap();
    // whitespace-only center and empty right are per-slot no-ops
    writer.set_header_text(None, Some("   "), Some("")).unwrap();
    writer
        .set_footer_text(None, Some("Footer Center"), None)
        .unwrap();

    let v_bytes = writer.serialize().unwrap();

    let txt_sheet = read_part(&v_bytes, "xl/worksheets/sheet1.xml");
    assert!(txt_sheet.contains("<oddHeader>"));
    assert!(txt_sheet.contains("Left Part"));
    assert!(txt_sheet.contains("Center Part"));
    assert!(txt_sheet.contains("Footer Center"));
}

#[test]
fn formula_takes_precedence_over_literal_value() {
    let mut writer = XlsxWriter::new();
    writer.add_sheet("formulas", &SpecSheetOptions::default()).unwrap();
    writer
        .write_cell(
            1,
            1,
            &SpecSheetCell {
                value: EnumCellValue::Number(1.0),
                formula: Some("SUM(A2:B2)".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    let v_bytes = writer.serialize().unwrap();

    let txt_sheet = read_part(&v_bytes, "xl/worksheets/sheet1.xml");
    assert!(txt_sheet.contains("<f>SUM(A2:B2)</f>"));
}

#[test]
fn unmerged_block_draws_outer_border_without_merging() {
    let mut writer = XlsxWriter::new();
    writer.add_sheet("blocks", &SpecSheetOptions::default()).unwrap();
    writer
        .write_range(
            &SpecCellRange::new(1, 1, 3, 3),
            &SpecSheetCell {
                all_borders: true,
                bg_color: Some("lightgray".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    let v_bytes = writer.serialize().unwrap();

    let txt_sheet = read_part(&v_bytes, "xl/worksheets/sheet1.xml");
    assert!(
        !txt_sheet.contains("<mergeCell"),
        "unmerged block write must not union cells"
    );
    // 3x3 block: every cell carries a style, none carries a value
    assert_eq!(txt_sheet.matches("<c r=").count(), 9);
    assert_eq!(txt_sheet.matches("<v>").count(), 0);

    // the interior cell style has no borders; corner styles do
    let txt_styles = read_part(&v_bytes, "xl/styles.xml");
    assert!(txt_styles.contains("patternType=\"solid\""));
    assert!(txt_styles.contains("<border><left style=\"thin\""));
}

#[test]
fn freeze_panes_and_repeat_rows_reach_the_package() {
    let mut writer = XlsxWriter::new();
    writer.add_sheet("layout", &SpecSheetOptions::default()).unwrap();
    writer
        .write_cell(
            1,
            1,
            &SpecSheetCell {
                value: EnumCellValue::text("heading"),
                ..Default::default()
            },
        )
        .unwrap();
    writer.freeze_panes(1, 2).unwrap();
    writer.set_repeating_print_rows(1, 1).unwrap();

    let v_bytes = writer.serialize().unwrap();

    let txt_sheet = read_part(&v_bytes, "xl/worksheets/sheet1.xml");
    assert!(txt_sheet.contains("state=\"frozen\""));

    let txt_workbook = read_part(&v_bytes, "xl/workbook.xml");
    assert!(txt_workbook.contains("_xlnm.Print_Titles"));
}

#[test]
fn default_column_width_covers_occupied_extent() {
    let mut writer = XlsxWriter::new();
    writer
        .add_sheet(
            "widths",
            &SpecSheetOptions {
                width_col_default: 4.0,
                ..Default::default()
            },
        )
        .unwrap();
    writer.set_column_width(2, 13.0).unwrap();
    for col in 1..=3u16 {
        writer
            .write_cell(
                1,
                col,
                &SpecSheetCell {
                    value: EnumCellValue::text("x"),
                    ..Default::default()
                },
            )
            .unwrap();
    }

    let v_bytes = writer.serialize().unwrap();

    let txt_sheet = read_part(&v_bytes, "xl/worksheets/sheet1.xml");
    assert!(txt_sheet.contains("<cols>"));
    // columns 1 and 3 get the default width; column 2 keeps its explicit one
    assert_eq!(txt_sheet.matches("<col ").count(), 3);
}

#[test]
fn format_tables_option_emits_a_table_part() {
    let mut writer = XlsxWriter::with_options(SpecWorkbookOptions {
        if_format_tables: true,
    });
    writer.add_sheet("table", &SpecSheetOptions::default()).unwrap();
    for row in 1..=3u32 {
        for col in 1..=2u16 {
            writer
                .write_cell(
                    row,
                    col,
                    &SpecSheetCell {
                        value: EnumCellValue::text(format!("r{row}c{col}")),
                        ..Default::default()
                    },
                )
                .unwrap();
        }
    }

    let v_bytes = writer.serialize().unwrap();

    assert!(part_exists(&v_bytes, "xl/tables/table1.xml"));
}

#[test]
fn duplicate_sheet_name_surfaces_as_engine_error() {
    let mut writer = XlsxWriter::new();
    writer.add_sheet("twice", &SpecSheetOptions::default()).unwrap();
    writer.add_sheet("twice", &SpecSheetOptions::default()).unwrap();

    // the engine reports the clash when the package is assembled
    let result = writer.serialize();
    assert!(matches!(result, Err(SheetError::Engine(_))));
}

#[test]
fn illegal_sheet_name_fails_at_creation() {
    let mut writer = XlsxWriter::new();
    let result = writer.add_sheet("bad[name]", &SpecSheetOptions::default());
    assert!(matches!(result, Err(SheetError::Engine(_))));
}
