//! Stateless helpers: cell addressing, formula composition, colors, and
//! header/footer markup.

use crate::conf::TXT_HEADER_FOOTER_FONT;

////////////////////////////////////////////////////////////////////////////////
// #region CellAddressing

/// Column letters for a 1-based column index: 1 -> "A", 27 -> "AA".
pub fn derive_column_letters(col: u16) -> String {
    let mut n_remaining = col as u32;
    let mut txt_letters = String::new();
    while n_remaining > 0 {
        let n_digit = (n_remaining - 1) % 26;
        txt_letters.insert(0, (b'A' + n_digit as u8) as char);
        n_remaining = (n_remaining - 1) / 26;
    }
    txt_letters
}

/// Engine-native address for a 1-based coordinate: (1, 1) -> "A1".
pub fn derive_cell_address(row: u32, col: u16) -> String {
    format!("{}{}", derive_column_letters(col), row)
}

/// `SUM` formula text over one column: e.g. `SUM(A1:A4)`.
pub fn derive_column_sum_formula(row_start: u32, row_end: u32, col: u16) -> String {
    format!(
        "SUM({}:{})",
        derive_cell_address(row_start, col),
        derive_cell_address(row_end, col)
    )
}

/// `SUM` formula text over one row: e.g. `SUM(B4:H4)`.
pub fn derive_row_sum_formula(col_start: u16, col_end: u16, row: u32) -> String {
    format!(
        "SUM({}:{})",
        derive_cell_address(row, col_start),
        derive_cell_address(row, col_end)
    )
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ColorResolution

/// Resolve an HTML color name or `#RRGGBB`/`RRGGBB` code to a six-digit
/// uppercase hex code. Unrecognized input falls back to black (`000000`).
pub fn derive_hex_color_code(color: &str) -> String {
    let txt_color = color.trim();

    let txt_hex = txt_color.strip_prefix('#').unwrap_or(txt_color);
    if txt_hex.len() == 6 && txt_hex.chars().all(|chr| chr.is_ascii_hexdigit()) {
        return txt_hex.to_ascii_uppercase();
    }

    match txt_color.to_ascii_lowercase().as_str() {
        "white" => "FFFFFF",
        "black" => "000000",
        "red" => "FF0000",
        "green" => "008000",
        "blue" => "0000FF",
        "yellow" => "FFFF00",
        "orange" => "FFA500",
        "gray" | "grey" => "808080",
        "lightgray" | "lightgrey" => "D3D3D3",
        "lightblue" => "ADD8E6",
        _ => "000000",
    }
    .to_string()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region HeaderFooterMarkup

/// Header/footer section markup embedding font size, the fixed font
/// family/weight, a color code, and the text.
///
/// `color` is an HTML name or hex code; unrecognized names resolve to black.
pub fn derive_header_footer_markup(font_size: u16, text: &str, color: &str) -> String {
    format!(
        "&{}{}&K{}{}",
        font_size,
        TXT_HEADER_FOOTER_FONT,
        derive_hex_color_code(color),
        text
    )
}

/// Standard `Page X of Y` header/footer markup at the given font size.
pub fn derive_page_number_markup(font_size: u16) -> String {
    format!("&{font_size}Page &P of &N")
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
