//! A1 notation helpers for the Sheets values API.

use crate::error::SheetError;

/// Column number to letters: 1 → `A`, 26 → `Z`, 27 → `AA`.
///
/// Returns `None` for column 0.
#[must_use]
pub fn column_letters(column: u32) -> Option<String> {
    if column == 0 {
        return None;
    }
    let mut n = column;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    Some(letters.iter().rev().collect())
}

/// Worksheet title quoted for use in a range, with embedded quotes doubled.
#[must_use]
pub fn quote_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// Single-cell range, e.g. `'Sheet1'!C4`.
pub fn cell_range(title: &str, row: u32, column: u32) -> Result<String, SheetError> {
    if row == 0 {
        return Err(SheetError::InvalidCoordinate { row, column });
    }
    let letters = column_letters(column).ok_or(SheetError::InvalidCoordinate { row, column })?;
    Ok(format!("{}!{letters}{row}", quote_title(title)))
}

/// Whole-column range, e.g. `'Sheet1'!E:E`.
pub fn column_range(title: &str, column: u32) -> Result<String, SheetError> {
    let letters =
        column_letters(column).ok_or(SheetError::InvalidCoordinate { row: 0, column })?;
    Ok(format!("{}!{letters}:{letters}", quote_title(title)))
}
