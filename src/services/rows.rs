//! Plain-text batch files: one row per line, comma-separated numbers.
//!
//! Blank lines and lines starting with `#` are skipped. Output uses the same
//! layout, with empty fields for padding slots.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RowsError {
    #[error("line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid number {value:?}")]
    InvalidNumber { line: usize, value: String },
}

/// Parse rows of exactly `W` numbers.
pub fn parse_rows<const W: usize>(text: &str) -> Result<Vec<[f64; W]>, RowsError> {
    let mut rows = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != W {
            return Err(RowsError::ColumnCount {
                line: line_no,
                expected: W,
                found: fields.len(),
            });
        }

        let mut row = [0.0; W];
        for (slot, field) in row.iter_mut().zip(&fields) {
            *slot = field.parse().map_err(|_| RowsError::InvalidNumber {
                line: line_no,
                value: field.to_string(),
            })?;
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Format rows as comma-separated lines; NaN becomes an empty field.
pub fn format_rows<const W: usize>(rows: &[[f64; W]]) -> String {
    let mut out = String::new();
    for row in rows {
        let fields: Vec<String> = row
            .iter()
            .map(|v| if v.is_nan() { String::new() } else { v.to_string() })
            .collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}
