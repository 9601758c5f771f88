//! Read-only lookup tables behind the name and preference scores
//!
//! [`ScoreTables`] is built once from raw [`TableParts`] and then shared
//! (usually in an `Arc`) by every scoring call. All size and index checks
//! happen in [`ScoreTables::new`]: once a value exists, every lookup
//! through a [`GridCell`] is in bounds.
//!
//! The raw naming-study counts use `-1` for "never observed". That sentinel
//! is decoded into [`TermCount::Unobserved`] here and nowhere else.

mod loader;

pub use loader::TableLoader;

use std::path::PathBuf;

use crate::grid::{GridCell, ACHROMATIC_TABLE_LEN, GRID_CELLS};

/// Size of the color-name term vocabulary.
pub const TERMS: usize = 153;

/// Error type for constructing or loading [`ScoreTables`].
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("failed to read table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("table {path} is {len} bytes, not a multiple of {element_size}")]
    Truncated {
        path: PathBuf,
        len: u64,
        element_size: usize,
    },

    #[error("table {table} has {actual} entries, expected {expected}")]
    SizeMismatch {
        table: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("grid cell {cell} maps to name index {name_index}, but only {names} names exist")]
    NameIndexOutOfRange {
        cell: usize,
        name_index: i64,
        names: usize,
    },

    #[error("table {table} holds invalid value {value} at position {position}")]
    InvalidValue {
        table: &'static str,
        position: usize,
        value: i64,
    },
}

/// Frequency of one color-name term for one named color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TermCount {
    Observed(u32),
    #[default]
    Unobserved,
}

impl TermCount {
    /// Raw sentinel for a term that was never used for a color.
    pub const UNOBSERVED_SENTINEL: i32 = -1;

    /// Decode a raw table value, `None` for negative values other than the sentinel.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            Self::UNOBSERVED_SENTINEL => Some(Self::Unobserved),
            n if n >= 0 => Some(Self::Observed(n as u32)),
            _ => None,
        }
    }

    /// Encode back into the on-disk representation.
    pub fn to_raw(self) -> i32 {
        match self {
            Self::Observed(n) => n as i32,
            Self::Unobserved => Self::UNOBSERVED_SENTINEL,
        }
    }

    /// The count as a number, with unobserved terms counting as zero.
    #[inline]
    pub fn value(self) -> f64 {
        match self {
            Self::Observed(n) => n as f64,
            Self::Unobserved => 0.0,
        }
    }
}

/// Raw table contents as produced by a loader, before validation.
///
/// Layouts:
///
/// - `color_name_index`: one name index per grid cell
/// - `name_terms`: `names × 153` term counts, row per name, `-1` = unobserved
/// - `name_totals`: one total count per name
/// - `hue_chroma`: `(chroma, hue°)` per grid cell, interleaved
/// - `coolness`: one coolness score per grid cell
/// - `achromatic_preference`: [`ACHROMATIC_TABLE_LEN`] entries, see
///   [`GridCell::achromatic_index`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableParts {
    pub color_name_index: Vec<i32>,
    pub name_terms: Vec<i32>,
    pub name_totals: Vec<i32>,
    pub hue_chroma: Vec<f64>,
    pub coolness: Vec<f64>,
    pub achromatic_preference: Vec<f64>,
}

/// Validated, immutable lookup tables.
#[derive(Debug, Clone)]
pub struct ScoreTables {
    color_name_index: Vec<u32>,
    name_terms: Vec<TermCount>,
    name_totals: Vec<u32>,
    hue_chroma: Vec<[f64; 2]>,
    coolness: Vec<f64>,
    achromatic_preference: Vec<f64>,
}

impl ScoreTables {
    /// Validate raw tables and take ownership of them.
    ///
    /// The number of named colors is taken from `name_totals`; every other
    /// table must agree with it and with the grid dimensions.
    pub fn new(parts: TableParts) -> Result<Self, TableError> {
        let names = parts.name_totals.len();

        expect_len("color_name_index", GRID_CELLS, parts.color_name_index.len())?;
        expect_len("name_terms", names * TERMS, parts.name_terms.len())?;
        expect_len("hue_chroma", GRID_CELLS * 2, parts.hue_chroma.len())?;
        expect_len("coolness", GRID_CELLS, parts.coolness.len())?;
        expect_len(
            "achromatic_preference",
            ACHROMATIC_TABLE_LEN,
            parts.achromatic_preference.len(),
        )?;

        let color_name_index = parts
            .color_name_index
            .iter()
            .enumerate()
            .map(|(cell, &raw)| {
                if raw < 0 || raw as usize >= names {
                    Err(TableError::NameIndexOutOfRange {
                        cell,
                        name_index: raw as i64,
                        names,
                    })
                } else {
                    Ok(raw as u32)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let name_terms = parts
            .name_terms
            .iter()
            .enumerate()
            .map(|(position, &raw)| {
                TermCount::from_raw(raw).ok_or(TableError::InvalidValue {
                    table: "name_terms",
                    position,
                    value: raw as i64,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let name_totals = parts
            .name_totals
            .iter()
            .enumerate()
            .map(|(position, &raw)| {
                u32::try_from(raw).map_err(|_| TableError::InvalidValue {
                    table: "name_totals",
                    position,
                    value: raw as i64,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let hue_chroma = parts
            .hue_chroma
            .chunks_exact(2)
            .map(|pair| [pair[0], pair[1]])
            .collect();

        tracing::debug!(
            names,
            grid_cells = GRID_CELLS,
            achromatic_entries = ACHROMATIC_TABLE_LEN,
            "Score tables validated"
        );

        Ok(Self {
            color_name_index,
            name_terms,
            name_totals,
            hue_chroma,
            coolness: parts.coolness,
            achromatic_preference: parts.achromatic_preference,
        })
    }

    /// Number of distinct named colors.
    pub fn names(&self) -> usize {
        self.name_totals.len()
    }

    /// Color-name index of a grid cell.
    #[inline]
    pub fn name_index(&self, cell: GridCell) -> usize {
        self.color_name_index[cell.index()] as usize
    }

    /// Term counts of a named color, one per term.
    ///
    /// # Panics
    ///
    /// Panics if `name_index >= self.names()`. Indices obtained from
    /// [`name_index`](Self::name_index) are always valid.
    #[inline]
    pub fn term_counts(&self, name_index: usize) -> &[TermCount] {
        &self.name_terms[name_index * TERMS..(name_index + 1) * TERMS]
    }

    /// Total observation count of a named color.
    #[inline]
    pub fn name_total(&self, name_index: usize) -> u32 {
        self.name_totals[name_index]
    }

    #[inline]
    pub fn chroma(&self, cell: GridCell) -> f64 {
        self.hue_chroma[cell.index()][0]
    }

    /// Hue angle of a grid cell in degrees.
    #[inline]
    pub fn hue(&self, cell: GridCell) -> f64 {
        self.hue_chroma[cell.index()][1]
    }

    #[inline]
    pub fn coolness(&self, cell: GridCell) -> f64 {
        self.coolness[cell.index()]
    }

    /// Precomputed preference of `chromatic` paired with a gray of the
    /// lightness of `achromatic`.
    #[inline]
    pub fn achromatic_preference(&self, chromatic: GridCell, achromatic: GridCell) -> f64 {
        self.achromatic_preference[chromatic.achromatic_index(achromatic)]
    }

    /// Convert back to raw parts, for writing the tables to disk.
    pub fn to_parts(&self) -> TableParts {
        TableParts {
            color_name_index: self.color_name_index.iter().map(|&i| i as i32).collect(),
            name_terms: self.name_terms.iter().map(|t| t.to_raw()).collect(),
            name_totals: self.name_totals.iter().map(|&t| t as i32).collect(),
            hue_chroma: self.hue_chroma.as_flattened().to_vec(),
            coolness: self.coolness.clone(),
            achromatic_preference: self.achromatic_preference.clone(),
        }
    }
}

fn expect_len(table: &'static str, expected: usize, actual: usize) -> Result<(), TableError> {
    if expected != actual {
        return Err(TableError::SizeMismatch {
            table,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Small synthetic tables for unit tests.
///
/// Five named colors, one per lightness band of 25 (L = 100 shares the
/// last band):
///
/// | name | terms                      | total |
/// |------|----------------------------|-------|
/// | 0    | term 0 only (10)           | 10    |
/// | 1    | terms 0..4, 5 each         | 20    |
/// | 2    | terms 0..16, 2 each        | 32    |
/// | 3    | terms 0 and 1, 6 and 2     | 8     |
/// | 4    | nothing observed           | 0     |
///
/// Name 4 is only reachable through L = 100, which keeps the zero-mass
/// case out of the way of most tests. Hue and chroma are the true LCh
/// values of each cell, coolness is `L / 10`, and the achromatic table
/// holds `index * 0.001`.
///
/// The root crate's `tests/common/fixtures.rs` builds the same tables for
/// the integration tests; change both together.
#[cfg(test)]
pub(crate) fn synthetic() -> ScoreTables {
    synthetic_parts().try_into().unwrap()
}

#[cfg(test)]
pub(crate) fn synthetic_parts() -> TableParts {
    let names = 5;
    let mut name_terms = vec![TermCount::UNOBSERVED_SENTINEL; names * TERMS];
    name_terms[0] = 10;
    for t in 0..4 {
        name_terms[TERMS + t] = 5;
    }
    for t in 0..16 {
        name_terms[2 * TERMS + t] = 2;
    }
    name_terms[3 * TERMS] = 6;
    name_terms[3 * TERMS + 1] = 2;

    let mut color_name_index = Vec::with_capacity(GRID_CELLS);
    let mut hue_chroma = Vec::with_capacity(GRID_CELLS * 2);
    let mut coolness = Vec::with_capacity(GRID_CELLS);
    for cell in GridCell::all() {
        color_name_index.push(cell.l() / 25);
        let lch = cell.to_lab().to_lch();
        hue_chroma.push(lch.c);
        hue_chroma.push(lch.h);
        coolness.push(cell.l() as f64 / 10.0);
    }

    TableParts {
        color_name_index,
        name_terms,
        name_totals: vec![10, 20, 32, 8, 0],
        hue_chroma,
        coolness,
        achromatic_preference: (0..ACHROMATIC_TABLE_LEN).map(|i| i as f64 * 0.001).collect(),
    }
}

impl TryFrom<TableParts> for ScoreTables {
    type Error = TableError;

    fn try_from(parts: TableParts) -> Result<Self, Self::Error> {
        Self::new(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_count_sentinel() {
        assert_eq!(TermCount::from_raw(-1), Some(TermCount::Unobserved));
        assert_eq!(TermCount::from_raw(0), Some(TermCount::Observed(0)));
        assert_eq!(TermCount::from_raw(42), Some(TermCount::Observed(42)));
        assert_eq!(TermCount::from_raw(-2), None);

        assert_eq!(TermCount::Unobserved.value(), 0.0);
        assert_eq!(TermCount::Observed(7).value(), 7.0);
        assert_eq!(TermCount::Unobserved.to_raw(), -1);
    }

    #[test]
    fn test_synthetic_tables_validate() {
        let tables = synthetic();
        assert_eq!(tables.names(), 5);

        let cell = GridCell::new(30, 20, -10).unwrap();
        assert_eq!(tables.name_index(cell), 1);
        assert_eq!(tables.name_total(1), 20);
        assert_eq!(tables.term_counts(1).len(), TERMS);
        assert_eq!(tables.term_counts(1)[3], TermCount::Observed(5));
        assert_eq!(tables.term_counts(1)[4], TermCount::Unobserved);
        assert_eq!(tables.coolness(cell), 3.0);
        assert!((tables.chroma(cell) - 500f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_wrong_sizes_are_rejected() {
        let mut parts = synthetic_parts();
        parts.coolness.pop();
        assert!(matches!(
            ScoreTables::new(parts),
            Err(TableError::SizeMismatch {
                table: "coolness",
                expected: GRID_CELLS,
                ..
            })
        ));

        let mut parts = synthetic_parts();
        parts.name_terms.push(0);
        assert!(matches!(
            ScoreTables::new(parts),
            Err(TableError::SizeMismatch {
                table: "name_terms",
                ..
            })
        ));

        let mut parts = synthetic_parts();
        parts.achromatic_preference.truncate(GRID_CELLS);
        assert!(matches!(
            ScoreTables::new(parts),
            Err(TableError::SizeMismatch {
                table: "achromatic_preference",
                expected: ACHROMATIC_TABLE_LEN,
                actual: GRID_CELLS,
            })
        ));
    }

    #[test]
    fn test_name_index_out_of_range_is_rejected() {
        let mut parts = synthetic_parts();
        parts.color_name_index[17] = 5;
        let err = ScoreTables::new(parts).unwrap_err();
        assert!(matches!(
            err,
            TableError::NameIndexOutOfRange {
                cell: 17,
                name_index: 5,
                names: 5,
            }
        ));
        assert_eq!(
            err.to_string(),
            "grid cell 17 maps to name index 5, but only 5 names exist"
        );

        let mut parts = synthetic_parts();
        parts.color_name_index[0] = -1;
        assert!(ScoreTables::new(parts).is_err());
    }

    #[test]
    fn test_invalid_counts_are_rejected() {
        let mut parts = synthetic_parts();
        parts.name_terms[TERMS + 2] = -7;
        assert!(matches!(
            ScoreTables::new(parts),
            Err(TableError::InvalidValue {
                table: "name_terms",
                position,
                value: -7,
            }) if position == TERMS + 2
        ));

        let mut parts = synthetic_parts();
        parts.name_totals[2] = -1;
        assert!(matches!(
            ScoreTables::new(parts),
            Err(TableError::InvalidValue {
                table: "name_totals",
                position: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_to_parts_preserves_contents() {
        let parts = synthetic_parts();
        let tables = ScoreTables::new(parts.clone()).unwrap();
        assert_eq!(tables.to_parts(), parts);
    }

    #[test]
    fn test_tables_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ScoreTables>();
    }
}
