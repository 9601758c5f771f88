//! Color-name based scores
//!
//! Both scores work on the term distribution of a color's named-color
//! entry (Heer & Stone 2012): how often each of the 153 terms was used to
//! name colors in that region of Lab space.

use crate::grid::GridCell;
use crate::tables::ScoreTables;

use super::ScoreError;

/// Lower calibration bound of the signed entropy sum, from the XKCD terms.
const MIN_ENTROPY: f64 = -4.5;
const MAX_ENTROPY: f64 = 0.0;

/// Hellinger-style distance between the term distributions of two colors.
///
/// `0` when both colors share a term distribution, approaching `1` when
/// they were never called by the same name.
pub fn name_difference(tables: &ScoreTables, c1: GridCell, c2: GridCell) -> Result<f64, ScoreError> {
    let n1 = tables.name_index(c1);
    let n2 = tables.name_index(c2);
    let total1 = observed_total(tables, n1)?;
    let total2 = observed_total(tables, n2)?;

    let overlap: f64 = tables
        .term_counts(n1)
        .iter()
        .zip(tables.term_counts(n2))
        .map(|(a, b)| (a.value() * b.value()).sqrt())
        .sum();
    let z = (total1 * total2).sqrt();

    Ok((1.0 - overlap / z).max(0.0).sqrt())
}

/// Normalized signed-entropy score of a color's term distribution.
///
/// The sum `H = Σ p·log2(p)` over observed terms is rescaled from
/// `[-4.5, 0]` to `[0, 1]` and inverted, so a color named with a single
/// term scores `0` and scores grow with the spread of names used.
///
/// The result stays in `[0, 1]` only while `H >= -4.5`, i.e. while a
/// distribution carries at most 4.5 bits. That holds for the published
/// naming tables; wider distributions score above 1 and are not clamped.
pub fn name_uniqueness(tables: &ScoreTables, cell: GridCell) -> Result<f64, ScoreError> {
    let name = tables.name_index(cell);
    let total = observed_total(tables, name)?;

    let h: f64 = tables
        .term_counts(name)
        .iter()
        .map(|count| count.value() / total)
        .filter(|&p| p > 0.0)
        .map(|p| p * p.log2())
        .sum();

    let normalized = (h - MIN_ENTROPY) / (MAX_ENTROPY - MIN_ENTROPY);
    Ok(1.0 - normalized)
}

fn observed_total(tables: &ScoreTables, name_index: usize) -> Result<f64, ScoreError> {
    match tables.name_total(name_index) {
        0 => Err(ScoreError::NoNameObservations { name_index }),
        total => Ok(total as f64),
    }
}
