//! Region penalty for disliked hue bands

use crate::grid::GridCell;
use crate::tables::ScoreTables;

/// Multiplicative penalty for hue and lightness regions people tend to
/// dislike, looked up through the cell's tabulated hue.
///
/// First match wins:
///
/// | hue (°)        | lightness | penalty |
/// |----------------|-----------|---------|
/// | 70 ..= 115     | ≤ 75      | 0.8     |
/// | 70 ..= 115     | > 75      | 0.85    |
/// | 115 .. 138     | ≤ 45      | 0.75    |
/// | anything else  |           | 1.0     |
pub fn region_penalty(tables: &ScoreTables, cell: GridCell) -> f64 {
    let hue = tables.hue(cell);
    let l = cell.l() as f64;

    if (70.0..=115.0).contains(&hue) {
        if l <= 75.0 {
            0.8
        } else {
            0.85
        }
    } else if (115.0..138.0).contains(&hue) && l <= 45.0 {
        0.75
    } else {
        1.0
    }
}
