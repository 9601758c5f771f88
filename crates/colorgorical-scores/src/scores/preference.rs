//! Pair preference (Schloss & Palmer 2011)

use crate::color::{Lab, Lch};
use crate::grid::GridCell;
use crate::tables::ScoreTables;

// Regression weights of the pair preference model. The intercept
// (-39.3888) only shifts every score and is left out.
const W_LIGHTNESS: f64 = 47.6133;
const W_HUE: f64 = -46.4222;
const W_COOLNESS: f64 = 75.1481;

// Normalization bounds from the regression fit. Lightness and hue are
// measured in Illuminant C Lab.
const LIGHTNESS_MAX: f64 = 63.3673;
const LIGHTNESS_MIN: f64 = 0.0;
const HUE_MAX: f64 = 179.266981384;
const HUE_MIN: f64 = 0.033547949;
const COOLNESS_MAX: f64 = 36.0;
const COOLNESS_MIN: f64 = 4.0;

/// Which computation [`pair_preference`] uses for a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairPreferencePath {
    /// Regression over lightness, hue and coolness differences.
    General,
    /// Direct lookup in the achromatic preference table; taken whenever
    /// either color is a neutral gray and hue is undefined.
    Achromatic,
}

impl PairPreferencePath {
    pub fn of(c1: GridCell, c2: GridCell) -> Self {
        if c1.is_achromatic() || c2.is_achromatic() {
            Self::Achromatic
        } else {
            Self::General
        }
    }
}

/// Aesthetic preference of a color pair; higher is more preferred.
///
/// Unbounded. Only comparisons between pairs are meaningful.
pub fn pair_preference(tables: &ScoreTables, c1: GridCell, c2: GridCell) -> f64 {
    match PairPreferencePath::of(c1, c2) {
        PairPreferencePath::Achromatic => {
            // the table is keyed by the chromatic color (or the first of two grays)
            if c1.is_achromatic() && !c2.is_achromatic() {
                tables.achromatic_preference(c2, c1)
            } else {
                tables.achromatic_preference(c1, c2)
            }
        }
        PairPreferencePath::General => general_preference(tables, c1, c2),
    }
}

fn general_preference(tables: &ScoreTables, c1: GridCell, c2: GridCell) -> f64 {
    let coolness = tables.coolness(c1) + tables.coolness(c2);

    let lch1 = illuminant_c_lch(c1);
    let lch2 = illuminant_c_lch(c2);

    let diff_l = (lch1.l - lch2.l).abs();
    // raw angle difference, not wrapped to 180°, as in the fitted model
    let diff_h = (lch1.h - lch2.h).abs();

    W_LIGHTNESS * normalize(diff_l, LIGHTNESS_MAX, LIGHTNESS_MIN)
        + W_HUE * normalize(diff_h, HUE_MAX, HUE_MIN)
        + W_COOLNESS * normalize(coolness, COOLNESS_MAX, COOLNESS_MIN)
}

/// LCh of a cell re-expressed under Illuminant C, the space the
/// regression was fitted in.
fn illuminant_c_lch(cell: GridCell) -> Lch {
    Lab::from(cell).d65_to_illuminant_c().to_lch()
}

#[inline]
fn normalize(d: f64, high: f64, low: f64) -> f64 {
    (d - low) / (high - low)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::synthetic;

    fn cell(l: i32, a: i32, b: i32) -> GridCell {
        GridCell::new(l, a, b).unwrap()
    }

    #[test]
    fn test_achromatic_path_is_taken_for_any_gray() {
        let gray = cell(50, 0, 0);
        let red = cell(50, 60, 40);
        assert_eq!(PairPreferencePath::of(gray, gray), PairPreferencePath::Achromatic);
        assert_eq!(PairPreferencePath::of(gray, red), PairPreferencePath::Achromatic);
        assert_eq!(PairPreferencePath::of(red, gray), PairPreferencePath::Achromatic);
        assert_eq!(PairPreferencePath::of(red, cell(50, 5, 0)), PairPreferencePath::General);
    }

    #[test]
    fn test_achromatic_lookup_keys() {
        let tables = synthetic();
        let gray = cell(65, 0, 0);
        let blue = cell(40, -30, 25);

        // the synthetic table holds index * 0.001
        let expected = blue.achromatic_index(gray) as f64 * 0.001;
        assert_eq!(pair_preference(&tables, blue, gray), expected);
        assert_eq!(pair_preference(&tables, gray, blue), expected);

        let dark = cell(20, 0, 0);
        assert_eq!(
            pair_preference(&tables, dark, gray),
            dark.achromatic_index(gray) as f64 * 0.001
        );
        assert_eq!(
            pair_preference(&tables, gray, dark),
            gray.achromatic_index(dark) as f64 * 0.001
        );
    }

    #[test]
    fn test_general_preference_by_hand() {
        let tables = synthetic();
        let c1 = cell(30, 40, 20);
        let c2 = cell(70, -20, 50);

        let lch1 = illuminant_c_lch(c1);
        let lch2 = illuminant_c_lch(c2);
        // synthetic coolness is L / 10
        let cool = 3.0 + 7.0;
        let expected = 47.6133 * ((lch1.l - lch2.l).abs() / 63.3673)
            - 46.4222 * (((lch1.h - lch2.h).abs() - 0.033547949) / (179.266981384 - 0.033547949))
            + 75.1481 * ((cool - 4.0) / 32.0);

        let pp = pair_preference(&tables, c1, c2);
        assert!((pp - expected).abs() < 1e-9, "{pp} vs {expected}");
        assert_eq!(pair_preference(&tables, c2, c1), pp);
    }

    #[test]
    fn test_general_preference_ignores_achromatic_table() {
        let mut parts = crate::tables::synthetic_parts();
        parts.achromatic_preference.iter_mut().for_each(|v| *v = f64::NAN);
        let tables = ScoreTables::new(parts).unwrap();

        let pp = pair_preference(&tables, cell(50, 10, 10), cell(60, -10, 30));
        assert!(pp.is_finite());
    }
}
