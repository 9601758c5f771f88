#![allow(clippy::excessive_precision, clippy::manual_range_contains)]

//! colorgorical-scores: perceptual and aesthetic scores for color pairs
//!
//! This library scores pairs (and single colors) of CIE Lab colors for
//! palette design. It does not decide which palettes are good: it computes
//! the numbers a palette search compares.
//!
//! # Quick Start
//!
//! ```no_run
//! use colorgorical_scores::{Scorer, TableLoader};
//!
//! let tables = TableLoader::new("data/tables").load()?;
//! let scorer = Scorer::new(&tables);
//!
//! // two colors per row: L1 a1 b1 L2 a2 b2
//! let rows = [[55.0, 80.0, 65.0, 60.0, -40.0, -35.0]];
//! let scores = scorer.score_pair_rows(&rows)?;
//! let [de, nd, pp, nu1, nu2, _] = scores[0];
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # The Scores
//!
//! | score                 | range      | source                         |
//! |-----------------------|------------|--------------------------------|
//! | perceptual distance   | `>= 0`     | CIEDE2000, closed form          |
//! | name difference       | `[0, 1]`   | color-name term tables          |
//! | name uniqueness       | `>= 0`     | color-name term tables          |
//! | pair preference       | unbounded  | regression + achromatic table   |
//! | region penalty        | `(0, 1]`   | hue/chroma table                |
//!
//! Name uniqueness is calibrated to at most 4.5 bits of naming entropy, which
//! holds for the published tables; a wider distribution scores above 1.
//!
//! # Color Science
//!
//! ## One working space, one study space
//!
//! Every input is CIE Lab characterized with Illuminant D65. The pair
//! preference regression (Schloss & Palmer 2011) was fitted in Lab under
//! Illuminant C, so its general path converts each color back to XYZ with
//! the D65 white and forward to Lab with the C white. No chromatic
//! adaptation transform is applied; the fitted model expects exactly this
//! relabeling.
//!
//! ## The grid
//!
//! The naming study and the preference tables sample Lab every 5 units,
//! giving 21 × 38 × 42 = 33 516 cells. Table-backed scores only accept a
//! [`GridCell`], which can only be constructed for on-grid, in-range
//! coordinates. Off-grid input is rejected rather than rounded, because a
//! rounded coordinate would silently read a different table row. Callers
//! that want rounding use [`Lab::snap_to_grid`] first.
//!
//! ## Neutral colors
//!
//! Hue is undefined at `a = b = 0`. CIEDE2000 handles this by zeroing the
//! hue difference, and pair preference switches to a precomputed
//! achromatic table whenever either color is gray
//! ([`PairPreferencePath::Achromatic`]).
//!
//! ## Tables
//!
//! [`ScoreTables`] is validated once at construction. After that, no
//! lookup can go out of bounds and no score needs to re-check the raw
//! `-1` "unobserved" sentinel of the naming counts, which is decoded into
//! [`TermCount`] at load time.

pub mod batch;
pub mod color;
pub mod grid;
pub mod scores;
pub mod tables;


pub use batch::{BatchError, PairRow, PenaltyRow, DEFAULT_PARALLEL_THRESHOLD, PAIR_WIDTH, PENALTY_WIDTH};
pub use color::{Lab, Lch, ParseColorError, Rgb8, WhitePoint, Xyz};
pub use grid::{GridCell, GridError, GRID_CELLS};
pub use scores::{
    ciede2000, name_difference, name_uniqueness, pair_preference, region_penalty,
    PairPreferencePath, ScoreError, Scorer,
};
pub use tables::{ScoreTables, TableError, TableLoader, TableParts, TermCount, TERMS};
