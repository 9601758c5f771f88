//! The five scores and the [`Scorer`] facade
//!
//! Perceptual distance is a closed-form formula over any Lab color. The
//! other scores read [`ScoreTables`] and therefore take [`GridCell`]s, which
//! guarantees every table lookup is in bounds.

mod ciede2000;
mod error;
mod names;
mod penalty;
mod preference;

pub use ciede2000::ciede2000;
pub use error::ScoreError;
pub use names::{name_difference, name_uniqueness};
pub use penalty::region_penalty;
pub use preference::{pair_preference, PairPreferencePath};

use crate::batch::DEFAULT_PARALLEL_THRESHOLD;
use crate::color::Lab;
use crate::grid::GridCell;
use crate::tables::ScoreTables;

/// Scores colors against a borrowed set of tables.
///
/// Cheap to construct and `Copy`; hold the tables in an `Arc` and create a
/// `Scorer` wherever one is needed.
///
/// # Example
///
/// ```no_run
/// use colorgorical_scores::{GridCell, Scorer, TableLoader};
///
/// let tables = TableLoader::new("data/tables").load()?;
/// let scorer = Scorer::new(&tables);
///
/// let red = GridCell::new(55, 80, 65)?;
/// let gray = GridCell::new(60, 0, 0)?;
/// println!("preference: {}", scorer.pair_preference(red, gray));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'t> {
    pub(crate) tables: &'t ScoreTables,
    pub(crate) parallel_threshold: usize,
}

impl<'t> Scorer<'t> {
    pub fn new(tables: &'t ScoreTables) -> Self {
        Self {
            tables,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Minimum number of rows before batch kernels go parallel.
    pub fn with_parallel_threshold(mut self, rows: usize) -> Self {
        self.parallel_threshold = rows;
        self
    }

    pub fn tables(&self) -> &'t ScoreTables {
        self.tables
    }

    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// CIEDE2000 distance; see [`ciede2000`].
    #[inline]
    pub fn perceptual_distance(&self, c1: Lab, c2: Lab) -> f64 {
        ciede2000(c1, c2)
    }

    #[inline]
    pub fn name_difference(&self, c1: GridCell, c2: GridCell) -> Result<f64, ScoreError> {
        name_difference(self.tables, c1, c2)
    }

    #[inline]
    pub fn name_uniqueness(&self, cell: GridCell) -> Result<f64, ScoreError> {
        name_uniqueness(self.tables, cell)
    }

    #[inline]
    pub fn pair_preference(&self, c1: GridCell, c2: GridCell) -> f64 {
        pair_preference(self.tables, c1, c2)
    }

    /// Which path [`pair_preference`](Self::pair_preference) takes for a pair.
    pub fn pair_preference_path(&self, c1: GridCell, c2: GridCell) -> PairPreferencePath {
        PairPreferencePath::of(c1, c2)
    }

    #[inline]
    pub fn region_penalty(&self, cell: GridCell) -> f64 {
        region_penalty(self.tables, cell)
    }
}
