//! Batch kernels over fixed-width rows of Lab triples
//!
//! Two kernels, both row-independent:
//!
//! | kernel    | input row              | output row                          |
//! |-----------|------------------------|-------------------------------------|
//! | pairs     | `L1 a1 b1 L2 a2 b2`    | `de nd pp nu1 nu2 NaN`              |
//! | penalties | `L a b`                | `penalty NaN NaN`                   |
//!
//! Buffers are tightly packed row-major `f64`. Every color of every row is
//! checked against the grid before any score is computed, so a bad row
//! fails the whole batch without partial output being relied on.
//!
//! Batches of at least [`DEFAULT_PARALLEL_THRESHOLD`] rows (configurable via
//! [`Scorer::with_parallel_threshold`]) are split across the rayon thread
//! pool. Results do not depend on the dispatch.

use rayon::prelude::*;

use crate::color::Lab;
use crate::grid::{GridCell, GridError};
use crate::scores::{ciede2000, name_difference, name_uniqueness, pair_preference, region_penalty};
use crate::scores::{ScoreError, Scorer};
use crate::tables::ScoreTables;

/// Width of a pair kernel row, input and output.
pub const PAIR_WIDTH: usize = 6;
/// Width of a penalty kernel row, input and output.
pub const PENALTY_WIDTH: usize = 3;

/// Row count from which batches run in parallel by default.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// One pair kernel row.
pub type PairRow = [f64; PAIR_WIDTH];
/// One penalty kernel row.
pub type PenaltyRow = [f64; PENALTY_WIDTH];

/// Error type for the batch kernels.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BatchError {
    #[error("input has {len} values, not a multiple of the row width {width}")]
    RaggedInput { len: usize, width: usize },

    #[error("output buffer holds {actual} values, expected {expected}")]
    OutputSize { expected: usize, actual: usize },

    #[error("row {row}: {source}")]
    InvalidColor {
        row: usize,
        #[source]
        source: GridError,
    },

    #[error("row {row}: {source}")]
    Score {
        row: usize,
        #[source]
        source: ScoreError,
    },
}

impl Scorer<'_> {
    /// Run the pair kernel over a flat buffer of `N × 6` values.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use colorgorical_scores::{Scorer, TableLoader};
    ///
    /// let tables = TableLoader::new("data/tables").load()?;
    /// let scorer = Scorer::new(&tables);
    ///
    /// let out = scorer.score_pairs(&[50.0, 20.0, -30.0, 70.0, -40.0, 25.0])?;
    /// let (de, nd, pp) = (out[0], out[1], out[2]);
    /// assert!(out[5].is_nan());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn score_pairs(&self, input: &[f64]) -> Result<Vec<f64>, BatchError> {
        let mut output = vec![0.0; input.len()];
        self.score_pairs_into(input, &mut output)?;
        Ok(output)
    }

    /// Run the pair kernel, writing into a caller-provided buffer of the
    /// same length as `input`.
    pub fn score_pairs_into(&self, input: &[f64], output: &mut [f64]) -> Result<(), BatchError> {
        run_kernel::<PAIR_WIDTH, _>(
            self.tables,
            input,
            output,
            self.parallel_threshold,
            pair_row,
        )
    }

    /// Run the pair kernel over typed rows.
    pub fn score_pair_rows(&self, rows: &[PairRow]) -> Result<Vec<PairRow>, BatchError> {
        let mut output = vec![[0.0; PAIR_WIDTH]; rows.len()];
        self.score_pairs_into(rows.as_flattened(), output.as_flattened_mut())?;
        Ok(output)
    }

    /// Run the penalty kernel over a flat buffer of `N × 3` values.
    pub fn score_penalties(&self, input: &[f64]) -> Result<Vec<f64>, BatchError> {
        let mut output = vec![0.0; input.len()];
        self.score_penalties_into(input, &mut output)?;
        Ok(output)
    }

    pub fn score_penalties_into(&self, input: &[f64], output: &mut [f64]) -> Result<(), BatchError> {
        run_kernel::<PENALTY_WIDTH, _>(
            self.tables,
            input,
            output,
            self.parallel_threshold,
            penalty_row,
        )
    }

    /// Run the penalty kernel over typed rows.
    pub fn score_penalty_rows(&self, rows: &[PenaltyRow]) -> Result<Vec<PenaltyRow>, BatchError> {
        let mut output = vec![[0.0; PENALTY_WIDTH]; rows.len()];
        self.score_penalties_into(rows.as_flattened(), output.as_flattened_mut())?;
        Ok(output)
    }
}

fn pair_row(tables: &ScoreTables, cells: &[GridCell], out: &mut [f64]) -> Result<(), ScoreError> {
    let (c1, c2) = (cells[0], cells[1]);
    out[0] = ciede2000(c1.to_lab(), c2.to_lab());
    out[1] = name_difference(tables, c1, c2)?;
    out[2] = pair_preference(tables, c1, c2);
    out[3] = name_uniqueness(tables, c1)?;
    out[4] = name_uniqueness(tables, c2)?;
    out[5] = f64::NAN;
    Ok(())
}

fn penalty_row(tables: &ScoreTables, cells: &[GridCell], out: &mut [f64]) -> Result<(), ScoreError> {
    out[0] = region_penalty(tables, cells[0]);
    out[1] = f64::NAN;
    out[2] = f64::NAN;
    Ok(())
}

/// Validate and decode the buffers, then apply `kernel` to each row.
///
/// `W` is both the input and the output row width; every input row holds
/// `W / 3` Lab colors.
fn run_kernel<const W: usize, F>(
    tables: &ScoreTables,
    input: &[f64],
    output: &mut [f64],
    parallel_threshold: usize,
    kernel: F,
) -> Result<(), BatchError>
where
    F: Fn(&ScoreTables, &[GridCell], &mut [f64]) -> Result<(), ScoreError> + Sync,
{
    if input.len() % W != 0 {
        return Err(BatchError::RaggedInput {
            len: input.len(),
            width: W,
        });
    }
    if output.len() != input.len() {
        return Err(BatchError::OutputSize {
            expected: input.len(),
            actual: output.len(),
        });
    }

    let rows = input.len() / W;
    let colors_per_row = W / 3;

    let cells = input
        .chunks_exact(3)
        .enumerate()
        .map(|(i, lab)| {
            GridCell::try_from(Lab::new(lab[0], lab[1], lab[2])).map_err(|source| {
                BatchError::InvalidColor {
                    row: i / colors_per_row,
                    source,
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let score = |(row, (cells, out)): (usize, (&[GridCell], &mut [f64]))| {
        kernel(tables, cells, out).map_err(|source| BatchError::Score { row, source })
    };

    let parallel = rows >= parallel_threshold;
    tracing::debug!(rows, width = W, parallel, "Running batch kernel");

    if parallel {
        cells
            .par_chunks_exact(colors_per_row)
            .zip(output.par_chunks_exact_mut(W))
            .enumerate()
            .try_for_each(score)
    } else {
        cells
            .chunks_exact(colors_per_row)
            .zip(output.chunks_exact_mut(W))
            .enumerate()
            .try_for_each(score)
    }
}
