use crate::models::{
    ColorReport, MinScores, NormalizedScores, PairScores, Palette, PaletteReport, Weights,
};
use colorgorical_scores::{
    BatchError, PairRow, PenaltyRow, ScoreTables, Scorer, TableError, TableLoader,
};
use std::path::Path;
use std::time::Instant;

/// Observed range of the perceptual distance between two grid colors
pub const DISTANCE_RANGE: (f64, f64) = (1.02043527056, 122.48163103);
/// Observed range of the pair preference regression
pub const PREFERENCE_RANGE: (f64, f64) = (-101.423, 107.909);

/// Rescale a perceptual distance to `[0, 1]` over [`DISTANCE_RANGE`].
pub fn normalized_distance(de: f64) -> f64 {
    let (min, max) = DISTANCE_RANGE;
    (de - min) / (max - min)
}

/// Rescale a pair preference to `[0, 1]` over [`PREFERENCE_RANGE`].
pub fn normalized_preference(pp: f64) -> f64 {
    let (min, max) = PREFERENCE_RANGE;
    (pp - min) / (max - min)
}

/// Scores palettes and batches against one shared set of tables
pub struct ScoringService {
    tables: ScoreTables,
    parallel_threshold: usize,
}

impl ScoringService {
    pub fn new(tables: ScoreTables, parallel_threshold: usize) -> Self {
        Self {
            tables,
            parallel_threshold,
        }
    }

    /// Load and validate the tables in `data_dir`.
    pub fn load(data_dir: impl AsRef<Path>, parallel_threshold: usize) -> Result<Self, TableError> {
        let start = Instant::now();
        let tables = TableLoader::new(data_dir.as_ref()).load()?;
        tracing::info!(
            data_dir = %data_dir.as_ref().display(),
            names = tables.names(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Loaded score tables"
        );
        Ok(Self::new(tables, parallel_threshold))
    }

    pub fn tables(&self) -> &ScoreTables {
        &self.tables
    }

    fn scorer(&self) -> Scorer<'_> {
        Scorer::new(&self.tables).with_parallel_threshold(self.parallel_threshold)
    }

    pub fn score_pair_rows(&self, rows: &[PairRow]) -> Result<Vec<PairRow>, BatchError> {
        self.scorer().score_pair_rows(rows)
    }

    pub fn score_penalty_rows(&self, rows: &[PenaltyRow]) -> Result<Vec<PenaltyRow>, BatchError> {
        self.scorer().score_penalty_rows(rows)
    }

    /// Score every pair of a palette and summarize it.
    ///
    /// Errors carry the row of the failing kernel call: a color index for
    /// per-color scores, a pair index into [`Palette::pair_indexes`] for
    /// pair scores.
    pub fn score_palette(
        &self,
        palette: &Palette,
        weights: &Weights,
    ) -> Result<PaletteReport, BatchError> {
        let scorer = self.scorer();
        let labs: Vec<[f64; 3]> = palette.colors().iter().map(|c| c.lab().to_array()).collect();

        let penalties = scorer.score_penalty_rows(&labs)?;
        let colors = palette
            .colors()
            .iter()
            .zip(&penalties)
            .enumerate()
            .map(|(row, (color, penalty))| {
                let name_uniqueness = scorer
                    .name_uniqueness(color.cell)
                    .map_err(|source| BatchError::Score { row, source })?;
                Ok(ColorReport {
                    input: color.input.clone(),
                    lab: color.lab().to_array(),
                    hex: color.lab().to_rgb8().to_hex(),
                    name_uniqueness,
                    penalty: penalty[0],
                })
            })
            .collect::<Result<Vec<_>, BatchError>>()?;

        let n = palette.len();
        let mut report = PaletteReport {
            colors,
            pairs: Vec::new(),
            min_scores: MinScores::default(),
            normalized: None,
            de_matrix: vec![vec![None; n]; n],
            nd_matrix: vec![vec![None; n]; n],
            pp_matrix: vec![vec![None; n]; n],
        };
        if n < 2 {
            tracing::debug!(colors = n, "Palette too small to score pairs");
            return Ok(report);
        }

        let indexes = palette.pair_indexes();
        let rows: Vec<PairRow> = indexes
            .iter()
            .map(|&[i, j]| {
                let (a, b) = (labs[i], labs[j]);
                [a[0], a[1], a[2], b[0], b[1], b[2]]
            })
            .collect();
        let scores = scorer.score_pair_rows(&rows)?;

        let mut min = [f64::INFINITY; 4];
        for (&[i, j], &[de, nd, pp, nu1, nu2, _]) in indexes.iter().zip(&scores) {
            min[0] = min[0].min(de);
            min[1] = min[1].min(nd);
            min[2] = min[2].min(pp);
            min[3] = min[3].min(nu1).min(nu2);

            report.de_matrix[j][i] = Some(de);
            report.nd_matrix[j][i] = Some(nd);
            report.pp_matrix[j][i] = Some(pp);
            report.pairs.push(PairScores {
                pair: [i, j],
                de,
                nd,
                pp,
                nu1,
                nu2,
            });
        }

        report.min_scores = MinScores {
            de: min[0] * weights.ciede2000,
            nd: min[1] * weights.name_difference,
            pp: min[2] * weights.pair_preference,
            nu: min[3] * weights.name_uniqueness,
        };
        report.normalized = Some(NormalizedScores {
            distance: normalized_distance(min[0]),
            preference: normalized_preference(min[2]),
        });

        tracing::debug!(colors = n, pairs = report.pairs.len(), "Scored palette");
        Ok(report)
    }
}
