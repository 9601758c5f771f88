use super::palette::ColorInput;
use serde::Serialize;
use utoipa::ToSchema;

/// Scores of one unordered color pair `(i, j)`, `i < j`
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PairScores {
    #[schema(value_type = Vec<usize>)]
    pub pair: [usize; 2],
    /// Perceptual distance (CIEDE2000)
    pub de: f64,
    /// Name difference
    pub nd: f64,
    /// Pair preference
    pub pp: f64,
    /// Name uniqueness of color `i`
    pub nu1: f64,
    /// Name uniqueness of color `j`
    pub nu2: f64,
}

/// Weighted palette minima
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, ToSchema)]
pub struct MinScores {
    pub de: f64,
    pub nd: f64,
    pub pp: f64,
    pub nu: f64,
}

/// Unweighted minima rescaled to the model's observed ranges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct NormalizedScores {
    pub distance: f64,
    pub preference: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ColorReport {
    /// Color as supplied
    #[schema(value_type = Object)]
    pub input: ColorInput,
    /// Grid-snapped Lab value that was scored
    #[schema(value_type = Vec<f64>)]
    pub lab: [f64; 3],
    pub hex: String,
    pub name_uniqueness: f64,
    pub penalty: f64,
}

/// Full score report for a palette.
///
/// The matrices are `n × n`; pair `(i, j)` is stored at `[j][i]` and every
/// other slot is `null`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PaletteReport {
    pub colors: Vec<ColorReport>,
    pub pairs: Vec<PairScores>,
    pub min_scores: MinScores,
    /// `None` for palettes with fewer than two colors
    pub normalized: Option<NormalizedScores>,
    pub de_matrix: Vec<Vec<Option<f64>>>,
    pub nd_matrix: Vec<Vec<Option<f64>>>,
    pub pp_matrix: Vec<Vec<Option<f64>>>,
}
