pub mod rows;
pub mod scoring;

pub use rows::{format_rows, parse_rows, RowsError};
pub use scoring::{
    normalized_distance, normalized_preference, ScoringService, DISTANCE_RANGE, PREFERENCE_RANGE,
};
