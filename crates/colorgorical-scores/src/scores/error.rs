//! Error type for table-backed scores

/// Error returned by a score that cannot be computed for its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScoreError {
    /// The color's named-color entry has a total term count of zero, so
    /// name probabilities are undefined.
    #[error("named color {name_index} has no term observations")]
    NoNameObservations {
        /// Index of the named color
        name_index: usize,
    },
}
