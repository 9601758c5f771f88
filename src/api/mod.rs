pub mod batch;
pub mod score;

pub use batch::{__path_handle_batch_pairs, __path_handle_batch_penalty};
pub use batch::{
    handle_batch_pairs, handle_batch_penalty, BatchResponse, PairBatchRequest, PenaltyBatchRequest,
};
pub use score::{handle_score, ScoreRequest, ScoreResponse, __path_handle_score};
