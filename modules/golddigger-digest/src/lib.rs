pub mod digest;
pub mod extraction;
pub mod heuristic;
pub mod keywords;
pub mod prioritize;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;
pub mod video_id;

pub use digest::Digest;
pub use extraction::{CommentExtractor, Extraction, ExtractionFailure};
pub use heuristic::HeuristicScore;
pub use keywords::KeywordSet;
