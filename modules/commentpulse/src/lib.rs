pub mod batch;
pub mod cache;
pub mod export;
pub mod ingest;
pub mod resolver;
pub mod retry;
pub mod scorer;
pub mod summary;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;

pub use batch::{BatchReport, BatchRunner, BatchWarning};
pub use cache::ResultCache;
pub use ingest::{IngestOptions, IngestOutcome, IngestWarning, Ingestor};
pub use resolver::resolve;
pub use retry::RetryPolicy;
pub use scorer::{classify, VaderScorer};
pub use traits::{CommentPage, CommentSource, SentimentScorer};
