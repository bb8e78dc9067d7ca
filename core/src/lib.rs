pub mod builder;
pub mod feed;
pub mod filter;
pub mod index;
pub mod persist;
pub mod search;
pub mod tokenizer;

pub use builder::{build_index, build_index_at};
pub use feed::{Feed, FeedItem};
pub use index::{DocEntry, DocId, IndexMetadata, InvertedIndex, SearchIndex, Weight};
pub use persist::{load_artifact, load_index, save_artifact, IndexArtifact, LoadError};
pub use search::{ScoredResult, ScoringConfig, SearchEngine};
