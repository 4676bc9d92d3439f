pub mod error;
pub mod export;
pub mod sources;
pub mod traits;

pub use error::{ImporterError, Result};
pub use export::SnapshotExporter;
pub use traits::PageFetcher;

// Re-export wushujudges.ru types
pub use sources::wushujudges::{
    CompetitionSummary, DEFAULT_BASE_URL, WushuJudgesClient, WushuJudgesImporter,
};
