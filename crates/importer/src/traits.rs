use crate::Result;

/// Supplies raw HTML for absolute URLs. The seam between the sync logic and
/// the network, so the importer is testable with canned pages.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}
