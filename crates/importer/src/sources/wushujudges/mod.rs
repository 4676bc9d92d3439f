mod client;
mod listing;

pub use client::{DEFAULT_BASE_URL, WushuJudgesClient};
pub use listing::{CompetitionSummary, parse_listing};

use std::time::Duration;

use chrono::{Local, NaiveDate};
use parser::CompetitionSnapshot;
use tracing::{info, warn};

use crate::error::Result;
use crate::traits::PageFetcher;

const PAGE_DELAY: Duration = Duration::from_millis(500);

/// Drives the scrape: walks the listing, fetches each detail page, and
/// hands the HTML to the parser.
pub struct WushuJudgesImporter<F: PageFetcher> {
    fetcher: F,
    base_url: String,
}

impl<F: PageFetcher> WushuJudgesImporter<F> {
    pub fn new(fetcher: F, base_url: String) -> Self {
        Self { fetcher, base_url }
    }

    pub async fn fetch_listing(&self) -> Result<Vec<CompetitionSummary>> {
        let url = format!("{}/site/competitions", self.base_url);
        let html = self.fetcher.fetch(&url).await?;
        let summaries = parse_listing(&html);
        info!(count = summaries.len(), "Fetched competitions listing");
        Ok(summaries)
    }

    pub async fn import_competition(
        &self,
        summary: &CompetitionSummary,
    ) -> Result<CompetitionSnapshot> {
        let url = self.resolve_url(&summary.detail_path);
        let html = self.fetcher.fetch(&url).await?;
        let start_date = self.start_date_for(summary);
        let snapshot = parser::parse_competition_page(&html, start_date);
        info!(
            name = %snapshot.name,
            blocks = snapshot.blocks.len(),
            "Imported competition"
        );
        Ok(snapshot)
    }

    pub async fn import_by_id(
        &self,
        competition_id: &str,
        start_date: NaiveDate,
    ) -> Result<CompetitionSnapshot> {
        let url = format!("{}/site/competition/{}", self.base_url, competition_id);
        let html = self.fetcher.fetch(&url).await?;
        Ok(parser::parse_competition_page(&html, start_date))
    }

    /// Imports every competition in the listing. A failed competition is
    /// logged and skipped so one broken page does not abort the run.
    pub async fn sync_all(&self) -> Result<Vec<CompetitionSnapshot>> {
        let summaries = self.fetch_listing().await?;
        let mut snapshots = Vec::with_capacity(summaries.len());

        for summary in &summaries {
            match self.import_competition(summary).await {
                Ok(snapshot) => snapshots.push(snapshot),
                Err(e) => {
                    warn!(name = %summary.name, error = %e, "Skipping competition");
                }
            }
            tokio::time::sleep(PAGE_DELAY).await;
        }

        Ok(snapshots)
    }

    /// Like `sync_all`, but restricted to competitions whose start date falls
    /// within the inclusive range.
    pub async fn sync_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<CompetitionSnapshot>> {
        let summaries = self.fetch_listing().await?;
        let mut snapshots = Vec::new();

        for summary in &summaries {
            let Some(start) = summary.start_date else {
                continue;
            };
            if start < from || start > to {
                continue;
            }
            match self.import_competition(summary).await {
                Ok(snapshot) => snapshots.push(snapshot),
                Err(e) => {
                    warn!(name = %summary.name, error = %e, "Skipping competition");
                }
            }
            tokio::time::sleep(PAGE_DELAY).await;
        }

        Ok(snapshots)
    }

    fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    fn start_date_for(&self, summary: &CompetitionSummary) -> NaiveDate {
        summary.start_date.unwrap_or_else(|| {
            warn!(name = %summary.name, "Listing has no start date, using today");
            Local::now().date_naive()
        })
    }
}
