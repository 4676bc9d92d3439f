use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One results-table row as scraped. All fields are raw cell text; parsing
/// and validation happen in `row::normalize_row`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub place: String,
    pub name: String,
    pub region: String,
    pub start_time: String,
    pub score: String,
}

/// A category block as it appears on the detail page: heading text, the
/// optional time-range paragraph and the rows of the nearest results table.
/// Transient; identity is its position on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCategoryBlock {
    pub label: String,
    pub time_range: String,
    pub rows: Vec<RawRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    Unknown,
}

/// Structured form of a category heading like
/// `Ковер 2: Девушки (12-14 лет) Наньцюань`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDescriptor {
    /// Physical carpet the category runs on. Headings without a mat keyword
    /// are assumed to run on carpet 1, so carpet ordering always has a real
    /// bucket to group by.
    pub carpet_number: u32,
    pub sex: Sex,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discipline: Option<String>,
}

impl Default for CategoryDescriptor {
    fn default() -> Self {
        Self {
            carpet_number: 1,
            sex: Sex::Unknown,
            min_age: None,
            max_age: None,
            discipline: None,
        }
    }
}

/// Lifecycle stage of a category block, inferred from score completeness and
/// carpet ordering, not from wall-clock time. Valid for one classification
/// pass only, which is why it lives next to the descriptor instead of inside
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryStatus {
    Future,
    Current,
    Past,
}

/// A validated participant row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantEntry {
    pub place: Option<u32>,
    pub name: String,
    pub region: String,
    /// Estimated start. Rows without a parsable `HH:MM` fall back to the
    /// competition start date at midnight.
    pub start_time: NaiveDateTime,
    /// Absent when the cell is empty or the `-` placeholder. Never collapsed
    /// to zero: "no score yet" and "scored 0.0" are different facts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<Decimal>,
}

impl ParticipantEntry {
    pub fn has_score(&self) -> bool {
        self.score.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBlock {
    pub descriptor: CategoryDescriptor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_range: Option<String>,
    pub participants: Vec<ParticipantEntry>,
    pub status: CategoryStatus,
}

/// The product of one full pipeline run against one detail page. Recomputed
/// on every scrape; reconciling it against previously stored state is the
/// persistence layer's job. Blocks preserve document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitionSnapshot {
    pub name: String,
    pub start_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regulation: Option<String>,
    pub blocks: Vec<CategoryBlock>,
}
