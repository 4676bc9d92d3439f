use chrono::NaiveDate;
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::models::{CategoryBlock, CategoryDescriptor, CompetitionSnapshot, ParticipantEntry};
use crate::{blocks, label, row, status};

lazy_static! {
    static ref TITLE: Selector = Selector::parse("title").expect("title selector");
    static ref HEADINGS: Selector = Selector::parse("h2, h3, h4").expect("headings selector");
}

const REGULATION_MARKER: &str = "регламент";

/// Runs the whole pipeline against one competition detail page: block
/// extraction, label parsing, row normalization and status classification.
///
/// Deterministic for identical input; the only date used is the caller's
/// `start_date`, never the wall clock. A page with no recognizable category
/// content yields a snapshot with zero blocks, not an error.
pub fn parse_competition_page(html: &str, start_date: NaiveDate) -> CompetitionSnapshot {
    let document = Html::parse_document(html);

    let name = competition_title(&document);
    let regulation = extract_regulation(&document);

    let raw_blocks = blocks::extract_blocks(&document, &name);
    let parsed: Vec<(CategoryDescriptor, Vec<ParticipantEntry>)> = raw_blocks
        .iter()
        .map(|block| {
            (
                label::parse_label(&block.label),
                block
                    .rows
                    .iter()
                    .map(|raw| row::normalize_row(raw, start_date))
                    .collect(),
            )
        })
        .collect();
    let statuses = status::classify(&parsed);

    debug!(%name, blocks = parsed.len(), "classified competition page");

    let blocks = raw_blocks
        .into_iter()
        .zip(parsed)
        .zip(statuses)
        .map(|((raw, (descriptor, participants)), status)| CategoryBlock {
            descriptor,
            time_range: if raw.time_range.is_empty() {
                None
            } else {
                Some(raw.time_range)
            },
            participants,
            status,
        })
        .collect();

    CompetitionSnapshot {
        name,
        start_date,
        regulation,
        blocks,
    }
}

/// The site titles detail pages `<site name> | <competition name>`; the last
/// segment is the displayed competition title. Missing title degrades to an
/// empty name and the pipeline carries on.
fn competition_title(document: &Html) -> String {
    document
        .select(&TITLE)
        .next()
        .map(|title| title.text().collect::<String>())
        .map(|text| {
            text.trim()
                .rsplit(" | ")
                .next()
                .unwrap_or("")
                .trim()
                .to_string()
        })
        .unwrap_or_default()
}

/// The paragraph following a heading that mentions the regulation, if the
/// page carries one.
fn extract_regulation(document: &Html) -> Option<String> {
    let heading = document.select(&HEADINGS).find(|h| {
        h.text()
            .collect::<String>()
            .to_lowercase()
            .contains(REGULATION_MARKER)
    })?;

    for sibling in heading.next_siblings() {
        if let Some(element) = ElementRef::wrap(sibling) {
            if element.value().name() == "p" {
                let text = element.text().collect::<String>().trim().to_string();
                return if text.is_empty() { None } else { Some(text) };
            }
        }
    }
    None
}
