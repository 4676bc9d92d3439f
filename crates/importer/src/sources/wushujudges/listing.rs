use chrono::NaiveDate;
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::warn;

lazy_static! {
    static ref ROW: Selector = Selector::parse("table tbody tr").unwrap();
    static ref CELL: Selector = Selector::parse("td").unwrap();
    static ref LINK: Selector = Selector::parse("a").unwrap();
}

const DATE_FORMAT: &str = "%d.%m.%Y";

/// One row of the competitions listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionSummary {
    pub name: String,
    pub detail_path: String,
    pub city: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl CompetitionSummary {
    /// Trailing path segment of the detail link, which the site uses as the
    /// competition identifier.
    pub fn competition_id(&self) -> Option<&str> {
        self.detail_path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
    }
}

/// Parses the competitions listing page into summaries, skipping rows that
/// do not carry a detail link.
pub fn parse_listing(html: &str) -> Vec<CompetitionSummary> {
    let document = Html::parse_document(html);
    let mut summaries = Vec::new();

    for row in document.select(&ROW) {
        let cells: Vec<ElementRef> = row.select(&CELL).collect();
        if cells.len() < 4 {
            continue;
        }

        let Some(anchor) = cells[0].select(&LINK).next() else {
            continue;
        };
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };

        let name = collapse_whitespace(&anchor.text().collect::<String>());
        if name.is_empty() {
            continue;
        }

        // listing columns: name, city, start date, end date
        summaries.push(CompetitionSummary {
            name,
            detail_path: href.to_string(),
            city: cell_text(&cells[1]),
            start_date: parse_date(&cell_text(&cells[2])),
            end_date: parse_date(&cell_text(&cells[3])),
        });
    }

    summaries
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    if text.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(text, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            warn!(text, "Unparsable date in listing");
            None
        }
    }
}

fn cell_text(cell: &ElementRef) -> String {
    collapse_whitespace(&cell.text().collect::<String>())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
