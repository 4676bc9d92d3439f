use std::collections::HashMap;

use lazy_static::lazy_static;
use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::models::{RawCategoryBlock, RawRow};

lazy_static! {
    static ref CONTAINER: Selector = Selector::parse("div.d-flex").expect("container selector");
    static ref HEADING: Selector = Selector::parse("h3").expect("heading selector");
    static ref PARAGRAPH: Selector = Selector::parse("p").expect("paragraph selector");
    static ref TABLE: Selector = Selector::parse("table").expect("table selector");
    static ref TH: Selector = Selector::parse("th").expect("th selector");
    static ref TR: Selector = Selector::parse("tr").expect("tr selector");
    static ref TD: Selector = Selector::parse("td").expect("td selector");
}

/// Header texts a table must carry to count as a results table.
const RANK_HEADER: &str = "#";
const NAME_HEADER: &str = "Имя";

/// place, name, region, start time, score
const MIN_ROW_CELLS: usize = 5;

/// Walks the page and groups it into raw category blocks: an `<h3>` label and
/// optional `<p>` time range inside a `div.d-flex` container, plus the rows of
/// the nearest following `<table>`. Containers without a heading, without a
/// following table, or whose table is not a results table are skipped; the
/// page interleaves headers, footers and other non-category content.
pub fn extract_blocks(document: &Html, competition_title: &str) -> Vec<RawCategoryBlock> {
    // Document-order index so "nearest following table" can be resolved
    // across the whole tree, not just among siblings.
    let order: HashMap<NodeId, usize> = document
        .root_element()
        .descendants()
        .enumerate()
        .map(|(position, node)| (node.id(), position))
        .collect();

    let tables: Vec<(usize, ElementRef)> = document
        .select(&TABLE)
        .filter_map(|table| order.get(&table.id()).map(|position| (*position, table)))
        .collect();

    let mut blocks = Vec::new();
    for container in document.select(&CONTAINER) {
        let Some(heading) = container.select(&HEADING).next() else {
            continue;
        };
        let label = collapse_whitespace(&heading.text().collect::<String>());

        let time_range = container
            .select(&PARAGRAPH)
            .next()
            .map(|p| p.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        let Some(container_position) = order.get(&container.id()) else {
            continue;
        };
        let Some((_, table)) = tables
            .iter()
            .find(|(position, _)| position > container_position)
        else {
            debug!(%label, "category container without a following table, skipping");
            continue;
        };

        let Some(rows) = parse_results_table(table, competition_title) else {
            debug!(%label, "following table is not a results table, skipping");
            continue;
        };

        blocks.push(RawCategoryBlock {
            label,
            time_range,
            rows,
        });
    }
    blocks
}

/// Returns `None` when the table's headers lack the rank or name column.
/// Rows that fail the validity filter (too few cells, empty name or region,
/// or a first cell echoing the page title) are dropped here, before any
/// downstream parsing sees them.
fn parse_results_table(table: &ElementRef, competition_title: &str) -> Option<Vec<RawRow>> {
    let headers: Vec<String> = table.select(&TH).map(cell_text).collect();
    if !headers.iter().any(|h| h == RANK_HEADER) || !headers.iter().any(|h| h == NAME_HEADER) {
        return None;
    }

    let mut rows = Vec::new();
    for tr in table.select(&TR) {
        let cells: Vec<String> = tr.select(&TD).map(cell_text).collect();
        if cells.is_empty() {
            // header row
            continue;
        }
        if cells.len() < MIN_ROW_CELLS || cells[1].is_empty() || cells[2].is_empty() {
            debug!(cells = cells.len(), "dropping invalid results row");
            continue;
        }
        if cells[0] == competition_title {
            // malformed tables repeat the page title as a data row
            continue;
        }
        rows.push(RawRow {
            place: cells[0].clone(),
            name: cells[1].clone(),
            region: cells[2].clone(),
            start_time: cells[3].clone(),
            score: cells[4].clone(),
        });
    }
    Some(rows)
}

fn cell_text(cell: ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
