use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use tracing::warn;

use crate::models::{ParticipantEntry, RawRow};

/// The site renders "no score yet" as this placeholder.
const SCORE_PLACEHOLDER: &str = "-";

const TIME_FORMAT: &str = "%H:%M";

/// Turns a raw row into a validated entry. Total: every field degrades
/// independently, so no input row can fail the pipeline.
pub fn normalize_row(raw: &RawRow, start_date: NaiveDate) -> ParticipantEntry {
    ParticipantEntry {
        place: parse_place(&raw.place),
        name: raw.name.clone(),
        region: raw.region.clone(),
        start_time: parse_start_time(&raw.start_time, start_date),
        score: parse_score(&raw.score),
    }
}

/// Empty text and the `-` placeholder both mean "not scored yet" and map to
/// `None`. They must never collapse to zero; the status classifier depends
/// on the distinction.
pub(crate) fn parse_score(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == SCORE_PLACEHOLDER {
        return None;
    }
    match Decimal::from_str(&trimmed.replace(',', ".")) {
        Ok(score) => Some(score),
        Err(_) => {
            warn!(score = text, "unparsable score, treating as absent");
            None
        }
    }
}

fn parse_place(text: &str) -> Option<u32> {
    text.trim().parse().ok()
}

/// `HH:MM` on the competition's start date; anything else falls back to that
/// date at midnight.
fn parse_start_time(text: &str, start_date: NaiveDate) -> NaiveDateTime {
    NaiveTime::parse_from_str(text.trim(), TIME_FORMAT)
        .map(|time| start_date.and_time(time))
        .unwrap_or_else(|_| start_date.and_time(NaiveTime::MIN))
}
