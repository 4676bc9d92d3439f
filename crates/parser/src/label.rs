use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::models::{CategoryDescriptor, Sex};

/// Carpet bucket for headings that name no mat. Unlabeled categories are
/// assumed to run on carpet 1 so carpet ordering always has a real bucket.
const DEFAULT_CARPET: u32 = 1;

/// Upper bound substituted for open-ended age groups like `(18+)`.
const OPEN_AGE_MAX: u32 = 99;

lazy_static! {
    static ref CARPET: Regex =
        Regex::new(r"(?i)(?:ковер|ковёр|carpet|mat)\s*№?\s*(\d+)").expect("carpet regex");
    static ref AGE_RANGE: Regex =
        Regex::new(r"\(\s*(\d{1,2})\s*-\s*(\d{1,2})[^)]*\)").expect("age range regex");
    static ref AGE_OPEN: Regex =
        Regex::new(r"\(\s*(\d{1,2})\s*\+[^)]*\)").expect("open age regex");

    /// Keyword -> sex, checked in order; first match wins. Feminine forms
    /// come before the masculine words they contain (`юниорки`/`юниоры`,
    /// `женщины` before `мужчины` is free, `female` before `male`, `women`
    /// before `men`), so substring overlaps resolve to the right sex.
    static ref SEX_KEYWORDS: Vec<(Regex, Sex)> = [
        ("юниорки", Sex::Female),
        ("юниоры", Sex::Male),
        ("девушки", Sex::Female),
        ("девочки", Sex::Female),
        ("юноши", Sex::Male),
        ("мальчики", Sex::Male),
        ("женщины", Sex::Female),
        ("мужчины", Sex::Male),
        ("girls", Sex::Female),
        ("boys", Sex::Male),
        ("women", Sex::Female),
        ("female", Sex::Female),
        ("men", Sex::Male),
        ("male", Sex::Male),
        ("juniors", Sex::Male),
    ]
    .into_iter()
    .map(|(keyword, sex)| {
        // word-bounded so short English keywords never match inside an
        // unrelated word ("men" in "Tournament")
        (
            Regex::new(&format!(r"(?i)\b{keyword}\b")).expect("sex keyword regex"),
            sex,
        )
    })
    .collect();
}

/// Parses a free-text category heading into its structured attributes.
///
/// Extraction runs in a fixed order: carpet, sex, age, then the residual
/// text (with all recognized substrings stripped) becomes the discipline.
/// Total: unparsable components degrade to defaults or absent values, never
/// to an error.
pub fn parse_label(label: &str) -> CategoryDescriptor {
    // Byte spans of recognized substrings, removed before the discipline
    // residual is taken.
    let mut spans: Vec<(usize, usize)> = Vec::new();

    let mut carpet_number = DEFAULT_CARPET;
    if let Some(captures) = CARPET.captures(label) {
        let whole = captures.get(0).expect("match 0");
        spans.push((whole.start(), whole.end()));
        if let Some(number) = captures[1].parse::<u32>().ok().filter(|n| *n >= 1) {
            carpet_number = number;
        }
    }

    let mut sex = Sex::Unknown;
    for (keyword, keyword_sex) in SEX_KEYWORDS.iter() {
        if let Some(found) = keyword.find(label) {
            spans.push((found.start(), found.end()));
            sex = *keyword_sex;
            break;
        }
    }

    let mut min_age = None;
    let mut max_age = None;
    if let Some(captures) = AGE_RANGE.captures(label) {
        let whole = captures.get(0).expect("match 0");
        spans.push((whole.start(), whole.end()));
        min_age = captures[1].parse::<u32>().ok();
        max_age = captures[2].parse::<u32>().ok();
    } else if let Some(captures) = AGE_OPEN.captures(label) {
        let whole = captures.get(0).expect("match 0");
        spans.push((whole.start(), whole.end()));
        min_age = captures[1].parse::<u32>().ok();
        max_age = min_age.map(|_| OPEN_AGE_MAX);
    }
    if let (Some(lo), Some(hi)) = (min_age, max_age) {
        if lo > hi {
            debug!(label, lo, hi, "inverted age range, discarding bounds");
            min_age = None;
            max_age = None;
        }
    }

    let discipline = residual_text(label, spans);

    CategoryDescriptor {
        carpet_number,
        sex,
        min_age,
        max_age,
        discipline,
    }
}

/// The label with the given spans removed, separator punctuation trimmed and
/// whitespace collapsed. `None` when nothing is left.
fn residual_text(label: &str, mut spans: Vec<(usize, usize)>) -> Option<String> {
    spans.sort_unstable();

    let mut kept = String::with_capacity(label.len());
    let mut cursor = 0;
    for (start, end) in spans {
        // spans can overlap when a keyword sits inside the age parenthetical
        if start > cursor {
            kept.push_str(&label[cursor..start]);
            kept.push(' ');
        }
        cursor = cursor.max(end);
    }
    kept.push_str(&label[cursor..]);

    let cleaned = kept
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, ':' | '-' | '|' | ','))
        .to_string();

    if cleaned.is_empty() { None } else { Some(cleaned) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_russian_label() {
        let descriptor = parse_label("Ковер 2: Девушки (12-14 лет) Наньцюань");
        assert_eq!(descriptor.carpet_number, 2);
        assert_eq!(descriptor.sex, Sex::Female);
        assert_eq!(descriptor.min_age, Some(12));
        assert_eq!(descriptor.max_age, Some(14));
        assert_eq!(descriptor.discipline.as_deref(), Some("Наньцюань"));
    }

    #[test]
    fn test_full_english_label() {
        let descriptor = parse_label("Mat 2 Girls (12-14 yrs) Nanquan");
        assert_eq!(descriptor.carpet_number, 2);
        assert_eq!(descriptor.sex, Sex::Female);
        assert_eq!(descriptor.min_age, Some(12));
        assert_eq!(descriptor.max_age, Some(14));
        assert_eq!(descriptor.discipline.as_deref(), Some("Nanquan"));
    }

    #[test]
    fn test_open_age_bound_without_mat_keyword() {
        let descriptor = parse_label("Juniors (18+) Changquan");
        assert_eq!(descriptor.carpet_number, 1);
        assert_eq!(descriptor.sex, Sex::Male);
        assert_eq!(descriptor.min_age, Some(18));
        assert_eq!(descriptor.max_age, Some(OPEN_AGE_MAX));
        assert_eq!(descriptor.discipline.as_deref(), Some("Changquan"));
    }

    #[test]
    fn test_feminine_keyword_wins_over_masculine_substring() {
        assert_eq!(parse_label("Юниорки (15-17 лет)").sex, Sex::Female);
        assert_eq!(parse_label("Юниоры (15-17 лет)").sex, Sex::Male);
        assert_eq!(parse_label("Women Taijiquan").sex, Sex::Female);
        assert_eq!(parse_label("Female Daoshu").sex, Sex::Female);
    }

    #[test]
    fn test_keywords_only_match_whole_words() {
        // "men" sits inside "Tournament", "male" inside "Female" etc.; none
        // of these may register as a sex keyword
        let descriptor = parse_label("Tournament Demo");
        assert_eq!(descriptor.sex, Sex::Unknown);
        assert_eq!(descriptor.discipline.as_deref(), Some("Tournament Demo"));

        assert_eq!(parse_label("Ornament Showcase").sex, Sex::Unknown);
        // whole words still match
        assert_eq!(parse_label("Men Daoshu").sex, Sex::Male);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let descriptor = parse_label("КОВЕР 3: ЖЕНЩИНЫ (41-55 лет) Тайцзицюань");
        assert_eq!(descriptor.carpet_number, 3);
        assert_eq!(descriptor.sex, Sex::Female);
        assert_eq!(descriptor.min_age, Some(41));
        assert_eq!(descriptor.max_age, Some(55));
    }

    #[test]
    fn test_unparsable_components_degrade() {
        let descriptor = parse_label("Показательные выступления");
        assert_eq!(descriptor.carpet_number, 1);
        assert_eq!(descriptor.sex, Sex::Unknown);
        assert_eq!(descriptor.min_age, None);
        assert_eq!(descriptor.max_age, None);
        assert_eq!(
            descriptor.discipline.as_deref(),
            Some("Показательные выступления")
        );
    }

    #[test]
    fn test_inverted_age_range_discards_both_bounds() {
        let descriptor = parse_label("Девушки (14-12 лет) Цзяньшу");
        assert_eq!(descriptor.min_age, None);
        assert_eq!(descriptor.max_age, None);
        // the parenthetical is still stripped from the discipline
        assert_eq!(descriptor.discipline.as_deref(), Some("Цзяньшу"));
    }

    #[test]
    fn test_label_with_only_recognized_tokens_has_no_discipline() {
        let descriptor = parse_label("Ковер 1: Мальчики (7-8 лет)");
        assert_eq!(descriptor.carpet_number, 1);
        assert_eq!(descriptor.sex, Sex::Male);
        assert_eq!(descriptor.discipline, None);
    }

    #[test]
    fn test_empty_and_garbage_labels_never_panic() {
        for label in ["", "   ", "()", "Ковер", "(лет)", "Ковер abc: (x-y)"] {
            let descriptor = parse_label(label);
            assert_eq!(descriptor.carpet_number, 1);
            assert_eq!(descriptor.sex, Sex::Unknown);
        }
    }

    #[test]
    fn test_round_trip_of_canonical_token_order() {
        // carpet + sex + age + discipline assembled in canonical order must
        // come back out exactly
        let label = format!("{} {} {} {}", "Ковер 4", "Юноши", "(9-11 лет)", "Дуйлянь");
        let descriptor = parse_label(&label);
        assert_eq!(descriptor.carpet_number, 4);
        assert_eq!(descriptor.sex, Sex::Male);
        assert_eq!(descriptor.min_age, Some(9));
        assert_eq!(descriptor.max_age, Some(11));
        assert_eq!(descriptor.discipline.as_deref(), Some("Дуйлянь"));
    }
}
