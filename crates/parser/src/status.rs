use std::collections::HashMap;

use crate::models::{CategoryDescriptor, CategoryStatus, ParticipantEntry};

/// Score completeness of one block's participant list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Completeness {
    /// no participants
    Empty,
    /// participants, none scored yet
    Idle,
    /// some scored, some not
    Started,
    /// every participant scored
    Complete,
}

fn completeness(participants: &[ParticipantEntry]) -> Completeness {
    if participants.is_empty() {
        return Completeness::Empty;
    }
    let scored = participants.iter().filter(|p| p.has_score()).count();
    if scored == participants.len() {
        Completeness::Complete
    } else if scored > 0 {
        Completeness::Started
    } else {
        Completeness::Idle
    }
}

/// Assigns a lifecycle status to every block of one competition.
///
/// Competitions run one category at a time per carpet, in document order. A
/// block with some-but-not-all scores is the one on the carpet right now,
/// unless another category on the same carpet is still incomplete; then the
/// scores it shows are pre-seeded noise and the block has not truly started.
/// Checking the carpet siblings is the only way to tell the two apart.
///
/// Never fails: every block gets exactly one status, computed in a single
/// pass over static input.
pub fn classify(
    blocks: &[(CategoryDescriptor, Vec<ParticipantEntry>)],
) -> Vec<CategoryStatus> {
    let states: Vec<Completeness> = blocks
        .iter()
        .map(|(_, participants)| completeness(participants))
        .collect();

    let mut carpets: HashMap<u32, Vec<usize>> = HashMap::new();
    for (index, (descriptor, _)) in blocks.iter().enumerate() {
        carpets
            .entry(descriptor.carpet_number)
            .or_default()
            .push(index);
    }

    blocks
        .iter()
        .enumerate()
        .map(|(index, (descriptor, _))| match states[index] {
            Completeness::Empty => CategoryStatus::Future,
            Completeness::Complete => CategoryStatus::Past,
            Completeness::Started => {
                let siblings_complete = carpets[&descriptor.carpet_number]
                    .iter()
                    .filter(|&&sibling| sibling != index)
                    .all(|&sibling| states[sibling] == Completeness::Complete);
                if siblings_complete {
                    CategoryStatus::Current
                } else {
                    // an earlier category on this carpet is still running;
                    // the partial scores here are placeholders
                    CategoryStatus::Future
                }
            }
            Completeness::Idle => CategoryStatus::Future,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn entry(score: Option<&str>) -> ParticipantEntry {
        let day = NaiveDate::from_ymd_opt(2024, 5, 18).unwrap();
        ParticipantEntry {
            place: None,
            name: "Участник".to_string(),
            region: "Регион".to_string(),
            start_time: day.and_hms_opt(10, 0, 0).unwrap(),
            score: score.map(|s| Decimal::from_str(s).unwrap()),
        }
    }

    fn on_carpet(carpet_number: u32) -> CategoryDescriptor {
        CategoryDescriptor {
            carpet_number,
            ..CategoryDescriptor::default()
        }
    }

    fn with_completeness(state: Completeness) -> Vec<ParticipantEntry> {
        match state {
            Completeness::Empty => vec![],
            Completeness::Idle => vec![entry(None), entry(None)],
            Completeness::Started => vec![entry(Some("8.5")), entry(None)],
            Completeness::Complete => vec![entry(Some("8.5")), entry(Some("9.1"))],
        }
    }

    #[test]
    fn test_empty_block_is_future() {
        let blocks = vec![(on_carpet(1), vec![])];
        assert_eq!(classify(&blocks), vec![CategoryStatus::Future]);
    }

    #[test]
    fn test_fully_scored_block_is_past() {
        let blocks = vec![(on_carpet(1), with_completeness(Completeness::Complete))];
        assert_eq!(classify(&blocks), vec![CategoryStatus::Past]);
    }

    #[test]
    fn test_unscored_block_is_future() {
        let blocks = vec![(on_carpet(1), with_completeness(Completeness::Idle))];
        assert_eq!(classify(&blocks), vec![CategoryStatus::Future]);
    }

    #[test]
    fn test_mixed_block_is_current_when_carpet_siblings_are_done() {
        // scores "8.5", "-", "", "9.1", "8.9" -> started but not complete
        let mixed = vec![
            entry(Some("8.5")),
            entry(None),
            entry(None),
            entry(Some("9.1")),
            entry(Some("8.9")),
        ];
        let blocks = vec![
            (on_carpet(2), with_completeness(Completeness::Complete)),
            (on_carpet(2), mixed),
        ];
        assert_eq!(
            classify(&blocks),
            vec![CategoryStatus::Past, CategoryStatus::Current]
        );
    }

    #[test]
    fn test_mixed_block_waits_while_a_carpet_sibling_is_unfinished() {
        let blocks = vec![
            (on_carpet(2), with_completeness(Completeness::Started)),
            (on_carpet(2), with_completeness(Completeness::Started)),
        ];
        // each sees the other as not complete, so neither is current
        assert_eq!(
            classify(&blocks),
            vec![CategoryStatus::Future, CategoryStatus::Future]
        );
    }

    #[test]
    fn test_empty_sibling_also_blocks_a_mixed_block() {
        // document order [A, B] on carpet 3; A mixed, B empty: B is not
        // complete, so A must wait
        let blocks = vec![
            (on_carpet(3), with_completeness(Completeness::Started)),
            (on_carpet(3), vec![]),
        ];
        assert_eq!(
            classify(&blocks),
            vec![CategoryStatus::Future, CategoryStatus::Future]
        );
    }

    #[test]
    fn test_carpets_are_classified_independently() {
        let blocks = vec![
            (on_carpet(1), with_completeness(Completeness::Complete)),
            (on_carpet(1), with_completeness(Completeness::Started)),
            (on_carpet(2), with_completeness(Completeness::Started)),
            (on_carpet(2), with_completeness(Completeness::Idle)),
        ];
        assert_eq!(
            classify(&blocks),
            vec![
                CategoryStatus::Past,
                CategoryStatus::Current,
                CategoryStatus::Future,
                CategoryStatus::Future,
            ]
        );
    }

    #[test]
    fn test_at_most_one_current_per_carpet() {
        // exhaustive over completeness assignments for four blocks split
        // across two carpets
        const STATES: [Completeness; 4] = [
            Completeness::Empty,
            Completeness::Idle,
            Completeness::Started,
            Completeness::Complete,
        ];
        let carpets = [1u32, 1, 2, 2];

        for pattern in 0..STATES.len().pow(4) {
            let blocks: Vec<_> = carpets
                .iter()
                .enumerate()
                .map(|(slot, &carpet)| {
                    let state = STATES[(pattern / STATES.len().pow(slot as u32)) % STATES.len()];
                    (on_carpet(carpet), with_completeness(state))
                })
                .collect();

            let statuses = classify(&blocks);
            for carpet in [1, 2] {
                let current_on_carpet = statuses
                    .iter()
                    .zip(&blocks)
                    .filter(|(status, (descriptor, _))| {
                        descriptor.carpet_number == carpet
                            && **status == CategoryStatus::Current
                    })
                    .count();
                assert!(
                    current_on_carpet <= 1,
                    "pattern {pattern}: {current_on_carpet} current blocks on carpet {carpet}"
                );
            }
        }
    }

    #[test]
    fn test_past_iff_non_empty_and_fully_scored() {
        const STATES: [Completeness; 4] = [
            Completeness::Empty,
            Completeness::Idle,
            Completeness::Started,
            Completeness::Complete,
        ];
        for state in STATES {
            let participants = with_completeness(state);
            let blocks = vec![(on_carpet(1), participants.clone())];
            let status = classify(&blocks)[0];
            let fully_scored =
                !participants.is_empty() && participants.iter().all(|p| p.has_score());
            assert_eq!(status == CategoryStatus::Past, fully_scored);
        }
    }
}
