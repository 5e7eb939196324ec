use chrono::{DateTime, Utc};

use hitfinder_core::dates::{after_cutoff, before_cutoff, threshold};
use hitfinder_core::{
    BlockedEntry, BlockedHit, BlockedRequester, Clock, DurationUnit, Requester, SearchItem,
};

/// Snapshot the identifying parts of a search row as a blocked HIT.
pub fn blocked_hit_from_search_result(hit: &SearchItem, clock: &dyn Clock) -> BlockedHit {
    BlockedHit {
        group_id: hit.group_id.clone(),
        requester: hit.requester().ok(),
        title: hit.title.clone(),
        date_blocked: clock.now(),
    }
}

pub fn create_blocked_requester(requester: &Requester, clock: &dyn Clock) -> BlockedRequester {
    BlockedRequester {
        id: requester.id.clone(),
        name: requester.name.clone(),
        date_blocked: clock.now(),
    }
}

/// Predicate: blocked strictly longer than `duration` before `now`.
///
/// The cutoff is computed once, so the returned closure can be reused across a
/// whole collection.
pub fn blocked_after<T: BlockedEntry>(
    now: DateTime<Utc>,
    duration: u32,
    unit: DurationUnit,
) -> impl Fn(&T) -> bool {
    let cutoff = threshold(now, duration, unit);
    move |entry: &T| before_cutoff(entry.date_blocked(), cutoff)
}

/// Predicate: blocked strictly less than `duration` before `now`.
pub fn blocked_within<T: BlockedEntry>(
    now: DateTime<Utc>,
    duration: u32,
    unit: DurationUnit,
) -> impl Fn(&T) -> bool {
    let cutoff = threshold(now, duration, unit);
    move |entry: &T| after_cutoff(entry.date_blocked(), cutoff)
}

/// Confirmation shown after blocking a requester.
pub fn block_confirmation(requester: &Requester) -> String {
    format!("{} has been added to your blocklist.", requester.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use hitfinder_core::{ExtractionError, FieldKind, FixedClock, ItemKey};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 9, 30, 0).unwrap()
    }

    fn requester_blocked_at(date_blocked: DateTime<Utc>) -> BlockedRequester {
        BlockedRequester {
            id: "A1".into(),
            name: "Acme".into(),
            date_blocked,
        }
    }

    fn search_item() -> SearchItem {
        SearchItem {
            title: Ok("Rate tweets".into()),
            requester_name: Ok("Acme".into()),
            requester_id: Ok("A1".into()),
            reward: Ok("0.02".into()),
            group_id: ItemKey::Natural("G7".into()),
            time: now() - Duration::minutes(5),
            batch_size: 300,
        }
    }

    #[test]
    fn test_blocked_after_seven_days() {
        let pred = blocked_after::<BlockedRequester>(now(), 7, DurationUnit::Days);
        assert!(pred(&requester_blocked_at(now() - Duration::days(10))));
        assert!(!pred(&requester_blocked_at(now() - Duration::days(1))));
    }

    #[test]
    fn test_blocked_within_seven_days() {
        let pred = blocked_within::<BlockedRequester>(now(), 7, DurationUnit::Days);
        assert!(pred(&requester_blocked_at(now() - Duration::days(1))));
        assert!(!pred(&requester_blocked_at(now() - Duration::days(10))));
    }

    #[test]
    fn test_predicates_agree_with_date_helpers() {
        use hitfinder_core::dates::{older_than, younger_than};

        for unit in [DurationUnit::Hours, DurationUnit::Days, DurationUnit::Months] {
            let cutoff = threshold(now(), 3, unit);
            let after = blocked_after::<BlockedRequester>(now(), 3, unit);
            let within = blocked_within::<BlockedRequester>(now(), 3, unit);

            for date in [
                cutoff - Duration::seconds(1),
                cutoff,
                cutoff + Duration::seconds(1),
            ] {
                let entry = BlockedRequester {
                    id: "A".into(),
                    name: "a".into(),
                    date_blocked: date,
                };
                assert_eq!(after(&entry), older_than(date, 3, now(), unit));
                assert_eq!(within(&entry), younger_than(date, 3, now(), unit));
            }

            let at_cutoff = BlockedRequester {
                id: "B".into(),
                name: "b".into(),
                date_blocked: cutoff,
            };
            assert!(!after(&at_cutoff));
            assert!(!within(&at_cutoff));
        }
    }

    #[test]
    fn test_blocked_hit_copies_identity_and_stamps_clock() {
        let clock = FixedClock(now());
        let blocked = blocked_hit_from_search_result(&search_item(), &clock);

        assert_eq!(blocked.group_id, ItemKey::Natural("G7".into()));
        assert_eq!(blocked.title.as_deref(), Ok("Rate tweets"));
        assert_eq!(
            blocked.requester,
            Some(Requester {
                id: "A1".into(),
                name: "Acme".into()
            })
        );
        assert_eq!(blocked.date_blocked, now());
        assert_eq!(blocked.key(), "G7");
    }

    #[test]
    fn test_blocked_hit_without_requester_id() {
        let mut item = search_item();
        item.requester_id = Err(ExtractionError::missing(FieldKind::RequesterId));

        let blocked = blocked_hit_from_search_result(&item, &FixedClock(now()));
        assert_eq!(blocked.requester, None);
    }

    #[test]
    fn test_create_blocked_requester() {
        let requester = Requester {
            id: "A9".into(),
            name: "Lab".into(),
        };
        let blocked = create_blocked_requester(&requester, &FixedClock(now()));
        assert_eq!(blocked.id, "A9");
        assert_eq!(blocked.name, "Lab");
        assert_eq!(blocked.date_blocked, now());
        assert_eq!(block_confirmation(&requester), "Lab has been added to your blocklist.");
    }
}
