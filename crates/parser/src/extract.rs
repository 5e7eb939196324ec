use regex::Regex;
use scraper::{ElementRef, Selector};

use hitfinder_core::{
    Clock, Extracted, ExtractionError, FieldKind, ItemKey, QueueItem, SearchItem,
};

use crate::markup::{
    BATCH_SIZE_CELL_INDEX, CAPSULE_FIELD_SEL, GROUP_ID_ANCHOR_SEL, GROUP_ID_RE,
    HIT_ID_ANCHOR_SEL, HIT_ID_RE, REQUESTER_IDENTITY_SEL, REQUESTER_ID_ANCHOR_SEL,
    REQUESTER_ID_MARKER, REWARD_SEL, SUBMIT_FORM_SEL, TITLE_LINK_SEL,
};

/// Batch size reported when the cell is missing or unreadable.
pub const DEFAULT_BATCH_SIZE: u32 = 1;

/// Text of the first `sel` match under `hit`, if that text is non-empty.
fn first_text(hit: ElementRef<'_>, sel: &Selector) -> Option<String> {
    hit.select(sel)
        .next()
        .map(|el| el.text().collect::<String>())
        .filter(|t| !t.is_empty())
}

fn first_href<'a>(hit: ElementRef<'a>, sel: &Selector) -> Option<&'a str> {
    hit.select(sel).next().and_then(|el| el.value().attr("href"))
}

fn id_from_anchor(hit: ElementRef<'_>, sel: &Selector, re: &Regex) -> ItemKey {
    first_href(hit, sel)
        .and_then(|href| re.captures(href))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|id| !id.is_empty())
        .map(|id| ItemKey::Natural(id.to_string()))
        .unwrap_or_else(ItemKey::synthesize)
}

pub fn parse_hit_title(hit: ElementRef<'_>) -> Extracted<String> {
    first_text(hit, &TITLE_LINK_SEL)
        .map(|t| t.trim().to_string())
        .ok_or(ExtractionError::missing(FieldKind::Title))
}

/// Raw text of the requester span, untrimmed.
pub fn parse_requester_name(hit: ElementRef<'_>) -> Extracted<String> {
    first_text(hit, &REQUESTER_IDENTITY_SEL)
        .ok_or(ExtractionError::missing(FieldKind::RequesterName))
}

/// Everything after `requesterId=` in the requester anchor. The id's shape is
/// not checked.
pub fn parse_requester_id(hit: ElementRef<'_>) -> Extracted<String> {
    let href = first_href(hit, &REQUESTER_ID_ANCHOR_SEL)
        .ok_or(ExtractionError::missing(FieldKind::RequesterId))?;

    Ok(href
        .split_once(REQUESTER_ID_MARKER)
        .map(|(_, id)| id.to_string())
        .unwrap_or_default())
}

/// Reward text with the currency symbol dropped. Stays a string.
pub fn parse_hit_reward(hit: ElementRef<'_>) -> Extracted<String> {
    first_text(hit, &REWARD_SEL)
        .map(|t| t.replacen('$', "", 1))
        .ok_or(ExtractionError::missing(FieldKind::Reward))
}

/// Group id from the preview anchor, or a fresh synthetic key.
pub fn parse_group_id(hit: ElementRef<'_>) -> ItemKey {
    id_from_anchor(hit, &GROUP_ID_ANCHOR_SEL, &GROUP_ID_RE)
}

/// Hit id from the queue row's continue anchor, or a fresh synthetic key.
pub fn parse_hit_id_queue(hit: ElementRef<'_>) -> ItemKey {
    id_from_anchor(hit, &HIT_ID_ANCHOR_SEL, &HIT_ID_RE)
}

/// Number of HITs in the group, read from a fixed capsule cell.
pub fn parse_batch_size(hit: ElementRef<'_>) -> u32 {
    hit.select(&CAPSULE_FIELD_SEL)
        .nth(BATCH_SIZE_CELL_INDEX)
        .map(|cell| cell.text().collect::<String>())
        .and_then(|text| leading_integer(&text))
        .filter(|&n| n >= 1)
        .unwrap_or(DEFAULT_BATCH_SIZE)
}

/// Leading run of decimal digits after optional whitespace and `+`.
fn leading_integer(text: &str) -> Option<u32> {
    let trimmed = text.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..end].parse().ok()
}

/// Whether the fragment carries a HIT submission form.
pub fn find_hit_form(hit: ElementRef<'_>) -> bool {
    hit.select(&SUBMIT_FORM_SEL).next().is_some()
}

pub fn create_search_item(hit: ElementRef<'_>, clock: &dyn Clock) -> SearchItem {
    SearchItem {
        title: parse_hit_title(hit),
        requester_name: parse_requester_name(hit),
        requester_id: parse_requester_id(hit),
        reward: parse_hit_reward(hit),
        group_id: parse_group_id(hit),
        time: clock.now(),
        batch_size: parse_batch_size(hit),
    }
}

pub fn create_queue_item(hit: ElementRef<'_>) -> QueueItem {
    QueueItem {
        title: parse_hit_title(hit),
        hit_id: parse_hit_id_queue(hit),
        requester_name: parse_requester_name(hit),
        reward: parse_hit_reward(hit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{search_row, RowSpec};
    use chrono::{TimeZone, Utc};
    use hitfinder_core::FixedClock;
    use scraper::Html;

    fn with_hit<R>(html: &str, f: impl FnOnce(ElementRef<'_>) -> R) -> R {
        let document = Html::parse_document(html);
        let hit = crate::select_hit_containers(&document)
            .into_iter()
            .next()
            .expect("fixture has a container");
        f(hit)
    }

    #[test]
    fn test_full_row() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());
        let html = search_row(&RowSpec::default());

        let item = with_hit(&html, |hit| create_search_item(hit, &clock));

        assert_eq!(item.title.as_deref(), Ok("Transcribe a receipt"));
        assert_eq!(item.requester_name.as_deref(), Ok("Acme Research"));
        assert_eq!(item.requester_id.as_deref(), Ok("A1REQ"));
        assert_eq!(item.reward.as_deref(), Ok("0.25"));
        assert_eq!(item.group_id, ItemKey::Natural("3GROUP".into()));
        assert_eq!(item.batch_size, 120);
        assert_eq!(item.time, clock.0);
    }

    #[test]
    fn test_empty_fragment_yields_every_sentinel() {
        let html = r#"<table width="100%" cellspacing="0" cellpadding="0" border="0" height="100%">
            <tr><td>nothing here</td></tr></table>"#;

        with_hit(html, |hit| {
            assert_eq!(
                parse_hit_title(hit).unwrap_err().to_string(),
                "[Error:title]"
            );
            assert_eq!(
                parse_requester_name(hit).unwrap_err().to_string(),
                "[Error:requesterName]"
            );
            assert_eq!(
                parse_requester_id(hit).unwrap_err().to_string(),
                "[Error:requesterId]"
            );
            assert_eq!(
                parse_hit_reward(hit).unwrap_err().to_string(),
                "[Error:reward]"
            );
            assert!(parse_group_id(hit).is_synthetic());
            assert!(parse_hit_id_queue(hit).is_synthetic());
            assert_eq!(parse_batch_size(hit), DEFAULT_BATCH_SIZE);
            assert!(!find_hit_form(hit));
        });
    }

    #[test]
    fn test_reward_strips_dollar_sign() {
        let html = search_row(&RowSpec {
            reward: Some("$0.25"),
            ..RowSpec::default()
        });
        with_hit(&html, |hit| assert_eq!(parse_hit_reward(hit).as_deref(), Ok("0.25")));
    }

    #[test]
    fn test_title_is_trimmed_but_requester_name_is_raw() {
        let html = search_row(&RowSpec {
            title: Some("   Tag images \n"),
            requester_name: Some(" Bob "),
            ..RowSpec::default()
        });
        with_hit(&html, |hit| {
            assert_eq!(parse_hit_title(hit).as_deref(), Ok("Tag images"));
            assert_eq!(parse_requester_name(hit).as_deref(), Ok(" Bob "));
        });
    }

    #[test]
    fn test_batch_size_fallbacks() {
        for (cell, expected) in [
            ("42", 42),
            (" 7 HITs", 7),
            ("n/a", 1),
            ("0", 1),
            ("-3", 1),
            ("", 1),
        ] {
            let html = search_row(&RowSpec {
                batch_size: Some(cell),
                ..RowSpec::default()
            });
            with_hit(&html, |hit| assert_eq!(parse_batch_size(hit), expected, "cell {:?}", cell));
        }

        let html = search_row(&RowSpec {
            batch_size: None,
            ..RowSpec::default()
        });
        with_hit(&html, |hit| assert_eq!(parse_batch_size(hit), 1));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let html = search_row(&RowSpec::default());
        let clock = FixedClock(Utc::now());
        let document = Html::parse_document(&html);
        let hit = crate::select_hit_containers(&document)[0];

        assert_eq!(create_search_item(hit, &clock), create_search_item(hit, &clock));
    }

    #[test]
    fn test_queue_row_and_submit_form() {
        let html = r#"<table width="100%" cellspacing="0" cellpadding="0" border="0" height="100%">
            <tr><td><a class="capsulelink" href="/mturk/continue?hitId=3HIT&amp;x=1">Survey</a></td></tr>
            <tr><td><span class="requesterIdentity">Lab</span></td></tr>
            <tr><td><span class="reward">$1.00</span></td></tr>
            <tr><td><form action="/mturk/submit" method="post"></form></td></tr>
        </table>"#;

        with_hit(html, |hit| {
            let item = create_queue_item(hit);
            assert_eq!(item.hit_id, ItemKey::Natural("3HIT".into()));
            assert_eq!(item.title.as_deref(), Ok("Survey"));
            assert_eq!(item.reward.as_deref(), Ok("1.00"));
            assert!(find_hit_form(hit));
        });
    }
}
