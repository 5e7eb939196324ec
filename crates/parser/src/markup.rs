//! Selectors for the MTurk page markup. These mirror the upstream HTML
//! exactly; any change there breaks extraction.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Selector;

pub const HIT_CONTAINER: &str =
    r#"table[width="100%"][cellspacing="0"][cellpadding="0"][border="0"][height="100%"]"#;
pub const TITLE_LINK: &str = "a.capsulelink";
pub const REQUESTER_IDENTITY: &str = "span.requesterIdentity";
pub const REWARD: &str = "span.reward";
pub const REQUESTER_ID_ANCHOR: &str = r#"a[href*="requesterId="]"#;
pub const GROUP_ID_ANCHOR: &str = r#"a[href*="groupId="]"#;
pub const HIT_ID_ANCHOR: &str = r#"a[href*="hitId="]"#;
pub const CAPSULE_FIELD: &str = "td.capsule_field_text";
pub const SUBMIT_FORM: &str = r#"form[action="/mturk/submit"]"#;

/// Position of the "HITs Available" cell among the capsule fields.
pub const BATCH_SIZE_CELL_INDEX: usize = 4;

pub const REQUESTER_ID_MARKER: &str = "requesterId=";

pub(crate) static HIT_CONTAINER_SEL: Lazy<Selector> = Lazy::new(|| sel(HIT_CONTAINER));
pub(crate) static TITLE_LINK_SEL: Lazy<Selector> = Lazy::new(|| sel(TITLE_LINK));
pub(crate) static REQUESTER_IDENTITY_SEL: Lazy<Selector> = Lazy::new(|| sel(REQUESTER_IDENTITY));
pub(crate) static REWARD_SEL: Lazy<Selector> = Lazy::new(|| sel(REWARD));
pub(crate) static REQUESTER_ID_ANCHOR_SEL: Lazy<Selector> = Lazy::new(|| sel(REQUESTER_ID_ANCHOR));
pub(crate) static GROUP_ID_ANCHOR_SEL: Lazy<Selector> = Lazy::new(|| sel(GROUP_ID_ANCHOR));
pub(crate) static HIT_ID_ANCHOR_SEL: Lazy<Selector> = Lazy::new(|| sel(HIT_ID_ANCHOR));
pub(crate) static CAPSULE_FIELD_SEL: Lazy<Selector> = Lazy::new(|| sel(CAPSULE_FIELD));
pub(crate) static SUBMIT_FORM_SEL: Lazy<Selector> = Lazy::new(|| sel(SUBMIT_FORM));

pub(crate) static GROUP_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"groupId=([^&#]*)").unwrap());

pub(crate) static HIT_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"hitId=([^&#]*)").unwrap());

// Selector strings above are constants; a parse failure is a programming error.
fn sel(s: &str) -> Selector {
    Selector::parse(s).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_selectors_parse() {
        for s in [
            HIT_CONTAINER,
            TITLE_LINK,
            REQUESTER_IDENTITY,
            REWARD,
            REQUESTER_ID_ANCHOR,
            GROUP_ID_ANCHOR,
            HIT_ID_ANCHOR,
            CAPSULE_FIELD,
            SUBMIT_FORM,
        ] {
            assert!(Selector::parse(s).is_ok(), "selector failed: {}", s);
        }
    }

    #[test]
    fn test_id_patterns() {
        let caps = GROUP_ID_RE
            .captures("/mturk/preview?groupId=3AB9XYZ&foo=bar")
            .unwrap();
        assert_eq!(&caps[1], "3AB9XYZ");

        let caps = HIT_ID_RE.captures("/mturk/continue?hitId=H42").unwrap();
        assert_eq!(&caps[1], "H42");
    }
}
