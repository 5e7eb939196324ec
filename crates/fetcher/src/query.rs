use hitfinder_core::{validate_min_reward, HitFinderError, SearchOptions, SearchSort};

pub const SEARCH_PATH: &str = "/mturk/searchbar?selectedSearchType=hitgroups";
pub const QUEUE_PATH: &str = "/mturk/myhits";

/// Path and query of the search-results page for `options`.
pub fn generate_query_string(options: &SearchOptions) -> String {
    format!(
        "{}{}{}{}",
        SEARCH_PATH,
        sort_param(options.sort_type),
        min_reward_param(&options.min_reward),
        qualified_param(options.qualified)
    )
}

fn sort_value(sorting: SearchSort) -> &'static str {
    match sorting {
        SearchSort::Latest => "LastUpdatedTime:1",
        SearchSort::BatchSize => "NumHITs:1",
        SearchSort::Reward => "Reward:1",
    }
}

fn encoded_sort_value(sorting: SearchSort) -> String {
    sort_value(sorting).replace(':', "%3A")
}

fn sort_param(sorting: SearchSort) -> String {
    format!("&sortType={}", encoded_sort_value(sorting))
}

// Passed through as typed; the site accepts the raw decimal string.
fn min_reward_param(min_reward: &str) -> String {
    format!("&minReward={}", min_reward)
}

fn qualified_param(qualified: bool) -> &'static str {
    if qualified {
        "&qualifiedFor=on"
    } else {
        "&qualifiedFor=off"
    }
}

/// Recover the options from a path built by [`generate_query_string`].
pub fn parse_query_string(query: &str) -> Result<SearchOptions, HitFinderError> {
    let (_, raw) = query
        .split_once('?')
        .ok_or_else(|| HitFinderError::Config(format!("no query in {:?}", query)))?;

    let mut sort_type = None;
    let mut min_reward = None;
    let mut qualified = None;

    // Split without decoding: the generator writes every value raw.
    for pair in raw.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        match key {
            "sortType" => {
                sort_type = Some(
                    [SearchSort::Latest, SearchSort::BatchSize, SearchSort::Reward]
                        .into_iter()
                        .find(|s| encoded_sort_value(*s) == value)
                        .ok_or_else(|| {
                            HitFinderError::Config(format!("unknown sortType {:?}", value))
                        })?,
                );
            }
            "minReward" => {
                validate_min_reward(value)?;
                min_reward = Some(value.to_string());
            }
            "qualifiedFor" => {
                qualified = Some(match value {
                    "on" => true,
                    "off" => false,
                    other => {
                        return Err(HitFinderError::Config(format!(
                            "unknown qualifiedFor {:?}",
                            other
                        )))
                    }
                })
            }
            _ => {}
        }
    }

    let missing = |name: &str| HitFinderError::Config(format!("missing {} param", name));
    Ok(SearchOptions {
        sort_type: sort_type.ok_or_else(|| missing("sortType"))?,
        min_reward: min_reward.ok_or_else(|| missing("minReward"))?,
        qualified: qualified.ok_or_else(|| missing("qualifiedFor"))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reward_query_string() {
        let options = SearchOptions {
            sort_type: SearchSort::Reward,
            min_reward: "0.10".to_string(),
            qualified: true,
        };
        assert_eq!(
            generate_query_string(&options),
            "/mturk/searchbar?selectedSearchType=hitgroups&sortType=Reward%3A1&minReward=0.10&qualifiedFor=on"
        );
    }

    #[test]
    fn test_sort_and_qualified_params() {
        let latest = SearchOptions {
            sort_type: SearchSort::Latest,
            min_reward: "0.00".to_string(),
            qualified: false,
        };
        let q = generate_query_string(&latest);
        assert!(q.contains("&sortType=LastUpdatedTime%3A1"));
        assert!(q.ends_with("&qualifiedFor=off"));

        let batch = SearchOptions {
            sort_type: SearchSort::BatchSize,
            ..latest
        };
        assert!(generate_query_string(&batch).contains("&sortType=NumHITs%3A1"));
    }

    #[test]
    fn test_round_trip() {
        for sort_type in [SearchSort::Latest, SearchSort::BatchSize, SearchSort::Reward] {
            for qualified in [true, false] {
                for min_reward in ["0", "0.00", "1.50", "12.345", ".5", "100"] {
                    let options = SearchOptions {
                        sort_type,
                        min_reward: min_reward.to_string(),
                        qualified,
                    };
                    let parsed = parse_query_string(&generate_query_string(&options)).unwrap();
                    assert_eq!(parsed, options);
                }
            }
        }
    }

    #[test]
    fn test_parse_rejects_escaped_or_injected_reward() {
        for query in [
            "/mturk/searchbar?sortType=Reward%3A1&minReward=1+2&qualifiedFor=on",
            "/mturk/searchbar?sortType=Reward%3A1&minReward=0.10%20&qualifiedFor=on",
        ] {
            let err = parse_query_string(query).unwrap_err();
            assert!(matches!(err, HitFinderError::Config(_)), "{}", query);
        }
    }

    #[test]
    fn test_unrecognized_sort_type_fails_fast() {
        let err = "Oldest".parse::<SearchSort>().unwrap_err();
        assert!(matches!(err, HitFinderError::Config(_)));

        let err = parse_query_string(
            "/mturk/searchbar?selectedSearchType=hitgroups&sortType=Title%3A0&minReward=0&qualifiedFor=on",
        )
        .unwrap_err();
        assert!(matches!(err, HitFinderError::Config(_)));
    }

    #[test]
    fn test_parse_rejects_incomplete_query() {
        assert!(parse_query_string("/mturk/searchbar").is_err());
        assert!(parse_query_string("/mturk/searchbar?sortType=Reward%3A1&qualifiedFor=on").is_err());
    }
}
