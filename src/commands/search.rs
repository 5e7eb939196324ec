use anyhow::Result;
use tracing::info;

use hitfinder_blocklist::filter_search_results;
use hitfinder_core::config::AppConfig;
use hitfinder_core::{validate_min_reward, SearchOptions, SystemClock};
use hitfinder_fetcher::{batch_fetch_hits, MturkClient};

use super::{open_storage, print_search_item};

/// Options in order of precedence: flags, saved options, config file.
fn resolve_options(
    base: SearchOptions,
    sort: Option<String>,
    min_reward: Option<String>,
    qualified: Option<bool>,
) -> Result<SearchOptions> {
    let mut options = base;
    if let Some(sort) = sort {
        options.sort_type = sort.parse()?;
    }
    if let Some(min_reward) = min_reward {
        validate_min_reward(&min_reward)?;
        options.min_reward = min_reward;
    }
    if let Some(qualified) = qualified {
        options.qualified = qualified;
    }
    Ok(options)
}

pub async fn run(
    config: AppConfig,
    sort: Option<String>,
    min_reward: Option<String>,
    qualified: Option<bool>,
    save: bool,
    json: bool,
) -> Result<()> {
    let storage = open_storage(&config).await?;
    let mut state = storage.load().await?;

    let base = state
        .search_options
        .clone()
        .unwrap_or_else(|| config.search.clone());
    let options = resolve_options(base, sort, min_reward, qualified)?;

    if save {
        state.search_options = Some(options.clone());
        storage.save(&state).await?;
    }

    let client = MturkClient::new(&config.api)?;
    let hits = batch_fetch_hits(&client, &options, &SystemClock).await?;
    let total = hits.len();
    let hits = filter_search_results(hits, &state.requester_blocklist, &state.hit_blocklist);
    info!(total, visible = hits.len(), "search complete");

    if json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    println!(
        "Found {} HITs ({} hidden by blocklist):\n",
        hits.len(),
        total - hits.len()
    );
    for item in hits.values().take(config.display.max_results) {
        print_search_item(item);
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hitfinder_core::SearchSort;

    #[test]
    fn test_flags_override_saved_options() {
        let saved = SearchOptions {
            sort_type: SearchSort::Reward,
            min_reward: "0.50".into(),
            qualified: false,
        };

        let resolved =
            resolve_options(saved.clone(), Some("Batch Size".into()), None, Some(true)).unwrap();
        assert_eq!(resolved.sort_type, SearchSort::BatchSize);
        assert_eq!(resolved.min_reward, "0.50");
        assert!(resolved.qualified);

        assert_eq!(resolve_options(saved.clone(), None, None, None).unwrap(), saved);
    }

    #[test]
    fn test_unknown_sort_flag_is_fatal() {
        let err = resolve_options(SearchOptions::default(), Some("Title".into()), None, None)
            .unwrap_err();
        assert!(err.to_string().contains("sortType"));
    }

    #[test]
    fn test_min_reward_flag_must_be_decimal() {
        for bad in ["1+2", "0&qualifiedFor=off"] {
            let err = resolve_options(SearchOptions::default(), None, Some(bad.into()), None)
                .unwrap_err();
            assert!(err.to_string().contains("minReward"), "{}", bad);
        }
        let ok = resolve_options(SearchOptions::default(), None, Some("12.5".into()), None);
        assert_eq!(ok.unwrap().min_reward, "12.5");
    }
}
