use anyhow::{bail, Context, Result};
use tracing::info;

use hitfinder_blocklist::{block_confirmation, blocked_hit_from_search_result, create_blocked_requester};
use hitfinder_core::config::AppConfig;
use hitfinder_core::{ItemKey, Requester, SearchMap, SentinelExt, SystemClock};
use hitfinder_fetcher::{batch_fetch_hits, MturkClient};
use hitfinder_parser::parse_search_page;

use super::open_storage;

pub async fn block_requester(config: AppConfig, id: String, name: String) -> Result<()> {
    let storage = open_storage(&config).await?;
    let mut state = storage.load().await?;

    let requester = Requester { id, name };
    let entry = create_blocked_requester(&requester, &SystemClock);
    if state.requester_blocklist.block(entry).is_some() {
        info!(id = %requester.id, "requester was already blocked, date refreshed");
    }
    storage.save(&state).await?;

    println!("{}", block_confirmation(&requester));
    Ok(())
}

pub async fn block_hit(config: AppConfig, group_id: &str, page: Option<&str>) -> Result<()> {
    let storage = open_storage(&config).await?;
    let mut state = storage.load().await?;

    let hits: SearchMap = match page {
        Some(file) => {
            let html = std::fs::read_to_string(file)
                .with_context(|| format!("failed to read {}", file))?;
            parse_search_page(&html, &SystemClock)
        }
        None => {
            let options = state
                .search_options
                .clone()
                .unwrap_or_else(|| config.search.clone());
            let client = MturkClient::new(&config.api)?;
            batch_fetch_hits(&client, &options, &SystemClock).await?
        }
    };

    let key = ItemKey::from(group_id.to_string());
    let Some(hit) = hits.get(&key) else {
        bail!("no HIT with group id {} in the current results", group_id);
    };

    let entry = blocked_hit_from_search_result(hit, &SystemClock);
    state.hit_blocklist.block(entry);
    storage.save(&state).await?;

    println!("Blocked \"{}\" ({}).", hit.title.or_sentinel(), key);
    Ok(())
}

/// Remove `key` from whichever list holds it.
pub async fn unblock(config: AppConfig, key: &str) -> Result<()> {
    let storage = open_storage(&config).await?;
    let mut state = storage.load().await?;

    if let Some(requester) = state.requester_blocklist.unblock(key) {
        storage.save(&state).await?;
        println!("{} has been removed from your blocklist.", requester.name);
    } else if let Some(hit) = state.hit_blocklist.unblock(key) {
        storage.save(&state).await?;
        println!("\"{}\" has been removed from your blocklist.", hit.title.or_sentinel());
    } else {
        bail!("{} is not blocked", key);
    }

    Ok(())
}
