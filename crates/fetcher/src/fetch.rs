use std::time::Instant;

use tracing::{info, warn};

use hitfinder_core::{Clock, HitFinderError, PageSource, QueueMap, SearchMap, SearchOptions};
use hitfinder_parser::{parse_queue_page, parse_search_page};

use crate::query::{generate_query_string, QUEUE_PATH};

/// Fetch one search-results page and tabulate it.
///
/// Exactly one request is made. A transport failure or error status fails the
/// whole call; there is no partial map and no retry.
pub async fn batch_fetch_hits(
    source: &dyn PageSource,
    options: &SearchOptions,
    clock: &dyn Clock,
) -> Result<SearchMap, HitFinderError> {
    let path = generate_query_string(options);
    info!(source = source.name(), path = %path, "fetching HITs");

    let start = Instant::now();
    let html = source.get_html(&path).await.map_err(|e| {
        warn!(error = %e, "search fetch failed");
        e
    })?;
    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        bytes = html.len(),
        "time to fetch HITs"
    );

    Ok(parse_search_page(&html, clock))
}

/// Fetch the queue page and tabulate it, same failure policy as the search.
pub async fn fetch_queue(source: &dyn PageSource) -> Result<QueueMap, HitFinderError> {
    info!(source = source.name(), path = QUEUE_PATH, "fetching queue");

    let start = Instant::now();
    let html = source.get_html(QUEUE_PATH).await.map_err(|e| {
        warn!(error = %e, "queue fetch failed");
        e
    })?;
    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        "time to fetch queue"
    );

    Ok(parse_queue_page(&html))
}
