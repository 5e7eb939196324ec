use scraper::{ElementRef, Html};
use tracing::debug;

use hitfinder_core::{Clock, QueueMap, SearchMap};

use crate::extract::{create_queue_item, create_search_item};
use crate::markup::HIT_CONTAINER_SEL;

/// Every HIT container in the document, in document order.
pub fn select_hit_containers(document: &Html) -> Vec<ElementRef<'_>> {
    document.select(&HIT_CONTAINER_SEL).collect()
}

/// Fold search rows into a map keyed by group id. A repeated group id keeps
/// its first position but takes the later row's record.
pub fn tabulate_search_data<'a>(
    hits: impl IntoIterator<Item = ElementRef<'a>>,
    clock: &dyn Clock,
) -> SearchMap {
    hits.into_iter().fold(SearchMap::new(), |mut map, hit| {
        let item = create_search_item(hit, clock);
        map.insert(item.group_id.clone(), item);
        map
    })
}

/// Fold queue rows into a map keyed by hit id, last row wins.
pub fn tabulate_queue_data<'a>(hits: impl IntoIterator<Item = ElementRef<'a>>) -> QueueMap {
    hits.into_iter().fold(QueueMap::new(), |mut map, hit| {
        let item = create_queue_item(hit);
        map.insert(item.hit_id.clone(), item);
        map
    })
}

pub fn parse_search_page(html: &str, clock: &dyn Clock) -> SearchMap {
    let document = Html::parse_document(html);
    let containers = select_hit_containers(&document);
    debug!(containers = containers.len(), "parsed search page");
    tabulate_search_data(containers, clock)
}

pub fn parse_queue_page(html: &str) -> QueueMap {
    let document = Html::parse_document(html);
    let containers = select_hit_containers(&document);
    debug!(containers = containers.len(), "parsed queue page");
    tabulate_queue_data(containers)
}
