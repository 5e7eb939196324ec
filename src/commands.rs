pub mod backup;
pub mod block;
pub mod blocklist;
pub mod parse;
pub mod queue;
pub mod search;

use anyhow::Result;
use hitfinder_core::config::AppConfig;
use hitfinder_core::{SearchItem, SentinelExt};
use hitfinder_storage::Storage;

pub(crate) async fn open_storage(config: &AppConfig) -> Result<Storage> {
    Storage::new(&config.storage.data_dir).await
}

pub(crate) fn print_search_item(item: &SearchItem) {
    println!(
        "  [{}] {} - ${} x{}",
        item.group_id,
        item.title.or_sentinel(),
        item.reward.or_sentinel(),
        item.batch_size
    );
    println!(
        "    {} ({})",
        item.requester_name.or_sentinel(),
        item.requester_id.or_sentinel()
    );
}
