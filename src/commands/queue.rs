use anyhow::Result;

use hitfinder_core::config::AppConfig;
use hitfinder_core::SentinelExt;
use hitfinder_fetcher::{fetch_queue, MturkClient};

pub async fn run(config: AppConfig, json: bool) -> Result<()> {
    let client = MturkClient::new(&config.api)?;
    let queue = fetch_queue(&client).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&queue)?);
        return Ok(());
    }

    println!("{} HITs in your queue:\n", queue.len());
    for item in queue.values() {
        println!(
            "  [{}] {} - ${} ({})",
            item.hit_id,
            item.title.or_sentinel(),
            item.reward.or_sentinel(),
            item.requester_name.or_sentinel()
        );
    }

    Ok(())
}
