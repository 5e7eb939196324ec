use anyhow::Result;
use chrono::{DateTime, Utc};

use hitfinder_blocklist::{blocked_after, blocked_within, Blocklist};
use hitfinder_core::config::AppConfig;
use hitfinder_core::{BlockedEntry, BlockedHit, BlockedRequester, DurationUnit, SentinelExt};

use super::open_storage;

enum AgeFilter {
    All,
    OlderThan(u32, DurationUnit),
    Within(u32, DurationUnit),
}

impl AgeFilter {
    fn select<'a, T: BlockedEntry>(
        &self,
        list: &'a Blocklist<T>,
        now: DateTime<Utc>,
    ) -> Vec<&'a T> {
        match *self {
            Self::All => list.iter().collect(),
            Self::OlderThan(n, unit) => list.filtered(blocked_after::<T>(now, n, unit)).collect(),
            Self::Within(n, unit) => list.filtered(blocked_within::<T>(now, n, unit)).collect(),
        }
    }
}

pub async fn run(
    config: AppConfig,
    older_than: Option<u32>,
    within: Option<u32>,
    unit: &str,
) -> Result<()> {
    let unit: DurationUnit = unit.parse()?;
    let filter = match (older_than, within) {
        (Some(n), _) => AgeFilter::OlderThan(n, unit),
        (None, Some(n)) => AgeFilter::Within(n, unit),
        (None, None) => AgeFilter::All,
    };

    let storage = open_storage(&config).await?;
    let state = storage.load().await?;
    let now = Utc::now();

    let requesters: Vec<&BlockedRequester> = filter.select(&state.requester_blocklist, now);
    println!("Blocked requesters ({}):", requesters.len());
    for r in requesters {
        println!("  {} - {} (since {})", r.id, r.name, r.date_blocked.format("%Y-%m-%d"));
    }

    let hits: Vec<&BlockedHit> = filter.select(&state.hit_blocklist, now);
    println!("\nBlocked HITs ({}):", hits.len());
    for h in hits {
        let by = h
            .requester
            .as_ref()
            .map(|r| r.name.as_str())
            .unwrap_or("unknown requester");
        println!(
            "  {} - {} by {} (since {})",
            h.group_id,
            h.title.or_sentinel(),
            by,
            h.date_blocked.format("%Y-%m-%d")
        );
    }

    Ok(())
}
