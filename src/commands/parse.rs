use anyhow::{Context, Result};

use hitfinder_core::SystemClock;
use hitfinder_parser::{parse_queue_page, parse_search_page};

/// Tabulate a saved page and print it as JSON.
pub fn run(file: &str, queue: bool) -> Result<()> {
    let html = std::fs::read_to_string(file).with_context(|| format!("failed to read {}", file))?;

    let json = if queue {
        serde_json::to_string_pretty(&parse_queue_page(&html))?
    } else {
        serde_json::to_string_pretty(&parse_search_page(&html, &SystemClock))?
    };
    println!("{}", json);

    Ok(())
}
