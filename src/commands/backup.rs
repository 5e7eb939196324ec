use anyhow::{Context, Result};

use hitfinder_core::config::AppConfig;
use hitfinder_storage::{import_backup, validate_backup};

use super::open_storage;

pub async fn run(config: AppConfig, file: &str) -> Result<()> {
    let json = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read {}", file))?;

    let keys = validate_backup(&json)?;
    if keys.is_empty() {
        println!("The uploaded file contains no valid data.");
        return Ok(());
    }

    println!("Importing:");
    for key in &keys {
        println!("  {}", key.label());
    }

    let imported = import_backup(&json)?;
    let storage = open_storage(&config).await?;
    let mut state = storage.load().await?;
    state.merge(imported);
    storage.save(&state).await?;

    println!("Import complete.");
    Ok(())
}
