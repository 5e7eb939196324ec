mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing::warn;

use hitfinder_core::config::AppConfig;
use hitfinder_core::validate_min_reward;

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    // One fetch at a time; no need for worker threads.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_str = std::fs::read_to_string(&cli.config).unwrap_or_else(|_| {
        warn!(path = %cli.config, "config file not found, using defaults");
        include_str!("../config/default.toml").to_string()
    });
    let mut config: AppConfig = toml::from_str(&config_str)?;

    if let Ok(v) = std::env::var("HITFINDER_BASE_URL") {
        config.api.base_url = v;
    }
    if let Ok(v) = std::env::var("HITFINDER_MIN_REWARD") {
        validate_min_reward(&v)?;
        config.search.min_reward = v;
    }
    if let Ok(v) = std::env::var("HITFINDER_DATA_DIR") {
        config.storage.data_dir = v;
    }

    match cli.command {
        Commands::Search {
            sort,
            min_reward,
            qualified,
            save,
            json,
        } => {
            commands::search::run(config, sort, min_reward, qualified, save, json).await?;
        }
        Commands::Queue { json } => {
            commands::queue::run(config, json).await?;
        }
        Commands::Parse { file, queue } => {
            commands::parse::run(&file, queue)?;
        }
        Commands::BlockRequester { id, name } => {
            commands::block::block_requester(config, id, name).await?;
        }
        Commands::BlockHit { group_id, page } => {
            commands::block::block_hit(config, &group_id, page.as_deref()).await?;
        }
        Commands::Unblock { key } => {
            commands::block::unblock(config, &key).await?;
        }
        Commands::Blocklist {
            older_than,
            within,
            unit,
        } => {
            commands::blocklist::run(config, older_than, within, &unit).await?;
        }
        Commands::ImportBackup { file } => {
            commands::backup::run(config, &file).await?;
        }
    }

    Ok(())
}
