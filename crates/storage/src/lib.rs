use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use hitfinder_blocklist::Blocklist;
use hitfinder_core::{BlockedHit, BlockedRequester, SearchOptions};

pub mod backup;

pub use backup::{import_backup, validate_backup, PersistedStateKey};

const STATE_FILE: &str = "state.json";

/// Everything the user keeps between runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub hit_blocklist: Blocklist<BlockedHit>,
    #[serde(default)]
    pub requester_blocklist: Blocklist<BlockedRequester>,
    #[serde(default)]
    pub search_options: Option<SearchOptions>,
}

impl PersistedState {
    /// Fold an imported state in. Imported entries replace existing ones with
    /// the same key; imported search options replace the current ones.
    pub fn merge(&mut self, imported: PersistedState) {
        self.hit_blocklist.extend(imported.hit_blocklist);
        self.requester_blocklist.extend(imported.requester_blocklist);
        if imported.search_options.is_some() {
            self.search_options = imported.search_options;
        }
    }
}

/// JSON snapshot store under a data directory.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub async fn new(data_dir: impl AsRef<Path>) -> Result<Self> {
        let dir = data_dir.as_ref();
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("failed to create data dir {}", dir.display()))?;

        Ok(Self {
            path: dir.join(STATE_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot; a missing file is an empty state.
    pub async fn load(&self) -> Result<PersistedState> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved state");
                return Ok(PersistedState::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", self.path.display()))
            }
        };

        serde_json::from_str(&raw)
            .with_context(|| format!("corrupt state file {}", self.path.display()))
    }

    /// Write the snapshot via a temp file and rename.
    pub async fn save(&self, state: &PersistedState) -> Result<()> {
        let json = serde_json::to_string_pretty(state)?;
        let tmp = self.path.with_extension("json.tmp");

        tokio::fs::write(&tmp, json)
            .await
            .with_context(|| format!("failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("failed to replace {}", self.path.display()))?;

        info!(
            path = %self.path.display(),
            blocked_hits = state.hit_blocklist.len(),
            blocked_requesters = state.requester_blocklist.len(),
            "state saved"
        );
        Ok(())
    }
}
