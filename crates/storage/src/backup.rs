//! Settings backups exported by the browser extension.
//!
//! A backup is a JSON object whose keys carry a `reduxPersist:` prefix. Each
//! value is either the state itself or that state serialized to a string.

use serde_json::{Map, Value};
use tracing::warn;

use hitfinder_core::HitFinderError;

use crate::PersistedState;

const KEY_PREFIX: &str = "reduxPersist:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersistedStateKey {
    HitBlocklist,
    RequesterBlocklist,
    SearchOptions,
}

impl PersistedStateKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HitBlocklist => "hitBlocklist",
            Self::RequesterBlocklist => "requesterBlocklist",
            Self::SearchOptions => "searchOptions",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::HitBlocklist => "HIT Blocklist",
            Self::RequesterBlocklist => "Requester Blocklist",
            Self::SearchOptions => "Search Settings",
        }
    }

    /// Map a raw backup key such as `reduxPersist:hitBlocklist`.
    pub fn from_backup_key(raw: &str) -> Option<Self> {
        match raw.strip_prefix(KEY_PREFIX)? {
            "hitBlocklist" => Some(Self::HitBlocklist),
            "requesterBlocklist" => Some(Self::RequesterBlocklist),
            "searchOptions" => Some(Self::SearchOptions),
            _ => None,
        }
    }
}

fn parse_object(json: &str) -> Result<Map<String, Value>, HitFinderError> {
    match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(HitFinderError::Storage("backup is not a JSON object".into())),
        Err(e) => Err(HitFinderError::Storage(format!("backup is not valid JSON: {}", e))),
    }
}

/// Recognized keys of a backup, sorted by raw key. Unknown keys are ignored.
pub fn validate_backup(json: &str) -> Result<Vec<PersistedStateKey>, HitFinderError> {
    let object = parse_object(json)?;
    Ok(object
        .keys()
        .filter_map(|k| PersistedStateKey::from_backup_key(k))
        .collect())
}

/// Decode the recognized parts of a backup.
pub fn import_backup(json: &str) -> Result<PersistedState, HitFinderError> {
    let object = parse_object(json)?;
    let mut decoded = Map::new();

    for (raw_key, value) in object {
        let Some(key) = PersistedStateKey::from_backup_key(&raw_key) else {
            warn!(key = %raw_key, "ignoring unknown backup key");
            continue;
        };

        let value = match value {
            Value::String(inner) => serde_json::from_str(&inner).map_err(|e| {
                HitFinderError::Storage(format!("{}: {}", key.as_str(), e))
            })?,
            other => other,
        };

        let value = match (key, value) {
            // Blocklists were saved as id-keyed objects.
            (PersistedStateKey::HitBlocklist | PersistedStateKey::RequesterBlocklist, Value::Object(entries)) => {
                Value::Array(entries.into_iter().map(|(_, v)| v).collect())
            }
            (_, other) => other,
        };

        decoded.insert(key.as_str().to_string(), value);
    }

    serde_json::from_value(Value::Object(decoded))
        .map_err(|e| HitFinderError::Storage(format!("backup contents: {}", e)))
}
