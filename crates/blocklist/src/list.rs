use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use hitfinder_core::{BlockedEntry, BlockedHit, BlockedRequester, KeyedMap, SearchMap};

/// Blocked entries in the order they were first blocked. Blocking an existing
/// key replaces the entry.
#[derive(Debug, Clone)]
pub struct Blocklist<T> {
    entries: KeyedMap<String, T>,
}

impl<T: BlockedEntry> Blocklist<T> {
    pub fn new() -> Self {
        Self {
            entries: KeyedMap::new(),
        }
    }

    pub fn block(&mut self, entry: T) -> Option<T> {
        self.entries.insert(entry.key(), entry)
    }

    pub fn unblock(&mut self, key: &str) -> Option<T> {
        self.entries.remove(&key.to_string())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(&key.to_string())
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(&key.to_string())
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// Entries matching `pred`, typically one of the age predicates.
    pub fn filtered<'a>(&'a self, pred: impl Fn(&T) -> bool + 'a) -> impl Iterator<Item = &'a T> {
        self.entries.values().filter(move |e| pred(*e))
    }

    /// Merge another list in; entries from `other` win on key clashes.
    pub fn extend(&mut self, other: Blocklist<T>) {
        for (key, entry) in other.entries {
            self.entries.insert(key, entry);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: BlockedEntry> Default for Blocklist<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: BlockedEntry> FromIterator<T> for Blocklist<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for entry in iter {
            list.block(entry);
        }
        list
    }
}

// Stored as a plain JSON array of entries.
impl<T: Serialize> Serialize for Blocklist<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.values())
    }
}

impl<'de, T: BlockedEntry + DeserializeOwned> Deserialize<'de> for Blocklist<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<T>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

/// Drop search rows posted by a blocked requester or belonging to a blocked
/// HIT group.
pub fn filter_search_results(
    mut hits: SearchMap,
    requesters: &Blocklist<BlockedRequester>,
    blocked_hits: &Blocklist<BlockedHit>,
) -> SearchMap {
    let before = hits.len();
    hits.retain(|key, item| {
        let requester_blocked = item
            .requester_id
            .as_ref()
            .map(|id| requesters.contains(id))
            .unwrap_or(false);
        !requester_blocked && !blocked_hits.contains(&key.to_string())
    });
    debug!(hidden = before - hits.len(), "filtered blocked results");
    hits
}
