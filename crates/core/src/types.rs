use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::error::HitFinderError;
use crate::keyed::KeyedMap;

/// Prefix of a synthesized key. The full form is `[Error:groupId]-<uuid>`,
/// for queue hit ids as well as search group ids.
pub const SYNTHETIC_KEY_PREFIX: &str = "[Error:groupId]-";

/// Anything that can hand back the raw HTML for a path on the MTurk host.
#[async_trait]
pub trait PageSource: Send + Sync {
    fn name(&self) -> &str;
    async fn get_html(&self, path: &str) -> Result<String, HitFinderError>;
}

/// Fields an extractor may fail to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Title,
    RequesterName,
    RequesterId,
    Reward,
}

impl FieldKind {
    pub const ALL: [FieldKind; 4] = [
        Self::Title,
        Self::RequesterName,
        Self::RequesterId,
        Self::Reward,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::RequesterName => "requesterName",
            Self::RequesterId => "requesterId",
            Self::Reward => "reward",
        }
    }

    /// `[Error:<field>]`, the marker shown in place of a missing value.
    pub fn sentinel(&self) -> String {
        format!("[Error:{}]", self.as_str())
    }

    pub fn from_sentinel(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.sentinel() == s)
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[error("[Error:{}]", .field.as_str())]
pub struct ExtractionError {
    pub field: FieldKind,
}

impl ExtractionError {
    pub fn missing(field: FieldKind) -> Self {
        Self { field }
    }
}

/// Outcome of a single-field extractor.
pub type Extracted<T> = Result<T, ExtractionError>;

pub trait SentinelExt {
    /// The extracted value, or the `[Error:<field>]` marker.
    fn or_sentinel(&self) -> String;
}

impl SentinelExt for Extracted<String> {
    fn or_sentinel(&self) -> String {
        match self {
            Ok(v) => v.clone(),
            Err(e) => e.to_string(),
        }
    }
}

/// Serde adapter writing an `Extracted<String>` as its value or sentinel, so
/// stored snapshots stay plain strings.
pub mod extracted_serde {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{Extracted, ExtractionError, FieldKind, SentinelExt};

    pub fn serialize<S: Serializer>(value: &Extracted<String>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.or_sentinel())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Extracted<String>, D::Error> {
        let raw = String::deserialize(d)?;
        Ok(match FieldKind::from_sentinel(&raw) {
            Some(field) => Err(ExtractionError::missing(field)),
            None => Ok(raw),
        })
    }
}

/// Map key for scraped items: the id found in the markup, or a fresh
/// stand-in when the markup had none.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ItemKey {
    Natural(String),
    Synthetic(Uuid),
}

impl ItemKey {
    pub fn synthesize() -> Self {
        Self::Synthetic(Uuid::new_v4())
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, Self::Synthetic(_))
    }

    /// The markup id, if there was one.
    pub fn as_natural(&self) -> Option<&str> {
        match self {
            Self::Natural(id) => Some(id),
            Self::Synthetic(_) => None,
        }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Natural(id) => f.write_str(id),
            Self::Synthetic(uuid) => write!(f, "{}{}", SYNTHETIC_KEY_PREFIX, uuid),
        }
    }
}

impl From<ItemKey> for String {
    fn from(key: ItemKey) -> Self {
        key.to_string()
    }
}

impl From<String> for ItemKey {
    fn from(raw: String) -> Self {
        raw.strip_prefix(SYNTHETIC_KEY_PREFIX)
            .and_then(|suffix| Uuid::parse_str(suffix).ok())
            .map(ItemKey::Synthetic)
            .unwrap_or(ItemKey::Natural(raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchSort {
    Latest,
    #[serde(rename = "Batch Size")]
    BatchSize,
    Reward,
}

impl SearchSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Latest => "Latest",
            Self::BatchSize => "Batch Size",
            Self::Reward => "Reward",
        }
    }
}

impl fmt::Display for SearchSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchSort {
    type Err = HitFinderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Latest" => Ok(Self::Latest),
            "Batch Size" => Ok(Self::BatchSize),
            "Reward" => Ok(Self::Reward),
            other => Err(HitFinderError::Config(format!(
                "Problem generating sortType param: {:?}",
                other
            ))),
        }
    }
}

/// Check that a minimum reward is a plain decimal such as `0.10`, `5` or `.5`.
///
/// The value goes into the search query unescaped, so nothing but digits and
/// one dot is allowed.
pub fn validate_min_reward(raw: &str) -> Result<(), HitFinderError> {
    let digits = raw.chars().filter(|c| c.is_ascii_digit()).count();
    let dots = raw.chars().filter(|&c| c == '.').count();
    if digits == 0 || dots > 1 || digits + dots != raw.len() {
        return Err(HitFinderError::Config(format!(
            "minReward must be a plain decimal, got {:?}",
            raw
        )));
    }
    Ok(())
}

fn deserialize_min_reward<'de, D: serde::Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let raw = String::deserialize(d)?;
    validate_min_reward(&raw).map_err(serde::de::Error::custom)?;
    Ok(raw)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    #[serde(alias = "sort_type")]
    pub sort_type: SearchSort,
    #[serde(alias = "min_reward", deserialize_with = "deserialize_min_reward")]
    pub min_reward: String,
    pub qualified: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            sort_type: SearchSort::Latest,
            min_reward: "0.00".to_string(),
            qualified: true,
        }
    }
}

/// One row of the search results page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItem {
    #[serde(with = "extracted_serde")]
    pub title: Extracted<String>,
    #[serde(with = "extracted_serde")]
    pub requester_name: Extracted<String>,
    #[serde(with = "extracted_serde")]
    pub requester_id: Extracted<String>,
    #[serde(with = "extracted_serde")]
    pub reward: Extracted<String>,
    pub group_id: ItemKey,
    pub time: DateTime<Utc>,
    pub batch_size: u32,
}

impl SearchItem {
    /// The posting requester, when both id and name were scraped.
    pub fn requester(&self) -> Extracted<Requester> {
        Ok(Requester {
            id: self.requester_id.clone()?,
            name: self.requester_name.clone()?,
        })
    }
}

/// One row of the queue page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueItem {
    #[serde(with = "extracted_serde")]
    pub title: Extracted<String>,
    pub hit_id: ItemKey,
    #[serde(with = "extracted_serde")]
    pub requester_name: Extracted<String>,
    #[serde(with = "extracted_serde")]
    pub reward: Extracted<String>,
}

pub type SearchMap = KeyedMap<ItemKey, SearchItem>;
pub type QueueMap = KeyedMap<ItemKey, QueueItem>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    pub id: String,
    pub name: String,
}

/// Common surface of blocklist records.
pub trait BlockedEntry {
    /// Identity within its blocklist.
    fn key(&self) -> String;
    fn date_blocked(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedHit {
    pub group_id: ItemKey,
    #[serde(default)]
    pub requester: Option<Requester>,
    #[serde(with = "extracted_serde")]
    pub title: Extracted<String>,
    pub date_blocked: DateTime<Utc>,
}

impl BlockedEntry for BlockedHit {
    fn key(&self) -> String {
        self.group_id.to_string()
    }

    fn date_blocked(&self) -> DateTime<Utc> {
        self.date_blocked
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedRequester {
    pub id: String,
    pub name: String,
    pub date_blocked: DateTime<Utc>,
}

impl BlockedEntry for BlockedRequester {
    fn key(&self) -> String {
        self.id.clone()
    }

    fn date_blocked(&self) -> DateTime<Utc> {
        self.date_blocked
    }
}
