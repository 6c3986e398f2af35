use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Media Cloud's numeric media source identifier.
pub type MediaId = i64;

/// A named content origin tracked by Media Cloud.
///
/// Identity is `media_id`. Any extra columns the API returns alongside the
/// id and name (`url`, `inlink_count`, ...) are kept in `attributes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaSource {
    pub media_id: MediaId,
    pub name: String,
    #[serde(flatten, default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
}

impl MediaSource {
    #[must_use]
    pub fn new(media_id: MediaId, name: impl Into<String>) -> Self {
        Self {
            media_id,
            name: name.into(),
            attributes: Map::new(),
        }
    }
}

impl PartialEq for MediaSource {
    fn eq(&self, other: &Self) -> bool {
        self.media_id == other.media_id
    }
}

impl Eq for MediaSource {}

/// The topic, and optionally the timespan within it, a run is scoped to.
///
/// Without a timespan Media Cloud answers for the topic's overall timespan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicScope {
    pub topics_id: i64,
    pub timespans_id: Option<i64>,
}

impl TopicScope {
    #[must_use]
    pub fn new(topics_id: i64, timespans_id: Option<i64>) -> Self {
        Self {
            topics_id,
            timespans_id,
        }
    }
}

impl std::fmt::Display for TopicScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.timespans_id {
            Some(ts) => write!(f, "{}/{ts}", self.topics_id),
            None => write!(f, "{}", self.topics_id),
        }
    }
}

/// One ranked term and its frequency within a topic timespan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCount {
    pub term: String,
    pub count: i64,
}

impl TermCount {
    #[must_use]
    pub fn new(term: impl Into<String>, count: i64) -> Self {
        Self {
            term: term.into(),
            count,
        }
    }
}
