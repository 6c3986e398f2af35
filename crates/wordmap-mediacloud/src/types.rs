//! Media Cloud API response types.

use serde::Deserialize;
use wordmap_core::MediaSource;

/// Response from `topics/{id}/media/list`.
///
/// `link_ids` carries the paging cursor; word-map runs only read the first
/// page because they ask for an explicit `limit`.
#[derive(Debug, Deserialize)]
pub struct TopicMediaList {
    pub media: Vec<MediaSource>,
    #[serde(default)]
    pub link_ids: Option<LinkIds>,
}

#[derive(Debug, Deserialize)]
pub struct LinkIds {
    #[serde(default)]
    pub current: Option<i64>,
    #[serde(default)]
    pub next: Option<i64>,
}

/// Error envelope Media Cloud returns with 4xx/5xx statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
