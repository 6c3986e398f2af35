//! Choosing which media sources a word map charts.

use wordmap_core::{MediaSource, TopMediaSort, TopicScope, WordSet};
use wordmap_mediacloud::MediaCloudClient;

use crate::error::NetworkError;

/// Remove the source named `name` (exact match) from `sources`.
///
/// Returns `true` when a source was removed. A name that is absent, or that
/// several sources share, leaves the list untouched.
pub fn remove_media_source(name: &str, sources: &mut Vec<MediaSource>) -> bool {
    let mut matches = sources
        .iter()
        .enumerate()
        .filter(|(_, ms)| ms.name == name)
        .map(|(idx, _)| idx);

    match (matches.next(), matches.next()) {
        (Some(idx), None) => {
            let removed = sources.remove(idx);
            tracing::debug!(
                media_id = removed.media_id,
                name = %removed.name,
                "removed media source"
            );
            true
        }
        (None, _) => {
            tracing::debug!(name, "media source not present, nothing removed");
            false
        }
        (Some(_), Some(_)) => {
            tracing::debug!(name, "media source name is ambiguous, nothing removed");
            false
        }
    }
}

/// Pick the media sources for a run.
///
/// An `explicit` list replaces the ranked fetch. Otherwise the top
/// `want_count + excluded_names.len()` sources by `sort` are fetched so the
/// exclusions do not shrink the map; the sum saturates at `usize::MAX`.
/// Exclusions apply to either list.
///
/// # Errors
///
/// Returns [`NetworkError::MediaCloud`] if the ranking fetch fails.
pub async fn select_sources(
    client: &MediaCloudClient,
    scope: TopicScope,
    want_count: usize,
    sort: TopMediaSort,
    excluded_names: &[String],
    explicit: Option<Vec<MediaSource>>,
) -> Result<Vec<MediaSource>, NetworkError> {
    let mut sources = if let Some(list) = explicit {
        tracing::debug!(count = list.len(), "using explicit media list");
        list
    } else {
        let limit = want_count.saturating_add(excluded_names.len());
        let ranked = client
            .topic_media_list(scope.topics_id, scope.timespans_id, limit, sort)
            .await?;
        tracing::debug!(
            scope = %scope,
            requested = limit,
            received = ranked.media.len(),
            sort = %sort,
            "fetched top media"
        );
        ranked.media
    };

    for name in excluded_names {
        remove_media_source(name, &mut sources);
    }

    Ok(sources)
}

/// Drop a media source's words from `word_set`, resolving `name` through
/// Media Cloud's media lookup.
///
/// Exactly one match removes that source's entry. No match, several
/// matches, or a match without word data are logged and ignored.
///
/// # Errors
///
/// Returns [`NetworkError::MediaCloud`] if the lookup request fails.
pub async fn remove_word_source(
    client: &MediaCloudClient,
    name: &str,
    word_set: &mut WordSet,
) -> Result<(), NetworkError> {
    let matches = client.media_list_by_name(name).await?;

    match matches.as_slice() {
        [only] => {
            if word_set.remove(only.media_id).is_none() {
                tracing::debug!(
                    media_id = only.media_id,
                    name,
                    "media source not present in word set"
                );
            }
        }
        [] => tracing::debug!(name, "no media source matches name"),
        _ => tracing::debug!(
            name,
            matches = matches.len(),
            "multiple media sources match name, no action taken"
        ),
    }

    Ok(())
}
