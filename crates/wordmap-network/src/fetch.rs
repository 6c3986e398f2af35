//! Concurrent per-source top-word retrieval.

use std::collections::{HashMap, HashSet};

use futures::stream::{self, StreamExt, TryStreamExt};
use wordmap_core::{MediaId, MediaSource, TermCount, TopicScope, WordSet};
use wordmap_mediacloud::MediaCloudClient;

use crate::error::NetworkError;

/// Fetch each source's top terms for `scope`, at most `max_concurrent`
/// requests in flight.
///
/// Each source asks for `word_count + extra_for_stopwords` terms (saturating
/// at `usize::MAX`) so there is headroom once stopwords are stripped. All
/// fetches complete before this returns; the result is ordered like
/// `sources`, whatever order the responses arrived in. Duplicate ids are
/// fetched once.
///
/// # Errors
///
/// Returns [`NetworkError::WordFetch`] for the first source whose fetch
/// fails. Fetches still in flight are dropped and nothing is returned.
pub async fn fetch_top_words(
    client: &MediaCloudClient,
    sources: &[MediaSource],
    scope: TopicScope,
    extra_for_stopwords: usize,
    word_count: usize,
    max_concurrent: usize,
) -> Result<WordSet, NetworkError> {
    let num_words = word_count.saturating_add(extra_for_stopwords);
    let mut seen = HashSet::new();
    let media_ids: Vec<MediaId> = sources
        .iter()
        .map(|ms| ms.media_id)
        .filter(|id| seen.insert(*id))
        .collect();

    tracing::debug!(
        scope = %scope,
        sources = media_ids.len(),
        num_words,
        "fetching top words"
    );

    let mut fetched: HashMap<MediaId, Vec<TermCount>> = stream::iter(media_ids.iter().copied())
        .map(|media_id| async move {
            let q = format!("media_id:{media_id}");
            let terms = client
                .topic_word_counts(scope.topics_id, scope.timespans_id, Some(q.as_str()), num_words)
                .await
                .map_err(|source| NetworkError::WordFetch { media_id, source })?;
            tracing::trace!(media_id, terms = terms.len(), "fetched top words");
            Ok::<_, NetworkError>((media_id, terms))
        })
        .buffer_unordered(max_concurrent.max(1))
        .try_collect()
        .await?;

    let word_set: WordSet = media_ids
        .into_iter()
        .filter_map(|id| fetched.remove(&id).map(|terms| (id, terms)))
        .collect();

    tracing::debug!(sources = word_set.len(), "all top words fetched");
    Ok(word_set)
}
