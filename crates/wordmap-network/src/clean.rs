//! Stopword removal and per-source truncation of fetched word lists.

use std::collections::HashSet;

use wordmap_core::WordSet;

/// Strip stopwords from every source's list, then keep the first `limit`
/// terms in ranked order.
///
/// Stopword matching is exact and case-sensitive.
#[must_use]
pub fn clean_top_words(mut word_set: WordSet, stopwords: &[String], limit: usize) -> WordSet {
    let stop: HashSet<&str> = stopwords.iter().map(String::as_str).collect();

    word_set.for_each_list_mut(|media_id, terms| {
        let before = terms.len();
        terms.retain(|tc| !stop.contains(tc.term.as_str()));
        terms.truncate(limit);
        tracing::trace!(media_id, before, after = terms.len(), "cleaned word list");
    });

    word_set
}
