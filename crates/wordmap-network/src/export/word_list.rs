use std::collections::HashMap;
use std::path::Path;

use wordmap_core::{MediaId, MediaSource, WordSet};

use crate::error::NetworkError;

/// Human-readable dump of every source's cleaned word list.
///
/// Follows `word_set` order. Ids with no matching entry in `sources` are
/// left out.
#[must_use]
pub fn render_word_lists(word_set: &WordSet, sources: &[MediaSource]) -> String {
    let names: HashMap<MediaId, &str> = sources
        .iter()
        .map(|ms| (ms.media_id, ms.name.as_str()))
        .collect();

    let mut out = String::new();
    for (media_id, terms) in word_set.iter() {
        let Some(name) = names.get(&media_id) else {
            tracing::debug!(media_id, "no media source for word list, skipping");
            continue;
        };
        out.push_str(&format!("\n\n{name} (media id: {media_id}):\n"));
        for tc in terms {
            out.push_str(&format!("- {} ({})\n", tc.term, tc.count));
        }
        out.push('\n');
    }
    out
}

/// Write [`render_word_lists`] output to `path` as UTF-8.
///
/// # Errors
///
/// Returns [`NetworkError::Io`] if the file cannot be written.
pub fn write_word_lists(
    word_set: &WordSet,
    sources: &[MediaSource],
    path: &Path,
) -> Result<(), NetworkError> {
    tracing::debug!(sources = word_set.len(), path = %path.display(), "writing word lists");
    std::fs::write(path, render_word_lists(word_set, sources))
        .map_err(|e| NetworkError::io(path, e))
}
