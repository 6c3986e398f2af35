//! End-to-end word-map run: select, fetch, clean, build, export.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use wordmap_core::{MapOptions, TopicScope};
use wordmap_mediacloud::MediaCloudClient;

use crate::clean::clean_top_words;
use crate::error::NetworkError;
use crate::export::{with_suffix, write_d3, write_gexf, write_word_lists};
use crate::fetch::fetch_top_words;
use crate::graph::build_network;
use crate::lock::RunLock;
use crate::select::select_sources;

/// Paths written by a locked run, plus how long it took.
#[derive(Debug, Clone)]
pub struct WordMapFiles {
    pub gexf_path: PathBuf,
    pub json_path: PathBuf,
    pub word_list_path: Option<PathBuf>,
    pub elapsed: Duration,
}

/// Run the whole pipeline for `scope` and write `<out_base>.gexf`,
/// `<out_base>.json` and, when enabled, `<out_base>.txt`.
///
/// Returns the GEXF document. Nothing is written until every fetch has
/// succeeded.
///
/// # Errors
///
/// Propagates the first selection, fetch or write failure.
pub async fn generate_network_of_frames(
    client: &MediaCloudClient,
    scope: TopicScope,
    out_base: &Path,
    options: &MapOptions,
    max_concurrent: usize,
) -> Result<String, NetworkError> {
    let sources = select_sources(
        client,
        scope,
        options.num_sources,
        options.sort,
        &options.excluded_sources,
        options.include_media.clone(),
    )
    .await?;
    tracing::info!(scope = %scope, sources = sources.len(), "selected media sources");

    let raw = fetch_top_words(
        client,
        &sources,
        scope,
        options.stopwords.len(),
        options.num_words,
        max_concurrent,
    )
    .await?;

    let word_set = clean_top_words(raw, &options.stopwords, options.num_words);
    let network = build_network(&word_set, &sources, options.media_attributes.as_ref());
    tracing::info!(
        nodes = network.node_count(),
        edges = network.edge_count(),
        "word network ready"
    );

    let document = write_gexf(&network, &with_suffix(out_base, ".gexf"))?;
    write_d3(&network, out_base)?;
    if options.generate_word_lists {
        write_word_lists(&word_set, &sources, &with_suffix(out_base, ".txt"))?;
    }

    Ok(document)
}

/// [`generate_network_of_frames`] wrapped in the `<out_base>.lock` run lock.
///
/// The lock is removed once the run ends, successfully or not.
///
/// # Errors
///
/// Returns the run's error, or [`NetworkError::Io`] if the lock cannot be
/// taken or released.
pub async fn create_word_map_files(
    client: &MediaCloudClient,
    scope: TopicScope,
    out_base: &Path,
    options: &MapOptions,
    max_concurrent: usize,
) -> Result<WordMapFiles, NetworkError> {
    let lock = RunLock::acquire(out_base)?;
    let started = Instant::now();

    match generate_network_of_frames(client, scope, out_base, options, max_concurrent).await {
        Ok(_) => {
            let elapsed = started.elapsed();
            tracing::info!(
                scope = %scope,
                out = %out_base.display(),
                elapsed_secs = elapsed.as_secs_f64(),
                "word map files written"
            );
            lock.release()?;
            Ok(WordMapFiles {
                gexf_path: with_suffix(out_base, ".gexf"),
                json_path: with_suffix(out_base, ".json"),
                word_list_path: options
                    .generate_word_lists
                    .then(|| with_suffix(out_base, ".txt")),
                elapsed,
            })
        }
        Err(e) => {
            if let Err(release_err) = lock.release() {
                tracing::warn!(error = %release_err, "failed to release run lock after error");
            }
            tracing::warn!(scope = %scope, error = %e, "word map run failed");
            Err(e)
        }
    }
}
