//! `word-map` and `lock-status` command handlers.

use std::path::{Path, PathBuf};

use anyhow::Context;
use wordmap_core::{AppConfig, MapOptions, MapProfile, TopMediaSort, TopicScope};
use wordmap_mediacloud::MediaCloudClient;
use wordmap_network::RunLock;

/// Parsed `word-map` arguments.
#[derive(Debug)]
pub(crate) struct WordMapArgs {
    pub topic: i64,
    pub timespan: Option<i64>,
    pub out: PathBuf,
    pub sort: TopMediaSort,
    pub sources: usize,
    pub words: usize,
    pub exclude_sources: Vec<String>,
    pub stopwords: Vec<String>,
    pub word_lists: bool,
    pub profile: Option<PathBuf>,
}

/// Command-line options merged with an optional profile. Flags come first;
/// profile exclusions and stopwords are appended after them.
pub(crate) fn build_options(args: &WordMapArgs, profile: Option<MapProfile>) -> MapOptions {
    let options = MapOptions {
        num_sources: args.sources,
        num_words: args.words,
        sort: args.sort,
        excluded_sources: args.exclude_sources.clone(),
        stopwords: args.stopwords.clone(),
        generate_word_lists: args.word_lists,
        ..MapOptions::default()
    };
    match profile {
        Some(profile) => options.with_profile(profile),
        None => options,
    }
}

/// The `--profile` flag wins over `WORDMAP_PROFILE_PATH`.
pub(crate) fn profile_path<'a>(args: &'a WordMapArgs, config: &'a AppConfig) -> Option<&'a Path> {
    args.profile
        .as_deref()
        .or(config.profile_path.as_deref())
}

/// Build the word map for one topic and write its files.
///
/// # Errors
///
/// Returns an error if the profile cannot be loaded, the client cannot be
/// built, or the run fails. The run lock is released in every case except
/// a crash.
pub(crate) async fn run_word_map(config: &AppConfig, args: WordMapArgs) -> anyhow::Result<()> {
    let profile = match profile_path(&args, config) {
        Some(path) => Some(
            wordmap_core::load_map_profile(path)
                .with_context(|| format!("failed to load map profile {}", path.display()))?,
        ),
        None => None,
    };
    let options = build_options(&args, profile);

    if RunLock::is_held(&args.out) {
        tracing::warn!(
            lock = %RunLock::path_for(&args.out).display(),
            "lock file already present; a previous run may still be in flight or crashed"
        );
    }

    let client = MediaCloudClient::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build Media Cloud client: {e}"))?;
    let scope = TopicScope::new(args.topic, args.timespan);

    tracing::info!(
        scope = %scope,
        sources = options.num_sources,
        words = options.num_words,
        sort = %options.sort,
        excluded = options.excluded_sources.len(),
        stopwords = options.stopwords.len(),
        "starting word map run"
    );

    let files = wordmap_network::create_word_map_files(
        &client,
        scope,
        &args.out,
        &options,
        config.max_concurrent_fetches,
    )
    .await
    .with_context(|| format!("word map run failed for topic {scope}"))?;

    println!("gexf:  {}", files.gexf_path.display());
    println!("json:  {}", files.json_path.display());
    if let Some(path) = &files.word_list_path {
        println!("words: {}", path.display());
    }
    println!("done in {:.1}s", files.elapsed.as_secs_f64());
    Ok(())
}

pub(crate) fn run_lock_status(out: &Path) {
    let lock = RunLock::path_for(out);
    if RunLock::is_held(out) {
        println!("locked: {}", lock.display());
    } else {
        println!("unlocked: {}", lock.display());
    }
}
