mod word_map;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wordmap_core::TopMediaSort;

#[derive(Debug, Parser)]
#[command(name = "wordmap-cli")]
#[command(about = "Build topic word maps from Media Cloud")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build the word network for a topic and write GEXF, JSON and word lists
    WordMap {
        /// Media Cloud topic id
        #[arg(long)]
        topic: i64,
        /// Timespan within the topic (defaults to the overall timespan)
        #[arg(long)]
        timespan: Option<i64>,
        /// Output base path; `.gexf`, `.json`, `.txt` and `.lock` are appended
        #[arg(long)]
        out: PathBuf,
        /// Sort key used to rank media sources
        #[arg(long, default_value = "inlink")]
        sort: TopMediaSort,
        /// Number of top media sources to chart
        #[arg(long, default_value = "50")]
        sources: usize,
        /// Words kept per source after stopword removal
        #[arg(long, default_value = "100")]
        words: usize,
        /// Source name to leave out (repeatable, exact match)
        #[arg(long = "exclude-source")]
        exclude_sources: Vec<String>,
        /// Term to strip from every source (repeatable, case-sensitive)
        #[arg(long = "stopword")]
        stopwords: Vec<String>,
        /// Skip writing the plain-text word list
        #[arg(long)]
        no_word_lists: bool,
        /// YAML map profile; overrides `WORDMAP_PROFILE_PATH`
        #[arg(long)]
        profile: Option<PathBuf>,
    },
    /// Report whether a word-map run is in flight for an output path
    LockStatus {
        #[arg(long)]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::WordMap {
            topic,
            timespan,
            out,
            sort,
            sources,
            words,
            exclude_sources,
            stopwords,
            no_word_lists,
            profile,
        } => {
            let config = wordmap_core::load_app_config()?;
            let env_filter = EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
            tracing_subscriber::fmt().with_env_filter(env_filter).init();
            tracing::debug!(env = %config.env, "configuration loaded");

            let args = word_map::WordMapArgs {
                topic,
                timespan,
                out,
                sort,
                sources,
                words,
                exclude_sources,
                stopwords,
                word_lists: !no_word_lists,
                profile,
            };
            word_map::run_word_map(&config, args).await
        }
        Commands::LockStatus { out } => {
            word_map::run_lock_status(&out);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
