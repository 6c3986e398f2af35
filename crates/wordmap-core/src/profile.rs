//! Run options for a word-map build, plus the optional YAML profile that
//! seeds them.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::media::{MediaId, MediaSource};
use crate::ConfigError;

/// Sort key Media Cloud uses to rank a topic's media sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopMediaSort {
    #[default]
    Inlink,
    MediaInlink,
    Facebook,
    Twitter,
    PostCount,
    AuthorCount,
    ChannelCount,
}

impl TopMediaSort {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TopMediaSort::Inlink => "inlink",
            TopMediaSort::MediaInlink => "media_inlink",
            TopMediaSort::Facebook => "facebook",
            TopMediaSort::Twitter => "twitter",
            TopMediaSort::PostCount => "post_count",
            TopMediaSort::AuthorCount => "author_count",
            TopMediaSort::ChannelCount => "channel_count",
        }
    }
}

impl std::fmt::Display for TopMediaSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TopMediaSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inlink" => Ok(TopMediaSort::Inlink),
            "media_inlink" => Ok(TopMediaSort::MediaInlink),
            "facebook" => Ok(TopMediaSort::Facebook),
            "twitter" => Ok(TopMediaSort::Twitter),
            "post_count" => Ok(TopMediaSort::PostCount),
            "author_count" => Ok(TopMediaSort::AuthorCount),
            "channel_count" => Ok(TopMediaSort::ChannelCount),
            other => Err(format!("unknown media sort '{other}'")),
        }
    }
}

/// Options for one word-map run.
#[derive(Debug, Clone)]
pub struct MapOptions {
    /// How many top media sources to chart. Default 50.
    pub num_sources: usize,
    /// Words kept per source after stopword removal. Default 100.
    pub num_words: usize,
    pub sort: TopMediaSort,
    /// Source names dropped from the ranked list (exact match).
    pub excluded_sources: Vec<String>,
    /// Terms removed from every source's list (exact, case-sensitive).
    pub stopwords: Vec<String>,
    /// When set, replaces the ranked media fetch entirely.
    pub include_media: Option<Vec<MediaSource>>,
    /// Category attached to each source node, keyed by `media_id`.
    pub media_attributes: Option<HashMap<MediaId, String>>,
    /// Also write the `<name>.txt` word list. Default true.
    pub generate_word_lists: bool,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            num_sources: 50,
            num_words: 100,
            sort: TopMediaSort::Inlink,
            excluded_sources: Vec::new(),
            stopwords: Vec::new(),
            include_media: None,
            media_attributes: None,
            generate_word_lists: true,
        }
    }
}

impl MapOptions {
    /// Merge a profile into these options. Profile lists are appended;
    /// profile attributes are used only when none were set.
    #[must_use]
    pub fn with_profile(mut self, profile: MapProfile) -> Self {
        self.excluded_sources.extend(profile.excluded_sources);
        self.stopwords.extend(profile.stopwords);
        if self.media_attributes.is_none() && !profile.media_attributes.is_empty() {
            self.media_attributes = Some(profile.media_attributes);
        }
        self
    }
}

/// YAML file of reusable exclusions for a family of word maps.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MapProfile {
    #[serde(default)]
    pub excluded_sources: Vec<String>,
    #[serde(default)]
    pub stopwords: Vec<String>,
    #[serde(default)]
    pub media_attributes: HashMap<MediaId, String>,
}

/// Load and validate a map profile from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_map_profile(path: &Path) -> Result<MapProfile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ProfileFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let profile: MapProfile =
        serde_yaml::from_str(&content).map_err(ConfigError::ProfileFileParse)?;

    validate_profile(&profile)?;

    Ok(profile)
}

fn validate_profile(profile: &MapProfile) -> Result<(), ConfigError> {
    if profile.excluded_sources.iter().any(|s| s.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "excluded source names must be non-empty".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for word in &profile.stopwords {
        if word.trim().is_empty() {
            return Err(ConfigError::Validation(
                "stopwords must be non-empty".to_string(),
            ));
        }
        if !seen.insert(word.as_str()) {
            return Err(ConfigError::Validation(format!("duplicate stopword: '{word}'")));
        }
    }

    Ok(())
}
