//! Shared domain types and configuration for the word-map workspace.

pub mod app_config;
pub mod config;
pub mod error;
pub mod media;
pub mod profile;
pub mod word_set;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use media::{MediaId, MediaSource, TermCount, TopicScope};
pub use profile::{load_map_profile, MapOptions, MapProfile, TopMediaSort};
pub use word_set::WordSet;
