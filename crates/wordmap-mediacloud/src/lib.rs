//! Client for the slice of the Media Cloud v2 REST API that word-map
//! generation depends on: topic media rankings, topic word counts, and
//! media lookup by name.

pub mod client;
pub mod error;
pub mod types;

mod retry;

pub use client::MediaCloudClient;
pub use error::MediaCloudError;
pub use types::TopicMediaList;
