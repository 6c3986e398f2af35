use thiserror::Error;
use wordmap_core::MediaId;
use wordmap_mediacloud::MediaCloudError;

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Media Cloud error: {0}")]
    MediaCloud(#[from] MediaCloudError),

    #[error("top-word fetch failed for media {media_id}: {source}")]
    WordFetch {
        media_id: MediaId,
        #[source]
        source: MediaCloudError,
    },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error for {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("GEXF serialization failed: {0}")]
    Gexf(String),
}

impl NetworkError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
