use thiserror::Error;

/// Errors raised while loading configuration or map profiles.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read map profile {path}: {source}")]
    ProfileFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse map profile: {0}")]
    ProfileFileParse(#[source] serde_yaml::Error),

    #[error("map profile validation failed: {0}")]
    Validation(String),
}
