//! HTTP client for the Media Cloud v2 REST API.
//!
//! Wraps `reqwest` with API key handling, retry on transient failures, and
//! typed response deserialization. Non-2xx responses carrying Media Cloud's
//! `{"error": "..."}` envelope surface as [`MediaCloudError::ApiError`].

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use wordmap_core::{AppConfig, MediaSource, TermCount, TopMediaSort};

use crate::error::MediaCloudError;
use crate::retry::retry_with_backoff;
use crate::types::{ErrorBody, TopicMediaList};

/// Client for the Media Cloud REST API.
///
/// Cheap to clone; clones share the underlying connection pool. Use
/// [`MediaCloudClient::from_config`] in production or
/// [`MediaCloudClient::with_base_url`] to point at a mock server in tests.
#[derive(Clone)]
pub struct MediaCloudClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl std::fmt::Debug for MediaCloudClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaCloudClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"[redacted]")
            .field("max_retries", &self.max_retries)
            .field("backoff_base_ms", &self.backoff_base_ms)
            .finish_non_exhaustive()
    }
}

impl MediaCloudClient {
    /// Creates a client rooted at `base_url`, with the default retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`MediaCloudError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`MediaCloudError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, MediaCloudError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so relative endpoint paths join under
        // the API root instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| MediaCloudError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: parsed,
            max_retries: 3,
            backoff_base_ms: 1_000,
        })
    }

    /// Builds a client from application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`MediaCloudClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, MediaCloudError> {
        Ok(Self::with_base_url(
            &config.mediacloud_api_key,
            &config.mediacloud_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )?
        .with_retry_policy(config.max_retries, config.retry_backoff_base_ms))
    }

    /// Overrides the retry policy for transient failures.
    #[must_use]
    pub fn with_retry_policy(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Lists a topic's media sources ranked by `sort`.
    ///
    /// # Errors
    ///
    /// - [`MediaCloudError::ApiError`] if the API rejects the request.
    /// - [`MediaCloudError::Http`] on network failure.
    /// - [`MediaCloudError::Deserialize`] if the response shape is unexpected.
    pub async fn topic_media_list(
        &self,
        topics_id: i64,
        timespans_id: Option<i64>,
        limit: usize,
        sort: TopMediaSort,
    ) -> Result<TopicMediaList, MediaCloudError> {
        let limit = limit.to_string();
        let timespan = timespans_id.map(|t| t.to_string());
        let mut params = vec![("limit", limit.as_str()), ("sort", sort.as_str())];
        if let Some(ts) = timespan.as_deref() {
            params.push(("timespans_id", ts));
        }

        let url = self.build_url(&format!("topics/{topics_id}/media/list"), &params)?;
        let context = format!("topicMediaList(topics_id={topics_id})");
        self.get_json_with_retry(&url, &context).await
    }

    /// Fetches the top terms for a topic timespan, optionally filtered by a
    /// Solr query such as `media_id:1095`.
    ///
    /// # Errors
    ///
    /// - [`MediaCloudError::ApiError`] if the API rejects the request.
    /// - [`MediaCloudError::Http`] on network failure.
    /// - [`MediaCloudError::Deserialize`] if the response shape is unexpected.
    pub async fn topic_word_counts(
        &self,
        topics_id: i64,
        timespans_id: Option<i64>,
        q: Option<&str>,
        num_words: usize,
    ) -> Result<Vec<TermCount>, MediaCloudError> {
        let num_words = num_words.to_string();
        let timespan = timespans_id.map(|t| t.to_string());
        let mut params = vec![("num_words", num_words.as_str())];
        if let Some(ts) = timespan.as_deref() {
            params.push(("timespans_id", ts));
        }
        if let Some(q) = q {
            params.push(("q", q));
        }

        let url = self.build_url(&format!("topics/{topics_id}/wc/list"), &params)?;
        let context = format!("topicWordCount(topics_id={topics_id}, q={})", q.unwrap_or(""));
        self.get_json_with_retry(&url, &context).await
    }

    /// Looks up media sources whose name matches `name_like`.
    ///
    /// # Errors
    ///
    /// - [`MediaCloudError::ApiError`] if the API rejects the request.
    /// - [`MediaCloudError::Http`] on network failure.
    /// - [`MediaCloudError::Deserialize`] if the response shape is unexpected.
    pub async fn media_list_by_name(
        &self,
        name_like: &str,
    ) -> Result<Vec<MediaSource>, MediaCloudError> {
        let url = self.build_url("media/list", &[("name", name_like)])?;
        let context = format!("mediaList(name={name_like})");
        self.get_json_with_retry(&url, &context).await
    }

    /// Builds the full request URL for `path` with the API key and
    /// percent-encoded query parameters.
    fn build_url(&self, path: &str, extra: &[(&str, &str)]) -> Result<Url, MediaCloudError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| MediaCloudError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    async fn get_json_with_retry<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, MediaCloudError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, move || {
            self.get_json(url, context)
        })
        .await
    }

    /// Sends a GET request and parses the body as `T`.
    ///
    /// Non-2xx responses become [`MediaCloudError::ApiError`], using the
    /// `error` field of the body when present.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, MediaCloudError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body).map_or_else(
                |_| {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_string()
                },
                |b| b.error,
            );
            return Err(MediaCloudError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| MediaCloudError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
