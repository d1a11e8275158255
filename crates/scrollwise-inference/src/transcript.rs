//! YouTube transcript retrieval.
//!
//! Fetches caption tracks from the timedtext endpoint and flattens them into
//! a single string. Every failure mode (no captions, disabled captions,
//! network fault, unparseable payload) surfaces as `Error::Transcript` — a
//! tagged result, so callers never have to sniff sentinel strings.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use scrollwise_core::{Error, Result};

/// Default transcript endpoint host.
pub const DEFAULT_TRANSCRIPT_URL: &str = "https://www.youtube.com";

/// Default caption language.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the transcript client.
#[derive(Debug, Clone)]
pub struct TranscriptConfig {
    /// Base URL of the timedtext endpoint.
    pub base_url: String,
    /// Caption language code requested.
    pub language: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TRANSCRIPT_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl TranscriptConfig {
    /// Create from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | TRANSCRIPT_BASE_URL | https://www.youtube.com |
    /// | TRANSCRIPT_LANG | en |
    /// | TRANSCRIPT_TIMEOUT | 30 |
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("TRANSCRIPT_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_TRANSCRIPT_URL.to_string()),
            language: std::env::var("TRANSCRIPT_LANG")
                .unwrap_or_else(|_| DEFAULT_LANGUAGE.to_string()),
            timeout_seconds: std::env::var("TRANSCRIPT_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Timedtext payload: a sequence of caption events, each holding segments.
#[derive(Deserialize)]
struct TimedTextResponse {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Deserialize)]
struct TimedTextEvent {
    #[serde(default)]
    segs: Vec<TimedTextSegment>,
}

#[derive(Deserialize)]
struct TimedTextSegment {
    #[serde(default)]
    utf8: String,
}

/// Client for the YouTube timedtext caption endpoint.
pub struct TranscriptClient {
    client: Client,
    config: TranscriptConfig,
}

impl TranscriptClient {
    /// Create a new transcript client with the given configuration.
    pub fn new(config: TranscriptConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Create with default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(TranscriptConfig::default())
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(TranscriptConfig::from_env())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &TranscriptConfig {
        &self.config
    }

    /// Fetch the transcript for a video id in the configured language.
    ///
    /// Caption lines are concatenated in source order with single-space
    /// separators into one flat string.
    pub async fn fetch(&self, video_id: &str) -> Result<String> {
        let url = format!(
            "{}/api/timedtext",
            self.config.base_url.trim_end_matches('/')
        );

        debug!(
            subsystem = "inference",
            component = "transcript",
            op = "fetch",
            video_id = %video_id,
            lang = %self.config.language,
            "Fetching transcript"
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("v", video_id),
                ("lang", self.config.language.as_str()),
                ("fmt", "json3"),
            ])
            .send()
            .await
            .map_err(|e| Error::Transcript(format!("Transcript request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Transcript(format!(
                "Transcript endpoint returned {} for video {}",
                response.status(),
                video_id
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Transcript(format!("Failed to read transcript body: {}", e)))?;

        // Videos without a caption track answer with an empty body.
        if body.trim().is_empty() {
            return Err(Error::Transcript(format!(
                "No transcript available for video {}",
                video_id
            )));
        }

        let payload: TimedTextResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Transcript(format!("Unparseable transcript payload: {}", e)))?;

        let lines: Vec<String> = payload
            .events
            .iter()
            .filter(|event| !event.segs.is_empty())
            .map(|event| {
                event
                    .segs
                    .iter()
                    .map(|seg| seg.utf8.trim())
                    .filter(|text| !text.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .filter(|line| !line.is_empty())
            .collect();

        if lines.is_empty() {
            return Err(Error::Transcript(format!(
                "Transcript for video {} contains no text",
                video_id
            )));
        }

        Ok(lines.join(" "))
    }
}
