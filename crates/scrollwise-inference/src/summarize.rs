//! Summarization orchestrator.
//!
//! Single pass per request: parse the URL into a video id, fetch the
//! transcript once, and submit it to the generation backend. No retries.

use std::time::Instant;

use tracing::info;

use scrollwise_core::{Error, GenerationBackend, Result};

use crate::transcript::TranscriptClient;
use crate::video_id::extract_video_id;

/// Fixed system instruction for summary generation.
///
/// The length bound and no-newlines constraint are requested of the model,
/// not enforced on the returned text.
pub const SUMMARY_SYSTEM_PROMPT: &str = "You will be provided a transcript of a YouTube video. Summarize key insights covering all important points, assuming you are relaying them to a person who does not have the time to watch the video. The summary needs to be fewer than 1500 characters strictly! Also, do not include any \n in your output!";

/// Orchestrates video id extraction, transcript retrieval, and summarization.
pub struct Summarizer<G> {
    transcripts: TranscriptClient,
    backend: G,
}

impl<G: GenerationBackend> Summarizer<G> {
    /// Create a new summarizer from a transcript client and generation backend.
    pub fn new(transcripts: TranscriptClient, backend: G) -> Self {
        Self {
            transcripts,
            backend,
        }
    }

    /// Fetch the flattened transcript for a YouTube URL.
    ///
    /// A URL without a recognizable video id is `Error::InvalidInput`;
    /// retrieval faults are `Error::Transcript`.
    pub async fn transcript(&self, url: &str) -> Result<String> {
        let video_id = extract_video_id(url)
            .ok_or_else(|| Error::InvalidInput("Invalid YouTube URL".to_string()))?;
        self.transcripts.fetch(&video_id).await
    }

    /// Summarize the video behind a YouTube URL.
    ///
    /// The transcript is fetched once and fed directly into the generation
    /// call.
    pub async fn summarize(&self, url: &str) -> Result<String> {
        let start = Instant::now();

        let video_id = extract_video_id(url)
            .ok_or_else(|| Error::InvalidInput("Invalid YouTube URL".to_string()))?;
        let transcript = self.transcripts.fetch(&video_id).await?;

        let summary = self
            .backend
            .generate_with_system(SUMMARY_SYSTEM_PROMPT, &transcript)
            .await?;

        info!(
            subsystem = "inference",
            component = "summarize",
            op = "summarize",
            video_id = %video_id,
            model = %self.backend.model_name(),
            transcript_len = transcript.len(),
            response_len = summary.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Summary generated"
        );
        Ok(summary)
    }
}
