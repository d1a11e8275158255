//! # scrollwise-inference
//!
//! YouTube video id extraction, transcript retrieval, and summarization
//! for scrollwise.
//!
//! The transcript client and generation backend are both plain HTTP clients
//! with env-derived configuration; the [`Summarizer`] composes them into the
//! single-pass summarize flow.

pub mod openai;
pub mod summarize;
pub mod transcript;
pub mod video_id;

pub use openai::{OpenAIBackend, OpenAIConfig};
pub use summarize::{Summarizer, SUMMARY_SYSTEM_PROMPT};
pub use transcript::{TranscriptClient, TranscriptConfig};
pub use video_id::extract_video_id;
