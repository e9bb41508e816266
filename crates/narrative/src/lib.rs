//! Narrative action plan for a reconciled dashboard.
//!
//! Blocking HTTP client (no async runtime). A prompt built from the derived
//! views is sent to an ordered list of candidate targets until one answers.

pub mod client;
pub mod fallback;
pub mod prompt;

pub use client::{GeminiClient, NarrativeError, TextGenerator};
pub use fallback::{CandidateChain, CandidateFailure, NarrativeExhausted, NarrativeOutcome};
pub use prompt::build_prompt;
