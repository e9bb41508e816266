//! Ordered candidate fallback.

use std::fmt;
use std::thread;
use std::time::Duration;

use crate::client::{NarrativeError, TextGenerator};

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateFailure {
    pub target: String,
    pub error: NarrativeError,
}

/// Text from the first candidate that answered.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeOutcome {
    pub target: String,
    pub text: String,
    /// Candidates tried before `target`, in order.
    pub failures: Vec<CandidateFailure>,
}

/// Every candidate failed.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeExhausted {
    pub failures: Vec<CandidateFailure>,
}

impl fmt::Display for NarrativeExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.failures.is_empty() {
            return write!(f, "no narrative candidates configured");
        }
        write!(f, "all {} narrative candidate(s) failed:", self.failures.len())?;
        for failure in &self.failures {
            write!(f, "\n  {}: {}", failure.target, failure.error)?;
        }
        Ok(())
    }
}

impl std::error::Error for NarrativeExhausted {}

/// Targets tried in order until one succeeds.
#[derive(Debug, Clone)]
pub struct CandidateChain {
    candidates: Vec<String>,
    rate_limit_pause: Duration,
}

impl CandidateChain {
    pub fn new(candidates: Vec<String>, rate_limit_pause: Duration) -> Self {
        Self { candidates, rate_limit_pause }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Run `prompt` against each candidate in turn.
    ///
    /// A rate-limited candidate is followed by a fixed pause before the next
    /// one is tried. No pause follows the last candidate.
    pub fn generate(
        &self,
        generator: &dyn TextGenerator,
        prompt: &str,
    ) -> Result<NarrativeOutcome, NarrativeExhausted> {
        let mut failures = Vec::new();

        for (idx, target) in self.candidates.iter().enumerate() {
            match generator.generate(target, prompt) {
                Ok(text) => {
                    log::info!("narrative produced by {target} after {} failure(s)", failures.len());
                    return Ok(NarrativeOutcome {
                        target: target.clone(),
                        text,
                        failures,
                    });
                }
                Err(error) => {
                    log::warn!("narrative candidate {target} failed: {error}");
                    let pause = error.is_rate_limited() && idx + 1 < self.candidates.len();
                    failures.push(CandidateFailure {
                        target: target.clone(),
                        error,
                    });
                    if pause && !self.rate_limit_pause.is_zero() {
                        thread::sleep(self.rate_limit_pause);
                    }
                }
            }
        }

        Err(NarrativeExhausted { failures })
    }
}
