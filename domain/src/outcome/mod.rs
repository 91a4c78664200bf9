//! Run result value objects and the soft-failure marker

use crate::circle::Circle;
use crate::core::provider::Provider;
use serde::{Deserialize, Serialize};

/// Marker prefix carried by every failure that is surfaced as reply text
const SOFT_FAILURE_MARKER: &str = "(error:";

/// Wrap a failure reason as ordinary reply text.
///
/// Provider and configuration failures become transcript content rather than
/// raised errors, so a bad turn degrades that turn's content without
/// aborting the chain.
pub fn soft_failure(reason: impl std::fmt::Display) -> String {
    format!("{SOFT_FAILURE_MARKER} {reason})")
}

/// Check whether a reply is a soft-failure marker.
pub fn is_soft_failure(text: &str) -> bool {
    text.starts_with(SOFT_FAILURE_MARKER)
}

/// The judge's final output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    /// The judge's display name
    pub judge: String,
    pub model: String,
    pub provider: Provider,
    /// The verdict text; a soft-failure marker if the invocation failed
    pub text: String,
}

impl Verdict {
    pub fn new(
        judge: impl Into<String>,
        model: impl Into<String>,
        provider: Provider,
        text: impl Into<String>,
    ) -> Self {
        Self {
            judge: judge.into(),
            model: model.into(),
            provider,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        is_soft_failure(&self.text)
    }
}

/// Complete result of a relay run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayResult {
    /// The run's initial prompt
    pub prompt: String,
    pub rounds: u32,
    /// Final circle states, in the caller's original order
    pub circles: Vec<Circle>,
    /// Absent when the judge was skipped (no outputs, or judge misconfigured)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
}

impl RelayResult {
    /// Circles that produced a final output this run
    pub fn completed_circles(&self) -> impl Iterator<Item = &Circle> {
        self.circles.iter().filter(|c| c.final_output.is_some())
    }

    /// Circles that settled with an error record
    pub fn failed_circles(&self) -> impl Iterator<Item = &Circle> {
        self.circles.iter().filter(|c| c.error.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_failure_marker_roundtrip() {
        let text = soft_failure("request failed with status 500");
        assert_eq!(text, "(error: request failed with status 500)");
        assert!(is_soft_failure(&text));
        assert!(!is_soft_failure("an ordinary reply"));
    }

    #[test]
    fn test_verdict_error_detection() {
        let ok = Verdict::new("Judge", "gpt-4o", Provider::OpenAi, "circle 1 wins");
        assert!(!ok.is_error());

        let failed = Verdict::new("Judge", "gpt-4o", Provider::OpenAi, soft_failure("timeout"));
        assert!(failed.is_error());
    }
}
