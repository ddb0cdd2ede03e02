//! Types for run results and verdict aggregation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Pass/fail outcome of a single capture or of a whole run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether the check passed
    pub passed: bool,

    /// Diagnostic message (measured score or failure reason)
    pub detail: Option<String>,
}

impl Verdict {
    /// A passing verdict with no diagnostic
    pub fn pass() -> Self {
        Self {
            passed: true,
            detail: None,
        }
    }

    /// A passing verdict carrying a diagnostic (e.g. the measured score)
    pub fn pass_with(detail: impl Into<String>) -> Self {
        Self {
            passed: true,
            detail: Some(detail.into()),
        }
    }

    /// A failing verdict carrying the failure reason
    pub fn fail(detail: impl Into<String>) -> Self {
        Self {
            passed: false,
            detail: Some(detail.into()),
        }
    }
}

/// Result of a single capture step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureRecord {
    /// Reference label the capture was taken for (empty in reference-less mode)
    pub label: String,

    /// Path the screenshot was written to
    pub screenshot_path: PathBuf,

    /// Reference image the capture was compared against (None when the
    /// quality gate was disabled)
    pub reference_path: Option<PathBuf>,

    /// Outcome of the quality gate for this capture
    pub verdict: Verdict,
}

/// Result of a complete run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Whether the run passed overall (AND of all capture verdicts)
    pub passed: bool,

    /// Run-level error message, if the run aborted (configuration error or
    /// session failure)
    pub error: Option<String>,

    /// All captures performed, in execution order
    pub captures: Vec<CaptureRecord>,
}

impl RunResult {
    /// Aggregate capture records into a run result.
    ///
    /// A run with zero captures and no run-level error passes.
    pub fn from_captures(captures: Vec<CaptureRecord>) -> Self {
        Self {
            passed: captures.iter().all(|c| c.verdict.passed),
            error: None,
            captures,
        }
    }

    /// A run that aborted before completing, keeping whatever captures were
    /// already taken
    pub fn aborted(error: impl Into<String>, captures: Vec<CaptureRecord>) -> Self {
        Self {
            passed: false,
            error: Some(error.into()),
            captures,
        }
    }

    /// A run that failed before any session side effects occurred
    pub fn rejected(error: impl Into<String>) -> Self {
        Self::aborted(error, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_constructors() {
        assert!(Verdict::pass().passed);
        assert!(Verdict::pass().detail.is_none());

        let v = Verdict::pass_with("psnr 31.2");
        assert!(v.passed);
        assert_eq!(v.detail.as_deref(), Some("psnr 31.2"));

        let v = Verdict::fail("psnr too low");
        assert!(!v.passed);
        assert_eq!(v.detail.as_deref(), Some("psnr too low"));
    }

    #[test]
    fn test_empty_run_passes() {
        let result = RunResult::from_captures(Vec::new());
        assert!(result.passed);
        assert!(result.error.is_none());
    }

    #[test]
    fn test_one_failing_capture_fails_run() {
        let captures = vec![
            CaptureRecord {
                label: "a.png".to_string(),
                screenshot_path: PathBuf::from("/tmp/screenshot.a.png"),
                reference_path: Some(PathBuf::from("a.png")),
                verdict: Verdict::pass_with("psnr 30.0"),
            },
            CaptureRecord {
                label: "b.png".to_string(),
                screenshot_path: PathBuf::from("/tmp/screenshot.b.png"),
                reference_path: Some(PathBuf::from("b.png")),
                verdict: Verdict::fail("psnr 10.0 below threshold"),
            },
        ];
        let result = RunResult::from_captures(captures);
        assert!(!result.passed);
        assert!(result.error.is_none());
    }

    #[test]
    fn test_rejected_run() {
        let result = RunResult::rejected("can not use reference and script at the same time");
        assert!(!result.passed);
        assert!(result.captures.is_empty());
        assert!(result.error.is_some());
    }
}
