//! Quality gate: threshold comparison over an image similarity metric.
//!
//! A metric failure (missing file, decode error, mismatched dimensions) is a
//! legitimate test failure, not a harness crash: the gate absorbs it into a
//! failing verdict instead of propagating the error.

use std::path::Path;

use crate::metric::{self, MetricResult};
use crate::runner::Verdict;

/// Fixed PSNR pass threshold: scores strictly below fail, at or above pass
pub const PSNR_THRESHOLD: f64 = 25.0;

/// Injected similarity metric: `(candidate, reference) -> score`
pub type MetricFn = Box<dyn Fn(&Path, &Path) -> MetricResult<f64>>;

/// Reduces a capture artifact and its reference image to a pass/fail verdict
pub struct QualityGate {
    threshold: f64,
    metric: MetricFn,
}

impl QualityGate {
    /// Gate over the built-in PSNR metric at the fixed threshold
    pub fn new() -> Self {
        Self::with_metric(Box::new(|candidate, reference| {
            metric::psnr(candidate, reference)
        }))
    }

    /// Gate over a custom metric (used by tests to inject deterministic scores)
    pub fn with_metric(metric: MetricFn) -> Self {
        Self {
            threshold: PSNR_THRESHOLD,
            metric,
        }
    }

    /// Override the pass threshold
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Evaluate a capture against its reference image.
    ///
    /// The measured score is included in the verdict detail regardless of
    /// outcome, for observability.
    pub fn evaluate(&self, candidate: &Path, reference: &Path) -> Verdict {
        match (self.metric)(candidate, reference) {
            Ok(score) if score < self.threshold => Verdict::fail(format!(
                "psnr {:.3} below threshold {}",
                score, self.threshold
            )),
            Ok(score) => Verdict::pass_with(format!("psnr {:.3}", score)),
            Err(err) => Verdict::fail(err.to_string()),
        }
    }
}

impl Default for QualityGate {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for QualityGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QualityGate")
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}
