//! Step interpretation and run execution.
//!
//! The interpreter is strictly sequential: no step begins before the
//! previous one's side effects (including any quality-gate evaluation)
//! complete. A driver failure is not a step outcome; it aborts the
//! remaining steps and surfaces as a run-level failure.

use std::path::PathBuf;

use crate::driver::PageDriver;
use crate::gate::QualityGate;
use crate::harness::plan::{RunMode, RunPlan};
use crate::harness::types::{HarnessError, HarnessResult, RunConfig};
use crate::report::Reporter;
use crate::runner::{CaptureRecord, RunResult, Verdict};
use crate::script::Step;
use crate::session::ShotDir;

/// Execute an ordered step sequence against one page session.
///
/// Capture records accumulate into `captures` so the caller keeps whatever
/// was captured even when a later step aborts the run.
pub fn run_steps(
    steps: &[Step],
    driver: &mut dyn PageDriver,
    gate: Option<&QualityGate>,
    shots: &ShotDir,
    captures: &mut Vec<CaptureRecord>,
    reporter: &mut dyn Reporter,
) -> HarnessResult<()> {
    for step in steps {
        match step {
            Step::Wait { ms } => {
                reporter.progress(&format!("timeout: {}", ms));
                driver.wait(*ms)?;
            }

            Step::Capture { reference } => {
                let shot_path = shots.shot_path(reference);
                reporter.progress(&format!("screenshot: {}", shot_path.display()));
                reporter.progress(&format!(
                    "  ref: {}",
                    if reference.is_empty() { "(none)" } else { reference.as_str() }
                ));
                reporter.progress(&format!("  calc_psnr: {}", gate.is_some()));

                driver.screenshot(&shot_path)?;

                let (reference_path, verdict) = match gate {
                    Some(gate) => {
                        let reference_path = PathBuf::from(reference);
                        let verdict = gate.evaluate(&shot_path, &reference_path);
                        if let Some(detail) = &verdict.detail {
                            if verdict.passed {
                                reporter.progress(detail);
                            } else {
                                reporter.progress(&format!("failed: {}", detail));
                            }
                        }
                        (Some(reference_path), verdict)
                    }
                    None => (None, Verdict::pass()),
                };

                captures.push(CaptureRecord {
                    label: reference.clone(),
                    screenshot_path: shot_path,
                    reference_path,
                    verdict,
                });
            }

            Step::Click { x, y } => {
                reporter.progress(&format!("mouse.click: ({}, {})", x, y));
                driver.click(*x, *y)?;
            }

            Step::Unknown { index } => {
                reporter.warn(&format!("ignored unknown step at {}", index));
            }
        }
    }

    Ok(())
}

/// Execute a resolved plan against a page session.
///
/// Navigates once, runs the interpreter, tears down the session on every
/// exit path, writes the run manifest, and aggregates per-capture verdicts
/// into the run result.
pub fn run_plan(
    plan: &RunPlan,
    driver: &mut dyn PageDriver,
    reporter: &mut dyn Reporter,
) -> RunResult {
    match plan.mode {
        RunMode::Scripted => reporter.progress("script execution mode..."),
        RunMode::SingleShot => reporter.progress("single-shot mode..."),
    }

    if let Err(err) = plan.shots.init() {
        return RunResult::rejected(HarnessError::Io(err).to_string());
    }

    let gate = plan.calc_psnr.then(QualityGate::new);
    let mut captures = Vec::new();

    let outcome = driver
        .navigate(&plan.target)
        .map_err(HarnessError::Driver)
        .and_then(|()| {
            run_steps(
                &plan.steps,
                driver,
                gate.as_ref(),
                &plan.shots,
                &mut captures,
                reporter,
            )
        });

    // Teardown happens regardless of how interpretation ended.
    if let Err(err) = driver.close() {
        reporter.warn(&format!("session teardown failed: {}", err));
    }

    let result = match outcome {
        Ok(()) => RunResult::from_captures(captures),
        Err(err) => RunResult::aborted(err.to_string(), captures),
    };

    if let Err(err) = plan.shots.write_manifest(&result) {
        reporter.warn(&format!("could not write run manifest: {}", err));
    }

    result
}

/// Resolve a configuration and execute the resulting plan.
///
/// A configuration error rejects the run without touching the driver.
pub fn execute(
    config: &RunConfig,
    driver: &mut dyn PageDriver,
    reporter: &mut dyn Reporter,
) -> RunResult {
    match RunPlan::resolve(config) {
        Ok(plan) => run_plan(&plan, driver, reporter),
        Err(err) => RunResult::rejected(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{MockPage, PageCall};
    use crate::report::RecordingReporter;
    use pretty_assertions::assert_eq;

    fn shots_in(dir: &std::path::Path) -> ShotDir {
        let shots = ShotDir::in_dir(dir);
        shots.init().unwrap();
        shots
    }

    #[test]
    fn test_steps_execute_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let shots = shots_in(tmp.path());
        let mut page = MockPage::new();
        let mut reporter = RecordingReporter::new();
        let mut captures = Vec::new();

        let steps = vec![
            Step::Wait { ms: 10 },
            Step::Capture {
                reference: "a.png".to_string(),
            },
            Step::Click { x: 1, y: 2 },
            Step::Capture {
                reference: "b.png".to_string(),
            },
        ];

        run_steps(&steps, &mut page, None, &shots, &mut captures, &mut reporter).unwrap();

        assert_eq!(
            page.calls,
            vec![
                PageCall::Wait(10),
                PageCall::Screenshot(shots.shot_path("a.png")),
                PageCall::Click(1, 2),
                PageCall::Screenshot(shots.shot_path("b.png")),
            ]
        );
        assert_eq!(captures.len(), 2);
        assert!(captures.iter().all(|c| c.verdict.passed));
    }

    #[test]
    fn test_gate_disabled_every_capture_passes() {
        let tmp = tempfile::tempdir().unwrap();
        let shots = shots_in(tmp.path());
        let mut page = MockPage::new();
        let mut reporter = RecordingReporter::new();
        let mut captures = Vec::new();

        let steps = vec![Step::Capture {
            reference: "anything.png".to_string(),
        }];

        run_steps(&steps, &mut page, None, &shots, &mut captures, &mut reporter).unwrap();

        assert!(captures[0].verdict.passed);
        assert!(captures[0].reference_path.is_none());
    }

    #[test]
    fn test_unknown_step_warns_and_continues() {
        let tmp = tempfile::tempdir().unwrap();
        let shots = shots_in(tmp.path());
        let mut page = MockPage::new();
        let mut reporter = RecordingReporter::new();
        let mut captures = Vec::new();

        let steps = vec![
            Step::Unknown { index: 0 },
            Step::Wait { ms: 5 },
        ];

        run_steps(&steps, &mut page, None, &shots, &mut captures, &mut reporter).unwrap();

        assert_eq!(reporter.warnings, vec!["ignored unknown step at 0"]);
        assert_eq!(page.calls, vec![PageCall::Wait(5)]);
        assert!(captures.is_empty());
    }

    #[test]
    fn test_driver_error_aborts_remaining_steps() {
        let tmp = tempfile::tempdir().unwrap();
        let shots = shots_in(tmp.path());
        let mut page = MockPage {
            fail_screenshot: true,
            ..MockPage::default()
        };
        let mut reporter = RecordingReporter::new();
        let mut captures = Vec::new();

        let steps = vec![
            Step::Capture {
                reference: "a.png".to_string(),
            },
            Step::Click { x: 1, y: 1 },
        ];

        let err =
            run_steps(&steps, &mut page, None, &shots, &mut captures, &mut reporter).unwrap_err();

        assert!(matches!(err, HarnessError::Driver(_)));
        // The click after the failed capture never ran.
        assert_eq!(
            page.calls,
            vec![PageCall::Screenshot(shots.shot_path("a.png"))]
        );
        assert!(captures.is_empty());
    }

    #[test]
    fn test_gate_verdicts_recorded_per_capture() {
        let tmp = tempfile::tempdir().unwrap();
        let shots = shots_in(tmp.path());
        let mut page = MockPage::new();
        let mut reporter = RecordingReporter::new();
        let mut captures = Vec::new();

        // Deterministic metric keyed on the reference name.
        let gate = QualityGate::with_metric(Box::new(|_, reference| {
            Ok(if reference.to_string_lossy().contains("good") {
                30.0
            } else {
                10.0
            })
        }));

        let steps = vec![
            Step::Capture {
                reference: "good.png".to_string(),
            },
            Step::Capture {
                reference: "bad.png".to_string(),
            },
        ];

        run_steps(
            &steps,
            &mut page,
            Some(&gate),
            &shots,
            &mut captures,
            &mut reporter,
        )
        .unwrap();

        assert!(captures[0].verdict.passed);
        assert!(!captures[1].verdict.passed);
    }
}
