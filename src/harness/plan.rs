//! Run plan resolution: turning a [`RunConfig`] into an executable step
//! sequence.
//!
//! Resolution performs all configuration validation and script parsing.
//! It has no session side effects, so every configuration error is caught
//! before a browser page exists.

use crate::config;
use crate::harness::types::{HarnessError, HarnessResult, RunConfig};
use crate::script::{self, Step};
use crate::session::ShotDir;

/// Which of the two operating modes a plan was resolved into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Steps loaded from a declarative script
    Scripted,
    /// Fixed wait-then-capture sequence
    SingleShot,
}

/// Resolved, ready-to-execute form of a [`RunConfig`]
#[derive(Debug)]
pub struct RunPlan {
    /// Operating mode the configuration resolved into
    pub mode: RunMode,

    /// Full navigation target (uri plus session-id query)
    pub target: String,

    /// Ordered step sequence to execute
    pub steps: Vec<Step>,

    /// Effective quality flag (forced off in reference-less mode)
    pub calc_psnr: bool,

    /// Scratch directory for capture artifacts
    pub shots: ShotDir,
}

impl RunPlan {
    /// Validate a configuration and resolve it into a plan.
    ///
    /// Scripted mode takes the steps from the script source; single-shot
    /// mode synthesizes `[Wait, Capture]` with the configured wait. With
    /// neither a reference nor a script, the capture still happens but the
    /// quality flag is forced off since there is nothing to compare against.
    pub fn resolve(config: &RunConfig) -> HarnessResult<Self> {
        if config.uri.trim().is_empty() {
            return Err(HarnessError::Config("no server specified".to_string()));
        }

        if config.reference.is_some() && config.script.is_some() {
            return Err(HarnessError::Config(
                "can not use reference and script at the same time".to_string(),
            ));
        }

        let wait_ms = config::single_shot_wait_ms();

        let (mode, steps, calc_psnr) = if let Some(script_path) = &config.script {
            let steps = script::load_script(script_path)?;
            (RunMode::Scripted, steps, config.calc_psnr)
        } else if let Some(reference) = &config.reference {
            let steps = vec![
                Step::Wait { ms: wait_ms },
                Step::Capture {
                    reference: reference.to_string_lossy().into_owned(),
                },
            ];
            (RunMode::SingleShot, steps, config.calc_psnr)
        } else {
            let steps = vec![
                Step::Wait { ms: wait_ms },
                Step::Capture {
                    reference: String::new(),
                },
            ];
            (RunMode::SingleShot, steps, false)
        };

        let shots = match &config.shot_dir {
            Some(dir) => ShotDir::in_dir(dir),
            None => ShotDir::new(),
        };

        let target = format!("{}/?sId={}", config.uri, config::get().browser.session_id);

        Ok(Self {
            mode,
            target,
            steps,
            calc_psnr,
            shots,
        })
    }
}
