//! Web Vision - visual regression testing for web UIs.
//!
//! This crate provides:
//! - A headless-browser page driver (navigate, screenshot, click, wait)
//! - A declarative JSON step script format (wait / capture / click)
//! - PSNR-based quality gating of captured frames against reference images
//! - Run orchestration reducing a whole run to a single pass/fail outcome
//!
//! # Example
//!
//! ```rust,no_run
//! use web_vision::driver::{ChromeConfig, ChromePage};
//! use web_vision::harness::{execute, RunConfig};
//! use web_vision::report::ConsoleReporter;
//!
//! let config = RunConfig::new("http://127.0.0.1:8000").reference("home.png");
//! let mut driver = ChromePage::launch(ChromeConfig::default()).unwrap();
//! let result = execute(&config, &mut driver, &mut ConsoleReporter);
//! assert!(result.passed);
//! ```

pub mod config;
pub mod driver;
pub mod gate;
pub mod harness;
pub mod metric;
pub mod report;
pub mod runner;
pub mod script;
pub mod session;

// Re-export driver types
pub use driver::{ChromeConfig, ChromePage, DriverError, DriverResult, MockPage, PageCall, PageDriver};

// Re-export quality gate
pub use gate::{PSNR_THRESHOLD, QualityGate};

// Re-export harness types
pub use harness::{HarnessError, HarnessResult, RunConfig, RunMode, RunPlan, execute, run_plan, run_steps};

// Re-export reporting
pub use report::{ConsoleReporter, RecordingReporter, Reporter};

// Re-export result types
pub use runner::{CaptureRecord, RunResult, Verdict};

// Re-export script types
pub use script::{ScriptError, ScriptResult, Step, load_script, parse_script};

// Re-export artifact management
pub use session::ShotDir;
