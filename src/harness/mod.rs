pub mod plan;
pub mod run;
pub mod types;

pub use plan::{RunMode, RunPlan};
pub use run::{execute, run_plan, run_steps};
pub use types::{HarnessError, HarnessResult, RunConfig};
