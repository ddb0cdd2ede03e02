pub mod parser;
pub mod types;

pub use parser::{load_script, parse_script};
pub use types::{ScriptError, ScriptResult, Step};
