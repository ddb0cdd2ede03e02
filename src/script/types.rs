use serde::{Deserialize, Serialize};

/// One scripted action in an ordered sequence driving a page session.
///
/// Steps are immutable once parsed; execution order is sequence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    /// Suspend for the given number of milliseconds
    Wait { ms: u64 },

    /// Capture a frame and compare it against the named reference image.
    /// The label doubles as the reference image path.
    Capture { reference: String },

    /// Dispatch a pointer click at the given page coordinates
    Click { x: i64, y: i64 },

    /// A record matching none of the recognized shapes; carries its index in
    /// the script for diagnostics. Never fatal.
    Unknown { index: usize },
}

/// Result type for script operations
pub type ScriptResult<T> = Result<T, ScriptError>;

/// Error types for script loading and parsing
#[derive(Debug)]
pub enum ScriptError {
    /// I/O error reading the script source
    Io(std::io::Error),

    /// The source is not valid JSON
    Json(serde_json::Error),

    /// The document does not have the expected shape
    Shape(String),
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptError::Io(err) => write!(f, "I/O error: {}", err),
            ScriptError::Json(err) => write!(f, "JSON error: {}", err),
            ScriptError::Shape(msg) => write!(f, "Script shape error: {}", msg),
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScriptError::Io(err) => Some(err),
            ScriptError::Json(err) => Some(err),
            ScriptError::Shape(_) => None,
        }
    }
}

impl From<std::io::Error> for ScriptError {
    fn from(err: std::io::Error) -> Self {
        ScriptError::Io(err)
    }
}

impl From<serde_json::Error> for ScriptError {
    fn from(err: serde_json::Error) -> Self {
        ScriptError::Json(err)
    }
}
