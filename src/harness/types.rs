use std::path::PathBuf;

use crate::driver::DriverError;
use crate::script::ScriptError;

/// Immutable run configuration, resolved once at startup.
///
/// At most one of `reference` and `script` may be set; both set is a
/// configuration error caught during plan resolution, before any session
/// side effects.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Target URI to navigate to (required)
    pub uri: String,

    /// Reference image for single-shot comparison
    pub reference: Option<PathBuf>,

    /// JSON step script for scripted mode
    pub script: Option<PathBuf>,

    /// Whether the quality gate runs at all (default: true)
    pub calc_psnr: bool,

    /// Override for the screenshot scratch directory
    pub shot_dir: Option<PathBuf>,
}

impl RunConfig {
    /// Configuration for a plain single-shot run against `uri`
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            reference: None,
            script: None,
            calc_psnr: true,
            shot_dir: None,
        }
    }

    /// Compare the single-shot capture against this reference image
    pub fn reference(mut self, reference: impl Into<PathBuf>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Run the given step script instead of a single shot
    pub fn script(mut self, script: impl Into<PathBuf>) -> Self {
        self.script = Some(script.into());
        self
    }

    /// Enable or disable the quality gate
    pub fn calc_psnr(mut self, calc_psnr: bool) -> Self {
        self.calc_psnr = calc_psnr;
        self
    }

    /// Write screenshots to this directory instead of the configured scratch
    pub fn shot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.shot_dir = Some(dir.into());
        self
    }
}

/// Result type for harness operations
pub type HarnessResult<T> = Result<T, HarnessError>;

/// Error types for harness operations
#[derive(Debug)]
pub enum HarnessError {
    /// Invalid run configuration (detected before any session exists)
    Config(String),

    /// Script loading or parsing error (configuration-class)
    Script(ScriptError),

    /// Unrecoverable session error; aborts remaining steps
    Driver(DriverError),

    /// I/O error
    Io(std::io::Error),
}

impl std::fmt::Display for HarnessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HarnessError::Config(msg) => write!(f, "configuration error: {}", msg),
            HarnessError::Script(err) => write!(f, "script error: {}", err),
            HarnessError::Driver(err) => write!(f, "session error: {}", err),
            HarnessError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for HarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HarnessError::Config(_) => None,
            HarnessError::Script(err) => Some(err),
            HarnessError::Driver(err) => Some(err),
            HarnessError::Io(err) => Some(err),
        }
    }
}

impl From<ScriptError> for HarnessError {
    fn from(err: ScriptError) -> Self {
        HarnessError::Script(err)
    }
}

impl From<DriverError> for HarnessError {
    fn from(err: DriverError) -> Self {
        HarnessError::Driver(err)
    }
}

impl From<std::io::Error> for HarnessError {
    fn from(err: std::io::Error) -> Self {
        HarnessError::Io(err)
    }
}
