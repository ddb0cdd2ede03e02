//! Page driver abstraction over a live browser page.
//!
//! The interpreter depends only on this narrow capability surface:
//! navigate to a URL, capture the rendered frame to a file, dispatch a
//! pointer click, and wait. All calls block until the underlying operation
//! completes; failures propagate unchanged — the facade never retries.

use std::fs;
use std::path::{Path, PathBuf};

/// Result type for driver operations
pub type DriverResult<T> = Result<T, DriverError>;

/// Error types for page driver operations
#[derive(Debug)]
pub enum DriverError {
    /// Browser could not be launched or attached
    Launch(String),

    /// Navigation to the target URI failed
    Navigate(String),

    /// Frame capture failed
    Screenshot(String),

    /// Pointer click dispatch failed
    Click(String),

    /// Session teardown failed
    Teardown(String),

    /// I/O error writing an artifact
    Io(std::io::Error),
}

impl std::fmt::Display for DriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriverError::Launch(msg) => write!(f, "launch failed: {}", msg),
            DriverError::Navigate(msg) => write!(f, "navigation failed: {}", msg),
            DriverError::Screenshot(msg) => write!(f, "screenshot failed: {}", msg),
            DriverError::Click(msg) => write!(f, "click failed: {}", msg),
            DriverError::Teardown(msg) => write!(f, "teardown failed: {}", msg),
            DriverError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DriverError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DriverError {
    fn from(err: std::io::Error) -> Self {
        DriverError::Io(err)
    }
}

/// Capability surface of one live page session.
///
/// Owned exclusively by the run orchestrator for the duration of one run;
/// `close` must be called on every exit path.
pub trait PageDriver {
    /// Navigate the page to the given URI and wait for the load to settle
    fn navigate(&mut self, uri: &str) -> DriverResult<()>;

    /// Capture the current frame as PNG and write it to `path`
    fn screenshot(&mut self, path: &Path) -> DriverResult<()>;

    /// Dispatch a pointer click at the given page coordinates
    fn click(&mut self, x: i64, y: i64) -> DriverResult<()>;

    /// Suspend for the given number of milliseconds
    fn wait(&mut self, ms: u64) -> DriverResult<()>;

    /// Tear down the underlying page session
    fn close(&mut self) -> DriverResult<()>;
}

/// One recorded facade call, for asserting ordering in tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCall {
    Navigate(String),
    Screenshot(PathBuf),
    Click(i64, i64),
    Wait(u64),
    Close,
}

/// Recording page driver for tests.
///
/// Records every call in order, optionally writes canned PNG bytes on
/// screenshot (so the real metric can run against the artifact), and can be
/// told to fail navigation or capture.
#[derive(Debug, Default)]
pub struct MockPage {
    /// All facade calls, in invocation order
    pub calls: Vec<PageCall>,
    /// PNG bytes written on each screenshot call (nothing written when None)
    pub shot_bytes: Option<Vec<u8>>,
    /// Fail the next (and every) navigate call
    pub fail_navigate: bool,
    /// Fail the next (and every) screenshot call
    pub fail_screenshot: bool,
}

impl MockPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock that writes the given PNG bytes for every capture
    pub fn with_shot_bytes(bytes: Vec<u8>) -> Self {
        Self {
            shot_bytes: Some(bytes),
            ..Self::default()
        }
    }
}

impl PageDriver for MockPage {
    fn navigate(&mut self, uri: &str) -> DriverResult<()> {
        self.calls.push(PageCall::Navigate(uri.to_string()));
        if self.fail_navigate {
            return Err(DriverError::Navigate("mock navigation failure".to_string()));
        }
        Ok(())
    }

    fn screenshot(&mut self, path: &Path) -> DriverResult<()> {
        self.calls.push(PageCall::Screenshot(path.to_path_buf()));
        if self.fail_screenshot {
            return Err(DriverError::Screenshot("mock capture failure".to_string()));
        }
        if let Some(bytes) = &self.shot_bytes {
            fs::write(path, bytes)?;
        }
        Ok(())
    }

    fn click(&mut self, x: i64, y: i64) -> DriverResult<()> {
        self.calls.push(PageCall::Click(x, y));
        Ok(())
    }

    fn wait(&mut self, ms: u64) -> DriverResult<()> {
        // Records only; tests should not sleep.
        self.calls.push(PageCall::Wait(ms));
        Ok(())
    }

    fn close(&mut self) -> DriverResult<()> {
        self.calls.push(PageCall::Close);
        Ok(())
    }
}
