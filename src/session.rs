//! Scratch directory management for capture artifacts.
//!
//! Screenshots are written to a fixed scratch location with names derived
//! deterministically from the capture's reference label, so repeated runs
//! are reproducible and overwrite prior artifacts.

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::config;
use crate::runner::RunResult;

/// Scratch directory holding the screenshot artifacts of one or more runs
#[derive(Debug, Clone)]
pub struct ShotDir {
    /// Directory screenshots are written to
    pub dir: PathBuf,
}

impl ShotDir {
    /// Create a shot directory at the configured scratch location
    pub fn new() -> Self {
        Self {
            dir: PathBuf::from(config::shot_base_dir()),
        }
    }

    /// Create a shot directory at a specific location
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Ensure the directory exists
    pub fn init(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir)
    }

    /// Path for a capture artifact, derived from its reference label.
    ///
    /// The empty label (reference-less single-shot mode) maps to the bare
    /// `screenshot.png`; everything else to `screenshot.<label>.png`.
    pub fn shot_path(&self, label: &str) -> PathBuf {
        if label.is_empty() {
            self.dir.join("screenshot.png")
        } else {
            self.dir.join(format!("screenshot.{}.png", sanitize_label(label)))
        }
    }

    /// List all PNG artifacts currently in the directory
    pub fn list_shots(&self) -> io::Result<Vec<PathBuf>> {
        let mut shots = Vec::new();
        if self.dir.exists() {
            for entry in fs::read_dir(&self.dir)? {
                let entry = entry?;
                let path = entry.path();
                if path.extension().map(|e| e == "png").unwrap_or(false) {
                    shots.push(path);
                }
            }
        }
        shots.sort();
        Ok(shots)
    }

    /// Write the run manifest (`run.json`) next to the artifacts
    pub fn write_manifest(&self, result: &RunResult) -> io::Result<PathBuf> {
        let manifest = serde_json::json!({
            "created": chrono::Utc::now().to_rfc3339(),
            "passed": result.passed,
            "error": result.error,
            "captures": result.captures,
        });

        let manifest_path = self.dir.join("run.json");
        fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)?;
        Ok(manifest_path)
    }
}

impl Default for ShotDir {
    fn default() -> Self {
        Self::new()
    }
}

/// Sanitize a reference label for use in a filename.
///
/// Labels are often relative paths ("refs/home.png"); path separators and
/// anything else unexpected collapse to underscores so that every artifact
/// lands directly in the scratch directory.
fn sanitize_label(label: &str) -> String {
    label
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' => c,
            _ => '_',
        })
        .collect()
}
