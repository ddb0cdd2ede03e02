//! Progress reporting for run output.
//!
//! Step actions, measured scores, and warnings are surfaced through an
//! injected [`Reporter`] rather than written to stdout directly, so the
//! interpreter can be exercised in tests without capturing process output.

/// Observer for human-readable run progress
pub trait Reporter {
    /// A progress line (step action, measured score, mode banner)
    fn progress(&mut self, line: &str);

    /// A non-fatal warning (e.g. an ignored unknown step)
    fn warn(&mut self, line: &str);
}

/// Reporter that prints progress to stdout and warnings to stderr
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn progress(&mut self, line: &str) {
        println!("{}", line);
    }

    fn warn(&mut self, line: &str) {
        eprintln!("warning: {}", line);
    }
}

/// Reporter that records all output for later inspection in tests
#[derive(Debug, Default)]
pub struct RecordingReporter {
    /// Progress lines, in emission order
    pub lines: Vec<String>,
    /// Warning lines, in emission order
    pub warnings: Vec<String>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for RecordingReporter {
    fn progress(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn warn(&mut self, line: &str) {
        self.warnings.push(line.to_string());
    }
}
