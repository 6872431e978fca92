//! Best-effort debug logging
//!
//! An append-only diagnostic sink gated by a verbosity level. Logging is off
//! by default and every emission failure is swallowed; the log is a side
//! channel and must never affect query results.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;

/// Verbosity levels, ordered from silent to chatty
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, clap::ValueEnum)]
pub enum DebugLevel {
    /// No output
    Off,
    /// Failures only
    Error,
    /// Cache decisions and fetch outcomes
    Info,
    /// Everything, including raw payload sizes
    Trace,
}

/// Level-gated append-only line writer
///
/// Each instance owns its target path; there is no shared or global log
/// state. A message is written only when the configured level is at or above
/// the message's own level. Multi-line messages become one timestamped line
/// per line of content.
#[derive(Debug, Clone)]
pub struct DebugLog {
    path: Option<PathBuf>,
    level: DebugLevel,
}

impl Default for DebugLog {
    fn default() -> Self {
        Self::disabled()
    }
}

impl DebugLog {
    /// Creates a disabled logger that drops every message
    pub fn disabled() -> Self {
        Self {
            path: None,
            level: DebugLevel::Off,
        }
    }

    /// Creates a logger appending to `path` at the given verbosity
    pub fn to_file(path: impl Into<PathBuf>, level: DebugLevel) -> Self {
        Self {
            path: Some(path.into()),
            level,
        }
    }

    /// Emits `message` at `level`, if the configured verbosity allows it.
    ///
    /// Write errors are ignored; the log is best-effort by contract.
    pub fn emit(&self, level: DebugLevel, message: &str) {
        if level == DebugLevel::Off || level > self.level {
            return;
        }
        let Some(path) = &self.path else {
            return;
        };

        let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) else {
            return;
        };

        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        for line in message.lines() {
            let _ = writeln!(file, "[{}] {}", stamp, line);
        }
    }
}
