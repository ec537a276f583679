pub mod mock;

use std::{fmt, path::PathBuf};

/// Severity/colour class of a console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Success,
    Progress,
    Notice,
    Caution,
    Error,
    Status,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub text: String,
    pub tone: Tone,
}

impl ConsoleLine {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// Progress of a long-running git operation. `total` is `None` while git
/// has not announced how much work there is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    pub current: u64,
    pub total: Option<u64>,
    pub message: String,
}

impl ProgressEvent {
    pub fn new(current: u64, total: Option<u64>, message: impl Into<String>) -> Self {
        Self {
            current,
            total,
            message: message.into(),
        }
    }

    /// Completed fraction in `0.0..=1.0`, or `None` when indeterminate.
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> Option<f64> {
        self.total
            .filter(|total| *total > 0)
            .map(|total| (self.current as f64 / total as f64).clamp(0.0, 1.0))
    }

    pub fn percent(&self) -> Option<u64> {
        self.total
            .filter(|total| *total > 0)
            .map(|total| self.current.saturating_mul(100) / total)
    }
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self
            .total
            .map_or_else(|| "?".to_string(), |t| t.to_string());
        let percent = self
            .percent()
            .map_or_else(|| "?".to_string(), |p| p.to_string());
        write!(
            f,
            "{}/{total} ({percent}%): {}",
            self.current,
            self.message.trim()
        )
    }
}

/// The one channel through which adapter code reaches the user: console
/// output, progress, and blocking questions.
///
/// Implementations must be callable from worker threads; the TUI marshals
/// every call onto its event loop.
pub trait UiSink: Send + Sync {
    fn console(&self, line: ConsoleLine);

    fn progress(&self, event: ProgressEvent);

    /// Ask a yes/no question. Blocks the calling worker until answered.
    fn confirm(&self, title: &str, message: &str) -> bool;

    /// Ask for a filesystem path. `None` means the user backed out.
    fn ask_path(&self, title: &str, message: &str) -> Option<PathBuf>;

    fn log(&self, tone: Tone, text: &str) {
        self.console(ConsoleLine::new(text, tone));
    }
}
