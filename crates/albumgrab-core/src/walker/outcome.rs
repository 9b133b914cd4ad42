//! Per-thumbnail results and the run summary.

use crate::fetcher::DownloadError;
use crate::session::SessionError;
use std::fmt;
use std::path::PathBuf;

/// Why one thumbnail was skipped.
#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    #[error("no usable image URL in src, data-origin or data-src")]
    Resolution,
    #[error(transparent)]
    Download(#[from] DownloadError),
    #[error(transparent)]
    Timeout(SessionError),
    #[error(transparent)]
    Session(SessionError),
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A panic caught at the item boundary.
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl From<SessionError> for ItemError {
    fn from(e: SessionError) -> Self {
        if e.is_timeout() {
            ItemError::Timeout(e)
        } else {
            ItemError::Session(e)
        }
    }
}

/// Failure classes counted in [`RunSummary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Resolution,
    Download,
    Timeout,
    Other,
}

impl ItemError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ItemError::Resolution => FailureKind::Resolution,
            ItemError::Download(DownloadError::Unresolved) => FailureKind::Resolution,
            ItemError::Download(_) => FailureKind::Download,
            ItemError::Timeout(_) => FailureKind::Timeout,
            ItemError::Session(_) | ItemError::Write { .. } | ItemError::Unexpected(_) => {
                FailureKind::Other
            }
        }
    }
}

/// A thumbnail written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedImage {
    pub path: PathBuf,
    pub bytes: usize,
    /// Remote URL fetched; `None` for inline payloads.
    pub url: Option<String>,
}

/// Result for one thumbnail.
#[derive(Debug)]
pub struct ItemOutcome {
    /// 1-based position in the grid.
    pub ordinal: usize,
    /// Stable id attribute, when the thumbnail has one.
    pub id: Option<String>,
    pub result: Result<SavedImage, ItemError>,
}

impl ItemOutcome {
    /// Id for log lines: the thumbnail id if present, else its ordinal.
    pub fn label(&self) -> String {
        self.id.clone().unwrap_or_else(|| self.ordinal.to_string())
    }

    pub fn is_saved(&self) -> bool {
        self.result.is_ok()
    }
}

/// Aggregate of one album walk.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Thumbnails enumerated at the start of the run.
    pub total: usize,
    pub saved: usize,
    pub resolution_failures: usize,
    pub download_failures: usize,
    pub timeouts: usize,
    pub other_failures: usize,
    pub items: Vec<ItemOutcome>,
}

impl RunSummary {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            items: Vec::with_capacity(total),
            ..Default::default()
        }
    }

    pub fn record(&mut self, outcome: ItemOutcome) {
        match &outcome.result {
            Ok(_) => self.saved += 1,
            Err(e) => match e.kind() {
                FailureKind::Resolution => self.resolution_failures += 1,
                FailureKind::Download => self.download_failures += 1,
                FailureKind::Timeout => self.timeouts += 1,
                FailureKind::Other => self.other_failures += 1,
            },
        }
        self.items.push(outcome);
    }

    pub fn failed(&self) -> usize {
        self.resolution_failures + self.download_failures + self.timeouts + self.other_failures
    }

    pub fn count(&self, kind: FailureKind) -> usize {
        match kind {
            FailureKind::Resolution => self.resolution_failures,
            FailureKind::Download => self.download_failures,
            FailureKind::Timeout => self.timeouts,
            FailureKind::Other => self.other_failures,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} images saved", self.saved, self.total)?;
        if self.failed() > 0 {
            write!(
                f,
                " ({} skipped: {} unresolved, {} download, {} timeout, {} other)",
                self.failed(),
                self.resolution_failures,
                self.download_failures,
                self.timeouts,
                self.other_failures
            )?;
        }
        Ok(())
    }
}
