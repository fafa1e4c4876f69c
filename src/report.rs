//! Injected reporting collaborator. Components take a `&dyn Reporter` instead
//! of writing to a process-wide logger so tests can capture what was emitted.

use crate::collector::PassMode;
use parking_lot::Mutex;
use std::path::Path;

pub trait Reporter {
    fn pass_started(&self, mode: &PassMode, subreddits: usize, limit_per_sub: usize);
    fn subreddit_collected(&self, mode: &PassMode, subreddit: &str, rows: u64);
    fn subreddit_skipped(&self, mode: &PassMode, subreddit: &str, reason: &str);
    fn pass_finished(&self, mode: &PassMode, total: u64, subreddits: usize);
    fn comments_collected(&self, permalink: &str, rows: usize);
    fn comments_skipped(&self, permalink: &str, reason: &str);
    fn deduplicated(&self, removed: usize, key: &str);
    fn file_written(&self, path: &Path, rows: usize);
    /// Free-form informational line (summary output).
    fn note(&self, line: &str);
}

/// Default reporter: structured `tracing` events.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn pass_started(&self, mode: &PassMode, subreddits: usize, limit_per_sub: usize) {
        tracing::info!(pass = %mode, subreddits, limit = limit_per_sub, "Starting pass");
    }
    fn subreddit_collected(&self, mode: &PassMode, subreddit: &str, rows: u64) {
        tracing::info!(pass = %mode, rows, "Collected r/{}", subreddit);
    }
    fn subreddit_skipped(&self, mode: &PassMode, subreddit: &str, reason: &str) {
        tracing::warn!(pass = %mode, "Skipping r/{} due to error: {}", subreddit, reason);
    }
    fn pass_finished(&self, mode: &PassMode, total: u64, subreddits: usize) {
        tracing::info!(pass = %mode, "Collected {} posts across {} subreddits.", total, subreddits);
    }
    fn comments_collected(&self, permalink: &str, rows: usize) {
        tracing::debug!(post = permalink, rows, "Collected comments");
    }
    fn comments_skipped(&self, permalink: &str, reason: &str) {
        tracing::warn!("Skipping comments for {} due to error: {}", permalink, reason);
    }
    fn deduplicated(&self, removed: usize, key: &str) {
        tracing::info!("Deduplicated {} duplicates using {}.", removed, key);
    }
    fn file_written(&self, path: &Path, rows: usize) {
        tracing::info!("Saved {} with {} rows.", path.display(), rows);
    }
    fn note(&self, line: &str) {
        tracing::info!("{}", line);
    }
}

/// Captured reporter event (see [`RecordingReporter`]).
#[derive(Clone, Debug, PartialEq)]
pub enum ReportEvent {
    PassStarted { mode: PassMode, subreddits: usize, limit_per_sub: usize },
    SubredditCollected { mode: PassMode, subreddit: String, rows: u64 },
    SubredditSkipped { mode: PassMode, subreddit: String, reason: String },
    PassFinished { mode: PassMode, total: u64 },
    CommentsCollected { permalink: String, rows: usize },
    CommentsSkipped { permalink: String, reason: String },
    Deduplicated { removed: usize, key: String },
    FileWritten { path: String, rows: usize },
    Note(String),
}

/// Keeps every event in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<ReportEvent>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ReportEvent> {
        self.events.lock().clone()
    }

    /// Skip events only, as `(subreddit or permalink, reason)`.
    pub fn warnings(&self) -> Vec<(String, String)> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                ReportEvent::SubredditSkipped { subreddit, reason, .. } => Some((subreddit.clone(), reason.clone())),
                ReportEvent::CommentsSkipped { permalink, reason } => Some((permalink.clone(), reason.clone())),
                _ => None,
            })
            .collect()
    }

    fn push(&self, ev: ReportEvent) {
        self.events.lock().push(ev);
    }
}

impl Reporter for RecordingReporter {
    fn pass_started(&self, mode: &PassMode, subreddits: usize, limit_per_sub: usize) {
        self.push(ReportEvent::PassStarted { mode: mode.clone(), subreddits, limit_per_sub });
    }
    fn subreddit_collected(&self, mode: &PassMode, subreddit: &str, rows: u64) {
        self.push(ReportEvent::SubredditCollected { mode: mode.clone(), subreddit: subreddit.to_string(), rows });
    }
    fn subreddit_skipped(&self, mode: &PassMode, subreddit: &str, reason: &str) {
        self.push(ReportEvent::SubredditSkipped {
            mode: mode.clone(),
            subreddit: subreddit.to_string(),
            reason: reason.to_string(),
        });
    }
    fn pass_finished(&self, mode: &PassMode, total: u64, _subreddits: usize) {
        self.push(ReportEvent::PassFinished { mode: mode.clone(), total });
    }
    fn comments_collected(&self, permalink: &str, rows: usize) {
        self.push(ReportEvent::CommentsCollected { permalink: permalink.to_string(), rows });
    }
    fn comments_skipped(&self, permalink: &str, reason: &str) {
        self.push(ReportEvent::CommentsSkipped { permalink: permalink.to_string(), reason: reason.to_string() });
    }
    fn deduplicated(&self, removed: usize, key: &str) {
        self.push(ReportEvent::Deduplicated { removed, key: key.to_string() });
    }
    fn file_written(&self, path: &Path, rows: usize) {
        self.push(ReportEvent::FileWritten { path: path.display().to_string(), rows });
    }
    fn note(&self, line: &str) {
        self.push(ReportEvent::Note(line.to_string()));
    }
}
