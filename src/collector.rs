//! Collection passes over a list of subreddits. Rows accumulate in insertion
//! order across passes; a failing subreddit contributes zero rows and the pass
//! moves on.

use crate::client::RedditApi;
use crate::config::normalize_subreddit;
use crate::normalize::{normalize_submission, PostRow};
use crate::progress::ProgressScope;
use crate::report::Reporter;
use std::collections::BTreeMap;
use std::fmt;
use std::thread::sleep;
use std::time::Duration;

/// Which retrieval mode produced a pass.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PassMode {
    Hot,
    Search(String),
}

impl PassMode {
    /// Provenance value written to `search_query`.
    pub fn search_query(&self) -> Option<&str> {
        match self {
            PassMode::Hot => None,
            PassMode::Search(q) => Some(q.as_str()),
        }
    }
}

impl fmt::Display for PassMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassMode::Hot => write!(f, "hot"),
            PassMode::Search(q) => write!(f, "search \"{q}\""),
        }
    }
}

/// Per-subreddit row counts of one pass. Failed subreddits are recorded as 0.
#[derive(Clone, Debug, PartialEq)]
pub struct PassReport {
    pub mode: PassMode,
    pub counts: BTreeMap<String, u64>,
}

impl PassReport {
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

pub struct Collector<'a, A: RedditApi + ?Sized> {
    api: &'a A,
    reporter: &'a dyn Reporter,
    progress: bool,
    rows: Vec<PostRow>,
    passes: Vec<PassReport>,
}

impl<'a, A: RedditApi + ?Sized> Collector<'a, A> {
    pub fn new(api: &'a A, reporter: &'a dyn Reporter) -> Self {
        Self { api, reporter, progress: false, rows: Vec::new(), passes: Vec::new() }
    }

    pub fn progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }

    /// Hot listing for each subreddit, in the given order.
    pub fn fetch_hot<S: AsRef<str>>(&mut self, subreddits: &[S], limit_per_sub: usize, pause_seconds: f64) -> u64 {
        self.run_pass(PassMode::Hot, subreddits, limit_per_sub, pause_seconds)
    }

    /// Keyword search within each subreddit; rows carry `query` as provenance.
    /// Call once per query; rows accumulate with earlier passes.
    pub fn search<S: AsRef<str>>(&mut self, query: &str, subreddits: &[S], limit_per_sub: usize, pause_seconds: f64) -> u64 {
        self.run_pass(PassMode::Search(query.to_string()), subreddits, limit_per_sub, pause_seconds)
    }

    fn run_pass<S: AsRef<str>>(&mut self, mode: PassMode, subreddits: &[S], limit_per_sub: usize, pause_seconds: f64) -> u64 {
        self.reporter.pass_started(&mode, subreddits.len(), limit_per_sub);
        let pb = ProgressScope::count(self.progress, format!("{mode}"), subreddits.len() as u64);
        let pause = pause_duration(pause_seconds);

        let mut counts = BTreeMap::<String, u64>::new();
        let mut total = 0u64;

        for raw_name in subreddits {
            let name = normalize_subreddit(raw_name.as_ref());
            if name.is_empty() {
                self.reporter.subreddit_skipped(&mode, raw_name.as_ref(), "empty subreddit name");
                pb.inc_items(1);
                continue;
            }
            pb.set_label(format!("{mode} r/{name}"));

            let fetched = match &mode {
                PassMode::Hot => self.api.hot(&name, limit_per_sub),
                PassMode::Search(q) => self.api.search(&name, q, limit_per_sub),
            };
            let added = match fetched {
                Ok(subs) => {
                    // The API is asked for at most `limit_per_sub`; do not trust it.
                    let before = self.rows.len();
                    self.rows.extend(
                        subs.iter()
                            .take(limit_per_sub)
                            .map(|s| normalize_submission(s, &name, mode.search_query())),
                    );
                    let added = (self.rows.len() - before) as u64;
                    self.reporter.subreddit_collected(&mode, &name, added);
                    added
                }
                Err(e) => {
                    self.reporter.subreddit_skipped(&mode, &name, &e.to_string());
                    0
                }
            };
            *counts.entry(name).or_insert(0) += added;
            total += added;
            pb.inc_items(1);

            if let Some(d) = pause {
                sleep(d);
            }
        }

        pb.finish();
        self.reporter.pass_finished(&mode, total, subreddits.len());
        self.passes.push(PassReport { mode, counts });
        total
    }

    pub fn rows(&self) -> &[PostRow] {
        &self.rows
    }

    pub fn passes(&self) -> &[PassReport] {
        &self.passes
    }

    /// Counts of the most recent hot pass.
    pub fn hot_counts(&self) -> Option<&BTreeMap<String, u64>> {
        self.passes.iter().rev().find(|p| p.mode == PassMode::Hot).map(|p| &p.counts)
    }

    /// Counts of the most recent search pass for `query`.
    pub fn search_counts(&self, query: &str) -> Option<&BTreeMap<String, u64>> {
        self.passes
            .iter()
            .rev()
            .find(|p| p.mode.search_query() == Some(query))
            .map(|p| &p.counts)
    }

    /// Hand the accumulated rows and pass reports to the exporter.
    pub fn into_parts(self) -> (Vec<PostRow>, Vec<PassReport>) {
        (self.rows, self.passes)
    }
}

fn pause_duration(secs: f64) -> Option<Duration> {
    if secs.is_finite() && secs > 0.0 {
        Some(Duration::from_secs_f64(secs.min(3600.0)))
    } else {
        None
    }
}
