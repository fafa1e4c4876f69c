//! Aggregate counts for operator visibility.

use crate::collector::{PassMode, PassReport};
use crate::export::ExportReport;
use crate::normalize::PostRow;
use crate::report::Reporter;
use std::collections::BTreeMap;
use std::fmt;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    /// One entry per pass, in run order.
    pub per_pass: Vec<(PassMode, u64)>,
    /// Rows collected per subreddit across all passes, before dedup.
    pub per_subreddit: BTreeMap<String, u64>,
    pub rows_collected: u64,
    pub duplicates_removed: usize,
    pub posts_written: usize,
    pub comments_written: Option<usize>,
    /// Oldest and newest `created_utc` among exported posts.
    pub created_span: Option<(i64, i64)>,
}

impl RunSummary {
    pub fn from_run(passes: &[PassReport], export: &ExportReport, exported: &[PostRow], comments_written: Option<usize>) -> Self {
        let mut per_subreddit = BTreeMap::<String, u64>::new();
        for pass in passes {
            for (sub, n) in &pass.counts {
                *per_subreddit.entry(sub.clone()).or_insert(0) += n;
            }
        }
        let per_pass: Vec<(PassMode, u64)> = passes.iter().map(|p| (p.mode.clone(), p.total())).collect();
        let rows_collected = per_pass.iter().map(|(_, n)| n).sum();

        let created_span = exported
            .iter()
            .filter_map(|r| r.created_utc)
            .fold(None, |acc: Option<(i64, i64)>, ts| match acc {
                None => Some((ts, ts)),
                Some((lo, hi)) => Some((lo.min(ts), hi.max(ts))),
            });

        Self {
            per_pass,
            per_subreddit,
            rows_collected,
            duplicates_removed: export.duplicates_removed,
            posts_written: export.rows_written,
            comments_written,
            created_span,
        }
    }

    /// Send every summary line to the reporter.
    pub fn emit(&self, reporter: &dyn Reporter) {
        for line in self.to_string().lines() {
            reporter.note(line);
        }
    }
}

fn rfc3339(ts: i64) -> String {
    OffsetDateTime::from_unix_timestamp(ts)
        .ok()
        .and_then(|dt| dt.format(&Rfc3339).ok())
        .unwrap_or_else(|| ts.to_string())
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Run summary")?;
        for (mode, n) in &self.per_pass {
            writeln!(f, "  pass {mode}: {n} rows")?;
        }
        for (sub, n) in &self.per_subreddit {
            writeln!(f, "  r/{sub}: {n} rows")?;
        }
        writeln!(
            f,
            "  collected {} rows, removed {} duplicates, wrote {} posts",
            self.rows_collected, self.duplicates_removed, self.posts_written
        )?;
        if let Some(n) = self.comments_written {
            writeln!(f, "  wrote {n} comments")?;
        }
        if let Some((lo, hi)) = self.created_span {
            writeln!(f, "  posts created between {} and {}", rfc3339(lo), rfc3339(hi))?;
        }
        Ok(())
    }
}
