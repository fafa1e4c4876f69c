use crate::client::RedditApi;
use crate::collector::Collector;
use crate::config::CollectOptions;
use crate::export::{export_posts, write_comments_csv};
use crate::harvester::harvest_comments;
use crate::report::Reporter;
use crate::summary::RunSummary;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// One end-to-end run: hot pass, one search pass per query, dedup + posts
/// CSV, then (optionally) comments for the surviving posts.
#[derive(Clone, Debug)]
pub struct RunPlan {
    pub subreddits: Vec<String>,
    pub queries: Vec<String>,
    pub opts: CollectOptions,
    pub posts_out: PathBuf,
    pub comments_out: Option<PathBuf>,
    pub hot: bool,
}

impl RunPlan {
    pub fn new(posts_out: impl AsRef<Path>) -> Self {
        Self {
            subreddits: Vec::new(),
            queries: Vec::new(),
            opts: CollectOptions::default(),
            posts_out: posts_out.as_ref().to_path_buf(),
            comments_out: None,
            hot: true,
        }
    }

    // -------- Builder methods --------
    pub fn subreddits<I, S>(mut self, iter: I) -> Self where I: IntoIterator<Item = S>, S: Into<String> {
        self.subreddits = iter.into_iter().map(Into::into).collect(); self
    }
    pub fn queries<I, S>(mut self, iter: I) -> Self where I: IntoIterator<Item = S>, S: Into<String> {
        self.queries = iter.into_iter().map(Into::into).collect(); self
    }
    pub fn options(mut self, opts: CollectOptions) -> Self { self.opts = opts; self }
    pub fn limit_per_sub(mut self, limit: usize) -> Self { self.opts = self.opts.with_limit_per_sub(limit); self }
    pub fn pause_seconds(mut self, secs: f64) -> Self { self.opts = self.opts.with_pause_seconds(secs); self }
    pub fn max_comments_per_post(mut self, n: usize) -> Self { self.opts = self.opts.with_max_comments_per_post(n); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }
    pub fn comments_out(mut self, path: impl AsRef<Path>) -> Self { self.comments_out = Some(path.as_ref().to_path_buf()); self }
    /// Skip the hot pass and only run searches.
    pub fn hot(mut self, yes: bool) -> Self { self.hot = yes; self }

    pub fn run<A: RedditApi + ?Sized>(&self, api: &A, reporter: &dyn Reporter) -> Result<RunSummary> {
        if self.subreddits.is_empty() {
            tracing::warn!("No subreddits configured. Output will contain only headers.");
        }
        let o = &self.opts;

        let mut collector = Collector::new(api, reporter).progress(o.progress);
        if self.hot {
            collector.fetch_hot(&self.subreddits, o.limit_per_sub, o.pause_seconds);
        }
        for q in &self.queries {
            collector.search(q, &self.subreddits, o.limit_per_sub, o.pause_seconds);
        }
        let (rows, passes) = collector.into_parts();

        let (exported, export_report) = export_posts(rows, &self.posts_out, reporter)
            .with_context(|| format!("export posts to {}", self.posts_out.display()))?;

        let comments_written = match &self.comments_out {
            Some(path) => {
                let comments = harvest_comments(api, &exported, o.max_comments_per_post, reporter, o.progress);
                write_comments_csv(path, &comments)
                    .with_context(|| format!("export comments to {}", path.display()))?;
                reporter.file_written(path, comments.len());
                Some(comments.len())
            }
            None => None,
        };

        let summary = RunSummary::from_run(&passes, &export_report, &exported, comments_written);
        summary.emit(reporter);
        Ok(summary)
    }
}
