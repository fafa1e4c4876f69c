mod config;
mod error;
mod json_utils;
mod raw;
mod normalize;

mod client;
mod collector;
mod harvester;
mod export;
mod summary;
mod report;
mod progress;
mod util;
mod pipeline;

pub use crate::config::{normalize_subreddit, CollectOptions, Credentials, KEY_CLIENT_ID, KEY_CLIENT_SECRET, KEY_USER_AGENT};
pub use crate::error::{ApiError, ConfigError};
pub use crate::raw::{RawAuthor, RawComment, RawSubmission, RawTimestamp};
pub use crate::normalize::{
    canonical_permalink, coerce_created_utc, normalize_comment, normalize_submission, truncate_chars,
    CommentRow, PostRow, COMMENT_BODY_MAX_CHARS, COMMENT_COLUMNS, POST_COLUMNS, REDDIT_ORIGIN, SELFTEXT_MAX_CHARS,
};

// API seam + HTTP implementation and its response adapters.
pub use crate::client::{flatten_comment_thread, parse_submission_listing, RedditApi, RedditClient};

pub use crate::collector::{Collector, PassMode, PassReport};
pub use crate::harvester::harvest_comments;
pub use crate::export::{dedup_posts, export_posts, write_comments_csv, write_posts_csv, DedupKey, DedupOutcome, ExportReport};
pub use crate::summary::RunSummary;
pub use crate::report::{RecordingReporter, ReportEvent, Reporter, TracingReporter};
pub use crate::pipeline::RunPlan;

pub use crate::util::init_tracing_once;
