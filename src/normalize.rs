//! Row normalization: flatten adapted submissions/comments into the fixed
//! export schema. Nothing in here can fail; a field that cannot be derived
//! becomes `None` and the rest of the row is still produced.

use crate::raw::{RawAuthor, RawComment, RawSubmission, RawTimestamp};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

pub const REDDIT_ORIGIN: &str = "https://www.reddit.com";
pub const SELFTEXT_MAX_CHARS: usize = 500;
pub const COMMENT_BODY_MAX_CHARS: usize = 2000;

/// Post columns, in export order.
pub const POST_COLUMNS: [&str; 14] = [
    "title",
    "score",
    "upvote_ratio",
    "num_comments",
    "author",
    "subreddit",
    "url",
    "permalink",
    "created_utc",
    "is_self",
    "selftext",
    "flair",
    "domain",
    "search_query",
];

/// Comment columns, in export order.
pub const COMMENT_COLUMNS: [&str; 9] = [
    "post_title",
    "subreddit",
    "post_permalink",
    "comment_id",
    "author",
    "body",
    "score",
    "created_utc",
    "depth",
];

/// One flattened submission. Field order is the CSV column order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PostRow {
    pub title: Option<String>,
    pub score: Option<i64>,
    pub upvote_ratio: Option<f64>,
    pub num_comments: Option<i64>,
    pub author: Option<String>,
    pub subreddit: String,
    pub url: Option<String>,
    pub permalink: Option<String>,
    pub created_utc: Option<i64>,
    pub is_self: Option<bool>,
    pub selftext: Option<String>,
    pub flair: Option<String>,
    pub domain: Option<String>,
    /// Empty for rows from the hot listing, the literal query otherwise.
    pub search_query: String,
}

/// One flattened comment, joined back to its post by `post_permalink`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CommentRow {
    pub post_title: Option<String>,
    pub subreddit: String,
    pub post_permalink: String,
    pub comment_id: Option<String>,
    pub author: Option<String>,
    pub body: Option<String>,
    pub score: Option<i64>,
    pub created_utc: Option<i64>,
    pub depth: Option<i64>,
}

pub fn normalize_submission(sub: &RawSubmission, subreddit: &str, search_query: Option<&str>) -> PostRow {
    PostRow {
        title: sub.title.clone(),
        score: sub.score,
        upvote_ratio: sub.upvote_ratio,
        num_comments: sub.num_comments,
        author: author_name(sub.author.as_ref()),
        subreddit: subreddit.to_string(),
        url: sub.url.clone(),
        permalink: sub.permalink.as_deref().and_then(canonical_permalink),
        created_utc: sub.created_utc.as_ref().and_then(coerce_created_utc),
        is_self: sub.is_self,
        selftext: sub.selftext.as_deref().map(|s| truncate_chars(s, SELFTEXT_MAX_CHARS)),
        flair: sub.link_flair_text.clone(),
        domain: sub.domain.clone(),
        search_query: search_query.unwrap_or_default().to_string(),
    }
}

/// Normalize a comment of `post`. The caller guarantees `post.permalink` is set;
/// an empty join key is written otherwise.
pub fn normalize_comment(comment: &RawComment, post: &PostRow) -> CommentRow {
    CommentRow {
        post_title: post.title.clone(),
        subreddit: post.subreddit.clone(),
        post_permalink: post.permalink.clone().unwrap_or_default(),
        comment_id: comment.id.clone(),
        author: author_name(comment.author.as_ref()),
        body: comment.body.as_deref().map(|b| truncate_chars(b, COMMENT_BODY_MAX_CHARS)),
        score: comment.score,
        created_utc: comment.created_utc.as_ref().and_then(coerce_created_utc),
        depth: comment.depth,
    }
}

/// Hard cap at `max` characters (code points, not bytes). No ellipsis.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((byte_idx, _)) => s[..byte_idx].to_string(),
        None => s.to_string(),
    }
}

fn absolute_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").unwrap())
}

/// Prefix a relative permalink with the site origin. Absolute URLs pass
/// through unchanged; an empty permalink is treated as absent.
pub fn canonical_permalink(permalink: &str) -> Option<String> {
    let p = permalink.trim();
    if p.is_empty() {
        return None;
    }
    if absolute_url_re().is_match(p) {
        return Some(p.to_string());
    }
    if p.starts_with('/') {
        Some(format!("{REDDIT_ORIGIN}{p}"))
    } else {
        Some(format!("{REDDIT_ORIGIN}/{p}"))
    }
}

/// Whole unix seconds, truncated. Unparsable or non-finite input is `None`.
pub fn coerce_created_utc(ts: &RawTimestamp) -> Option<i64> {
    let f = match ts {
        RawTimestamp::Number(f) => *f,
        RawTimestamp::Text(s) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i64>() {
                return Some(i);
            }
            s.parse::<f64>().ok()?
        }
    };
    if !f.is_finite() || f < i64::MIN as f64 || f > i64::MAX as f64 {
        return None;
    }
    Some(f.trunc() as i64)
}

fn author_name(author: Option<&RawAuthor>) -> Option<String> {
    author.and_then(|a| a.name.clone())
}
