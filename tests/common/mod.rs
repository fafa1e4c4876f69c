#![allow(dead_code)]

use parking_lot::Mutex;
use rcollect::{ApiError, RawAuthor, RawComment, RawSubmission, RawTimestamp, RedditApi};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Scripted outcome for one fake API call.
pub enum Scripted<T> {
    Ok(Vec<T>),
    Fail(String),
}

/// In-memory `RedditApi`. Unknown subreddits/posts return empty results.
/// Every call is recorded so tests can assert on order and count.
#[derive(Default)]
pub struct FakeApi {
    pub hot: HashMap<String, Scripted<RawSubmission>>,
    pub search: HashMap<(String, String), Scripted<RawSubmission>>,
    pub comments: HashMap<String, Scripted<RawComment>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_hot(mut self, sub: &str, posts: Vec<RawSubmission>) -> Self {
        self.hot.insert(sub.to_string(), Scripted::Ok(posts));
        self
    }
    pub fn with_hot_error(mut self, sub: &str, msg: &str) -> Self {
        self.hot.insert(sub.to_string(), Scripted::Fail(msg.to_string()));
        self
    }
    pub fn with_search(mut self, sub: &str, query: &str, posts: Vec<RawSubmission>) -> Self {
        self.search.insert((sub.to_string(), query.to_string()), Scripted::Ok(posts));
        self
    }
    pub fn with_search_error(mut self, sub: &str, query: &str, msg: &str) -> Self {
        self.search.insert((sub.to_string(), query.to_string()), Scripted::Fail(msg.to_string()));
        self
    }
    pub fn with_comments(mut self, permalink: &str, comments: Vec<RawComment>) -> Self {
        self.comments.insert(permalink.to_string(), Scripted::Ok(comments));
        self
    }
    pub fn with_comments_error(mut self, permalink: &str, msg: &str) -> Self {
        self.comments.insert(permalink.to_string(), Scripted::Fail(msg.to_string()));
        self
    }
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

fn answer<T: Clone>(entry: Option<&Scripted<T>>, limit: usize, endpoint: &str) -> Result<Vec<T>, ApiError> {
    match entry {
        None => Ok(Vec::new()),
        Some(Scripted::Ok(items)) => Ok(items.iter().take(limit).cloned().collect()),
        Some(Scripted::Fail(msg)) => Err(ApiError::Shape { endpoint: endpoint.to_string(), reason: msg.clone() }),
    }
}

impl RedditApi for FakeApi {
    fn hot(&self, subreddit: &str, limit: usize) -> Result<Vec<RawSubmission>, ApiError> {
        self.calls.lock().push(format!("hot:{subreddit}:{limit}"));
        answer(self.hot.get(subreddit), limit, subreddit)
    }
    fn search(&self, subreddit: &str, query: &str, limit: usize) -> Result<Vec<RawSubmission>, ApiError> {
        self.calls.lock().push(format!("search:{subreddit}:{query}:{limit}"));
        answer(self.search.get(&(subreddit.to_string(), query.to_string())), limit, subreddit)
    }
    fn comments(&self, permalink: &str) -> Result<Vec<RawComment>, ApiError> {
        self.calls.lock().push(format!("comments:{permalink}"));
        answer(self.comments.get(permalink), usize::MAX, permalink)
    }
}

/// A fully populated submission `id` with relative permalink `/r/{sub}/comments/{id}/`.
pub fn submission(sub: &str, id: &str) -> RawSubmission {
    RawSubmission {
        title: Some(format!("Post {id}")),
        score: Some(10),
        upvote_ratio: Some(0.9),
        num_comments: Some(3),
        author: Some(RawAuthor::named("alice")),
        url: Some(format!("https://example.com/{id}")),
        permalink: Some(format!("/r/{sub}/comments/{id}/")),
        created_utc: Some(RawTimestamp::Number(1_700_000_000.0)),
        is_self: Some(false),
        selftext: Some(String::new()),
        link_flair_text: None,
        domain: Some("example.com".to_string()),
    }
}

pub fn submissions(sub: &str, n: usize) -> Vec<RawSubmission> {
    (0..n).map(|i| submission(sub, &format!("{sub}_{i}"))).collect()
}

pub fn comment(id: &str, depth: i64) -> RawComment {
    RawComment {
        id: Some(id.to_string()),
        author: Some(RawAuthor::named("bob")),
        body: Some(format!("comment {id}")),
        score: Some(1),
        created_utc: Some(RawTimestamp::Number(1_700_000_100.0)),
        depth: Some(depth),
    }
}

/// Read a CSV file into (header, records).
pub fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_path(path).unwrap();
    let header = rdr.headers().unwrap().iter().map(|s| s.to_string()).collect();
    let records = rdr
        .records()
        .map(|r| r.unwrap().iter().map(|s| s.to_string()).collect())
        .collect();
    (header, records)
}

/// Read a text file line-by-line (skips empty lines).
pub fn read_lines(path: &Path) -> Vec<String> {
    let f = File::open(path).unwrap();
    BufReader::new(f).lines().map(|l| l.unwrap()).filter(|s| !s.is_empty()).collect()
}
