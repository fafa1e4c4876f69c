//! Reddit API collaborator: the `RedditApi` seam plus a blocking,
//! client-credentials OAuth implementation over `reqwest`.

use crate::config::Credentials;
use crate::error::ApiError;
use crate::json_utils::{is_comment_child, is_more_stub};
use crate::normalize::REDDIT_ORIGIN;
use crate::raw::{RawComment, RawSubmission};
use serde::Deserialize;
use serde_json::Value;
use std::collections::VecDeque;
use std::time::Duration;

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const API_BASE: &str = "https://oauth.reddit.com";
const PAGE_LIMIT: usize = 100;
const COMMENT_FETCH_LIMIT: usize = 500;
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// The calls collection makes into Reddit. Implemented by [`RedditClient`]
/// and by in-memory fakes in tests.
pub trait RedditApi {
    /// Up to `limit` hot-ranked submissions of `subreddit`.
    fn hot(&self, subreddit: &str, limit: usize) -> Result<Vec<RawSubmission>, ApiError>;

    /// Up to `limit` submissions of `subreddit` matching `query`.
    fn search(&self, subreddit: &str, query: &str, limit: usize) -> Result<Vec<RawSubmission>, ApiError>;

    /// Every comment of the thread at `permalink`, flattened breadth-first.
    /// "Load more" stubs are not expanded.
    fn comments(&self, permalink: &str) -> Result<Vec<RawComment>, ApiError>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Reddit API client holding a valid application-only access token.
pub struct RedditClient {
    client: reqwest::blocking::Client,
    token: String,
}

impl RedditClient {
    /// Build the HTTP client and exchange credentials for a token.
    pub fn connect(creds: &Credentials) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(creds.user_agent.clone())
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        let response = client
            .post(TOKEN_URL)
            .basic_auth(&creds.client_id, Some(&creds.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()?;
        if !response.status().is_success() {
            return Err(ApiError::Token(response.status().as_u16()));
        }
        let token: TokenResponse = response.json()?;
        tracing::debug!("Obtained Reddit access token");

        Ok(Self { client, token: token.access_token })
    }

    fn get_json(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Value, ApiError> {
        let response = self
            .client
            .get(endpoint)
            .bearer_auth(&self.token)
            .query(params)
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { endpoint: endpoint.to_string(), status: status.as_u16() });
        }
        Ok(response.json()?)
    }

    /// Follow the `after` cursor until `limit` submissions or the end of the listing.
    fn listing(&self, endpoint: &str, base_params: &[(&str, String)], limit: usize) -> Result<Vec<RawSubmission>, ApiError> {
        let mut out = Vec::with_capacity(limit.min(1024));
        let mut after: Option<String> = None;

        while out.len() < limit {
            let page_size = (limit - out.len()).min(PAGE_LIMIT);
            let mut params: Vec<(&str, String)> = base_params.to_vec();
            params.push(("limit", page_size.to_string()));
            params.push(("raw_json", "1".to_string()));
            if let Some(cursor) = &after {
                params.push(("after", cursor.clone()));
            }

            let body = self.get_json(endpoint, &params)?;
            let (subs, next) = parse_submission_listing(&body).map_err(|reason| ApiError::Shape {
                endpoint: endpoint.to_string(),
                reason,
            })?;
            let got = subs.len();
            out.extend(subs.into_iter().take(limit - out.len()));

            after = next;
            if after.is_none() || got == 0 {
                break;
            }
        }
        Ok(out)
    }
}

impl RedditApi for RedditClient {
    fn hot(&self, subreddit: &str, limit: usize) -> Result<Vec<RawSubmission>, ApiError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let endpoint = format!("{API_BASE}/r/{subreddit}/hot");
        self.listing(&endpoint, &[], limit)
    }

    fn search(&self, subreddit: &str, query: &str, limit: usize) -> Result<Vec<RawSubmission>, ApiError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let endpoint = format!("{API_BASE}/r/{subreddit}/search");
        let params = [("q", query.to_string()), ("restrict_sr", "true".to_string())];
        self.listing(&endpoint, &params, limit)
    }

    fn comments(&self, permalink: &str) -> Result<Vec<RawComment>, ApiError> {
        let path = permalink.strip_prefix(REDDIT_ORIGIN).unwrap_or(permalink);
        let endpoint = format!("{API_BASE}{}", path.trim_end_matches('/'));
        let params = [("limit", COMMENT_FETCH_LIMIT.to_string()), ("raw_json", "1".to_string())];
        let body = self.get_json(&endpoint, &params)?;
        flatten_comment_thread(&body).map_err(|reason| ApiError::Shape { endpoint, reason })
    }
}

/// Adapt one submission listing page: `(submissions, after cursor)`.
pub fn parse_submission_listing(body: &Value) -> Result<(Vec<RawSubmission>, Option<String>), String> {
    let data = body.get("data").ok_or("listing has no `data` object")?;
    let children = data
        .get("children")
        .and_then(|c| c.as_array())
        .ok_or("listing has no `children` array")?;
    let subs = children
        .iter()
        .filter_map(|child| child.get("data"))
        .map(RawSubmission::from_listing_data)
        .collect();
    let after = data.get("after").and_then(|a| a.as_str()).map(|s| s.to_string());
    Ok((subs, after))
}

/// Flatten a thread response (`[post listing, comment listing]`) breadth-first:
/// all top-level comments, then their replies level by level. Stubs are dropped.
pub fn flatten_comment_thread(body: &Value) -> Result<Vec<RawComment>, String> {
    let comment_listing = body
        .as_array()
        .and_then(|parts| parts.get(1))
        .ok_or("thread response is not a [post, comments] pair")?;
    let top = listing_children(comment_listing).ok_or("comment listing has no `children` array")?;

    let mut queue: VecDeque<(&Value, i64)> = top.iter().map(|c| (c, 0)).collect();
    let mut out = Vec::new();
    while let Some((child, level)) = queue.pop_front() {
        if is_more_stub(child) || !is_comment_child(child) {
            continue;
        }
        let Some(data) = child.get("data") else { continue };
        let mut comment = RawComment::from_listing_data(data);
        if comment.depth.is_none() {
            comment.depth = Some(level);
        }
        let next_level = comment.depth.unwrap_or(level) + 1;
        out.push(comment);

        // `replies` is "" when empty, a listing otherwise.
        if let Some(replies) = data.get("replies").and_then(listing_children) {
            queue.extend(replies.iter().map(|c| (c, next_level)));
        }
    }
    Ok(out)
}

fn listing_children(listing: &Value) -> Option<&Vec<Value>> {
    listing.get("data")?.get("children")?.as_array()
}
