//! Optional-field records produced by adapting Reddit API listing objects.
//! The normalizer only ever sees these, never raw JSON.

use crate::json_utils::{bool_field, f64_field, i64_field, str_field};
use serde_json::Value;

/// Loosely typed timestamp as it came off the wire. Reddit sends floats,
/// but anything string-shaped is kept so coercion can decide later.
#[derive(Clone, Debug, PartialEq)]
pub enum RawTimestamp {
    Number(f64),
    Text(String),
}

/// Nested author reference. Absent entirely for deleted/suspended accounts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawAuthor {
    pub name: Option<String>,
}

/// One submission with every attribute optional.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawSubmission {
    pub title: Option<String>,
    pub score: Option<i64>,
    pub upvote_ratio: Option<f64>,
    pub num_comments: Option<i64>,
    pub author: Option<RawAuthor>,
    pub url: Option<String>,
    pub permalink: Option<String>,
    pub created_utc: Option<RawTimestamp>,
    pub is_self: Option<bool>,
    pub selftext: Option<String>,
    pub link_flair_text: Option<String>,
    pub domain: Option<String>,
}

/// One comment with every attribute optional.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawComment {
    pub id: Option<String>,
    pub author: Option<RawAuthor>,
    pub body: Option<String>,
    pub score: Option<i64>,
    pub created_utc: Option<RawTimestamp>,
    pub depth: Option<i64>,
}

impl RawSubmission {
    /// Adapt the `data` object of a `t3` listing child. Never fails.
    pub fn from_listing_data(data: &Value) -> Self {
        Self {
            title: str_field(data, "title"),
            score: i64_field(data, "score"),
            upvote_ratio: f64_field(data, "upvote_ratio"),
            num_comments: i64_field(data, "num_comments"),
            author: author_ref(data),
            url: str_field(data, "url"),
            permalink: str_field(data, "permalink"),
            created_utc: timestamp(data, "created_utc"),
            is_self: bool_field(data, "is_self"),
            selftext: str_field(data, "selftext"),
            link_flair_text: str_field(data, "link_flair_text"),
            domain: str_field(data, "domain"),
        }
    }
}

impl RawComment {
    /// Adapt the `data` object of a `t1` listing child. Never fails.
    pub fn from_listing_data(data: &Value) -> Self {
        Self {
            id: str_field(data, "id"),
            author: author_ref(data),
            body: str_field(data, "body"),
            score: i64_field(data, "score"),
            created_utc: timestamp(data, "created_utc"),
            depth: i64_field(data, "depth"),
        }
    }
}

impl RawAuthor {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()) }
    }
}

// Reddit reports removed accounts as the literal "[deleted]".
fn author_ref(data: &Value) -> Option<RawAuthor> {
    let name = str_field(data, "author")?;
    if name.is_empty() || name == "[deleted]" {
        return None;
    }
    Some(RawAuthor { name: Some(name) })
}

fn timestamp(data: &Value, key: &str) -> Option<RawTimestamp> {
    match data.get(key)? {
        Value::Number(n) => n.as_f64().map(RawTimestamp::Number),
        Value::String(s) => Some(RawTimestamp::Text(s.clone())),
        _ => None,
    }
}
