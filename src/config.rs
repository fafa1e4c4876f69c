use crate::error::ConfigError;
use std::collections::HashMap;
use std::path::Path;

pub const KEY_CLIENT_ID: &str = "REDDIT_CLIENT_ID";
pub const KEY_CLIENT_SECRET: &str = "REDDIT_CLIENT_SECRET";
pub const KEY_USER_AGENT: &str = "REDDIT_USER_AGENT";

/// Script-app credentials for the client-credentials OAuth flow.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Credentials {
    /// Load credentials from a dotenv-style file. Variables already set in the
    /// process environment win over values from the file.
    pub fn from_env_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }
        let unreadable = |reason: String| ConfigError::Unreadable { path: path.to_path_buf(), reason };

        let mut file_vars = HashMap::new();
        for item in dotenvy::from_path_iter(path).map_err(|e| unreadable(e.to_string()))? {
            let (k, v) = item.map_err(|e| unreadable(e.to_string()))?;
            file_vars.insert(k, v);
        }

        Self::from_lookup(|key| std::env::var(key).ok().or_else(|| file_vars.get(key).cloned()))
    }

    /// Build credentials from an arbitrary key lookup. Empty values count as
    /// missing; every missing key is reported, in declaration order.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| lookup(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let client_id = get(KEY_CLIENT_ID);
        let client_secret = get(KEY_CLIENT_SECRET);
        let user_agent = get(KEY_USER_AGENT);

        let missing: Vec<String> = [
            (KEY_CLIENT_ID, client_id.is_none()),
            (KEY_CLIENT_SECRET, client_secret.is_none()),
            (KEY_USER_AGENT, user_agent.is_none()),
        ]
        .iter()
        .filter(|(_, absent)| *absent)
        .map(|(k, _)| k.to_string())
        .collect();

        match (client_id, client_secret, user_agent) {
            (Some(client_id), Some(client_secret), Some(user_agent)) => {
                Ok(Self { client_id, client_secret, user_agent })
            }
            _ => Err(ConfigError::MissingKeys(missing)),
        }
    }
}

/// Run options with sensible defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct CollectOptions {
    pub limit_per_sub: usize,
    pub pause_seconds: f64,          // courtesy delay after each subreddit; 0 disables
    pub max_comments_per_post: usize,
    pub progress: bool,              // show progress bars
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            limit_per_sub: 50,
            pause_seconds: 0.0,
            max_comments_per_post: 20,
            progress: true,
        }
    }
}

impl CollectOptions {
    pub fn with_limit_per_sub(mut self, limit: usize) -> Self {
        self.limit_per_sub = limit;
        self
    }
    pub fn with_pause_seconds(mut self, secs: f64) -> Self {
        self.pause_seconds = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
        self
    }
    pub fn with_max_comments_per_post(mut self, n: usize) -> Self {
        self.max_comments_per_post = n;
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
}

/// Trim and strip an optional leading `r/` (any case).
pub fn normalize_subreddit(name: &str) -> String {
    let s = name.trim();
    match s.get(..2) {
        Some(p) if p.eq_ignore_ascii_case("r/") => s[2..].trim().to_string(),
        _ => s.to_string(),
    }
}
