//! Comment harvesting for already-exported posts, one post at a time.

use crate::client::RedditApi;
use crate::normalize::{normalize_comment, CommentRow, PostRow};
use crate::progress::ProgressScope;
use crate::report::Reporter;

/// Fetch, flatten and normalize the comments of every post that has a
/// permalink, keeping at most `max_comments_per_post` per post in traversal
/// order. A failing post is reported and skipped; rows gathered for earlier
/// posts are kept.
pub fn harvest_comments<A: RedditApi + ?Sized>(
    api: &A,
    posts: &[PostRow],
    max_comments_per_post: usize,
    reporter: &dyn Reporter,
    progress: bool,
) -> Vec<CommentRow> {
    let mut out = Vec::new();
    if max_comments_per_post == 0 {
        return out;
    }

    let pb = ProgressScope::count(progress, "Comments", posts.len() as u64);
    for post in posts {
        pb.inc_items(1);
        let Some(permalink) = post.permalink.as_deref() else {
            tracing::debug!(title = ?post.title, "post has no permalink; no comments fetched");
            continue;
        };

        match api.comments(permalink) {
            Ok(thread) => {
                let before = out.len();
                out.extend(
                    thread
                        .iter()
                        .take(max_comments_per_post)
                        .map(|c| normalize_comment(c, post)),
                );
                reporter.comments_collected(permalink, out.len() - before);
            }
            Err(e) => reporter.comments_skipped(permalink, &e.to_string()),
        }
    }
    pb.finish();
    out
}
