#[path = "common/mod.rs"]
mod common;

use common::*;
use rcollect::{
    flatten_comment_thread, harvest_comments, normalize_submission, write_comments_csv, RecordingReporter,
    ReportEvent, RunPlan, COMMENT_COLUMNS,
};
use serde_json::json;

const P1: &str = "https://www.reddit.com/r/rust/comments/p1/";
const P2: &str = "https://www.reddit.com/r/rust/comments/p2/";

/// A thread of 10 flattened comments capped at 2 yields exactly 2 rows,
/// the first two in traversal order.
#[test]
fn cap_per_post_keeps_first_entries() {
    let thread: Vec<_> = (0..10).map(|i| comment(&format!("c{i}"), 0)).collect();
    let api = FakeApi::new().with_comments(P1, thread);
    let posts = vec![normalize_submission(&submission("rust", "p1"), "rust", None)];
    let rep = RecordingReporter::new();

    let rows = harvest_comments(&api, &posts, 2, &rep, false);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].comment_id.as_deref(), Some("c0"));
    assert_eq!(rows[1].comment_id.as_deref(), Some("c1"));
    assert!(rows.iter().all(|r| r.post_permalink == P1));
}

/// A failing post is skipped; posts before and after it keep their rows.
/// Posts without a permalink are never requested.
#[test]
fn failing_post_is_skipped() {
    let api = FakeApi::new()
        .with_comments(P1, vec![comment("a", 0)])
        .with_comments_error(P2, "502 bad gateway")
        .with_comments("https://www.reddit.com/r/rust/comments/p3/", vec![comment("b", 0), comment("c", 1)]);

    let mut orphan = submission("rust", "orphan");
    orphan.permalink = None;
    let posts = vec![
        normalize_submission(&submission("rust", "p1"), "rust", None),
        normalize_submission(&submission("rust", "p2"), "rust", None),
        normalize_submission(&orphan, "rust", None),
        normalize_submission(&submission("rust", "p3"), "rust", None),
    ];
    let rep = RecordingReporter::new();

    let rows = harvest_comments(&api, &posts, 20, &rep, false);
    let ids: Vec<_> = rows.iter().filter_map(|r| r.comment_id.clone()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(api.calls().len(), 3);

    let warnings = rep.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].0, P2);
    assert!(warnings[0].1.contains("502"));
}

#[test]
fn zero_cap_makes_no_calls() {
    let api = FakeApi::new().with_comments(P1, vec![comment("a", 0)]);
    let posts = vec![normalize_submission(&submission("rust", "p1"), "rust", None)];
    let rows = harvest_comments(&api, &posts, 0, &RecordingReporter::new(), false);
    assert!(rows.is_empty());
    assert!(api.calls().is_empty());
}

/// Breadth-first flattening: top-level comments first, then replies by level.
/// "more" stubs are dropped; missing depth is filled from tree position.
#[test]
fn thread_is_flattened_breadth_first() {
    let body = json!([
        { "kind": "Listing", "data": { "children": [ { "kind": "t3", "data": { "id": "p1" } } ] } },
        { "kind": "Listing", "data": { "children": [
            { "kind": "t1", "data": {
                "id": "a", "author": "alice", "body": "top a", "score": 5, "created_utc": 1700000000.0, "depth": 0,
                "replies": { "kind": "Listing", "data": { "children": [
                    { "kind": "t1", "data": { "id": "a1", "author": "[deleted]", "body": "[deleted]", "replies": "" } },
                    { "kind": "more", "data": { "count": 4, "children": ["x", "y"] } }
                ] } }
            } },
            { "kind": "t1", "data": { "id": "b", "author": "bob", "body": "top b", "depth": 0, "replies": "" } },
            { "kind": "more", "data": { "count": 12 } }
        ] } }
    ]);

    let flat = flatten_comment_thread(&body).unwrap();
    let ids: Vec<_> = flat.iter().filter_map(|c| c.id.clone()).collect();
    assert_eq!(ids, vec!["a", "b", "a1"]);
    assert_eq!(flat[2].depth, Some(1));
    assert!(flat[2].author.is_none(), "[deleted] maps to an absent author");
    assert_eq!(flat[0].score, Some(5));
}

#[test]
fn malformed_thread_is_an_error() {
    assert!(flatten_comment_thread(&json!({ "data": {} })).is_err());
    assert!(flatten_comment_thread(&json!([{}, { "data": { "children": "nope" } }])).is_err());
}

#[test]
fn empty_comment_table_writes_header_only() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("comments.csv");
    write_comments_csv(&out, &[]).unwrap();

    let lines = read_lines(&out);
    assert_eq!(lines, vec![COMMENT_COLUMNS.join(",")]);
}

#[test]
fn run_plan_with_comments() {
    let api = FakeApi::new()
        .with_hot("rust", vec![submission("rust", "p1"), submission("rust", "p2")])
        .with_comments(P1, (0..5).map(|i| comment(&format!("c{i}"), 0)).collect())
        .with_comments_error(P2, "boom");
    let rep = RecordingReporter::new();
    let tmp = tempfile::tempdir().unwrap();
    let posts_out = tmp.path().join("posts.csv");
    let comments_out = tmp.path().join("comments.csv");

    let summary = RunPlan::new(&posts_out)
        .subreddits(["rust"])
        .max_comments_per_post(3)
        .comments_out(&comments_out)
        .progress(false)
        .run(&api, &rep)
        .unwrap();

    assert_eq!(summary.posts_written, 2);
    assert_eq!(summary.comments_written, Some(3));

    let (header, records) = read_csv(&comments_out);
    assert_eq!(header, COMMENT_COLUMNS.to_vec());
    assert_eq!(records.len(), 3);
    assert_eq!(records[0][2], P1);
    assert_eq!(records[0][3], "c0");

    assert!(rep
        .events()
        .iter()
        .any(|e| matches!(e, ReportEvent::CommentsSkipped { permalink, .. } if permalink == P2)));
}
