//! Dedup and CSV export. Single linear pass: dedup -> write. Write failures
//! are fatal and surface to the caller.

use crate::normalize::{CommentRow, PostRow, COMMENT_COLUMNS, POST_COLUMNS};
use crate::report::Reporter;
use crate::util::{ensure_parent_dir, inprogress_path, replace_file};
use ahash::AHashSet;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Identity column used for post dedup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DedupKey {
    Permalink,
    Url,
}

impl fmt::Display for DedupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DedupKey::Permalink => write!(f, "permalink"),
            DedupKey::Url => write!(f, "url"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DedupOutcome {
    pub rows: Vec<PostRow>,
    pub removed: usize,
    pub key: DedupKey,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportReport {
    pub duplicates_removed: usize,
    pub rows_written: usize,
    pub key: DedupKey,
}

/// Drop duplicate posts, keeping the first occurrence.
///
/// Keys on `permalink` when any row has one, on `url` otherwise. In
/// permalink mode a row without a permalink is keyed by its url; a row with
/// neither is always kept.
pub fn dedup_posts(rows: Vec<PostRow>) -> DedupOutcome {
    let key = if rows.iter().any(|r| r.permalink.is_some()) {
        DedupKey::Permalink
    } else {
        DedupKey::Url
    };

    // Tag keys so a permalink never collides with a url of the same text.
    let mut seen: AHashSet<(u8, String)> = AHashSet::with_capacity(rows.len());
    let before = rows.len();
    let kept: Vec<PostRow> = rows
        .into_iter()
        .filter(|r| {
            let k = match key {
                DedupKey::Permalink => r
                    .permalink
                    .clone()
                    .map(|p| (0u8, p))
                    .or_else(|| r.url.clone().map(|u| (1u8, u))),
                DedupKey::Url => r.url.clone().map(|u| (1u8, u)),
            };
            match k {
                Some(k) => seen.insert(k),
                None => true,
            }
        })
        .collect();

    DedupOutcome { removed: before - kept.len(), rows: kept, key }
}

/// Dedup `rows` and write them to `path`. Returns the surviving rows with the report.
pub fn export_posts(rows: Vec<PostRow>, path: &Path, reporter: &dyn Reporter) -> Result<(Vec<PostRow>, ExportReport)> {
    let outcome = dedup_posts(rows);
    reporter.deduplicated(outcome.removed, &outcome.key.to_string());

    write_posts_csv(path, &outcome.rows)?;
    reporter.file_written(path, outcome.rows.len());

    let report = ExportReport {
        duplicates_removed: outcome.removed,
        rows_written: outcome.rows.len(),
        key: outcome.key,
    };
    Ok((outcome.rows, report))
}

pub fn write_posts_csv(path: &Path, rows: &[PostRow]) -> Result<()> {
    write_csv(path, &POST_COLUMNS, rows)
}

/// Zero rows produce a header-only file.
pub fn write_comments_csv(path: &Path, rows: &[CommentRow]) -> Result<()> {
    write_csv(path, &COMMENT_COLUMNS, rows)
}

fn write_csv<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> Result<()> {
    ensure_parent_dir(path)?;
    let tmp = inprogress_path(path);
    let f = File::create(&tmp).with_context(|| format!("create {}", tmp.display()))?;

    // Header is written by hand so an empty table still gets one.
    let mut w = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(f));
    w.write_record(header)
        .with_context(|| format!("write header to {}", tmp.display()))?;
    for row in rows {
        w.serialize(row)
            .with_context(|| format!("write row to {}", tmp.display()))?;
    }
    w.flush().with_context(|| format!("flush {}", tmp.display()))?;
    drop(w);

    replace_file(&tmp, path)
}
