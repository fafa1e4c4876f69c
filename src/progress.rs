//! Progress reporting: count-style bars over subreddits and posts.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

fn count_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.green} {msg} {pos}/{len} [{bar:.cyan/blue}] {percent:>3}%  \
         elapsed: {elapsed_precise}  eta: {eta_precise}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("█▉▊▋▌▍▎▏  ")
}

/// A small wrapper around an optional `indicatif` bar. When disabled every
/// call is a no-op, so callers never branch on the progress flag.
pub struct ProgressScope {
    pb: Option<ProgressBar>,
}

impl ProgressScope {
    pub fn count<T: Into<String>>(enabled: bool, label: T, total: u64) -> Self {
        if !enabled {
            return Self { pb: None };
        }
        let pb = ProgressBar::new(total);
        pb.set_style(count_style());
        let label = label.into();
        if !label.is_empty() {
            pb.set_message(label);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb: Some(pb) }
    }

    #[inline]
    pub fn inc_items(&self, delta: u64) {
        if let Some(pb) = &self.pb {
            pb.inc(delta);
        }
    }

    pub fn set_label<T: Into<String>>(&self, label: T) {
        if let Some(pb) = &self.pb {
            pb.set_message(label.into());
        }
    }

    pub fn finish(&self) {
        if let Some(pb) = &self.pb {
            pb.finish_and_clear();
        }
    }
}
