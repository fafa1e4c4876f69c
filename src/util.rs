use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

static INIT_ONCE: std::sync::Once = std::sync::Once::new();
pub fn init_tracing_once() {
    INIT_ONCE.call_once(|| {
        let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let _ = tracing_subscriber::fmt().with_env_filter(env_filter).try_init();
    });
}

/// Sibling temp path used while a file is being written.
pub fn inprogress_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".inprogress");
    dest.with_file_name(name)
}

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    }
    Ok(())
}

/// Replace `dest` with `tmp`. If rename fails (e.g. across devices), fall
/// back to copy+remove.
pub fn replace_file(tmp: &Path, dest: &Path) -> Result<()> {
    if fs::rename(tmp, dest).is_ok() {
        return Ok(());
    }
    fs::copy(tmp, dest).with_context(|| format!("copy {} -> {}", tmp.display(), dest.display()))?;
    fs::remove_file(tmp).with_context(|| format!("remove {}", tmp.display()))?;
    Ok(())
}
