use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable holding the user's home on this platform.
#[cfg(target_os = "windows")]
const HOME_ENV: &str = "APPDATA";
#[cfg(not(target_os = "windows"))]
const HOME_ENV: &str = "HOME";

fn user_home() -> Result<PathBuf> {
    std::env::var_os(HOME_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("{} is not set; cannot resolve home directory", HOME_ENV))
}

/// Expand a leading `~` and make the path absolute against the current directory.
fn expand(raw: &str) -> Result<PathBuf> {
    let p = if raw == "~" {
        user_home()?
    } else if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        user_home()?.join(rest)
    } else {
        PathBuf::from(raw)
    };

    if p.is_absolute() {
        Ok(p)
    } else {
        let cwd = std::env::current_dir().context("cannot read current directory")?;
        Ok(cwd.join(p))
    }
}

/// Resolve the server home directory.
///
/// `None` falls back to `<user home>/<default_subdir>`. When `create` is set the
/// directory is created if missing.
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let dir = match configured {
        Some(raw) => expand(raw.trim())?,
        None => user_home()?.join(default_subdir),
    };

    if create {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("cannot create home dir {}", dir.display()))?;
    }
    Ok(dir)
}

/// Resolve `file` against `base_dir` unless it is already absolute.
pub fn resolve_relative(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}
