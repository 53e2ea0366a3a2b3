use crate::errors::{AppError, AppResult};
use axum::http::HeaderMap;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use std::num::NonZeroU32;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Confines client-supplied paths to a base directory.
///
/// Resolution is purely lexical: `.`/`..` segments are folded without
/// touching the filesystem and symlinks are not followed. Absolute inputs
/// are treated as relative to the base. Containment is checked per path
/// component, so a base of `/srv/files` never admits `/srv/files-other`.
#[derive(Debug, Clone)]
pub struct PathGuard {
    base: PathBuf,
}

impl PathGuard {
    pub fn new(base: impl AsRef<Path>) -> Self {
        Self { base: normalize_lexically(base.as_ref()) }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn resolve(&self, requested: &str) -> AppResult<PathBuf> {
        if requested.contains('\0') {
            return Err(AppError::PathEscape(requested.replace('\0', "\\0")));
        }
        let cleaned = normalize_lexically(Path::new(requested));
        let relative: PathBuf = cleaned
            .components()
            .filter(|c| matches!(c, Component::Normal(_) | Component::ParentDir))
            .collect();
        let joined = normalize_lexically(&self.base.join(relative));
        if !joined.starts_with(&self.base) {
            return Err(AppError::PathEscape(requested.to_string()));
        }
        Ok(joined)
    }
}

/// Folds `.` and `..` segments and redundant separators.
///
/// Leading `..` is kept for relative paths and dropped at the root of
/// absolute ones.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out.iter().collect()
}

pub fn content_length_ok(headers: &HeaderMap, max_kb: usize) -> Result<(), AppError> {
    if let Some(len) = headers
        .get(axum::http::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<usize>().ok())
    {
        if len > max_kb * 1024 {
            return Err(AppError::RequestTooLarge);
        }
    }
    Ok(())
}

/// Process-wide limiter for tool invocations.
#[derive(Clone)]
pub struct RequestLimiter {
    inner: Arc<DefaultDirectRateLimiter>,
}

impl RequestLimiter {
    pub fn new(per_second: u32, burst: u32) -> Self {
        let per_second = NonZeroU32::new(per_second).unwrap_or(nonzero!(50u32));
        let burst = NonZeroU32::new(burst).unwrap_or(per_second);
        let quota = Quota::per_second(per_second).allow_burst(burst);
        Self { inner: Arc::new(RateLimiter::direct(quota)) }
    }

    pub fn check(&self) -> AppResult<()> {
        self.inner.check().map_err(|_| AppError::RateLimited)
    }
}
