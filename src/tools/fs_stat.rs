use crate::{errors::{AppError, AppResult}, tools::FileOps};
use chrono::{DateTime, Local};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FileExistsArgs {
    #[schemars(description = "The file path to check")]
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FileInfoArgs {
    #[schemars(description = "The file path to get info for")]
    pub path: String,
}

impl FileOps {
    /// Not-found is an answer here, not a failure.
    pub fn file_exists(&self, args: &FileExistsArgs) -> AppResult<String> {
        let full = self.resolve(&args.path)?;
        match fs::metadata(&full) {
            Ok(meta) if meta.is_dir() => Ok(format!("Directory exists: {}", args.path)),
            Ok(_) => Ok(format!("File exists: {}", args.path)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Ok(format!("File or directory does not exist: {}", args.path))
            }
            Err(err) => Err(AppError::fs("check file")(err)),
        }
    }

    pub fn file_info(&self, args: &FileInfoArgs) -> AppResult<String> {
        let full = self.resolve(&args.path)?;
        let meta = fs::metadata(&full).map_err(AppError::fs("get file info"))?;
        let modified: DateTime<Local> =
            meta.modified().map_err(AppError::fs("get file info"))?.into();
        let name = full
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| full.display().to_string());
        let kind = if meta.is_dir() {
            "Directory"
        } else if meta.is_file() {
            "Regular file"
        } else {
            "Other"
        };

        Ok(format!(
            "File information for {}:\n\n  Name: {name}\n  Size: {} bytes\n  Mode: {}\n  Modified: {}\n  Type: {kind}\n",
            args.path,
            meta.len(),
            mode_string(&meta),
            modified.format("%Y-%m-%d %H:%M:%S"),
        ))
    }
}

#[cfg(unix)]
fn mode_string(meta: &fs::Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;
    let mode = meta.permissions().mode();
    let mut s = String::with_capacity(10);
    s.push(if meta.is_dir() { 'd' } else { '-' });
    for shift in [6, 3, 0] {
        let bits = (mode >> shift) & 0o7;
        s.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        s.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        s.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    s
}

#[cfg(not(unix))]
fn mode_string(meta: &fs::Metadata) -> String {
    let kind = if meta.is_dir() { 'd' } else { '-' };
    let perms = if meta.permissions().readonly() { "r--r--r--" } else { "rw-rw-rw-" };
    format!("{kind}{perms}")
}
