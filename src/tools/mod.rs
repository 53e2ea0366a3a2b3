pub mod fs_delete;
pub mod fs_dir;
pub mod fs_read;
pub mod fs_stat;
pub mod fs_write;

use crate::errors::AppResult;
use crate::security::PathGuard;
use std::path::{Path, PathBuf};

pub use fs_delete::DeleteFileArgs;
pub use fs_dir::{CreateDirectoryArgs, ListDirectoryArgs};
pub use fs_read::ReadFileArgs;
pub use fs_stat::{FileExistsArgs, FileInfoArgs};
pub use fs_write::WriteFileArgs;

/// The seven filesystem operations, each confined to one base directory.
///
/// Every operation resolves its path through the guard first and performs
/// exactly one filesystem action. Calls share no mutable state; concurrent
/// writers to the same path race at the OS level.
#[derive(Debug, Clone)]
pub struct FileOps {
    guard: PathGuard,
}

impl FileOps {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self { guard: PathGuard::new(base_dir) }
    }

    pub fn base_dir(&self) -> &Path {
        self.guard.base()
    }

    fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let full = self.guard.resolve(path)?;
        tracing::debug!(requested = path, resolved = %full.display(), "path resolved");
        Ok(full)
    }
}
