use crate::{errors::{AppError, AppResult}, tools::FileOps};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListDirectoryArgs {
    #[schemars(description = "The directory path to list")]
    pub path: String,
    #[schemars(description = "Whether to list recursively (default: false)")]
    #[serde(default)]
    pub recursive: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CreateDirectoryArgs {
    #[schemars(description = "The directory path to create")]
    pub path: String,
}

impl FileOps {
    /// Lists entries sorted by name. Recursive listings walk depth-first
    /// and show paths relative to the listed directory. An entry whose
    /// metadata cannot be read is reported inline.
    pub fn list_directory(&self, args: &ListDirectoryArgs) -> AppResult<String> {
        let full = self.resolve(&args.path)?;
        let read_dir = fs::read_dir(&full).map_err(AppError::fs("read directory"))?;
        let lines = if args.recursive.unwrap_or(false) {
            drop(read_dir);
            walk_lines(&full)
        } else {
            child_lines(read_dir).map_err(AppError::fs("read directory"))?
        };

        let mut out = format!("Contents of directory {}:\n\n", args.path);
        if lines.is_empty() {
            out.push_str("  (empty)\n");
        }
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
        Ok(out)
    }

    pub fn create_directory(&self, args: &CreateDirectoryArgs) -> AppResult<String> {
        let full = self.resolve(&args.path)?;
        fs::create_dir_all(&full).map_err(AppError::fs("create directory"))?;
        Ok(format!("Successfully created directory: {}", args.path))
    }
}

fn child_lines(read_dir: fs::ReadDir) -> io::Result<Vec<String>> {
    let mut entries = read_dir.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());
    Ok(entries
        .iter()
        .map(|e| entry_line(&e.file_name().to_string_lossy(), e.metadata()))
        .collect())
}

fn walk_lines(root: &Path) -> Vec<String> {
    WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|item| match item {
            Ok(entry) => entry_line(
                &relative(root, entry.path()),
                entry.metadata().map_err(io::Error::from),
            ),
            Err(err) => {
                let name = err.path().map(|p| relative(root, p)).unwrap_or_default();
                format!("  {name} (error getting info: {err})")
            }
        })
        .collect()
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

fn entry_line(name: &str, meta: io::Result<fs::Metadata>) -> String {
    match meta {
        Ok(m) if m.is_dir() => format!("  [dir]  {name}/"),
        Ok(m) => format!("  [file] {name} ({} bytes)", m.len()),
        Err(err) => format!("  {name} (error getting info: {err})"),
    }
}
