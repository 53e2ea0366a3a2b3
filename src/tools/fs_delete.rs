use crate::{errors::{AppError, AppResult}, tools::FileOps};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DeleteFileArgs {
    #[schemars(description = "The file path to delete")]
    pub path: String,
}

impl FileOps {
    /// Removes a single file. Directories are refused by the OS.
    pub fn delete_file(&self, args: &DeleteFileArgs) -> AppResult<String> {
        let full = self.resolve(&args.path)?;
        fs::remove_file(&full).map_err(AppError::fs("delete file"))?;
        Ok(format!("Successfully deleted file: {}", args.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_delete_reports_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.txt"), "x").unwrap();
        let ops = FileOps::new(tmp.path());
        let args = DeleteFileArgs { path: "a.txt".into() };
        assert_eq!(ops.delete_file(&args).unwrap(), "Successfully deleted file: a.txt");
        assert!(!tmp.path().join("a.txt").exists());

        let err = ops.delete_file(&args).unwrap_err();
        assert!(matches!(
            &err,
            AppError::Filesystem { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        ));
        assert!(err.render().starts_with("Failed to delete file:"));
    }

    #[test]
    fn directory_is_not_removed() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("d")).unwrap();
        let ops = FileOps::new(tmp.path());
        assert!(ops.delete_file(&DeleteFileArgs { path: "d".into() }).is_err());
        assert!(tmp.path().join("d").is_dir());
    }
}
