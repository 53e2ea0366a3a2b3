use crate::{errors::{AppError, AppResult}, tools::FileOps};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReadFileArgs {
    #[schemars(description = "The file path to read from")]
    pub path: String,
}

impl FileOps {
    /// Whole-file read; bytes that are not UTF-8 are replaced, not rejected.
    pub fn read_file(&self, args: &ReadFileArgs) -> AppResult<String> {
        let full = self.resolve(&args.path)?;
        let data = fs::read(&full).map_err(AppError::fs("read file"))?;
        Ok(format!("File content from {}:\n\n{}", args.path, String::from_utf8_lossy(&data)))
    }
}
