use crate::{errors::{AppError, AppResult}, tools::FileOps};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    #[default]
    Overwrite,
    Append,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WriteFileArgs {
    #[schemars(description = "The file path to write to")]
    pub path: String,
    #[schemars(description = "The content to write to the file")]
    pub content: String,
    #[schemars(description = "Write mode: 'overwrite' (default) or 'append'")]
    #[serde(default)]
    pub mode: Option<WriteMode>,
}

impl FileOps {
    pub fn write_file(&self, args: &WriteFileArgs) -> AppResult<String> {
        let full = self.resolve(&args.path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(AppError::fs("create directory"))?;
        }
        let mut opts = OpenOptions::new();
        opts.create(true).write(true);
        match args.mode.unwrap_or_default() {
            WriteMode::Overwrite => opts.truncate(true),
            WriteMode::Append => opts.append(true),
        };
        let mut file = opts.open(&full).map_err(AppError::fs("open file"))?;
        file.write_all(args.content.as_bytes()).map_err(AppError::fs("write content"))?;
        Ok(format!("Successfully wrote {} bytes to {}", args.content.len(), args.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ReadFileArgs;
    use serde_json::json;

    fn write(path: &str, content: &str, mode: WriteMode) -> WriteFileArgs {
        WriteFileArgs { path: path.into(), content: content.into(), mode: Some(mode) }
    }

    #[test]
    fn overwrite_then_read_returns_content() {
        let tmp = tempfile::tempdir().unwrap();
        let ops = FileOps::new(tmp.path());
        let out = ops.write_file(&write("notes/a.txt", "hello", WriteMode::Overwrite)).unwrap();
        assert_eq!(out, "Successfully wrote 5 bytes to notes/a.txt");
        ops.write_file(&write("notes/a.txt", "bye", WriteMode::Overwrite)).unwrap();
        assert_eq!(fs::read_to_string(tmp.path().join("notes/a.txt")).unwrap(), "bye");
        let read = ops.read_file(&ReadFileArgs { path: "notes/a.txt".into() }).unwrap();
        assert!(read.ends_with("\n\nbye"));
    }

    #[test]
    fn append_concatenates() {
        let tmp = tempfile::tempdir().unwrap();
        let ops = FileOps::new(tmp.path());
        ops.write_file(&write("log.txt", "one,", WriteMode::Overwrite)).unwrap();
        ops.write_file(&write("log.txt", "two", WriteMode::Append)).unwrap();
        assert_eq!(fs::read_to_string(tmp.path().join("log.txt")).unwrap(), "one,two");
    }

    #[test]
    fn append_creates_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let ops = FileOps::new(tmp.path());
        ops.write_file(&write("new.txt", "x", WriteMode::Append)).unwrap();
        assert_eq!(fs::read_to_string(tmp.path().join("new.txt")).unwrap(), "x");
    }

    #[test]
    fn escape_touches_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path().join("base");
        let ops = FileOps::new(&base);
        let err = ops.write_file(&write("../outside.txt", "x", WriteMode::Overwrite)).unwrap_err();
        assert!(matches!(err, AppError::PathEscape(_)));
        assert!(!tmp.path().join("outside.txt").exists());
        assert!(!base.exists());
    }

    #[test]
    fn writing_onto_a_directory_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let ops = FileOps::new(tmp.path());
        let err = ops.write_file(&write(".", "x", WriteMode::Overwrite)).unwrap_err();
        assert!(err.render().starts_with("Failed to open file:"));
    }

    #[test]
    fn mode_decoding() {
        let args: WriteFileArgs = serde_json::from_value(json!({"path":"a","content":"b"})).unwrap();
        assert_eq!(args.mode.unwrap_or_default(), WriteMode::Overwrite);
        let args: WriteFileArgs =
            serde_json::from_value(json!({"path":"a","content":"b","mode":null})).unwrap();
        assert_eq!(args.mode.unwrap_or_default(), WriteMode::Overwrite);
        let args: WriteFileArgs =
            serde_json::from_value(json!({"path":"a","content":"b","mode":"append"})).unwrap();
        assert_eq!(args.mode, Some(WriteMode::Append));
        assert!(serde_json::from_value::<WriteFileArgs>(
            json!({"path":"a","content":"b","mode":"apend"})
        )
        .is_err());
    }
}
