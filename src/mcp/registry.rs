use crate::{
    errors::{AppError, AppResult},
    mcp::types::ToolInfo,
    tools::{
        CreateDirectoryArgs, DeleteFileArgs, FileExistsArgs, FileInfoArgs, FileOps,
        ListDirectoryArgs, ReadFileArgs, WriteFileArgs,
    },
};
use schemars::schema_for;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    WriteFile,
    ReadFile,
    DeleteFile,
    ListDirectory,
    CreateDirectory,
    FileExists,
    FileInfo,
}

impl ToolKind {
    pub const ALL: [ToolKind; 7] = [
        ToolKind::WriteFile,
        ToolKind::ReadFile,
        ToolKind::DeleteFile,
        ToolKind::ListDirectory,
        ToolKind::CreateDirectory,
        ToolKind::FileExists,
        ToolKind::FileInfo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::WriteFile => "write_file",
            ToolKind::ReadFile => "read_file",
            ToolKind::DeleteFile => "delete_file",
            ToolKind::ListDirectory => "list_directory",
            ToolKind::CreateDirectory => "create_directory",
            ToolKind::FileExists => "file_exists",
            ToolKind::FileInfo => "file_info",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ToolKind::WriteFile => "Write content to a file",
            ToolKind::ReadFile => "Read content from a file",
            ToolKind::DeleteFile => "Delete a file",
            ToolKind::ListDirectory => "List the contents of a directory",
            ToolKind::CreateDirectory => "Create a directory",
            ToolKind::FileExists => "Check if a file or directory exists",
            ToolKind::FileInfo => "Get detailed information about a file or directory",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    pub fn input_schema(self) -> Value {
        let schema = match self {
            ToolKind::WriteFile => schema_for!(WriteFileArgs),
            ToolKind::ReadFile => schema_for!(ReadFileArgs),
            ToolKind::DeleteFile => schema_for!(DeleteFileArgs),
            ToolKind::ListDirectory => schema_for!(ListDirectoryArgs),
            ToolKind::CreateDirectory => schema_for!(CreateDirectoryArgs),
            ToolKind::FileExists => schema_for!(FileExistsArgs),
            ToolKind::FileInfo => schema_for!(FileInfoArgs),
        };
        serde_json::to_value(schema).unwrap_or_default()
    }

    pub fn info(self) -> ToolInfo {
        ToolInfo { name: self.name(), description: self.description(), input_schema: self.input_schema() }
    }
}

pub fn list_tools() -> Vec<ToolInfo> {
    ToolKind::ALL.into_iter().map(ToolKind::info).collect()
}

/// A decoded tool invocation: one variant per tool, each with typed arguments.
#[derive(Debug, Clone)]
pub enum ToolCall {
    WriteFile(WriteFileArgs),
    ReadFile(ReadFileArgs),
    DeleteFile(DeleteFileArgs),
    ListDirectory(ListDirectoryArgs),
    CreateDirectory(CreateDirectoryArgs),
    FileExists(FileExistsArgs),
    FileInfo(FileInfoArgs),
}

impl ToolCall {
    pub fn decode(name: &str, arguments: Value) -> AppResult<Self> {
        let kind = ToolKind::from_name(name).ok_or_else(|| AppError::UnknownTool(name.to_string()))?;
        let call = match kind {
            ToolKind::WriteFile => ToolCall::WriteFile(args(arguments)?),
            ToolKind::ReadFile => ToolCall::ReadFile(args(arguments)?),
            ToolKind::DeleteFile => ToolCall::DeleteFile(args(arguments)?),
            ToolKind::ListDirectory => ToolCall::ListDirectory(args(arguments)?),
            ToolKind::CreateDirectory => ToolCall::CreateDirectory(args(arguments)?),
            ToolKind::FileExists => ToolCall::FileExists(args(arguments)?),
            ToolKind::FileInfo => ToolCall::FileInfo(args(arguments)?),
        };
        Ok(call)
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            ToolCall::WriteFile(_) => ToolKind::WriteFile,
            ToolCall::ReadFile(_) => ToolKind::ReadFile,
            ToolCall::DeleteFile(_) => ToolKind::DeleteFile,
            ToolCall::ListDirectory(_) => ToolKind::ListDirectory,
            ToolCall::CreateDirectory(_) => ToolKind::CreateDirectory,
            ToolCall::FileExists(_) => ToolKind::FileExists,
            ToolCall::FileInfo(_) => ToolKind::FileInfo,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            ToolCall::WriteFile(a) => &a.path,
            ToolCall::ReadFile(a) => &a.path,
            ToolCall::DeleteFile(a) => &a.path,
            ToolCall::ListDirectory(a) => &a.path,
            ToolCall::CreateDirectory(a) => &a.path,
            ToolCall::FileExists(a) => &a.path,
            ToolCall::FileInfo(a) => &a.path,
        }
    }

    /// Blocking; callers on an async runtime should move this off the reactor.
    pub fn execute(&self, ops: &FileOps) -> AppResult<String> {
        match self {
            ToolCall::WriteFile(a) => ops.write_file(a),
            ToolCall::ReadFile(a) => ops.read_file(a),
            ToolCall::DeleteFile(a) => ops.delete_file(a),
            ToolCall::ListDirectory(a) => ops.list_directory(a),
            ToolCall::CreateDirectory(a) => ops.create_directory(a),
            ToolCall::FileExists(a) => ops.file_exists(a),
            ToolCall::FileInfo(a) => ops.file_info(a),
        }
    }
}

fn args<T: DeserializeOwned>(arguments: Value) -> AppResult<T> {
    serde_json::from_value(arguments).map_err(|e| AppError::InvalidParams(e.to_string()))
}
