use axum::http::StatusCode;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("path is outside allowed directory: {0}")]
    PathEscape(String),
    #[error("Failed to {action}: {source}")]
    Filesystem {
        action: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("caller context not found for request")]
    ContextMissing,
    #[error("parse error: {0}")]
    Parse(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("method not found: {0}")]
    MethodNotFound(String),
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error("invalid params: {0}")]
    InvalidParams(String),
    #[error("request too large")]
    RequestTooLarge,
    #[error("rate limited")]
    RateLimited,
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Builds a mapper for the single filesystem action a tool performs.
    pub fn fs(action: &'static str) -> impl FnOnce(io::Error) -> AppError {
        move |source| AppError::Filesystem { action, source }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::PathEscape(_) => "PathEscape",
            AppError::Filesystem { .. } => "FilesystemFailure",
            AppError::ContextMissing => "ContextMissing",
            AppError::Parse(_) => "ParseError",
            AppError::InvalidRequest(_) => "InvalidRequest",
            AppError::MethodNotFound(_) => "MethodNotFound",
            AppError::UnknownTool(_) => "UnknownTool",
            AppError::InvalidParams(_) => "InvalidParams",
            AppError::RequestTooLarge => "RequestTooLarge",
            AppError::RateLimited => "RateLimited",
            AppError::Internal(_) => "Internal",
        }
    }

    /// JSON-RPC error code carried in the envelope.
    pub fn rpc_code(&self) -> i64 {
        match self {
            AppError::Parse(_) => -32700,
            AppError::InvalidRequest(_) | AppError::ContextMissing | AppError::RequestTooLarge => {
                -32600
            }
            AppError::MethodNotFound(_) => -32601,
            AppError::UnknownTool(_) | AppError::InvalidParams(_) => -32602,
            AppError::Internal(_) => -32603,
            AppError::RateLimited => -32000,
            AppError::PathEscape(_) => -32001,
            AppError::Filesystem { .. } => -32002,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Parse(_) | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::RequestTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::OK,
        }
    }

    /// Failures a tool recovers from locally and reports as response text.
    pub fn is_tool_failure(&self) -> bool {
        matches!(self, AppError::PathEscape(_) | AppError::Filesystem { .. })
    }

    /// Human-readable text placed in a tool response.
    pub fn render(&self) -> String {
        match self {
            AppError::PathEscape(_) => format!("Error: {self}"),
            _ => self.to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
