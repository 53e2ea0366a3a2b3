use crate::errors::{AppError, AppResult};
use axum::http::{header::USER_AGENT, HeaderMap};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Who is calling, built from the transport and handed to dispatch.
#[derive(Debug, Clone)]
pub struct CallerContext {
    pub request_id: String,
    pub user_agent: String,
}

impl CallerContext {
    /// A tool call must carry a readable `User-Agent` to be attributed.
    pub fn from_headers(headers: &HeaderMap) -> AppResult<Self> {
        let user_agent = headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(AppError::ContextMissing)?;
        Ok(Self { request_id: request_id(headers), user_agent: user_agent.to_string() })
    }

    /// Stand-in used to audit calls rejected before a context exists.
    pub fn unattributed(headers: &HeaderMap) -> Self {
        Self { request_id: request_id(headers), user_agent: "unknown".to_string() }
    }
}

fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}
