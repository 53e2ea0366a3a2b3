use crate::{
    config::Config,
    errors::{AppError, AppResult},
    mcp::{
        context::CallerContext,
        registry::{list_tools, ToolCall},
        types::{initialize_result, CallToolParams, CallToolResult, RpcRequest, RpcResponse, JSONRPC_VERSION},
    },
    security::{self, RequestLimiter},
    tools::FileOps,
};
use anyhow::Context;
use axum::{
    extract::{rejection::BytesRejection, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{debug, info};

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub ops: Arc<FileOps>,
    pub limiter: RequestLimiter,
}

impl AppState {
    pub fn new(cfg: Config, ops: FileOps) -> Self {
        let limiter = RequestLimiter::new(cfg.limits.requests_per_second, cfg.limits.burst);
        Self { cfg: Arc::new(cfg), ops: Arc::new(ops), limiter }
    }
}

pub async fn serve(cfg: Config, ops: FileOps) -> anyhow::Result<()> {
    let shared = AppState::new(cfg, ops);
    let app = build_router(shared.clone());

    let bind = (shared.cfg.server.bind_addr.as_str(), shared.cfg.server.port);
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("binding {}:{}", bind.0, bind.1))?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}

pub fn build_router(shared: AppState) -> Router {
    let base = shared.cfg.server.base_path.clone();
    let limit_bytes = shared.cfg.limits.max_request_kb * 1024;
    Router::new()
        .route("/health", get(health))
        .route(
            &base,
            post(mcp)
                .layer(RequestBodyLimitLayer::new(limit_bytes))
                .layer(middleware::from_fn_with_state(shared.clone(), declared_size)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status":"ok"})))
}

/// Rejects a declared oversized body before the limit layer sees it, so the
/// caller still gets a JSON-RPC envelope.
async fn declared_size(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match security::content_length_ok(req.headers(), state.cfg.limits.max_request_kb) {
        Ok(()) => next.run(req).await,
        Err(e) => rpc_error(Value::Null, e),
    }
}

async fn mcp(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(b) => b,
        Err(rej) if rej.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return rpc_error(Value::Null, AppError::RequestTooLarge)
        }
        Err(rej) => return rpc_error(Value::Null, AppError::Parse(rej.body_text())),
    };
    let raw: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => return rpc_error(Value::Null, AppError::Parse(e.to_string())),
    };
    let req: RpcRequest = match serde_json::from_value(raw) {
        Ok(r) => r,
        Err(e) => return rpc_error(Value::Null, AppError::InvalidRequest(e.to_string())),
    };
    if req.jsonrpc.as_deref().is_some_and(|v| v != JSONRPC_VERSION) {
        let id = req.id.unwrap_or(Value::Null);
        return rpc_error(id, AppError::InvalidRequest("unsupported jsonrpc version".into()));
    }
    if req.is_notification() {
        debug!(method = %req.method, "notification");
        return StatusCode::ACCEPTED.into_response();
    }
    let id = match req.reply_id() {
        Ok(id) => id,
        Err(e) => return rpc_error(Value::Null, e),
    };
    let outcome = match req.method.as_str() {
        "initialize" => Ok(initialize_result()),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(json!({ "tools": list_tools() })),
        "tools/call" => call_tool(&state, &headers, req.params).await,
        other => Err(AppError::MethodNotFound(other.to_string())),
    };
    match outcome {
        Ok(result) => (StatusCode::OK, Json(RpcResponse::ok(id, result))).into_response(),
        Err(e) => rpc_error(id, e),
    }
}

async fn call_tool(state: &AppState, headers: &HeaderMap, params: Value) -> AppResult<Value> {
    let started = Instant::now();
    let attempted = params.get("name").and_then(Value::as_str).unwrap_or("unknown").to_string();
    let deny = |ctx: &CallerContext, e: AppError| {
        audit(ctx, &attempted, "deny", e.code(), started.elapsed().as_millis() as u64, 0);
        e
    };
    let ctx = CallerContext::from_headers(headers)
        .map_err(|e| deny(&CallerContext::unattributed(headers), e))?;
    let params: CallToolParams = serde_json::from_value(params)
        .map_err(|e| deny(&ctx, AppError::InvalidParams(e.to_string())))?;
    let tool = params.name.clone();

    let outcome = execute(state, params).await;
    let (decision, code) = match &outcome {
        Ok(_) => ("allow", "OK"),
        Err(e) if e.is_tool_failure() => ("error", e.code()),
        Err(e) => ("deny", e.code()),
    };
    let result = CallToolResult::from_outcome(outcome);
    let bytes_out = result.as_ref().map(|r| r.joined_text().len()).unwrap_or(0);
    audit(&ctx, &tool, decision, code, started.elapsed().as_millis() as u64, bytes_out);

    serde_json::to_value(result?).map_err(|e| AppError::Internal(e.to_string()))
}

async fn execute(state: &AppState, params: CallToolParams) -> AppResult<String> {
    let call = ToolCall::decode(&params.name, params.arguments)?;
    state.limiter.check()?;
    debug!(tool = call.kind().name(), path = call.path(), "dispatching");
    let ops = state.ops.clone();
    tokio::task::spawn_blocking(move || call.execute(&ops))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
}

fn rpc_error(id: Value, err: AppError) -> Response {
    (err.status(), Json(RpcResponse::err(id, &err))).into_response()
}

fn audit(
    ctx: &CallerContext,
    tool: &str,
    decision: &str,
    code: &str,
    duration_ms: u64,
    bytes_out: usize,
) {
    tracing::info!(
        request_id = %ctx.request_id,
        user_agent = %ctx.user_agent,
        tool = tool,
        decision = decision,
        code = code,
        duration_ms = duration_ms,
        bytes_out = bytes_out,
        "audit"
    );
}
