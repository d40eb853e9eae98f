// LoopOptimizer HTTP API
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::MAX_BODY_BYTES;
use crate::error::OptimizerError;
use crate::optimizer::options::OptionOverrides;
use crate::optimizer::pipeline::OptimizerState;
use crate::optimizer::remote::RemoteProcessor;
use crate::state::{ServiceState, ServiceStatus};

pub type AppState<R> = Arc<ServiceState<R>>;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    #[serde(default)]
    pub animation_data: Option<Value>,
    /// Kept loose so mistyped options reach the handler's error envelope.
    #[serde(default)]
    pub options: Option<Value>,
}

pub fn create_router<R>(state: AppState<R>) -> Router
where
    R: RemoteProcessor + 'static,
{
    create_router_with_limit(state, MAX_BODY_BYTES)
}

/// Same routes with a custom request body limit in bytes.
pub fn create_router_with_limit<R>(state: AppState<R>, body_limit: usize) -> Router
where
    R: RemoteProcessor + 'static,
{
    Router::new()
        .route("/api/optimize", post(optimize::<R>))
        .route("/api/status", get(get_status::<R>))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn start_server<R>(port: u16, state: AppState<R>) -> anyhow::Result<()>
where
    R: RemoteProcessor + 'static,
{
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let display_addr = if addr.ip().is_unspecified() {
        format!("127.0.0.1:{}", port)
    } else {
        addr.to_string()
    };
    info!("[SERVER] LoopOptimizer API running on http://{}", display_addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn get_status<R>(State(state): State<AppState<R>>) -> Json<ServiceStatus>
where
    R: RemoteProcessor + 'static,
{
    let status = match state.optimizer.state() {
        OptimizerState::Ready => "ready",
        OptimizerState::Uninitialized => "uninitialized",
    };
    Json(ServiceStatus {
        status,
        uptime_secs: state.started_at.elapsed().as_secs(),
        default_options: state.optimizer.default_options().clone(),
    })
}

async fn optimize<R>(
    State(state): State<AppState<R>>,
    payload: Result<Json<OptimizeRequest>, JsonRejection>,
) -> Response
where
    R: RemoteProcessor + 'static,
{
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            warn!("[SERVER] Unreadable optimize request: {}", rejection.body_text());
            return failure(rejection.status(), rejection.body_text());
        }
    };

    let animation = match payload.animation_data {
        Some(animation) if !animation.is_null() => animation,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Animation data is required" })),
            )
                .into_response();
        }
    };

    let outcome = match payload.options.as_ref().map(OptionOverrides::from_value) {
        Some(Err(e)) => Err(e),
        Some(Ok(overrides)) => state.optimizer.optimize_loop(&animation, Some(&overrides)).await,
        None => state.optimizer.optimize_loop(&animation, None).await,
    };

    match outcome {
        Ok(result) => Json(json!({ "success": true, "data": result })).into_response(),
        Err(e) => error_response(e),
    }
}

fn error_response(e: OptimizerError) -> Response {
    if e.is_client_error() {
        warn!("[SERVER] Rejected optimize request: {}", e);
        failure(StatusCode::BAD_REQUEST, e.to_string())
    } else {
        error!("[SERVER] Optimization failed: {}", e);
        failure(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    }
}

fn failure(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "success": false, "error": message }))).into_response()
}
