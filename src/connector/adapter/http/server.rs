use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::trace::TraceLayer;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use super::envelope::{CallableRequest, CallableResponse};
use super::error::ApiError;
use crate::connector::api::Container;
use crate::domain::{
    CallerIdentity, CheckInOutcome, DailyCheckInRequest, PanicPlanRequest, RequestValidator,
};

#[derive(Clone)]
pub struct AppState {
    container: Arc<Container>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub region: String,
}

/// Build the callable router. Function names match the client SDK's callable names.
pub fn router(container: Arc<Container>) -> Router {
    let state = AppState { container };
    Router::new()
        .route("/generatePanicPlan", post(generate_panic_plan))
        .route("/dailyCheckIn", post(daily_check_in))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until Ctrl-C.
pub async fn serve(container: Arc<Container>, addr: SocketAddr) -> anyhow::Result<()> {
    let region = container.region().to_string();
    let app = router(container);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Serving callable functions on http://{} (region {})", addr, region);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn resolve_caller(state: &AppState, headers: &HeaderMap) -> Option<CallerIdentity> {
    state.container.authenticator().authenticate(bearer_token(headers))
}

async fn generate_panic_plan(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CallableResponse<Value>>, ApiError> {
    let span = info_span!("callable", function = "generatePanicPlan", request_id = %Uuid::new_v4());
    async move {
        let caller = resolve_caller(&state, &headers);
        RequestValidator::require_caller(caller.as_ref())?;
        let request: PanicPlanRequest = CallableRequest::from_body(&body)?.into_payload()?;

        let completion = state
            .container
            .panic_plan_use_case()
            .execute(caller.as_ref(), request)
            .await?;
        Ok::<_, ApiError>(Json(CallableResponse::new(completion.into_value())))
    }
    .instrument(span)
    .await
}

async fn daily_check_in(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CallableResponse<CheckInOutcome>>, ApiError> {
    let span = info_span!("callable", function = "dailyCheckIn", request_id = %Uuid::new_v4());
    async move {
        let caller = resolve_caller(&state, &headers);
        RequestValidator::require_caller(caller.as_ref())?;
        let request: DailyCheckInRequest = CallableRequest::from_body(&body)?.into_payload()?;

        let outcome = state
            .container
            .check_in_use_case()
            .execute(caller.as_ref(), request)
            .await?;
        Ok::<_, ApiError>(Json(CallableResponse::new(outcome)))
    }
    .instrument(span)
    .await
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        region: state.container.region().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn extracts_bearer_token() {
        let mut headers = HeaderMap::new();
        assert!(bearer_token(&headers).is_none());

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(bearer_token(&headers), Some("abc"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(bearer_token(&headers).is_none());
    }
}
