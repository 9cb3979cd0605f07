// Copyright 2026 Listscreen Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP transport shim over the screening core.
//!
//! One route mirrors the one core operation. The shim only maps
//! transports: query parameters in, the JSON envelope or a
//! `{"detail": …}` error body out, with the error taxonomy folded onto
//! HTTP statuses by [`ScreenError::http_status`].

use crate::error::ScreenError;
use crate::screen::Screener;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Both parameters optional at the extractor so a missing one produces the
/// same `{"detail": …}` error body as every other failure, instead of
/// axum's plain-text rejection.
#[derive(Debug, Deserialize)]
struct ScreeningParams {
    name: Option<String>,
    source: Option<String>,
}

/// Build the axum Router with the screening endpoint and permissive CORS.
pub fn router(screener: Arc<Screener>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/screening", get(screening))
        .layer(cors)
        .with_state(screener)
}

/// Bind and serve until the process is stopped.
pub async fn serve(port: u16, screener: Arc<Screener>) -> anyhow::Result<()> {
    let app = router(screener);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("screening API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn screening(
    State(screener): State<Arc<Screener>>,
    Query(params): Query<ScreeningParams>,
) -> Response {
    // A missing name is an empty query; a missing source is no recognized
    // source. Both fold onto the existing taxonomy.
    let name = params.name.unwrap_or_default();
    let Some(source) = params.source else {
        return error_response(ScreenError::InvalidSource(String::new()));
    };
    match screener.screen(&name, &source).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => error_response(e),
    }
}

fn error_response(e: ScreenError) -> Response {
    let status = StatusCode::from_u16(e.http_status()).unwrap_or(StatusCode::BAD_GATEWAY);
    (status, Json(json!({ "detail": e.to_string() }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::Source;

    #[test]
    fn test_error_response_statuses() {
        let r = error_response(ScreenError::InvalidSource("nope".to_string()));
        assert_eq!(r.status(), StatusCode::BAD_REQUEST);

        let r = error_response(ScreenError::upstream(Source::Ofac, 503, "down"));
        assert_eq!(r.status(), StatusCode::BAD_GATEWAY);

        // The worldbank feed relays its upstream status
        let r = error_response(ScreenError::upstream(Source::Worldbank, 503, "down"));
        assert_eq!(r.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
