use std::sync::Arc;

use axum::extract::State;
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use danci_core::lookup::Lookup;
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

/// Shared gateway state: just the generation backend. No per-call state is
/// retained between requests.
#[derive(Clone)]
pub struct GatewayState {
    pub lookup: Arc<dyn Lookup>,
}

pub fn create_router(state: GatewayState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([header::CONTENT_TYPE])
        .allow_methods([Method::POST, Method::OPTIONS]);

    Router::new()
        .route("/generate", post(generate).fallback(method_not_allowed))
        .layer(cors)
        .with_state(state)
}

pub async fn serve(addr: &str, state: GatewayState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("gateway listening on {addr}");
    axum::serve(listener, create_router(state)).await?;
    Ok(())
}

async fn method_not_allowed() -> Response {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").into_response()
}

#[derive(Deserialize)]
struct GenerateRequest {
    #[serde(default)]
    word: String,
}

async fn generate(
    State(state): State<GatewayState>,
    Json(request): Json<GenerateRequest>,
) -> Response {
    let word = request.word.trim();
    if word.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Word is required" })),
        )
            .into_response();
    }

    match state.lookup.generate(word).await {
        Ok(generated) => (StatusCode::OK, Json(generated)).into_response(),
        Err(e) => {
            tracing::error!("generation failed for {word}: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to generate content",
                    "details": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}
