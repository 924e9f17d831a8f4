#[cfg(test)]
#[path = "server_test.rs"]
mod tests;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use axum::Json;
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;

use crate::domain::models::GenerationError;
use crate::domain::models::GenerationResponse;
use crate::domain::services::GenerationProxy;

impl IntoResponse for GenerationError {
    fn into_response(self) -> Response {
        let status = match self {
            GenerationError::InvalidRequest => StatusCode::BAD_REQUEST,
            GenerationError::NotConfigured | GenerationError::UpstreamFailure { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        return (status, Json(self.to_response())).into_response();
    }
}

async fn health() -> &'static str {
    return "ok";
}

/// The body is parsed by hand so that a body that is not JSON, or JSON
/// without a usable prompt, ends up as the same 400.
async fn generate(State(proxy): State<Arc<GenerationProxy>>, body: Bytes) -> Response {
    let payload = serde_json::from_slice::<Value>(&body).ok();
    let prompt = payload
        .as_ref()
        .and_then(|value| return value.get("prompt"))
        .and_then(Value::as_str);

    match proxy.generate(prompt).await {
        Ok(code) => return Json(GenerationResponse { code }).into_response(),
        Err(err) => {
            if let GenerationError::InvalidRequest = err {
                tracing::debug!(body_len = body.len(), "Rejected generation request");
            }
            return err.into_response();
        }
    }
}

pub fn router(proxy: Arc<GenerationProxy>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    return Router::new()
        .route("/health", get(health))
        .route("/generate", post(generate))
        .layer(cors)
        .with_state(proxy);
}

pub async fn serve(listener: TcpListener, proxy: Arc<GenerationProxy>) -> Result<()> {
    axum::serve(listener, router(proxy)).await?;
    return Ok(());
}

pub async fn start(port: u16, proxy: GenerationProxy) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "ComponentLab server listening");

    return serve(listener, Arc::new(proxy)).await;
}
