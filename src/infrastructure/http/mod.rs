pub mod cors;
pub mod request_id;

use axum::{body::Body, http::Request, middleware, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::controllers::speech::SpeechController;
use crate::infrastructure::config::Config;

pub use cors::cors_headers_middleware;
pub use request_id::{request_id_middleware, request_id_of, RequestId, X_REQUEST_ID};

/// Build the relay router. Every path and method lands on the speech controller.
pub fn create_router(speech_controller: Arc<SpeechController>) -> Router {
    Router::new()
        .fallback(SpeechController::handle)
        .with_state(speech_controller)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                .layer(middleware::from_fn(cors_headers_middleware)),
        )
}

/// Span for one request, tagged with the ID the caller sees in `x-request-id`
pub fn make_request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        request_id = %request_id_of(request),
        method = %request.method(),
        uri = %request.uri(),
    )
}

/// Start the HTTP server
pub async fn start_http_server(
    config: Arc<Config>,
    speech_controller: Arc<SpeechController>,
) -> anyhow::Result<()> {
    let app = create_router(speech_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
