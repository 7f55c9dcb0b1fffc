//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request ID, CORS headers)
//! - Relay GET requests to the upstream
//! - Answer preflight requests locally, including `OPTIONS *`
//! - Reject every other method (HEAD included) with 405
//! - Serve until the shutdown signal fires, then drain

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Method, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, MethodRouter},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::config::RelayConfig;
use crate::http::cors::{preflight, with_cors_headers};
use crate::http::request::{outbound_request, RequestIdExt, RequestIdLayer};
use crate::lifecycle::ShutdownSignal;
use crate::upstream::{HttpUpstream, Upstream};

/// Methods the relay answers; everything else gets a 405.
const ALLOWED_METHODS: &str = "GET, OPTIONS";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<dyn Upstream>,
    pub upstream_base: Arc<str>,
}

/// HTTP server for the relay.
pub struct RelayServer {
    router: Router,
    config: RelayConfig,
}

impl RelayServer {
    /// Create a new relay server forwarding over HTTP to the configured upstream.
    pub fn new(config: RelayConfig) -> Self {
        let upstream = Arc::new(HttpUpstream::new(&config.upstream));
        Self::with_upstream(config, upstream)
    }

    /// Create a relay server that forwards through the given upstream.
    pub fn with_upstream(config: RelayConfig, upstream: Arc<dyn Upstream>) -> Self {
        let state = AppState {
            upstream,
            upstream_base: Arc::from(config.upstream.base_url.as_str()),
        };

        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        // An explicit HEAD route keeps `get` from answering HEAD itself.
        let relay: MethodRouter<AppState> = get(relay_handler)
            .head(unsupported_method)
            .options(preflight)
            .fallback(unsupported_method);

        let router = Router::new()
            .route("/", relay.clone())
            .route("/{*path}", relay)
            .fallback(unrouted)
            .with_state(state);

        // RequestIdLayer is outermost so the trace span can read the ID.
        with_cors_headers(router)
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
            .layer(RequestIdLayer)
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
                tracing::info!("Stopping server");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Relay one GET to the upstream and hand back whatever it answers.
async fn relay_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = request.request_id().unwrap_or_default();

    let outbound = match outbound_request(&state.upstream_base, &request) {
        Ok(outbound) => outbound,
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Error proxying request");
            return e.into_response();
        }
    };

    tracing::info!(
        request_id = %request_id,
        target_url = %outbound.uri,
        "Proxying request"
    );

    match state.upstream.forward(outbound).await {
        Ok(response) => {
            tracing::debug!(
                request_id = %request_id,
                status = %response.status,
                body_bytes = response.body.len(),
                "Upstream responded"
            );
            response.into_response()
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Error proxying request");
            e.into_response()
        }
    }
}

/// Per-request trace span, tagged with the ID from [`RequestIdLayer`].
fn request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .request_id()
        .map(|id| id.to_string())
        .unwrap_or_default();
    tracing::debug_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id
    )
}

/// Targets no route matches, such as the asterisk-form `OPTIONS *`.
async fn unrouted(method: Method) -> Response {
    if method == Method::OPTIONS {
        preflight().await.into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

async fn unsupported_method(method: Method, uri: Uri) -> impl IntoResponse {
    tracing::warn!(method = %method, path = %uri.path(), "Rejecting unsupported method");
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, ALLOWED_METHODS)],
    )
}
