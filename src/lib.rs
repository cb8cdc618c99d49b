use std::sync::Arc;

use axum::{
    Form, Router,
    body::{Body, Bytes},
    extract::{FromRef, FromRequest, Request, State},
    http::{HeaderName, HeaderValue, Method, header::CONTENT_TYPE},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::{DefaultOnResponse, TraceLayer},
};
use tower_sessions::{MemoryStore, Session, SessionManagerLayer, cookie::SameSite};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod auth;
pub mod config;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod models;
pub mod render;
pub mod repository;
pub mod session;

// Named route table plus the routers binding paths to handlers.
pub mod routes;
use routes::{RouteTable, admin, catalog, public};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use error::AppError;
pub use gate::{AccessPolicy, GateDecision, Gatekeeper};
pub use render::{RendererState, TemplateRenderer};
pub use repository::{MemoryRepository, PostgresRepository, RepositoryState};
pub use session::VisitorSession;

/// Upper bound for a buffered form body read by the CSRF gate. Same as axum's
/// `DefaultBodyLimit`, so the gate never refuses a body the handler would accept.
const FORM_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// AppState
///
/// Everything a request needs, cloned cheaply into every handler: the record store,
/// the renderer, the route table and the gates built from the access policy.
#[derive(Clone)]
pub struct AppState {
    pub repo: RepositoryState,
    pub renderer: RendererState,
    pub routes: RouteTable,
    pub gate: Arc<Gatekeeper>,
    pub config: AppConfig,
}

impl AppState {
    /// Builds the template renderer and the gates. Fails if a template does not compile
    /// or the policy's login route is not in the route table.
    pub fn new(
        repo: RepositoryState,
        config: AppConfig,
        policy: AccessPolicy,
    ) -> Result<Self, AppError> {
        let routes = RouteTable::default();
        let login_url = routes.generate_url(&policy.login_route, &[])?;
        let renderer = Arc::new(TemplateRenderer::new(routes)?) as RendererState;

        Ok(Self {
            repo,
            renderer,
            routes,
            gate: Arc::new(Gatekeeper::new(policy, login_url)),
            config,
        })
    }
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for RendererState {
    fn from_ref(app_state: &AppState) -> RendererState {
        app_state.renderer.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

#[derive(Deserialize)]
struct CsrfField {
    #[serde(rename = "tokenCSRF")]
    token: Option<String>,
}

/// Reads `tokenCSRF` from a buffered urlencoded body. Malformed bodies carry no token.
async fn read_csrf_field(body: &Bytes) -> Option<String> {
    let mut probe = Request::new(Body::from(body.clone()));
    *probe.method_mut() = Method::POST;
    probe.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/x-www-form-urlencoded"),
    );

    Form::<CsrfField>::from_request(probe, &())
        .await
        .ok()
        .and_then(|Form(field)| field.token)
}

/// gate_middleware
///
/// Request dispatch sequencing. Resolves the route by method and path, runs the access
/// gate then the CSRF gate against the visitor's session, and only lets the handler run
/// on `Proceed`. Unknown paths pass straight through to the 404 fallback.
///
/// For CSRF-protected routes the body is buffered, once access is granted, so the token
/// can be read, then put back for the handler's own `Form` extractor.
async fn gate_middleware(
    State(state): State<AppState>,
    session: Session,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(route) = state
        .routes
        .resolve(request.method(), request.uri().path())
    else {
        return Ok(next.run(request).await);
    };

    let mut visitor = VisitorSession::load(&session).await?;
    let loaded = visitor.clone();

    // Access is decided before the body is touched.
    match state.gate.admit(route.name, &visitor) {
        GateDecision::Proceed => {}
        GateDecision::RedirectTo(url) => return Ok(Redirect::to(&url).into_response()),
        GateDecision::Forbidden => return handlers::forbidden(&state, &visitor),
    }

    let (mut request, submitted) = if state.gate.requires_token(route.name) {
        let (parts, body) = request.into_parts();
        match axum::body::to_bytes(body, FORM_BODY_LIMIT).await {
            Ok(bytes) => {
                let token = read_csrf_field(&bytes).await;
                (Request::from_parts(parts, Body::from(bytes)), token)
            }
            // Oversized or broken bodies carry no token.
            Err(err) => {
                tracing::warn!(route = route.name, error = %err, "form body unreadable");
                (Request::from_parts(parts, Body::empty()), None)
            }
        }
    } else {
        (request, None)
    };

    match state
        .gate
        .verify_token(route.name, submitted.as_deref(), &mut visitor)
    {
        GateDecision::Proceed => {
            if visitor != loaded {
                visitor.persist(&session).await?;
            }
            request.extensions_mut().insert(route);
            Ok(next.run(request).await)
        }
        GateDecision::RedirectTo(url) => Ok(Redirect::to(&url).into_response()),
        GateDecision::Forbidden => handlers::forbidden(&state, &visitor),
    }
}

/// create_router
///
/// Assembles every router behind the dispatch gate and the session layer, then wraps
/// the whole application in the request-id and tracing layers.
pub fn create_router(state: AppState) -> Router {
    let x_request_id = HeaderName::from_static("x-request-id");

    // Sessions live in process memory; a restart logs everybody out.
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(state.config.secure_cookies())
        .with_same_site(SameSite::Lax);

    let assets = ServeDir::new(&state.config.assets_dir);

    let base_router = Router::new()
        .merge(public::public_routes())
        .merge(catalog::catalog_routes())
        .merge(admin::admin_routes())
        .nest_service("/assets", assets)
        .fallback(handlers::fallback)
        // The gate needs the session, so the session layer must wrap it.
        .layer(middleware::from_fn_with_state(state.clone(), gate_middleware))
        .layer(session_layer)
        .with_state(state);

    base_router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(trace_span_logger)
                    .on_response(
                        DefaultOnResponse::new()
                            .level(Level::INFO)
                            .latency_unit(tower_http::LatencyUnit::Millis),
                    ),
            )
            .layer(PropagateRequestIdLayer::new(x_request_id)),
    )
}

/// trace_span_logger
///
/// Span for `TraceLayer` carrying the method, URI and `x-request-id`, so every log
/// line of one request can be correlated.
fn trace_span_logger(request: &axum::http::Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
