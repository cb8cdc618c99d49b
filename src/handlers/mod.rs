//! Controller actions, one module per entity.
//!
//! Every handler runs after the dispatch gate has accepted the request, so none of
//! them check roles or tokens themselves. Successful writes always answer with a
//! redirect; validation problems re-render the form with status 200.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde_json::{Value, json};
use tower_sessions::Session;

use crate::{AppState, error::AppError, gate, session::VisitorSession};

pub mod brand;
pub mod catalog_type;
pub mod category;
pub mod main;
pub mod manage;
pub mod product;
pub mod user;

pub const ASSETS_BASE_URI: &str = "/assets/";

/// show
///
/// Renders `view` with the variables every page layout needs (`current_user`,
/// `assets_base_uri`) merged into `vars`.
pub fn show(
    state: &AppState,
    visitor: &VisitorSession,
    view: &str,
    mut vars: Value,
) -> Result<Html<String>, AppError> {
    if let Value::Object(map) = &mut vars {
        map.insert("current_user".to_string(), json!(visitor.user));
        map.insert("assets_base_uri".to_string(), json!(ASSETS_BASE_URI));
    }
    Ok(Html(state.renderer.render(view, vars)?))
}

pub fn show_with_status(
    state: &AppState,
    visitor: &VisitorSession,
    status: StatusCode,
    view: &str,
) -> Result<Response, AppError> {
    let html = show(state, visitor, view, json!({}))?;
    Ok((status, html).into_response())
}

/// 403 page. Also used by the dispatch gate.
pub fn forbidden(state: &AppState, visitor: &VisitorSession) -> Result<Response, AppError> {
    show_with_status(state, visitor, StatusCode::FORBIDDEN, "error/err403.html")
}

pub fn not_found(state: &AppState, visitor: &VisitorSession) -> Result<Response, AppError> {
    show_with_status(state, visitor, StatusCode::NOT_FOUND, "error/err404.html")
}

/// 303 to a named route.
pub fn redirect(state: &AppState, route: &str, params: &[(&str, &str)]) -> Result<Response, AppError> {
    let url = state.routes.generate_url(route, params)?;
    Ok(Redirect::to(&url).into_response())
}

/// Issues a fresh CSRF token and stores it before the page embedding it is rendered.
pub async fn issue_token(session: &Session, visitor: &mut VisitorSession) -> Result<String, AppError> {
    let token = gate::generate_token(visitor);
    visitor.persist(session).await?;
    Ok(token)
}

/// Fallback for paths outside the route table.
pub async fn fallback(State(state): State<AppState>, session: Session) -> Result<Response, AppError> {
    let visitor = VisitorSession::load(&session).await?;
    not_found(&state, &visitor)
}
