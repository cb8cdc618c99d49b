use crate::{AppState, handlers};
use axum::{Router, routing::get};

use super::paths;

/// Public Router Module
///
/// Pages reachable without a login. None of these names appear in the built-in access
/// policy; the login POST is still CSRF protected.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /
        // Dashboard with the home-page categories and the latest products.
        .route(paths::HOME, get(handlers::main::home))
        // GET|POST /login
        .route(
            paths::LOGIN,
            get(handlers::user::login).post(handlers::user::login_post),
        )
        // GET /logout
        // Flushes the session and sends the visitor back to the login form.
        .route(paths::LOGOUT, get(handlers::user::logout))
}
