use crate::{AppState, handlers::user};
use axum::{
    Router,
    routing::{get, post},
};

use super::paths;

/// Admin Router Module
///
/// User account management. Every route here is restricted to the `admin` role by the
/// access policy.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(paths::USER_LIST, get(user::list))
        .route(paths::USER_ADD, get(user::add).post(user::add_post))
        .route(paths::USER_UPDATE, get(user::update).post(user::update_post))
        .route(paths::USER_DELETE, post(user::delete))
}
