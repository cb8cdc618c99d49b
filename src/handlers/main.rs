use axum::{extract::State, response::Html};
use serde_json::json;
use tower_sessions::Session;

use super::show;
use crate::{AppState, error::AppError, models::HOME_SLOTS, session::VisitorSession};

/// home
///
/// Dashboard: the categories currently placed on the storefront home page and the most
/// recently added products.
pub async fn home(State(state): State<AppState>, session: Session) -> Result<Html<String>, AppError> {
    let visitor = VisitorSession::load(&session).await?;
    let categories = state.repo.home_categories(HOME_SLOTS as i64).await;
    let products = state.repo.latest_products(HOME_SLOTS as i64).await;

    show(
        &state,
        &visitor,
        "main/home.html",
        json!({ "categories": categories, "products": products }),
    )
}
