use crate::{
    AppState,
    handlers::{brand, catalog_type, category, manage, product},
};
use axum::{
    Router,
    routing::{get, post},
};

use super::paths;

/// Catalog Router Module
///
/// Catalog maintenance, open to admins and catalog managers (the product list itself
/// is admin-only).
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        // --- Categories ---
        .route(paths::CATEGORY_LIST, get(category::list))
        .route(paths::CATEGORY_ADD, get(category::add).post(category::add_post))
        .route(
            paths::CATEGORY_UPDATE,
            get(category::update).post(category::update_post),
        )
        .route(paths::CATEGORY_DELETE, post(category::delete))
        // Home-page slot assignment.
        .route(paths::CATEGORY_MANAGE, get(manage::form).post(manage::save))
        // --- Products ---
        .route(paths::PRODUCT_LIST, get(product::list))
        .route(paths::PRODUCT_ADD, get(product::add).post(product::add_post))
        .route(
            paths::PRODUCT_UPDATE,
            get(product::update).post(product::update_post),
        )
        .route(paths::PRODUCT_DELETE, post(product::delete))
        // --- Product types ---
        .route(paths::TYPE_LIST, get(catalog_type::list))
        .route(
            paths::TYPE_ADD,
            get(catalog_type::add).post(catalog_type::add_post),
        )
        .route(
            paths::TYPE_UPDATE,
            get(catalog_type::update).post(catalog_type::update_post),
        )
        .route(paths::TYPE_DELETE, post(catalog_type::delete))
        // --- Brands ---
        .route(paths::BRAND_LIST, get(brand::list))
        .route(paths::BRAND_ADD, get(brand::add).post(brand::add_post))
        .route(paths::BRAND_UPDATE, get(brand::update).post(brand::update_post))
        .route(paths::BRAND_DELETE, post(brand::delete))
}
