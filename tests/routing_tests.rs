use axum::http::Method;
use oshop_backoffice::routes::{RouteError, RouteTable};
use std::collections::BTreeSet;

#[test]
fn test_resolve_static_routes() {
    let table = RouteTable::default();

    let home = table.resolve(&Method::GET, "/").expect("home resolves");
    assert_eq!(home.name, "main-home");
    assert!(home.params.is_empty());

    assert_eq!(
        table.resolve(&Method::GET, "/category/list").map(|m| m.name),
        Some("category-list")
    );
    assert_eq!(
        table.resolve(&Method::GET, "/category/manage").map(|m| m.name),
        Some("manage-category")
    );
}

#[test]
fn test_resolve_distinguishes_methods() {
    let table = RouteTable::default();

    assert_eq!(
        table.resolve(&Method::GET, "/login").map(|m| m.name),
        Some("user-login")
    );
    assert_eq!(
        table.resolve(&Method::POST, "/login").map(|m| m.name),
        Some("user-login-post")
    );
    // Deletes are POST-only.
    assert!(table.resolve(&Method::GET, "/user/delete/3").is_none());
    assert!(table.resolve(&Method::PUT, "/login").is_none());
}

#[test]
fn test_resolve_extracts_parameters() {
    let table = RouteTable::default();

    let matched = table
        .resolve(&Method::POST, "/category/update/12")
        .expect("update resolves");
    assert_eq!(matched.name, "category-update-post");
    assert_eq!(matched.param("category_id"), Some("12"));
    assert_eq!(matched.param("product_id"), None);
}

#[test]
fn test_resolve_rejects_near_misses() {
    let table = RouteTable::default();

    assert!(table.resolve(&Method::GET, "/category/update").is_none());
    assert!(table.resolve(&Method::GET, "/category/update/").is_none());
    assert!(table.resolve(&Method::GET, "/category/update/1/extra").is_none());
    assert!(table.resolve(&Method::GET, "/category/list/").is_none());
    assert!(table.resolve(&Method::GET, "/nowhere").is_none());
}

#[test]
fn test_generate_url() {
    let table = RouteTable::default();

    assert_eq!(table.generate_url("main-home", &[]), Ok("/".to_string()));
    assert_eq!(table.generate_url("user-login", &[]), Ok("/login".to_string()));
    assert_eq!(
        table.generate_url("brand-update", &[("brand_id", "4"), ("unused", "x")]),
        Ok("/brand/update/4".to_string())
    );
}

#[test]
fn test_generate_url_errors() {
    let table = RouteTable::default();

    assert_eq!(
        table.generate_url("brand-edit", &[]),
        Err(RouteError::UnknownRoute("brand-edit".to_string()))
    );
    assert_eq!(
        table.generate_url("type-delete", &[]),
        Err(RouteError::MissingParameter {
            route: "type-delete".to_string(),
            param: "type_id".to_string(),
        })
    );
}

#[test]
fn test_generated_urls_resolve_back_to_their_route() {
    let table = RouteTable::default();

    for route in table.routes() {
        let url = table
            .generate_url(
                route.name,
                &[
                    ("user_id", "1"),
                    ("category_id", "1"),
                    ("product_id", "1"),
                    ("type_id", "1"),
                    ("brand_id", "1"),
                ],
            )
            .expect("every route generates");
        let method = if route.name.ends_with("-post") || route.name.ends_with("-delete") {
            Method::POST
        } else {
            Method::GET
        };
        assert_eq!(
            table.resolve(&method, &url).map(|m| m.name),
            Some(route.name),
            "url {url}"
        );
    }
}

#[test]
fn test_route_names_are_unique() {
    let table = RouteTable::default();
    let names: BTreeSet<&str> = table.routes().iter().map(|route| route.name).collect();
    assert_eq!(names.len(), table.routes().len());
}
