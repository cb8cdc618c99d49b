/// Router Module Index
///
/// The named route table (the Route Resolver) plus the axum routers that bind each
/// path to its controller. Access control is NOT applied per router: every request
/// goes through the dispatch gate, which looks the route up by name in this table.
use axum::http::Method;
use thiserror::Error;

/// Home, login and logout.
pub mod public;

/// Categories, products, types, brands and the home-page category picker.
pub mod catalog;

/// User account management.
pub mod admin;

/// Path templates, shared by the named route table and the axum routers so the two
/// can never disagree. `{param}` segments match any single path segment.
pub mod paths {
    pub const HOME: &str = "/";
    pub const LOGIN: &str = "/login";
    pub const LOGOUT: &str = "/logout";

    pub const USER_LIST: &str = "/user/list";
    pub const USER_ADD: &str = "/user/add";
    pub const USER_UPDATE: &str = "/user/update/{user_id}";
    pub const USER_DELETE: &str = "/user/delete/{user_id}";

    pub const CATEGORY_LIST: &str = "/category/list";
    pub const CATEGORY_ADD: &str = "/category/add";
    pub const CATEGORY_UPDATE: &str = "/category/update/{category_id}";
    pub const CATEGORY_DELETE: &str = "/category/delete/{category_id}";
    pub const CATEGORY_MANAGE: &str = "/category/manage";

    pub const PRODUCT_LIST: &str = "/product/list";
    pub const PRODUCT_ADD: &str = "/product/add";
    pub const PRODUCT_UPDATE: &str = "/product/update/{product_id}";
    pub const PRODUCT_DELETE: &str = "/product/delete/{product_id}";

    pub const TYPE_LIST: &str = "/type/list";
    pub const TYPE_ADD: &str = "/type/add";
    pub const TYPE_UPDATE: &str = "/type/update/{type_id}";
    pub const TYPE_DELETE: &str = "/type/delete/{type_id}";

    pub const BRAND_LIST: &str = "/brand/list";
    pub const BRAND_ADD: &str = "/brand/add";
    pub const BRAND_UPDATE: &str = "/brand/update/{brand_id}";
    pub const BRAND_DELETE: &str = "/brand/delete/{brand_id}";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMethod {
    Get,
    Post,
}

impl RouteMethod {
    pub fn matches(self, method: &Method) -> bool {
        match self {
            RouteMethod::Get => method == Method::GET || method == Method::HEAD,
            RouteMethod::Post => method == Method::POST,
        }
    }
}

/// NamedRoute
///
/// One entry of the route table. Names are what the access policy and templates refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedRoute {
    pub name: &'static str,
    pub method: RouteMethod,
    pub path: &'static str,
}

const fn get(name: &'static str, path: &'static str) -> NamedRoute {
    NamedRoute {
        name,
        method: RouteMethod::Get,
        path,
    }
}

const fn post(name: &'static str, path: &'static str) -> NamedRoute {
    NamedRoute {
        name,
        method: RouteMethod::Post,
        path,
    }
}

/// Every route the back-office serves. POST routes that receive a form are named
/// after the GET route rendering it, suffixed with `-post`.
pub static NAMED_ROUTES: &[NamedRoute] = &[
    get("main-home", paths::HOME),
    get("user-login", paths::LOGIN),
    post("user-login-post", paths::LOGIN),
    get("user-logout", paths::LOGOUT),
    get("user-list", paths::USER_LIST),
    get("user-add", paths::USER_ADD),
    post("user-add-post", paths::USER_ADD),
    get("user-update", paths::USER_UPDATE),
    post("user-update-post", paths::USER_UPDATE),
    post("user-delete", paths::USER_DELETE),
    get("category-list", paths::CATEGORY_LIST),
    get("category-add", paths::CATEGORY_ADD),
    post("category-add-post", paths::CATEGORY_ADD),
    get("category-update", paths::CATEGORY_UPDATE),
    post("category-update-post", paths::CATEGORY_UPDATE),
    post("category-delete", paths::CATEGORY_DELETE),
    get("manage-category", paths::CATEGORY_MANAGE),
    post("manage-category-post", paths::CATEGORY_MANAGE),
    get("product-list", paths::PRODUCT_LIST),
    get("product-add", paths::PRODUCT_ADD),
    post("product-add-post", paths::PRODUCT_ADD),
    get("product-update", paths::PRODUCT_UPDATE),
    post("product-update-post", paths::PRODUCT_UPDATE),
    post("product-delete", paths::PRODUCT_DELETE),
    get("type-list", paths::TYPE_LIST),
    get("type-add", paths::TYPE_ADD),
    post("type-add-post", paths::TYPE_ADD),
    get("type-update", paths::TYPE_UPDATE),
    post("type-update-post", paths::TYPE_UPDATE),
    post("type-delete", paths::TYPE_DELETE),
    get("brand-list", paths::BRAND_LIST),
    get("brand-add", paths::BRAND_ADD),
    post("brand-add-post", paths::BRAND_ADD),
    get("brand-update", paths::BRAND_UPDATE),
    post("brand-update-post", paths::BRAND_UPDATE),
    post("brand-delete", paths::BRAND_DELETE),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("no route named `{0}`")]
    UnknownRoute(String),
    #[error("route `{route}` needs a value for `{param}`")]
    MissingParameter { route: String, param: String },
}

/// RouteMatch
///
/// Result of resolving a request: the route name and the extracted path parameters
/// in template order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub name: &'static str,
    pub params: Vec<(String, String)>,
}

impl RouteMatch {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

/// RouteTable
///
/// Resolves `(method, path)` to a route name and generates URLs from a name.
#[derive(Debug, Clone, Copy)]
pub struct RouteTable {
    routes: &'static [NamedRoute],
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            routes: NAMED_ROUTES,
        }
    }
}

impl RouteTable {
    pub fn new(routes: &'static [NamedRoute]) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &'static [NamedRoute] {
        self.routes
    }

    /// Path template of a named route.
    pub fn path(&self, name: &str) -> Option<&'static str> {
        self.routes
            .iter()
            .find(|route| route.name == name)
            .map(|route| route.path)
    }

    /// First route whose method and template match. Query strings must already be
    /// stripped from `path`.
    pub fn resolve(&self, method: &Method, path: &str) -> Option<RouteMatch> {
        self.routes
            .iter()
            .filter(|route| route.method.matches(method))
            .find_map(|route| {
                match_template(route.path, path).map(|params| RouteMatch {
                    name: route.name,
                    params,
                })
            })
    }

    /// Builds the URL of `name`, filling every `{param}` segment from `params`.
    /// Unused parameters are ignored.
    pub fn generate_url(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouteError> {
        let template = self
            .path(name)
            .ok_or_else(|| RouteError::UnknownRoute(name.to_string()))?;

        let mut segments = Vec::new();
        for segment in segments_of(template) {
            match placeholder(segment) {
                Some(key) => {
                    let value = params
                        .iter()
                        .find(|(param, _)| *param == key)
                        .map(|(_, value)| *value)
                        .ok_or_else(|| RouteError::MissingParameter {
                            route: name.to_string(),
                            param: key.to_string(),
                        })?;
                    segments.push(value);
                }
                None => segments.push(segment),
            }
        }
        Ok(format!("/{}", segments.join("/")))
    }
}

fn segments_of(path: &str) -> std::str::Split<'_, char> {
    path.strip_prefix('/').unwrap_or(path).split('/')
}

fn placeholder(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}

fn match_template(template: &str, path: &str) -> Option<Vec<(String, String)>> {
    let mut expected = segments_of(template);
    let mut actual = segments_of(path);
    let mut params = Vec::new();

    loop {
        match (expected.next(), actual.next()) {
            (None, None) => return Some(params),
            (Some(want), Some(got)) => match placeholder(want) {
                Some(key) if !got.is_empty() => params.push((key.to_string(), got.to_string())),
                Some(_) => return None,
                None if want == got => {}
                None => return None,
            },
            _ => return None,
        }
    }
}
