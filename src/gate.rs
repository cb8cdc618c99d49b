//! Access Gate, CSRF Gate and the CSRF token lifecycle.
//!
//! Both gates are pure decision functions over a route name and a `VisitorSession`.
//! They never write a response themselves: the dispatch middleware turns the returned
//! `GateDecision` into a redirect or a rendered 403.

use std::collections::{BTreeMap, BTreeSet};

use rand::{RngCore, rngs::OsRng};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::{auth::roles, routes::RouteTable, session::VisitorSession};

/// Name of the hidden form field carrying the CSRF token.
pub const CSRF_FIELD: &str = "tokenCSRF";

/// Route name visitors are sent to when a protected route needs a login.
pub const LOGIN_ROUTE: &str = "user-login";

/// GateDecision
///
/// Outcome of a gate. `RedirectTo` and `Forbidden` terminate the request before any
/// controller code runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    RedirectTo(String),
    Forbidden,
}

/// AccessPolicy
///
/// Configuration data for both gates: which roles reach which named route, and which
/// routes require a token round-trip. A route absent from `acl` is public.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessPolicy {
    pub acl: BTreeMap<String, BTreeSet<String>>,
    pub csrf_protected: BTreeSet<String>,
    #[serde(default = "default_login_route")]
    pub login_route: String,
}

fn default_login_route() -> String {
    LOGIN_ROUTE.to_string()
}

impl Default for AccessPolicy {
    /// The built-in back-office policy.
    fn default() -> Self {
        let admin_only = [roles::ADMIN];
        let catalog = [roles::ADMIN, roles::CATALOG_MANAGER];

        let mut acl = BTreeMap::new();
        grant(&mut acl, crud_routes("user"), &admin_only);
        for entity in ["category", "type", "brand"] {
            grant(&mut acl, crud_routes(entity), &catalog);
        }
        grant(&mut acl, ["manage-category", "manage-category-post"], &catalog);
        grant(&mut acl, ["product-list"], &admin_only);
        grant(
            &mut acl,
            crud_routes("product")
                .into_iter()
                .filter(|route| route != "product-list"),
            &catalog,
        );

        let mut csrf_protected: BTreeSet<String> = ["user-login-post", "manage-category-post"]
            .into_iter()
            .map(String::from)
            .collect();
        for entity in ["user", "category", "product", "type", "brand"] {
            for action in ["add-post", "update-post", "delete"] {
                csrf_protected.insert(format!("{entity}-{action}"));
            }
        }

        Self {
            acl,
            csrf_protected,
            login_route: default_login_route(),
        }
    }
}

impl AccessPolicy {
    /// Parses a policy document, e.g. the file named by `ACCESS_POLICY_PATH`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Route names referenced by the policy that `routes` does not know about. Such a
    /// typo leaves a page unprotected, so startup logs them.
    pub fn unknown_routes(&self, routes: &RouteTable) -> Vec<String> {
        self.acl
            .keys()
            .chain(self.csrf_protected.iter())
            .chain(std::iter::once(&self.login_route))
            .filter(|name| routes.path(name).is_none())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

fn grant<I, S>(acl: &mut BTreeMap<String, BTreeSet<String>>, routes: I, allowed: &[&str])
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    for route in routes {
        acl.insert(
            route.into(),
            allowed.iter().map(|role| role.to_string()).collect(),
        );
    }
}

fn crud_routes(entity: &str) -> Vec<String> {
    ["list", "add", "add-post", "update", "update-post", "delete"]
        .iter()
        .map(|action| format!("{entity}-{action}"))
        .collect()
}

/// AccessGate
///
/// Role-based access control keyed by route name.
#[derive(Debug, Clone)]
pub struct AccessGate {
    acl: BTreeMap<String, BTreeSet<String>>,
    login_url: String,
}

impl AccessGate {
    /// `login_url` is the already generated URL of the login route.
    pub fn new(acl: BTreeMap<String, BTreeSet<String>>, login_url: impl Into<String>) -> Self {
        Self {
            acl,
            login_url: login_url.into(),
        }
    }

    /// Roles allowed on `route`, or `None` for a public route.
    pub fn allowed_roles(&self, route: &str) -> Option<&BTreeSet<String>> {
        self.acl.get(route)
    }

    /// Looks the route up and, when it is listed, checks the visitor against its roles.
    pub fn check_route(&self, route: &str, session: &VisitorSession) -> GateDecision {
        match self.allowed_roles(route) {
            Some(allowed) => {
                let decision = self.check_authorisation(allowed, session);
                match &decision {
                    GateDecision::RedirectTo(_) => {
                        tracing::info!(route, "anonymous visitor sent to login");
                    }
                    GateDecision::Forbidden => {
                        tracing::warn!(
                            route,
                            role = session.role().unwrap_or_default(),
                            "role not permitted on route"
                        );
                    }
                    GateDecision::Proceed => {}
                }
                decision
            }
            None => GateDecision::Proceed,
        }
    }

    /// Anonymous visitors are redirected to login. Authenticated visitors proceed only
    /// when their session role is one of `allowed_roles` (exact string match).
    pub fn check_authorisation(
        &self,
        allowed_roles: &BTreeSet<String>,
        session: &VisitorSession,
    ) -> GateDecision {
        if !session.is_authenticated() {
            return GateDecision::RedirectTo(self.login_url.clone());
        }

        match session.role() {
            Some(role) if allowed_roles.contains(role) => GateDecision::Proceed,
            _ => GateDecision::Forbidden,
        }
    }
}

/// CsrfGate
///
/// Single-use token validation for the configured set of state-changing routes.
#[derive(Debug, Clone)]
pub struct CsrfGate {
    protected: BTreeSet<String>,
}

impl CsrfGate {
    pub fn new(protected: BTreeSet<String>) -> Self {
        Self { protected }
    }

    pub fn protects(&self, route: &str) -> bool {
        self.protected.contains(route)
    }

    /// Routes outside the protected set proceed untouched, whatever was submitted.
    pub fn check_token_by_route_name(
        &self,
        route: &str,
        submitted: Option<&str>,
        session: &mut VisitorSession,
    ) -> GateDecision {
        if !self.protects(route) {
            return GateDecision::Proceed;
        }
        let decision = check_token(submitted, session);
        if decision == GateDecision::Forbidden {
            tracing::warn!(route, "csrf token missing or mismatched");
        }
        decision
    }
}

/// Compares a submitted token with the pending one.
///
/// A match consumes the pending token. A failed comparison leaves it in place, so the
/// legitimate form can still be submitted afterwards.
pub fn check_token(submitted: Option<&str>, session: &mut VisitorSession) -> GateDecision {
    let submitted = match submitted {
        Some(token) if !token.is_empty() => token,
        _ => return GateDecision::Forbidden,
    };
    let Some(pending) = session.pending_csrf_token.as_deref() else {
        return GateDecision::Forbidden;
    };

    if bool::from(submitted.as_bytes().ct_eq(pending.as_bytes())) {
        session.pending_csrf_token = None;
        GateDecision::Proceed
    } else {
        GateDecision::Forbidden
    }
}

/// Issues a fresh 256-bit token, replacing any pending one, and returns it for
/// embedding in the `tokenCSRF` hidden field.
pub fn generate_token(session: &mut VisitorSession) -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    let token = hex::encode(bytes);
    session.pending_csrf_token = Some(token.clone());
    token
}

/// Gatekeeper
///
/// Both gates in dispatch order: authorisation first, so an anonymous forged POST is
/// answered with a login redirect before anything is revealed about token state.
#[derive(Debug, Clone)]
pub struct Gatekeeper {
    pub access: AccessGate,
    pub csrf: CsrfGate,
}

impl Gatekeeper {
    pub fn new(policy: AccessPolicy, login_url: impl Into<String>) -> Self {
        Self {
            access: AccessGate::new(policy.acl, login_url),
            csrf: CsrfGate::new(policy.csrf_protected),
        }
    }

    pub fn requires_token(&self, route: &str) -> bool {
        self.csrf.protects(route)
    }

    /// Access step on its own. Needs nothing from the request body.
    pub fn admit(&self, route: &str, session: &VisitorSession) -> GateDecision {
        self.access.check_route(route, session)
    }

    /// Token step, only meaningful once `admit` returned `Proceed`.
    pub fn verify_token(
        &self,
        route: &str,
        submitted_token: Option<&str>,
        session: &mut VisitorSession,
    ) -> GateDecision {
        self.csrf
            .check_token_by_route_name(route, submitted_token, session)
    }

    /// Both steps in order: access first, then the token.
    pub fn evaluate(
        &self,
        route: &str,
        submitted_token: Option<&str>,
        session: &mut VisitorSession,
    ) -> GateDecision {
        match self.admit(route, session) {
            GateDecision::Proceed => self.verify_token(route, submitted_token, session),
            terminal => terminal,
        }
    }
}
