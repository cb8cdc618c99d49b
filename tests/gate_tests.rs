use oshop_backoffice::{
    gate::{
        AccessGate, AccessPolicy, CsrfGate, GateDecision, Gatekeeper, check_token, generate_token,
    },
    routes::RouteTable,
    session::{SessionUser, VisitorSession},
};
use std::collections::{BTreeMap, BTreeSet};

// --- Fixtures ---

const LOGIN_URL: &str = "/login";

fn roles(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn visitor(id: i32, role: &str) -> VisitorSession {
    VisitorSession::authenticated(SessionUser {
        id,
        role: role.to_string(),
        firstname: "Tester".to_string(),
    })
}

fn gatekeeper() -> Gatekeeper {
    Gatekeeper::new(AccessPolicy::default(), LOGIN_URL)
}

// --- Access gate ---

#[test]
fn test_catalog_manager_may_delete_categories() {
    let policy = AccessPolicy::default();
    let gate = AccessGate::new(policy.acl, LOGIN_URL);
    let session = visitor(7, "catalog-manager");

    assert_eq!(
        gate.allowed_roles("category-delete"),
        Some(&roles(&["admin", "catalog-manager"]))
    );
    assert_eq!(gate.check_route("category-delete", &session), GateDecision::Proceed);
}

#[test]
fn test_catalog_manager_may_not_delete_users() {
    let policy = AccessPolicy::default();
    let gate = AccessGate::new(policy.acl, LOGIN_URL);
    let session = visitor(7, "catalog-manager");

    assert_eq!(gate.allowed_roles("user-delete"), Some(&roles(&["admin"])));
    assert_eq!(gate.check_route("user-delete", &session), GateDecision::Forbidden);
}

#[test]
fn test_anonymous_visitor_is_sent_to_login() {
    let policy = AccessPolicy::default();
    let gate = AccessGate::new(policy.acl, LOGIN_URL);

    assert_eq!(
        gate.check_route("category-list", &VisitorSession::default()),
        GateDecision::RedirectTo(LOGIN_URL.to_string())
    );
}

#[test]
fn test_every_protected_route_redirects_anonymous_visitors_and_never_forbids() {
    let policy = AccessPolicy::default();
    let gate = AccessGate::new(policy.acl.clone(), LOGIN_URL);

    for route in policy.acl.keys() {
        assert_eq!(
            gate.check_route(route, &VisitorSession::default()),
            GateDecision::RedirectTo(LOGIN_URL.to_string()),
            "route {route}"
        );
    }
}

#[test]
fn test_role_membership_decides_every_protected_route() {
    let policy = AccessPolicy::default();
    let gate = AccessGate::new(policy.acl.clone(), LOGIN_URL);

    for (route, allowed) in &policy.acl {
        for role in ["admin", "catalog-manager", "visitor"] {
            let expected = if allowed.contains(role) {
                GateDecision::Proceed
            } else {
                GateDecision::Forbidden
            };
            assert_eq!(
                gate.check_route(route, &visitor(1, role)),
                expected,
                "route {route} role {role}"
            );
        }
    }
}

#[test]
fn test_public_routes_are_open_to_everyone() {
    let gate = gatekeeper();
    for route in ["main-home", "user-login", "user-logout"] {
        assert!(gate.access.allowed_roles(route).is_none(), "route {route}");
        assert_eq!(
            gate.access.check_route(route, &VisitorSession::default()),
            GateDecision::Proceed
        );
    }
}

#[test]
fn test_product_list_is_admin_only_but_product_forms_are_not() {
    let gate = gatekeeper();
    let manager = visitor(3, "catalog-manager");

    assert_eq!(
        gate.access.check_route("product-list", &manager),
        GateDecision::Forbidden
    );
    assert_eq!(
        gate.access.check_route("product-add", &manager),
        GateDecision::Proceed
    );
}

#[test]
fn test_role_comparison_is_exact() {
    let gate = AccessGate::new(BTreeMap::new(), LOGIN_URL);
    let allowed = roles(&["admin"]);

    assert_eq!(
        gate.check_authorisation(&allowed, &visitor(1, "Admin")),
        GateDecision::Forbidden
    );
    assert_eq!(
        gate.check_authorisation(&allowed, &visitor(1, "admin")),
        GateDecision::Proceed
    );
}

#[test]
fn test_user_id_without_snapshot_is_forbidden_not_redirected() {
    let gate = AccessGate::new(BTreeMap::new(), LOGIN_URL);
    let session = VisitorSession {
        user_id: Some(4),
        ..Default::default()
    };

    assert_eq!(
        gate.check_authorisation(&roles(&["admin"]), &session),
        GateDecision::Forbidden
    );
}

// --- Token lifecycle ---

#[test]
fn test_generate_token_stores_a_fresh_256_bit_hex_token() {
    let mut session = VisitorSession::default();

    let first = generate_token(&mut session);
    assert_eq!(first.len(), 64);
    assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(session.pending_csrf_token.as_deref(), Some(first.as_str()));

    let second = generate_token(&mut session);
    assert_ne!(first, second);
    assert_eq!(session.pending_csrf_token.as_deref(), Some(second.as_str()));
}

#[test]
fn test_matching_token_is_consumed() {
    let mut session = VisitorSession::default();
    let token = generate_token(&mut session);

    assert_eq!(check_token(Some(&token), &mut session), GateDecision::Proceed);
    assert_eq!(session.pending_csrf_token, None);
    assert_eq!(check_token(Some(&token), &mut session), GateDecision::Forbidden);
}

#[test]
fn test_bad_tokens_are_rejected_and_leave_the_pending_token_alone() {
    let mut session = VisitorSession::default();
    let token = generate_token(&mut session);

    for submitted in [None, Some(""), Some("deadbeef")] {
        assert_eq!(check_token(submitted, &mut session), GateDecision::Forbidden);
        assert_eq!(session.pending_csrf_token.as_deref(), Some(token.as_str()));
    }

    // The legitimate form still goes through afterwards.
    assert_eq!(check_token(Some(&token), &mut session), GateDecision::Proceed);
}

#[test]
fn test_token_without_a_pending_one_is_rejected() {
    let mut session = VisitorSession::default();
    assert_eq!(
        check_token(Some("0123456789abcdef"), &mut session),
        GateDecision::Forbidden
    );
}

#[test]
fn test_unprotected_routes_ignore_tokens() {
    let csrf = CsrfGate::new(roles(&["category-add-post"]));
    let mut session = VisitorSession::default();

    for submitted in [None, Some(""), Some("anything")] {
        assert_eq!(
            csrf.check_token_by_route_name("category-list", submitted, &mut session),
            GateDecision::Proceed
        );
    }
}

// --- Dispatch order ---

#[test]
fn test_issued_token_is_single_use_across_form_submissions() {
    let gate = gatekeeper();
    let mut session = visitor(7, "catalog-manager");

    // GET category-add issues T1.
    assert_eq!(gate.evaluate("category-add", None, &mut session), GateDecision::Proceed);
    let t1 = generate_token(&mut session);

    assert_eq!(
        gate.evaluate("category-add-post", Some(&t1), &mut session),
        GateDecision::Proceed
    );
    assert_eq!(session.pending_csrf_token, None);

    assert_eq!(
        gate.evaluate("category-add-post", Some(&t1), &mut session),
        GateDecision::Forbidden
    );
}

#[test]
fn test_anonymous_forged_post_is_redirected_before_token_check() {
    let gate = gatekeeper();
    let mut session = VisitorSession::default();
    let token = generate_token(&mut session);

    assert_eq!(
        gate.evaluate("category-delete", Some("forged"), &mut session),
        GateDecision::RedirectTo(LOGIN_URL.to_string())
    );
    // The token was not examined, let alone consumed.
    assert_eq!(session.pending_csrf_token.as_deref(), Some(token.as_str()));
}

#[test]
fn test_wrong_role_is_forbidden_before_token_consumption() {
    let gate = gatekeeper();
    let mut session = visitor(7, "catalog-manager");
    let token = generate_token(&mut session);

    assert_eq!(
        gate.evaluate("user-delete", Some(&token), &mut session),
        GateDecision::Forbidden
    );
    assert_eq!(session.pending_csrf_token.as_deref(), Some(token.as_str()));
}

#[test]
fn test_admission_is_decided_without_a_token() {
    let gate = gatekeeper();
    let anonymous = VisitorSession::default();
    let manager = visitor(7, "catalog-manager");

    assert_eq!(
        gate.admit("category-add-post", &anonymous),
        GateDecision::RedirectTo(LOGIN_URL.to_string())
    );
    assert_eq!(gate.admit("user-add-post", &manager), GateDecision::Forbidden);
    assert_eq!(gate.admit("category-add-post", &manager), GateDecision::Proceed);

    let mut manager = manager;
    assert_eq!(
        gate.verify_token("category-add-post", None, &mut manager),
        GateDecision::Forbidden
    );
}

#[test]
fn test_login_post_needs_a_token_but_no_login() {
    let gate = gatekeeper();
    let mut session = VisitorSession::default();

    assert!(gate.requires_token("user-login-post"));
    assert_eq!(
        gate.evaluate("user-login-post", None, &mut session),
        GateDecision::Forbidden
    );

    let token = generate_token(&mut session);
    assert_eq!(
        gate.evaluate("user-login-post", Some(&token), &mut session),
        GateDecision::Proceed
    );
}

// --- Policy data ---

#[test]
fn test_default_policy_protects_every_post_and_delete_route() {
    let policy = AccessPolicy::default();
    let table = RouteTable::default();

    for route in table.routes() {
        let state_changing = route.name.ends_with("-post") || route.name.ends_with("-delete");
        assert_eq!(
            policy.csrf_protected.contains(route.name),
            state_changing,
            "route {}",
            route.name
        );
    }
}

#[test]
fn test_default_policy_only_names_known_routes() {
    assert!(AccessPolicy::default()
        .unknown_routes(&RouteTable::default())
        .is_empty());
}

#[test]
fn test_policy_from_json_reports_typos() {
    let policy = AccessPolicy::from_json(
        r#"{
            "acl": { "category-list": ["admin"], "categroy-add": ["admin"] },
            "csrf_protected": ["category-add-post"]
        }"#,
    )
    .expect("policy parses");

    assert_eq!(policy.login_route, "user-login");
    assert_eq!(
        policy.unknown_routes(&RouteTable::default()),
        vec!["categroy-add".to_string()]
    );

    let gate = Gatekeeper::new(policy, LOGIN_URL);
    // Not listed in this policy, so public.
    assert_eq!(
        gate.evaluate("user-list", None, &mut VisitorSession::default()),
        GateDecision::Proceed
    );
}
