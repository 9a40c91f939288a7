//! Access introspection routes.
//!
//! The UI renders menus and action controls from these answers instead of
//! carrying its own copy of the permission rules.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use temple_core::access::{
    AccessSummary, PageDecision, Role, RoleLevel, can_manage, is_allowed_by_name,
};

use crate::AppState;
use crate::middleware::auth::{AuthUser, MaybeAuthUser};

/// Creates access routes that require authentication.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/access/me", get(my_access))
        .route("/access/check", get(check_permission))
        .route("/access/roles", get(list_roles))
}

/// Creates access routes that also answer anonymous callers.
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/access/page", get(page_access))
}

/// GET `/access/me` - Permissions of the calling user.
async fn my_access(auth: AuthUser) -> Json<AccessSummary> {
    Json(AccessSummary::for_role(Some(auth.role())))
}

/// Query for a single permission check.
#[derive(Debug, Deserialize)]
pub struct CheckQuery {
    /// Module name, e.g. `income`.
    #[serde(default)]
    pub module: String,
    /// Action name; defaults to `view`.
    #[serde(default = "default_action")]
    pub action: String,
}

fn default_action() -> String {
    "view".to_string()
}

/// Answer to a single permission check.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    /// Module as asked.
    pub module: String,
    /// Action as asked.
    pub action: String,
    /// Whether the caller may perform it.
    pub allowed: bool,
}

/// GET `/access/check?module=&action=` - Single permission check.
///
/// Unknown module or action names are answered `allowed: false`.
async fn check_permission(auth: AuthUser, Query(query): Query<CheckQuery>) -> Json<CheckResponse> {
    let allowed = is_allowed_by_name(Some(auth.role()), &query.module, &query.action);
    Json(CheckResponse {
        module: query.module,
        action: query.action,
        allowed,
    })
}

/// Role listing entry.
#[derive(Debug, Serialize)]
pub struct RoleInfo {
    /// Canonical role name.
    pub name: Role,
    /// Hierarchy level.
    pub level: RoleLevel,
    /// Human readable summary.
    pub description: &'static str,
    /// Whether the caller may grant this role.
    pub assignable: bool,
}

/// GET `/access/roles` - Every role, highest first, with whether the caller
/// may grant it.
async fn list_roles(auth: AuthUser) -> Json<Vec<RoleInfo>> {
    let roles = Role::ALL
        .into_iter()
        .map(|role| RoleInfo {
            name: role,
            level: role.level(),
            description: role.description(),
            assignable: can_manage(Some(auth.role()), Some(role.as_str())),
        })
        .collect();
    Json(roles)
}

/// Query for a page guard evaluation.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// Browser path being navigated to.
    #[serde(default)]
    pub path: String,
}

/// Page guard answer.
#[derive(Debug, Serialize)]
pub struct PageResponse {
    /// The decision.
    #[serde(flatten)]
    pub decision: PageDecision,
    /// Where to send the browser, for redirects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// GET `/access/page?path=` - Page guard evaluation for the caller's
/// session, if any.
async fn page_access(
    State(state): State<AppState>,
    MaybeAuthUser(session): MaybeAuthUser,
    Query(query): Query<PageQuery>,
) -> Json<PageResponse> {
    let decision = state
        .page_guard
        .decide(session.as_ref(), &query.path, Utc::now().timestamp());
    Json(PageResponse {
        location: state.page_guard.location(decision),
        decision,
    })
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::StatusCode};
    use rstest::rstest;
    use temple_shared::Claims;
    use tower::ServiceExt;

    use crate::create_router;
    use crate::test_support::{json_body, request, test_state, token_for};

    #[tokio::test]
    async fn test_me_requires_token() {
        let app = create_router(test_state());

        let response = app
            .oneshot(request("GET", "/api/v1/access/me", None, Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = json_body(response).await;
        assert_eq!(body["error"], "missing_token");
    }

    #[tokio::test]
    async fn test_me_for_legacy_accountant() {
        let state = test_state();
        let token = token_for(&state, "accountant");
        let app = create_router(state);

        let response = app
            .oneshot(request("GET", "/api/v1/access/me", Some(&token), Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["role"], "Accountant");
        assert_eq!(body["level"], 2);
        assert_eq!(
            body["modules"],
            serde_json::json!([
                "dashboard",
                "income",
                "expense",
                "events",
                "address-book",
                "reports"
            ])
        );
        assert_eq!(
            body["assignable_roles"],
            serde_json::json!(["Data Entry", "Viewer"])
        );
    }

    #[tokio::test]
    async fn test_me_for_unknown_role() {
        let state = test_state();
        let token = token_for(&state, "treasurer");
        let app = create_router(state);

        let response = app
            .oneshot(request("GET", "/api/v1/access/me", Some(&token), Body::empty()))
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["role"], "treasurer");
        assert_eq!(body["level"], -1);
        assert_eq!(body["modules"], serde_json::json!([]));
        assert_eq!(body["permissions"], serde_json::json!([]));
    }

    #[rstest]
    #[case("Super Admin", "/api/v1/access/check?module=users&action=manage_roles", true)]
    #[case("Admin", "/api/v1/access/check?module=users&action=manage_roles", false)]
    #[case("Admin", "/api/v1/access/check?module=users", true)]
    #[case("Accountant", "/api/v1/access/check?module=reports&action=financial", true)]
    #[case("Accountant", "/api/v1/access/check?module=income&action=delete", false)]
    #[case("Accountant", "/api/v1/access/check?module=ledger&action=view", false)]
    #[case("Accountant", "/api/v1/access/check", false)]
    #[tokio::test]
    async fn test_check(#[case] role: &str, #[case] uri: &str, #[case] allowed: bool) {
        let state = test_state();
        let token = token_for(&state, role);
        let app = create_router(state);

        let response = app
            .oneshot(request("GET", uri, Some(&token), Body::empty()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["allowed"], allowed, "{role} {uri}");
    }

    #[tokio::test]
    async fn test_roles_marks_assignable() {
        let state = test_state();
        let token = token_for(&state, "Manager");
        let app = create_router(state);

        let response = app
            .oneshot(request("GET", "/api/v1/access/roles", Some(&token), Body::empty()))
            .await
            .unwrap();

        let body = json_body(response).await;
        let roles = body.as_array().unwrap();
        assert_eq!(roles.len(), 6);
        assert_eq!(roles[0]["name"], "Super Admin");
        assert_eq!(roles[0]["level"], 5);
        assert_eq!(roles[0]["assignable"], false);
        assert_eq!(roles[2]["name"], "Manager");
        assert_eq!(roles[2]["assignable"], false);
        assert_eq!(roles[3]["name"], "Accountant");
        assert_eq!(roles[3]["assignable"], true);
    }

    #[tokio::test]
    async fn test_page_without_session_redirects_to_login() {
        let app = create_router(test_state());

        let response = app
            .oneshot(request(
                "GET",
                "/api/v1/access/page?path=/income",
                None,
                Body::empty(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["decision"], "redirect_to_login");
        assert_eq!(body["location"], "/login");
    }

    #[tokio::test]
    async fn test_page_denied_redirects_to_dashboard() {
        let state = test_state();
        let token = token_for(&state, "Data Entry");
        let app = create_router(state);

        let response = app
            .oneshot(request(
                "GET",
                "/api/v1/access/page?path=/reports",
                Some(&token),
                Body::empty(),
            ))
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["decision"], "redirect_to_landing");
        assert_eq!(body["module"], "dashboard");
        assert_eq!(body["location"], "/dashboard");
    }

    #[tokio::test]
    async fn test_page_allowed_has_no_location() {
        let state = test_state();
        let token = token_for(&state, "Viewer");
        let app = create_router(state);

        let response = app
            .oneshot(request(
                "GET",
                "/api/v1/access/page?path=/inventory",
                Some(&token),
                Body::empty(),
            ))
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["decision"], "allow");
        assert!(body.get("location").is_none());
    }

    #[tokio::test]
    async fn test_page_with_expired_token_redirects_to_login() {
        let state = test_state();
        let expired = Claims {
            id: "u".into(),
            role: "Admin".into(),
            email: "a@temple.org".into(),
            exp: chrono::Utc::now().timestamp() - 60,
        };
        let token = state.jwt_service.encode_claims(&expired).unwrap();
        let app = create_router(state);

        let response = app
            .oneshot(request(
                "GET",
                "/api/v1/access/page?path=/dashboard",
                Some(&token),
                Body::empty(),
            ))
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["decision"], "redirect_to_login");
    }
}
