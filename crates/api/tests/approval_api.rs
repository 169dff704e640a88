//! HTTP-level integration tests for the registration + approval workflow:
//! the PendingApproval -> Approved transition, the privilege table, and
//! the user invariant.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_approved_user, create_pending_user, get_auth, login_token, post_json,
    post_json_auth, TEST_PASSWORD,
};
use sqlx::PgPool;

use campus_core::roles::Role;
use campus_db::repositories::UserRepo;

/// The full workflow from the spec scenario: register a teacher, approve
/// as Admin, log in, reach a role-gated resource.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_approve_login_flow(pool: PgPool) {
    create_approved_user(&pool, "admin@test.com", Role::Admin).await;
    let app = common::build_test_app(pool.clone());

    // 1. Public registration.
    let body = serde_json::json!({
        "name": "A",
        "email": "a@x.com",
        "password": "p-longenough",
        "pending_role": "Teacher",
        "department": "CS",
    });
    let response = post_json(app.clone(), "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["approved"], false);
    assert!(created["role"].is_null(), "role must be null until approval");
    assert_eq!(created["pending_role"], "Teacher");
    let new_id = created["id"].as_i64().unwrap();

    // The stored row satisfies the invariant too.
    let row = UserRepo::find_by_id(&pool, new_id).await.unwrap().unwrap();
    assert!(!row.approved);
    assert!(row.role.is_none());

    // 2. Approval by an Admin.
    let admin_token = login_token(app.clone(), "admin@test.com").await;
    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/users/{new_id}/approve"),
        &admin_token,
        serde_json::json!({ "role": "Teacher" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let approved = body_json(response).await;
    assert_eq!(approved["approved"], true);
    assert_eq!(approved["role"], "Teacher");
    // pending_role survives for history.
    assert_eq!(approved["pending_role"], "Teacher");

    // 3. The newly approved teacher can log in and reach a teacher-gated
    // resource (their own salary list).
    let body = serde_json::json!({ "email": "a@x.com", "password": "p-longenough" });
    let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let login = body_json(response).await;
    assert_eq!(login["user"]["role"], "Teacher");
    let token = login["access_token"].as_str().unwrap();

    let response = get_auth(app, &format!("/api/v1/salaries/teacher/{new_id}"), token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Registering a student without a roll number fails validation and
/// leaves no row behind.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_student_without_roll_no(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({
        "name": "S",
        "email": "s@x.com",
        "password": "p-longenough",
        "pending_role": "Student",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    assert!(
        UserRepo::find_by_email(&pool, "s@x.com").await.unwrap().is_none(),
        "failed registration must not create a row"
    );
}

/// Admin and SuperAdmin roles cannot be self-requested.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_admin_role_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    for role in ["Admin", "SuperAdmin"] {
        let body = serde_json::json!({
            "name": "X",
            "email": format!("{}@x.com", role.to_lowercase()),
            "password": "p-longenough",
            "pending_role": role,
        });
        let response = post_json(app.clone(), "/api/v1/auth/register", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{role}");
    }
}

/// A duplicate email registers as a 409 conflict.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_duplicate_email(pool: PgPool) {
    create_approved_user(&pool, "taken@test.com", Role::Student).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "name": "T",
        "email": "taken@test.com",
        "password": "p-longenough",
        "pending_role": "Student",
        "roll_no": "R-1",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

/// Admin may assign Student/Teacher but not Admin/SuperAdmin; the refused
/// attempt leaves the registration pending.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_cannot_assign_admin_roles(pool: PgPool) {
    create_approved_user(&pool, "admin@test.com", Role::Admin).await;
    let pending = create_pending_user(&pool, "hopeful@test.com", Role::Teacher).await;
    let app = common::build_test_app(pool.clone());

    let admin_token = login_token(app.clone(), "admin@test.com").await;

    for role in ["Admin", "SuperAdmin"] {
        let response = post_json_auth(
            app.clone(),
            &format!("/api/v1/users/{}/approve", pending.id),
            &admin_token,
            serde_json::json!({ "role": role }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{role}");
        assert_eq!(body_json(response).await["code"], "FORBIDDEN");
    }

    let row = UserRepo::find_by_id(&pool, pending.id).await.unwrap().unwrap();
    assert!(!row.approved, "refused approval must not mutate the target");

    // SuperAdmin can make the same assignment.
    create_approved_user(&pool, "root@test.com", Role::SuperAdmin).await;
    let root_token = login_token(app.clone(), "root@test.com").await;
    let response = post_json_auth(
        app,
        &format!("/api/v1/users/{}/approve", pending.id),
        &root_token,
        serde_json::json!({ "role": "Admin" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Approving twice fails with 404: there is no Approved -> PendingApproval
/// transition, and re-approval does not exist.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_approve_twice_is_not_found(pool: PgPool) {
    create_approved_user(&pool, "admin@test.com", Role::Admin).await;
    let pending = create_pending_user(&pool, "once@test.com", Role::Student).await;
    let app = common::build_test_app(pool);

    let admin_token = login_token(app.clone(), "admin@test.com").await;
    let path = format!("/api/v1/users/{}/approve", pending.id);
    let body = serde_json::json!({ "role": "Student" });

    let response = post_json_auth(app.clone(), &path, &admin_token, body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json_auth(app, &path, &admin_token, body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Approving a nonexistent user fails with 404.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_approve_missing_user(pool: PgPool) {
    create_approved_user(&pool, "admin@test.com", Role::Admin).await;
    let app = common::build_test_app(pool);

    let admin_token = login_token(app.clone(), "admin@test.com").await;
    let response = post_json_auth(
        app,
        "/api/v1/users/999999/approve",
        &admin_token,
        serde_json::json!({ "role": "Student" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Students and teachers cannot reach the approval endpoint at all.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_admin_cannot_approve(pool: PgPool) {
    create_approved_user(&pool, "teacher@test.com", Role::Teacher).await;
    let pending = create_pending_user(&pool, "waiting@test.com", Role::Student).await;
    let app = common::build_test_app(pool);

    let token = login_token(app.clone(), "teacher@test.com").await;
    let response = post_json_auth(
        app,
        &format!("/api/v1/users/{}/approve", pending.id),
        &token,
        serde_json::json!({ "role": "Student" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// An unapproved account holding valid credentials still cannot reach any
/// protected resource, because it never receives a token.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pending_user_locked_out(pool: PgPool) {
    create_pending_user(&pool, "limbo@test.com", Role::Student).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "limbo@test.com", "password": TEST_PASSWORD });
    let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // No token was issued, so even the cheapest authenticated endpoint is
    // out of reach.
    let response = common::get(app, "/api/v1/materials").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
