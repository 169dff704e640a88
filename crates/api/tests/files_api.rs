//! HTTP-level integration tests for document upload/download through the
//! multipart resource handlers and the `/files` endpoint.

mod common;

use axum::http::StatusCode;
use common::{
    body_bytes, body_json, create_approved_user, get_auth, login_token, post_multipart_auth, Part,
};
use sqlx::PgPool;

use campus_core::roles::Role;

/// Publishing a study material with a document stores the file and the
/// reference round-trips through `/files/{name}`.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_material_upload_download_round_trip(pool: PgPool) {
    create_approved_user(&pool, "teacher@test.com", Role::Teacher).await;
    let app = common::build_test_app(pool);

    let token = login_token(app.clone(), "teacher@test.com").await;
    let response = post_multipart_auth(
        app.clone(),
        "/api/v1/materials",
        &token,
        &[
            Part::Text("title", "Week 3 notes"),
            Part::Text("description", "Thermodynamics"),
            Part::File("file", "notes week3.pdf", b"%PDF-1.4 lecture notes"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let file_name = json["data"]["file_name"].as_str().expect("stored reference");
    assert!(file_name.ends_with("notes_week3.pdf"));

    let response = get_auth(app, &format!("/api/v1/files/{file_name}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"%PDF-1.4 lecture notes");
}

/// A material without a title is rejected.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_material_requires_title(pool: PgPool) {
    create_approved_user(&pool, "teacher@test.com", Role::Teacher).await;
    let app = common::build_test_app(pool);

    let token = login_token(app.clone(), "teacher@test.com").await;
    let response = post_multipart_auth(
        app,
        "/api/v1/materials",
        &token,
        &[Part::Text("description", "no title")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Students cannot publish materials.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_material_publish_is_staff_only(pool: PgPool) {
    create_approved_user(&pool, "student@test.com", Role::Student).await;
    let app = common::build_test_app(pool);

    let token = login_token(app.clone(), "student@test.com").await;
    let response = post_multipart_auth(
        app,
        "/api/v1/materials",
        &token,
        &[Part::Text("title", "Nope")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// A fee created with a challan upload carries the stored reference, and
/// the owning student can download it.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_fee_challan_upload(pool: PgPool) {
    create_approved_user(&pool, "admin@test.com", Role::Admin).await;
    let student = create_approved_user(&pool, "s1@test.com", Role::Student).await;
    let app = common::build_test_app(pool);

    let admin_token = login_token(app.clone(), "admin@test.com").await;
    let student_id = student.id.to_string();
    let response = post_multipart_auth(
        app.clone(),
        "/api/v1/fees",
        &admin_token,
        &[
            Part::Text("student_id", &student_id),
            Part::Text("amount", "2500"),
            Part::Text("due_date", "2026-09-01"),
            Part::Text("status", "Pending"),
            Part::File("file", "challan.pdf", b"challan bytes"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["student_id"], student.id);
    let challan = json["data"]["challan_file"].as_str().expect("challan reference");

    let student_token = login_token(app.clone(), "s1@test.com").await;
    let response = get_auth(app, &format!("/api/v1/files/{challan}"), &student_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"challan bytes");
}

/// Fees cannot be charged to teachers.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_fee_rejects_non_student_target(pool: PgPool) {
    create_approved_user(&pool, "admin@test.com", Role::Admin).await;
    let teacher = create_approved_user(&pool, "t1@test.com", Role::Teacher).await;
    let app = common::build_test_app(pool);

    let admin_token = login_token(app.clone(), "admin@test.com").await;
    let teacher_id = teacher.id.to_string();
    let response = post_multipart_auth(
        app,
        "/api/v1/fees",
        &admin_token,
        &[
            Part::Text("student_id", &teacher_id),
            Part::Text("amount", "2500"),
            Part::Text("due_date", "2026-09-01"),
        ],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Unknown document references return 404; downloads require auth.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_file_download_errors(pool: PgPool) {
    create_approved_user(&pool, "student@test.com", Role::Student).await;
    let app = common::build_test_app(pool);

    let response = common::get(app.clone(), "/api/v1/files/anything.pdf").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let token = login_token(app.clone(), "student@test.com").await;
    let response = get_auth(app, "/api/v1/files/missing.pdf", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
