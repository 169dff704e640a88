//! HTTP-level integration tests for the domain collections: attendance,
//! marks, fees, and salaries, with their per-role scoping rules.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_approved_user, delete_auth, get_auth, login_token, post_json_auth,
    put_json_auth,
};
use sqlx::PgPool;

use campus_core::roles::Role;

// ---------------------------------------------------------------------------
// Attendance
// ---------------------------------------------------------------------------

/// Admin records attendance; each person sees only their own rows while
/// the admin sees everything.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_attendance_scoping(pool: PgPool) {
    create_approved_user(&pool, "admin@test.com", Role::Admin).await;
    let student = create_approved_user(&pool, "s1@test.com", Role::Student).await;
    let teacher = create_approved_user(&pool, "t1@test.com", Role::Teacher).await;
    let app = common::build_test_app(pool);

    let admin_token = login_token(app.clone(), "admin@test.com").await;
    for (user_id, user_type) in [(student.id, "Student"), (teacher.id, "Teacher")] {
        let response = post_json_auth(
            app.clone(),
            "/api/v1/attendance",
            &admin_token,
            serde_json::json!({
                "user_id": user_id,
                "user_type": user_type,
                "date": "2026-08-03",
                "status": "Present",
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get_auth(app.clone(), "/api/v1/attendance", &admin_token).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);

    let student_token = login_token(app.clone(), "s1@test.com").await;
    let response = get_auth(app.clone(), "/api/v1/attendance", &student_token).await;
    let json = body_json(response).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["user_id"], student.id);

    // Students cannot record attendance.
    let response = post_json_auth(
        app,
        "/api/v1/attendance",
        &student_token,
        serde_json::json!({
            "user_id": student.id,
            "user_type": "Student",
            "date": "2026-08-04",
            "status": "Present",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// A bogus status string is rejected before it reaches the database.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_attendance_invalid_status(pool: PgPool) {
    create_approved_user(&pool, "admin@test.com", Role::Admin).await;
    let student = create_approved_user(&pool, "s1@test.com", Role::Student).await;
    let app = common::build_test_app(pool);

    let admin_token = login_token(app.clone(), "admin@test.com").await;
    let response = post_json_auth(
        app,
        "/api/v1/attendance",
        &admin_token,
        serde_json::json!({
            "user_id": student.id,
            "user_type": "Student",
            "date": "2026-08-03",
            "status": "Late",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Recording the same person twice on one day violates the uniqueness
/// rule and maps to 409.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_attendance_duplicate_day_conflicts(pool: PgPool) {
    create_approved_user(&pool, "admin@test.com", Role::Admin).await;
    let student = create_approved_user(&pool, "s1@test.com", Role::Student).await;
    let app = common::build_test_app(pool);

    let admin_token = login_token(app.clone(), "admin@test.com").await;
    let body = serde_json::json!({
        "user_id": student.id,
        "user_type": "Student",
        "date": "2026-08-03",
        "status": "Present",
    });

    let response = post_json_auth(app.clone(), "/api/v1/attendance", &admin_token, body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(app, "/api/v1/attendance", &admin_token, body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Marks
// ---------------------------------------------------------------------------

/// Teachers enter marks; students see only their own rows; marks above
/// the total are rejected.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_marks_entry_and_scoping(pool: PgPool) {
    create_approved_user(&pool, "teacher@test.com", Role::Teacher).await;
    let s1 = create_approved_user(&pool, "s1@test.com", Role::Student).await;
    let s2 = create_approved_user(&pool, "s2@test.com", Role::Student).await;
    let teacher2 = create_approved_user(&pool, "t2@test.com", Role::Teacher).await;
    let app = common::build_test_app(pool);

    let teacher_token = login_token(app.clone(), "teacher@test.com").await;
    for (student_id, marks) in [(s1.id, 40), (s2.id, 35)] {
        let response = post_json_auth(
            app.clone(),
            "/api/v1/marks",
            &teacher_token,
            serde_json::json!({
                "student_id": student_id,
                "subject": "Physics",
                "test_no": 1,
                "marks": marks,
                "total_marks": 50,
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // Out-of-range marks are rejected.
    let response = post_json_auth(
        app.clone(),
        "/api/v1/marks",
        &teacher_token,
        serde_json::json!({
            "student_id": s1.id,
            "subject": "Physics",
            "test_no": 2,
            "marks": 60,
            "total_marks": 50,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Marks cannot be recorded against a teacher.
    let response = post_json_auth(
        app.clone(),
        "/api/v1/marks",
        &teacher_token,
        serde_json::json!({
            "student_id": teacher2.id,
            "subject": "Physics",
            "test_no": 1,
            "marks": 10,
            "total_marks": 50,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Teacher sees both rows, the student only their own.
    let response = get_auth(app.clone(), "/api/v1/marks", &teacher_token).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);

    let student_token = login_token(app.clone(), "s1@test.com").await;
    let response = get_auth(app, "/api/v1/marks", &student_token).await;
    let json = body_json(response).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["student_id"], s1.id);
}

/// A partial update cannot push marks past the (unchanged) total.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_marks_partial_update_validation(pool: PgPool) {
    create_approved_user(&pool, "teacher@test.com", Role::Teacher).await;
    let student = create_approved_user(&pool, "s1@test.com", Role::Student).await;
    let app = common::build_test_app(pool);

    let teacher_token = login_token(app.clone(), "teacher@test.com").await;
    let response = post_json_auth(
        app.clone(),
        "/api/v1/marks",
        &teacher_token,
        serde_json::json!({
            "student_id": student.id,
            "subject": "Chemistry",
            "test_no": 1,
            "marks": 30,
            "total_marks": 50,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let mark_id = created["data"]["id"].as_i64().unwrap();

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/marks/{mark_id}"),
        &teacher_token,
        serde_json::json!({ "marks": 55 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        app,
        &format!("/api/v1/marks/{mark_id}"),
        &teacher_token,
        serde_json::json!({ "marks": 45 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["marks"], 45);
}

// ---------------------------------------------------------------------------
// Fees & salaries
// ---------------------------------------------------------------------------

/// Students read their own fees only; admins read anyone's; teachers are
/// denied outright.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_fee_scoping(pool: PgPool) {
    create_approved_user(&pool, "admin@test.com", Role::Admin).await;
    let s1 = create_approved_user(&pool, "s1@test.com", Role::Student).await;
    let s2 = create_approved_user(&pool, "s2@test.com", Role::Student).await;
    create_approved_user(&pool, "t1@test.com", Role::Teacher).await;
    let app = common::build_test_app(pool);

    let s1_token = login_token(app.clone(), "s1@test.com").await;
    let response = get_auth(app.clone(), &format!("/api/v1/fees/student/{}", s1.id), &s1_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app.clone(), &format!("/api/v1/fees/student/{}", s2.id), &s1_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let t1_token = login_token(app.clone(), "t1@test.com").await;
    let response = get_auth(app.clone(), &format!("/api/v1/fees/student/{}", s1.id), &t1_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let admin_token = login_token(app.clone(), "admin@test.com").await;
    let response = get_auth(app.clone(), &format!("/api/v1/fees/student/{}", s1.id), &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    // The full fee listing is admin-only.
    let response = get_auth(app, "/api/v1/fees", &s1_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Teachers read their own salaries only; the guarded view mirrors the
/// fee rules with the roles swapped.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_salary_scoping(pool: PgPool) {
    let t1 = create_approved_user(&pool, "t1@test.com", Role::Teacher).await;
    let t2 = create_approved_user(&pool, "t2@test.com", Role::Teacher).await;
    let s1 = create_approved_user(&pool, "s1@test.com", Role::Student).await;
    let app = common::build_test_app(pool);

    let t1_token = login_token(app.clone(), "t1@test.com").await;
    let response = get_auth(
        app.clone(),
        &format!("/api/v1/salaries/teacher/{}", t1.id),
        &t1_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(
        app.clone(),
        &format!("/api/v1/salaries/teacher/{}", t2.id),
        &t1_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let s1_token = login_token(app.clone(), "s1@test.com").await;
    let response = get_auth(
        app,
        &format!("/api/v1/salaries/teacher/{}", s1.id),
        &s1_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Deleting a missing record reports 404, not silence.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_missing_record(pool: PgPool) {
    create_approved_user(&pool, "admin@test.com", Role::Admin).await;
    let app = common::build_test_app(pool);

    let admin_token = login_token(app.clone(), "admin@test.com").await;
    for path in ["/api/v1/attendance/999999", "/api/v1/marks/999999", "/api/v1/fees/999999"] {
        let response = delete_auth(app.clone(), path, &admin_token).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{path}");
    }
}
