//! HTTP-level tests for `/role`. Every route is admin-only.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, delete_auth, get_auth, post_json_auth, put_json_auth, seed_user,
    token_for,
};
use serde_json::json;
use sqlx::PgPool;
use stay_core::roles::{ROLE_ADMIN, ROLE_HOSTESS};

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seeded_roles_are_listed(pool: PgPool) {
    let admin = seed_user(&pool, "admin10", ROLE_ADMIN).await;
    let app = build_test_app(pool);

    let response = get_auth(app.router(), "/role/readall", &token_for(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["admin", "hostess", "guest"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_read_update_delete_role(pool: PgPool) {
    let admin = seed_user(&pool, "admin11", ROLE_ADMIN).await;
    let token = token_for(&admin);
    let app = build_test_app(pool);

    let response = post_json_auth(
        app.router(),
        "/role/create",
        json!({ "roleID": 7, "roleName": "manager" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["role"]["id"], 7);

    let response = get_auth(app.router(), "/role/read/7", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "manager");

    let response = put_json_auth(
        app.router(),
        "/role/update/7",
        json!({ "roleName": "supervisor" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["role"]["name"], "supervisor");

    let response = delete_auth(app.router(), "/role/delete/7", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app.router(), "/role/read/7", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_role_is_409(pool: PgPool) {
    let admin = seed_user(&pool, "admin12", ROLE_ADMIN).await;
    let token = token_for(&admin);
    let app = build_test_app(pool);

    let same_tag = json!({ "roleID": ROLE_HOSTESS, "roleName": "another" });
    let response = post_json_auth(app.router(), "/role/create", same_tag, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert!(json["error"].as_str().unwrap().contains("uq_roles_id"));

    let same_name = json!({ "roleID": 9, "roleName": "guest" });
    let response = post_json_auth(app.router(), "/role/create", same_name, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_role_name_length_is_validated(pool: PgPool) {
    let admin = seed_user(&pool, "admin13", ROLE_ADMIN).await;
    let app = build_test_app(pool);

    let response = post_json_auth(
        app.router(),
        "/role/create",
        json!({ "roleID": 8, "roleName": "x" }),
        &token_for(&admin),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_unknown_role_is_404(pool: PgPool) {
    let admin = seed_user(&pool, "admin14", ROLE_ADMIN).await;
    let app = build_test_app(pool);

    let response = delete_auth(app.router(), "/role/delete/999", &token_for(&admin)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_hostess_cannot_manage_roles(pool: PgPool) {
    let hostess = seed_user(&pool, "hostess10", ROLE_HOSTESS).await;
    let app = build_test_app(pool);

    let response = get_auth(app.router(), "/role/readall", &token_for(&hostess)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
