//! HTTP-level tests for `/nomer` (rooms), addressed by UUID.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, build_test_app, delete_auth, get_auth, multipart, seed_user, token_for, FilePart};
use sqlx::PgPool;
use stay_core::roles::{ROLE_ADMIN, ROLE_GUEST, ROLE_HOSTESS};
use stay_db::repositories::NomerRepo;

fn room_image() -> FilePart<'static> {
    FilePart {
        field: "image",
        file_name: "room.JPG",
        content_type: "image/jpeg",
        data: b"jpeg-bytes",
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_staff_creates_room_with_image(pool: PgPool) {
    let hostess = seed_user(&pool, "hostess20", ROLE_HOSTESS).await;
    let app = build_test_app(pool);
    let token = token_for(&hostess);

    let response = multipart(
        app.router(),
        Method::POST,
        "/nomer/create",
        Some(&token),
        &[("nameNomer", "Lux 101"), ("description", "Sea view"), ("price", "120")],
        Some(room_image()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let uuid = json["uuid"].as_str().expect("uuid returned").to_string();
    assert_eq!(json["nomer"]["uuid"], uuid.as_str());
    assert_eq!(json["nomer"]["name"], "Lux 101");
    let image = json["nomer"]["image_path"].as_str().unwrap();
    assert!(image.starts_with("nomers/") && image.ends_with(".jpg"));
    assert!(app.upload_exists(image));

    let response = get_auth(app.router(), &format!("/nomer/read/{uuid}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["description"], "Sea view");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_room_without_image_is_accepted(pool: PgPool) {
    let hostess = seed_user(&pool, "hostess21", ROLE_HOSTESS).await;
    let app = build_test_app(pool);

    let response = multipart(
        app.router(),
        Method::POST,
        "/nomer/create",
        Some(&token_for(&hostess)),
        &[("nameNomer", "Basic 1")],
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(body_json(response).await["nomer"]["image_path"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_room_name_is_required(pool: PgPool) {
    let hostess = seed_user(&pool, "hostess22", ROLE_HOSTESS).await;
    let app = build_test_app(pool.clone());

    let response = multipart(
        app.router(),
        Method::POST,
        "/nomer/create",
        Some(&token_for(&hostess)),
        &[("description", "no name")],
        Some(room_image()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    assert!(NomerRepo::list(&pool).await.unwrap().is_empty());
    assert!(!app.upload_dir.path().join("nomers").exists());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_room_name_is_409_and_leaves_no_file(pool: PgPool) {
    let hostess = seed_user(&pool, "hostess23", ROLE_HOSTESS).await;
    let token = token_for(&hostess);
    let app = build_test_app(pool);

    let create = |router| {
        let token = token.clone();
        async move {
            multipart(
                router,
                Method::POST,
                "/nomer/create",
                Some(&token),
                &[("nameNomer", "Twin")],
                Some(room_image()),
            )
            .await
        }
    };

    assert_eq!(create(app.router()).await.status(), StatusCode::CREATED);
    assert_eq!(create(app.router()).await.status(), StatusCode::CONFLICT);

    let stored = std::fs::read_dir(app.upload_dir.path().join("nomers"))
        .unwrap()
        .count();
    assert_eq!(stored, 1, "the rejected upload must be cleaned up");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_patches_only_sent_fields(pool: PgPool) {
    let hostess = seed_user(&pool, "hostess24", ROLE_HOSTESS).await;
    let token = token_for(&hostess);
    let app = build_test_app(pool);

    let response = multipart(
        app.router(),
        Method::POST,
        "/nomer/create",
        Some(&token),
        &[("nameNomer", "Standard"), ("price", "80")],
        Some(room_image()),
    )
    .await;
    let created = body_json(response).await;
    let uuid = created["uuid"].as_str().unwrap().to_string();
    let old_image = created["nomer"]["image_path"].as_str().unwrap().to_string();

    let response = multipart(
        app.router(),
        Method::PUT,
        &format!("/nomer/update/{uuid}"),
        Some(&token),
        &[("price", "95")],
        Some(FilePart {
            file_name: "new.png",
            content_type: "image/png",
            ..room_image()
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["nomer"]["name"], "Standard");
    assert_eq!(json["nomer"]["price"], "95");
    let new_image = json["nomer"]["image_path"].as_str().unwrap();
    assert_ne!(new_image, old_image);
    assert!(app.upload_exists(new_image));
    assert!(!app.upload_exists(&old_image));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_room_is_404(pool: PgPool) {
    let hostess = seed_user(&pool, "hostess25", ROLE_HOSTESS).await;
    let app = build_test_app(pool);

    let uri = format!("/nomer/read/{}", uuid::Uuid::new_v4());
    let response = get_auth(app.router(), &uri, &token_for(&hostess)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_only_admin_deletes_rooms(pool: PgPool) {
    let hostess = seed_user(&pool, "hostess26", ROLE_HOSTESS).await;
    let admin = seed_user(&pool, "admin20", ROLE_ADMIN).await;
    let app = build_test_app(pool.clone());

    let response = multipart(
        app.router(),
        Method::POST,
        "/nomer/create",
        Some(&token_for(&hostess)),
        &[("nameNomer", "Doomed")],
        Some(room_image()),
    )
    .await;
    let created = body_json(response).await;
    let uuid = created["uuid"].as_str().unwrap().to_string();
    let image = created["nomer"]["image_path"].as_str().unwrap().to_string();
    let uri = format!("/nomer/delete/{uuid}");

    let response = delete_auth(app.router(), &uri, &token_for(&hostess)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app.router(), &uri, &token_for(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!app.upload_exists(&image));
    assert!(NomerRepo::list(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_guest_cannot_list_rooms(pool: PgPool) {
    let guest = seed_user(&pool, "guest20", ROLE_GUEST).await;
    let app = build_test_app(pool);

    let response = get_auth(app.router(), "/nomer/readall", &token_for(&guest)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
