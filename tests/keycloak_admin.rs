use std::sync::Arc;
use std::time::Duration;

use actix_web::http::{StatusCode, header};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::json;

use lva_submission_portal::errors::PortalError;
use lva_submission_portal::identity::{IdentityProvider, KeycloakAdminClient};
use lva_submission_portal::services::students::StudentClassifier;

const ADMIN_TOKEN: &str = "admin-token";

fn authorized(req: &HttpRequest) -> bool {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(format!("Bearer {ADMIN_TOKEN}").as_str())
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({ "error": "HTTP 401 Unauthorized" }))
}

async fn users(req: HttpRequest, realm: web::Path<String>) -> HttpResponse {
    if !authorized(&req) {
        return unauthorized();
    }
    // vanishing: 列表之后账号被删除，角色查询返回 404
    if realm.as_str() == "vanishing" {
        return HttpResponse::Ok().json(json!([{ "id": "ghost", "username": "ghost" }]));
    }
    HttpResponse::Ok().json(json!([
        {
            "id": "u1",
            "username": "tom",
            "email": "tom@gmail.com",
            "enabled": true,
            "emailVerified": true,
            "attributes": { "matrikel": ["k1234567"] }
        },
        { "id": "u2", "username": "lukas", "email": "lukas@gmail.com", "enabled": true },
        { "id": "u3", "username": "lena", "email": "lena@jku.at", "enabled": true }
    ]))
}

async fn clients(req: HttpRequest) -> HttpResponse {
    if !authorized(&req) {
        return unauthorized();
    }
    HttpResponse::Ok().json(json!([
        { "id": "account-uuid", "clientId": "account", "enabled": true },
        { "id": "portal-uuid", "clientId": "lva-portal", "enabled": true, "publicClient": false }
    ]))
}

async fn realm_roles(req: HttpRequest, path: web::Path<(String, String)>) -> HttpResponse {
    if !authorized(&req) {
        return unauthorized();
    }
    match path.1.as_str() {
        "u1" => HttpResponse::Ok().json(json!([
            { "id": "r1", "name": "default-roles-lvaservice", "composite": true, "clientRole": false }
        ])),
        "ghost" => HttpResponse::NotFound().json(json!({ "error": "User not found" })),
        _ => HttpResponse::Ok().json(json!([])),
    }
}

async fn client_roles(
    req: HttpRequest,
    path: web::Path<(String, String, String)>,
) -> HttpResponse {
    if !authorized(&req) {
        return unauthorized();
    }
    let (_, user_id, client_uuid) = path.into_inner();
    if client_uuid != "portal-uuid" {
        return HttpResponse::NotFound().finish();
    }
    match user_id.as_str() {
        "u2" => HttpResponse::Ok().json(json!([{ "name": "student", "clientRole": true }])),
        "u3" => HttpResponse::Ok().json(json!([{ "name": "lecturer", "clientRole": true }])),
        _ => HttpResponse::Ok().json(json!([])),
    }
}

async fn delete_user(req: HttpRequest, path: web::Path<(String, String)>) -> HttpResponse {
    if !authorized(&req) {
        return unauthorized();
    }
    if path.1 == "u1" {
        HttpResponse::NoContent().finish()
    } else {
        HttpResponse::NotFound().finish()
    }
}

/// 启动本地管理 API，返回服务地址
async fn spawn_admin_api() -> String {
    let server = HttpServer::new(|| {
        App::new().service(
            web::scope("/admin/realms/{realm}")
                .route("/users", web::get().to(users))
                .route("/clients", web::get().to(clients))
                .route(
                    "/users/{user_id}/role-mappings/realm",
                    web::get().to(realm_roles),
                )
                .route(
                    "/users/{user_id}/role-mappings/clients/{client_uuid}",
                    web::get().to(client_roles),
                )
                .route("/users/{user_id}", web::delete().to(delete_user)),
        )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{addr}")
}

fn admin_client(base: &str, realm: &str) -> KeycloakAdminClient {
    KeycloakAdminClient::new(
        format!("{base}/admin/realms/{realm}"),
        Duration::from_secs(5),
    )
    .unwrap()
}

fn classifier(client: KeycloakAdminClient) -> StudentClassifier {
    StudentClassifier::new(
        Arc::new(client),
        "lva-portal",
        "default-roles-lvaservice",
        "student",
    )
}

#[actix_web::test]
async fn classifier_over_http_lists_students() {
    let base = spawn_admin_api().await;

    let students = classifier(admin_client(&base, "LVAservice"))
        .list_students(Some(ADMIN_TOKEN))
        .await
        .unwrap();

    let ids: Vec<&str> = students.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["u1", "u2"]);
    assert_eq!(students[0].email.as_deref(), Some("tom@gmail.com"));
    assert_eq!(students[0].extra["attributes"]["matrikel"][0], "k1234567");
}

#[actix_web::test]
async fn client_decodes_client_ids() {
    let base = spawn_admin_api().await;

    let clients = admin_client(&base, "LVAservice")
        .list_clients(ADMIN_TOKEN)
        .await
        .unwrap();
    assert_eq!(clients.len(), 2);
    assert_eq!(clients[1].id, "portal-uuid");
    assert_eq!(clients[1].client_id, "lva-portal");
}

#[actix_web::test]
async fn rejected_bearer_is_authentication_error() {
    let base = spawn_admin_api().await;

    let err = classifier(admin_client(&base, "LVAservice"))
        .list_students(Some("someone-elses-token"))
        .await
        .unwrap_err();
    assert!(matches!(err, PortalError::Authentication(_)));
    assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn missing_role_mapping_during_listing_is_upstream_error() {
    let base = spawn_admin_api().await;

    let err = classifier(admin_client(&base, "vanishing"))
        .list_students(Some(ADMIN_TOKEN))
        .await
        .unwrap_err();
    assert!(matches!(err, PortalError::Upstream(_)));
    assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
}

#[actix_web::test]
async fn delete_maps_missing_account_to_not_found() {
    let base = spawn_admin_api().await;
    let classifier = classifier(admin_client(&base, "LVAservice"));

    classifier
        .delete_account(Some(ADMIN_TOKEN), "u1")
        .await
        .unwrap();
    let err = classifier
        .delete_account(Some(ADMIN_TOKEN), "nobody")
        .await
        .unwrap_err();
    assert!(matches!(err, PortalError::NotFound(_)));
}
