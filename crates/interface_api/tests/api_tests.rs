//! HTTP tests for the third-party API against the in-memory port

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use domain_tercero::{MockThirdPartyPort, ThirdPartyService};
use interface_api::auth::{create_token, permissions};
use interface_api::config::ApiConfig;
use interface_api::create_router;
use test_utils::FormFixtures;

fn server() -> TestServer {
    let service = ThirdPartyService::new(Arc::new(MockThirdPartyPort::new()));
    TestServer::new(create_router(service, ApiConfig::default())).unwrap()
}

fn token(roles: &[&str]) -> String {
    let config = ApiConfig::default();
    create_token(
        "operador1",
        roles.iter().map(|role| role.to_string()).collect(),
        &config.jwt_secret,
        config.jwt_expiration_secs,
    )
    .unwrap()
}

fn admin() -> String {
    token(&[permissions::ADMIN])
}

#[tokio::test]
async fn test_health_is_public() {
    let server = server();
    server.get("/health").await.assert_status_ok();

    let ready = server.get("/health/ready").await;
    ready.assert_status_ok();
    assert_eq!(ready.json::<Value>()["status"], "ready");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let server = server();
    let response = server.get("/api/v1/terceros").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reader_cannot_register() {
    let server = server();
    let response = server
        .post("/api/v1/terceros")
        .authorization_bearer(token(&[permissions::TERCERO_READ]))
        .json(&FormFixtures::natural_client())
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_register_then_get() {
    let server = server();
    let created = server
        .post("/api/v1/terceros")
        .authorization_bearer(admin())
        .json(&FormFixtures::legal_supplier())
        .await;
    created.assert_status(StatusCode::CREATED);

    let body = created.json::<Value>();
    let code = body["code"].as_i64().unwrap();
    assert_eq!(body["document_number"], "860002964-4");
    assert_eq!(body["person_type"], "legal");

    let fetched = server
        .get(&format!("/api/v1/terceros/{}", code))
        .authorization_bearer(admin())
        .await;
    fetched.assert_status_ok();
    assert_eq!(fetched.json::<Value>()["code"], code);
}

#[tokio::test]
async fn test_rejected_registration_returns_every_field_error() {
    let server = server();
    let response = server
        .post("/api/v1/terceros")
        .authorization_bearer(admin())
        .json(&json!({
            "person_type": "1",
            "document_type": "0",
            "document_number": "1234-56",
            "kind": "0",
            "given_name": "Juan",
            "phone": "12",
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.json::<Value>();
    let fields: Vec<&str> = body["field_errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|error| error["field"].as_str().unwrap())
        .collect();
    assert_eq!(
        fields,
        vec!["document_type", "document_number", "given_name", "business_name", "phone"]
    );
}

#[tokio::test]
async fn test_duplicate_document_is_conflict() {
    let server = server();
    server
        .post("/api/v1/terceros")
        .authorization_bearer(admin())
        .json(&FormFixtures::natural_client())
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/v1/terceros")
        .authorization_bearer(admin())
        .json(&FormFixtures::natural_client())
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["field"], "document_number");
}

#[tokio::test]
async fn test_search_update_and_delete() {
    let server = server();
    let created = server
        .post("/api/v1/terceros")
        .authorization_bearer(admin())
        .json(&FormFixtures::natural_client())
        .await
        .json::<Value>();
    let path = format!("/api/v1/terceros/{}", created["code"]);

    let found = server
        .get("/api/v1/terceros")
        .add_query_param("q", "restrepo")
        .add_query_param("person_type", "natural")
        .authorization_bearer(admin())
        .await;
    found.assert_status_ok();
    assert_eq!(found.json::<Vec<Value>>().len(), 1);

    let updated = server
        .put(&path)
        .authorization_bearer(admin())
        .json(&json!({ "mobile": "3109876543", "city": "" }))
        .await;
    updated.assert_status_ok();
    let body = updated.json::<Value>();
    assert_eq!(body["mobile"], "3109876543");
    assert_eq!(body["city"], Value::Null);
    assert_eq!(body["code"], created["code"]);

    server
        .delete(&path)
        .authorization_bearer(admin())
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .get(&path)
        .authorization_bearer(admin())
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bad_code_and_filter_are_bad_requests() {
    let server = server();
    server
        .get("/api/v1/terceros/abc")
        .authorization_bearer(admin())
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    server
        .get("/api/v1/terceros")
        .add_query_param("kind", "partner")
        .authorization_bearer(admin())
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_validate_is_a_dry_run() {
    let server = server();
    let response = server
        .post("/api/v1/terceros/validate")
        .authorization_bearer(admin())
        .json(&json!({
            "person_type": "legal",
            "document_type": "tax_id",
            "document_number": " 860 002 964-4 ",
            "kind": "supplier",
            "business_name": "Distribuidora Andina S.A.",
        }))
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["valid"], true);
    assert_eq!(body["record"]["document_number"], "860002964-4");

    let listed = server
        .get("/api/v1/terceros")
        .authorization_bearer(admin())
        .await
        .json::<Vec<Value>>();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_document_types_follow_person_type() {
    let server = server();
    let response = server
        .get("/api/v1/document-types")
        .add_query_param("person_type", "legal")
        .add_query_param("previous_person_type", "natural")
        .add_query_param("selected", "national_id")
        .authorization_bearer(token(&[permissions::TERCERO_READ]))
        .await;
    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["options"].as_array().unwrap().len(), 1);
    assert_eq!(body["options"][0]["label"], "NIT");
    assert_eq!(body["selected"], "tax_id");
}
