//! Tests for the users API handlers.

use super::*;
use crate::inbound::http::error::{json_config, path_config};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::{Value, json};

fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::in_memory()))
        .app_data(json_config())
        .app_data(path_config())
        .configure(configure)
}

async fn read_json(response: actix_web::dev::ServiceResponse) -> Value {
    let body = actix_test::read_body(response).await;
    serde_json::from_slice(&body).expect("response body is JSON")
}

async fn create(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    name: &str,
    email: &str,
) -> Value {
    let request = actix_test::TestRequest::post()
        .uri("/users")
        .set_json(json!({"name": name, "email": email}))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json(response).await
}

#[actix_web::test]
async fn create_returns_201_with_assigned_id_and_echoed_fields() {
    let app = actix_test::init_service(test_app()).await;

    let body = create(&app, "Jimmy Dean", "jimmy.dean@gmail.com").await;
    assert_eq!(body.get("id"), Some(&json!(1)));
    assert_eq!(body.get("name").and_then(Value::as_str), Some("Jimmy Dean"));
    assert_eq!(
        body.get("email").and_then(Value::as_str),
        Some("jimmy.dean@gmail.com")
    );
}

#[rstest]
#[case::invalid_email(
    json!({"name": "Jimmy Dean", "email": "invaild"}),
    json!(["email must be an email"])
)]
#[case::empty_name(
    json!({"name": "", "email": "jimmy.dean@gmail.com"}),
    json!(["name should not be empty"])
)]
#[case::both_invalid(
    json!({"name": "", "email": "invaild"}),
    json!(["name should not be empty", "email must be an email"])
)]
#[actix_web::test]
async fn create_rejects_invalid_bodies_with_constraint_arrays(
    #[case] payload: Value,
    #[case] expected_message: Value,
) {
    let app = actix_test::init_service(test_app()).await;

    let request = actix_test::TestRequest::post()
        .uri("/users")
        .set_json(payload)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await,
        json!({
            "statusCode": 400,
            "message": expected_message,
            "error": "Bad Request",
        })
    );
}

#[actix_web::test]
async fn create_rejects_duplicate_email_with_conflict_envelope() {
    let app = actix_test::init_service(test_app()).await;
    create(&app, "Jimmy Dean", "jimmy.dean@gmail.com").await;

    let request = actix_test::TestRequest::post()
        .uri("/users")
        .set_json(json!({"name": "Jimmy Dean", "email": "jimmy.dean@gmail.com"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        read_json(response).await,
        json!({
            "statusCode": 409,
            "message": "User already exists",
            "error": "Conflict",
        })
    );
}

#[actix_web::test]
async fn list_returns_empty_array_when_no_users_exist() {
    let app = actix_test::init_service(test_app()).await;

    let request = actix_test::TestRequest::get().uri("/users").to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!([]));
}

#[actix_web::test]
async fn list_returns_all_users_in_insertion_order() {
    let app = actix_test::init_service(test_app()).await;
    create(&app, "Jimmy Dean", "jimmy.dean@gmail.com").await;
    create(&app, "Ada Lovelace", "ada@example.com").await;

    let request = actix_test::TestRequest::get().uri("/users").to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let users = read_json(response).await;
    let users = users.as_array().expect("array body");
    assert_eq!(users.len(), 2);
    assert_eq!(
        users[0].get("name").and_then(Value::as_str),
        Some("Jimmy Dean")
    );
    assert_eq!(
        users[1].get("name").and_then(Value::as_str),
        Some("Ada Lovelace")
    );
}

#[actix_web::test]
async fn get_returns_the_matching_user() {
    let app = actix_test::init_service(test_app()).await;
    let created = create(&app, "Jimmy Dean", "jimmy.dean@gmail.com").await;

    let request = actix_test::TestRequest::get()
        .uri("/users/1")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, created);
}

#[actix_web::test]
async fn get_unknown_id_returns_the_not_found_envelope() {
    let app = actix_test::init_service(test_app()).await;

    let request = actix_test::TestRequest::get()
        .uri("/users/100")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        read_json(response).await,
        json!({
            "statusCode": 404,
            "message": "User not found",
            "error": "Not Found",
        })
    );
}

#[actix_web::test]
async fn get_rejects_non_integer_ids() {
    let app = actix_test::init_service(test_app()).await;

    let request = actix_test::TestRequest::get()
        .uri("/users/abc")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let payload = read_json(response).await;
    assert_eq!(payload.get("error").and_then(Value::as_str), Some("Bad Request"));
    assert!(payload.get("message").is_some_and(Value::is_array));
}

#[actix_web::test]
async fn patch_updates_fields_and_returns_204_with_empty_body() {
    let app = actix_test::init_service(test_app()).await;
    create(&app, "Jimmy Dean", "jimmy.dean@gmail.com").await;

    let request = actix_test::TestRequest::patch()
        .uri("/users/1")
        .set_json(json!({"name": "James Dean", "email": "james.dean@gmail.com"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(actix_test::read_body(response).await.is_empty());

    let request = actix_test::TestRequest::get()
        .uri("/users/1")
        .to_request();
    let body = read_json(actix_test::call_service(&app, request).await).await;
    assert_eq!(body.get("name").and_then(Value::as_str), Some("James Dean"));
    assert_eq!(
        body.get("email").and_then(Value::as_str),
        Some("james.dean@gmail.com")
    );
}

#[actix_web::test]
async fn patch_with_only_name_leaves_email_untouched() {
    let app = actix_test::init_service(test_app()).await;
    create(&app, "Jimmy Dean", "jimmy.dean@gmail.com").await;

    let request = actix_test::TestRequest::patch()
        .uri("/users/1")
        .set_json(json!({"name": "James Dean"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let request = actix_test::TestRequest::get()
        .uri("/users/1")
        .to_request();
    let body = read_json(actix_test::call_service(&app, request).await).await;
    assert_eq!(body.get("name").and_then(Value::as_str), Some("James Dean"));
    assert_eq!(
        body.get("email").and_then(Value::as_str),
        Some("jimmy.dean@gmail.com")
    );
}

#[actix_web::test]
async fn patch_unknown_id_returns_the_not_found_envelope() {
    let app = actix_test::init_service(test_app()).await;

    let request = actix_test::TestRequest::patch()
        .uri("/users/100")
        .set_json(json!({"name": "James Dean"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        read_json(response).await,
        json!({
            "statusCode": 404,
            "message": "User not found",
            "error": "Not Found",
        })
    );
}

#[actix_web::test]
async fn patch_rejects_unknown_fields() {
    let app = actix_test::init_service(test_app()).await;
    create(&app, "Jimmy Dean", "jimmy.dean@gmail.com").await;

    let request = actix_test::TestRequest::patch()
        .uri("/users/1")
        .set_json(json!({"name": "James Dean", "role": "admin"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let payload = read_json(response).await;
    assert_eq!(payload.get("statusCode"), Some(&json!(400)));
    assert_eq!(payload.get("error").and_then(Value::as_str), Some("Bad Request"));
    let message = payload
        .get("message")
        .and_then(Value::as_array)
        .expect("constraint array");
    assert!(
        message[0]
            .as_str()
            .is_some_and(|text| text.contains("unknown field")),
        "unexpected message: {message:?}"
    );
}

#[actix_web::test]
async fn patch_rejects_invalid_email_value() {
    let app = actix_test::init_service(test_app()).await;
    create(&app, "Jimmy Dean", "jimmy.dean@gmail.com").await;

    let request = actix_test::TestRequest::patch()
        .uri("/users/1")
        .set_json(json!({"email": "invaild"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        read_json(response).await,
        json!({
            "statusCode": 400,
            "message": ["email must be an email"],
            "error": "Bad Request",
        })
    );
}

#[actix_web::test]
async fn patch_rejects_email_held_by_another_user() {
    let app = actix_test::init_service(test_app()).await;
    create(&app, "Jimmy Dean", "jimmy.dean@gmail.com").await;
    create(&app, "Ada Lovelace", "ada@example.com").await;

    let request = actix_test::TestRequest::patch()
        .uri("/users/2")
        .set_json(json!({"email": "jimmy.dean@gmail.com"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        read_json(response).await,
        json!({
            "statusCode": 409,
            "message": "User already exists",
            "error": "Conflict",
        })
    );
}

#[actix_web::test]
async fn delete_removes_the_user_and_second_delete_fails_cleanly() {
    let app = actix_test::init_service(test_app()).await;
    create(&app, "Jimmy Dean", "jimmy.dean@gmail.com").await;
    create(&app, "Ada Lovelace", "ada@example.com").await;

    let request = actix_test::TestRequest::delete()
        .uri("/users/1")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(actix_test::read_body(response).await.is_empty());

    let request = actix_test::TestRequest::get()
        .uri("/users/1")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let request = actix_test::TestRequest::get().uri("/users").to_request();
    let remaining = read_json(actix_test::call_service(&app, request).await).await;
    assert_eq!(remaining.as_array().map(Vec::len), Some(1));

    let request = actix_test::TestRequest::delete()
        .uri("/users/1")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn malformed_json_bodies_are_rejected_in_the_standard_envelope() {
    let app = actix_test::init_service(test_app()).await;

    let request = actix_test::TestRequest::post()
        .uri("/users")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let payload = read_json(response).await;
    assert_eq!(payload.get("statusCode"), Some(&json!(400)));
    assert_eq!(payload.get("error").and_then(Value::as_str), Some("Bad Request"));
}
