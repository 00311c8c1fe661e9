use fleamarket_core::CodePurpose;
use serde_json::{Value, json};

use crate::helpers::{PASSWORD, TestApp, other_code};

#[tokio::test]
async fn signup_returns_public_profile() {
    let app = TestApp::new().await;
    let code = app.request_code("taro@example.com", CodePurpose::Signup).await;

    let response = app
        .post_json(
            "/signup",
            &json!({
                "mail_address": "taro@example.com",
                "verification_code": code,
                "user_name": "taro",
                "password": PASSWORD,
                "gender": "male",
                "birthday": "1990-04-01",
                "phone_number": "090-0000-0000",
                "address": "100-0001 Tokyo Chiyoda 1-1",
            }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["user_name"], "taro");
    assert_eq!(body["mail_address"], "taro@example.com");
    assert_eq!(body["birthday"], "1990-04-01");
    assert_eq!(body["address"]["postal_code"], "100-0001");
    assert_eq!(body["address"]["address_detail"], "1-1");
    assert!(body.get("password").is_none());
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn second_signup_with_same_mail_address_conflicts() {
    let app = TestApp::new().await;
    assert_eq!(app.signup("taro@example.com", "taro").await.status().as_u16(), 201);

    let response = app.signup("taro@example.com", "jiro").await;

    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn taken_user_name_conflicts() {
    let app = TestApp::new().await;
    assert_eq!(app.signup("taro@example.com", "taro").await.status().as_u16(), 201);

    let response = app.signup("other@example.com", "taro").await;

    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn wrong_code_is_rejected() {
    let app = TestApp::new().await;
    let code = app.request_code("taro@example.com", CodePurpose::Signup).await;

    let response = app
        .post_json(
            "/signup",
            &json!({
                "mail_address": "taro@example.com",
                "verification_code": other_code(&code),
                "user_name": "taro",
                "password": PASSWORD,
            }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn code_of_another_purpose_is_rejected() {
    let app = TestApp::new().await;
    let code = app.request_code("taro@example.com", CodePurpose::Login).await;

    let response = app
        .post_json(
            "/signup",
            &json!({
                "mail_address": "taro@example.com",
                "verification_code": code,
                "user_name": "taro",
                "password": PASSWORD,
            }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn code_cannot_be_replayed() {
    let app = TestApp::new().await;
    let code = app.request_code("taro@example.com", CodePurpose::Signup).await;
    let request = json!({
        "mail_address": "taro@example.com",
        "verification_code": code,
        "user_name": "taro",
        "password": PASSWORD,
    });

    assert_eq!(app.post_json("/signup", &request).await.status().as_u16(), 201);

    let replay = app.post_json("/signup", &request).await;
    assert_eq!(replay.status().as_u16(), 400);
}

#[tokio::test]
async fn malformed_address_is_rejected() {
    let app = TestApp::new().await;
    let code = app.request_code("taro@example.com", CodePurpose::Signup).await;

    let response = app
        .post_json(
            "/signup",
            &json!({
                "mail_address": "taro@example.com",
                "verification_code": code,
                "user_name": "taro",
                "password": PASSWORD,
                "address": "100-0001 Tokyo",
            }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn short_password_is_rejected() {
    let app = TestApp::new().await;
    let code = app.request_code("taro@example.com", CodePurpose::Signup).await;

    let response = app
        .post_json(
            "/signup",
            &json!({
                "mail_address": "taro@example.com",
                "verification_code": code,
                "user_name": "taro",
                "password": "short",
            }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
}
