use fleamarket_core::CodePurpose;
use serde_json::{Value, json};

use crate::helpers::{PASSWORD, TestApp, other_code};

#[tokio::test]
async fn login_returns_profile_and_token() {
    let app = TestApp::new().await;
    app.signup("taro@example.com", "taro").await;

    let response = app
        .post_json(
            "/login",
            &json!({ "mail_address": "taro@example.com", "password": PASSWORD }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["user_name"], "taro");
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = TestApp::new().await;
    app.signup("taro@example.com", "taro").await;

    let response = app
        .post_json(
            "/login",
            &json!({ "mail_address": "taro@example.com", "password": "wrong-password" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .post_json(
            "/login",
            &json!({ "mail_address": "nobody@example.com", "password": PASSWORD }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn login_by_code_needs_no_password() {
    let app = TestApp::new().await;
    app.signup("taro@example.com", "taro").await;
    let code = app.request_code("taro@example.com", CodePurpose::Login).await;

    let response = app
        .post_json(
            "/login-by-code",
            &json!({ "mail_address": "taro@example.com", "verification_code": code }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["mail_address"], "taro@example.com");
    assert!(body["token"].is_string());
}

#[tokio::test]
async fn login_by_code_with_wrong_code_is_rejected() {
    let app = TestApp::new().await;
    app.signup("taro@example.com", "taro").await;
    let code = app.request_code("taro@example.com", CodePurpose::Login).await;

    let response = app
        .post_json(
            "/login-by-code",
            &json!({ "mail_address": "taro@example.com", "verification_code": other_code(&code) }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn login_by_code_for_unknown_user_is_not_found() {
    let app = TestApp::new().await;
    let code = app.request_code("nobody@example.com", CodePurpose::Login).await;

    let response = app
        .post_json(
            "/login-by-code",
            &json!({ "mail_address": "nobody@example.com", "verification_code": code }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 404);
}
