use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use fleamarket_adapters::{
    auth::{Argon2Hasher, JwtConfig, JwtSessionIssuer},
    config::test,
    persistence::{HashMapCodeStore, HashMapGoodsStore, HashMapUserStore},
};
use fleamarket_application::VerificationService;
use fleamarket_core::{
    CodePurpose, DeliveryError, HashedPassword, MailAddress, NewUser, Notifier, Profile,
    SessionIssuer, UserId, UserName, VerificationCode,
};
use fleamarket_service::MarketService;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use serde_json::{Value, json};

pub const PASSWORD: &str = "password123";

/// Keeps the last code sent per (address, purpose) instead of mailing it.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<HashMap<(String, CodePurpose), String>>>,
    failing: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn last_code(&self, mail_address: &str, purpose: CodePurpose) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .get(&(mail_address.to_owned(), purpose))
            .cloned()
    }
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    async fn send_code(
        &self,
        recipient: &MailAddress,
        purpose: CodePurpose,
        code: &VerificationCode,
    ) -> Result<(), DeliveryError> {
        self.sent.lock().unwrap().insert(
            (recipient.as_str().to_owned(), purpose),
            code.as_str().to_owned(),
        );
        if self.failing {
            return Err(DeliveryError("mail server rejected the message".to_owned()));
        }
        Ok(())
    }
}

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub notifier: RecordingNotifier,
    pub goods: HashMapGoodsStore,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_notifier(RecordingNotifier::default()).await
    }

    pub async fn with_notifier(notifier: RecordingNotifier) -> Self {
        let goods = HashMapGoodsStore::new();

        let verification = VerificationService::new(HashMapCodeStore::new(), notifier.clone())
            .with_timeout(Duration::from_secs(1));

        let router = MarketService::new(
            verification,
            HashMapUserStore::new(),
            goods.clone(),
            Argon2Hasher::new(),
            session_issuer(),
            Duration::from_secs(1),
        )
        .as_nested_router(None);

        let listener = tokio::net::TcpListener::bind(test::APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move { axum::serve(listener, router).await });

        Self {
            address,
            http_client: reqwest::Client::new(),
            notifier,
            goods,
        }
    }

    pub async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> reqwest::Response {
        self.http_client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> reqwest::Response {
        let mut request = self.http_client.get(format!("{}{}", self.address, path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request")
    }

    pub async fn request_code(&self, mail_address: &str, purpose: CodePurpose) -> String {
        let response = self
            .post_json(
                "/verification",
                &json!({
                    "mail_address": mail_address,
                    "verification_code_type": purpose.as_str(),
                }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 200);

        self.notifier
            .last_code(mail_address, purpose)
            .expect("No code was sent")
    }

    pub async fn signup(&self, mail_address: &str, user_name: &str) -> reqwest::Response {
        let code = self.request_code(mail_address, CodePurpose::Signup).await;
        self.post_json(
            "/signup",
            &json!({
                "mail_address": mail_address,
                "verification_code": code,
                "user_name": user_name,
                "password": PASSWORD,
            }),
        )
        .await
    }

    /// Sign up and log in, returning the user id and bearer token.
    pub async fn registered_user(&self, mail_address: &str, user_name: &str) -> (u64, String) {
        let response = self.signup(mail_address, user_name).await;
        assert_eq!(response.status().as_u16(), 201);

        let body: Value = self
            .post_json(
                "/login",
                &json!({ "mail_address": mail_address, "password": PASSWORD }),
            )
            .await
            .json()
            .await
            .unwrap();

        (
            body["id"].as_u64().unwrap(),
            body["token"].as_str().unwrap().to_owned(),
        )
    }
}

fn session_issuer() -> JwtSessionIssuer {
    JwtSessionIssuer::new(JwtConfig {
        jwt_secret: Secret::from("test-secret".to_owned()),
        token_ttl_in_seconds: 600,
    })
}

/// A correctly signed bearer token for `user_id`, whether or not that user
/// was ever registered.
pub fn token_for(user_id: u64) -> String {
    let user = NewUser {
        mail_address: MailAddress::try_from(Secret::from("ghost@example.com".to_owned()))
            .unwrap(),
        name: UserName::try_from("ghost".to_owned()).unwrap(),
        password: HashedPassword::new(Secret::from("unused".to_owned())),
        profile: Profile::default(),
    }
    .into_user(UserId::new(user_id));

    session_issuer()
        .issue(&user)
        .unwrap()
        .as_ref()
        .expose_secret()
        .clone()
}

/// A valid code that differs from `code`.
pub fn other_code(code: &str) -> String {
    if code == "000000" {
        "111111".to_owned()
    } else {
        "000000".to_owned()
    }
}
