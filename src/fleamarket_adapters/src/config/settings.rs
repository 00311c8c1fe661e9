use std::time::Duration;

use axum::http::HeaderValue;
use config::{Config, ConfigError, Environment, File, builder::DefaultState};
use secrecy::Secret;
use serde::Deserialize;

use super::constants::{DEFAULT_CONFIG_FILE, env, prod};
use crate::auth::JwtConfig;

type ConfigBuilder = config::ConfigBuilder<DefaultState>;

/// Runtime settings, layered as defaults, then `config/default.*` if
/// present, then `FLEAMARKET__*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketSettings {
    pub app: AppSettings,
    pub allowed_origins: AllowedOrigins,
    /// Without a Redis host codes are kept in process memory.
    pub redis: Option<RedisSettings>,
    pub verification: VerificationSettings,
    pub session: SessionSettings,
    /// Without a Postmark section codes are only logged.
    pub email_client: Option<EmailClientSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    pub host_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerificationSettings {
    pub code_ttl_in_seconds: u64,
    pub collaborator_timeout_in_millis: u64,
}

impl VerificationSettings {
    pub fn code_ttl(&self) -> Duration {
        Duration::from_secs(self.code_ttl_in_seconds)
    }

    pub fn collaborator_timeout(&self) -> Duration {
        Duration::from_millis(self.collaborator_timeout_in_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    pub jwt_secret: Secret<String>,
    pub time_to_live_in_seconds: i64,
}

impl SessionSettings {
    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            jwt_secret: self.jwt_secret.clone(),
            token_ttl_in_seconds: self.time_to_live_in_seconds,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: Secret<String>,
    pub auth_token: Secret<String>,
    pub timeout_in_millis: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self(origins)
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        origin
            .to_str()
            .map(|origin| self.0.iter().any(|allowed| allowed == origin))
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl MarketSettings {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let builder = Self::defaults()?
            .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(env::PREFIX)
                    .separator(env::SEPARATOR)
                    .list_separator(env::LIST_SEPARATOR)
                    .with_list_parse_key("allowed_origins")
                    .try_parsing(true),
            );

        Self::build(builder)
    }

    fn defaults() -> Result<ConfigBuilder, ConfigError> {
        Config::builder()
            .set_default("app.address", prod::APP_ADDRESS)?
            .set_default("allowed_origins", Vec::<String>::new())?
            .set_default("verification.code_ttl_in_seconds", prod::CODE_TTL_IN_SECONDS)?
            .set_default(
                "verification.collaborator_timeout_in_millis",
                prod::COLLABORATOR_TIMEOUT_IN_MILLIS,
            )?
            .set_default(
                "session.time_to_live_in_seconds",
                prod::SESSION_TTL_IN_SECONDS,
            )
    }

    fn build(builder: ConfigBuilder) -> Result<Self, ConfigError> {
        let settings: Self = builder.build()?.try_deserialize()?;
        if let Some(email_client) = &settings.email_client {
            if email_client.base_url.is_empty() {
                return Err(ConfigError::Message(
                    "email_client.base_url must not be empty".to_owned(),
                ));
            }
        }
        Ok(settings)
    }
}
