use chrono::Utc;
use fleamarket_core::{
    MailAddress, Principal, SessionError, SessionIssuer, SessionToken, User, UserId,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize, ser::SerializeStruct};

#[derive(Clone)]
pub struct JwtConfig {
    pub jwt_secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

impl JwtConfig {
    pub fn as_bytes(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }
}

/// HS256 session tokens carrying the user id and mail address.
#[derive(Clone)]
pub struct JwtSessionIssuer {
    config: JwtConfig,
}

impl JwtSessionIssuer {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }
}

impl SessionIssuer for JwtSessionIssuer {
    fn issue(&self, user: &User) -> Result<SessionToken, SessionError> {
        let delta = chrono::Duration::try_seconds(self.config.token_ttl_in_seconds).ok_or(
            SessionError::IssueFailed("Failed to create auth token duration".to_string()),
        )?;

        // Create JWT expiration time
        let exp = Utc::now()
            .checked_add_signed(delta)
            .ok_or(SessionError::IssueFailed(
                "Duration out of range".to_string(),
            ))?
            .timestamp();

        // Cast exp to a usize, which is what Claims expects
        let exp: usize = exp
            .try_into()
            .map_err(|_| SessionError::IssueFailed("Failed to cast i64 to usize".to_string()))?;

        let claims = Claims {
            sub: user.id().to_string(),
            mail: user.mail_address().as_ref().clone(),
            exp,
        };

        create_token(&claims, self.config.as_bytes()).map(|t| SessionToken::new(Secret::new(t)))
    }

    fn authenticate(&self, token: &str) -> Result<Principal, SessionError> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| SessionError::InvalidToken)?;

        let user_id = claims
            .sub
            .parse::<u64>()
            .map(UserId::new)
            .map_err(|_| SessionError::InvalidToken)?;
        let mail_address =
            MailAddress::try_from(claims.mail).map_err(|_| SessionError::InvalidToken)?;

        Ok(Principal {
            user_id,
            mail_address,
        })
    }
}

// Create JWT auth token by encoding claims using the JWT secret
fn create_token(claims: &Claims, secret: &[u8]) -> Result<String, SessionError> {
    encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| SessionError::IssueFailed(e.to_string()))
}

#[derive(Debug, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub mail: Secret<String>,
    pub exp: usize,
}

impl Serialize for Claims {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Claims", 3)?;
        state.serialize_field("sub", &self.sub)?;
        state.serialize_field("mail", &self.mail.expose_secret())?;
        state.serialize_field("exp", &self.exp)?;
        state.end()
    }
}
