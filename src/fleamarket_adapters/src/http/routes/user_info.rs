use chrono::NaiveDate;
use fleamarket_core::{Address, SessionToken, UserId, UserProfile};
use secrecy::ExposeSecret;
use serde::Serialize;

/// Public view of an account. Carries a session token only after a login.
#[derive(Debug, Serialize)]
pub struct UserInfoResponse {
    pub id: UserId,
    pub user_name: String,
    pub mail_address: String,
    pub gender: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub phone_number: Option<String>,
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl UserInfoResponse {
    pub fn with_token(mut self, token: &SessionToken) -> Self {
        self.token = Some(token.as_ref().expose_secret().clone());
        self
    }
}

impl From<UserProfile> for UserInfoResponse {
    fn from(user: UserProfile) -> Self {
        Self {
            id: user.id,
            user_name: user.name.as_str().to_owned(),
            mail_address: user.mail_address.as_str().to_owned(),
            gender: user.profile.gender,
            birthday: user.profile.birthday,
            phone_number: user.profile.phone_number,
            address: user.profile.address,
            token: None,
        }
    }
}
