use secrecy::Secret;

use super::{mail_address::MailAddress, user::UserId};

/// Bearer token handed out on a successful login.
#[derive(Debug, Clone)]
pub struct SessionToken(Secret<String>);

impl SessionToken {
    pub fn new(token: Secret<String>) -> Self {
        Self(token)
    }
}

impl AsRef<Secret<String>> for SessionToken {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

/// The authenticated identity a request acts on behalf of.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    pub user_id: UserId,
    pub mail_address: MailAddress,
}
