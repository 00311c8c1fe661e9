use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};

use super::validation_error::ValidationError;

static MAIL_ADDRESS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").expect("mail address pattern compiles")
});

/// A syntactically valid mail address. Also the user's login identifier, so
/// it is kept behind a `Secret` to stay out of logs.
#[derive(Debug, Clone)]
pub struct MailAddress(Secret<String>);

impl MailAddress {
    pub fn as_str(&self) -> &str {
        self.0.expose_secret()
    }
}

impl TryFrom<Secret<String>> for MailAddress {
    type Error = ValidationError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        let trimmed = value.expose_secret().trim();
        if !MAIL_ADDRESS_REGEX.is_match(trimmed) {
            return Err(ValidationError::InvalidMailAddress);
        }
        Ok(Self(Secret::new(trimmed.to_owned())))
    }
}

impl AsRef<Secret<String>> for MailAddress {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for MailAddress {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for MailAddress {}

impl Hash for MailAddress {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.expose_secret().hash(state);
    }
}
