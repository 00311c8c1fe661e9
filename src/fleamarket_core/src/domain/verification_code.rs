use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::Deserialize;

use super::{mail_address::MailAddress, validation_error::ValidationError};

pub const CODE_LENGTH: usize = 6;

/// A one-time numeric code, always `CODE_LENGTH` ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationCode(String);

impl VerificationCode {
    pub fn generate() -> Self {
        let upper = 10u32.pow(CODE_LENGTH as u32);
        let value = rand::rng().random_range(0..upper);
        Self(format!("{value:0width$}", width = CODE_LENGTH))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for VerificationCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.len() != CODE_LENGTH || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidVerificationCode {
                length: CODE_LENGTH,
            });
        }
        Ok(Self(value))
    }
}

/// Scopes a code to one workflow, so one address can hold a signup code and
/// a reset code at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodePurpose {
    Signup,
    Login,
    Reset,
}

impl CodePurpose {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Signup => "signup",
            Self::Login => "login",
            Self::Reset => "reset",
        }
    }
}

impl fmt::Display for CodePurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodePurpose {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "signup" => Ok(Self::Signup),
            "login" => Ok(Self::Login),
            "reset" => Ok(Self::Reset),
            other => Err(ValidationError::UnknownPurpose(other.to_owned())),
        }
    }
}

/// Code store key: one live code per (address, purpose).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodeKey {
    pub mail_address: MailAddress,
    pub purpose: CodePurpose,
}

impl CodeKey {
    pub fn new(mail_address: MailAddress, purpose: CodePurpose) -> Self {
        Self {
            mail_address,
            purpose,
        }
    }

    /// Flat string form for key-value backends.
    pub fn storage_key(&self) -> String {
        format!("{}:{}", self.purpose, self.mail_address.as_str())
    }
}
