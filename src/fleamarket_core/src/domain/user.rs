use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    address::Address, mail_address::MailAddress, password::HashedPassword,
    validation_error::ValidationError,
};

pub const MAX_USER_NAME_LENGTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display name, unique across users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        let length = trimmed.chars().count();
        if length == 0 || length > MAX_USER_NAME_LENGTH {
            return Err(ValidationError::InvalidUserName {
                max: MAX_USER_NAME_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub gender: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub phone_number: Option<String>,
    pub address: Option<Address>,
}

/// A user that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub mail_address: MailAddress,
    pub name: UserName,
    pub password: HashedPassword,
    pub profile: Profile,
}

impl NewUser {
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            mail_address: self.mail_address,
            name: self.name,
            password: self.password,
            profile: self.profile,
        }
    }
}

#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    mail_address: MailAddress,
    name: UserName,
    password: HashedPassword,
    profile: Profile,
}

impl User {
    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn mail_address(&self) -> &MailAddress {
        &self.mail_address
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn password(&self) -> &HashedPassword {
        &self.password
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn set_password(&mut self, password: HashedPassword) {
        self.password = password;
    }

    /// Everything a client may see about this user. The credential is left out.
    pub fn public_profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            mail_address: self.mail_address.clone(),
            profile: self.profile.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: UserId,
    pub name: UserName,
    pub mail_address: MailAddress,
    pub profile: Profile,
}
