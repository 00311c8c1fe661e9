use std::time::Duration;

use fleamarket_core::{
    CredentialHasher, MailAddress, Password, SessionIssuer, SessionToken, UserProfile,
    UserRepository, UserRepositoryError,
};

use crate::error::{InfraError, within};

/// Response from the login use cases
#[derive(Debug)]
pub struct AuthenticatedUser {
    pub profile: UserProfile,
    pub token: SessionToken,
}

/// Error types specific to login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("User not found")]
    UserNotFound,
    #[error("Invalid credential")]
    InvalidCredential,
    #[error("Infrastructure error: {0}")]
    Infra(#[from] InfraError),
}

impl From<UserRepositoryError> for LoginError {
    fn from(error: UserRepositoryError) -> Self {
        match error {
            UserRepositoryError::NotFound => Self::UserNotFound,
            other => Self::Infra(other.into()),
        }
    }
}

/// Login use case - authenticates a user by password. Never touches the
/// code store.
pub struct LoginUseCase<'a, U, H, S> {
    user_repository: &'a U,
    hasher: &'a H,
    session_issuer: &'a S,
    timeout: Option<Duration>,
}

impl<'a, U, H, S> LoginUseCase<'a, U, H, S>
where
    U: UserRepository,
    H: CredentialHasher,
    S: SessionIssuer,
{
    pub fn new(user_repository: &'a U, hasher: &'a H, session_issuer: &'a S) -> Self {
        Self {
            user_repository,
            hasher,
            session_issuer,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Execute the login use case
    ///
    /// # Arguments
    /// * `mail_address` - User's mail address
    /// * `password` - User's password
    ///
    /// # Returns
    /// The user's profile and a fresh session token, or LoginError
    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        mail_address: MailAddress,
        password: Password,
    ) -> Result<AuthenticatedUser, LoginError> {
        let user = within(
            self.timeout,
            self.user_repository.find_by_mail_address(&mail_address),
        )
        .await??;

        if !self.hasher.verify(password, user.password()).await {
            return Err(LoginError::InvalidCredential);
        }

        let token = self
            .session_issuer
            .issue(&user)
            .map_err(InfraError::from)?;

        Ok(AuthenticatedUser {
            profile: user.public_profile(),
            token,
        })
    }
}
