use std::time::Duration;

use fleamarket_core::{
    CodePurpose, CodeStore, MailAddress, Notifier, SessionIssuer, UserRepository,
    UserRepositoryError, VerificationCode,
};

use crate::error::{InfraError, VerificationFailure, within};
use crate::use_cases::login::AuthenticatedUser;
use crate::verification::{ValidateCodeError, VerificationService};

#[derive(Debug, thiserror::Error)]
pub enum LoginByCodeError {
    #[error("Verification failed: {0}")]
    VerificationFailed(VerificationFailure),
    #[error("User not found")]
    UserNotFound,
    #[error("Infrastructure error: {0}")]
    Infra(#[from] InfraError),
}

impl From<ValidateCodeError> for LoginByCodeError {
    fn from(error: ValidateCodeError) -> Self {
        match error {
            ValidateCodeError::Failed(reason) => Self::VerificationFailed(reason),
            ValidateCodeError::Infra(e) => Self::Infra(e),
        }
    }
}

impl From<UserRepositoryError> for LoginByCodeError {
    fn from(error: UserRepositoryError) -> Self {
        match error {
            UserRepositoryError::NotFound => Self::UserNotFound,
            other => Self::Infra(other.into()),
        }
    }
}

/// Passwordless login with a "login" code sent to the user's mail address
pub struct LoginByCodeUseCase<'a, C, N, U, S> {
    verification: &'a VerificationService<C, N>,
    user_repository: &'a U,
    session_issuer: &'a S,
    timeout: Option<Duration>,
}

impl<'a, C, N, U, S> LoginByCodeUseCase<'a, C, N, U, S>
where
    C: CodeStore,
    N: Notifier,
    U: UserRepository,
    S: SessionIssuer,
{
    pub fn new(
        verification: &'a VerificationService<C, N>,
        user_repository: &'a U,
        session_issuer: &'a S,
    ) -> Self {
        Self {
            verification,
            user_repository,
            session_issuer,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[tracing::instrument(name = "LoginByCodeUseCase::execute", skip(self, code))]
    pub async fn execute(
        &self,
        mail_address: MailAddress,
        code: VerificationCode,
    ) -> Result<AuthenticatedUser, LoginByCodeError> {
        self.verification
            .validate_code(&mail_address, CodePurpose::Login, &code)
            .await?;

        let user = within(
            self.timeout,
            self.user_repository.find_by_mail_address(&mail_address),
        )
        .await??;

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
