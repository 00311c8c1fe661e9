use std::time::Duration;

use fleamarket_core::{
    CodePurpose, CodeStore, CredentialHasher, MailAddress, NewUser, Notifier, Password, Profile,
    UniqueField, UserName, UserProfile, UserRepository, UserRepositoryError, VerificationCode,
};

use crate::error::{InfraError, VerificationFailure, within};
use crate::verification::{ValidateCodeError, VerificationService};

/// Everything a new account is created from, besides the mail address.
#[derive(Debug, Clone)]
pub struct SignupForm {
    pub name: UserName,
    pub password: Password,
    pub profile: Profile,
}

/// Error types for signup use case
#[derive(Debug, thiserror::Error)]
pub enum SignupError {
    #[error("Verification failed: {0}")]
    VerificationFailed(VerificationFailure),
    #[error("User already exists: {0} is taken")]
    UserAlreadyExists(UniqueField),
    #[error("Infrastructure error: {0}")]
    Infra(#[from] InfraError),
}

impl From<ValidateCodeError> for SignupError {
    fn from(error: ValidateCodeError) -> Self {
        match error {
            ValidateCodeError::Failed(reason) => Self::VerificationFailed(reason),
            ValidateCodeError::Infra(e) => Self::Infra(e),
        }
    }
}

impl From<UserRepositoryError> for SignupError {
    fn from(error: UserRepositoryError) -> Self {
        match error {
            UserRepositoryError::UniqueViolation(field) => Self::UserAlreadyExists(field),
            other => Self::Infra(other.into()),
        }
    }
}

/// Signup use case - creates an account for a mail address that proved
/// ownership with a "signup" code
pub struct SignupUseCase<'a, C, N, U, H> {
    verification: &'a VerificationService<C, N>,
    user_repository: &'a U,
    hasher: &'a H,
    timeout: Option<Duration>,
}

impl<'a, C, N, U, H> SignupUseCase<'a, C, N, U, H>
where
    C: CodeStore,
    N: Notifier,
    U: UserRepository,
    H: CredentialHasher,
{
    pub fn new(
        verification: &'a VerificationService<C, N>,
        user_repository: &'a U,
        hasher: &'a H,
    ) -> Self {
        Self {
            verification,
            user_repository,
            hasher,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Execute the signup use case
    ///
    /// # Returns
    /// The created user's public profile, or SignupError
    #[tracing::instrument(name = "SignupUseCase::execute", skip(self, code, form))]
    pub async fn execute(
        &self,
        mail_address: MailAddress,
        code: VerificationCode,
        form: SignupForm,
    ) -> Result<UserProfile, SignupError> {
        self.verification
            .validate_code(&mail_address, CodePurpose::Signup, &code)
            .await?;

        let password = self
            .hasher
            .hash(form.password)
            .await
            .map_err(InfraError::from)?;

        let new_user = NewUser {
            mail_address,
            name: form.name,
            password,
            profile: form.profile,
        };
        let user = within(self.timeout, self.user_repository.create(new_user)).await??;

        Ok(user.public_profile())
    }
}
