use axum::{Json, extract::State, response::IntoResponse};
use fleamarket_application::{ResetPasswordUseCase, VerificationService};
use fleamarket_core::{
    CodeStore, CredentialHasher, MailAddress, Notifier, Password, UserRepository,
    VerificationCode,
};
use secrecy::Secret;
use serde::Deserialize;

use super::{CollaboratorTimeout, MessageResponse, error::MarketApiError, extract::JsonBody};

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub mail_address: Secret<String>,
    pub verification_code: String,
    pub password: Secret<String>,
}

#[tracing::instrument(name = "Reset password", skip_all)]
pub async fn reset_password<C, N, U, H>(
    State((verification, user_repository, hasher, timeout)): State<(
        VerificationService<C, N>,
        U,
        H,
        CollaboratorTimeout,
    )>,
    JsonBody(request): JsonBody<ResetPasswordRequest>,
) -> Result<impl IntoResponse, MarketApiError>
where
    C: CodeStore + Clone + 'static,
    N: Notifier + Clone + 'static,
    U: UserRepository + Clone + 'static,
    H: CredentialHasher + Clone + 'static,
{
    let mail_address = MailAddress::try_from(request.mail_address)?;
    let code = VerificationCode::try_from(request.verification_code)?;
    let password = Password::try_from(request.password)?;

    ResetPasswordUseCase::new(&verification, &user_repository, &hasher)
        .with_timeout(timeout.0)
        .execute(mail_address, code, password)
        .await?;

    Ok(Json(MessageResponse {
        message: "password reset".to_owned(),
    }))
}
