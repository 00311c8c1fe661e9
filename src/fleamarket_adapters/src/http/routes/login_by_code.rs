use axum::{Json, extract::State, response::IntoResponse};
use fleamarket_application::{LoginByCodeUseCase, VerificationService};
use fleamarket_core::{
    CodeStore, MailAddress, Notifier, SessionIssuer, UserRepository, VerificationCode,
};
use secrecy::Secret;
use serde::Deserialize;

use super::{
    CollaboratorTimeout, error::MarketApiError, extract::JsonBody, user_info::UserInfoResponse,
};

#[derive(Deserialize)]
pub struct LoginByCodeRequest {
    pub mail_address: Secret<String>,
    pub verification_code: String,
}

#[tracing::instrument(name = "Login by code", skip_all)]
pub async fn login_by_code<C, N, U, S>(
    State((verification, user_repository, session_issuer, timeout)): State<(
        VerificationService<C, N>,
        U,
        S,
        CollaboratorTimeout,
    )>,
    JsonBody(request): JsonBody<LoginByCodeRequest>,
) -> Result<impl IntoResponse, MarketApiError>
where
    C: CodeStore + Clone + 'static,
    N: Notifier + Clone + 'static,
    U: UserRepository + Clone + 'static,
    S: SessionIssuer + Clone + 'static,
{
    let mail_address = MailAddress::try_from(request.mail_address)?;
    let code = VerificationCode::try_from(request.verification_code)?;

    let use_case = LoginByCodeUseCase::new(&verification, &user_repository, &session_issuer)
        .with_timeout(timeout.0);
    let authenticated = use_case.execute(mail_address, code).await?;

    Ok(Json(
        UserInfoResponse::from(authenticated.profile).with_token(&authenticated.token),
    ))
}
