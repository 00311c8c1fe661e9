use axum::{Json, extract::State, response::IntoResponse};
use fleamarket_application::LoginUseCase;
use fleamarket_core::{CredentialHasher, MailAddress, Password, SessionIssuer, UserRepository};
use secrecy::Secret;
use serde::Deserialize;

use super::{
    CollaboratorTimeout, error::MarketApiError, extract::JsonBody, user_info::UserInfoResponse,
};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub mail_address: Secret<String>,
    pub password: Secret<String>,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<U, H, S>(
    State((user_repository, hasher, session_issuer, timeout)): State<(
        U,
        H,
        S,
        CollaboratorTimeout,
    )>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse, MarketApiError>
where
    U: UserRepository + Clone + 'static,
    H: CredentialHasher + Clone + 'static,
    S: SessionIssuer + Clone + 'static,
{
    let mail_address = MailAddress::try_from(request.mail_address)?;
    let password = Password::try_from(request.password)?;

    let use_case =
        LoginUseCase::new(&user_repository, &hasher, &session_issuer).with_timeout(timeout.0);
    let authenticated = use_case.execute(mail_address, password).await?;

    Ok(Json(
        UserInfoResponse::from(authenticated.profile).with_token(&authenticated.token),
    ))
}
