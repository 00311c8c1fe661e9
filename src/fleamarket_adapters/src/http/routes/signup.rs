use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::NaiveDate;
use fleamarket_application::{SignupForm, SignupUseCase, VerificationService};
use fleamarket_core::{
    Address, CodeStore, CredentialHasher, MailAddress, Notifier, Password, Profile,
    UserName, UserRepository, ValidationError, VerificationCode,
};
use secrecy::Secret;
use serde::Deserialize;

use super::{
    CollaboratorTimeout, error::MarketApiError, extract::JsonBody, user_info::UserInfoResponse,
};

#[derive(Deserialize)]
pub struct SignupRequest {
    pub mail_address: Secret<String>,
    pub verification_code: String,
    pub user_name: String,
    pub password: Secret<String>,
    pub gender: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub phone_number: Option<String>,
    /// "postal_code prefecture city detail"
    pub address: Option<String>,
}

impl SignupRequest {
    fn profile(&self) -> Result<Profile, ValidationError> {
        let address = self
            .address
            .as_deref()
            .map(str::trim)
            .filter(|address| !address.is_empty())
            .map(str::parse::<Address>)
            .transpose()?;

        Ok(Profile {
            gender: self.gender.clone(),
            birthday: self.birthday,
            phone_number: self.phone_number.clone(),
            address,
        })
    }
}

#[tracing::instrument(name = "Signup", skip_all)]
pub async fn signup<C, N, U, H>(
    State((verification, user_repository, hasher, timeout)): State<(
        VerificationService<C, N>,
        U,
        H,
        CollaboratorTimeout,
    )>,
    JsonBody(request): JsonBody<SignupRequest>,
) -> Result<impl IntoResponse, MarketApiError>
where
    C: CodeStore + Clone + 'static,
    N: Notifier + Clone + 'static,
    U: UserRepository + Clone + 'static,
    H: CredentialHasher + Clone + 'static,
{
    let profile = request.profile()?;
    let mail_address = MailAddress::try_from(request.mail_address)?;
    let code = VerificationCode::try_from(request.verification_code)?;
    let form = SignupForm {
        name: UserName::try_from(request.user_name)?,
        password: Password::try_from(request.password)?,
        profile,
    };

    let use_case =
        SignupUseCase::new(&verification, &user_repository, &hasher).with_timeout(timeout.0);
    let profile = use_case.execute(mail_address, code, form).await?;

    Ok((StatusCode::CREATED, Json(UserInfoResponse::from(profile))))
}
