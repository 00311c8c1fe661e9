use axum::{Json, extract::State, response::IntoResponse};
use fleamarket_application::VerificationService;
use fleamarket_core::{CodePurpose, CodeStore, MailAddress, Notifier};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use super::{error::MarketApiError, extract::JsonBody};

#[derive(Deserialize)]
pub struct VerificationRequest {
    pub mail_address: Secret<String>,
    pub verification_code_type: String,
}

#[derive(Serialize, Deserialize)]
pub struct VerificationResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[tracing::instrument(name = "Issue verification code", skip_all)]
pub async fn verification<C, N>(
    State(verification): State<VerificationService<C, N>>,
    JsonBody(request): JsonBody<VerificationRequest>,
) -> Result<impl IntoResponse, MarketApiError>
where
    C: CodeStore + Clone + 'static,
    N: Notifier + Clone + 'static,
{
    let mail_address = MailAddress::try_from(request.mail_address)?;
    let purpose: CodePurpose = request.verification_code_type.parse()?;

    let issued = verification.issue_code(mail_address, purpose).await?;

    let warning = issued.delivery_warning.map(|e| {
        tracing::warn!(error = %e, "verification code stored but not delivered");
        "verification code could not be delivered, request a new one".to_owned()
    });

    Ok(Json(VerificationResponse {
        message: "verification code sent".to_owned(),
        warning,
    }))
}
