use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fleamarket_application::{
    GoodsViewError, InfraError, IssueCodeError, LoginByCodeError, LoginError,
    ResetPasswordError, SignupError, VerificationFailure,
};
use fleamarket_core::{SessionError, UniqueField, UserRepositoryError, ValidationError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum MarketApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Verification failed: {0}")]
    VerificationFailed(VerificationFailure),

    #[error("User already exists: {0} is taken")]
    UserAlreadyExists(UniqueField),

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid credential")]
    InvalidCredential,

    #[error("Missing token")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Service unavailable, try again later")]
    ServiceUnavailable(String),
}

impl IntoResponse for MarketApiError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            MarketApiError::InvalidInput(_) | MarketApiError::VerificationFailed(_) => {
                StatusCode::BAD_REQUEST
            }

            MarketApiError::UserAlreadyExists(_) => StatusCode::CONFLICT,

            MarketApiError::UserNotFound => StatusCode::NOT_FOUND,

            MarketApiError::InvalidCredential
            | MarketApiError::MissingToken
            | MarketApiError::InvalidToken => StatusCode::UNAUTHORIZED,

            MarketApiError::ServiceUnavailable(cause) => {
                tracing::error!(%cause, "collaborator unavailable");
                StatusCode::SERVICE_UNAVAILABLE
            }
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status_code, body).into_response()
    }
}

impl From<JsonRejection> for MarketApiError {
    fn from(rejection: JsonRejection) -> Self {
        MarketApiError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for MarketApiError {
    fn from(rejection: QueryRejection) -> Self {
        MarketApiError::InvalidInput(rejection.body_text())
    }
}

impl From<ValidationError> for MarketApiError {
    fn from(error: ValidationError) -> Self {
        MarketApiError::InvalidInput(error.to_string())
    }
}

impl From<InfraError> for MarketApiError {
    fn from(error: InfraError) -> Self {
        MarketApiError::ServiceUnavailable(error.to_string())
    }
}

impl From<UserRepositoryError> for MarketApiError {
    fn from(error: UserRepositoryError) -> Self {
        match error {
            UserRepositoryError::UniqueViolation(field) => MarketApiError::UserAlreadyExists(field),
            UserRepositoryError::NotFound => MarketApiError::UserNotFound,
            UserRepositoryError::Unavailable(e) => MarketApiError::ServiceUnavailable(e),
        }
    }
}

impl From<SessionError> for MarketApiError {
    fn from(error: SessionError) -> Self {
        match error {
            SessionError::InvalidToken => MarketApiError::InvalidToken,
            SessionError::IssueFailed(e) => MarketApiError::ServiceUnavailable(e),
        }
    }
}

impl From<IssueCodeError> for MarketApiError {
    fn from(error: IssueCodeError) -> Self {
        match error {
            IssueCodeError::Infra(e) => e.into(),
        }
    }
}

impl From<SignupError> for MarketApiError {
    fn from(error: SignupError) -> Self {
        match error {
            SignupError::VerificationFailed(reason) => MarketApiError::VerificationFailed(reason),
            SignupError::UserAlreadyExists(field) => MarketApiError::UserAlreadyExists(field),
            SignupError::Infra(e) => e.into(),
        }
    }
}

impl From<LoginError> for MarketApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::UserNotFound => MarketApiError::UserNotFound,
            LoginError::InvalidCredential => MarketApiError::InvalidCredential,
            LoginError::Infra(e) => e.into(),
        }
    }
}

impl From<LoginByCodeError> for MarketApiError {
    fn from(error: LoginByCodeError) -> Self {
        match error {
            LoginByCodeError::VerificationFailed(reason) => {
                MarketApiError::VerificationFailed(reason)
            }
            LoginByCodeError::UserNotFound => MarketApiError::UserNotFound,
            LoginByCodeError::Infra(e) => e.into(),
        }
    }
}

impl From<ResetPasswordError> for MarketApiError {
    fn from(error: ResetPasswordError) -> Self {
        match error {
            ResetPasswordError::VerificationFailed(reason) => {
                MarketApiError::VerificationFailed(reason)
            }
            ResetPasswordError::UserNotFound => MarketApiError::UserNotFound,
            ResetPasswordError::Infra(e) => e.into(),
        }
    }
}

impl From<GoodsViewError> for MarketApiError {
    fn from(error: GoodsViewError) -> Self {
        match error {
            GoodsViewError::UserNotFound => MarketApiError::UserNotFound,
            GoodsViewError::Infra(e) => e.into(),
        }
    }
}
