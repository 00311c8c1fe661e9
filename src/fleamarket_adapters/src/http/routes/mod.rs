use std::time::Duration;

pub mod error;
pub mod extract;
pub mod goods;
pub mod login;
pub mod login_by_code;
pub mod reset_password;
pub mod signup;
pub mod user_info;
pub mod verification;

pub use error::{ErrorResponse, MarketApiError};
pub use extract::{JsonBody, QueryParams};
pub use goods::{
    GoodResponse, SellerQuery, SellerResponse, bought, favorites, sales, selling, sold, stats,
};
pub use login::{LoginRequest, login};
pub use login_by_code::{LoginByCodeRequest, login_by_code};
pub use reset_password::{ResetPasswordRequest, reset_password};
pub use signup::{SignupRequest, signup};
pub use user_info::UserInfoResponse;
pub use verification::{VerificationRequest, VerificationResponse, verification};

/// Upper bound for each repository call a handler makes.
#[derive(Debug, Clone, Copy)]
pub struct CollaboratorTimeout(pub Duration);

#[derive(serde::Serialize, serde::Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
