pub mod classifier;
pub mod error;
pub mod use_cases;
pub mod verification;

#[cfg(test)]
pub(crate) mod test_support;

pub use classifier::UserGoods;
pub use error::{InfraError, VerificationFailure};
pub use use_cases::{
    AuthenticatedUser, GoodsViewError, GoodsViewUseCase, LoginByCodeError, LoginByCodeUseCase,
    LoginError, LoginUseCase, ResetPasswordError, ResetPasswordUseCase, SignupError, SignupForm,
    SignupUseCase,
};
pub use verification::{
    DEFAULT_CODE_TTL, IssueCodeError, IssuedCode, ValidateCodeError, VerificationService,
};
