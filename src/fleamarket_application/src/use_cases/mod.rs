pub mod goods_views;
pub mod login;
pub mod login_by_code;
pub mod reset_password;
pub mod signup;

// Re-export for convenience
pub use goods_views::{GoodsViewError, GoodsViewUseCase};
pub use login::{AuthenticatedUser, LoginError, LoginUseCase};
pub use login_by_code::{LoginByCodeError, LoginByCodeUseCase};
pub use reset_password::{ResetPasswordError, ResetPasswordUseCase};
pub use signup::{SignupError, SignupForm, SignupUseCase};
