use thiserror::Error;

/// Rejections raised while parsing caller input into domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid mail address")]
    InvalidMailAddress,
    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },
    #[error("User name must be between 1 and {max} characters")]
    InvalidUserName { max: usize },
    #[error("Verification code must be {length} digits")]
    InvalidVerificationCode { length: usize },
    #[error("Unknown verification code type: {0}")]
    UnknownPurpose(String),
    #[error("Address must have exactly 4 non-empty parts, got {parts}")]
    MalformedAddress { parts: usize },
}
