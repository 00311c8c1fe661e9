pub mod address;
pub mod good;
pub mod mail_address;
pub mod password;
pub mod session;
pub mod user;
pub mod validation_error;
pub mod verification_code;
