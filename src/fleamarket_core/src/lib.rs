pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    address::Address,
    good::{Good, GoodId, GoodsStats},
    mail_address::MailAddress,
    password::{HashedPassword, Password},
    session::{Principal, SessionToken},
    user::{NewUser, Profile, User, UserId, UserName, UserProfile},
    validation_error::ValidationError,
    verification_code::{CodeKey, CodePurpose, VerificationCode},
};

pub use ports::{
    repositories::{
        CodeMatch, CodeStore, CodeStoreError, GoodsRepository, GoodsRepositoryError, UniqueField,
        UserRepository, UserRepositoryError,
    },
    services::{
        CredentialHasher, CredentialHasherError, DeliveryError, Notifier, SessionError,
        SessionIssuer,
    },
};
