//! # Fleamarket - account and goods API
//!
//! Facade crate that re-exports the public APIs of the fleamarket workspace.
//!
//! ## Structure
//!
//! - **Core domain types**: `MailAddress`, `Password`, `User`, `Good`, `VerificationCode`, etc.
//! - **Ports**: `CodeStore`, `UserRepository`, `GoodsRepository`, `Notifier`, ...
//! - **Use cases**: `VerificationService`, `SignupUseCase`, `LoginUseCase`, goods views
//! - **Adapters**: `RedisCodeStore`, `HashMapUserStore`, `PostmarkNotifier`, `Argon2Hasher`, ...
//! - **Service**: `MarketService`, the axum router and standalone server

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types, value objects and ports
pub mod core {
    pub use fleamarket_core::*;
}

pub use fleamarket_core::{
    Address, CodePurpose, Good, GoodId, GoodsStats, MailAddress, Password, Principal, User,
    UserId, UserName, UserProfile, ValidationError, VerificationCode,
};

// ============================================================================
// Ports
// ============================================================================

pub use fleamarket_core::{
    CodeStore, CodeStoreError, CredentialHasher, GoodsRepository, GoodsRepositoryError, Notifier,
    SessionIssuer, UserRepository, UserRepositoryError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Verification, authentication workflows and goods views
pub mod use_cases {
    pub use fleamarket_application::*;
}

pub use fleamarket_application::{
    GoodsViewUseCase, LoginByCodeUseCase, LoginUseCase, ResetPasswordUseCase, SignupUseCase,
    VerificationService,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP routes and errors
    pub mod http {
        pub use fleamarket_adapters::http::*;
    }

    /// Code stores and in-memory repositories
    pub mod persistence {
        pub use fleamarket_adapters::persistence::*;
    }

    /// Verification code delivery
    pub mod email {
        pub use fleamarket_adapters::email::*;
    }

    /// Password hashing and session tokens
    pub mod auth {
        pub use fleamarket_adapters::auth::*;
    }

    /// Configuration
    pub mod config {
        pub use fleamarket_adapters::config::*;
    }
}

pub use fleamarket_adapters::{
    auth::{Argon2Hasher, JwtSessionIssuer},
    email::{MockNotifier, PostmarkNotifier},
    persistence::{HashMapCodeStore, HashMapGoodsStore, HashMapUserStore, RedisCodeStore},
};

// ============================================================================
// Market Service (Main Entry Point)
// ============================================================================

pub use fleamarket_service::MarketService;

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the ports
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
