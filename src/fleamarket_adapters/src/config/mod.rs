pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{
    AllowedOrigins, AppSettings, EmailClientSettings, MarketSettings, RedisSettings,
    SessionSettings, VerificationSettings,
};
