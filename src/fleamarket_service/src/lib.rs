pub mod market_service;
pub mod tracing;

pub use market_service::MarketService;
