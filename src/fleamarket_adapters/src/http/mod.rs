pub mod principal;
pub mod routes;

pub use principal::authenticate;
