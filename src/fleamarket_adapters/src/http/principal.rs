use axum::http::{HeaderMap, header::AUTHORIZATION};
use fleamarket_core::{Principal, SessionIssuer};

use super::routes::MarketApiError;

const BEARER_PREFIX: &str = "Bearer ";

/// Resolve the `Authorization: Bearer <token>` header to a principal.
pub fn authenticate<S>(session_issuer: &S, headers: &HeaderMap) -> Result<Principal, MarketApiError>
where
    S: SessionIssuer,
{
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(MarketApiError::MissingToken)?;

    let token = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(MarketApiError::InvalidToken)?;

    Ok(session_issuer.authenticate(token)?)
}
