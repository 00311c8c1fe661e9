use std::collections::HashMap;

use axum::{
    Json,
    extract::State,
    http::HeaderMap,
    response::IntoResponse,
};
use fleamarket_application::GoodsViewUseCase;
use fleamarket_core::{
    Good, GoodId, GoodsRepository, SessionIssuer, UserId, UserRepository, UserRepositoryError,
};
use serde::{Deserialize, Serialize};

use super::{CollaboratorTimeout, error::MarketApiError, extract::QueryParams};
use crate::http::principal::authenticate;

#[derive(Debug, Deserialize)]
pub struct SellerQuery {
    pub user_id: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SellerResponse {
    pub id: UserId,
    /// `None` when the seller account no longer resolves.
    pub user_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GoodResponse {
    pub id: GoodId,
    pub name: String,
    pub price: u64,
    pub description: String,
    pub is_bought: bool,
    pub seller: SellerResponse,
}

#[tracing::instrument(name = "Sales goods", skip_all)]
pub async fn sales<G, U>(
    State((goods_repository, user_repository, timeout)): State<(G, U, CollaboratorTimeout)>,
    QueryParams(query): QueryParams<SellerQuery>,
) -> Result<impl IntoResponse, MarketApiError>
where
    G: GoodsRepository + Clone + 'static,
    U: UserRepository + Clone + 'static,
{
    let goods = GoodsViewUseCase::new(&goods_repository, &user_repository)
        .with_timeout(timeout.0)
        .sales_view(UserId::new(query.user_id))
        .await?;

    Ok(Json(with_sellers(&user_repository, goods, timeout).await?))
}

#[tracing::instrument(name = "Selling goods", skip_all)]
pub async fn selling<G, U>(
    State((goods_repository, user_repository, timeout)): State<(G, U, CollaboratorTimeout)>,
    QueryParams(query): QueryParams<SellerQuery>,
) -> Result<impl IntoResponse, MarketApiError>
where
    G: GoodsRepository + Clone + 'static,
    U: UserRepository + Clone + 'static,
{
    let goods = GoodsViewUseCase::new(&goods_repository, &user_repository)
        .with_timeout(timeout.0)
        .selling_view(UserId::new(query.user_id))
        .await?;

    Ok(Json(with_sellers(&user_repository, goods, timeout).await?))
}

#[tracing::instrument(name = "Sold goods", skip_all)]
pub async fn sold<G, U, S>(
    State((goods_repository, user_repository, session_issuer, timeout)): State<(
        G,
        U,
        S,
        CollaboratorTimeout,
    )>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, MarketApiError>
where
    G: GoodsRepository + Clone + 'static,
    U: UserRepository + Clone + 'static,
    S: SessionIssuer + Clone + 'static,
{
    let principal = authenticate(&session_issuer, &headers)?;
    let goods = GoodsViewUseCase::new(&goods_repository, &user_repository)
        .with_timeout(timeout.0)
        .sold_view(&principal)
        .await?;

    Ok(Json(with_sellers(&user_repository, goods, timeout).await?))
}

#[tracing::instrument(name = "Favorite goods", skip_all)]
pub async fn favorites<G, U, S>(
    State((goods_repository, user_repository, session_issuer, timeout)): State<(
        G,
        U,
        S,
        CollaboratorTimeout,
    )>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, MarketApiError>
where
    G: GoodsRepository + Clone + 'static,
    U: UserRepository + Clone + 'static,
    S: SessionIssuer + Clone + 'static,
{
    let principal = authenticate(&session_issuer, &headers)?;
    let goods = GoodsViewUseCase::new(&goods_repository, &user_repository)
        .with_timeout(timeout.0)
        .favorites_view(&principal)
        .await?;

    Ok(Json(with_sellers(&user_repository, goods, timeout).await?))
}

#[tracing::instrument(name = "Bought goods", skip_all)]
pub async fn bought<G, U, S>(
    State((goods_repository, user_repository, session_issuer, timeout)): State<(
        G,
        U,
        S,
        CollaboratorTimeout,
    )>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, MarketApiError>
where
    G: GoodsRepository + Clone + 'static,
    U: UserRepository + Clone + 'static,
    S: SessionIssuer + Clone + 'static,
{
    let principal = authenticate(&session_issuer, &headers)?;
    let goods = GoodsViewUseCase::new(&goods_repository, &user_repository)
        .with_timeout(timeout.0)
        .bought_view(&principal)
        .await?;

    Ok(Json(with_sellers(&user_repository, goods, timeout).await?))
}

#[tracing::instrument(name = "Goods stats", skip_all)]
pub async fn stats<G, U, S>(
    State((goods_repository, user_repository, session_issuer, timeout)): State<(
        G,
        U,
        S,
        CollaboratorTimeout,
    )>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, MarketApiError>
where
    G: GoodsRepository + Clone + 'static,
    U: UserRepository + Clone + 'static,
    S: SessionIssuer + Clone + 'static,
{
    let principal = authenticate(&session_issuer, &headers)?;
    let stats = GoodsViewUseCase::new(&goods_repository, &user_repository)
        .with_timeout(timeout.0)
        .stats(&principal)
        .await?;

    Ok(Json(stats))
}

/// Attach each good's seller id and name, looking every seller up once.
async fn with_sellers<U>(
    user_repository: &U,
    goods: Vec<Good>,
    timeout: CollaboratorTimeout,
) -> Result<Vec<GoodResponse>, MarketApiError>
where
    U: UserRepository,
{
    let mut seller_names: HashMap<UserId, Option<String>> = HashMap::new();

    for good in &goods {
        if seller_names.contains_key(&good.seller_id) {
            continue;
        }

        let lookup = tokio::time::timeout(timeout.0, user_repository.find_by_id(good.seller_id))
            .await
            .map_err(|_| {
                MarketApiError::ServiceUnavailable(format!(
                    "seller lookup took longer than {:?}",
                    timeout.0
                ))
            })?;

        let name = match lookup {
            Ok(seller) => Some(seller.name().as_str().to_owned()),
            Err(UserRepositoryError::NotFound) => None,
            Err(e) => return Err(e.into()),
        };
        seller_names.insert(good.seller_id, name);
    }

    Ok(goods
        .into_iter()
        .map(|good| {
            let user_name = seller_names.get(&good.seller_id).cloned().flatten();
            GoodResponse {
                id: good.id,
                name: good.name,
                price: good.price,
                description: good.description,
                is_bought: good.is_bought,
                seller: SellerResponse {
                    id: good.seller_id,
                    user_name,
                },
            }
        })
        .collect())
}
