use std::time::Duration;

use fleamarket_core::{
    Good, GoodsRepository, GoodsRepositoryError, GoodsStats, Principal, UserId, UserRepository,
    UserRepositoryError,
};

use crate::classifier::{self, UserGoods};
use crate::error::{InfraError, within};

#[derive(Debug, thiserror::Error)]
pub enum GoodsViewError {
    #[error("User not found")]
    UserNotFound,
    #[error("Infrastructure error: {0}")]
    Infra(#[from] InfraError),
}

impl From<UserRepositoryError> for GoodsViewError {
    fn from(error: UserRepositoryError) -> Self {
        match error {
            UserRepositoryError::NotFound => Self::UserNotFound,
            other => Self::Infra(other.into()),
        }
    }
}

impl From<GoodsRepositoryError> for GoodsViewError {
    fn from(error: GoodsRepositoryError) -> Self {
        match error {
            GoodsRepositoryError::UserNotFound => Self::UserNotFound,
            other => Self::Infra(other.into()),
        }
    }
}

/// Loads a user's goods relations and shapes them through the classifier.
///
/// Sales and selling views are public and take any user id. The sold,
/// favorites, bought and stats views belong to the authenticated principal,
/// who must still exist in the user repository.
pub struct GoodsViewUseCase<'a, G, U> {
    goods_repository: &'a G,
    user_repository: &'a U,
    timeout: Option<Duration>,
}

impl<'a, G, U> GoodsViewUseCase<'a, G, U>
where
    G: GoodsRepository,
    U: UserRepository,
{
    pub fn new(goods_repository: &'a G, user_repository: &'a U) -> Self {
        Self {
            goods_repository,
            user_repository,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[tracing::instrument(name = "GoodsViewUseCase::sales", skip(self))]
    pub async fn sales_view(&self, user_id: UserId) -> Result<Vec<Good>, GoodsViewError> {
        self.load_sales(user_id).await
    }

    #[tracing::instrument(name = "GoodsViewUseCase::selling", skip(self))]
    pub async fn selling_view(&self, user_id: UserId) -> Result<Vec<Good>, GoodsViewError> {
        Ok(classifier::selling(self.load_sales(user_id).await?))
    }

    #[tracing::instrument(name = "GoodsViewUseCase::sold", skip_all)]
    pub async fn sold_view(&self, principal: &Principal) -> Result<Vec<Good>, GoodsViewError> {
        let user_id = self.resolve(principal).await?;
        Ok(classifier::sold(self.load_sales(user_id).await?))
    }

    #[tracing::instrument(name = "GoodsViewUseCase::favorites", skip_all)]
    pub async fn favorites_view(
        &self,
        principal: &Principal,
    ) -> Result<Vec<Good>, GoodsViewError> {
        let user_id = self.resolve(principal).await?;
        self.load_favorites(user_id).await
    }

    #[tracing::instrument(name = "GoodsViewUseCase::bought", skip_all)]
    pub async fn bought_view(&self, principal: &Principal) -> Result<Vec<Good>, GoodsViewError> {
        let user_id = self.resolve(principal).await?;
        self.load_bought(user_id).await
    }

    #[tracing::instrument(name = "GoodsViewUseCase::stats", skip_all)]
    pub async fn stats(&self, principal: &Principal) -> Result<GoodsStats, GoodsViewError> {
        let user_id = self.resolve(principal).await?;
        let (sales, favorites, bought) = tokio::try_join!(
            self.load_sales(user_id),
            self.load_favorites(user_id),
            self.load_bought(user_id),
        )?;

        Ok(UserGoods {
            sales,
            favorites,
            bought,
        }
        .stats())
    }

    // A valid token can outlive its user.
    async fn resolve(&self, principal: &Principal) -> Result<UserId, GoodsViewError> {
        let user = within(
            self.timeout,
            self.user_repository.find_by_id(principal.user_id),
        )
        .await??;
        Ok(user.id())
    }

    async fn load_sales(&self, user_id: UserId) -> Result<Vec<Good>, GoodsViewError> {
        Ok(within(
            self.timeout,
            self.goods_repository.find_goods_by_seller(user_id),
        )
        .await??)
    }

    async fn load_favorites(&self, user_id: UserId) -> Result<Vec<Good>, GoodsViewError> {
        Ok(within(
            self.timeout,
            self.goods_repository.load_favorites(user_id),
        )
        .await??)
    }

    async fn load_bought(&self, user_id: UserId) -> Result<Vec<Good>, GoodsViewError> {
        Ok(within(self.timeout, self.goods_repository.load_bought(user_id)).await??)
    }
}
