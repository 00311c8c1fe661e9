use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use fleamarket_core::{Good, GoodId, GoodsRepository, GoodsRepositoryError, UserId};

#[derive(Default)]
struct GoodsTable {
    goods: BTreeMap<GoodId, Good>,
    favorites: HashMap<UserId, Vec<GoodId>>,
    bought: HashMap<UserId, Vec<GoodId>>,
    next_id: u64,
}

impl GoodsTable {
    fn resolve(&self, ids: Option<&Vec<GoodId>>) -> Vec<Good> {
        ids.into_iter()
            .flatten()
            .filter_map(|id| self.goods.get(id).cloned())
            .collect()
    }
}

/// In-process goods repository. Listing, buying and favoriting happen
/// outside the core; they are exposed here to populate the store.
#[derive(Default, Clone)]
pub struct HashMapGoodsStore {
    table: Arc<RwLock<GoodsTable>>,
}

impl HashMapGoodsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list_good(
        &self,
        seller_id: UserId,
        name: impl Into<String>,
        price: u64,
        description: impl Into<String>,
    ) -> Good {
        let mut table = self.table.write().await;
        table.next_id += 1;
        let good = Good {
            id: GoodId::new(table.next_id),
            seller_id,
            name: name.into(),
            price,
            description: description.into(),
            is_bought: false,
        };
        table.goods.insert(good.id, good.clone());
        good
    }

    /// Marks the good bought and records it in the buyer's purchases.
    /// `None` when the good does not exist or is already sold.
    pub async fn purchase(&self, buyer_id: UserId, good_id: GoodId) -> Option<Good> {
        let mut table = self.table.write().await;
        let good = table.goods.get_mut(&good_id).filter(|good| !good.is_bought)?;
        good.is_bought = true;
        let good = good.clone();
        table.bought.entry(buyer_id).or_default().push(good_id);
        Some(good)
    }

    /// `false` when the good does not exist or is already a favorite.
    pub async fn add_favorite(&self, user_id: UserId, good_id: GoodId) -> bool {
        let mut table = self.table.write().await;
        if !table.goods.contains_key(&good_id) {
            return false;
        }
        let favorites = table.favorites.entry(user_id).or_default();
        if favorites.contains(&good_id) {
            return false;
        }
        favorites.push(good_id);
        true
    }
}

#[async_trait::async_trait]
impl GoodsRepository for HashMapGoodsStore {
    async fn find_goods_by_seller(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Good>, GoodsRepositoryError> {
        let table = self.table.read().await;
        Ok(table
            .goods
            .values()
            .filter(|good| good.seller_id == user_id)
            .cloned()
            .collect())
    }

    async fn load_favorites(&self, user_id: UserId) -> Result<Vec<Good>, GoodsRepositoryError> {
        let table = self.table.read().await;
        Ok(table.resolve(table.favorites.get(&user_id)))
    }

    async fn load_bought(&self, user_id: UserId) -> Result<Vec<Good>, GoodsRepositoryError> {
        let table = self.table.read().await;
        Ok(table.resolve(table.bought.get(&user_id)))
    }
}
