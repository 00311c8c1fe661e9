use serde::{Deserialize, Serialize};

use super::user::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoodId(u64);

impl GoodId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A listing. `seller_id` is a lookup reference, not ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Good {
    pub id: GoodId,
    pub seller_id: UserId,
    pub name: String,
    pub price: u64,
    pub description: String,
    pub is_bought: bool,
}

/// Per-user counters over the goods views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoodsStats {
    /// Listings still on the market.
    pub sale_number: usize,
    pub sold_number: usize,
    pub buy_number: usize,
    pub favor_number: usize,
}
