//! Pure views over a user's goods. Nothing here does I/O; the collections
//! come fully loaded from a `GoodsRepository`.

use fleamarket_core::{Good, GoodsStats};

/// Listings still on the market.
pub fn selling(sales: Vec<Good>) -> Vec<Good> {
    sales.into_iter().filter(|good| !good.is_bought).collect()
}

/// Listings somebody has bought.
pub fn sold(sales: Vec<Good>) -> Vec<Good> {
    sales.into_iter().filter(|good| good.is_bought).collect()
}

/// All of a user's good relations, as loaded for the stats view.
#[derive(Debug, Clone, Default)]
pub struct UserGoods {
    pub sales: Vec<Good>,
    pub favorites: Vec<Good>,
    pub bought: Vec<Good>,
}

impl UserGoods {
    pub fn stats(&self) -> GoodsStats {
        let sold_number = self.sales.iter().filter(|good| good.is_bought).count();
        GoodsStats {
            sale_number: self.sales.len() - sold_number,
            sold_number,
            buy_number: self.bought.len(),
            favor_number: self.favorites.len(),
        }
    }
}
