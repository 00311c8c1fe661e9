use fleamarket_core::{GoodId, UserId};
use serde_json::Value;

use crate::helpers::{TestApp, token_for};

/// Seller lists ten goods; the buyer buys four and favorites two.
async fn market() -> (TestApp, (u64, String), (u64, String)) {
    let app = TestApp::new().await;
    let seller = app.registered_user("seller@example.com", "seller").await;
    let buyer = app.registered_user("buyer@example.com", "buyer").await;

    let mut listed: Vec<GoodId> = Vec::new();
    for i in 0..10 {
        let good = app
            .goods
            .list_good(UserId::new(seller.0), format!("good {i}"), 100 * (i + 1), "")
            .await;
        listed.push(good.id);
    }
    for id in &listed[..4] {
        assert!(app.goods.purchase(UserId::new(buyer.0), *id).await.is_some());
    }
    for id in &listed[8..] {
        assert!(app.goods.add_favorite(UserId::new(buyer.0), *id).await);
    }

    (app, seller, buyer)
}

async fn goods(response: reqwest::Response) -> Vec<Value> {
    assert_eq!(response.status().as_u16(), 200);
    response.json().await.unwrap()
}

#[tokio::test]
async fn sales_lists_every_listing_with_its_seller() {
    let (app, seller, _) = market().await;

    let sales = goods(app.get(&format!("/goods/sales?user_id={}", seller.0), None).await).await;

    assert_eq!(sales.len(), 10);
    assert!(sales.iter().all(|good| good["seller"]["id"] == seller.0));
    assert!(sales.iter().all(|good| good["seller"]["user_name"] == "seller"));
}

#[tokio::test]
async fn selling_lists_only_unsold_goods() {
    let (app, seller, _) = market().await;

    let selling =
        goods(app.get(&format!("/goods/selling?user_id={}", seller.0), None).await).await;

    assert_eq!(selling.len(), 6);
    assert!(selling.iter().all(|good| good["is_bought"] == false));
}

#[tokio::test]
async fn missing_user_id_is_a_bad_request() {
    let (app, _, _) = market().await;

    let response = app.get("/goods/sales", None).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid input"));
}

#[tokio::test]
async fn non_numeric_user_id_is_a_bad_request() {
    let (app, _, _) = market().await;

    let response = app.get("/goods/selling?user_id=seller", None).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid input"));
}

#[tokio::test]
async fn private_views_require_a_token() {
    let (app, _, _) = market().await;

    for path in ["/goods/sold", "/goods/favorites", "/goods/bought", "/goods/stats"] {
        assert_eq!(app.get(path, None).await.status().as_u16(), 401);
        assert_eq!(
            app.get(path, Some("not-a-token")).await.status().as_u16(),
            401
        );
    }
}

#[tokio::test]
async fn token_of_a_vanished_user_is_not_found() {
    let (app, seller, _) = market().await;
    let token = token_for(999);

    for path in ["/goods/sold", "/goods/favorites", "/goods/bought", "/goods/stats"] {
        let response = app.get(path, Some(&token)).await;
        assert_eq!(response.status().as_u16(), 404, "{path}");
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "User not found");
    }

    // The same signature still works for a registered user.
    let response = app.get("/goods/sold", Some(&token_for(seller.0))).await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn sold_view_belongs_to_the_bearer() {
    let (app, seller, buyer) = market().await;

    let sold = goods(app.get("/goods/sold", Some(&seller.1)).await).await;
    assert_eq!(sold.len(), 4);
    assert!(sold.iter().all(|good| good["is_bought"] == true));

    let buyer_sold = goods(app.get("/goods/sold", Some(&buyer.1)).await).await;
    assert!(buyer_sold.is_empty());
}

#[tokio::test]
async fn bought_and_favorites_are_returned_as_stored() {
    let (app, _, buyer) = market().await;

    let bought = goods(app.get("/goods/bought", Some(&buyer.1)).await).await;
    assert_eq!(bought.len(), 4);

    let favorites = goods(app.get("/goods/favorites", Some(&buyer.1)).await).await;
    assert_eq!(favorites.len(), 2);
    assert_eq!(favorites[0]["name"], "good 8");
}

#[tokio::test]
async fn stats_count_the_views() {
    let (app, seller, buyer) = market().await;

    let response = app.get("/goods/stats", Some(&seller.1)).await;
    assert_eq!(response.status().as_u16(), 200);
    let stats: Value = response.json().await.unwrap();
    assert_eq!(stats["sale_number"], 6);
    assert_eq!(stats["sold_number"], 4);
    assert_eq!(stats["buy_number"], 0);
    assert_eq!(stats["favor_number"], 0);

    let stats: Value = app
        .get("/goods/stats", Some(&buyer.1))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(stats["sale_number"], 0);
    assert_eq!(stats["buy_number"], 4);
    assert_eq!(stats["favor_number"], 2);
}
