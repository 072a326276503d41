//! Behaviour every cart repository adapter must show.
//!
//! Each check builds its own repository through the supplied constructor so
//! that no state leaks between checks.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::join_all;

use crate::application::ports::outbound::{CartRepositoryPort, RepositoryError};
use crate::domain::errors::CartError;
use crate::domain::value_objects::{CartId, CartItemId};

fn assert_domain<T: std::fmt::Debug>(result: Result<T, RepositoryError>, expected: CartError) {
    match result {
        Err(RepositoryError::Domain(kind)) => assert_eq!(kind, expected),
        other => panic!("expected {expected:?}, got {other:?}"),
    }
}

pub async fn run_all<R, F, Fut>(make: F)
where
    R: CartRepositoryPort,
    F: Fn() -> Fut,
    Fut: Future<Output = R>,
{
    create_then_fetch_is_empty(&make().await).await;
    add_valid_item(&make().await).await;
    add_invalid_item_leaves_cart_unchanged(&make().await).await;
    add_to_missing_cart(&make().await).await;
    add_invalid_to_missing_cart(&make().await).await;
    remove_keeps_order(&make().await).await;
    remove_missing_item(&make().await).await;
    remove_twice(&make().await).await;
    remove_from_missing_cart(&make().await).await;
    shoes_and_hat(&make().await).await;
    delete_then_fetch(&make().await).await;
    delete_missing_cart(&make().await).await;
    carts_are_independent(&make().await).await;
}

async fn create_then_fetch_is_empty<R: CartRepositoryPort>(repo: &R) {
    let created = repo.create_cart().await.unwrap();
    let fetched = repo.cart(created.id()).await.unwrap();

    assert_eq!(fetched.id(), created.id());
    assert!(fetched.items().is_empty());

    let other = repo.create_cart().await.unwrap();
    assert_ne!(other.id(), created.id());
}

async fn add_valid_item<R: CartRepositoryPort>(repo: &R) {
    let cart = repo.create_cart().await.unwrap();

    let item = repo.add_item(cart.id(), "Shoes", 10).await.unwrap();
    assert_eq!(item.cart_id, cart.id());
    assert_eq!(item.product, "Shoes");
    assert_eq!(item.quantity, 10);

    let negative = repo.add_item(cart.id(), "Coupon", -1).await.unwrap();
    assert_eq!(negative.quantity, -1);

    let fetched = repo.cart(cart.id()).await.unwrap();
    assert_eq!(fetched.items(), &[item, negative]);
}

async fn add_invalid_item_leaves_cart_unchanged<R: CartRepositoryPort>(repo: &R) {
    let cart = repo.create_cart().await.unwrap();
    repo.add_item(cart.id(), "Shoes", 1).await.unwrap();
    let before = repo.cart(cart.id()).await.unwrap();

    assert_domain(repo.add_item(cart.id(), "", 1).await, CartError::EmptyProduct);
    assert_domain(repo.add_item(cart.id(), "Hat", 0).await, CartError::ZeroQuantity);
    assert_domain(repo.add_item(cart.id(), "", 0).await, CartError::EmptyProduct);

    assert_eq!(repo.cart(cart.id()).await.unwrap(), before);
}

async fn add_to_missing_cart<R: CartRepositoryPort>(repo: &R) {
    repo.create_cart().await.unwrap();
    assert_domain(
        repo.add_item(CartId::new(), "Shoes", 10).await,
        CartError::CartNotFound,
    );
}

async fn add_invalid_to_missing_cart<R: CartRepositoryPort>(repo: &R) {
    repo.create_cart().await.unwrap();
    assert_domain(repo.add_item(CartId::new(), "", 0).await, CartError::CartNotFound);
    assert_domain(repo.add_item(CartId::new(), "", 5).await, CartError::CartNotFound);
    assert_domain(repo.add_item(CartId::new(), "Hat", 0).await, CartError::CartNotFound);
}

async fn remove_keeps_order<R: CartRepositoryPort>(repo: &R) {
    let cart = repo.create_cart().await.unwrap();
    let mut ids = Vec::new();
    for n in 1..=4 {
        let item = repo.add_item(cart.id(), &format!("Product{n}"), n).await.unwrap();
        ids.push(item.id);
    }

    repo.remove_item(cart.id(), ids[1]).await.unwrap();

    let remaining: Vec<CartItemId> = repo
        .cart(cart.id())
        .await
        .unwrap()
        .items()
        .iter()
        .map(|i| i.id)
        .collect();
    assert_eq!(remaining, vec![ids[0], ids[2], ids[3]]);
}

async fn remove_missing_item<R: CartRepositoryPort>(repo: &R) {
    let cart = repo.create_cart().await.unwrap();
    repo.add_item(cart.id(), "Shoes", 1).await.unwrap();
    let before = repo.cart(cart.id()).await.unwrap();

    assert_domain(
        repo.remove_item(cart.id(), CartItemId::new()).await,
        CartError::NoSuchCartItem,
    );
    assert_eq!(repo.cart(cart.id()).await.unwrap(), before);
}

async fn remove_twice<R: CartRepositoryPort>(repo: &R) {
    let cart = repo.create_cart().await.unwrap();
    let item = repo.add_item(cart.id(), "Shoes", 1).await.unwrap();

    repo.remove_item(cart.id(), item.id).await.unwrap();
    assert_domain(
        repo.remove_item(cart.id(), item.id).await,
        CartError::NoSuchCartItem,
    );
}

async fn remove_from_missing_cart<R: CartRepositoryPort>(repo: &R) {
    assert_domain(
        repo.remove_item(CartId::new(), CartItemId::new()).await,
        CartError::CartNotFound,
    );
}

async fn shoes_and_hat<R: CartRepositoryPort>(repo: &R) {
    let cart = repo.create_cart().await.unwrap();
    let shoes = repo.add_item(cart.id(), "Shoes", 10).await.unwrap();
    repo.add_item(cart.id(), "Hat", 2).await.unwrap();

    repo.remove_item(cart.id(), shoes.id).await.unwrap();

    let fetched = repo.cart(cart.id()).await.unwrap();
    assert_eq!(fetched.items().len(), 1);
    assert_eq!(fetched.items()[0].product, "Hat");
    assert_eq!(fetched.items()[0].quantity, 2);
}

async fn delete_then_fetch<R: CartRepositoryPort>(repo: &R) {
    let cart = repo.create_cart().await.unwrap();
    repo.add_item(cart.id(), "Shoes", 10).await.unwrap();

    repo.delete_cart(cart.id()).await.unwrap();

    assert_domain(repo.cart(cart.id()).await, CartError::CartNotFound);
    assert_domain(
        repo.add_item(cart.id(), "Hat", 1).await,
        CartError::CartNotFound,
    );
}

async fn delete_missing_cart<R: CartRepositoryPort>(repo: &R) {
    assert_domain(repo.delete_cart(CartId::new()).await, CartError::CartNotFound);
}

async fn carts_are_independent<R: CartRepositoryPort>(repo: &R) {
    let first = repo.create_cart().await.unwrap();
    let second = repo.create_cart().await.unwrap();

    repo.add_item(first.id(), "Shoes", 1).await.unwrap();
    repo.delete_cart(second.id()).await.unwrap();

    assert_eq!(repo.cart(first.id()).await.unwrap().items().len(), 1);
}

/// Fire `count` adds at one cart at the same time and check none was lost.
pub async fn concurrent_adds_all_apply<R>(repo: Arc<R>, count: usize)
where
    R: CartRepositoryPort + 'static,
{
    let cart = repo.create_cart().await.unwrap();

    let tasks = (0..count).map(|n| {
        let repo = repo.clone();
        let cart_id = cart.id();
        tokio::spawn(async move { repo.add_item(cart_id, &format!("Product{n}"), 1).await })
    });

    for result in join_all(tasks).await {
        result.unwrap().unwrap();
    }

    let fetched = repo.cart(cart.id()).await.unwrap();
    assert_eq!(fetched.items().len(), count);

    let distinct: HashSet<CartItemId> = fetched.items().iter().map(|i| i.id).collect();
    assert_eq!(distinct.len(), count);
}
