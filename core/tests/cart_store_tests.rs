// tests/cart_store_tests.rs
mod common;

use common::*;
use rust_decimal::Decimal;
use serial_test::serial;
use std::sync::Arc;
use storefront::store::MAX_PENDING_NOTICES;
use storefront::{
  CategoryFilter, MemoryCatalog, Product, ProductId, QuantityChange, ResolvedFrom, Storefront,
};

fn shop_with(products: Vec<Product>) -> (Arc<MemoryCatalog>, Storefront) {
  let catalog = Arc::new(MemoryCatalog::new(products));
  let shop = Storefront::new(catalog.clone());
  (catalog, shop)
}

#[tokio::test]
#[serial]
async fn test_first_add_creates_line_with_quantity_one() {
  setup_tracing();
  let (_, shop) = shop_with(vec![Product::new(1, "Backpack", Decimal::new(999, 2))]);

  let outcome = shop.add_item(ProductId(1)).await.unwrap();

  assert_eq!(outcome.quantity, 1);
  assert!(outcome.is_new_line());
  let cart = shop.cart();
  assert_eq!(cart.len(), 1);
  assert_eq!(cart.lines()[0].quantity, 1);
  assert_eq!(shop.total_price(), Decimal::new(999, 2));
}

#[tokio::test]
#[serial]
async fn test_second_add_increments_existing_line() {
  setup_tracing();
  let (catalog, shop) = shop_with(vec![Product::new(1, "Backpack", Decimal::new(999, 2))]);

  shop.add_item(ProductId(1)).await.unwrap();
  let outcome = shop.add_item(ProductId(1)).await.unwrap();

  assert_eq!(outcome.quantity, 2);
  assert_eq!(outcome.source, ResolvedFrom::Existing);
  assert_eq!(shop.cart().len(), 1);
  assert_eq!(shop.total_price(), Decimal::new(1998, 2));
  // The second add never needed the catalog.
  assert_eq!(catalog.lookups(), 1);
}

#[tokio::test]
#[serial]
async fn test_decrement_to_zero_removes_line() {
  setup_tracing();
  let (_, shop) = shop_with(fixture_products());
  shop.add_item(ProductId(1)).await.unwrap();

  let change = shop.update_quantity(ProductId(1), -1);

  assert_eq!(change, QuantityChange::Removed);
  assert!(shop.line(ProductId(1)).is_none());
  assert_eq!(shop.total_count(), 0);
}

#[tokio::test]
#[serial]
async fn test_negative_quantity_delta_equal_to_quantity_removes_line() {
  setup_tracing();
  let (_, shop) = shop_with(fixture_products());
  for _ in 0..3 {
    shop.add_item(ProductId(2)).await.unwrap();
  }

  let quantity = shop.line(ProductId(2)).unwrap().quantity;
  assert_eq!(shop.update_quantity(ProductId(2), -i64::from(quantity)), QuantityChange::Removed);
  assert!(shop.cart().is_empty());
}

#[tokio::test]
#[serial]
async fn test_update_quantity_keeps_line_above_zero() {
  setup_tracing();
  let (_, shop) = shop_with(fixture_products());
  shop.add_item(ProductId(5)).await.unwrap();

  assert_eq!(shop.update_quantity(ProductId(5), 1), QuantityChange::Updated { quantity: 2 });
  assert_eq!(shop.update_quantity(ProductId(5), -1), QuantityChange::Updated { quantity: 1 });
  assert_eq!(shop.update_quantity(ProductId(404), 1), QuantityChange::Missing);
  assert_eq!(shop.total_count(), 1);
}

#[tokio::test]
#[serial]
async fn test_remove_keeps_relative_order_of_remaining_lines() {
  setup_tracing();
  let (_, shop) = shop_with(fixture_products());
  shop.add_item(ProductId(1)).await.unwrap();
  shop.add_item(ProductId(2)).await.unwrap();
  shop.add_item(ProductId(9)).await.unwrap();

  assert!(shop.remove_item(ProductId(1)));

  let ids: Vec<ProductId> = shop.cart().lines().iter().map(|l| l.id()).collect();
  assert_eq!(ids, vec![ProductId(2), ProductId(9)]);
}

#[tokio::test]
#[serial]
async fn test_remove_is_idempotent() {
  setup_tracing();
  let (_, shop) = shop_with(fixture_products());
  shop.add_item(ProductId(1)).await.unwrap();
  shop.add_item(ProductId(2)).await.unwrap();

  assert!(shop.remove_item(ProductId(1)));
  let once = shop.cart();
  assert!(!shop.remove_item(ProductId(1)));
  assert_eq!(shop.cart(), once);
}

#[tokio::test]
#[serial]
async fn test_total_price_is_monotonic_under_add() {
  setup_tracing();
  let (_, shop) = shop_with(fixture_products());
  let mut previous = shop.total_price();
  assert_eq!(previous, Decimal::ZERO);

  for id in [1, 2, 1, 5, 9, 2, 2] {
    shop.add_item(ProductId(id)).await.unwrap();
    let total = shop.total_price();
    assert!(total >= previous, "total went from {} to {}", previous, total);
    previous = total;
  }

  let expected: Decimal = shop.cart().lines().iter().map(|l| l.line_total()).sum();
  assert_eq!(shop.total_price(), expected.round_dp(2));
}

#[tokio::test]
#[serial]
async fn test_mixed_mutations_preserve_invariants() {
  setup_tracing();
  let (_, shop) = shop_with(fixture_products());
  shop.load_products(CategoryFilter::All).await.unwrap();

  // A fixed but irregular sequence of user actions.
  let script: &[(u8, u64, i64)] = &[
    (0, 1, 0),
    (0, 2, 0),
    (1, 1, 3),
    (0, 5, 0),
    (2, 2, 0),
    (1, 5, -1),
    (0, 1, 0),
    (1, 9, 1),
    (0, 9, 0),
    (1, 1, -2),
    (2, 404, 0),
    (0, 2, 0),
    (1, 1, -10),
  ];

  for &(op, id, delta) in script {
    let id = ProductId(id);
    match op {
      0 => {
        shop.add_item(id).await.unwrap();
      }
      1 => {
        shop.update_quantity(id, delta);
      }
      _ => {
        shop.remove_item(id);
      }
    }
    assert_cart_invariants(&shop);
  }

  let ids: Vec<ProductId> = shop.cart().lines().iter().map(|l| l.id()).collect();
  assert_eq!(ids, vec![ProductId(9), ProductId(2)]);
}

#[tokio::test]
#[serial]
async fn test_mutations_bump_revision_and_adds_issue_notices() {
  setup_tracing();
  let (_, shop) = shop_with(fixture_products());
  let start = shop.revision();

  shop.add_item(ProductId(1)).await.unwrap();
  shop.add_item(ProductId(1)).await.unwrap();
  shop.update_quantity(ProductId(1), -1);
  shop.remove_item(ProductId(1));

  assert_eq!(shop.revision(), start + 4);
  let messages: Vec<String> = shop.take_notices().into_iter().map(|n| n.message).collect();
  assert_eq!(messages, vec!["Added to cart!", "Quantity updated in cart!"]);
  assert!(shop.take_notices().is_empty());
}

#[tokio::test]
#[serial]
async fn test_undrained_notices_keep_only_the_latest() {
  setup_tracing();
  let (_, shop) = shop_with(fixture_products());

  shop.add_item(ProductId(1)).await.unwrap();
  for _ in 0..199 {
    shop.add_item(ProductId(1)).await.unwrap();
  }

  let notices = shop.take_notices();
  assert_eq!(notices.len(), MAX_PENDING_NOTICES);
  // The "Added to cart!" notice from the first add was the oldest and is gone.
  assert!(notices.iter().all(|n| n.message == "Quantity updated in cart!"));
  assert_eq!(shop.line(ProductId(1)).unwrap().quantity, 200);
}
