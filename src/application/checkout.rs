//! The checkout orchestrator: turns a cart into a persisted order plus
//! inventory decrements, all inside one database transaction.

use std::collections::BTreeMap;

use bigdecimal::BigDecimal;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{CartItem, CheckoutReceipt, OrderView};
use crate::infrastructure::models::{NewOrderItemRow, NewOrderRow};
use crate::infrastructure::{inventory, orders};

const ORDER_STATUS_PENDING: &str = "pending";
// Shipping is out of scope; every order ships to the warehouse default.
const SHIPPING_ADDRESS: &str = "Seattle, WA";

#[derive(Clone)]
pub struct CheckoutService {
    pool: DbPool,
}

impl CheckoutService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Convert a cart into an order.
    ///
    /// Either everything applies (every reservation, the order header, and
    /// every line item) or the transaction rolls back and nothing is visible
    /// to other readers. Product rows are locked in ascending id order before
    /// any mutation; lines are validated in input order so error reporting is
    /// deterministic.
    pub fn checkout(
        &self,
        user_id: Option<i32>,
        items: &[CartItem],
    ) -> Result<CheckoutReceipt, DomainError> {
        let user_id = user_id.ok_or(DomainError::MissingIdentity)?;
        if items.is_empty() {
            return Err(DomainError::EmptyCart);
        }
        if items.iter().any(|i| i.quantity <= 0) {
            return Err(DomainError::InvalidQuantity);
        }

        let mut conn = self.pool.get()?;
        conn.transaction::<_, DomainError, _>(|conn| {
            let mut product_ids: Vec<i32> = items.iter().map(|i| i.product_id).collect();
            product_ids.sort_unstable();
            product_ids.dedup();

            let mut locked = BTreeMap::new();
            for id in product_ids {
                if let Some(product) = inventory::lock_product(conn, id)? {
                    locked.insert(id, product);
                }
            }

            // Validate against the locked rows and price each line.
            let mut total = BigDecimal::from(0);
            let mut unit_prices = Vec::with_capacity(items.len());
            for item in items {
                let product = locked
                    .get(&item.product_id)
                    .ok_or(DomainError::ProductNotFound(item.product_id))?;
                if product.quantity <= 0 {
                    return Err(DomainError::OutOfStock {
                        name: product.name.clone(),
                    });
                }
                if item.quantity > product.quantity {
                    return Err(DomainError::InsufficientStock {
                        name: product.name.clone(),
                        available: product.quantity,
                    });
                }
                total += product.price.clone() * BigDecimal::from(item.quantity);
                unit_prices.push(product.price.clone());
            }

            for item in items {
                inventory::reserve_stock(conn, item.product_id, item.quantity)?;
            }

            let order_id = orders::insert_order(
                conn,
                NewOrderRow {
                    user_id,
                    total: total.clone(),
                    status: ORDER_STATUS_PENDING.to_string(),
                    address: SHIPPING_ADDRESS.to_string(),
                },
            )?;
            for (item, unit_price) in items.iter().zip(unit_prices) {
                orders::insert_order_item(
                    conn,
                    NewOrderItemRow {
                        order_id,
                        product_id: item.product_id,
                        quantity: item.quantity,
                        unit_price,
                    },
                )?;
            }

            log::info!(
                "checkout committed: order {} for user {} ({} lines)",
                order_id,
                user_id,
                items.len()
            );
            Ok(CheckoutReceipt { order_id, total })
        })
    }

    pub fn find_order(&self, id: i32) -> Result<Option<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;
        orders::find_by_id(&mut conn, id)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;

    use super::CheckoutService;
    use crate::domain::errors::DomainError;
    use crate::domain::order::CartItem;
    use crate::test_support::{order_count, product_quantity, seed_product, seed_user, setup_db};

    fn line(product_id: i32, quantity: i32) -> CartItem {
        CartItem {
            product_id,
            quantity,
        }
    }

    #[tokio::test]
    async fn checkout_succeeds_and_records_order_with_items() {
        let (_container, pool) = setup_db().await;
        let user_id = seed_user(&pool, "buyer@example.com");
        let product_id = seed_product(&pool, "ssd", "10.00", 100);
        let service = CheckoutService::new(pool.clone());

        let receipt = service
            .checkout(Some(user_id), &[line(product_id, 2)])
            .expect("checkout failed");

        assert_eq!(receipt.total, BigDecimal::from_str("20.00").expect("decimal"));
        assert_eq!(product_quantity(&pool, product_id), 98);

        let order = service
            .find_order(receipt.order_id)
            .expect("fetch failed")
            .expect("order should exist");
        assert_eq!(order.user_id, user_id);
        assert_eq!(order.status, "pending");
        assert_eq!(order.total, receipt.total);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].product_id, product_id);
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(
            order.items[0].unit_price,
            BigDecimal::from_str("10.00").expect("decimal")
        );
    }

    #[tokio::test]
    async fn checkout_with_insufficient_stock_mutates_nothing() {
        let (_container, pool) = setup_db().await;
        let user_id = seed_user(&pool, "buyer@example.com");
        let product_id = seed_product(&pool, "gpu", "999.00", 5);
        let service = CheckoutService::new(pool.clone());

        let err = service
            .checkout(Some(user_id), &[line(product_id, 10)])
            .expect_err("should fail");

        match err {
            DomainError::InsufficientStock { name, available } => {
                assert_eq!(name, "gpu");
                assert_eq!(available, 5);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(product_quantity(&pool, product_id), 5);
        assert_eq!(order_count(&pool), 0);
    }

    #[tokio::test]
    async fn checkout_rejects_empty_cart() {
        let (_container, pool) = setup_db().await;
        let user_id = seed_user(&pool, "buyer@example.com");
        let service = CheckoutService::new(pool.clone());

        let err = service.checkout(Some(user_id), &[]).expect_err("should fail");

        assert!(matches!(err, DomainError::EmptyCart));
        assert_eq!(order_count(&pool), 0);
    }

    #[tokio::test]
    async fn checkout_rejects_missing_identity() {
        let (_container, pool) = setup_db().await;
        let product_id = seed_product(&pool, "cable", "4.00", 10);
        let service = CheckoutService::new(pool.clone());

        let err = service
            .checkout(None, &[line(product_id, 1)])
            .expect_err("should fail");

        assert!(matches!(err, DomainError::MissingIdentity));
        assert_eq!(product_quantity(&pool, product_id), 10);
    }

    #[tokio::test]
    async fn checkout_rejects_out_of_stock_product() {
        let (_container, pool) = setup_db().await;
        let user_id = seed_user(&pool, "buyer@example.com");
        let product_id = seed_product(&pool, "vinyl", "25.00", 0);
        let service = CheckoutService::new(pool.clone());

        let err = service
            .checkout(Some(user_id), &[line(product_id, 1)])
            .expect_err("should fail");

        match err {
            DomainError::OutOfStock { name } => assert_eq!(name, "vinyl"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(order_count(&pool), 0);
    }

    #[tokio::test]
    async fn failure_on_second_line_rolls_back_the_first_reservation() {
        let (_container, pool) = setup_db().await;
        let user_id = seed_user(&pool, "buyer@example.com");
        let product_id = seed_product(&pool, "hub", "15.00", 8);
        let service = CheckoutService::new(pool.clone());

        let err = service
            .checkout(Some(user_id), &[line(product_id, 3), line(9999, 1)])
            .expect_err("should fail");

        assert!(matches!(err, DomainError::ProductNotFound(9999)));
        assert_eq!(product_quantity(&pool, product_id), 8);
        assert_eq!(order_count(&pool), 0);
    }

    #[tokio::test]
    async fn errors_are_reported_in_input_order() {
        let (_container, pool) = setup_db().await;
        let user_id = seed_user(&pool, "buyer@example.com");
        let empty_id = seed_product(&pool, "sold-out", "5.00", 0);
        let service = CheckoutService::new(pool.clone());

        // Both lines are invalid; the first one in input order must win.
        let err = service
            .checkout(Some(user_id), &[line(31337, 1), line(empty_id, 1)])
            .expect_err("should fail");

        assert!(matches!(err, DomainError::ProductNotFound(31337)));
    }

    #[tokio::test]
    async fn duplicate_lines_cannot_oversell() {
        let (_container, pool) = setup_db().await;
        let user_id = seed_user(&pool, "buyer@example.com");
        let product_id = seed_product(&pool, "charger", "12.00", 3);
        let service = CheckoutService::new(pool.clone());

        let err = service
            .checkout(Some(user_id), &[line(product_id, 2), line(product_id, 2)])
            .expect_err("should fail");

        assert!(matches!(err, DomainError::InsufficientStock { .. }));
        assert_eq!(product_quantity(&pool, product_id), 3);
        assert_eq!(order_count(&pool), 0);
    }

    #[tokio::test]
    async fn parallel_checkouts_drain_stock_exactly_once_each() {
        let (_container, pool) = setup_db().await;
        let user_id = seed_user(&pool, "buyer@example.com");
        let stock = 4;
        let product_id = seed_product(&pool, "ticket", "50.00", stock);
        let service = CheckoutService::new(pool.clone());

        let mut handles = Vec::new();
        for _ in 0..stock {
            let service = service.clone();
            handles.push(tokio::task::spawn_blocking(move || {
                service.checkout(Some(user_id), &[line(product_id, 1)])
            }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.expect("task panicked").is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, stock);
        assert_eq!(product_quantity(&pool, product_id), 0);

        let err = service
            .checkout(Some(user_id), &[line(product_id, 1)])
            .expect_err("stock is drained");
        assert!(matches!(
            err,
            DomainError::OutOfStock { .. } | DomainError::InsufficientStock { .. }
        ));
    }
}
