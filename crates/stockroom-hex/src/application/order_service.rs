use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use stockroom_types::domain::order::{Order, OrderItem, OrderStatus};
use stockroom_types::domain::product::Product;
use stockroom_types::ports::{OrderRepository, ProductRepository, StockDecrement};

use crate::errors::AppError;

/// Caller-supplied order fields; both creation and correction carry the full
/// set (updates are a full overwrite keyed by the path id).
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub order_number: String,
    pub customer: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub total_cents: i64,
}

/// Order as served by the list endpoint: line items with the referenced
/// product expanded for display. Deleted products expand to `null`.
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub id: Uuid,
    pub order_number: String,
    pub customer: String,
    pub items: Vec<OrderItemView>,
    pub total_cents: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderItemView {
    pub product_id: Uuid,
    pub product: Option<Product>,
    pub quantity: u32,
    pub unit_price_cents: i64,
}

pub struct OrderService<S> {
    store: S,
}

impl<S: OrderRepository + ProductRepository> OrderService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create a new order (`id` absent) or correct an existing one in place
    /// (`id` present, full overwrite). Stock is reconciled exactly when the
    /// order transitions into Completed: every line item's product is
    /// decremented, in input order, and any floor violation fails the whole
    /// operation before the order is persisted. Leaving Completed never
    /// restores stock.
    pub async fn place_order(&self, id: Option<Uuid>, draft: OrderDraft) -> Result<Order, AppError> {
        match id {
            Some(order_id) => {
                let mut order = self
                    .store
                    .get_order(order_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Order not found".into()))?;
                let was_completed = order.status == OrderStatus::Completed;
                order
                    .overwrite(
                        draft.order_number,
                        draft.customer,
                        draft.items,
                        draft.status,
                        draft.total_cents,
                    )
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if order.status == OrderStatus::Completed && !was_completed {
                    self.reconcile_stock(&order.items).await?;
                }
                self.store
                    .update_order(order)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Order not found".into()))
            }
            None => {
                let order = Order::new(
                    draft.order_number,
                    draft.customer,
                    draft.items,
                    draft.status,
                    draft.total_cents,
                )
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if order.status == OrderStatus::Completed {
                    self.reconcile_stock(&order.items).await?;
                }
                Ok(self.store.create_order(order).await?)
            }
        }
    }

    /// One decrement per line item, sequenced in input order so duplicates of
    /// the same product apply cumulatively. A failed item aborts the
    /// operation; decrements already applied stay applied (acknowledged
    /// inconsistency window, no rollback).
    async fn reconcile_stock(&self, items: &[OrderItem]) -> Result<(), AppError> {
        for item in items {
            match self
                .store
                .decrement_quantity(item.product_id, item.quantity)
                .await?
            {
                StockDecrement::Applied(_) => {}
                StockDecrement::Insufficient(product) => {
                    return Err(AppError::InsufficientStock(product.name));
                }
                StockDecrement::Missing => {
                    return Err(AppError::NotFound(format!(
                        "Product not found: {}",
                        item.product_id
                    )));
                }
            }
        }
        Ok(())
    }

    pub async fn list_orders(&self) -> Result<Vec<OrderView>, AppError> {
        let orders = self.store.list_orders().await?;
        let mut cache: HashMap<Uuid, Option<Product>> = HashMap::new();
        let mut out = Vec::with_capacity(orders.len());
        for order in orders {
            let mut items = Vec::with_capacity(order.items.len());
            for item in &order.items {
                let product = match cache.get(&item.product_id) {
                    Some(hit) => hit.clone(),
                    None => {
                        let loaded = self.store.get_product(item.product_id).await?;
                        cache.insert(item.product_id, loaded.clone());
                        loaded
                    }
                };
                items.push(OrderItemView {
                    product_id: item.product_id,
                    product,
                    quantity: item.quantity,
                    unit_price_cents: item.unit_price_cents,
                });
            }
            out.push(OrderView {
                id: order.id,
                order_number: order.order_number,
                customer: order.customer,
                items,
                total_cents: order.total_cents,
                status: order.status,
                created_at: order.created_at,
                updated_at: order.updated_at,
            });
        }
        Ok(out)
    }

    /// Removal never reverses a prior stock decrement.
    pub async fn delete_order(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.store.delete_order(id).await?;
        if deleted {
            Ok(())
        } else {
            Err(AppError::NotFound("Order not found".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_repo::memory::InMemoryStore;
    use stockroom_types::domain::product::Product;

    async fn seed_product(store: &InMemoryStore, quantity: i64) -> Product {
        store
            .create_product(
                Product::new(
                    "Widget".into(),
                    "W-1".into(),
                    quantity,
                    500,
                    None,
                    None,
                    None,
                )
                .unwrap(),
            )
            .await
            .unwrap()
    }

    fn draft(product_id: Uuid, qty: u32, status: OrderStatus) -> OrderDraft {
        OrderDraft {
            order_number: "ORD-1".into(),
            customer: "Alice".into(),
            items: vec![OrderItem {
                product_id,
                quantity: qty,
                unit_price_cents: 500,
            }],
            status,
            total_cents: i64::from(qty) * 500,
        }
    }

    #[tokio::test]
    async fn pending_order_leaves_stock_alone() {
        let store = InMemoryStore::new();
        let product = seed_product(&store, 5).await;
        let svc = OrderService::new(store.clone());

        let order = svc
            .place_order(None, draft(product.id, 3, OrderStatus::Pending))
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(store.get_product(product.id).await.unwrap().unwrap().quantity, 5);
    }

    #[tokio::test]
    async fn completing_to_exact_stock_drains_it() {
        let store = InMemoryStore::new();
        let product = seed_product(&store, 3).await;
        let svc = OrderService::new(store.clone());

        let order = svc
            .place_order(None, draft(product.id, 3, OrderStatus::Pending))
            .await
            .unwrap();
        svc.place_order(Some(order.id), draft(product.id, 3, OrderStatus::Completed))
            .await
            .unwrap();
        assert_eq!(store.get_product(product.id).await.unwrap().unwrap().quantity, 0);

        // The same completion against drained stock must fail and change
        // nothing: the order is already Completed, so this is a no-op
        // transition and reconciliation is skipped.
        let again = svc
            .place_order(Some(order.id), draft(product.id, 3, OrderStatus::Completed))
            .await;
        assert!(again.is_ok());
        assert_eq!(store.get_product(product.id).await.unwrap().unwrap().quantity, 0);
    }

    #[tokio::test]
    async fn depleting_order_is_rejected_in_full() {
        let store = InMemoryStore::new();
        let product = seed_product(&store, 2).await;
        let svc = OrderService::new(store.clone());

        let res = svc
            .place_order(None, draft(product.id, 3, OrderStatus::Completed))
            .await;
        match res {
            Err(AppError::InsufficientStock(name)) => assert_eq!(name, "Widget"),
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
        // Order was not persisted and stock is untouched.
        assert!(svc.list_orders().await.unwrap().is_empty());
        assert_eq!(store.get_product(product.id).await.unwrap().unwrap().quantity, 2);
    }

    #[tokio::test]
    async fn new_order_created_completed_decrements_immediately() {
        let store = InMemoryStore::new();
        let product = seed_product(&store, 5).await;
        let svc = OrderService::new(store.clone());

        svc.place_order(None, draft(product.id, 2, OrderStatus::Completed))
            .await
            .unwrap();
        assert_eq!(store.get_product(product.id).await.unwrap().unwrap().quantity, 3);
    }

    #[tokio::test]
    async fn duplicate_line_items_decrement_cumulatively() {
        let store = InMemoryStore::new();
        let product = seed_product(&store, 5).await;
        let svc = OrderService::new(store.clone());

        let mut d = draft(product.id, 2, OrderStatus::Completed);
        d.items.push(OrderItem {
            product_id: product.id,
            quantity: 2,
            unit_price_cents: 500,
        });
        svc.place_order(None, d).await.unwrap();
        assert_eq!(store.get_product(product.id).await.unwrap().unwrap().quantity, 1);
    }

    #[tokio::test]
    async fn cancelling_a_completed_order_restores_nothing() {
        let store = InMemoryStore::new();
        let product = seed_product(&store, 3).await;
        let svc = OrderService::new(store.clone());

        let order = svc
            .place_order(None, draft(product.id, 3, OrderStatus::Completed))
            .await
            .unwrap();
        assert_eq!(store.get_product(product.id).await.unwrap().unwrap().quantity, 0);

        let cancelled = svc
            .place_order(Some(order.id), draft(product.id, 3, OrderStatus::Cancelled))
            .await
            .unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        // Deliberate asymmetry: leaving Completed does not give stock back.
        assert_eq!(store.get_product(product.id).await.unwrap().unwrap().quantity, 0);
    }

    #[tokio::test]
    async fn completing_against_unknown_product_is_not_found() {
        let store = InMemoryStore::new();
        let svc = OrderService::new(store.clone());
        let ghost = Uuid::new_v4();

        let res = svc
            .place_order(None, draft(ghost, 1, OrderStatus::Completed))
            .await;
        match res {
            Err(AppError::NotFound(msg)) => assert!(msg.contains(&ghost.to_string())),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn correcting_missing_order_is_not_found() {
        let store = InMemoryStore::new();
        let product = seed_product(&store, 5).await;
        let svc = OrderService::new(store);

        let res = svc
            .place_order(Some(Uuid::new_v4()), draft(product.id, 1, OrderStatus::Pending))
            .await;
        assert!(matches!(res, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_expands_products_and_tolerates_dangling_refs() {
        let store = InMemoryStore::new();
        let product = seed_product(&store, 5).await;
        let svc = OrderService::new(store.clone());

        svc.place_order(None, draft(product.id, 1, OrderStatus::Pending))
            .await
            .unwrap();
        let views = svc.list_orders().await.unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(
            views[0].items[0].product.as_ref().unwrap().name,
            "Widget"
        );

        // Deleting the product leaves the historical order with a null
        // product expansion rather than an error.
        store.delete_product(product.id).await.unwrap();
        let views = svc.list_orders().await.unwrap();
        assert!(views[0].items[0].product.is_none());
        assert_eq!(views[0].items[0].product_id, product.id);
    }

    #[tokio::test]
    async fn delete_order_never_restores_stock() {
        let store = InMemoryStore::new();
        let product = seed_product(&store, 4).await;
        let svc = OrderService::new(store.clone());

        let order = svc
            .place_order(None, draft(product.id, 4, OrderStatus::Completed))
            .await
            .unwrap();
        svc.delete_order(order.id).await.unwrap();
        assert_eq!(store.get_product(product.id).await.unwrap().unwrap().quantity, 0);

        let missing = svc.delete_order(order.id).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }
}
