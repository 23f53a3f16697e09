use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use stockroom_types::domain::order::OrderStatus;
use stockroom_types::ports::{OrderRepository, ProductRepository, SupplierRepository};

use crate::errors::AppError;

/// Products at or below this quantity count as low stock.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_products: usize,
    pub low_stock_items: usize,
    pub pending_orders: usize,
    pub total_suppliers: usize,
    pub completed_orders: usize,
    /// Revenue from Completed orders created in the current calendar month.
    pub monthly_revenue_cents: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SalesPoint {
    pub name: String,
    pub sales_cents: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub stats: DashboardStats,
    pub sales_trends: Vec<SalesPoint>,
}

pub struct DashboardService<S> {
    store: S,
}

impl<S: ProductRepository + SupplierRepository + OrderRepository> DashboardService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Recomputed from the stores on every call; `now` anchors the current
    /// calendar month.
    pub async fn summary(&self, now: DateTime<Utc>) -> Result<DashboardSummary, AppError> {
        let products = self.store.list_products().await?;
        let suppliers = self.store.list_suppliers().await?;
        let orders = self.store.list_orders().await?;

        let total_products = products.len();
        let low_stock_items = products
            .iter()
            .filter(|p| p.is_low_stock(LOW_STOCK_THRESHOLD))
            .count();
        let pending_orders = orders
            .iter()
            .filter(|o| o.status == OrderStatus::Pending)
            .count();
        let completed: Vec<_> = orders
            .iter()
            .filter(|o| o.status == OrderStatus::Completed)
            .collect();

        let monthly_revenue_cents = completed
            .iter()
            .filter(|o| o.created_at.year() == now.year() && o.created_at.month() == now.month())
            .map(|o| o.total_cents)
            .sum();

        // Bucketed by month number across years, as the dashboard charts it;
        // months with no Completed orders produce no point.
        let mut buckets: BTreeMap<u32, i64> = BTreeMap::new();
        for order in &completed {
            *buckets.entry(order.created_at.month()).or_insert(0) += order.total_cents;
        }
        let sales_trends = buckets
            .into_iter()
            .map(|(month, sales_cents)| SalesPoint {
                name: MONTH_NAMES[(month - 1) as usize].to_string(),
                sales_cents,
            })
            .collect();

        Ok(DashboardSummary {
            stats: DashboardStats {
                total_products,
                low_stock_items,
                pending_orders,
                total_suppliers: suppliers.len(),
                completed_orders: completed.len(),
                monthly_revenue_cents,
            },
            sales_trends,
        })
    }
}
