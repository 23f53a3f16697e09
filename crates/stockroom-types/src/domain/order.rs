use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

/// A line item captures the unit price at order time; it is a snapshot, not a
/// live lookup against the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: Uuid,
    pub quantity: u32,
    pub unit_price_cents: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    /// Caller-supplied; not enforced unique.
    pub order_number: String,
    pub customer: String,
    pub items: Vec<OrderItem>,
    pub total_cents: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn new(
        order_number: String,
        customer: String,
        items: Vec<OrderItem>,
        status: OrderStatus,
        total_cents: i64,
    ) -> anyhow::Result<Self> {
        validate_fields(&order_number, &customer, &items)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            order_number,
            customer,
            items,
            total_cents,
            status,
            created_at: now,
            updated_at: now,
        })
    }

    /// Full overwrite of the caller-editable fields. `created_at` survives so
    /// revenue bucketing keeps pointing at the original placement month.
    pub fn overwrite(
        &mut self,
        order_number: String,
        customer: String,
        items: Vec<OrderItem>,
        status: OrderStatus,
        total_cents: i64,
    ) -> anyhow::Result<()> {
        validate_fields(&order_number, &customer, &items)?;
        self.order_number = order_number;
        self.customer = customer;
        self.items = items;
        self.status = status;
        self.total_cents = total_cents;
        self.updated_at = Utc::now();
        Ok(())
    }
}

fn validate_fields(order_number: &str, customer: &str, items: &[OrderItem]) -> anyhow::Result<()> {
    if order_number.trim().is_empty() {
        anyhow::bail!("order_number empty");
    }
    if customer.trim().is_empty() {
        anyhow::bail!("customer empty");
    }
    if items.is_empty() {
        anyhow::bail!("items empty");
    }
    for it in items {
        if it.quantity == 0 {
            anyhow::bail!("item quantity must be >= 1");
        }
    }
    Ok(())
}
