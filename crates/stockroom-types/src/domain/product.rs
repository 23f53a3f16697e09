use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    /// Stock on hand. Never persisted negative; the only path that lowers it
    /// is the decrement-with-floor operation on the product repository.
    pub quantity: i64,
    pub price_cents: i64,
    pub category: Option<String>,
    /// Weak reference; the supplier may have been deleted since.
    pub supplier_id: Option<Uuid>,
    pub image_url: Option<String>,
}

impl Product {
    pub fn new(
        name: String,
        sku: String,
        quantity: i64,
        price_cents: i64,
        category: Option<String>,
        supplier_id: Option<Uuid>,
        image_url: Option<String>,
    ) -> anyhow::Result<Self> {
        if name.trim().is_empty() {
            anyhow::bail!("product name empty");
        }
        if sku.trim().is_empty() {
            anyhow::bail!("sku empty");
        }
        if quantity < 0 {
            anyhow::bail!("quantity must be >= 0");
        }
        if price_cents < 0 {
            anyhow::bail!("price must be >= 0");
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            sku,
            quantity,
            price_cents,
            category,
            supplier_id,
            image_url,
        })
    }

    pub fn is_low_stock(&self, threshold: i64) -> bool {
        self.quantity <= threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_product_validates_fields() {
        let ok = Product::new("Widget".into(), "W-1".into(), 5, 250, None, None, None);
        assert!(ok.is_ok());

        assert!(Product::new("".into(), "W-1".into(), 5, 250, None, None, None).is_err());
        assert!(Product::new("Widget".into(), " ".into(), 5, 250, None, None, None).is_err());
        assert!(Product::new("Widget".into(), "W-1".into(), -1, 250, None, None, None).is_err());
        assert!(Product::new("Widget".into(), "W-1".into(), 5, -1, None, None, None).is_err());
    }

    #[test]
    fn low_stock_threshold_is_inclusive() {
        let p = Product::new("Widget".into(), "W-1".into(), 10, 250, None, None, None).unwrap();
        assert!(p.is_low_stock(10));
        let p = Product::new("Widget".into(), "W-2".into(), 11, 250, None, None, None).unwrap();
        assert!(!p.is_low_stock(10));
    }
}
