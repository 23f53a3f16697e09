use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::product::Product;
use crate::ports::RepoError;

/// Outcome of the atomic decrement-with-floor operation.
#[derive(Debug, Clone)]
pub enum StockDecrement {
    /// Stock was lowered; carries the product after the decrement.
    Applied(Product),
    /// The decrement would have taken the quantity below zero; nothing was
    /// written. Carries the product so callers can name it.
    Insufficient(Product),
    /// No product with that id.
    Missing,
}

#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    async fn create_product(&self, product: Product) -> Result<Product, RepoError>;
    async fn get_product(&self, id: Uuid) -> Result<Option<Product>, RepoError>;
    async fn list_products(&self) -> Result<Vec<Product>, RepoError>;
    async fn update_product(&self, product: Product) -> Result<Option<Product>, RepoError>;
    async fn delete_product(&self, id: Uuid) -> Result<bool, RepoError>;

    /// Lower the quantity by `by` only if the result stays >= 0. Each call is
    /// atomic per product, so no interleaving of two completions can push a
    /// quantity negative.
    async fn decrement_quantity(&self, id: Uuid, by: u32) -> Result<StockDecrement, RepoError>;
}
