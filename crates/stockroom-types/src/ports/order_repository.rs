use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::order::Order;
use crate::ports::RepoError;

#[async_trait]
pub trait OrderRepository: Send + Sync + 'static {
    async fn create_order(&self, order: Order) -> Result<Order, RepoError>;
    async fn get_order(&self, id: Uuid) -> Result<Option<Order>, RepoError>;
    async fn list_orders(&self) -> Result<Vec<Order>, RepoError>;
    /// Full replace of the stored record keyed by `order.id`.
    async fn update_order(&self, order: Order) -> Result<Option<Order>, RepoError>;
    async fn delete_order(&self, id: Uuid) -> Result<bool, RepoError>;
}
