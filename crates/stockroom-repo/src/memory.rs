use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use stockroom_types::domain::order::Order;
use stockroom_types::domain::product::Product;
use stockroom_types::domain::supplier::Supplier;
use stockroom_types::domain::user::{User, UserStatus};
use stockroom_types::ports::{
    OrderRepository, ProductRepository, RepoError, StockDecrement, SupplierRepository,
    UserRepository,
};

/// Map-backed store; the test double for everything above the ports.
#[derive(Clone)]
pub struct InMemoryStore {
    products: Arc<DashMap<Uuid, Product>>,
    suppliers: Arc<DashMap<Uuid, Supplier>>,
    orders: Arc<DashMap<Uuid, Order>>,
    users: Arc<DashMap<Uuid, User>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            products: Arc::new(DashMap::new()),
            suppliers: Arc::new(DashMap::new()),
            orders: Arc::new(DashMap::new()),
            users: Arc::new(DashMap::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryStore {
    async fn create_product(&self, product: Product) -> Result<Product, RepoError> {
        self.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn get_product(&self, id: Uuid) -> Result<Option<Product>, RepoError> {
        Ok(self.products.get(&id).map(|r| r.clone()))
    }

    async fn list_products(&self) -> Result<Vec<Product>, RepoError> {
        Ok(self.products.iter().map(|kv| kv.value().clone()).collect())
    }

    async fn update_product(&self, product: Product) -> Result<Option<Product>, RepoError> {
        if let Some(mut v) = self.products.get_mut(&product.id) {
            *v = product.clone();
            return Ok(Some(product));
        }
        Ok(None)
    }

    async fn delete_product(&self, id: Uuid) -> Result<bool, RepoError> {
        Ok(self.products.remove(&id).is_some())
    }

    async fn decrement_quantity(&self, id: Uuid, by: u32) -> Result<StockDecrement, RepoError> {
        // get_mut holds the shard lock, so the check and the write are one
        // step from any other caller's point of view.
        match self.products.get_mut(&id) {
            Some(mut v) => {
                let by = i64::from(by);
                if v.quantity < by {
                    Ok(StockDecrement::Insufficient(v.clone()))
                } else {
                    v.quantity -= by;
                    Ok(StockDecrement::Applied(v.clone()))
                }
            }
            None => Ok(StockDecrement::Missing),
        }
    }
}

#[async_trait]
impl SupplierRepository for InMemoryStore {
    async fn create_supplier(&self, supplier: Supplier) -> Result<Supplier, RepoError> {
        self.suppliers.insert(supplier.id, supplier.clone());
        Ok(supplier)
    }

    async fn get_supplier(&self, id: Uuid) -> Result<Option<Supplier>, RepoError> {
        Ok(self.suppliers.get(&id).map(|r| r.clone()))
    }

    async fn list_suppliers(&self) -> Result<Vec<Supplier>, RepoError> {
        Ok(self.suppliers.iter().map(|kv| kv.value().clone()).collect())
    }

    async fn update_supplier(&self, supplier: Supplier) -> Result<Option<Supplier>, RepoError> {
        if let Some(mut v) = self.suppliers.get_mut(&supplier.id) {
            *v = supplier.clone();
            return Ok(Some(supplier));
        }
        Ok(None)
    }

    async fn delete_supplier(&self, id: Uuid) -> Result<bool, RepoError> {
        Ok(self.suppliers.remove(&id).is_some())
    }

    async fn find_supplier_by_email(&self, email: &str) -> Result<Option<Supplier>, RepoError> {
        Ok(self
            .suppliers
            .iter()
            .find(|kv| kv.value().email == email)
            .map(|kv| kv.value().clone()))
    }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn create_order(&self, order: Order) -> Result<Order, RepoError> {
        self.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn get_order(&self, id: Uuid) -> Result<Option<Order>, RepoError> {
        Ok(self.orders.get(&id).map(|r| r.clone()))
    }

    async fn list_orders(&self) -> Result<Vec<Order>, RepoError> {
        Ok(self.orders.iter().map(|kv| kv.value().clone()).collect())
    }

    async fn update_order(&self, order: Order) -> Result<Option<Order>, RepoError> {
        if let Some(mut v) = self.orders.get_mut(&order.id) {
            *v = order.clone();
            return Ok(Some(order));
        }
        Ok(None)
    }

    async fn delete_order(&self, id: Uuid) -> Result<bool, RepoError> {
        Ok(self.orders.remove(&id).is_some())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create_user(&self, user: User) -> Result<User, RepoError> {
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.get(&id).map(|r| r.clone()))
    }

    async fn list_users(&self) -> Result<Vec<User>, RepoError> {
        Ok(self.users.iter().map(|kv| kv.value().clone()).collect())
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, RepoError> {
        Ok(self.users.remove(&id).is_some())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .iter()
            .find(|kv| kv.value().email == email)
            .map(|kv| kv.value().clone()))
    }

    async fn set_user_status(
        &self,
        id: Uuid,
        status: UserStatus,
    ) -> Result<Option<User>, RepoError> {
        if let Some(mut v) = self.users.get_mut(&id) {
            v.status = status;
            return Ok(Some(v.clone()));
        }
        Ok(None)
    }
}
