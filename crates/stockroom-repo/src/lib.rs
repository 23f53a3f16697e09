#[cfg(not(any(feature = "memory", feature = "sqlite")))]
compile_error!("Enable a store feature: `memory` or `sqlite`.");

use async_trait::async_trait;
use uuid::Uuid;

use stockroom_types::domain::order::Order;
use stockroom_types::domain::product::Product;
use stockroom_types::domain::supplier::Supplier;
use stockroom_types::domain::user::{User, UserStatus};
use stockroom_types::ports::{
    OrderRepository, ProductRepository, RepoError, StockDecrement, SupplierRepository,
    UserRepository,
};

#[cfg(feature = "memory")]
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

/// Store facade over the enabled backends. With both features on, a supplied
/// database URL selects SQLite and its absence falls back to the in-memory
/// maps.
#[derive(Clone)]
pub struct Store {
    inner: Inner,
}

#[derive(Clone)]
enum Inner {
    #[cfg(feature = "memory")]
    Memory(memory::InMemoryStore),
    #[cfg(feature = "sqlite")]
    Sqlite(sqlite::SqliteStore),
}

pub async fn build_store(url: Option<&str>) -> anyhow::Result<Store> {
    Store::build(url).await
}

impl Store {
    #[cfg(all(feature = "memory", not(feature = "sqlite")))]
    pub async fn build(_: Option<&str>) -> anyhow::Result<Self> {
        Ok(Self {
            inner: Inner::Memory(memory::InMemoryStore::new()),
        })
    }

    #[cfg(all(feature = "sqlite", not(feature = "memory")))]
    pub async fn build(database_url: Option<&str>) -> anyhow::Result<Self> {
        let url = database_url.unwrap_or("sqlite://stockroom.db");
        Ok(Self {
            inner: Inner::Sqlite(sqlite::SqliteStore::new(url).await?),
        })
    }

    #[cfg(all(feature = "memory", feature = "sqlite"))]
    pub async fn build(database_url: Option<&str>) -> anyhow::Result<Self> {
        match database_url {
            Some(url) => Ok(Self {
                inner: Inner::Sqlite(sqlite::SqliteStore::new(url).await?),
            }),
            None => Ok(Self {
                inner: Inner::Memory(memory::InMemoryStore::new()),
            }),
        }
    }
}

#[async_trait]
impl ProductRepository for Store {
    async fn create_product(&self, product: Product) -> Result<Product, RepoError> {
        match &self.inner {
            #[cfg(feature = "memory")]
            Inner::Memory(s) => s.create_product(product).await,
            #[cfg(feature = "sqlite")]
            Inner::Sqlite(s) => s.create_product(product).await,
        }
    }

    async fn get_product(&self, id: Uuid) -> Result<Option<Product>, RepoError> {
        match &self.inner {
            #[cfg(feature = "memory")]
            Inner::Memory(s) => s.get_product(id).await,
            #[cfg(feature = "sqlite")]
            Inner::Sqlite(s) => s.get_product(id).await,
        }
    }

    async fn list_products(&self) -> Result<Vec<Product>, RepoError> {
        match &self.inner {
            #[cfg(feature = "memory")]
            Inner::Memory(s) => s.list_products().await,
            #[cfg(feature = "sqlite")]
            Inner::Sqlite(s) => s.list_products().await,
        }
    }

    async fn update_product(&self, product: Product) -> Result<Option<Product>, RepoError> {
        match &self.inner {
            #[cfg(feature = "memory")]
            Inner::Memory(s) => s.update_product(product).await,
            #[cfg(feature = "sqlite")]
            Inner::Sqlite(s) => s.update_product(product).await,
        }
    }

    async fn delete_product(&self, id: Uuid) -> Result<bool, RepoError> {
        match &self.inner {
            #[cfg(feature = "memory")]
            Inner::Memory(s) => s.delete_product(id).await,
            #[cfg(feature = "sqlite")]
            Inner::Sqlite(s) => s.delete_product(id).await,
        }
    }

    async fn decrement_quantity(&self, id: Uuid, by: u32) -> Result<StockDecrement, RepoError> {
        match &self.inner {
            #[cfg(feature = "memory")]
            Inner::Memory(s) => s.decrement_quantity(id, by).await,
            #[cfg(feature = "sqlite")]
            Inner::Sqlite(s) => s.decrement_quantity(id, by).await,
        }
    }
}

#[async_trait]
impl SupplierRepository for Store {
    async fn create_supplier(&self, supplier: Supplier) -> Result<Supplier, RepoError> {
        match &self.inner {
            #[cfg(feature = "memory")]
            Inner::Memory(s) => s.create_supplier(supplier).await,
            #[cfg(feature = "sqlite")]
            Inner::Sqlite(s) => s.create_supplier(supplier).await,
        }
    }

    async fn get_supplier(&self, id: Uuid) -> Result<Option<Supplier>, RepoError> {
        match &self.inner {
            #[cfg(feature = "memory")]
            Inner::Memory(s) => s.get_supplier(id).await,
            #[cfg(feature = "sqlite")]
            Inner::Sqlite(s) => s.get_supplier(id).await,
        }
    }

    async fn list_suppliers(&self) -> Result<Vec<Supplier>, RepoError> {
        match &self.inner {
            #[cfg(feature = "memory")]
            Inner::Memory(s) => s.list_suppliers().await,
            #[cfg(feature = "sqlite")]
            Inner::Sqlite(s) => s.list_suppliers().await,
        }
    }

    async fn update_supplier(&self, supplier: Supplier) -> Result<Option<Supplier>, RepoError> {
        match &self.inner {
            #[cfg(feature = "memory")]
            Inner::Memory(s) => s.update_supplier(supplier).await,
            #[cfg(feature = "sqlite")]
            Inner::Sqlite(s) => s.update_supplier(supplier).await,
        }
    }

    async fn delete_supplier(&self, id: Uuid) -> Result<bool, RepoError> {
        match &self.inner {
            #[cfg(feature = "memory")]
            Inner::Memory(s) => s.delete_supplier(id).await,
            #[cfg(feature = "sqlite")]
            Inner::Sqlite(s) => s.delete_supplier(id).await,
        }
    }

    async fn find_supplier_by_email(&self, email: &str) -> Result<Option<Supplier>, RepoError> {
        match &self.inner {
            #[cfg(feature = "memory")]
            Inner::Memory(s) => s.find_supplier_by_email(email).await,
            #[cfg(feature = "sqlite")]
            Inner::Sqlite(s) => s.find_supplier_by_email(email).await,
        }
    }
}

#[async_trait]
impl OrderRepository for Store {
    async fn create_order(&self, order: Order) -> Result<Order, RepoError> {
        match &self.inner {
            #[cfg(feature = "memory")]
            Inner::Memory(s) => s.create_order(order).await,
            #[cfg(feature = "sqlite")]
            Inner::Sqlite(s) => s.create_order(order).await,
        }
    }

    async fn get_order(&self, id: Uuid) -> Result<Option<Order>, RepoError> {
        match &self.inner {
            #[cfg(feature = "memory")]
            Inner::Memory(s) => s.get_order(id).await,
            #[cfg(feature = "sqlite")]
            Inner::Sqlite(s) => s.get_order(id).await,
        }
    }

    async fn list_orders(&self) -> Result<Vec<Order>, RepoError> {
        match &self.inner {
            #[cfg(feature = "memory")]
            Inner::Memory(s) => s.list_orders().await,
            #[cfg(feature = "sqlite")]
            Inner::Sqlite(s) => s.list_orders().await,
        }
    }

    async fn update_order(&self, order: Order) -> Result<Option<Order>, RepoError> {
        match &self.inner {
            #[cfg(feature = "memory")]
            Inner::Memory(s) => s.update_order(order).await,
            #[cfg(feature = "sqlite")]
            Inner::Sqlite(s) => s.update_order(order).await,
        }
    }

    async fn delete_order(&self, id: Uuid) -> Result<bool, RepoError> {
        match &self.inner {
            #[cfg(feature = "memory")]
            Inner::Memory(s) => s.delete_order(id).await,
            #[cfg(feature = "sqlite")]
            Inner::Sqlite(s) => s.delete_order(id).await,
        }
    }
}

#[async_trait]
impl UserRepository for Store {
    async fn create_user(&self, user: User) -> Result<User, RepoError> {
        match &self.inner {
            #[cfg(feature = "memory")]
            Inner::Memory(s) => s.create_user(user).await,
            #[cfg(feature = "sqlite")]
            Inner::Sqlite(s) => s.create_user(user).await,
        }
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        match &self.inner {
            #[cfg(feature = "memory")]
            Inner::Memory(s) => s.get_user(id).await,
            #[cfg(feature = "sqlite")]
            Inner::Sqlite(s) => s.get_user(id).await,
        }
    }

    async fn list_users(&self) -> Result<Vec<User>, RepoError> {
        match &self.inner {
            #[cfg(feature = "memory")]
            Inner::Memory(s) => s.list_users().await,
            #[cfg(feature = "sqlite")]
            Inner::Sqlite(s) => s.list_users().await,
        }
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, RepoError> {
        match &self.inner {
            #[cfg(feature = "memory")]
            Inner::Memory(s) => s.delete_user(id).await,
            #[cfg(feature = "sqlite")]
            Inner::Sqlite(s) => s.delete_user(id).await,
        }
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        match &self.inner {
            #[cfg(feature = "memory")]
            Inner::Memory(s) => s.find_user_by_email(email).await,
            #[cfg(feature = "sqlite")]
            Inner::Sqlite(s) => s.find_user_by_email(email).await,
        }
    }

    async fn set_user_status(
        &self,
        id: Uuid,
        status: UserStatus,
    ) -> Result<Option<User>, RepoError> {
        match &self.inner {
            #[cfg(feature = "memory")]
            Inner::Memory(s) => s.set_user_status(id, status).await,
            #[cfg(feature = "sqlite")]
            Inner::Sqlite(s) => s.set_user_status(id, status).await,
        }
    }
}
