use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;
use uuid::Uuid;

use stockroom_types::domain::order::{Order, OrderItem, OrderStatus};
use stockroom_types::domain::product::Product;
use stockroom_types::domain::supplier::{Supplier, SupplierStatus};
use stockroom_types::domain::user::{Role, User, UserStatus};
use stockroom_types::ports::{
    OrderRepository, ProductRepository, RepoError, StockDecrement, SupplierRepository,
    UserRepository,
};

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

fn db_err(e: impl std::fmt::Display) -> RepoError {
    RepoError::DbError(e.to_string())
}

fn parse_uuid(s: &str) -> Result<Uuid, RepoError> {
    Uuid::parse_str(s).map_err(db_err)
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, RepoError> {
    Ok(DateTime::parse_from_rfc3339(s)
        .map_err(db_err)?
        .with_timezone(&Utc))
}

fn parse_order_status(s: &str) -> Result<OrderStatus, RepoError> {
    match s {
        "Pending" => Ok(OrderStatus::Pending),
        "Completed" => Ok(OrderStatus::Completed),
        "Cancelled" => Ok(OrderStatus::Cancelled),
        other => Err(RepoError::DbError(format!("unknown order status: {other}"))),
    }
}

fn parse_supplier_status(s: &str) -> Result<SupplierStatus, RepoError> {
    match s {
        "Active" => Ok(SupplierStatus::Active),
        "Inactive" => Ok(SupplierStatus::Inactive),
        other => Err(RepoError::DbError(format!(
            "unknown supplier status: {other}"
        ))),
    }
}

fn parse_user_status(s: &str) -> Result<UserStatus, RepoError> {
    match s {
        "Active" => Ok(UserStatus::Active),
        "Inactive" => Ok(UserStatus::Inactive),
        other => Err(RepoError::DbError(format!("unknown user status: {other}"))),
    }
}

fn parse_role(s: &str) -> Result<Role, RepoError> {
    match s {
        "admin" => Ok(Role::Admin),
        "employee" => Ok(Role::Employee),
        other => Err(RepoError::DbError(format!("unknown role: {other}"))),
    }
}

fn user_status_str(s: UserStatus) -> &'static str {
    match s {
        UserStatus::Active => "Active",
        UserStatus::Inactive => "Inactive",
    }
}

fn supplier_status_str(s: SupplierStatus) -> &'static str {
    match s {
        SupplierStatus::Active => "Active",
        SupplierStatus::Inactive => "Inactive",
    }
}

fn order_status_str(s: OrderStatus) -> &'static str {
    match s {
        OrderStatus::Pending => "Pending",
        OrderStatus::Completed => "Completed",
        OrderStatus::Cancelled => "Cancelled",
    }
}

#[derive(FromRow)]
struct DbProduct {
    id: String,
    name: String,
    sku: String,
    quantity: i64,
    price_cents: i64,
    category: Option<String>,
    supplier_id: Option<String>,
    image_url: Option<String>,
}

impl DbProduct {
    fn into_product(self) -> Result<Product, RepoError> {
        Ok(Product {
            id: parse_uuid(&self.id)?,
            name: self.name,
            sku: self.sku,
            quantity: self.quantity,
            price_cents: self.price_cents,
            category: self.category,
            supplier_id: self.supplier_id.as_deref().map(parse_uuid).transpose()?,
            image_url: self.image_url,
        })
    }
}

#[derive(FromRow)]
struct DbSupplier {
    id: String,
    name: String,
    contact: String,
    email: String,
    phone: String,
    status: String,
}

impl DbSupplier {
    fn into_supplier(self) -> Result<Supplier, RepoError> {
        Ok(Supplier {
            id: parse_uuid(&self.id)?,
            name: self.name,
            contact: self.contact,
            email: self.email,
            phone: self.phone,
            status: parse_supplier_status(&self.status)?,
        })
    }
}

#[derive(FromRow)]
struct DbOrder {
    id: String,
    order_number: String,
    customer: String,
    total_cents: i64,
    status: String,
    created_at: String,
    updated_at: String,
    items_json: String,
}

impl DbOrder {
    fn into_order(self) -> Result<Order, RepoError> {
        let items: Vec<OrderItem> = serde_json::from_str(&self.items_json).map_err(db_err)?;
        Ok(Order {
            id: parse_uuid(&self.id)?,
            order_number: self.order_number,
            customer: self.customer,
            items,
            total_cents: self.total_cents,
            status: parse_order_status(&self.status)?,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

#[derive(FromRow)]
struct DbUser {
    id: String,
    name: String,
    email: String,
    password: String,
    role: String,
    status: String,
}

impl DbUser {
    fn into_user(self) -> Result<User, RepoError> {
        Ok(User {
            id: parse_uuid(&self.id)?,
            name: self.name,
            email: self.email,
            password: self.password,
            role: parse_role(&self.role)?,
            status: parse_user_status(&self.status)?,
        })
    }
}

impl SqliteStore {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        // Run migration from migration file, one statement at a time.
        let ddl = include_str!("../migrations/0001_create_tables.sql");
        for stmt in ddl.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            sqlx::query(stmt).execute(&pool).await?;
        }

        Ok(Self { pool })
    }
}

#[async_trait]
impl ProductRepository for SqliteStore {
    async fn create_product(&self, product: Product) -> Result<Product, RepoError> {
        sqlx::query(
            "INSERT INTO products (id, name, sku, quantity, price_cents, category, supplier_id, image_url)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(product.id.to_string())
        .bind(&product.name)
        .bind(&product.sku)
        .bind(product.quantity)
        .bind(product.price_cents)
        .bind(&product.category)
        .bind(product.supplier_id.map(|s| s.to_string()))
        .bind(&product.image_url)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(product)
    }

    async fn get_product(&self, id: Uuid) -> Result<Option<Product>, RepoError> {
        let row: Option<DbProduct> = sqlx::query_as(
            "SELECT id, name, sku, quantity, price_cents, category, supplier_id, image_url
             FROM products WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(|r| r.into_product()).transpose()
    }

    async fn list_products(&self) -> Result<Vec<Product>, RepoError> {
        let rows: Vec<DbProduct> = sqlx::query_as(
            "SELECT id, name, sku, quantity, price_cents, category, supplier_id, image_url
             FROM products",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.into_iter().map(|r| r.into_product()).collect()
    }

    async fn update_product(&self, product: Product) -> Result<Option<Product>, RepoError> {
        let res = sqlx::query(
            "UPDATE products SET name = ?, sku = ?, quantity = ?, price_cents = ?, category = ?,
             supplier_id = ?, image_url = ? WHERE id = ?",
        )
        .bind(&product.name)
        .bind(&product.sku)
        .bind(product.quantity)
        .bind(product.price_cents)
        .bind(&product.category)
        .bind(product.supplier_id.map(|s| s.to_string()))
        .bind(&product.image_url)
        .bind(product.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        if res.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(product))
    }

    async fn delete_product(&self, id: Uuid) -> Result<bool, RepoError> {
        let res = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(res.rows_affected() > 0)
    }

    async fn decrement_quantity(&self, id: Uuid, by: u32) -> Result<StockDecrement, RepoError> {
        // Conditional update: the floor check and the write are one statement,
        // so concurrent completions cannot drive the quantity negative.
        let by = i64::from(by);
        let res = sqlx::query(
            "UPDATE products SET quantity = quantity - ? WHERE id = ? AND quantity >= ?",
        )
        .bind(by)
        .bind(id.to_string())
        .bind(by)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        let product = self.get_product(id).await?;
        match (res.rows_affected() > 0, product) {
            (true, Some(p)) => Ok(StockDecrement::Applied(p)),
            (false, Some(p)) => Ok(StockDecrement::Insufficient(p)),
            (_, None) => Ok(StockDecrement::Missing),
        }
    }
}

#[async_trait]
impl SupplierRepository for SqliteStore {
    async fn create_supplier(&self, supplier: Supplier) -> Result<Supplier, RepoError> {
        sqlx::query(
            "INSERT INTO suppliers (id, name, contact, email, phone, status)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(supplier.id.to_string())
        .bind(&supplier.name)
        .bind(&supplier.contact)
        .bind(&supplier.email)
        .bind(&supplier.phone)
        .bind(supplier_status_str(supplier.status))
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(supplier)
    }

    async fn get_supplier(&self, id: Uuid) -> Result<Option<Supplier>, RepoError> {
        let row: Option<DbSupplier> = sqlx::query_as(
            "SELECT id, name, contact, email, phone, status FROM suppliers WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(|r| r.into_supplier()).transpose()
    }

    async fn list_suppliers(&self) -> Result<Vec<Supplier>, RepoError> {
        let rows: Vec<DbSupplier> =
            sqlx::query_as("SELECT id, name, contact, email, phone, status FROM suppliers")
                .fetch_all(&self.pool)
                .await
                .map_err(db_err)?;
        rows.into_iter().map(|r| r.into_supplier()).collect()
    }

    async fn update_supplier(&self, supplier: Supplier) -> Result<Option<Supplier>, RepoError> {
        let res = sqlx::query(
            "UPDATE suppliers SET name = ?, contact = ?, email = ?, phone = ?, status = ?
             WHERE id = ?",
        )
        .bind(&supplier.name)
        .bind(&supplier.contact)
        .bind(&supplier.email)
        .bind(&supplier.phone)
        .bind(supplier_status_str(supplier.status))
        .bind(supplier.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        if res.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(supplier))
    }

    async fn delete_supplier(&self, id: Uuid) -> Result<bool, RepoError> {
        let res = sqlx::query("DELETE FROM suppliers WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(res.rows_affected() > 0)
    }

    async fn find_supplier_by_email(&self, email: &str) -> Result<Option<Supplier>, RepoError> {
        let row: Option<DbSupplier> = sqlx::query_as(
            "SELECT id, name, contact, email, phone, status FROM suppliers WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(|r| r.into_supplier()).transpose()
    }
}

#[async_trait]
impl OrderRepository for SqliteStore {
    async fn create_order(&self, order: Order) -> Result<Order, RepoError> {
        let items_json = serde_json::to_string(&order.items).map_err(db_err)?;
        sqlx::query(
            "INSERT INTO orders (id, order_number, customer, total_cents, status, created_at, updated_at, items_json)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(order.id.to_string())
        .bind(&order.order_number)
        .bind(&order.customer)
        .bind(order.total_cents)
        .bind(order_status_str(order.status))
        .bind(order.created_at.to_rfc3339())
        .bind(order.updated_at.to_rfc3339())
        .bind(items_json)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(order)
    }

    async fn get_order(&self, id: Uuid) -> Result<Option<Order>, RepoError> {
        let row: Option<DbOrder> = sqlx::query_as(
            "SELECT id, order_number, customer, total_cents, status, created_at, updated_at, items_json
             FROM orders WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(|r| r.into_order()).transpose()
    }

    async fn list_orders(&self) -> Result<Vec<Order>, RepoError> {
        let rows: Vec<DbOrder> = sqlx::query_as(
            "SELECT id, order_number, customer, total_cents, status, created_at, updated_at, items_json
             FROM orders",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        rows.into_iter().map(|r| r.into_order()).collect()
    }

    async fn update_order(&self, order: Order) -> Result<Option<Order>, RepoError> {
        let items_json = serde_json::to_string(&order.items).map_err(db_err)?;
        let res = sqlx::query(
            "UPDATE orders SET order_number = ?, customer = ?, total_cents = ?, status = ?,
             created_at = ?, updated_at = ?, items_json = ? WHERE id = ?",
        )
        .bind(&order.order_number)
        .bind(&order.customer)
        .bind(order.total_cents)
        .bind(order_status_str(order.status))
        .bind(order.created_at.to_rfc3339())
        .bind(order.updated_at.to_rfc3339())
        .bind(items_json)
        .bind(order.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        if res.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(order))
    }

    async fn delete_order(&self, id: Uuid) -> Result<bool, RepoError> {
        let res = sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(res.rows_affected() > 0)
    }
}

#[async_trait]
impl UserRepository for SqliteStore {
    async fn create_user(&self, user: User) -> Result<User, RepoError> {
        sqlx::query(
            "INSERT INTO users (id, name, email, password, role, status)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(user.id.to_string())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.role.as_str())
        .bind(user_status_str(user.status))
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let row: Option<DbUser> = sqlx::query_as(
            "SELECT id, name, email, password, role, status FROM users WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(|r| r.into_user()).transpose()
    }

    async fn list_users(&self) -> Result<Vec<User>, RepoError> {
        let rows: Vec<DbUser> =
            sqlx::query_as("SELECT id, name, email, password, role, status FROM users")
                .fetch_all(&self.pool)
                .await
                .map_err(db_err)?;
        rows.into_iter().map(|r| r.into_user()).collect()
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, RepoError> {
        let res = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(res.rows_affected() > 0)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let row: Option<DbUser> = sqlx::query_as(
            "SELECT id, name, email, password, role, status FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.map(|r| r.into_user()).transpose()
    }

    async fn set_user_status(
        &self,
        id: Uuid,
        status: UserStatus,
    ) -> Result<Option<User>, RepoError> {
        let res = sqlx::query("UPDATE users SET status = ? WHERE id = ?")
            .bind(user_status_str(status))
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        if res.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_user(id).await
    }
}
