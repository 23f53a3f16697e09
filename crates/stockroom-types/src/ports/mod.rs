pub mod order_repository;
pub mod product_repository;
pub mod supplier_repository;
pub mod user_repository;

pub use order_repository::OrderRepository;
pub use product_repository::{ProductRepository, StockDecrement};
pub use supplier_repository::SupplierRepository;
pub use user_repository::UserRepository;

#[derive(thiserror::Error, Debug)]
pub enum RepoError {
    #[error("db error: {0}")]
    DbError(String),
}

/// One store object carries every collection; services receive a clone of it
/// at construction time instead of reaching for a global handle.
pub trait Store:
    ProductRepository + SupplierRepository + OrderRepository + UserRepository + Clone
{
}

impl<T> Store for T where
    T: ProductRepository + SupplierRepository + OrderRepository + UserRepository + Clone
{
}
