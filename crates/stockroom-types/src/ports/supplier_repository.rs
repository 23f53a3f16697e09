use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::supplier::Supplier;
use crate::ports::RepoError;

#[async_trait]
pub trait SupplierRepository: Send + Sync + 'static {
    async fn create_supplier(&self, supplier: Supplier) -> Result<Supplier, RepoError>;
    async fn get_supplier(&self, id: Uuid) -> Result<Option<Supplier>, RepoError>;
    async fn list_suppliers(&self) -> Result<Vec<Supplier>, RepoError>;
    async fn update_supplier(&self, supplier: Supplier) -> Result<Option<Supplier>, RepoError>;
    async fn delete_supplier(&self, id: Uuid) -> Result<bool, RepoError>;

    /// Lookup used for the duplicate-email check; matches any status.
    async fn find_supplier_by_email(&self, email: &str) -> Result<Option<Supplier>, RepoError>;
}
