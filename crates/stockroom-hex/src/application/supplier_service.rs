use uuid::Uuid;

use stockroom_types::domain::supplier::{Supplier, SupplierStatus};
use stockroom_types::ports::SupplierRepository;

use crate::errors::AppError;

#[derive(Debug, Clone)]
pub struct SupplierDraft {
    pub name: String,
    pub contact: String,
    pub email: String,
    pub phone: String,
    pub status: Option<SupplierStatus>,
}

pub struct SupplierService<S> {
    store: S,
}

impl<S: SupplierRepository> SupplierService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Email is unique across active and inactive suppliers; a duplicate is a
    /// Conflict regardless of the existing supplier's status.
    pub async fn create_supplier(&self, draft: SupplierDraft) -> Result<Supplier, AppError> {
        if self
            .store
            .find_supplier_by_email(&draft.email)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "Supplier with this email already exists.".into(),
            ));
        }
        let supplier = Supplier::new(
            draft.name,
            draft.contact,
            draft.email,
            draft.phone,
            draft.status,
        )
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
        Ok(self.store.create_supplier(supplier).await?)
    }

    pub async fn list_suppliers(&self) -> Result<Vec<Supplier>, AppError> {
        Ok(self.store.list_suppliers().await?)
    }

    pub async fn update_supplier(
        &self,
        id: Uuid,
        draft: SupplierDraft,
    ) -> Result<Supplier, AppError> {
        let mut supplier = Supplier::new(
            draft.name,
            draft.contact,
            draft.email,
            draft.phone,
            draft.status,
        )
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
        supplier.id = id;
        self.store
            .update_supplier(supplier)
            .await?
            .ok_or_else(|| AppError::NotFound("Supplier not found".into()))
    }

    pub async fn delete_supplier(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.store.delete_supplier(id).await?;
        if deleted {
            Ok(())
        } else {
            Err(AppError::NotFound("Supplier not found".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_repo::memory::InMemoryStore;

    fn acme() -> SupplierDraft {
        SupplierDraft {
            name: "Acme".into(),
            contact: "Jo".into(),
            email: "jo@acme.example".into(),
            phone: "555-0100".into(),
            status: None,
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict_even_for_inactive() {
        let store = InMemoryStore::new();
        let svc = SupplierService::new(store);

        let mut first = acme();
        first.status = Some(SupplierStatus::Inactive);
        svc.create_supplier(first).await.unwrap();

        let dup = svc.create_supplier(acme()).await;
        assert!(matches!(dup, Err(AppError::Conflict(_))));

        let mut fresh = acme();
        fresh.email = "sales@acme.example".into();
        assert!(svc.create_supplier(fresh).await.is_ok());
    }

    #[tokio::test]
    async fn update_and_delete_flow() {
        let store = InMemoryStore::new();
        let svc = SupplierService::new(store);
        let created = svc.create_supplier(acme()).await.unwrap();

        let mut changed = acme();
        changed.status = Some(SupplierStatus::Inactive);
        let updated = svc.update_supplier(created.id, changed).await.unwrap();
        assert_eq!(updated.status, SupplierStatus::Inactive);

        svc.delete_supplier(created.id).await.unwrap();
        assert!(matches!(
            svc.delete_supplier(created.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
