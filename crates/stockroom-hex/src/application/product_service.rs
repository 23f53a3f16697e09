use serde::Serialize;
use uuid::Uuid;

use stockroom_types::domain::product::Product;
use stockroom_types::domain::supplier::Supplier;
use stockroom_types::ports::{ProductRepository, SupplierRepository};

use crate::errors::AppError;

#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub sku: String,
    pub quantity: i64,
    pub price_cents: i64,
    pub category: Option<String>,
    pub supplier_id: Option<Uuid>,
    pub image_url: Option<String>,
}

/// Product as served by the list endpoint, with the supplier reference
/// expanded. A dangling reference expands to `null`.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub quantity: i64,
    pub price_cents: i64,
    pub category: Option<String>,
    pub supplier: Option<Supplier>,
    pub image_url: Option<String>,
}

pub struct ProductService<S> {
    store: S,
}

impl<S: ProductRepository + SupplierRepository> ProductService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn create_product(&self, draft: ProductDraft) -> Result<Product, AppError> {
        let product = Product::new(
            draft.name,
            draft.sku,
            draft.quantity,
            draft.price_cents,
            draft.category,
            draft.supplier_id,
            draft.image_url,
        )
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
        Ok(self.store.create_product(product).await?)
    }

    pub async fn list_products(&self) -> Result<Vec<ProductView>, AppError> {
        let products = self.store.list_products().await?;
        let mut out = Vec::with_capacity(products.len());
        for p in products {
            let supplier = match p.supplier_id {
                Some(id) => self.store.get_supplier(id).await?,
                None => None,
            };
            out.push(ProductView {
                id: p.id,
                name: p.name,
                sku: p.sku,
                quantity: p.quantity,
                price_cents: p.price_cents,
                category: p.category,
                supplier,
                image_url: p.image_url,
            });
        }
        Ok(out)
    }

    /// Full field update keyed by id.
    pub async fn update_product(&self, id: Uuid, draft: ProductDraft) -> Result<Product, AppError> {
        let mut product = Product::new(
            draft.name,
            draft.sku,
            draft.quantity,
            draft.price_cents,
            draft.category,
            draft.supplier_id,
            draft.image_url,
        )
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
        product.id = id;
        self.store
            .update_product(product)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".into()))
    }

    pub async fn delete_product(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.store.delete_product(id).await?;
        if deleted {
            Ok(())
        } else {
            Err(AppError::NotFound("Product not found".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_repo::memory::InMemoryStore;
    use stockroom_types::domain::supplier::Supplier;

    fn widget_draft(supplier_id: Option<Uuid>) -> ProductDraft {
        ProductDraft {
            name: "Widget".into(),
            sku: "W-1".into(),
            quantity: 5,
            price_cents: 500,
            category: Some("tools".into()),
            supplier_id,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn list_expands_supplier_and_tolerates_dangling_refs() {
        let store = InMemoryStore::new();
        let supplier = store
            .create_supplier(
                Supplier::new(
                    "Acme".into(),
                    "Jo".into(),
                    "jo@acme.example".into(),
                    "555-0100".into(),
                    None,
                )
                .unwrap(),
            )
            .await
            .unwrap();
        let svc = ProductService::new(store.clone());

        svc.create_product(widget_draft(Some(supplier.id)))
            .await
            .unwrap();
        let listed = svc.list_products().await.unwrap();
        assert_eq!(listed[0].supplier.as_ref().unwrap().name, "Acme");

        store.delete_supplier(supplier.id).await.unwrap();
        let listed = svc.list_products().await.unwrap();
        assert!(listed[0].supplier.is_none());
    }

    #[tokio::test]
    async fn update_overwrites_and_missing_id_is_not_found() {
        let store = InMemoryStore::new();
        let svc = ProductService::new(store.clone());

        let created = svc.create_product(widget_draft(None)).await.unwrap();
        let mut changed = widget_draft(None);
        changed.quantity = 42;
        let updated = svc.update_product(created.id, changed.clone()).await.unwrap();
        assert_eq!(updated.quantity, 42);
        assert_eq!(updated.id, created.id);

        let missing = svc.update_product(Uuid::new_v4(), changed).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn create_rejects_invalid_fields() {
        let store = InMemoryStore::new();
        let svc = ProductService::new(store);
        let mut bad = widget_draft(None);
        bad.quantity = -1;
        assert!(matches!(
            svc.create_product(bad).await,
            Err(AppError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn delete_flow() {
        let store = InMemoryStore::new();
        let svc = ProductService::new(store);
        let created = svc.create_product(widget_draft(None)).await.unwrap();
        svc.delete_product(created.id).await.unwrap();
        assert!(matches!(
            svc.delete_product(created.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
