use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SupplierStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    pub contact: String,
    /// Unique across active and inactive suppliers; enforced at creation.
    pub email: String,
    pub phone: String,
    pub status: SupplierStatus,
}

impl Supplier {
    pub fn new(
        name: String,
        contact: String,
        email: String,
        phone: String,
        status: Option<SupplierStatus>,
    ) -> anyhow::Result<Self> {
        if name.trim().is_empty() {
            anyhow::bail!("supplier name empty");
        }
        if !email.contains('@') {
            anyhow::bail!("invalid email");
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            contact,
            email,
            phone,
            status: status.unwrap_or(SupplierStatus::Active),
        })
    }
}
