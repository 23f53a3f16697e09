use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;

use stockroom_types::domain::supplier::{Supplier, SupplierStatus};
use stockroom_types::ports::Store;

use crate::application::supplier_service::SupplierDraft;
use crate::auth::{authorize, AuthUser, ADMIN_ONLY};
use crate::errors::AppError;

use super::parse_id;
use super::server::AppState;

#[derive(Deserialize)]
pub struct SupplierBody {
    pub name: String,
    pub contact: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub status: Option<SupplierStatus>,
}

impl From<SupplierBody> for SupplierDraft {
    fn from(body: SupplierBody) -> Self {
        Self {
            name: body.name,
            contact: body.contact,
            email: body.email,
            phone: body.phone,
            status: body.status,
        }
    }
}

pub async fn list_suppliers<S: Store>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Supplier>>, AppError> {
    Ok(Json(state.suppliers.list_suppliers().await?))
}

pub async fn create_supplier<S: Store>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<SupplierBody>,
) -> Result<(StatusCode, Json<Supplier>), AppError> {
    authorize(&user, ADMIN_ONLY)?;
    let supplier = state.suppliers.create_supplier(body.into()).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

pub async fn update_supplier<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    Json(body): Json<SupplierBody>,
) -> Result<Json<Supplier>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(state.suppliers.update_supplier(id, body.into()).await?))
}

pub async fn delete_supplier<S: Store>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    authorize(&user, ADMIN_ONLY)?;
    let id = parse_id(&id)?;
    state.suppliers.delete_supplier(id).await?;
    Ok(Json(serde_json::json!({ "message": "Supplier deleted" })))
}
