use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use stockroom_types::domain::product::Product;
use stockroom_types::ports::Store;

use crate::application::product_service::{ProductDraft, ProductView};
use crate::auth::{authorize, AuthUser, ADMIN_ONLY};
use crate::errors::AppError;

use super::server::AppState;
use super::{bad_request, parse_id};

pub async fn list_products<S: Store>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<ProductView>>, AppError> {
    Ok(Json(state.products.list_products().await?))
}

/// Admin-only; multipart so the catalog entry can carry its image in the same
/// request. Text fields: name, sku, quantity, price_cents, category,
/// supplier_id. File field: image.
pub async fn create_product<S: Store>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Product>), AppError> {
    authorize(&user, ADMIN_ONLY)?;

    let mut name = None;
    let mut sku = None;
    let mut quantity = None;
    let mut price_cents = None;
    let mut category = None;
    let mut supplier_id = None;
    let mut image: Option<(String, axum::body::Bytes)> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        let field_name = field.name().map(str::to_owned);
        match field_name.as_deref() {
            Some("name") => name = Some(field.text().await.map_err(bad_request)?),
            Some("sku") => sku = Some(field.text().await.map_err(bad_request)?),
            Some("quantity") => {
                let raw = field.text().await.map_err(bad_request)?;
                quantity = Some(parse_int(&raw, "quantity")?);
            }
            Some("price_cents") => {
                let raw = field.text().await.map_err(bad_request)?;
                price_cents = Some(parse_int(&raw, "price_cents")?);
            }
            Some("category") => {
                let raw = field.text().await.map_err(bad_request)?;
                if !raw.is_empty() {
                    category = Some(raw);
                }
            }
            Some("supplier_id") => {
                let raw = field.text().await.map_err(bad_request)?;
                if !raw.is_empty() {
                    supplier_id = Some(parse_id(&raw)?);
                }
            }
            Some("image") => {
                let filename = field.file_name().unwrap_or("image").to_string();
                let bytes = field.bytes().await.map_err(bad_request)?;
                image = Some((filename, bytes));
            }
            _ => {}
        }
    }

    let image_url = match image {
        Some((filename, bytes)) => Some(
            state
                .images
                .save(&filename, &bytes)
                .await
                .map_err(AppError::Internal)?,
        ),
        None => None,
    };

    let draft = ProductDraft {
        name: name.ok_or_else(|| missing("name"))?,
        sku: sku.ok_or_else(|| missing("sku"))?,
        quantity: quantity.ok_or_else(|| missing("quantity"))?,
        price_cents: price_cents.ok_or_else(|| missing("price_cents"))?,
        category,
        supplier_id,
        image_url,
    };

    let product = state.products.create_product(draft).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[derive(Deserialize)]
pub struct ProductBody {
    pub name: String,
    pub sku: String,
    pub quantity: i64,
    pub price_cents: i64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub supplier_id: Option<Uuid>,
    #[serde(default)]
    pub image_url: Option<String>,
}

pub async fn update_product<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    Json(body): Json<ProductBody>,
) -> Result<Json<Product>, AppError> {
    let id = parse_id(&id)?;
    let draft = ProductDraft {
        name: body.name,
        sku: body.sku,
        quantity: body.quantity,
        price_cents: body.price_cents,
        category: body.category,
        supplier_id: body.supplier_id,
        image_url: body.image_url,
    };
    Ok(Json(state.products.update_product(id, draft).await?))
}

pub async fn delete_product<S: Store>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    authorize(&user, ADMIN_ONLY)?;
    let id = parse_id(&id)?;
    state.products.delete_product(id).await?;
    Ok(Json(serde_json::json!({ "message": "Product deleted" })))
}

fn parse_int(raw: &str, field: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("{field} must be an integer")))
}

fn missing(field: &str) -> AppError {
    AppError::BadRequest(format!("{field} is required"))
}
