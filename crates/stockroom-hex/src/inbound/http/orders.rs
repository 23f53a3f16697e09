use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use stockroom_types::domain::order::{Order, OrderItem, OrderStatus};
use stockroom_types::ports::Store;

use crate::application::order_service::{OrderDraft, OrderView};
use crate::errors::AppError;

use super::parse_id;
use super::server::AppState;

/// Creation and correction share one body; correction is keyed by the path
/// id and overwrites every field here.
#[derive(Deserialize)]
pub struct OrderBody {
    pub order_number: String,
    pub customer: String,
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    pub total_cents: i64,
}

impl From<OrderBody> for OrderDraft {
    fn from(body: OrderBody) -> Self {
        Self {
            order_number: body.order_number,
            customer: body.customer,
            items: body.items,
            status: body.status.unwrap_or(OrderStatus::Pending),
            total_cents: body.total_cents,
        }
    }
}

pub async fn list_orders<S: Store>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<OrderView>>, AppError> {
    Ok(Json(state.orders.list_orders().await?))
}

pub async fn place_order<S: Store>(
    State(state): State<AppState<S>>,
    Json(body): Json<OrderBody>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let order = state.orders.place_order(None, body.into()).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn correct_order<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    Json(body): Json<OrderBody>,
) -> Result<Json<Order>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(state.orders.place_order(Some(id), body.into()).await?))
}

pub async fn delete_order<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = parse_id(&id)?;
    state.orders.delete_order(id).await?;
    Ok(Json(serde_json::json!({ "message": "Order deleted" })))
}
