use axum::extract::State;
use axum::Json;
use chrono::Utc;

use stockroom_types::ports::Store;

use crate::application::dashboard_service::DashboardSummary;
use crate::errors::AppError;

use super::server::AppState;

pub async fn summary<S: Store>(
    State(state): State<AppState<S>>,
) -> Result<Json<DashboardSummary>, AppError> {
    Ok(Json(state.dashboard.summary(Utc::now()).await?))
}
