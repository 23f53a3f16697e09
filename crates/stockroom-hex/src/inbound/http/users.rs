use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use stockroom_types::domain::user::{Role, UserStatus, UserView};
use stockroom_types::ports::Store;

use crate::errors::AppError;

use super::middleware::require_admin;
use super::server::AppState;
use super::parse_id;

/// Employee management; every route here is admin-only.
pub fn admin_routes<S: Store>() -> Router<AppState<S>> {
    Router::new()
        .route("/users/register", post(register::<S>))
        .route("/users/employees", get(list_employees::<S>))
        .route(
            "/users/employees/{id}",
            get(get_employee::<S>)
                .delete(delete_employee::<S>)
                .patch(update_status::<S>),
        )
        .route_layer(axum::middleware::from_fn(require_admin))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserView,
}

pub async fn login<S: Store>(
    State(state): State<AppState<S>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (token, user) = state.users.login(&payload.email, &payload.password).await?;
    Ok(Json(LoginResponse { token, user }))
}

/// Tokens are stateless; logout is the client discarding its copy.
pub async fn logout() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Logged out successfully" }))
}

#[derive(Deserialize)]
struct RegisterRequest {
    name: String,
    email: String,
    password: String,
    role: Option<Role>,
}

async fn register<S: Store>(
    State(state): State<AppState<S>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserView>), AppError> {
    let user = state
        .users
        .register(payload.name, payload.email, payload.password, payload.role)
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn list_employees<S: Store>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<UserView>>, AppError> {
    Ok(Json(state.users.list_employees().await?))
}

async fn get_employee<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<UserView>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(state.users.get_employee(id).await?))
}

async fn delete_employee<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = parse_id(&id)?;
    state.users.delete_employee(id).await?;
    Ok(Json(
        serde_json::json!({ "message": "Employee deleted successfully" }),
    ))
}

#[derive(Deserialize)]
struct StatusRequest {
    status: UserStatus,
}

async fn update_status<S: Store>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    Json(payload): Json<StatusRequest>,
) -> Result<Json<UserView>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(state.users.set_status(id, payload.status).await?))
}
