pub mod middleware;
pub mod uploads;

mod dashboard;
mod orders;
mod products;
mod suppliers;
mod users;

pub mod server;
pub use server::{AppState, HttpServer, HttpServerConfig};

use uuid::Uuid;

use crate::errors::AppError;

fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|e| AppError::BadRequest(e.to_string()))
}

fn bad_request(e: impl std::fmt::Display) -> AppError {
    AppError::BadRequest(e.to_string())
}
