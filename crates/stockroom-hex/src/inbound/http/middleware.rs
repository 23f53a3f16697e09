use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use axum::Extension;

use crate::auth::{authorize, AuthUser, TokenSigner, ADMIN_ONLY};
use crate::errors::AppError;

#[derive(Clone)]
pub struct AuthState {
    pub signer: Arc<TokenSigner>,
}

/// Bearer-token check for every protected route. A missing or garbled header
/// is Unauthenticated; a bad or expired token is Forbidden. On success the
/// verified identity rides along in the request extensions.
pub async fn authenticate(
    State(state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthenticated("Access token not provided".into()))?;

    let token = header_value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Unauthenticated("Access token not provided".into()))?;

    let user = state.signer.verify(token)?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Route-level admin gate; the employee-management routes hang behind this.
pub async fn require_admin(
    Extension(user): Extension<AuthUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    authorize(&user, ADMIN_ONLY)?;
    Ok(next.run(request).await)
}
