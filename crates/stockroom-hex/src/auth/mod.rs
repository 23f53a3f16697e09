pub mod authorize;
pub mod token;

pub use authorize::{authorize, ADMIN_ONLY};
pub use token::{Claims, TokenSigner};

use stockroom_types::domain::user::Role;
use uuid::Uuid;

/// Verified caller identity, attached to the request by the auth middleware.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}
