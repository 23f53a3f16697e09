use stockroom_types::domain::user::Role;

use crate::auth::AuthUser;
use crate::errors::AppError;

pub const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// The role gate: pure membership check against the operation's allowed set.
/// Every role-restricted handler goes through here rather than re-implementing
/// the comparison.
pub fn authorize(user: &AuthUser, allowed: &[Role]) -> Result<(), AppError> {
    if allowed.contains(&user.role) {
        return Ok(());
    }
    let names: Vec<&str> = allowed.iter().map(Role::as_str).collect();
    Err(AppError::Forbidden(format!(
        "Access denied. Required role(s): {}",
        names.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn caller(role: Role) -> AuthUser {
        AuthUser {
            id: Uuid::new_v4(),
            role,
        }
    }

    #[test]
    fn member_of_allowed_set_passes() {
        assert!(authorize(&caller(Role::Admin), ADMIN_ONLY).is_ok());
        assert!(authorize(&caller(Role::Employee), &[Role::Admin, Role::Employee]).is_ok());
    }

    #[test]
    fn outsider_is_forbidden_and_told_the_required_roles() {
        let err = authorize(&caller(Role::Employee), ADMIN_ONLY).unwrap_err();
        match err {
            AppError::Forbidden(msg) => assert!(msg.contains("admin")),
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }
}
