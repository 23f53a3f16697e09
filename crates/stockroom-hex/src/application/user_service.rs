use std::sync::Arc;

use uuid::Uuid;

use stockroom_types::domain::user::{Role, User, UserStatus, UserView};
use stockroom_types::ports::UserRepository;

use crate::auth::TokenSigner;
use crate::errors::AppError;

pub struct UserService<S> {
    store: S,
    signer: Arc<TokenSigner>,
}

impl<S: UserRepository> UserService<S> {
    pub fn new(store: S, signer: Arc<TokenSigner>) -> Self {
        Self { store, signer }
    }

    /// Unknown email and wrong password are indistinguishable to the caller;
    /// an inactive account is refused even with correct credentials.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, UserView), AppError> {
        let user = self
            .store
            .find_user_by_email(email)
            .await?
            .ok_or_else(|| AppError::Unauthenticated("Invalid email or password".into()))?;

        if user.status == UserStatus::Inactive {
            return Err(AppError::Forbidden(
                "Your account is inactive. Please contact the administrator.".into(),
            ));
        }
        if user.password != password {
            return Err(AppError::Unauthenticated(
                "Invalid email or password".into(),
            ));
        }

        let token = self.signer.sign(&user)?;
        Ok((token, UserView::from(&user)))
    }

    pub async fn register(
        &self,
        name: String,
        email: String,
        password: String,
        role: Option<Role>,
    ) -> Result<UserView, AppError> {
        if self.store.find_user_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("Employee already exists".into()));
        }
        let user = User::new(name, email, password, role.unwrap_or(Role::Employee))
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        let stored = self.store.create_user(user).await?;
        Ok(UserView::from(&stored))
    }

    /// Admin accounts are not employees; they never show up here.
    pub async fn list_employees(&self) -> Result<Vec<UserView>, AppError> {
        let users = self.store.list_users().await?;
        Ok(users
            .iter()
            .filter(|u| u.role == Role::Employee)
            .map(UserView::from)
            .collect())
    }

    pub async fn get_employee(&self, id: Uuid) -> Result<UserView, AppError> {
        let user = self.load_employee(id).await?;
        Ok(UserView::from(&user))
    }

    pub async fn delete_employee(&self, id: Uuid) -> Result<(), AppError> {
        let user = self.load_employee(id).await?;
        self.store.delete_user(user.id).await?;
        Ok(())
    }

    /// Flips Active/Inactive on any account; the role itself is immutable.
    pub async fn set_status(&self, id: Uuid, status: UserStatus) -> Result<UserView, AppError> {
        let user = self
            .store
            .set_user_status(id, status)
            .await?
            .ok_or_else(|| AppError::NotFound("Employee not found".into()))?;
        Ok(UserView::from(&user))
    }

    async fn load_employee(&self, id: Uuid) -> Result<User, AppError> {
        match self.store.get_user(id).await? {
            Some(user) if user.role == Role::Employee => Ok(user),
            _ => Err(AppError::NotFound("Employee not found".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_repo::memory::InMemoryStore;

    fn service(store: InMemoryStore) -> UserService<InMemoryStore> {
        UserService::new(store, Arc::new(TokenSigner::new("test-secret")))
    }

    async fn seed(store: &InMemoryStore, role: Role, status: UserStatus) -> User {
        let mut user = User::new(
            format!("{} user", role.as_str()),
            format!("{}@example.com", role.as_str()),
            "hunter2".into(),
            role,
        )
        .unwrap();
        user.status = status;
        store.create_user(user.clone()).await.unwrap();
        user
    }

    #[tokio::test]
    async fn login_happy_path_returns_token_and_view() {
        let store = InMemoryStore::new();
        seed(&store, Role::Admin, UserStatus::Active).await;
        let svc = service(store);

        let (token, view) = svc.login("admin@example.com", "hunter2").await.unwrap();
        assert!(!token.is_empty());
        assert_eq!(view.role, Role::Admin);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_are_unauthenticated() {
        let store = InMemoryStore::new();
        seed(&store, Role::Admin, UserStatus::Active).await;
        let svc = service(store);

        assert!(matches!(
            svc.login("admin@example.com", "wrong").await,
            Err(AppError::Unauthenticated(_))
        ));
        assert!(matches!(
            svc.login("ghost@example.com", "hunter2").await,
            Err(AppError::Unauthenticated(_))
        ));
    }

    #[tokio::test]
    async fn inactive_user_is_forbidden_even_with_correct_credentials() {
        let store = InMemoryStore::new();
        seed(&store, Role::Employee, UserStatus::Inactive).await;
        let svc = service(store);

        assert!(matches!(
            svc.login("employee@example.com", "hunter2").await,
            Err(AppError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let store = InMemoryStore::new();
        let svc = service(store);

        let view = svc
            .register(
                "Ana".into(),
                "ana@example.com".into(),
                "hunter2".into(),
                None,
            )
            .await
            .unwrap();
        assert_eq!(view.role, Role::Employee);

        let dup = svc
            .register(
                "Ana Again".into(),
                "ana@example.com".into(),
                "other".into(),
                None,
            )
            .await;
        assert!(matches!(dup, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn employee_listing_excludes_admins() {
        let store = InMemoryStore::new();
        seed(&store, Role::Admin, UserStatus::Active).await;
        let emp = seed(&store, Role::Employee, UserStatus::Active).await;
        let svc = service(store);

        let listed = svc.list_employees().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, emp.id);
    }

    #[tokio::test]
    async fn employee_lookup_refuses_admin_ids() {
        let store = InMemoryStore::new();
        let admin = seed(&store, Role::Admin, UserStatus::Active).await;
        let emp = seed(&store, Role::Employee, UserStatus::Active).await;
        let svc = service(store);

        assert!(svc.get_employee(emp.id).await.is_ok());
        assert!(matches!(
            svc.get_employee(admin.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            svc.delete_employee(admin.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn status_flip_then_login_is_refused() {
        let store = InMemoryStore::new();
        let emp = seed(&store, Role::Employee, UserStatus::Active).await;
        let svc = service(store);

        let view = svc.set_status(emp.id, UserStatus::Inactive).await.unwrap();
        assert_eq!(view.status, UserStatus::Inactive);

        assert!(matches!(
            svc.login("employee@example.com", "hunter2").await,
            Err(AppError::Forbidden(_))
        ));
    }
}
