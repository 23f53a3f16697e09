use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::user::{User, UserStatus};
use crate::ports::RepoError;

#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    async fn create_user(&self, user: User) -> Result<User, RepoError>;
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, RepoError>;
    async fn list_users(&self) -> Result<Vec<User>, RepoError>;
    async fn delete_user(&self, id: Uuid) -> Result<bool, RepoError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Status is the only mutable user field; role never changes.
    async fn set_user_status(
        &self,
        id: Uuid,
        status: UserStatus,
    ) -> Result<Option<User>, RepoError>;
}
