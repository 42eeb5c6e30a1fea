use super::models::User;
use crate::{
    dao::repository::ResourceGenericDao, errors::ServiceError, resource::models::ResourceId,
    service::repository::GenericService,
};
use async_trait::async_trait;

#[async_trait]
pub trait UserDao: ResourceGenericDao<User> {
    /// Every stored user with this login.
    async fn find_all_by_login(&self, login: &str) -> Result<Vec<User>, ServiceError>;
}

#[async_trait]
pub trait UserService: GenericService<User, ResourceId> {
    /// Returns `None` when no user, or more than one user, has this login.
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, ServiceError>;

    /// Returns the user only when the login resolves to exactly one user and
    /// the password matches its stored credentials.
    async fn authenticate_user(
        &self,
        login: &str,
        password: &str,
    ) -> Result<Option<User>, ServiceError>;

    async fn update_password(&self, id: ResourceId, password: &str)
        -> Result<User, ServiceError>;
}
