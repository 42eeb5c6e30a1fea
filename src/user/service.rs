use super::{
    models::User,
    repository::{UserDao, UserService},
};
use crate::{
    dao::models::{Page, Pageable},
    errors::ServiceError,
    resource::models::ResourceId,
    service::{dao_service::DaoService, repository::GenericService},
    setup::ServiceConfig,
};
use async_trait::async_trait;
use chrono::Utc;
use tokio::{sync::Mutex, task::spawn_blocking};

/// [`UserService`] storing bcrypt password hashes through a [`UserDao`].
pub struct DefaultUserService<D: UserDao> {
    inner: DaoService<User, D>,
    bcrypt_cost: u32,
    /// Held across the login check and the write that depends on it.
    login_lock: Mutex<()>,
}

impl<D: UserDao> DefaultUserService<D> {
    #[inline]
    pub fn new(dao: D, bcrypt_cost: u32) -> Self {
        Self {
            inner: DaoService::new(dao),
            bcrypt_cost,
            login_lock: Mutex::new(()),
        }
    }

    #[inline]
    pub fn from_config(dao: D, config: &ServiceConfig) -> Self {
        Self::new(dao, config.bcrypt_cost)
    }

    #[inline]
    pub fn dao(&self) -> &D {
        self.inner.dao()
    }

    async fn hash_password(&self, password: String) -> Result<String, ServiceError> {
        let cost = self.bcrypt_cost;

        spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| {
                tracing::error!(error = e.to_string(), "Failed to spawn blocking");
                ServiceError::BcryptHashFailed
            })?
            .map_err(|e| {
                tracing::error!(error = e.to_string(), "Failed to hash password");
                ServiceError::BcryptHashFailed
            })
    }

    async fn verify_password(&self, user: &User, password: &str) -> Result<bool, ServiceError> {
        let password = password.to_owned();
        let hash = user.password.clone();

        let res = spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| {
                tracing::error!(error = e.to_string(), "Failed to spawn blocking");
                ServiceError::BcryptVerifyFailed
            })?;

        match res {
            Ok(v) => Ok(v),
            Err(e) => {
                tracing::warn!(
                    user_id = ?user.id,
                    error = e.to_string(),
                    "Stored password hash could not be verified"
                );
                Ok(false)
            }
        }
    }

    /// Fails if a user other than `except` already uses `login`.
    async fn ensure_login_free(
        &self,
        login: &str,
        except: Option<ResourceId>,
    ) -> Result<(), ServiceError> {
        let taken = self
            .dao()
            .find_all_by_login(login)
            .await?
            .iter()
            .any(|u| u.id != except);

        if taken {
            return Err(ServiceError::EntityAlreadyExists);
        }

        Ok(())
    }
}

#[async_trait]
impl<D: UserDao> GenericService<User, ResourceId> for DefaultUserService<D> {
    async fn create(&self, mut user: User) -> Result<User, ServiceError> {
        if user.id.is_some() {
            return Err(ServiceError::EntityAlreadyPersisted);
        }
        user.password = self.hash_password(user.password).await?;

        let now = Utc::now();
        user.created_at = now;
        user.updated_at = now;

        let _guard = self.login_lock.lock().await;
        self.ensure_login_free(&user.login, None).await?;

        self.inner.create(user).await
    }

    async fn update(&self, mut user: User) -> Result<User, ServiceError> {
        let id = user.id.ok_or(ServiceError::EntityNotPersisted)?;
        let stored = self
            .inner
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::EntityNotFound)?;

        if user.password != stored.password {
            user.password = self.hash_password(user.password).await?;
        }

        user.created_at = stored.created_at;
        user.updated_at = Utc::now();

        let _guard = self.login_lock.lock().await;
        if user.login != stored.login {
            self.ensure_login_free(&user.login, Some(id)).await?;
        }

        self.inner.update(user).await
    }

    async fn delete_by_id(&self, id: ResourceId) -> Result<(), ServiceError> {
        self.inner.delete_by_id(id).await
    }

    async fn find_by_id(&self, id: ResourceId) -> Result<Option<User>, ServiceError> {
        self.inner.find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<User>, ServiceError> {
        self.inner.find_all().await
    }

    async fn find_page(&self, pageable: Pageable) -> Result<Page<User>, ServiceError> {
        self.inner.find_page(pageable).await
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        self.inner.count().await
    }
}

#[async_trait]
impl<D: UserDao> UserService for DefaultUserService<D> {
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, ServiceError> {
        let mut users = self.dao().find_all_by_login(login).await?;

        match users.len() {
            0 | 1 => Ok(users.pop()),
            n => {
                tracing::warn!(login, matches = n, "Login matches more than one user");
                Ok(None)
            }
        }
    }

    async fn authenticate_user(
        &self,
        login: &str,
        password: &str,
    ) -> Result<Option<User>, ServiceError> {
        let user = match self.find_by_login(login).await? {
            Some(v) => v,
            None => return Ok(None),
        };

        if self.verify_password(&user, password).await? {
            Ok(Some(user))
        } else {
            tracing::debug!(user_id = ?user.id, "Authentication rejected");
            Ok(None)
        }
    }

    async fn update_password(
        &self,
        id: ResourceId,
        password: &str,
    ) -> Result<User, ServiceError> {
        let mut user = self
            .inner
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::EntityNotFound)?;

        user.password = self.hash_password(password.to_owned()).await?;
        user.updated_at = Utc::now();

        self.inner.update(user).await
    }
}
