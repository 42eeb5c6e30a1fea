use crate::{
    dao::models::{Page, Pageable},
    errors::ServiceError,
    resource::models::Entity,
};
use async_trait::async_trait;

/// CRUD operations on entities of type `T` keyed by `ID`.
///
/// Lookups report a missing entity as `Ok(None)`. Mutations propagate
/// persistence conflicts as errors.
#[async_trait]
pub trait GenericService<T, ID>: Sync + Send
where
    T: Entity<Id = ID>,
    ID: Clone + Send + Sync + 'static,
{
    async fn create(&self, entity: T) -> Result<T, ServiceError>;

    /// Replaces the whole persisted state of the entity with the same id.
    async fn update(&self, entity: T) -> Result<T, ServiceError>;

    async fn delete(&self, entity: &T) -> Result<(), ServiceError> {
        let id = entity.id().ok_or(ServiceError::EntityNotPersisted)?;
        self.delete_by_id(id).await
    }

    async fn delete_by_id(&self, id: ID) -> Result<(), ServiceError>;

    async fn find_by_id(&self, id: ID) -> Result<Option<T>, ServiceError>;

    async fn find_all(&self) -> Result<Vec<T>, ServiceError>;

    async fn find_page(&self, pageable: Pageable) -> Result<Page<T>, ServiceError>;

    async fn count(&self) -> Result<u64, ServiceError>;
}
