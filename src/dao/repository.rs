use super::models::{Page, Pageable};
use crate::{
    errors::ServiceError,
    resource::models::{Entity, Resource, ResourceId},
};
use async_trait::async_trait;

/// Keyed storage of entities of type `T`.
#[async_trait]
pub trait GenericDao<T, ID>: Sync + Send
where
    T: Entity<Id = ID>,
    ID: Clone + Send + Sync + 'static,
{
    /// Stores a transient entity and returns it with its identifier assigned.
    async fn insert(&self, entity: T) -> Result<T, ServiceError>;

    async fn update(&self, entity: T) -> Result<T, ServiceError>;

    async fn find_by_id(&self, id: ID) -> Result<Option<T>, ServiceError>;

    async fn find_all(&self) -> Result<Vec<T>, ServiceError>;

    async fn find_page(&self, pageable: Pageable) -> Result<Page<T>, ServiceError> {
        let all = self.find_all().await?;
        Ok(Page::from_slice_of(all, pageable))
    }

    async fn count(&self) -> Result<u64, ServiceError>;

    /// Returns `false` when nothing was stored under `id`.
    async fn delete_by_id(&self, id: ID) -> Result<bool, ServiceError>;

    async fn exists(&self, id: ID) -> Result<bool, ServiceError> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}

/// A [`GenericDao`] of resources, keyed by [`ResourceId`].
pub trait ResourceGenericDao<T: Resource>: GenericDao<T, ResourceId> {}

impl<T, D> ResourceGenericDao<T> for D
where
    T: Resource,
    D: GenericDao<T, ResourceId>,
{
}
