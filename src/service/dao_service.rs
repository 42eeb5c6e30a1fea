use super::repository::GenericService;
use crate::{
    dao::{
        models::{Page, Pageable},
        repository::GenericDao,
    },
    errors::ServiceError,
    resource::models::Entity,
};
use async_trait::async_trait;
use std::{any::type_name, fmt::Debug, marker::PhantomData};

/// [`GenericService`] delegating every operation to a [`GenericDao`].
pub struct DaoService<T, D> {
    dao: D,
    _pt: PhantomData<fn() -> T>,
}

impl<T, D: Clone> Clone for DaoService<T, D> {
    fn clone(&self) -> Self {
        Self::new(self.dao.clone())
    }
}

impl<T, D> DaoService<T, D> {
    #[inline]
    pub fn new(dao: D) -> Self {
        Self {
            dao,
            _pt: PhantomData,
        }
    }

    #[inline]
    pub fn dao(&self) -> &D {
        &self.dao
    }
}

#[async_trait]
impl<T, ID, D> GenericService<T, ID> for DaoService<T, D>
where
    T: Entity<Id = ID>,
    ID: Clone + Debug + Send + Sync + 'static,
    D: GenericDao<T, ID>,
{
    async fn create(&self, entity: T) -> Result<T, ServiceError> {
        if entity.is_persisted() {
            return Err(ServiceError::EntityAlreadyPersisted);
        }

        let entity = self.dao.insert(entity).await?;
        tracing::debug!(
            entity = type_name::<T>(),
            id = ?entity.id(),
            "Entity created"
        );

        Ok(entity)
    }

    async fn update(&self, entity: T) -> Result<T, ServiceError> {
        if !entity.is_persisted() {
            return Err(ServiceError::EntityNotPersisted);
        }

        let entity = self.dao.update(entity).await?;
        tracing::debug!(
            entity = type_name::<T>(),
            id = ?entity.id(),
            "Entity updated"
        );

        Ok(entity)
    }

    async fn delete_by_id(&self, id: ID) -> Result<(), ServiceError> {
        if !self.dao.delete_by_id(id.clone()).await? {
            return Err(ServiceError::EntityNotFound);
        }
        tracing::debug!(entity = type_name::<T>(), id = ?id, "Entity deleted");

        Ok(())
    }

    async fn find_by_id(&self, id: ID) -> Result<Option<T>, ServiceError> {
        self.dao.find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<T>, ServiceError> {
        self.dao.find_all().await
    }

    async fn find_page(&self, pageable: Pageable) -> Result<Page<T>, ServiceError> {
        self.dao.find_page(pageable).await
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        self.dao.count().await
    }
}
