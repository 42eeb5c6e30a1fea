use super::{
    models::{Page, Pageable},
    repository::GenericDao,
};
use crate::{
    errors::ServiceError,
    resource::models::{Entity, GeneratedId},
};
use async_trait::async_trait;
use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct InMemoryDao<T: Entity> {
    map: Arc<Mutex<BTreeMap<T::Id, T>>>,
    seq: Arc<AtomicU64>,
}

impl<T: Entity> Default for InMemoryDao<T> {
    fn default() -> Self {
        Self {
            map: Default::default(),
            seq: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl<T: Entity> InMemoryDao<T> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn with_last_seq(seq: u64) -> Self {
        Self {
            map: Default::default(),
            seq: Arc::new(AtomicU64::new(seq)),
        }
    }

    /// Every stored entity matching `pred`, ordered by identifier.
    pub(crate) async fn filter<F>(&self, pred: F) -> Vec<T>
    where
        F: Fn(&T) -> bool + Send,
    {
        let lock = self.map.lock().await;
        lock.values().filter(|v| pred(*v)).cloned().collect()
    }
}

#[async_trait]
impl<T> GenericDao<T, T::Id> for InMemoryDao<T>
where
    T: Entity,
    T::Id: GeneratedId,
{
    async fn insert(&self, mut entity: T) -> Result<T, ServiceError> {
        if entity.is_persisted() {
            return Err(ServiceError::EntityAlreadyPersisted);
        }

        let seq = self.seq.fetch_add(1, Ordering::Relaxed) + 1;
        let id = <T::Id as GeneratedId>::generate(seq).ok_or_else(|| {
            tracing::error!(seq, "Identifier space exhausted");
            ServiceError::IdentifierSpaceExhausted
        })?;

        let mut lock = self.map.lock().await;
        if lock.contains_key(&id) {
            return Err(ServiceError::EntityAlreadyExists);
        }
        entity.set_id(id.clone());
        lock.insert(id, entity.clone());
        drop(lock);

        Ok(entity)
    }

    async fn update(&self, entity: T) -> Result<T, ServiceError> {
        let id = entity.id().ok_or(ServiceError::EntityNotPersisted)?;

        let mut lock = self.map.lock().await;
        match lock.get_mut(&id) {
            Some(v) => *v = entity.clone(),
            None => return Err(ServiceError::EntityNotFound),
        }
        drop(lock);

        Ok(entity)
    }

    async fn find_by_id(&self, id: T::Id) -> Result<Option<T>, ServiceError> {
        let lock = self.map.lock().await;
        Ok(lock.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<T>, ServiceError> {
        let lock = self.map.lock().await;
        Ok(lock.values().cloned().collect())
    }

    async fn find_page(&self, pageable: Pageable) -> Result<Page<T>, ServiceError> {
        let lock = self.map.lock().await;

        let offset = usize::try_from(pageable.offset()).unwrap_or(usize::MAX);
        let size = usize::try_from(pageable.size).unwrap_or(usize::MAX);
        let content = lock.values().skip(offset).take(size).cloned().collect();

        Ok(Page {
            content,
            number: pageable.page,
            size: pageable.size,
            total_elements: lock.len() as u64,
        })
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        let lock = self.map.lock().await;
        Ok(lock.len() as u64)
    }

    async fn delete_by_id(&self, id: T::Id) -> Result<bool, ServiceError> {
        let mut lock = self.map.lock().await;
        let removed = lock.remove(&id);
        drop(lock);

        Ok(removed.is_some())
    }
}
