//! Conformance checks every [`GenericService`] implementation should pass.
//!
//! Each check receives the [`Fixture`] produced by
//! [`ServiceTestHarness::set_up`] and panics with a descriptive message when
//! the service breaks a CRUD invariant. Backend errors are returned as-is.
//!
//! ```ignore
//! #[tokio::test]
//! async fn test_delete() {
//!     let service = my_service();
//!     let harness = ServiceTestHarness::new(&service);
//!
//!     let fixture = harness.set_up().await.unwrap();
//!     harness.check_delete(&fixture).await.unwrap();
//!     harness.tear_down().await.unwrap();
//! }
//! ```

use crate::{
    dao::models::Pageable, errors::ServiceError, resource::models::Entity,
    service::repository::GenericService, setup::BoxedError,
};
use std::{any::type_name, fmt::Debug, marker::PhantomData};

/// State created by [`ServiceTestHarness::set_up`] for a single check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture<ID> {
    pub id: ID,
}

type Factory<'a, T> = Box<dyn Fn() -> Result<T, BoxedError> + Send + Sync + 'a>;

pub struct ServiceTestHarness<'a, S, T, ID> {
    service: &'a S,
    factory: Factory<'a, T>,
    _pid: PhantomData<fn() -> ID>,
}

macro_rules! isolated {
    ($this:ident, $fx:ident => $check:expr) => {{
        let $fx = $this.set_up().await?;
        let res = $check.await;
        $this.tear_down().await?;
        res?;
    }};
}

impl<'a, S, T, ID> ServiceTestHarness<'a, S, T, ID>
where
    S: GenericService<T, ID>,
    T: Entity<Id = ID> + PartialEq + Debug,
    ID: Clone + PartialEq + Debug + Send + Sync + 'static,
{
    /// Fixtures are blank `T::default()` instances.
    pub fn new(service: &'a S) -> Self
    where
        T: Default,
    {
        Self::with_factory(service, || Ok(T::default()))
    }

    pub fn with_factory<F>(service: &'a S, factory: F) -> Self
    where
        F: Fn() -> Result<T, BoxedError> + Send + Sync + 'a,
    {
        Self {
            service,
            factory: Box::new(factory),
            _pid: PhantomData,
        }
    }

    #[inline]
    pub fn service(&self) -> &S {
        self.service
    }

    fn build(&self) -> Result<T, ServiceError> {
        (self.factory)().map_err(|e| {
            tracing::error!(
                entity = type_name::<T>(),
                error = e.to_string(),
                "Failed to build test fixture"
            );
            ServiceError::FixtureCreationFailed(e.to_string())
        })
    }

    /// Creates one fixture entity through the service and captures its id.
    pub async fn set_up(&self) -> Result<Fixture<ID>, ServiceError> {
        let entity = self.service.create(self.build()?).await?;

        let id = entity.id().ok_or_else(|| {
            ServiceError::FixtureCreationFailed(format!(
                "created {} has no identifier",
                type_name::<T>()
            ))
        })?;

        Ok(Fixture { id })
    }

    /// Deletes every stored entity one by one, so that per-entity delete
    /// paths run exactly as a client would trigger them.
    pub async fn tear_down(&self) -> Result<(), ServiceError> {
        for entity in self.service.find_all().await? {
            self.service.delete(&entity).await?;
        }

        Ok(())
    }

    pub async fn check_create(&self, _fixture: &Fixture<ID>) -> Result<(), ServiceError> {
        let entity = self.service.create(self.build()?).await?;
        let id = entity.id();
        assert!(id.is_some(), "Created resource has no identifier!");

        let found = match id {
            Some(id) => self.service.find_by_id(id).await?,
            None => None,
        };
        assert!(found.is_some(), "Resource not created!");

        Ok(())
    }

    /// `mutate` applies an entity-specific change, `verify` tells whether a
    /// given entity carries it.
    pub async fn check_update<M, V>(
        &self,
        fixture: &Fixture<ID>,
        mutate: M,
        verify: V,
    ) -> Result<(), ServiceError>
    where
        M: FnOnce(T) -> T,
        V: Fn(&T) -> bool,
    {
        let entity = self.service.find_by_id(fixture.id.clone()).await?;
        let entity = match entity {
            Some(v) => v,
            None => panic!("Resource should not be null!"),
        };

        let updated = self.service.update(mutate(entity)).await?;
        assert_eq!(
            updated.id(),
            Some(fixture.id.clone()),
            "Resource id changed on update!"
        );
        assert!(verify(&updated), "Updated resource was not returned!");

        let found = self.service.find_by_id(fixture.id.clone()).await?;
        assert!(
            found.as_ref().is_some_and(&verify),
            "Resource not updated!"
        );

        Ok(())
    }

    pub async fn check_delete(&self, fixture: &Fixture<ID>) -> Result<(), ServiceError> {
        let entity = self.service.find_by_id(fixture.id.clone()).await?;
        let entity = match entity {
            Some(v) => v,
            None => panic!("Resource should not be null!"),
        };
        self.service.delete(&entity).await?;

        let found = self.service.find_by_id(fixture.id.clone()).await?;
        assert!(found.is_none(), "Resource not deleted!");

        Ok(())
    }

    pub async fn check_delete_by_id(&self, fixture: &Fixture<ID>) -> Result<(), ServiceError> {
        self.service.delete_by_id(fixture.id.clone()).await?;

        let found = self.service.find_by_id(fixture.id.clone()).await?;
        assert!(found.is_none(), "Resource not deleted!");

        Ok(())
    }

    pub async fn check_find_by_id(&self, fixture: &Fixture<ID>) -> Result<(), ServiceError> {
        let first = self.service.find_by_id(fixture.id.clone()).await?;
        let first = match first {
            Some(v) => v,
            None => panic!("Resource should not be null!"),
        };
        assert_eq!(
            first.id(),
            Some(fixture.id.clone()),
            "Resource id and resourceId should be equals!"
        );

        let second = self.service.find_by_id(fixture.id.clone()).await?;
        assert_eq!(
            Some(first),
            second,
            "Consecutive lookups returned different resources!"
        );

        Ok(())
    }

    pub async fn check_find_all(&self, fixture: &Fixture<ID>) -> Result<(), ServiceError> {
        let all = self.service.find_all().await?;
        assert!(!all.is_empty(), "No resources found!");
        assert!(
            all.iter().any(|e| e.id().as_ref() == Some(&fixture.id)),
            "Fixture resource missing from find_all!"
        );

        Ok(())
    }

    pub async fn check_find_page(&self, _fixture: &Fixture<ID>) -> Result<(), ServiceError> {
        let page = self.service.find_page(Pageable::new(0, 1)).await?;
        assert_eq!(page.as_slice().len(), 1, "First page should hold one resource!");

        let count = self.service.count().await?;
        assert_eq!(
            page.total_elements, count,
            "Page total and count should be equals!"
        );

        Ok(())
    }

    pub async fn check_count(&self, _fixture: &Fixture<ID>) -> Result<(), ServiceError> {
        let count = self.service.count().await?;
        assert!(count >= 1, "No resources found!");

        Ok(())
    }

    /// Runs every check, each one between its own `set_up` and `tear_down`.
    pub async fn run_all<M, V>(&self, mutate: M, verify: V) -> Result<(), ServiceError>
    where
        M: FnOnce(T) -> T,
        V: Fn(&T) -> bool,
    {
        isolated!(self, fx => self.check_create(&fx));
        isolated!(self, fx => self.check_update(&fx, mutate, verify));
        isolated!(self, fx => self.check_delete(&fx));
        isolated!(self, fx => self.check_delete_by_id(&fx));
        isolated!(self, fx => self.check_find_by_id(&fx));
        isolated!(self, fx => self.check_find_all(&fx));
        isolated!(self, fx => self.check_find_page(&fx));
        isolated!(self, fx => self.check_count(&fx));

        Ok(())
    }
}
