use async_trait::async_trait;
use resthub::{
    dao::{
        memory_repository::InMemoryDao,
        models::{Page, Pageable},
        repository::GenericDao,
    },
    errors::ServiceError,
    resource::models::Entity,
    service::{dao_service::DaoService, repository::GenericService},
    testing::ServiceTestHarness,
};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq)]
struct Note {
    id: Option<Uuid>,
    body: String,
}

impl Entity for Note {
    type Id = Uuid;

    fn id(&self) -> Option<Uuid> {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = Some(id);
    }
}

type NoteService = DaoService<Note, InMemoryDao<Note>>;

fn harness(service: &NoteService) -> ServiceTestHarness<'_, NoteService, Note, Uuid> {
    ServiceTestHarness::new(service)
}

fn edit(mut n: Note) -> Note {
    n.body = "edited".into();
    n
}

fn is_edited(n: &Note) -> bool {
    n.body == "edited"
}

#[tokio::test]
async fn test_create() {
    let service = NoteService::new(InMemoryDao::new());
    let harness = harness(&service);

    let fixture = harness.set_up().await.unwrap();
    harness.check_create(&fixture).await.unwrap();
    harness.tear_down().await.unwrap();
}

#[tokio::test]
async fn test_update() {
    let service = NoteService::new(InMemoryDao::new());
    let harness = harness(&service);

    let fixture = harness.set_up().await.unwrap();
    harness
        .check_update(&fixture, edit, is_edited)
        .await
        .unwrap();
    harness.tear_down().await.unwrap();
}

#[tokio::test]
async fn test_delete() {
    let service = NoteService::new(InMemoryDao::new());
    let harness = harness(&service);

    let fixture = harness.set_up().await.unwrap();
    harness.check_delete(&fixture).await.unwrap();
    harness.tear_down().await.unwrap();
}

#[tokio::test]
async fn test_delete_by_id() {
    let service = NoteService::new(InMemoryDao::new());
    let harness = harness(&service);

    let fixture = harness.set_up().await.unwrap();
    harness.check_delete_by_id(&fixture).await.unwrap();
    harness.tear_down().await.unwrap();
}

#[tokio::test]
async fn test_find_by_id() {
    let service = NoteService::new(InMemoryDao::new());
    let harness = harness(&service);

    let fixture = harness.set_up().await.unwrap();
    harness.check_find_by_id(&fixture).await.unwrap();
    harness.tear_down().await.unwrap();
}

#[tokio::test]
async fn test_find_all_and_count() {
    let service = NoteService::new(InMemoryDao::new());
    let harness = harness(&service);

    let fixture = harness.set_up().await.unwrap();
    harness.check_find_all(&fixture).await.unwrap();
    harness.check_find_page(&fixture).await.unwrap();
    harness.check_count(&fixture).await.unwrap();
    harness.tear_down().await.unwrap();

    assert_eq!(service.count().await.unwrap(), 0);
}

/// Deletes by entity without going through `delete_by_id`, so both paths are
/// distinct code.
struct DirectDeleteService(NoteService);

#[async_trait]
impl GenericService<Note, Uuid> for DirectDeleteService {
    async fn create(&self, entity: Note) -> Result<Note, ServiceError> {
        self.0.create(entity).await
    }

    async fn update(&self, entity: Note) -> Result<Note, ServiceError> {
        self.0.update(entity).await
    }

    async fn delete(&self, entity: &Note) -> Result<(), ServiceError> {
        let id = entity.id.ok_or(ServiceError::EntityNotPersisted)?;
        self.0.dao().delete_by_id(id).await?;
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), ServiceError> {
        self.0.delete_by_id(id).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Note>, ServiceError> {
        self.0.find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<Note>, ServiceError> {
        self.0.find_all().await
    }

    async fn find_page(&self, pageable: Pageable) -> Result<Page<Note>, ServiceError> {
        self.0.find_page(pageable).await
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        self.0.count().await
    }
}

#[tokio::test]
async fn test_overridden_delete_passes_conformance() {
    let service = DirectDeleteService(NoteService::new(InMemoryDao::new()));
    let harness: ServiceTestHarness<'_, _, Note, Uuid> = ServiceTestHarness::new(&service);

    harness.run_all(edit, is_edited).await.unwrap();
    assert_eq!(service.count().await.unwrap(), 0);
}
