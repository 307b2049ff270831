use notecache_core::{
    ManualClock, MemoryNoteStore, Note, NoteService, NoteServiceError, NoteStats, NoteStore,
    NoteValidationError, Priority, SqliteNoteStore, StoreError, StoreResult, RECENT_WINDOW_MS,
};
use std::sync::Arc;

const T: i64 = 1_700_000_000_000;

fn sqlite_service(clock: Arc<ManualClock>) -> NoteService<SqliteNoteStore, Arc<ManualClock>> {
    NoteService::with_clock(SqliteNoteStore::in_memory(), clock)
}

#[tokio::test]
async fn create_assigns_identity_and_timestamp() {
    let clock = Arc::new(ManualClock::new(T));
    let service = sqlite_service(clock.clone());

    let first = service
        .create("  Groceries  ", "milk, eggs", Priority::Medium)
        .await
        .unwrap();
    clock.advance(5);
    let second = service.create("Call", "", Priority::Low).await.unwrap();

    assert_eq!(first.title, "Groceries");
    assert_eq!(first.timestamp, T);
    assert!(first.updated_at.is_none());
    assert_ne!(first.id, second.id);
    assert!(second.timestamp >= first.timestamp);

    let loaded = service.get(&first.id).await.unwrap().unwrap();
    assert_eq!(loaded, first);
}

#[tokio::test]
async fn create_rejects_blank_title_without_writing() {
    let service = NoteService::new(MemoryNoteStore::new());

    let err = service.create(" \n\t", "body", Priority::High).await.unwrap_err();
    assert!(matches!(
        err,
        NoteServiceError::Validation(NoteValidationError::EmptyTitle)
    ));
    assert!(service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_preserves_id_and_timestamp_and_sets_updated_at() {
    let clock = Arc::new(ManualClock::new(T));
    let service = sqlite_service(clock.clone());
    let created = service.create("Draft", "v1", Priority::Low).await.unwrap();

    clock.advance(60_000);
    let updated = service
        .update(&created.id, "Final", "v2", Priority::High)
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.timestamp, created.timestamp);
    assert_eq!(updated.updated_at, Some(T + 60_000));
    assert_eq!(updated.title, "Final");
    assert_eq!(updated.content, "v2");
    assert_eq!(updated.priority, Priority::High);
    assert_eq!(service.get(&created.id).await.unwrap(), Some(updated));
}

#[tokio::test]
async fn update_never_sets_updated_at_before_timestamp() {
    let clock = Arc::new(ManualClock::new(T));
    let service = NoteService::with_clock(MemoryNoteStore::new(), clock.clone());
    let created = service.create("Skewed", "", Priority::Low).await.unwrap();

    clock.set(T - 10_000);
    let updated = service
        .update(&created.id, "Skewed", "", Priority::Low)
        .await
        .unwrap();
    assert_eq!(updated.updated_at, Some(created.timestamp));
}

#[tokio::test]
async fn update_of_missing_id_fails_and_leaves_store_unchanged() {
    let service = NoteService::new(SqliteNoteStore::in_memory());
    service.create("Existing", "", Priority::Medium).await.unwrap();
    let before = service.list().await.unwrap();

    let err = service
        .update("ghost", "Title", "content", Priority::High)
        .await
        .unwrap_err();
    assert!(matches!(err, NoteServiceError::NotFound(ref id) if id == "ghost"));

    assert_eq!(service.list().await.unwrap(), before);
}

#[tokio::test]
async fn update_of_missing_id_reports_not_found_before_title_check() {
    let service = NoteService::new(MemoryNoteStore::new());

    let err = service
        .update("ghost", "   ", "", Priority::Low)
        .await
        .unwrap_err();
    assert!(matches!(err, NoteServiceError::NotFound(ref id) if id == "ghost"));
}

#[tokio::test]
async fn update_rejects_blank_title() {
    let service = NoteService::new(MemoryNoteStore::new());
    let created = service.create("Keep", "", Priority::Low).await.unwrap();

    let err = service
        .update(&created.id, "   ", "", Priority::Low)
        .await
        .unwrap_err();
    assert!(matches!(err, NoteServiceError::Validation(_)));
    assert_eq!(service.get(&created.id).await.unwrap(), Some(created));
}

#[tokio::test]
async fn remove_is_idempotent() {
    let service = NoteService::new(SqliteNoteStore::in_memory());
    let created = service.create("Temp", "", Priority::Low).await.unwrap();

    service.remove(&created.id).await.unwrap();
    assert_eq!(service.get(&created.id).await.unwrap(), None);
    service.remove(&created.id).await.unwrap();
    assert!(service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_and_priority_filter_are_newest_first() {
    let clock = Arc::new(ManualClock::new(T));
    let service = sqlite_service(clock.clone());
    let a = service.create("a", "", Priority::High).await.unwrap();
    clock.advance(1);
    let b = service.create("b", "", Priority::Low).await.unwrap();
    clock.advance(1);
    let c = service.create("c", "", Priority::High).await.unwrap();

    let ids: Vec<String> = service
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|note| note.id)
        .collect();
    assert_eq!(ids, vec![c.id.clone(), b.id, a.id.clone()]);

    let high = service.list_by_priority(Priority::High).await.unwrap();
    assert_eq!(
        high.into_iter().map(|note| note.id).collect::<Vec<_>>(),
        vec![c.id, a.id]
    );
}

#[tokio::test]
async fn stats_on_empty_store_is_all_zero() {
    let service = NoteService::new(SqliteNoteStore::in_memory());
    assert_eq!(service.stats().await.unwrap(), NoteStats::default());
}

#[tokio::test]
async fn stats_counts_priorities_and_recent_week() {
    let clock = Arc::new(ManualClock::new(T));
    let service = sqlite_service(clock.clone());
    service.create("one", "", Priority::High).await.unwrap();
    clock.advance(1);
    service.create("two", "", Priority::High).await.unwrap();
    clock.advance(1);
    service.create("three", "", Priority::Low).await.unwrap();

    let stats = service.stats().await.unwrap();
    assert_eq!(
        stats,
        NoteStats {
            total: 3,
            high: 2,
            medium: 0,
            low: 1,
            recent_week: 3,
        }
    );
}

#[tokio::test]
async fn stats_window_is_measured_from_query_time() {
    let clock = Arc::new(ManualClock::new(T));
    let service = NoteService::with_clock(MemoryNoteStore::new(), clock.clone());
    service.create("old", "", Priority::Medium).await.unwrap();
    clock.advance(RECENT_WINDOW_MS);
    service.create("new", "", Priority::Medium).await.unwrap();

    let stats = service.stats().await.unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.medium, 2);
    assert_eq!(stats.recent_week, 1);
}

struct UnavailableStore;

impl NoteStore for UnavailableStore {
    async fn put(&self, _note: &Note) -> StoreResult<()> {
        Err(StoreError::InvalidData("medium unavailable".to_string()))
    }

    async fn get(&self, _id: &str) -> StoreResult<Option<Note>> {
        Err(StoreError::InvalidData("medium unavailable".to_string()))
    }

    async fn get_all(&self) -> StoreResult<Vec<Note>> {
        Err(StoreError::InvalidData("medium unavailable".to_string()))
    }

    async fn get_by_priority(&self, _priority: Priority) -> StoreResult<Vec<Note>> {
        Err(StoreError::InvalidData("medium unavailable".to_string()))
    }

    async fn delete(&self, _id: &str) -> StoreResult<()> {
        Err(StoreError::InvalidData("medium unavailable".to_string()))
    }
}

#[tokio::test]
async fn store_failures_surface_as_storage_errors() {
    let service = NoteService::new(UnavailableStore);

    let create = service.create("t", "", Priority::Low).await.unwrap_err();
    assert!(matches!(create, NoteServiceError::Storage(_)));
    let update = service.update("id", "t", "", Priority::Low).await.unwrap_err();
    assert!(matches!(update, NoteServiceError::Storage(_)));
    assert!(matches!(
        service.remove("id").await.unwrap_err(),
        NoteServiceError::Storage(_)
    ));
    assert!(matches!(
        service.stats().await.unwrap_err(),
        NoteServiceError::Storage(_)
    ));
}

#[tokio::test]
async fn shared_store_is_visible_through_injected_arc() {
    let store = Arc::new(MemoryNoteStore::new());
    let service = NoteService::new(store.clone());
    let created = service.create("shared", "", Priority::Low).await.unwrap();

    assert_eq!(store.get(&created.id).await.unwrap(), Some(created.clone()));
    assert_eq!(service.store().get_all().await.unwrap(), vec![created]);
}
