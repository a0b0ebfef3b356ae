//! Tests for the ticket service.

use std::sync::{Arc, Mutex as StdMutex};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{CollectionStoreError, MockCollectionStore};
use crate::domain::{TicketPriority, TicketStatus};
use crate::test_support::MutableClock;
use chrono::{DateTime, TimeZone, Utc};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn stored_ticket(id: &str) -> Value {
    json!({
        "id": id,
        "title": "Printer jam",
        "description": "Tray 2 is stuck",
        "priority": "High",
        "status": "Open",
        "assignedTo": "ada@example.com",
        "createdAt": "2025-03-14T08:00:00Z",
        "updatedAt": "2025-03-14T08:30:00Z"
    })
}

/// Store double that keeps the saved collection so assertions can inspect it.
#[derive(Clone, Default)]
struct RecordingStore {
    records: Arc<StdMutex<Vec<Value>>>,
}

impl RecordingStore {
    fn seeded(records: Vec<Value>) -> Self {
        Self {
            records: Arc::new(StdMutex::new(records)),
        }
    }

    fn snapshot(&self) -> Vec<Value> {
        self.records.lock().expect("records lock").clone()
    }
}

#[async_trait]
impl CollectionStore for RecordingStore {
    async fn load(&self, _collection: &CollectionName) -> Result<Vec<Value>, CollectionStoreError> {
        let records = self.snapshot();
        // Give other tasks a chance to interleave between load and save.
        tokio::task::yield_now().await;
        Ok(records)
    }

    async fn save(
        &self,
        _collection: &CollectionName,
        records: Vec<Value>,
    ) -> Result<(), CollectionStoreError> {
        tokio::task::yield_now().await;
        *self.records.lock().expect("records lock") = records;
        Ok(())
    }
}

#[fixture]
fn clock() -> Arc<MutableClock> {
    Arc::new(MutableClock::new(fixture_timestamp()))
}

fn service_over(store: RecordingStore, clock: Arc<MutableClock>) -> TicketService<RecordingStore> {
    TicketService::new(Arc::new(store), clock)
}

fn ticket_id(raw: &str) -> TicketId {
    TicketId::new(raw).expect("ticket id")
}

#[rstest]
#[tokio::test]
async fn list_returns_tickets_in_storage_order(clock: Arc<MutableClock>) {
    let store = RecordingStore::seeded(vec![stored_ticket("b"), stored_ticket("a")]);
    let tickets = service_over(store, clock)
        .list_tickets()
        .await
        .expect("tickets");

    let ids: Vec<_> = tickets.iter().map(|ticket| ticket.id().to_string()).collect();
    assert_eq!(ids, ["b", "a"]);
}

#[rstest]
#[tokio::test]
async fn get_of_unknown_id_is_not_found(clock: Arc<MutableClock>) {
    let store = RecordingStore::seeded(vec![stored_ticket("a")]);
    let err = service_over(store, clock)
        .get_ticket(&ticket_id("zzz"))
        .await
        .expect_err("missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "Ticket not found");
}

#[rstest]
#[tokio::test]
async fn create_appends_and_round_trips(clock: Arc<MutableClock>) {
    let store = RecordingStore::seeded(vec![stored_ticket("a")]);
    let service = service_over(store.clone(), clock);
    let draft = NewTicket::try_new("T", "D", None, None).expect("draft");

    let created = service.create_ticket(draft).await.expect("created");

    assert_eq!(created.priority(), TicketPriority::Medium);
    assert_eq!(created.status(), TicketStatus::Open);
    assert_eq!(created.created_at(), fixture_timestamp());
    assert_eq!(created.created_at(), created.updated_at());
    let fetched = service.get_ticket(created.id()).await.expect("fetched");
    assert_eq!(fetched, created);

    let saved = store.snapshot();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[1]["id"], json!(created.id().to_string()));
}

#[rstest]
#[tokio::test]
async fn created_ids_are_unique(clock: Arc<MutableClock>) {
    let service = service_over(RecordingStore::default(), clock);
    let mut ids = Vec::new();
    for _ in 0..5 {
        let draft = NewTicket::try_new("T", "D", None, None).expect("draft");
        ids.push(service.create_ticket(draft).await.expect("created").id().clone());
    }
    ids.sort_by(|a, b| a.as_ref().cmp(b.as_ref()));
    ids.dedup();
    assert_eq!(ids.len(), 5);
}

#[rstest]
#[tokio::test]
async fn update_changes_only_patched_fields(clock: Arc<MutableClock>) {
    let store = RecordingStore::seeded(vec![stored_ticket("a")]);
    let service = service_over(store.clone(), clock);
    let before = service.get_ticket(&ticket_id("a")).await.expect("before");

    let patch = TicketPatch::from_raw(None, None, None, Some("Closed".to_owned()), None)
        .expect("patch");
    let after = service
        .update_ticket(&ticket_id("a"), patch)
        .await
        .expect("updated");

    assert_eq!(after.status(), TicketStatus::Closed);
    assert_eq!(after.updated_at(), fixture_timestamp());
    assert_eq!(after.title(), before.title());
    assert_eq!(after.assigned_to(), before.assigned_to());
    assert_eq!(after.created_at(), before.created_at());
    assert_eq!(store.snapshot()[0]["status"], json!("Closed"));
}

#[rstest]
#[tokio::test]
async fn update_keeps_updated_at_when_the_clock_goes_backwards(clock: Arc<MutableClock>) {
    let store = RecordingStore::seeded(vec![stored_ticket("a")]);
    let service = service_over(store, clock.clone());
    clock.set(
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0)
            .single()
            .expect("timestamp"),
    );

    let after = service
        .update_ticket(&ticket_id("a"), TicketPatch::default())
        .await
        .expect("updated");
    assert_eq!(after.updated_at().to_rfc3339(), "2025-03-14T08:30:00+00:00");
}

#[rstest]
#[tokio::test]
async fn successive_updates_advance_updated_at(clock: Arc<MutableClock>) {
    let store = RecordingStore::seeded(vec![stored_ticket("a")]);
    let service = service_over(store, clock.clone());

    let first = service
        .update_ticket(&ticket_id("a"), TicketPatch::default())
        .await
        .expect("first");
    clock.advance_seconds(90);
    let second = service
        .update_ticket(&ticket_id("a"), TicketPatch::default())
        .await
        .expect("second");
    assert!(second.updated_at() > first.updated_at());
}

#[rstest]
#[tokio::test]
async fn update_and_delete_of_unknown_id_are_not_found(clock: Arc<MutableClock>) {
    let store = RecordingStore::seeded(vec![stored_ticket("a")]);
    let service = service_over(store.clone(), clock);

    let update = service
        .update_ticket(&ticket_id("zzz"), TicketPatch::default())
        .await
        .expect_err("missing");
    let delete = service
        .delete_ticket(&ticket_id("zzz"))
        .await
        .expect_err("missing");

    assert_eq!(update.code(), ErrorCode::NotFound);
    assert_eq!(delete.code(), ErrorCode::NotFound);
    assert_eq!(store.snapshot().len(), 1);
}

#[rstest]
#[tokio::test]
async fn delete_then_get_is_not_found(clock: Arc<MutableClock>) {
    let store = RecordingStore::seeded(vec![stored_ticket("a"), stored_ticket("b")]);
    let service = service_over(store.clone(), clock);

    service.delete_ticket(&ticket_id("a")).await.expect("deleted");

    let err = service.get_ticket(&ticket_id("a")).await.expect_err("gone");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(store.snapshot().len(), 1);
}

#[rstest]
#[tokio::test]
async fn concurrent_creates_are_all_kept(clock: Arc<MutableClock>) {
    let store = RecordingStore::default();
    let service = service_over(store.clone(), clock);

    let creates = (0..8).map(|n| {
        let service = service.clone();
        async move {
            let draft = NewTicket::try_new(format!("T{n}"), "D", None, None).expect("draft");
            service.create_ticket(draft).await
        }
    });
    for result in futures::future::join_all(creates).await {
        result.expect("created");
    }

    assert_eq!(store.snapshot().len(), 8);
}

#[rstest]
#[tokio::test]
async fn concurrent_updates_are_not_lost(clock: Arc<MutableClock>) {
    let store = RecordingStore::seeded(vec![stored_ticket("a"), stored_ticket("b")]);
    let service = service_over(store.clone(), clock);
    let (a_id, b_id) = (ticket_id("a"), ticket_id("b"));

    let close_a = service.update_ticket(
        &a_id,
        TicketPatch {
            status: Some(TicketStatus::Closed),
            ..TicketPatch::default()
        },
    );
    let retitle_b = service.update_ticket(
        &b_id,
        TicketPatch {
            title: Some("Renamed".to_owned()),
            ..TicketPatch::default()
        },
    );
    let (a, b) = futures::join!(close_a, retitle_b);
    a.expect("a updated");
    b.expect("b updated");

    let saved = store.snapshot();
    assert_eq!(saved[0]["status"], json!("Closed"));
    assert_eq!(saved[1]["title"], json!("Renamed"));
}

#[rstest]
#[tokio::test]
async fn storage_failures_are_internal(clock: Arc<MutableClock>) {
    let mut store = MockCollectionStore::new();
    store.expect_load().returning(|_| Ok(Vec::new()));
    store
        .expect_save()
        .withf(|collection, records| collection.as_str() == "tickets" && records.len() == 1)
        .times(1)
        .returning(|_, _| Err(CollectionStoreError::write("tickets", "disk full")));
    let service = TicketService::new(Arc::new(store), clock);

    let draft = NewTicket::try_new("T", "D", None, None).expect("draft");
    let err = service.create_ticket(draft).await.expect_err("save fails");
    assert_eq!(err.code(), ErrorCode::InternalError);
}
