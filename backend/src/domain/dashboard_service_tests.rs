//! Tests for the dashboard service.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::{DraftStatus, ErrorCode, TaskStatus};
use crate::test_support::{MutableClock, fixture_now};

struct Harness {
    service: DashboardService,
    store: Arc<FixtureStore>,
    clock: Arc<MutableClock>,
}

#[fixture]
fn harness() -> Harness {
    let store = Arc::new(FixtureStore::seeded().expect("bundled fixtures decode"));
    let clock = MutableClock::shared();
    let service = DashboardService::new(store.clone(), clock.clone());
    Harness {
        service,
        store,
        clock,
    }
}

#[rstest]
fn complete_task_stamps_completion(harness: Harness) {
    let task = harness.service.complete_task("f7").expect("seeded task");
    assert_eq!(task.status, TaskStatus::Done);
    assert_eq!(task.completed_at, Some(fixture_now()));

    harness.clock.advance_seconds(60);
    let again = harness.service.complete_task("f7").expect("seeded task");
    assert_eq!(again.status, TaskStatus::Done);
    assert_eq!(again.completed_at, Some(fixture_now()));
}

#[rstest]
fn complete_missing_task_leaves_store_unchanged(harness: Harness) {
    let before = harness.store.snapshot();
    let err = harness
        .service
        .complete_task("missing")
        .expect_err("unknown id");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(harness.store.snapshot(), before);
}

#[rstest]
fn update_task_writes_back(harness: Harness) {
    let patch: TaskPatch =
        serde_json::from_str(r#"{"status":"in-progress","title":"Oyster Bay demo"}"#)
            .expect("patch decodes");
    harness.service.update_task("f8", patch).expect("seeded task");
    let stored = harness
        .service
        .tasks()
        .into_iter()
        .find(|task| task.id == "f8")
        .expect("task present");
    assert_eq!(stored.status, TaskStatus::InProgress);
    assert_eq!(stored.title, "Oyster Bay demo");
}

#[rstest]
fn send_then_reject_is_a_conflict(harness: Harness) {
    let sent = harness.service.send_draft("draft-001").expect("seeded draft");
    assert_eq!(sent.status, DraftStatus::Approved);
    assert_eq!(sent.approved_at, Some(fixture_now()));

    let err = harness
        .service
        .reject_draft("draft-001", DraftRejection::default())
        .expect_err("terminal states do not cross");
    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(
        harness.service.drafts()[0].status,
        DraftStatus::Approved
    );
}

#[rstest]
fn reject_records_note(harness: Harness) {
    let draft = harness
        .service
        .reject_draft(
            "draft-002",
            DraftRejection {
                note: Some("too formal".to_owned()),
            },
        )
        .expect("seeded draft");
    assert_eq!(draft.status, DraftStatus::Rejected);
    assert_eq!(draft.rejection_note.as_deref(), Some("too formal"));
    assert_eq!(draft.rejected_at, Some(fixture_now()));
}

#[rstest]
fn missing_draft_is_not_found(harness: Harness) {
    let err = harness.service.send_draft("draft-404").expect_err("unknown id");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
fn record_activity_prepends(harness: Harness) {
    let entry = harness
        .service
        .record_activity(NewActivity {
            text: "Inbox reviewed".to_owned(),
            icon: None,
        })
        .expect("valid entry");
    assert_eq!(entry.time, "9:00 AM");
    let log = harness.service.activity();
    assert_eq!(log.len(), 11);
    assert_eq!(log[0], entry);
}

#[rstest]
fn blank_activity_is_rejected(harness: Harness) {
    let err = harness
        .service
        .record_activity(NewActivity {
            text: " ".to_owned(),
            icon: None,
        })
        .expect_err("blank text");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(harness.service.activity().len(), 10);
}

#[rstest]
fn complete_action_item_stamps_completion(harness: Harness) {
    let item = harness
        .service
        .complete_action_item("ai-017")
        .expect("seeded item");
    assert!(item.is_done());
    assert_eq!(item.completed_at, Some(fixture_now()));
}

#[rstest]
fn update_inbox_status_keeps_absent_fields(harness: Harness) {
    let status = harness.service.update_inbox_status(InboxStatusPatch {
        urgent_count: Some(4),
        ..InboxStatusPatch::default()
    });
    assert_eq!(status.urgent_count, 4);
    assert_eq!(status.pending_count, 3);
    assert!(status.last_reviewed.is_some());
}
