//! Tests for the rating panel reducer and its effects.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use mockall::predicate::eq;
use rstest::{fixture, rstest};
use serde_json::json;

use super::{
    ClearOutcome, PanelEffect, PanelEvent, RatingPanel, StoreConnection, ToastEffect, ToastPhase,
    effects::clear_ratings, perform,
};
use crate::rating::{Rating, RatingAxis, Score};
use crate::store::{
    InMemoryDocumentStore, MockDocumentStore, RATINGS_COLLECTION, StoreError, StoreHandle,
};

/// Applies `event`, runs every store effect it causes to completion and
/// returns the toast timer effects that were requested along the way.
async fn dispatch(panel: &mut RatingPanel, event: PanelEvent) -> Vec<ToastEffect> {
    let mut timers = Vec::new();
    let mut pending = vec![event];
    while let Some(next) = pending.pop() {
        for effect in panel.update(next) {
            match effect {
                PanelEffect::Toast(timer) => timers.push(timer),
                store_effect => {
                    let connection = panel.connection().clone();
                    if let Some(outcome) = perform(store_effect, &connection).await {
                        pending.push(outcome);
                    }
                }
            }
        }
    }
    timers
}

/// A connected panel together with the store it writes to.
struct Connected {
    panel: RatingPanel,
    store: Arc<InMemoryDocumentStore>,
}

fn connected_to(store: InMemoryDocumentStore) -> Connected {
    let shared = Arc::new(store);
    let mut panel = RatingPanel::default();
    panel.update(PanelEvent::Connected(StoreHandle::new(shared.clone())));
    Connected {
        panel,
        store: shared,
    }
}

#[fixture]
fn empty_panel() -> Connected {
    connected_to(InMemoryDocumentStore::new())
}

#[fixture]
fn stocked_panel() -> Connected {
    let store = InMemoryDocumentStore::with_documents(
        RATINGS_COLLECTION,
        [
            json!({"id": "Civic", "speed": 4, "handling": 3, "looks": 2}),
            json!({"id": "Mini", "speed": 2, "handling": 5, "looks": 5}),
            json!({"id": "Volvo", "speed": 1, "handling": 2, "looks": 3}),
        ],
    )
    .expect("fixture documents should have ids");
    connected_to(store)
}

fn rating(id: &str, speed: u8, handling: u8, looks: u8) -> Rating {
    Rating::named(id)
        .with_score(RatingAxis::Speed, Score::saturating(speed))
        .with_score(RatingAxis::Handling, Score::saturating(handling))
        .with_score(RatingAxis::Looks, Score::saturating(looks))
}

#[test]
fn new_panel_starts_ready_with_empty_draft() {
    let panel = RatingPanel::default();

    assert!(panel.is_ready());
    assert!(!panel.is_connected());
    assert_eq!(panel.draft(), &Rating::empty());
    assert_eq!(panel.toast().phase(), ToastPhase::Hidden);
}

#[rstest]
fn load_with_empty_query_resets_draft_without_store_call() {
    let mut store = MockDocumentStore::new();
    store.expect_get_document().never();
    let mut panel = RatingPanel::default();
    panel.update(PanelEvent::Connected(StoreHandle::from_store(store)));
    panel.update(PanelEvent::AxisEdited {
        axis: RatingAxis::Looks,
        value: Score::saturating(4),
    });

    let effects = panel.update(PanelEvent::LoadRequested { id: String::new() });

    assert!(
        effects
            .iter()
            .all(|effect| matches!(effect, PanelEffect::Toast(_)))
    );
    assert_eq!(panel.draft(), &Rating::empty());
    assert_eq!(panel.toast().message(), "Search query required.");
    assert!(panel.is_ready());
}

#[rstest]
fn save_without_name_shows_notice_without_store_call() {
    let mut store = MockDocumentStore::new();
    store.expect_set_document().never();
    let mut panel = RatingPanel::default();
    panel.update(PanelEvent::Connected(StoreHandle::from_store(store)));

    let effects = panel.update(PanelEvent::SaveRequested);

    assert_eq!(effects.len(), 1);
    assert!(matches!(effects.first(), Some(PanelEffect::Toast(_))));
    assert_eq!(panel.toast().message(), "Car name required.");
    assert!(panel.is_ready());
}

#[rstest]
fn new_resets_draft_and_announces_it(stocked_panel: Connected) {
    let Connected { mut panel, .. } = stocked_panel;
    panel.update(PanelEvent::NameEdited("Civic".to_owned()));
    panel.update(PanelEvent::AxisEdited {
        axis: RatingAxis::Speed,
        value: Score::MAX,
    });

    panel.update(PanelEvent::NewRequested);

    assert_eq!(panel.draft(), &rating("", 0, 0, 0));
    assert_eq!(panel.toast().message(), "New car rating created.");
}

#[rstest]
#[tokio::test]
async fn saved_draft_loads_back_unchanged(empty_panel: Connected) {
    let Connected { mut panel, .. } = empty_panel;
    panel.update(PanelEvent::NameEdited("Roadster".to_owned()));
    for (axis, value) in [
        (RatingAxis::Speed, 5),
        (RatingAxis::Handling, 4),
        (RatingAxis::Looks, 1),
    ] {
        panel.update(PanelEvent::AxisEdited {
            axis,
            value: Score::saturating(value),
        });
    }
    let saved = panel.draft().clone();

    dispatch(&mut panel, PanelEvent::SaveRequested).await;
    panel.update(PanelEvent::NewRequested);
    dispatch(
        &mut panel,
        PanelEvent::LoadRequested {
            id: "Roadster".to_owned(),
        },
    )
    .await;

    assert_eq!(panel.draft(), &saved);
    assert!(panel.is_ready());
}

#[rstest]
#[case(RatingAxis::Speed)]
#[case(RatingAxis::Handling)]
#[case(RatingAxis::Looks)]
fn axis_edits_are_idempotent_and_isolated(#[case] axis: RatingAxis) {
    let mut panel = RatingPanel::default();
    panel.update(PanelEvent::NameEdited("Civic".to_owned()));
    let before = panel.draft().clone();
    let edit = PanelEvent::AxisEdited {
        axis,
        value: Score::saturating(3),
    };

    panel.update(edit.clone());
    let once = panel.draft().clone();
    panel.update(edit);

    assert_eq!(panel.draft(), &once);
    assert_eq!(panel.draft().score(axis), Score::saturating(3));
    for other in RatingAxis::ALL.into_iter().filter(|other| *other != axis) {
        assert_eq!(panel.draft().score(other), before.score(other));
    }
    assert_eq!(panel.draft().id, "Civic");
}

#[test]
fn repeated_notices_share_one_hide_timer() {
    let mut panel = RatingPanel::default();

    let first = panel.update(PanelEvent::NewRequested);
    let second = panel.update(PanelEvent::SaveRequested);

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
    assert_eq!(panel.toast().phase(), ToastPhase::Visible);
    assert_eq!(panel.toast().message(), "Car name required.");
}

#[rstest]
#[tokio::test]
async fn load_replaces_draft_with_stored_rating(stocked_panel: Connected) {
    let Connected { mut panel, .. } = stocked_panel;
    let effects = panel.update(PanelEvent::LoadRequested {
        id: "Civic".to_owned(),
    });
    assert!(!panel.is_ready());
    assert!(effects.contains(&PanelEffect::Fetch {
        id: "Civic".to_owned()
    }));

    for effect in effects {
        let connection = panel.connection().clone();
        if let Some(outcome) = perform(effect, &connection).await {
            panel.update(outcome);
        }
    }

    assert_eq!(panel.draft(), &rating("Civic", 4, 3, 2));
    assert_eq!(panel.toast().message(), "Car rating loaded: Civic");
    assert!(panel.is_ready());
}

#[rstest]
#[tokio::test]
async fn load_of_missing_rating_keeps_scores_and_restores_ready(empty_panel: Connected) {
    let Connected { mut panel, .. } = empty_panel;
    panel.update(PanelEvent::NameEdited("Tesla".to_owned()));
    panel.update(PanelEvent::AxisEdited {
        axis: RatingAxis::Handling,
        value: Score::saturating(2),
    });

    dispatch(
        &mut panel,
        PanelEvent::LoadRequested {
            id: "Tesla".to_owned(),
        },
    )
    .await;

    assert_eq!(panel.draft(), &rating("Tesla", 0, 2, 0));
    assert_eq!(panel.toast().message(), "Car rating not found: Tesla");
    assert!(panel.is_ready());
}

#[tokio::test]
async fn load_failure_of_any_kind_reads_as_not_found() {
    let mut store = MockDocumentStore::new();
    store
        .expect_get_document()
        .with(eq(RATINGS_COLLECTION), eq("Civic"))
        .times(1)
        .returning(|_, _| {
            Err(StoreError::Backend {
                message: "disk on fire".to_owned(),
            })
        });
    let mut panel = RatingPanel::default();
    panel.update(PanelEvent::Connected(StoreHandle::from_store(store)));

    dispatch(
        &mut panel,
        PanelEvent::LoadRequested {
            id: "Civic".to_owned(),
        },
    )
    .await;

    assert_eq!(panel.toast().message(), "Car rating not found: Civic");
    assert!(panel.is_ready());
}

#[rstest]
#[tokio::test]
async fn delete_all_removes_every_rating(stocked_panel: Connected) {
    let Connected { mut panel, store } = stocked_panel;
    panel.update(PanelEvent::NameEdited("Civic".to_owned()));

    dispatch(&mut panel, PanelEvent::DeleteAllRequested).await;

    assert_eq!(store.document_count(RATINGS_COLLECTION), Ok(0));
    assert_eq!(panel.draft(), &Rating::empty());
    assert_eq!(panel.toast().message(), "Deleted all ratings.");
    assert!(panel.is_ready());
}

#[tokio::test]
async fn clear_ratings_issues_one_delete_per_document() {
    let deletes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&deletes);
    let mut store = MockDocumentStore::new();
    store
        .expect_get_documents()
        .with(eq(RATINGS_COLLECTION))
        .times(1)
        .returning(|_| Ok(vec![json!({"id": "A"}), json!({"id": "B"}), json!({"id": "C"})]));
    store
        .expect_delete_document()
        .times(3)
        .returning(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

    let outcome = clear_ratings(StoreHandle::from_store(store))
        .await
        .expect("listing should succeed");

    assert_eq!(deletes.load(Ordering::SeqCst), 3);
    assert_eq!(outcome.deleted, vec!["A", "B", "C"]);
    assert_eq!(outcome.failed(), 0);
}

#[tokio::test]
async fn clear_ratings_collects_individual_failures() {
    let mut store = MockDocumentStore::new();
    store
        .expect_get_documents()
        .returning(|_| Ok(vec![json!({"id": "A"}), json!({"id": "B"})]));
    store
        .expect_delete_document()
        .with(eq(RATINGS_COLLECTION), eq("A"))
        .returning(|_, _| Ok(()));
    store
        .expect_delete_document()
        .with(eq(RATINGS_COLLECTION), eq("B"))
        .returning(|_, _| {
            Err(StoreError::Backend {
                message: "locked".to_owned(),
            })
        });

    let outcome = clear_ratings(StoreHandle::from_store(store))
        .await
        .expect("listing should succeed");

    assert_eq!(
        outcome,
        ClearOutcome {
            deleted: vec!["A".to_owned()],
            failures: vec![(
                "B".to_owned(),
                StoreError::Backend {
                    message: "locked".to_owned(),
                },
            )],
        }
    );
}

#[rstest]
#[case::load(PanelEvent::LoadRequested { id: "Civic".to_owned() })]
#[case::save(PanelEvent::SaveRequested)]
#[case::delete_all(PanelEvent::DeleteAllRequested)]
fn store_operations_wait_for_the_connection(#[case] event: PanelEvent) {
    let mut panel = RatingPanel::default();
    panel.update(PanelEvent::NameEdited("Civic".to_owned()));

    let effects = panel.update(event);

    assert!(
        effects
            .iter()
            .all(|effect| matches!(effect, PanelEffect::Toast(_)))
    );
    assert_eq!(panel.toast().message(), "Data store is not ready.");
    assert!(panel.is_ready());
    assert_eq!(panel.draft().id, "Civic");
}

#[test]
fn failed_handshake_is_announced_and_stays_pending() {
    let mut panel = RatingPanel::default();

    panel.update(PanelEvent::ConnectFailed("host unavailable".to_owned()));

    assert_eq!(panel.connection(), &StoreConnection::Pending);
    assert_eq!(
        panel.toast().message(),
        "Unable to connect to the data store: host unavailable"
    );
}

#[rstest]
fn save_announces_immediately_and_waits_for_settle(empty_panel: Connected) {
    let Connected { mut panel, .. } = empty_panel;
    panel.update(PanelEvent::NameEdited("Civic".to_owned()));

    let effects = panel.update(PanelEvent::SaveRequested);

    assert!(effects.contains(&PanelEffect::Write {
        rating: Rating::named("Civic"),
    }));
    assert_eq!(panel.toast().message(), "Car rating saved: Civic");
    assert!(!panel.is_ready());

    panel.update(PanelEvent::SaveSettled {
        id: "Civic".to_owned(),
        result: Err(StoreError::Backend {
            message: "read-only".to_owned(),
        }),
    });

    assert!(panel.is_ready());
    assert_eq!(panel.toast().message(), "Car rating saved: Civic");
}

#[tokio::test(start_paused = true)]
async fn toast_timers_run_through_the_full_lifecycle() {
    let mut panel = RatingPanel::default();
    let effects = panel.update(PanelEvent::NewRequested);
    let connection = panel.connection().clone();

    let mut next = effects;
    while let Some(effect) = next.pop() {
        if let Some(event) = perform(effect, &connection).await {
            next.extend(panel.update(event));
        }
    }

    assert_eq!(panel.toast().phase(), ToastPhase::Hidden);
}

#[test]
fn teardown_invalidates_the_pending_hide_timer() {
    let mut panel = RatingPanel::default();
    let effects = panel.update(PanelEvent::NewRequested);
    let Some(PanelEffect::Toast(ToastEffect::ArmHideTimer { ticket, .. })) = effects.first() else {
        panic!("expected a hide timer, got {effects:?}");
    };
    let stale = *ticket;

    panel.teardown();
    let after = panel.update(PanelEvent::ToastTimerElapsed(stale));

    assert!(after.is_empty());
    assert_eq!(panel.toast().phase(), ToastPhase::Visible);
}
