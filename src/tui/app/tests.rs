//! Tests for the rating TUI application model.

use std::any::Any;
use std::sync::Arc;

use bubbletea_rs::Model;
use crossterm::event::{KeyCode, KeyModifiers};
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::panel::{PanelEvent, ToastPhase};
use crate::rating::Score;
use crate::store::{InMemoryDocumentStore, RATINGS_COLLECTION, StoreHandle};
use crate::tui::components::SliderAction;
use crate::tui::components::test_utils::strip_ansi_codes;

fn key(code: KeyCode) -> Box<dyn Any + Send> {
    Box::new(bubbletea_rs::event::KeyMsg {
        key: code,
        modifiers: KeyModifiers::NONE,
    })
}

/// Awaits `cmd` and returns the panel event it reported.
async fn settle(cmd: Option<Cmd>) -> PanelEvent {
    let msg = cmd
        .expect("a command should be returned")
        .await
        .expect("the command should report a message");
    match msg.downcast_ref::<AppMsg>() {
        Some(AppMsg::Panel(event)) => event.clone(),
        other => panic!("expected a panel event, got {other:?}"),
    }
}

#[fixture]
fn app() -> RatingApp {
    RatingApp::with_dimensions(ToastTimings::default(), 80, 24)
}

/// An app whose panel is connected to an in-memory store.
struct Connected {
    app: RatingApp,
    _store: Arc<InMemoryDocumentStore>,
}

#[fixture]
fn connected_app() -> Connected {
    let store = Arc::new(
        InMemoryDocumentStore::with_documents(
            RATINGS_COLLECTION,
            [json!({"id": "Civic", "speed": 4, "handling": 3, "looks": 2})],
        )
        .expect("fixture documents should have ids"),
    );
    let mut rating_app = RatingApp::with_dimensions(ToastTimings::default(), 80, 24);
    rating_app.handle_message(&AppMsg::Panel(PanelEvent::Connected(StoreHandle::new(
        store.clone(),
    ))));
    Connected {
        app: rating_app,
        _store: store,
    }
}

#[rstest]
fn focus_cycles_through_name_and_sliders(mut app: RatingApp) {
    assert_eq!(app.focus(), Focus::Name);

    for _ in 0..4 {
        app.handle_message(&AppMsg::FocusNext);
    }
    assert_eq!(app.focus(), Focus::Name);

    app.handle_message(&AppMsg::FocusPrevious);
    assert_eq!(app.focus(), Focus::Slider(RatingAxis::Looks));
}

#[rstest]
fn typing_edits_the_car_name(mut app: RatingApp) {
    for ch in "Civc".chars() {
        app.handle_message(&AppMsg::InsertChar(ch));
    }
    app.handle_message(&AppMsg::DeleteChar);
    app.handle_message(&AppMsg::InsertChar('c'));

    assert_eq!(app.panel().draft().id, "Civc");
}

#[rstest]
fn typing_is_ignored_when_a_slider_has_focus(mut app: RatingApp) {
    app.handle_message(&AppMsg::FocusNext);
    app.handle_message(&AppMsg::InsertChar('x'));

    assert_eq!(app.panel().draft().id, "");
}

#[rstest]
fn slider_actions_edit_the_focused_axis(mut app: RatingApp) {
    app.handle_message(&AppMsg::FocusNext);
    app.handle_message(&AppMsg::FocusNext);
    app.handle_message(&AppMsg::Slider(SliderAction::Set(4)));
    app.handle_message(&AppMsg::Slider(SliderAction::Increment));
    app.handle_message(&AppMsg::Slider(SliderAction::Increment));

    let draft = app.panel().draft();
    assert_eq!(draft.score(RatingAxis::Handling), Score::MAX);
    assert_eq!(draft.score(RatingAxis::Speed), Score::MIN);
}

#[rstest]
fn slider_actions_are_ignored_on_the_name_field(mut app: RatingApp) {
    app.handle_message(&AppMsg::Slider(SliderAction::Maximum));

    assert!(
        RatingAxis::ALL
            .iter()
            .all(|axis| app.panel().draft().score(*axis) == Score::MIN)
    );
}

#[rstest]
#[tokio::test]
async fn load_round_trips_through_the_store(connected_app: Connected) {
    let Connected { mut app, .. } = connected_app;
    for ch in "Civic".chars() {
        app.handle_message(&AppMsg::InsertChar(ch));
    }

    let cmd = app.handle_message(&AppMsg::Load);
    assert!(!app.panel().is_ready());

    let event = settle(cmd).await;
    app.handle_message(&AppMsg::Panel(event));

    assert!(app.panel().is_ready());
    assert_eq!(
        app.panel().draft().score(RatingAxis::Speed),
        Score::saturating(4)
    );
    assert_eq!(app.panel().toast().message(), "Car rating loaded: Civic");
}

#[rstest]
fn edits_are_ignored_while_busy(connected_app: Connected) {
    let Connected { mut app, .. } = connected_app;
    app.handle_message(&AppMsg::InsertChar('C'));
    let _pending = app.handle_message(&AppMsg::Load);

    app.handle_message(&AppMsg::InsertChar('x'));
    app.handle_message(&AppMsg::FocusNext);
    app.handle_message(&AppMsg::Slider(SliderAction::Maximum));
    let save = app.handle_message(&AppMsg::Save);

    assert!(save.is_none());
    assert_eq!(app.panel().draft().id, "C");
    assert_eq!(app.panel().draft().score(RatingAxis::Speed), Score::MIN);
    // Focus changes are not panel input.
    assert_eq!(app.focus(), Focus::Slider(RatingAxis::Speed));
}

#[rstest]
fn save_without_connection_shows_a_notice(mut app: RatingApp) {
    app.handle_message(&AppMsg::InsertChar('A'));

    let cmd = app.handle_message(&AppMsg::Save);

    assert!(cmd.is_some(), "the toast hide timer should be scheduled");
    assert!(app.panel().is_ready());
    assert_eq!(app.panel().toast().phase(), ToastPhase::Visible);
    assert_eq!(
        app.panel().toast().message(),
        "Data store is not ready."
    );
}

#[rstest]
fn quit_cancels_the_toast_timer(mut app: RatingApp) {
    app.handle_message(&AppMsg::New);
    let ticket = app.panel().toast().ticket();

    let cmd = app.handle_message(&AppMsg::Quit);

    assert!(cmd.is_some());
    assert_ne!(app.panel().toast().ticket(), ticket);
}

#[rstest]
fn help_overlay_closes_on_any_key(mut app: RatingApp) {
    app.update(key(KeyCode::F(1)));
    assert!(app.show_help);
    assert!(strip_ansi_codes(&app.view()).contains("Keyboard Shortcuts"));

    app.update(key(KeyCode::Char('x')));

    assert!(!app.show_help);
    assert_eq!(app.panel().draft().id, "", "the closing key is swallowed");
}

#[rstest]
fn keys_route_through_the_focused_control(mut app: RatingApp) {
    app.update(key(KeyCode::Char('Z')));
    app.update(key(KeyCode::Tab));
    app.update(key(KeyCode::Char('3')));

    assert_eq!(app.panel().draft().id, "Z");
    assert_eq!(
        app.panel().draft().score(RatingAxis::Speed),
        Score::saturating(3)
    );
}

#[rstest]
fn view_shows_form_and_status(mut app: RatingApp) {
    for ch in "Mini".chars() {
        app.handle_message(&AppMsg::InsertChar(ch));
    }

    let view = strip_ansi_codes(&app.view());

    assert!(view.starts_with("Car Ratings"));
    assert!(view.contains("> Car: Mini"));
    assert!(view.contains("  Speed      [□□□□□] 0"));
    assert!(view.contains("Store: connecting"));
}

#[rstest]
fn view_is_normalised_to_terminal_size(mut app: RatingApp) {
    app.handle_message(&AppMsg::WindowResized {
        width: 20,
        height: 5,
    });

    let view = app.view();
    let lines: Vec<&str> = view.lines().collect();

    assert_eq!(lines.len(), 5);
    assert!(
        lines
            .iter()
            .all(|line| strip_ansi_codes(line).chars().count() == 19)
    );
}

#[rstest]
fn toast_line_shows_the_latest_notice(mut app: RatingApp) {
    app.handle_message(&AppMsg::New);

    let view = strip_ansi_codes(&app.view());

    assert!(view.contains("» New car rating created."));
}
