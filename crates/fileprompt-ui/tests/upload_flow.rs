mod support;

use fileprompt_ui::core::errors::{ApiError, ErrorCategory, UiError};
use fileprompt_ui::core::events::Topic;
use fileprompt_ui::core::feedback::{Control, FeedbackKind, FeedbackPhase};
use fileprompt_ui::core::store::{AppStore, FileChip};
use fileprompt_ui::core::view::{DropZoneMode, DropZoneRect};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use support::{Endpoint, FakeApi, Harness, file, server_error};

fn label(harness: &Harness, control: &Control) -> Option<String> {
    harness
        .session
        .feedback()
        .phase(control)
        .display()
        .map(|display| display.message.clone())
}

fn toast(harness: &Harness) -> Option<String> {
    harness
        .session
        .feedback()
        .toast()
        .phase()
        .display()
        .map(|display| display.message.clone())
}

#[test]
fn adding_a_name_twice_keeps_the_last_file() {
    let harness = Harness::new(FakeApi::default());
    harness.session.add_files([file("a.txt", "one")]);
    harness.session.add_files([file("b.txt", "two"), file("a.txt", "three!")]);

    let files = harness.session.selection().files();
    assert_eq!(harness.session.selection().names(), vec!["a.txt", "b.txt"]);
    assert_eq!(files[0].blob(), "three!");
    assert_eq!(harness.session.selection().total_size(), 9);
}

#[test]
fn removing_a_missing_name_changes_nothing() {
    let harness = Harness::new(FakeApi::default());
    let notified = Rc::new(Cell::new(0));
    {
        let notified = Rc::clone(&notified);
        harness.session.subscribe(move |topic| {
            if topic == Topic::Selection {
                notified.set(notified.get() + 1);
            }
        });
    }

    harness.session.remove_file("ghost.txt");
    assert!(harness.session.selection().is_empty());
    assert_eq!(notified.get(), 0);

    harness.session.add_files([file("a.txt", "a")]);
    harness.session.remove_file("b.txt");
    assert_eq!(harness.session.selection().names(), vec!["a.txt"]);
    assert_eq!(notified.get(), 1);

    harness.session.remove_file("a.txt");
    assert!(harness.session.selection().is_empty());
    assert_eq!(notified.get(), 2);
}

#[tokio::test]
async fn converting_nothing_fails_locally() {
    let harness = Harness::new(FakeApi::default());

    let err = harness.session.convert().await.unwrap_err();
    assert_eq!(err, UiError::NoFiles);
    assert_eq!(err.category(), ErrorCategory::LocalValidation);
    assert_eq!(harness.api().calls(Endpoint::Upload), 0);
    assert_eq!(label(&harness, &Control::Upload).as_deref(), Some("No files!"));
    assert_eq!(toast(&harness).as_deref(), Some("no files selected"));

    let err = harness.session.save().await.unwrap_err();
    assert_eq!(err, UiError::NoFiles);
    assert_eq!(harness.api().calls(Endpoint::Save), 0);
}

#[tokio::test]
async fn conversion_text_becomes_the_visible_result() {
    let api = FakeApi::default();
    *api.converted.borrow_mut() = Some("X".to_string());
    let harness = Harness::new(api);
    harness
        .session
        .add_files([file("a.txt", "alpha"), file("b.txt", "beta")]);

    let result = harness.session.convert().await.unwrap();
    assert_eq!(result.content, "X");
    assert!(result.visible);
    assert_eq!(harness.session.result().snapshot(), result);
    assert_eq!(
        *harness.api().uploads.borrow(),
        vec![vec!["a.txt".to_string(), "b.txt".to_string()]]
    );

    let upload = harness.session.button(&Control::Upload, "Upload", true);
    assert_eq!(upload.label, "Success!");
    assert_eq!(upload.class, "feedback-success");
    assert!(upload.disabled);

    harness.clock.advance(1_500);
    let upload = harness.session.button(&Control::Upload, "Upload", true);
    assert_eq!(upload.label, "Upload");
    assert!(!upload.disabled);
}

#[tokio::test]
async fn failed_conversion_leaves_the_result_alone() {
    let api = FakeApi::default();
    *api.converted.borrow_mut() = Some("first".to_string());
    let harness = Harness::new(api);
    harness.session.add_files([file("a.txt", "alpha")]);
    harness.session.convert().await.unwrap();
    harness.clock.advance(5_000);

    harness.api().fail_next(Endpoint::Upload, server_error());
    let err = harness.session.convert().await.unwrap_err();

    assert!(matches!(
        err,
        UiError::UploadFailed(ApiError::Status { status: 500, .. })
    ));
    assert_eq!(err.category(), ErrorCategory::HttpStatus);
    assert_eq!(harness.session.result().content(), "first");
    assert!(harness.session.result().is_visible());
    assert_eq!(label(&harness, &Control::Upload).as_deref(), Some("Failed!"));
    assert!(toast(&harness).is_some_and(|message| message.starts_with("upload failed")));
}

#[test]
fn feedback_retrigger_is_ignored_and_reverts_once() {
    let harness = Harness::new(FakeApi::default());
    let feedback_events = Rc::new(Cell::new(0));
    {
        let feedback_events = Rc::clone(&feedback_events);
        harness.session.subscribe(move |topic| {
            if topic == Topic::Feedback {
                feedback_events.set(feedback_events.get() + 1);
            }
        });
    }
    let board = harness.session.feedback();

    assert!(board.flash(&Control::Save, "Saved!", FeedbackKind::Success));
    harness.clock.advance(1_000);
    assert!(!board.flash(&Control::Save, "Failed!", FeedbackKind::Error));
    assert_eq!(label(&harness, &Control::Save).as_deref(), Some("Saved!"));

    assert_eq!(harness.clock.advance(499), 0);
    assert!(board.phase(&Control::Save).is_active());
    assert_eq!(harness.clock.advance(1), 1);
    assert_eq!(board.phase(&Control::Save), FeedbackPhase::Idle);
    assert_eq!(harness.clock.advance(10_000), 0);
    assert_eq!(feedback_events.get(), 2);
}

#[tokio::test]
async fn saving_refreshes_history_once() {
    let harness = Harness::new(FakeApi::default());
    harness.session.add_files([file("a.txt", "alpha"), file("b.txt", "b")]);

    harness.session.save().await.unwrap();

    assert_eq!(harness.api().calls(Endpoint::Save), 1);
    assert_eq!(harness.api().calls(Endpoint::History), 1);
    let entries = harness.session.history().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].original_files, vec!["a.txt", "b.txt"]);
    assert_eq!(label(&harness, &Control::Save).as_deref(), Some("Saved!"));
    assert_eq!(toast(&harness), None);
}

#[tokio::test]
async fn save_with_unexpected_acknowledgement_still_succeeds() {
    let api = FakeApi::default();
    api.opaque_save_ack.set(true);
    let harness = Harness::new(api);
    harness.session.add_files([file("a.txt", "alpha")]);

    harness.session.save().await.unwrap();

    assert_eq!(harness.api().calls(Endpoint::History), 1);
    assert_eq!(harness.session.history().entries().len(), 1);
    assert_eq!(label(&harness, &Control::Save).as_deref(), Some("Saved!"));
    assert_eq!(toast(&harness), None);
}

#[tokio::test]
async fn failed_save_skips_the_refresh() {
    let harness = Harness::new(FakeApi::default());
    harness.session.add_files([file("a.txt", "alpha")]);
    harness
        .api()
        .fail_next(Endpoint::Save, ApiError::Network("offline".to_string()));

    let err = harness.session.save().await.unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Network);
    assert_eq!(harness.api().calls(Endpoint::History), 0);
    assert_eq!(label(&harness, &Control::Save).as_deref(), Some("Failed!"));
}

#[tokio::test]
async fn saved_selection_with_broken_refresh_still_reports_saved() {
    let harness = Harness::new(FakeApi::default());
    harness.session.add_files([file("a.txt", "alpha")]);
    harness.api().fail_next(Endpoint::History, server_error());

    harness.session.save().await.unwrap();

    assert_eq!(label(&harness, &Control::Save).as_deref(), Some("Saved!"));
    assert!(toast(&harness).is_some_and(|message| message.starts_with("history could not be loaded")));
    assert!(harness.session.history().entries().is_empty());
}

#[tokio::test]
async fn reset_clears_selection_result_and_input() {
    let harness = Harness::new(FakeApi::default());
    harness.session.add_files([file("a.txt", "alpha")]);
    harness.session.convert().await.unwrap();
    let generation = harness.session.selection().input_generation();

    let view = harness.session.view_state();
    assert!(view.upload_enabled && view.save_enabled && view.reset_enabled);
    assert_eq!(view.drop_zone, DropZoneMode::FileList);

    harness.session.reset();

    assert!(harness.session.selection().is_empty());
    assert!(!harness.session.result().is_visible());
    assert!(harness.session.selection().input_generation() > generation);
    let view = harness.session.view_state();
    assert!(!view.upload_enabled && !view.save_enabled && !view.reset_enabled);
    assert!(!view.result_visible);
    assert_eq!(view.drop_zone, DropZoneMode::Prompt);
}

#[test]
fn drag_state_follows_pointer_and_drop() {
    let harness = Harness::new(FakeApi::default());
    let zone = DropZoneRect {
        left: 10.0,
        top: 10.0,
        right: 110.0,
        bottom: 60.0,
    };

    harness.session.drag_over();
    assert!(harness.session.view_state().drag_active);

    harness.session.drag_leave(zone, 50.0, 30.0);
    assert!(harness.session.view_state().drag_active);

    harness.session.drag_leave(zone, 110.0, 30.0);
    assert!(!harness.session.view_state().drag_active);

    harness.session.drag_over();
    harness.session.drop_files([file("dropped.md", "# hi")]);
    let view = harness.session.view_state();
    assert!(!view.drag_active);
    assert!(view.upload_enabled);
    assert!(harness.session.selection().contains("dropped.md"));
}

#[tokio::test]
async fn copy_writes_visible_result_only() {
    let api = FakeApi::default();
    *api.converted.borrow_mut() = Some("prompt text".to_string());
    let harness = Harness::new(api);
    let written = Rc::new(RefCell::new(Vec::<String>::new()));

    let sink = Rc::clone(&written);
    let err = harness
        .session
        .copy_result(|text| async move {
            sink.borrow_mut().push(text);
            Ok(())
        })
        .await
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Clipboard);
    assert!(written.borrow().is_empty());
    harness.clock.advance(5_000);

    harness.session.add_files([file("a.txt", "alpha")]);
    harness.session.convert().await.unwrap();
    let sink = Rc::clone(&written);
    harness
        .session
        .copy_result(|text| async move {
            sink.borrow_mut().push(text);
            Ok(())
        })
        .await
        .unwrap();
    assert_eq!(*written.borrow(), vec!["prompt text".to_string()]);
    assert_eq!(label(&harness, &Control::Copy).as_deref(), Some("Copied!"));
    harness.clock.advance(5_000);

    let err = harness
        .session
        .copy_result(|_| async { Err("permission denied".to_string()) })
        .await
        .unwrap_err();
    assert_eq!(err, UiError::Clipboard("permission denied".to_string()));
    assert_eq!(label(&harness, &Control::Copy).as_deref(), Some("Failed!"));
}

#[tokio::test]
async fn snapshot_reflects_the_session() {
    let harness = Harness::new(FakeApi::default());
    harness
        .session
        .add_files([file("a.txt", "alpha"), file("big.bin", &"x".repeat(2048))]);
    harness.session.convert().await.unwrap();

    let store = AppStore::capture(&harness.session);

    assert_eq!(
        store.files,
        vec![
            FileChip {
                name: "a.txt".to_string(),
                size_label: "5 B".to_string(),
            },
            FileChip {
                name: "big.bin".to_string(),
                size_label: "2.0 KiB".to_string(),
            },
        ]
    );
    assert!(store.result.visible);
    assert!(store.view.upload_enabled);
    assert_eq!(store.button(&Control::Upload, true).label, "Success!");
    assert_eq!(store.button(&Control::Save, true).label, "Save");
    assert!(!store.toast.is_active());

    harness.clock.advance(1_500);
    let store = AppStore::capture(&harness.session);
    assert!(store.buttons.is_empty());
}
