mod common;

use tilecut_core::config::{SessionConfig, ZoomPolicy};
use tilecut_core::geometry::{PixelRect, Point};
use tilecut_core::navigation::{Direction, NavOutcome};
use tilecut_core::selection::{BoxSize, SelectionBox};
use tilecut_core::session::{CommitOutcome, EditorSession};
use tilecut_core::sync::SyncEvent;

use common::{click, file_names, open_primary, write_corrupt, write_image};

fn committed(outcome: CommitOutcome) -> tilecut_core::history::CropRecord {
    match outcome {
        CommitOutcome::Committed(record) => record,
        other => panic!("expected a commit, got {other:?}"),
    }
}

#[test]
fn test_click_clamp_and_commit() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "field.png", 1000, 800);
    let mut session = open_primary(dir.path());
    assert_eq!(session.viewport().fit_scale(), 0.5);

    click(&mut session, 100.0, 100.0);
    let record = committed(session.confirm_crop().unwrap());

    assert_eq!(record.rect, PixelRect::new(0, 0, 640, 640));
    assert_eq!(record.sequence, 1);
    let expected = dir.path().join("cutoff").join("field_cut_1.png");
    assert_eq!(record.output_path, expected);

    let written = image::open(&expected).unwrap();
    assert_eq!((written.width(), written.height()), (640, 640));
    assert!(session.selection().selection().is_none());
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_commit_clamps_even_without_pointer_up() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "field.png", 1000, 800);
    let mut session = open_primary(dir.path());

    session.pointer_down(Point::new(490.0, 390.0));
    let record = committed(session.confirm_crop().unwrap());
    assert_eq!(record.rect, PixelRect::new(360, 160, 1000, 800));
}

#[test]
fn test_sequence_numbers_and_navigation_reset() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "a.png", 1000, 800);
    write_image(dir.path(), "b.png", 1000, 800);
    let mut session = open_primary(dir.path());

    let mut seqs = Vec::new();
    for x in [100.0, 250.0, 400.0] {
        click(&mut session, x, 200.0);
        seqs.push(committed(session.confirm_crop().unwrap()).sequence);
    }
    assert_eq!(seqs, vec![1, 2, 3]);
    assert_eq!(session.history().len(), 3);

    let report = session.navigate(Direction::Next);
    assert_eq!(report.outcome, NavOutcome::Moved(1));
    assert!(session.history().is_empty());
    assert_eq!(session.history().next_sequence(), 1);

    click(&mut session, 100.0, 100.0);
    assert_eq!(committed(session.confirm_crop().unwrap()).sequence, 1);

    // Files from the first image are untouched by the reset.
    assert_eq!(
        file_names(&dir.path().join("cutoff")),
        vec!["a_cut_1.png", "a_cut_2.png", "a_cut_3.png", "b_cut_1.png"]
    );
}

#[test]
fn test_commit_without_selection_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "a.png", 1000, 800);
    let mut session = open_primary(dir.path());

    assert_eq!(session.confirm_crop().unwrap(), CommitOutcome::NoSelection);
    assert!(session.history().is_empty());
    assert!(file_names(&dir.path().join("cutoff")).is_empty());

    // A cleared selection behaves the same.
    click(&mut session, 100.0, 100.0);
    session.clear_selection();
    assert_eq!(session.confirm_crop().unwrap(), CommitOutcome::NoSelection);
    assert!(file_names(&dir.path().join("cutoff")).is_empty());
}

#[test]
fn test_commit_without_image_is_noop() {
    let mut session = EditorSession::primary(&SessionConfig::default());
    session.pointer_down(Point::new(10.0, 10.0));
    assert_eq!(session.confirm_crop().unwrap(), CommitOutcome::NoImage);
}

#[test]
fn test_sync_to_reference_viewport() {
    let primary_dir = tempfile::tempdir().unwrap();
    let reference_dir = tempfile::tempdir().unwrap();
    write_image(primary_dir.path(), "scene.png", 1000, 800);
    write_image(reference_dir.path(), "scene_ir.png", 1000, 800);

    let config = SessionConfig::default();
    let mut primary = open_primary(primary_dir.path());
    let rx = primary.subscribe();

    let mut reference = EditorSession::reference(&config);
    reference.open_folder(reference_dir.path()).unwrap();
    let ref_out = primary_dir.path().join("cutoff").join("reference");
    reference.set_output_dir(&ref_out);

    // Two commits elsewhere, then the third at the top-left corner.
    for _ in 0..2 {
        click(&mut primary, 400.0, 300.0);
        committed(primary.confirm_crop().unwrap());
    }
    click(&mut primary, 100.0, 100.0);
    let record = committed(primary.confirm_crop().unwrap());
    assert_eq!(record.sequence, 3);

    let events: Vec<SyncEvent> = rx.try_iter().collect();
    assert_eq!(events.len(), 3);
    let event = events[2];
    assert_eq!(
        event,
        SyncEvent {
            center_x: 320.0,
            center_y: 320.0,
            sequence: 3
        }
    );

    let raw = SelectionBox::new(Point::new(event.center_x, event.center_y), BoxSize::REFERENCE);
    assert_eq!(raw.rect(), PixelRect::new(-30, -30, 670, 670));

    let synced = committed(reference.apply_sync(event).unwrap());
    assert_eq!(synced.sequence, 3);
    assert_eq!(synced.rect, PixelRect::new(0, 0, 700, 700));
    assert_eq!(synced.output_path, ref_out.join("scene_ir_cut_3.png"));

    let written = image::open(&synced.output_path).unwrap();
    assert_eq!((written.width(), written.height()), (700, 700));
    assert_eq!(reference.history().records().last().unwrap().sequence, 3);
}

#[test]
fn test_sync_uses_coordinates_verbatim_regardless_of_zoom() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "ref.png", 2000, 1500);

    let mut reference = EditorSession::reference(&SessionConfig::default());
    reference.open_folder(dir.path()).unwrap();
    reference.refit([300.0, 300.0]);
    reference.zoom_by(1.0).unwrap();
    reference.set_output_dir(dir.path().join("out"));

    let event = SyncEvent {
        center_x: 1000.0,
        center_y: 700.0,
        sequence: 5,
    };
    let synced = committed(reference.apply_sync(event).unwrap());
    assert_eq!(synced.rect, PixelRect::new(650, 350, 1350, 1050));
    assert!(dir.path().join("out").join("ref_cut_5.png").exists());
}

#[test]
fn test_sync_without_reference_image_is_noop() {
    let out = tempfile::tempdir().unwrap();
    let mut reference = EditorSession::reference(&SessionConfig::default());
    reference.set_output_dir(out.path());

    let event = SyncEvent {
        center_x: 320.0,
        center_y: 320.0,
        sequence: 1,
    };
    assert_eq!(reference.apply_sync(event).unwrap(), CommitOutcome::NoImage);
    assert!(file_names(out.path()).is_empty());
}

#[test]
fn test_navigation_boundaries_keep_state() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "a.png", 1000, 800);
    write_image(dir.path(), "b.png", 1000, 800);
    let mut session = open_primary(dir.path());

    click(&mut session, 200.0, 200.0);
    let before = *session.selection().selection().unwrap();

    let report = session.navigate(Direction::Prev);
    assert_eq!(report.outcome, NavOutcome::AtStart);
    assert_eq!(session.images().position(), 0);
    assert_eq!(*session.selection().selection().unwrap(), before);

    assert!(session.navigate(Direction::Next).outcome.moved());
    click(&mut session, 200.0, 200.0);
    committed(session.confirm_crop().unwrap());

    let report = session.navigate(Direction::Next);
    assert_eq!(report.outcome, NavOutcome::AtEnd);
    assert_eq!(session.images().position(), 1);
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_navigation_skips_unreadable_images() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "a.png", 64, 64);
    write_corrupt(dir.path(), "b.png");
    write_image(dir.path(), "c.png", 64, 64);
    let mut session = open_primary(dir.path());

    let report = session.navigate(Direction::Next);
    assert_eq!(report.outcome, NavOutcome::Moved(2));
    assert_eq!(report.skipped.len(), 1);
    assert!(report.skipped[0].0.ends_with("b.png"));
    assert_eq!(session.image_ref().unwrap().file_name(), "c.png");
}

#[test]
fn test_navigation_past_trailing_unreadable_stays_put() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "a.png", 64, 64);
    write_corrupt(dir.path(), "z.png");
    let mut session = open_primary(dir.path());

    let report = session.navigate(Direction::Next);
    assert_eq!(report.outcome, NavOutcome::AtEnd);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(session.images().position(), 0);
    assert_eq!(session.image_ref().unwrap().file_name(), "a.png");
}

#[test]
fn test_open_folder_skips_leading_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    write_corrupt(dir.path(), "a.jpg");
    write_image(dir.path(), "b.png", 32, 32);
    let mut session = EditorSession::primary(&SessionConfig::default());

    let report = session.open_folder(dir.path()).unwrap();
    assert_eq!(report.outcome, NavOutcome::Moved(1));
    assert_eq!(report.skipped.len(), 1);
    assert!(dir.path().join("cutoff").is_dir());
}

#[test]
fn test_open_folder_without_readable_images_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_corrupt(dir.path(), "a.png");
    let mut session = EditorSession::primary(&SessionConfig::default());
    assert!(session.open_folder(dir.path()).is_err());
    assert!(session.image().is_none());
}

#[test]
fn test_zoom_policy_on_navigation() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "a.png", 100, 100);
    write_image(dir.path(), "b.png", 100, 100);
    write_image(dir.path(), "c.png", 100, 100);

    let mut session = open_primary(dir.path());
    session.zoom_by(1.0).unwrap();
    session.navigate(Direction::Next);
    assert_eq!(session.viewport().zoom(), 1.0);

    let config = SessionConfig {
        zoom_policy: ZoomPolicy::Retain,
        ..SessionConfig::default()
    };
    session.apply_config(&config);
    session.zoom_by(1.0).unwrap();
    session.navigate(Direction::Next);
    assert_eq!(session.viewport().zoom(), 2.0);
}

#[test]
fn test_zoom_out_of_range_leaves_session_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "a.png", 100, 100);
    let mut session = open_primary(dir.path());

    assert!(session.zoom_by(4.5).is_err());
    assert_eq!(session.viewport().zoom(), 1.0);
}

#[test]
fn test_preview_follows_selection() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "a.png", 1000, 800);
    let mut session = open_primary(dir.path());
    assert!(session.preview().is_none());

    click(&mut session, 200.0, 200.0);
    let preview = session.preview().unwrap();
    assert!(preview.width() <= 100 && preview.height() <= 100);
}

#[test]
fn test_match_reference_name() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "IMG_0001.png", 32, 32);
    let mut reference = EditorSession::reference(&SessionConfig::default());
    reference.open_folder(dir.path()).unwrap();

    let renamed = reference.match_to("plot_12").unwrap();
    assert_eq!(renamed, dir.path().join("plot_12_compare.png"));
    assert!(renamed.exists());
    assert_eq!(reference.image_ref().unwrap().path(), renamed.as_path());
    assert_eq!(reference.images().current().unwrap(), renamed.as_path());
}

#[test]
fn test_match_reference_name_collision_keeps_files() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "a.png", 32, 32);
    write_image(dir.path(), "plot_compare.png", 32, 32);
    let mut reference = EditorSession::reference(&SessionConfig::default());
    reference.open_folder(dir.path()).unwrap();
    assert_eq!(reference.image_ref().unwrap().file_name(), "a.png");

    assert!(reference.match_to("plot").is_err());
    assert_eq!(file_names(dir.path()), vec!["a.png", "plot_compare.png"]);
    assert_eq!(reference.image_ref().unwrap().file_name(), "a.png");
}

#[test]
fn test_failed_write_keeps_selection_and_sequence() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "a.png", 1000, 800);
    let mut session = open_primary(dir.path());

    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"plain file").unwrap();
    session.set_output_dir(blocker.join("out"));

    click(&mut session, 200.0, 200.0);
    assert!(session.confirm_crop().is_err());
    assert!(session.selection().selection().is_some());
    assert!(session.history().is_empty());
    assert_eq!(session.history().next_sequence(), 1);

    session.set_output_dir(dir.path().join("out"));
    let record = committed(session.confirm_crop().unwrap());
    assert_eq!(record.sequence, 1);
    assert!(dir.path().join("out").join("a_cut_1.png").exists());
}

#[test]
fn test_revisited_image_reports_overwritten_crop() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "a.png", 1000, 800);
    write_image(dir.path(), "b.png", 1000, 800);
    let mut session = open_primary(dir.path());

    click(&mut session, 200.0, 200.0);
    let first = committed(session.confirm_crop().unwrap());
    assert!(!first.replaced);

    session.navigate(Direction::Next);
    session.navigate(Direction::Prev);
    click(&mut session, 300.0, 300.0);
    let second = committed(session.confirm_crop().unwrap());
    assert_eq!(second.sequence, 1);
    assert_eq!(second.output_path, first.output_path);
    assert!(second.replaced);
}
