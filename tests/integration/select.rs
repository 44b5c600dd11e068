use std::fs;
use std::io::Cursor;

use pagepick::fuzzy::FuzzyMatcher;
use pagepick::paging::record::Record;
use pagepick::paging::{Paginator, Target};
use pagepick::prompter::flows::select_flow::{SelectFlow, SelectOutcome};
use pagepick::prompter::prompter::Prompter;
use serde_json::Value;

use crate::common::{
    make_temp_dir, normalized_lines, playlist_capture, playlist_source, quiet_logger,
    run_with_input, write_capture, write_config,
};

fn collected() -> Vec<Record> {
    Paginator::new(&quiet_logger())
        .collect(&mut playlist_source(), Target::All)
        .unwrap()
}

#[test]
fn search_then_pick_returns_the_record() {
    let records = collected();
    let logger = quiet_logger();
    let mut flow = SelectFlow::new(&records, FuzzyMatcher::default(), &logger);

    Prompter::new()
        .run_with_reader(&mut flow, Cursor::new(b"workout\n1\n"))
        .unwrap();

    let picked = flow.selected_item().expect("a record should be picked");
    assert_eq!(picked.id(), "p3");
    match flow.outcome() {
        SelectOutcome::Selected(candidate) => assert_eq!(candidate.score, 100.0),
        other => panic!("expected selection, got {other:?}"),
    }
}

#[test]
fn search_again_then_exit_option_cancels() {
    let records = collected();
    let logger = quiet_logger();
    let mut flow = SelectFlow::new(&records, FuzzyMatcher::default(), &logger);

    // 2 results for "workout": 3 = search again, then road trip alone: 3 = exit.
    Prompter::new()
        .run_with_reader(&mut flow, Cursor::new(b"workout\n3\nroad trip\n3\n"))
        .unwrap();

    assert_eq!(flow.outcome(), SelectOutcome::Cancelled);
    assert!(flow.selected_item().is_none());
}

#[test]
fn typing_exit_anywhere_cancels() {
    let records = collected();
    let logger = quiet_logger();
    let mut flow = SelectFlow::new(&records, FuzzyMatcher::default(), &logger);

    Prompter::new()
        .run_with_reader(&mut flow, Cursor::new(b"chill\nEXIT\n1\n"))
        .unwrap();

    assert_eq!(flow.outcome(), SelectOutcome::Cancelled);
}

#[test]
fn binary_prints_selected_record_as_json() {
    let dir = make_temp_dir("select");
    write_config(&dir, "all", false);
    write_capture(&dir, &playlist_capture());

    let output = run_with_input(&dir, &[], "workout\n2\n");
    assert!(output.status.success(), "run should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let start = stdout.rfind("{\n").expect("json output");
    let picked: Value = serde_json::from_str(stdout[start..].trim()).unwrap();
    assert_eq!(picked["id"], "p1");
    assert_eq!(picked["name"], "Workout Mix");
}

#[test]
fn binary_watermark_limits_choices_to_new_items() {
    let dir = make_temp_dir("watermark");
    write_config(&dir, "50", false);
    write_capture(&dir, &playlist_capture());
    fs::write(
        dir.join("marks.json"),
        r#"{ "me": "2024-03-01T00:00:00Z" }"#,
    )
    .unwrap();

    let args = ["--account", "me", "--watermarks", "marks.json"];
    let output = run_with_input(&dir, &args, "chill\n");
    assert!(output.status.success());
    let lines = normalized_lines(&output.stdout);
    assert!(
        !lines.iter().any(|l| l.contains("Chill Vibes (")),
        "older playlist should be filtered out"
    );

    let marks: Value =
        serde_json::from_str(&fs::read_to_string(dir.join("marks.json")).unwrap()).unwrap();
    assert_ne!(marks["me"], "2024-03-01T00:00:00Z");

    // Watermark moved to now, so nothing from 2024 is new any more.
    let output = run_with_input(&dir, &args, "");
    let lines = normalized_lines(&output.stdout);
    assert!(lines.contains(&"Nothing to choose from.".to_string()));
}
