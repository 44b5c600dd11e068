use pagepick::errors::Error;
use pagepick::paging::record::Record;
use pagepick::paging::{Cursor, Page, PageRequest, Paginator, Target};

use crate::common::{
    make_temp_dir, normalized_lines, playlist_capture, playlist_source, quiet_logger,
    read_log_contents, run_with_input, write_capture, write_config,
};

#[test]
fn recorded_playlists_collect_in_source_order() {
    let mut source = playlist_source();
    let records: Vec<Record> = Paginator::new(&quiet_logger())
        .collect(&mut source, Target::All)
        .unwrap();

    let ids: Vec<_> = records.iter().map(Record::id).collect();
    assert_eq!(ids, vec!["p1", "p2", "p3", "p4"]);
    assert_eq!(source.fetches(), 2);
}

#[test]
fn bounded_collect_stops_after_first_page() {
    let mut source = playlist_source();
    let records: Vec<Record> = Paginator::new(&quiet_logger())
        .collect(&mut source, Target::Count(2))
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(source.fetches(), 1);
}

#[test]
fn closures_work_as_page_sources() {
    let mut calls = 0;
    let mut source = |request: PageRequest| -> pagepick::errors::Result<Page<String>> {
        calls += 1;
        match request.cursor {
            None => Ok(Page::new(
                vec!["a".to_string(), "b".to_string()],
                Some(Cursor::new("2")),
            )),
            Some(_) => Ok(Page::last(vec!["c".to_string()])),
        }
    };
    let items: Vec<String> = Paginator::new(&quiet_logger())
        .collect(&mut source, Target::Count(10))
        .unwrap();

    assert_eq!(items, vec!["a", "b", "c"]);
    assert_eq!(calls, 2);
}

#[test]
fn failing_closure_is_source_unavailable() {
    let mut source = |_request: PageRequest| -> pagepick::errors::Result<Page<String>> {
        Err(Error::Io(std::io::Error::other("HTTP 503")))
    };
    let err = Paginator::new(&quiet_logger())
        .collect(&mut source, Target::All)
        .unwrap_err();
    assert_eq!(err.to_string(), "Source unavailable: I/O error: HTTP 503");
}

#[test]
fn binary_honours_limit_flag_and_logs_fetches() {
    let dir = make_temp_dir("paging");
    write_config(&dir, "50", true);
    write_capture(&dir, &playlist_capture());

    let output = run_with_input(&dir, &["--limit", "2"], "workout\n");
    assert!(output.status.success(), "run should succeed");

    let lines = normalized_lines(&output.stdout);
    assert!(lines.iter().any(|l| l.starts_with("1. Workout Mix (")));
    assert!(!lines.iter().any(|l| l.starts_with("1. workout (")));
    assert!(lines.contains(&"No selection".to_string()));

    let log = read_log_contents(&dir).expect("log file should exist");
    assert!(log.contains("[paging] Fetch #1"));
    assert!(!log.contains("Fetch #2"));
}

#[test]
fn binary_reports_missing_capture() {
    let dir = make_temp_dir("paging-missing");
    write_config(&dir, "50", false);

    let output = run_with_input(&dir, &[], "");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Source unavailable: Failed to read capture"));
}
